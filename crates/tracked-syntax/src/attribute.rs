use std::fmt::{self, Display, Formatter};

use crate::ty::write_separated;
use crate::{Argument, Span, TypePath};

/// `@Name` or `@Name(arguments)` attached to a declaration or accessor.
#[derive(Clone, Debug, PartialEq)]
pub struct Attribute {
    pub name: TypePath,
    /// `None` when written without parentheses.
    pub arguments: Option<Vec<Argument>>,
    pub span: Span,
}

impl Attribute {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: TypePath::single(name),
            arguments: None,
            span: Span::default(),
        }
    }

    pub fn with_arguments(mut self, arguments: Vec<Argument>) -> Self {
        self.arguments = Some(arguments);
        self
    }

    /// Qualified and bare spellings compare equal: `@Observation.ObservationIgnored`
    /// is named `ObservationIgnored`.
    pub fn is_named(&self, name: &str) -> bool {
        self.name.last_name() == name
    }

    pub fn arguments(&self) -> &[Argument] {
        self.arguments.as_deref().unwrap_or_default()
    }
}

impl Display for Attribute {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "@{}", self.name)?;
        if let Some(arguments) = &self.arguments {
            f.write_str("(")?;
            write_separated(f, arguments, ", ")?;
            f.write_str(")")?;
        }
        Ok(())
    }
}
