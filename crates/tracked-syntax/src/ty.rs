use std::fmt::{self, Display, Formatter};

use crate::Ident;

/// A type expression as written in a type annotation.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum TypeExpr {
    /// `Name`, `Outer.Inner`, `Box<String>`
    Path(TypePath),
    /// `T?`
    Optional(Box<TypeExpr>),
    /// `T!`
    ImplicitlyUnwrappedOptional(Box<TypeExpr>),
    /// `[T]`
    Array(Box<TypeExpr>),
    /// `[K: V]`
    Dictionary(Box<TypeExpr>, Box<TypeExpr>),
    /// `(A, B)`; `()` is the empty tuple.
    Tuple(Vec<TypeExpr>),
    /// `(A, B) -> R`
    Function {
        params: Vec<TypeExpr>,
        ret: Box<TypeExpr>,
    },
}

/// A dotted type name where every segment may carry generic arguments.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct TypePath {
    pub segments: Vec<TypeSegment>,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct TypeSegment {
    pub name: Ident,
    pub generic_args: Vec<TypeExpr>,
}

impl TypeSegment {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: Ident::new(name),
            generic_args: Vec::new(),
        }
    }
}

impl TypePath {
    pub fn single(name: impl Into<String>) -> Self {
        Self {
            segments: vec![TypeSegment::new(name)],
        }
    }

    /// The last dotted component, e.g. `ObservationIgnored` for
    /// `Observation.ObservationIgnored`.
    pub fn last_name(&self) -> &str {
        self.segments
            .last()
            .map(|segment| segment.name.as_str())
            .unwrap_or_default()
    }

    pub fn has_generic_args(&self) -> bool {
        self.segments
            .iter()
            .any(|segment| !segment.generic_args.is_empty())
    }

    /// Appends `arg` to the generic arguments of the last segment.
    pub fn with_generic_arg(mut self, arg: TypeExpr) -> Self {
        if let Some(last) = self.segments.last_mut() {
            last.generic_args.push(arg);
        }
        self
    }

    /// Appends a nested member type, `Self.name`.
    pub fn member(mut self, name: impl Into<String>) -> Self {
        self.segments.push(TypeSegment::new(name));
        self
    }
}

impl TypeExpr {
    pub fn named(name: impl Into<String>) -> Self {
        TypeExpr::Path(TypePath::single(name))
    }

    pub fn optional(inner: TypeExpr) -> Self {
        TypeExpr::Optional(Box::new(inner))
    }

    /// Rewrites an outermost `T!` into `T?`; every other shape is returned
    /// unchanged, so normalizing twice is the same as normalizing once.
    pub fn normalized(&self) -> TypeExpr {
        match self {
            TypeExpr::ImplicitlyUnwrappedOptional(inner) => TypeExpr::Optional(inner.clone()),
            other => other.clone(),
        }
    }

    pub fn is_optional(&self) -> bool {
        matches!(self, TypeExpr::Optional(_))
    }

    pub fn as_path(&self) -> Option<&TypePath> {
        match self {
            TypeExpr::Path(path) => Some(path),
            _ => None,
        }
    }

    fn needs_parens_before_postfix(&self) -> bool {
        matches!(self, TypeExpr::Function { .. })
    }
}

impl From<TypePath> for TypeExpr {
    fn from(path: TypePath) -> Self {
        TypeExpr::Path(path)
    }
}

pub(crate) fn write_separated<T: Display>(
    f: &mut Formatter<'_>,
    items: &[T],
    sep: &str,
) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(sep)?;
        }
        write!(f, "{}", item)?;
    }
    Ok(())
}

impl Display for TypeSegment {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)?;
        if !self.generic_args.is_empty() {
            f.write_str("<")?;
            write_separated(f, &self.generic_args, ", ")?;
            f.write_str(">")?;
        }
        Ok(())
    }
}

impl Display for TypePath {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write_separated(f, &self.segments, ".")
    }
}

impl Display for TypeExpr {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            TypeExpr::Path(path) => write!(f, "{}", path),
            TypeExpr::Optional(inner) | TypeExpr::ImplicitlyUnwrappedOptional(inner) => {
                let sigil = if self.is_optional() { "?" } else { "!" };
                if inner.needs_parens_before_postfix() {
                    write!(f, "({}){}", inner, sigil)
                } else {
                    write!(f, "{}{}", inner, sigil)
                }
            }
            TypeExpr::Array(element) => write!(f, "[{}]", element),
            TypeExpr::Dictionary(key, value) => write!(f, "[{}: {}]", key, value),
            TypeExpr::Tuple(elements) => {
                f.write_str("(")?;
                write_separated(f, elements, ", ")?;
                f.write_str(")")
            }
            TypeExpr::Function { params, ret } => {
                f.write_str("(")?;
                write_separated(f, params, ", ")?;
                write!(f, ") -> {}", ret)
            }
        }
    }
}
