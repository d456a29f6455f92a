use crate::{Attribute, Expr, Ident, Span};

/// The `{ ... }` following a binding.
#[derive(Clone, Debug, PartialEq)]
pub enum AccessorBlock {
    /// `{ get { ... } set { ... } }`
    Accessors { accessors: Vec<Accessor>, span: Span },
    /// `{ ... }` used as an implicit getter.
    Getter { body: Vec<Stmt>, span: Span },
}

impl AccessorBlock {
    pub fn accessors(accessors: Vec<Accessor>) -> Self {
        AccessorBlock::Accessors {
            accessors,
            span: Span::default(),
        }
    }

    pub fn span(&self) -> Span {
        match self {
            AccessorBlock::Accessors { span, .. } | AccessorBlock::Getter { span, .. } => *span,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum AccessorKind {
    Init,
    Get,
    Set,
    Read,
    Modify,
    WillSet,
    DidSet,
    Other(String),
}

impl AccessorKind {
    pub fn from_keyword(keyword: &str) -> Self {
        match keyword {
            "init" => AccessorKind::Init,
            "get" => AccessorKind::Get,
            "set" => AccessorKind::Set,
            "_read" => AccessorKind::Read,
            "_modify" => AccessorKind::Modify,
            "willSet" => AccessorKind::WillSet,
            "didSet" => AccessorKind::DidSet,
            other => AccessorKind::Other(other.to_string()),
        }
    }

    pub fn keyword(&self) -> &str {
        match self {
            AccessorKind::Init => "init",
            AccessorKind::Get => "get",
            AccessorKind::Set => "set",
            AccessorKind::Read => "_read",
            AccessorKind::Modify => "_modify",
            AccessorKind::WillSet => "willSet",
            AccessorKind::DidSet => "didSet",
            AccessorKind::Other(keyword) => keyword,
        }
    }
}

/// `@attrs kind(parameter) { body }`
#[derive(Clone, Debug, PartialEq)]
pub struct Accessor {
    pub attributes: Vec<Attribute>,
    pub kind: AccessorKind,
    pub parameter: Option<Ident>,
    pub body: Vec<Stmt>,
    pub span: Span,
}

impl Accessor {
    pub fn new(kind: AccessorKind, body: Vec<Stmt>) -> Self {
        Self {
            attributes: Vec::new(),
            kind,
            parameter: None,
            body,
            span: Span::default(),
        }
    }

    pub fn with_attribute(mut self, attribute: Attribute) -> Self {
        self.attributes.push(attribute);
        self
    }

    pub fn with_parameter(mut self, parameter: impl Into<String>) -> Self {
        self.parameter = Some(Ident::new(parameter));
        self
    }
}

/// Statements of accessor bodies.
///
/// Emitted bodies are fully structured; bodies read from source are kept as
/// [`Stmt::Verbatim`] text since the engine never looks inside them.
#[derive(Clone, Debug, PartialEq)]
pub enum Stmt {
    Expr(Expr),
    Return(Expr),
    Let { name: String, value: Expr },
    Var { name: String, value: Expr },
    Assign { target: Expr, value: Expr },
    Defer(Vec<Stmt>),
    Yield(Expr),
    Verbatim(String),
}

/// Removes the indentation shared by every non-blank line, along with
/// leading and trailing blank lines.
pub fn dedent(text: &str) -> String {
    let lines: Vec<&str> = text.lines().map(str::trim_end).collect();
    let Some(first) = lines.iter().position(|line| !line.is_empty()) else {
        return String::new();
    };
    let last = lines
        .iter()
        .rposition(|line| !line.is_empty())
        .unwrap_or(first);
    let lines = &lines[first..=last];
    let indent = lines
        .iter()
        .filter(|line| !line.is_empty())
        .map(|line| line.len() - line.trim_start().len())
        .min()
        .unwrap_or(0);
    lines
        .iter()
        .map(|line| line.get(indent..).unwrap_or_else(|| line.trim_start()))
        .collect::<Vec<_>>()
        .join("\n")
}
