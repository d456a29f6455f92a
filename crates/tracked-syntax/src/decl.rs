use crate::{AccessorBlock, Attribute, Expr, Ident, Span, TypeExpr};

/// A declaration handed to the expansion engine, or emitted by it.
#[derive(Clone, Debug, PartialEq)]
pub enum Decl {
    Variable(VariableDecl),
    /// Any other declaration form (`func`, `struct`, `init`, ...). Only its
    /// introducer and attributes are kept.
    Other(OtherDecl),
}

impl Decl {
    pub fn attributes(&self) -> &[Attribute] {
        match self {
            Decl::Variable(decl) => &decl.attributes,
            Decl::Other(decl) => &decl.attributes,
        }
    }

    pub fn as_variable(&self) -> Option<&VariableDecl> {
        match self {
            Decl::Variable(decl) => Some(decl),
            Decl::Other(_) => None,
        }
    }

    pub fn span(&self) -> Span {
        match self {
            Decl::Variable(decl) => decl.span,
            Decl::Other(decl) => decl.span,
        }
    }
}

impl From<VariableDecl> for Decl {
    fn from(decl: VariableDecl) -> Self {
        Decl::Variable(decl)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct OtherDecl {
    pub attributes: Vec<Attribute>,
    pub modifiers: Vec<Ident>,
    pub keyword: Ident,
    pub name: Option<Ident>,
    pub span: Span,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BindingKind {
    Var,
    Let,
}

impl BindingKind {
    pub fn keyword(self) -> &'static str {
        match self {
            BindingKind::Var => "var",
            BindingKind::Let => "let",
        }
    }
}

/// `@attrs modifiers var a: T = init, b: U { ... }`
#[derive(Clone, Debug, PartialEq)]
pub struct VariableDecl {
    pub attributes: Vec<Attribute>,
    pub modifiers: Vec<Ident>,
    pub binding: BindingKind,
    /// Span of the `var`/`let` keyword.
    pub binding_span: Span,
    pub bindings: Vec<PatternBinding>,
    pub span: Span,
}

const ACCESS_MODIFIERS: &[&str] = &[
    "open",
    "public",
    "package",
    "internal",
    "fileprivate",
    "private",
];

/// Modifiers that make a property belong to the type rather than an instance.
const TYPE_MODIFIERS: &[&str] = &["static", "class"];

impl VariableDecl {
    pub fn new(binding: BindingKind, bindings: Vec<PatternBinding>) -> Self {
        Self {
            attributes: Vec::new(),
            modifiers: Vec::new(),
            binding,
            binding_span: Span::default(),
            bindings,
            span: Span::default(),
        }
    }

    pub fn is_mutable(&self) -> bool {
        self.binding == BindingKind::Var
    }

    /// Access-control modifiers such as `public` or `private(set)`.
    pub fn access_modifiers(&self) -> impl Iterator<Item = &Ident> {
        self.modifiers.iter().filter(|modifier| {
            let base = modifier.as_str().split('(').next().unwrap_or_default();
            ACCESS_MODIFIERS.contains(&base)
        })
    }

    /// `static` or `class`, if present.
    pub fn type_modifier(&self) -> Option<&Ident> {
        self.modifiers
            .iter()
            .find(|modifier| TYPE_MODIFIERS.contains(&modifier.as_str()))
    }
}

/// One `pattern: Type = initializer { accessors }` entry of a variable
/// declaration.
#[derive(Clone, Debug, PartialEq)]
pub struct PatternBinding {
    pub pattern: Pattern,
    pub type_annotation: Option<TypeExpr>,
    pub initializer: Option<Expr>,
    pub accessor_block: Option<AccessorBlock>,
    pub span: Span,
}

impl PatternBinding {
    pub fn new(name: impl Into<String>, ty: TypeExpr) -> Self {
        Self {
            pattern: Pattern::Identifier(Ident::new(name)),
            type_annotation: Some(ty),
            initializer: None,
            accessor_block: None,
            span: Span::default(),
        }
    }

    pub fn with_initializer(mut self, initializer: Expr) -> Self {
        self.initializer = Some(initializer);
        self
    }

    pub fn with_accessor_block(mut self, block: AccessorBlock) -> Self {
        self.accessor_block = Some(block);
        self
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Pattern {
    Identifier(Ident),
    /// `_`
    Wildcard(Span),
    /// `(a, b)`
    Tuple(Vec<Pattern>, Span),
}

impl Pattern {
    pub fn as_identifier(&self) -> Option<&Ident> {
        match self {
            Pattern::Identifier(ident) => Some(ident),
            _ => None,
        }
    }

    pub fn span(&self) -> Span {
        match self {
            Pattern::Identifier(ident) => ident.span,
            Pattern::Wildcard(span) | Pattern::Tuple(_, span) => *span,
        }
    }
}

impl std::fmt::Display for Pattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Pattern::Identifier(ident) => write!(f, "{}", ident),
            Pattern::Wildcard(_) => f.write_str("_"),
            Pattern::Tuple(elements, _) => {
                f.write_str("(")?;
                for (i, element) in elements.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", element)?;
                }
                f.write_str(")")
            }
        }
    }
}
