use std::fmt::{self, Display, Formatter};

use crate::ty::write_separated;
use crate::{Ident, Span, TypeExpr, TypePath, TypeSegment};

#[derive(Clone, Debug, PartialEq)]
pub struct Expr {
    pub kind: ExprKind,
    pub span: Span,
}

#[derive(Clone, Debug, PartialEq)]
pub enum ExprKind {
    Nil,
    Bool(bool),
    /// Integer literal as written.
    Int(String),
    /// Float literal as written.
    Float(String),
    /// String literal including its quotes.
    Str(String),
    /// `name` or `Name<Args>`
    Ident {
        name: String,
        generic_args: Vec<TypeExpr>,
    },
    /// `base.name` or `base.Name<Args>`
    Member {
        base: Box<Expr>,
        name: Ident,
        generic_args: Vec<TypeExpr>,
    },
    Call {
        callee: Box<Expr>,
        arguments: Vec<Argument>,
    },
    /// `.name` with the base type left to context, as in `.default`.
    ImplicitMember(Ident),
    Array(Vec<Expr>),
    /// `[:]` or `[key: value, ...]`
    Dictionary(Vec<(Expr, Expr)>),
    Paren(Box<Expr>),
    /// `()` or `(a, b)`
    Tuple(Vec<Expr>),
    Prefix {
        op: char,
        operand: Box<Expr>,
    },
    Binary {
        lhs: Box<Expr>,
        op: BinaryOp,
        rhs: Box<Expr>,
    },
    /// `condition ? then : otherwise`
    Ternary {
        condition: Box<Expr>,
        then: Box<Expr>,
        otherwise: Box<Expr>,
    },
    /// `{ ... }` with its body kept as source text.
    Closure(String),
    /// `callee { ... }`
    TrailingClosure {
        callee: Box<Expr>,
        closure: Box<Expr>,
    },
    /// `\.a.b`
    KeyPath(Vec<String>),
    /// `&value`
    InOut(Box<Expr>),
    /// A type used in value position, e.g. the receiver of a static call.
    Type(TypeExpr),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    Mul,
    Div,
    Rem,
    Add,
    Sub,
    ClosedRange,
    HalfOpenRange,
    Coalesce,
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
    And,
    Or,
}

impl BinaryOp {
    pub fn as_str(self) -> &'static str {
        match self {
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Rem => "%",
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::ClosedRange => "...",
            BinaryOp::HalfOpenRange => "..<",
            BinaryOp::Coalesce => "??",
            BinaryOp::Eq => "==",
            BinaryOp::Ne => "!=",
            BinaryOp::Lt => "<",
            BinaryOp::Le => "<=",
            BinaryOp::Gt => ">",
            BinaryOp::Ge => ">=",
            BinaryOp::And => "&&",
            BinaryOp::Or => "||",
        }
    }

    fn is_range(self) -> bool {
        matches!(self, BinaryOp::ClosedRange | BinaryOp::HalfOpenRange)
    }
}

/// One entry of a call or attribute argument list.
#[derive(Clone, Debug, PartialEq)]
pub struct Argument {
    pub label: Option<Ident>,
    pub value: Expr,
    pub span: Span,
}

impl Argument {
    pub fn unlabeled(value: Expr) -> Self {
        Self {
            label: None,
            value,
            span: Span::default(),
        }
    }

    pub fn labeled(label: impl Into<String>, value: Expr) -> Self {
        Self {
            label: Some(Ident::new(label)),
            value,
            span: Span::default(),
        }
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_ref().map(Ident::as_str)
    }
}

impl Expr {
    pub fn new(kind: ExprKind) -> Self {
        Self {
            kind,
            span: Span::default(),
        }
    }

    pub fn ident(name: impl Into<String>) -> Self {
        Expr::new(ExprKind::Ident {
            name: name.into(),
            generic_args: Vec::new(),
        })
    }

    pub fn nil() -> Self {
        Expr::new(ExprKind::Nil)
    }

    pub fn ty(ty: impl Into<TypeExpr>) -> Self {
        Expr::new(ExprKind::Type(ty.into()))
    }

    pub fn key_path(name: impl Into<String>) -> Self {
        Expr::new(ExprKind::KeyPath(vec![name.into()]))
    }

    pub fn member(self, name: impl Into<String>) -> Self {
        Expr::new(ExprKind::Member {
            base: Box::new(self),
            name: Ident::new(name),
            generic_args: Vec::new(),
        })
    }

    pub fn call(self, arguments: Vec<Argument>) -> Self {
        Expr::new(ExprKind::Call {
            callee: Box::new(self),
            arguments,
        })
    }

    pub fn in_out(self) -> Self {
        Expr::new(ExprKind::InOut(Box::new(self)))
    }

    /// `Some(b)` only for the literal tokens `true` and `false`.
    pub fn as_bool_literal(&self) -> Option<bool> {
        match self.kind {
            ExprKind::Bool(value) => Some(value),
            _ => None,
        }
    }

    /// Reads an identifier or member chain such as `Outer.Box<Int>` as a type
    /// path. Anything involving calls, literals or operators is not a type.
    pub fn to_type_path(&self) -> Option<TypePath> {
        match &self.kind {
            ExprKind::Ident { name, generic_args } => Some(TypePath {
                segments: vec![TypeSegment {
                    name: Ident::spanned(name.clone(), self.span),
                    generic_args: generic_args.clone(),
                }],
            }),
            ExprKind::Member {
                base,
                name,
                generic_args,
            } => {
                let mut path = base.to_type_path()?;
                path.segments.push(TypeSegment {
                    name: name.clone(),
                    generic_args: generic_args.clone(),
                });
                Some(path)
            }
            ExprKind::Type(TypeExpr::Path(path)) => Some(path.clone()),
            _ => None,
        }
    }

    /// Matches `TypeExpr.self` and returns the type in front of `.self`.
    pub fn as_type_reference(&self) -> Option<TypePath> {
        match &self.kind {
            ExprKind::Member {
                base,
                name,
                generic_args,
            } if name.as_str() == "self" && generic_args.is_empty() => base.to_type_path(),
            _ => None,
        }
    }
}

fn write_generic_args(f: &mut Formatter<'_>, args: &[TypeExpr]) -> fmt::Result {
    if !args.is_empty() {
        f.write_str("<")?;
        write_separated(f, args, ", ")?;
        f.write_str(">")?;
    }
    Ok(())
}

impl Display for Argument {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match &self.label {
            Some(label) => write!(f, "{}: {}", label, self.value),
            None => write!(f, "{}", self.value),
        }
    }
}

impl Display for Expr {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ExprKind::Nil => f.write_str("nil"),
            ExprKind::Bool(value) => write!(f, "{}", value),
            ExprKind::Int(text) | ExprKind::Float(text) | ExprKind::Str(text) => {
                f.write_str(text)
            }
            ExprKind::Ident { name, generic_args } => {
                f.write_str(name)?;
                write_generic_args(f, generic_args)
            }
            ExprKind::Member {
                base,
                name,
                generic_args,
            } => {
                write!(f, "{}.{}", base, name)?;
                write_generic_args(f, generic_args)
            }
            ExprKind::Call { callee, arguments } => {
                write!(f, "{}(", callee)?;
                write_separated(f, arguments, ", ")?;
                f.write_str(")")
            }
            ExprKind::ImplicitMember(name) => write!(f, ".{}", name),
            ExprKind::Array(elements) => {
                f.write_str("[")?;
                write_separated(f, elements, ", ")?;
                f.write_str("]")
            }
            ExprKind::Dictionary(entries) if entries.is_empty() => f.write_str("[:]"),
            ExprKind::Dictionary(entries) => {
                f.write_str("[")?;
                for (i, (key, value)) in entries.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}: {}", key, value)?;
                }
                f.write_str("]")
            }
            ExprKind::Paren(inner) => write!(f, "({})", inner),
            ExprKind::Tuple(elements) => {
                f.write_str("(")?;
                write_separated(f, elements, ", ")?;
                f.write_str(")")
            }
            ExprKind::Prefix { op, operand } => write!(f, "{}{}", op, operand),
            ExprKind::Binary { lhs, op, rhs } if op.is_range() => {
                write!(f, "{}{}{}", lhs, op.as_str(), rhs)
            }
            ExprKind::Binary { lhs, op, rhs } => write!(f, "{} {} {}", lhs, op.as_str(), rhs),
            ExprKind::Ternary {
                condition,
                then,
                otherwise,
            } => write!(f, "{} ? {} : {}", condition, then, otherwise),
            ExprKind::Closure(body) if body.is_empty() => f.write_str("{}"),
            ExprKind::Closure(body) if !body.contains('\n') => write!(f, "{{ {} }}", body),
            ExprKind::Closure(body) => {
                f.write_str("{")?;
                for line in body.lines() {
                    if line.is_empty() {
                        f.write_str("\n")?;
                    } else {
                        write!(f, "\n    {}", line)?;
                    }
                }
                f.write_str("\n}")
            }
            ExprKind::TrailingClosure { callee, closure } => write!(f, "{} {}", callee, closure),
            ExprKind::KeyPath(components) => {
                f.write_str("\\")?;
                for component in components {
                    write!(f, ".{}", component)?;
                }
                Ok(())
            }
            ExprKind::InOut(inner) => write!(f, "&{}", inner),
            ExprKind::Type(ty) => write!(f, "{}", ty),
        }
    }
}
