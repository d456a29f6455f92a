//! Syntax tree for the host declaration language.
//!
//! The tree is produced by a host parser (see `tracked-chumsky`) and read by
//! the expansion engine (see `tracked-expand`). The expansion engine never
//! mutates a tree it was handed; emitted code is built as fresh nodes of the
//! same types so it can be compared structurally or rendered back to text.

mod accessor;
mod attribute;
mod decl;
mod expr;
mod span;
mod ty;

pub use accessor::{Accessor, AccessorBlock, AccessorKind, Stmt, dedent};
pub use attribute::Attribute;
pub use decl::{BindingKind, Decl, OtherDecl, Pattern, PatternBinding, VariableDecl};
pub use expr::{Argument, BinaryOp, Expr, ExprKind};
pub use span::{Ident, Span};
pub use ty::{TypeExpr, TypePath, TypeSegment};
