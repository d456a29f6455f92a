//! Chumsky parser for host declarations.
//!
//! Turns source text such as
//!
//! ```text
//! @Tracked(Clamped<Int>.self, config: 0...100) @ObservationIgnored
//! var percent: Int = 150
//! ```
//!
//! into a [`tracked_syntax::Decl`]. Only the declaration surface the expansion
//! engine inspects is modelled; bodies of accessors and of non-variable
//! declarations are kept as opaque text.

mod decl;
mod error;
mod parsers;
mod traits;

pub use chumsky;
pub use decl::{declaration_parser, parse_decl, parse_decls, token_stream, tokenize};
pub use error::ParseError;
pub use parsers::{
    any_identifier, argument_list, attribute, expression, pattern, token_tree, type_expr,
};
pub use traits::{BoxedParser, ParserError, TokenInput};
pub use tracked_lexer::Token;

#[cfg(test)]
mod tests;
