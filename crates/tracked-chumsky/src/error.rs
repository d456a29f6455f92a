use chumsky::error::Rich;
use chumsky::span::SimpleSpan;
use tracked_lexer::Token;
use tracked_syntax::Span;

/// A syntax error in host source text.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message} at {span}")]
pub struct ParseError {
    pub message: String,
    pub span: Span,
}

impl<'tokens, 'src> From<Rich<'tokens, Token<'src>, SimpleSpan>> for ParseError {
    fn from(error: Rich<'tokens, Token<'src>, SimpleSpan>) -> Self {
        let span = *error.span();
        Self {
            message: error.to_string(),
            span: Span::new(span.start, span.end),
        }
    }
}
