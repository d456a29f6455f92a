use chumsky::input::{Input, Stream, ValueInput};
use chumsky::prelude::*;
use tracked_lexer::{Logos, Token};
use tracked_syntax::{
    Accessor, AccessorBlock, AccessorKind, Attribute, BindingKind, Decl, Ident, OtherDecl,
    PatternBinding, Stmt, VariableDecl,
};

use crate::error::ParseError;
use crate::parsers::{
    any_identifier, attribute, body_text, expression, pattern, span, token_tree, type_expr,
};
use crate::traits::{BoxedParser, ParserError, TokenInput};

const ACCESSOR_KEYWORDS: &[&str] = &[
    "init",
    "get",
    "set",
    "_read",
    "_modify",
    "willSet",
    "didSet",
    "unsafeAddress",
    "unsafeMutableAddress",
];

const DECL_KEYWORDS: &[&str] = &[
    "func",
    "init",
    "deinit",
    "subscript",
    "struct",
    "class",
    "enum",
    "actor",
    "protocol",
    "extension",
    "typealias",
    "associatedtype",
    "case",
    "import",
    "macro",
    "operator",
];

pub type TokenWithSpan<'src> = (Token<'src>, SimpleSpan);

pub fn tokenize<'src>(input: &'src str) -> Vec<TokenWithSpan<'src>> {
    Token::lexer(input)
        .spanned()
        .map(|(token, span)| (token.unwrap_or(Token::Error), SimpleSpan::from(span)))
        .collect()
}

pub fn token_stream<'src>(
    input: &'src str,
) -> impl ValueInput<'src, Token = Token<'src>, Span = SimpleSpan> {
    let tokens = tokenize(input);
    let eoi = SimpleSpan::from(input.len()..input.len());
    Stream::from_iter(tokens).map(eoi, |(token, span)| (token, span))
}

/// A `{ ... }` group whose contents are kept as source text.
fn braced_body<'tokens, 'src: 'tokens, I>(
    src: &'src str,
) -> impl Parser<'tokens, I, (Vec<Stmt>, SimpleSpan), ParserError<'tokens, 'src>> + Clone
where
    I: TokenInput<'tokens, 'src>,
{
    just(Token::LBrace)
        .then(token_tree().repeated())
        .then(just(Token::RBrace))
        .map_with(move |_, e| {
            let outer: SimpleSpan = e.span();
            let text = body_text(src.get(outer.start + 1..outer.end - 1).unwrap_or_default());
            let body = if text.is_empty() {
                Vec::new()
            } else {
                vec![Stmt::Verbatim(text)]
            };
            (body, outer)
        })
}

/// Parses the accessor block following a binding.
///
/// Matches:
/// - `{ get { ... } set(newTitle) { ... } }`
/// - `{ ... }` as an implicit getter
fn accessor_block<'tokens, 'src: 'tokens, I>(
    src: &'src str,
) -> impl Parser<'tokens, I, AccessorBlock, ParserError<'tokens, 'src>> + Clone
where
    I: TokenInput<'tokens, 'src>,
{
    let keyword = any_identifier()
        .filter(|keyword: &Ident| ACCESSOR_KEYWORDS.contains(&keyword.as_str()))
        .labelled("accessor keyword");

    let accessor = attribute(src)
        .repeated()
        .collect::<Vec<_>>()
        .then(keyword)
        .then(
            any_identifier()
                .delimited_by(just(Token::LParen), just(Token::RParen))
                .or_not(),
        )
        .then(braced_body(src))
        .map_with(|(((attributes, keyword), parameter), (body, _)), e| Accessor {
            attributes,
            kind: AccessorKind::from_keyword(keyword.as_str()),
            parameter,
            body,
            span: span(e.span()),
        });

    let accessors = accessor
        .repeated()
        .at_least(1)
        .collect::<Vec<_>>()
        .delimited_by(just(Token::LBrace), just(Token::RBrace))
        .map_with(|accessors, e| AccessorBlock::Accessors {
            accessors,
            span: span(e.span()),
        });

    let getter = braced_body(src).map(|(body, outer)| AccessorBlock::Getter {
        body,
        span: span(outer),
    });

    accessors.or(getter).labelled("accessor block")
}

/// Parses a single variable or other declaration.
///
/// `src` must be the text the token input was lexed from; accessor bodies are
/// sliced out of it verbatim.
pub fn declaration_parser<'tokens, 'src: 'tokens, I>(
    src: &'src str,
) -> BoxedParser<'tokens, 'src, I, Decl>
where
    I: TokenInput<'tokens, 'src>,
{
    let attributes = attribute(src).repeated().collect::<Vec<Attribute>>();

    // `private(set)` is kept as one modifier.
    let modifier = any_identifier()
        .then(
            any_identifier()
                .delimited_by(just(Token::LParen), just(Token::RParen))
                .or_not(),
        )
        .map(|(modifier, detail)| match detail {
            Some(detail) => Ident::spanned(
                format!("{}({})", modifier, detail),
                modifier.span.join(detail.span),
            ),
            None => modifier,
        });

    let binding_kind = choice((
        just(Token::Var).to(BindingKind::Var),
        just(Token::Let).to(BindingKind::Let),
    ))
    .map_with(|kind, e| (kind, span(e.span())));

    let binding = pattern()
        .then(just(Token::Colon).ignore_then(type_expr()).or_not())
        .then(just(Token::Equal).ignore_then(expression(src)).or_not())
        .then(accessor_block(src).or_not())
        .map_with(
            |(((pattern, type_annotation), initializer), accessor_block), e| PatternBinding {
                pattern,
                type_annotation,
                initializer,
                accessor_block,
                span: span(e.span()),
            },
        )
        .labelled("pattern binding");

    let variable = attributes
        .clone()
        .then(modifier.repeated().collect::<Vec<_>>())
        .then(binding_kind)
        .then(
            binding
                .separated_by(just(Token::Comma))
                .at_least(1)
                .collect::<Vec<_>>(),
        )
        .map_with(
            |(((attributes, modifiers), (binding, binding_span)), bindings), e| {
                Decl::Variable(VariableDecl {
                    attributes,
                    modifiers,
                    binding,
                    binding_span,
                    bindings,
                    span: span(e.span()),
                })
            },
        )
        .labelled("variable declaration");

    // Header tokens stop at anything that could begin the next declaration.
    let header_token = any().filter(|t: &Token| {
        !matches!(
            t,
            Token::LBrace | Token::RBrace | Token::Semicolon | Token::At | Token::Var | Token::Let
        )
    });
    let body = token_tree().repeated().delimited_by(just(Token::LBrace), just(Token::RBrace));

    let other = attributes
        .then(any_identifier().repeated().at_least(1).collect::<Vec<_>>())
        .then_ignore(header_token.repeated())
        .then_ignore(body.or_not())
        .try_map(|(attributes, words), outer: SimpleSpan| {
            let Some(position) = words
                .iter()
                .position(|word| DECL_KEYWORDS.contains(&word.as_str()))
            else {
                return Err(Rich::custom(outer, "expected a declaration"));
            };
            let mut words = words.into_iter();
            let modifiers = words.by_ref().take(position).collect();
            let keyword = words.next().ok_or_else(|| {
                Rich::custom(outer, "expected a declaration keyword")
            })?;
            Ok(Decl::Other(OtherDecl {
                attributes,
                modifiers,
                keyword,
                name: words.next(),
                span: span(outer),
            }))
        })
        .labelled("declaration");

    variable
        .or(other)
        .then_ignore(just(Token::Semicolon).or_not())
        .boxed()
}

fn collect_errors<'tokens, 'src>(
    errors: Vec<Rich<'tokens, Token<'src>, SimpleSpan>>,
) -> Vec<ParseError> {
    errors.into_iter().map(ParseError::from).collect()
}

/// Parses exactly one declaration.
pub fn parse_decl(src: &str) -> Result<Decl, Vec<ParseError>> {
    declaration_parser(src)
        .then_ignore(end())
        .parse(token_stream(src))
        .into_result()
        .map_err(collect_errors)
}

/// Parses a sequence of declarations, such as the members of a type body.
pub fn parse_decls(src: &str) -> Result<Vec<Decl>, Vec<ParseError>> {
    declaration_parser(src)
        .repeated()
        .collect::<Vec<_>>()
        .then_ignore(end())
        .parse(token_stream(src))
        .into_result()
        .map_err(collect_errors)
}
