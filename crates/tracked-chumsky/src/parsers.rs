//! Parser combinators for the pieces of a declaration.

use chumsky::prelude::*;
use tracked_lexer::Token;
use tracked_syntax::{
    Argument, Attribute, BinaryOp, Expr, ExprKind, Ident, Pattern, Span, TypeExpr, TypePath,
    TypeSegment, dedent,
};

use crate::traits::*;

pub(crate) fn span(span: SimpleSpan) -> Span {
    Span::new(span.start, span.end)
}

/// Text between a pair of braces with its common indentation removed. Code
/// on the line of the opening brace is kept as the first line.
pub(crate) fn body_text(inner: &str) -> String {
    let (head, rest) = inner.split_once('\n').unwrap_or((inner, ""));
    let head = head.trim();
    let rest = dedent(rest);
    match (head.is_empty(), rest.is_empty()) {
        (true, _) => rest,
        (false, true) => head.to_string(),
        (false, false) => format!("{}\n{}", head, rest),
    }
}

/// Parses any identifier.
pub fn any_identifier<'tokens, 'src: 'tokens, I>()
-> impl Parser<'tokens, I, Ident, ParserError<'tokens, 'src>> + Clone
where
    I: TokenInput<'tokens, 'src>,
{
    select! { Token::Identifier(id) = e => Ident::spanned(id, span(e.span())) }
        .labelled("identifier")
}

#[derive(Clone, Copy)]
enum TypeSuffix {
    Optional,
    Unwrapped,
    /// `??` is lexed as one token.
    DoubleOptional,
}

/// Parses a type annotation.
///
/// Matches:
/// - `Name`, `Outer.Inner`, `Box<String>`
/// - `[T]`, `[K: V]`, `(A, B)`, `(A) -> R`
/// - any of the above followed by `?`, `!` or `??`
pub fn type_expr<'tokens, 'src: 'tokens, I>() -> BoxedParser<'tokens, 'src, I, TypeExpr>
where
    I: TokenInput<'tokens, 'src>,
{
    recursive(|ty| {
        let generic_args = ty
            .clone()
            .separated_by(just(Token::Comma))
            .at_least(1)
            .collect::<Vec<_>>()
            .delimited_by(just(Token::LAngle), just(Token::RAngle))
            .or_not()
            .map(Option::unwrap_or_default);

        let path = any_identifier()
            .then(generic_args)
            .map(|(name, generic_args)| TypeSegment { name, generic_args })
            .separated_by(just(Token::Dot))
            .at_least(1)
            .collect::<Vec<_>>()
            .map(|segments| TypeExpr::Path(TypePath { segments }))
            .labelled("type name");

        let collection = ty
            .clone()
            .then(just(Token::Colon).ignore_then(ty.clone()).or_not())
            .delimited_by(just(Token::LBracket), just(Token::RBracket))
            .map(|(key, value)| match value {
                Some(value) => TypeExpr::Dictionary(Box::new(key), Box::new(value)),
                None => TypeExpr::Array(Box::new(key)),
            })
            .labelled("collection type");

        let tuple_or_function = ty
            .clone()
            .separated_by(just(Token::Comma))
            .collect::<Vec<_>>()
            .delimited_by(just(Token::LParen), just(Token::RParen))
            .then(just(Token::Arrow).ignore_then(ty).or_not())
            .map(|(mut elements, ret)| match ret {
                Some(ret) => TypeExpr::Function {
                    params: elements,
                    ret: Box::new(ret),
                },
                None if elements.len() == 1 => elements.remove(0),
                None => TypeExpr::Tuple(elements),
            })
            .labelled("tuple or function type");

        let suffix = choice((
            just(Token::QuestionMark).to(TypeSuffix::Optional),
            just(Token::Exclamation).to(TypeSuffix::Unwrapped),
            just(Token::Coalesce).to(TypeSuffix::DoubleOptional),
        ));

        choice((path, collection, tuple_or_function)).foldl(
            suffix.repeated(),
            |ty, suffix| match suffix {
                TypeSuffix::Optional => TypeExpr::Optional(Box::new(ty)),
                TypeSuffix::Unwrapped => TypeExpr::ImplicitlyUnwrappedOptional(Box::new(ty)),
                TypeSuffix::DoubleOptional => {
                    TypeExpr::Optional(Box::new(TypeExpr::Optional(Box::new(ty))))
                }
            },
        )
    })
    .labelled("type")
    .boxed()
}

enum PostfixSuffix {
    Member(Ident, Vec<TypeExpr>),
    Call(Vec<Argument>, Span),
    TrailingClosure(Expr),
}

fn binary(lhs: Expr, (op, rhs): (BinaryOp, Expr)) -> Expr {
    let span = lhs.span.join(rhs.span);
    Expr {
        kind: ExprKind::Binary {
            lhs: Box::new(lhs),
            op,
            rhs: Box::new(rhs),
        },
        span,
    }
}

/// Parses a labeled or unlabeled argument using the given value parser.
///
/// Matches:
/// - `value`
/// - `label: value`
fn argument<'tokens, 'src: 'tokens, I>(
    value: impl Parser<'tokens, I, Expr, ParserError<'tokens, 'src>> + Clone,
) -> impl Parser<'tokens, I, Argument, ParserError<'tokens, 'src>> + Clone
where
    I: TokenInput<'tokens, 'src>,
{
    any_identifier()
        .then_ignore(just(Token::Colon))
        .or_not()
        .then(value)
        .map_with(|(label, value), e| Argument {
            label,
            value,
            span: span(e.span()),
        })
        .labelled("argument")
}

/// Parses a parenthesized argument list, `(a, label: b)`.
pub fn argument_list<'tokens, 'src: 'tokens, I>(
    src: &'src str,
) -> impl Parser<'tokens, I, Vec<Argument>, ParserError<'tokens, 'src>> + Clone
where
    I: TokenInput<'tokens, 'src>,
{
    argument(expression(src))
        .separated_by(just(Token::Comma))
        .allow_trailing()
        .collect::<Vec<_>>()
        .delimited_by(just(Token::LParen), just(Token::RParen))
        .labelled("argument list")
}

/// Parses a closure literal, keeping its body as source text.
fn closure<'tokens, 'src: 'tokens, I>(
    src: &'src str,
) -> impl Parser<'tokens, I, Expr, ParserError<'tokens, 'src>> + Clone
where
    I: TokenInput<'tokens, 'src>,
{
    just(Token::LBrace)
        .ignore_then(token_tree().repeated())
        .then_ignore(just(Token::RBrace))
        .map_with(move |_, e| {
            let outer: SimpleSpan = e.span();
            let inner = src.get(outer.start + 1..outer.end - 1).unwrap_or_default();
            Expr {
                kind: ExprKind::Closure(body_text(inner)),
                span: span(outer),
            }
        })
        .labelled("closure")
}

/// Parses an expression.
///
/// Covers literals, names with generic arguments (`Box<String>`), member
/// access including implicit members (`.default`), calls with labeled
/// arguments and trailing closures, array and dictionary literals, prefix
/// operators, key paths, the usual binary operators including `...` and
/// `..<`, and the ternary operator.
///
/// `src` must be the text the token input was lexed from; closure bodies are
/// sliced out of it verbatim.
pub fn expression<'tokens, 'src: 'tokens, I>(
    src: &'src str,
) -> BoxedParser<'tokens, 'src, I, Expr>
where
    I: TokenInput<'tokens, 'src>,
{
    recursive(|expr| {
        // `Name<Args>` only counts as a specialization when followed by `.`
        // or `(`, otherwise `<` is the comparison operator.
        let generic_args = type_expr()
            .separated_by(just(Token::Comma))
            .at_least(1)
            .collect::<Vec<_>>()
            .delimited_by(just(Token::LAngle), just(Token::RAngle))
            .then_ignore(choice((just(Token::Dot), just(Token::LParen))).rewind());

        let literal = select! {
            Token::Nil => ExprKind::Nil,
            Token::True => ExprKind::Bool(true),
            Token::False => ExprKind::Bool(false),
            Token::Int(value) => ExprKind::Int(value.to_string()),
            Token::Float(value) => ExprKind::Float(value.to_string()),
            Token::StringLit(value) => ExprKind::Str(value.to_string()),
        }
        .labelled("literal");

        let name = select! { Token::Identifier(name) => name }
            .then(generic_args.clone().or_not())
            .map(|(name, generic_args)| ExprKind::Ident {
                name: name.to_string(),
                generic_args: generic_args.unwrap_or_default(),
            });

        let empty_dictionary = just(Token::LBracket)
            .then(just(Token::Colon))
            .then(just(Token::RBracket))
            .to(ExprKind::Dictionary(Vec::new()));

        let dictionary = expr
            .clone()
            .then_ignore(just(Token::Colon))
            .then(expr.clone())
            .separated_by(just(Token::Comma))
            .allow_trailing()
            .at_least(1)
            .collect::<Vec<_>>()
            .delimited_by(just(Token::LBracket), just(Token::RBracket))
            .map(ExprKind::Dictionary)
            .labelled("dictionary literal");

        let array = expr
            .clone()
            .separated_by(just(Token::Comma))
            .allow_trailing()
            .collect::<Vec<_>>()
            .delimited_by(just(Token::LBracket), just(Token::RBracket))
            .map(ExprKind::Array);

        // `(x)` groups, `()` and `(x, y)` are tuples.
        let paren = expr
            .clone()
            .separated_by(just(Token::Comma))
            .collect::<Vec<_>>()
            .delimited_by(just(Token::LParen), just(Token::RParen))
            .map(|mut elements| match elements.len() {
                1 => ExprKind::Paren(Box::new(elements.remove(0))),
                _ => ExprKind::Tuple(elements),
            });

        let key_path = just(Token::Backslash)
            .ignore_then(
                just(Token::Dot)
                    .ignore_then(select! { Token::Identifier(name) => name.to_string() })
                    .repeated()
                    .at_least(1)
                    .collect::<Vec<_>>(),
            )
            .map(ExprKind::KeyPath)
            .labelled("key path");

        let implicit_member = just(Token::Dot)
            .ignore_then(any_identifier())
            .map(ExprKind::ImplicitMember)
            .labelled("implicit member");

        let atom = choice((
            literal,
            name,
            empty_dictionary,
            dictionary,
            array,
            paren,
            key_path,
            implicit_member,
        ))
        .map_with(|kind, e| Expr {
            kind,
            span: span(e.span()),
        })
        .or(closure(src))
        .labelled("expression");

        let member = just(Token::Dot)
            .ignore_then(any_identifier())
            .then(generic_args.or_not())
            .map(|(name, generic_args)| {
                PostfixSuffix::Member(name, generic_args.unwrap_or_default())
            });
        let call = argument(expr.clone())
            .separated_by(just(Token::Comma))
            .allow_trailing()
            .collect::<Vec<_>>()
            .delimited_by(just(Token::LParen), just(Token::RParen))
            .map_with(|arguments, e| PostfixSuffix::Call(arguments, span(e.span())));
        // A brace block opening with an observer belongs to the declaration.
        let observers = just(Token::LBrace).then(select! {
            Token::Identifier("willSet") => (),
            Token::Identifier("didSet") => (),
        });
        let trailing_closure = observers
            .not()
            .ignore_then(closure(src))
            .map(PostfixSuffix::TrailingClosure);

        let postfix = atom
            .foldl(choice((member, call, trailing_closure)).repeated(), |base, suffix| {
                match suffix {
                    PostfixSuffix::Member(name, generic_args) => {
                        let span = base.span.join(name.span);
                        Expr {
                            kind: ExprKind::Member {
                                base: Box::new(base),
                                name,
                                generic_args,
                            },
                            span,
                        }
                    }
                    PostfixSuffix::Call(arguments, args_span) => {
                        let span = base.span.join(args_span);
                        Expr {
                            kind: ExprKind::Call {
                                callee: Box::new(base),
                                arguments,
                            },
                            span,
                        }
                    }
                    PostfixSuffix::TrailingClosure(closure) => {
                        let span = base.span.join(closure.span);
                        Expr {
                            kind: ExprKind::TrailingClosure {
                                callee: Box::new(base),
                                closure: Box::new(closure),
                            },
                            span,
                        }
                    }
                }
            })
            .boxed();

        let prefix_op = choice((
            just(Token::Minus).to('-'),
            just(Token::Exclamation).to('!'),
            just(Token::Ampersand).to('&'),
        ))
        .map_with(|op, e| (op, span(e.span())));

        let unary = prefix_op
            .repeated()
            .foldr(postfix, |(op, op_span), operand: Expr| {
                let span = op_span.join(operand.span);
                let kind = if op == '&' {
                    ExprKind::InOut(Box::new(operand))
                } else {
                    ExprKind::Prefix {
                        op,
                        operand: Box::new(operand),
                    }
                };
                Expr { kind, span }
            })
            .boxed();

        let product = unary
            .clone()
            .foldl(
                choice((
                    just(Token::Asterisk).to(BinaryOp::Mul),
                    just(Token::Slash).to(BinaryOp::Div),
                    just(Token::Percent).to(BinaryOp::Rem),
                ))
                .then(unary)
                .repeated(),
                binary,
            )
            .boxed();

        let sum = product
            .clone()
            .foldl(
                choice((
                    just(Token::Plus).to(BinaryOp::Add),
                    just(Token::Minus).to(BinaryOp::Sub),
                ))
                .then(product)
                .repeated(),
                binary,
            )
            .boxed();

        let range = sum
            .clone()
            .then(
                choice((
                    just(Token::Ellipsis).to(BinaryOp::ClosedRange),
                    just(Token::HalfOpenRange).to(BinaryOp::HalfOpenRange),
                ))
                .then(sum)
                .or_not(),
            )
            .map(|(lhs, rest)| match rest {
                Some(rest) => binary(lhs, rest),
                None => lhs,
            })
            .boxed();

        let coalesce = range
            .clone()
            .foldl(
                just(Token::Coalesce)
                    .to(BinaryOp::Coalesce)
                    .then(range)
                    .repeated(),
                binary,
            )
            .boxed();

        let comparison = coalesce
            .clone()
            .foldl(
                choice((
                    just(Token::EqualEqual).to(BinaryOp::Eq),
                    just(Token::NotEqual).to(BinaryOp::Ne),
                    just(Token::LessEqual).to(BinaryOp::Le),
                    just(Token::GreaterEqual).to(BinaryOp::Ge),
                    just(Token::LAngle).to(BinaryOp::Lt),
                    just(Token::RAngle).to(BinaryOp::Gt),
                ))
                .then(coalesce)
                .repeated(),
                binary,
            )
            .boxed();

        let conjunction = comparison
            .clone()
            .foldl(
                just(Token::AndAnd)
                    .to(BinaryOp::And)
                    .then(comparison)
                    .repeated(),
                binary,
            )
            .boxed();

        let disjunction = conjunction
            .clone()
            .foldl(
                just(Token::OrOr)
                    .to(BinaryOp::Or)
                    .then(conjunction)
                    .repeated(),
                binary,
            )
            .boxed();

        // Right-associative: the false branch is parsed as a full expression.
        disjunction
            .then(
                just(Token::QuestionMark)
                    .ignore_then(expr.clone())
                    .then_ignore(just(Token::Colon))
                    .then(expr)
                    .or_not(),
            )
            .map(|(condition, branches)| match branches {
                Some((then, otherwise)) => Expr {
                    span: condition.span.join(otherwise.span),
                    kind: ExprKind::Ternary {
                        condition: Box::new(condition),
                        then: Box::new(then),
                        otherwise: Box::new(otherwise),
                    },
                },
                None => condition,
            })
    })
    .boxed()
}

/// Parses an attribute.
///
/// Matches:
/// - `@Name`
/// - `@Module.Name`
/// - `@Name(arguments)`
pub fn attribute<'tokens, 'src: 'tokens, I>(
    src: &'src str,
) -> impl Parser<'tokens, I, Attribute, ParserError<'tokens, 'src>> + Clone
where
    I: TokenInput<'tokens, 'src>,
{
    let name = any_identifier()
        .map(|name| TypeSegment {
            name,
            generic_args: Vec::new(),
        })
        .separated_by(just(Token::Dot))
        .at_least(1)
        .collect::<Vec<_>>()
        .map(|segments| TypePath { segments });

    just(Token::At)
        .ignore_then(name)
        .then(argument_list(src).or_not())
        .map_with(|(name, arguments), e| Attribute {
            name,
            arguments,
            span: span(e.span()),
        })
        .labelled("attribute")
}

/// Parses a binding pattern: `name`, `_` or `(a, b)`.
pub fn pattern<'tokens, 'src: 'tokens, I>() -> BoxedParser<'tokens, 'src, I, Pattern>
where
    I: TokenInput<'tokens, 'src>,
{
    recursive(|pattern| {
        let wildcard = select! { Token::Identifier("_") = e => Pattern::Wildcard(span(e.span())) };
        let name = any_identifier().map(Pattern::Identifier);
        let tuple = pattern
            .separated_by(just(Token::Comma))
            .collect::<Vec<_>>()
            .delimited_by(just(Token::LParen), just(Token::RParen))
            .map_with(|elements, e| Pattern::Tuple(elements, span(e.span())));
        choice((wildcard, name, tuple))
    })
    .labelled("pattern")
    .boxed()
}

/// Skips one balanced token tree: a single token, or a `()`, `[]` or `{}`
/// group with everything inside it.
pub fn token_tree<'tokens, 'src: 'tokens, I>() -> BoxedParser<'tokens, 'src, I, ()>
where
    I: TokenInput<'tokens, 'src>,
{
    recursive(|tree| {
        let single = any()
            .filter(|t: &Token| {
                !matches!(
                    t,
                    Token::LParen
                        | Token::RParen
                        | Token::LBracket
                        | Token::RBracket
                        | Token::LBrace
                        | Token::RBrace
                )
            })
            .ignored();
        choice((
            tree.clone()
                .repeated()
                .delimited_by(just(Token::LParen), just(Token::RParen)),
            tree.clone()
                .repeated()
                .delimited_by(just(Token::LBracket), just(Token::RBracket)),
            tree.repeated()
                .delimited_by(just(Token::LBrace), just(Token::RBrace)),
            single,
        ))
    })
    .boxed()
}
