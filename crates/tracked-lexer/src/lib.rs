pub use logos::Logos;

#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(skip r"[ \t\r\n\f]+")]
#[logos(skip(r"//[^\n\r]*", allow_greedy = true))]
#[logos(skip r"/\*([^*]|\*+[^*/])*\*+/")]
pub enum Token<'src> {
    Error,
    /// ```ignore
    /// <identifier>, $<identifier>, _$<identifier>
    /// ```
    #[regex(r"[\p{XID_Start}_$][\p{XID_Continue}$]*")]
    Identifier(&'src str),
    #[regex(r"[0-9][0-9_]*")]
    Int(&'src str),
    #[regex(r"[0-9][0-9_]*\.[0-9][0-9_]*([eE][+-]?[0-9]+)?")]
    Float(&'src str),
    /// Kept with its quotes so it renders back verbatim.
    #[regex(r#""([^"\\]|\\.)*""#)]
    StringLit(&'src str),

    // --- Keywords ---
    #[token("var")]
    Var,
    #[token("let")]
    Let,
    #[token("true")]
    True,
    #[token("false")]
    False,
    #[token("nil")]
    Nil,

    // --- Delimiters & Punctuation ---
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,
    #[token("<")]
    LAngle,
    #[token(">")]
    RAngle,
    #[token("@")]
    At,
    #[token("\\")]
    Backslash,
    #[token("&")]
    Ampersand,
    #[token("?")]
    QuestionMark,
    #[token("!")]
    Exclamation,
    #[token(":")]
    Colon,
    #[token(",")]
    Comma,
    #[token(";")]
    Semicolon,
    #[token("=")]
    Equal,
    #[token(".")]
    Dot,
    #[token("...")]
    Ellipsis,
    #[token("..<")]
    HalfOpenRange,
    #[token("->")]
    Arrow,

    // --- Operators ---
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Asterisk,
    #[token("/")]
    Slash,
    #[token("%")]
    Percent,
    #[token("==")]
    EqualEqual,
    #[token("!=")]
    NotEqual,
    #[token("<=")]
    LessEqual,
    #[token(">=")]
    GreaterEqual,
    #[token("&&")]
    AndAnd,
    #[token("||")]
    OrOr,
    #[token("??")]
    Coalesce,
}

impl std::fmt::Display for Token<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Token::Error => write!(f, "error"),
            Token::Identifier(name) => write!(f, "{}", name),
            Token::Int(value) => write!(f, "{}", value),
            Token::Float(value) => write!(f, "{}", value),
            Token::StringLit(value) => write!(f, "{}", value),
            Token::Var => write!(f, "var"),
            Token::Let => write!(f, "let"),
            Token::True => write!(f, "true"),
            Token::False => write!(f, "false"),
            Token::Nil => write!(f, "nil"),
            Token::LParen => write!(f, "("),
            Token::RParen => write!(f, ")"),
            Token::LBrace => write!(f, "{{"),
            Token::RBrace => write!(f, "}}"),
            Token::LBracket => write!(f, "["),
            Token::RBracket => write!(f, "]"),
            Token::LAngle => write!(f, "<"),
            Token::RAngle => write!(f, ">"),
            Token::At => write!(f, "@"),
            Token::Backslash => write!(f, "\\"),
            Token::Ampersand => write!(f, "&"),
            Token::QuestionMark => write!(f, "?"),
            Token::Exclamation => write!(f, "!"),
            Token::Colon => write!(f, ":"),
            Token::Comma => write!(f, ","),
            Token::Semicolon => write!(f, ";"),
            Token::Equal => write!(f, "="),
            Token::Dot => write!(f, "."),
            Token::Ellipsis => write!(f, "..."),
            Token::HalfOpenRange => write!(f, "..<"),
            Token::Arrow => write!(f, "->"),
            Token::Plus => write!(f, "+"),
            Token::Minus => write!(f, "-"),
            Token::Asterisk => write!(f, "*"),
            Token::Slash => write!(f, "/"),
            Token::Percent => write!(f, "%"),
            Token::EqualEqual => write!(f, "=="),
            Token::NotEqual => write!(f, "!="),
            Token::LessEqual => write!(f, "<="),
            Token::GreaterEqual => write!(f, ">="),
            Token::AndAnd => write!(f, "&&"),
            Token::OrOr => write!(f, "||"),
            Token::Coalesce => write!(f, "??"),
        }
    }
}

pub fn lex<'src>(input: &'src str) -> impl Iterator<Item = Result<Token<'src>, String>> + 'src {
    Token::lexer(input)
        .spanned()
        .map(|(token, span)| match token {
            Ok(Token::Error) | Err(_) => {
                Err(format!("Unexpected token at position {}", span.start))
            }
            Ok(t) => Ok(t),
        })
}
