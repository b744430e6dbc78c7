use json_template::Span;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Number,
    String,
    True,
    False,
    Null,
    Identifier,

    Plus,
    Minus,
    Star,
    Slash,
    Percent,

    Equal,
    NotEqual,
    LessThan,
    LessOrEqual,
    GreaterThan,
    GreaterOrEqual,

    And,
    Or,
    Not,

    LeftParen,
    RightParen,
    LeftBracket,
    RightBracket,
    Dot,
    Comma,
    Question,
    Colon,

    EndOfFile,
}

impl TokenKind {
    /// Source text of fixed tokens; `None` for literals and identifiers.
    pub fn symbol(self) -> Option<&'static str> {
        let s = match self {
            TokenKind::True => "true",
            TokenKind::False => "false",
            TokenKind::Null => "null",
            TokenKind::Plus => "+",
            TokenKind::Minus => "-",
            TokenKind::Star => "*",
            TokenKind::Slash => "/",
            TokenKind::Percent => "%",
            TokenKind::Equal => "==",
            TokenKind::NotEqual => "!=",
            TokenKind::LessThan => "<",
            TokenKind::LessOrEqual => "<=",
            TokenKind::GreaterThan => ">",
            TokenKind::GreaterOrEqual => ">=",
            TokenKind::And => "&&",
            TokenKind::Or => "||",
            TokenKind::Not => "!",
            TokenKind::LeftParen => "(",
            TokenKind::RightParen => ")",
            TokenKind::LeftBracket => "[",
            TokenKind::RightBracket => "]",
            TokenKind::Dot => ".",
            TokenKind::Comma => ",",
            TokenKind::Question => "?",
            TokenKind::Colon => ":",
            TokenKind::Number | TokenKind::String | TokenKind::Identifier | TokenKind::EndOfFile => {
                return None
            }
        };
        Some(s)
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.symbol() {
            Some(s) => f.write_str(s),
            None => match self {
                TokenKind::Number => f.write_str("number"),
                TokenKind::String => f.write_str("string"),
                TokenKind::Identifier => f.write_str("identifier"),
                _ => f.write_str("end of input"),
            },
        }
    }
}

/// A lexed token. `text` holds the raw number text, the decoded string
/// contents or the identifier name, and is empty for fixed tokens.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    pub span: Span,
}

impl Token {
    pub fn new(kind: TokenKind, text: impl Into<String>, span: Span) -> Self {
        Self {
            kind,
            text: text.into(),
            span,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            TokenKind::Number | TokenKind::Identifier => f.write_str(&self.text),
            TokenKind::String => write!(f, "'{}'", self.text),
            kind => write!(f, "{kind}"),
        }
    }
}
