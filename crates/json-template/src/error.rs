use crate::span::Span;
use thiserror::Error;

/// What went wrong while lexing or parsing.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SyntaxErrorKind {
    #[error("Unexpected character '{0}'")]
    UnexpectedCharacter(char),

    #[error("Unterminated string literal")]
    UnterminatedString,

    #[error("Unterminated expression")]
    UnterminatedExpression,

    #[error("Invalid escape character '{0}' in string literal")]
    InvalidEscape(char),

    #[error("Invalid unicode escape")]
    InvalidUnicodeEscape,

    #[error("Unexpected end while reading hexadecimal escape sequence")]
    UnexpectedEndOfEscape,

    #[error("Invalid number")]
    InvalidNumber,

    #[error("Invalid number fraction")]
    InvalidFraction,

    #[error("Invalid number exponent")]
    InvalidExponent,

    #[error("Expected token '{expected}' but got '{found}'")]
    ExpectedToken { expected: String, found: String },

    #[error("Unexpected token '{0}'")]
    UnexpectedToken(String),

    #[error("Expected ',' or ']' in array")]
    ExpectedArraySeparator,

    #[error("Expected ',' or '}}' in object")]
    ExpectedObjectSeparator,

    #[error("Property name cannot contain expressions")]
    ExpressionInPropertyName,

    #[error("Duplicate property '{0}'")]
    DuplicateProperty(String),

    #[error("Unexpected token '{0}' after the end of the input")]
    TrailingTokens(String),

    #[error("Newline in string literal")]
    NewlineInString,

    #[error("Expected expression but got '{0}'")]
    ExpectedExpression(String),

    #[error("Unexpected token '{0}' after expression")]
    UnexpectedTokenAfterExpression(String),
}

/// A lexing or parsing failure, for either JSON text or an embedded expression.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{kind}")]
pub struct SyntaxError {
    pub kind: SyntaxErrorKind,
    pub span: Span,
}

impl SyntaxError {
    pub fn new(kind: SyntaxErrorKind, span: Span) -> Self {
        Self { kind, span }
    }

    pub fn line(&self) -> usize {
        self.span.start_line
    }

    pub fn column(&self) -> usize {
        self.span.start_col
    }
}

/// Raised while navigating an already parsed tree that has the wrong shape.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("Error processing json data: {message}")]
pub struct ProcessingError {
    pub message: String,
    pub span: Span,
}

impl ProcessingError {
    pub fn new(message: impl Into<String>, span: Span) -> Self {
        Self {
            message: message.into(),
            span,
        }
    }

    pub fn line(&self) -> usize {
        self.span.start_line
    }

    pub fn column(&self) -> usize {
        self.span.start_col
    }
}
