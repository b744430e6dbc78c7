//! Tokenizer for the expression language.

use crate::token::{Token, TokenKind};
use json_template::{Cursor, Span, SyntaxError, SyntaxErrorKind};

const TWO_CHAR_OPERATORS: [(&str, TokenKind); 6] = [
    ("==", TokenKind::Equal),
    ("!=", TokenKind::NotEqual),
    ("<=", TokenKind::LessOrEqual),
    (">=", TokenKind::GreaterOrEqual),
    ("&&", TokenKind::And),
    ("||", TokenKind::Or),
];

pub struct ExpressionLexer<'a> {
    cursor: Cursor<'a>,
}

impl<'a> ExpressionLexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            cursor: Cursor::new(input),
        }
    }

    /// Tokenizes the whole input. The last token is always `EndOfFile`.
    pub fn lex(mut self) -> Result<Vec<Token>, SyntaxError> {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token()?;
            let done = token.kind == TokenKind::EndOfFile;
            tokens.push(token);
            if done {
                return Ok(tokens);
            }
        }
    }

    fn next_token(&mut self) -> Result<Token, SyntaxError> {
        self.cursor.skip_whitespace();

        let Some(c) = self.cursor.peek() else {
            return Ok(Token::new(TokenKind::EndOfFile, "", self.cursor.mark()));
        };

        // A '-' directly followed by a digit always starts a negative literal,
        // whatever came before it: `a-1` lexes as `a` `-1`.
        let negative_literal =
            c == '-' && matches!(self.cursor.peek_nth(1), Some(d) if d.is_ascii_digit());

        if c.is_ascii_digit() || negative_literal {
            return self.read_number();
        }
        if c == '\'' || c == '"' {
            return self.read_string(c);
        }
        if c.is_ascii_alphabetic() || c == '_' {
            return Ok(self.read_identifier());
        }

        for (op, kind) in TWO_CHAR_OPERATORS {
            if self.cursor.starts_with(op) {
                let start = self.cursor.mark();
                self.cursor.advance_by(2);
                return Ok(Token::new(kind, "", self.cursor.span_from(start)));
            }
        }

        let kind = match c {
            '+' => TokenKind::Plus,
            '-' => TokenKind::Minus,
            '*' => TokenKind::Star,
            '/' => TokenKind::Slash,
            '%' => TokenKind::Percent,
            '<' => TokenKind::LessThan,
            '>' => TokenKind::GreaterThan,
            '!' => TokenKind::Not,
            '(' => TokenKind::LeftParen,
            ')' => TokenKind::RightParen,
            '[' => TokenKind::LeftBracket,
            ']' => TokenKind::RightBracket,
            '.' => TokenKind::Dot,
            ',' => TokenKind::Comma,
            '?' => TokenKind::Question,
            ':' => TokenKind::Colon,
            _ => {
                return Err(self
                    .cursor
                    .error_here(SyntaxErrorKind::UnexpectedCharacter(c)))
            }
        };
        let start = self.cursor.mark();
        self.cursor.advance();
        Ok(Token::new(kind, "", self.cursor.span_from(start)))
    }

    fn read_number(&mut self) -> Result<Token, SyntaxError> {
        let start = self.cursor.mark();
        let raw = self.cursor.scan_number()?;
        Ok(Token::new(TokenKind::Number, raw, self.cursor.span_from(start)))
    }

    fn read_identifier(&mut self) -> Token {
        let start = self.cursor.mark();
        let mut name = String::new();
        while let Some(c) = self.cursor.peek() {
            if !(c.is_ascii_alphanumeric() || c == '_') {
                break;
            }
            name.push(c);
            self.cursor.advance();
        }
        let span = self.cursor.span_from(start);
        match name.as_str() {
            "true" => Token::new(TokenKind::True, name, span),
            "false" => Token::new(TokenKind::False, name, span),
            "null" => Token::new(TokenKind::Null, name, span),
            _ => Token::new(TokenKind::Identifier, name, span),
        }
    }

    fn read_string(&mut self, quote: char) -> Result<Token, SyntaxError> {
        let start = self.cursor.mark();
        self.cursor.advance();

        let mut value = String::new();
        loop {
            let Some(c) = self.cursor.peek() else {
                return Err(self.unterminated(start));
            };
            match c {
                '\n' | '\r' => {
                    return Err(self.cursor.error_here(SyntaxErrorKind::NewlineInString));
                }
                '\\' => {
                    self.cursor.advance();
                    let Some(escaped) = self.cursor.peek() else {
                        return Err(self.unterminated(start));
                    };
                    let decoded = match escaped {
                        '"' => '"',
                        '\'' => '\'',
                        '\\' => '\\',
                        'n' => '\n',
                        'r' => '\r',
                        't' => '\t',
                        other => {
                            return Err(self
                                .cursor
                                .error_here(SyntaxErrorKind::InvalidEscape(other)));
                        }
                    };
                    value.push(decoded);
                    self.cursor.advance();
                }
                c if c == quote => {
                    self.cursor.advance();
                    return Ok(Token::new(
                        TokenKind::String,
                        value,
                        self.cursor.span_from(start),
                    ));
                }
                c => {
                    value.push(c);
                    self.cursor.advance();
                }
            }
        }
    }

    fn unterminated(&self, start: Span) -> SyntaxError {
        SyntaxError::new(
            SyntaxErrorKind::UnterminatedString,
            self.cursor.span_from(start),
        )
    }
}

/// Tokenizes `input`.
pub fn tokenize(input: &str) -> Result<Vec<Token>, SyntaxError> {
    ExpressionLexer::new(input).lex()
}
