//! JSON lexer with `{{ expression }}` placeholders inside string literals.

use crate::cursor::Cursor;
use crate::error::{SyntaxError, SyntaxErrorKind};
use crate::span::Span;
use crate::template::{TemplateSegment, TemplateString};
use crate::token::{Token, TokenKind};

const KEYWORDS: [(&str, TokenKind); 3] = [
    ("true", TokenKind::True),
    ("false", TokenKind::False),
    ("null", TokenKind::Null),
];

pub struct JsonLexer<'a> {
    cursor: Cursor<'a>,
}

impl<'a> JsonLexer<'a> {
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
            return Ok(Token::new(TokenKind::EndOfFile, self.cursor.mark()));
        };

        match c {
            '{' => Ok(self.single(TokenKind::LeftBrace)),
            '}' => Ok(self.single(TokenKind::RightBrace)),
            '[' => Ok(self.single(TokenKind::LeftBracket)),
            ']' => Ok(self.single(TokenKind::RightBracket)),
            ':' => Ok(self.single(TokenKind::Colon)),
            ',' => Ok(self.single(TokenKind::Comma)),
            '"' => self.read_string(),
            '-' | '0'..='9' => self.read_number(),
            _ => self.read_keyword(c),
        }
    }

    fn single(&mut self, kind: TokenKind) -> Token {
        let start = self.cursor.mark();
        self.cursor.advance();
        Token::new(kind, self.cursor.span_from(start))
    }

    fn read_number(&mut self) -> Result<Token, SyntaxError> {
        let start = self.cursor.mark();
        let raw = self.cursor.scan_number()?;
        let mut token = Token::new(TokenKind::Number, self.cursor.span_from(start));
        token.text = Some(raw.to_string());
        Ok(token)
    }

    fn read_keyword(&mut self, c: char) -> Result<Token, SyntaxError> {
        for (keyword, kind) in KEYWORDS {
            if self.cursor.starts_with(keyword) {
                let start = self.cursor.mark();
                self.cursor.advance_by(keyword.len());
                let mut token = Token::new(kind, self.cursor.span_from(start));
                token.text = Some(keyword.to_string());
                return Ok(token);
            }
        }
        Err(self
            .cursor
            .error_here(SyntaxErrorKind::UnexpectedCharacter(c)))
    }

    fn read_string(&mut self) -> Result<Token, SyntaxError> {
        let start = self.cursor.mark();
        self.cursor.advance();

        let mut segments = Vec::new();
        let mut text = String::new();
        let mut text_start = self.cursor.mark();

        loop {
            let Some(c) = self.cursor.peek() else {
                return Err(SyntaxError::new(
                    SyntaxErrorKind::UnterminatedString,
                    self.cursor.span_from(start),
                ));
            };

            match c {
                '"' => {
                    self.flush_text(&mut text, text_start, &mut segments);
                    self.cursor.advance();
                    let template = TemplateString::new(segments);
                    let mut token = Token::new(TokenKind::String, self.cursor.span_from(start));
                    token.text = Some(template.to_string());
                    token.template = Some(template);
                    return Ok(token);
                }
                '\\' => {
                    self.cursor.advance();
                    let decoded = self.read_escape(start)?;
                    text.push(decoded);
                }
                '{' if self.cursor.peek_nth(1) == Some('{') => {
                    self.flush_text(&mut text, text_start, &mut segments);
                    segments.push(self.read_expression()?);
                    text_start = self.cursor.mark();
                }
                '\n' | '\r' => {
                    return Err(SyntaxError::new(
                        SyntaxErrorKind::UnterminatedString,
                        self.cursor.span_from(start),
                    ));
                }
                _ => {
                    text.push(c);
                    self.cursor.advance();
                }
            }
        }
    }

    fn flush_text(&self, text: &mut String, start: Span, segments: &mut Vec<TemplateSegment>) {
        if text.is_empty() {
            return;
        }
        segments.push(TemplateSegment::text(
            std::mem::take(text),
            self.cursor.span_from(start),
        ));
    }

    /// Reads `{{ … }}` verbatim; line breaks are allowed inside.
    fn read_expression(&mut self) -> Result<TemplateSegment, SyntaxError> {
        let start = self.cursor.mark();
        self.cursor.advance_by(2);

        let mut source = String::new();
        loop {
            if self.cursor.starts_with("}}") {
                self.cursor.advance_by(2);
                return Ok(TemplateSegment::expression(
                    source.trim(),
                    self.cursor.span_from(start),
                ));
            }
            match self.cursor.advance() {
                Some(c) => source.push(c),
                None => {
                    return Err(SyntaxError::new(
                        SyntaxErrorKind::UnterminatedExpression,
                        self.cursor.span_from(start),
                    ));
                }
            }
        }
    }

    /// Decodes the escape after a backslash that has already been consumed.
    fn read_escape(&mut self, string_start: Span) -> Result<char, SyntaxError> {
        let Some(escaped) = self.cursor.peek() else {
            return Err(SyntaxError::new(
                SyntaxErrorKind::UnterminatedString,
                self.cursor.span_from(string_start),
            ));
        };

        let decoded = match escaped {
            '"' => '"',
            '\\' => '\\',
            '/' => '/',
            'b' => '\u{8}',
            'f' => '\u{c}',
            'n' => '\n',
            'r' => '\r',
            't' => '\t',
            'u' => {
                self.cursor.advance();
                return self.read_unicode_escape();
            }
            other => {
                return Err(self
                    .cursor
                    .error_here(SyntaxErrorKind::InvalidEscape(other)));
            }
        };
        self.cursor.advance();
        Ok(decoded)
    }

    /// Reads the hex digits of `\uXXXX`, joining a following low surrogate escape
    /// when the first one is a high surrogate.
    fn read_unicode_escape(&mut self) -> Result<char, SyntaxError> {
        let start = self.cursor.point();
        let high = self.read_hex_code()?;

        let code = match high {
            0xD800..=0xDBFF => {
                if !self.cursor.starts_with("\\u") {
                    return Err(SyntaxError::new(SyntaxErrorKind::InvalidUnicodeEscape, start));
                }
                self.cursor.advance_by(2);
                let low = self.read_hex_code()?;
                if !(0xDC00..=0xDFFF).contains(&low) {
                    return Err(SyntaxError::new(SyntaxErrorKind::InvalidUnicodeEscape, start));
                }
                0x10000 + ((high - 0xD800) << 10) + (low - 0xDC00)
            }
            _ => high,
        };

        char::from_u32(code)
            .ok_or_else(|| SyntaxError::new(SyntaxErrorKind::InvalidUnicodeEscape, start))
    }

    fn read_hex_code(&mut self) -> Result<u32, SyntaxError> {
        let mut code = 0u32;
        for _ in 0..4 {
            let Some(c) = self.cursor.peek() else {
                return Err(self
                    .cursor
                    .error_here(SyntaxErrorKind::UnexpectedEndOfEscape));
            };
            let digit = c
                .to_digit(16)
                .ok_or_else(|| self.cursor.error_here(SyntaxErrorKind::InvalidUnicodeEscape))?;
            code = (code << 4) + digit;
            self.cursor.advance();
        }
        Ok(code)
    }
}
