//! Position-tracking character cursor shared by the JSON and expression lexers.

use crate::error::{SyntaxError, SyntaxErrorKind};
use crate::span::Span;

/// Walks a `&str` one character at a time, keeping the byte offset and the
/// 1-based line/column of the next character.
///
/// `\n`, `\r` and `\r\n` each count as a single line break.
#[derive(Debug, Clone)]
pub struct Cursor<'a> {
    input: &'a str,
    pos: usize,
    line: usize,
    column: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            input,
            pos: 0,
            line: 1,
            column: 1,
        }
    }

    pub fn input(&self) -> &'a str {
        self.input
    }

    pub fn pos(&self) -> usize {
        self.pos
    }

    pub fn line(&self) -> usize {
        self.line
    }

    pub fn column(&self) -> usize {
        self.column
    }

    pub fn is_at_end(&self) -> bool {
        self.pos >= self.input.len()
    }

    pub fn peek(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    pub fn peek_nth(&self, n: usize) -> Option<char> {
        self.input[self.pos..].chars().nth(n)
    }

    pub fn starts_with(&self, s: &str) -> bool {
        self.input[self.pos..].starts_with(s)
    }

    /// Consumes one character and returns it.
    pub fn advance(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        let line_break = match c {
            '\n' => true,
            '\r' => self.peek() != Some('\n'),
            _ => false,
        };
        if line_break {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(c)
    }

    pub fn advance_by(&mut self, n: usize) {
        for _ in 0..n {
            self.advance();
        }
    }

    /// Zero-length span at the current position, to be closed by [`Cursor::span_from`].
    pub fn mark(&self) -> Span {
        Span::new(self.pos, 0, self.line, self.column, self.line, self.column)
    }

    /// Span from `start` up to (not including) the current position.
    pub fn span_from(&self, start: Span) -> Span {
        Span::new(
            start.start,
            self.pos - start.start,
            start.start_line,
            start.start_col,
            self.line,
            self.column.saturating_sub(1).max(1),
        )
    }

    /// Single-character span at the current position.
    pub fn point(&self) -> Span {
        Span::point(self.pos, self.line, self.column)
    }

    pub fn error_here(&self, kind: SyntaxErrorKind) -> SyntaxError {
        SyntaxError::new(kind, self.point())
    }

    pub fn skip_whitespace(&mut self) {
        while let Some(' ' | '\t' | '\n' | '\r') = self.peek() {
            self.advance();
        }
    }

    fn skip_digits(&mut self) {
        while matches!(self.peek(), Some('0'..='9')) {
            self.advance();
        }
    }

    /// Scans a number following the JSON grammar and returns its raw text.
    ///
    /// A leading `0` is a complete integer part: `012` yields `0` and leaves
    /// `12` in the input.
    pub fn scan_number(&mut self) -> Result<&'a str, SyntaxError> {
        let start = self.pos;

        if self.peek() == Some('-') {
            self.advance();
        }

        match self.peek() {
            Some('0') => {
                self.advance();
            }
            Some('1'..='9') => self.skip_digits(),
            _ => return Err(self.error_here(SyntaxErrorKind::InvalidNumber)),
        }

        if self.peek() == Some('.') {
            self.advance();
            if !matches!(self.peek(), Some('0'..='9')) {
                return Err(self.error_here(SyntaxErrorKind::InvalidFraction));
            }
            self.skip_digits();
        }

        if let Some('e' | 'E') = self.peek() {
            self.advance();
            if let Some('+' | '-') = self.peek() {
                self.advance();
            }
            if !matches!(self.peek(), Some('0'..='9')) {
                return Err(self.error_here(SyntaxErrorKind::InvalidExponent));
            }
            self.skip_digits();
        }

        Ok(&self.input[start..self.pos])
    }
}
