//! Source positions.

use std::fmt;

/// A range of source text.
///
/// `start` and `length` are byte offsets into the source; lines and columns
/// are 1-based and count characters. `end_col` is inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Span {
    pub start: usize,
    pub length: usize,
    pub start_line: usize,
    pub start_col: usize,
    pub end_line: usize,
    pub end_col: usize,
}

impl Span {
    pub fn new(
        start: usize,
        length: usize,
        start_line: usize,
        start_col: usize,
        end_line: usize,
        end_col: usize,
    ) -> Self {
        Self {
            start,
            length,
            start_line,
            start_col,
            end_line,
            end_col,
        }
    }

    /// A single-character span at the given position.
    pub fn point(start: usize, line: usize, col: usize) -> Self {
        Self::new(start, 1, line, col, line, col)
    }

    /// Byte offset one past the last byte of the span.
    pub fn end(&self) -> usize {
        self.start + self.length
    }

    /// Joins two spans: starts where `self` starts and ends where `other` ends.
    pub fn to(&self, other: Span) -> Span {
        Span {
            start: self.start,
            length: other.end().saturating_sub(self.start),
            start_line: self.start_line,
            start_col: self.start_col,
            end_line: other.end_line,
            end_col: other.end_col,
        }
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({},{}) - ({}, {})",
            self.start_line, self.start_col, self.end_line, self.end_col
        )
    }
}
