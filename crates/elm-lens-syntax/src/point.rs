//! Source positions
//!
//! Rows and columns are zero-based; columns count bytes, matching what
//! tree-sitter reports for node positions. See
//! [`SyntaxTree::utf16_column`](crate::SyntaxTree::utf16_column) for the
//! unit LSP clients expect.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A position in a source file
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub struct Point {
    pub row: u32,
    pub column: u32,
}

impl Point {
    pub const fn new(row: u32, column: u32) -> Self {
        Self { row, column }
    }

    /// The same column one row above, clamped to the first row
    pub fn line_above(self) -> Self {
        Self {
            row: self.row.saturating_sub(1),
            column: self.column,
        }
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.row, self.column)
    }
}

/// A start/end pair of positions
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub struct Span {
    pub start: Point,
    pub end: Point,
}

impl Span {
    pub const fn new(start: Point, end: Point) -> Self {
        Self { start, end }
    }

    /// Whether `end` does not precede `start`
    pub fn is_well_ordered(&self) -> bool {
        self.start <= self.end
    }

    /// Whether the point falls inside the span (end inclusive)
    pub fn contains(&self, point: Point) -> bool {
        self.start <= point && point <= self.end
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}
