//! Position tracking for CFML entities
//!
//! Stores the source location (line/column) of declarations and references
//! for go-to-definition.

use super::FileId;

/// A span representing a range in source code (0-indexed for LSP compatibility)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Span {
    pub start: Position,
    pub end: Position,
}

/// A position in source code (0-indexed, column counted in characters)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    pub line: u32,
    pub column: u32,
}

/// A span inside a specific file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Location {
    pub file: FileId,
    pub range: Span,
}

impl Span {
    pub fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }

    /// Create a span from line/column coordinates
    pub fn from_coords(start_line: u32, start_col: u32, end_line: u32, end_col: u32) -> Self {
        Self {
            start: Position::new(start_line, start_col),
            end: Position::new(end_line, end_col),
        }
    }

    /// A zero-width span at `position`.
    pub fn empty(position: Position) -> Self {
        Self::new(position, position)
    }

    /// Whether `position` lies in this span, both ends inclusive.
    ///
    /// Positions order by line, then column.
    pub fn contains(&self, position: Position) -> bool {
        (self.start..=self.end).contains(&position)
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

impl Position {
    pub fn new(line: u32, column: u32) -> Self {
        Self { line, column }
    }
}

impl Location {
    pub fn new(file: FileId, range: Span) -> Self {
        Self { file, range }
    }
}
