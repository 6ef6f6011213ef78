//! Source Location Utilities
//!
//! Converts byte offsets into 1-based line/column positions for diagnostics.
//! Positions are always derived from `(input, offset)` on demand and are never
//! cached alongside the input.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A position in source code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    /// Byte offset from start of input
    pub offset: usize,
    /// Line number (1-based)
    pub line: usize,
    /// Column number (1-based, counted in characters)
    pub column: usize,
}

impl Position {
    /// Create a new source position
    #[inline]
    pub fn new(offset: usize, line: usize, column: usize) -> Self {
        Self {
            offset,
            line,
            column,
        }
    }

    /// Create a position at the start of input
    #[inline]
    pub fn start() -> Self {
        Self::new(0, 1, 1)
    }

    /// Calculate position from a byte offset in the input
    ///
    /// The prefix `input[..offset]` is split on `\n`: the line is the number
    /// of segments and the column is the character length of the last
    /// segment plus one. Offsets past the end are clamped.
    pub fn from_offset(input: &str, offset: usize) -> Self {
        let mut offset = offset.min(input.len());
        while !input.is_char_boundary(offset) {
            offset -= 1;
        }

        let prefix = &input.as_bytes()[..offset];
        let line = memchr::memchr_iter(b'\n', prefix).count() + 1;
        let line_start = memchr::memrchr(b'\n', prefix).map_or(0, |n| n + 1);
        let column = input[line_start..offset].chars().count() + 1;

        Self {
            offset,
            line,
            column,
        }
    }

    /// Whether this position sits at the end of `input`
    #[inline]
    pub fn is_end_of(&self, input: &str) -> bool {
        self.offset >= input.len()
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {} column {}", self.line, self.column)
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::start()
    }
}
