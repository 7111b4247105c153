//! Source location tracking.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A line/column position inside a statement fragment.
///
/// Both fields are 1-based; columns count characters, not bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    /// Line number (1-based).
    pub line: usize,
    /// Column number (1-based).
    pub column: usize,
}

impl Position {
    /// Create a new position.
    #[must_use]
    pub const fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }

    /// The position of the first character.
    #[must_use]
    pub const fn start() -> Self {
        Self { line: 1, column: 1 }
    }

    /// The position after consuming `ch`.
    #[must_use]
    pub const fn advance(self, ch: char) -> Self {
        if ch == '\n' {
            Self {
                line: self.line + 1,
                column: 1,
            }
        } else {
            Self {
                line: self.line,
                column: self.column + 1,
            }
        }
    }

    /// The position after consuming every character of `text`.
    #[must_use]
    pub fn advance_str(self, text: &str) -> Self {
        text.chars().fold(self, Self::advance)
    }

    /// Convert back to a byte offset in `source`.
    ///
    /// The position just past the last character maps to `source.len()`.
    /// Returns `None` if the position lies outside `source`.
    #[must_use]
    pub fn byte_offset(&self, source: &str) -> Option<usize> {
        let mut pos = Self::start();
        for (i, ch) in source.char_indices() {
            if pos == *self {
                return Some(i);
            }
            pos = pos.advance(ch);
        }
        (pos == *self).then_some(source.len())
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::start()
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}
