//! Cell location tracking for capture files
//!
//! CSV diagnostics point at a row (file line) and a column (field index), both
//! 1-based so they match what a spreadsheet or editor shows.
use serde::{Deserialize, Serialize};
use std::fmt;

/// A cell in a CSV file.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
pub struct CellLocation {
    /// Line number in the file (1-based, header is line 1)
    pub line: u32,
    /// Column number within the row (1-based)
    pub column: u32,
}

impl CellLocation {
    pub fn new(line: u32, column: u32) -> Self {
        Self { line, column }
    }

    /// Location of a field given its 0-based row and field indices
    pub fn from_indices(row_index: usize, field_index: usize) -> Self {
        Self {
            line: (row_index + 1) as u32,
            column: (field_index + 1) as u32,
        }
    }

    /// Location covering a whole row (column 1)
    pub fn row(row_index: usize) -> Self {
        Self::from_indices(row_index, 0)
    }
}

impl fmt::Display for CellLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}
