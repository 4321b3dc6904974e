//! NAICS Core Error Types

use std::path::PathBuf;
use thiserror::Error;

/// Core Result type
pub type CoreResult<T> = Result<T, CoreError>;

/// Core Error type
#[derive(Error, Debug)]
pub enum CoreError {
    /// Required source file is not on disk
    #[error("Source file not found: {path:?}")]
    SourceMissing { path: PathBuf },

    /// File extension has no reader
    #[error("Unsupported spreadsheet format: {path:?}")]
    UnsupportedFormat { path: PathBuf },

    /// Workbook could not be opened or a worksheet could not be read
    #[error("Workbook error in {path:?}: {message}")]
    Workbook { path: PathBuf, message: String },

    /// Workbook has no worksheets
    #[error("Workbook {path:?} contains no worksheets")]
    EmptyWorkbook { path: PathBuf },

    /// Header row index lies beyond the sheet
    #[error("Header row {row} is beyond the end of {path:?}")]
    HeaderRowMissing { path: PathBuf, row: usize },

    /// Column fallback index is not a valid column
    #[error("Fallback index {index} is out of bounds for {columns} columns")]
    ColumnOutOfBounds { index: usize, columns: usize },

    /// CSV reader error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl CoreError {
    /// Create a workbook error
    pub fn workbook(path: impl Into<PathBuf>, message: impl ToString) -> Self {
        Self::Workbook {
            path: path.into(),
            message: message.to_string(),
        }
    }

    /// Create a column bounds error
    pub fn column_out_of_bounds(index: usize, columns: usize) -> Self {
        Self::ColumnOutOfBounds { index, columns }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_out_of_bounds_message() {
        let err = CoreError::column_out_of_bounds(4, 3);
        assert_eq!(
            err.to_string(),
            "Fallback index 4 is out of bounds for 3 columns"
        );
    }

    #[test]
    fn test_source_missing_message() {
        let err = CoreError::SourceMissing {
            path: PathBuf::from("data/descriptions.xlsx"),
        };
        assert!(err.to_string().contains("descriptions.xlsx"));
    }
}
