//! CSV error types

use thiserror::Error;

/// Result type for CSV operations
pub type CsvResult<T> = std::result::Result<T, CsvError>;

/// Errors that can occur during CSV decoding and encoding
#[derive(Debug, Error)]
pub enum CsvError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV library error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Record mapping error
    #[error(transparent)]
    Core(#[from] rowmap_core::Error),
}

impl CsvError {
    /// Whether the error only concerns the current row.
    ///
    /// After a row error the decoder can move on to the next row.
    pub fn is_row_error(&self) -> bool {
        match self {
            CsvError::Core(e) => e.is_row_error(),
            _ => false,
        }
    }

    /// The mapping error, if this is one
    pub fn as_core(&self) -> Option<&rowmap_core::Error> {
        match self {
            CsvError::Core(e) => Some(e),
            _ => None,
        }
    }
}
