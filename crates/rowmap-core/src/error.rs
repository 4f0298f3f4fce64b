//! Error types for rowmap-core

use thiserror::Error;

use crate::value::Kind;

/// Result type alias using [`Error`]
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while resolving, binding or converting records
#[derive(Debug, Error)]
pub enum Error {
    /// The type cannot be used as a record of named fields
    #[error("Invalid record type {type_name}: {reason}")]
    InvalidType { type_name: String, reason: String },

    /// The header row has no columns
    #[error("Header has no columns")]
    EmptyHeader,

    /// A cell could not be converted to the field's kind
    #[error(
        "Cannot convert {value:?} to {kind} for field '{field}'{}",
        location(.row, .column)
    )]
    Conversion {
        /// Column name of the field
        field: String,
        /// Raw cell text
        value: String,
        /// Declared kind of the field
        kind: Kind,
        /// 1-based data row number (header excluded), if known
        row: Option<usize>,
        /// 0-based column index, if known
        column: Option<usize>,
    },

    /// A data row has a different number of fields than the header
    #[error("Malformed row {row}: expected {expected} fields, found {found}")]
    MalformedRow {
        row: usize,
        expected: usize,
        found: usize,
    },

    /// A session bound to one record type was asked to handle another
    #[error("Type mismatch: session is bound to {bound}, got {requested}")]
    TypeMismatch {
        bound: &'static str,
        requested: &'static str,
    },

    /// The header lacks columns for declared fields (strict decoding only)
    #[error("Header is missing columns: {}", .columns.join(", "))]
    MissingColumns { columns: Vec<String> },
}

fn location(row: &Option<usize>, column: &Option<usize>) -> String {
    match (row, column) {
        (Some(row), Some(column)) => format!(" at row {row}, column {column}"),
        (Some(row), None) => format!(" at row {row}"),
        (None, Some(column)) => format!(" at column {column}"),
        (None, None) => String::new(),
    }
}

impl Error {
    /// Create an [`Error::InvalidType`] for the named type
    pub fn invalid_type<N: Into<String>, R: Into<String>>(type_name: N, reason: R) -> Self {
        Error::InvalidType {
            type_name: type_name.into(),
            reason: reason.into(),
        }
    }

    /// Attach a row/column position to a conversion error.
    ///
    /// Other variants are returned unchanged.
    pub fn at(self, row: usize, column: usize) -> Self {
        match self {
            Error::Conversion {
                field, value, kind, ..
            } => Error::Conversion {
                field,
                value,
                kind,
                row: Some(row),
                column: Some(column),
            },
            other => other,
        }
    }

    /// Whether the error only concerns the current row.
    ///
    /// A session that returned a row error can keep decoding.
    pub fn is_row_error(&self) -> bool {
        matches!(self, Error::Conversion { .. } | Error::MalformedRow { .. })
    }
}
