//! Error types for the churn pipeline.
//!
//! Two families of failure abort a run: data that violates a documented
//! domain assumption ([`DataIntegrityError`]) and files that cannot be read
//! or written (`ChurnError::Resource`). Nothing is recovered locally.

use std::path::{Path, PathBuf};

use polars::error::PolarsError;
use thiserror::Error;

/// Result alias used throughout the library.
pub type Result<T> = std::result::Result<T, ChurnError>;

/// A value in the table broke one of the dataset's domain assumptions.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DataIntegrityError {
    /// An expected column is absent.
    #[error("column '{column}' not found in dataset")]
    MissingColumn { column: String },

    /// A cell holds a value outside the column's declared domain.
    #[error("unexpected value {value:?} in column '{column}' at row {row}")]
    UnexpectedValue {
        column: String,
        row: usize,
        value: String,
    },

    /// A numeric cell lies outside the column's fixed range.
    #[error("value {value} in column '{column}' at row {row} is outside [{min}, {max}]")]
    OutOfRange {
        column: String,
        row: usize,
        value: f64,
        min: f64,
        max: f64,
    },

    /// A column that must have been removed is still present.
    #[error("column '{column}' should not be present")]
    UnexpectedColumn { column: String },

    /// A string cell is empty or whitespace-only after cleaning.
    #[error("blank cell in column '{column}' at row {row}")]
    BlankCell { column: String, row: usize },

    /// The column's storage type cannot carry the expected values.
    #[error("column '{column}' has type {dtype}, expected {expected}")]
    UnexpectedType {
        column: String,
        dtype: String,
        expected: &'static str,
    },

    /// A configured reference category never occurs in the column.
    #[error("reference category {reference:?} does not occur in column '{column}'")]
    UnknownReference { column: String, reference: String },

    /// An aggregate was requested over zero rows.
    #[error("cannot compute {what} over an empty table")]
    EmptyTable { what: &'static str },
}

/// The main error type for the churn pipeline.
#[derive(Error, Debug)]
pub enum ChurnError {
    #[error("data integrity error: {0}")]
    DataIntegrity(#[from] DataIntegrityError),

    /// A file could not be read, created or replaced.
    #[error("failed to {action} '{}': {source}", path.display())]
    Resource {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Polars error: {0}")]
    Polars(#[from] PolarsError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ChurnError {
    pub fn resource(action: &'static str, path: &Path, source: std::io::Error) -> Self {
        ChurnError::Resource {
            action,
            path: path.to_path_buf(),
            source,
        }
    }

    pub fn is_data_integrity(&self) -> bool {
        matches!(self, ChurnError::DataIntegrity(_))
    }

    pub fn is_resource(&self) -> bool {
        matches!(self, ChurnError::Resource { .. })
    }

    /// Stable machine-readable code for the error.
    pub fn error_code(&self) -> &'static str {
        match self {
            ChurnError::DataIntegrity(inner) => match inner {
                DataIntegrityError::MissingColumn { .. } => "MISSING_COLUMN",
                DataIntegrityError::UnexpectedValue { .. } => "UNEXPECTED_VALUE",
                DataIntegrityError::OutOfRange { .. } => "OUT_OF_RANGE",
                DataIntegrityError::UnexpectedColumn { .. } => "UNEXPECTED_COLUMN",
                DataIntegrityError::BlankCell { .. } => "BLANK_CELL",
                DataIntegrityError::UnexpectedType { .. } => "UNEXPECTED_TYPE",
                DataIntegrityError::UnknownReference { .. } => "UNKNOWN_REFERENCE",
                DataIntegrityError::EmptyTable { .. } => "EMPTY_TABLE",
            },
            ChurnError::Resource { .. } => "RESOURCE_ERROR",
            ChurnError::Polars(_) => "POLARS_ERROR",
            ChurnError::Json(_) => "JSON_ERROR",
        }
    }
}
