//! Error types for the data-loader crate.
//!
//! Loading is the only fallible part of the system. Once a `RatingDataset`
//! exists, every derived artifact and every query over it is infallible.

use thiserror::Error;

/// Errors that can occur while loading, joining and validating ratings
#[derive(Error, Debug)]
pub enum DataLoadError {
    /// File could not be found or opened
    #[error("Failed to open file: {path}")]
    FileNotFound { path: String },

    /// I/O error occurred while reading file
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// A CSV record couldn't be deserialized
    ///
    /// `line` is the 1-based line in the file when the csv reader knows it.
    #[error("Parse error at line {line} in {file}: {reason}")]
    ParseError {
        file: String,
        line: u64,
        reason: String,
    },

    /// A data field had an invalid value
    #[error("Invalid value for {field}: {value}")]
    InvalidValue { field: String, value: String },

    /// Data validation failed
    #[error("Validation failed: {0}")]
    ValidationError(String),
}

impl DataLoadError {
    /// Wrap a csv error with the file it came from
    pub(crate) fn from_csv(file: &str, err: csv::Error) -> Self {
        let line = err.position().map(|p| p.line()).unwrap_or(0);
        let reason = err.to_string();
        match err.into_kind() {
            csv::ErrorKind::Io(io) => DataLoadError::IoError(io),
            _ => DataLoadError::ParseError {
                file: file.to_string(),
                line,
                reason,
            },
        }
    }
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, DataLoadError>;
