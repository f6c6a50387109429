//! Error types for confiar.

use std::path::PathBuf;

/// Result type alias for confiar operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in confiar operations.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// I/O error during file operations.
    #[error("I/O error at {path:?}: {source}")]
    Io {
        /// The path where the error occurred, if known.
        path: Option<PathBuf>,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Arrow error during data processing.
    #[error("Arrow error: {0}")]
    Arrow(#[from] arrow::error::ArrowError),

    /// Parquet error during file operations.
    #[error("Parquet error: {0}")]
    Parquet(#[from] parquet::errors::ParquetError),

    /// Dataset has zero rows; no report is produced.
    #[error("Dataset is empty: no rows to analyze")]
    EmptyDataset,

    /// Dataset schema has zero columns; no report is produced.
    #[error("Dataset schema is empty: no columns to analyze")]
    EmptySchema,

    /// Invalid threshold configuration, rejected before analysis.
    #[error("Invalid configuration: {message}")]
    InvalidConfig {
        /// Description of the configuration error.
        message: String,
    },

    /// Unsupported file format.
    #[error("Unsupported format: {format}")]
    UnsupportedFormat {
        /// The unsupported format name or extension.
        format: String,
    },

    /// Schema mismatch between batches of one dataset.
    #[error("Schema mismatch: {message}")]
    SchemaMismatch {
        /// Description of the schema mismatch.
        message: String,
    },

    /// Format error (report serialization, config file, etc.).
    #[error("Format error: {0}")]
    Format(String),
}

impl Error {
    /// Create an I/O error with a path context.
    pub fn io(source: std::io::Error, path: impl Into<PathBuf>) -> Self {
        Self::Io {
            path: Some(path.into()),
            source,
        }
    }

    /// Create an invalid configuration error.
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }

    /// Create an unsupported format error.
    pub fn unsupported_format(format: impl Into<String>) -> Self {
        Self::UnsupportedFormat {
            format: format.into(),
        }
    }

    /// Create a schema mismatch error.
    pub fn schema_mismatch(message: impl Into<String>) -> Self {
        Self::SchemaMismatch {
            message: message.into(),
        }
    }
}
