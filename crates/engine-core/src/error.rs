use connectors::error::CursorError;
use engine_config::error::ConfigError;
use thiserror::Error;

/// A serialization step could not represent a value.
#[derive(Debug, Error)]
pub enum EncodeError {
    #[error("Column '{column}' holds a non-finite number, which JSON cannot represent")]
    NonFiniteNumber { column: String },

    #[error("Failed to serialize row as JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Failed to write CSV record: {0}")]
    Csv(String),
}

/// Top-level failure of a dump. Every variant is fatal; nothing is retried
/// and bytes already written to the sink are not rolled back.
#[derive(Debug, Error)]
pub enum DumpError {
    /// Invalid settings, detected before any row is read.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The row source failed while advancing.
    #[error("Cursor error: {0}")]
    Cursor(#[from] CursorError),

    /// A row could not be serialized.
    #[error("Encoding error: {0}")]
    Encoding(#[from] EncodeError),

    /// Writing to the output sink failed.
    #[error("Output error: {0}")]
    Sink(#[from] std::io::Error),
}

impl From<csv::Error> for DumpError {
    fn from(err: csv::Error) -> Self {
        match err.into_kind() {
            csv::ErrorKind::Io(e) => DumpError::Sink(e),
            other => DumpError::Encoding(EncodeError::Csv(format!("{other:?}"))),
        }
    }
}
