use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while resolving connection options or dump settings.
///
/// All of them are detected before the first row is read.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read option file {path}: {source}")]
    OptionFileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid option file {path}: {reason} at line {line}")]
    InvalidOptionFile {
        path: PathBuf,
        line: usize,
        reason: String,
    },

    #[error("Unable to parse {0}: no [client] section")]
    MissingClientSection(PathBuf),

    #[error("Invalid port value in {path}: {value}")]
    InvalidPort { path: PathBuf, value: String },

    #[error("Unknown output format: {0} (expected one of: json, csv, sql)")]
    UnknownFormat(String),

    #[error("Alias must be specified for sql format")]
    MissingAlias,

    #[error("Unsupported character set: {0}")]
    UnsupportedCharset(String),
}
