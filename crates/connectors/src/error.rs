use model::core::errors::ModelError;
use thiserror::Error;

/// Errors raised while opening the source connection or running the query.
#[derive(Debug, Error)]
pub enum ConnectorError {
    /// Connecting to or handshaking with the server failed.
    #[error("Failed to connect to MySQL at {address}: {source}")]
    Connect {
        address: String,
        #[source]
        source: mysql_async::Error,
    },

    /// Any other driver error (prepare, execute, disconnect).
    #[error("MySQL error: {0}")]
    MySql(#[from] mysql_async::Error),

    /// The result set does not describe a valid column set.
    #[error("Invalid result set: {0}")]
    Schema(#[from] ModelError),
}

/// Errors raised while advancing a row cursor.
#[derive(Debug, Error)]
pub enum CursorError {
    /// Driver failure while fetching the next row.
    #[error("MySQL error while fetching rows: {0}")]
    MySql(#[from] mysql_async::Error),

    /// A row did not match the column set of its result.
    #[error("Row does not match result columns: {0}")]
    Schema(#[from] ModelError),

    /// The driver handed back a row with a value already taken out of it.
    #[error("Missing value for column {index}")]
    MissingValue { index: usize },

    /// Generic row source failure.
    #[error("Row source failed: {0}")]
    Source(String),
}
