use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ModelError {
    #[error("duplicate column name in result set: {0}")]
    DuplicateColumn(String),

    #[error("row has {found} cells but the result set has {expected} columns")]
    ColumnCount { expected: usize, found: usize },
}
