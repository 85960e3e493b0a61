use crate::error::CursorError;
use async_trait::async_trait;
use model::records::{columns::ColumnSet, row::Row};

/// Lazy, finite, single-pass source of result rows.
///
/// The column set is fixed before the first row is requested. Once
/// `next_row` has returned `Ok(None)` the cursor stays exhausted; it cannot
/// be rewound or re-queried.
#[async_trait]
pub trait RowCursor: Send {
    fn columns(&self) -> &ColumnSet;

    async fn next_row(&mut self) -> Result<Option<Row>, CursorError>;
}
