use crate::{
    cursor::RowCursor,
    error::{ConnectorError, CursorError},
    sql::mysql::value::to_cell,
};
use async_trait::async_trait;
use model::records::{columns::ColumnSet, row::Row};
use mysql_async::{BinaryProtocol, Column, QueryResult};
use std::sync::Arc;
use tracing::trace;

/// Row cursor over the binary-protocol result set of a prepared statement.
pub struct MySqlRowCursor<'a> {
    /// The open result set; borrows the connection until dropped.
    result: QueryResult<'a, 'static, BinaryProtocol>,

    /// Driver column descriptions, kept for per-column value conversion
    column_meta: Arc<[Column]>,

    /// Output field names, in result order
    columns: ColumnSet,

    exhausted: bool,
}

impl<'a> MySqlRowCursor<'a> {
    pub fn new(result: QueryResult<'a, 'static, BinaryProtocol>) -> Result<Self, ConnectorError> {
        let column_meta: Arc<[Column]> = result.columns().unwrap_or_else(|| Arc::from(Vec::new()));
        let columns = ColumnSet::new(column_meta.iter().map(|c| c.name_str().into_owned()))?;

        Ok(Self {
            result,
            column_meta,
            columns,
            exhausted: false,
        })
    }

    fn convert(&self, row: mysql_async::Row) -> Result<Row, CursorError> {
        let values = row.unwrap_raw();
        let mut cells = Vec::with_capacity(values.len());

        for (index, value) in values.into_iter().enumerate() {
            let value = value.ok_or(CursorError::MissingValue { index })?;
            let column_type = self
                .column_meta
                .get(index)
                .map(|c| c.column_type())
                .ok_or(CursorError::MissingValue { index })?;
            cells.push(to_cell(value, column_type));
        }

        Ok(Row::aligned(&self.columns, cells)?)
    }
}

#[async_trait]
impl RowCursor for MySqlRowCursor<'_> {
    fn columns(&self) -> &ColumnSet {
        &self.columns
    }

    async fn next_row(&mut self) -> Result<Option<Row>, CursorError> {
        if self.exhausted {
            return Ok(None);
        }

        match self.result.next().await? {
            Some(row) => {
                let row = self.convert(row)?;
                trace!("Fetched row with {} cells", row.len());
                Ok(Some(row))
            }
            None => {
                self.exhausted = true;
                Ok(None)
            }
        }
    }
}
