use crate::{cursor::RowCursor, error::CursorError};
use async_trait::async_trait;
use model::records::{columns::ColumnSet, row::Row};

/// Row cursor over rows already held in memory.
///
/// Mostly useful to drive encoders without a live database; it can be set
/// up to fail part-way through to exercise error handling.
#[derive(Debug)]
pub struct MemoryCursor {
    columns: ColumnSet,
    rows: std::vec::IntoIter<Row>,
    fail_after: Option<usize>,
    rows_served: usize,
}

impl MemoryCursor {
    pub fn new(columns: ColumnSet, rows: Vec<Row>) -> Self {
        Self {
            columns,
            rows: rows.into_iter(),
            fail_after: None,
            rows_served: 0,
        }
    }

    /// Fail with a [`CursorError::Source`] once `rows` rows have been served.
    pub fn failing_after(mut self, rows: usize) -> Self {
        self.fail_after = Some(rows);
        self
    }

    /// Number of rows handed out so far.
    pub fn rows_served(&self) -> usize {
        self.rows_served
    }
}

#[async_trait]
impl RowCursor for MemoryCursor {
    fn columns(&self) -> &ColumnSet {
        &self.columns
    }

    async fn next_row(&mut self) -> Result<Option<Row>, CursorError> {
        if self.fail_after == Some(self.rows_served) {
            return Err(CursorError::Source(format!(
                "simulated failure after {} rows",
                self.rows_served
            )));
        }

        let Some(row) = self.rows.next() else {
            return Ok(None);
        };

        let row = Row::aligned(&self.columns, row.into_cells())?;
        self.rows_served += 1;
        Ok(Some(row))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use model::core::value::Cell;

    fn columns() -> ColumnSet {
        ColumnSet::new(["id", "name"]).unwrap()
    }

    #[tokio::test]
    async fn test_serves_rows_then_stays_exhausted() {
        let mut cursor = MemoryCursor::new(
            columns(),
            vec![
                Row::new(vec![Cell::from(1i64), Cell::from("a")]),
                Row::new(vec![Cell::from(2i64), Cell::Null]),
            ],
        );

        assert!(cursor.next_row().await.unwrap().is_some());
        assert!(cursor.next_row().await.unwrap().is_some());
        assert!(cursor.next_row().await.unwrap().is_none());
        assert!(cursor.next_row().await.unwrap().is_none());
        assert_eq!(cursor.rows_served(), 2);
    }

    #[tokio::test]
    async fn test_failing_after() {
        let mut cursor = MemoryCursor::new(
            columns(),
            vec![
                Row::new(vec![Cell::from(1i64), Cell::from("a")]),
                Row::new(vec![Cell::from(2i64), Cell::from("b")]),
            ],
        )
        .failing_after(1);

        assert!(cursor.next_row().await.unwrap().is_some());
        let err = cursor.next_row().await.unwrap_err();
        assert!(matches!(err, CursorError::Source(_)));
    }

    #[tokio::test]
    async fn test_rejects_misaligned_row() {
        let mut cursor = MemoryCursor::new(columns(), vec![Row::new(vec![Cell::Null])]);
        let err = cursor.next_row().await.unwrap_err();
        assert!(matches!(err, CursorError::Schema(_)));
    }
}
