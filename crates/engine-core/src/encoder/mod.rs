use crate::error::DumpError;
use model::records::row::Row;

pub mod csv;
pub mod json;
pub mod sql;

/// Converts result rows into one output representation.
///
/// The dispatch loop calls `begin` once, `encode` once per row in cursor
/// order, then `finish` once after the cursor is exhausted. An error from
/// any call aborts the dump; output already written stays written.
pub trait RowEncoder {
    fn begin(&mut self) -> Result<(), DumpError> {
        Ok(())
    }

    fn encode(&mut self, row: &Row) -> Result<(), DumpError>;

    fn finish(&mut self) -> Result<(), DumpError>;

    /// Number of statements written so far (SQL only).
    fn statements(&self) -> usize {
        0
    }
}
