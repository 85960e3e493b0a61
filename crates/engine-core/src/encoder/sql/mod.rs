use crate::{
    encoder::{
        RowEncoder,
        sql::{
            batch::{BatchBuffer, FlushedBatch},
            statement::{CHARSET_POSTAMBLE, InsertTemplate, charset_preamble, render_tuple},
        },
    },
    error::DumpError,
};
use engine_config::{error::ConfigError, settings::validated::DumpSettings};
use model::records::{columns::ColumnSet, row::Row};
use std::io::Write;
use tracing::debug;

pub mod batch;
pub mod escape;
pub mod statement;

/// Writes rows as batched `INSERT` statements into the configured alias.
pub struct SqlInsertEncoder<W: Write> {
    out: W,
    batch: BatchBuffer,
    /// Scratch space for the tuple being rendered
    tuple: Vec<u8>,
    charset: Option<String>,
    statements: usize,
}

impl<W: Write> std::fmt::Debug for SqlInsertEncoder<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SqlInsertEncoder")
            .field("batch", &self.batch)
            .field("charset", &self.charset)
            .field("statements", &self.statements)
            .finish()
    }
}

impl<W: Write> SqlInsertEncoder<W> {
    /// Fails with [`ConfigError::MissingAlias`] when no target table is set.
    pub fn new(out: W, columns: &ColumnSet, settings: &DumpSettings) -> Result<Self, DumpError> {
        let alias = settings.alias().ok_or(ConfigError::MissingAlias)?;

        let template = InsertTemplate::new(
            alias,
            columns,
            settings.insert_ignore(),
            settings.on_duplicate_key_update(),
        );

        Ok(Self {
            out,
            batch: BatchBuffer::new(template, settings.batch_threshold_bytes()),
            tuple: Vec::new(),
            charset: settings.set_names().then(|| settings.charset().to_string()),
            statements: 0,
        })
    }

    fn write_batch(&mut self, batch: FlushedBatch) -> Result<(), DumpError> {
        self.out.write_all(&batch.sql)?;
        self.statements += 1;
        debug!(
            "Flushed INSERT statement #{} with {} rows ({} bytes)",
            self.statements,
            batch.tuples,
            batch.sql.len()
        );
        Ok(())
    }
}

impl<W: Write> RowEncoder for SqlInsertEncoder<W> {
    fn begin(&mut self) -> Result<(), DumpError> {
        if let Some(charset) = &self.charset {
            self.out.write_all(charset_preamble(charset).as_bytes())?;
        }
        Ok(())
    }

    fn encode(&mut self, row: &Row) -> Result<(), DumpError> {
        self.tuple.clear();
        render_tuple(row, &mut self.tuple);

        if let Some(batch) = self.batch.push(&self.tuple) {
            self.write_batch(batch)?;
        }
        Ok(())
    }

    fn finish(&mut self) -> Result<(), DumpError> {
        if let Some(batch) = self.batch.finish() {
            self.write_batch(batch)?;
        }
        if self.charset.is_some() {
            self.out.write_all(CHARSET_POSTAMBLE.as_bytes())?;
        }
        self.out.flush()?;
        Ok(())
    }

    fn statements(&self) -> usize {
        self.statements
    }
}
