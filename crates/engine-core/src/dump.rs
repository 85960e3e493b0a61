use crate::{
    encoder::{RowEncoder, csv::CsvEncoder, json::JsonLineEncoder, sql::SqlInsertEncoder},
    error::DumpError,
    sink::CountingWriter,
};
use connectors::cursor::RowCursor;
use engine_config::settings::{format::OutputFormat, validated::DumpSettings};
use std::io::Write;
use tracing::{debug, info};

/// What one dump wrote.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DumpSummary {
    pub rows: u64,
    /// Flushed `INSERT` statements; zero for JSON and CSV
    pub statements: usize,
    pub bytes: u64,
}

/// Drains `cursor` into `out` in the format `settings` asks for.
///
/// Settings are validated before the first row is requested, so a
/// configuration error leaves both the cursor and the sink untouched. Any
/// later failure aborts the dump; whatever was already written stays.
pub async fn dump<C, W>(
    cursor: &mut C,
    settings: &DumpSettings,
    out: W,
) -> Result<DumpSummary, DumpError>
where
    C: RowCursor + ?Sized,
    W: Write,
{
    settings.validate()?;

    let columns = cursor.columns().clone();
    let mut sink = CountingWriter::new(out);

    let mut summary = DumpSummary::default();
    {
        let mut encoder: Box<dyn RowEncoder + '_> = match settings.format() {
            OutputFormat::Json => Box::new(JsonLineEncoder::new(&mut sink, columns.clone())),
            OutputFormat::Csv => Box::new(CsvEncoder::new(&mut sink)),
            OutputFormat::Sql => Box::new(SqlInsertEncoder::new(&mut sink, &columns, settings)?),
        };
        debug!(
            format = %settings.format(),
            columns = columns.len(),
            "Starting dump"
        );

        encoder.begin()?;
        while let Some(row) = cursor.next_row().await? {
            encoder.encode(&row)?;
            summary.rows += 1;
        }
        encoder.finish()?;
        summary.statements = encoder.statements();
    }
    summary.bytes = sink.bytes_written();

    info!(
        format = %settings.format(),
        rows = summary.rows,
        statements = summary.statements,
        bytes = summary.bytes,
        "Dump complete"
    );
    Ok(summary)
}
