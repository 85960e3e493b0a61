use crate::{encoder::RowEncoder, error::DumpError};
use model::{
    core::value::Cell,
    records::row::Row,
};
use std::{borrow::Cow, io::Write};

/// Writes every row as one comma-delimited record, without a header.
///
/// Fields are quoted only when they contain the delimiter, a quote or a
/// line break; text and binary cells are written byte-for-byte.
pub struct CsvEncoder<W: Write> {
    writer: ::csv::Writer<W>,
}

impl<W: Write> CsvEncoder<W> {
    pub fn new(out: W) -> Self {
        let writer = ::csv::WriterBuilder::new()
            .delimiter(b',')
            .quote(b'"')
            .double_quote(true)
            .quote_style(::csv::QuoteStyle::Necessary)
            .terminator(::csv::Terminator::Any(b'\n'))
            .from_writer(out);

        Self { writer }
    }
}

fn field(cell: &Cell) -> Cow<'_, [u8]> {
    match cell {
        Cell::Null => Cow::Borrowed(b""),
        Cell::TextOrBinary(bytes) => Cow::Borrowed(bytes.as_slice()),
        Cell::Scalar(scalar) => Cow::Owned(scalar.to_string().into_bytes()),
    }
}

impl<W: Write> RowEncoder for CsvEncoder<W> {
    fn encode(&mut self, row: &Row) -> Result<(), DumpError> {
        let record: Vec<Cow<'_, [u8]>> = row.cells().iter().map(field).collect();

        // the csv writer quotes a lone empty field as `""`; keep it empty
        if let [only] = record.as_slice() {
            if only.is_empty() {
                self.writer.flush()?;
                self.writer.get_mut().write_all(b"\n")?;
                return Ok(());
            }
        }

        self.writer.write_record(&record)?;
        Ok(())
    }

    fn finish(&mut self) -> Result<(), DumpError> {
        self.writer.flush()?;
        Ok(())
    }
}
