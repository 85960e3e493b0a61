use crate::{
    encoder::RowEncoder,
    error::{DumpError, EncodeError},
};
use model::{
    core::value::{Cell, Scalar},
    records::{columns::ColumnSet, row::Row},
};
use serde_json::{Map, Number, Value};
use std::io::Write;

/// Writes every row as one self-contained JSON object followed by `\n`.
pub struct JsonLineEncoder<W: Write> {
    out: W,
    columns: ColumnSet,
}

impl<W: Write> JsonLineEncoder<W> {
    pub fn new(out: W, columns: ColumnSet) -> Self {
        Self { out, columns }
    }

    /// Builds a fresh object for every row so no value can outlive its line.
    fn to_object(&self, row: &Row) -> Result<Map<String, Value>, EncodeError> {
        let mut object = Map::new();
        for (name, cell) in self.columns.iter().zip(row) {
            object.insert(name.to_string(), cell_to_json(name, cell)?);
        }
        Ok(object)
    }
}

fn cell_to_json(column: &str, cell: &Cell) -> Result<Value, EncodeError> {
    let value = match cell {
        Cell::Null => Value::Null,
        Cell::TextOrBinary(bytes) => Value::String(String::from_utf8_lossy(bytes).into_owned()),
        Cell::Scalar(scalar) if !scalar.is_finite() => {
            return Err(EncodeError::NonFiniteNumber {
                column: column.to_string(),
            });
        }
        Cell::Scalar(Scalar::Int(v)) => Value::from(*v),
        Cell::Scalar(Scalar::UInt(v)) => Value::from(*v),
        Cell::Scalar(Scalar::Float(v)) => {
            // widen through the shortest f32 text so 0.1f32 stays 0.1
            let widened = Scalar::Float(*v).to_string().parse::<f64>().unwrap_or(f64::from(*v));
            Number::from_f64(widened).map_or(Value::Null, Value::Number)
        }
        Cell::Scalar(Scalar::Double(v)) => Number::from_f64(*v).map_or(Value::Null, Value::Number),
    };
    Ok(value)
}

impl<W: Write> RowEncoder for JsonLineEncoder<W> {
    fn encode(&mut self, row: &Row) -> Result<(), DumpError> {
        let object = self.to_object(row)?;
        let line = serde_json::to_vec(&Value::Object(object)).map_err(EncodeError::from)?;
        self.out.write_all(&line)?;
        self.out.write_all(b"\n")?;
        Ok(())
    }

    fn finish(&mut self) -> Result<(), DumpError> {
        self.out.flush()?;
        Ok(())
    }
}
