use std::fmt;

/// A single value at a (row, column) position of a query result.
///
/// Text and binary columns arrive from the driver as raw bytes and are kept
/// that way; nothing downstream may assume they are valid UTF-8.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Null,
    TextOrBinary(Vec<u8>),
    Scalar(Scalar),
}

/// Driver-typed values whose default textual form is a valid unquoted SQL
/// literal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Scalar {
    Int(i64),
    UInt(u64),
    Float(f32),
    Double(f64),
}

impl Cell {
    pub fn text(bytes: impl Into<Vec<u8>>) -> Self {
        Cell::TextOrBinary(bytes.into())
    }
}

impl Scalar {
    /// Whether the value has a finite numeric representation.
    pub fn is_finite(&self) -> bool {
        match self {
            Scalar::Int(_) | Scalar::UInt(_) => true,
            Scalar::Float(v) => v.is_finite(),
            Scalar::Double(v) => v.is_finite(),
        }
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Int(v) => write!(f, "{v}"),
            Scalar::UInt(v) => write!(f, "{v}"),
            Scalar::Float(v) => f.write_str(whole(ryu::Buffer::new().format(*v))),
            Scalar::Double(v) => f.write_str(whole(ryu::Buffer::new().format(*v))),
        }
    }
}

/// `1.0` prints as `1`, like integral values of the other numeric types.
fn whole(text: &str) -> &str {
    text.strip_suffix(".0").unwrap_or(text)
}

impl From<Scalar> for Cell {
    fn from(value: Scalar) -> Self {
        Cell::Scalar(value)
    }
}

impl From<i64> for Cell {
    fn from(value: i64) -> Self {
        Cell::Scalar(Scalar::Int(value))
    }
}

impl From<u64> for Cell {
    fn from(value: u64) -> Self {
        Cell::Scalar(Scalar::UInt(value))
    }
}

impl From<f64> for Cell {
    fn from(value: f64) -> Self {
        Cell::Scalar(Scalar::Double(value))
    }
}

impl From<&str> for Cell {
    fn from(value: &str) -> Self {
        Cell::TextOrBinary(value.as_bytes().to_vec())
    }
}

impl From<String> for Cell {
    fn from(value: String) -> Self {
        Cell::TextOrBinary(value.into_bytes())
    }
}

impl From<Vec<u8>> for Cell {
    fn from(value: Vec<u8>) -> Self {
        Cell::TextOrBinary(value)
    }
}

impl<T: Into<Cell>> From<Option<T>> for Cell {
    fn from(value: Option<T>) -> Self {
        value.map_or(Cell::Null, Into::into)
    }
}
