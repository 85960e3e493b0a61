use model::core::value::{Cell, Scalar};
use mysql_async::{Value as MySqlValue, consts::ColumnType};

/// Convert one binary-protocol value into a [`Cell`].
///
/// Strings, blobs, decimals and JSON arrive as raw bytes and stay that way.
/// Temporal values arrive structured and are rendered into their MySQL text
/// form, since they are not valid unquoted SQL literals.
pub fn to_cell(value: MySqlValue, column_type: ColumnType) -> Cell {
    match value {
        MySqlValue::NULL => Cell::Null,
        MySqlValue::Bytes(bytes) => Cell::TextOrBinary(bytes),
        MySqlValue::Int(v) => Cell::Scalar(Scalar::Int(v)),
        MySqlValue::UInt(v) => Cell::Scalar(Scalar::UInt(v)),
        MySqlValue::Float(v) => Cell::Scalar(Scalar::Float(v)),
        MySqlValue::Double(v) => Cell::Scalar(Scalar::Double(v)),
        MySqlValue::Date(year, month, day, hour, minute, second, micros) => {
            let text = if is_date_only(column_type) {
                format!("{year:04}-{month:02}-{day:02}")
            } else {
                format!(
                    "{year:04}-{month:02}-{day:02} {hour:02}:{minute:02}:{second:02}{}",
                    fraction(micros)
                )
            };
            Cell::text(text)
        }
        MySqlValue::Time(negative, days, hours, minutes, seconds, micros) => {
            let sign = if negative { "-" } else { "" };
            let hours = u64::from(days) * 24 + u64::from(hours);
            let text = format!(
                "{sign}{hours:02}:{minutes:02}:{seconds:02}{}",
                fraction(micros)
            );
            Cell::text(text)
        }
    }
}

fn is_date_only(column_type: ColumnType) -> bool {
    matches!(
        column_type,
        ColumnType::MYSQL_TYPE_DATE | ColumnType::MYSQL_TYPE_NEWDATE
    )
}

fn fraction(micros: u32) -> String {
    if micros == 0 {
        String::new()
    } else {
        format!(".{micros:06}")
    }
}
