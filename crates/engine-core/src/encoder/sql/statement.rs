use crate::encoder::sql::escape::escape_into;
use model::{
    core::value::Cell,
    records::{columns::ColumnSet, row::Row},
};

/// Wraps an identifier in backticks, doubling any embedded backtick.
pub fn quote_identifier(ident: &str) -> String {
    format!("`{}`", ident.replace('`', "``"))
}

/// The fixed parts of every `INSERT` statement of one dump, built once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InsertTemplate {
    /// `INSERT [IGNORE ]INTO ... VALUES\n`
    pub header: Vec<u8>,
    /// Optional `ON DUPLICATE KEY UPDATE` clause followed by `;\n`
    pub trailer: Vec<u8>,
}

impl InsertTemplate {
    pub fn new(
        alias: &str,
        columns: &ColumnSet,
        insert_ignore: bool,
        on_duplicate_key_update: bool,
    ) -> Self {
        let quoted: Vec<String> = columns.iter().map(quote_identifier).collect();
        let ignore = if insert_ignore { "IGNORE " } else { "" };

        let header = format!(
            "INSERT {ignore}INTO {} ({}) VALUES\n",
            quote_identifier(alias),
            quoted.join(", ")
        );

        let mut trailer = String::new();
        if on_duplicate_key_update {
            let assignments: Vec<String> = quoted
                .iter()
                .map(|col| format!("{col} = VALUES({col})"))
                .collect();
            trailer.push_str("\nON DUPLICATE KEY UPDATE\n");
            trailer.push_str(&assignments.join(",\n"));
        }
        trailer.push_str(";\n");

        Self {
            header: header.into_bytes(),
            trailer: trailer.into_bytes(),
        }
    }
}

/// Append `(v1, v2, ...)` for one row.
pub fn render_tuple(row: &Row, out: &mut Vec<u8>) {
    out.push(b'(');
    for (i, cell) in row.cells().iter().enumerate() {
        if i > 0 {
            out.extend_from_slice(b", ");
        }
        match cell {
            Cell::Null => out.extend_from_slice(b"NULL"),
            Cell::TextOrBinary(bytes) => {
                out.push(b'\'');
                escape_into(bytes, out);
                out.push(b'\'');
            }
            Cell::Scalar(scalar) => out.extend_from_slice(scalar.to_string().as_bytes()),
        }
    }
    out.push(b')');
}

/// Saves the session character set variables and switches to `charset`.
pub fn charset_preamble(charset: &str) -> String {
    format!(
        "/*!40101 SET @OLD_CHARACTER_SET_CLIENT=@@CHARACTER_SET_CLIENT */;\n\
         /*!40101 SET @OLD_CHARACTER_SET_RESULTS=@@CHARACTER_SET_RESULTS */;\n\
         /*!40101 SET @OLD_COLLATION_CONNECTION=@@COLLATION_CONNECTION */;\n\
         SET NAMES {charset};\n\n"
    )
}

/// Restores what [`charset_preamble`] saved.
pub const CHARSET_POSTAMBLE: &str = "\n/*!40101 SET CHARACTER_SET_CLIENT=@OLD_CHARACTER_SET_CLIENT */;\n\
     /*!40101 SET CHARACTER_SET_RESULTS=@OLD_CHARACTER_SET_RESULTS */;\n\
     /*!40101 SET COLLATION_CONNECTION=@OLD_COLLATION_CONNECTION */;\n";
