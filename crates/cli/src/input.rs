use crate::error::CliError;
use std::io::Read;

/// The query from `-e`, or everything on `reader` when the flag is absent.
pub fn read_query<R: Read>(execute: Option<String>, mut reader: R) -> Result<String, CliError> {
    let query = match execute {
        Some(query) => query,
        None => {
            let mut buf = String::new();
            reader.read_to_string(&mut buf).map_err(CliError::ReadQuery)?;
            buf
        }
    };

    let query = query.trim();
    if query.is_empty() {
        return Err(CliError::EmptyQuery);
    }
    Ok(query.to_string())
}
