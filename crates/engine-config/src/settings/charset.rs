use crate::error::ConfigError;

/// Character sets in which backslash escaping of single bytes is safe:
/// single-byte or UTF-8, never a multi-byte set whose trailing bytes can
/// collide with `\` or `'`.
const SUPPORTED_CHARSETS: &[&str] = &["utf8", "utf8mb3", "utf8mb4", "latin1", "ascii", "binary"];

pub fn validate(charset: &str) -> Result<(), ConfigError> {
    if SUPPORTED_CHARSETS
        .iter()
        .any(|supported| supported.eq_ignore_ascii_case(charset))
    {
        Ok(())
    } else {
        Err(ConfigError::UnsupportedCharset(charset.to_string()))
    }
}
