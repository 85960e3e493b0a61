use crate::error::ConfigError;
use std::{
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
};
use tracing::warn;

/// A parsed MySQL option file (`~/.my.cnf` and friends).
///
/// Option names are normalized to lowercase with `_` folded into `-`, so
/// `default_character_set` and `default-character-set` are the same key.
#[derive(Debug, Clone, Default)]
pub struct OptionFile {
    path: PathBuf,
    sections: HashMap<String, HashMap<String, String>>,
}

impl OptionFile {
    /// Read and parse an option file from disk.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::OptionFileRead {
            path: path.to_path_buf(),
            source,
        })?;

        Self::parse(path, &content)
    }

    /// Parse option file content; `path` is only used for error reporting.
    pub fn parse<P: AsRef<Path>>(path: P, content: &str) -> Result<Self, ConfigError> {
        let path = path.as_ref().to_path_buf();
        let mut sections: HashMap<String, HashMap<String, String>> = HashMap::new();
        let mut current: Option<String> = None;

        for (line_num, line) in content.lines().enumerate() {
            let line = line.trim();

            // Skip empty lines and comments
            if line.is_empty() || line.starts_with('#') || line.starts_with(';') {
                continue;
            }

            if line.starts_with('!') {
                warn!(
                    "Ignoring directive '{}' in {} at line {}",
                    line,
                    path.display(),
                    line_num + 1
                );
                continue;
            }

            if let Some(rest) = line.strip_prefix('[') {
                let name = rest.strip_suffix(']').ok_or_else(|| ConfigError::InvalidOptionFile {
                    path: path.clone(),
                    line: line_num + 1,
                    reason: "unterminated group header".to_string(),
                })?;
                let name = name.trim().to_lowercase();
                sections.entry(name.clone()).or_default();
                current = Some(name);
                continue;
            }

            let Some(section) = current.as_ref() else {
                return Err(ConfigError::InvalidOptionFile {
                    path: path.clone(),
                    line: line_num + 1,
                    reason: "option without preceding group".to_string(),
                });
            };

            let (key, value) = match line.find('=') {
                Some(eq_pos) => (&line[..eq_pos], Self::unquote_value(&line[eq_pos + 1..])),
                None => (line, String::new()),
            };

            let key = Self::normalize_key(key);
            if key.is_empty() {
                return Err(ConfigError::InvalidOptionFile {
                    path: path.clone(),
                    line: line_num + 1,
                    reason: "empty option name".to_string(),
                });
            }

            sections
                .entry(section.clone())
                .or_default()
                .insert(key, value);
        }

        Ok(Self { path, sections })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn section(&self, name: &str) -> Option<&HashMap<String, String>> {
        self.sections.get(&name.to_lowercase())
    }

    fn normalize_key(key: &str) -> String {
        key.trim().to_lowercase().replace('_', "-")
    }

    fn unquote_value(value: &str) -> String {
        let value = value.trim();

        for quote in ['"', '\''] {
            if value.len() >= 2 && value.starts_with(quote) && value.ends_with(quote) {
                return value[1..value.len() - 1].to_string();
            }
        }

        // Unquoted values may carry a trailing comment
        match value.find(" #") {
            Some(pos) => value[..pos].trim_end().to_string(),
            None => value.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tracing_test::traced_test;

    #[test]
    fn test_parse_client_section() {
        let content = r#"
# Comment
[client]
host = db.internal
user=reporter
password="p@ss word"
; another comment
port=3307

[mysqldump]
quick
"#;
        let file = OptionFile::parse("my.cnf", content).unwrap();
        let client = file.section("client").unwrap();
        assert_eq!(client.get("host").unwrap(), "db.internal");
        assert_eq!(client.get("user").unwrap(), "reporter");
        assert_eq!(client.get("password").unwrap(), "p@ss word");
        assert_eq!(client.get("port").unwrap(), "3307");

        let dump = file.section("mysqldump").unwrap();
        assert_eq!(dump.get("quick").unwrap(), "");
    }

    #[test]
    fn test_normalizes_keys_and_sections() {
        let content = "[Client]\nDefault_Character_Set = 'latin1'\nhost=a # trailing\n";
        let file = OptionFile::parse("my.cnf", content).unwrap();
        let client = file.section("CLIENT").unwrap();
        assert_eq!(client.get("default-character-set").unwrap(), "latin1");
        assert_eq!(client.get("host").unwrap(), "a");
    }

    #[test]
    fn test_option_without_group() {
        let err = OptionFile::parse("my.cnf", "host=localhost\n").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidOptionFile { line: 1, .. }));
    }

    #[test]
    fn test_unterminated_group() {
        let err = OptionFile::parse("my.cnf", "[client\nhost=x\n").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidOptionFile { line: 1, .. }));
    }

    #[traced_test]
    #[test]
    fn test_include_directive_is_ignored() {
        let content = "!includedir /etc/mysql/conf.d/\n[client]\nuser=root\n";
        let file = OptionFile::parse("my.cnf", content).unwrap();
        assert_eq!(file.section("client").unwrap().get("user").unwrap(), "root");
        assert!(logs_contain("Ignoring directive"));
    }

    #[test]
    fn test_load_from_disk() {
        let mut tmp = tempfile::NamedTempFile::new().unwrap();
        writeln!(tmp, "[client]\ndatabase=sakila").unwrap();

        let file = OptionFile::load(tmp.path()).unwrap();
        assert_eq!(file.path(), tmp.path());
        assert_eq!(
            file.section("client").unwrap().get("database").unwrap(),
            "sakila"
        );
    }

    #[test]
    fn test_load_missing_file() {
        let err = OptionFile::load("/nonexistent/querydump/my.cnf").unwrap_err();
        assert!(matches!(err, ConfigError::OptionFileRead { .. }));
    }
}
