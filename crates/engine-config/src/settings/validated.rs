use crate::{
    error::ConfigError,
    settings::{charset, format::OutputFormat},
};
use model::execution::connection::DEFAULT_CHARSET;

pub const DEFAULT_BATCH_SIZE_KIB: i64 = 1024;

/// Settings consumed by the serialization engine for one dump.
#[derive(Debug, Clone)]
pub struct DumpSettings {
    /// Requested output representation
    pub format: OutputFormat,
    /// Target table the SQL dump inserts into
    pub alias: Option<String>,
    /// Emit `INSERT IGNORE`
    pub insert_ignore: bool,
    /// Append `ON DUPLICATE KEY UPDATE` to every statement
    pub on_duplicate_key_update: bool,
    /// Batch threshold for SQL statements, in kibibytes
    pub batch_size_kib: i64,
    /// Session character set declared in the SQL preamble
    pub charset: String,
    /// Whether the SQL dump is bracketed by `SET NAMES` statements
    pub set_names: bool,
}

impl DumpSettings {
    pub fn default(format: OutputFormat) -> Self {
        DumpSettingsBuilder::new(format).build()
    }

    pub fn from_builder(builder: DumpSettingsBuilder) -> Self {
        Self {
            format: builder.format,
            alias: builder.alias,
            insert_ignore: builder.insert_ignore.unwrap_or(false),
            on_duplicate_key_update: builder.on_duplicate_key_update.unwrap_or(false),
            batch_size_kib: builder.batch_size_kib.unwrap_or(DEFAULT_BATCH_SIZE_KIB),
            charset: builder
                .charset
                .unwrap_or_else(|| DEFAULT_CHARSET.to_string()),
            set_names: builder.set_names.unwrap_or(true),
        }
    }

    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// The alias, treating an empty string as absent.
    pub fn alias(&self) -> Option<&str> {
        self.alias.as_deref().filter(|alias| !alias.is_empty())
    }

    pub fn insert_ignore(&self) -> bool {
        self.insert_ignore
    }

    pub fn on_duplicate_key_update(&self) -> bool {
        self.on_duplicate_key_update
    }

    pub fn charset(&self) -> &str {
        &self.charset
    }

    pub fn set_names(&self) -> bool {
        self.set_names
    }

    /// Batch threshold in bytes. Non-positive sizes become zero, which
    /// flushes after every row.
    pub fn batch_threshold_bytes(&self) -> usize {
        usize::try_from(self.batch_size_kib.max(0))
            .unwrap_or(usize::MAX)
            .saturating_mul(1024)
    }

    /// Checks that only depend on the settings themselves.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.format == OutputFormat::Sql {
            if self.alias().is_none() {
                return Err(ConfigError::MissingAlias);
            }
            charset::validate(&self.charset)?;
        }
        Ok(())
    }
}

#[derive(Debug, Default)]
pub struct DumpSettingsBuilder {
    pub format: OutputFormat,
    pub alias: Option<String>,
    pub insert_ignore: Option<bool>,
    pub on_duplicate_key_update: Option<bool>,
    pub batch_size_kib: Option<i64>,
    pub charset: Option<String>,
    pub set_names: Option<bool>,
}

impl DumpSettingsBuilder {
    pub fn new(format: OutputFormat) -> Self {
        Self {
            format,
            ..Default::default()
        }
    }

    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    pub fn insert_ignore(mut self, insert_ignore: bool) -> Self {
        self.insert_ignore = Some(insert_ignore);
        self
    }

    pub fn on_duplicate_key_update(mut self, on_duplicate_key_update: bool) -> Self {
        self.on_duplicate_key_update = Some(on_duplicate_key_update);
        self
    }

    pub fn batch_size_kib(mut self, batch_size_kib: i64) -> Self {
        self.batch_size_kib = Some(batch_size_kib);
        self
    }

    pub fn charset(mut self, charset: impl Into<String>) -> Self {
        self.charset = Some(charset.into());
        self
    }

    pub fn set_names(mut self, set_names: bool) -> Self {
        self.set_names = Some(set_names);
        self
    }

    pub fn build(self) -> DumpSettings {
        DumpSettings::from_builder(self)
    }
}
