use crate::{error::ConfigError, options::file::OptionFile, settings::charset};
use model::execution::connection::ConnectionConfig;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

const CLIENT_SECTION: &str = "client";

/// Partially specified connection options from one source (an option file
/// or the command line). Unset fields never override set ones.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MySqlOptions {
    pub host: Option<String>,
    pub user: Option<String>,
    pub password: Option<String>,
    pub database: Option<String>,
    pub port: Option<u16>,
    pub charset: Option<String>,
}

impl MySqlOptions {
    /// Read the `[client]` section of an option file.
    pub fn from_option_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let file = OptionFile::load(path)?;
        Self::from_parsed(&file)
    }

    pub fn from_parsed(file: &OptionFile) -> Result<Self, ConfigError> {
        let client = file
            .section(CLIENT_SECTION)
            .ok_or_else(|| ConfigError::MissingClientSection(file.path().to_path_buf()))?;

        let get = |key: &str| client.get(key).filter(|v| !v.is_empty()).cloned();

        let port = match get("port") {
            Some(raw) => {
                let port = raw.parse::<u16>().map_err(|_| ConfigError::InvalidPort {
                    path: file.path().to_path_buf(),
                    value: raw.clone(),
                })?;
                Some(port).filter(|p| *p != 0)
            }
            None => None,
        };

        Ok(Self {
            host: get("host"),
            user: get("user"),
            password: get("password"),
            database: get("database"),
            port,
            charset: get("default-character-set"),
        })
    }

    /// Overlay `other` on top of `self`; every value set in `other` wins.
    pub fn extend(&mut self, other: MySqlOptions) {
        fn set<T>(slot: &mut Option<T>, value: Option<T>) {
            if value.is_some() {
                *slot = value;
            }
        }

        set(&mut self.host, other.host.filter(|v| !v.is_empty()));
        set(&mut self.user, other.user.filter(|v| !v.is_empty()));
        set(&mut self.password, other.password.filter(|v| !v.is_empty()));
        set(&mut self.database, other.database.filter(|v| !v.is_empty()));
        set(&mut self.port, other.port.filter(|p| *p != 0));
        set(&mut self.charset, other.charset.filter(|v| !v.is_empty()));
    }

    /// Fill unset fields with defaults and validate the result.
    pub fn into_config(self) -> Result<ConnectionConfig, ConfigError> {
        let defaults = ConnectionConfig::default();
        let charset = self.charset.unwrap_or(defaults.charset);
        charset::validate(&charset)?;

        Ok(ConnectionConfig {
            host: self.host.unwrap_or(defaults.host),
            port: self.port.unwrap_or(defaults.port),
            user: self.user,
            password: self.password,
            database: self.database,
            charset,
        })
    }
}

/// `~/.my.cnf`, when a home directory can be determined.
pub fn default_option_file() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".my.cnf"))
}

/// Merge, in increasing priority: built-in defaults, the default option file
/// (only if it exists), an explicitly requested option file (which must
/// exist), and command-line values.
pub fn resolve_connection(
    default_file: Option<&Path>,
    extra_file: Option<&Path>,
    overrides: MySqlOptions,
) -> Result<ConnectionConfig, ConfigError> {
    let mut options = MySqlOptions::default();

    if let Some(path) = default_file.filter(|p| p.is_file()) {
        debug!("Loading default option file {}", path.display());
        options.extend(MySqlOptions::from_option_file(path)?);
    }

    if let Some(path) = extra_file {
        debug!("Loading option file {}", path.display());
        options.extend(MySqlOptions::from_option_file(path)?);
    }

    options.extend(overrides);

    let config = options.into_config()?;
    info!("Resolved connection options: {:?}", config);
    Ok(config)
}
