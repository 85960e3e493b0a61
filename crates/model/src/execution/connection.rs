use std::fmt;

pub const DEFAULT_HOST: &str = "localhost";
pub const DEFAULT_PORT: u16 = 3306;
pub const DEFAULT_CHARSET: &str = "utf8";

/// Fully resolved connection settings for the source database.
#[derive(Clone, PartialEq, Eq)]
pub struct ConnectionConfig {
    pub host: String,
    pub port: u16,
    pub user: Option<String>,
    pub password: Option<String>,
    pub database: Option<String>,
    pub charset: String,
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            user: None,
            password: None,
            database: None,
            charset: DEFAULT_CHARSET.to_string(),
        }
    }
}

impl ConnectionConfig {
    /// `host:port`, used for logging.
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

// Keeps the password out of logs.
impl fmt::Debug for ConnectionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectionConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("password", &self.password.as_ref().map(|_| "***"))
            .field("database", &self.database)
            .field("charset", &self.charset)
            .finish()
    }
}
