use clap::{ArgAction, Parser};
use engine_config::{
    error::ConfigError,
    options::mysql::MySqlOptions,
    settings::{
        format::OutputFormat,
        validated::{DEFAULT_BATCH_SIZE_KIB, DumpSettings, DumpSettingsBuilder},
    },
};
use std::path::PathBuf;

/// Command-line arguments. `-h` is the host, so help is `--help` only.
#[derive(Parser, Debug)]
#[command(
    name = "querydump",
    version,
    about = "Dump the result of a MySQL query as CSV, JSON lines or INSERT statements",
    disable_help_flag = true
)]
pub struct Args {
    #[arg(short = 'h', long, help = "Connect to host")]
    pub host: Option<String>,

    #[arg(short = 'u', long, help = "User for login if not current user")]
    pub user: Option<String>,

    #[arg(short = 'D', long, help = "Database to use")]
    pub database: Option<String>,

    #[arg(short = 'P', long, help = "The TCP/IP port number to use for the connection")]
    pub port: Option<u16>,

    #[arg(
        short = 'e',
        long,
        help = "The query to run. Read from standard input when omitted"
    )]
    pub execute: Option<String>,

    #[arg(
        short = 'f',
        long,
        default_value = "csv",
        help = "Output format: csv, json or sql"
    )]
    pub format: String,

    #[arg(
        short = 'a',
        long,
        help = "Table the rows are inserted into (sql format only)"
    )]
    pub alias: Option<String>,

    #[arg(short = 'i', long, help = "Produce INSERT IGNORE statements")]
    pub insert_ignore: bool,

    #[arg(
        short = 'U',
        long,
        help = "Append ON DUPLICATE KEY UPDATE to every statement"
    )]
    pub on_duplicate_key_update: bool,

    #[arg(
        short = 's',
        long,
        default_value_t = DEFAULT_BATCH_SIZE_KIB,
        allow_negative_numbers = true,
        help = "Batch size of INSERT statements in KiB; zero or less flushes every row"
    )]
    pub batch_size: i64,

    #[arg(short = 'c', long, help = "Additional option file with a [client] section")]
    pub config: Option<PathBuf>,

    #[arg(long, help = "Do not wrap the sql dump in SET NAMES statements")]
    pub skip_set_names: bool,

    #[arg(long, action = ArgAction::Help, help = "Print help")]
    pub help: Option<bool>,
}

impl Args {
    /// Connection values given on the command line.
    pub fn connection_overrides(&self) -> MySqlOptions {
        MySqlOptions {
            host: self.host.clone(),
            user: self.user.clone(),
            database: self.database.clone(),
            port: self.port,
            ..Default::default()
        }
    }

    pub fn dump_settings(&self, charset: &str) -> Result<DumpSettings, ConfigError> {
        let format: OutputFormat = self.format.parse()?;

        let mut builder = DumpSettingsBuilder::new(format)
            .insert_ignore(self.insert_ignore)
            .on_duplicate_key_update(self.on_duplicate_key_update)
            .batch_size_kib(self.batch_size)
            .charset(charset)
            .set_names(!self.skip_set_names);
        if let Some(alias) = &self.alias {
            builder = builder.alias(alias.clone());
        }

        let settings = builder.build();
        settings.validate()?;
        Ok(settings)
    }
}
