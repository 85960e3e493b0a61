use connectors::error::ConnectorError;
use engine_config::error::ConfigError;
use engine_core::error::DumpError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("Failed to read the query from standard input: {0}")]
    ReadQuery(std::io::Error),

    #[error("Query is empty")]
    EmptyQuery,

    #[error("Failed to run the query: {0}")]
    Connector(#[from] ConnectorError),

    #[error("Failed to dump the query result: {0}")]
    Dump(#[from] DumpError),
}
