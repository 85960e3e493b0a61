use crate::{args::Args, error::CliError};
use clap::Parser;
use connectors::sql::mysql::adapter::MySqlAdapter;
use engine_config::options::mysql::{default_option_file, resolve_connection};
use engine_core::dump::dump;
use std::{
    io::{self, BufWriter},
    process::ExitCode,
};
use tracing::error;
use tracing_subscriber::EnvFilter;

mod args;
mod error;
mod input;

#[tokio::main]
async fn main() -> ExitCode {
    // stdout carries the dump, so logs go to stderr
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err}");
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Args) -> Result<(), CliError> {
    let default_file = default_option_file();
    let config = resolve_connection(
        default_file.as_deref(),
        args.config.as_deref(),
        args.connection_overrides(),
    )?;
    let settings = args.dump_settings(&config.charset)?;
    let query = input::read_query(args.execute.clone(), io::stdin().lock())?;

    let mut adapter = MySqlAdapter::connect(&config).await?;
    let result = {
        let mut cursor = adapter.query(&query).await?;
        let out = BufWriter::new(io::stdout().lock());
        dump(&mut cursor, &settings, out).await
    };
    // close the connection even when the dump failed
    let closed = adapter.disconnect().await;

    result?;
    closed?;
    Ok(())
}
