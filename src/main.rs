use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::util::ResLog;

mod cheapshark;
mod cli;
mod config;
mod library;
mod models;
mod runner;
mod selector;
mod steam;
mod stores;
mod util;

type Error = anyhow::Error;
type Result<T> = std::result::Result<T, Error>;
type StdResult<T, E> = std::result::Result<T, E>;

#[tokio::main]
async fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new("info,reqwest=warn"))?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
    dotenvy::dotenv().twarn().ok();

    let cli = cli::Cli::parse();
    runner::run(cli).await?;

    Ok(())
}
