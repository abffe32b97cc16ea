mod cli;
mod config;
mod error;
mod tool;
mod utils;

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cli::Cli;
use error::DoaError;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "doa=debug" } else { "doa=info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().without_time())
        .init();

    match cli.execute().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{}", e);
            if let DoaError::Tool(err) = &e {
                if err.is_retryable() {
                    tracing::warn!("The tool source may be temporarily unavailable. Retry later or raise --timeout.");
                }
            }
            ExitCode::FAILURE
        }
    }
}
