// This is the entry point for the svg-batch command-line tool.
// The lib.rs file serves as the public API for library consumers.

use std::process::ExitCode;
use anyhow::Context;
use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;
use svg_batch_lib::commands::{self, Cli};

#[tokio::main]
async fn main() -> ExitCode {
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_file(false)         // Remove file path
        .with_line_number(false)  // Remove line numbers
        .with_thread_ids(false)   // Remove thread IDs
        .with_thread_names(false) // Remove thread names
        .with_target(false)       // Remove module path
        .with_ansi(true)          // Keep colored output
        .with_writer(std::io::stderr)
        .compact();               // Use compact formatter instead of pretty

    subscriber.init();

    let cli = Cli::parse();
    info!("=== svg-batch starting ({:?} mode) ===", cli.mode);

    match run_cli(&cli).await {
        Ok(code) => code,
        Err(e) => {
            error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run_cli(cli: &Cli) -> anyhow::Result<ExitCode> {
    let status = commands::run(cli)
        .await
        .with_context(|| format!("{:?} run aborted", cli.mode))?;
    Ok(status.into())
}
