use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::error;
use crate::commands::cli::{Cli, Mode};
use crate::core::BatchSummary;
use crate::processing::{BatchProcessor, CommandRunner, ProcessExecutor, log_results};
use crate::utils::{BatchResult, dir_exists, file_exists};

/// How a command-line run ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunStatus {
    /// All jobs ran; individual failures are in the summary
    Completed(BatchSummary),
    /// A required top-level input was absent, nothing ran
    MissingInput(PathBuf),
}

impl From<RunStatus> for ExitCode {
    fn from(status: RunStatus) -> Self {
        match status {
            RunStatus::Completed(_) => ExitCode::SUCCESS,
            RunStatus::MissingInput(_) => ExitCode::FAILURE,
        }
    }
}

/// Runs the mode selected on the command line with real tool processes.
pub async fn run(cli: &Cli) -> BatchResult<RunStatus> {
    run_with(cli, Arc::new(ProcessExecutor::new())).await
}

pub async fn run_with(cli: &Cli, runner: Arc<dyn CommandRunner>) -> BatchResult<RunStatus> {
    let config = cli.resolve_config().await?;
    let processor = BatchProcessor::new(config, runner);

    let results = match cli.mode {
        Mode::Test => {
            let source = processor.config().input_path(&processor.config().variants.source);
            if !file_exists(&source).await {
                error!("Input image '{}' not found!", source.display());
                return Ok(RunStatus::MissingInput(source));
            }
            processor.run_variants().await?
        }
        Mode::Batch => {
            let input_dir = processor.config().input_dir.clone();
            if !cli.minify_only && !dir_exists(&input_dir).await {
                error!("Input directory '{}' not found!", input_dir.display());
                return Ok(RunStatus::MissingInput(input_dir));
            }
            let jobs = processor.config().jobs.clone();
            processor.run_batch(&jobs, cli.minify(), cli.minify_only).await?
        }
    };

    Ok(RunStatus::Completed(log_results(&results)))
}
