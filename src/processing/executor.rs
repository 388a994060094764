use std::io::ErrorKind;
use std::process::Stdio;
use async_trait::async_trait;
use tokio::process::Command;
use tracing::debug;
use crate::utils::{BatchError, BatchResult};

/// Runs an external tool to completion.
///
/// `task` names the invocation in error messages (e.g. `vtracer: book`).
#[async_trait]
pub trait CommandRunner: Send + Sync {
    async fn run(&self, task: &str, program: &str, args: &[String]) -> BatchResult<()>;
}

/// Spawns tools as child processes and waits for them to exit.
///
/// Output is captured; stderr becomes the failure diagnostic. There is no
/// timeout, a hung tool holds its worker until it exits.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessExecutor;

impl ProcessExecutor {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl CommandRunner for ProcessExecutor {
    async fn run(&self, task: &str, program: &str, args: &[String]) -> BatchResult<()> {
        debug!("Running: {} {}", program, args.join(" "));

        let output = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .output()
            .await
            .map_err(|e| match e.kind() {
                ErrorKind::NotFound => BatchError::tool_not_found(task),
                _ => BatchError::IO(format!("Failed to run {}: {}", program, e)),
            })?;

        if output.status.success() {
            debug!("{} completed successfully", task);
            return Ok(());
        }

        let stderr = String::from_utf8_lossy(&output.stderr);
        if stderr.trim().is_empty() {
            Err(BatchError::tool_failed(task, format!("exited with {}", output.status)))
        } else {
            Err(BatchError::tool_failed(task, stderr))
        }
    }
}
