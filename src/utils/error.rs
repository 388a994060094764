//! Error types for the batch runner.
//!
//! Provides a hierarchy of error types using `thiserror` for ergonomic error handling.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Main error type for the batch runner.
///
/// Errors raised inside a job never leave it: the job boundary folds them
/// into a [`crate::core::JobResult`]. Only configuration and precondition
/// errors reach the binary.
#[derive(Error, Debug)]
pub enum BatchError {
    /// External tool binary could not be spawned
    #[error("Tool not found for {task}. Is it installed?")]
    ToolNotFound { task: String },

    /// External tool exited with a non-zero status
    #[error("Error in {task}: {stderr}")]
    ToolFailed { task: String, stderr: String },

    /// A required input file or directory is absent
    #[error("Input not found: {0}")]
    MissingInput(PathBuf),

    /// Configuration could not be loaded or is invalid
    #[error("Config error: {0}")]
    Config(String),

    /// A job faulted outside of the tool invocation
    #[error("Worker error: {0}")]
    Worker(String),

    /// File IO error
    #[error("IO error: {0}")]
    IO(String),
}

/// Convenience result type for batch operations.
pub type BatchResult<T> = Result<T, BatchError>;

// Helper methods for error creation
impl BatchError {
    pub fn tool_not_found<T: Into<String>>(task: T) -> Self {
        Self::ToolNotFound { task: task.into() }
    }

    pub fn tool_failed<T: Into<String>, S: AsRef<str>>(task: T, stderr: S) -> Self {
        Self::ToolFailed {
            task: task.into(),
            stderr: stderr.as_ref().trim().to_string(),
        }
    }

    pub fn missing_input(path: impl Into<PathBuf>) -> Self {
        Self::MissingInput(path.into())
    }

    pub fn config<T: Into<String>>(msg: T) -> Self {
        Self::Config(msg.into())
    }

    pub fn worker<T: Into<String>>(msg: T) -> Self {
        Self::Worker(msg.into())
    }
}

// Convert std::io::Error to BatchError
impl From<io::Error> for BatchError {
    fn from(err: io::Error) -> Self {
        Self::IO(err.to_string())
    }
}

impl From<tokio::sync::AcquireError> for BatchError {
    fn from(err: tokio::sync::AcquireError) -> Self {
        Self::Worker(format!("Failed to acquire worker: {}", err))
    }
}

impl From<serde_json::Error> for BatchError {
    fn from(err: serde_json::Error) -> Self {
        Self::Config(format!("Invalid config JSON: {}", err))
    }
}
