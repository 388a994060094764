// Module declarations in dependency order
pub mod utils;
pub mod core;
pub mod worker;
pub mod processing;
pub mod commands;

// Public exports for external consumers
pub use crate::core::{BatchConfig, BatchSummary, JobDescriptor, JobResult, ParamValue, ParameterSet};
pub use crate::processing::{BatchProcessor, CommandRunner, ProcessExecutor};
pub use crate::utils::{BatchError, BatchResult};

// This library file is used as a public API for consuming svg-batch as a library.
// The actual application entry point is in main.rs.
