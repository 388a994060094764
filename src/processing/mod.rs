mod batch;
mod executor;
mod pipeline;
pub mod tools;
#[cfg(test)]
pub(crate) mod testing;

pub use batch::{BatchProcessor, log_results};
pub use executor::{CommandRunner, ProcessExecutor};
pub use pipeline::JobPipeline;
