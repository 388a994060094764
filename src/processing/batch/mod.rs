mod processor;
mod report;

pub use processor::BatchProcessor;
pub use report::log_results;
