use tracing::{error, info, warn};
use crate::core::{BatchSummary, JobResult, ResultLevel};

/// Logs each result at its level, then a summary line.
pub fn log_results(results: &[JobResult]) -> BatchSummary {
    for result in results {
        match result.level() {
            ResultLevel::Error => error!("{}", result),
            ResultLevel::Warn => warn!("{}", result),
            ResultLevel::Info => info!("{}", result),
        }
    }

    let summary = BatchSummary::from_results(results);
    info!(
        "Batch finished: {} succeeded, {} failed, {} skipped ({} total)",
        summary.succeeded,
        summary.failed,
        summary.skipped,
        summary.total()
    );
    summary
}
