use std::future::Future;
use std::sync::Arc;
use tokio::sync::{Mutex, Semaphore};
use tokio::task::JoinSet;
use crate::core::JobResult;
use crate::utils::BatchError;
use tracing::{debug, error};

const DEFAULT_WORKERS: usize = 4;
const MAX_WORKERS: usize = 32;

/// Bounded pool for independent jobs.
///
/// Results come back in completion order, not submission order. A job that
/// panics is reported as a [`JobResult::Failure`] and never affects its
/// siblings.
#[derive(Clone)]
pub struct WorkerPool {
    semaphore: Arc<Semaphore>,
    active_workers: Arc<Mutex<usize>>,
    worker_count: usize,
}

impl WorkerPool {
    pub fn new(worker_count: Option<usize>) -> Self {
        let worker_count = worker_count.unwrap_or_else(Self::default_worker_count).max(1);
        debug!("Creating worker pool with {} workers", worker_count);
        Self {
            semaphore: Arc::new(Semaphore::new(worker_count)),
            active_workers: Arc::new(Mutex::new(0)),
            worker_count,
        }
    }

    /// Subprocess-bound work, so the pool is wider than the core count.
    fn default_worker_count() -> usize {
        std::thread::available_parallelism()
            .map(|n| (n.get() + 4).min(MAX_WORKERS))
            .unwrap_or(DEFAULT_WORKERS)
    }

    pub fn worker_count(&self) -> usize {
        self.worker_count
    }

    pub async fn get_active_workers(&self) -> usize {
        *self.active_workers.lock().await
    }

    /// Runs every `(label, job)` pair and collects the results as they
    /// finish.
    pub async fn run_all<F>(&self, jobs: Vec<(String, F)>) -> Vec<JobResult>
    where
        F: Future<Output = JobResult> + Send + 'static,
    {
        let total = jobs.len();
        let mut set = JoinSet::new();

        for (label, job) in jobs {
            let semaphore = Arc::clone(&self.semaphore);
            let active_workers = Arc::clone(&self.active_workers);
            let worker_count = self.worker_count;

            set.spawn(async move {
                let _permit = match semaphore.acquire_owned().await {
                    Ok(permit) => permit,
                    Err(e) => return JobResult::Failure(format!("{} generated an exception: {}", label, BatchError::from(e))),
                };

                {
                    let mut count = active_workers.lock().await;
                    *count += 1;
                    debug!("Worker started - Active: {}/{}, Task: {}", *count, worker_count, label);
                }

                // Run the job on its own task so a panic surfaces as a JoinError here.
                let result = match tokio::spawn(job).await {
                    Ok(result) => result,
                    Err(e) => JobResult::Failure(format!("{} generated an exception: {}", label, e)),
                };

                let mut count = active_workers.lock().await;
                *count -= 1;
                debug!("Worker finished - Active: {}/{}, Task: {}", *count, worker_count, label);

                result
            });
        }

        let mut results = Vec::with_capacity(total);
        while let Some(joined) = set.join_next().await {
            match joined {
                Ok(result) => results.push(result),
                Err(e) => {
                    error!("Worker task aborted: {}", e);
                    results.push(JobResult::Failure(format!("Worker task aborted: {}", e)));
                }
            }
        }
        results
    }
}
