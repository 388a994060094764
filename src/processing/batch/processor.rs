use std::sync::Arc;
use crate::core::{BatchConfig, BatchTask, JobDescriptor, JobResult};
use crate::processing::{CommandRunner, JobPipeline};
use crate::utils::{BatchResult, create_dir_all};
use crate::worker::WorkerPool;
use tracing::{debug, info};

/// Dispatches batch and variant runs onto the worker pool.
pub struct BatchProcessor {
    pipeline: JobPipeline,
    pool: WorkerPool,
}

impl BatchProcessor {
    pub fn new(config: BatchConfig, runner: Arc<dyn CommandRunner>) -> Self {
        let pool = WorkerPool::new(config.workers);
        Self {
            pipeline: JobPipeline::new(Arc::new(config), runner),
            pool,
        }
    }

    pub fn config(&self) -> &BatchConfig {
        self.pipeline.config()
    }

    /// Expands a job list into pool tasks.
    ///
    /// With `minify_only` every job becomes a minification of its existing
    /// output. The configured static files are added whenever any
    /// minification is requested, whatever the jobs themselves say.
    pub fn plan(&self, jobs: &[JobDescriptor], minify: bool, minify_only: bool) -> Vec<BatchTask> {
        let mut tasks: Vec<BatchTask> = jobs
            .iter()
            .map(|job| {
                if minify_only {
                    BatchTask::minify_existing(job.output_name())
                } else {
                    BatchTask::Trace(job.clone().with_minify(minify))
                }
            })
            .collect();

        if minify || minify_only {
            tasks.extend(self.config().minify_only.iter().map(BatchTask::minify_static));
        }
        tasks
    }

    /// Runs the batch and returns results in completion order.
    ///
    /// Only directory setup can fail here; job failures are results.
    pub async fn run_batch(
        &self,
        jobs: &[JobDescriptor],
        minify: bool,
        minify_only: bool,
    ) -> BatchResult<Vec<JobResult>> {
        create_dir_all(&self.config().output_dir).await?;
        if minify || minify_only {
            create_dir_all(&self.config().min_dir).await?;
        }

        info!("Starting batch processing (Minify Only: {})...", minify_only);
        let tasks = self.plan(jobs, minify, minify_only);
        debug!("Submitting {} tasks to {} workers", tasks.len(), self.pool.worker_count());

        Ok(self.dispatch(tasks).await)
    }

    /// Traces every configured variant of one source image to
    /// `test_<variant>.svg`, without minification.
    pub async fn run_variants(&self) -> BatchResult<Vec<JobResult>> {
        let variants = &self.config().variants;
        info!("Running Parameter Stress Test on {}...", variants.source);
        create_dir_all(&self.config().output_dir).await?;

        let tasks = variants
            .variants
            .iter()
            .map(|(name, params)| {
                BatchTask::Trace(JobDescriptor::from_overrides(variants.source.clone(), params.clone())
                    .with_output_name(format!("test_{}", name)))
            })
            .collect();

        Ok(self.dispatch(tasks).await)
    }

    async fn dispatch(&self, tasks: Vec<BatchTask>) -> Vec<JobResult> {
        let jobs = tasks
            .into_iter()
            .map(|task| {
                let pipeline = self.pipeline.clone();
                (task.label(), async move { pipeline.execute(task).await })
            })
            .collect();

        self.pool.run_all(jobs).await
    }
}
