use std::sync::Arc;
use tracing::debug;
use crate::core::{BatchConfig, BatchTask, JobDescriptor, JobResult};
use crate::processing::CommandRunner;
use crate::processing::tools::{minifier_args, tracer_args};
use crate::utils::{display_name, file_exists};

/// Runs the tool chain for a single task.
///
/// Every outcome, including tool errors, is folded into a [`JobResult`];
/// nothing here returns an error to the caller.
#[derive(Clone)]
pub struct JobPipeline {
    config: Arc<BatchConfig>,
    runner: Arc<dyn CommandRunner>,
}

impl JobPipeline {
    pub fn new(config: Arc<BatchConfig>, runner: Arc<dyn CommandRunner>) -> Self {
        Self { config, runner }
    }

    pub fn config(&self) -> &BatchConfig {
        &self.config
    }

    pub async fn execute(&self, task: BatchTask) -> JobResult {
        match task {
            BatchTask::Trace(job) => self.process_single_image(&job).await,
            BatchTask::MinifyExisting { output_name, .. } => self.minify_existing_file(&output_name).await,
        }
    }

    /// Source image -> tracer -> SVG, then minifier when the job asks for it.
    pub async fn process_single_image(&self, job: &JobDescriptor) -> JobResult {
        let input_path = self.config.input_path(job.source_name());
        let output_path = self.config.output_path(job.output_name());
        let min_path = self.config.min_path(job.output_name());

        if !file_exists(&input_path).await {
            return JobResult::Skipped(format!("SKIP: Input {} not found.", input_path.display()));
        }

        let params = job.parameters(&self.config.defaults);
        debug!("Tracing {} with {} parameters", job.source_name(), params.len());

        let task = format!("{}: {}", display_name(&self.config.tracer), job.source_name());
        let args = tracer_args(&input_path, &output_path, &params);
        if let Err(e) = self.runner.run(&task, &self.config.tracer, &args).await {
            return JobResult::Failure(e.to_string());
        }

        let mut msg = format!("✓ Generated: {}", display_name(&output_path));

        if job.minify() {
            let task = format!("{}: {}", display_name(&self.config.minifier), job.source_name());
            let args = minifier_args(&output_path, &min_path);
            match self.runner.run(&task, &self.config.minifier, &args).await {
                Ok(()) => msg.push_str(&format!(" -> Minified to {}", display_name(&min_path))),
                Err(e) => msg.push_str(&format!(" (Minification Failed: {})", e)),
            }
        }

        JobResult::Success(msg)
    }

    /// Minifies `<output_dir>/<name>.svg` into the minified directory.
    pub async fn minify_existing_file(&self, output_name: &str) -> JobResult {
        let input_path = self.config.output_path(output_name);
        let output_path = self.config.min_path(output_name);

        if !file_exists(&input_path).await {
            return JobResult::Skipped(format!(
                "SKIP: {}.svg not found in {}",
                output_name,
                self.config.output_dir.display()
            ));
        }

        let task = format!("{}-only: {}", display_name(&self.config.minifier), output_name);
        let args = minifier_args(&input_path, &output_path);
        match self.runner.run(&task, &self.config.minifier, &args).await {
            Ok(()) => JobResult::Success(format!("✓ Minified: {}.svg", output_name)),
            Err(e) => JobResult::Failure(e.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processing::testing::{Behavior, RecordingRunner};
    use tempfile::TempDir;

    fn setup(runner: RecordingRunner) -> (TempDir, JobPipeline, Arc<RecordingRunner>) {
        let dir = tempfile::tempdir().unwrap();
        let config = BatchConfig {
            input_dir: dir.path().join("in"),
            output_dir: dir.path().join("out"),
            min_dir: dir.path().join("out").join("min"),
            ..BatchConfig::default()
        };
        std::fs::create_dir_all(&config.input_dir).unwrap();
        std::fs::create_dir_all(&config.min_dir).unwrap();

        let runner = Arc::new(runner);
        let pipeline = JobPipeline::new(Arc::new(config), runner.clone());
        (dir, pipeline, runner)
    }

    fn touch_input(pipeline: &JobPipeline, name: &str) {
        std::fs::write(pipeline.config().input_path(name), b"jpeg").unwrap();
    }

    #[tokio::test]
    async fn test_missing_source_is_skipped_without_invocations() {
        let (_dir, pipeline, runner) = setup(RecordingRunner::new());
        let result = pipeline.process_single_image(&JobDescriptor::new("b")).await;

        let expected = format!("SKIP: Input {} not found.", pipeline.config().input_path("b").display());
        assert_eq!(result, JobResult::Skipped(expected));
        assert!(runner.calls().is_empty());
    }

    #[tokio::test]
    async fn test_trace_and_minify_success() {
        let (_dir, pipeline, runner) = setup(RecordingRunner::new());
        touch_input(&pipeline, "a");
        let job = JobDescriptor::new("a").with_override("preset", "poster").with_minify(true);

        let result = pipeline.process_single_image(&job).await;

        assert!(result.is_success());
        assert!(result.message().contains("a.svg"));
        assert!(result.message().contains("Minified to a.svg"));

        let tracer_calls = runner.calls_to("vtracer");
        assert_eq!(tracer_calls.len(), 1);
        let args = &tracer_calls[0].args;
        let preset = args.iter().position(|a| a == "--preset").unwrap();
        assert_eq!(args[preset + 1], "poster");
        assert_eq!(runner.calls_to("svgo").len(), 1);
        assert!(pipeline.config().min_path("a").exists());
    }

    #[tokio::test]
    async fn test_tracer_args_use_merged_parameters() {
        let (_dir, pipeline, runner) = setup(RecordingRunner::new());
        touch_input(&pipeline, "scroll");
        let job = JobDescriptor::new("scroll").with_override("preset", "poster");

        pipeline.process_single_image(&job).await;

        let args = &runner.calls_to("vtracer")[0].args;
        let expected_params = pipeline.config().defaults.merged(job.overrides());
        assert_eq!(args[4..], expected_params.to_args()[..]);
        assert_eq!(args.iter().filter(|a| a.starts_with("--")).count(), 2 + expected_params.len());
    }

    #[tokio::test]
    async fn test_output_name_used_for_both_outputs() {
        let (_dir, pipeline, runner) = setup(RecordingRunner::new());
        touch_input(&pipeline, "laptop");
        let job = JobDescriptor::new("laptop").with_override("output_name", "laptop-screen").with_minify(true);

        let result = pipeline.process_single_image(&job).await;

        assert_eq!(
            result,
            JobResult::Success("✓ Generated: laptop-screen.svg -> Minified to laptop-screen.svg".into())
        );
        let tracer_args = &runner.calls_to("vtracer")[0].args;
        assert!(!tracer_args.iter().any(|a| a == "--output_name"));
        assert!(pipeline.config().output_path("laptop-screen").exists());
        assert!(pipeline.config().min_path("laptop-screen").exists());
    }

    #[tokio::test]
    async fn test_tracer_failure_skips_minify() {
        let runner = RecordingRunner::new().with_behavior("vtracer", Behavior::Fail("corrupt jpeg".into()));
        let (_dir, pipeline, runner) = setup(runner);
        touch_input(&pipeline, "main");

        let result = pipeline.process_single_image(&JobDescriptor::new("main").with_minify(true)).await;

        assert_eq!(result, JobResult::Failure("Error in vtracer: main: corrupt jpeg".into()));
        assert!(runner.calls_to("svgo").is_empty());
    }

    #[tokio::test]
    async fn test_minify_failure_keeps_success() {
        let runner = RecordingRunner::new().with_behavior("svgo", Behavior::Fail("parse error".into()));
        let (_dir, pipeline, _runner) = setup(runner);
        touch_input(&pipeline, "book");

        let result = pipeline.process_single_image(&JobDescriptor::new("book").with_minify(true)).await;

        assert_eq!(
            result,
            JobResult::Success(
                "✓ Generated: book.svg (Minification Failed: Error in svgo: book: parse error)".into()
            )
        );
    }

    #[tokio::test]
    async fn test_missing_tracer_binary() {
        let runner = RecordingRunner::new().with_behavior("vtracer", Behavior::Missing);
        let (_dir, pipeline, _runner) = setup(runner);
        touch_input(&pipeline, "main");

        let result = pipeline.process_single_image(&JobDescriptor::new("main")).await;
        assert_eq!(
            result,
            JobResult::Failure("Tool not found for vtracer: main. Is it installed?".into())
        );
    }

    #[tokio::test]
    async fn test_tool_paths_reduced_to_file_name_in_messages() {
        let runner = RecordingRunner::new()
            .with_behavior("/opt/tools/vtracer", Behavior::Fail("corrupt jpeg".into()))
            .with_behavior("/opt/tools/svgo", Behavior::Fail("parse error".into()));
        let (_dir, pipeline, runner) = setup(runner);
        let config = BatchConfig {
            tracer: "/opt/tools/vtracer".into(),
            minifier: "/opt/tools/svgo".into(),
            ..pipeline.config().clone()
        };
        let pipeline = JobPipeline::new(Arc::new(config), runner.clone());
        touch_input(&pipeline, "main");
        std::fs::create_dir_all(&pipeline.config().output_dir).unwrap();
        std::fs::write(pipeline.config().output_path("laptop-frame"), "<svg/>").unwrap();

        let traced = pipeline.process_single_image(&JobDescriptor::new("main")).await;
        let minified = pipeline.minify_existing_file("laptop-frame").await;

        assert_eq!(traced, JobResult::Failure("Error in vtracer: main: corrupt jpeg".into()));
        assert_eq!(
            minified,
            JobResult::Failure("Error in svgo-only: laptop-frame: parse error".into())
        );
        assert_eq!(runner.calls_to("/opt/tools/vtracer").len(), 1);
    }

    #[tokio::test]
    async fn test_minify_existing() {
        let (_dir, pipeline, runner) = setup(RecordingRunner::new());
        std::fs::create_dir_all(&pipeline.config().output_dir).unwrap();
        std::fs::write(pipeline.config().output_path("laptop-frame"), "<svg/>").unwrap();

        let result = pipeline.minify_existing_file("laptop-frame").await;

        assert_eq!(result, JobResult::Success("✓ Minified: laptop-frame.svg".into()));
        assert!(runner.calls_to("vtracer").is_empty());
        assert_eq!(
            std::fs::read_to_string(pipeline.config().min_path("laptop-frame")).unwrap(),
            "<svg/>"
        );
    }

    #[tokio::test]
    async fn test_minify_existing_missing_file() {
        let (_dir, pipeline, runner) = setup(RecordingRunner::new());
        let result = pipeline.minify_existing_file("laptop-frame").await;

        let expected = format!(
            "SKIP: laptop-frame.svg not found in {}",
            pipeline.config().output_dir.display()
        );
        assert_eq!(result, JobResult::Skipped(expected));
        assert!(runner.calls().is_empty());
    }
}
