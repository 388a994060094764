//! Scriptable [`CommandRunner`] for tests.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;
use async_trait::async_trait;
use crate::processing::CommandRunner;
use crate::utils::{BatchError, BatchResult};

/// What a recorded tool does when invoked.
#[derive(Debug, Clone)]
pub enum Behavior {
    /// Exit 0 and write the output file like the real tool would
    Succeed,
    /// Exit non-zero with this stderr
    Fail(String),
    /// Binary not installed
    Missing,
    /// Fault inside the job
    Panic,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: String,
    pub args: Vec<String>,
}

/// Records every invocation; tools default to [`Behavior::Succeed`].
#[derive(Default)]
pub struct RecordingRunner {
    behaviors: HashMap<String, Behavior>,
    delay: Option<Duration>,
    calls: Mutex<Vec<Invocation>>,
}

impl RecordingRunner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_behavior(mut self, program: &str, behavior: Behavior) -> Self {
        self.behaviors.insert(program.to_string(), behavior);
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn calls(&self) -> Vec<Invocation> {
        self.calls.lock().unwrap().clone()
    }

    pub fn calls_to(&self, program: &str) -> Vec<Invocation> {
        self.calls().into_iter().filter(|c| c.program == program).collect()
    }

    fn arg_after<'a>(args: &'a [String], flag: &str) -> Option<&'a String> {
        args.iter().position(|a| a == flag).and_then(|i| args.get(i + 1))
    }

    async fn produce_output(&self, args: &[String]) -> BatchResult<()> {
        // Tracer: --input <in> --output <out>; minifier: <in> -o <out>
        if let Some(output) = Self::arg_after(args, "--output") {
            let input = Self::arg_after(args, "--input").cloned().unwrap_or_default();
            let body = format!("<svg data-source=\"{}\">{}</svg>", input, "x".repeat(4096));
            let chunks = body.as_bytes().chunks(512).collect::<Vec<_>>();
            let mut written = Vec::new();
            for chunk in chunks {
                written.extend_from_slice(chunk);
                tokio::fs::write(output, &written).await?;
                tokio::task::yield_now().await;
            }
        } else if let Some(output) = Self::arg_after(args, "-o") {
            tokio::fs::copy(&args[0], output).await?;
        }
        Ok(())
    }
}

#[async_trait]
impl CommandRunner for RecordingRunner {
    async fn run(&self, task: &str, program: &str, args: &[String]) -> BatchResult<()> {
        self.calls.lock().unwrap().push(Invocation {
            program: program.to_string(),
            args: args.to_vec(),
        });
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        match self.behaviors.get(program).cloned().unwrap_or(Behavior::Succeed) {
            Behavior::Succeed => self.produce_output(args).await,
            Behavior::Fail(stderr) => Err(BatchError::tool_failed(task, stderr)),
            Behavior::Missing => Err(BatchError::tool_not_found(task)),
            Behavior::Panic => panic!("{} crashed", program),
        }
    }
}
