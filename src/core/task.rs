//! Units of work submitted to the worker pool.

use crate::core::JobDescriptor;

/// A single pool task.
#[derive(Debug, Clone, PartialEq)]
pub enum BatchTask {
    /// Trace a source image, then optionally minify the result
    Trace(JobDescriptor),
    /// Minify an SVG that already exists in the output directory
    MinifyExisting {
        output_name: String,
        /// Whether the file comes from the static minify-only list
        is_static: bool,
    },
}

impl BatchTask {
    pub fn minify_existing(output_name: impl Into<String>) -> Self {
        Self::MinifyExisting { output_name: output_name.into(), is_static: false }
    }

    pub fn minify_static(output_name: impl Into<String>) -> Self {
        Self::MinifyExisting { output_name: output_name.into(), is_static: true }
    }

    /// Human-readable name used when a task faults.
    pub fn label(&self) -> String {
        match self {
            Self::Trace(job) => format!("Process {}", job.source_name()),
            Self::MinifyExisting { output_name, is_static: false } => format!("Minify {}", output_name),
            Self::MinifyExisting { output_name, is_static: true } => format!("Minify Static {}", output_name),
        }
    }
}
