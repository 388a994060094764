//! Batch configuration.
//!
//! Everything the orchestrator needs is carried by [`BatchConfig`] and
//! passed in explicitly. Built-in defaults describe the production batch;
//! a JSON file can replace any subset of fields.

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use serde::Deserialize;
use tracing::debug;
use crate::core::types::{JobDescriptor, ParameterSet};
use crate::utils::{BatchError, BatchResult};

/// Runtime configuration for a batch run.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BatchConfig {
    /// Directory holding the raster sources
    pub input_dir: PathBuf,
    /// Directory receiving traced SVGs
    pub output_dir: PathBuf,
    /// Directory receiving minified SVGs
    pub min_dir: PathBuf,
    /// Extension of source images, without the dot
    pub input_extension: String,
    /// Tracer executable
    pub tracer: String,
    /// Minifier executable
    pub minifier: String,
    /// Tracer options applied to every job unless overridden
    pub defaults: ParameterSet,
    /// Images to trace
    pub jobs: Vec<JobDescriptor>,
    /// Existing SVGs (by name, without extension) that only get minified
    pub minify_only: Vec<String>,
    /// Variant stress test settings
    pub variants: VariantConfig,
    /// Worker pool size; `None` uses the available parallelism
    pub workers: Option<usize>,
}

/// Settings for the parameter variant run.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct VariantConfig {
    /// Source image every variant is traced from
    pub source: String,
    /// `(variant name, overrides)` pairs; outputs land at `test_<name>.svg`
    pub variants: Vec<(String, ParameterSet)>,
}

impl Default for BatchConfig {
    fn default() -> Self {
        let output_dir = PathBuf::from("output_svgs");
        Self {
            input_dir: PathBuf::from("input_svgs"),
            min_dir: output_dir.join("min"),
            output_dir,
            input_extension: "jpeg".to_string(),
            tracer: "vtracer".to_string(),
            minifier: "svgo".to_string(),
            defaults: default_parameters(),
            jobs: vec![JobDescriptor::new("camera-viewfinder")],
            minify_only: vec!["laptop-frame".to_string(), "laptop-screen-cutout".to_string()],
            variants: VariantConfig::default(),
            workers: None,
        }
    }
}

impl Default for VariantConfig {
    fn default() -> Self {
        let variant = |name: &str, params: ParameterSet| (name.to_string(), params);
        Self {
            source: "main".to_string(),
            variants: vec![
                variant("preset_bw", ParameterSet::new().with("preset", "bw")),
                variant("preset_poster", ParameterSet::new().with("preset", "poster")),
                variant("mode_pixel", ParameterSet::new().with("mode", "pixel")),
                variant("mode_polygon", ParameterSet::new().with("mode", "polygon")),
                variant(
                    "detail_low",
                    ParameterSet::new()
                        .with("mode", "polygon")
                        .with("filter_speckle", 16)
                        .with("color_precision", 4),
                ),
                variant(
                    "detail_high",
                    ParameterSet::new()
                        .with("mode", "spline")
                        .with("filter_speckle", 0)
                        .with("color_precision", 8),
                ),
            ],
        }
    }
}

fn first_duplicate<'a>(names: impl IntoIterator<Item = &'a str>) -> Option<&'a str> {
    let mut seen = HashSet::new();
    names.into_iter().find(|name| !seen.insert(*name))
}

/// Tracer options used by the production batch.
pub fn default_parameters() -> ParameterSet {
    ParameterSet::new()
        .with("colormode", "color")
        .with("preset", "photo")
        .with("mode", "spline")
        .with("hierarchical", "stacked")
        .with("filter_speckle", 2)
        .with("color_precision", 8)
        .with("gradient_step", 25)
        .with("segment_length", 4)
}

impl BatchConfig {
    /// Loads a config file. Fields missing from the file keep their
    /// built-in defaults.
    pub async fn load(path: impl AsRef<Path>) -> BatchResult<Self> {
        let path = path.as_ref();
        debug!("Loading batch config from {}", path.display());

        let raw = tokio::fs::read_to_string(path).await.map_err(|e| {
            BatchError::config(format!("Failed to read {}: {}", path.display(), e))
        })?;
        let config: Self = serde_json::from_str(&raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> BatchResult<()> {
        if self.workers == Some(0) {
            return Err(BatchError::config("workers must be at least 1"));
        }
        if self.tracer.trim().is_empty() || self.minifier.trim().is_empty() {
            return Err(BatchError::config("tool executables cannot be empty"));
        }

        // Trace jobs and minify-only entries share the output and min dirs.
        let outputs = self
            .jobs
            .iter()
            .map(JobDescriptor::output_name)
            .chain(self.minify_only.iter().map(String::as_str));
        if let Some(name) = first_duplicate(outputs) {
            return Err(BatchError::config(format!(
                "Output name '{}' is used by more than one job", name
            )));
        }

        let variants = self.variants.variants.iter().map(|(name, _)| name.as_str());
        if let Some(name) = first_duplicate(variants) {
            return Err(BatchError::config(format!("Variant '{}' is defined more than once", name)));
        }
        Ok(())
    }

    /// Source image path for a job.
    pub fn input_path(&self, source_name: &str) -> PathBuf {
        self.input_dir.join(format!("{}.{}", source_name, self.input_extension))
    }

    /// Traced SVG path for an output name.
    pub fn output_path(&self, output_name: &str) -> PathBuf {
        self.output_dir.join(format!("{}.svg", output_name))
    }

    /// Minified SVG path for an output name.
    pub fn min_path(&self, output_name: &str) -> PathBuf {
        self.min_dir.join(format!("{}.svg", output_name))
    }
}
