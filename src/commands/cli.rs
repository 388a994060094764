use std::path::PathBuf;
use clap::{Parser, ValueEnum};
use crate::core::BatchConfig;
use crate::utils::BatchResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Mode {
    /// Run the production batch
    Batch,
    /// Trace parameter variants of one image
    Test,
}

/// SVG Batch Processor
#[derive(Debug, Parser)]
#[command(name = "svg-batch", version, about = "Trace JPEGs to SVG and minify them in parallel")]
pub struct Cli {
    /// Run production batch or test variants
    #[arg(long, value_enum, default_value_t = Mode::Batch)]
    pub mode: Mode,

    /// Skip the minification step completely
    #[arg(long, conflicts_with = "minify_only")]
    pub no_minify: bool,

    /// Skip generation, only minify existing output files
    #[arg(long)]
    pub minify_only: bool,

    /// JSON batch configuration; missing fields use built-in defaults
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Worker pool size
    #[arg(long)]
    pub workers: Option<usize>,

    /// Directory holding source images
    #[arg(long, value_name = "DIR")]
    pub input_dir: Option<PathBuf>,

    /// Directory receiving SVGs; minified files go to `<DIR>/min`
    #[arg(long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,
}

impl Cli {
    pub fn minify(&self) -> bool {
        !self.no_minify
    }

    /// Loads the configuration and applies command-line overrides.
    pub async fn resolve_config(&self) -> BatchResult<BatchConfig> {
        let mut config = match &self.config {
            Some(path) => BatchConfig::load(path).await?,
            None => BatchConfig::default(),
        };

        if let Some(dir) = &self.input_dir {
            config.input_dir = dir.clone();
        }
        if let Some(dir) = &self.output_dir {
            config.output_dir = dir.clone();
            config.min_dir = dir.join("min");
        }
        if self.workers.is_some() {
            config.workers = self.workers;
        }

        config.validate()?;
        Ok(config)
    }
}
