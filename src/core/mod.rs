//! Core types and configuration.
//!
//! This module contains the fundamental types used throughout the crate:
//! - [`JobDescriptor`]: one image to trace, with its option overrides
//! - [`ParameterSet`]: tracer options and the override merge
//! - [`JobResult`]: outcome of a single job
//! - [`BatchTask`]: unit of work handed to the worker pool
//! - [`BatchConfig`]: directories, tools, defaults and job lists

mod config;
mod task;
mod types;

pub use config::{BatchConfig, VariantConfig, default_parameters};
pub use task::BatchTask;
pub use types::{BatchSummary, JobDescriptor, JobResult, ParamValue, ParameterSet, ResultLevel, OUTPUT_NAME_KEY};
