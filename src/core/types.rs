//! Core types for tracer parameters, job descriptors and job outcomes.

use std::collections::BTreeMap;
use std::fmt;
use serde::{Deserialize, Serialize};

/// Key that names the output file instead of being forwarded to the tracer.
pub const OUTPUT_NAME_KEY: &str = "output_name";

/// A single tracer option value.
///
/// `Null` keeps the key in the parameter set but suppresses the flag, so an
/// override can switch a default option off.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    Integer(i64),
    Float(f64),
    Bool(bool),
    Text(String),
    Null,
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer(v) => write!(f, "{}", v),
            Self::Float(v) => write!(f, "{}", v),
            Self::Bool(v) => write!(f, "{}", v),
            Self::Text(v) => f.write_str(v),
            Self::Null => Ok(()),
        }
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<i64> for ParamValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<i32> for ParamValue {
    fn from(value: i32) -> Self {
        Self::Integer(value.into())
    }
}

impl From<f64> for ParamValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<bool> for ParamValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl ParamValue {
    /// Output file name carried by an `output_name` override. `Null` means
    /// "keep the source name"; other scalars are stringified.
    fn as_output_name(&self) -> Option<String> {
        match self {
            Self::Null => None,
            other => Some(other.to_string()),
        }
    }
}

/// Mapping of tracer option name to value.
///
/// Keys are unique and iterate in sorted order, which keeps generated
/// command lines stable between runs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParameterSet(BTreeMap<String, ParamValue>);

impl ParameterSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<ParamValue>) -> Option<ParamValue> {
        self.0.insert(key.into(), value.into())
    }

    pub fn remove(&mut self, key: &str) -> Option<ParamValue> {
        self.0.remove(key)
    }

    pub fn get(&self, key: &str) -> Option<&ParamValue> {
        self.0.get(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Overlays `overrides` onto `self`. Overrides win on identical keys;
    /// values are replaced whole.
    pub fn merged(&self, overrides: &ParameterSet) -> ParameterSet {
        let mut merged = self.0.clone();
        for (key, value) in &overrides.0 {
            merged.insert(key.clone(), value.clone());
        }
        ParameterSet(merged)
    }

    /// Serializes to `--<key> <value>` pairs, skipping `Null` entries.
    pub fn to_args(&self) -> Vec<String> {
        self.0
            .iter()
            .filter(|(_, value)| **value != ParamValue::Null)
            .flat_map(|(key, value)| [format!("--{}", key), value.to_string()])
            .collect()
    }
}

impl<K: Into<String>, V: Into<ParamValue>> FromIterator<(K, V)> for ParameterSet {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

/// Config-file shape of a job: the output name may be given either as a
/// field or as an `output_name` override.
#[derive(Debug, Clone, Deserialize)]
struct RawJob {
    name: String,
    #[serde(default)]
    output_name: Option<String>,
    #[serde(default)]
    overrides: Option<ParameterSet>,
    #[serde(default)]
    minify: bool,
}

/// One unit of tracing work, immutable once built.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "RawJob")]
pub struct JobDescriptor {
    source_name: String,
    output_name: String,
    overrides: ParameterSet,
    minify: bool,
}

impl TryFrom<RawJob> for JobDescriptor {
    type Error = String;

    fn try_from(raw: RawJob) -> Result<Self, Self::Error> {
        let overrides = raw.overrides.unwrap_or_default();
        match overrides.get(OUTPUT_NAME_KEY) {
            None | Some(ParamValue::Text(_)) => {}
            Some(other) => {
                return Err(format!(
                    "job '{}': output_name must be a string, got {:?}",
                    raw.name, other
                ));
            }
        }

        let mut job = Self::from_overrides(raw.name, overrides);
        if let Some(output_name) = raw.output_name {
            job.output_name = output_name;
        }
        job.minify = raw.minify;
        Ok(job)
    }
}

impl JobDescriptor {
    pub fn new(source_name: impl Into<String>) -> Self {
        let source_name = source_name.into();
        Self {
            output_name: source_name.clone(),
            source_name,
            overrides: ParameterSet::new(),
            minify: false,
        }
    }

    /// Builds a job from a name and its overrides, lifting an
    /// `output_name` override out so it never reaches the tracer.
    pub fn from_overrides(source_name: impl Into<String>, mut overrides: ParameterSet) -> Self {
        let mut job = Self::new(source_name);
        if let Some(output_name) = overrides.remove(OUTPUT_NAME_KEY).and_then(|v| v.as_output_name()) {
            job.output_name = output_name;
        }
        job.overrides = overrides;
        job
    }

    pub fn with_output_name(mut self, output_name: impl Into<String>) -> Self {
        self.output_name = output_name.into();
        self
    }

    pub fn with_override(mut self, key: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        let key = key.into();
        if key == OUTPUT_NAME_KEY {
            if let Some(name) = value.into().as_output_name() {
                self.output_name = name;
            }
            return self;
        }
        self.overrides.insert(key, value);
        self
    }

    pub fn with_minify(mut self, minify: bool) -> Self {
        self.minify = minify;
        self
    }

    pub fn source_name(&self) -> &str {
        &self.source_name
    }

    pub fn output_name(&self) -> &str {
        &self.output_name
    }

    pub fn overrides(&self) -> &ParameterSet {
        &self.overrides
    }

    pub fn minify(&self) -> bool {
        self.minify
    }

    /// Effective tracer parameters for this job.
    pub fn parameters(&self, defaults: &ParameterSet) -> ParameterSet {
        defaults.merged(&self.overrides)
    }
}

/// Log level a result is reported at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultLevel {
    Info,
    Warn,
    Error,
}

/// Outcome of one job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "message", rename_all = "lowercase")]
pub enum JobResult {
    Success(String),
    Failure(String),
    Skipped(String),
}

impl JobResult {
    pub fn message(&self) -> &str {
        match self {
            Self::Success(msg) | Self::Failure(msg) | Self::Skipped(msg) => msg,
        }
    }

    pub fn level(&self) -> ResultLevel {
        match self {
            Self::Success(_) => ResultLevel::Info,
            Self::Skipped(_) => ResultLevel::Warn,
            Self::Failure(_) => ResultLevel::Error,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }
}

impl fmt::Display for JobResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// Counts of results by kind, reported after a batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BatchSummary {
    pub succeeded: usize,
    pub failed: usize,
    pub skipped: usize,
}

impl BatchSummary {
    pub fn from_results(results: &[JobResult]) -> Self {
        results.iter().fold(Self::default(), |mut summary, result| {
            match result {
                JobResult::Success(_) => summary.succeeded += 1,
                JobResult::Failure(_) => summary.failed += 1,
                JobResult::Skipped(_) => summary.skipped += 1,
            }
            summary
        })
    }

    pub fn total(&self) -> usize {
        self.succeeded + self.failed + self.skipped
    }
}
