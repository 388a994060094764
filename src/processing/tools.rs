//! Command lines for the external tracer and minifier.

use std::path::Path;
use crate::core::ParameterSet;

/// `<tracer> --input <in> --output <out> [--<option> <value>]*`
pub fn tracer_args(input: &Path, output: &Path, params: &ParameterSet) -> Vec<String> {
    let mut args = vec![
        "--input".to_string(),
        input.display().to_string(),
        "--output".to_string(),
        output.display().to_string(),
    ];
    args.extend(params.to_args());
    args
}

/// `<minifier> <in> -o <out>`
pub fn minifier_args(input: &Path, output: &Path) -> Vec<String> {
    vec![
        input.display().to_string(),
        "-o".to_string(),
        output.display().to_string(),
    ]
}
