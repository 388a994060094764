//! Command-line surface.
//!
//! - [`Cli`]: argument parsing (`--mode`, minification switches, overrides)
//! - [`run`]: dispatches the selected mode and reports the outcome

mod cli;
mod run;

pub use cli::{Cli, Mode};
pub use run::{RunStatus, run, run_with};
