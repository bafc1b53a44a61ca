//! Command implementations.

pub mod check;
pub mod package;

use crate::output::OutputFormat;
use sentinel::AssessmentEngine;

/// Shared context for all commands.
#[derive(Clone)]
pub struct Context {
    /// The configured assessment engine
    pub engine: AssessmentEngine,

    /// Output format
    pub output_format: OutputFormat,
}
