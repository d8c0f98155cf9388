//! Output formatters for analyzer results.

pub mod json;
pub mod plain;

use crate::analyzer::AnalyzerResult;
use crate::error::HostError;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::io::Write;

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Plain text output.
    #[default]
    Plain,
    /// JSON output.
    Json,
}

/// Format an analyzer result to a string.
///
/// Findings are rendered in `(namespace, name)` order regardless of the order
/// the analyzer produced them in.
pub fn format_result_to_string(
    result: &AnalyzerResult,
    format: OutputFormat,
    colors: bool,
) -> Result<String, HostError> {
    let mut sorted = result.clone();
    sorted.sort();

    Ok(match format {
        OutputFormat::Plain => plain::format(&sorted, colors),
        OutputFormat::Json => json::format(&sorted)?,
    })
}

/// Format an analyzer result and write it to stdout.
pub fn format_result(
    result: &AnalyzerResult,
    format: OutputFormat,
    colors: bool,
) -> Result<(), HostError> {
    let output = format_result_to_string(result, format, colors)?;
    let mut stdout = std::io::stdout().lock();
    stdout.write_all(output.as_bytes())?;
    stdout.flush()?;
    Ok(())
}
