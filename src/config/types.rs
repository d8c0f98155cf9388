use crate::analyzer::AnalyzerConfig;
use crate::formatter::OutputFormat;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Duration;

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Deadline for one analysis run, in seconds
    pub timeout_secs: Option<u64>,
    /// Kubeconfig context to use instead of the current one
    pub context: Option<String>,
    /// Output format
    pub format: OutputFormat,
    /// Per-analyzer options, keyed by analyzer name
    pub analyzers: HashMap<String, AnalyzerConfig>,
}

impl Config {
    /// Options for one analyzer (empty when none are configured).
    pub fn analyzer_options(&self, name: &str) -> AnalyzerConfig {
        self.analyzers.get(name).cloned().unwrap_or_default()
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}
