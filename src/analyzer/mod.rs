//! # Analyzer Module
//!
//! The contract every cluster analyzer implements, plus the analyzers this
//! crate ships.
//!
//! A host holds analyzers as `Box<dyn Analyzer>`, configures each one once,
//! and then calls [`Analyzer::analyze`] (or [`Analyzer::run`]) with an
//! [`AnalysisContext`]. Findings are returned by value; the host owns them
//! from then on.
//!
//! # Example
//!
//! ```rust,ignore
//! use ha_analyzer::analyzer::{AnalysisContext, Analyzer, AnalyzerConfig, SingleReplicaAnalyzer};
//! use ha_analyzer::cluster::KubeClusterReader;
//! use std::sync::Arc;
//!
//! let reader = Arc::new(KubeClusterReader::new().await?);
//! let mut analyzer = SingleReplicaAnalyzer::new(reader);
//! let ctx = AnalysisContext::new();
//!
//! analyzer.configure(&ctx, &AnalyzerConfig::new()).await?;
//! for finding in analyzer.analyze(&ctx).await? {
//!     println!("{}: {}", finding.object_identifier(), finding.problem());
//! }
//! ```

pub mod context;
pub mod single_replica;
pub mod types;

use crate::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

pub use context::{AnalysisContext, CancelHandle, Interrupted};
pub use single_replica::{SingleReplicaAnalyzer, SingleReplicaAnalyzerBuilder};
pub use types::{AnalyzerResult, Finding, Severity};

/// A pluggable rule that detects one class of cluster misconfiguration.
#[async_trait]
pub trait Analyzer: Send + Sync {
    /// Stable identifier used for selection and reporting.
    fn name(&self) -> &str;

    /// Apply host-supplied options. Called at most once, before analysis.
    /// Analyzers without options accept any mapping.
    async fn configure(&mut self, ctx: &AnalysisContext, config: &AnalyzerConfig) -> Result<()>;

    /// Inspect the cluster and return one finding per offending object.
    async fn analyze(&self, ctx: &AnalysisContext) -> Result<Vec<Finding>>;

    /// Run the analysis and wrap the findings for aggregation by the host.
    async fn run(&self, ctx: &AnalysisContext) -> Result<AnalyzerResult> {
        let findings = self.analyze(ctx).await?;
        Ok(AnalyzerResult::new(self.name(), findings))
    }
}

/// Opaque string options handed to [`Analyzer::configure`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnalyzerConfig {
    options: BTreeMap<String, String>,
}

impl AnalyzerConfig {
    /// Create an empty config.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an option.
    pub fn with_option(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.options.insert(key.into(), value.into());
        self
    }

    /// Look up an option.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.options.get(key).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }

    pub fn len(&self) -> usize {
        self.options.len()
    }

    /// Iterate options in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.options.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl From<HashMap<String, String>> for AnalyzerConfig {
    fn from(options: HashMap<String, String>) -> Self {
        Self {
            options: options.into_iter().collect(),
        }
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for AnalyzerConfig {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            options: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}
