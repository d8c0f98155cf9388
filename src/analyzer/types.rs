//! Result shapes shared by every analyzer.
//!
//! - `Severity` - How serious a finding is
//! - `Finding` - One detected problem on one Kubernetes object
//! - `AnalyzerResult` - All findings of one analyzer run, as handed to the host

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// Severity levels for findings.
///
/// Ordered from most severe to least severe:
/// `Error > Warning > Info`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// The object is broken or already causing an outage
    Error,
    /// The object is a risk but still serving
    #[default]
    Warning,
    /// Informational suggestions
    Info,
}

impl Severity {
    /// Get the string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warning => "warning",
            Self::Info => "info",
        }
    }

    fn rank(self) -> u8 {
        match self {
            Self::Error => 2,
            Self::Warning => 1,
            Self::Info => 0,
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Ord for Severity {
    fn cmp(&self, other: &Self) -> Ordering {
        self.rank().cmp(&other.rank())
    }
}

impl PartialOrd for Severity {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// A single problem found on a Kubernetes object.
///
/// `messages` is ordered: the problem statement comes first, followed by
/// remediation lines (advice, an optional preamble, an optional literal
/// command).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Finding {
    /// Kind of the object examined (e.g., "Deployment").
    pub kind: String,
    /// Name of the offending object.
    pub name: String,
    /// Namespace of the offending object.
    pub namespace: String,
    /// API version of the object (e.g., "apps/v1").
    pub api_version: String,
    /// How serious the problem is.
    pub severity: Severity,
    /// Problem statement followed by remediation lines.
    pub messages: Vec<String>,
}

impl Finding {
    /// Create a finding with the given problem statement and no actions.
    pub fn new(
        kind: impl Into<String>,
        namespace: impl Into<String>,
        name: impl Into<String>,
        problem: impl Into<String>,
    ) -> Self {
        Self {
            kind: kind.into(),
            name: name.into(),
            namespace: namespace.into(),
            api_version: String::new(),
            severity: Severity::default(),
            messages: vec![problem.into()],
        }
    }

    /// Set the API version.
    pub fn with_api_version(mut self, api_version: impl Into<String>) -> Self {
        self.api_version = api_version.into();
        self
    }

    /// Set the severity.
    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    /// Append a remediation line.
    pub fn with_action(mut self, action: impl Into<String>) -> Self {
        self.messages.push(action.into());
        self
    }

    /// The problem statement.
    pub fn problem(&self) -> &str {
        self.messages.first().map(String::as_str).unwrap_or_default()
    }

    /// Remediation lines, in order.
    pub fn actions(&self) -> &[String] {
        self.messages.get(1..).unwrap_or_default()
    }

    /// Identity of the finding within one run.
    pub fn key(&self) -> (&str, &str, &str) {
        (&self.kind, &self.namespace, &self.name)
    }

    /// `namespace/name` of the offending object.
    pub fn object_identifier(&self) -> String {
        format!("{}/{}", self.namespace, self.name)
    }
}

/// Findings produced by one analyzer in one run.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AnalyzerResult {
    /// Name of the analyzer that produced the findings.
    pub name: String,
    /// The findings, in no particular order.
    pub findings: Vec<Finding>,
}

impl AnalyzerResult {
    pub fn new(name: impl Into<String>, findings: Vec<Finding>) -> Self {
        Self {
            name: name.into(),
            findings,
        }
    }

    /// Whether the run found nothing.
    pub fn is_empty(&self) -> bool {
        self.findings.is_empty()
    }

    /// Highest severity among the findings.
    pub fn max_severity(&self) -> Option<Severity> {
        self.findings.iter().map(|f| f.severity).max()
    }

    /// Sort findings by namespace then name, for stable rendering.
    pub fn sort(&mut self) {
        self.findings
            .sort_by(|a, b| (&a.namespace, &a.name).cmp(&(&b.namespace, &b.name)));
    }
}
