use crate::analyzer::context::Interrupted;
use crate::cluster::ClusterError;
use thiserror::Error;

/// Errors returned by analyzers.
///
/// Every failure of one analysis run surfaces as exactly one of these; no
/// partial findings accompany an error.
#[derive(Error, Debug)]
pub enum AnalyzerError {
    #[error("failed to list {kind}: {source}")]
    ListFailed {
        kind: &'static str,
        #[source]
        source: ClusterError,
    },

    #[error("failed to list {kind}: analysis cancelled")]
    Cancelled { kind: &'static str },

    #[error("failed to list {kind}: deadline exceeded")]
    DeadlineExceeded { kind: &'static str },

    #[error("analyzer '{0}' was built without a cluster client")]
    MissingClient(&'static str),

    #[error("invalid option '{key}': {message}")]
    InvalidOption { key: String, message: String },
}

impl AnalyzerError {
    /// Attribute a context interruption to the read of `kind`.
    pub fn interrupted(kind: &'static str, reason: Interrupted) -> Self {
        match reason {
            Interrupted::Cancelled => Self::Cancelled { kind },
            Interrupted::DeadlineExceeded => Self::DeadlineExceeded { kind },
        }
    }
}

/// Errors raised by the command-line host around the analyzers.
#[derive(Error, Debug)]
pub enum HostError {
    #[error(transparent)]
    Analyzer(#[from] AnalyzerError),

    #[error("Cluster error: {0}")]
    Cluster(#[from] ClusterError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Failed to write output: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {message}")]
    ReadFailed { path: String, message: String },

    #[error("Failed to parse config file {path}: {message}")]
    ParsingFailed { path: String, message: String },

    #[error("Invalid configuration value: {0}")]
    InvalidValue(String),
}

pub type Result<T, E = AnalyzerError> = std::result::Result<T, E>;
