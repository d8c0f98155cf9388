//! # HA Analyzer
//!
//! A Kubernetes analyzer that flags Deployments running with exactly one
//! replica, and the analyzer contract it implements.
//!
//! ## Features
//!
//! - **Analyzer contract**: [`analyzer::Analyzer`] trait with name, configure and analyze steps
//! - **Single-replica rule**: one warning per Deployment with `replicas: 1`, with a scale command
//! - **Cluster readers**: live Kubernetes API, rendered manifests, or in-memory snapshots
//! - **Cancellation**: every cluster read honors a cancel signal and deadline
//!
//! ## Example
//!
//! ```rust,no_run
//! use ha_analyzer::analyzer::{AnalysisContext, Analyzer, SingleReplicaAnalyzer};
//! use ha_analyzer::cluster::{DeploymentSnapshot, StaticClusterReader};
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), ha_analyzer::AnalyzerError> {
//! let reader = StaticClusterReader::new(vec![
//!     DeploymentSnapshot::new("prod", "api").with_replicas(1),
//! ]);
//! let analyzer = SingleReplicaAnalyzer::new(Arc::new(reader));
//!
//! for finding in analyzer.analyze(&AnalysisContext::new()).await? {
//!     println!("{}", finding.problem());
//! }
//! # Ok(())
//! # }
//! ```

pub mod analyzer;
pub mod cli;
pub mod cluster;
pub mod config;
pub mod error;
pub mod formatter;
pub mod handlers;

// Re-export commonly used types and functions
pub use analyzer::{AnalysisContext, Analyzer, AnalyzerConfig, AnalyzerResult, Finding, Severity};
pub use error::{AnalyzerError, HostError, Result};
use cli::Commands;

/// Execute one CLI command. Returns the process exit code to use.
pub async fn run_command(command: Commands, config: &config::types::Config) -> Result<i32, HostError> {
    match command {
        Commands::Analyze {
            manifests,
            context,
            timeout,
            format,
            fail_on_findings,
        } => {
            let options = handlers::AnalyzeOptions {
                manifests,
                context,
                timeout: timeout.map(std::time::Duration::from_secs),
            };
            let result = handlers::handle_analyze(options, config).await?;

            let format = format.unwrap_or(config.format);
            let colors = std::io::IsTerminal::is_terminal(&std::io::stdout());
            formatter::format_result(&result, format, colors)?;

            let code = if fail_on_findings {
                handlers::exit_code(&result).unwrap_or(0)
            } else {
                0
            };
            Ok(code)
        }
        Commands::Analyzers => handlers::handle_analyzers().map(|_| 0),
        Commands::Contexts => handlers::handle_contexts().map(|_| 0),
    }
}
