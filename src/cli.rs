use crate::formatter::OutputFormat;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "ha-ctl")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Find Kubernetes Deployments that run without redundancy")]
#[command(long_about = "Runs the single-replica analyzer against a live cluster or rendered manifests and reports every Deployment that asks for exactly one replica, with the command to scale it.")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Enable verbose logging (-v for info, -vv for debug, -vvv for trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Silence log output (findings and errors are still printed)
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the single-replica analyzer
    Analyze {
        /// Read Deployments from manifest files or directories instead of a cluster
        #[arg(short, long, value_name = "PATH", num_args = 1..)]
        manifests: Vec<PathBuf>,

        /// Kubeconfig context to use (defaults to the current context)
        #[arg(long, value_name = "NAME")]
        context: Option<String>,

        /// Give up after this many seconds
        #[arg(long, value_name = "SECONDS", value_parser = clap::value_parser!(u64).range(1..))]
        timeout: Option<u64>,

        /// Output format
        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,

        /// Exit with a non-zero code when findings exist
        #[arg(long)]
        fail_on_findings: bool,
    },

    /// List the analyzers this binary provides
    Analyzers,

    /// List kubeconfig contexts
    Contexts,
}

impl Cli {
    /// Initialize logging based on verbosity level
    pub fn init_logging(&self) {
        if self.quiet {
            return;
        }

        let level = match self.verbose {
            0 => log::LevelFilter::Warn,
            1 => log::LevelFilter::Info,
            2 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        };

        env_logger::Builder::from_default_env()
            .filter_level(level)
            .init();
    }
}
