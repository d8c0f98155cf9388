use crate::analyzer::{AnalysisContext, Analyzer, AnalyzerResult, SingleReplicaAnalyzer};
use crate::cluster::{ClusterReader, KubeClusterReader, ManifestClusterReader};
use crate::config::types::Config;
use crate::error::HostError;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

/// Options for one `analyze` invocation. Unset fields fall back to config.
#[derive(Debug, Clone, Default)]
pub struct AnalyzeOptions {
    pub manifests: Vec<PathBuf>,
    pub context: Option<String>,
    pub timeout: Option<Duration>,
}

/// Build the cluster reader the analyzer will use.
pub async fn build_reader(
    options: &AnalyzeOptions,
    config: &Config,
) -> Result<Arc<dyn ClusterReader>, HostError> {
    if !options.manifests.is_empty() {
        log::info!("Reading deployments from {} manifest path(s)", options.manifests.len());
        return Ok(Arc::new(ManifestClusterReader::new(options.manifests.iter().cloned())));
    }

    // Install rustls crypto provider (required for TLS connections to K8s API)
    let _ = rustls::crypto::ring::default_provider().install_default();

    let reader = match options.context.as_deref().or(config.context.as_deref()) {
        Some(context) => {
            log::info!("Connecting to Kubernetes context '{}'", context);
            KubeClusterReader::with_context(context).await?
        }
        None => {
            log::info!("Connecting to Kubernetes cluster (current context)");
            KubeClusterReader::new().await?
        }
    };
    Ok(Arc::new(reader))
}

/// Configure and run the single-replica analyzer once.
///
/// Ctrl-C cancels the run; a timeout from the options or config bounds it.
pub async fn handle_analyze(
    options: AnalyzeOptions,
    config: &Config,
) -> Result<AnalyzerResult, HostError> {
    let reader = build_reader(&options, config).await?;
    run_analyzer(SingleReplicaAnalyzer::new(reader), &options, config).await
}

/// Configure and run any analyzer with the host's cancellation and timeout.
pub async fn run_analyzer<A: Analyzer>(
    mut analyzer: A,
    options: &AnalyzeOptions,
    config: &Config,
) -> Result<AnalyzerResult, HostError> {
    let mut ctx = AnalysisContext::new();
    if let Some(timeout) = options.timeout.or(config.timeout()) {
        log::debug!("Analysis deadline set to {:?}", timeout);
        ctx = ctx.with_timeout(timeout);
    }

    let cancel = ctx.cancel_handle();
    let interrupt = tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            log::warn!("Interrupted, cancelling analysis");
            cancel.cancel();
        }
    });

    let analyzer_options = config.analyzer_options(analyzer.name());
    let outcome = match analyzer.configure(&ctx, &analyzer_options).await {
        Ok(()) => analyzer.run(&ctx).await,
        Err(e) => Err(e),
    };
    interrupt.abort();

    let result = outcome?;
    log::info!(
        "Analyzer '{}' reported {} finding(s)",
        result.name,
        result.findings.len()
    );
    Ok(result)
}
