//! Single-replica Deployment check.
//!
//! A Deployment that explicitly asks for exactly one replica has no
//! redundancy: a node drain, eviction or crash takes the workload down.
//! Deployments with no replica count set are not flagged, since the desired
//! count is unknown from the object alone.

use super::{AnalysisContext, Analyzer, AnalyzerConfig, Finding, Severity};
use crate::cluster::{ClusterReader, DeploymentSnapshot};
use crate::error::{AnalyzerError, Result};
use async_trait::async_trait;
use std::sync::Arc;

/// Analyzer name.
pub const NAME: &str = "single-replica";

/// Replica count suggested in the remediation command.
pub const RECOMMENDED_REPLICAS: i32 = 3;

const KIND: &str = "Deployment";
const RESOURCE: &str = "deployments";

/// Flags Deployments whose desired replica count is exactly one.
#[derive(Clone)]
pub struct SingleReplicaAnalyzer {
    client: Arc<dyn ClusterReader>,
}

impl SingleReplicaAnalyzer {
    /// Create the analyzer over a cluster reader.
    pub fn new(client: Arc<dyn ClusterReader>) -> Self {
        Self { client }
    }

    /// Builder for hosts that obtain the cluster reader after construction.
    pub fn builder() -> SingleReplicaAnalyzerBuilder {
        SingleReplicaAnalyzerBuilder::default()
    }
}

#[async_trait]
impl Analyzer for SingleReplicaAnalyzer {
    fn name(&self) -> &str {
        NAME
    }

    async fn configure(&mut self, _ctx: &AnalysisContext, _config: &AnalyzerConfig) -> Result<()> {
        Ok(())
    }

    async fn analyze(&self, ctx: &AnalysisContext) -> Result<Vec<Finding>> {
        let deployments = ctx
            .run(self.client.list_deployments())
            .await
            .map_err(|reason| AnalyzerError::interrupted(RESOURCE, reason))?
            .map_err(|source| AnalyzerError::ListFailed {
                kind: RESOURCE,
                source,
            })?;

        Ok(find_single_replica(&deployments))
    }
}

/// Build one finding per Deployment whose replica count is exactly one.
pub fn find_single_replica(deployments: &[DeploymentSnapshot]) -> Vec<Finding> {
    deployments
        .iter()
        .filter(|d| d.replicas == Some(1))
        .map(single_replica_finding)
        .collect()
}

fn single_replica_finding(deployment: &DeploymentSnapshot) -> Finding {
    let name = &deployment.name;
    let namespace = &deployment.namespace;

    Finding::new(
        KIND,
        namespace,
        name,
        format!(
            "Deployment {} in namespace {} has only one replica",
            name, namespace
        ),
    )
    .with_api_version(&deployment.api_version)
    .with_severity(Severity::Warning)
    .with_action(format!(
        "Consider increasing the number of replicas for deployment '{}' to ensure high availability",
        name
    ))
    .with_action("You can use the following command to scale the deployment:")
    .with_action(format!(
        "kubectl scale deployment {} --replicas={} -n {}",
        name, RECOMMENDED_REPLICAS, namespace
    ))
}

/// Builds a [`SingleReplicaAnalyzer`] once a cluster reader is available.
#[derive(Default)]
pub struct SingleReplicaAnalyzerBuilder {
    client: Option<Arc<dyn ClusterReader>>,
}

impl SingleReplicaAnalyzerBuilder {
    /// Set the cluster reader.
    pub fn client(mut self, client: Arc<dyn ClusterReader>) -> Self {
        self.client = Some(client);
        self
    }

    /// Finish building. Fails if no cluster reader was set.
    pub fn build(self) -> Result<SingleReplicaAnalyzer> {
        let client = self.client.ok_or(AnalyzerError::MissingClient(NAME))?;
        Ok(SingleReplicaAnalyzer::new(client))
    }
}
