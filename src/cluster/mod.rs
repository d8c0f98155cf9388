//! Read access to cluster workload state.
//!
//! Analyzers never talk to the Kubernetes API directly. They are handed a
//! [`ClusterReader`], which the host builds from a live client
//! ([`KubeClusterReader`]), from rendered manifests ([`ManifestClusterReader`])
//! or from fixed snapshots ([`StaticClusterReader`]).

pub mod live;
pub mod manifest;

use async_trait::async_trait;
use k8s_openapi::api::apps::v1::Deployment;
use serde::{Deserialize, Serialize};

pub use live::KubeClusterReader;
pub use manifest::ManifestClusterReader;

/// Namespace assumed for objects that do not declare one.
pub const DEFAULT_NAMESPACE: &str = "default";

/// Error type for cluster reads.
#[derive(Debug, thiserror::Error)]
pub enum ClusterError {
    #[error("Failed to create Kubernetes client: {0}")]
    Client(#[from] kube::Error),

    #[error("Failed to infer Kubernetes config: {0}")]
    Config(#[from] kube::config::InferConfigError),

    #[error("Failed to read kubeconfig: {0}")]
    Kubeconfig(#[from] kube::config::KubeconfigError),

    #[error("API request failed: {0}")]
    List(#[source] kube::Error),

    #[error("Invalid manifest {path}: {message}")]
    Manifest { path: String, message: String },

    #[error("Failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Read-only view of a Deployment at the time it was listed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeploymentSnapshot {
    pub name: String,
    pub namespace: String,
    /// Desired replica count. `None` when the spec leaves it unset.
    pub replicas: Option<i32>,
    pub api_version: String,
    pub kind: String,
}

impl DeploymentSnapshot {
    pub fn new(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            namespace: namespace.into(),
            replicas: None,
            api_version: "apps/v1".to_string(),
            kind: "Deployment".to_string(),
        }
    }

    /// Set the desired replica count.
    pub fn with_replicas(mut self, replicas: i32) -> Self {
        self.replicas = Some(replicas);
        self
    }
}

impl From<&Deployment> for DeploymentSnapshot {
    fn from(deployment: &Deployment) -> Self {
        let metadata = &deployment.metadata;
        Self {
            name: metadata.name.clone().unwrap_or_default(),
            namespace: metadata
                .namespace
                .clone()
                .unwrap_or_else(|| DEFAULT_NAMESPACE.to_string()),
            replicas: deployment.spec.as_ref().and_then(|spec| spec.replicas),
            api_version: "apps/v1".to_string(),
            kind: "Deployment".to_string(),
        }
    }
}

/// Capability for listing workload objects across all namespaces.
///
/// Implementations must be safe for concurrent reads; one reader is shared
/// by every analyzer a host runs.
#[async_trait]
pub trait ClusterReader: Send + Sync {
    /// List every Deployment in every namespace.
    async fn list_deployments(&self) -> Result<Vec<DeploymentSnapshot>, ClusterError>;
}

/// Reader over a fixed set of snapshots.
#[derive(Debug, Clone, Default)]
pub struct StaticClusterReader {
    deployments: Vec<DeploymentSnapshot>,
}

impl StaticClusterReader {
    pub fn new(deployments: Vec<DeploymentSnapshot>) -> Self {
        Self { deployments }
    }
}

#[async_trait]
impl ClusterReader for StaticClusterReader {
    async fn list_deployments(&self) -> Result<Vec<DeploymentSnapshot>, ClusterError> {
        Ok(self.deployments.clone())
    }
}
