//! Live cluster reader backed by the Kubernetes API.
//!
//! # Prerequisites
//!
//! - Valid kubeconfig (uses default context or specified context)
//! - RBAC permission to list deployments cluster-wide
//!
//! # Example
//!
//! ```rust,ignore
//! use ha_analyzer::cluster::{ClusterReader, KubeClusterReader};
//!
//! let reader = KubeClusterReader::new().await?;
//! for deployment in reader.list_deployments().await? {
//!     println!("{}/{}: {:?}", deployment.namespace, deployment.name, deployment.replicas);
//! }
//! ```

use super::{ClusterError, ClusterReader, DeploymentSnapshot};
use async_trait::async_trait;
use k8s_openapi::api::apps::v1::Deployment;
use kube::{
    Client, Config,
    api::{Api, ListParams},
};

/// Kubernetes API cluster reader.
#[derive(Clone)]
pub struct KubeClusterReader {
    client: Client,
}

impl KubeClusterReader {
    /// Create a reader using the default kubeconfig (or in-cluster config).
    pub async fn new() -> Result<Self, ClusterError> {
        let config = Config::infer().await?;
        let client = Client::try_from(config)?;
        log::debug!("Connected to Kubernetes API at {}", client.default_namespace());
        Ok(Self { client })
    }

    /// Create a reader for a specific kubeconfig context.
    pub async fn with_context(context: &str) -> Result<Self, ClusterError> {
        let kubeconfig = kube::config::Kubeconfig::read()?;
        let config = Config::from_custom_kubeconfig(
            kubeconfig,
            &kube::config::KubeConfigOptions {
                context: Some(context.to_string()),
                ..Default::default()
            },
        )
        .await?;
        let client = Client::try_from(config)?;
        log::debug!("Connected to Kubernetes context '{}'", context);
        Ok(Self { client })
    }

    /// Get the current context name.
    pub fn current_context() -> Result<String, ClusterError> {
        let kubeconfig = kube::config::Kubeconfig::read()?;
        Ok(kubeconfig
            .current_context
            .unwrap_or_else(|| "default".to_string()))
    }

    /// List available contexts.
    pub fn list_contexts() -> Result<Vec<String>, ClusterError> {
        let kubeconfig = kube::config::Kubeconfig::read()?;
        Ok(kubeconfig.contexts.into_iter().map(|c| c.name).collect())
    }
}

#[async_trait]
impl ClusterReader for KubeClusterReader {
    async fn list_deployments(&self) -> Result<Vec<DeploymentSnapshot>, ClusterError> {
        let deployments: Api<Deployment> = Api::all(self.client.clone());

        log::debug!("Listing deployments in all namespaces");
        let list = deployments
            .list(&ListParams::default())
            .await
            .map_err(ClusterError::List)?;
        log::debug!("Listed {} deployments", list.items.len());

        Ok(list.items.iter().map(DeploymentSnapshot::from).collect())
    }
}
