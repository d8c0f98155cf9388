//! Offline cluster reader over Kubernetes YAML manifests.
//!
//! Lets a host run analyzers against rendered manifests (`helm template`,
//! `kustomize build`, plain files) without a live cluster. Only Deployment
//! documents are read; everything else is skipped.

use super::{ClusterError, ClusterReader, DEFAULT_NAMESPACE, DeploymentSnapshot};
use async_trait::async_trait;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Cluster reader that lists Deployments found in manifest files.
///
/// Files are read on every call, so edits between runs are picked up.
#[derive(Debug, Clone)]
pub struct ManifestClusterReader {
    paths: Vec<PathBuf>,
}

impl ManifestClusterReader {
    /// Create a reader over files and/or directories.
    /// Directories are searched recursively for `.yaml` and `.yml` files.
    pub fn new<I, P>(paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Self {
            paths: paths.into_iter().map(Into::into).collect(),
        }
    }

    fn manifest_files(&self) -> Result<Vec<PathBuf>, ClusterError> {
        let mut files = Vec::new();

        for path in &self.paths {
            if path.is_dir() {
                for entry in walkdir::WalkDir::new(path)
                    .follow_links(true)
                    .sort_by_file_name()
                {
                    let entry = entry.map_err(|e| ClusterError::Manifest {
                        path: path.display().to_string(),
                        message: e.to_string(),
                    })?;
                    let ext = entry.path().extension().and_then(|e| e.to_str());
                    if entry.file_type().is_file() && matches!(ext, Some("yaml") | Some("yml")) {
                        files.push(entry.into_path());
                    }
                }
            } else {
                files.push(path.clone());
            }
        }

        Ok(files)
    }
}

#[async_trait]
impl ClusterReader for ManifestClusterReader {
    async fn list_deployments(&self) -> Result<Vec<DeploymentSnapshot>, ClusterError> {
        let mut deployments = Vec::new();

        for file in self.manifest_files()? {
            log::debug!("Reading manifests from {}", file.display());
            let content = tokio::fs::read_to_string(&file)
                .await
                .map_err(|e| ClusterError::Read {
                    path: file.display().to_string(),
                    source: e,
                })?;
            deployments.extend(parse_deployments(&content, &file)?);
        }

        log::debug!("Found {} deployments in manifests", deployments.len());
        Ok(deployments)
    }
}

/// Parse every Deployment out of a (possibly multi-document) YAML string.
pub fn parse_deployments(
    content: &str,
    path: &Path,
) -> Result<Vec<DeploymentSnapshot>, ClusterError> {
    let mut deployments = Vec::new();

    for (index, document) in serde_yaml::Deserializer::from_str(content).enumerate() {
        let value = serde_yaml::Value::deserialize(document).map_err(|e| {
            ClusterError::Manifest {
                path: path.display().to_string(),
                message: format!("document {}: {}", index + 1, e),
            }
        })?;

        if let Some(snapshot) = parse_deployment(&value) {
            deployments.push(snapshot);
        }
    }

    Ok(deployments)
}

fn parse_deployment(value: &serde_yaml::Value) -> Option<DeploymentSnapshot> {
    if get_str(value, "kind")? != "Deployment" {
        return None;
    }

    let metadata = value.get("metadata")?;
    let name = get_str(metadata, "name")?;
    let namespace = get_str(metadata, "namespace").unwrap_or(DEFAULT_NAMESPACE);

    let mut snapshot = DeploymentSnapshot::new(namespace, name);
    if let Some(api_version) = get_str(value, "apiVersion") {
        snapshot.api_version = api_version.to_string();
    }
    snapshot.replicas = value
        .get("spec")
        .and_then(|spec| spec.get("replicas"))
        .and_then(serde_yaml::Value::as_i64)
        .and_then(|n| i32::try_from(n).ok());

    Some(snapshot)
}

fn get_str<'a>(value: &'a serde_yaml::Value, key: &str) -> Option<&'a str> {
    value.get(key)?.as_str()
}
