use async_trait::async_trait;
use ha_analyzer::analyzer::{
    AnalysisContext, Analyzer, AnalyzerConfig, Finding, SingleReplicaAnalyzer,
};
use ha_analyzer::cluster::{
    ClusterError, ClusterReader, DeploymentSnapshot, ManifestClusterReader, StaticClusterReader,
};
use ha_analyzer::error::AnalyzerError;
use proptest::prelude::*;
use std::collections::BTreeSet;
use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

// Integration tests for the single-replica analyzer through its public
// contract, the way a host framework drives it.

fn static_analyzer(deployments: Vec<DeploymentSnapshot>) -> SingleReplicaAnalyzer {
    SingleReplicaAnalyzer::new(Arc::new(StaticClusterReader::new(deployments)))
}

fn keys(findings: &[Finding]) -> BTreeSet<(String, String, String)> {
    findings
        .iter()
        .map(|f| (f.kind.clone(), f.namespace.clone(), f.name.clone()))
        .collect()
}

/// Reader that blocks until cancelled and counts calls.
#[derive(Default)]
struct HangingReader {
    calls: AtomicUsize,
}

#[async_trait]
impl ClusterReader for HangingReader {
    async fn list_deployments(&self) -> Result<Vec<DeploymentSnapshot>, ClusterError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        std::future::pending().await
    }
}

struct UnreachableCluster;

#[async_trait]
impl ClusterReader for UnreachableCluster {
    async fn list_deployments(&self) -> Result<Vec<DeploymentSnapshot>, ClusterError> {
        Err(ClusterError::List(kube::Error::Service(
            "error trying to connect: tcp connect error: Connection refused".into(),
        )))
    }
}

#[tokio::test]
async fn test_single_deployment_with_one_replica() {
    let analyzer = static_analyzer(vec![DeploymentSnapshot::new("prod", "api").with_replicas(1)]);
    let findings = analyzer.analyze(&AnalysisContext::new()).await.unwrap();

    assert_eq!(findings.len(), 1);
    assert_eq!(findings[0].kind, "Deployment");
    assert_eq!(findings[0].name, "api");
    assert_eq!(findings[0].namespace, "prod");
    assert_eq!(
        findings[0].messages,
        [
            "Deployment api in namespace prod has only one replica",
            "Consider increasing the number of replicas for deployment 'api' to ensure high availability",
            "You can use the following command to scale the deployment:",
            "kubectl scale deployment api --replicas=3 -n prod",
        ]
    );
}

#[tokio::test]
async fn test_scaled_and_unset_deployments_produce_nothing() {
    let analyzer = static_analyzer(vec![
        DeploymentSnapshot::new("default", "a").with_replicas(3),
        DeploymentSnapshot::new("default", "b"),
    ]);
    let findings = analyzer.analyze(&AnalysisContext::new()).await.unwrap();
    assert!(findings.is_empty());
}

#[tokio::test]
async fn test_two_single_replica_deployments_independent_of_order() {
    let a = DeploymentSnapshot::new("prod", "api").with_replicas(1);
    let b = DeploymentSnapshot::new("staging", "worker").with_replicas(1);

    let forward = static_analyzer(vec![a.clone(), b.clone()])
        .analyze(&AnalysisContext::new())
        .await
        .unwrap();
    let backward = static_analyzer(vec![b, a])
        .analyze(&AnalysisContext::new())
        .await
        .unwrap();

    assert_eq!(forward.len(), 2);
    assert_eq!(keys(&forward), keys(&backward));
}

#[tokio::test]
async fn test_repeated_analysis_is_idempotent() {
    let analyzer = static_analyzer(vec![
        DeploymentSnapshot::new("prod", "api").with_replicas(1),
        DeploymentSnapshot::new("prod", "web").with_replicas(2),
        DeploymentSnapshot::new("batch", "cron").with_replicas(1),
    ]);
    let ctx = AnalysisContext::new();

    let first = analyzer.analyze(&ctx).await.unwrap();
    let second = analyzer.analyze(&ctx).await.unwrap();

    assert_eq!(keys(&first), keys(&second));
    for finding in &second {
        let earlier = first.iter().find(|f| f.key() == finding.key()).unwrap();
        assert_eq!(earlier.messages, finding.messages);
    }
}

#[tokio::test]
async fn test_concurrent_runs_share_one_reader() {
    let reader: Arc<dyn ClusterReader> = Arc::new(StaticClusterReader::new(vec![
        DeploymentSnapshot::new("prod", "api").with_replicas(1),
    ]));
    let analyzer = Arc::new(SingleReplicaAnalyzer::new(reader));

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let analyzer = Arc::clone(&analyzer);
            tokio::spawn(async move { analyzer.analyze(&AnalysisContext::new()).await })
        })
        .collect();

    for handle in handles {
        let findings = handle.await.unwrap().unwrap();
        assert_eq!(findings.len(), 1);
    }
}

#[tokio::test]
async fn test_upstream_failure_is_attributed() {
    let analyzer = SingleReplicaAnalyzer::new(Arc::new(UnreachableCluster));
    let err = analyzer.analyze(&AnalysisContext::new()).await.unwrap_err();

    let text = err.to_string();
    assert!(text.contains("failed to list deployments"), "{}", text);
    assert!(text.contains("Connection refused"), "{}", text);
}

#[tokio::test]
async fn test_cancellation_while_listing_returns_error() {
    let reader = Arc::new(HangingReader::default());
    let analyzer = SingleReplicaAnalyzer::new(reader.clone());
    let ctx = AnalysisContext::new();
    let cancel = ctx.cancel_handle();

    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(20)).await;
        cancel.cancel();
    });

    let err = analyzer.analyze(&ctx).await.unwrap_err();
    assert!(matches!(err, AnalyzerError::Cancelled { .. }));
    assert!(err.to_string().contains("failed to list deployments"));
    assert_eq!(reader.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test(start_paused = true)]
async fn test_deadline_while_listing_returns_error() {
    let analyzer = SingleReplicaAnalyzer::new(Arc::new(HangingReader::default()));
    let ctx = AnalysisContext::new().with_timeout(Duration::from_secs(30));

    let err = analyzer.analyze(&ctx).await.unwrap_err();
    assert!(matches!(err, AnalyzerError::DeadlineExceeded { .. }));
}

#[tokio::test]
async fn test_configure_with_any_options_is_noop() {
    let deployments = vec![
        DeploymentSnapshot::new("prod", "api").with_replicas(1),
        DeploymentSnapshot::new("prod", "web"),
    ];
    let ctx = AnalysisContext::new();
    let expected = static_analyzer(deployments.clone()).analyze(&ctx).await.unwrap();

    let mut analyzer = static_analyzer(deployments);
    let options: AnalyzerConfig = [("minReplicas", "2"), ("namespace", "prod")]
        .into_iter()
        .collect();
    analyzer.configure(&ctx, &options).await.unwrap();

    assert_eq!(analyzer.analyze(&ctx).await.unwrap(), expected);
}

#[tokio::test]
async fn test_host_holds_analyzers_as_trait_objects() {
    let analyzers: Vec<Box<dyn Analyzer>> = vec![Box::new(static_analyzer(vec![
        DeploymentSnapshot::new("prod", "api").with_replicas(1),
    ]))];

    let ctx = AnalysisContext::new();
    for analyzer in &analyzers {
        let result = analyzer.run(&ctx).await.unwrap();
        assert_eq!(result.name, "single-replica");
        assert_eq!(result.findings.len(), 1);
    }
}

#[tokio::test]
async fn test_manifest_fixtures() {
    let fixtures = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/manifests");
    let analyzer = SingleReplicaAnalyzer::new(Arc::new(ManifestClusterReader::new([fixtures])));

    let findings = analyzer.analyze(&AnalysisContext::new()).await.unwrap();

    let ids: BTreeSet<String> = findings.iter().map(Finding::object_identifier).collect();
    assert_eq!(
        ids,
        BTreeSet::from(["prod/api".to_string(), "default/worker".to_string()])
    );
}

fn snapshot_strategy() -> impl Strategy<Value = DeploymentSnapshot> {
    (
        "[a-z]{1,8}",
        "[a-z][a-z0-9-]{0,12}",
        proptest::option::of(-1i32..6),
    )
        .prop_map(|(namespace, name, replicas)| {
            let mut snapshot = DeploymentSnapshot::new(namespace, name);
            snapshot.replicas = replicas;
            snapshot
        })
}

proptest! {
    #[test]
    fn prop_findings_partition_deployments(
        deployments in proptest::collection::vec(snapshot_strategy(), 0..20)
    ) {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        let findings = runtime
            .block_on(static_analyzer(deployments.clone()).analyze(&AnalysisContext::new()))
            .unwrap();

        let expected = deployments.iter().filter(|d| d.replicas == Some(1)).count();
        prop_assert_eq!(findings.len(), expected);

        for finding in &findings {
            let flagged = deployments.iter().any(|d| {
                d.replicas == Some(1) && d.name == finding.name && d.namespace == finding.namespace
            });
            prop_assert!(flagged, "unexpected finding {}", finding.object_identifier());
            prop_assert_eq!(finding.messages.len(), 4);
        }
    }
}
