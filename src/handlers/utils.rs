use crate::analyzer::{AnalyzerResult, Severity, single_replica};
use crate::cluster::KubeClusterReader;
use crate::error::HostError;

/// Analyzers shipped in this binary, with a one-line description.
pub const ANALYZERS: &[(&str, &str)] = &[(
    single_replica::NAME,
    "Deployments that request exactly one replica",
)];

pub fn handle_analyzers() -> Result<(), HostError> {
    for (name, description) in ANALYZERS {
        println!("{:<20} {}", name, description);
    }
    Ok(())
}

pub fn handle_contexts() -> Result<(), HostError> {
    let current = KubeClusterReader::current_context().ok();
    for context in KubeClusterReader::list_contexts()? {
        let marker = if current.as_deref() == Some(context.as_str()) {
            "*"
        } else {
            " "
        };
        println!("{} {}", marker, context);
    }
    Ok(())
}

/// Process exit code for a result when `--fail-on-findings` is set.
pub fn exit_code(result: &AnalyzerResult) -> Option<i32> {
    match result.max_severity()? {
        Severity::Error => Some(1),
        Severity::Warning => Some(2),
        Severity::Info => Some(3),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::Finding;

    #[test]
    fn test_exit_code_follows_max_severity() {
        assert_eq!(exit_code(&AnalyzerResult::new("a", Vec::new())), None);

        let warning = AnalyzerResult::new(
            "a",
            vec![Finding::new("Deployment", "prod", "api", "one replica")],
        );
        assert_eq!(exit_code(&warning), Some(2));
    }

    #[test]
    fn test_analyzer_listing_contains_single_replica() {
        assert!(ANALYZERS.iter().any(|(name, _)| *name == "single-replica"));
    }
}
