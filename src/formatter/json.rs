//! JSON formatter.

use crate::analyzer::{AnalyzerResult, Finding};
use serde::Serialize;

/// Format an analyzer result as JSON.
pub fn format(result: &AnalyzerResult) -> Result<String, serde_json::Error> {
    let output = JsonOutput::from(result);
    Ok(serde_json::to_string_pretty(&output)? + "\n")
}

#[derive(Serialize)]
struct JsonOutput<'a> {
    analyzer: &'a str,
    findings: &'a [Finding],
    summary: JsonSummary,
}

#[derive(Serialize)]
struct JsonSummary {
    total_findings: usize,
    passed: bool,
}

impl<'a> From<&'a AnalyzerResult> for JsonOutput<'a> {
    fn from(result: &'a AnalyzerResult) -> Self {
        Self {
            analyzer: &result.name,
            findings: &result.findings,
            summary: JsonSummary {
                total_findings: result.findings.len(),
                passed: result.findings.is_empty(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_shape() {
        let result = AnalyzerResult::new(
            "single-replica",
            vec![Finding::new("Deployment", "prod", "api", "only one replica").with_action("scale it")],
        );

        let value: serde_json::Value = serde_json::from_str(&format(&result).unwrap()).unwrap();
        assert_eq!(value["analyzer"], "single-replica");
        assert_eq!(value["findings"][0]["name"], "api");
        assert_eq!(value["findings"][0]["severity"], "warning");
        assert_eq!(value["findings"][0]["messages"][1], "scale it");
        assert_eq!(value["summary"]["total_findings"], 1);
        assert_eq!(value["summary"]["passed"], false);
    }
}
