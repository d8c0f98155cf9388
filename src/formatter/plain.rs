//! Plain text formatter.

use crate::analyzer::{AnalyzerResult, Severity};
use colored::Colorize;

/// Format an analyzer result as plain text.
pub fn format(result: &AnalyzerResult, colors: bool) -> String {
    let mut output = String::new();

    for finding in &result.findings {
        let severity = severity_label(finding.severity, colors);
        output.push_str(&format!(
            "[{}] {} {}: {}\n",
            severity,
            finding.kind,
            finding.object_identifier(),
            finding.problem(),
        ));

        for action in finding.actions() {
            output.push_str(&format!("    {}\n", action));
        }
    }

    if result.findings.is_empty() {
        output.push_str(&format!("{}: no issues found.\n", result.name));
    } else {
        output.push_str(&format!(
            "\n{}: found {} issue(s).\n",
            result.name,
            result.findings.len()
        ));
    }

    output
}

fn severity_label(severity: Severity, colors: bool) -> String {
    if !colors {
        return severity.to_string();
    }
    match severity {
        Severity::Error => severity.as_str().red().bold().to_string(),
        Severity::Warning => severity.as_str().yellow().bold().to_string(),
        Severity::Info => severity.as_str().cyan().bold().to_string(),
    }
}
