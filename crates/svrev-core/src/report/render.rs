//! Renderers for the three review outputs.
//!
//! Each renderer is a pure function of the review result:
//! - a plain-text report with every raw service response,
//! - one machine-readable annotation line per violation,
//! - a Markdown summary for the CI step summary.
//!
//! The annotation grammar is a contract with the consuming CI system
//! and must not change.

use std::collections::HashMap;

use crate::report::model::{ReviewResult, Violation};
use crate::rules::catalog::Severity;

/// Render the full text report: counts, then every raw response in
/// arrival order under a `===== <name> =====` delimiter.
pub fn render_text_report(result: &ReviewResult) -> String {
    let stats = result.stats();
    let mut lines: Vec<String> = Vec::new();
    lines.push(format!("Files analyzed: {}", result.analyzed_files.len()));
    lines.push(format!(
        "Critical: {}, warnings: {}",
        stats.errors, stats.warnings
    ));
    lines.push(String::new());
    for (name, raw) in result.raw_responses() {
        lines.push(format!("===== {name} ====="));
        lines.push(raw.trim_end().to_string());
        lines.push(String::new());
    }
    lines.join("\n")
}

/// Render one CI annotation line per violation:
/// `::error file=<file>,line=<line>,title=<rule>::<message>`.
pub fn render_annotations(violations: &[Violation]) -> Vec<String> {
    violations
        .iter()
        .map(|v| {
            let severity = match v.severity {
                Severity::Error => "error",
                Severity::Warning => "warning",
            };
            format!(
                "::{severity} file={},line={},title={}::{}",
                v.file, v.line, v.rule, v.message
            )
        })
        .collect()
}

/// Render the Markdown summary: header, bullet counts, and a rule table
/// when violations exist.
///
/// Documentation link precedence per violation: its own `doc`, then
/// `doc_links[rule]`, then `doc_links["default"]`.
pub fn render_markdown_summary(
    result: &ReviewResult,
    doc_links: &HashMap<String, String>,
) -> String {
    let stats = result.stats();
    let mut lines: Vec<String> = vec![
        "### SystemVerilog naming review".to_string(),
        String::new(),
        format!("- Files analyzed: **{}**", result.analyzed_files.len()),
        format!("- Critical violations: **{}**", stats.errors),
        format!("- Warnings: **{}**", stats.warnings),
        String::new(),
    ];

    if !result.violations.is_empty() {
        lines.push("| Rule | Severity | Docs |".to_string());
        lines.push("|------|----------|------|".to_string());
        for violation in &result.violations {
            let doc = violation
                .doc
                .clone()
                .or_else(|| doc_links.get(&violation.rule).cloned())
                .or_else(|| doc_links.get("default").cloned());
            let doc_cell = doc.map(|d| format!("[docs]({d})")).unwrap_or_default();
            let severity = match violation.severity {
                Severity::Error => "Critical",
                Severity::Warning => "Warning",
            };
            lines.push(format!("| `{}` | {severity} | {doc_cell} |", violation.rule));
        }
        lines.push(String::new());
    }

    if let Some(overview) = doc_links.get("overview").or_else(|| doc_links.get("default")) {
        lines.push(format!("More about the rules: {overview}"));
    }

    lines.join("\n")
}
