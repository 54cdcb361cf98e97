//! Decoder for the service's semi-structured text responses.
//!
//! The service answers in Russian-language plain text:
//!
//! ```text
//! Файл: core.sv
//! Обнаружено 2 нарушений (1 критических, 1 предупреждений)
//! 1. [NAMING_MODULE] строка 10: module name must be snake_case
//! 2. [NAMING_SIGNAL] строка 22: signal name too short
//! ```
//!
//! The grammar is deliberately permissive: lines that do not match are
//! skipped without error, so additive server-side format changes do not
//! break the pipeline. Malformed response text is never a failure.

use std::sync::LazyLock;

use regex::Regex;

use crate::report::model::Violation;
use crate::rules::catalog::RuleMap;
use crate::rules::classify::classify;

static FILE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^Файл:\s*(?P<filename>.+)$").unwrap());

static VIOLATION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^\s*\d+\.\s*\[(?P<rule>[^\]]+)\]\s*строка\s+(?P<line>\d+):\s*(?P<message>.+)$")
        .unwrap()
});

static SUMMARY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)Обнаружено\s+(?P<total>\d+)\s+нарушений\s*\((?P<critical>\d+)\s+критических,\s*(?P<warnings>\d+)\s+предупреждений\)",
    )
    .unwrap()
});

/// Counts announced by the service's own summary header. Informational
/// only; not required to match the parsed violation list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HeaderSummary {
    pub total: u32,
    pub critical: u32,
    pub warnings: u32,
}

/// Parse a service response into the resolved filename and its
/// violations, classifying each violation against `rules`.
///
/// The filename comes from the first `Файл:` line; if the service never
/// names the file, the resolved filename is empty (not an error).
pub fn parse_response(text: &str, rules: &RuleMap) -> (String, Vec<Violation>) {
    let lines: Vec<&str> = text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();

    let filename = lines
        .iter()
        .find_map(|line| FILE_RE.captures(line))
        .map(|caps| caps["filename"].to_string())
        .unwrap_or_default();

    let mut violations = Vec::new();
    for line in &lines {
        let Some(caps) = VIOLATION_RE.captures(line) else {
            continue;
        };
        // Reject zero and digit runs that overflow; the grammar promises
        // a positive line number.
        let Ok(line_no @ 1..) = caps["line"].parse::<u32>() else {
            continue;
        };
        let rule = caps["rule"].trim().to_string();
        let info = classify(&rule, rules);
        violations.push(Violation {
            file: filename.clone(),
            rule,
            line: line_no,
            message: caps["message"].trim().to_string(),
            severity: info.severity,
            doc: info.doc,
        });
    }

    (filename, violations)
}

/// Scan for the service's `Обнаружено …` header. Absence is not an
/// error; all counts default to zero.
pub fn summarize_header(text: &str) -> HeaderSummary {
    text.lines()
        .find_map(|line| SUMMARY_RE.captures(line.trim()))
        .map(|caps| HeaderSummary {
            total: caps["total"].parse().unwrap_or(0),
            critical: caps["critical"].parse().unwrap_or(0),
            warnings: caps["warnings"].parse().unwrap_or(0),
        })
        .unwrap_or_default()
}
