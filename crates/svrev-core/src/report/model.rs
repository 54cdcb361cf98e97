use crate::rules::catalog::Severity;

/// One rule infraction reported by the remote service for a specific
/// line of a submitted file. Built once during parsing, never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// Filename as resolved from the response; empty when the service
    /// omitted its `Файл:` line.
    pub file: String,
    pub rule: String,
    pub line: u32,
    pub message: String,
    pub severity: Severity,
    pub doc: Option<String>,
}

/// Violation counts per severity, recomputed on demand from the
/// violation list so they can never drift out of sync.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Stats {
    pub errors: usize,
    pub warnings: usize,
}

/// Aggregate outcome of one review run.
///
/// All three collections keep insertion order: `analyzed_files` in
/// processing order, `violations` in file order then response order,
/// and `raw_responses` in the order responses arrived. Raw responses
/// are keyed by the resolved filename; a later response with the same
/// resolved name (including the empty one) overwrites the earlier
/// entry.
#[derive(Debug, Clone, Default)]
pub struct ReviewResult {
    pub analyzed_files: Vec<String>,
    pub violations: Vec<Violation>,
    raw_responses: Vec<(String, String)>,
}

impl ReviewResult {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store the raw response text under its resolved filename,
    /// overwriting any earlier entry with the same key.
    pub fn record_response(&mut self, resolved: &str, body: String) {
        if let Some(entry) = self.raw_responses.iter_mut().find(|(k, _)| k == resolved) {
            entry.1 = body;
        } else {
            self.raw_responses.push((resolved.to_string(), body));
        }
    }

    /// Raw responses in insertion order, for report rendering.
    pub fn raw_responses(&self) -> &[(String, String)] {
        &self.raw_responses
    }

    pub fn stats(&self) -> Stats {
        let mut stats = Stats::default();
        for violation in &self.violations {
            match violation.severity {
                Severity::Error => stats.errors += 1,
                Severity::Warning => stats.warnings += 1,
            }
        }
        stats
    }

    pub fn has_errors(&self) -> bool {
        self.violations
            .iter()
            .any(|v| v.severity == Severity::Error)
    }
}
