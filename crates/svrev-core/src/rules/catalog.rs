use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Severity of a naming violation. Only two levels exist in the wire
/// protocol; `error` is what fails a CI run.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Warning,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Warning => write!(f, "warning"),
            Severity::Error => write!(f, "error"),
        }
    }
}

/// Per-rule metadata from configuration: how severe the rule is and
/// where its documentation lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleInfo {
    pub severity: Severity,
    pub doc: Option<String>,
}

impl Default for RuleInfo {
    fn default() -> Self {
        Self {
            severity: Severity::Warning,
            doc: None,
        }
    }
}

/// Rule table built once from configuration and held immutable for the
/// run's duration.
pub type RuleMap = HashMap<String, RuleInfo>;
