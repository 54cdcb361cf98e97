//! Severity classification for rule identifiers.
//!
//! The remote service reports rule names but not severities; this module
//! decides how severe each reported rule is.
//!
//! The policy is deterministic and total:
//!
//!   - An exact (case-sensitive) entry in the rule map is authoritative
//!     and overrides everything else.
//!   - Otherwise, a rule name containing `CRIT` or `ERROR`
//!     (case-insensitive) is treated as an error.
//!   - Otherwise the rule is a warning with no documentation link.
//!
//! No input is ever rejected; classification cannot fail.

use crate::rules::catalog::{RuleInfo, RuleMap, Severity};

/// Resolve the severity and documentation link for a reported rule name.
pub fn classify(rule_name: &str, rules: &RuleMap) -> RuleInfo {
    if let Some(info) = rules.get(rule_name) {
        return info.clone();
    }
    let upper = rule_name.to_uppercase();
    if upper.contains("CRIT") || upper.contains("ERROR") {
        return RuleInfo {
            severity: Severity::Error,
            doc: None,
        };
    }
    RuleInfo::default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rule_map(entries: &[(&str, Severity, Option<&str>)]) -> RuleMap {
        entries
            .iter()
            .map(|(name, sev, doc)| {
                (
                    name.to_string(),
                    RuleInfo {
                        severity: *sev,
                        doc: doc.map(str::to_string),
                    },
                )
            })
            .collect()
    }

    #[test]
    fn exact_match_is_authoritative() {
        let rules = rule_map(&[("NAMING_MODULE", Severity::Error, Some("https://docs/naming"))]);
        let info = classify("NAMING_MODULE", &rules);
        assert_eq!(info.severity, Severity::Error);
        assert_eq!(info.doc.as_deref(), Some("https://docs/naming"));
    }

    #[test]
    fn explicit_entry_wins_over_heuristic() {
        // The name satisfies the CRIT substring heuristic, but the map
        // downgrades it to a warning; the map must win.
        let rules = rule_map(&[("CRIT_STYLE", Severity::Warning, None)]);
        let info = classify("CRIT_STYLE", &rules);
        assert_eq!(info.severity, Severity::Warning);
    }

    #[test]
    fn crit_substring_maps_to_error() {
        let rules = RuleMap::new();
        let info = classify("CRITICAL_WIDTH_MISMATCH", &rules);
        assert_eq!(info.severity, Severity::Error);
        assert!(info.doc.is_none());
    }

    #[test]
    fn error_substring_is_case_insensitive() {
        let rules = RuleMap::new();
        assert_eq!(classify("bus_error_check", &rules).severity, Severity::Error);
        assert_eq!(classify("critical_path", &rules).severity, Severity::Error);
    }

    #[test]
    fn unknown_rule_defaults_to_warning() {
        let rules = RuleMap::new();
        let info = classify("NAMING_SIGNAL", &rules);
        assert_eq!(info.severity, Severity::Warning);
        assert!(info.doc.is_none());
    }

    #[test]
    fn lookup_is_case_sensitive() {
        let rules = rule_map(&[("NAMING_MODULE", Severity::Error, None)]);
        // Lower-cased variant misses the map and has no CRIT/ERROR substring.
        assert_eq!(classify("naming_module", &rules).severity, Severity::Warning);
    }

    #[test]
    fn classification_is_deterministic() {
        let rules = rule_map(&[("A", Severity::Error, None)]);
        assert_eq!(classify("A", &rules), classify("A", &rules));
        assert_eq!(classify("B", &rules), classify("B", &rules));
    }
}
