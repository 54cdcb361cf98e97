//! Configuration loading and resolution.
//!
//! The JSON config file, caller-supplied overrides, and an environment
//! fallback for the endpoint URL are folded into one immutable
//! `ReviewConfig` before the run starts. Nothing in the pipeline reads
//! ambient state after that.
//!
//! Timeout and retries use explicit was-set sentinels: an override is
//! applied only when the caller actually provided a value, so
//! "explicitly set to the default" and "not set" stay distinguishable.

use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use glob::Pattern;
use serde::Deserialize;

use crate::rules::catalog::{RuleInfo, RuleMap, Severity};
use crate::upload::UploadParams;

pub const DEFAULT_TIMEOUT_SECS: f64 = 120.0;
pub const DEFAULT_RETRIES: u32 = 3;

/// Raw shape of the JSON configuration file. Every key is optional.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ConfigFile {
    pub rules: HashMap<String, RuleEntry>,
    pub exclude: Vec<String>,
    pub api_url: Option<String>,
    pub max_depth: Option<u32>,
    pub max_nodes: Option<u32>,
    pub include_tokens: Option<bool>,
    pub timeout: Option<f64>,
    pub retries: Option<u32>,
    pub documentation: HashMap<String, String>,
}

/// One entry under `rules`. Severity arrives as free text; anything
/// other than `error` degrades to `warning` rather than failing the run.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RuleEntry {
    pub severity: Option<String>,
    pub doc: Option<String>,
}

/// Caller-supplied values that take precedence over the config file.
/// `env_api_url` ranks below the file, mirroring CLI > config > env.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub api_url: Option<String>,
    pub env_api_url: Option<String>,
    pub timeout_secs: Option<f64>,
    pub retries: Option<u32>,
}

/// Effective, immutable configuration threaded through the run.
#[derive(Debug, Clone)]
pub struct ReviewConfig {
    pub api_url: Option<String>,
    pub rules: RuleMap,
    pub exclude: Vec<String>,
    pub params: UploadParams,
    pub timeout: Duration,
    pub retries: u32,
    pub documentation: HashMap<String, String>,
}

/// Load the config file. A missing file is an empty configuration;
/// unreadable or invalid JSON is an error.
pub fn load_config(path: &Path) -> Result<ConfigFile> {
    if !path.exists() {
        return Ok(ConfigFile::default());
    }
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    serde_json::from_str(&text)
        .with_context(|| format!("config {} is not valid JSON", path.display()))
}

/// Build the immutable rule table from config entries.
pub fn build_rule_map(config: &ConfigFile) -> RuleMap {
    config
        .rules
        .iter()
        .map(|(name, entry)| {
            let severity = match entry.severity.as_deref().map(str::to_lowercase).as_deref() {
                Some("error") => Severity::Error,
                _ => Severity::Warning,
            };
            (
                name.clone(),
                RuleInfo {
                    severity,
                    doc: entry.doc.clone(),
                },
            )
        })
        .collect()
}

/// Glob match against the `/`-normalized relative path. Patterns that
/// fail to parse match nothing.
pub fn is_excluded(path: &Path, patterns: &[String]) -> bool {
    let rel = path.to_string_lossy().replace('\\', "/");
    patterns
        .iter()
        .filter_map(|p| Pattern::new(p).ok())
        .any(|p| p.matches(&rel))
}

impl ReviewConfig {
    /// Fold the config file and overrides into the effective run
    /// configuration. The endpoint may still be unresolved here; the
    /// orchestrator rejects that before touching any file.
    pub fn resolve(file: ConfigFile, overrides: Overrides) -> Self {
        let rules = build_rule_map(&file);
        let defaults = UploadParams::default();
        let params = UploadParams {
            max_depth: file.max_depth.unwrap_or(defaults.max_depth),
            max_nodes: file.max_nodes.unwrap_or(defaults.max_nodes),
            include_tokens: file.include_tokens.unwrap_or(defaults.include_tokens),
        };
        let timeout_secs = overrides
            .timeout_secs
            .or(file.timeout)
            .unwrap_or(DEFAULT_TIMEOUT_SECS);
        let retries = overrides
            .retries
            .or(file.retries)
            .unwrap_or(DEFAULT_RETRIES);
        let api_url = overrides
            .api_url
            .or(file.api_url)
            .or(overrides.env_api_url);

        Self {
            api_url,
            rules,
            exclude: file.exclude,
            params,
            timeout: Duration::from_secs_f64(timeout_secs),
            retries,
            documentation: file.documentation,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn config_from_json(json: &str) -> ConfigFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(json.as_bytes()).unwrap();
        file.flush().unwrap();
        load_config(file.path()).unwrap()
    }

    #[test]
    fn missing_config_file_is_empty_config() {
        let config = load_config(Path::new("/nonexistent/.sv-review.json")).unwrap();
        assert!(config.rules.is_empty());
        assert!(config.api_url.is_none());
    }

    #[test]
    fn invalid_json_is_an_error() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"{ not json").unwrap();
        file.flush().unwrap();
        assert!(load_config(file.path()).is_err());
    }

    #[test]
    fn rule_map_parses_severities_and_docs() {
        let config = config_from_json(
            r#"{
                "rules": {
                    "NAMING_MODULE": {"severity": "ERROR", "doc": "https://docs/naming"},
                    "NAMING_SIGNAL": {"severity": "warning"},
                    "MYSTERY": {"severity": "fatal"}
                }
            }"#,
        );
        let rules = build_rule_map(&config);

        assert_eq!(rules["NAMING_MODULE"].severity, Severity::Error);
        assert_eq!(
            rules["NAMING_MODULE"].doc.as_deref(),
            Some("https://docs/naming")
        );
        assert_eq!(rules["NAMING_SIGNAL"].severity, Severity::Warning);
        // Unknown severities degrade to warning instead of failing.
        assert_eq!(rules["MYSTERY"].severity, Severity::Warning);
    }

    #[test]
    fn exclude_patterns_match_normalized_paths() {
        let patterns = vec!["vendor/**".to_string(), "*.gen.sv".to_string()];
        assert!(is_excluded(Path::new("vendor/ip/core.sv"), &patterns));
        assert!(is_excluded(Path::new("top.gen.sv"), &patterns));
        assert!(!is_excluded(Path::new("rtl/core.sv"), &patterns));
    }

    #[test]
    fn invalid_exclude_pattern_matches_nothing() {
        let patterns = vec!["[".to_string()];
        assert!(!is_excluded(Path::new("anything.sv"), &patterns));
    }

    #[test]
    fn resolve_prefers_override_then_config_then_default() {
        let file = ConfigFile {
            timeout: Some(45.0),
            retries: Some(7),
            ..Default::default()
        };
        let resolved = ReviewConfig::resolve(
            file,
            Overrides {
                timeout_secs: Some(10.0),
                ..Default::default()
            },
        );
        assert_eq!(resolved.timeout, Duration::from_secs_f64(10.0));
        // No retries override: the config value wins.
        assert_eq!(resolved.retries, 7);
    }

    #[test]
    fn resolve_falls_back_to_defaults() {
        let resolved = ReviewConfig::resolve(ConfigFile::default(), Overrides::default());
        assert_eq!(resolved.timeout, Duration::from_secs_f64(DEFAULT_TIMEOUT_SECS));
        assert_eq!(resolved.retries, DEFAULT_RETRIES);
        assert_eq!(resolved.params, UploadParams::default());
        assert!(resolved.api_url.is_none());
    }

    #[test]
    fn override_set_to_default_value_still_wins() {
        // The sentinel distinguishes "explicitly 120" from "unset".
        let file = ConfigFile {
            timeout: Some(45.0),
            ..Default::default()
        };
        let resolved = ReviewConfig::resolve(
            file,
            Overrides {
                timeout_secs: Some(DEFAULT_TIMEOUT_SECS),
                ..Default::default()
            },
        );
        assert_eq!(resolved.timeout, Duration::from_secs_f64(DEFAULT_TIMEOUT_SECS));
    }

    #[test]
    fn api_url_precedence_is_cli_config_env() {
        let file = ConfigFile {
            api_url: Some("http://from-config".into()),
            ..Default::default()
        };
        let resolved = ReviewConfig::resolve(
            file.clone(),
            Overrides {
                api_url: Some("http://from-cli".into()),
                env_api_url: Some("http://from-env".into()),
                ..Default::default()
            },
        );
        assert_eq!(resolved.api_url.as_deref(), Some("http://from-cli"));

        let resolved = ReviewConfig::resolve(
            file,
            Overrides {
                env_api_url: Some("http://from-env".into()),
                ..Default::default()
            },
        );
        assert_eq!(resolved.api_url.as_deref(), Some("http://from-config"));

        let resolved = ReviewConfig::resolve(
            ConfigFile::default(),
            Overrides {
                env_api_url: Some("http://from-env".into()),
                ..Default::default()
            },
        );
        assert_eq!(resolved.api_url.as_deref(), Some("http://from-env"));
    }

    #[test]
    fn upload_params_come_from_config() {
        let config = config_from_json(
            r#"{"max_depth": 100, "max_nodes": 500, "include_tokens": true}"#,
        );
        let resolved = ReviewConfig::resolve(config, Overrides::default());
        assert_eq!(resolved.params.max_depth, 100);
        assert_eq!(resolved.params.max_nodes, 500);
        assert!(resolved.params.include_tokens);
    }
}
