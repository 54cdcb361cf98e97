//! Run orchestration: upload → parse → classify per candidate file,
//! accumulated into a single run-scoped `ReviewResult`.
//!
//! Files are processed strictly sequentially in input order. That trades
//! throughput for deterministic, reproducible report and annotation
//! ordering across runs; candidate sets are CI-changeset-sized, so the
//! serial cost is acceptable.
//!
//! A transport failure on any file aborts the whole run and discards
//! results accumulated so far; no partial report is written.

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::config::{is_excluded, ReviewConfig};
use crate::report::model::ReviewResult;
use crate::response::parse_response;
use crate::upload::{upload_with_retry, Clock, RetryExhausted, Transport, UploadRequest};

#[derive(Debug, Error)]
pub enum ReviewError {
    /// No endpoint from CLI, config, or environment. Raised before any
    /// file is read or sent, so misconfiguration never causes a partial
    /// network run.
    #[error("no API endpoint configured (set --api-url, the api_url config key, or SVREV_API_URL)")]
    MissingEndpoint,

    #[error("failed to read {file}")]
    Read {
        file: String,
        #[source]
        source: std::io::Error,
    },

    /// All retry attempts for one file failed; fatal to the whole run.
    #[error("failed to upload {file}")]
    Transport {
        file: String,
        #[source]
        source: RetryExhausted,
    },
}

fn base_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string_lossy().into_owned())
}

/// Run the review over `candidates`, uploading each existing,
/// non-excluded file and aggregating the parsed responses.
///
/// An empty filtered list is success: an empty result and zero network
/// calls.
pub fn run_review(
    candidates: &[PathBuf],
    config: &ReviewConfig,
    transport: &dyn Transport,
    clock: &dyn Clock,
) -> Result<ReviewResult, ReviewError> {
    let api_url = config
        .api_url
        .as_deref()
        .ok_or(ReviewError::MissingEndpoint)?;

    let files: Vec<&PathBuf> = candidates
        .iter()
        .filter(|path| path.exists() && !is_excluded(path, &config.exclude))
        .collect();

    let mut result = ReviewResult::new();
    if files.is_empty() {
        return Ok(result);
    }

    for path in files {
        let bytes = std::fs::read(path).map_err(|source| ReviewError::Read {
            file: path.display().to_string(),
            source,
        })?;
        let file_name = base_name(path);
        let request = UploadRequest {
            url: api_url,
            file_name: &file_name,
            bytes: &bytes,
            params: &config.params,
        };
        let body = upload_with_retry(transport, clock, &request, config.retries).map_err(
            |source| ReviewError::Transport {
                file: path.display().to_string(),
                source,
            },
        )?;

        let (resolved, violations) = parse_response(&body, &config.rules);
        let display_name = if resolved.is_empty() {
            path.display().to_string()
        } else {
            resolved.clone()
        };
        result.analyzed_files.push(display_name);
        result.record_response(&resolved, body);
        result.violations.extend(violations);
    }

    Ok(result)
}
