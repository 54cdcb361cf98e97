//! Upload client for the naming-analysis endpoint.
//!
//! One attempt is a multipart POST with a fixed field order: the binary
//! `file` part first, then `max_depth`, `max_nodes`, `include_tokens`
//! as plain form fields. Most servers do not care about the order, but
//! it is reproduced exactly for compatibility testing.
//!
//! Retrying is an explicit state machine around the `Transport` and
//! `Clock` traits so tests can drive it without sockets or real delays:
//! at most `retries + 1` attempts, with a capped exponential backoff
//! between attempts and never after the final failure.

use std::time::Duration;

use reqwest::blocking::multipart::{Form, Part};
use reqwest::blocking::Client;
use thiserror::Error;

use crate::DIAG_PREFIX;

/// Scalar form fields accompanying the uploaded file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadParams {
    pub max_depth: u32,
    pub max_nodes: u32,
    pub include_tokens: bool,
}

impl Default for UploadParams {
    fn default() -> Self {
        Self {
            max_depth: 300,
            max_nodes: 20_000,
            include_tokens: false,
        }
    }
}

/// One upload to perform. `file_name` is the base name sent as the
/// multipart filename; `bytes` is the artifact body.
#[derive(Debug, Clone)]
pub struct UploadRequest<'a> {
    pub url: &'a str,
    pub file_name: &'a str,
    pub bytes: &'a [u8],
    pub params: &'a UploadParams,
}

/// Failure of a single upload attempt. Both kinds are retryable.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TransportFailure {
    #[error("HTTP status {0}")]
    Status(u16),
    #[error("{0}")]
    Network(String),
}

/// All attempts for one file failed.
#[derive(Debug, Error)]
#[error("{attempts} attempts failed, last error: {last}")]
pub struct RetryExhausted {
    pub attempts: u32,
    pub last: TransportFailure,
}

/// A single upload attempt. Returns the response body verbatim on any
/// 2xx status; the body is never interpreted here.
pub trait Transport {
    fn send(&self, request: &UploadRequest<'_>) -> Result<String, TransportFailure>;
}

/// Sleep abstraction so retry timing is testable without real delays.
pub trait Clock {
    fn sleep(&self, duration: Duration);
}

/// Wall-clock implementation used outside tests.
pub struct SystemClock;

impl Clock for SystemClock {
    fn sleep(&self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

/// Real HTTP transport over a blocking reqwest client. The per-request
/// timeout is fixed at construction and applies to every attempt.
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub fn new(timeout: Duration) -> Result<Self, TransportFailure> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| TransportFailure::Network(e.to_string()))?;
        Ok(Self { client })
    }
}

impl Transport for HttpTransport {
    fn send(&self, request: &UploadRequest<'_>) -> Result<String, TransportFailure> {
        let file_part = Part::bytes(request.bytes.to_vec())
            .file_name(request.file_name.to_string())
            .mime_str("application/octet-stream")
            .map_err(|e| TransportFailure::Network(e.to_string()))?;

        // Field order is part of the wire contract: file first, then
        // the scalar fields, booleans lowercased.
        let form = Form::new()
            .part("file", file_part)
            .text("max_depth", request.params.max_depth.to_string())
            .text("max_nodes", request.params.max_nodes.to_string())
            .text("include_tokens", request.params.include_tokens.to_string());

        let response = self
            .client
            .post(request.url)
            .multipart(form)
            .send()
            .map_err(|e| TransportFailure::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(TransportFailure::Status(status.as_u16()));
        }
        response
            .text()
            .map_err(|e| TransportFailure::Network(e.to_string()))
    }
}

/// Backoff before the attempt following `attempt` (1-based): doubling,
/// capped at ten seconds.
fn backoff_delay(attempt: u32) -> Duration {
    Duration::from_secs(2u64.saturating_pow(attempt).min(10))
}

/// Upload with bounded retry: at most `retries + 1` attempts, sleeping
/// between attempts only. Each failed attempt emits one diagnostic line
/// on stderr.
pub fn upload_with_retry(
    transport: &dyn Transport,
    clock: &dyn Clock,
    request: &UploadRequest<'_>,
    retries: u32,
) -> Result<String, RetryExhausted> {
    let mut attempt = 0u32;
    loop {
        attempt += 1;
        match transport.send(request) {
            Ok(body) => return Ok(body),
            Err(failure) => {
                if attempt > retries {
                    return Err(RetryExhausted {
                        attempts: attempt,
                        last: failure,
                    });
                }
                let delay = backoff_delay(attempt);
                eprintln!(
                    "{DIAG_PREFIX} attempt {attempt} for {} failed ({failure}), retrying in {}s",
                    request.file_name,
                    delay.as_secs()
                );
                clock.sleep(delay);
            }
        }
    }
}
