pub mod config;
pub mod report;
pub mod response;
pub mod review;
pub mod rules;
pub mod upload;

/// Prefix used on every diagnostic line written to stderr.
/// Annotations on stdout never carry it.
pub const DIAG_PREFIX: &str = "[svrev]";
