use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};

use crate::report::model::ReviewResult;
use crate::report::render;

fn ensure_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
    }
    Ok(())
}

/// Write the full text report, creating parent directories as needed.
/// Overwrites any previous report at the same path.
pub fn write_report(path: &Path, result: &ReviewResult) -> Result<()> {
    ensure_parent(path)?;
    fs::write(path, render::render_text_report(result))
        .with_context(|| format!("failed to write report to {}", path.display()))
}

/// Append a Markdown summary block. Appending supports repeated
/// invocations within one CI run accumulating multiple summaries.
pub fn append_summary(path: &Path, summary: &str) -> Result<()> {
    ensure_parent(path)?;
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("failed to open summary at {}", path.display()))?;
    writeln!(file, "{summary}")
        .with_context(|| format!("failed to append summary to {}", path.display()))
}
