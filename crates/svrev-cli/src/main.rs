use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;

use svrev_core::config::{self, Overrides, ReviewConfig};
use svrev_core::report::model::ReviewResult;
use svrev_core::report::{render, write};
use svrev_core::review::run_review;
use svrev_core::upload::{HttpTransport, SystemClock};
use svrev_core::DIAG_PREFIX;

mod args;

/// Exit codes: 0 = clean or nothing to do, 1 = error-severity
/// violations found, 2 = configuration/transport/IO failure.
fn main() {
    let args = args::Args::parse();
    std::process::exit(run(&args));
}

fn run(args: &args::Args) -> i32 {
    let outcome = match review(args) {
        Ok(outcome) => outcome,
        Err(err) => {
            eprintln!("{DIAG_PREFIX} error: {err:#}");
            return 2;
        }
    };

    if outcome.analyzed_files.is_empty() {
        println!("{DIAG_PREFIX} no files to analyze.");
        return 0;
    }
    if outcome.has_errors() {
        println!("{DIAG_PREFIX} critical violations found.");
        return 1;
    }
    0
}

fn review(args: &args::Args) -> Result<ReviewResult> {
    let file = config::load_config(&args.config)?;
    let resolved = ReviewConfig::resolve(
        file,
        Overrides {
            api_url: args.api_url.clone(),
            env_api_url: std::env::var("SVREV_API_URL").ok(),
            timeout_secs: args.timeout,
            retries: args.retries,
        },
    );

    let candidates = load_candidates(&args.files_list)?;

    eprintln!(
        "{DIAG_PREFIX} using timeout {}s, {} retries",
        resolved.timeout.as_secs_f64(),
        resolved.retries
    );

    let transport = HttpTransport::new(resolved.timeout)
        .map_err(|e| anyhow::anyhow!("failed to build HTTP client: {e}"))?;
    let result = run_review(&candidates, &resolved, &transport, &SystemClock)?;

    // Nothing survived filtering: succeed without writing any output.
    if result.analyzed_files.is_empty() {
        return Ok(result);
    }

    write::write_report(&args.report_path, &result)?;

    let summary = render::render_markdown_summary(&result, &resolved.documentation);
    let summary_path = summary_destination(args);
    write::append_summary(&summary_path, &summary)?;

    for line in render::render_annotations(&result.violations) {
        println!("{line}");
    }

    Ok(result)
}

fn load_candidates(path: &Path) -> Result<Vec<PathBuf>> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read files list {}", path.display()))?;
    Ok(text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(PathBuf::from)
        .collect())
}

fn summary_destination(args: &args::Args) -> PathBuf {
    args.summary_path.clone().unwrap_or_else(|| {
        std::env::var("GITHUB_STEP_SUMMARY")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("artifacts/sv-review-summary.md"))
    })
}
