use std::path::PathBuf;

use clap::Parser;

#[derive(Debug, Parser)]
#[command(
    name = "svrev",
    version,
    about = "CI naming review for SystemVerilog sources"
)]
pub struct Args {
    /// URL of the /analysis/naming/upload endpoint
    #[arg(long)]
    pub api_url: Option<String>,

    /// Path to the JSON configuration file
    #[arg(long, default_value = ".sv-review.json")]
    pub config: PathBuf,

    /// File with candidate paths to review, one per line
    #[arg(long)]
    pub files_list: PathBuf,

    /// HTTP timeout in seconds (unset: config value, else 120)
    #[arg(long)]
    pub timeout: Option<f64>,

    /// Upload retry count (unset: config value, else 3)
    #[arg(long)]
    pub retries: Option<u32>,

    /// Where to write the full text report
    #[arg(long, default_value = "artifacts/sv-review-report.txt")]
    pub report_path: PathBuf,

    /// Where to append the Markdown summary
    /// (unset: $GITHUB_STEP_SUMMARY, else artifacts/sv-review-summary.md)
    #[arg(long)]
    pub summary_path: Option<PathBuf>,
}
