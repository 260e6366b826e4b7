//! Command-line interface for the sync-log reorg scanner.
//!
//! # Example
//!
//! ```bash
//! # Report reorgs with the default (legacy) rule
//! reorg-scan sync.log
//!
//! # Compare whole spans, order heights numerically, print a summary
//! reorg-scan --mode span --compare numeric --summary sync.log
//! ```
//!
//! Running without a file prints a usage line to stdout and exits normally.

use crate::config::Config;
use crate::error::{ScanError, ScanResult};
use crate::reorg::{Comparison, Variant};
use crate::scanner::{scan_file, ScanSummary};
use clap::Parser;
use colored::Colorize;
use std::ffi::OsString;
use std::path::PathBuf;
use tracing::{debug, info};

/// Sync log reorg scanner
#[derive(Parser, Debug)]
#[command(name = "reorg-scan")]
#[command(about = "Report sync height reorganizations found in a vault sync log", long_about = None)]
#[command(version)]
struct Cli {
    /// Sync log to scan
    #[arg(allow_hyphen_values = true)]
    filename: Option<PathBuf>,

    /// Anything after the log file is ignored
    #[arg(hide = true, num_args = 0..)]
    _extra: Vec<OsString>,

    /// Detection mode: `legacy` (digits, skips 0) or `span` (full match)
    #[arg(short, long)]
    mode: Option<Variant>,

    /// Height ordering: `lexical` (string) or `numeric`
    #[arg(short, long)]
    compare: Option<Comparison>,

    /// Print a summary line to stderr after the scan
    #[arg(short, long)]
    summary: bool,
}

/// Parse the process arguments and run the scan.
///
/// # Errors
///
/// Returns an error if:
/// - Configuration loading fails
/// - The log file cannot be read
/// - Writing to stdout fails
pub async fn run() -> ScanResult<()> {
    run_from(std::env::args_os()).await
}

/// Run the scanner against an explicit argument list.
///
/// The first item is the program name, as with [`std::env::args_os`].
///
/// # Errors
///
/// See [`run`].
pub async fn run_from<I, T>(args: I) -> ScanResult<()>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let args: Vec<OsString> = args.into_iter().map(Into::into).collect();
    let program = args
        .first()
        .map_or_else(|| "reorg-scan".into(), |p| p.to_string_lossy().into_owned());

    let cli = Cli::parse_from(args);

    match scan_command(cli).await {
        Err(ScanError::Usage) => {
            println!("{}", usage_line(&program));
            Ok(())
        }
        other => other,
    }
}

/// Execute a scan with the parsed arguments.
async fn scan_command(cli: Cli) -> ScanResult<()> {
    let filename = cli.filename.ok_or(ScanError::Usage)?;

    let config = Config::from_env()?.with_overrides(cli.mode, cli.compare);
    debug!(
        file = %filename.display(),
        mode = %config.variant(),
        compare = %config.comparison(),
        "Starting scan"
    );

    let mut stdout = tokio::io::stdout();
    let summary = scan_file(&filename, &mut stdout, config.scan_options()).await?;

    info!(file = %filename.display(), reorgs = summary.reorgs, "Finished scanning");

    if cli.summary {
        eprintln!("{}", format_summary(&summary));
    }

    Ok(())
}

/// Usage text printed when no filename is supplied.
fn usage_line(program: &str) -> String {
    format!("# Usage: {program} <filename>")
}

/// Colored one-line summary for stderr.
fn format_summary(summary: &ScanSummary) -> String {
    let reorgs = summary.reorgs.to_string();
    let reorgs = if summary.reorgs == 0 {
        reorgs.green().bold()
    } else {
        reorgs.red().bold()
    };

    format!(
        "{} lines: {} | sync heights: {} | reorgs: {}",
        "Scanned".cyan(),
        summary.lines_read.to_string().yellow(),
        summary.heights_matched.to_string().yellow(),
        reorgs
    )
}
