//! CLI entry point for the sync-log reorg scanner.
//!
//! # Layer Separation
//!
//! - **main.rs**: Async runtime + tracing initialization only
//! - **CLI module**: Argument parsing, config merge, output
//! - **Core modules**: `reorg` (detection) and `scanner` (file pass)
//!
//! All errors bubble up with context via `ScanResult<T>`.

use reorg_scan::{cli, observability};
use tracing::error;

/// Entry point for the reorg scanner.
///
/// Logging is controlled by environment variables:
/// - `RUST_LOG`: filter directives (e.g. `reorg_scan=debug`)
/// - `LOG_JSON`: JSON diagnostics on stderr (`"true"` or `"false"`)
/// - `LOG_FILE`: also write JSON diagnostics to a daily-rotated file
#[tokio::main(flavor = "current_thread")]
async fn main() {
    let log_level = std::env::var("RUST_LOG").ok();
    let log_file = std::env::var("LOG_FILE").ok().map(std::path::PathBuf::from);
    let json_output = std::env::var("LOG_JSON")
        .unwrap_or_else(|_| "false".to_string())
        .parse::<bool>()
        .unwrap_or(false);

    let guard = match observability::init_tracing(log_level, log_file, json_output) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize tracing: {e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = cli::run().await {
        error!(error = %e, "Scan failed");
        eprintln!("Error: {e}");
        drop(guard);
        std::process::exit(1);
    }
}
