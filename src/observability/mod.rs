//! Observability and structured logging infrastructure.
//!
//! Diagnostics go through the tracing framework and are always written to
//! **stderr** (and optionally a file). Stdout is reserved for reorg notices so
//! the scanner's report can be piped or diffed unchanged.
//!
//! # Environment Configuration
//!
//! ```bash
//! # See every matched height
//! RUST_LOG=reorg_scan=debug reorg-scan sync.log
//!
//! # JSON diagnostics for log aggregation
//! LOG_JSON=true reorg-scan sync.log
//!
//! # Also write diagnostics to a daily-rotated file
//! LOG_FILE=./logs/reorg-scan.log reorg-scan sync.log
//! ```

use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// Filter used when neither `RUST_LOG` nor an explicit level is given.
///
/// Keeps a normal run silent on stderr.
pub const DEFAULT_FILTER: &str = "reorg_scan=warn,warn";

/// Initialize the tracing subscriber.
///
/// # Arguments
///
/// * `log_level` - Optional filter directive (e.g. `"debug"`). `RUST_LOG`
///   takes precedence when set.
/// * `log_file` - Optional file path; enables a JSON file layer with daily
///   rotation.
/// * `json_output` - Emit JSON on stderr instead of the compact human format.
///
/// Returns the file writer's guard when a file layer is installed. Keep it
/// alive until exit or buffered lines are lost.
///
/// # Errors
///
/// Returns an error if:
/// - The log file's parent directory cannot be created
/// - A global subscriber is already installed
pub fn init_tracing(
    log_level: Option<String>,
    log_file: Option<PathBuf>,
    json_output: bool,
) -> Result<Option<WorkerGuard>, Box<dyn std::error::Error>> {
    let env_filter = if let Ok(filter) = std::env::var("RUST_LOG") {
        EnvFilter::new(filter)
    } else if let Some(level) = log_level {
        EnvFilter::new(level)
    } else {
        EnvFilter::new(DEFAULT_FILTER)
    };

    let console_layer = if json_output {
        fmt::layer()
            .json()
            .with_writer(std::io::stderr)
            .with_current_span(true)
            .with_span_list(true)
            .with_target(true)
            .boxed()
    } else {
        fmt::layer()
            .compact()
            .with_writer(std::io::stderr)
            .with_target(true)
            .boxed()
    };

    let (file_layer, guard) = if let Some(ref path) = log_file {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        let file_appender = tracing_appender::rolling::daily(
            path.parent()
                .filter(|p| !p.as_os_str().is_empty())
                .unwrap_or_else(|| Path::new(".")),
            path.file_name()
                .unwrap_or_else(|| OsStr::new("reorg-scan.log")),
        );
        let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

        // File always uses JSON for structured log analysis
        let layer = fmt::layer()
            .json()
            .with_writer(non_blocking)
            .with_current_span(true)
            .with_span_list(true)
            .with_target(true)
            .with_file(true)
            .with_line_number(true)
            .boxed();

        (Some(layer), Some(guard))
    } else {
        (None, None)
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer)
        .with(file_layer)
        .try_init()?;

    info!(
        json_output,
        file_logging = log_file.is_some(),
        "Tracing initialized successfully"
    );

    Ok(guard)
}

/// Initialize tracing for tests, routed through the test harness.
///
/// View output with `cargo test -- --nocapture`.
#[cfg(test)]
pub fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .compact()
        .try_init();
}
