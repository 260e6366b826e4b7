//! Single-pass scan of a sync log.
//!
//! Reads the log line by line, feeds every line through a [`ReorgDetector`]
//! and writes each [`ReorgNotice`](crate::reorg::ReorgNotice) as one line of
//! text. Each read is awaited before its line is processed; nothing is spawned.
//!
//! Lines are read as raw bytes and decoded lossily, so binary junk elsewhere in
//! the log cannot abort a scan. Only the trailing `\n` is stripped before
//! matching, so CRLF-terminated lines never end in digits and are ignored.

use std::path::Path;

use tokio::fs::File;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tracing::{debug, info, instrument};

use crate::error::{ScanError, ScanResult};
use crate::reorg::{Comparison, ReorgDetector, Variant};

/// Detection settings for one scan.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanOptions {
    /// Detection rule
    pub variant: Variant,
    /// Ordering rule
    pub comparison: Comparison,
}

impl ScanOptions {
    /// Bundle a variant and comparison.
    #[must_use]
    pub const fn new(variant: Variant, comparison: Comparison) -> Self {
        Self {
            variant,
            comparison,
        }
    }
}

/// Counters collected over one scan.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanSummary {
    /// Lines read, matching or not
    pub lines_read: u64,
    /// Lines that ended in `Sync height: <digits>`
    pub heights_matched: u64,
    /// Notices written
    pub reorgs: u64,
}

/// Scan a log file and write one line per detected reorg to `out`.
///
/// # Errors
///
/// - [`ScanError::FileAccess`] if the file cannot be opened or a read fails
/// - [`ScanError::Output`] if writing to `out` fails
pub async fn scan_file<W>(
    path: impl AsRef<Path>,
    out: &mut W,
    options: ScanOptions,
) -> ScanResult<ScanSummary>
where
    W: AsyncWrite + Unpin,
{
    let path = path.as_ref();
    let file = File::open(path)
        .await
        .map_err(|e| ScanError::file_access(path, e))?;

    debug!(path = %path.display(), "Opened sync log");

    scan_reader(BufReader::new(file), out, options)
        .await
        .map_err(|e| match e {
            // Reader errors carry no path; attach it here.
            ScanError::FileAccess { source, .. } => ScanError::file_access(path, source),
            other => other,
        })
}

/// Scan any buffered reader and write one line per detected reorg to `out`.
///
/// `out` is flushed before returning.
///
/// # Errors
///
/// - [`ScanError::FileAccess`] if a read fails (the path is left empty)
/// - [`ScanError::Output`] if writing to `out` fails
#[instrument(skip_all, fields(mode = %options.variant, compare = %options.comparison))]
pub async fn scan_reader<R, W>(
    mut reader: R,
    out: &mut W,
    options: ScanOptions,
) -> ScanResult<ScanSummary>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut detector = ReorgDetector::new(options.variant, options.comparison);
    let mut summary = ScanSummary::default();
    let mut buf = Vec::new();

    loop {
        buf.clear();
        let read = reader
            .read_until(b'\n', &mut buf)
            .await
            .map_err(|e| ScanError::file_access("", e))?;
        if read == 0 {
            break;
        }
        summary.lines_read += 1;

        let line = String::from_utf8_lossy(strip_line_ending(&buf));
        let Some(height) = crate::reorg::parse_sync_height(&line) else {
            continue;
        };
        summary.heights_matched += 1;

        if let Some(notice) = detector.observe(&height) {
            debug!(line = summary.lines_read, %notice, "Reorg notice");
            out.write_all(format!("{notice}\n").as_bytes())
                .await
                .map_err(ScanError::output)?;
            summary.reorgs += 1;
        }
    }

    out.flush().await.map_err(ScanError::output)?;

    info!(
        lines_read = summary.lines_read,
        heights_matched = summary.heights_matched,
        reorgs = summary.reorgs,
        "Scan complete"
    );

    Ok(summary)
}

// Only `\n` is removed; a `\r` left before it keeps the line from matching.
fn strip_line_ending(line: &[u8]) -> &[u8] {
    line.strip_suffix(b"\n").unwrap_or(line)
}
