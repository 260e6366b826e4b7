//! Integration tests for sync-height reorg detection.
//!
//! These tests drive the public scanner and detector the way the binary does:
//! fixture logs are written to temporary files and scanned end to end.
//!
//! # Test Strategy
//!
//! 1. The documented scenarios for both detection modes
//! 2. String ordering across digit-count boundaries
//! 3. Realistic sync logs with interleaved noise
//! 4. Files that contain nothing to report

use std::io::Write;

use reorg_scan::error::ScanError;
use reorg_scan::reorg::{Comparison, ReorgDetector, Variant};
use reorg_scan::scanner::{scan_file, ScanOptions, ScanSummary};
use tempfile::NamedTempFile;

fn write_log(lines: &[&str]) -> eyre::Result<NamedTempFile> {
    let mut file = NamedTempFile::new()?;
    for line in lines {
        writeln!(file, "{line}")?;
    }
    file.flush()?;
    Ok(file)
}

async fn scan(lines: &[&str], options: ScanOptions) -> eyre::Result<(String, ScanSummary)> {
    let file = write_log(lines)?;
    let mut out = Vec::new();
    let summary = scan_file(file.path(), &mut out, options).await?;
    Ok((String::from_utf8(out)?, summary))
}

const LEGACY: ScanOptions = ScanOptions::new(Variant::Legacy, Comparison::Lexical);
const SPAN: ScanOptions = ScanOptions::new(Variant::Span, Comparison::Lexical);

/// Repeated height: the previous height is reported, once.
#[tokio::test]
async fn test_legacy_repeated_height() -> eyre::Result<()> {
    let (out, summary) = scan(
        &["Sync height: 1", "Sync height: 2", "Sync height: 2"],
        LEGACY,
    )
    .await?;

    assert_eq!(out, "Reorg at height 2\n");
    assert_eq!(summary.reorgs, 1);
    Ok(())
}

/// Height zero is never flagged in legacy mode.
#[tokio::test]
async fn test_legacy_zero_heights_suppressed() -> eyre::Result<()> {
    let (out, summary) = scan(&["Sync height: 0", "Sync height: 0"], LEGACY).await?;

    assert!(out.is_empty());
    assert_eq!(summary.heights_matched, 2);
    assert_eq!(summary.reorgs, 0);
    Ok(())
}

/// Span mode compares whole spans as strings and reports the current one.
#[tokio::test]
async fn test_span_digit_rollover() -> eyre::Result<()> {
    let (out, _) = scan(&["Sync height: 9", "Sync height: 10"], SPAN).await?;
    assert_eq!(out, "reorg at Sync height: 10\n");
    Ok(())
}

/// Legacy mode also flags 9 -> 10 under string ordering.
#[tokio::test]
async fn test_legacy_digit_rollover() -> eyre::Result<()> {
    let (out, _) = scan(&["Sync height: 9", "Sync height: 10"], LEGACY).await?;
    assert_eq!(out, "Reorg at height 9\n");
    Ok(())
}

/// Numeric ordering silences the rollover but still catches real drops.
#[tokio::test]
async fn test_numeric_ordering() -> eyre::Result<()> {
    let options = ScanOptions::new(Variant::Legacy, Comparison::Numeric);
    let (out, _) = scan(
        &[
            "Sync height: 9",
            "Sync height: 10",
            "Sync height: 11",
            "Sync height: 10",
        ],
        options,
    )
    .await?;

    assert_eq!(out, "Reorg at height 11\n");
    Ok(())
}

/// A realistic log: timestamps, best-height lines and other chatter.
#[tokio::test]
async fn test_sync_log_with_noise() -> eyre::Result<()> {
    let lines = [
        "Opening vault...",
        "Connecting to localhost:8333",
        "Best height: 402115",
        "2016-03-04 10:00:01 Sync height: 402110",
        "2016-03-04 10:00:02 Sync height: 402111",
        "Sync height: 402112 (stalled)",
        "2016-03-04 10:00:03 Sync height: 402112",
        "Best height: 402116",
        "2016-03-04 10:00:09 Sync height: 402109",
        "2016-03-04 10:00:10 Sync height: 402110",
        "2016-03-04 10:00:11 Sync height: 402113",
    ];

    let (out, summary) = scan(&lines, LEGACY).await?;
    assert_eq!(out, "Reorg at height 402112\n");
    assert_eq!(summary.lines_read, 11);
    assert_eq!(summary.heights_matched, 6);

    let (out, _) = scan(&lines, SPAN).await?;
    assert_eq!(out, "reorg at Sync height: 402109\n");
    Ok(())
}

/// Several reorgs are reported in file order.
#[tokio::test]
async fn test_multiple_reorgs_in_order() -> eyre::Result<()> {
    let (out, summary) = scan(
        &[
            "Sync height: 5",
            "Sync height: 4",
            "Sync height: 6",
            "Sync height: 3",
        ],
        LEGACY,
    )
    .await?;

    assert_eq!(out, "Reorg at height 5\nReorg at height 6\n");
    assert_eq!(summary.reorgs, 2);
    Ok(())
}

#[tokio::test]
async fn test_empty_file() -> eyre::Result<()> {
    let (out, summary) = scan(&[], LEGACY).await?;
    assert!(out.is_empty());
    assert_eq!(summary, ScanSummary::default());
    Ok(())
}

#[tokio::test]
async fn test_file_without_matches() -> eyre::Result<()> {
    let (out, summary) = scan(&["Best height: 1", "hello", ""], SPAN).await?;
    assert!(out.is_empty());
    assert_eq!(summary.lines_read, 3);
    assert_eq!(summary.heights_matched, 0);
    Ok(())
}

#[tokio::test]
async fn test_missing_file_is_file_access_error() -> eyre::Result<()> {
    let dir = tempfile::tempdir()?;
    let missing = dir.path().join("sync.log");

    let mut out = Vec::new();
    let result = scan_file(&missing, &mut out, LEGACY).await;

    assert!(matches!(result, Err(ScanError::FileAccess { .. })));
    Ok(())
}

/// A read that fails after the file opened still names the path.
#[cfg(unix)]
#[tokio::test]
async fn test_read_failure_reports_path() -> eyre::Result<()> {
    let dir = tempfile::tempdir()?;

    let mut out = Vec::new();
    let result = scan_file(dir.path(), &mut out, LEGACY).await;

    match result {
        Err(ScanError::FileAccess { path, .. }) => assert_eq!(path, dir.path()),
        other => eyre::bail!("expected a file access error, got {other:?}"),
    }
    assert!(out.is_empty());
    Ok(())
}

/// CRLF-terminated heights are not recognised.
#[tokio::test]
async fn test_crlf_lines_ignored() -> eyre::Result<()> {
    let (out, summary) = scan(&["Sync height: 2\r", "Sync height: 1\r"], LEGACY).await?;
    assert!(out.is_empty());
    assert_eq!(summary.heights_matched, 0);
    Ok(())
}

/// The detector agrees with the scanner line for line.
#[test]
fn test_detector_matches_scanner_rule() {
    let heights = ["3", "30", "4", "4", "0", "1"];
    let mut detector = ReorgDetector::new(Variant::Legacy, Comparison::Lexical);

    let notices: Vec<String> = heights
        .iter()
        .filter_map(|h| detector.observe_line(&format!("Sync height: {h}")))
        .map(|n| n.to_string())
        .collect();

    // "4" > "30" lexically; only the repeated 4 counts and the drop to "0"
    // is excluded.
    assert_eq!(notices, vec!["Reorg at height 4"]);
    assert_eq!(detector.reorg_count(), 1);
    assert_eq!(detector.previous(), Some("1"));
}
