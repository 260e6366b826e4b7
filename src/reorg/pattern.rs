//! Sync-height extraction from raw log lines.

use regex::Regex;
use std::sync::LazyLock;

/// Label the sync tool prints in front of every sync height.
pub const SYNC_HEIGHT_LABEL: &str = "Sync height: ";

/// Matches `Sync height: <digits>` at the very end of a line.
///
/// Only the suffix matters: timestamps or other fields before the label are
/// ignored. `Best height: <n>` lines and lines with trailing text after the
/// digits do not match.
#[allow(clippy::expect_used)]
static SYNC_HEIGHT_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!("{}([0-9]+)$", regex::escape(SYNC_HEIGHT_LABEL)))
        .expect("Invalid sync height regex")
});

/// A sync height pulled out of a single log line.
///
/// Both views borrow from the line: `span` is the whole match including the
/// label, `digits` is just the height.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyncHeight<'a> {
    span: &'a str,
    digits: &'a str,
}

impl<'a> SyncHeight<'a> {
    /// The full matched text, e.g. `Sync height: 1042`.
    #[must_use]
    pub const fn span(&self) -> &'a str {
        self.span
    }

    /// The digit run only, e.g. `1042`. Leading zeros are preserved.
    #[must_use]
    pub const fn digits(&self) -> &'a str {
        self.digits
    }
}

/// Extract the sync height from a log line.
///
/// The line must not contain its trailing newline. Returns `None` for every
/// line that does not end in `Sync height: <digits>`.
///
/// # Example
///
/// ```
/// use reorg_scan::reorg::parse_sync_height;
///
/// let height = parse_sync_height("2016-03-01 12:00:00 Sync height: 401023").unwrap();
/// assert_eq!(height.digits(), "401023");
/// assert_eq!(height.span(), "Sync height: 401023");
///
/// assert!(parse_sync_height("Best height: 401023").is_none());
/// ```
#[must_use]
pub fn parse_sync_height(line: &str) -> Option<SyncHeight<'_>> {
    let caps = SYNC_HEIGHT_REGEX.captures(line)?;
    let span = caps.get(0)?.as_str();
    let digits = caps.get(1)?.as_str();
    Some(SyncHeight { span, digits })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bare_line() {
        let height = parse_sync_height("Sync height: 7");
        assert_eq!(
            height,
            Some(SyncHeight {
                span: "Sync height: 7",
                digits: "7"
            })
        );
    }

    #[test]
    fn test_prefixed_line() {
        let height = parse_sync_height("[2016-03-01 12:00:00] vault: Sync height: 0042");
        assert!(height.is_some());
        if let Some(h) = height {
            assert_eq!(h.digits(), "0042");
            assert_eq!(h.span(), "Sync height: 0042");
        }
    }

    #[test]
    fn test_requires_end_anchor() {
        assert!(parse_sync_height("Sync height: 12 (catching up)").is_none());
        assert!(parse_sync_height("Sync height: 12 ").is_none());
    }

    #[test]
    fn test_requires_digits() {
        assert!(parse_sync_height("Sync height: ").is_none());
        assert!(parse_sync_height("Sync height: abc").is_none());
        assert!(parse_sync_height("Sync height: -5").is_none());
    }

    #[test]
    fn test_other_labels_ignored() {
        assert!(parse_sync_height("Best height: 400000").is_none());
        assert!(parse_sync_height("sync height: 400000").is_none());
        assert!(parse_sync_height("").is_none());
    }

    #[test]
    fn test_last_occurrence_wins() {
        let height = parse_sync_height("Sync height: 1 then Sync height: 2");
        assert_eq!(height.map(|h| h.digits()), Some("2"));
    }

    #[test]
    fn test_pattern_built_from_label() {
        assert_eq!(
            SYNC_HEIGHT_REGEX.as_str(),
            r"Sync height: ([0-9]+)$"
        );
    }

    #[test]
    fn test_label_constant_matches_pattern() {
        let line = format!("{SYNC_HEIGHT_LABEL}99");
        assert_eq!(parse_sync_height(&line).map(|h| h.span()), Some(line.as_str()));
    }
}
