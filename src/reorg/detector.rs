//! Sync-height reorg detection.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use tracing::{debug, info};

use super::pattern::{parse_sync_height, SyncHeight};

/// Which detection rule the scanner applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Variant {
    /// Compare digit runs only, never flag a height of `"0"`, and report the
    /// previous height: `Reorg at height <previous>`.
    #[default]
    Legacy,

    /// Compare the whole `Sync height: <n>` span with no exclusions and report
    /// the current span: `reorg at Sync height: <n>`.
    Span,
}

impl Variant {
    /// Name accepted by [`FromStr`] and the `--mode` flag.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Legacy => "legacy",
            Self::Span => "span",
        }
    }
}

impl FromStr for Variant {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "legacy" | "a" => Ok(Self::Legacy),
            "span" | "b" => Ok(Self::Span),
            other => Err(format!("unknown mode '{other}', expected 'legacy' or 'span'")),
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How two extracted heights are ordered.
///
/// `Lexical` is plain string ordering, so `"10" < "9"` and a climb from 9 to 10
/// is reported as a reorg. Existing tooling depends on that output, which is
/// why it stays the default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Comparison {
    /// Byte-wise string ordering.
    #[default]
    Lexical,

    /// Ordering by the value of the trailing digit run. Any text in front of
    /// the digits is compared lexically first.
    Numeric,
}

impl Comparison {
    /// Name accepted by [`FromStr`] and the `--compare` flag.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Lexical => "lexical",
            Self::Numeric => "numeric",
        }
    }

    /// Order `a` relative to `b` under this rule.
    #[must_use]
    pub fn compare(self, a: &str, b: &str) -> Ordering {
        match self {
            Self::Lexical => a.cmp(b),
            Self::Numeric => {
                let (prefix_a, digits_a) = split_trailing_digits(a);
                let (prefix_b, digits_b) = split_trailing_digits(b);
                prefix_a
                    .cmp(prefix_b)
                    .then_with(|| compare_digit_runs(digits_a, digits_b))
            }
        }
    }
}

impl FromStr for Comparison {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "lexical" | "string" => Ok(Self::Lexical),
            "numeric" | "number" => Ok(Self::Numeric),
            other => Err(format!(
                "unknown comparison '{other}', expected 'lexical' or 'numeric'"
            )),
        }
    }
}

impl fmt::Display for Comparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn split_trailing_digits(s: &str) -> (&str, &str) {
    let digits_len = s.bytes().rev().take_while(u8::is_ascii_digit).count();
    s.split_at(s.len() - digits_len)
}

// Arbitrary length, no parsing: drop leading zeros, longer is larger.
fn compare_digit_runs(a: &str, b: &str) -> Ordering {
    let a = a.trim_start_matches('0');
    let b = b.trim_start_matches('0');
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}

/// A detected non-increase in sync height.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReorgNotice {
    /// Raised by [`Variant::Legacy`]; carries the height seen *before* the drop.
    Height {
        /// Previous digit run
        previous: String,
    },

    /// Raised by [`Variant::Span`]; carries the span that triggered it.
    Span {
        /// Current `Sync height: <n>` span
        current: String,
    },
}

impl fmt::Display for ReorgNotice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Height { previous } => write!(f, "Reorg at height {previous}"),
            Self::Span { current } => write!(f, "reorg at {current}"),
        }
    }
}

/// Sync-height reorg detector.
///
/// Holds the last extracted height and decides, for each new one, whether the
/// sequence failed to advance.
///
/// ## Algorithm
///
/// 1. Pick the value to compare: the digit run ([`Variant::Legacy`]) or the
///    full span ([`Variant::Span`])
/// 2. If a previous value exists and `current <= previous` under the active
///    [`Comparison`], raise a notice (`Legacy` skips a current value of `"0"`)
/// 3. Store `current` as the new previous value, notice or not
///
/// ## Example
///
/// ```
/// use reorg_scan::reorg::{Comparison, ReorgDetector, Variant};
///
/// let mut detector = ReorgDetector::new(Variant::Legacy, Comparison::Lexical);
///
/// assert!(detector.observe_line("Sync height: 1").is_none());
/// assert!(detector.observe_line("Sync height: 2").is_none());
///
/// let notice = detector.observe_line("Sync height: 2").unwrap();
/// assert_eq!(notice.to_string(), "Reorg at height 2");
/// ```
#[derive(Debug, Clone, Default)]
pub struct ReorgDetector {
    variant: Variant,
    comparison: Comparison,

    /// Last compared value; `None` until the first match
    previous: Option<String>,

    /// Total number of reorgs detected
    reorg_count: u64,
}

impl ReorgDetector {
    /// Create a detector with no height recorded yet.
    #[must_use]
    pub const fn new(variant: Variant, comparison: Comparison) -> Self {
        Self {
            variant,
            comparison,
            previous: None,
            reorg_count: 0,
        }
    }

    /// The active detection rule.
    #[must_use]
    pub const fn variant(&self) -> Variant {
        self.variant
    }

    /// The active comparison rule.
    #[must_use]
    pub const fn comparison(&self) -> Comparison {
        self.comparison
    }

    /// The last value recorded, in the form the variant compares.
    #[must_use]
    pub fn previous(&self) -> Option<&str> {
        self.previous.as_deref()
    }

    /// Get the total number of detected reorgs.
    #[must_use]
    pub const fn reorg_count(&self) -> u64 {
        self.reorg_count
    }

    /// Feed one extracted height through the detector.
    ///
    /// The height always becomes the new previous value, whether or not a
    /// notice is returned.
    pub fn observe(&mut self, height: &SyncHeight<'_>) -> Option<ReorgNotice> {
        let current = match self.variant {
            Variant::Legacy => height.digits(),
            Variant::Span => height.span(),
        };

        let notice = match self.previous.as_deref() {
            Some(previous) if self.comparison.compare(current, previous).is_le() => {
                match self.variant {
                    Variant::Legacy if current == "0" => None,
                    Variant::Legacy => Some(ReorgNotice::Height {
                        previous: previous.to_owned(),
                    }),
                    Variant::Span => Some(ReorgNotice::Span {
                        current: current.to_owned(),
                    }),
                }
            }
            _ => None,
        };

        if notice.is_some() {
            self.reorg_count += 1;
            info!(
                current,
                previous = self.previous.as_deref().unwrap_or_default(),
                mode = %self.variant,
                "Sync height did not advance"
            );
        } else {
            debug!(current, "Tracking sync height");
        }

        self.previous = Some(current.to_owned());
        notice
    }

    /// Parse a raw log line and feed it through the detector.
    ///
    /// Lines without a trailing `Sync height: <digits>` leave the detector
    /// untouched.
    pub fn observe_line(&mut self, line: &str) -> Option<ReorgNotice> {
        let height = parse_sync_height(line)?;
        self.observe(&height)
    }
}
