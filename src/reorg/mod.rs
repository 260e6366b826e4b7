//! Sync-height reorganization detection.
//!
//! The vault sync tool prints a `Sync height: <n>` line every time its sync
//! height changes. On a healthy chain those heights only climb, so any entry
//! that fails to advance past the previous one is a strong hint that the
//! node rolled back to a fork point.
//!
//! ## How It Works
//!
//! 1. **Extraction**: [`parse_sync_height`] pulls the height out of lines that
//!    end in `Sync height: <digits>`; everything else is ignored
//! 2. **Comparison**: [`ReorgDetector`] compares each height with the one
//!    before it, using string ordering unless [`Comparison::Numeric`] is chosen
//! 3. **Notice**: a non-increase yields a [`ReorgNotice`] whose text depends on
//!    the [`Variant`]
//!
//! ## Variants
//!
//! | Mode | Compared value | `"0"` excluded | Notice |
//! |------|----------------|----------------|--------|
//! | `legacy` | digits | yes | `Reorg at height <previous>` |
//! | `span` | `Sync height: <n>` | no | `reorg at Sync height: <n>` |
//!
//! ## Example
//!
//! ```
//! use reorg_scan::reorg::{Comparison, ReorgDetector, Variant};
//!
//! let mut detector = ReorgDetector::new(Variant::Span, Comparison::Lexical);
//! detector.observe_line("Sync height: 9");
//!
//! // "10" sorts before "9" as a string
//! let notice = detector.observe_line("Sync height: 10").unwrap();
//! assert_eq!(notice.to_string(), "reorg at Sync height: 10");
//! ```

pub mod detector;
pub mod pattern;

pub use detector::{Comparison, ReorgDetector, ReorgNotice, Variant};
pub use pattern::{parse_sync_height, SyncHeight, SYNC_HEIGHT_LABEL};
