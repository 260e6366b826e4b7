//! # Sync Log Reorg Scanner
//!
//! Scans the `sync.log` written by the vault sync tool and reports sync height
//! reorganizations: places where a `Sync height: <n>` entry fails to advance
//! past the one before it.
//!
//! ## Architecture
//!
//! 1. **Reorg Layer** ([`reorg`]) - Height extraction and the detection rule
//! 2. **Scanner Layer** ([`scanner`]) - One sequential pass over a log
//! 3. **Config Layer** ([`config`]) - Environment defaults for the rule
//! 4. **CLI Layer** ([`cli`]) - Argument parsing and output
//!
//! ## Quick Start
//!
//! ```bash
//! cargo run --release -- sync.log
//! ```
//!
//! ## Using as a Library
//!
//! ```rust
//! use reorg_scan::scanner::{scan_reader, ScanOptions};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let log = "Sync height: 1\nSync height: 2\nSync height: 2\n";
//! let mut out = Vec::new();
//!
//! let summary = scan_reader(log.as_bytes(), &mut out, ScanOptions::default()).await?;
//!
//! assert_eq!(String::from_utf8(out)?, "Reorg at height 2\n");
//! assert_eq!(summary.reorgs, 1);
//! # Ok(())
//! # }
//! ```
//!
//! ## Error Handling
//!
//! All fallible operations return [`error::ScanResult<T>`](error::ScanResult).

#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod cli;
pub mod config;
pub mod error;
pub mod observability;
pub mod reorg;
pub mod scanner;
