//! Configuration management for the reorg scanner.
//!
//! Defaults for the detection settings come from environment variables, loaded
//! through the `dotenvy` crate. Command-line flags take precedence over
//! anything set here.
//!
//! ## Environment Variables
//!
//! Optional (with defaults):
//! - `REORG_SCAN_MODE`: `legacy` or `span` (default: `legacy`)
//! - `REORG_SCAN_COMPARE`: `lexical` or `numeric` (default: `lexical`)
//! - `RUST_LOG`, `LOG_JSON`, `LOG_FILE`: see [`observability`](crate::observability)
//!
//! ## Example
//!
//! ```no_run
//! use reorg_scan::config::Config;
//! use reorg_scan::error::ScanResult;
//!
//! # fn main() -> ScanResult<()> {
//! let config = Config::from_env()?;
//! println!("Mode: {}", config.variant());
//! # Ok(())
//! # }
//! ```

use crate::error::{ScanError, ScanResult};
use crate::reorg::{Comparison, Variant};
use crate::scanner::ScanOptions;
use std::env;

/// Environment variable selecting the detection mode.
pub const MODE_VAR: &str = "REORG_SCAN_MODE";

/// Environment variable selecting the comparison rule.
pub const COMPARE_VAR: &str = "REORG_SCAN_COMPARE";

/// Runtime configuration for a scan.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Config {
    /// Detection rule
    variant: Variant,

    /// Height ordering rule
    comparison: Comparison,
}

impl Config {
    /// Load configuration from the process environment.
    ///
    /// Loads `.env` first if one is present.
    ///
    /// # Errors
    ///
    /// Returns [`ScanError::Config`] if a variable is set to an unknown value.
    pub fn from_env() -> ScanResult<Self> {
        // Load .env file if present (ignore error if file doesn't exist)
        dotenvy::dotenv().ok();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    ///
    /// Unset keys fall back to their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ScanError::Config`] if a value cannot be parsed.
    pub fn from_lookup<F>(lookup: F) -> ScanResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let variant = match lookup(MODE_VAR) {
            Some(raw) => raw.parse::<Variant>().map_err(|e| {
                ScanError::config(format!("{MODE_VAR} is invalid: {e}"), None)
            })?,
            None => Variant::default(),
        };

        let comparison = match lookup(COMPARE_VAR) {
            Some(raw) => raw.parse::<Comparison>().map_err(|e| {
                ScanError::config(format!("{COMPARE_VAR} is invalid: {e}"), None)
            })?,
            None => Comparison::default(),
        };

        Ok(Self {
            variant,
            comparison,
        })
    }

    /// Replace any setting given explicitly on the command line.
    #[must_use]
    pub fn with_overrides(self, variant: Option<Variant>, comparison: Option<Comparison>) -> Self {
        Self {
            variant: variant.unwrap_or(self.variant),
            comparison: comparison.unwrap_or(self.comparison),
        }
    }

    /// Get the detection mode.
    #[must_use]
    pub const fn variant(&self) -> Variant {
        self.variant
    }

    /// Get the comparison rule.
    #[must_use]
    pub const fn comparison(&self) -> Comparison {
        self.comparison
    }

    /// Settings to hand to the scanner.
    #[must_use]
    pub const fn scan_options(&self) -> ScanOptions {
        ScanOptions::new(self.variant, self.comparison)
    }
}
