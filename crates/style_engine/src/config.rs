//! Configuration settings for the style engine.
//!
//! Controls diagnostic reporting and pass logging. Configuration can be loaded
//! from environment variables or constructed programmatically.

use std::env;

/// Default number of retained diagnostics.
const DEFAULT_MAX_DIAGNOSTICS: usize = 256;

/// Runtime configuration for a [`crate::StyleContext`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StyleConfig {
    /// Whether typed reads of mismatched values are recorded as diagnostics
    pub report_type_mismatch: bool,
    /// Maximum number of diagnostics retained until drained
    pub max_diagnostics: usize,
    /// Whether each resolution pass logs its statistics at info level
    pub log_passes: bool,
}

impl Default for StyleConfig {
    #[inline]
    fn default() -> Self {
        Self::new(true, DEFAULT_MAX_DIAGNOSTICS, false)
    }
}

impl StyleConfig {
    /// Construct a new `StyleConfig` with explicit values.
    ///
    /// # Arguments
    ///
    /// * `report_type_mismatch` - Whether to record type mismatch diagnostics
    /// * `max_diagnostics` - Retained diagnostics (minimum 1)
    /// * `log_passes` - Whether to log per-pass statistics
    #[inline]
    #[must_use]
    pub const fn new(report_type_mismatch: bool, max_diagnostics: usize, log_passes: bool) -> Self {
        let limit = if max_diagnostics < 1 {
            1
        } else {
            max_diagnostics
        };
        Self {
            report_type_mismatch,
            max_diagnostics: limit,
            log_passes,
        }
    }

    /// Load configuration from environment variables.
    ///
    /// Reads the following environment variables:
    /// - `STYLE_REPORT_TYPE_MISMATCH`: Set to "0" to disable mismatch diagnostics (default: enabled)
    /// - `STYLE_MAX_DIAGNOSTICS`: Retained diagnostics (default: 256, minimum 1)
    /// - `STYLE_LOG_PASSES`: Set to "1" to log pass statistics (default: disabled)
    #[inline]
    #[must_use]
    pub fn from_env() -> Self {
        let report_type_mismatch =
            env::var("STYLE_REPORT_TYPE_MISMATCH").ok().as_deref() != Some("0");
        let max_diagnostics = env::var("STYLE_MAX_DIAGNOSTICS")
            .ok()
            .and_then(|val| val.parse::<usize>().ok())
            .unwrap_or(DEFAULT_MAX_DIAGNOSTICS);
        let log_passes = env::var("STYLE_LOG_PASSES").ok().as_deref() == Some("1");
        Self::new(report_type_mismatch, max_diagnostics, log_passes)
    }
}
