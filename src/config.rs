use std::env;

use tracing::*;

use crate::{DEFAULT_MAX_HISTORY, DEFAULT_MAX_SPLITS};

/// Environment variable overriding [`SplitterConfig::max_splits`].
pub const MAX_SPLITS_ENV: &str = "GRIDCUT_MAX_SPLITS";
/// Environment variable overriding [`SplitterConfig::max_history`].
pub const MAX_HISTORY_ENV: &str = "GRIDCUT_MAX_HISTORY";

/// Configuration for editing and export.
///
/// # Example
/// ```
/// use gridcut::SplitterConfig;
///
/// let config = SplitterConfig::default();
/// assert_eq!(config.max_splits, 100);
/// assert_eq!(config.max_history, 100);
/// assert_eq!(config.enable_parallel, true);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitterConfig {
    /// Maximum number of lines per axis (default: 100)
    pub max_splits: usize,
    /// Maximum number of history entries (default: 100)
    pub max_history: usize,
    /// Render slices in parallel during export (default: true)
    pub enable_parallel: bool,
}

impl SplitterConfig {
    /// Creates a new `SplitterConfig` with the specified parameters.
    ///
    /// # Example
    /// ```
    /// use gridcut::SplitterConfig;
    ///
    /// let config = SplitterConfig::new(0, 25, false);
    /// assert_eq!(config.max_splits, 1);
    /// assert_eq!(config.max_history, 25);
    /// assert_eq!(config.enable_parallel, false);
    /// ```
    pub fn new(max_splits: usize, max_history: usize, enable_parallel: bool) -> Self {
        Self {
            max_splits: max_splits.max(1),
            max_history: max_history.max(1),
            enable_parallel,
        }
    }

    /// Builds the default configuration with limits overridden from the environment.
    ///
    /// Unset or unparsable variables fall back to the defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self::new(
            read_limit(MAX_SPLITS_ENV).unwrap_or(defaults.max_splits),
            read_limit(MAX_HISTORY_ENV).unwrap_or(defaults.max_history),
            defaults.enable_parallel,
        )
    }
}

impl Default for SplitterConfig {
    fn default() -> Self {
        SplitterConfig::new(DEFAULT_MAX_SPLITS, DEFAULT_MAX_HISTORY, true)
    }
}

fn read_limit(name: &str) -> Option<usize> {
    let raw = env::var(name).ok()?;
    match raw.trim().parse::<usize>() {
        Ok(value) => Some(value),
        Err(e) => {
            warn!("Ignoring {}={:?}: {}", name, raw, e);
            None
        }
    }
}
