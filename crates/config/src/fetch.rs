//! Page fetching limits.
//!
//! This module provides the [`FetchConfig`] type which bounds how many
//! starred pages are requested at once and how large each page is.
//!
//! # Limits
//!
//! Both values are capped:
//!
//! - `concurrency`: `1..=90` (default 90)
//! - `per_page`: `1..=100` (default 100)

use serde::Deserialize;
pub use starred_protocol::limits::{MAX_CONCURRENCY, MAX_PER_PAGE};

/// Configuration for page fetching.
///
/// # Examples
///
/// ```
/// use starred_config::FetchConfig;
///
/// let config = FetchConfig::default();
/// assert_eq!(config.concurrency, 90);
/// assert_eq!(config.per_page, 100);
///
/// let config = FetchConfig::with_concurrency(4);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct FetchConfig {
    /// Number of pages fetched in parallel.
    #[serde(default = "default_concurrency")]
    pub concurrency: usize,

    /// Number of entries requested per page.
    #[serde(default = "default_per_page")]
    pub per_page: u8,
}

fn default_concurrency() -> usize {
    MAX_CONCURRENCY
}

fn default_per_page() -> u8 {
    MAX_PER_PAGE
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            concurrency: default_concurrency(),
            per_page: default_per_page(),
        }
    }
}

impl FetchConfig {
    /// Creates a configuration with the given concurrency and the default
    /// page size.
    #[must_use]
    pub fn with_concurrency(concurrency: usize) -> Self {
        Self {
            concurrency,
            ..Self::default()
        }
    }

    /// Validates the fetch configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if either value is zero or above its cap.
    pub fn validate(&self) -> crate::Result<()> {
        if !(1..=MAX_CONCURRENCY).contains(&self.concurrency) {
            return Err(crate::ConfigError::InvalidFetch {
                reason: format!(
                    "concurrency {} is outside 1..={MAX_CONCURRENCY}",
                    self.concurrency
                ),
            });
        }

        if !(1..=MAX_PER_PAGE).contains(&self.per_page) {
            return Err(crate::ConfigError::InvalidFetch {
                reason: format!(
                    "per_page {} is outside 1..={MAX_PER_PAGE}",
                    self.per_page
                ),
            });
        }

        Ok(())
    }
}
