//! Rate limit bookkeeping for GitHub REST responses.
//!
//! Every REST response carries the remaining request budget in
//! `x-ratelimit-remaining` and the reset time, in Unix seconds, in
//! `x-ratelimit-reset`. When the budget drops below [`MIN_REMAINING`] the
//! fetcher sleeps until the reset instead of burning the last requests.
//!
//! # Rate Limits
//!
//! - Unauthenticated: 60 requests/hour
//! - Authenticated: 5,000 requests/hour

use std::time::Duration;

use chrono::{DateTime, Utc};
use tracing::warn;

/// Requests that must remain in the budget for a response to be used.
pub const MIN_REMAINING: u32 = 10;

/// Added to every wait; reset timestamps only have one-second resolution.
const RESET_GRACE: Duration = Duration::from_secs(1);

/// Wait used when GitHub rejects a request without saying when to retry.
const UNKNOWN_RESET_WAIT: Duration = Duration::from_secs(60);

/// The rate limit budget reported alongside a response.
///
/// # Examples
///
/// ```
/// use starred_github::RateLimitStatus;
///
/// let status = RateLimitStatus::from_headers(Some("5"), Some("1700000000")).unwrap();
/// assert_eq!(status.remaining, 5);
/// assert!(status.is_nearly_exhausted());
///
/// assert!(RateLimitStatus::from_headers(None, Some("1700000000")).is_none());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitStatus {
    /// Requests left in the current window.
    pub remaining: u32,
    /// When the window resets.
    pub reset_at: DateTime<Utc>,
}

impl RateLimitStatus {
    /// Parses the status from the `x-ratelimit-remaining` and
    /// `x-ratelimit-reset` header values.
    ///
    /// Returns `None` if either header is missing or malformed, which
    /// happens on hosts that do not enforce rate limits.
    #[must_use]
    pub fn from_headers(remaining: Option<&str>, reset: Option<&str>) -> Option<Self> {
        let remaining = remaining?.trim().parse().ok()?;
        let reset = reset?.trim().parse().ok()?;
        let reset_at = DateTime::from_timestamp(reset, 0)?;
        Some(Self {
            remaining,
            reset_at,
        })
    }

    /// Returns `true` if fewer than [`MIN_REMAINING`] requests are left.
    #[must_use]
    pub fn is_nearly_exhausted(&self) -> bool {
        self.remaining < MIN_REMAINING
    }
}

/// Returns how long to sleep before the window that resets at `reset_at`
/// is open again.
#[must_use]
pub fn wait_duration(reset_at: Option<DateTime<Utc>>) -> Duration {
    match reset_at {
        Some(reset_at) => {
            // A reset in the past means the window is already open.
            let until_reset = (reset_at - Utc::now()).to_std().unwrap_or(Duration::ZERO);
            until_reset + RESET_GRACE
        }
        None => UNKNOWN_RESET_WAIT,
    }
}

/// Suspends the current task until the rate limit window resets.
pub(crate) async fn wait_for_reset(reset_at: Option<DateTime<Utc>>) {
    let duration = wait_duration(reset_at);
    warn!(
        sleep_secs = duration.as_secs(),
        reset_at = ?reset_at,
        "rate limit nearly exhausted, sleeping until reset"
    );
    tokio::time::sleep(duration).await;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_headers() {
        let status = RateLimitStatus::from_headers(Some("4999"), Some("1700000000")).unwrap();
        assert_eq!(status.remaining, 4999);
        assert_eq!(status.reset_at.timestamp(), 1_700_000_000);
        assert!(!status.is_nearly_exhausted());
    }

    #[test]
    fn malformed_headers_are_ignored() {
        assert!(RateLimitStatus::from_headers(Some("many"), Some("1700000000")).is_none());
        assert!(RateLimitStatus::from_headers(Some("10"), Some("soon")).is_none());
        assert!(RateLimitStatus::from_headers(Some("10"), None).is_none());
    }

    #[test]
    fn threshold_is_exclusive() {
        let reset_at = Utc::now();
        let at_threshold = RateLimitStatus {
            remaining: MIN_REMAINING,
            reset_at,
        };
        let below = RateLimitStatus {
            remaining: MIN_REMAINING - 1,
            reset_at,
        };
        assert!(!at_threshold.is_nearly_exhausted());
        assert!(below.is_nearly_exhausted());
    }

    #[test]
    fn past_reset_waits_only_the_grace_period() {
        let reset_at = Utc::now() - chrono::Duration::seconds(30);
        assert_eq!(wait_duration(Some(reset_at)), RESET_GRACE);
    }

    #[test]
    fn future_reset_waits_until_reset() {
        let reset_at = Utc::now() + chrono::Duration::seconds(30);
        let wait = wait_duration(Some(reset_at));
        assert!(wait > Duration::from_secs(29));
        assert!(wait <= Duration::from_secs(31));
    }

    #[test]
    fn unknown_reset_uses_fallback() {
        assert_eq!(wait_duration(None), UNKNOWN_RESET_WAIT);
    }
}
