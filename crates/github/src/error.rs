//! Error types for GitHub API operations.
//!
//! This module defines the error types that can occur while fetching starred
//! repositories and publishing the rendered document. Callers mostly need to
//! tell two situations apart: a credential problem ([`Error::is_auth`]) and
//! anything else that went wrong while talking to GitHub.

use chrono::{DateTime, Utc};

/// Errors that can occur during GitHub API operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// An error occurred while calling the GitHub API.
    #[error("GitHub API error: {0}")]
    Api(#[source] octocrab::Error),

    /// The credential is missing, invalid, or expired.
    #[error("authentication failed: {reason}")]
    Auth {
        /// A description of why authentication failed.
        reason: String,
    },

    /// Rate limit exceeded.
    ///
    /// The starred fetcher waits for the reset instead of reporting this;
    /// it only reaches callers of operations that do not wait.
    #[error("rate limit exceeded{}", format_reset_time(*.reset_at))]
    RateLimited {
        /// When the rate limit resets, if known.
        reset_at: Option<DateTime<Utc>>,
    },

    /// GitHub answered with a status the client does not handle.
    #[error("unexpected HTTP status {status} for {route}")]
    UnexpectedStatus {
        /// The HTTP status code.
        status: u16,
        /// The requested route.
        route: String,
    },

    /// The response body could not be decoded.
    #[error("failed to decode response for {route}: {source}")]
    Decode {
        /// The requested route.
        route: String,
        /// The underlying JSON error.
        #[source]
        source: serde_json::Error,
    },

    /// A concurrent page fetch task panicked or was cancelled.
    #[error("page fetch task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

impl Error {
    /// Classifies an octocrab error.
    ///
    /// `401 Unauthorized` becomes [`Error::Auth`] and rate-limit rejections
    /// become [`Error::RateLimited`]; everything else stays [`Error::Api`].
    pub(crate) fn from_api(err: octocrab::Error) -> Self {
        let classified = match &err {
            octocrab::Error::GitHub { source, .. } => {
                Self::from_status(source.status_code.as_u16(), &source.message)
            }
            _ => None,
        };
        classified.unwrap_or_else(|| Self::Api(err))
    }

    /// Maps a GitHub error status and message to a dedicated variant, or
    /// `None` when the error should stay an [`Error::Api`].
    fn from_status(status: u16, message: &str) -> Option<Self> {
        match status {
            401 => Some(Self::Auth {
                reason: message.to_string(),
            }),
            403 | 429 if message.to_lowercase().contains("rate limit") => {
                Some(Self::RateLimited { reset_at: None })
            }
            _ => None,
        }
    }

    /// Returns `true` if the error is caused by the credential.
    ///
    /// Use this to point users at their token rather than at their network.
    #[must_use]
    pub fn is_auth(&self) -> bool {
        matches!(self, Self::Auth { .. })
    }

    /// Returns `true` if GitHub reported the resource as missing.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::Api(octocrab::Error::GitHub { source, .. }) => {
                source.status_code.as_u16() == 404
            }
            Self::UnexpectedStatus { status, .. } => *status == 404,
            _ => false,
        }
    }
}

/// Formats the reset time for the rate limit error message.
fn format_reset_time(reset_at: Option<DateTime<Utc>>) -> String {
    match reset_at {
        Some(reset_at) => format!(", resets at {}", reset_at.to_rfc3339()),
        None => String::new(),
    }
}

/// A specialized Result type for GitHub API operations.
pub type Result<T> = std::result::Result<T, Error>;
