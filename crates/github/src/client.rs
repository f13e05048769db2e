//! GitHub API client implementation.
//!
//! This module provides the [`GitHubClient`] struct for interacting with
//! the GitHub API, supporting both authenticated and unauthenticated access.

use std::sync::Arc;

use octocrab::Octocrab;
use secrecy::{ExposeSecret, SecretString};
use starred_protocol::Repository;
use tracing::{debug, instrument, warn};

use crate::error::{Error, Result};
use crate::pagination::last_page;
use crate::rate_limit::RateLimitStatus;
use crate::starred::{FetchOptions, StarredEntry, StarredPage, StarredSource, fetch_all_starred};

/// GitHub API client with optional authentication.
///
/// The client supports both authenticated and unauthenticated access.
/// Authenticated clients have higher rate limits (5,000 req/hour vs 60 req/hour)
/// and are required for publishing.
///
/// Cloning is cheap: clones share the underlying HTTP connection pool.
///
/// # Security
///
/// Tokens are passed in as [`SecretString`] and handed straight to octocrab,
/// so they never show up in debug output or logs.
///
/// # Examples
///
/// ```no_run
/// use secrecy::SecretString;
/// use starred_github::GitHubClient;
///
/// # async fn example() -> starred_github::Result<()> {
/// // Create an authenticated client
/// let token = SecretString::from("ghp_your_token".to_string());
/// let client = GitHubClient::new(Some(token)).await?;
///
/// // Validate the token works
/// let is_valid = client.validate_token().await?;
/// println!("Token valid: {}", is_valid);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct GitHubClient {
    /// The underlying octocrab client.
    inner: Octocrab,
    /// Whether this client is authenticated.
    authenticated: bool,
}

impl GitHubClient {
    /// Creates a new GitHub client.
    ///
    /// # Arguments
    ///
    /// * `token` - Optional GitHub personal access token. If `Some`, the client
    ///   will be authenticated with higher rate limits. If `None`, the client
    ///   will be unauthenticated with lower rate limits.
    ///
    /// # Errors
    ///
    /// Returns an error if the octocrab client fails to initialize.
    #[instrument(skip(token), fields(authenticated = token.is_some()))]
    pub async fn new(token: Option<SecretString>) -> Result<Self> {
        let (inner, authenticated) = match token {
            Some(token) => {
                debug!("creating authenticated GitHub client");
                let client = Octocrab::builder()
                    .personal_token(token.expose_secret())
                    .build()
                    .map_err(Error::Api)?;
                (client, true)
            }
            None => {
                debug!("creating unauthenticated GitHub client");
                let client = Octocrab::builder().build().map_err(Error::Api)?;
                (client, false)
            }
        };

        Ok(Self {
            inner,
            authenticated,
        })
    }

    /// Validates the current token by making a test API call.
    ///
    /// This method calls the `/user` endpoint to verify that the token
    /// is valid and has not expired.
    ///
    /// # Returns
    ///
    /// - `Ok(true)` if authenticated and token is valid
    /// - `Ok(false)` if not authenticated (no token provided)
    /// - `Err` if the API call fails (e.g., invalid token, network error)
    ///
    /// # Errors
    ///
    /// Returns [`Error::Auth`] if GitHub rejects the token (401),
    /// [`Error::RateLimited`] if the request budget is spent, and
    /// [`Error::Api`] for any other failure.
    #[instrument(skip(self))]
    pub async fn validate_token(&self) -> Result<bool> {
        if !self.authenticated {
            debug!("client is not authenticated, skipping validation");
            return Ok(false);
        }

        debug!("validating token by calling /user endpoint");
        match self.inner.current().user().await {
            Ok(user) => {
                debug!(login = %user.login, "token validated successfully");
                Ok(true)
            }
            Err(e) => {
                let err = Error::from_api(e);
                warn!(error = %err, auth = err.is_auth(), "token validation failed");
                Err(err)
            }
        }
    }

    /// Returns whether this client is authenticated.
    ///
    /// Note: This returns the authentication state at client creation time.
    /// It does not verify the token is still valid. Use [`validate_token`](Self::validate_token)
    /// to check if the token is currently valid.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.authenticated
    }

    /// Returns a reference to the underlying octocrab client.
    #[must_use]
    pub fn inner(&self) -> &Octocrab {
        &self.inner
    }

    /// Fetches every repository starred by `username`.
    ///
    /// See [`fetch_all_starred`] for the pagination and failure semantics.
    ///
    /// # Errors
    ///
    /// Returns the first error reported by any page fetch, such as:
    /// - Invalid token ([`Error::Auth`])
    /// - User not found (404)
    /// - Network errors
    pub async fn fetch_all_starred(
        &self,
        username: &str,
        options: &FetchOptions,
    ) -> Result<Vec<Repository>> {
        fetch_all_starred(Arc::new(self.clone()), username, options).await
    }
}

impl StarredSource for GitHubClient {
    #[instrument(skip(self))]
    async fn starred_page(&self, username: &str, page: u32, per_page: u8) -> Result<StarredPage> {
        let route = format!("/users/{username}/starred?per_page={per_page}&page={page}");
        let response = self
            .inner
            ._get(route.as_str())
            .await
            .map_err(Error::from_api)?;

        let status = response.status().as_u16();
        let header = |name: &str| {
            response
                .headers()
                .get(name)
                .and_then(|value| value.to_str().ok())
                .map(str::to_owned)
        };
        let rate_limit = RateLimitStatus::from_headers(
            header("x-ratelimit-remaining").as_deref(),
            header("x-ratelimit-reset").as_deref(),
        );
        let last = header("link").as_deref().and_then(last_page);

        check_status(status, rate_limit, &route)?;

        let body = self
            .inner
            .body_to_string(response)
            .await
            .map_err(Error::from_api)?;
        let entries: Vec<StarredEntry> =
            serde_json::from_str(&body).map_err(|source| Error::Decode {
                route: route.clone(),
                source,
            })?;

        debug!(
            count = entries.len(),
            last_page = ?last,
            remaining = ?rate_limit.map(|r| r.remaining),
            "fetched page"
        );
        Ok(StarredPage {
            entries,
            last_page: last,
            rate_limit,
        })
    }
}

/// Turns a non-success status of a starred page response into an error.
///
/// A 403 with no requests left, or any 429, is a rate-limit rejection that
/// the fetcher waits out.
fn check_status(status: u16, rate_limit: Option<RateLimitStatus>, route: &str) -> Result<()> {
    match status {
        200..=299 => Ok(()),
        401 => Err(Error::Auth {
            reason: format!("GitHub rejected the token for {route}"),
        }),
        403 if rate_limit.is_some_and(|r| r.remaining == 0) => Err(Error::RateLimited {
            reset_at: rate_limit.map(|r| r.reset_at),
        }),
        429 => Err(Error::RateLimited {
            reset_at: rate_limit.map(|r| r.reset_at),
        }),
        _ => Err(Error::UnexpectedStatus {
            status,
            route: route.to_string(),
        }),
    }
}
