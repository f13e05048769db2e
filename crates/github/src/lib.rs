//! GitHub API client for starred.
//!
//! This crate fetches the repositories a user has starred and publishes the
//! rendered list back to GitHub.
//!
//! # Overview
//!
//! The crate provides:
//!
//! - [`GitHubClient`]: The main API client with optional authentication
//! - [`fetch_all_starred`] and [`fetch_page`]: Concurrent, rate-limit-aware
//!   pagination over any [`StarredSource`]
//! - [`FetchOptions`]: Concurrency and page size for fetching
//! - [`RateLimitStatus`]: The request budget reported with each response
//! - [`GitHubClient::publish`]: Create or update a file in a repository
//! - [`Error`]: Error types for GitHub API operations
//!
//! # Authentication
//!
//! The client supports both authenticated and unauthenticated access:
//!
//! - **Authenticated**: 5,000 requests/hour, required for publishing
//! - **Unauthenticated**: 60 requests/hour, read-only
//!
//! Tokens are handled securely using [`secrecy::SecretString`] to prevent
//! accidental logging of sensitive credentials.
//!
//! # Examples
//!
//! Fetching the stars of a user:
//!
//! ```no_run
//! use secrecy::SecretString;
//! use starred_github::{FetchOptions, GitHubClient};
//! use starred_protocol::Catalog;
//!
//! # async fn example() -> starred_github::Result<()> {
//! let token = SecretString::from("ghp_your_token_here".to_string());
//! let client = GitHubClient::new(Some(token)).await?;
//!
//! let repositories = client
//!     .fetch_all_starred("octocat", &FetchOptions::default())
//!     .await?;
//! let catalog = Catalog::new(repositories);
//!
//! for (language, repos) in catalog.languages() {
//!     println!("{language}: {}", repos.len());
//! }
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod error;
pub mod pagination;
pub mod publish;
pub mod rate_limit;
pub mod starred;

pub use client::GitHubClient;
pub use error::{Error, Result};
pub use publish::{FileChange, PublishOutcome};
pub use rate_limit::RateLimitStatus;
pub use starred::{
    FetchOptions, MAX_CONCURRENCY, MAX_PER_PAGE, StarredEntry, StarredPage, StarredSource,
    fetch_all_starred, fetch_page,
};
