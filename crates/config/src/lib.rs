//! Configuration management for the starred application.
//!
//! This crate handles loading and validating configuration
//! from multiple sources (files, environment variables, defaults).
//!
//! # Overview
//!
//! The crate is organized into the following modules:
//!
//! - [`config`]: Core configuration struct and loading logic
//! - [`target`]: Publish target with flexible parsing
//! - [`fetch`]: Page fetching limits (concurrency and page size)
//! - [`template`]: Header and footer overrides for the rendered document
//! - [`auth`]: GitHub token resolution
//! - [`persistence`]: Config file discovery and reading
//! - [`error`]: Error types for configuration operations
//!
//! # Configuration Sources (Priority)
//!
//! Configuration is loaded from multiple sources with the following priority
//! (highest to lowest):
//!
//! 1. Command-line flags (applied by the binary)
//! 2. Environment variables (`GITHUB_TOKEN`, `STARRED_USERNAME`)
//! 3. Local config (`./starred.json5` or `./starred.json`)
//! 4. User config (`~/.config/starred/config.json5` or `~/.config/starred/config.json`)
//! 5. Built-in defaults
//!
//! # Target Format
//!
//! The publish target can be specified in three formats:
//!
//! ```json5
//! {
//!   username: "octocat",
//!   // Repository owned by `username`
//!   target: "awesome-stars",
//!   // Or with an explicit owner
//!   // target: "my-org/awesome-stars",
//!   // Or with a custom file path
//!   // target: { owner: "my-org", repo: "awesome-stars", path: "STARS.md" },
//! }
//! ```
//!
//! # Token Resolution
//!
//! GitHub tokens are resolved in the following order:
//!
//! 1. Token given on the command line or in `GITHUB_TOKEN`
//! 2. Global `github_token` from config
//! 3. `gh auth token` command (GitHub CLI)
//! 4. Unauthenticated (rate-limited, read-only)
//!
//! # Examples
//!
//! Loading configuration:
//!
//! ```no_run
//! use starred_config::Config;
//!
//! # async fn example() -> starred_config::Result<()> {
//! // Load from default locations, then apply environment overrides
//! let config = Config::load().await?.with_env();
//!
//! if let Some(username) = &config.username {
//!     println!("Listing stars of {username}");
//! }
//! println!("Fetching {} pages at a time", config.fetch.concurrency);
//! # Ok(())
//! # }
//! ```

pub mod auth;
pub mod config;
pub mod error;
pub mod fetch;
pub mod persistence;
pub mod target;
pub mod template;

// Re-export primary types at crate root for convenience
pub use config::Config;
pub use error::{ConfigError, Result};
pub use fetch::FetchConfig;
pub use target::PublishTarget;
pub use template::TemplateConfig;
