//! Core configuration struct and loading logic.
//!
//! This module provides the main [`Config`] struct which aggregates all
//! configuration options for the starred application.

use serde::Deserialize;

use crate::error::Result;
use crate::fetch::FetchConfig;
use crate::persistence::{find_config_file, read_config_file};
use crate::target::PublishTarget;
use crate::template::TemplateConfig;

/// Environment variable holding the GitHub token.
pub const ENV_TOKEN: &str = "GITHUB_TOKEN";

/// Environment variable holding the user whose stars are listed.
pub const ENV_USERNAME: &str = "STARRED_USERNAME";

/// Commit message used when publishing, unless configured otherwise.
pub const DEFAULT_MESSAGE: &str = "update stars";

/// The main configuration struct for the starred application.
///
/// # Examples
///
/// ```
/// use starred_config::{Config, FetchConfig, PublishTarget};
///
/// // Create a default config
/// let config = Config::default();
/// assert!(config.username.is_none());
/// assert_eq!(config.message, "update stars");
///
/// // Create a custom config
/// let config = Config {
///     username: Some("octocat".to_string()),
///     target: Some(PublishTarget::parse("awesome-stars").unwrap()),
///     sort: true,
///     fetch: FetchConfig::with_concurrency(8),
///     ..Default::default()
/// };
/// assert!(config.is_publishing());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Config {
    /// GitHub user whose starred repositories are listed.
    #[serde(default)]
    pub username: Option<String>,

    /// Global GitHub token.
    ///
    /// If not set, the application will try to get a token from the `gh` CLI.
    #[serde(default)]
    pub github_token: Option<String>,

    /// Where to publish the rendered document. Printed to stdout when unset.
    #[serde(default)]
    pub target: Option<PublishTarget>,

    /// Commit message used when publishing.
    #[serde(default = "default_message")]
    pub message: String,

    /// Whether to group the list by language.
    #[serde(default)]
    pub sort: bool,

    /// Page fetching limits.
    #[serde(default)]
    pub fetch: FetchConfig,

    /// Header and footer overrides.
    #[serde(default)]
    pub template: TemplateConfig,
}

fn default_message() -> String {
    DEFAULT_MESSAGE.to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            username: None,
            github_token: None,
            target: None,
            message: default_message(),
            sort: false,
            fetch: FetchConfig::default(),
            template: TemplateConfig::default(),
        }
    }
}

impl Config {
    /// Creates a new empty configuration.
    ///
    /// This is equivalent to `Config::default()`.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from the default file locations.
    ///
    /// Searches for configuration files in the following order:
    ///
    /// 1. Local: `./starred.json5` or `./starred.json`
    /// 2. User: `~/.config/starred/config.json5` or `~/.config/starred/config.json`
    ///
    /// If no configuration file is found, returns a default configuration.
    /// Environment overrides are not applied; see [`Config::with_env`].
    ///
    /// # Errors
    ///
    /// Returns an error if a configuration file is found but cannot be
    /// read, parsed or validated.
    pub async fn load() -> Result<Self> {
        match find_config_file() {
            Some(path) => Self::load_from(path),
            None => Ok(Self::default()),
        }
    }

    /// Loads configuration from a specific file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed or validated.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use starred_config::Config;
    ///
    /// # fn example() -> starred_config::Result<()> {
    /// let config = Config::load_from("custom-config.json5")?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn load_from(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let config: Config = read_config_file(path)?;
        config.validate()?;
        Ok(config)
    }

    /// Applies `GITHUB_TOKEN` and `STARRED_USERNAME` from the process
    /// environment on top of this configuration.
    #[must_use]
    pub fn with_env(self) -> Self {
        self.with_env_from(|key| std::env::var(key).ok())
    }

    /// Applies environment overrides read through `lookup`.
    ///
    /// Empty values are ignored.
    ///
    /// # Examples
    ///
    /// ```
    /// use starred_config::Config;
    ///
    /// let config = Config::default().with_env_from(|key| match key {
    ///     "STARRED_USERNAME" => Some("octocat".to_string()),
    ///     _ => None,
    /// });
    /// assert_eq!(config.username.as_deref(), Some("octocat"));
    /// assert!(config.github_token.is_none());
    /// ```
    #[must_use]
    pub fn with_env_from(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let read = |key: &str| lookup(key).filter(|value: &String| !value.trim().is_empty());
        if let Some(token) = read(ENV_TOKEN) {
            self.github_token = Some(token);
        }
        if let Some(username) = read(ENV_USERNAME) {
            self.username = Some(username);
        }
        self
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the fetch limits are out of range.
    ///
    /// # Examples
    ///
    /// ```
    /// use starred_config::{Config, FetchConfig};
    ///
    /// let mut config = Config::default();
    /// assert!(config.validate().is_ok());
    ///
    /// config.fetch = FetchConfig::with_concurrency(0);
    /// assert!(config.validate().is_err());
    /// ```
    pub fn validate(&self) -> Result<()> {
        self.fetch.validate()?;
        Ok(())
    }

    /// Returns whether the rendered document should be published.
    #[must_use]
    pub fn is_publishing(&self) -> bool {
        self.target.is_some()
    }
}
