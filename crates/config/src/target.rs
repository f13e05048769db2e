//! Publish target with flexible parsing.
//!
//! This module provides the [`PublishTarget`] type which supports three
//! formats:
//!
//! - Repository name: `"awesome-stars"` (owned by the listed user)
//! - Short format: `"owner/repo"` string
//! - Full format: `{ "owner": "...", "repo": "...", "path": "..." }` object
//!
//! # Examples
//!
//! ```
//! use starred_config::PublishTarget;
//!
//! // Parse from short format
//! let target: PublishTarget = serde_json::from_str(r#""octocat/stars""#).unwrap();
//! assert_eq!(target.owner_or("someone-else"), "octocat");
//! assert_eq!(target.repo(), "stars");
//!
//! // A bare name is owned by the user whose stars are listed
//! let target: PublishTarget = serde_json::from_str(r#""stars""#).unwrap();
//! assert_eq!(target.owner_or("octocat"), "octocat");
//! assert_eq!(target.path(), "README.md");
//! ```

use serde::{Deserialize, Deserializer};

use crate::error::{ConfigError, Result};

/// File written in the target repository when no path is configured.
pub const DEFAULT_PATH: &str = "README.md";

/// Where the rendered document is published.
///
/// Deserializes from three formats:
/// - Name: `"repo"` string, owned by the listed user
/// - Short: `"owner/repo"` string
/// - Full: `{ "owner": "...", "repo": "...", "path": "..." }` object, where
///   `owner` and `path` are optional
///
/// # Examples
///
/// ```
/// use starred_config::PublishTarget;
///
/// let target = PublishTarget::new("octocat", "awesome-stars");
/// assert_eq!(target.full_name("ignored"), "octocat/awesome-stars");
/// assert_eq!(target.path(), "README.md");
///
/// let target = PublishTarget::parse("awesome-stars").unwrap().with_path("STARS.md");
/// assert_eq!(target.full_name("octocat"), "octocat/awesome-stars");
/// assert_eq!(target.path(), "STARS.md");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishTarget {
    owner: Option<String>,
    repo: String,
    path: Option<String>,
}

impl PublishTarget {
    /// Creates a target with an explicit owner and the default path.
    #[must_use]
    pub fn new(owner: impl Into<String>, repo: impl Into<String>) -> Self {
        Self {
            owner: Some(owner.into()),
            repo: repo.into(),
            path: None,
        }
    }

    /// Returns a copy of this target writing to `path` instead.
    #[must_use]
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Parses a target from `"repo"` or `"owner/repo"`.
    ///
    /// # Errors
    ///
    /// Returns an error if the string has more than one `/` or an empty
    /// component.
    ///
    /// # Examples
    ///
    /// ```
    /// use starred_config::PublishTarget;
    ///
    /// let target = PublishTarget::parse("octocat/stars").unwrap();
    /// assert_eq!(target.repo(), "stars");
    ///
    /// assert!(PublishTarget::parse("").is_err());
    /// assert!(PublishTarget::parse("too/many/slashes").is_err());
    /// ```
    pub fn parse(s: &str) -> Result<Self> {
        let parts: Vec<&str> = s.split('/').map(str::trim).collect();
        let (owner, repo) = match parts.as_slice() {
            [repo] => (None, *repo),
            [owner, repo] => (Some(*owner), *repo),
            _ => {
                return Err(ConfigError::InvalidTarget(format!(
                    "expected 'repo' or 'owner/repo' format, got '{s}'"
                )));
            }
        };

        if repo.is_empty() || owner.is_some_and(str::is_empty) {
            return Err(ConfigError::InvalidTarget(format!(
                "owner and repo cannot be empty in '{s}'"
            )));
        }

        Ok(Self {
            owner: owner.map(str::to_string),
            repo: repo.to_string(),
            path: None,
        })
    }

    /// Returns the configured owner, or `default` when none was given.
    #[must_use]
    pub fn owner_or<'a>(&'a self, default: &'a str) -> &'a str {
        self.owner.as_deref().unwrap_or(default)
    }

    /// Returns the repository name.
    #[must_use]
    pub fn repo(&self) -> &str {
        &self.repo
    }

    /// Returns the file path inside the repository.
    #[must_use]
    pub fn path(&self) -> &str {
        self.path.as_deref().unwrap_or(DEFAULT_PATH)
    }

    /// Returns `"owner/repo"`, using `default_owner` when no owner is set.
    #[must_use]
    pub fn full_name(&self, default_owner: &str) -> String {
        format!("{}/{}", self.owner_or(default_owner), self.repo)
    }
}

impl<'de> Deserialize<'de> for PublishTarget {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        use serde::de::{self, MapAccess, Visitor};

        struct TargetVisitor;

        impl<'de> Visitor<'de> for TargetVisitor {
            type Value = PublishTarget;

            fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
                formatter.write_str(
                    "a string 'repo' or 'owner/repo', or an object with repo and optional owner and path fields",
                )
            }

            fn visit_str<E>(self, v: &str) -> std::result::Result<Self::Value, E>
            where
                E: de::Error,
            {
                PublishTarget::parse(v).map_err(de::Error::custom)
            }

            fn visit_map<M>(self, mut map: M) -> std::result::Result<Self::Value, M::Error>
            where
                M: MapAccess<'de>,
            {
                let mut owner: Option<String> = None;
                let mut repo: Option<String> = None;
                let mut path: Option<String> = None;

                while let Some(key) = map.next_key::<String>()? {
                    let slot = match key.as_str() {
                        "owner" => &mut owner,
                        "repo" => &mut repo,
                        "path" => &mut path,
                        _ => {
                            let _: de::IgnoredAny = map.next_value()?;
                            continue;
                        }
                    };
                    if slot.is_some() {
                        return Err(de::Error::custom(format!("duplicate field `{key}`")));
                    }
                    *slot = Some(map.next_value()?);
                }

                let repo = repo.ok_or_else(|| de::Error::missing_field("repo"))?;
                if repo.trim().is_empty() {
                    return Err(de::Error::custom("repo cannot be empty"));
                }

                Ok(PublishTarget { owner, repo, path })
            }
        }

        deserializer.deserialize_any(TargetVisitor)
    }
}
