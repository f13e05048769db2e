//! GitHub token resolution.
//!
//! This module provides token resolution with fallback chain:
//!
//! 1. Explicit token (command line or `GITHUB_TOKEN`)
//! 2. Global `github_token` from config
//! 3. `gh auth token` command (GitHub CLI)
//! 4. Unauthenticated (returns `None`)

use crate::error::{ConfigError, Result};

/// Resolves the GitHub token to use.
///
/// Tries the following sources in order:
///
/// 1. `explicit` (from the command line or environment)
/// 2. `config_token` (from the config file)
/// 3. `gh auth token` command
///
/// Blank tokens are skipped.
///
/// # Returns
///
/// Returns `Some(token)` if a token is available, `None` otherwise. A
/// failing `gh` command is treated the same as a missing one.
///
/// # Examples
///
/// ```no_run
/// use starred_config::auth::resolve_token;
///
/// # async fn example() {
/// let token = resolve_token(None, Some("ghp_from_config")).await;
/// assert_eq!(token.as_deref(), Some("ghp_from_config"));
/// # }
/// ```
pub async fn resolve_token(explicit: Option<&str>, config_token: Option<&str>) -> Option<String> {
    let given = [explicit, config_token]
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|token| !token.is_empty());
    if let Some(token) = given {
        return Some(token.to_string());
    }

    get_gh_token().await.ok().flatten()
}

/// Gets a GitHub token from the `gh` CLI.
///
/// Runs `gh auth token` and returns the token if successful.
///
/// # Returns
///
/// - `Ok(Some(token))` if the command succeeds and returns a token
/// - `Ok(None)` if the `gh` command is not found or not logged in
/// - `Err(...)` if the command exists but fails
///
/// # Errors
///
/// Returns an error if the `gh` command cannot be spawned or exits with an
/// unexpected failure.
pub async fn get_gh_token() -> Result<Option<String>> {
    use tokio::process::Command;

    let output = match Command::new("gh").args(["auth", "token"]).output().await {
        Ok(output) => output,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(ConfigError::GhAuthFailed(e)),
    };

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr).to_string();
        if stderr.contains("not logged in") || stderr.contains("no oauth token") {
            return Ok(None);
        }
        return Err(ConfigError::GhAuthError {
            code: output.status.code(),
            stderr,
        });
    }

    let token = String::from_utf8_lossy(&output.stdout).trim().to_string();
    if token.is_empty() {
        return Ok(None);
    }

    Ok(Some(token))
}
