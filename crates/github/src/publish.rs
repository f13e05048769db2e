//! Publishing the rendered document to a repository.
//!
//! The document is written as a single file, `README.md` by default. The
//! target repository is created when it does not exist yet, either for the
//! authenticated user or in the owning organization, and the file is created
//! or updated depending on whether it is already present.

use serde_json::json;
use tracing::{debug, info, instrument};

use crate::client::GitHubClient;
use crate::error::{Error, Result};

/// How the target file was changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileChange {
    /// The file did not exist and was created.
    Created,
    /// The file existed and was replaced.
    Updated,
}

/// The result of a successful publish.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PublishOutcome {
    /// Whether the target repository had to be created first.
    pub repository_created: bool,
    /// How the file was changed.
    pub file: FileChange,
}

impl GitHubClient {
    /// Writes `content` to `path` in `owner/repo`, committing with `message`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Auth`] if the client has no token, and any API error
    /// raised while checking the repository, creating it, or writing the file.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use secrecy::SecretString;
    /// use starred_github::GitHubClient;
    ///
    /// # async fn example() -> starred_github::Result<()> {
    /// let token = SecretString::from("ghp_xxx".to_string());
    /// let client = GitHubClient::new(Some(token)).await?;
    /// let outcome = client
    ///     .publish("octocat", "awesome-stars", "README.md", "update stars", "# Awesome Stars\n")
    ///     .await?;
    /// println!("{:?}", outcome.file);
    /// # Ok(())
    /// # }
    /// ```
    #[instrument(skip(self, message, content), fields(bytes = content.len()))]
    pub async fn publish(
        &self,
        owner: &str,
        repo: &str,
        path: &str,
        message: &str,
        content: &str,
    ) -> Result<PublishOutcome> {
        if !self.is_authenticated() {
            return Err(Error::Auth {
                reason: "publishing requires a GitHub token".to_string(),
            });
        }

        let repository_created = self.ensure_repository(owner, repo).await?;
        let handler = self.inner().repos(owner, repo);

        let existing_sha = match handler.get_content().path(path).send().await {
            Ok(contents) => contents.items.into_iter().next().map(|item| item.sha),
            Err(err) => {
                let err = Error::from_api(err);
                if !err.is_not_found() {
                    return Err(err);
                }
                None
            }
        };

        let file = match existing_sha {
            Some(sha) => {
                debug!(%sha, "updating existing file");
                handler
                    .update_file(path, message, content, sha)
                    .send()
                    .await
                    .map_err(Error::from_api)?;
                FileChange::Updated
            }
            None => {
                debug!("creating file");
                handler
                    .create_file(path, message, content)
                    .send()
                    .await
                    .map_err(Error::from_api)?;
                FileChange::Created
            }
        };

        info!(?file, repository_created, "published document");
        Ok(PublishOutcome {
            repository_created,
            file,
        })
    }

    /// Makes sure `owner/repo` exists, creating it if GitHub reports it
    /// missing. Returns whether it was created.
    ///
    /// The repository is created for the authenticated user when `owner` is
    /// that user, and in the `owner` organization otherwise.
    async fn ensure_repository(&self, owner: &str, repo: &str) -> Result<bool> {
        match self.inner().repos(owner, repo).get().await {
            Ok(_) => Ok(false),
            Err(err) => {
                let err = Error::from_api(err);
                if !err.is_not_found() {
                    return Err(err);
                }

                let login = self
                    .inner()
                    .current()
                    .user()
                    .await
                    .map_err(Error::from_api)?
                    .login;
                let route = creation_route(owner, &login);
                info!(owner, repo, %route, "target repository not found, creating it");
                let _created: octocrab::models::Repository = self
                    .inner()
                    .post(route, Some(&json!({ "name": repo })))
                    .await
                    .map_err(Error::from_api)?;
                Ok(true)
            }
        }
    }
}

/// Returns the route that creates a repository owned by `owner`, given the
/// `login` of the authenticated user.
fn creation_route(owner: &str, login: &str) -> String {
    if owner.eq_ignore_ascii_case(login) {
        "/user/repos".to_string()
    } else {
        format!("/orgs/{owner}/repos")
    }
}
