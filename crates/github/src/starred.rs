//! Fetching every repository a user has starred.
//!
//! Starred repositories come back in pages of up to 100. Fetching them takes
//! two steps:
//!
//! 1. Page 1 is fetched on its own. Its `Link` header tells how many pages
//!    exist in total.
//! 2. Pages `2..=last` are fetched concurrently, with at most
//!    [`MAX_CONCURRENCY`] requests in flight.
//!
//! Every page goes through [`fetch_page`], which waits out an exhausted rate
//! limit and retries the same page. Any other error ends the whole operation:
//! the remaining page tasks are aborted and no partial list is returned.
//!
//! # Example
//!
//! ```no_run
//! use starred_github::{FetchOptions, GitHubClient};
//!
//! # async fn example() -> starred_github::Result<()> {
//! let client = GitHubClient::new(None).await?;
//! let repositories = client
//!     .fetch_all_starred("octocat", &FetchOptions::default())
//!     .await?;
//! println!("{} starred repositories", repositories.len());
//! # Ok(())
//! # }
//! ```

use std::future::Future;
use std::sync::Arc;

use serde::Deserialize;
pub use starred_protocol::limits::{MAX_CONCURRENCY, MAX_PER_PAGE};
use starred_protocol::Repository;
use tokio::task::JoinSet;
use tracing::{debug, info, instrument};

use crate::error::{Error, Result};
use crate::rate_limit::{RateLimitStatus, wait_for_reset};

/// Options for fetching starred repositories.
///
/// # Example
///
/// ```
/// use starred_github::FetchOptions;
///
/// let options = FetchOptions {
///     concurrency: 8,
///     per_page: 50,
/// };
/// assert_eq!(options.effective_concurrency(), 8);
/// assert_eq!(options.effective_per_page(), 50);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FetchOptions {
    /// Maximum concurrent page requests (default and max: 90).
    pub concurrency: usize,
    /// Repositories per page (default and max: 100).
    pub per_page: u8,
}

impl FetchOptions {
    /// Returns the effective concurrency, clamped between 1 and
    /// [`MAX_CONCURRENCY`].
    ///
    /// If `concurrency` is 0, returns [`MAX_CONCURRENCY`].
    #[must_use]
    pub fn effective_concurrency(&self) -> usize {
        match self.concurrency {
            0 => MAX_CONCURRENCY,
            n => n.min(MAX_CONCURRENCY),
        }
    }

    /// Returns the effective page size, clamped between 1 and
    /// [`MAX_PER_PAGE`].
    ///
    /// If `per_page` is 0, returns [`MAX_PER_PAGE`].
    #[must_use]
    pub fn effective_per_page(&self) -> u8 {
        match self.per_page {
            0 => MAX_PER_PAGE,
            n => n.min(MAX_PER_PAGE),
        }
    }
}

/// A repository entry as returned by the starred endpoint.
///
/// Only the fields needed for rendering are decoded.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct StarredEntry {
    /// `"owner/name"`.
    pub full_name: String,
    /// Web URL of the repository.
    pub html_url: String,
    /// Primary language, `null` when GitHub could not classify it.
    #[serde(default)]
    pub language: Option<String>,
    /// Description, `null` when unset.
    #[serde(default)]
    pub description: Option<String>,
}

impl StarredEntry {
    /// Projects the entry onto a [`Repository`].
    #[must_use]
    pub fn into_repository(self) -> Repository {
        Repository::new(
            self.full_name,
            self.html_url,
            self.language.unwrap_or_default(),
            self.description.unwrap_or_default(),
        )
    }
}

/// One page of starred repositories.
#[derive(Debug, Clone, Default)]
pub struct StarredPage {
    /// Entries on this page; empty past the end of the list.
    pub entries: Vec<StarredEntry>,
    /// The last page number from the `Link` header, if present.
    pub last_page: Option<u32>,
    /// The rate limit budget after this request, if reported.
    pub rate_limit: Option<RateLimitStatus>,
}

/// A source of starred repository pages.
///
/// Implemented by [`GitHubClient`](crate::GitHubClient); tests substitute
/// their own sources to script responses.
pub trait StarredSource: Send + Sync + 'static {
    /// Fetches one page of the repositories starred by `username`.
    ///
    /// Pages are numbered from 1.
    fn starred_page(
        &self,
        username: &str,
        page: u32,
        per_page: u8,
    ) -> impl Future<Output = Result<StarredPage>> + Send;
}

/// Fetches a single page, waiting out an exhausted rate limit.
///
/// When the response reports fewer than
/// [`MIN_REMAINING`](crate::rate_limit::MIN_REMAINING) requests left, or the
/// request itself was rejected for exceeding the rate limit, the task sleeps
/// until the reported reset and fetches the same page again. This repeats
/// for as long as the rate limit condition persists. Any other error is
/// returned immediately.
///
/// # Errors
///
/// Returns the first non-rate-limit error reported by `source`.
pub async fn fetch_page<S: StarredSource>(
    source: &S,
    username: &str,
    page: u32,
    per_page: u8,
) -> Result<StarredPage> {
    loop {
        match source.starred_page(username, page, per_page).await {
            Ok(fetched) => match fetched
                .rate_limit
                .filter(RateLimitStatus::is_nearly_exhausted)
            {
                Some(status) => {
                    debug!(
                        page,
                        remaining = status.remaining,
                        "discarding page fetched at the rate limit"
                    );
                    wait_for_reset(Some(status.reset_at)).await;
                }
                None => return Ok(fetched),
            },
            Err(Error::RateLimited { reset_at }) => wait_for_reset(reset_at).await,
            Err(e) => return Err(e),
        }
    }
}

/// Fetches every repository starred by `username`.
///
/// The result is in no particular order; sort it with
/// [`Catalog`](starred_protocol::Catalog). A user without stars yields an
/// empty list.
///
/// # Errors
///
/// Returns the first error reported by any page fetch. All other page
/// fetches are aborted and no partial list is returned.
#[instrument(skip(source, options), fields(username = %username))]
pub async fn fetch_all_starred<S: StarredSource>(
    source: Arc<S>,
    username: &str,
    options: &FetchOptions,
) -> Result<Vec<Repository>> {
    let per_page = options.effective_per_page();
    let first = fetch_page(source.as_ref(), username, 1, per_page).await?;
    let last_page = first.last_page.unwrap_or(1);

    let mut repositories: Vec<Repository> = first
        .entries
        .into_iter()
        .map(StarredEntry::into_repository)
        .collect();

    if last_page <= 1 {
        debug!(count = repositories.len(), "all starred repositories fit on one page");
        return Ok(repositories);
    }

    let concurrency = options.effective_concurrency();
    info!(last_page, concurrency, "fetching remaining pages of starred repositories");

    let mut pending = 2..=last_page;
    let mut join_set: JoinSet<Result<StarredPage>> = JoinSet::new();

    loop {
        while join_set.len() < concurrency {
            let Some(page) = pending.next() else {
                break;
            };
            let source = Arc::clone(&source);
            let username = username.to_string();
            join_set.spawn(async move {
                fetch_page(source.as_ref(), &username, page, per_page).await
            });
        }

        let Some(joined) = join_set.join_next().await else {
            break;
        };

        // Returning drops `join_set`, which aborts every task still running.
        let page = joined??;
        repositories.extend(page.entries.into_iter().map(StarredEntry::into_repository));
    }

    info!(count = repositories.len(), "fetched starred repositories");
    Ok(repositories)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    use chrono::Utc;
    use tokio::time::Instant;

    struct Reply {
        result: Result<StarredPage>,
        delay: Duration,
    }

    impl Reply {
        fn page(entries: Vec<StarredEntry>, last_page: Option<u32>) -> Self {
            Self {
                result: Ok(StarredPage {
                    entries,
                    last_page,
                    rate_limit: None,
                }),
                delay: Duration::ZERO,
            }
        }

        fn error(err: Error) -> Self {
            Self {
                result: Err(err),
                delay: Duration::ZERO,
            }
        }

        fn after(mut self, delay: Duration) -> Self {
            self.delay = delay;
            self
        }

        fn with_rate_limit(mut self, remaining: u32, reset_in_secs: i64) -> Self {
            if let Ok(page) = &mut self.result {
                page.rate_limit = Some(RateLimitStatus {
                    remaining,
                    reset_at: Utc::now() + chrono::Duration::seconds(reset_in_secs),
                });
            }
            self
        }
    }

    type Script = Box<dyn Fn(u32, usize) -> Reply + Send + Sync>;

    /// Answers page requests from a script of `(page, call index) -> reply`.
    struct ScriptedSource {
        script: Script,
        calls: Mutex<Vec<(u32, Instant)>>,
        in_flight: AtomicUsize,
        max_in_flight: AtomicUsize,
        completed: AtomicUsize,
    }

    impl ScriptedSource {
        fn new(script: impl Fn(u32, usize) -> Reply + Send + Sync + 'static) -> Arc<Self> {
            Arc::new(Self {
                script: Box::new(script),
                calls: Mutex::new(Vec::new()),
                in_flight: AtomicUsize::new(0),
                max_in_flight: AtomicUsize::new(0),
                completed: AtomicUsize::new(0),
            })
        }

        fn calls(&self) -> Vec<(u32, Instant)> {
            self.calls.lock().unwrap().clone()
        }
    }

    impl StarredSource for ScriptedSource {
        fn starred_page(
            &self,
            _username: &str,
            page: u32,
            _per_page: u8,
        ) -> impl Future<Output = Result<StarredPage>> + Send {
            async move {
                let call = {
                    let mut calls = self.calls.lock().unwrap();
                    calls.push((page, Instant::now()));
                    calls.len() - 1
                };
                let reply = (self.script)(page, call);

                let now_in_flight = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
                self.max_in_flight.fetch_max(now_in_flight, Ordering::SeqCst);
                tokio::time::sleep(reply.delay).await;
                self.in_flight.fetch_sub(1, Ordering::SeqCst);

                self.completed.fetch_add(1, Ordering::SeqCst);
                reply.result
            }
        }
    }

    fn entry(full_name: &str, language: Option<&str>) -> StarredEntry {
        StarredEntry {
            full_name: full_name.to_string(),
            html_url: format!("https://github.com/{full_name}"),
            language: language.map(str::to_string),
            description: None,
        }
    }

    fn page_entries(page: u32) -> Vec<StarredEntry> {
        (0..3)
            .map(|i| entry(&format!("owner{page}/repo{i}"), Some("Rust")))
            .collect()
    }

    fn server_error(page: u32) -> Error {
        Error::UnexpectedStatus {
            status: 500,
            route: format!("/users/octocat/starred?page={page}"),
        }
    }

    #[test]
    fn fetch_options_defaults_to_limits() {
        let options = FetchOptions::default();
        assert_eq!(options.effective_concurrency(), MAX_CONCURRENCY);
        assert_eq!(options.effective_per_page(), MAX_PER_PAGE);
    }

    #[test]
    fn fetch_options_are_clamped() {
        let options = FetchOptions {
            concurrency: 500,
            per_page: 250,
        };
        assert_eq!(options.effective_concurrency(), MAX_CONCURRENCY);
        assert_eq!(options.effective_per_page(), MAX_PER_PAGE);
    }

    #[test]
    fn entry_projects_null_fields_to_empty() {
        let json = r#"{
            "id": 1296269,
            "full_name": "octocat/Hello-World",
            "html_url": "https://github.com/octocat/Hello-World",
            "language": null,
            "description": null,
            "stargazers_count": 80
        }"#;
        let entry: StarredEntry = serde_json::from_str(json).unwrap();
        let repo = entry.into_repository();
        assert_eq!(repo.full_name(), "octocat/Hello-World");
        assert_eq!(repo.url(), "https://github.com/octocat/Hello-World");
        assert_eq!(repo.language(), "");
        assert_eq!(repo.description(), "");
    }

    #[tokio::test]
    async fn single_page_is_returned_without_fan_out() {
        let source = ScriptedSource::new(|page, _| match page {
            1 => Reply::page(page_entries(1), None),
            _ => panic!("page {page} should not be requested"),
        });

        let repos = fetch_all_starred(Arc::clone(&source), "octocat", &FetchOptions::default())
            .await
            .unwrap();

        assert_eq!(repos.len(), 3);
        assert_eq!(source.calls().len(), 1);
    }

    #[tokio::test]
    async fn user_without_stars_yields_empty_list() {
        let source = ScriptedSource::new(|_, _| Reply::page(Vec::new(), None));
        let repos = fetch_all_starred(source, "octocat", &FetchOptions::default())
            .await
            .unwrap();
        assert!(repos.is_empty());
    }

    #[tokio::test]
    async fn all_pages_are_collected() {
        let source = ScriptedSource::new(|page, _| Reply::page(page_entries(page), Some(5)));

        let repos = fetch_all_starred(Arc::clone(&source), "octocat", &FetchOptions::default())
            .await
            .unwrap();

        assert_eq!(repos.len(), 15);
        let requested: BTreeSet<u32> = source.calls().iter().map(|(page, _)| *page).collect();
        assert_eq!(requested, (1..=5).collect());
        let names: BTreeSet<&str> = repos.iter().map(Repository::full_name).collect();
        assert!(names.contains("owner1/repo0"));
        assert!(names.contains("owner5/repo2"));
    }

    #[tokio::test]
    async fn empty_trailing_page_does_not_end_pagination() {
        let source = ScriptedSource::new(|page, _| match page {
            2 => Reply::page(Vec::new(), None),
            _ => Reply::page(page_entries(page), Some(3)),
        });

        let repos = fetch_all_starred(Arc::clone(&source), "octocat", &FetchOptions::default())
            .await
            .unwrap();

        assert_eq!(repos.len(), 6);
        assert_eq!(source.calls().len(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn concurrency_is_bounded() {
        let source = ScriptedSource::new(|page, _| {
            Reply::page(page_entries(page), Some(12)).after(Duration::from_millis(50))
        });
        let options = FetchOptions {
            concurrency: 3,
            ..Default::default()
        };

        let repos = fetch_all_starred(Arc::clone(&source), "octocat", &options)
            .await
            .unwrap();

        assert_eq!(repos.len(), 36);
        assert_eq!(source.max_in_flight.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn error_on_first_page_is_returned() {
        let source = ScriptedSource::new(|_, _| {
            Reply::error(Error::Auth {
                reason: "Bad credentials".to_string(),
            })
        });

        let err = fetch_all_starred(Arc::clone(&source), "octocat", &FetchOptions::default())
            .await
            .unwrap_err();

        assert!(err.is_auth());
        assert_eq!(source.calls().len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn first_error_cancels_remaining_pages() {
        let source = ScriptedSource::new(|page, _| match page {
            1 => Reply::page(page_entries(1), Some(6)),
            3 => Reply::error(server_error(3)),
            _ => Reply::page(page_entries(page), None).after(Duration::from_secs(60)),
        });

        let started = Instant::now();
        let err = fetch_all_starred(Arc::clone(&source), "octocat", &FetchOptions::default())
            .await
            .unwrap_err();

        match err {
            Error::UnexpectedStatus { status, route } => {
                assert_eq!(status, 500);
                assert!(route.ends_with("page=3"));
            }
            other => panic!("expected page 3's error, got {other:?}"),
        }
        assert!(started.elapsed() < Duration::from_secs(60));

        // Page 1 and the failing page 3 completed; the slow pages were aborted.
        tokio::time::sleep(Duration::from_secs(120)).await;
        assert_eq!(source.completed.load(Ordering::SeqCst), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn exhausted_rate_limit_delays_retry_until_reset() {
        let source = ScriptedSource::new(|_, call| match call {
            0 => Reply::page(page_entries(1), None).with_rate_limit(5, 2),
            _ => Reply::page(page_entries(1), None).with_rate_limit(4999, 3600),
        });

        let page = fetch_page(source.as_ref(), "octocat", 1, 100).await.unwrap();

        let calls = source.calls();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0].0, calls[1].0);
        assert!(calls[1].1 - calls[0].1 >= Duration::from_secs(2));
        assert_eq!(page.rate_limit.map(|r| r.remaining), Some(4999));
    }

    #[tokio::test(start_paused = true)]
    async fn rate_limit_rejection_is_retried() {
        let source = ScriptedSource::new(|_, call| match call {
            0 => Reply::error(Error::RateLimited {
                reset_at: Some(Utc::now() + chrono::Duration::seconds(5)),
            }),
            _ => Reply::page(page_entries(1), None),
        });

        let page = fetch_page(source.as_ref(), "octocat", 1, 100).await.unwrap();

        let calls = source.calls();
        assert_eq!(calls.len(), 2);
        assert!(calls[1].1 - calls[0].1 >= Duration::from_secs(5));
        assert_eq!(page.entries.len(), 3);
    }

    #[tokio::test]
    async fn other_errors_are_not_retried() {
        let source = ScriptedSource::new(|page, _| Reply::error(server_error(page)));

        let err = fetch_page(source.as_ref(), "octocat", 4, 100).await.unwrap_err();

        assert!(matches!(err, Error::UnexpectedStatus { status: 500, .. }));
        assert_eq!(source.calls().len(), 1);
    }
}
