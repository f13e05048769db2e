//! Grouping of starred repositories by language.
//!
//! A [`Catalog`] holds the flat list of repositories together with the same
//! repositories grouped by display language. Both views are sorted by full
//! name using ordinal (byte-wise) comparison, so the output only depends on
//! the set of input repositories and not on the order pages arrived in.

use std::collections::BTreeMap;

use crate::language::display_language;
use crate::repository::Repository;

/// Repositories grouped by display language.
///
/// Keys iterate in ordinal order; every group is sorted by full name.
pub type LanguageGroups = BTreeMap<String, Vec<Repository>>;

/// Sorts repositories by full name using ordinal comparison.
///
/// The sort is stable, so duplicates keep their relative order.
pub fn sort_by_full_name(repositories: &mut [Repository]) {
    repositories.sort_by(|a, b| a.full_name().cmp(b.full_name()));
}

/// Groups repositories by their display language.
///
/// Repositories without a language land in the
/// [`OTHERS`](crate::language::OTHERS) group. Each group is sorted by full
/// name. An empty input yields an empty map.
///
/// # Examples
///
/// ```
/// use starred_protocol::{Repository, group_by_language};
///
/// let groups = group_by_language(&[
///     Repository::new("tokio-rs/tokio", "https://github.com/tokio-rs/tokio", "Rust", ""),
///     Repository::new("nodejs/node", "https://github.com/nodejs/node", "javascript", ""),
///     Repository::new("github/gitignore", "https://github.com/github/gitignore", "", ""),
/// ]);
///
/// assert_eq!(groups["Rust"].len(), 1);
/// assert_eq!(groups["JavaScript"][0].full_name(), "nodejs/node");
/// assert_eq!(groups["Others"][0].full_name(), "github/gitignore");
/// ```
#[must_use]
pub fn group_by_language(repositories: &[Repository]) -> LanguageGroups {
    let mut groups = LanguageGroups::new();

    for repo in repositories {
        groups
            .entry(display_language(repo.language()))
            .or_default()
            .push(repo.clone());
    }

    for group in groups.values_mut() {
        sort_by_full_name(group);
    }

    groups
}

/// The sorted flat list of starred repositories and its language groups.
///
/// # Examples
///
/// ```
/// use starred_protocol::{Catalog, Repository};
///
/// let catalog = Catalog::new(vec![
///     Repository::new("z/last", "https://github.com/z/last", "Rust", ""),
///     Repository::new("a/first", "https://github.com/a/first", "Rust", ""),
/// ]);
///
/// assert_eq!(catalog.len(), 2);
/// assert_eq!(catalog.repositories()[0].full_name(), "a/first");
/// assert_eq!(catalog.languages()["Rust"][1].full_name(), "z/last");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    repositories: Vec<Repository>,
    languages: LanguageGroups,
}

impl Catalog {
    /// Builds a catalog from repositories in any order.
    #[must_use]
    pub fn new(mut repositories: Vec<Repository>) -> Self {
        let languages = group_by_language(&repositories);
        sort_by_full_name(&mut repositories);
        Self {
            repositories,
            languages,
        }
    }

    /// Returns all repositories sorted by full name.
    #[must_use]
    pub fn repositories(&self) -> &[Repository] {
        &self.repositories
    }

    /// Returns the repositories grouped by display language.
    #[must_use]
    pub fn languages(&self) -> &LanguageGroups {
        &self.languages
    }

    /// Returns the number of repositories.
    #[must_use]
    pub fn len(&self) -> usize {
        self.repositories.len()
    }

    /// Returns `true` if the catalog holds no repositories.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.repositories.is_empty()
    }
}
