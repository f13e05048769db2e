//! Shared types for the starred application.
//!
//! This crate defines the data that flows between the fetcher, the renderer
//! and the publisher: starred repositories and their grouping by language.
//!
//! # Overview
//!
//! The crate is organized into the following modules:
//!
//! - [`repository`]: The immutable [`Repository`] record
//! - [`language`]: Display names for programming languages
//! - [`catalog`]: Grouping by language and deterministic ordering
//! - [`limits`]: Caps on concurrent requests and page size
//!
//! # Examples
//!
//! Grouping a handful of repositories:
//!
//! ```
//! use starred_protocol::{Catalog, Repository};
//!
//! let catalog = Catalog::new(vec![
//!     Repository::new("b/repo", "https://github.com/b/repo", "Go", ""),
//!     Repository::new("a/repo", "https://github.com/a/repo", "", ""),
//!     Repository::new("c/repo", "https://github.com/c/repo", "go", ""),
//! ]);
//!
//! let names: Vec<_> = catalog.repositories().iter().map(Repository::full_name).collect();
//! assert_eq!(names, ["a/repo", "b/repo", "c/repo"]);
//!
//! let languages: Vec<_> = catalog.languages().keys().map(String::as_str).collect();
//! assert_eq!(languages, ["Go", "Others"]);
//! ```

pub mod catalog;
pub mod language;
pub mod limits;
pub mod repository;

// Re-export primary types at crate root for convenience
pub use catalog::{Catalog, LanguageGroups, group_by_language, sort_by_full_name};
pub use language::{OTHERS, display_language};
pub use limits::{MAX_CONCURRENCY, MAX_PER_PAGE};
pub use repository::Repository;
