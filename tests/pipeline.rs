//! End-to-end tests of fetching, grouping and rendering starred
//! repositories, driven by an in-memory source.

use std::collections::HashMap;
use std::sync::Arc;

use starred_github::{
    FetchOptions, Result, StarredEntry, StarredPage, StarredSource, fetch_all_starred,
};
use starred_protocol::{Catalog, Repository};
use starred_render::{RenderOptions, render};

/// Serves fixed pages of starred repositories.
struct FixtureSource {
    pages: HashMap<u32, Vec<StarredEntry>>,
    last_page: u32,
}

impl FixtureSource {
    fn new(pages: Vec<Vec<StarredEntry>>) -> Self {
        let last_page = u32::try_from(pages.len()).unwrap().max(1);
        let pages = (1..).zip(pages).collect();
        Self { pages, last_page }
    }
}

impl StarredSource for FixtureSource {
    async fn starred_page(&self, _username: &str, page: u32, _per_page: u8) -> Result<StarredPage> {
        Ok(StarredPage {
            entries: self.pages.get(&page).cloned().unwrap_or_default(),
            last_page: Some(self.last_page),
            rate_limit: None,
        })
    }
}

fn entry(full_name: &str, language: Option<&str>, description: Option<&str>) -> StarredEntry {
    StarredEntry {
        full_name: full_name.to_string(),
        html_url: format!("https://github.com/{full_name}"),
        language: language.map(str::to_string),
        description: description.map(str::to_string),
    }
}

async fn catalog_of(pages: Vec<Vec<StarredEntry>>) -> Catalog {
    let source = Arc::new(FixtureSource::new(pages));
    let repositories = fetch_all_starred(source, "octocat", &FetchOptions::default())
        .await
        .unwrap();
    Catalog::new(repositories)
}

fn names(repositories: &[Repository]) -> Vec<&str> {
    repositories.iter().map(Repository::full_name).collect()
}

#[tokio::test]
async fn repositories_are_sorted_and_grouped() {
    let catalog = catalog_of(vec![
        vec![entry("b/repo", Some("Go"), None)],
        vec![entry("a/repo", None, None)],
        vec![entry("c/repo", Some("go"), None)],
    ])
    .await;

    assert_eq!(names(catalog.repositories()), ["a/repo", "b/repo", "c/repo"]);

    let languages = catalog.languages();
    assert_eq!(languages.len(), 2);
    assert_eq!(names(&languages["Go"]), ["b/repo", "c/repo"]);
    assert_eq!(names(&languages["Others"]), ["a/repo"]);
}

#[tokio::test]
async fn user_without_stars_renders_empty_list() {
    let catalog = catalog_of(vec![]).await;
    assert!(catalog.is_empty());
    assert!(catalog.languages().is_empty());

    let document = render(&catalog, &RenderOptions::new("octocat"));
    assert!(document.contains("## Repositories\n\n\n## License"));
}

#[tokio::test]
async fn sorted_document_lists_languages_in_order() {
    let catalog = catalog_of(vec![
        vec![
            entry("rust-lang/rust", Some("rust"), Some("Empowering everyone")),
            entry("golang/go", Some("Go"), Some("The Go programming language")),
        ],
        vec![
            entry("nodejs/node", Some("javascript"), Some("")),
            entry("github/gitignore", None, Some("A collection of .gitignore templates")),
        ],
    ])
    .await;

    let document = render(&catalog, &RenderOptions::new("octocat").sorted(true));

    let contents = [
        "- [Go](#go)",
        "- [JavaScript](#javascript)",
        "- [Others](#others)",
        "- [Rust](#rust)",
    ];
    let positions: Vec<usize> = contents
        .iter()
        .map(|line| document.find(line).unwrap())
        .collect();
    assert!(positions.is_sorted());

    assert!(
        document.contains("## JavaScript\n\n- [nodejs/node](https://github.com/nodejs/node)\n")
    );
    assert!(document.contains(
        "- [rust-lang/rust](https://github.com/rust-lang/rust) - Empowering everyone\n"
    ));
    assert!(document.contains("[octocat](https://github.com/octocat)"));
}

#[tokio::test]
async fn flat_document_omits_descriptions() {
    let catalog = catalog_of(vec![vec![entry(
        "tokio-rs/tokio",
        Some("Rust"),
        Some("A runtime"),
    )]])
    .await;

    let document = render(&catalog, &RenderOptions::new("octocat"));
    assert!(document.contains(
        "## Repositories\n\n- [tokio-rs/tokio](https://github.com/tokio-rs/tokio)\n"
    ));
    assert!(!document.contains("A runtime"));
    assert!(!document.contains("## Contents"));
}
