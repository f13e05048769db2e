//! Markdown rendering for the starred application.
//!
//! [`render`] turns a [`Catalog`] into an "awesome list" document: a header,
//! the repositories (either flat or grouped by language with a table of
//! contents), and a license footer.
//!
//! # Examples
//!
//! ```
//! use starred_protocol::{Catalog, Repository};
//! use starred_render::{RenderOptions, render};
//!
//! let catalog = Catalog::new(vec![Repository::new(
//!     "tokio-rs/tokio",
//!     "https://github.com/tokio-rs/tokio",
//!     "Rust",
//!     "A runtime for writing reliable asynchronous applications",
//! )]);
//!
//! let document = render(&catalog, &RenderOptions::new("octocat").sorted(true));
//! assert!(document.contains("- [Rust](#rust)"));
//! assert!(document.contains("- [tokio-rs/tokio](https://github.com/tokio-rs/tokio) - A runtime"));
//! ```

use std::fmt;

use starred_protocol::{Catalog, Repository};

/// Placeholder replaced with the username in headers and footers.
pub const USERNAME_PLACEHOLDER: &str = "{username}";

/// Header used when no template header is configured.
pub const DEFAULT_HEADER: &str = "\
# Awesome Stars [![Awesome](https://cdn.rawgit.com/sindresorhus/awesome/d7305f38d29fed78fa85652e3a63e154dd8e8829/media/badge.svg)](https://github.com/sindresorhus/awesome)

> A curated list of my GitHub stars!  Generated by [starred](https://github.com/juev/starred)
";

/// Footer used when no template footer is configured.
pub const DEFAULT_FOOTER: &str = "\
## License

[![CC0](https://mirrors.creativecommons.org/presskit/buttons/88x31/svg/cc-zero.svg)](https://creativecommons.org/publicdomain/zero/1.0/)

To the extent possible under law, [{username}](https://github.com/{username}) has waived all copyright and related or neighboring rights to this work.
";

/// How a catalog is rendered.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderOptions {
    username: String,
    sorted: bool,
    header: Option<String>,
    footer: Option<String>,
}

impl RenderOptions {
    /// Renders the flat list for `username` with the default template.
    #[must_use]
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            ..Self::default()
        }
    }

    /// Groups the list by language when `sorted` is true.
    #[must_use]
    pub fn sorted(mut self, sorted: bool) -> Self {
        self.sorted = sorted;
        self
    }

    /// Replaces the default header. `None` keeps the default.
    #[must_use]
    pub fn with_header(mut self, header: Option<String>) -> Self {
        self.header = header;
        self
    }

    /// Replaces the default footer. `None` keeps the default.
    #[must_use]
    pub fn with_footer(mut self, footer: Option<String>) -> Self {
        self.footer = footer;
        self
    }

    fn header(&self) -> String {
        self.fill(self.header.as_deref().unwrap_or(DEFAULT_HEADER))
    }

    fn footer(&self) -> String {
        self.fill(self.footer.as_deref().unwrap_or(DEFAULT_FOOTER))
    }

    fn fill(&self, template: &str) -> String {
        template.replace(USERNAME_PLACEHOLDER, &self.username)
    }
}

/// Renders `catalog` as a Markdown document.
#[must_use]
pub fn render(catalog: &Catalog, options: &RenderOptions) -> String {
    Document { catalog, options }.to_string()
}

/// Returns the in-page anchor of a language section.
///
/// # Examples
///
/// ```
/// assert_eq!(starred_render::anchor("Emacs Lisp"), "emacs-lisp");
/// assert_eq!(starred_render::anchor("C++"), "c++");
/// ```
#[must_use]
pub fn anchor(language: &str) -> String {
    language.to_lowercase().replace(' ', "-")
}

struct Document<'a> {
    catalog: &'a Catalog,
    options: &'a RenderOptions,
}

impl fmt::Display for Document<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_block(f, &self.options.header())?;
        writeln!(f)?;

        if self.options.sorted {
            self.write_grouped(f)?;
        } else {
            self.write_flat(f)?;
        }

        writeln!(f)?;
        write_block(f, &self.options.footer())
    }
}

impl Document<'_> {
    fn write_flat(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "## Repositories")?;
        writeln!(f)?;
        for repo in self.catalog.repositories() {
            writeln!(f, "- [{}]({})", repo.full_name(), repo.url())?;
        }
        Ok(())
    }

    fn write_grouped(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let languages = self.catalog.languages();

        writeln!(f, "## Contents")?;
        writeln!(f)?;
        for language in languages.keys() {
            writeln!(f, "- [{language}](#{})", anchor(language))?;
        }

        for (language, repos) in languages {
            writeln!(f)?;
            writeln!(f, "## {language}")?;
            writeln!(f)?;
            for repo in repos {
                write_entry(f, repo)?;
            }
        }
        Ok(())
    }
}

fn write_entry(f: &mut fmt::Formatter<'_>, repo: &Repository) -> fmt::Result {
    write!(f, "- [{}]({})", repo.full_name(), repo.url())?;
    let description = repo.description().trim();
    if !description.is_empty() {
        write!(f, " - {}", description.replace(['\r', '\n'], " "))?;
    }
    writeln!(f)
}

/// Writes `text` so that it ends with exactly one newline.
fn write_block(f: &mut fmt::Formatter<'_>, text: &str) -> fmt::Result {
    writeln!(f, "{}", text.trim_end())
}
