//! The starred repository record.

/// A repository starred by a user.
///
/// Built once from an API response and never mutated afterwards. The
/// repository is identified by its full name; the type does not enforce
/// uniqueness, so duplicates reported by the API are kept as-is.
///
/// # Examples
///
/// ```
/// use starred_protocol::Repository;
///
/// let repo = Repository::new(
///     "rust-lang/rust",
///     "https://github.com/rust-lang/rust",
///     "Rust",
///     "Empowering everyone to build reliable and efficient software.",
/// );
/// assert_eq!(repo.full_name(), "rust-lang/rust");
/// assert_eq!(repo.language(), "Rust");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Repository {
    full_name: String,
    url: String,
    language: String,
    description: String,
}

impl Repository {
    /// Creates a new repository record.
    ///
    /// An empty `language` means the platform could not classify the
    /// repository; an empty `description` means none was provided.
    #[must_use]
    pub fn new(
        full_name: impl Into<String>,
        url: impl Into<String>,
        language: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            full_name: full_name.into(),
            url: url.into(),
            language: language.into(),
            description: description.into(),
        }
    }

    /// Returns the full name in `"owner/name"` format.
    #[must_use]
    pub fn full_name(&self) -> &str {
        &self.full_name
    }

    /// Returns the repository's web URL.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Returns the primary language as reported by the platform.
    ///
    /// This is the raw value; see [`display_language`](crate::display_language)
    /// for the name used when grouping.
    #[must_use]
    pub fn language(&self) -> &str {
        &self.language
    }

    /// Returns the description, which may be empty.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }
}
