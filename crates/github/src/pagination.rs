//! Pagination metadata from GitHub's `Link` header.
//!
//! GitHub Link headers look like:
//! `<https://api.github.com/user/1/starred?per_page=100&page=2>; rel="next", <...&page=7>; rel="last"`
//!
//! Only the `rel="last"` entry matters here: the coordinator reads it from the
//! first page to know how many pages to fan out. The header is absent when
//! everything fits on one page.

/// Returns the page number of the `rel="last"` link, if any.
///
/// # Examples
///
/// ```
/// use starred_github::pagination::last_page;
///
/// let header = r#"<https://api.github.com/user/1/starred?page=2>; rel="next", <https://api.github.com/user/1/starred?page=7>; rel="last""#;
/// assert_eq!(last_page(header), Some(7));
/// assert_eq!(last_page(""), None);
/// ```
#[must_use]
pub fn last_page(link_header: &str) -> Option<u32> {
    link_header.split(',').find_map(|part| {
        let mut url = None;
        let mut is_last = false;

        for segment in part.split(';').map(str::trim) {
            if let Some(inner) = segment.strip_prefix('<').and_then(|s| s.strip_suffix('>')) {
                url = Some(inner);
            } else if let Some(rel) = segment.strip_prefix("rel=") {
                is_last = rel.trim_matches('"') == "last";
            }
        }

        if is_last { url.and_then(page_param) } else { None }
    })
}

/// Extracts the `page` query parameter from a URL.
fn page_param(url: &str) -> Option<u32> {
    let (_, query) = url.split_once('?')?;
    query
        .split('&')
        .find_map(|param| param.strip_prefix("page="))
        .and_then(|value| value.parse().ok())
}
