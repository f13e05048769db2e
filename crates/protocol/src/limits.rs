//! Limits on how starred repositories are fetched.

/// Upper bound on concurrent page requests.
///
/// GitHub allows at most 100 concurrent requests per credential, shared
/// across the REST and GraphQL APIs.
pub const MAX_CONCURRENCY: usize = 90;

/// Largest page size GitHub accepts.
pub const MAX_PER_PAGE: u8 = 100;
