//! Connection configuration for the content store and image CDN.
//!
//! One [`StudioConfig`] value is assembled in `main` and handed to both the
//! content client and the image URL resolver. There is deliberately no
//! ambient global: anything that talks to the store receives the config it
//! was constructed with, which keeps the resolver pure and the client
//! testable against a local stub.

/// Connection settings for a hosted content project.
///
/// `project_id` and `dataset` identify the content project; `api_version` is
/// the date-pinned query API revision (e.g. `2024-01-01`). `use_cdn` selects
/// the cached edge endpoint — when false every query bypasses the read cache
/// and fetches fresh.
#[derive(Debug, Clone, PartialEq)]
pub struct StudioConfig {
    pub project_id: String,
    pub dataset: String,
    pub api_version: String,
    pub use_cdn: bool,
    /// Maximum staleness, in seconds, a downstream cache may serve before
    /// revalidating. Surfaced as a `Cache-Control` header; the cache itself
    /// lives outside this binary.
    pub revalidate_secs: u64,
}

impl StudioConfig {
    /// True when both identifiers needed to address project assets are set.
    ///
    /// Image URL resolution degrades silently (placeholder image) when this
    /// is false; it is a completeness check, not an error.
    pub fn is_complete(&self) -> bool {
        !self.project_id.is_empty() && !self.dataset.is_empty()
    }
}

impl Default for StudioConfig {
    fn default() -> Self {
        StudioConfig {
            project_id: String::new(),
            dataset: "production".to_string(),
            api_version: "2024-01-01".to_string(),
            use_cdn: false,
            revalidate_secs: 60,
        }
    }
}
