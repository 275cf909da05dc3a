//! Search API client
//!
//! The backend is an external collaborator. Everything the client needs from
//! it sits behind [`SearchApi`], so views and tests can swap the transport.

pub mod auth;
pub mod http;

pub use http::HttpSearchApi;

use crate::error::Result;
use crate::model::Repository;
use url::Url;

/// Read endpoints of the Search API
pub trait SearchApi: Send + Sync {
    /// `GET /search?query=<text>`
    fn search(&self, query: &str) -> Result<Vec<Repository>>;

    /// `GET /trending`
    fn trending(&self) -> Result<Vec<Repository>>;
}

/// Resolve `path` against the API base, keeping any path prefix the base has
pub fn endpoint(base: &Url, path: &str) -> Result<Url> {
    let mut base = base.clone();
    if !base.path().ends_with('/') {
        let prefixed = format!("{}/", base.path());
        base.set_path(&prefixed);
    }
    Ok(base.join(path.trim_start_matches('/'))?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_keeps_base_path_prefix() {
        let base = Url::parse("https://example.org/api").unwrap();
        assert_eq!(
            endpoint(&base, "search").unwrap().as_str(),
            "https://example.org/api/search"
        );
        let root = Url::parse("http://localhost:5000").unwrap();
        assert_eq!(
            endpoint(&root, "/trending").unwrap().as_str(),
            "http://localhost:5000/trending"
        );
    }
}
