//! Blocking HTTP transport for the Search API
//!
//! Requests always run on worker threads owned by the views, never on the
//! render loop, so a blocking client is enough.

use super::{endpoint, SearchApi};
use crate::config::AppConfig;
use crate::error::{NavError, Result};
use crate::model::{parse_repositories, Repository};
use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, COOKIE};
use std::time::Instant;
use tracing::{debug, info, warn};
use url::Url;

/// Search API over HTTP with credentials included
#[derive(Debug, Clone)]
pub struct HttpSearchApi {
    client: Client,
    base: Url,
}

impl HttpSearchApi {
    pub fn new(config: &AppConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        if let Some(cookie) = &config.session_cookie {
            let value = HeaderValue::from_str(cookie)
                .map_err(|e| NavError::Config(format!("Invalid session cookie: {}", e)))?;
            headers.insert(COOKIE, value);
        }

        let client = Client::builder()
            .cookie_store(true)
            .timeout(config.request_timeout)
            .user_agent(concat!("fossnav/", env!("CARGO_PKG_VERSION")))
            .default_headers(headers)
            .build()?;

        Ok(Self {
            client,
            base: config.api_base.clone(),
        })
    }

    /// URL for a search, with `query` URL-encoded
    pub fn search_url(&self, query: &str) -> Result<Url> {
        let mut url = endpoint(&self.base, "search")?;
        url.query_pairs_mut().append_pair("query", query);
        Ok(url)
    }

    pub fn trending_url(&self) -> Result<Url> {
        endpoint(&self.base, "trending")
    }

    fn fetch_repositories(&self, url: Url) -> Result<Vec<Repository>> {
        let start = Instant::now();
        debug!(%url, "GET");

        let response = self.client.get(url.clone()).send()?;
        let status = response.status();
        if !status.is_success() {
            warn!(%url, status = status.as_u16(), "Search API returned an error status");
            return Err(NavError::from_status(status));
        }

        let body = response.text()?;
        let repos = parse_repositories(&body)?;
        info!(
            %url,
            results = repos.len(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Search API responded"
        );
        Ok(repos)
    }
}

impl SearchApi for HttpSearchApi {
    fn search(&self, query: &str) -> Result<Vec<Repository>> {
        let url = self.search_url(query)?;
        self.fetch_repositories(url)
    }

    fn trending(&self) -> Result<Vec<Repository>> {
        let url = self.trending_url()?;
        self.fetch_repositories(url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_url_encodes_query() {
        let api = HttpSearchApi::new(&AppConfig::default()).unwrap();
        let url = api.search_url("c++ & rust/tui").unwrap();
        assert_eq!(url.path(), "/search");
        let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        assert_eq!(pairs, vec![("query".to_string(), "c++ & rust/tui".to_string())]);
        assert!(!url.as_str().contains('&'));
    }

    #[test]
    fn rejects_session_cookie_with_newline() {
        let config = AppConfig {
            session_cookie: Some("session=abc\r\nX-Evil: 1".into()),
            ..AppConfig::default()
        };
        assert!(matches!(HttpSearchApi::new(&config), Err(NavError::Config(_))));
    }
}
