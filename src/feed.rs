//! Trending and recommended repositories
//!
//! Trending comes from the Search API and is loaded once, when its page is
//! first shown. Recommendations are a curated list bundled with the binary.

use crate::api::SearchApi;
use crate::error::Result;
use crate::model::{parse_repositories, Repository};
use crate::search::{Completion, Notifications, RequestSlot};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{info, warn};

const RECOMMENDATIONS_JSON: &str = include_str!("../data/recommendations.json");

/// Curated recommendations shipped with the client
pub fn recommendations() -> Result<Vec<Repository>> {
    Ok(parse_repositories(RECOMMENDATIONS_JSON)?)
}

/// Trending repositories, fetched on a worker thread
pub struct TrendingFeed {
    api: Arc<dyn SearchApi>,
    pub items: Vec<Repository>,
    pub loading: bool,
    pub error: Option<String>,
    loaded_once: bool,
    requests: RequestSlot<Vec<Repository>>,
}

impl TrendingFeed {
    pub fn new(api: Arc<dyn SearchApi>) -> Self {
        Self {
            api,
            items: Vec::new(),
            loading: false,
            error: None,
            loaded_once: false,
            requests: RequestSlot::new(),
        }
    }

    /// Start the first load; later calls do nothing
    pub fn ensure_loaded(&mut self) {
        if !self.loaded_once {
            self.reload();
        }
    }

    /// Fetch again, replacing whatever is shown once the response arrives
    pub fn reload(&mut self) {
        self.loaded_once = true;
        self.loading = true;
        self.error = None;

        let api = Arc::clone(&self.api);
        let token = self.requests.start(move || api.trending());
        info!(token, "Loading trending repositories");
    }

    /// Apply a finished load. Returns true if anything changed.
    pub fn poll(&mut self, notifications: &mut Notifications, now: Instant) -> bool {
        match self.requests.try_take() {
            Some(completion) => {
                self.apply(completion, notifications, now);
                true
            }
            None => false,
        }
    }

    /// Block until the current load finishes or `timeout` passes
    pub fn wait(&mut self, notifications: &mut Notifications, timeout: Duration) -> bool {
        match self.requests.wait(timeout) {
            Some(completion) => {
                self.apply(completion, notifications, Instant::now());
                true
            }
            None => false,
        }
    }

    fn apply(
        &mut self,
        completion: Completion<Vec<Repository>>,
        notifications: &mut Notifications,
        now: Instant,
    ) {
        self.loading = false;

        match completion.outcome {
            Ok(items) => {
                info!(count = items.len(), "Trending repositories loaded");
                self.items = items;
            }
            Err(e) => {
                warn!(error = %e, "Trending load failed");
                self.error = Some(e.to_string());
                notifications.error(
                    "Trending Error",
                    "Failed to fetch trending repositories. Please try again.",
                    now,
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::NavError;

    struct FixedTrending(Option<Vec<Repository>>);

    impl SearchApi for FixedTrending {
        fn search(&self, _query: &str) -> Result<Vec<Repository>> {
            Ok(Vec::new())
        }

        fn trending(&self) -> Result<Vec<Repository>> {
            match &self.0 {
                Some(items) => Ok(items.clone()),
                None => Err(NavError::Status {
                    status: 500,
                    reason: "Internal Server Error".into(),
                }),
            }
        }
    }

    #[test]
    fn bundled_recommendations_parse() {
        let recs = recommendations().unwrap();
        assert!(!recs.is_empty());
        assert!(recs.iter().all(|r| r.url.starts_with("https://github.com/")));
        assert!(recs.iter().any(|r| r.tags.iter().any(|t| t == "foss")));
    }

    #[test]
    fn loads_once_and_applies_items() {
        let items = recommendations().unwrap();
        let mut feed = TrendingFeed::new(Arc::new(FixedTrending(Some(items.clone()))));
        let mut toasts = Notifications::new(Duration::from_secs(4));

        feed.ensure_loaded();
        assert!(feed.loading);
        assert!(feed.wait(&mut toasts, Duration::from_secs(5)));
        assert!(!feed.loading);
        assert_eq!(feed.items, items);

        // Already loaded: no new request
        feed.ensure_loaded();
        assert!(!feed.loading);
    }

    #[test]
    fn failure_sets_error_and_toast() {
        let mut feed = TrendingFeed::new(Arc::new(FixedTrending(None)));
        let mut toasts = Notifications::new(Duration::from_secs(4));
        feed.reload();
        assert!(feed.wait(&mut toasts, Duration::from_secs(5)));
        assert!(feed.error.as_deref().unwrap().contains("500"));
        assert_eq!(toasts.latest().map(|t| t.title.as_str()), Some("Trending Error"));
    }

    #[test]
    fn reload_replaces_earlier_load() {
        let items = recommendations().unwrap();
        let mut feed = TrendingFeed::new(Arc::new(FixedTrending(Some(items.clone()))));
        let mut toasts = Notifications::new(Duration::from_secs(4));

        feed.reload();
        feed.reload();
        assert!(feed.wait(&mut toasts, Duration::from_secs(5)));
        assert_eq!(feed.items, items);

        // The first load's completion is stale and never applied again
        std::thread::sleep(Duration::from_millis(100));
        assert!(!feed.poll(&mut toasts, Instant::now()));
        assert!(!feed.loading);
    }
}
