//! Incremental search controller
//!
//! Turns a keystroke stream into at most one request per quiet window and
//! reconciles completions into [`SearchState`]. The owning event loop calls
//! [`SearchController::tick`] regularly; nothing here blocks except
//! [`SearchController::wait_for_completion`].
//!
//! Every execution gets a fresh request token. Only the completion for the
//! latest token is applied, so a slow response can never overwrite the
//! result of a newer query. Scheduling a new search abandons the request in
//! flight, since its query is no longer the one on screen.

use super::debounce::Debouncer;
use super::notify::Notifications;
use super::state::{SearchState, SearchView};
use super::worker::{Completion, RequestSlot};
use crate::api::SearchApi;
use crate::config::AppConfig;
use crate::model::Repository;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

const SEARCH_ERROR_TITLE: &str = "Search Error";
const SEARCH_ERROR_MESSAGE: &str = "Failed to fetch search results. Please try again.";

type SearchCompletion = Completion<Vec<Repository>>;

pub struct SearchController {
    api: Arc<dyn SearchApi>,
    state: SearchState,
    debouncer: Debouncer<String>,
    notifications: Notifications,
    requests: RequestSlot<Vec<Repository>>,
    requests_issued: u64,
    /// Bumped whenever `state.results` is replaced or cleared
    results_version: u64,
}

impl SearchController {
    pub fn new(api: Arc<dyn SearchApi>, quiet_window: Duration, toast_ttl: Duration) -> Self {
        Self {
            api,
            state: SearchState::default(),
            debouncer: Debouncer::new(quiet_window),
            notifications: Notifications::new(toast_ttl),
            requests: RequestSlot::new(),
            requests_issued: 0,
            results_version: 0,
        }
    }

    pub fn from_config(api: Arc<dyn SearchApi>, config: &AppConfig) -> Self {
        Self::new(api, config.quiet_window, config.toast_ttl)
    }

    pub fn state(&self) -> &SearchState {
        &self.state
    }

    /// What to render. A typed query that has not been searched yet reads
    /// as loading rather than as an empty answer.
    pub fn view(&self) -> SearchView<'_> {
        match self.state.view() {
            SearchView::NoMatches if self.debouncer.is_pending() => SearchView::Loading,
            view => view,
        }
    }

    pub fn notifications(&self) -> &Notifications {
        &self.notifications
    }

    pub fn notifications_mut(&mut self) -> &mut Notifications {
        &mut self.notifications
    }

    /// Number of network requests started so far
    pub fn requests_issued(&self) -> u64 {
        self.requests_issued
    }

    /// Changes every time a new result list is applied
    pub fn results_version(&self) -> u64 {
        self.results_version
    }

    /// True while a scheduled search has not fired yet
    pub fn is_pending(&self) -> bool {
        self.debouncer.is_pending()
    }

    /// True while the latest request has not completed
    pub fn is_in_flight(&self) -> bool {
        self.requests.is_active()
    }

    /// When the pending scheduled search fires
    pub fn pending_deadline(&self) -> Option<Instant> {
        self.debouncer.deadline()
    }

    /// Record the typed text right away and schedule a search for it
    pub fn on_input_change(&mut self, text: impl Into<String>, now: Instant) {
        let text = text.into();
        self.state.query.clone_from(&text);
        self.schedule_search(text, now);
    }

    /// Debounced search; a newer call within the quiet window replaces this one.
    /// A request still in flight is abandoned, so its results never land
    /// under the newer query.
    pub fn schedule_search(&mut self, text: String, now: Instant) {
        if let Some(token) = self.requests.cancel() {
            debug!(token, "Abandoned in-flight search for newer input");
            self.state.loading = false;
        }
        if let Some(dropped) = self.debouncer.schedule(text, now) {
            debug!(query = %dropped, "Superseded pending search");
        }
    }

    /// Fire a due search, apply finished requests and expire old toasts.
    /// Returns true when anything visible changed.
    pub fn tick(&mut self, now: Instant) -> bool {
        let mut changed = false;

        if let Some(text) = self.debouncer.poll(now) {
            debug!(query = %text, "Quiet window elapsed");
            self.execute_search(&text);
            changed = true;
        }

        if let Some(completion) = self.requests.try_take() {
            self.apply(completion, now);
            changed = true;
        }

        changed |= self.notifications.expire(now);
        changed
    }

    /// Run a search immediately
    pub fn execute_search(&mut self, text: &str) {
        if text.trim().is_empty() {
            // Any response still in flight belongs to an abandoned query
            self.requests.cancel();
            self.state.results.clear();
            self.results_version += 1;
            self.state.error = None;
            self.state.loading = false;
            return;
        }

        let api = Arc::clone(&self.api);
        let query = text.to_string();
        let token = self.requests.start(move || api.search(&query));
        self.requests_issued += 1;
        self.state.loading = true;
        self.state.error = None;

        info!(query = %text, token, "Issuing search");
    }

    /// Search for `text` right away, skipping the quiet window
    pub fn submit(&mut self, text: impl Into<String>) {
        let text = text.into();
        self.debouncer.cancel();
        self.state.query.clone_from(&text);
        self.execute_search(&text);
    }

    /// Search again for the last-known query
    pub fn retry(&mut self) {
        self.state.error = None;
        let query = self.state.query.clone();
        self.execute_search(&query);
    }

    /// Cancel the scheduled search when the hosting view goes away.
    /// Requests already in flight finish on their own but are never applied.
    pub fn teardown(&mut self) {
        if let Some(dropped) = self.debouncer.cancel() {
            debug!(query = %dropped, "Cancelled pending search on teardown");
        }
        self.requests.cancel();
        self.state.loading = false;
    }

    /// Block until one completion is applied or `timeout` passes.
    /// Stale completions are skipped without ending the wait.
    pub fn wait_for_completion(&mut self, timeout: Duration) -> bool {
        match self.requests.wait(timeout) {
            Some(completion) => {
                self.apply(completion, Instant::now());
                true
            }
            None => false,
        }
    }

    /// Apply the completion of the latest request
    fn apply(&mut self, completion: SearchCompletion, now: Instant) {
        self.state.loading = false;

        match completion.outcome {
            Ok(results) => {
                debug!(token = completion.token, results = results.len(), "Search completed");
                self.state.results = results;
                self.results_version += 1;
            }
            Err(e) => {
                warn!(token = completion.token, error = %e, "Search failed");
                self.state.error = Some(e.to_string());
                self.notifications
                    .error(SEARCH_ERROR_TITLE, SEARCH_ERROR_MESSAGE, now);
            }
        }
    }
}

impl Drop for SearchController {
    fn drop(&mut self) {
        self.teardown();
    }
}
