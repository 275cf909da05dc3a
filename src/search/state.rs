//! Search state owned by the controller and read by the renderer

use crate::model::Repository;

/// Mutable state of one search view
#[derive(Debug, Default, Clone)]
pub struct SearchState {
    /// Text as typed, updated on every keystroke
    pub query: String,
    /// Results of the latest accepted request
    pub results: Vec<Repository>,
    /// True while the request for the current query is in flight
    pub loading: bool,
    /// Message of the latest failed request
    pub error: Option<String>,
}

/// What the renderer should show for a given state
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SearchView<'a> {
    /// Nothing typed yet
    Idle,
    Loading,
    Failed(&'a str),
    /// The backend answered with an empty list for a non-empty query
    NoMatches,
    Results(&'a [Repository]),
}

impl SearchState {
    /// Error first, then loading, results, and finally the empty branches
    pub fn view(&self) -> SearchView<'_> {
        if let Some(error) = self.error.as_deref() {
            SearchView::Failed(error)
        } else if self.loading {
            SearchView::Loading
        } else if !self.results.is_empty() {
            SearchView::Results(&self.results)
        } else if !self.query.trim().is_empty() {
            SearchView::NoMatches
        } else {
            SearchView::Idle
        }
    }
}
