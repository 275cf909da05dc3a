//! fossnav - FOSS search and contribution navigator
//!
//! Terminal client for discovering open-source repositories through an
//! external Search API.
//!
//! # Features
//!
//! - **Incremental Search**: debounced search-as-you-type with one request per
//!   quiet window and stale responses discarded
//! - **Trending**: repositories ranked by the backend
//! - **Recommendations**: a curated list bundled with the client
//! - **Login**: hands off to the backend's GitHub OAuth flow in the browser
//!
//! # Example
//!
//! ```no_run
//! use fossnav::{AppConfig, HttpSearchApi, SearchController, SearchView};
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! fn main() -> fossnav::Result<()> {
//!     let config = AppConfig::from_env()?;
//!     let api = Arc::new(HttpSearchApi::new(&config)?);
//!     let mut controller = SearchController::from_config(api, &config);
//!
//!     controller.submit("terminal emulator");
//!     controller.wait_for_completion(Duration::from_secs(15));
//!
//!     if let SearchView::Results(repos) = controller.view() {
//!         for repo in repos {
//!             println!("{} ({} stars)", repo.title, fossnav::format_count(repo.stars));
//!         }
//!     }
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod config;
pub mod error;
pub mod feed;
pub mod logging;
pub mod model;
pub mod search;
pub mod tui;

// Re-export main types
pub use api::{HttpSearchApi, SearchApi};
pub use config::AppConfig;
pub use error::{NavError, Result};
pub use feed::{recommendations, TrendingFeed};
pub use model::Repository;
pub use search::{SearchController, SearchState, SearchView};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Format a counter with thousands separators (`45210` -> `45,210`)
pub fn format_count(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Format a skill-match score for display
pub fn format_score(score: Option<f64>) -> String {
    match score {
        Some(s) if s.is_finite() => format!("{:.2}", s),
        _ => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_get_separators() {
        assert_eq!(format_count(0), "0");
        assert_eq!(format_count(999), "999");
        assert_eq!(format_count(1000), "1,000");
        assert_eq!(format_count(45210), "45,210");
        assert_eq!(format_count(1234567), "1,234,567");
    }

    #[test]
    fn scores() {
        assert_eq!(format_score(Some(0.8234)), "0.82");
        assert_eq!(format_score(None), "");
        assert_eq!(format_score(Some(f64::NAN)), "");
    }
}
