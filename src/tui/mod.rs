//! Interactive terminal interface
//!
//! Three pages (search, trending, recommended) over a shared repository
//! table. The event loop ticks the search controller every frame so the
//! debounce and request completions never block key handling.

pub mod app;
pub mod colors;
pub mod menu;
pub mod search;
pub mod table;
pub mod ui;

use crate::api::SearchApi;
use crate::config::AppConfig;
use crate::error::Result;
use std::sync::Arc;

/// Take over the terminal and run until the user quits
pub fn run(config: AppConfig, api: Arc<dyn SearchApi>) -> Result<()> {
    let mut app = app::App::new(config, api);
    let mut terminal = ratatui::init();
    let result = app.run(&mut terminal);
    ratatui::restore();
    result
}
