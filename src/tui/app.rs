use crate::api::{auth, SearchApi};
use crate::config::AppConfig;
use crate::feed::{recommendations, TrendingFeed};
use crate::model::Repository;
use crate::search::{SearchController, SearchView};
use crate::tui::menu::{self, ActionKind, ActionsMenu, ActiveMenu, InfoDialog};
use crate::tui::search::SearchInput;
use crate::tui::table::{sorted_indices, SortColumn, TableState};
use crate::tui::ui;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::DefaultTerminal;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{info, warn};

/// Pages of the application, one per original site section
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Search,
    Trending,
    Recommended,
}

impl Page {
    pub const ALL: [Page; 3] = [Page::Search, Page::Trending, Page::Recommended];

    pub fn title(&self) -> &'static str {
        match self {
            Page::Search => "Search",
            Page::Trending => "Trending",
            Page::Recommended => "Recommended",
        }
    }

    fn index(&self) -> usize {
        match self {
            Page::Search => 0,
            Page::Trending => 1,
            Page::Recommended => 2,
        }
    }
}

pub struct App {
    pub config: AppConfig,
    pub page: Page,

    // Search page
    pub controller: SearchController,
    pub input: SearchInput,
    seen_results_version: u64,

    // Other pages
    pub trending: TrendingFeed,
    pub recommended: Vec<Repository>,

    /// One table state per page
    pub tables: [TableState; 3],

    pub active_menu: ActiveMenu,
    pub status_message: String,
    /// Advances every tick; drives the spinner
    pub tick_count: u64,

    // Quit flag
    pub should_quit: bool,
}

impl App {
    pub fn new(config: AppConfig, api: Arc<dyn SearchApi>) -> Self {
        let recommended = match recommendations() {
            Ok(list) => list,
            Err(e) => {
                warn!(error = %e, "Bundled recommendations failed to parse");
                Vec::new()
            }
        };

        let mut tables: [TableState; 3] = Default::default();
        tables[Page::Recommended.index()].reset(recommended.len());

        Self {
            controller: SearchController::from_config(Arc::clone(&api), &config),
            trending: TrendingFeed::new(api),
            config,
            page: Page::Search,
            input: SearchInput::default(),
            seen_results_version: 0,
            recommended,
            tables,
            active_menu: ActiveMenu::None,
            status_message: "Ready".to_string(),
            tick_count: 0,
            should_quit: false,
        }
    }

    pub fn run(&mut self, terminal: &mut DefaultTerminal) -> crate::Result<()> {
        let tick_rate = Duration::from_millis(50);
        let mut last_tick = Instant::now();

        loop {
            terminal.draw(|frame| ui::draw(frame, self))?;

            // Wake early when a scheduled search comes due
            let mut timeout = tick_rate.saturating_sub(last_tick.elapsed());
            if let Some(due) = self.controller.pending_deadline() {
                timeout = timeout.min(due.saturating_duration_since(Instant::now()));
            }
            if event::poll(timeout)? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key(key, Instant::now());
                    }
                }
            }

            let search_due = self
                .controller
                .pending_deadline()
                .is_some_and(|due| Instant::now() >= due);
            if search_due || last_tick.elapsed() >= tick_rate {
                self.on_tick(Instant::now());
                last_tick = Instant::now();
            }

            if self.should_quit {
                self.controller.teardown();
                return Ok(());
            }
        }
    }

    pub fn on_tick(&mut self, now: Instant) {
        self.tick_count = self.tick_count.wrapping_add(1);
        self.controller.tick(now);
        if self
            .trending
            .poll(self.controller.notifications_mut(), now)
        {
            let total = self.trending.items.len();
            self.tables[Page::Trending.index()].reset(total);
        }

        let version = self.controller.results_version();
        if version != self.seen_results_version {
            self.seen_results_version = version;
            let total = self.controller.state().results.len();
            self.tables[Page::Search.index()].reset(total);
            if total > 0 {
                self.status_message = format!("{} projects", total);
            }
        }
    }

    pub fn table(&self) -> &TableState {
        &self.tables[self.page.index()]
    }

    pub fn table_mut(&mut self) -> &mut TableState {
        &mut self.tables[self.page.index()]
    }

    /// Repositories listed on the current page, in backend order
    pub fn current_list(&self) -> &[Repository] {
        match self.page {
            Page::Search => match self.controller.view() {
                SearchView::Results(repos) => repos,
                _ => &[],
            },
            Page::Trending => &self.trending.items,
            Page::Recommended => &self.recommended,
        }
    }

    /// Display order of the current list under the current sort
    pub fn display_order(&self) -> Vec<usize> {
        let table = self.table();
        sorted_indices(self.current_list(), table.sort_column, table.sort_order)
    }

    pub fn selected_repository(&self) -> Option<&Repository> {
        let row = self.table().selected?;
        let idx = *self.display_order().get(row)?;
        self.current_list().get(idx)
    }

    pub fn switch_page(&mut self, page: Page) {
        self.page = page;
        self.active_menu = ActiveMenu::None;
        if page == Page::Trending {
            self.trending.ensure_loaded();
        }
        self.input.focused = page == Page::Search && self.input.focused;
    }

    // --- Key handling ---

    pub fn handle_key(&mut self, key: KeyEvent, now: Instant) {
        // Global keys
        match key.code {
            KeyCode::Char('c') | KeyCode::Char('q')
                if key.modifiers.contains(KeyModifiers::CONTROL) =>
            {
                self.should_quit = true;
                return;
            }
            KeyCode::F(1) => return self.switch_page(Page::Search),
            KeyCode::F(2) => return self.switch_page(Page::Trending),
            KeyCode::F(3) => return self.switch_page(Page::Recommended),
            _ => {}
        }

        if !matches!(self.active_menu, ActiveMenu::None) {
            self.handle_menu_key(key, now);
            return;
        }

        if key.code == KeyCode::Esc {
            if self.page == Page::Search && self.input.focused && !self.input.text.is_empty() {
                self.input.clear();
                self.controller.on_input_change("", now);
            } else if self.page == Page::Search && self.input.focused {
                self.input.focused = false;
            } else {
                self.should_quit = true;
            }
            return;
        }

        if self.page == Page::Search && self.input.focused {
            self.handle_input_key(key, now);
        } else {
            self.handle_table_key(key, now);
        }
    }

    fn handle_input_key(&mut self, key: KeyEvent, now: Instant) {
        let changed = match key.code {
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.input.insert(c)
            }
            KeyCode::Backspace => self.input.backspace(),
            KeyCode::Delete => self.input.delete(),
            KeyCode::Left => {
                self.input.move_left();
                false
            }
            KeyCode::Right => {
                self.input.move_right();
                false
            }
            KeyCode::Home => {
                self.input.home();
                false
            }
            KeyCode::End => {
                self.input.end();
                false
            }
            KeyCode::Enter => {
                self.input.focused = false;
                self.controller.submit(self.input.text.clone());
                false
            }
            KeyCode::Tab | KeyCode::Down => {
                self.input.focused = false;
                false
            }
            _ => false,
        };

        if changed {
            self.controller.on_input_change(self.input.text.clone(), now);
        }
    }

    fn handle_table_key(&mut self, key: KeyEvent, now: Instant) {
        let total = self.current_list().len();
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => self.table_mut().select_prev(),
            KeyCode::Down | KeyCode::Char('j') => self.table_mut().select_next(total),
            KeyCode::PageUp => self.table_mut().page_up(),
            KeyCode::PageDown => self.table_mut().page_down(total),
            KeyCode::Home => self.table_mut().select_first(),
            KeyCode::End => self.table_mut().select_last(total),

            KeyCode::Tab | KeyCode::Char('/') => {
                self.switch_page(Page::Search);
                self.input.focused = true;
            }

            KeyCode::Enter => {
                if self.selected_repository().is_some() {
                    self.active_menu = ActiveMenu::Actions(ActionsMenu::new());
                }
            }
            KeyCode::Char('o') => self.run_action(ActionKind::OpenInBrowser, now),
            KeyCode::Char('y') => self.run_action(ActionKind::CopyUrl, now),
            KeyCode::Char('i') => self.run_action(ActionKind::Details, now),

            // Sort columns
            KeyCode::F(4) => self.sort_by(SortColumn::Relevance),
            KeyCode::F(5) => self.sort_by(SortColumn::Title),
            KeyCode::F(6) => self.sort_by(SortColumn::Stars),
            KeyCode::F(7) => self.sort_by(SortColumn::Forks),
            KeyCode::F(8) => self.sort_by(SortColumn::Watchers),
            KeyCode::F(9) => self.sort_by(SortColumn::Match),
            KeyCode::Char('s') => {
                let next = self.table().sort_column.next();
                self.sort_by(next);
            }
            KeyCode::Char('S') => {
                let column = self.table().sort_column;
                self.sort_by(column);
            }

            KeyCode::Char('r') => self.retry(),
            KeyCode::Char('l') => self.login(false, now),
            KeyCode::Char('L') => self.login(true, now),

            // Any other printable char on the search page focuses the input and types it
            KeyCode::Char(c)
                if self.page == Page::Search && !key.modifiers.contains(KeyModifiers::CONTROL) =>
            {
                self.input.focused = true;
                self.input.end();
                self.input.insert(c);
                self.controller.on_input_change(self.input.text.clone(), now);
            }

            _ => {}
        }
    }

    fn handle_menu_key(&mut self, key: KeyEvent, now: Instant) {
        match &mut self.active_menu {
            ActiveMenu::Actions(actions) => match key.code {
                KeyCode::Up | KeyCode::Char('k') => actions.move_up(),
                KeyCode::Down | KeyCode::Char('j') => actions.move_down(),
                KeyCode::Enter => {
                    let action = actions.selected_action();
                    self.active_menu = ActiveMenu::None;
                    self.run_action(action, now);
                }
                KeyCode::Esc => self.active_menu = ActiveMenu::None,
                _ => {}
            },
            ActiveMenu::Info(_) => {
                if matches!(key.code, KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q')) {
                    self.active_menu = ActiveMenu::None;
                }
            }
            ActiveMenu::None => {}
        }
    }

    fn sort_by(&mut self, column: SortColumn) {
        let total = self.current_list().len();
        let table = self.table_mut();
        table.sort_by(column);
        table.reset(total);
        self.status_message = format!(
            "Sorted by {}{}",
            column.label(),
            self.table().sort_order.indicator()
        );
    }

    fn retry(&mut self) {
        match self.page {
            Page::Search => {
                if self.controller.state().error.is_some() || !self.input.text.trim().is_empty() {
                    self.controller.retry();
                }
            }
            Page::Trending => self.trending.reload(),
            Page::Recommended => {}
        }
    }

    fn login(&mut self, force: bool, now: Instant) {
        match auth::open_login(&self.config.api_base, force) {
            Ok(url) => {
                self.status_message = format!("Opened {}", url);
            }
            Err(e) => {
                warn!(error = %e, "Could not open login page");
                self.controller.notifications_mut().error(
                    "Login Error",
                    "Failed to initiate login. Please try again.",
                    now,
                );
            }
        }
    }

    pub fn run_action(&mut self, action: ActionKind, now: Instant) {
        let Some(repo) = self.selected_repository().cloned() else {
            return;
        };

        match action {
            ActionKind::OpenInBrowser => match menu::open_in_browser(&repo.url) {
                Ok(()) => {
                    info!(url = %repo.url, "Opened repository");
                    self.status_message = format!("Opened {}", repo.url);
                }
                Err(e) => self.controller.notifications_mut().error(
                    "Open Failed",
                    &e.to_string(),
                    now,
                ),
            },
            ActionKind::CopyUrl => match menu::copy_to_clipboard(&repo.url) {
                Ok(()) => self
                    .controller
                    .notifications_mut()
                    .info("Copied", &repo.url, now),
                Err(e) => self.controller.notifications_mut().error(
                    "Copy Failed",
                    &e.to_string(),
                    now,
                ),
            },
            ActionKind::SearchSimilar => {
                let query = menu::similar_query(&repo);
                self.switch_page(Page::Search);
                self.input.set(&query);
                self.input.focused = false;
                self.controller.submit(query);
            }
            ActionKind::Details => {
                self.active_menu = ActiveMenu::Info(InfoDialog::for_repository(&repo));
            }
        }
    }
}
