use crate::model::Repository;
use std::cmp::Ordering;

/// Which column is sorted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortColumn {
    /// Order the backend returned
    #[default]
    Relevance,
    Title,
    Stars,
    Forks,
    Watchers,
    Match,
}

impl SortColumn {
    pub fn label(&self) -> &'static str {
        match self {
            SortColumn::Relevance => "Relevance",
            SortColumn::Title => "Title",
            SortColumn::Stars => "Stars",
            SortColumn::Forks => "Forks",
            SortColumn::Watchers => "Watchers",
            SortColumn::Match => "Match",
        }
    }

    pub fn next(&self) -> Self {
        match self {
            SortColumn::Relevance => SortColumn::Title,
            SortColumn::Title => SortColumn::Stars,
            SortColumn::Stars => SortColumn::Forks,
            SortColumn::Forks => SortColumn::Watchers,
            SortColumn::Watchers => SortColumn::Match,
            SortColumn::Match => SortColumn::Relevance,
        }
    }
}

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Ascending,
    Descending,
}

impl SortOrder {
    pub fn indicator(&self) -> &'static str {
        match self {
            SortOrder::Ascending => " \u{25B2}",
            SortOrder::Descending => " \u{25BC}",
        }
    }

    pub fn toggled(&self) -> Self {
        match self {
            SortOrder::Ascending => SortOrder::Descending,
            SortOrder::Descending => SortOrder::Ascending,
        }
    }
}

/// Table display state
pub struct TableState {
    pub selected: Option<usize>,
    pub scroll_offset: usize,
    pub visible_rows: usize,
    pub sort_column: SortColumn,
    pub sort_order: SortOrder,
}

impl Default for TableState {
    fn default() -> Self {
        Self {
            selected: None,
            scroll_offset: 0,
            visible_rows: 20,
            sort_column: SortColumn::Relevance,
            sort_order: SortOrder::Ascending,
        }
    }
}

impl TableState {
    pub fn select_next(&mut self, total: usize) {
        if total == 0 {
            return;
        }
        let i = match self.selected {
            Some(i) => (i + 1).min(total - 1),
            None => 0,
        };
        self.selected = Some(i);
        self.ensure_visible(i);
    }

    pub fn select_prev(&mut self) {
        let i = match self.selected {
            Some(0) | None => 0,
            Some(i) => i - 1,
        };
        self.selected = Some(i);
        self.ensure_visible(i);
    }

    pub fn page_down(&mut self, total: usize) {
        if total == 0 {
            return;
        }
        let jump = self.visible_rows.saturating_sub(1);
        let i = match self.selected {
            Some(i) => (i + jump).min(total - 1),
            None => jump.min(total - 1),
        };
        self.selected = Some(i);
        self.ensure_visible(i);
    }

    pub fn page_up(&mut self) {
        let jump = self.visible_rows.saturating_sub(1);
        let i = match self.selected {
            Some(i) => i.saturating_sub(jump),
            None => 0,
        };
        self.selected = Some(i);
        self.ensure_visible(i);
    }

    pub fn select_first(&mut self) {
        self.selected = Some(0);
        self.scroll_offset = 0;
    }

    pub fn select_last(&mut self, total: usize) {
        if total == 0 {
            return;
        }
        self.selected = Some(total - 1);
        self.ensure_visible(total - 1);
    }

    /// Reset selection for a freshly loaded list
    pub fn reset(&mut self, total: usize) {
        self.selected = if total == 0 { None } else { Some(0) };
        self.scroll_offset = 0;
    }

    /// Clicking the sorted column again flips the order
    pub fn sort_by(&mut self, column: SortColumn) {
        if self.sort_column == column {
            self.sort_order = self.sort_order.toggled();
        } else {
            self.sort_column = column;
            self.sort_order = match column {
                SortColumn::Relevance | SortColumn::Title => SortOrder::Ascending,
                _ => SortOrder::Descending,
            };
        }
    }

    fn ensure_visible(&mut self, index: usize) {
        if index < self.scroll_offset {
            self.scroll_offset = index;
        } else if self.visible_rows > 0 && index >= self.scroll_offset + self.visible_rows {
            self.scroll_offset = index - self.visible_rows + 1;
        }
    }
}

/// Display order of `repos` for a column and direction.
/// The sort is stable, so ties keep the backend's order.
pub fn sorted_indices(repos: &[Repository], column: SortColumn, order: SortOrder) -> Vec<usize> {
    let mut indices: Vec<usize> = (0..repos.len()).collect();

    indices.sort_by(|&a, &b| {
        let ra = &repos[a];
        let rb = &repos[b];

        let cmp = match column {
            SortColumn::Relevance => a.cmp(&b),
            SortColumn::Title => ra.title.to_lowercase().cmp(&rb.title.to_lowercase()),
            SortColumn::Stars => ra.stars.cmp(&rb.stars),
            SortColumn::Forks => ra.forks.cmp(&rb.forks),
            SortColumn::Watchers => ra.watchers.cmp(&rb.watchers),
            SortColumn::Match => match (ra.skill_match_score, rb.skill_match_score) {
                (Some(x), Some(y)) => x.partial_cmp(&y).unwrap_or(Ordering::Equal),
                (Some(_), None) => Ordering::Greater,
                (None, Some(_)) => Ordering::Less,
                (None, None) => Ordering::Equal,
            },
        };

        if order == SortOrder::Descending {
            cmp.reverse()
        } else {
            cmp
        }
    });

    indices
}
