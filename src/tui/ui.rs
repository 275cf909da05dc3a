use crate::search::{SearchView, ToastLevel};
use crate::tui::app::{App, Page};
use crate::tui::colors;
use crate::tui::menu::{ActionsMenu, ActiveMenu, InfoDialog};
use crate::tui::table::SortColumn;
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table, Wrap};

const SPINNER: [&str; 8] = [
    "\u{280B}", "\u{2819}", "\u{2839}", "\u{2838}", "\u{283C}", "\u{2834}", "\u{2826}", "\u{2827}",
];

const BAR_BG: Color = Color::Rgb(40, 40, 50);
const ACCENT: Color = Color::Rgb(167, 139, 250);

/// What the body area shows, resolved before any mutable borrow of the app
enum Body {
    Message {
        title: String,
        detail: String,
        color: Color,
    },
    Failed(String),
    Table,
}

pub fn draw(frame: &mut Frame, app: &mut App) {
    let area = frame.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Page tabs
            Constraint::Length(3), // Search bar or page header
            Constraint::Min(5),    // Body
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    draw_tab_strip(frame, app, chunks[0]);
    if app.page == Page::Search {
        draw_search_bar(frame, app, chunks[1]);
    } else {
        draw_page_header(frame, app.page, chunks[1]);
    }
    draw_body(frame, app, chunks[2]);
    draw_status_bar(frame, app, chunks[3]);

    // Draw menu overlays
    match &app.active_menu {
        ActiveMenu::None => {}
        ActiveMenu::Actions(actions) => draw_actions_menu(frame, actions, area),
        ActiveMenu::Info(info) => draw_info_dialog(frame, info, area),
    }

    draw_toast(frame, app, area);

    // Show cursor in search bar when focused (and no menu is active)
    if matches!(app.active_menu, ActiveMenu::None) && app.page == Page::Search && app.input.focused {
        // Account for border (1) + space (1) + search icon (2 display cols) + space (1)
        let cursor_x = chunks[1].x + 1 + 4 + app.input.cursor_column();
        let cursor_y = chunks[1].y + 1;
        frame.set_cursor_position(Position::new(cursor_x, cursor_y));
    }
}

fn spinner(app: &App) -> &'static str {
    SPINNER[(app.tick_count as usize / 2) % SPINNER.len()]
}

fn draw_tab_strip(frame: &mut Frame, app: &App, area: Rect) {
    let mut spans = Vec::new();
    for (i, page) in Page::ALL.iter().enumerate() {
        let label = format!(" F{} {} ", i + 1, page.title());
        let style = if *page == app.page {
            Style::default()
                .fg(Color::Black)
                .bg(ACCENT)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::White).bg(BAR_BG)
        };
        spans.push(Span::styled(label, style));
    }

    // Fill rest with background
    let labels_width: usize = spans.iter().map(|s| s.width()).sum();
    let remaining = (area.width as usize).saturating_sub(labels_width);
    if remaining > 0 {
        spans.push(Span::styled(" ".repeat(remaining), Style::default().bg(BAR_BG)));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn draw_search_bar(frame: &mut Frame, app: &App, area: Rect) {
    let border_style = if app.input.focused {
        Style::default().fg(ACCENT)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let mut block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .title(" Search projects ");

    let state = app.controller.state();
    if state.loading || app.controller.is_pending() {
        block = block.title_top(
            Line::from(format!(" {} searching ", spinner(app)))
                .style(Style::default().fg(ACCENT))
                .right_aligned(),
        );
    }

    let search_text = format!(" \u{1F50D} {}", app.input.text);
    let paragraph = Paragraph::new(search_text)
        .block(block)
        .style(Style::default().fg(Color::White));

    frame.render_widget(paragraph, area);
}

fn draw_page_header(frame: &mut Frame, page: Page, area: Rect) {
    let (title, subtitle) = match page {
        Page::Trending => (
            "Trending Repositories",
            "Top open-source projects based on stars, forks, and watchers.",
        ),
        Page::Recommended => (
            "Recommended Repositories",
            "Explore some recommended open-source projects.",
        ),
        Page::Search => ("Find Your Next Project", ""),
    };

    let text = vec![
        Line::from(Span::styled(
            title,
            Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(subtitle, Style::default().fg(Color::Gray))),
    ];
    let block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(Style::default().fg(Color::DarkGray));
    frame.render_widget(Paragraph::new(text).block(block), area);
}

fn resolve_body(app: &App) -> Body {
    match app.page {
        Page::Search => match app.controller.view() {
            SearchView::Idle => Body::Message {
                title: "Find Your Next Project".to_string(),
                detail: "Type to search open-source repositories. Results update as you type."
                    .to_string(),
                color: Color::Gray,
            },
            SearchView::Loading => Body::Message {
                title: format!("{} Searching for '{}'...", spinner(app), app.controller.state().query),
                detail: String::new(),
                color: ACCENT,
            },
            SearchView::Failed(message) => Body::Failed(message.to_string()),
            SearchView::NoMatches => Body::Message {
                title: "No projects found matching your search.".to_string(),
                detail: "Try broader keywords or a different language.".to_string(),
                color: Color::Gray,
            },
            SearchView::Results(_) => Body::Table,
        },
        Page::Trending => {
            if app.trending.loading {
                Body::Message {
                    title: format!("{} Loading trending repositories...", spinner(app)),
                    detail: String::new(),
                    color: ACCENT,
                }
            } else if let Some(error) = &app.trending.error {
                Body::Failed(error.clone())
            } else if app.trending.items.is_empty() {
                Body::Message {
                    title: "No trending repositories right now.".to_string(),
                    detail: "Press r to refresh.".to_string(),
                    color: Color::Gray,
                }
            } else {
                Body::Table
            }
        }
        Page::Recommended => {
            if app.recommended.is_empty() {
                Body::Message {
                    title: "No recommendations available.".to_string(),
                    detail: String::new(),
                    color: Color::Gray,
                }
            } else {
                Body::Table
            }
        }
    }
}

fn draw_body(frame: &mut Frame, app: &mut App, area: Rect) {
    match resolve_body(app) {
        Body::Message {
            title,
            detail,
            color,
        } => draw_message(frame, &title, &detail, color, area),
        Body::Failed(message) => draw_error_panel(frame, &message, area),
        Body::Table => draw_repo_table(frame, app, area),
    }
}

fn draw_message(frame: &mut Frame, title: &str, detail: &str, color: Color, area: Rect) {
    let text = vec![
        Line::from(""),
        Line::from(Span::styled(
            title.to_string(),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(detail.to_string(), Style::default().fg(Color::DarkGray))),
    ];
    frame.render_widget(
        Paragraph::new(text)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true }),
        area,
    );
}

fn draw_error_panel(frame: &mut Frame, message: &str, area: Rect) {
    let width = (message.len().min(200) as u16 + 6).clamp(40, area.width.max(40)).min(area.width);
    let popup = Rect::new(
        area.x + area.width.saturating_sub(width) / 2,
        area.y + 1,
        width,
        6.min(area.height),
    );

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Red))
        .title(" Error ")
        .title_style(Style::default().fg(Color::Red).add_modifier(Modifier::BOLD));

    let text = vec![
        Line::from(Span::styled(message.to_string(), Style::default().fg(Color::White))),
        Line::from(""),
        Line::from(vec![
            Span::styled(" r ", Style::default().fg(Color::Black).bg(Color::Red)),
            Span::raw(" Try Again"),
        ]),
    ];

    frame.render_widget(
        Paragraph::new(text)
            .block(block)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true }),
        popup,
    );
}

fn draw_repo_table(frame: &mut Frame, app: &mut App, area: Rect) {
    // Two lines per row below a one-line header
    let rows_fit = (area.height.saturating_sub(1) / 2).max(1) as usize;
    app.table_mut().visible_rows = rows_fit;

    let order = app.display_order();
    let list = app.current_list();
    let table_state = app.table();

    let header_columns: [(&str, Option<SortColumn>); 6] = [
        ("Repository", Some(SortColumn::Title)),
        ("Stars", Some(SortColumn::Stars)),
        ("Forks", Some(SortColumn::Forks)),
        ("Watchers", Some(SortColumn::Watchers)),
        ("Match", Some(SortColumn::Match)),
        ("Tags", None),
    ];

    let header = Row::new(header_columns.iter().map(|(name, col)| {
        let text = if *col == Some(table_state.sort_column) {
            format!("{}{}", name, table_state.sort_order.indicator())
        } else {
            name.to_string()
        };
        Cell::from(text).style(
            Style::default()
                .fg(Color::White)
                .bg(Color::Rgb(76, 29, 149))
                .add_modifier(Modifier::BOLD),
        )
    }))
    .height(1);

    // Build visible rows only
    let start = table_state.scroll_offset.min(order.len());
    let end = (start + rows_fit).min(order.len());

    let rows: Vec<Row> = (start..end)
        .enumerate()
        .map(|(visual_idx, logical_idx)| {
            let repo = &list[order[logical_idx]];
            let is_selected = table_state.selected == Some(logical_idx);

            // Alternating row background
            let bg = if is_selected {
                Color::Rgb(60, 60, 80)
            } else if visual_idx % 2 == 1 {
                Color::Rgb(25, 25, 35)
            } else {
                Color::Reset
            };

            let fg_modifier = if is_selected {
                Modifier::BOLD
            } else {
                Modifier::empty()
            };

            let title_cell = Cell::from(Text::from(vec![
                Line::from(Span::styled(
                    repo.title.clone(),
                    Style::default().fg(ACCENT).add_modifier(fg_modifier),
                )),
                Line::from(Span::styled(
                    repo.description_or_placeholder().to_string(),
                    Style::default().fg(Color::DarkGray),
                )),
            ]));

            let stars_cell = Cell::from(format!("\u{2605} {}", crate::format_count(repo.stars)))
                .style(Style::default().fg(colors::color_for_stars(repo.stars)));
            let forks_cell = Cell::from(crate::format_count(repo.forks))
                .style(Style::default().fg(Color::LightBlue));
            let watchers_cell = Cell::from(crate::format_count(repo.watchers))
                .style(Style::default().fg(Color::Green));

            let match_cell = match repo.skill_match_score {
                Some(score) => Cell::from(Text::from(vec![
                    Line::from(crate::format_score(Some(score))),
                    Line::from(Span::styled(
                        colors::difficulty_label(repo.difficulty.as_deref()),
                        Style::default().fg(Color::DarkGray),
                    )),
                ]))
                .style(Style::default().fg(colors::color_for_score(score))),
                None => Cell::from(colors::difficulty_label(repo.difficulty.as_deref()))
                    .style(Style::default().fg(Color::DarkGray)),
            };

            let mut tag_spans = Vec::new();
            for (i, tag) in repo.tags.iter().enumerate() {
                if i > 0 {
                    tag_spans.push(Span::raw(" "));
                }
                tag_spans.push(Span::styled(
                    format!("#{}", tag),
                    Style::default().fg(colors::color_for_tag(tag)),
                ));
            }
            let tags_cell = Cell::from(Line::from(tag_spans));

            Row::new(vec![
                title_cell,
                stars_cell,
                forks_cell,
                watchers_cell,
                match_cell,
                tags_cell,
            ])
            .height(2)
            .style(Style::default().bg(bg))
        })
        .collect();

    let widths = [
        Constraint::Fill(3),
        Constraint::Length(10),
        Constraint::Length(8),
        Constraint::Length(9),
        Constraint::Length(12),
        Constraint::Fill(2),
    ];

    let table = Table::new(rows, widths)
        .header(header)
        .column_spacing(1)
        .block(Block::default().borders(Borders::NONE));

    frame.render_widget(table, area);
}

fn draw_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let left_text = match app.page {
        Page::Search => {
            let state = app.controller.state();
            if state.loading {
                format!(" {} Searching...", spinner(app))
            } else {
                format!(
                    " {} projects | {} requests | {}",
                    state.results.len(),
                    app.controller.requests_issued(),
                    app.status_message
                )
            }
        }
        Page::Trending => format!(" {} trending | {}", app.trending.items.len(), app.status_message),
        Page::Recommended => format!(
            " {} recommended | {}",
            app.recommended.len(),
            app.status_message
        ),
    };

    let right_text = " Tab:Search  Enter:Actions  o:Open  y:Copy  s:Sort  r:Retry  l:Login  Ctrl+Q:Quit ";

    // Build the status line: left-aligned text + padding + right-aligned text
    let available_width = area.width as usize;
    let left_len = Span::raw(left_text.as_str()).width();
    let right_len = right_text.len();

    let status_str = if left_len + right_len < available_width {
        let padding = available_width - left_len - right_len;
        format!("{}{:padding$}{}", left_text, "", right_text, padding = padding)
    } else {
        // Not enough space, just show left text
        format!("{:width$}", left_text, width = available_width)
    };

    let status = Paragraph::new(status_str)
        .style(Style::default().fg(Color::White).bg(Color::Rgb(76, 29, 149)));

    frame.render_widget(status, area);
}

fn draw_toast(frame: &mut Frame, app: &App, area: Rect) {
    let Some(toast) = app.controller.notifications().latest() else {
        return;
    };

    let width = 48.min(area.width.saturating_sub(2));
    let height = 4.min(area.height.saturating_sub(2));
    let popup_area = Rect::new(
        area.x + area.width.saturating_sub(width + 1),
        area.y + area.height.saturating_sub(height + 1),
        width,
        height,
    );

    let color = match toast.level {
        ToastLevel::Error => Color::Red,
        ToastLevel::Info => Color::Green,
    };

    frame.render_widget(Clear, popup_area);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color))
        .title(format!(" {} ", toast.title))
        .title_style(Style::default().fg(color).add_modifier(Modifier::BOLD));

    frame.render_widget(
        Paragraph::new(toast.message.as_str())
            .block(block)
            .wrap(Wrap { trim: true })
            .style(Style::default().fg(Color::White)),
        popup_area,
    );
}

/// Helper to create a centered popup area
fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    Rect::new(x, y, width.min(area.width), height.min(area.height))
}

fn draw_actions_menu(frame: &mut Frame, actions: &ActionsMenu, area: Rect) {
    let width = 28;
    let height = (actions.items.len() as u16) + 2; // +2 for borders
    let popup_area = centered_rect(width, height, area);

    frame.render_widget(Clear, popup_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(ACCENT))
        .title(" Actions ")
        .title_style(Style::default().fg(Color::White).add_modifier(Modifier::BOLD));

    let inner = block.inner(popup_area);
    frame.render_widget(block, popup_area);

    for (i, (label, _)) in actions.items.iter().enumerate() {
        if i as u16 >= inner.height {
            break;
        }
        let style = if i == actions.selected {
            Style::default()
                .fg(Color::Black)
                .bg(ACCENT)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::White)
        };

        let item_area = Rect::new(inner.x, inner.y + i as u16, inner.width, 1);
        frame.render_widget(Paragraph::new(format!(" {} ", label)).style(style), item_area);
    }
}

fn draw_info_dialog(frame: &mut Frame, info: &InfoDialog, area: Rect) {
    let width = 72.min(area.width.saturating_sub(4));
    let height = (info.lines.len() as u16 + 4).min(area.height.saturating_sub(2));
    let popup_area = centered_rect(width, height, area);

    frame.render_widget(Clear, popup_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(ACCENT))
        .title(format!(" {} ", info.title))
        .title_style(Style::default().fg(Color::White).add_modifier(Modifier::BOLD));

    let mut lines: Vec<Line> = info
        .lines
        .iter()
        .map(|l| Line::from(l.as_str()))
        .collect();
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Esc to close",
        Style::default().fg(Color::DarkGray),
    )));

    frame.render_widget(
        Paragraph::new(lines)
            .block(block)
            .wrap(Wrap { trim: false }),
        popup_area,
    );
}
