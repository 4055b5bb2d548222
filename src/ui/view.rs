use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};
use unicode_width::UnicodeWidthStr;

use crate::{
    domain::{
        chat::{ChatGroup, TopicRef},
        chat_browser_state::{BrowserRow, ChatBrowserState, FetchState},
        shell_state::{ActivePane, NoticeKind, ShellState},
    },
    usecases::group_updates::NO_RECENT_CHATS_MESSAGE,
};

use super::{compose_view::render_compose, input_field::InputField, styles};

const APP_TITLE: &str = "Telegram Chat ID Viewer";
const TOKEN_PLACEHOLDER: &str = "Enter your bot token";
const IDLE_HINT: &str = "Enter a bot token and press Enter to list recent chats.";
const ELLIPSIS: &str = "…";

pub fn render(frame: &mut Frame<'_>, state: &ShellState) {
    let [token_area, notice_area, browser_area, status_area] = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .areas(frame.area());

    let compose_open = state.compose().is_some();
    let active_pane = state.active_pane();

    InputField {
        title: APP_TITLE,
        placeholder: TOKEN_PLACEHOLDER,
        state: state.token(),
        focused: !compose_open && active_pane == ActivePane::Token,
    }
    .render(frame, token_area);

    frame.render_widget(Paragraph::new(notice_line(state)), notice_area);

    render_browser_panel(
        frame,
        browser_area,
        state.browser(),
        !compose_open && active_pane == ActivePane::Browser,
    );

    let status = Paragraph::new(status_line(state)).style(styles::status_line_style());
    frame.render_widget(status, status_area);

    if let Some(compose) = state.compose() {
        render_compose(frame, frame.area(), compose);
    }
}

fn notice_line(state: &ShellState) -> Line<'static> {
    if state.browser().fetch_state().is_in_flight() {
        return Line::from(Span::styled("Loading chats...", styles::pending_style()));
    }

    match state.notice() {
        Some(notice) => {
            let style = match notice.kind {
                NoticeKind::Info => styles::info_style(),
                NoticeKind::Error => styles::error_style(),
            };
            Line::from(Span::styled(notice.text.clone(), style))
        }
        None => Line::default(),
    }
}

fn render_browser_panel(
    frame: &mut Frame<'_>,
    area: Rect,
    browser: &ChatBrowserState,
    is_active: bool,
) {
    let border_style = if is_active {
        styles::active_panel_border_style()
    } else {
        styles::inactive_panel_border_style()
    };

    let grouped = browser.grouped();
    if grouped.is_empty() {
        let message = match browser.fetch_state() {
            FetchState::Idle => IDLE_HINT,
            FetchState::Loading => "Loading chats...",
            FetchState::Empty | FetchState::Ready => NO_RECENT_CHATS_MESSAGE,
            FetchState::Failed(message) => message.as_str(),
        };
        let paragraph = Paragraph::new(message).block(
            Block::default()
                .title("Chats")
                .borders(Borders::ALL)
                .border_style(border_style),
        );
        frame.render_widget(paragraph, area);
        return;
    }

    // Inner width = area width - 2 (borders)
    let inner_width = area.width.saturating_sub(2) as usize;
    let items = build_browser_items(browser, inner_width);

    let list = List::new(items)
        .block(
            Block::default()
                .title(format!("Chats ({})", grouped.len()))
                .borders(Borders::ALL)
                .border_style(border_style),
        )
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED | Modifier::BOLD));

    let mut list_state = ListState::default();
    list_state.select(browser.selected_index());
    frame.render_stateful_widget(list, area, &mut list_state);
}

fn build_browser_items(browser: &ChatBrowserState, width: usize) -> Vec<ListItem<'static>> {
    let grouped = browser.grouped();

    browser
        .rows()
        .iter()
        .filter_map(|row| {
            let group = grouped.get_by_id(row.chat_id())?;
            let line = match *row {
                BrowserRow::Chat { chat_id } => {
                    chat_row_line(group, browser.is_expanded(chat_id), width)
                }
                BrowserRow::Topic { thread_id, .. } => topic_row_line(&group.topic(thread_id)?, width),
            };
            Some(ListItem::new(line))
        })
        .collect()
}

fn chat_row_line(group: &ChatGroup, expanded: bool, width: usize) -> Line<'static> {
    let chat = group.chat();
    let topic_count = group.topic_count();

    let marker = match (topic_count, expanded) {
        (0, _) => "  ",
        (_, true) => "▾ ",
        (_, false) => "▸ ",
    };
    let kind = format!(" [{}]", chat.kind.as_label());
    let topics = match topic_count {
        0 => String::new(),
        1 => " 1 topic".to_owned(),
        count => format!(" {count} topics"),
    };
    let id = format!("  {}", chat.id);

    let fixed_width = marker.width() + kind.width() + topics.width() + id.width();
    let name = truncate_to_width(&chat.display_name(), width.saturating_sub(fixed_width));
    let padding = width.saturating_sub(fixed_width + name.width());

    Line::from(vec![
        Span::styled(marker, styles::tree_marker_style()),
        Span::styled(name, styles::chat_name_style()),
        Span::styled(kind, styles::chat_kind_style()),
        Span::styled(topics, styles::tree_marker_style()),
        Span::raw(" ".repeat(padding)),
        Span::styled(id, styles::id_style()),
    ])
}

fn topic_row_line(topic: &TopicRef, width: usize) -> Line<'static> {
    const BRANCH: &str = "    └ ";

    let id = format!("  {}", topic.thread_id);
    let fixed_width = BRANCH.width() + id.width();
    let name = truncate_to_width(topic.display_name(), width.saturating_sub(fixed_width));
    let padding = width.saturating_sub(fixed_width + name.width());

    Line::from(vec![
        Span::styled(BRANCH, styles::tree_marker_style()),
        Span::styled(name, styles::topic_name_style()),
        Span::raw(" ".repeat(padding)),
        Span::styled(id, styles::id_style()),
    ])
}

/// Cuts `text` to at most `max_width` terminal columns, ending with `…` when
/// anything was dropped.
fn truncate_to_width(text: &str, max_width: usize) -> String {
    if text.width() <= max_width {
        return text.to_owned();
    }

    let budget = max_width.saturating_sub(ELLIPSIS.width());
    let mut used = 0;
    let mut truncated = String::new();
    for ch in text.chars() {
        let ch_width = unicode_width::UnicodeWidthChar::width(ch).unwrap_or(0);
        if used + ch_width > budget {
            break;
        }
        used += ch_width;
        truncated.push(ch);
    }

    if max_width > 0 {
        truncated.push_str(ELLIPSIS);
    }
    truncated
}

fn status_line(state: &ShellState) -> String {
    let nav_hint = if state.compose().is_some() {
        "Tab: switch field | Enter: attach/send | Ctrl+D: drop file | Esc: close"
    } else {
        match state.active_pane() {
            ActivePane::Token => "Enter: fetch chats | Tab/Down: chats | Ctrl+C: quit",
            ActivePane::Browser => {
                "j/k: move | Enter/Space: topics | s: send | y: copy id | r: refresh | t: token | q: quit"
            }
        }
    };

    let fetched = state
        .last_fetched_at()
        .map(|at| format!("last fetch: {}", at.format("%H:%M:%S")))
        .unwrap_or_else(|| "not fetched yet".to_owned());

    format!("{fetched} | {nav_hint}")
}
