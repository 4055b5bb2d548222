use std::collections::HashSet;

use super::{
    chat::{ChatGroup, GroupedChats},
    compose_state::ComposeTarget,
};

/// Lifecycle of the "fetch chats" action.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FetchState {
    #[default]
    Idle,
    Loading,
    Ready,
    Empty,
    Failed(String),
}

impl FetchState {
    pub fn is_in_flight(&self) -> bool {
        matches!(self, Self::Loading)
    }
}

/// A visible line of the chat browser.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BrowserRow {
    Chat { chat_id: i64 },
    Topic { chat_id: i64, thread_id: i64 },
}

impl BrowserRow {
    pub fn chat_id(self) -> i64 {
        match self {
            Self::Chat { chat_id } | Self::Topic { chat_id, .. } => chat_id,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ChatBrowserState {
    fetch_state: FetchState,
    grouped: GroupedChats,
    expanded: HashSet<i64>,
    rows: Vec<BrowserRow>,
    selected_index: Option<usize>,
}

impl ChatBrowserState {
    pub fn fetch_state(&self) -> &FetchState {
        &self.fetch_state
    }

    pub fn grouped(&self) -> &GroupedChats {
        &self.grouped
    }

    pub fn rows(&self) -> &[BrowserRow] {
        &self.rows
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.selected_index
    }

    pub fn selected_row(&self) -> Option<BrowserRow> {
        self.selected_index
            .and_then(|index| self.rows.get(index))
            .copied()
    }

    pub fn is_expanded(&self, chat_id: i64) -> bool {
        self.expanded.contains(&chat_id)
    }

    /// Marks a fetch as started. Previously grouped chats stay visible.
    pub fn set_loading(&mut self) {
        self.fetch_state = FetchState::Loading;
    }

    /// Replaces the grouped chats wholesale with a fresh fetch result.
    pub fn set_ready(&mut self, grouped: GroupedChats) {
        let previous_chat_id = self.selected_row().map(BrowserRow::chat_id);

        self.fetch_state = if grouped.is_empty() {
            FetchState::Empty
        } else {
            FetchState::Ready
        };
        self.grouped = grouped;
        self.expanded.clear();
        self.rebuild_rows();
        self.selected_index = resolve_selection_index(&self.rows, previous_chat_id);
    }

    /// Records a failed fetch without discarding what is already on screen.
    pub fn set_failed(&mut self, message: impl Into<String>) {
        self.fetch_state = FetchState::Failed(message.into());
    }

    pub fn select_next(&mut self) {
        let Some(index) = self.selected_index else {
            return;
        };

        let last_index = self.rows.len().saturating_sub(1);
        self.selected_index = Some(std::cmp::min(index.saturating_add(1), last_index));
    }

    pub fn select_previous(&mut self) {
        let Some(index) = self.selected_index else {
            return;
        };

        self.selected_index = Some(index.saturating_sub(1));
    }

    /// Expands or collapses the chat owning the selected row. Collapsing from
    /// a topic row moves the selection back to its chat.
    pub fn toggle_selected(&mut self) {
        let Some(row) = self.selected_row() else {
            return;
        };

        let chat_id = row.chat_id();
        if !self.expanded.remove(&chat_id) {
            self.expanded.insert(chat_id);
        }

        self.rebuild_rows();
        self.selected_index = self
            .rows
            .iter()
            .position(|candidate| *candidate == row)
            .or_else(|| {
                self.rows
                    .iter()
                    .position(|candidate| *candidate == BrowserRow::Chat { chat_id })
            });
    }

    /// Numeric id shown on the selected row: the chat id, or the thread id
    /// for topic rows.
    pub fn selected_id(&self) -> Option<i64> {
        self.selected_row().map(|row| match row {
            BrowserRow::Chat { chat_id } => chat_id,
            BrowserRow::Topic { thread_id, .. } => thread_id,
        })
    }

    pub fn selected_target(&self) -> Option<ComposeTarget> {
        let row = self.selected_row()?;
        let group = self.grouped.get_by_id(row.chat_id())?;
        let chat_name = group.chat().display_name();

        match row {
            BrowserRow::Chat { chat_id } => Some(ComposeTarget {
                chat_id,
                topic_id: None,
                chat_name,
                topic_name: None,
            }),
            BrowserRow::Topic { chat_id, thread_id } => {
                let topic = group.topic(thread_id)?;
                Some(ComposeTarget {
                    chat_id,
                    topic_id: Some(thread_id),
                    chat_name,
                    topic_name: topic.name,
                })
            }
        }
    }

    fn rebuild_rows(&mut self) {
        self.rows = self
            .grouped
            .iter()
            .flat_map(|group| rows_for_group(group, self.expanded.contains(&group.chat().id)))
            .collect();
    }
}

fn rows_for_group(group: &ChatGroup, expanded: bool) -> Vec<BrowserRow> {
    let chat_id = group.chat().id;
    let mut rows = vec![BrowserRow::Chat { chat_id }];

    if expanded {
        rows.extend(
            group
                .topics()
                .map(|topic| BrowserRow::Topic {
                    chat_id,
                    thread_id: topic.thread_id,
                }),
        );
    }

    rows
}

fn resolve_selection_index(rows: &[BrowserRow], previous_chat_id: Option<i64>) -> Option<usize> {
    if rows.is_empty() {
        return None;
    }

    previous_chat_id
        .and_then(|chat_id| {
            rows.iter()
                .position(|row| *row == BrowserRow::Chat { chat_id })
        })
        .or(Some(0))
}
