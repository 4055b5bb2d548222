//! Style definitions for the UI components.

use ratatui::style::{Color, Modifier, Style};

// =============================================================================
// Panels
// =============================================================================

/// Border of the focused pane or dialog.
pub fn active_panel_border_style() -> Style {
    Style::default().fg(Color::Cyan)
}

pub fn inactive_panel_border_style() -> Style {
    Style::default().fg(Color::DarkGray)
}

// =============================================================================
// Chat browser
// =============================================================================

/// Style for chat name (bold, bright).
pub fn chat_name_style() -> Style {
    Style::default()
        .fg(Color::White)
        .add_modifier(Modifier::BOLD)
}

/// Style for the chat kind label like `[supergroup]`.
pub fn chat_kind_style() -> Style {
    Style::default().fg(Color::DarkGray)
}

/// Style for chat and topic ids, the values operators come here to copy.
pub fn id_style() -> Style {
    Style::default().fg(Color::Yellow)
}

pub fn topic_name_style() -> Style {
    Style::default().fg(Color::Gray)
}

/// Style for the expand/collapse marker and topic count.
pub fn tree_marker_style() -> Style {
    Style::default().fg(Color::DarkGray)
}

// =============================================================================
// Inputs
// =============================================================================

pub fn input_prompt_style() -> Style {
    Style::default().fg(Color::Cyan)
}

pub fn input_text_style() -> Style {
    Style::default().fg(Color::White)
}

/// Style for placeholder text in empty, unfocused inputs.
pub fn input_placeholder_style() -> Style {
    Style::default().fg(Color::DarkGray)
}

// =============================================================================
// Feedback
// =============================================================================

pub fn info_style() -> Style {
    Style::default().fg(Color::Green)
}

pub fn error_style() -> Style {
    Style::default().fg(Color::Red)
}

/// Style for in-flight messages like "Loading chats...".
pub fn pending_style() -> Style {
    Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::ITALIC)
}

pub fn status_line_style() -> Style {
    Style::default().fg(Color::DarkGray)
}
