//! Single-line text input rendering, shared by the token bar and the
//! compose dialog.

use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use unicode_width::UnicodeWidthStr;

use crate::domain::text_input_state::TextInputState;

use super::styles;

/// Prompt symbol shown before the input text.
const PROMPT_SYMBOL: &str = "> ";

pub struct InputField<'a> {
    pub title: &'a str,
    pub placeholder: &'a str,
    pub state: &'a TextInputState,
    pub focused: bool,
}

impl InputField<'_> {
    pub fn render(&self, frame: &mut Frame<'_>, area: Rect) {
        let border_style = if self.focused {
            styles::active_panel_border_style()
        } else {
            styles::inactive_panel_border_style()
        };

        let paragraph = Paragraph::new(build_input_line(self.state, self.placeholder)).block(
            Block::default()
                .title(self.title)
                .borders(Borders::ALL)
                .border_style(border_style),
        );
        frame.render_widget(paragraph, area);

        if self.focused {
            let cursor_x = area
                .x
                .saturating_add(1)
                .saturating_add(PROMPT_SYMBOL.len() as u16)
                .saturating_add(cursor_column(self.state));
            let cursor_y = area.y.saturating_add(1);
            frame.set_cursor_position((cursor_x, cursor_y));
        }
    }
}

fn build_input_line(state: &TextInputState, placeholder: &str) -> Line<'static> {
    let prompt = Span::styled(PROMPT_SYMBOL.to_owned(), styles::input_prompt_style());

    if state.is_empty() {
        Line::from(vec![
            prompt,
            Span::styled(placeholder.to_owned(), styles::input_placeholder_style()),
        ])
    } else {
        Line::from(vec![
            prompt,
            Span::styled(state.text().to_owned(), styles::input_text_style()),
        ])
    }
}

/// Display width of the text left of the cursor, clamped to `u16`.
fn cursor_column(state: &TextInputState) -> u16 {
    let before: String = state.text().chars().take(state.cursor_position()).collect();
    before.width().min(u16::MAX as usize) as u16
}
