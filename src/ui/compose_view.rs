//! Centered "send test message" dialog.

use ratatui::{
    layout::{Constraint, Direction, Flex, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::domain::compose_state::{ComposeField, ComposeState, DispatchState, SENT_MESSAGE};

use super::{input_field::InputField, styles};

const DIALOG_WIDTH: u16 = 72;
const DIALOG_HEIGHT: u16 = 14;

const FILE_PATH_PLACEHOLDER: &str = "Path to an image or document, Enter to attach";
const MESSAGE_PLACEHOLDER: &str = "Enter your message...";
const CAPTION_PLACEHOLDER: &str = "Add a caption (optional)...";

pub fn render_compose(frame: &mut Frame<'_>, area: Rect, compose: &ComposeState) {
    let dialog = centered_rect(area, DIALOG_WIDTH, DIALOG_HEIGHT);
    frame.render_widget(Clear, dialog);

    let block = Block::default()
        .title(" Send Test Message ")
        .borders(Borders::ALL)
        .border_style(styles::active_panel_border_style());
    let inner = block.inner(dialog);
    frame.render_widget(block, dialog);

    let [target_area, attachment_area, path_area, text_area, status_area] = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(1),
        ])
        .areas(inner);

    frame.render_widget(Paragraph::new(target_lines(compose)), target_area);
    frame.render_widget(Paragraph::new(attachment_line(compose)), attachment_area);

    InputField {
        title: "File",
        placeholder: FILE_PATH_PLACEHOLDER,
        state: compose.file_path(),
        focused: compose.focus() == ComposeField::FilePath,
    }
    .render(frame, path_area);

    let text_placeholder = if compose.attachment().is_some() {
        CAPTION_PLACEHOLDER
    } else {
        MESSAGE_PLACEHOLDER
    };
    InputField {
        title: "Message",
        placeholder: text_placeholder,
        state: compose.text(),
        focused: compose.focus() == ComposeField::Text,
    }
    .render(frame, text_area);

    frame.render_widget(Paragraph::new(status_line(compose)), status_area);
}

fn target_lines(compose: &ComposeState) -> Vec<Line<'static>> {
    let target = compose.target();

    let heading = match &target.topic_name {
        Some(topic) => format!("{} › {}", target.chat_name, topic),
        None => target.chat_name.clone(),
    };

    let mut ids = vec![
        Span::raw("Chat ID: "),
        Span::styled(target.chat_id.to_string(), styles::id_style()),
    ];
    if let Some(topic_id) = target.topic_id {
        ids.push(Span::raw(" | Topic ID: "));
        ids.push(Span::styled(topic_id.to_string(), styles::id_style()));
    }

    vec![
        Line::from(Span::styled(heading, styles::chat_name_style())),
        Line::from(ids),
    ]
}

fn attachment_line(compose: &ComposeState) -> Line<'static> {
    match compose.attachment() {
        Some(attachment) => Line::from(vec![
            Span::raw(format!(
                "Attached: {} ({})",
                attachment.file_name,
                attachment.size_label()
            )),
            Span::styled("  Ctrl+D to remove", styles::input_placeholder_style()),
        ]),
        None => Line::from(Span::styled(
            "No file attached",
            styles::input_placeholder_style(),
        )),
    }
}

fn status_line(compose: &ComposeState) -> Line<'static> {
    match compose.dispatch_state() {
        DispatchState::Sending => Line::from(Span::styled("Sending...", styles::pending_style())),
        DispatchState::Sent(_) => Line::from(Span::styled(SENT_MESSAGE, styles::info_style())),
        DispatchState::Failed(message) => {
            Line::from(Span::styled(message.clone(), styles::error_style()))
        }
        DispatchState::Idle if compose.can_send() => Line::from(Span::styled(
            "Enter in Message to send",
            styles::input_placeholder_style(),
        )),
        DispatchState::Idle => Line::from(Span::styled(
            "Type a message or attach a file to send",
            styles::input_placeholder_style(),
        )),
    }
}

fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let [row] = Layout::vertical([Constraint::Length(height.min(area.height))])
        .flex(Flex::Center)
        .areas(area);
    let [cell] = Layout::horizontal([Constraint::Length(width.min(area.width))])
        .flex(Flex::Center)
        .areas(row);
    cell
}

#[cfg(test)]
mod tests {
    use std::time::Instant;

    use super::*;
    use crate::domain::{
        compose_state::ComposeTarget,
        payload::{Attachment, DispatchMode},
    };

    fn line_to_string(line: &Line<'_>) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    fn compose(topic: Option<(i64, &str)>) -> ComposeState {
        ComposeState::new(ComposeTarget {
            chat_id: -100,
            topic_id: topic.map(|(id, _)| id),
            chat_name: "Forum".to_owned(),
            topic_name: topic.map(|(_, name)| name.to_owned()),
        })
    }

    #[test]
    fn target_lines_include_topic_id_when_present() {
        let lines = target_lines(&compose(Some((7, "Releases"))));

        assert_eq!(line_to_string(&lines[0]), "Forum › Releases");
        assert_eq!(line_to_string(&lines[1]), "Chat ID: -100 | Topic ID: 7");
    }

    #[test]
    fn target_lines_omit_topic_for_plain_chat() {
        let lines = target_lines(&compose(None));

        assert_eq!(line_to_string(&lines[1]), "Chat ID: -100");
    }

    #[test]
    fn attachment_line_shows_name_and_size() {
        let mut state = compose(None);
        state.set_attachment_result(Ok(Attachment {
            file_name: "cat.png".to_owned(),
            mime_type: "image/png".to_owned(),
            bytes: vec![0; 1_572_864],
        }));

        let text = line_to_string(&attachment_line(&state));

        assert!(text.starts_with("Attached: cat.png (1.50 MB)"));
    }

    #[test]
    fn status_line_reports_success_and_failure() {
        let mut state = compose(None);
        state.finish_send(Ok(DispatchMode::Text), Instant::now());
        assert_eq!(line_to_string(&status_line(&state)), SENT_MESSAGE);

        state.finish_send(Err("Bad Request".to_owned()), Instant::now());
        assert_eq!(line_to_string(&status_line(&state)), "Bad Request");
    }

    #[test]
    fn centered_rect_fits_small_terminals() {
        let area = Rect::new(0, 0, 40, 10);

        let dialog = centered_rect(area, DIALOG_WIDTH, DIALOG_HEIGHT);

        assert_eq!(dialog, Rect::new(0, 0, 40, 10));
    }

    #[test]
    fn centered_rect_is_centered() {
        let area = Rect::new(0, 0, 100, 40);

        let dialog = centered_rect(area, 60, 10);

        assert_eq!(dialog, Rect::new(20, 15, 60, 10));
    }
}
