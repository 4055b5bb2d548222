//! Editable single-line text used for the token, message and file path fields.

/// Telegram's limit for message text; also a sane cap for the other fields.
pub const DEFAULT_MAX_INPUT_LENGTH: usize = 4096;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextInputState {
    text: String,
    /// Character index, not byte.
    cursor_position: usize,
    max_length: usize,
}

impl Default for TextInputState {
    fn default() -> Self {
        Self::with_max_length(DEFAULT_MAX_INPUT_LENGTH)
    }
}

impl TextInputState {
    pub fn with_max_length(max_length: usize) -> Self {
        Self {
            text: String::new(),
            cursor_position: 0,
            max_length,
        }
    }

    /// Creates a field pre-filled with `text`, cursor at the end.
    pub fn with_text(text: &str) -> Self {
        let mut state = Self::default();
        for ch in text.chars() {
            state.insert_char(ch);
        }
        state
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn cursor_position(&self) -> usize {
        self.cursor_position
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }

    /// Returns false when the field is already at its maximum length.
    pub fn insert_char(&mut self, ch: char) -> bool {
        if self.text.chars().count() >= self.max_length {
            return false;
        }
        let byte_idx = self.char_to_byte_index(self.cursor_position);
        self.text.insert(byte_idx, ch);
        self.cursor_position += 1;
        true
    }

    pub fn delete_char_before(&mut self) {
        if self.cursor_position > 0 {
            self.cursor_position -= 1;
            self.remove_at_cursor();
        }
    }

    pub fn delete_char_at(&mut self) {
        if self.cursor_position < self.text.chars().count() {
            self.remove_at_cursor();
        }
    }

    pub fn move_cursor_left(&mut self) {
        self.cursor_position = self.cursor_position.saturating_sub(1);
    }

    pub fn move_cursor_right(&mut self) {
        if self.cursor_position < self.text.chars().count() {
            self.cursor_position += 1;
        }
    }

    pub fn move_cursor_home(&mut self) {
        self.cursor_position = 0;
    }

    pub fn move_cursor_end(&mut self) {
        self.cursor_position = self.text.chars().count();
    }

    pub fn clear(&mut self) {
        self.text.clear();
        self.cursor_position = 0;
    }

    /// Applies a navigation or editing key. Returns false for keys the field
    /// does not handle so the caller can route them elsewhere.
    pub fn apply_key(&mut self, key: &str) -> bool {
        match key {
            "backspace" => self.delete_char_before(),
            "delete" => self.delete_char_at(),
            "left" => self.move_cursor_left(),
            "right" => self.move_cursor_right(),
            "home" => self.move_cursor_home(),
            "end" => self.move_cursor_end(),
            other => {
                let mut chars = other.chars();
                match (chars.next(), chars.next()) {
                    (Some(ch), None) => {
                        self.insert_char(ch);
                    }
                    _ => return false,
                }
            }
        }
        true
    }

    fn remove_at_cursor(&mut self) {
        let byte_idx = self.char_to_byte_index(self.cursor_position);
        let next_byte_idx = self.char_to_byte_index(self.cursor_position + 1);
        self.text.drain(byte_idx..next_byte_idx);
    }

    fn char_to_byte_index(&self, char_idx: usize) -> usize {
        self.text
            .char_indices()
            .nth(char_idx)
            .map(|(byte_idx, _)| byte_idx)
            .unwrap_or(self.text.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn typed(text: &str) -> TextInputState {
        TextInputState::with_text(text)
    }

    #[test]
    fn new_state_is_empty() {
        let state = TextInputState::default();

        assert!(state.is_empty());
        assert!(state.is_blank());
        assert_eq!(state.cursor_position(), 0);
    }

    #[test]
    fn with_text_places_cursor_at_end() {
        let state = typed("123:abc");

        assert_eq!(state.text(), "123:abc");
        assert_eq!(state.cursor_position(), 7);
    }

    #[test]
    fn insert_in_middle_after_moving_left() {
        let mut state = typed("Ho");
        state.move_cursor_left();
        state.insert_char('i');

        assert_eq!(state.text(), "Hio");
        assert_eq!(state.cursor_position(), 2);
    }

    #[test]
    fn backspace_at_start_does_nothing() {
        let mut state = typed("H");
        state.move_cursor_home();
        state.delete_char_before();

        assert_eq!(state.text(), "H");
    }

    #[test]
    fn delete_removes_char_under_cursor() {
        let mut state = typed("abc");
        state.move_cursor_home();
        state.move_cursor_right();
        state.delete_char_at();

        assert_eq!(state.text(), "ac");
        assert_eq!(state.cursor_position(), 1);
    }

    #[test]
    fn handles_multibyte_characters() {
        let mut state = typed("Привет");
        state.delete_char_before();
        state.move_cursor_home();
        state.delete_char_at();

        assert_eq!(state.text(), "риве");
    }

    #[test]
    fn respects_max_length() {
        let mut state = TextInputState::with_max_length(3);

        assert!(state.insert_char('a'));
        assert!(state.insert_char('b'));
        assert!(state.insert_char('c'));
        assert!(!state.insert_char('d'));
        assert_eq!(state.text(), "abc");
    }

    #[test]
    fn apply_key_edits_and_rejects_unknown_named_keys() {
        let mut state = TextInputState::default();

        assert!(state.apply_key("h"));
        assert!(state.apply_key("i"));
        assert!(state.apply_key("backspace"));
        assert!(!state.apply_key("enter"));
        assert_eq!(state.text(), "h");
    }

    #[test]
    fn whitespace_only_text_is_blank_but_not_empty() {
        let state = typed("   ");

        assert!(state.is_blank());
        assert!(!state.is_empty());
    }
}
