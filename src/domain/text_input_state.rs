//! Editable single-line text field shared by the name and message inputs.

use unicode_width::UnicodeWidthStr;

/// Maximum number of characters a field accepts.
pub const MAX_INPUT_LENGTH: usize = 4096;

/// Text plus a character-indexed cursor.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TextInputState {
    text: String,
    cursor_position: usize,
}

impl TextInputState {
    /// Creates a field pre-filled with `text`, cursor at the end.
    pub fn with_text(text: &str) -> Self {
        let mut state = Self::default();
        state.set_text(text);
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

    /// True when the field holds nothing but whitespace.
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }

    /// Replaces the whole content, truncated to [`MAX_INPUT_LENGTH`].
    pub fn set_text(&mut self, text: &str) {
        self.text = text.chars().take(MAX_INPUT_LENGTH).collect();
        self.cursor_position = self.text.chars().count();
    }

    /// Inserts a character at the cursor. Returns false when the field is full.
    pub fn insert_char(&mut self, ch: char) -> bool {
        if self.text.chars().count() >= MAX_INPUT_LENGTH {
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
            self.remove_char_at_cursor();
        }
    }

    pub fn delete_char_at(&mut self) {
        if self.cursor_position < self.text.chars().count() {
            self.remove_char_at_cursor();
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

    /// Terminal columns occupied by the text left of the cursor.
    ///
    /// Wide characters (CJK, most emoji) take two columns, so this differs from
    /// [`Self::cursor_position`] for non-Latin input.
    pub fn cursor_display_offset(&self) -> usize {
        let byte_idx = self.char_to_byte_index(self.cursor_position);
        self.text[..byte_idx].width()
    }

    fn remove_char_at_cursor(&mut self) {
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
        let mut state = TextInputState::default();
        for ch in text.chars() {
            state.insert_char(ch);
        }
        state
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
        let state = TextInputState::with_text("ななしさん");

        assert_eq!(state.text(), "ななしさん");
        assert_eq!(state.cursor_position(), 5);
    }

    #[test]
    fn insert_char_at_middle_position() {
        let mut state = typed("Ho");
        state.move_cursor_left();
        state.insert_char('i');

        assert_eq!(state.text(), "Hio");
        assert_eq!(state.cursor_position(), 2);
    }

    #[test]
    fn delete_char_before_at_start_does_nothing() {
        let mut state = typed("H");
        state.move_cursor_home();
        state.delete_char_before();

        assert_eq!(state.text(), "H");
        assert_eq!(state.cursor_position(), 0);
    }

    #[test]
    fn delete_char_at_middle_removes_correct_char() {
        let mut state = typed("abc");
        state.move_cursor_home();
        state.move_cursor_right();
        state.delete_char_at();

        assert_eq!(state.text(), "ac");
        assert_eq!(state.cursor_position(), 1);
    }

    #[test]
    fn cursor_stays_within_text_bounds() {
        let mut state = typed("ab");

        state.move_cursor_right();
        assert_eq!(state.cursor_position(), 2);

        state.move_cursor_home();
        state.move_cursor_left();
        assert_eq!(state.cursor_position(), 0);

        state.move_cursor_end();
        assert_eq!(state.cursor_position(), 2);
    }

    #[test]
    fn edits_multibyte_text_by_character() {
        let mut state = typed("こんにちは");
        state.delete_char_before();
        assert_eq!(state.text(), "こんにち");

        state.move_cursor_home();
        state.delete_char_at();
        assert_eq!(state.text(), "んにち");
    }

    #[test]
    fn whitespace_only_text_is_blank_but_not_empty() {
        let state = typed("  \t ");

        assert!(!state.is_empty());
        assert!(state.is_blank());
    }

    #[test]
    fn clear_resets_text_and_cursor() {
        let mut state = typed("Hi");
        state.clear();

        assert!(state.is_empty());
        assert_eq!(state.cursor_position(), 0);
    }

    #[test]
    fn cursor_display_offset_counts_wide_characters_twice() {
        let mut state = typed("aあb");
        assert_eq!(state.cursor_display_offset(), 4);

        state.move_cursor_left();
        assert_eq!(state.cursor_display_offset(), 3);
    }

    #[test]
    fn insert_char_respects_max_length_limit() {
        let mut state = TextInputState::default();
        for _ in 0..MAX_INPUT_LENGTH {
            assert!(state.insert_char('x'));
        }

        assert!(!state.insert_char('y'));
        assert_eq!(state.text().chars().count(), MAX_INPUT_LENGTH);
    }

    #[test]
    fn set_text_truncates_to_max_length() {
        let long = "x".repeat(MAX_INPUT_LENGTH + 10);
        let state = TextInputState::with_text(&long);

        assert_eq!(state.text().chars().count(), MAX_INPUT_LENGTH);
        assert_eq!(state.cursor_position(), MAX_INPUT_LENGTH);
    }
}
