use unicode_width::UnicodeWidthStr;

/// Search input line for the TUI
///
/// Editing methods return true when the text changed, so the caller knows
/// to hand the new text to the search controller.
pub struct SearchInput {
    pub text: String,
    /// Byte offset into `text`, always on a char boundary
    pub cursor_pos: usize,
    pub focused: bool,
}

impl Default for SearchInput {
    fn default() -> Self {
        Self {
            text: String::new(),
            cursor_pos: 0,
            focused: true,
        }
    }
}

impl SearchInput {
    pub fn insert(&mut self, c: char) -> bool {
        self.text.insert(self.cursor_pos, c);
        self.cursor_pos += c.len_utf8();
        true
    }

    pub fn backspace(&mut self) -> bool {
        if self.cursor_pos == 0 {
            return false;
        }
        let prev = self.prev_boundary();
        self.text.remove(prev);
        self.cursor_pos = prev;
        true
    }

    pub fn delete(&mut self) -> bool {
        if self.cursor_pos >= self.text.len() {
            return false;
        }
        self.text.remove(self.cursor_pos);
        true
    }

    pub fn clear(&mut self) -> bool {
        if self.text.is_empty() {
            return false;
        }
        self.text.clear();
        self.cursor_pos = 0;
        true
    }

    /// Replace the whole line, cursor at the end
    pub fn set(&mut self, text: &str) -> bool {
        if self.text == text {
            return false;
        }
        self.text = text.to_string();
        self.cursor_pos = self.text.len();
        true
    }

    pub fn move_left(&mut self) {
        if self.cursor_pos > 0 {
            self.cursor_pos = self.prev_boundary();
        }
    }

    pub fn move_right(&mut self) {
        if self.cursor_pos < self.text.len() {
            self.cursor_pos = self.text[self.cursor_pos..]
                .char_indices()
                .nth(1)
                .map(|(i, _)| self.cursor_pos + i)
                .unwrap_or(self.text.len());
        }
    }

    pub fn home(&mut self) {
        self.cursor_pos = 0;
    }

    pub fn end(&mut self) {
        self.cursor_pos = self.text.len();
    }

    /// Terminal columns between the start of the text and the cursor
    pub fn cursor_column(&self) -> u16 {
        self.text[..self.cursor_pos].width() as u16
    }

    fn prev_boundary(&self) -> usize {
        self.text[..self.cursor_pos]
            .char_indices()
            .last()
            .map(|(i, _)| i)
            .unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edits_respect_char_boundaries() {
        let mut input = SearchInput::default();
        for c in "naïve".chars() {
            assert!(input.insert(c));
        }
        input.move_left();
        input.move_left();
        assert!(input.backspace());
        assert_eq!(input.text, "nave");
        assert_eq!(input.cursor_pos, 2);
        assert!(input.delete());
        assert_eq!(input.text, "nae");
    }

    #[test]
    fn no_change_at_edges() {
        let mut input = SearchInput::default();
        assert!(!input.backspace());
        assert!(!input.delete());
        assert!(!input.clear());
        input.set("rust");
        input.end();
        assert!(!input.delete());
        input.home();
        assert!(!input.backspace());
    }

    #[test]
    fn cursor_column_counts_display_width() {
        let mut input = SearchInput::default();
        input.set("搜索");
        assert_eq!(input.cursor_column(), 4);
    }
}
