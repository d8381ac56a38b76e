use unicode_width::UnicodeWidthStr;

/// Cursor and focus of the search input. The text itself lives in the
/// directory's raw input; every edit here returns the new text to dispatch.
pub struct SearchState {
    pub cursor_pos: usize,
    pub focused: bool,
}

impl Default for SearchState {
    fn default() -> Self {
        Self {
            cursor_pos: 0,
            focused: true,
        }
    }
}

impl SearchState {
    /// Keep the cursor on a char boundary inside `text`
    pub fn sync(&mut self, text: &str) {
        if self.cursor_pos > text.len() {
            self.cursor_pos = text.len();
        }
        while !text.is_char_boundary(self.cursor_pos) {
            self.cursor_pos -= 1;
        }
    }

    pub fn insert(&mut self, text: &str, c: char) -> String {
        self.sync(text);
        let mut out = text.to_string();
        out.insert(self.cursor_pos, c);
        self.cursor_pos += c.len_utf8();
        out
    }

    /// Remove the char before the cursor; `None` if there is nothing to remove
    pub fn backspace(&mut self, text: &str) -> Option<String> {
        self.sync(text);
        if self.cursor_pos == 0 {
            return None;
        }
        let prev = prev_boundary(text, self.cursor_pos);
        let mut out = text.to_string();
        out.remove(prev);
        self.cursor_pos = prev;
        Some(out)
    }

    pub fn delete(&mut self, text: &str) -> Option<String> {
        self.sync(text);
        if self.cursor_pos >= text.len() {
            return None;
        }
        let mut out = text.to_string();
        out.remove(self.cursor_pos);
        Some(out)
    }

    pub fn move_left(&mut self, text: &str) {
        self.sync(text);
        if self.cursor_pos > 0 {
            self.cursor_pos = prev_boundary(text, self.cursor_pos);
        }
    }

    pub fn move_right(&mut self, text: &str) {
        self.sync(text);
        if self.cursor_pos < text.len() {
            self.cursor_pos = text[self.cursor_pos..]
                .char_indices()
                .nth(1)
                .map(|(i, _)| self.cursor_pos + i)
                .unwrap_or(text.len());
        }
    }

    pub fn home(&mut self) {
        self.cursor_pos = 0;
    }

    pub fn end(&mut self, text: &str) {
        self.cursor_pos = text.len();
    }

    /// Display column of the cursor within `text`
    pub fn cursor_column(&self, text: &str) -> u16 {
        let end = self.cursor_pos.min(text.len());
        let end = if text.is_char_boundary(end) { end } else { 0 };
        text[..end].width() as u16
    }
}

fn prev_boundary(text: &str, pos: usize) -> usize {
    text[..pos]
        .char_indices()
        .last()
        .map(|(i, _)| i)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn typing_and_backspace() {
        let mut s = SearchState::default();
        let text = s.insert("", 'a');
        let text = s.insert(&text, 'é');
        assert_eq!(text, "aé");
        assert_eq!(s.cursor_pos, 3);
        let text = s.backspace(&text).unwrap();
        assert_eq!(text, "a");
        assert_eq!(s.cursor_pos, 1);
        let text = s.backspace(&text).unwrap();
        assert_eq!(text, "");
        assert!(s.backspace(&text).is_none());
    }

    #[test]
    fn insert_in_the_middle() {
        let mut s = SearchState::default();
        s.end("ac");
        s.move_left("ac");
        let text = s.insert("ac", 'b');
        assert_eq!(text, "abc");
        assert!(s.delete(&text).is_some_and(|t| t == "ab"));
    }

    #[test]
    fn cursor_follows_external_clear() {
        let mut s = SearchState::default();
        s.end("hello");
        s.sync("");
        assert_eq!(s.cursor_pos, 0);
        assert_eq!(s.cursor_column(""), 0);
    }

    #[test]
    fn wide_chars_take_two_columns() {
        let mut s = SearchState::default();
        s.end("日本");
        assert_eq!(s.cursor_column("日本"), 4);
    }
}
