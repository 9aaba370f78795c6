//! Input field handling for the terminal user interface.

/// A single-line text input with a cursor measured in characters.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct InputField {
    pub value: String,
    pub cursor: usize,
    pub active: bool,
}

impl InputField {
    /// Create a new empty input field.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an input field with initial text value, cursor at the end.
    pub fn with_value(value: &str) -> Self {
        Self {
            value: value.to_string(),
            cursor: value.chars().count(),
            active: false,
        }
    }

    /// Byte offset of the character at `cursor`.
    fn byte_index(&self, cursor: usize) -> usize {
        self.value
            .char_indices()
            .nth(cursor)
            .map(|(i, _)| i)
            .unwrap_or(self.value.len())
    }

    fn len_chars(&self) -> usize {
        self.value.chars().count()
    }

    /// Insert a character at the current cursor position.
    pub fn handle_char(&mut self, c: char) {
        let at = self.byte_index(self.cursor);
        self.value.insert(at, c);
        self.cursor += 1;
    }

    /// Delete the character before the cursor.
    pub fn handle_backspace(&mut self) {
        if self.cursor > 0 {
            let at = self.byte_index(self.cursor - 1);
            self.value.remove(at);
            self.cursor -= 1;
        }
    }

    /// Delete the character at the cursor position.
    pub fn handle_delete(&mut self) {
        if self.cursor < self.len_chars() {
            let at = self.byte_index(self.cursor);
            self.value.remove(at);
        }
    }

    /// Move cursor one position to the left.
    pub fn move_cursor_left(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
        }
    }

    /// Move cursor one position to the right.
    pub fn move_cursor_right(&mut self) {
        if self.cursor < self.len_chars() {
            self.cursor += 1;
        }
    }

    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.len_chars();
    }

    /// Empty the field.
    pub fn clear(&mut self) {
        self.value.clear();
        self.cursor = 0;
    }

    /// Trimmed value, or `None` when blank.
    pub fn optional(&self) -> Option<String> {
        let v = self.value.trim();
        if v.is_empty() {
            None
        } else {
            Some(v.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_editing_multibyte_text() {
        let mut field = InputField::with_value("café");
        assert_eq!(field.cursor, 4);
        field.handle_char('!');
        assert_eq!(field.value, "café!");
        field.move_cursor_left();
        field.move_cursor_left();
        field.handle_backspace();
        assert_eq!(field.value, "caé!");
        field.handle_delete();
        assert_eq!(field.value, "ca!");
        field.move_home();
        field.handle_char('>');
        assert_eq!(field.value, ">ca!");
    }

    #[test]
    fn test_optional() {
        assert_eq!(InputField::with_value("  ").optional(), None);
        assert_eq!(InputField::with_value(" x ").optional().as_deref(), Some("x"));
    }
}
