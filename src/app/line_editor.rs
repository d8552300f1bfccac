use unicode_width::UnicodeWidthStr;

/// Single-line text field used for the launch-command prefix.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct LineEditor {
    text: String,
    cursor_col: usize,
}

impl LineEditor {
    pub fn from_text(text: &str) -> Self {
        let text = flatten_line_breaks(text);
        let cursor_col = text.chars().count();
        Self { text, cursor_col }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn into_text(self) -> String {
        self.text
    }

    /// Display width of the text left of the cursor.
    pub fn cursor_offset(&self) -> usize {
        let byte_index = char_to_byte_index(&self.text, self.cursor_col);
        UnicodeWidthStr::width(&self.text[..byte_index])
    }

    pub fn insert_char(&mut self, ch: char) {
        let ch = match ch {
            '\n' | '\r' | '\t' => ' ',
            other if other.is_control() => return,
            other => other,
        };
        let byte_index = char_to_byte_index(&self.text, self.cursor_col);
        self.text.insert(byte_index, ch);
        self.cursor_col += 1;
    }

    pub fn backspace(&mut self) {
        if self.cursor_col == 0 {
            return;
        }
        self.cursor_col -= 1;
        let byte_index = char_to_byte_index(&self.text, self.cursor_col);
        self.text.remove(byte_index);
    }

    pub fn delete_forward(&mut self) {
        if self.cursor_col >= self.len_chars() {
            return;
        }
        let byte_index = char_to_byte_index(&self.text, self.cursor_col);
        self.text.remove(byte_index);
    }

    pub fn move_left(&mut self) {
        self.cursor_col = self.cursor_col.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        self.cursor_col = (self.cursor_col + 1).min(self.len_chars());
    }

    pub fn move_home(&mut self) {
        self.cursor_col = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor_col = self.len_chars();
    }

    fn len_chars(&self) -> usize {
        self.text.chars().count()
    }
}

fn flatten_line_breaks(text: &str) -> String {
    text.chars()
        .filter_map(|ch| match ch {
            '\n' | '\r' | '\t' => Some(' '),
            other if other.is_control() => None,
            other => Some(other),
        })
        .collect()
}

fn char_to_byte_index(text: &str, char_index: usize) -> usize {
    text.char_indices()
        .nth(char_index)
        .map(|(index, _)| index)
        .unwrap_or(text.len())
}
