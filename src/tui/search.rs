use unicode_width::UnicodeWidthStr;

/// Cursor and focus of the search input. The text itself lives in the
/// persisted search term; every edit goes through it.
pub struct SearchInput {
    /// Byte offset into the term, always on a char boundary
    pub cursor_pos: usize,
    pub focused: bool,
}

impl SearchInput {
    pub fn new(term: &str, focused: bool) -> Self {
        Self {
            cursor_pos: term.len(),
            focused,
        }
    }

    pub fn insert(&mut self, term: &mut String, c: char) {
        let pos = self.cursor_pos.min(term.len());
        term.insert(pos, c);
        self.cursor_pos = pos + c.len_utf8();
    }

    pub fn backspace(&mut self, term: &mut String) {
        if self.cursor_pos == 0 {
            return;
        }
        let prev = prev_boundary(term, self.cursor_pos);
        term.remove(prev);
        self.cursor_pos = prev;
    }

    pub fn delete(&mut self, term: &mut String) {
        if self.cursor_pos < term.len() {
            term.remove(self.cursor_pos);
        }
    }

    pub fn clear(&mut self, term: &mut String) {
        term.clear();
        self.cursor_pos = 0;
    }

    pub fn move_left(&mut self, term: &str) {
        if self.cursor_pos > 0 {
            self.cursor_pos = prev_boundary(term, self.cursor_pos);
        }
    }

    pub fn move_right(&mut self, term: &str) {
        if self.cursor_pos < term.len() {
            self.cursor_pos = term[self.cursor_pos..]
                .char_indices()
                .nth(1)
                .map(|(i, _)| self.cursor_pos + i)
                .unwrap_or(term.len());
        }
    }

    pub fn home(&mut self) {
        self.cursor_pos = 0;
    }

    pub fn end(&mut self, term: &str) {
        self.cursor_pos = term.len();
    }

    /// Display column of the cursor (wide glyphs count double)
    pub fn cursor_column(&self, term: &str) -> u16 {
        let pos = self.cursor_pos.min(term.len());
        u16::try_from(term[..pos].width()).unwrap_or(u16::MAX)
    }
}

fn prev_boundary(term: &str, pos: usize) -> usize {
    term[..pos]
        .char_indices()
        .last()
        .map(|(i, _)| i)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edits_respect_char_boundaries() {
        let mut term = String::from("Rüst");
        let mut input = SearchInput::new(&term, true);

        input.backspace(&mut term);
        assert_eq!(term, "Rüs");
        input.move_left(&term);
        input.move_left(&term);
        assert_eq!(input.cursor_pos, 1);
        input.delete(&mut term);
        assert_eq!(term, "Rs");
        input.insert(&mut term, 'u');
        assert_eq!(term, "Rus");
        assert_eq!(input.cursor_pos, 2);
    }

    #[test]
    fn cursor_column_counts_display_width() {
        let term = String::from("日本");
        let input = SearchInput::new(&term, true);
        assert_eq!(input.cursor_column(&term), 4);
    }

    #[test]
    fn cursor_column_saturates_on_huge_terms() {
        let term = "w".repeat(70_000);
        let input = SearchInput::new(&term, true);
        assert_eq!(input.cursor_column(&term), u16::MAX);
    }
}
