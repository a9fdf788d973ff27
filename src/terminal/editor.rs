//! Single-line editor backing the terminal prompt.

use crate::input::{Key, KeyCode, KeyModifiers};
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

/// Editable line with a cursor.
///
/// The cursor is a byte offset that always sits on a grapheme boundary, so
/// backspace removes a whole user-perceived character.
#[derive(Debug, Default, Clone)]
pub struct LineEditor {
    content: String,
    cursor: usize,
}

impl LineEditor {
    /// Create an empty editor.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current text.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Cursor byte offset.
    pub const fn cursor(&self) -> usize {
        self.cursor
    }

    /// Take the text out, leaving the editor empty.
    pub fn take(&mut self) -> String {
        self.cursor = 0;
        std::mem::take(&mut self.content)
    }

    /// Apply an editing key. Returns `true` if the key was consumed.
    ///
    /// Characters typed with Ctrl or Alt held are not inserted.
    pub fn handle_key(&mut self, key: &Key) -> bool {
        match key.code {
            KeyCode::Char(c) => {
                if key
                    .modifiers
                    .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
                {
                    return false;
                }
                self.insert_char(c);
            }
            KeyCode::Backspace => self.backspace(),
            KeyCode::Delete => self.delete(),
            KeyCode::Left => self.cursor = self.prev_boundary(),
            KeyCode::Right => self.cursor = self.next_boundary(),
            KeyCode::Home => self.cursor = 0,
            KeyCode::End => self.cursor = self.content.len(),
            _ => return false,
        }
        true
    }

    fn insert_char(&mut self, c: char) {
        self.content.insert(self.cursor, c);
        self.cursor += c.len_utf8();
    }

    fn backspace(&mut self) {
        let prev = self.prev_boundary();
        self.content.replace_range(prev..self.cursor, "");
        self.cursor = prev;
    }

    fn delete(&mut self) {
        let next = self.next_boundary();
        self.content.replace_range(self.cursor..next, "");
    }

    fn prev_boundary(&self) -> usize {
        self.content[..self.cursor]
            .grapheme_indices(true)
            .next_back()
            .map_or(0, |(i, _)| i)
    }

    fn next_boundary(&self) -> usize {
        self.content[self.cursor..]
            .graphemes(true)
            .next()
            .map_or(self.cursor, |g| self.cursor + g.len())
    }

    /// Portion of the text that fits in `width` columns with the cursor in
    /// view, and the cursor's column within it.
    pub fn visible(&self, width: usize) -> (&str, usize) {
        if width == 0 {
            return ("", 0);
        }

        // Scroll so the cursor has a column of its own.
        let mut start = 0;
        for (i, _) in self.content[..self.cursor].grapheme_indices(true) {
            start = i;
            if self.content[i..self.cursor].width() < width {
                break;
            }
        }
        if self.content[..self.cursor].width() < width {
            start = 0;
        }

        let mut end = start;
        let mut used = 0;
        for grapheme in self.content[start..].graphemes(true) {
            let w = grapheme.width();
            if used + w > width {
                break;
            }
            used += w;
            end += grapheme.len();
        }

        let column = self.content[start..self.cursor].width();
        (&self.content[start..end], column)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn typed(text: &str) -> LineEditor {
        let mut editor = LineEditor::new();
        for c in text.chars() {
            assert!(editor.handle_key(&Key::char(c)));
        }
        editor
    }

    #[test]
    fn test_insert_and_backspace() {
        let mut editor = typed("Hello");
        assert_eq!(editor.content(), "Hello");
        assert_eq!(editor.cursor(), 5);

        editor.handle_key(&Key::plain(KeyCode::Backspace));
        assert_eq!(editor.content(), "Hell");
    }

    #[test]
    fn test_backspace_removes_grapheme() {
        // "e" followed by a combining acute accent is one grapheme.
        let mut editor = typed("cafe\u{301}");
        editor.handle_key(&Key::plain(KeyCode::Backspace));
        assert_eq!(editor.content(), "caf");
    }

    #[test]
    fn test_cursor_movement() {
        let mut editor = typed("Hello");
        editor.handle_key(&Key::plain(KeyCode::Left));
        assert_eq!(editor.cursor(), 4);
        editor.handle_key(&Key::plain(KeyCode::Home));
        assert_eq!(editor.cursor(), 0);
        editor.handle_key(&Key::plain(KeyCode::Left));
        assert_eq!(editor.cursor(), 0);
        editor.handle_key(&Key::plain(KeyCode::Delete));
        assert_eq!(editor.content(), "ello");
        editor.handle_key(&Key::plain(KeyCode::End));
        assert_eq!(editor.cursor(), 4);
        editor.handle_key(&Key::plain(KeyCode::Right));
        assert_eq!(editor.cursor(), 4);
    }

    #[test]
    fn test_insert_mid_line() {
        let mut editor = typed("ac");
        editor.handle_key(&Key::plain(KeyCode::Left));
        editor.handle_key(&Key::char('b'));
        assert_eq!(editor.content(), "abc");
    }

    #[test]
    fn test_control_chars_not_inserted() {
        let mut editor = LineEditor::new();
        let ctrl_a = Key::new(KeyCode::Char('a'), KeyModifiers::CONTROL);
        assert!(!editor.handle_key(&ctrl_a));
        assert!(!editor.handle_key(&Key::plain(KeyCode::Enter)));
        assert!(editor.content().is_empty());
    }

    #[test]
    fn test_take_resets() {
        let mut editor = typed("pe");
        assert_eq!(editor.take(), "pe");
        assert_eq!(editor.cursor(), 0);
        assert!(editor.content().is_empty());
    }

    #[test]
    fn test_visible_window_scrolls() {
        let editor = typed("abcdefgh");
        assert_eq!(editor.visible(20), ("abcdefgh", 8));

        let (text, column) = editor.visible(4);
        assert_eq!(text, "fgh");
        assert_eq!(column, 3);

        let mut editor = editor;
        editor.handle_key(&Key::plain(KeyCode::Home));
        assert_eq!(editor.visible(4), ("abcd", 0));
        assert_eq!(editor.visible(0), ("", 0));
    }

    #[test]
    fn test_visible_wide_glyphs() {
        let editor = typed("日本語");
        let (text, column) = editor.visible(5);
        assert_eq!(text, "本語");
        assert_eq!(column, 4);
    }
}
