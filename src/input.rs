use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Cursor glyph drawn inside focused inputs
pub const CURSOR: char = '▌';

/// Single text field with a cursor, shared by the search box, the composer
/// and the upload dialog.
///
/// The cursor is a char index, so multi-byte input never splits a code point.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextInput {
    content: String,
    cursor: usize,
}

impl TextInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn as_str(&self) -> &str {
        &self.content
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    fn char_count(&self) -> usize {
        self.content.chars().count()
    }

    fn byte_index(&self, char_index: usize) -> usize {
        self.content
            .char_indices()
            .nth(char_index)
            .map(|(i, _)| i)
            .unwrap_or(self.content.len())
    }

    /// Replace the content and move the cursor to the end
    pub fn set(&mut self, content: impl Into<String>) {
        self.content = content.into();
        self.cursor = self.char_count();
    }

    pub fn clear(&mut self) {
        self.content.clear();
        self.cursor = 0;
    }

    /// Return the content and leave the field empty
    pub fn take(&mut self) -> String {
        self.cursor = 0;
        std::mem::take(&mut self.content)
    }

    pub fn insert_char(&mut self, c: char) {
        let at = self.byte_index(self.cursor);
        self.content.insert(at, c);
        self.cursor += 1;
    }

    /// Delete the character before the cursor
    pub fn backspace(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        self.cursor -= 1;
        let at = self.byte_index(self.cursor);
        self.content.remove(at);
        true
    }

    /// Delete the character at the cursor
    pub fn delete(&mut self) -> bool {
        if self.cursor >= self.char_count() {
            return false;
        }
        let at = self.byte_index(self.cursor);
        self.content.remove(at);
        true
    }

    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        self.cursor = (self.cursor + 1).min(self.char_count());
    }

    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.char_count();
    }

    /// Apply a generic editing key. Returns true if the content changed.
    ///
    /// Enter, Tab and Esc are left to the caller.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        if key.kind != KeyEventKind::Press {
            return false;
        }

        match key.code {
            KeyCode::Char(c)
                if !key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
            {
                self.insert_char(c);
                true
            }
            KeyCode::Backspace => self.backspace(),
            KeyCode::Delete => self.delete(),
            KeyCode::Left => {
                self.move_left();
                false
            }
            KeyCode::Right => {
                self.move_right();
                false
            }
            KeyCode::Home => {
                self.move_home();
                false
            }
            KeyCode::End => {
                self.move_end();
                false
            }
            _ => false,
        }
    }

    /// Line and column of the cursor, both counted in chars
    pub fn cursor_position(&self) -> (usize, usize) {
        self.content
            .chars()
            .take(self.cursor)
            .fold((0, 0), |(row, col), c| if c == '\n' { (row + 1, 0) } else { (row, col + 1) })
    }

    /// Slice of the cursor's line at most `width` chars wide that keeps the
    /// cursor in view. Returns the slice and the cursor column inside it.
    pub fn visible_window(&self, width: usize) -> (String, usize) {
        let (row, col) = self.cursor_position();
        let line = self.content.split('\n').nth(row).unwrap_or("");
        window(line, col, width)
    }

    /// Lines to draw in a `width` x `height` box, scrolled so the cursor's
    /// line and column stay visible. Other lines are left for the caller to clip.
    pub fn visible_lines(&self, width: usize, height: usize, show_cursor: bool) -> Vec<String> {
        let (cursor_row, _) = self.cursor_position();
        let skip = (cursor_row + 1).saturating_sub(height);

        self.content
            .split('\n')
            .enumerate()
            .skip(skip)
            .take(height)
            .map(|(row, line)| {
                if row != cursor_row {
                    return line.to_string();
                }
                if !show_cursor {
                    return self.visible_window(width).0;
                }
                // the glyph takes one column of its own
                let (mut shown, col) = self.visible_window(width.saturating_sub(1));
                let at = shown.char_indices().nth(col).map(|(i, _)| i).unwrap_or(shown.len());
                shown.insert(at, CURSOR);
                shown
            })
            .collect()
    }
}

fn window(line: &str, cursor: usize, width: usize) -> (String, usize) {
    if width == 0 {
        return (String::new(), 0);
    }
    let start = (cursor + 1).saturating_sub(width);
    (line.chars().skip(start).take(width).collect(), cursor - start)
}
