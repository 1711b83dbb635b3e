//! Scribble notes kept beside the question, with readline-style editing keys

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

#[derive(Debug, Default)]
pub struct Notepad {
    text: String,
    cursor_pos: usize, // in chars
}

impl Notepad {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_empty(&self) -> bool {
        self.text.trim().is_empty()
    }

    /// Apply an editing key, returns true if it was consumed
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Char(c) if key.modifiers.contains(KeyModifiers::CONTROL) => match c {
                'a' => self.cursor_pos = self.line_start(),
                'e' => self.cursor_pos = self.line_end(),
                'k' => {
                    let start = self.char_to_byte_index(self.cursor_pos);
                    let end = self.char_to_byte_index(self.line_end());
                    self.text.replace_range(start..end, "");
                }
                'u' => {
                    let line_start = self.line_start();
                    let start = self.char_to_byte_index(line_start);
                    let end = self.char_to_byte_index(self.cursor_pos);
                    self.text.replace_range(start..end, "");
                    self.cursor_pos = line_start;
                }
                'w' => self.delete_word(),
                _ => return false,
            },
            KeyCode::Char(c) => self.insert(c),
            KeyCode::Enter => self.insert('\n'),
            KeyCode::Backspace if self.cursor_pos > 0 => {
                self.cursor_pos -= 1;
                let byte_pos = self.char_to_byte_index(self.cursor_pos);
                self.text.remove(byte_pos);
            }
            KeyCode::Delete if self.cursor_pos < self.char_count() => {
                let byte_pos = self.char_to_byte_index(self.cursor_pos);
                self.text.remove(byte_pos);
            }
            KeyCode::Left => self.cursor_pos = self.cursor_pos.saturating_sub(1),
            KeyCode::Right if self.cursor_pos < self.char_count() => self.cursor_pos += 1,
            KeyCode::Home => self.cursor_pos = self.line_start(),
            KeyCode::End => self.cursor_pos = self.line_end(),
            KeyCode::Backspace | KeyCode::Delete | KeyCode::Right => {}
            _ => return false,
        }
        true
    }

    /// Lines for display, with the cursor drawn as a block when `focused`
    pub fn lines(&self, focused: bool) -> Vec<String> {
        let mut text = self.text.clone();
        if focused {
            let byte_pos = self.char_to_byte_index(self.cursor_pos);
            text.insert(byte_pos, '█');
        }
        text.split('\n').map(str::to_string).collect()
    }

    fn insert(&mut self, c: char) {
        let byte_pos = self.char_to_byte_index(self.cursor_pos);
        self.text.insert(byte_pos, c);
        self.cursor_pos += 1;
    }

    fn delete_word(&mut self) {
        if self.cursor_pos == 0 {
            return;
        }
        let chars: Vec<char> = self.text.chars().collect();
        let mut end = self.cursor_pos;

        while end > 0 && chars[end - 1].is_whitespace() {
            end -= 1;
        }
        while end > 0 && !chars[end - 1].is_whitespace() {
            end -= 1;
        }

        let start_byte = self.char_to_byte_index(end);
        let end_byte = self.char_to_byte_index(self.cursor_pos);
        self.text.replace_range(start_byte..end_byte, "");
        self.cursor_pos = end;
    }

    fn line_start(&self) -> usize {
        self.text
            .chars()
            .take(self.cursor_pos)
            .collect::<Vec<_>>()
            .iter()
            .rposition(|c| *c == '\n')
            .map(|i| i + 1)
            .unwrap_or(0)
    }

    fn line_end(&self) -> usize {
        self.text
            .chars()
            .skip(self.cursor_pos)
            .position(|c| c == '\n')
            .map(|i| self.cursor_pos + i)
            .unwrap_or_else(|| self.char_count())
    }

    /// Convert character index to byte index
    fn char_to_byte_index(&self, char_idx: usize) -> usize {
        self.text
            .char_indices()
            .nth(char_idx)
            .map(|(i, _)| i)
            .unwrap_or(self.text.len())
    }

    fn char_count(&self) -> usize {
        self.text.chars().count()
    }
}
