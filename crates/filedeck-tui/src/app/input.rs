//! Single-line text input used by the rename, create, go-to and filter
//! prompts.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Editable line with a cursor. The cursor counts characters, not bytes.
#[derive(Debug, Clone, Default)]
pub struct InputState {
    buffer: String,
    cursor: usize,
    /// Value the prompt was opened with.
    original: Option<String>,
    error: Option<String>,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an input prefilled with `value`, cursor at the end.
    pub fn with_initial(value: &str) -> Self {
        Self {
            buffer: value.to_string(),
            cursor: value.chars().count(),
            original: Some(value.to_string()),
            error: None,
        }
    }

    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Show an error under the input; cleared by the next key.
    pub fn set_error(&mut self, error: impl Into<String>) {
        self.error = Some(error.into());
    }

    /// Whether the buffer differs from the initial value.
    pub fn has_changed(&self) -> bool {
        self.original.as_deref() != Some(self.buffer.as_str())
    }

    fn byte_index(&self, cursor: usize) -> usize {
        self.buffer
            .char_indices()
            .nth(cursor)
            .map_or(self.buffer.len(), |(i, _)| i)
    }

    fn len(&self) -> usize {
        self.buffer.chars().count()
    }

    /// Handle a key event.
    pub fn handle_key(&mut self, key: KeyEvent) -> InputResult {
        self.error = None;

        match (key.code, key.modifiers) {
            (KeyCode::Enter, _) => InputResult::Submit(self.buffer.clone()),
            (KeyCode::Esc, _) => InputResult::Cancel,

            (KeyCode::Backspace, _) => {
                if self.cursor > 0 {
                    self.cursor -= 1;
                    let at = self.byte_index(self.cursor);
                    self.buffer.remove(at);
                }
                InputResult::Changed
            }
            (KeyCode::Delete, _) => {
                if self.cursor < self.len() {
                    let at = self.byte_index(self.cursor);
                    self.buffer.remove(at);
                }
                InputResult::Changed
            }

            (KeyCode::Left, _) => {
                self.cursor = self.cursor.saturating_sub(1);
                InputResult::Continue
            }
            (KeyCode::Right, _) => {
                self.cursor = (self.cursor + 1).min(self.len());
                InputResult::Continue
            }
            (KeyCode::Home, _) | (KeyCode::Char('a'), KeyModifiers::CONTROL) => {
                self.cursor = 0;
                InputResult::Continue
            }
            (KeyCode::End, _) | (KeyCode::Char('e'), KeyModifiers::CONTROL) => {
                self.cursor = self.len();
                InputResult::Continue
            }

            // Ctrl-U: kill the whole line
            (KeyCode::Char('u'), KeyModifiers::CONTROL) => {
                self.buffer.clear();
                self.cursor = 0;
                InputResult::Changed
            }
            // Ctrl-W: kill the word left of the cursor
            (KeyCode::Char('w'), KeyModifiers::CONTROL) => {
                let end = self.byte_index(self.cursor);
                let start = self.buffer[..end]
                    .trim_end()
                    .rfind(char::is_whitespace)
                    .map_or(0, |i| i + 1);
                self.buffer.replace_range(start..end, "");
                self.cursor = self.buffer[..start].chars().count();
                InputResult::Changed
            }

            (KeyCode::Char(c), KeyModifiers::NONE | KeyModifiers::SHIFT) => {
                let at = self.byte_index(self.cursor);
                self.buffer.insert(at, c);
                self.cursor += 1;
                InputResult::Changed
            }

            _ => InputResult::Continue,
        }
    }
}

/// Result of handling input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputResult {
    /// Cursor moved or key ignored.
    Continue,
    /// Buffer contents changed.
    Changed,
    Cancel,
    Submit(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_str(input: &mut InputState, text: &str) {
        for c in text.chars() {
            input.handle_key(key(KeyCode::Char(c)));
        }
    }

    #[test]
    fn test_input_basic() {
        let mut input = InputState::new();
        type_str(&mut input, "test");
        assert_eq!(input.buffer(), "test");
        assert_eq!(input.cursor(), 4);
    }

    #[test]
    fn test_multibyte_editing() {
        let mut input = InputState::with_initial("café");
        assert_eq!(input.cursor(), 4);

        input.handle_key(key(KeyCode::Left));
        input.handle_key(key(KeyCode::Backspace));
        assert_eq!(input.buffer(), "caé");

        type_str(&mut input, "ñ");
        assert_eq!(input.buffer(), "cañé");

        input.handle_key(key(KeyCode::End));
        input.handle_key(key(KeyCode::Backspace));
        assert_eq!(input.buffer(), "cañ");
    }

    #[test]
    fn test_delete_word() {
        let mut input = InputState::with_initial("new folder name");
        let result = input.handle_key(KeyEvent::new(KeyCode::Char('w'), KeyModifiers::CONTROL));
        assert_eq!(result, InputResult::Changed);
        assert_eq!(input.buffer(), "new folder ");
        assert_eq!(input.cursor(), 11);
    }

    #[test]
    fn test_submit_cancel_and_change_tracking() {
        let mut input = InputState::with_initial("a.txt");
        assert!(!input.has_changed());

        assert_eq!(
            input.handle_key(key(KeyCode::Enter)),
            InputResult::Submit("a.txt".into())
        );
        type_str(&mut input, "x");
        assert!(input.has_changed());
        assert_eq!(input.handle_key(key(KeyCode::Esc)), InputResult::Cancel);
    }

    #[test]
    fn test_error_cleared_by_next_key() {
        let mut input = InputState::new();
        input.set_error("Name is required");
        assert!(input.error().is_some());
        input.handle_key(key(KeyCode::Left));
        assert!(input.error().is_none());
    }
}
