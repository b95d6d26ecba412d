//! Single-line text input.
//!
//! ```rust
//! use recipes_tui::components::{EchoMode, TextInput};
//! use recipes_tui::runtime::KeyMsg;
//!
//! let mut input = TextInput::new("Password");
//! input.set_echo_mode(EchoMode::Password);
//! input.focus();
//! input.handle_key(&KeyMsg::from_char('s'));
//! input.handle_key(&KeyMsg::from_char('3'));
//! assert_eq!(input.value(), "s3");
//! assert_eq!(input.display_value(), "••");
//! ```

use unicode_width::UnicodeWidthChar;

use super::truncate;
use crate::runtime::{KeyMsg, KeyType};
use crate::theme::Theme;

/// How typed characters are shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EchoMode {
    /// As typed.
    #[default]
    Normal,
    /// One mask character per typed character.
    Password,
}

const MASK: char = '•';

/// Editable text with a cursor.
#[derive(Debug, Clone, Default)]
pub struct TextInput {
    label: String,
    placeholder: String,
    value: Vec<char>,
    pos: usize,
    focused: bool,
    echo_mode: EchoMode,
    char_limit: usize,
}

impl TextInput {
    /// Empty input with a label.
    #[must_use]
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            ..Self::default()
        }
    }

    /// Text shown while empty.
    pub fn set_placeholder(&mut self, placeholder: impl Into<String>) {
        self.placeholder = placeholder.into();
    }

    /// Echo mode.
    pub const fn set_echo_mode(&mut self, mode: EchoMode) {
        self.echo_mode = mode;
    }

    /// Maximum characters; zero means unlimited.
    pub const fn set_char_limit(&mut self, limit: usize) {
        self.char_limit = limit;
    }

    /// The label.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Replace the content and move the cursor to the end.
    pub fn set_value(&mut self, value: &str) {
        self.value = value.chars().collect();
        if self.char_limit > 0 {
            self.value.truncate(self.char_limit);
        }
        self.pos = self.value.len();
    }

    /// The content as typed.
    #[must_use]
    pub fn value(&self) -> String {
        self.value.iter().collect()
    }

    /// The content as shown (masked in password mode).
    #[must_use]
    pub fn display_value(&self) -> String {
        match self.echo_mode {
            EchoMode::Normal => self.value(),
            EchoMode::Password => MASK.to_string().repeat(self.value.len()),
        }
    }

    /// Whether it is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    /// Clear the content.
    pub fn reset(&mut self) {
        self.value.clear();
        self.pos = 0;
    }

    /// Cursor position in characters.
    #[must_use]
    pub const fn position(&self) -> usize {
        self.pos
    }

    /// Whether keys are accepted.
    #[must_use]
    pub const fn focused(&self) -> bool {
        self.focused
    }

    /// Accept keys.
    pub const fn focus(&mut self) {
        self.focused = true;
    }

    /// Stop accepting keys.
    pub const fn blur(&mut self) {
        self.focused = false;
    }

    fn insert(&mut self, runes: &[char]) {
        let mut runes: Vec<char> = runes.iter().copied().filter(|c| !c.is_control()).collect();
        if self.char_limit > 0 {
            let room = self.char_limit.saturating_sub(self.value.len());
            runes.truncate(room);
        }
        let n = runes.len();
        self.value.splice(self.pos..self.pos, runes);
        self.pos += n;
    }

    fn delete_word_backward(&mut self) {
        if self.pos == 0 {
            return;
        }
        // A masked value has no visible words; clear up to the cursor.
        if self.echo_mode == EchoMode::Password {
            self.value.drain(..self.pos);
            self.pos = 0;
            return;
        }
        let mut start = self.pos;
        while start > 0 && self.value[start - 1].is_whitespace() {
            start -= 1;
        }
        while start > 0 && !self.value[start - 1].is_whitespace() {
            start -= 1;
        }
        self.value.drain(start..self.pos);
        self.pos = start;
    }

    /// Apply an editing key. Returns whether the value changed.
    ///
    /// Unfocused inputs ignore everything.
    pub fn handle_key(&mut self, key: &KeyMsg) -> bool {
        if !self.focused {
            return false;
        }
        let before = self.value.clone();
        match key.key_type {
            KeyType::Runes if !key.alt => self.insert(&key.runes),
            KeyType::Space => self.insert(&[' ']),
            KeyType::Backspace => {
                if self.pos > 0 {
                    self.value.remove(self.pos - 1);
                    self.pos -= 1;
                }
            }
            KeyType::Delete => {
                if self.pos < self.value.len() {
                    self.value.remove(self.pos);
                }
            }
            KeyType::CtrlW => self.delete_word_backward(),
            KeyType::CtrlU => {
                self.value.drain(..self.pos);
                self.pos = 0;
            }
            KeyType::Left => self.pos = self.pos.saturating_sub(1),
            KeyType::Right => self.pos = (self.pos + 1).min(self.value.len()),
            KeyType::Home | KeyType::CtrlA => self.pos = 0,
            KeyType::End | KeyType::CtrlE => self.pos = self.value.len(),
            _ => {}
        }
        self.value != before
    }

    /// Render as `label: value`, padded to `width` columns of input.
    #[must_use]
    pub fn view(&self, theme: &Theme, width: usize) -> String {
        let label = if self.focused {
            theme.title_style().render(&format!("{}:", self.label))
        } else {
            theme.muted_style().render(&format!("{}:", self.label))
        };

        let field = if self.value.is_empty() {
            let text = truncate(&self.placeholder, width);
            let cursor = if self.focused { "▏" } else { "" };
            format!("{cursor}{}", theme.muted_style().render(&text))
        } else {
            let shown: Vec<char> = self.display_value().chars().collect();
            // Keep the cursor in view by dropping characters from the left.
            let mut start = 0;
            let visible_cols = |from: usize, to: usize| -> usize {
                shown[from..to].iter().map(|c| c.width().unwrap_or(0)).sum()
            };
            while start < self.pos && visible_cols(start, self.pos) + 1 > width {
                start += 1;
            }
            let before: String = shown[start..self.pos].iter().collect();
            let after: String = shown[self.pos..].iter().collect();
            let after = truncate(&after, width.saturating_sub(visible_cols(start, self.pos) + 1));
            if self.focused {
                format!(
                    "{}{}{}",
                    theme.text_style().render(&before),
                    theme.title_style().render("▏"),
                    theme.text_style().render(&after)
                )
            } else {
                theme.text_style().render(&format!("{before}{after}"))
            }
        };

        format!("{label} {field}")
    }
}
