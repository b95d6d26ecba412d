//! Keyboard input.

use std::fmt;

use crossterm::event::{KeyCode, KeyModifiers};

/// A key press.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyMsg {
    /// Which key.
    pub key_type: KeyType,
    /// Typed characters for [`KeyType::Runes`]; several when pasted.
    pub runes: Vec<char>,
    /// Alt was held.
    pub alt: bool,
    /// Came from a bracketed paste.
    pub paste: bool,
}

impl KeyMsg {
    /// A non-character key.
    pub const fn from_type(key_type: KeyType) -> Self {
        Self {
            key_type,
            runes: Vec::new(),
            alt: false,
            paste: false,
        }
    }

    /// A single typed character.
    pub fn from_char(c: char) -> Self {
        Self {
            key_type: KeyType::Runes,
            runes: vec![c],
            alt: false,
            paste: false,
        }
    }

    /// Pasted text.
    pub fn paste(text: &str) -> Self {
        Self {
            key_type: KeyType::Runes,
            runes: text.chars().collect(),
            alt: false,
            paste: true,
        }
    }

    /// The typed character, if exactly one was typed.
    pub fn char(&self) -> Option<char> {
        match (self.key_type, self.runes.as_slice()) {
            (KeyType::Runes, [c]) => Some(*c),
            (KeyType::Space, _) => Some(' '),
            _ => None,
        }
    }
}

impl fmt::Display for KeyMsg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.alt {
            write!(f, "alt+")?;
        }
        if self.key_type == KeyType::Runes {
            let text: String = self.runes.iter().collect();
            if self.paste {
                write!(f, "[{text}]")
            } else {
                write!(f, "{text}")
            }
        } else {
            write!(f, "{}", self.key_type)
        }
    }
}

/// The keys the app distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyType {
    /// Printable characters.
    Runes,
    /// Space bar.
    Space,
    /// Enter / return.
    Enter,
    /// Tab.
    Tab,
    /// Shift+Tab.
    ShiftTab,
    /// Backspace.
    Backspace,
    /// Delete.
    Delete,
    /// Escape.
    Esc,
    /// Arrow up.
    Up,
    /// Arrow down.
    Down,
    /// Arrow left.
    Left,
    /// Arrow right.
    Right,
    /// Home.
    Home,
    /// End.
    End,
    /// Page up.
    PgUp,
    /// Page down.
    PgDown,
    /// Ctrl+A.
    CtrlA,
    /// Ctrl+C.
    CtrlC,
    /// Ctrl+E.
    CtrlE,
    /// Ctrl+U.
    CtrlU,
    /// Ctrl+W.
    CtrlW,
    /// Anything else.
    Unknown,
}

impl fmt::Display for KeyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Runes => "runes",
            Self::Space => " ",
            Self::Enter => "enter",
            Self::Tab => "tab",
            Self::ShiftTab => "shift+tab",
            Self::Backspace => "backspace",
            Self::Delete => "delete",
            Self::Esc => "esc",
            Self::Up => "up",
            Self::Down => "down",
            Self::Left => "left",
            Self::Right => "right",
            Self::Home => "home",
            Self::End => "end",
            Self::PgUp => "pgup",
            Self::PgDown => "pgdown",
            Self::CtrlA => "ctrl+a",
            Self::CtrlC => "ctrl+c",
            Self::CtrlE => "ctrl+e",
            Self::CtrlU => "ctrl+u",
            Self::CtrlW => "ctrl+w",
            Self::Unknown => "unknown",
        };
        f.write_str(name)
    }
}

/// Translate a crossterm key event.
pub fn from_crossterm_key(code: KeyCode, modifiers: KeyModifiers) -> KeyMsg {
    let ctrl = modifiers.contains(KeyModifiers::CONTROL);
    let alt = modifiers.contains(KeyModifiers::ALT);
    let shift = modifiers.contains(KeyModifiers::SHIFT);

    let key_type = match code {
        KeyCode::Char(c) if ctrl => match c.to_ascii_lowercase() {
            'a' => KeyType::CtrlA,
            'c' => KeyType::CtrlC,
            'e' => KeyType::CtrlE,
            'u' => KeyType::CtrlU,
            'w' => KeyType::CtrlW,
            _ => KeyType::Unknown,
        },
        KeyCode::Char(' ') => KeyType::Space,
        KeyCode::Char(c) => {
            return KeyMsg {
                alt,
                ..KeyMsg::from_char(c)
            };
        }
        KeyCode::Enter => KeyType::Enter,
        KeyCode::Tab if shift => KeyType::ShiftTab,
        KeyCode::Tab => KeyType::Tab,
        KeyCode::BackTab => KeyType::ShiftTab,
        KeyCode::Backspace => KeyType::Backspace,
        KeyCode::Delete => KeyType::Delete,
        KeyCode::Esc => KeyType::Esc,
        KeyCode::Up => KeyType::Up,
        KeyCode::Down => KeyType::Down,
        KeyCode::Left => KeyType::Left,
        KeyCode::Right => KeyType::Right,
        KeyCode::Home => KeyType::Home,
        KeyCode::End => KeyType::End,
        KeyCode::PageUp => KeyType::PgUp,
        KeyCode::PageDown => KeyType::PgDown,
        _ => KeyType::Unknown,
    };

    KeyMsg {
        alt,
        ..KeyMsg::from_type(key_type)
    }
}
