//! Mouse input. Only delivered when mouse capture is enabled.

use crossterm::event::{MouseButton as CtButton, MouseEvent, MouseEventKind};

/// A mouse event at a 0-indexed cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MouseMsg {
    /// Column.
    pub x: u16,
    /// Row.
    pub y: u16,
    /// What happened.
    pub action: MouseAction,
    /// Which button.
    pub button: MouseButton,
}

impl MouseMsg {
    /// A left-button press.
    pub const fn click(x: u16, y: u16) -> Self {
        Self {
            x,
            y,
            action: MouseAction::Press,
            button: MouseButton::Left,
        }
    }

    /// Whether this is a left-button press.
    pub fn is_click(&self) -> bool {
        self.action == MouseAction::Press && self.button == MouseButton::Left
    }
}

/// Mouse action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseAction {
    /// Button went down (wheel events are presses too).
    Press,
    /// Button went up.
    Release,
    /// Pointer moved.
    Motion,
}

/// Mouse button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseButton {
    /// No button (motion).
    None,
    /// Left.
    Left,
    /// Middle.
    Middle,
    /// Right.
    Right,
    /// Wheel scrolled up.
    WheelUp,
    /// Wheel scrolled down.
    WheelDown,
}

const fn button(b: CtButton) -> MouseButton {
    match b {
        CtButton::Left => MouseButton::Left,
        CtButton::Right => MouseButton::Right,
        CtButton::Middle => MouseButton::Middle,
    }
}

/// Translate a crossterm mouse event.
pub const fn from_crossterm_mouse(event: MouseEvent) -> MouseMsg {
    let (action, button) = match event.kind {
        MouseEventKind::Down(b) => (MouseAction::Press, button(b)),
        MouseEventKind::Up(b) => (MouseAction::Release, button(b)),
        MouseEventKind::Drag(b) => (MouseAction::Motion, button(b)),
        MouseEventKind::ScrollUp => (MouseAction::Press, MouseButton::WheelUp),
        MouseEventKind::ScrollDown => (MouseAction::Press, MouseButton::WheelDown),
        MouseEventKind::Moved | MouseEventKind::ScrollLeft | MouseEventKind::ScrollRight => {
            (MouseAction::Motion, MouseButton::None)
        }
    };
    MouseMsg {
        x: event.column,
        y: event.row,
        action,
        button,
    }
}
