//! Type-erased messages.
//!
//! Every input to a model arrives as a [`Message`]: key presses, mouse
//! events, resizes and whatever the application's own commands produce.

use std::any::Any;
use std::fmt;

/// A boxed value of any sendable type.
///
/// ```rust
/// use recipes_tui::runtime::Message;
///
/// struct Loaded(usize);
///
/// let msg = Message::new(Loaded(20));
/// assert!(msg.is::<Loaded>());
/// assert_eq!(msg.downcast::<Loaded>().map(|l| l.0), Some(20));
/// ```
pub struct Message(Box<dyn Any + Send>);

impl Message {
    /// Wrap a value.
    pub fn new<M: Any + Send>(msg: M) -> Self {
        Self(Box::new(msg))
    }

    /// Take the value out if it has type `M`.
    pub fn downcast<M: Any + Send>(self) -> Option<M> {
        self.0.downcast::<M>().ok().map(|b| *b)
    }

    /// Take the value out if it has type `M`, otherwise hand the message back.
    ///
    /// # Errors
    ///
    /// Returns the original message when the type does not match.
    pub fn try_downcast<M: Any + Send>(self) -> Result<M, Self> {
        self.0.downcast::<M>().map(|b| *b).map_err(Self)
    }

    /// Borrow the value if it has type `M`.
    pub fn downcast_ref<M: Any + Send>(&self) -> Option<&M> {
        self.0.downcast_ref::<M>()
    }

    /// Whether the value has type `M`.
    pub fn is<M: Any + Send>(&self) -> bool {
        self.0.is::<M>()
    }
}

impl fmt::Debug for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Message").finish_non_exhaustive()
    }
}

/// Stop the program.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuitMsg;

/// Ctrl+C.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InterruptMsg;

/// The terminal was resized (also sent once at startup).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowSizeMsg {
    /// Columns.
    pub width: u16,
    /// Rows.
    pub height: u16,
}
