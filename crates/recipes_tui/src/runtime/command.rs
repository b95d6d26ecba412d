//! Side effects as values.
//!
//! `update` never performs IO itself. It returns a [`Cmd`], the program runs
//! it on a background thread, and whatever message it produces is fed back
//! into `update`.

use std::time::{Duration, Instant};

use super::message::{Message, QuitMsg};

/// A deferred computation producing at most one message.
pub struct Cmd(Box<dyn FnOnce() -> Option<Message> + Send + 'static>);

impl Cmd {
    /// Command that always produces a message.
    pub fn new<F>(f: F) -> Self
    where
        F: FnOnce() -> Message + Send + 'static,
    {
        Self(Box::new(move || Some(f())))
    }

    /// Run it on the current thread.
    pub fn execute(self) -> Option<Message> {
        (self.0)()
    }
}

impl std::fmt::Debug for Cmd {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Cmd").finish_non_exhaustive()
    }
}

/// Command that stops the program.
pub fn quit() -> Cmd {
    Cmd::new(|| Message::new(QuitMsg))
}

/// Produce a message once `duration` has elapsed.
pub fn tick<F>(duration: Duration, f: F) -> Cmd
where
    F: FnOnce(Instant) -> Message + Send + 'static,
{
    Cmd::new(move || {
        if !duration.is_zero() {
            std::thread::sleep(duration);
        }
        f(Instant::now())
    })
}
