//! A small Elm-architecture runtime.
//!
//! A [`Model`] owns all state. Input arrives as [`Message`]s, `update`
//! mutates the model and may return a [`Cmd`] for side effects, and `view`
//! renders the whole screen as a string. [`Program`] runs a model against the
//! terminal; [`ProgramSimulator`] runs it in memory for tests.

mod command;
mod key;
mod message;
mod mouse;
mod program;
mod simulator;

pub use command::{Cmd, quit, tick};
pub use key::{KeyMsg, KeyType, from_crossterm_key};
pub use message::{InterruptMsg, Message, QuitMsg, WindowSizeMsg};
pub use mouse::{MouseAction, MouseButton, MouseMsg, from_crossterm_mouse};
pub use program::{Error, Program, ProgramOptions, Result};
pub use simulator::{ProgramSimulator, SimulationStats};

/// Application state driven by the runtime.
pub trait Model: Send + 'static {
    /// Command to run at startup.
    fn init(&self) -> Option<Cmd>;

    /// Handle one message.
    fn update(&mut self, msg: Message) -> Option<Cmd>;

    /// Render the current state.
    fn view(&self) -> String;
}
