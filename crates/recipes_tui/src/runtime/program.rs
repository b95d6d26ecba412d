//! The terminal event loop.

use std::io::{self, Write};
use std::panic;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;
use std::time::Duration;

use crossterm::cursor::{Hide, MoveTo, Show};
use crossterm::event::{
    self, DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
    Event, KeyEventKind,
};
use crossterm::style::Print;
use crossterm::terminal::{
    self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode,
    enable_raw_mode,
};
use crossterm::{execute, queue};
use tracing::{debug, trace};

use super::Model;
use super::command::Cmd;
use super::key::{KeyType, from_crossterm_key};
use super::message::{InterruptMsg, Message, QuitMsg, WindowSizeMsg};
use super::mouse::from_crossterm_mouse;

/// Error driving the terminal.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// Generic terminal I/O failure.
    #[error("terminal io error: {0}")]
    Io(#[from] io::Error),

    /// Raw mode could not be toggled; usually not a TTY.
    #[error("failed to {action} raw mode: {source}")]
    RawMode {
        /// "enable" or "disable".
        action: &'static str,
        /// Underlying error.
        #[source]
        source: io::Error,
    },

    /// Reading terminal events failed.
    #[error("failed to poll terminal events: {0}")]
    EventPoll(io::Error),

    /// Writing a frame failed.
    #[error("failed to render view: {0}")]
    Render(io::Error),
}

/// Result alias for the runtime.
pub type Result<T> = std::result::Result<T, Error>;

/// Terminal features to enable.
#[derive(Debug, Clone, Copy)]
pub struct ProgramOptions {
    /// Use the alternate screen buffer.
    pub alt_screen: bool,
    /// Capture mouse clicks and wheel.
    pub mouse: bool,
    /// Deliver pasted text as one paste event instead of keystrokes.
    pub bracketed_paste: bool,
    /// Frame budget.
    pub fps: u32,
}

impl Default for ProgramOptions {
    fn default() -> Self {
        Self {
            alt_screen: true,
            mouse: false,
            bracketed_paste: true,
            fps: 30,
        }
    }
}

/// Runs a [`Model`] against the real terminal.
pub struct Program<M: Model> {
    model: M,
    options: ProgramOptions,
}

impl<M: Model> Program<M> {
    /// Program with default options.
    pub fn new(model: M) -> Self {
        Self {
            model,
            options: ProgramOptions::default(),
        }
    }

    /// Replace the options.
    #[must_use]
    pub const fn with_options(mut self, options: ProgramOptions) -> Self {
        self.options = options;
        self
    }

    /// Run until the model quits or Ctrl+C; returns the final model.
    ///
    /// # Errors
    ///
    /// Returns an [`Error`] if the terminal cannot be set up or read.
    pub fn run(self) -> Result<M> {
        let options = self.options;
        let mut out = io::stdout();

        // Release builds abort on panic, so unwinding alone cannot restore.
        let previous_hook = panic::take_hook();
        panic::set_hook(Box::new(move |info| {
            restore_terminal(&mut io::stdout(), options);
            previous_hook(info);
        }));

        let result = TerminalGuard::enter(&mut out, options).and_then(|guard| {
            let result = self.event_loop(&mut out);
            drop(guard);
            result
        });

        drop(panic::take_hook());
        result
    }

    fn event_loop<W: Write>(mut self, out: &mut W) -> Result<M> {
        let (tx, rx): (Sender<Message>, Receiver<Message>) = mpsc::channel();

        if let Ok((width, height)) = terminal::size() {
            let _ = tx.send(Message::new(WindowSizeMsg { width, height }));
        }
        if let Some(cmd) = self.model.init() {
            spawn_command(cmd, tx.clone());
        }

        let mut last_view = String::new();
        render(&self.model, out, &mut last_view)?;

        let frame = Duration::from_secs_f64(1.0 / f64::from(self.options.fps.max(1)));

        loop {
            if event::poll(frame).map_err(Error::EventPoll)? {
                if let Some(msg) = translate(event::read().map_err(Error::EventPoll)?) {
                    let _ = tx.send(msg);
                }
            }

            let mut dirty = false;
            while let Ok(msg) = rx.try_recv() {
                if msg.is::<QuitMsg>() || msg.is::<InterruptMsg>() {
                    debug!("program exiting");
                    return Ok(self.model);
                }
                if let Some(cmd) = self.model.update(msg) {
                    spawn_command(cmd, tx.clone());
                }
                dirty = true;
            }

            if dirty {
                render(&self.model, out, &mut last_view)?;
            }
        }
    }
}

fn translate(event: Event) -> Option<Message> {
    match event {
        Event::Key(key) if key.kind == KeyEventKind::Press => {
            let key = from_crossterm_key(key.code, key.modifiers);
            if key.key_type == KeyType::CtrlC {
                Some(Message::new(InterruptMsg))
            } else {
                Some(Message::new(key))
            }
        }
        Event::Mouse(mouse) => Some(Message::new(from_crossterm_mouse(mouse))),
        Event::Resize(width, height) => Some(Message::new(WindowSizeMsg { width, height })),
        Event::Paste(text) => Some(Message::new(super::KeyMsg::paste(&text))),
        _ => None,
    }
}

/// Run `cmd` on its own thread.
fn spawn_command(cmd: Cmd, tx: Sender<Message>) {
    thread::spawn(move || {
        if let Some(msg) = cmd.execute() {
            let _ = tx.send(msg);
        }
    });
}

/// Raw mode plus the terminal modes in [`ProgramOptions`]; undone on drop.
struct TerminalGuard {
    options: ProgramOptions,
}

impl TerminalGuard {
    fn enter<W: Write>(out: &mut W, options: ProgramOptions) -> Result<Self> {
        enable_raw_mode().map_err(|source| Error::RawMode {
            action: "enable",
            source,
        })?;
        // From here on a failure still restores raw mode.
        let guard = Self { options };
        enter_modes(out, options)?;
        debug!(?options, "terminal ready");
        Ok(guard)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        restore_terminal(&mut io::stdout(), self.options);
    }
}

fn enter_modes<W: Write>(out: &mut W, options: ProgramOptions) -> io::Result<()> {
    if options.alt_screen {
        execute!(out, EnterAlternateScreen)?;
    }
    execute!(out, Hide)?;
    if options.mouse {
        execute!(out, EnableMouseCapture)?;
    }
    if options.bracketed_paste {
        execute!(out, EnableBracketedPaste)?;
    }
    Ok(())
}

/// Undo [`enter_modes`] in reverse. Best effort; safe to repeat.
fn leave_modes<W: Write>(out: &mut W, options: ProgramOptions) {
    if options.bracketed_paste {
        let _ = execute!(out, DisableBracketedPaste);
    }
    if options.mouse {
        let _ = execute!(out, DisableMouseCapture);
    }
    let _ = execute!(out, Show);
    if options.alt_screen {
        let _ = execute!(out, LeaveAlternateScreen);
    }
}

fn restore_terminal<W: Write>(out: &mut W, options: ProgramOptions) {
    leave_modes(out, options);
    let _ = disable_raw_mode();
}

fn render<M: Model, W: Write>(model: &M, out: &mut W, last_view: &mut String) -> Result<()> {
    let view = model.view();
    if view == *last_view {
        return Ok(());
    }
    trace!(bytes = view.len(), "render");
    write_frame(out, &view).map_err(Error::Render)?;
    *last_view = view;
    Ok(())
}

/// Overwrite the screen in place: each line clears its own tail and
/// whatever the previous frame left below the last line is erased.
fn write_frame<W: Write>(out: &mut W, view: &str) -> io::Result<()> {
    queue!(out, MoveTo(0, 0))?;
    for (i, line) in view.split('\n').enumerate() {
        if i > 0 {
            // Raw mode needs explicit carriage returns.
            out.write_all(b"\r\n")?;
        }
        queue!(out, Print(line), Clear(ClearType::UntilNewLine))?;
    }
    queue!(out, Clear(ClearType::FromCursorDown))?;
    out.flush()
}
