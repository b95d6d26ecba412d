//! Drive a [`Model`] without a terminal.
//!
//! Commands run synchronously on the calling thread, so a test sees exactly
//! the same message sequence the real program would, minus the timing.

use std::collections::VecDeque;

use super::Model;
use super::command::Cmd;
use super::message::{InterruptMsg, Message, QuitMsg};

/// Counters collected while simulating.
#[derive(Debug, Clone, Default)]
pub struct SimulationStats {
    /// Calls to `update`.
    pub update_calls: usize,
    /// Calls to `view`.
    pub view_calls: usize,
    /// Commands returned by `init`/`update`.
    pub commands_returned: usize,
    /// Whether a quit message was seen.
    pub quit_requested: bool,
}

/// In-memory program runner.
///
/// ```rust
/// use recipes_tui::runtime::{Cmd, Message, Model, ProgramSimulator};
///
/// struct Counter(i32);
///
/// impl Model for Counter {
///     fn init(&self) -> Option<Cmd> { None }
///     fn update(&mut self, msg: Message) -> Option<Cmd> {
///         if let Some(n) = msg.downcast::<i32>() {
///             self.0 += n;
///         }
///         None
///     }
///     fn view(&self) -> String { format!("count {}", self.0) }
/// }
///
/// let mut sim = ProgramSimulator::new(Counter(0));
/// sim.send(Message::new(5));
/// sim.send(Message::new(3));
/// sim.run_until_empty();
/// assert_eq!(sim.last_view(), Some("count 8"));
/// ```
pub struct ProgramSimulator<M: Model> {
    model: M,
    queue: VecDeque<Message>,
    views: Vec<String>,
    stats: SimulationStats,
    initialized: bool,
}

/// Upper bound on messages processed by one [`ProgramSimulator::run_until_empty`].
const MAX_STEPS: usize = 1_000;

impl<M: Model> ProgramSimulator<M> {
    /// Wrap a model.
    pub const fn new(model: M) -> Self {
        Self {
            model,
            queue: VecDeque::new(),
            views: Vec::new(),
            stats: SimulationStats {
                update_calls: 0,
                view_calls: 0,
                commands_returned: 0,
                quit_requested: false,
            },
            initialized: false,
        }
    }

    /// Call `init`, run its command, and render once. Idempotent.
    pub fn init(&mut self) {
        if self.initialized {
            return;
        }
        self.initialized = true;
        let cmd = self.model.init();
        self.run_command(cmd);
        self.render();
    }

    /// Queue a message.
    pub fn send(&mut self, msg: Message) {
        self.queue.push_back(msg);
    }

    /// Process one queued message. Returns false when the queue was empty
    /// or the program has quit.
    pub fn step(&mut self) -> bool {
        self.init();
        if self.stats.quit_requested {
            return false;
        }
        let Some(msg) = self.queue.pop_front() else {
            return false;
        };
        if msg.is::<QuitMsg>() || msg.is::<InterruptMsg>() {
            self.stats.quit_requested = true;
            return false;
        }
        self.stats.update_calls += 1;
        let cmd = self.model.update(msg);
        self.run_command(cmd);
        self.render();
        true
    }

    /// Process messages, including those produced by commands, until none
    /// are left. Returns how many were processed.
    pub fn run_until_empty(&mut self) -> usize {
        let mut processed = 0;
        while processed < MAX_STEPS && self.step() {
            processed += 1;
        }
        processed
    }

    fn run_command(&mut self, cmd: Option<Cmd>) {
        let Some(cmd) = cmd else {
            return;
        };
        self.stats.commands_returned += 1;
        if let Some(msg) = cmd.execute() {
            self.queue.push_back(msg);
        }
    }

    fn render(&mut self) {
        self.stats.view_calls += 1;
        self.views.push(self.model.view());
    }

    /// The model.
    pub const fn model(&self) -> &M {
        &self.model
    }

    /// The model, mutably.
    pub const fn model_mut(&mut self) -> &mut M {
        &mut self.model
    }

    /// Counters.
    pub const fn stats(&self) -> &SimulationStats {
        &self.stats
    }

    /// Every rendered frame, oldest first.
    pub fn views(&self) -> &[String] {
        &self.views
    }

    /// The latest frame.
    pub fn last_view(&self) -> Option<&str> {
        self.views.last().map(String::as_str)
    }

    /// Whether quit was requested.
    pub const fn is_quit(&self) -> bool {
        self.stats.quit_requested
    }

    /// Messages waiting.
    pub fn pending_count(&self) -> usize {
        self.queue.len()
    }
}
