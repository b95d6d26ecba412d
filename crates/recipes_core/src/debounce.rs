//! A cancellable deferred task.
//!
//! Every [`Debouncer::schedule`] supersedes the pending value and returns a
//! ticket. Only the most recent ticket can fire, so a burst of keystrokes
//! coalesces into a single recompute. The debouncer never sleeps or reads
//! the clock: the caller waits [`DebounceTicket::delay`] elsewhere (e.g. in a
//! background command) and hands the ticket back to [`Debouncer::fire`].

use std::time::Duration;

/// Default delay for search input.
pub const DEFAULT_DELAY: Duration = Duration::from_millis(300);

/// Proof of one scheduling. Stale tickets fire nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DebounceTicket {
    generation: u64,
    delay: Duration,
}

impl DebounceTicket {
    /// How long to wait before firing.
    #[must_use]
    pub const fn delay(&self) -> Duration {
        self.delay
    }
}

#[derive(Debug, Clone)]
struct Pending<T> {
    generation: u64,
    value: T,
}

/// Coalesces rapid updates into the last one.
#[derive(Debug, Clone)]
pub struct Debouncer<T> {
    delay: Duration,
    generation: u64,
    pending: Option<Pending<T>>,
}

impl<T> Default for Debouncer<T> {
    fn default() -> Self {
        Self::new(DEFAULT_DELAY)
    }
}

impl<T> Debouncer<T> {
    /// Create a debouncer with the given quiet period.
    #[must_use]
    pub const fn new(delay: Duration) -> Self {
        Self {
            delay,
            generation: 0,
            pending: None,
        }
    }

    /// The quiet period.
    #[must_use]
    pub const fn delay(&self) -> Duration {
        self.delay
    }

    /// Replace any pending value with `value`.
    pub fn schedule(&mut self, value: T) -> DebounceTicket {
        self.generation += 1;
        self.pending = Some(Pending {
            generation: self.generation,
            value,
        });
        DebounceTicket {
            generation: self.generation,
            delay: self.delay,
        }
    }

    /// Drop the pending value, if any. Outstanding tickets become stale.
    pub fn cancel(&mut self) -> Option<T> {
        self.pending.take().map(|p| p.value)
    }

    /// Whether a value is waiting.
    #[must_use]
    pub const fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Take the pending value if `ticket` is the latest one.
    pub fn fire(&mut self, ticket: DebounceTicket) -> Option<T> {
        let current = self
            .pending
            .as_ref()
            .is_some_and(|p| p.generation == ticket.generation);
        if current { self.cancel() } else { None }
    }
}
