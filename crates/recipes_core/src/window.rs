//! Incremental reveal ("show more") over the filtered collection.

/// Items revealed before the first "show more".
pub const DEFAULT_INITIAL: usize = 12;

/// Items added by each "show more".
pub const DEFAULT_STEP: usize = 12;

/// How many items of the filtered collection are currently revealed.
///
/// The count may exceed the collection length; slicing truncates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewWindow {
    visible: usize,
    initial: usize,
    step: usize,
}

impl Default for ViewWindow {
    fn default() -> Self {
        Self::new(DEFAULT_INITIAL, DEFAULT_STEP)
    }
}

impl ViewWindow {
    /// Create a window. Zero sizes are bumped to one.
    #[must_use]
    pub fn new(initial: usize, step: usize) -> Self {
        let initial = initial.max(1);
        Self {
            visible: initial,
            initial,
            step: step.max(1),
        }
    }

    /// Current reveal count.
    #[must_use]
    pub const fn visible(&self) -> usize {
        self.visible
    }

    /// Initial reveal count.
    #[must_use]
    pub const fn initial(&self) -> usize {
        self.initial
    }

    /// Increment applied by [`Self::grow`].
    #[must_use]
    pub const fn step(&self) -> usize {
        self.step
    }

    /// Back to the initial count.
    pub const fn reset(&mut self) {
        self.visible = self.initial;
    }

    /// Reveal one more step.
    pub const fn grow(&mut self) {
        self.visible = self.visible.saturating_add(self.step);
    }

    /// Number of items shown out of `len`.
    #[must_use]
    pub fn shown(&self, len: usize) -> usize {
        self.visible.min(len)
    }

    /// Whether items beyond the window remain.
    #[must_use]
    pub const fn has_more(&self, len: usize) -> bool {
        len > self.visible
    }

    /// The revealed prefix of `items`.
    #[must_use]
    pub fn slice<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        &items[..self.shown(items.len())]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_constants() {
        let w = ViewWindow::default();
        assert_eq!(w.visible(), 12);
        assert_eq!(w.initial(), 12);
        assert_eq!(w.step(), 12);
    }

    #[test]
    fn grow_and_reset() {
        let mut w = ViewWindow::new(9, 9);
        w.grow();
        w.grow();
        assert_eq!(w.visible(), 27);
        w.reset();
        assert_eq!(w.visible(), 9);
    }

    #[test]
    fn slice_truncates_past_end() {
        let items: Vec<u32> = (0..5).collect();
        let w = ViewWindow::new(12, 12);
        assert_eq!(w.slice(&items), &[0, 1, 2, 3, 4]);
        assert_eq!(w.shown(items.len()), 5);
    }

    #[test]
    fn has_more_exactly_when_longer_than_window() {
        let w = ViewWindow::new(12, 12);
        assert!(!w.has_more(0));
        assert!(!w.has_more(12));
        assert!(w.has_more(13));
    }

    #[test]
    fn zero_sizes_are_bumped() {
        let w = ViewWindow::new(0, 0);
        assert_eq!(w.visible(), 1);
        assert_eq!(w.step(), 1);
    }
}
