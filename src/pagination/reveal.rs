//! Incremental reveal of a filtered list.
//!
//! The view renders only a prefix of the filtered verbs. When the cursor
//! gets close to the end of that prefix the view signals proximity and the
//! window grows by a fixed step. Any change to the filter inputs shrinks the
//! window back to its initial size.

use crate::services::FilterState;

/// Growing prefix length over a filtered sequence.
#[derive(Debug, Clone)]
pub struct RevealWindow {
    initial: usize,
    step: usize,
    revealed: usize,
    growth_pending: bool,
    filter_key: Option<FilterState>,
}

impl RevealWindow {
    /// Creates a window showing `initial` rows that grows by `step`.
    ///
    /// Both sizes are raised to at least 1.
    #[must_use]
    pub fn new(initial: usize, step: usize) -> Self {
        let initial = initial.max(1);
        Self {
            initial,
            step: step.max(1),
            revealed: initial,
            growth_pending: false,
            filter_key: None,
        }
    }

    /// Current prefix length before clamping to the filtered size.
    #[must_use]
    pub const fn revealed(&self) -> usize {
        self.revealed
    }

    /// Number of rows to render for a filtered list of `filtered_len`.
    #[must_use]
    pub fn visible_len(&self, filtered_len: usize) -> usize {
        self.revealed.min(filtered_len)
    }

    /// Whether rows beyond the window remain.
    #[must_use]
    pub const fn has_more(&self, filtered_len: usize) -> bool {
        self.revealed < filtered_len
    }

    /// Whether a growth is waiting for the view to settle.
    #[must_use]
    pub const fn is_growing(&self) -> bool {
        self.growth_pending
    }

    /// Handles a proximity signal from the view.
    ///
    /// Grows the window by one step and returns true, unless a previous
    /// growth has not settled yet or everything is already visible.
    pub fn on_proximity(&mut self, filtered_len: usize) -> bool {
        if self.growth_pending || !self.has_more(filtered_len) {
            return false;
        }
        self.revealed = self.revealed.saturating_add(self.step);
        self.growth_pending = true;
        true
    }

    /// Marks the last growth as rendered so the next signal is honored.
    pub fn settle(&mut self) {
        self.growth_pending = false;
    }

    /// Shrinks back to the initial size.
    pub fn reset(&mut self) {
        self.revealed = self.initial;
        self.growth_pending = false;
    }

    /// Resets the window if `filter` selects differently from the last one
    /// seen. Queries are compared after normalization, so whitespace or
    /// case edits that match the same verbs keep the window.
    ///
    /// Returns true when a reset happened.
    pub fn sync(&mut self, filter: &FilterState) -> bool {
        let key = FilterState {
            query: filter.normalized_query(),
            ..filter.clone()
        };
        if self.filter_key.as_ref() == Some(&key) {
            return false;
        }
        self.filter_key = Some(key);
        self.reset();
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::VerbType;

    #[test]
    fn test_grows_in_steps_until_exhausted() {
        let mut window = RevealWindow::new(60, 60);
        assert_eq!(window.visible_len(130), 60);

        assert!(window.on_proximity(130));
        window.settle();
        assert_eq!(window.visible_len(130), 120);

        assert!(window.on_proximity(130));
        window.settle();
        assert_eq!(window.visible_len(130), 130);

        assert!(!window.has_more(130));
        assert!(!window.on_proximity(130));
        assert_eq!(window.visible_len(130), 130);
    }

    #[test]
    fn test_duplicate_signal_ignored_until_settled() {
        let mut window = RevealWindow::new(10, 10);
        assert!(window.on_proximity(100));
        assert!(window.is_growing());
        assert!(!window.on_proximity(100));
        assert_eq!(window.revealed(), 20);

        window.settle();
        assert!(window.on_proximity(100));
        assert_eq!(window.revealed(), 30);
    }

    #[test]
    fn test_short_list_never_grows() {
        let mut window = RevealWindow::new(60, 60);
        assert_eq!(window.visible_len(12), 12);
        assert!(!window.on_proximity(12));
    }

    #[test]
    fn test_sync_resets_on_filter_change() {
        let mut window = RevealWindow::new(5, 5);
        let mut filter = FilterState::new();
        assert!(window.sync(&filter));

        window.on_proximity(50);
        window.settle();
        assert_eq!(window.revealed(), 10);

        // Same filter: untouched
        assert!(!window.sync(&filter));
        assert_eq!(window.revealed(), 10);

        filter.toggle_type(VerbType::Regular);
        assert!(window.sync(&filter));
        assert_eq!(window.revealed(), 5);
    }

    #[test]
    fn test_sync_ignores_query_whitespace_and_case() {
        let mut window = RevealWindow::new(5, 5);
        let mut filter = FilterState::new().with_query("go");
        window.sync(&filter);
        window.on_proximity(50);
        window.settle();
        assert_eq!(window.revealed(), 10);

        filter.set_query("go ");
        assert!(!window.sync(&filter));
        filter.set_query(" GO");
        assert!(!window.sync(&filter));
        assert_eq!(window.revealed(), 10);

        filter.set_query("gon");
        assert!(window.sync(&filter));
        assert_eq!(window.revealed(), 5);
    }

    #[test]
    fn test_zero_sizes_are_raised() {
        let mut window = RevealWindow::new(0, 0);
        assert_eq!(window.visible_len(10), 1);
        assert!(window.on_proximity(10));
        assert_eq!(window.revealed(), 2);
    }
}
