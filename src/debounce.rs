// Debounced search input
//
// The pending callback is plain data (value + deadline) that the event loop
// polls with its own clock, so a new keystroke cancels by overwriting it.

use std::time::{Duration, Instant};
use tracing::debug;

/// Default quiet period before a search query propagates
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(500);

#[derive(Debug, Clone)]
struct Scheduled<T> {
    value: T,
    due: Instant,
}

/// Cancellable scheduled delivery of the latest value
#[derive(Debug, Clone)]
pub struct Debouncer<T> {
    delay: Duration,
    pending: Option<Scheduled<T>>,
}

impl<T> Debouncer<T> {
    pub fn new(delay: Duration) -> Self {
        Self { delay, pending: None }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Cancel any outstanding value and schedule `value` for `now + delay`
    pub fn schedule(&mut self, value: T, now: Instant) {
        if self.pending.is_some() {
            debug!("debounce: superseding pending value");
        }
        self.pending = Some(Scheduled {
            value,
            due: now + self.delay,
        });
    }

    /// Drop the outstanding value without delivering it
    pub fn cancel(&mut self) -> Option<T> {
        self.pending.take().map(|s| s.value)
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// When the pending value becomes deliverable
    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|s| s.due)
    }

    /// Take the pending value once its quiet period has elapsed
    pub fn poll(&mut self, now: Instant) -> Option<T> {
        match &self.pending {
            Some(scheduled) if now >= scheduled.due => self.pending.take().map(|s| s.value),
            _ => None,
        }
    }
}

/// Search box that reports its text only after typing settles
#[derive(Debug, Clone)]
pub struct SearchInput {
    raw: String,
    debouncer: Debouncer<String>,
}

impl Default for SearchInput {
    fn default() -> Self {
        Self::new(DEFAULT_DEBOUNCE)
    }
}

impl SearchInput {
    pub fn new(delay: Duration) -> Self {
        Self {
            raw: String::new(),
            debouncer: Debouncer::new(delay),
        }
    }

    pub fn delay(&self) -> Duration {
        self.debouncer.delay()
    }

    /// Text as typed so far, settled or not
    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn is_settling(&self) -> bool {
        self.debouncer.is_pending()
    }

    /// Record a new value and restart the quiet period
    pub fn keystroke(&mut self, value: impl Into<String>, now: Instant) {
        self.raw = value.into();
        self.debouncer.schedule(self.raw.clone(), now);
    }

    /// Invoke `on_search` with the latest value if the quiet period is over
    ///
    /// Returns whether the callback fired.
    pub fn settle<F>(&mut self, now: Instant, on_search: F) -> bool
    where
        F: FnOnce(&str),
    {
        match self.debouncer.poll(now) {
            Some(query) => {
                debug!(query = %query, "search settled");
                on_search(&query);
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MS: Duration = Duration::from_millis(1);

    #[test]
    fn test_poll_before_deadline_yields_nothing() {
        let start = Instant::now();
        let mut debouncer = Debouncer::new(500 * MS);

        debouncer.schedule("a", start);
        assert_eq!(debouncer.poll(start + 499 * MS), None);
        assert!(debouncer.is_pending());
        assert_eq!(debouncer.poll(start + 500 * MS), Some("a"));
    }

    #[test]
    fn test_fires_at_most_once() {
        let start = Instant::now();
        let mut debouncer = Debouncer::new(500 * MS);

        debouncer.schedule(1, start);
        assert_eq!(debouncer.poll(start + 600 * MS), Some(1));
        assert_eq!(debouncer.poll(start + 1200 * MS), None);
    }

    #[test]
    fn test_reschedule_restarts_timer_and_drops_stale_value() {
        let start = Instant::now();
        let mut debouncer = Debouncer::new(500 * MS);

        debouncer.schedule("d", start);
        debouncer.schedule("do", start + 300 * MS);
        assert_eq!(debouncer.poll(start + 600 * MS), None);
        assert_eq!(debouncer.deadline(), Some(start + 800 * MS));
        assert_eq!(debouncer.poll(start + 800 * MS), Some("do"));
    }

    #[test]
    fn test_cancel() {
        let start = Instant::now();
        let mut debouncer = Debouncer::new(500 * MS);

        debouncer.schedule("x", start);
        assert_eq!(debouncer.cancel(), Some("x"));
        assert_eq!(debouncer.poll(start + 1000 * MS), None);
    }

    #[test]
    fn test_search_input_reports_only_final_value() {
        let start = Instant::now();
        let mut input = SearchInput::default();
        let mut seen = Vec::new();

        input.keystroke("d", start);
        input.keystroke("do", start + 100 * MS);
        input.keystroke("doc", start + 200 * MS);
        assert_eq!(input.raw(), "doc");

        assert!(!input.settle(start + 650 * MS, |q| seen.push(q.to_string())));
        assert!(input.settle(start + 700 * MS, |q| seen.push(q.to_string())));
        assert!(!input.settle(start + 2000 * MS, |q| seen.push(q.to_string())));
        assert_eq!(seen, vec!["doc"]);
    }
}
