//! Trailing-edge debouncer driven by the tokio clock.

use std::time::Duration;

use tokio::time::Instant;

/// Holds the latest value of a burst until the input has been quiet for
/// `window`.
///
/// Each `push` replaces the pending value and restarts the window, so
/// earlier values of a burst are never delivered.
#[derive(Debug)]
pub struct Debouncer<T> {
    window: Duration,
    pending: Option<(T, Instant)>,
}

impl<T> Debouncer<T> {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            pending: None,
        }
    }

    /// Record a new value and restart the quiet window.
    pub fn push(&mut self, value: T) {
        self.pending = Some((value, Instant::now() + self.window));
    }

    /// When the pending value settles, if there is one.
    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|(_, deadline)| *deadline)
    }

    /// Take the pending value if its window has elapsed at `now`.
    pub fn take_ready(&mut self, now: Instant) -> Option<T> {
        match self.pending {
            Some((_, deadline)) if deadline <= now => self.pending.take().map(|(value, _)| value),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_value_settles_after_window() {
        let mut debouncer = Debouncer::new(Duration::from_millis(300));
        debouncer.push("a");

        tokio::time::advance(Duration::from_millis(299)).await;
        assert_eq!(debouncer.take_ready(Instant::now()), None);

        tokio::time::advance(Duration::from_millis(1)).await;
        assert_eq!(debouncer.take_ready(Instant::now()), Some("a"));
        assert_eq!(debouncer.deadline(), None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_burst_delivers_only_last_value() {
        let mut debouncer = Debouncer::new(Duration::from_millis(300));

        debouncer.push("a");
        tokio::time::advance(Duration::from_millis(100)).await;
        debouncer.push("ab");
        tokio::time::advance(Duration::from_millis(100)).await;
        debouncer.push("abc");

        // 300ms after "a", but only 100ms after "abc"
        tokio::time::advance(Duration::from_millis(100)).await;
        assert_eq!(debouncer.take_ready(Instant::now()), None);

        tokio::time::advance(Duration::from_millis(200)).await;
        assert_eq!(debouncer.take_ready(Instant::now()), Some("abc"));
        assert_eq!(debouncer.take_ready(Instant::now()), None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_deadline_tracks_latest_push() {
        let mut debouncer = Debouncer::new(Duration::from_millis(50));
        assert!(debouncer.deadline().is_none());

        let start = Instant::now();
        debouncer.push(1);
        assert_eq!(debouncer.deadline(), Some(start + Duration::from_millis(50)));

        tokio::time::advance(Duration::from_millis(20)).await;
        debouncer.push(2);
        assert_eq!(debouncer.deadline(), Some(start + Duration::from_millis(70)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_zero_window_is_ready_immediately() {
        let mut debouncer = Debouncer::new(Duration::ZERO);
        debouncer.push("x");
        assert_eq!(debouncer.take_ready(Instant::now()), Some("x"));
    }
}
