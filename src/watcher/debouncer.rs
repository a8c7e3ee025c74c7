//! Settling of change events for the watched command file.
//!
//! Editors often fire several events per save (truncate, write, metadata).
//! The debouncer holds them until the file has been quiet for a while.

use std::time::{Duration, Instant};

/// Debounces change events for a single path.
#[derive(Debug)]
pub struct Debouncer {
    /// Time of the last unprocessed change.
    pending: Option<Instant>,
    /// How long the file must be quiet before processing.
    duration: Duration,
}

impl Debouncer {
    /// Create a new debouncer with the given duration in milliseconds.
    pub fn new(debounce_ms: u64) -> Self {
        Self {
            pending: None,
            duration: Duration::from_millis(debounce_ms),
        }
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Record a change event, resetting the quiet timer.
    pub fn record(&mut self) {
        self.pending = Some(Instant::now());
    }

    /// Returns true, and clears the pending change, once the quiet period
    /// has elapsed.
    pub fn take_ready(&mut self) -> bool {
        match self.pending {
            Some(last_change) if last_change.elapsed() >= self.duration => {
                self.pending = None;
                true
            }
            _ => false,
        }
    }

    /// Clear and report any pending change regardless of timing.
    pub fn flush(&mut self) -> bool {
        self.pending.take().is_some()
    }

    /// Check if there is a pending change.
    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread::sleep;

    #[test]
    fn test_debouncer_basic() {
        let mut debouncer = Debouncer::new(50);

        debouncer.record();

        // Immediately after, nothing should be ready
        assert!(!debouncer.take_ready());
        assert!(debouncer.has_pending());

        sleep(Duration::from_millis(60));

        assert!(debouncer.take_ready());
        assert!(!debouncer.has_pending());
        // Only reported once
        assert!(!debouncer.take_ready());
    }

    #[test]
    fn test_debouncer_resets_on_new_change() {
        let mut debouncer = Debouncer::new(50);

        debouncer.record();
        sleep(Duration::from_millis(30));

        // Record again - should reset the timer
        debouncer.record();
        sleep(Duration::from_millis(30));

        // 60ms after the first change but only 30ms after the second
        assert!(!debouncer.take_ready());

        sleep(Duration::from_millis(30));
        assert!(debouncer.take_ready());
    }

    #[test]
    fn test_zero_duration_is_ready_immediately() {
        let mut debouncer = Debouncer::new(0);
        debouncer.record();
        assert!(debouncer.take_ready());
    }

    #[test]
    fn test_flush() {
        let mut debouncer = Debouncer::new(10_000);
        assert!(!debouncer.flush());

        debouncer.record();
        assert!(debouncer.flush());
        assert!(!debouncer.has_pending());
    }
}
