//! Single-slot debounce timer
//!
//! The owner drives time explicitly: `schedule` arms the slot, `poll` fires
//! it once the quiet window has elapsed. A new `schedule` before that point
//! replaces the pending value and restarts the window.

use std::time::{Duration, Instant};

/// Pending value plus the instant it becomes due
struct Slot<T> {
    value: T,
    due: Instant,
}

/// Debouncer holding at most one pending value
pub struct Debouncer<T> {
    quiet_window: Duration,
    slot: Option<Slot<T>>,
}

impl<T> Debouncer<T> {
    pub fn new(quiet_window: Duration) -> Self {
        Self {
            quiet_window,
            slot: None,
        }
    }

    /// Arm the slot, discarding any value that has not fired yet.
    /// Returns the discarded value.
    pub fn schedule(&mut self, value: T, now: Instant) -> Option<T> {
        let previous = self.slot.take().map(|slot| slot.value);
        self.slot = Some(Slot {
            value,
            due: now + self.quiet_window,
        });
        previous
    }

    /// Take the pending value if its quiet window has elapsed
    pub fn poll(&mut self, now: Instant) -> Option<T> {
        match &self.slot {
            Some(slot) if now >= slot.due => self.slot.take().map(|slot| slot.value),
            _ => None,
        }
    }

    /// Drop the pending value without firing it
    pub fn cancel(&mut self) -> Option<T> {
        self.slot.take().map(|slot| slot.value)
    }

    pub fn is_pending(&self) -> bool {
        self.slot.is_some()
    }

    /// When the pending value fires, if any
    pub fn deadline(&self) -> Option<Instant> {
        self.slot.as_ref().map(|slot| slot.due)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WINDOW: Duration = Duration::from_millis(300);

    #[test]
    fn fires_only_after_quiet_window() {
        let t0 = Instant::now();
        let mut debouncer = Debouncer::new(WINDOW);
        debouncer.schedule("rust", t0);

        assert_eq!(debouncer.poll(t0 + Duration::from_millis(299)), None);
        assert_eq!(debouncer.poll(t0 + WINDOW), Some("rust"));
        assert!(!debouncer.is_pending());
        assert_eq!(debouncer.poll(t0 + WINDOW * 2), None);
    }

    #[test]
    fn reschedule_replaces_and_restarts_window() {
        let t0 = Instant::now();
        let mut debouncer = Debouncer::new(WINDOW);
        debouncer.schedule("r", t0);
        let t1 = t0 + Duration::from_millis(200);
        assert_eq!(debouncer.schedule("re", t1), Some("r"));

        // The original deadline has passed but the restarted one has not
        assert_eq!(debouncer.poll(t0 + WINDOW), None);
        assert_eq!(debouncer.poll(t1 + WINDOW), Some("re"));
    }

    #[test]
    fn cancel_discards_pending() {
        let t0 = Instant::now();
        let mut debouncer = Debouncer::new(WINDOW);
        debouncer.schedule(1, t0);
        assert_eq!(debouncer.deadline(), Some(t0 + WINDOW));
        assert_eq!(debouncer.cancel(), Some(1));
        assert_eq!(debouncer.poll(t0 + WINDOW), None);
        assert_eq!(debouncer.deadline(), None);
    }
}
