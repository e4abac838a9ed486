//! Single-shot cancellable timers on a host-supplied clock.
//!
//! The coordinator never reads a wall clock. Every event carries the host's
//! monotonic time in milliseconds, and due timers fire from `tick`.

/// A single-shot timer carrying a payload.
///
/// Arming an armed timer replaces the pending shot, so at most one is ever
/// outstanding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SingleShotTimer<T> {
    name: &'static str,
    pending: Option<(u64, T)>,
}

impl<T> SingleShotTimer<T> {
    /// Creates an idle timer. `name` is used in logs.
    #[must_use]
    pub const fn new(name: &'static str) -> Self {
        Self {
            name,
            pending: None,
        }
    }

    /// Schedules `payload` to fire at `now_ms + delay_ms`.
    pub fn arm(&mut self, now_ms: u64, delay_ms: u64, payload: T) {
        let due = now_ms.saturating_add(delay_ms);
        tracing::trace!(timer = self.name, due, "armed");
        self.pending = Some((due, payload));
    }

    /// Cancels the pending shot. Returns true if one was pending.
    pub fn cancel(&mut self) -> bool {
        let was_armed = self.pending.take().is_some();
        if was_armed {
            tracing::trace!(timer = self.name, "cancelled");
        }
        was_armed
    }

    /// Returns true if a shot is pending.
    #[must_use]
    pub const fn is_armed(&self) -> bool {
        self.pending.is_some()
    }

    /// Due time of the pending shot.
    #[must_use]
    pub fn due_ms(&self) -> Option<u64> {
        self.pending.as_ref().map(|(due, _)| *due)
    }

    /// Fires the pending shot if it is due at `now_ms`.
    pub fn fire_if_due(&mut self, now_ms: u64) -> Option<T> {
        match &self.pending {
            Some((due, _)) if *due <= now_ms => {
                tracing::trace!(timer = self.name, now_ms, "fired");
                self.pending.take().map(|(_, payload)| payload)
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fires_once_when_due() {
        let mut timer = SingleShotTimer::new("test");
        timer.arm(100, 50, 7u8);
        assert_eq!(timer.due_ms(), Some(150));
        assert_eq!(timer.fire_if_due(149), None);
        assert_eq!(timer.fire_if_due(150), Some(7));
        assert_eq!(timer.fire_if_due(500), None);
        assert!(!timer.is_armed());
    }

    #[test]
    fn test_rearm_replaces_pending() {
        let mut timer = SingleShotTimer::new("test");
        timer.arm(0, 10, "first");
        timer.arm(5, 10, "second");
        assert_eq!(timer.fire_if_due(10), None);
        assert_eq!(timer.fire_if_due(15), Some("second"));
    }

    #[test]
    fn test_cancel() {
        let mut timer = SingleShotTimer::new("test");
        assert!(!timer.cancel());
        timer.arm(0, 0, ());
        assert!(timer.cancel());
        assert_eq!(timer.fire_if_due(u64::MAX), None);
    }

    #[test]
    fn test_arm_saturates() {
        let mut timer = SingleShotTimer::new("test");
        timer.arm(u64::MAX - 1, 10, ());
        assert_eq!(timer.due_ms(), Some(u64::MAX));
    }
}
