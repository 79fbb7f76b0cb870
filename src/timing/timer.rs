// Recurring timer - Fixed-interval deadline tracking for the frame tick
//
// The timer is polled rather than callback driven: the host asks how long
// it may sleep, sleeps, then asks whether the deadline has passed. A tick
// noticed more than a whole interval late re-arms from the moment it was
// noticed, so a slow frame never produces a burst of catch-up ticks.

use std::time::{Duration, Instant};

/// Polled periodic timer
#[derive(Debug, Clone, Default)]
pub struct RecurringTimer {
    interval: Duration,
    next_deadline: Option<Instant>,
}

impl RecurringTimer {
    /// Create a disarmed timer
    pub fn new() -> Self {
        Self::default()
    }

    /// Arm the timer so its first tick is due one interval after `now`
    pub fn arm(&mut self, interval: Duration, now: Instant) {
        self.interval = interval;
        self.next_deadline = Some(now + interval);
    }

    /// Stop the timer
    pub fn disarm(&mut self) {
        self.next_deadline = None;
    }

    /// Whether the timer is running
    pub fn is_armed(&self) -> bool {
        self.next_deadline.is_some()
    }

    /// Tick interval
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Instant the next tick is due, if armed
    pub fn deadline(&self) -> Option<Instant> {
        self.next_deadline
    }

    /// Time left until the next tick, zero if already due
    pub fn time_until(&self, now: Instant) -> Option<Duration> {
        self.next_deadline
            .map(|deadline| deadline.saturating_duration_since(now))
    }

    /// Consume the tick if it is due at `now`
    ///
    /// # Returns
    /// `true` if a tick fired. The next deadline stays on the original
    /// cadence unless a whole interval was missed, in which case it restarts
    /// one interval after `now`.
    pub fn fire_if_due(&mut self, now: Instant) -> bool {
        match self.next_deadline {
            Some(deadline) if now >= deadline => {
                let next = deadline + self.interval;
                self.next_deadline = Some(if next > now {
                    next
                } else {
                    now + self.interval
                });
                true
            }
            _ => false,
        }
    }
}
