// Event queue - Priority of host notifications against the frame timer
//
// Order of delivery: queued controller notifications, then a quit request,
// then at most one due tick. The queue never blocks; the host sleeps for
// `poll_timeout` between calls to `next`.

use super::timer::RecurringTimer;
use super::HostEvent;
use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// Pending host notifications plus the periodic frame timer
#[derive(Debug, Default)]
pub struct EventQueue {
    pending: VecDeque<HostEvent>,
    quit_requested: bool,
    timer: RecurringTimer,
}

impl EventQueue {
    /// Create an empty queue with a disarmed timer
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a controller notification
    ///
    /// `Tick` and `Quit` are not queued: ticks come from the timer and quit
    /// is a sticky flag.
    pub fn push(&mut self, event: HostEvent) {
        match event {
            HostEvent::Tick => {}
            HostEvent::Quit => self.quit_requested = true,
            lifecycle => self.pending.push_back(lifecycle),
        }
    }

    /// Mark the host as quitting
    pub fn request_quit(&mut self) {
        self.quit_requested = true;
    }

    /// Whether a quit was requested
    pub fn quit_requested(&self) -> bool {
        self.quit_requested
    }

    /// Start the periodic timer, first tick one interval after `now`
    pub fn arm(&mut self, interval: Duration, now: Instant) {
        self.timer.arm(interval, now);
    }

    /// Next event deliverable at `now`, if any
    pub fn next(&mut self, now: Instant) -> Option<HostEvent> {
        if let Some(event) = self.pending.pop_front() {
            return Some(event);
        }
        if self.quit_requested {
            return Some(HostEvent::Quit);
        }
        if self.timer.fire_if_due(now) {
            return Some(HostEvent::Tick);
        }
        None
    }

    /// How long the host may sleep before calling `next` again
    ///
    /// Never longer than `cap`; zero when something is already deliverable.
    pub fn poll_timeout(&self, now: Instant, cap: Duration) -> Duration {
        if !self.pending.is_empty() || self.quit_requested {
            return Duration::ZERO;
        }
        self.timer
            .time_until(now)
            .map_or(cap, |left| left.min(cap))
    }

    /// Number of queued controller notifications
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    /// Whether no controller notification is queued
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::DeviceId;

    const INTERVAL: Duration = Duration::from_millis(16);
    const CAP: Duration = Duration::from_millis(2);

    fn armed(start: Instant) -> EventQueue {
        let mut queue = EventQueue::new();
        queue.arm(INTERVAL, start);
        queue
    }

    #[test]
    fn test_nothing_before_deadline() {
        let start = Instant::now();
        let mut queue = armed(start);
        assert_eq!(queue.next(start + Duration::from_millis(5)), None);
        assert_eq!(
            queue.poll_timeout(start + Duration::from_millis(15), CAP),
            Duration::from_millis(1)
        );
        assert_eq!(queue.poll_timeout(start, CAP), CAP);
    }

    #[test]
    fn test_lifecycle_before_due_tick() {
        let start = Instant::now();
        let mut queue = armed(start);
        queue.push(HostEvent::ControllerAttached(DeviceId(0)));
        queue.push(HostEvent::ControllerDetached(DeviceId(0)));
        queue.push(HostEvent::ControllerAttached(DeviceId(1)));

        let due = start + INTERVAL;
        assert_eq!(queue.poll_timeout(due, CAP), Duration::ZERO);
        assert_eq!(
            queue.next(due),
            Some(HostEvent::ControllerAttached(DeviceId(0)))
        );
        assert_eq!(
            queue.next(due),
            Some(HostEvent::ControllerDetached(DeviceId(0)))
        );
        assert_eq!(
            queue.next(due),
            Some(HostEvent::ControllerAttached(DeviceId(1)))
        );
        assert_eq!(queue.next(due), Some(HostEvent::Tick));
        assert_eq!(queue.next(due), None);
    }

    #[test]
    fn test_quit_before_due_tick() {
        let start = Instant::now();
        let mut queue = armed(start);
        queue.request_quit();

        let due = start + INTERVAL;
        assert_eq!(queue.next(due), Some(HostEvent::Quit));
        // Quit stays pending
        assert_eq!(queue.next(due), Some(HostEvent::Quit));
        assert!(queue.quit_requested());
    }

    #[test]
    fn test_lifecycle_before_quit() {
        let start = Instant::now();
        let mut queue = armed(start);
        queue.push(HostEvent::Quit);
        queue.push(HostEvent::ControllerDetached(DeviceId(2)));

        assert_eq!(
            queue.next(start),
            Some(HostEvent::ControllerDetached(DeviceId(2)))
        );
        assert_eq!(queue.next(start), Some(HostEvent::Quit));
    }

    #[test]
    fn test_late_wait_sees_one_tick() {
        let start = Instant::now();
        let mut queue = armed(start);

        // Five intervals late: exactly one tick, then nothing until the next interval
        let late = start + INTERVAL * 5;
        assert_eq!(queue.next(late), Some(HostEvent::Tick));
        assert_eq!(queue.next(late), None);
        assert_eq!(queue.next(late + INTERVAL - Duration::from_millis(1)), None);
        assert_eq!(queue.next(late + INTERVAL), Some(HostEvent::Tick));
    }

    #[test]
    fn test_tick_is_not_queued() {
        let start = Instant::now();
        let mut queue = EventQueue::new();
        queue.push(HostEvent::Tick);
        assert!(queue.is_empty());
        assert_eq!(queue.next(start + INTERVAL), None);
    }
}
