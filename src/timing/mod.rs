// Timing module - Frame pacing against the host's event queue
//
// This module provides:
// - The host event model (timer tick, controller attach/detach, quit)
// - The EventSource trait a host implements to feed those events
// - A polled recurring timer for hosts without a native periodic timer
// - The event queue deciding hot-plug, quit and tick priority for such hosts
// - The frame pacer state machine the emulation core blocks on once per frame

pub mod pacer;
pub mod queue;
pub mod timer;

use crate::error::HalError;
use crate::input::DeviceId;
use std::time::Duration;

pub use pacer::{FramePacer, PacerState, Wake};
pub use queue::EventQueue;
pub use timer::RecurringTimer;

/// Default NTSC frame rate
pub const DEFAULT_FPS: u32 = 60;

/// An asynchronous notification delivered by the host
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostEvent {
    /// The periodic frame timer fired
    Tick,
    /// A controller was connected
    ControllerAttached(DeviceId),
    /// A controller was disconnected
    ControllerDetached(DeviceId),
    /// The user or OS asked the process to terminate
    Quit,
}

/// Host event queue with a periodic timer
pub trait EventSource {
    /// Start delivering `HostEvent::Tick` once per `interval`
    fn arm_periodic(&mut self, interval: Duration);

    /// Block until the next event is available and return it
    ///
    /// Pending controller notifications must be returned before a pending
    /// tick. An error means the host itself failed and is fatal.
    fn wait_event(&mut self) -> Result<HostEvent, HalError>;
}

/// Length of one frame at `fps` frames per second
///
/// # Panics
/// Panics if `fps` is zero
pub fn frame_interval(fps: u32) -> Duration {
    assert!(fps > 0, "frame rate must be positive");
    Duration::from_micros(1_000_000 / fps as u64)
}
