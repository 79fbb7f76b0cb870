// Frame Pacer - Blocks the emulation loop until the next frame tick
//
// State machine:
//
//   Idle --start--> Armed --wait--> Waiting --tick--> Armed
//                                      |
//                                      +--quit--> Terminated
//
// While waiting, controller hot-plug notifications are applied to the input
// sampler. Exactly one tick ends a wait; ticks are never merged or skipped.

use super::{frame_interval, EventSource, HostEvent};
use crate::error::{HalError, PacerError};
use crate::input::InputSampler;
use std::time::Duration;

/// Frame pacer state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PacerState {
    /// No timer armed yet
    Idle,
    /// Timer running, not inside a wait
    Armed,
    /// Blocked inside `wait_for_next_frame`
    Waiting,
    /// The host asked to quit
    Terminated,
}

/// Why a wait ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use]
pub enum Wake {
    /// A new frame interval began
    Frame,
    /// The host asked the process to terminate
    Quit,
}

/// Fixed-rate frame pacer
#[derive(Debug, Clone)]
pub struct FramePacer {
    state: PacerState,
    interval: Option<Duration>,
    frames: u64,
}

impl FramePacer {
    /// Create an idle pacer
    pub fn new() -> Self {
        Self {
            state: PacerState::Idle,
            interval: None,
            frames: 0,
        }
    }

    /// Arm the host's periodic timer at `fps` ticks per second
    ///
    /// Must be called exactly once, before the first wait.
    pub fn start<E: EventSource + ?Sized>(
        &mut self,
        fps: u32,
        events: &mut E,
    ) -> Result<(), PacerError> {
        if self.state != PacerState::Idle {
            return Err(PacerError::AlreadyStarted);
        }
        if fps == 0 {
            return Err(PacerError::InvalidFrameRate(fps));
        }

        let interval = frame_interval(fps);
        events.arm_periodic(interval);
        self.interval = Some(interval);
        self.state = PacerState::Armed;
        Ok(())
    }

    /// Block until the next tick
    ///
    /// Controller attach/detach notifications received while waiting are
    /// applied to `input`.
    pub fn wait_for_next_frame<E: EventSource + ?Sized>(
        &mut self,
        events: &mut E,
        input: &mut InputSampler,
    ) -> Result<Wake, HalError> {
        self.wait_for_next_frame_with(events, input, |_| {})
    }

    /// Like `wait_for_next_frame`, reporting every event handled to `observe`
    pub fn wait_for_next_frame_with<E, F>(
        &mut self,
        events: &mut E,
        input: &mut InputSampler,
        mut observe: F,
    ) -> Result<Wake, HalError>
    where
        E: EventSource + ?Sized,
        F: FnMut(&HostEvent),
    {
        match self.state {
            PacerState::Idle => return Err(PacerError::NotStarted.into()),
            PacerState::Terminated => return Err(PacerError::Terminated.into()),
            PacerState::Armed | PacerState::Waiting => {}
        }

        self.state = PacerState::Waiting;
        loop {
            let event = match events.wait_event() {
                Ok(event) => event,
                Err(e) => {
                    self.state = PacerState::Armed;
                    return Err(e);
                }
            };
            observe(&event);

            match event {
                HostEvent::ControllerAttached(device) => {
                    input.attach(device);
                }
                HostEvent::ControllerDetached(device) => {
                    input.detach(device);
                }
                HostEvent::Tick => {
                    self.frames += 1;
                    self.state = PacerState::Armed;
                    return Ok(Wake::Frame);
                }
                HostEvent::Quit => {
                    self.state = PacerState::Terminated;
                    return Ok(Wake::Quit);
                }
            }
        }
    }

    /// Current state
    pub fn state(&self) -> PacerState {
        self.state
    }

    /// Frame interval, once started
    pub fn interval(&self) -> Option<Duration> {
        self.interval
    }

    /// Number of waits that ended on a tick
    pub fn frames(&self) -> u64 {
        self.frames
    }
}

impl Default for FramePacer {
    fn default() -> Self {
        Self::new()
    }
}
