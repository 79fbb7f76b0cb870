// Error types for the hardware abstraction layer
//
// Everything here is either a misuse of the frame pacer or a host failure
// the emulation core cannot recover from.

use std::fmt;
use std::io;

/// Misuse of the frame pacer state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PacerError {
    /// `wait_for_next_frame` called before `start`
    NotStarted,

    /// `start` called more than once
    AlreadyStarted,

    /// A frame rate of zero was requested
    InvalidFrameRate(u32),

    /// The host has already requested termination
    Terminated,
}

impl fmt::Display for PacerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PacerError::NotStarted => write!(f, "Frame pacer has not been started"),
            PacerError::AlreadyStarted => write!(f, "Frame pacer is already started"),
            PacerError::InvalidFrameRate(fps) => write!(f, "Invalid frame rate: {} fps", fps),
            PacerError::Terminated => write!(f, "Host requested termination"),
        }
    }
}

impl std::error::Error for PacerError {}

/// Errors surfaced by the hardware abstraction layer
#[derive(Debug)]
pub enum HalError {
    /// The host event loop could not be created or driven
    EventLoop(winit::error::EventLoopError),

    /// The window or its surface could not be created or was lost
    Window(String),

    /// Rendering the surface to the display failed
    Render(pixels::Error),

    /// Gamepad support failed to initialize
    Gamepad(String),

    /// Frame pacer misuse
    Pacer(PacerError),

    /// Invalid configuration
    Config(String),

    /// I/O error
    Io(io::Error),
}

impl fmt::Display for HalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HalError::EventLoop(e) => write!(f, "Event loop error: {}", e),
            HalError::Window(msg) => write!(f, "Window error: {}", msg),
            HalError::Render(e) => write!(f, "Render error: {}", e),
            HalError::Gamepad(msg) => write!(f, "Gamepad error: {}", msg),
            HalError::Pacer(e) => write!(f, "Frame pacer error: {}", e),
            HalError::Config(msg) => write!(f, "Configuration error: {}", msg),
            HalError::Io(e) => write!(f, "I/O error: {}", e),
        }
    }
}

impl std::error::Error for HalError {}

impl From<winit::error::EventLoopError> for HalError {
    fn from(e: winit::error::EventLoopError) -> Self {
        HalError::EventLoop(e)
    }
}

impl From<pixels::Error> for HalError {
    fn from(e: pixels::Error) -> Self {
        HalError::Render(e)
    }
}

impl From<PacerError> for HalError {
    fn from(e: PacerError) -> Self {
        HalError::Pacer(e)
    }
}

impl From<io::Error> for HalError {
    fn from(e: io::Error) -> Self {
        HalError::Io(e)
    }
}

/// Result alias for HAL operations
pub type Result<T> = std::result::Result<T, HalError>;
