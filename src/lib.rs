// NES HAL Library
// Host binding for a NES emulation core: display, frame pacing and input

// Public modules
pub mod config;
pub mod debug;
pub mod display;
pub mod error;
pub mod hal;
pub mod input;
pub mod timing;

// Re-export main types for convenience
pub use config::{HalConfig, LoggingConfig, VideoConfig, CONFIG_FILE};
pub use debug::{LogLevel, Logger, TraceEntry};
pub use display::{
    FramePresenter, MemorySurface, PixelBuffer, PixelEntry, PixelFormat, Rgb, Surface, WinitHost,
    NES_PALETTE, SCREEN_HEIGHT, SCREEN_WIDTH,
};
pub use error::{HalError, PacerError};
pub use hal::{Hal, Host};
pub use input::{Button, ControllerDevice, DeviceId, GamepadMapping, InputSampler};
pub use timing::{EventSource, FramePacer, HostEvent, PacerState, Wake, DEFAULT_FPS};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_components() {
        // Test that the host-independent components can be instantiated
        let _presenter = FramePresenter::new();
        let _pacer = FramePacer::new();
        let _sampler = InputSampler::default();
        let _logger = Logger::new();
        let buffer = PixelBuffer::for_frame(SCREEN_WIDTH, SCREEN_HEIGHT);
        assert_eq!(buffer.capacity(), SCREEN_WIDTH * SCREEN_HEIGHT);
        assert_eq!(NES_PALETTE.len(), 64);
    }
}
