// Common test utilities for host-independent integration tests
//
// MockHost stands in for the desktop window: an in-memory surface, a
// scripted event queue and a set of held controller buttons.

#![allow(dead_code)]

use nes_hal::display::{MemorySurface, PixelFormat, Surface};
use nes_hal::input::{ControllerDevice, DeviceId};
use nes_hal::timing::{EventSource, HostEvent};
use nes_hal::{HalConfig, HalError};
use std::collections::VecDeque;
use std::time::Duration;

/// Surface size used by most tests
pub const TEST_WIDTH: usize = 16;
pub const TEST_HEIGHT: usize = 8;

/// Scripted host binding
pub struct MockHost {
    /// Backing surface
    pub surface: MemorySurface,
    /// Events returned by `wait_event`, front first
    pub events: VecDeque<HostEvent>,
    /// Interval passed to `arm_periodic`
    pub armed: Option<Duration>,
    /// Buttons currently held, per device
    pub pressed: Vec<(DeviceId, gilrs::Button)>,
    /// Number of `wait_event` calls served
    pub waits: usize,
    /// Make `present` fail
    pub fail_present: bool,
}

impl MockHost {
    /// Create a host with an RGBA8 surface
    pub fn new(width: usize, height: usize) -> Self {
        Self::with_format(width, height, PixelFormat::RGBA8)
    }

    /// Create a host with a surface in `format`
    pub fn with_format(width: usize, height: usize, format: PixelFormat) -> Self {
        MockHost {
            surface: MemorySurface::new(width, height, format),
            events: VecDeque::new(),
            armed: None,
            pressed: Vec::new(),
            waits: 0,
            fail_present: false,
        }
    }

    /// Queue events for later waits
    pub fn script(&mut self, events: &[HostEvent]) {
        self.events.extend(events.iter().copied());
    }

    /// Hold `button` on `device`
    pub fn press(&mut self, device: DeviceId, button: gilrs::Button) {
        if !self.pressed.contains(&(device, button)) {
            self.pressed.push((device, button));
        }
    }

    /// Release `button` on `device`
    pub fn release(&mut self, device: DeviceId, button: gilrs::Button) {
        self.pressed.retain(|held| *held != (device, button));
    }
}

impl Default for MockHost {
    fn default() -> Self {
        Self::new(TEST_WIDTH, TEST_HEIGHT)
    }
}

impl Surface for MockHost {
    fn width(&self) -> usize {
        self.surface.width()
    }

    fn height(&self) -> usize {
        self.surface.height()
    }

    fn format(&self) -> PixelFormat {
        self.surface.format()
    }

    fn pixels_mut(&mut self) -> &mut [u8] {
        self.surface.pixels_mut()
    }

    fn present(&mut self) -> Result<(), HalError> {
        if self.fail_present {
            return Err(HalError::Window("surface lost".to_string()));
        }
        self.surface.present()
    }
}

impl EventSource for MockHost {
    fn arm_periodic(&mut self, interval: Duration) {
        self.armed = Some(interval);
    }

    fn wait_event(&mut self) -> Result<HostEvent, HalError> {
        self.waits += 1;
        self.events
            .pop_front()
            .ok_or_else(|| HalError::Window("event script exhausted".to_string()))
    }
}

impl ControllerDevice for MockHost {
    fn is_pressed(&self, device: DeviceId, button: gilrs::Button) -> bool {
        self.pressed.contains(&(device, button))
    }
}

/// Configuration that keeps quit requests inside the test process
pub fn test_config() -> HalConfig {
    let mut config = HalConfig::default();
    config.exit_on_quit = false;
    config.video.width = TEST_WIDTH as u32;
    config.video.height = TEST_HEIGHT as u32;
    config.logging.echo = false;
    config
}
