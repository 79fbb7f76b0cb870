// Gamepad input module
//
// Maps the nine NES buttons onto gilrs buttons and wraps the gilrs context
// that reports controller hot-plugging and answers live button queries.

use super::{Button, ControllerDevice, DeviceId};
use crate::error::HalError;
use crate::timing::HostEvent;
use gilrs::{Button as GilrsButton, Event, EventType, Gilrs};

const fn default_native(button: Button) -> GilrsButton {
    match button {
        Button::A => GilrsButton::South,
        Button::B => GilrsButton::East,
        Button::Select => GilrsButton::Select,
        Button::Start => GilrsButton::Start,
        Button::Up => GilrsButton::DPadUp,
        Button::Down => GilrsButton::DPadDown,
        Button::Left => GilrsButton::DPadLeft,
        Button::Right => GilrsButton::DPadRight,
        Button::Power => GilrsButton::Mode,
    }
}

/// Default gamepad button for each NES button, indexed by `Button::index`
///
/// # Default Mappings (Standard Gamepad Layout)
/// - South (A/Cross): A
/// - East (B/Circle): B
/// - Select/Back: Select
/// - Start: Start
/// - D-pad: D-pad
/// - Mode (Guide/Home): Power
pub const DEFAULT_GAMEPAD_BUTTONS: [GilrsButton; Button::COUNT] = {
    let mut table = [GilrsButton::Unknown; Button::COUNT];
    let mut i = 0;
    while i < Button::COUNT {
        table[i] = default_native(Button::ALL[i]);
        i += 1;
    }
    table
};

/// Lookup table from NES button to gamepad button
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GamepadMapping {
    buttons: [GilrsButton; Button::COUNT],
}

impl GamepadMapping {
    /// Create the default mapping
    pub const fn default_mapping() -> Self {
        Self {
            buttons: DEFAULT_GAMEPAD_BUTTONS,
        }
    }

    /// Create a mapping from a full table indexed by `Button::index`
    pub const fn from_table(buttons: [GilrsButton; Button::COUNT]) -> Self {
        Self { buttons }
    }

    /// Gamepad button bound to `button`
    #[inline]
    pub fn native(&self, button: Button) -> GilrsButton {
        self.buttons[button.index()]
    }

    /// Rebind `button`
    pub fn set(&mut self, button: Button, native: GilrsButton) {
        self.buttons[button.index()] = native;
    }

    /// NES button bound to a gamepad button, if any
    pub fn button_for(&self, native: GilrsButton) -> Option<Button> {
        Button::ALL
            .into_iter()
            .find(|&button| self.buttons[button.index()] == native)
    }
}

impl Default for GamepadMapping {
    fn default() -> Self {
        Self::default_mapping()
    }
}

/// Host controller service backed by gilrs
pub struct GamepadService {
    gilrs: Gilrs,
}

impl GamepadService {
    /// Initialize gamepad support
    ///
    /// Platforms gilrs does not support behave as if no controller is ever
    /// connected.
    pub fn new() -> Result<Self, HalError> {
        let gilrs = match Gilrs::new() {
            Ok(gilrs) => gilrs,
            Err(gilrs::Error::NotImplemented(dummy)) => {
                eprintln!("Gamepad support is not available on this platform");
                dummy
            }
            Err(e) => return Err(HalError::Gamepad(e.to_string())),
        };

        Ok(Self { gilrs })
    }

    /// Controllers connected right now
    pub fn connected(&self) -> Vec<DeviceId> {
        self.gilrs
            .gamepads()
            .filter(|(_, gamepad)| gamepad.is_connected())
            .map(|(id, _)| DeviceId(id.into()))
            .collect()
    }

    /// Name reported by a controller
    pub fn name(&self, device: DeviceId) -> Option<String> {
        self.gilrs
            .gamepads()
            .find(|(id, _)| usize::from(*id) == device.0)
            .map(|(_, gamepad)| gamepad.name().to_string())
    }

    /// Process pending gilrs events and return the next hot-plug notification
    ///
    /// Button events are consumed here as well; gilrs folds them into the
    /// state read by `is_pressed`.
    pub fn poll_lifecycle(&mut self) -> Option<HostEvent> {
        while let Some(Event { id, event, .. }) = self.gilrs.next_event() {
            let device = DeviceId(id.into());
            match event {
                EventType::Connected => return Some(HostEvent::ControllerAttached(device)),
                EventType::Disconnected => return Some(HostEvent::ControllerDetached(device)),
                _ => {}
            }
        }
        None
    }
}

impl ControllerDevice for GamepadService {
    fn is_pressed(&self, device: DeviceId, button: GilrsButton) -> bool {
        self.gilrs
            .gamepads()
            .find(|(id, _)| usize::from(*id) == device.0)
            .is_some_and(|(_, gamepad)| gamepad.is_connected() && gamepad.is_pressed(button))
    }
}
