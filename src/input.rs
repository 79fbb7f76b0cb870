// Input module - Normalized NES button model
//
// The emulation core asks about nine logical buttons. Which physical
// control answers for each one is decided by a mapping table, and whether a
// controller is present at all is tracked by the input sampler.

pub mod config;
pub mod gamepad;
pub mod sampler;

use std::fmt;

pub use config::{GamepadMappingConfig, InputConfig};
pub use gamepad::{GamepadMapping, GamepadService, DEFAULT_GAMEPAD_BUTTONS};
pub use sampler::InputSampler;

/// Logical buttons of the emulated console
///
/// `Power` is the console's power switch; it maps to the guide/system
/// button of a gamepad and reads as released on pads without one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Button {
    /// A button
    A,
    /// B button
    B,
    /// Select button
    Select,
    /// Start button
    Start,
    /// Up on D-pad
    Up,
    /// Down on D-pad
    Down,
    /// Left on D-pad
    Left,
    /// Right on D-pad
    Right,
    /// Power switch
    Power,
}

impl Button {
    /// Number of logical buttons
    pub const COUNT: usize = 9;

    /// Every button, in table order
    pub const ALL: [Button; Button::COUNT] = [
        Button::A,
        Button::B,
        Button::Select,
        Button::Start,
        Button::Up,
        Button::Down,
        Button::Left,
        Button::Right,
        Button::Power,
    ];

    /// Position of this button in per-button tables
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Numeric button code used by cores that address buttons by number
    ///
    /// A is 1, B is 2, and so on up to Power at 9.
    #[inline]
    pub const fn code(self) -> u8 {
        self as u8 + 1
    }

    /// Button for a numeric code (1-9)
    pub fn from_code(code: u8) -> Option<Button> {
        match code {
            1..=9 => Some(Self::ALL[(code - 1) as usize]),
            _ => None,
        }
    }

    /// Display name
    pub fn name(self) -> &'static str {
        match self {
            Button::A => "A",
            Button::B => "B",
            Button::Select => "SELECT",
            Button::Start => "START",
            Button::Up => "UP",
            Button::Down => "DOWN",
            Button::Left => "LEFT",
            Button::Right => "RIGHT",
            Button::Power => "POWER",
        }
    }
}

// Per-button tables are sized by COUNT; keep it in step with the variants.
const _: () = assert!(Button::Power as usize + 1 == Button::COUNT);

impl fmt::Display for Button {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Host identifier of a connected controller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DeviceId(pub usize);

impl From<usize> for DeviceId {
    fn from(id: usize) -> Self {
        DeviceId(id)
    }
}

impl fmt::Display for DeviceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Live button state of the host's controllers
pub trait ControllerDevice {
    /// Whether `button` is currently held on `device`
    ///
    /// Unknown or disconnected devices read as not pressed.
    fn is_pressed(&self, device: DeviceId, button: gilrs::Button) -> bool;
}
