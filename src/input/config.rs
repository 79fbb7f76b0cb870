// Input configuration module
//
// Serializable form of the gamepad mapping. Buttons are stored by their
// gilrs name (e.g. "South", "DPadUp") so the TOML file stays readable.

use super::gamepad::GamepadMapping;
use super::Button;
use serde::{Deserialize, Serialize};

/// Serializable gamepad button mapping
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GamepadMappingConfig {
    /// Button for A (as string, e.g., "South")
    pub button_a: String,
    /// Button for B
    pub button_b: String,
    /// Button for Select
    pub select: String,
    /// Button for Start
    pub start: String,
    /// Button for Up on D-pad
    pub up: String,
    /// Button for Down on D-pad
    pub down: String,
    /// Button for Left on D-pad
    pub left: String,
    /// Button for Right on D-pad
    pub right: String,
    /// Button for the power switch
    pub power: String,
}

impl GamepadMappingConfig {
    /// Create default gamepad mapping
    pub fn default_mapping() -> Self {
        Self::from_gamepad_mapping(&GamepadMapping::default_mapping())
    }

    fn field(&self, button: Button) -> &str {
        match button {
            Button::A => &self.button_a,
            Button::B => &self.button_b,
            Button::Select => &self.select,
            Button::Start => &self.start,
            Button::Up => &self.up,
            Button::Down => &self.down,
            Button::Left => &self.left,
            Button::Right => &self.right,
            Button::Power => &self.power,
        }
    }

    /// Convert to runtime GamepadMapping
    ///
    /// # Returns
    /// Result containing GamepadMapping or error message
    pub fn to_gamepad_mapping(&self) -> Result<GamepadMapping, String> {
        let mut mapping = GamepadMapping::default_mapping();
        for button in Button::ALL {
            let native = string_to_gilrs_button(self.field(button))
                .map_err(|e| format!("{} button: {}", button, e))?;
            mapping.set(button, native);
        }
        Ok(mapping)
    }

    /// Create from runtime GamepadMapping
    pub fn from_gamepad_mapping(mapping: &GamepadMapping) -> Self {
        let name = |button| gilrs_button_to_string(mapping.native(button));
        Self {
            button_a: name(Button::A),
            button_b: name(Button::B),
            select: name(Button::Select),
            start: name(Button::Start),
            up: name(Button::Up),
            down: name(Button::Down),
            left: name(Button::Left),
            right: name(Button::Right),
            power: name(Button::Power),
        }
    }
}

impl Default for GamepadMappingConfig {
    fn default() -> Self {
        Self::default_mapping()
    }
}

/// Complete input configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    /// Gamepad mapping
    pub gamepad: GamepadMappingConfig,
}

/// Convert gilrs::Button to string representation
fn gilrs_button_to_string(button: gilrs::Button) -> String {
    format!("{:?}", button)
}

/// Convert string to gilrs::Button
fn string_to_gilrs_button(s: &str) -> Result<gilrs::Button, String> {
    use gilrs::Button;

    match s {
        "South" => Ok(Button::South),
        "East" => Ok(Button::East),
        "North" => Ok(Button::North),
        "West" => Ok(Button::West),
        "C" => Ok(Button::C),
        "Z" => Ok(Button::Z),
        "LeftTrigger" => Ok(Button::LeftTrigger),
        "LeftTrigger2" => Ok(Button::LeftTrigger2),
        "RightTrigger" => Ok(Button::RightTrigger),
        "RightTrigger2" => Ok(Button::RightTrigger2),
        "Select" => Ok(Button::Select),
        "Start" => Ok(Button::Start),
        "Mode" => Ok(Button::Mode),
        "LeftThumb" => Ok(Button::LeftThumb),
        "RightThumb" => Ok(Button::RightThumb),
        "DPadUp" => Ok(Button::DPadUp),
        "DPadDown" => Ok(Button::DPadDown),
        "DPadLeft" => Ok(Button::DPadLeft),
        "DPadRight" => Ok(Button::DPadRight),
        _ => Err(format!("Unknown gamepad button: {}", s)),
    }
}
