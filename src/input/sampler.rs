// Input sampler - Controller connection handle and button queries
//
// At most one controller is held at a time. The handle is replaced by every
// attach notification and dropped only by a detach of the same device.
// Button state is never cached: every query goes to the device.

use super::gamepad::GamepadMapping;
use super::{Button, ControllerDevice, DeviceId};

/// Tracks the active controller and answers button queries
#[derive(Debug, Clone, Default)]
pub struct InputSampler {
    handle: Option<DeviceId>,
    mapping: GamepadMapping,
}

impl InputSampler {
    /// Create a sampler with no controller held
    pub fn new(mapping: GamepadMapping) -> Self {
        Self {
            handle: None,
            mapping,
        }
    }

    /// Take `device` as the active controller
    ///
    /// # Returns
    /// The previously held device, if any
    pub fn attach(&mut self, device: DeviceId) -> Option<DeviceId> {
        self.handle.replace(device)
    }

    /// Drop the active controller if it is `device`
    ///
    /// # Returns
    /// `true` if the handle was released
    pub fn detach(&mut self, device: DeviceId) -> bool {
        if self.handle == Some(device) {
            self.handle = None;
            true
        } else {
            false
        }
    }

    /// Active controller, if any
    pub fn handle(&self) -> Option<DeviceId> {
        self.handle
    }

    /// Whether a controller is held
    pub fn is_connected(&self) -> bool {
        self.handle.is_some()
    }

    /// Live state of `button` on the active controller
    ///
    /// Always `false` when no controller is held.
    pub fn query_button<D: ControllerDevice + ?Sized>(&self, device: &D, button: Button) -> bool {
        match self.handle {
            Some(handle) => device.is_pressed(handle, self.mapping.native(button)),
            None => false,
        }
    }

    /// Live state of all nine buttons, indexed by `Button::index`
    pub fn query_all<D: ControllerDevice + ?Sized>(&self, device: &D) -> [bool; Button::COUNT] {
        Button::ALL.map(|button| self.query_button(device, button))
    }

    /// Current button mapping
    pub fn mapping(&self) -> &GamepadMapping {
        &self.mapping
    }

    /// Replace the button mapping
    pub fn set_mapping(&mut self, mapping: GamepadMapping) {
        self.mapping = mapping;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gilrs::Button as GilrsButton;

    #[derive(Default)]
    struct FakePads {
        held: Vec<(DeviceId, GilrsButton)>,
    }

    impl ControllerDevice for FakePads {
        fn is_pressed(&self, device: DeviceId, button: GilrsButton) -> bool {
            self.held.contains(&(device, button))
        }
    }

    #[test]
    fn test_no_handle_reads_released() {
        let mut pads = FakePads::default();
        for native in crate::input::DEFAULT_GAMEPAD_BUTTONS {
            pads.held.push((DeviceId(0), native));
        }

        let sampler = InputSampler::default();
        for button in Button::ALL {
            assert!(!sampler.query_button(&pads, button));
        }
    }

    #[test]
    fn test_attach_then_press() {
        let mut pads = FakePads::default();
        pads.held.push((DeviceId(2), GilrsButton::Start));

        let mut sampler = InputSampler::default();
        assert_eq!(sampler.attach(DeviceId(2)), None);
        assert!(sampler.query_button(&pads, Button::Start));
        assert!(!sampler.query_button(&pads, Button::Select));
    }

    #[test]
    fn test_detach_only_matching_device() {
        let mut sampler = InputSampler::default();
        sampler.attach(DeviceId(1));

        assert!(!sampler.detach(DeviceId(7)));
        assert_eq!(sampler.handle(), Some(DeviceId(1)));

        assert!(sampler.detach(DeviceId(1)));
        assert!(!sampler.is_connected());
    }

    #[test]
    fn test_attach_replaces_handle() {
        let mut sampler = InputSampler::default();
        sampler.attach(DeviceId(1));
        assert_eq!(sampler.attach(DeviceId(4)), Some(DeviceId(1)));

        // The replaced device can no longer release the handle
        assert!(!sampler.detach(DeviceId(1)));
        assert_eq!(sampler.handle(), Some(DeviceId(4)));
    }

    #[test]
    fn test_query_follows_mapping() {
        let mut pads = FakePads::default();
        pads.held.push((DeviceId(0), GilrsButton::North));

        let mut mapping = GamepadMapping::default_mapping();
        mapping.set(Button::A, GilrsButton::North);

        let mut sampler = InputSampler::new(mapping);
        sampler.attach(DeviceId(0));
        assert!(sampler.query_button(&pads, Button::A));
    }

    #[test]
    fn test_query_all() {
        let mut pads = FakePads::default();
        pads.held.push((DeviceId(0), GilrsButton::DPadLeft));
        pads.held.push((DeviceId(0), GilrsButton::South));

        let mut sampler = InputSampler::default();
        sampler.attach(DeviceId(0));
        let states = sampler.query_all(&pads);
        assert_eq!(
            states,
            [true, false, false, false, false, false, true, false, false]
        );
    }
}
