// Input and pacing tests
// Controller hot-plug, button queries and frame pacing through the HAL

mod common;

use common::{test_config, MockHost};
use nes_hal::input::GamepadMappingConfig;
use nes_hal::*;

const PAD: DeviceId = DeviceId(0);
const OTHER_PAD: DeviceId = DeviceId(3);

#[test]
fn test_no_controller_reads_released() {
    let mut host = MockHost::default();
    host.press(PAD, gilrs::Button::Start);
    let hal = Hal::init(host, test_config()).unwrap();

    for button in Button::ALL {
        assert!(!hal.query_button(button), "{} should read released", button);
    }
    assert_eq!(hal.buttons(), [false; Button::COUNT]);
}

#[test]
fn test_attach_press_detach() {
    let mut host = MockHost::default();
    host.script(&[
        HostEvent::ControllerAttached(PAD),
        HostEvent::Tick,
        HostEvent::ControllerDetached(PAD),
        HostEvent::Tick,
    ]);
    let mut hal = Hal::init(host, test_config()).unwrap();

    assert_eq!(hal.wait_for_next_frame().unwrap(), Wake::Frame);
    hal.host_mut().press(PAD, gilrs::Button::Start);
    assert!(hal.query_button(Button::Start));
    assert!(hal.key_state(Button::Start.code()));

    // Still held, but the controller is gone
    assert_eq!(hal.wait_for_next_frame().unwrap(), Wake::Frame);
    assert!(!hal.query_button(Button::Start));
    assert!(hal.input().handle().is_none());
}

#[test]
fn test_wait_returns_once_per_tick() {
    let mut host = MockHost::default();
    host.script(&[
        HostEvent::ControllerAttached(PAD),
        HostEvent::ControllerDetached(PAD),
        HostEvent::ControllerAttached(OTHER_PAD),
        HostEvent::Tick,
        HostEvent::Tick,
    ]);
    let mut hal = Hal::init(host, test_config()).unwrap();

    assert_eq!(hal.wait_for_next_frame().unwrap(), Wake::Frame);
    assert_eq!(hal.host().waits, 4);
    assert_eq!(hal.input().handle(), Some(OTHER_PAD));

    assert_eq!(hal.wait_for_next_frame().unwrap(), Wake::Frame);
    assert_eq!(hal.host().waits, 5);
    assert_eq!(hal.pacer().frames(), 2);
}

#[test]
fn test_wait_without_tick_does_not_return_a_frame() {
    let mut host = MockHost::default();
    host.script(&[HostEvent::ControllerAttached(PAD)]);
    let mut hal = Hal::init(host, test_config()).unwrap();

    // The script runs dry before any tick arrives
    assert!(hal.wait_for_next_frame().is_err());
    assert_eq!(hal.pacer().frames(), 0);
    assert_eq!(hal.input().handle(), Some(PAD));
}

#[test]
fn test_detach_of_inactive_controller_is_ignored() {
    let mut host = MockHost::default();
    host.script(&[
        HostEvent::ControllerAttached(PAD),
        HostEvent::ControllerDetached(OTHER_PAD),
        HostEvent::Tick,
    ]);
    host.press(PAD, gilrs::Button::South);
    let mut hal = Hal::init(host, test_config()).unwrap();

    assert_eq!(hal.wait_for_next_frame().unwrap(), Wake::Frame);
    assert!(hal.query_button(Button::A));
}

#[test]
fn test_quit_terminates_pacer() {
    let mut host = MockHost::default();
    host.script(&[HostEvent::Quit, HostEvent::Tick]);
    let mut hal = Hal::init(host, test_config()).unwrap();

    assert_eq!(hal.wait_for_next_frame().unwrap(), Wake::Quit);
    assert_eq!(hal.pacer().state(), PacerState::Terminated);
    assert!(matches!(
        hal.wait_for_next_frame(),
        Err(HalError::Pacer(PacerError::Terminated))
    ));
}

#[test]
fn test_default_mapping() {
    let mut host = MockHost::default();
    host.script(&[HostEvent::ControllerAttached(PAD), HostEvent::Tick]);
    for native in [
        gilrs::Button::South,
        gilrs::Button::DPadLeft,
        gilrs::Button::Mode,
    ] {
        host.press(PAD, native);
    }
    let mut hal = Hal::init(host, test_config()).unwrap();
    assert_eq!(hal.wait_for_next_frame().unwrap(), Wake::Frame);

    let buttons = hal.buttons();
    assert!(buttons[Button::A.index()]);
    assert!(buttons[Button::Left.index()]);
    assert!(buttons[Button::Power.index()]);
    assert!(!buttons[Button::B.index()]);
    assert!(!buttons[Button::Start.index()]);
}

#[test]
fn test_configured_mapping() {
    let mut config = test_config();
    config.input.gamepad = GamepadMappingConfig {
        button_a: "East".to_string(),
        button_b: "South".to_string(),
        ..GamepadMappingConfig::default_mapping()
    };

    let mut host = MockHost::default();
    host.script(&[HostEvent::ControllerAttached(PAD), HostEvent::Tick]);
    host.press(PAD, gilrs::Button::East);
    let mut hal = Hal::init(host, config).unwrap();
    assert_eq!(hal.wait_for_next_frame().unwrap(), Wake::Frame);

    assert!(hal.query_button(Button::A));
    assert!(!hal.query_button(Button::B));
}

#[test]
fn test_key_state_codes() {
    let mut host = MockHost::default();
    host.script(&[HostEvent::ControllerAttached(PAD), HostEvent::Tick]);
    host.press(PAD, gilrs::Button::Select);
    let mut hal = Hal::init(host, test_config()).unwrap();
    assert_eq!(hal.wait_for_next_frame().unwrap(), Wake::Frame);

    assert!(hal.key_state(3));
    assert!(!hal.key_state(1));
    assert!(!hal.key_state(0));
    assert!(!hal.key_state(10));
}

#[test]
fn test_hotplug_is_logged() {
    let mut config = test_config();
    config.logging.level = LogLevel::Info;
    let mut host = MockHost::default();
    host.script(&[
        HostEvent::ControllerAttached(PAD),
        HostEvent::ControllerDetached(PAD),
        HostEvent::Tick,
    ]);
    let mut hal = Hal::init(host, config).unwrap();
    assert_eq!(hal.wait_for_next_frame().unwrap(), Wake::Frame);

    assert_eq!(
        hal.logger().trace_buffer(),
        &[
            TraceEntry::ControllerAttached(PAD),
            TraceEntry::ControllerDetached(PAD),
        ]
    );
}
