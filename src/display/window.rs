// Window host - winit window, pixels surface and gilrs controllers
//
// The emulation core keeps its own loop, so the winit event loop is pumped
// from inside wait_event rather than handed control with run_app. Frames
// are composed into a software RGBA surface and copied into the pixels
// frame on present.

use super::surface::{MemorySurface, PixelFormat, Surface};
use crate::config::VideoConfig;
use crate::error::HalError;
use crate::input::{ControllerDevice, DeviceId, GamepadService};
use crate::timing::{EventQueue, EventSource, HostEvent};
use pixels::{Pixels, PixelsBuilder, SurfaceTexture};
use std::sync::Arc;
use std::time::{Duration, Instant};
use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, EventLoop};
use winit::platform::pump_events::{EventLoopExtPumpEvents, PumpStatus};
use winit::window::{Window, WindowId};

/// Longest time the event loop sleeps before gamepads are polled again
const GAMEPAD_POLL_INTERVAL: Duration = Duration::from_millis(2);

/// Pump timeout while waiting for the window to open
const STARTUP_PUMP_TIMEOUT: Duration = Duration::from_millis(10);

/// Pumps allowed before giving up on the window
const STARTUP_PUMP_LIMIT: usize = 200;

/// winit application state: the window and its pixels surface
struct HostApp {
    config: VideoConfig,
    window: Option<Arc<Window>>,
    pixels: Option<Pixels<'static>>,
    close_requested: bool,
    fatal: Option<HalError>,
}

impl HostApp {
    fn new(config: VideoConfig) -> Self {
        Self {
            config,
            window: None,
            pixels: None,
            close_requested: false,
            fatal: None,
        }
    }

    fn open(&mut self, event_loop: &ActiveEventLoop) -> Result<(), HalError> {
        let window_attributes = Window::default_attributes()
            .with_title(self.config.title.clone())
            .with_inner_size(LogicalSize::new(
                self.config.window_width(),
                self.config.window_height(),
            ))
            .with_resizable(false);

        let window = event_loop
            .create_window(window_attributes)
            .map_err(|e| HalError::Window(e.to_string()))?;

        // Wrap window in Arc for shared ownership
        let window = Arc::new(window);
        let window_size = window.inner_size();

        let surface_texture =
            SurfaceTexture::new(window_size.width, window_size.height, window.clone());

        let pixels = PixelsBuilder::new(self.config.width, self.config.height, surface_texture)
            .enable_vsync(self.config.vsync)
            .build()?;

        self.window = Some(window);
        self.pixels = Some(pixels);
        Ok(())
    }
}

impl ApplicationHandler for HostApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        if let Err(e) = self.open(event_loop) {
            self.fatal = Some(e);
            event_loop.exit();
        }
    }

    fn window_event(
        &mut self,
        _event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested | WindowEvent::Destroyed => {
                self.close_requested = true;
            }
            WindowEvent::Resized(size) => {
                if let Some(pixels) = &mut self.pixels {
                    if let Err(e) = pixels.resize_surface(size.width, size.height) {
                        self.fatal = Some(HalError::Window(e.to_string()));
                    }
                }
            }
            WindowEvent::RedrawRequested => {
                // Re-show the last frame after the OS invalidated the window
                if let Some(pixels) = &self.pixels {
                    if let Err(e) = pixels.render() {
                        self.fatal = Some(HalError::Render(e));
                    }
                }
            }
            _ => {}
        }
    }
}

/// Desktop host: one window, one periodic timer, gilrs controllers
pub struct WinitHost {
    event_loop: EventLoop<()>,
    app: HostApp,
    canvas: MemorySurface,
    gamepads: GamepadService,
    events: EventQueue,
}

impl WinitHost {
    /// Open the window and initialize controller support
    ///
    /// Controllers already plugged in are reported as attach notifications
    /// on the first wait.
    pub fn new(config: &VideoConfig) -> Result<Self, HalError> {
        let event_loop = EventLoop::new()?;
        let gamepads = GamepadService::new()?;
        let mut events = EventQueue::new();
        for device in gamepads.connected() {
            report_connected(&gamepads, device);
            events.push(HostEvent::ControllerAttached(device));
        }

        let mut host = Self {
            event_loop,
            app: HostApp::new(config.clone()),
            canvas: MemorySurface::new(
                config.width as usize,
                config.height as usize,
                PixelFormat::RGBA8,
            ),
            gamepads,
            events,
        };
        host.open_window()?;

        println!("Display opened:");
        println!("  Resolution: {}x{}", config.width, config.height);
        println!(
            "  Window size: {}x{}",
            config.window_width(),
            config.window_height()
        );
        println!("  Scale: {}x", config.scale);
        println!("  VSync: {}", config.vsync);

        Ok(host)
    }

    fn open_window(&mut self) -> Result<(), HalError> {
        for _ in 0..STARTUP_PUMP_LIMIT {
            let status = self
                .event_loop
                .pump_app_events(Some(STARTUP_PUMP_TIMEOUT), &mut self.app);
            if let Some(e) = self.app.fatal.take() {
                return Err(e);
            }
            if self.app.pixels.is_some() {
                return Ok(());
            }
            if let PumpStatus::Exit(code) = status {
                return Err(HalError::Window(format!(
                    "event loop exited with code {} before the window opened",
                    code
                )));
            }
        }
        Err(HalError::Window("window was not created".to_string()))
    }

    fn pump(&mut self, timeout: Duration) -> Result<(), HalError> {
        let status = self.event_loop.pump_app_events(Some(timeout), &mut self.app);
        if let Some(e) = self.app.fatal.take() {
            return Err(e);
        }
        if self.app.close_requested || matches!(status, PumpStatus::Exit(_)) {
            self.events.request_quit();
        }
        Ok(())
    }

    fn poll_gamepads(&mut self) {
        while let Some(event) = self.gamepads.poll_lifecycle() {
            match event {
                HostEvent::ControllerAttached(device) => report_connected(&self.gamepads, device),
                HostEvent::ControllerDetached(device) => println!("Gamepad {} disconnected", device),
                _ => {}
            }
            self.events.push(event);
        }
    }
}

fn report_connected(gamepads: &GamepadService, device: DeviceId) {
    match gamepads.name(device) {
        Some(name) => println!("Gamepad {} connected: {}", device, name),
        None => println!("Gamepad {} connected", device),
    }
}

impl EventSource for WinitHost {
    fn arm_periodic(&mut self, interval: Duration) {
        self.events.arm(interval, Instant::now());
    }

    fn wait_event(&mut self) -> Result<HostEvent, HalError> {
        loop {
            self.poll_gamepads();

            let now = Instant::now();
            if let Some(event) = self.events.next(now) {
                return Ok(event);
            }

            let timeout = self.events.poll_timeout(now, GAMEPAD_POLL_INTERVAL);
            self.pump(timeout)?;
        }
    }
}

impl ControllerDevice for WinitHost {
    fn is_pressed(&self, device: DeviceId, button: gilrs::Button) -> bool {
        self.gamepads.is_pressed(device, button)
    }
}

impl Surface for WinitHost {
    fn width(&self) -> usize {
        self.canvas.width()
    }

    fn height(&self) -> usize {
        self.canvas.height()
    }

    fn format(&self) -> PixelFormat {
        self.canvas.format()
    }

    fn pixels_mut(&mut self) -> &mut [u8] {
        self.canvas.pixels_mut()
    }

    fn present(&mut self) -> Result<(), HalError> {
        let pixels = self
            .app
            .pixels
            .as_mut()
            .ok_or_else(|| HalError::Window("display surface lost".to_string()))?;

        pixels.frame_mut().copy_from_slice(self.canvas.as_bytes());
        pixels.render()?;
        Ok(())
    }
}
