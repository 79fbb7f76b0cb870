// HAL context - The single object the emulation core talks to
//
// Owns the host binding together with the presenter, frame pacer, input
// sampler and logger. The core calls, once per frame:
//
//   wait_for_next_frame -> (append into its PixelBuffer) -> set_background
//   -> flush -> present -> query_button ...

use crate::config::HalConfig;
use crate::debug::{LogLevel, Logger, TraceEntry};
use crate::display::{FramePresenter, PixelBuffer, Surface};
use crate::error::HalError;
use crate::input::{Button, ControllerDevice, InputSampler};
use crate::timing::{EventSource, FramePacer, HostEvent, Wake};

/// Everything the HAL needs from the host platform
pub trait Host: Surface + EventSource + ControllerDevice {}

impl<T: Surface + EventSource + ControllerDevice + ?Sized> Host for T {}

/// Hardware abstraction context
pub struct Hal<H: Host> {
    host: H,
    config: HalConfig,
    presenter: FramePresenter,
    pacer: FramePacer,
    input: InputSampler,
    logger: Logger,
}

impl<H: Host> Hal<H> {
    /// Set up the HAL on `host` and arm the frame timer
    ///
    /// # Arguments
    /// * `host` - Host binding providing the surface, events and controllers
    /// * `config` - Configuration; `video.fps` sets the frame rate
    pub fn init(mut host: H, config: HalConfig) -> Result<Self, HalError> {
        config.validate()?;
        let mapping = config
            .input
            .gamepad
            .to_gamepad_mapping()
            .map_err(HalError::Config)?;

        let mut logger = Logger::with_level(config.logging.level);
        logger.set_echo(config.logging.echo);
        if let Some(path) = &config.logging.file {
            logger.open_log_file(path)?;
        }

        let mut pacer = FramePacer::new();
        pacer.start(config.video.fps, &mut host)?;
        logger.log_message(
            LogLevel::Debug,
            format!(
                "Frame timer armed at {} fps on a {}x{} surface",
                config.video.fps,
                host.width(),
                host.height()
            ),
        );

        Ok(Self {
            host,
            config,
            presenter: FramePresenter::new(),
            pacer,
            input: InputSampler::new(mapping),
            logger,
        })
    }

    /// A cleared pixel buffer sized for one frame of this surface
    pub fn new_frame_buffer(&self) -> PixelBuffer {
        PixelBuffer::for_frame(self.host.width(), self.host.height())
    }

    /// Surface width in pixels
    pub fn width(&self) -> usize {
        self.host.width()
    }

    /// Surface height in pixels
    pub fn height(&self) -> usize {
        self.host.height()
    }

    /// Fill the surface with the color of `color`
    pub fn set_background(&mut self, color: u8) {
        self.presenter.set_background(&mut self.host, color);
    }

    /// Write the buffered pixels onto the surface
    pub fn flush(&mut self, buffer: &PixelBuffer) {
        self.presenter.flush(&mut self.host, buffer);
    }

    /// Show the composed frame
    ///
    /// An error means the display is gone and should end the process.
    pub fn present(&mut self) -> Result<(), HalError> {
        if let Err(e) = self.presenter.present(&mut self.host) {
            self.logger
                .log_message(LogLevel::Error, format!("Present failed: {}", e));
            return Err(e);
        }
        let frame = self.presenter.frames_presented();
        self.logger
            .log(LogLevel::Trace, TraceEntry::FramePresented(frame));
        Ok(())
    }

    /// Block until the next frame interval begins
    ///
    /// If the host asks to quit and `exit_on_quit` is set, the process exits
    /// here with status 0. Otherwise `Wake::Quit` is returned.
    pub fn wait_for_next_frame(&mut self) -> Result<Wake, HalError> {
        let logger = &mut self.logger;
        let wake = self
            .pacer
            .wait_for_next_frame_with(&mut self.host, &mut self.input, |event| match event {
                HostEvent::ControllerAttached(id) => {
                    logger.log(LogLevel::Info, TraceEntry::ControllerAttached(*id))
                }
                HostEvent::ControllerDetached(id) => {
                    logger.log(LogLevel::Info, TraceEntry::ControllerDetached(*id))
                }
                HostEvent::Quit => logger.log_message(LogLevel::Info, "Quit requested".to_string()),
                HostEvent::Tick => {}
            })?;

        if wake == Wake::Quit && self.config.exit_on_quit {
            std::process::exit(0);
        }
        Ok(wake)
    }

    /// Live state of `button` on the active controller
    pub fn query_button(&self, button: Button) -> bool {
        self.input.query_button(&self.host, button)
    }

    /// Live state of a button by numeric code (A = 1 ... Power = 9)
    ///
    /// Unknown codes read as not pressed.
    pub fn key_state(&self, code: u8) -> bool {
        Button::from_code(code).is_some_and(|button| self.query_button(button))
    }

    /// Live state of all nine buttons, indexed by `Button::index`
    pub fn buttons(&self) -> [bool; Button::COUNT] {
        self.input.query_all(&self.host)
    }

    /// Get a reference to the host
    pub fn host(&self) -> &H {
        &self.host
    }

    /// Get a mutable reference to the host
    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// Release the host
    pub fn into_host(self) -> H {
        self.host
    }

    /// Active configuration
    pub fn config(&self) -> &HalConfig {
        &self.config
    }

    /// Frame presenter state
    pub fn presenter(&self) -> &FramePresenter {
        &self.presenter
    }

    /// Frame pacer state
    pub fn pacer(&self) -> &FramePacer {
        &self.pacer
    }

    /// Input sampler state
    pub fn input(&self) -> &InputSampler {
        &self.input
    }

    /// Get a reference to the logger
    pub fn logger(&self) -> &Logger {
        &self.logger
    }

    /// Get a mutable reference to the logger
    pub fn logger_mut(&mut self) -> &mut Logger {
        &mut self.logger
    }
}
