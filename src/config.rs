// Configuration management
//
// Handles HAL configuration and its persistence as TOML.

use crate::debug::LogLevel;
use crate::display::{SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::error::HalError;
use crate::input::InputConfig;
use crate::timing::DEFAULT_FPS;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Default configuration file path
pub const CONFIG_FILE: &str = "nes_hal.toml";

/// HAL configuration
///
/// Stores all user-configurable settings of the host binding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HalConfig {
    /// Exit the process as soon as the host asks to quit
    pub exit_on_quit: bool,

    /// Video settings
    pub video: VideoConfig,

    /// Input settings
    pub input: InputConfig,

    /// Logging settings
    pub logging: LoggingConfig,
}

/// Video configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VideoConfig {
    /// Surface width in console pixels
    pub width: u32,

    /// Surface height in console pixels
    pub height: u32,

    /// Window scale (1-8)
    pub scale: u32,

    /// Target FPS (usually 60 for NTSC)
    pub fps: u32,

    /// Enable VSync
    pub vsync: bool,

    /// Window title
    pub title: String,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level
    pub level: LogLevel,

    /// Optional log file
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,

    /// Echo log entries to stderr
    pub echo: bool,
}

impl Default for HalConfig {
    fn default() -> Self {
        HalConfig {
            exit_on_quit: true,
            video: VideoConfig::default(),
            input: InputConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for VideoConfig {
    fn default() -> Self {
        VideoConfig {
            width: SCREEN_WIDTH as u32,
            height: SCREEN_HEIGHT as u32,
            scale: 3,
            fps: DEFAULT_FPS,
            vsync: true,
            title: "NES".to_string(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            level: LogLevel::Warning,
            file: None,
            echo: true,
        }
    }
}

impl VideoConfig {
    /// Set the scale factor, clamped between 1x and 8x
    pub fn with_scale(mut self, scale: u32) -> Self {
        self.scale = scale.clamp(1, 8);
        self
    }

    /// Set the target frame rate
    pub fn with_fps(mut self, fps: u32) -> Self {
        self.fps = fps.max(1);
        self
    }

    /// Set VSync enabled or disabled
    pub fn with_vsync(mut self, vsync: bool) -> Self {
        self.vsync = vsync;
        self
    }

    /// Get the window width in pixels
    pub fn window_width(&self) -> u32 {
        self.width * self.scale
    }

    /// Get the window height in pixels
    pub fn window_height(&self) -> u32 {
        self.height * self.scale
    }
}

impl HalConfig {
    /// Load configuration from `path` or fall back to defaults
    ///
    /// If the file doesn't exist or is invalid, the defaults are used and
    /// written to `path` when possible.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Self {
        Self::load(&path).unwrap_or_else(|e| {
            eprintln!("Could not load config ({}), using defaults", e);
            let config = Self::default();
            if let Err(e) = config.save(&path) {
                eprintln!("Warning: Could not save default config: {}", e);
            }
            config
        })
    }

    /// Load and validate configuration from a TOML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, HalError> {
        let contents = fs::read_to_string(path)?;
        let config: HalConfig =
            toml::from_str(&contents).map_err(|e| HalError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a TOML file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), HalError> {
        let contents =
            toml::to_string_pretty(self).map_err(|e| HalError::Config(e.to_string()))?;
        fs::write(path, contents)?;
        Ok(())
    }

    /// Check values the host cannot work with
    pub fn validate(&self) -> Result<(), HalError> {
        let video = &self.video;
        if video.width == 0 || video.height == 0 {
            return Err(HalError::Config(format!(
                "surface size {}x{} is empty",
                video.width, video.height
            )));
        }
        if video.fps == 0 {
            return Err(HalError::Config("fps must be positive".to_string()));
        }
        if !(1..=8).contains(&video.scale) {
            return Err(HalError::Config(format!(
                "scale {} is outside 1-8",
                video.scale
            )));
        }
        self.input
            .gamepad
            .to_gamepad_mapping()
            .map_err(HalError::Config)?;
        Ok(())
    }
}
