//! Settings data types
//!
//! The settings record is serialized to JSON with Serde. The resolution is
//! stored in its familiar `"WxH"` form.

use crate::render::Viewport;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Current settings file version
pub const CURRENT_SETTINGS_VERSION: u32 = 1;

/// Highest main volume step
pub const MAX_VOLUME: u8 = 10;

/// Screen height the menus are laid out for; other heights scale from it
const BASE_HEIGHT: f32 = 1024.0;

/// Resolutions offered when the display reports no modes
pub const FALLBACK_RESOLUTIONS: [Resolution; 5] = [
    Resolution::new(640, 480),
    Resolution::new(800, 480),
    Resolution::new(800, 600),
    Resolution::new(1024, 768),
    Resolution::new(1366, 768),
];

/// Window size in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Resolution {
    pub width: u32,
    pub height: u32,
}

impl Resolution {
    pub const fn new(width: u32, height: u32) -> Self {
        Resolution { width, height }
    }

    /// UI scale factor for menus and the cursor
    pub fn scale(&self) -> f32 {
        self.height as f32 / BASE_HEIGHT
    }

    pub fn viewport(&self) -> Viewport {
        Viewport::new(self.width, self.height)
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

impl FromStr for Resolution {
    type Err = SettingsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || SettingsError::InvalidResolution(s.to_string());

        let (width, height) = s.trim().split_once('x').ok_or_else(invalid)?;
        let width: u32 = width.trim().parse().map_err(|_| invalid())?;
        let height: u32 = height.trim().parse().map_err(|_| invalid())?;

        if width == 0 || height == 0 {
            return Err(invalid());
        }

        Ok(Resolution { width, height })
    }
}

impl TryFrom<String> for Resolution {
    type Error = SettingsError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Resolution> for String {
    fn from(resolution: Resolution) -> Self {
        resolution.to_string()
    }
}

/// Graphics detail level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GraphicsDetail {
    Low,
    Medium,
    Full,
}

impl GraphicsDetail {
    /// Next level, wrapping from `Full` back to `Low`
    pub fn next(self) -> Self {
        match self {
            GraphicsDetail::Low => GraphicsDetail::Medium,
            GraphicsDetail::Medium => GraphicsDetail::Full,
            GraphicsDetail::Full => GraphicsDetail::Low,
        }
    }

    /// Previous level, wrapping from `Low` back to `Full`
    pub fn previous(self) -> Self {
        match self {
            GraphicsDetail::Low => GraphicsDetail::Full,
            GraphicsDetail::Medium => GraphicsDetail::Low,
            GraphicsDetail::Full => GraphicsDetail::Medium,
        }
    }
}

impl fmt::Display for GraphicsDetail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            GraphicsDetail::Low => "Low",
            GraphicsDetail::Medium => "Medium",
            GraphicsDetail::Full => "Full",
        };
        f.write_str(name)
    }
}

/// Application settings record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppSettings {
    pub version: u32,

    // Graphics
    pub resolution: Resolution,
    pub graphics_detail: GraphicsDetail,
    pub is_full_screen: bool,

    // Sound
    pub volume_main: u8,
    pub enable_music: bool,
    pub enable_sfx: bool,

    // Behaviour
    pub has_run_once: bool,
    #[serde(default)]
    pub auto_select_on_pickup: bool,
}

impl Default for AppSettings {
    fn default() -> Self {
        AppSettings {
            version: CURRENT_SETTINGS_VERSION,
            resolution: Resolution::new(800, 480),
            graphics_detail: GraphicsDetail::Medium,
            is_full_screen: false,
            volume_main: 7,
            enable_music: true,
            enable_sfx: true,
            has_run_once: true,
            auto_select_on_pickup: false,
        }
    }
}

impl AppSettings {
    /// Checks values serde can't: file version and volume range
    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.version > CURRENT_SETTINGS_VERSION {
            return Err(SettingsError::InvalidVersion(self.version));
        }
        if self.volume_main > MAX_VOLUME {
            return Err(SettingsError::InvalidValue(format!(
                "volume_main {} is above {}",
                self.volume_main, MAX_VOLUME
            )));
        }
        Ok(())
    }
}

/// Errors raised while loading or saving settings
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid settings version: {0}")]
    InvalidVersion(u32),

    #[error("Invalid setting: {0}")]
    InvalidValue(String),

    #[error("Invalid resolution: {0:?}")]
    InvalidResolution(String),
}
