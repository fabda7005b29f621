//! JSON settings for the wave view.
//!
//! ```json
//! { "wave_color": "#1e90ff", "background_color": "#dcdcdc", "wave_weight": 0.6, "size": "large" }
//! ```
//!
//! Every field is optional. `size` accepts a preset name or the legacy integer code.

use crate::wave::{SizePreset, WaveConfig};
use image::Rgba;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Errors that can occur while loading wave settings.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid settings JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Invalid color: {0}")]
    InvalidColor(String),
}

/// Size preset as written in a settings file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SizeSetting {
    Name(String),
    Code(i64),
}

impl SizeSetting {
    pub fn resolve(&self) -> SizePreset {
        match self {
            Self::Name(name) => SizePreset::from_str(name),
            Self::Code(code) => SizePreset::from_code(*code),
        }
    }
}

/// On-disk form of [`WaveConfig`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WaveSettings {
    pub wave_color: String,
    pub background_color: String,
    pub wave_weight: f32,
    pub size: SizeSetting,
}

impl Default for WaveSettings {
    fn default() -> Self {
        Self {
            wave_color: "#000000".to_string(),
            background_color: "#00000000".to_string(),
            wave_weight: 0.5,
            size: SizeSetting::Name(SizePreset::Middle.name().to_string()),
        }
    }
}

impl WaveSettings {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path.as_ref())?;
        let settings = Self::from_json(&json)?;
        log::debug!("Loaded wave settings from {}", path.as_ref().display());
        Ok(settings)
    }

    pub fn to_config(&self) -> Result<WaveConfig, ConfigError> {
        let foreground = parse_hex_color(&self.wave_color)
            .ok_or_else(|| ConfigError::InvalidColor(self.wave_color.clone()))?;
        let background = parse_hex_color(&self.background_color)
            .ok_or_else(|| ConfigError::InvalidColor(self.background_color.clone()))?;

        Ok(WaveConfig::new(
            foreground,
            background,
            self.wave_weight,
            self.size.resolve(),
        ))
    }
}

/// Load a settings file straight into a [`WaveConfig`].
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<WaveConfig, ConfigError> {
    WaveSettings::load(path)?.to_config()
}

/// Parse `#RRGGBB` (opaque) or `#RRGGBBAA` into a color.
pub fn parse_hex_color(hex: &str) -> Option<Rgba<u8>> {
    let hex = hex.trim().trim_start_matches('#');
    if (hex.len() != 6 && hex.len() != 8) || !hex.is_ascii() {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    let a = if hex.len() == 8 {
        u8::from_str_radix(&hex[6..8], 16).ok()?
    } else {
        255
    };
    Some(Rgba([r, g, b, a]))
}
