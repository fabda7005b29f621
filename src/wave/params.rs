//! Wave size presets and the immutable configuration record.

use image::Rgba;

/// Named bundle of wave parameters selected at configuration time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SizePreset {
    Large,
    #[default]
    Middle,
    Little,
    /// Any name or code outside the table. Resolves to all-zero parameters.
    Unrecognized,
}

impl SizePreset {
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "large" | "fast" => Self::Large,
            "middle" | "medium" | "normal" => Self::Middle,
            "little" | "small" | "slow" => Self::Little,
            other => {
                log::warn!("Unknown wave size preset {:?}, wave will be flat", other);
                Self::Unrecognized
            }
        }
    }

    /// Legacy integer codes: 0 = large, 1 = middle, 2 = little.
    pub fn from_code(code: i64) -> Self {
        match code {
            0 => Self::Large,
            1 => Self::Middle,
            2 => Self::Little,
            other => {
                log::warn!("Unknown wave size code {}, wave will be flat", other);
                Self::Unrecognized
            }
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Large => "large",
            Self::Middle => "middle",
            Self::Little => "little",
            Self::Unrecognized => "unrecognized",
        }
    }

    pub fn all() -> &'static [Self] {
        &[Self::Large, Self::Middle, Self::Little]
    }

    /// Resolve the preset through the fixed parameter table.
    pub fn params(&self) -> WaveParams {
        match self {
            Self::Large => WaveParams {
                amplitude: 46.0,
                wavelength_multiple: 1.5,
                angular_hz: 0.12,
            },
            Self::Middle => WaveParams {
                amplitude: 8.0,
                wavelength_multiple: 1.0,
                angular_hz: 0.09,
            },
            Self::Little => WaveParams {
                amplitude: 5.0,
                wavelength_multiple: 0.5,
                angular_hz: 0.05,
            },
            Self::Unrecognized => WaveParams::default(),
        }
    }
}

/// Constants derived from a [`SizePreset`].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct WaveParams {
    /// Wave height in pixels.
    pub amplitude: f32,
    /// Wavelength as a multiple of the view width.
    pub wavelength_multiple: f32,
    /// Phase increment per tick, in radians.
    pub angular_hz: f32,
}

/// Immutable wave configuration supplied by the host.
#[derive(Debug, Clone, PartialEq)]
pub struct WaveConfig {
    /// Fraction of the view height used as the wave baseline (0.0 - 1.0).
    pub wave_weight: f32,
    /// Color of the wave body (below the curve).
    pub foreground: Rgba<u8>,
    /// Color of the disk above the curve.
    pub background: Rgba<u8>,
    pub size: SizePreset,
}

impl Default for WaveConfig {
    fn default() -> Self {
        Self {
            wave_weight: 0.5,
            foreground: Rgba([0, 0, 0, 255]),
            background: Rgba([0, 0, 0, 0]),
            size: SizePreset::Middle,
        }
    }
}

impl WaveConfig {
    pub fn new(foreground: Rgba<u8>, background: Rgba<u8>, wave_weight: f32, size: SizePreset) -> Self {
        Self {
            wave_weight: normalize_weight(wave_weight),
            foreground,
            background,
            size,
        }
    }

    pub fn params(&self) -> WaveParams {
        self.size.params()
    }
}

/// Clamp a wave weight into 0..=1. NaN falls back to the default of 0.5.
pub fn normalize_weight(weight: f32) -> f32 {
    if weight.is_nan() {
        log::warn!("Wave weight is NaN, using 0.5");
        return 0.5;
    }
    let clamped = weight.clamp(0.0, 1.0);
    if clamped != weight {
        log::warn!("Wave weight {} clamped to {}", weight, clamped);
    }
    clamped
}
