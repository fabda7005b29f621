//! Wave geometry engine.
//!
//! Maps a [`WaveConfig`], the current [`ViewportGeometry`] and the per-tick
//! [`WaveRuntimeState`] into a closed [`WavePath`] describing the wave body.

pub mod geometry;
pub mod params;

pub use geometry::{
    build_path, ViewBounds, ViewportGeometry, WavePath, WaveRuntimeState, BOTTOM_PADDING,
    HORIZONTAL_STEP, PHASE_WRAP_THRESHOLD,
};
pub use params::{normalize_weight, SizePreset, WaveConfig, WaveParams};
