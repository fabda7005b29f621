//! Wave geometry: viewport derivation, phase advancement and path building.
//!
//! Everything here is pure arithmetic. No rendering happens in this module.

use super::params::{WaveConfig, WaveParams};
use std::f64::consts::PI;

/// Default sampling stride along x, in pixels.
pub const HORIZONTAL_STEP: f32 = 20.0;

/// Extra pixels below the view's bottom edge where the wave region is closed.
pub const BOTTOM_PADDING: i32 = 2;

/// Offsets past this value are reset to zero on the next advance.
///
/// `f64::MAX - 100.0` rounds to `f64::MAX`, so [`advance`](WaveRuntimeState::advance)
/// compares with `>=`. Offsets are `f64` so per-tick increments keep registering
/// at large magnitudes.
pub const PHASE_WRAP_THRESHOLD: f64 = f64::MAX - 100.0;

/// View bounds in parent coordinate space, as reported by the host on layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ViewBounds {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl ViewBounds {
    pub fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self { left, top, right, bottom }
    }

    /// Bounds of a view placed at the parent origin.
    ///
    /// Sizes beyond `i32::MAX` are clamped.
    pub fn from_size(width: u32, height: u32) -> Self {
        let clamp = |size: u32| i32::try_from(size).unwrap_or(i32::MAX);
        Self::new(0, 0, clamp(width), clamp(height))
    }

    pub fn width(&self) -> u32 {
        span(self.left, self.right)
    }

    pub fn height(&self) -> u32 {
        span(self.top, self.bottom)
    }
}

fn span(start: i32, end: i32) -> u32 {
    (end as i64 - start as i64).clamp(0, u32::MAX as i64) as u32
}

/// Geometry recomputed on every resize.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportGeometry {
    pub width: u32,
    pub height: u32,
    pub left: i32,
    pub right: i32,
    /// Bottom bound plus [`BOTTOM_PADDING`].
    pub bottom: i32,
    /// Sampling stops once x passes this value.
    pub max_right: f32,
    /// Amplitude of the preset this viewport was measured for.
    pub amplitude: f32,
    pub wavelength: f32,
    /// Angular frequency in radians per horizontal pixel.
    pub omega: f64,
    pub horizontal_step: f32,
}

impl ViewportGeometry {
    /// Measure `bounds` for the preset selected in `config`.
    pub fn new(bounds: ViewBounds, config: &WaveConfig) -> Self {
        let params = config.params();
        let width = bounds.width();
        let wavelength = width as f32 * params.wavelength_multiple;
        // A zero wavelength would put an infinite frequency into sin().
        let omega = if wavelength > 0.0 {
            2.0 * PI / wavelength as f64
        } else {
            0.0
        };

        Self {
            width,
            height: bounds.height(),
            left: bounds.left,
            right: bounds.right,
            bottom: bounds.bottom.saturating_add(BOTTOM_PADDING),
            max_right: bounds.right as f32 + HORIZONTAL_STEP,
            amplitude: params.amplitude,
            wavelength,
            omega,
            horizontal_step: HORIZONTAL_STEP,
        }
    }

    /// Number of wave samples between the two closing corners.
    pub fn sample_count(&self) -> usize {
        if self.max_right < 0.0 || self.horizontal_step <= 0.0 {
            return 0;
        }
        (self.max_right / self.horizontal_step).floor() as usize + 1
    }
}

/// Phase offsets advanced once per tick.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct WaveRuntimeState {
    pub foreground_offset: f64,
    /// Advanced alongside the foreground but never drawn.
    pub background_offset: f64,
}

impl WaveRuntimeState {
    /// Initial state for a freshly measured view.
    pub fn new(params: &WaveParams) -> Self {
        Self {
            foreground_offset: 0.0,
            background_offset: params.amplitude as f64 * 0.4,
        }
    }

    /// Advance both offsets by `angular_hz`, wrapping each to zero independently.
    pub fn advance(&self, angular_hz: f32) -> Self {
        let step = angular_hz as f64;
        Self {
            foreground_offset: advance_offset(self.foreground_offset, step),
            background_offset: advance_offset(self.background_offset, step),
        }
    }
}

fn advance_offset(offset: f64, step: f64) -> f64 {
    if offset >= PHASE_WRAP_THRESHOLD {
        0.0
    } else {
        offset + step
    }
}

/// Closed outline of the wave body, ready to be filled.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct WavePath {
    points: Vec<[f32; 2]>,
}

impl WavePath {
    pub fn points(&self) -> &[[f32; 2]] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// The move-to corner at `(0, bottom)`.
    pub fn first(&self) -> Option<[f32; 2]> {
        self.points.first().copied()
    }

    /// The closing corner at `(right, bottom)`.
    pub fn last(&self) -> Option<[f32; 2]> {
        self.points.last().copied()
    }

    /// Sampled wave points, without the two closing corners.
    pub fn interior(&self) -> &[[f32; 2]] {
        if self.points.len() < 2 {
            return &[];
        }
        &self.points[1..self.points.len() - 1]
    }
}

/// Build the wave outline for the current phase.
///
/// Amplitude and frequency come from `viewport`, which was measured for the same
/// config. For x = 0, step, 2*step, ... up to `max_right` the curve is
/// `amplitude * sin(omega * x + offset) + max(amplitude, height * wave_weight)`.
/// The baseline term keeps the whole wave below the top of the view even when
/// the amplitude exceeds the weight-derived level.
pub fn build_path(
    config: &WaveConfig,
    viewport: &ViewportGeometry,
    state: &WaveRuntimeState,
) -> WavePath {
    let amplitude = viewport.amplitude as f64;
    let baseline = amplitude.max(viewport.height as f64 * config.wave_weight as f64);
    let offset = state.foreground_offset;
    let bottom = viewport.bottom as f32;

    let samples = viewport.sample_count();
    let mut points = Vec::with_capacity(samples + 2);
    points.push([0.0, bottom]);

    for i in 0..samples {
        let x = i as f32 * viewport.horizontal_step;
        let y = amplitude * (viewport.omega * x as f64 + offset).sin() + baseline;
        points.push([x, y as f32]);
    }

    points.push([viewport.right as f32, bottom]);
    WavePath { points }
}
