//! Liquid Wave
//!
//! Animated "liquid wave" fill clipped to a circle, the kind of water-level
//! indicator used for progress and loading displays.
//!
//! # Features
//!
//! - Sine-wave path generation with per-tick phase advancement
//! - Fixed-cadence frame scheduling with an explicit start/stop state machine
//! - CPU compositing: circle mask plus source-atop wave fill onto RGBA images
//! - Host shim mapping attach/detach/visibility/resize events onto the animation
//! - JSON settings and headless PNG frame rendering

pub mod config;
pub mod pipeline;
pub mod render;
pub mod scheduler;
pub mod view;
pub mod wave;

// Re-export commonly used types
pub use config::{load_config, parse_hex_color, ConfigError, WaveSettings};
pub use pipeline::{render_frames, render_png_sequence, run_realtime, PipelineConfig, PipelineError};
pub use render::{CompositeRenderer, RenderError};
pub use scheduler::{
    next_frame_delay, Clock, FrameScheduler, ManualClock, RepaintCounter, RepaintSink,
    SchedulerState, SystemClock, TARGET_FRAME_INTERVAL,
};
pub use view::{Visibility, WaveView};
pub use wave::{
    build_path, SizePreset, ViewBounds, ViewportGeometry, WaveConfig, WaveParams, WavePath,
    WaveRuntimeState,
};
