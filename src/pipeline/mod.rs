//! Frame loops that drive a [`WaveView`] outside of a UI toolkit.
//!
//! - [`render_frames`] / [`render_png_sequence`]: deterministic headless rendering,
//!   with virtual time advanced by exactly the scheduled delay between ticks.
//! - [`run_realtime`]: a blocking wall-clock loop that sleeps between ticks.

use crate::config::ConfigError;
use crate::render::RenderError;
use crate::scheduler::{ManualClock, RepaintCounter, SystemClock, TARGET_FRAME_INTERVAL};
use crate::view::WaveView;
use crate::wave::{SizePreset, ViewBounds, WaveConfig};
use image::{Rgba, RgbaImage};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Configuration for offline frame rendering.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub width: u32,
    pub height: u32,
    pub frames: u32,
    pub frame_interval: Duration,
    pub wave: WaveConfig,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            width: 256,
            height: 256,
            frames: 120,
            frame_interval: TARGET_FRAME_INTERVAL,
            wave: WaveConfig::new(
                Rgba([30, 144, 255, 255]),
                Rgba([220, 220, 220, 255]),
                0.5,
                SizePreset::Middle,
            ),
        }
    }
}

/// Errors that can occur during pipeline execution.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("Render error: {0}")]
    Render(#[from] RenderError),
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Render `config.frames` consecutive animation frames in memory.
///
/// Stops at the first error returned by `on_frame`.
pub fn render_frames(
    config: &PipelineConfig,
    mut on_frame: impl FnMut(u32, &RgbaImage) -> Result<(), PipelineError>,
) -> Result<u32, PipelineError> {
    let clock = ManualClock::new();
    let mut view = WaveView::with_clock(config.wave.clone(), clock.clone())
        .with_frame_interval(config.frame_interval);
    view.on_resize(ViewBounds::from_size(config.width, config.height));
    view.on_attached();

    let mut repaints = RepaintCounter::default();
    let mut rendered = 0;

    while rendered < config.frames {
        let before = repaints.requests;
        let Some(delay) = view.poll(&mut repaints) else {
            break;
        };
        if repaints.requests > before {
            let mut frame = RgbaImage::new(config.width, config.height);
            view.paint(&mut frame)?;
            on_frame(rendered, &frame)?;
            rendered += 1;
        }
        clock.advance(delay);
    }

    Ok(rendered)
}

/// Render frames to `frame_00000.png`, `frame_00001.png`, ... inside `output_dir`.
pub fn render_png_sequence<P: AsRef<Path>>(
    config: &PipelineConfig,
    output_dir: P,
    progress_callback: Option<Box<dyn Fn(f32)>>,
) -> Result<Vec<PathBuf>, PipelineError> {
    let output_dir = output_dir.as_ref();
    std::fs::create_dir_all(output_dir)?;
    log::info!(
        "Rendering {} frames at {}x{} to {}",
        config.frames,
        config.width,
        config.height,
        output_dir.display()
    );

    let mut written = Vec::with_capacity(config.frames as usize);

    render_frames(config, |index, frame| {
        let path = output_dir.join(format!("frame_{:05}.png", index));
        frame.save(&path)?;
        written.push(path);
        if let Some(ref callback) = progress_callback {
            callback((index + 1) as f32 / config.frames.max(1) as f32);
        }
        Ok(())
    })?;

    Ok(written)
}

/// Drive `view` on the wall clock until `frames` frames have been painted
/// or the animation stops.
///
/// Sleeps for the scheduler's computed delay between polls.
pub fn run_realtime(
    view: &mut WaveView<SystemClock>,
    frames: u64,
    mut on_frame: impl FnMut(&RgbaImage),
) -> Result<u64, PipelineError> {
    let Some(viewport) = view.viewport().copied() else {
        return Ok(0);
    };
    let mut painted = 0;
    let mut repaints = RepaintCounter::default();

    while painted < frames {
        let before = repaints.requests;
        let Some(delay) = view.poll(&mut repaints) else {
            break;
        };
        if repaints.requests > before {
            let mut frame = RgbaImage::new(viewport.width, viewport.height);
            view.paint(&mut frame)?;
            on_frame(&frame);
            painted += 1;
        }
        if !delay.is_zero() {
            std::thread::sleep(delay);
        }
    }

    Ok(painted)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pipeline_config_default() {
        let config = PipelineConfig::default();
        assert_eq!(config.width, 256);
        assert_eq!(config.height, 256);
        assert_eq!(config.frames, 120);
        assert_eq!(config.frame_interval, Duration::from_millis(16));
    }

    #[test]
    fn test_render_frames_counts_and_animates() {
        let config = PipelineConfig {
            width: 64,
            height: 64,
            frames: 8,
            ..Default::default()
        };
        let mut frames = Vec::new();
        let rendered = render_frames(&config, |_, frame| {
            frames.push(frame.clone());
            Ok(())
        })
        .unwrap();

        assert_eq!(rendered, 8);
        assert_eq!(frames.len(), 8);
        assert_ne!(frames[0], frames[7], "wave should move between frames");
    }

    #[test]
    fn test_render_frames_is_deterministic() {
        let config = PipelineConfig {
            width: 48,
            height: 48,
            frames: 4,
            ..Default::default()
        };
        let mut first = Vec::new();
        let mut second = Vec::new();
        render_frames(&config, |_, f| {
            first.push(f.clone());
            Ok(())
        })
        .unwrap();
        render_frames(&config, |_, f| {
            second.push(f.clone());
            Ok(())
        })
        .unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_zero_sized_render_fails() {
        let config = PipelineConfig {
            width: 0,
            height: 32,
            frames: 3,
            ..Default::default()
        };
        let result = render_frames(&config, |_, _| Ok(()));
        assert!(matches!(result, Err(PipelineError::Render(_))));
    }

    #[test]
    fn test_render_frames_stops_on_callback_error() {
        let config = PipelineConfig {
            width: 32,
            height: 32,
            frames: 10,
            ..Default::default()
        };
        let mut calls = 0;
        let result = render_frames(&config, |index, _| {
            calls += 1;
            if index == 2 {
                return Err(std::io::Error::other("sink closed").into());
            }
            Ok(())
        });

        assert!(matches!(result, Err(PipelineError::Io(_))));
        assert_eq!(calls, 3);
    }

    #[test]
    fn test_png_sequence_stops_at_first_failed_save() {
        let dir = tempfile::tempdir().unwrap();
        // A directory squatting on the second frame's name makes its save fail.
        std::fs::create_dir(dir.path().join("frame_00001.png")).unwrap();
        let config = PipelineConfig {
            width: 24,
            height: 24,
            frames: 10,
            ..Default::default()
        };

        let saved = std::rc::Rc::new(std::cell::Cell::new(0u32));
        let counter = saved.clone();
        let progress: Box<dyn Fn(f32)> = Box::new(move |_| counter.set(counter.get() + 1));
        let result = render_png_sequence(&config, dir.path(), Some(progress));

        assert!(matches!(result, Err(PipelineError::Image(_))));
        assert_eq!(saved.get(), 1);
        assert!(dir.path().join("frame_00000.png").is_file());
        assert!(!dir.path().join("frame_00002.png").exists());
    }
}
