//! Example: Render a short wave animation to a PNG sequence.
//!
//! Run with:
//!     cargo run --example render_frames -- [settings.json] [output_dir]
//!
//! Set `RUST_LOG=debug` to see scheduler transitions.

use anyhow::Context;
use liquid_wave::{
    load_config, render_png_sequence, run_realtime, PipelineConfig, ViewBounds, Visibility,
    WaveView,
};
use std::path::PathBuf;
use std::time::Instant;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let settings = args.next();
    let output_dir = PathBuf::from(args.next().unwrap_or_else(|| "wave_frames".to_string()));

    let mut config = PipelineConfig::default();
    if let Some(path) = settings {
        config.wave = load_config(&path).with_context(|| format!("loading settings from {}", path))?;
    }

    println!("Liquid Wave - PNG Sequence Example");
    println!("==================================\n");
    println!("  Resolution: {}x{}", config.width, config.height);
    println!("  Frames: {}", config.frames);
    println!("  Size preset: {}", config.wave.size.name());
    println!("  Wave weight: {:.2}\n", config.wave.wave_weight);

    let progress: Box<dyn Fn(f32)> = Box::new(|progress: f32| {
        if (progress * 100.0) as u32 % 25 == 0 {
            println!("  Progress: {:.0}%", progress * 100.0);
        }
    });
    let written = render_png_sequence(&config, &output_dir, Some(progress))
        .context("rendering frame sequence")?;
    println!("\nWrote {} frames to {}", written.len(), output_dir.display());

    // One second on the wall clock, to check the real cadence.
    let mut view = WaveView::new(config.wave.clone());
    view.on_resize(ViewBounds::from_size(config.width, config.height));
    view.on_visibility_changed(Visibility::Visible);

    let start = Instant::now();
    let painted = run_realtime(&mut view, 60, |_| {})?;
    let elapsed = start.elapsed();
    view.on_detached();

    println!(
        "Real-time loop painted {} frames in {:.2?} ({:.1} fps)",
        painted,
        elapsed,
        painted as f64 / elapsed.as_secs_f64()
    );

    Ok(())
}
