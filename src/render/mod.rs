//! CPU compositing of the clipped wave image.
//!
//! Each frame is rasterized with `vello_cpu` into an off-screen pixmap:
//! - a solid disk in the background color, inscribed in the viewport
//! - the wave body in the foreground color, inside a source-atop blend layer
//!   so it only lands on the disk
//!
//! The pixmap is converted to straight alpha, blended onto the host's output at
//! the origin, and dropped before returning.

pub mod composite;

pub use composite::{blend, draw_image, unpremultiply_into};

use crate::wave::{ViewportGeometry, WavePath};
use image::{Rgba, RgbaImage};
use vello_cpu::kurbo::{BezPath, Circle, Shape};
use vello_cpu::peniko::{BlendMode, Color, Compose, Mix};
use vello_cpu::{Pixmap, RenderContext};

/// Largest off-screen surface the default renderer will allocate.
pub const DEFAULT_MAX_SURFACE_PIXELS: u64 = 64 * 1024 * 1024;

/// Flattening tolerance for the disk outline, in pixels.
const CIRCLE_TOLERANCE: f64 = 0.1;

/// Errors that can occur while compositing a frame.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("Failed to allocate {width}x{height} off-screen surface")]
    SurfaceAllocation { width: u32, height: u32 },
}

/// Paints the wave path and circle mask onto an output surface.
#[derive(Debug, Clone)]
pub struct CompositeRenderer {
    max_surface_pixels: u64,
}

impl Default for CompositeRenderer {
    fn default() -> Self {
        Self {
            max_surface_pixels: DEFAULT_MAX_SURFACE_PIXELS,
        }
    }
}

impl CompositeRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cap the off-screen surface size. Larger viewports fail to allocate.
    pub fn with_max_surface_pixels(mut self, max_surface_pixels: u64) -> Self {
        self.max_surface_pixels = max_surface_pixels;
        self
    }

    /// Composite one frame onto `output` at the origin.
    pub fn render(
        &self,
        path: &WavePath,
        foreground: Rgba<u8>,
        background: Rgba<u8>,
        viewport: &ViewportGeometry,
        output: &mut RgbaImage,
    ) -> Result<(), RenderError> {
        let (width, height) = self.surface_size(viewport.width, viewport.height)?;
        let mut layer = self.allocate_surface(viewport.width, viewport.height)?;

        let mut ctx = RenderContext::new(width, height);

        // Integer halves, matching how the view's own size is split.
        let center = ((viewport.width / 2) as f64, (viewport.height / 2) as f64);
        let radius = (viewport.width / 2) as f64;
        ctx.set_paint(to_color(background));
        ctx.fill_path(&Circle::new(center, radius).to_path(CIRCLE_TOLERANCE));

        ctx.push_blend_layer(BlendMode::new(Mix::Normal, Compose::SrcAtop));
        ctx.set_paint(to_color(foreground));
        ctx.fill_path(&wave_outline(path));
        ctx.pop_layer();

        let mut pixmap = Pixmap::new(width, height);
        ctx.flush();
        ctx.render_to_pixmap(&mut pixmap);

        unpremultiply_into(pixmap.data_as_u8_slice(), &mut layer);
        draw_image(output, &layer, 0, 0);
        Ok(())
    }

    /// Composite one frame onto a fresh transparent image the size of the viewport.
    pub fn render_to_image(
        &self,
        path: &WavePath,
        foreground: Rgba<u8>,
        background: Rgba<u8>,
        viewport: &ViewportGeometry,
    ) -> Result<RgbaImage, RenderError> {
        let mut output = self.allocate_surface(viewport.width, viewport.height)?;
        self.render(path, foreground, background, viewport, &mut output)?;
        Ok(output)
    }

    /// Pixmap dimensions, which the rasterizer limits to `u16`.
    fn surface_size(&self, width: u32, height: u32) -> Result<(u16, u16), RenderError> {
        let failed = || RenderError::SurfaceAllocation { width, height };
        let pixels = width as u64 * height as u64;
        if pixels == 0 || pixels > self.max_surface_pixels {
            return Err(failed());
        }
        let w = u16::try_from(width).map_err(|_| failed())?;
        let h = u16::try_from(height).map_err(|_| failed())?;
        Ok((w, h))
    }

    fn allocate_surface(&self, width: u32, height: u32) -> Result<RgbaImage, RenderError> {
        let failed = || RenderError::SurfaceAllocation { width, height };
        let pixels = width as u64 * height as u64;
        if pixels == 0 || pixels > self.max_surface_pixels {
            return Err(failed());
        }

        let len = usize::try_from(pixels * 4).map_err(|_| failed())?;
        let mut buffer: Vec<u8> = Vec::new();
        buffer.try_reserve_exact(len).map_err(|_| failed())?;
        buffer.resize(len, 0);

        RgbaImage::from_raw(width, height, buffer).ok_or_else(failed)
    }
}

/// Closed polygon through the path points, starting at the bottom-left corner.
fn wave_outline(path: &WavePath) -> BezPath {
    let mut outline = BezPath::new();
    let mut points = path.points().iter();
    if let Some(first) = points.next() {
        outline.move_to((first[0] as f64, first[1] as f64));
        for point in points {
            outline.line_to((point[0] as f64, point[1] as f64));
        }
        outline.close_path();
    }
    outline
}

fn to_color(color: Rgba<u8>) -> Color {
    Color::from_rgba8(color[0], color[1], color[2], color[3])
}
