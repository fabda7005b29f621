//! Straight-alpha pixel helpers around the rasterizer's output.
//!
//! `vello_cpu` renders premultiplied RGBA8. Host surfaces are `image::RgbaImage`
//! buffers with straight alpha, so the rendered layer is converted once and then
//! composited source-over.

use image::{Rgba, RgbaImage};

/// Source-over blend of `src` onto `dst`, both straight alpha.
pub fn blend(dst: Rgba<u8>, src: Rgba<u8>) -> Rgba<u8> {
    let sa = src[3] as f32 / 255.0;
    let da = dst[3] as f32 / 255.0;
    let out_a = sa + da * (1.0 - sa);
    if out_a <= 0.0 {
        return Rgba([0, 0, 0, 0]);
    }
    let channel = |i: usize| {
        let c = (src[i] as f32 * sa + dst[i] as f32 * da * (1.0 - sa)) / out_a;
        to_u8(c)
    };
    Rgba([channel(0), channel(1), channel(2), to_u8(out_a * 255.0)])
}

fn to_u8(value: f32) -> u8 {
    value.round().clamp(0.0, 255.0) as u8
}

/// Convert premultiplied RGBA8 bytes into `dst`, pixel for pixel.
///
/// `premul` must hold exactly `dst.width() * dst.height()` pixels.
pub fn unpremultiply_into(premul: &[u8], dst: &mut RgbaImage) {
    for (out, px) in dst.chunks_exact_mut(4).zip(premul.chunks_exact(4)) {
        let a = px[3] as u32;
        if a == 0 {
            out.copy_from_slice(&[0, 0, 0, 0]);
            continue;
        }
        for (channel, &value) in out[..3].iter_mut().zip(&px[..3]) {
            *channel = ((value as u32 * 255 + a / 2) / a).min(255) as u8;
        }
        out[3] = px[3];
    }
}

/// Composite `src` onto `dst` with its top-left corner at `(x, y)`.
pub fn draw_image(dst: &mut RgbaImage, src: &RgbaImage, x: i64, y: i64) {
    let (dst_w, dst_h) = dst.dimensions();
    for (sx, sy, pixel) in src.enumerate_pixels() {
        let dx = x + sx as i64;
        let dy = y + sy as i64;
        if dx < 0 || dy < 0 || dx >= dst_w as i64 || dy >= dst_h as i64 {
            continue;
        }
        let target = dst.get_pixel_mut(dx as u32, dy as u32);
        *target = blend(*target, *pixel);
    }
}
