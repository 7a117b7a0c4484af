//! Flat source-over compositing into RGBA canvases
//!
//! Straight (non-premultiplied) alpha throughout. Every write clips to the
//! canvas, so callers may hand in coordinates that run off any edge.

use crate::{types::TextMask, Color, RasterImage};
use image::Rgba;

/// Blend `color` over one pixel, scaled by `coverage` (0..=255)
#[inline]
pub fn blend_pixel(dst: &mut Rgba<u8>, color: Color, coverage: u8) {
    let alpha = (coverage as f32 / 255.0) * (color.a as f32 / 255.0);
    if alpha <= 0.0 {
        return;
    }
    let inv_alpha = 1.0 - alpha;

    let [r, g, b, a] = dst.0;
    dst.0 = [
        (r as f32 * inv_alpha + color.r as f32 * alpha).round() as u8,
        (g as f32 * inv_alpha + color.g as f32 * alpha).round() as u8,
        (b as f32 * inv_alpha + color.b as f32 * alpha).round() as u8,
        (a as f32 * inv_alpha + 255.0 * alpha).round().min(255.0) as u8,
    ];
}

/// One full-width, 1-pixel-tall stroke at row `y`
pub fn blend_row(canvas: &mut RasterImage, y: u32, color: Color) {
    if y >= canvas.height() || color.a == 0 {
        return;
    }
    for x in 0..canvas.width() {
        blend_pixel(canvas.get_pixel_mut(x, y), color, 255);
    }
}

/// Fill the rows `[top, bottom)` across the full width
pub fn blend_rows(canvas: &mut RasterImage, top: u32, bottom: u32, color: Color) {
    for y in top..bottom.min(canvas.height()) {
        blend_row(canvas, y, color);
    }
}

/// Blend a coverage mask whose pen origin lands on `(origin_x, baseline_y)`
pub fn blend_mask(
    canvas: &mut RasterImage,
    mask: &TextMask,
    origin_x: i32,
    baseline_y: i32,
    color: Color,
) {
    if mask.is_blank() || color.a == 0 {
        return;
    }

    let canvas_width = canvas.width() as i32;
    let canvas_height = canvas.height() as i32;
    let x0 = origin_x + mask.left;
    let y0 = baseline_y - mask.baseline;

    for my in 0..mask.height as i32 {
        let py = y0 + my;
        if py < 0 || py >= canvas_height {
            continue;
        }

        let row = (my as u32 * mask.width) as usize;
        for mx in 0..mask.width as i32 {
            let px = x0 + mx;
            if px < 0 || px >= canvas_width {
                continue;
            }

            let coverage = mask.coverage[row + mx as usize];
            if coverage == 0 {
                continue;
            }
            blend_pixel(canvas.get_pixel_mut(px as u32, py as u32), color, coverage);
        }
    }
}
