//! The translucent backing behind the text

use carta_core::{composite, Color, LayoutPlan, RasterImage};

/// How the band is filled
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BandStyle {
    /// Every band row at the same opacity
    Flat { color: Color, alpha: f32 },
    /// Transparent at the top edge, `max_alpha` at the bottom, one stroke per row
    Gradient { color: Color, max_alpha: f32 },
}

impl BandStyle {
    /// Pixel rows `[top, bottom)` covered by the band
    pub fn rows(plan: &LayoutPlan, canvas_height: u32) -> (u32, u32) {
        let top = (plan.band_top.round().max(0.0) as u32).min(canvas_height);
        (top, canvas_height)
    }

    /// Opacity of band row `index` in a band `rows` tall
    pub fn row_alpha(&self, index: u32, rows: u32) -> f32 {
        match *self {
            Self::Flat { alpha, .. } => alpha,
            Self::Gradient { max_alpha, .. } => {
                if rows == 0 {
                    0.0
                } else {
                    max_alpha * index as f32 / rows as f32
                }
            },
        }
    }

    pub fn draw(&self, canvas: &mut RasterImage, plan: &LayoutPlan) {
        let (top, bottom) = Self::rows(plan, canvas.height());
        match *self {
            Self::Flat { color, alpha } => {
                composite::blend_rows(canvas, top, bottom, color.with_alpha(alpha));
            },
            Self::Gradient { color, .. } => {
                let rows = bottom - top;
                for (i, y) in (top..bottom).enumerate() {
                    let alpha = self.row_alpha(i as u32, rows);
                    composite::blend_row(canvas, y, color.with_alpha(alpha));
                }
            },
        }
    }
}
