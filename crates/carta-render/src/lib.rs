//! Carta Render: band, shadow and text passes
//!
//! The renderer is the last stage. It never decides where anything goes:
//! geometry comes from the [`LayoutPlan`] and positions from the placed
//! [`DisplayLine`]s. It only decides how things look, in three passes drawn
//! onto a copy of the input:
//!
//! 1. the band ([`BandStyle`])
//! 2. an optional drop shadow ([`Shadow`])
//! 3. the text itself

pub mod band;

pub use band::BandStyle;

use carta_core::{
    error::{CardError, Result},
    CardMode, Color, DisplayLine, LayoutPlan, RasterImage, StyleConfig, TextFace,
};

/// A translucent copy of every line, offset down and to the right
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Shadow {
    pub offset: (i32, i32),
    /// Already carries the shadow opacity
    pub color: Color,
}

/// Draws a finished card from a plan and its placed lines
#[derive(Debug, Clone, PartialEq)]
pub struct CardRenderer {
    band: BandStyle,
    shadow: Option<Shadow>,
    text_color: Color,
}

impl CardRenderer {
    pub fn new(band: BandStyle, shadow: Option<Shadow>, text_color: Color) -> Self {
        Self {
            band,
            shadow,
            text_color,
        }
    }

    /// Flat band, no shadow
    pub fn simple(style: &StyleConfig) -> Self {
        Self::new(
            BandStyle::Flat {
                color: style.band_color,
                alpha: style.flat_alpha,
            },
            None,
            style.text_color,
        )
    }

    /// Gradient band with a drop shadow under the text
    pub fn enhanced(style: &StyleConfig) -> Self {
        Self::new(
            BandStyle::Gradient {
                color: style.band_color,
                max_alpha: style.gradient_max_alpha,
            },
            Some(Shadow {
                offset: style.shadow_offset,
                color: style.shadow_color.with_alpha(style.shadow_alpha),
            }),
            style.text_color,
        )
    }

    pub fn for_mode(mode: CardMode, style: &StyleConfig) -> Self {
        match mode {
            CardMode::Simple => Self::simple(style),
            CardMode::Enhanced => Self::enhanced(style),
        }
    }

    pub fn band(&self) -> BandStyle {
        self.band
    }

    pub fn shadow(&self) -> Option<Shadow> {
        self.shadow
    }

    /// Composite the card; `image` is left untouched
    pub fn render(
        &self,
        image: &RasterImage,
        plan: &LayoutPlan,
        lines: &[DisplayLine],
        face: &dyn TextFace,
    ) -> Result<RasterImage> {
        let (width, height) = image.dimensions();
        if width == 0 || height == 0 {
            return Err(CardError::InvalidImageDimensions { width, height });
        }

        let mut canvas = image.clone();
        self.band.draw(&mut canvas, plan);

        if let Some(shadow) = self.shadow {
            let (dx, dy) = (shadow.offset.0 as f32, shadow.offset.1 as f32);
            for line in lines {
                face.draw(
                    &mut canvas,
                    &line.text,
                    line.x + dx,
                    line.baseline + dy,
                    line.anchor,
                    shadow.color,
                )?;
            }
        }

        for line in lines {
            face.draw(
                &mut canvas,
                &line.text,
                line.x,
                line.baseline,
                line.anchor,
                self.text_color,
            )?;
        }

        log::debug!(
            "Rendered {} lines with {} onto {}x{} ({})",
            lines.len(),
            face.name(),
            width,
            height,
            if self.shadow.is_some() {
                "shadowed"
            } else {
                "flat"
            }
        );

        Ok(canvas)
    }
}
