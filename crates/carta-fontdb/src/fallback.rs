//! The face that is always there
//!
//! A 7x13 monospace bitmap font compiled into the binary. It has exactly one
//! size, so the planner is told its metrics instead of choosing them.

use std::convert::Infallible;

use embedded_graphics::{
    mono_font::{ascii::FONT_7X13, MonoFont, MonoTextStyle},
    pixelcolor::BinaryColor,
    prelude::*,
    text::{Baseline, Text},
};

use carta_core::{error::Result, layout::FaceSizing, types::TextMask, TextFace};

/// Native pixel size of the fallback face
pub const FALLBACK_SIZE: f32 = 13.0;

/// Line pitch used with the fallback face
pub const FALLBACK_LINE_HEIGHT: f32 = FALLBACK_SIZE * 1.5;

const FONT: &MonoFont<'static> = &FONT_7X13;

/// Built-in fixed-size face
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FallbackFace;

impl FallbackFace {
    pub const fn new() -> Self {
        Self
    }

    /// Forced metrics the planner must use with this face
    pub const fn sizing() -> FaceSizing {
        FaceSizing::Fixed {
            size: FALLBACK_SIZE,
            line_height: FALLBACK_LINE_HEIGHT,
        }
    }

    /// Horizontal pen movement per character
    pub fn advance() -> u32 {
        FONT.character_size.width + FONT.character_spacing
    }
}

impl TextFace for FallbackFace {
    fn name(&self) -> &str {
        "fallback-7x13"
    }

    fn size(&self) -> f32 {
        FALLBACK_SIZE
    }

    fn measure(&self, text: &str) -> Result<f32> {
        Ok((text.chars().count() as u32 * Self::advance()) as f32)
    }

    fn rasterize(&self, text: &str) -> Result<TextMask> {
        let advance = self.measure(text)?;
        let width = advance as u32;
        let height = FONT.character_size.height;
        if width == 0 {
            return Ok(TextMask::blank(advance));
        }

        let mut target = MaskTarget::new(width, height);
        let style = MonoTextStyle::new(FONT, BinaryColor::On);
        let baseline = FONT.baseline as i32;
        Text::with_baseline(text, Point::new(0, baseline), style, Baseline::Alphabetic)
            .draw(&mut target)
            .unwrap_or_else(|never| match never {});

        Ok(TextMask {
            width,
            height,
            left: 0,
            baseline,
            advance,
            coverage: target.coverage,
        })
    }
}

/// Collects lit pixels as full coverage
struct MaskTarget {
    width: u32,
    height: u32,
    coverage: Vec<u8>,
}

impl MaskTarget {
    fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            coverage: vec![0; (width * height) as usize],
        }
    }
}

impl OriginDimensions for MaskTarget {
    fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }
}

impl DrawTarget for MaskTarget {
    type Color = BinaryColor;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> std::result::Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            if color.is_off() || point.x < 0 || point.y < 0 {
                continue;
            }
            let (x, y) = (point.x as u32, point.y as u32);
            if x < self.width && y < self.height {
                self.coverage[(y * self.width + x) as usize] = 255;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_metrics() {
        let face = FallbackFace::new();
        assert_eq!(face.size(), 13.0);
        assert_eq!(FallbackFace::advance(), 7);
        assert_eq!(face.measure("Hello").unwrap(), 35.0);
        assert_eq!(face.measure("").unwrap(), 0.0);
        assert_eq!(
            FallbackFace::sizing(),
            FaceSizing::Fixed {
                size: 13.0,
                line_height: 19.5
            }
        );
    }

    #[test]
    fn test_rasterize_has_ink_above_baseline() {
        let mask = FallbackFace.rasterize("Hi").unwrap();
        assert_eq!((mask.width, mask.height), (14, 13));
        assert_eq!(mask.coverage.len(), 14 * 13);
        assert!(mask.baseline > 0 && mask.baseline < 13);

        let ink_rows: Vec<usize> = (0..13)
            .filter(|y| mask.coverage[y * 14..(y + 1) * 14].iter().any(|&c| c > 0))
            .collect();
        assert!(!ink_rows.is_empty());
        // "Hi" has no descenders
        assert!(ink_rows.iter().all(|&y| y <= mask.baseline as usize));
    }

    #[test]
    fn test_spaces_have_no_ink() {
        let mask = FallbackFace.rasterize("   ").unwrap();
        assert_eq!(mask.advance, 21.0);
        assert!(mask.coverage.iter().all(|&c| c == 0));
    }

    #[test]
    fn test_empty_string_is_blank() {
        assert!(FallbackFace.rasterize("").unwrap().is_blank());
    }

    #[test]
    fn test_non_ascii_still_advances() {
        // Unknown glyphs render as a replacement but keep the monospace pitch
        assert_eq!(FallbackFace.measure("Noël").unwrap(), 28.0);
        let mask = FallbackFace.rasterize("Noël").unwrap();
        assert_eq!(mask.width, 28);
    }
}
