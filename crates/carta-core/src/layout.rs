//! Band geometry and line placement
//!
//! Everything here is derived from the image size and the face's sizing
//! class, so callers never tune layout by hand. The plan is pure numbers:
//! once computed it has no further dependency on the image pixels.

use serde::{Deserialize, Serialize};

use crate::{
    error::{CardError, Result},
    traits::TextFace,
    Anchor,
};

/// What the planner needs to know about a face before sizing it
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum FaceSizing {
    /// Any pixel size works; the planner picks one from the image height
    Scalable,
    /// Glyph metrics are baked in; size and line height are forced
    Fixed { size: f32, line_height: f32 },
}

/// Band and width fractions for one layout profile
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BandProfile {
    /// Band height as a fraction of image height
    pub band_fraction: f32,
    /// Wrapping budget as a fraction of image width
    pub max_width_fraction: f32,
}

/// Tunable constants for the planner
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Used with scalable faces
    pub standard: BandProfile,
    /// Used with the fixed fallback face
    pub minimal: BandProfile,
    /// Horizontal padding as a fraction of image width
    pub padding_fraction: f32,
    /// Scalable font size is `image_height / size_divisor`
    pub size_divisor: f32,
    pub min_font_size: f32,
    pub max_font_size: f32,
    /// Scalable line height is `font_size * line_height_factor`
    pub line_height_factor: f32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            standard: BandProfile {
                band_fraction: 0.28,
                max_width_fraction: 0.85,
            },
            minimal: BandProfile {
                band_fraction: 0.25,
                max_width_fraction: 0.90,
            },
            padding_fraction: 0.05,
            size_divisor: 15.0,
            min_font_size: 24.0,
            max_font_size: 72.0,
            line_height_factor: 1.4,
        }
    }
}

/// Fully resolved numbers for one card
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutPlan {
    pub image_width: u32,
    pub image_height: u32,
    /// First row of the band; the band always ends at the bottom edge
    pub band_top: f32,
    pub band_height: f32,
    pub font_size: f32,
    pub line_height: f32,
    pub max_line_width: f32,
    pub padding: f32,
    pub center_x: f32,
}

/// How lines sit horizontally
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Alignment {
    /// Centered by offset, but never left of the padding boundary
    ClampedLeft,
    /// Centered anchor on the midpoint; long lines run past the padding
    Centered,
}

/// One wrapped line and where it is drawn
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplayLine {
    pub text: String,
    pub x: f32,
    pub baseline: f32,
    pub anchor: Anchor,
}

/// Computes band geometry and font parameters from image dimensions
#[derive(Debug, Clone, Default)]
pub struct LayoutPlanner {
    config: LayoutConfig,
}

impl LayoutPlanner {
    pub fn new(config: LayoutConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// Resolve the band, font size and wrapping budget for one image
    pub fn plan(&self, width: u32, height: u32, sizing: FaceSizing) -> Result<LayoutPlan> {
        if width == 0 || height == 0 {
            return Err(CardError::InvalidImageDimensions { width, height });
        }

        let w = width as f32;
        let h = height as f32;

        let (font_size, line_height, profile) = match sizing {
            FaceSizing::Scalable => {
                let size = (h / self.config.size_divisor)
                    .clamp(self.config.min_font_size, self.config.max_font_size);
                (
                    size,
                    size * self.config.line_height_factor,
                    self.config.standard,
                )
            },
            FaceSizing::Fixed { size, line_height } => (size, line_height, self.config.minimal),
        };

        // Never let a tiny image produce a degenerate band
        let band_height = (h * profile.band_fraction).clamp(1.0, h);
        let band_top = h - band_height;

        let plan = LayoutPlan {
            image_width: width,
            image_height: height,
            band_top,
            band_height,
            font_size,
            line_height,
            max_line_width: w * profile.max_width_fraction,
            padding: w * self.config.padding_fraction,
            center_x: w / 2.0,
        };

        log::debug!(
            "Planned {}x{} card: band {:.1}+{:.1}, font {:.1}/{:.1}, max width {:.1}",
            width,
            height,
            plan.band_top,
            plan.band_height,
            plan.font_size,
            plan.line_height,
            plan.max_line_width
        );

        Ok(plan)
    }
}

impl LayoutPlan {
    /// Total height of a block of `count` lines
    pub fn block_height(&self, count: usize) -> f32 {
        count as f32 * self.line_height
    }

    /// Baseline of the first line so the block is centered in the band
    pub fn first_baseline(&self, count: usize) -> f32 {
        self.band_top + (self.band_height - self.block_height(count)) / 2.0 + self.font_size
    }

    /// Give each wrapped line its anchor point, top to bottom
    pub fn place(
        &self,
        lines: Vec<String>,
        face: &dyn TextFace,
        alignment: Alignment,
    ) -> Result<Vec<DisplayLine>> {
        let first = self.first_baseline(lines.len());

        lines
            .into_iter()
            .enumerate()
            .map(|(i, text)| {
                let baseline = first + i as f32 * self.line_height;
                let (x, anchor) = match alignment {
                    Alignment::ClampedLeft => {
                        let width = face.measure(&text)?;
                        let x = ((self.image_width as f32 - width) / 2.0).max(self.padding);
                        (x, Anchor::BASELINE_LEFT)
                    },
                    Alignment::Centered => (self.center_x, Anchor::BASELINE_CENTER),
                };
                Ok(DisplayLine {
                    text,
                    x,
                    baseline,
                    anchor,
                })
            })
            .collect()
    }
}
