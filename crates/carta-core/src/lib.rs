//! Carta Core: from a message to positioned lines
//!
//! A greeting card is a background image with a short message laid over its
//! bottom edge. This crate holds everything between the raw message and the
//! pixels: the face capability, the layout planner, the line wrapper, and the
//! small set of compositing primitives every face draws with.
//!
//! ## The Flow
//!
//! 1. **Font resolution** - A scalable face or the fixed fallback (see `carta-fontdb`)
//! 2. **Planning** - [`layout::LayoutPlanner`] turns image size into band geometry
//! 3. **Wrapping** - [`wrap::wrap_message`] breaks the message into display lines
//! 4. **Placement** - [`layout::LayoutPlan::place`] gives each line its anchor point
//! 5. **Rendering** - Band, shadow and text passes (see `carta-render`)
//!
//! ```rust,no_run
//! use carta_core::layout::{FaceSizing, LayoutConfig, LayoutPlanner};
//!
//! let planner = LayoutPlanner::new(LayoutConfig::default());
//! let plan = planner.plan(800, 600, FaceSizing::Scalable)?;
//! assert_eq!(plan.font_size, 40.0);
//! # Ok::<(), carta_core::CardError>(())
//! ```

pub mod composite;
pub mod config;
pub mod error;
pub mod layout;
pub mod traits;
pub mod wrap;

pub use config::{CardConfig, StyleConfig};
pub use error::{CardError, Result};
pub use layout::{Alignment, DisplayLine, FaceSizing, LayoutConfig, LayoutPlan, LayoutPlanner};
pub use traits::TextFace;

use serde::{Deserialize, Serialize};

/// The raster type the compositor reads and produces
pub type RasterImage = image::RgbaImage;

/// The data structures faces hand to the compositing code
pub mod types {
    /// Unique identifier for a glyph within a font
    pub type GlyphId = u32;

    /// A glyph that knows where it sits on the line
    #[derive(Debug, Clone, PartialEq)]
    pub struct PositionedGlyph {
        pub id: GlyphId,
        pub x: f32,
        pub advance: f32,
    }

    /// Coverage for one rendered string
    ///
    /// Column 0 sits `left` pixels from the pen origin and row `baseline`
    /// is the text baseline. Coverage is 0 (no ink) to 255 (solid).
    #[derive(Debug, Clone, Default)]
    pub struct TextMask {
        pub width: u32,
        pub height: u32,
        pub left: i32,
        pub baseline: i32,
        pub advance: f32,
        pub coverage: Vec<u8>,
    }

    impl TextMask {
        /// A mask with no ink that still advances the pen
        pub fn blank(advance: f32) -> Self {
            Self {
                advance,
                ..Self::default()
            }
        }

        pub fn is_blank(&self) -> bool {
            self.width == 0 || self.height == 0
        }
    }
}

/// Simple RGBA color that works everywhere
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn black() -> Self {
        Self::rgba(0, 0, 0, 255)
    }

    pub const fn white() -> Self {
        Self::rgba(255, 255, 255, 255)
    }

    /// Same color with alpha given as a 0.0..=1.0 fraction
    pub fn with_alpha(self, alpha: f32) -> Self {
        Self {
            a: (alpha.clamp(0.0, 1.0) * 255.0).round() as u8,
            ..self
        }
    }
}

/// Where a draw position sits relative to the rendered run
///
/// `x` is a fraction of the run's advance (0.0 = left, 0.5 = center) and `y`
/// a fraction of the face size added below the given point (0.0 = the point
/// is the baseline, 0.5 = the point is roughly the vertical center).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Anchor {
    pub x: f32,
    pub y: f32,
}

impl Anchor {
    pub const BASELINE_LEFT: Anchor = Anchor { x: 0.0, y: 0.0 };
    pub const BASELINE_CENTER: Anchor = Anchor { x: 0.5, y: 0.0 };
    pub const CENTER: Anchor = Anchor { x: 0.5, y: 0.5 };
}

/// The two card looks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CardMode {
    /// Flat band, clamped left edge, no shadow
    Simple,
    /// Gradient band, centered anchor, drop shadow
    Enhanced,
}

/// How the card mode is chosen for a call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModeSelection {
    /// Enhanced with a scalable face, simple with the fallback
    #[default]
    Auto,
    Simple,
    Enhanced,
}

impl ModeSelection {
    pub fn resolve(self, sizing: FaceSizing) -> CardMode {
        match self {
            Self::Simple => CardMode::Simple,
            Self::Enhanced => CardMode::Enhanced,
            Self::Auto => match sizing {
                FaceSizing::Scalable => CardMode::Enhanced,
                FaceSizing::Fixed { .. } => CardMode::Simple,
            },
        }
    }
}

impl std::str::FromStr for ModeSelection {
    type Err = CardError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "auto" => Ok(Self::Auto),
            "simple" => Ok(Self::Simple),
            "enhanced" => Ok(Self::Enhanced),
            other => Err(CardError::Config(format!("Unknown card mode: {other}"))),
        }
    }
}
