//! Carta - greeting cards from a background and a message
//!
//! Carta runs a five-step flow for every card:
//! 1. Font resolution (scalable, or the built-in fallback)
//! 2. Layout planning from the image dimensions
//! 3. Greedy, paragraph-aware line wrapping
//! 4. Line placement inside the bottom band
//! 5. Band, shadow and text rendering onto a copy of the image
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use carta::prelude::*;
//!
//! let compositor = Compositor::new(CardConfig::default(), Arc::new(FontLibrary::new()));
//! let card = compositor.compose(&background, "Merry Christmas")?;
//! ```
//!
//! # Feature Flags
//!
//! - `export`: PNG/JPEG decoding, PNG encoding and data URLs (default)

mod compositor;

pub use compositor::{CardOutput, Compositor};

pub use carta_core::{
    composite, config, error, layout, traits, types, wrap, Anchor, CardConfig, CardError,
    CardMode, Color, ModeSelection, RasterImage, Result, StyleConfig,
};

pub use carta_fontdb as fontdb;
pub use carta_render as render;

#[cfg(feature = "export")]
pub use carta_export as export;

/// Common imports for typical usage
pub mod prelude {
    pub use crate::{CardOutput, Compositor};
    pub use carta_core::{
        error::{CardError, Result},
        layout::{Alignment, DisplayLine, LayoutPlan},
        traits::TextFace,
        CardConfig, CardMode, ModeSelection, RasterImage,
    };
    pub use carta_fontdb::{FontLibrary, ResolvedFont};
}
