//! Carta Raster: outline glyphs to line coverage masks
//!
//! A small, dependency-light rasterizer. skrifa walks the outlines, curves
//! are flattened by subdivision, and a signed-area accumulator turns the
//! resulting edges into antialiased 8-bit coverage. One call renders a whole
//! line, so compositing works on one mask per line rather than per glyph.
//!
//! ## Pieces
//!
//! - [`curves`] - de Casteljau flattening of quadratic and cubic segments
//! - [`accumulator`] - exact-area coverage for straight edges
//! - [`rasterizer`] - the skrifa pens that drive both

pub mod accumulator;
pub mod curves;
pub mod rasterizer;

pub use rasterizer::{LineRasterizer, MAX_MASK_DIMENSION};
