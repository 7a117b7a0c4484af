//! The one capability every face shares
//!
//! Layout and rendering code is written once against [`TextFace`]. The
//! scalable outline face and the fixed bitmap fallback both implement it,
//! so the planner, wrapper and renderer never branch on which one loaded.

use crate::{
    composite,
    error::Result,
    types::TextMask,
    Anchor, Color, RasterImage,
};

/// A measurable, drawable typeface at one pixel size
///
/// ```ignore
/// struct MyFace;
///
/// impl TextFace for MyFace {
///     fn name(&self) -> &str {
///         "my-face"
///     }
///
///     fn size(&self) -> f32 {
///         16.0
///     }
///
///     fn measure(&self, text: &str) -> Result<f32> {
///         Ok(text.chars().count() as f32 * 8.0)
///     }
///
///     fn rasterize(&self, text: &str) -> Result<TextMask> {
///         Ok(TextMask::blank(self.measure(text)?))
///     }
/// }
/// ```
pub trait TextFace: Send + Sync {
    /// Used for debugging and logging
    fn name(&self) -> &str;

    /// Effective pixel size; the planner's font size for this face
    fn size(&self) -> f32;

    /// Rendered advance width of `text` in pixels
    fn measure(&self, text: &str) -> Result<f32>;

    /// Coverage for `text`, positioned relative to its pen origin
    fn rasterize(&self, text: &str) -> Result<TextMask>;

    /// Draw `text` so that `anchor` of the run lands on `(x, y)`
    ///
    /// With [`Anchor::BASELINE_LEFT`] the point is the left end of the
    /// baseline. Ink that falls outside the canvas is dropped.
    fn draw(
        &self,
        canvas: &mut RasterImage,
        text: &str,
        x: f32,
        y: f32,
        anchor: Anchor,
        color: Color,
    ) -> Result<()> {
        if text.is_empty() {
            return Ok(());
        }

        let mask = self.rasterize(text)?;
        let origin_x = x - anchor.x * mask.advance;
        let baseline = y + anchor.y * self.size();
        composite::blend_mask(
            canvas,
            &mask,
            origin_x.round() as i32,
            baseline.round() as i32,
            color,
        );
        Ok(())
    }
}
