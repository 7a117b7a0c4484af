//! The compositor ties resolution, planning, wrapping and rendering together

use std::sync::Arc;

use image::DynamicImage;

use carta_core::{
    error::{CardError, Result},
    layout::{Alignment, DisplayLine, LayoutPlan, LayoutPlanner},
    wrap::wrap_message,
    CardConfig, CardMode, RasterImage, TextFace,
};
use carta_fontdb::{CardFace, FontLibrary};
use carta_render::CardRenderer;

/// Everything a card call produced, for callers that need more than pixels
#[derive(Debug, Clone)]
pub struct CardOutput {
    pub image: RasterImage,
    pub plan: LayoutPlan,
    pub lines: Vec<DisplayLine>,
    pub mode: CardMode,
    /// Name of the face the text was drawn with
    pub font: String,
    /// True when the configured font could not be used
    pub used_fallback: bool,
}

/// A resolved layout without any pixels
struct Prepared {
    plan: LayoutPlan,
    lines: Vec<DisplayLine>,
    mode: CardMode,
    face: CardFace,
    used_fallback: bool,
}

/// Overlays a message on a background image
///
/// Holds configuration and a shared font library; each call is independent,
/// so one compositor can serve many threads.
#[derive(Debug, Clone)]
pub struct Compositor {
    config: CardConfig,
    fonts: Arc<FontLibrary>,
    planner: LayoutPlanner,
}

impl Compositor {
    pub fn new(config: CardConfig, fonts: Arc<FontLibrary>) -> Self {
        let planner = LayoutPlanner::new(config.layout.clone());
        Self {
            config,
            fonts,
            planner,
        }
    }

    pub fn config(&self) -> &CardConfig {
        &self.config
    }

    pub fn fonts(&self) -> &Arc<FontLibrary> {
        &self.fonts
    }

    /// Composite `message` over `image`
    ///
    /// # Errors
    /// - [`CardError::InvalidImageDimensions`] for a zero-sized image
    /// - [`CardError::Measurement`] if the loaded face fails mid-request
    ///
    /// A missing or broken font is not an error: the fallback face is used.
    pub fn compose(&self, image: &RasterImage, message: &str) -> Result<RasterImage> {
        Ok(self.compose_detailed(image, message)?.image)
    }

    /// Like [`Compositor::compose`], for any decoded image
    pub fn compose_dynamic(&self, image: &DynamicImage, message: &str) -> Result<RasterImage> {
        self.compose(&image.to_rgba8(), message)
    }

    /// Composite and also report the plan, lines and font outcome
    pub fn compose_detailed(&self, image: &RasterImage, message: &str) -> Result<CardOutput> {
        let (width, height) = image.dimensions();
        let prepared = self.prepare(width, height, message)?;

        let renderer = CardRenderer::for_mode(prepared.mode, &self.config.style);
        let image = renderer.render(image, &prepared.plan, &prepared.lines, &prepared.face)?;

        Ok(CardOutput {
            image,
            font: prepared.face.name().to_string(),
            plan: prepared.plan,
            lines: prepared.lines,
            mode: prepared.mode,
            used_fallback: prepared.used_fallback,
        })
    }

    /// Resolve the layout for an image size without drawing anything
    pub fn layout(
        &self,
        width: u32,
        height: u32,
        message: &str,
    ) -> Result<(LayoutPlan, Vec<DisplayLine>, CardMode)> {
        let prepared = self.prepare(width, height, message)?;
        Ok((prepared.plan, prepared.lines, prepared.mode))
    }

    fn prepare(&self, width: u32, height: u32, message: &str) -> Result<Prepared> {
        // Checked before touching the font so a bad image costs no disk I/O
        if width == 0 || height == 0 {
            return Err(CardError::InvalidImageDimensions { width, height });
        }

        let resolved = self.fonts.resolve(self.config.font_path.as_deref());
        let used_fallback = resolved.is_fallback();
        let sizing = resolved.sizing();

        let plan = self.planner.plan(width, height, sizing)?;
        let mode = self.config.mode.resolve(sizing);
        let face = resolved.into_face(plan.font_size);

        let wrapped = wrap_message(message, &face, plan.max_line_width)?;
        let alignment = match mode {
            CardMode::Simple => Alignment::ClampedLeft,
            CardMode::Enhanced => Alignment::Centered,
        };
        let lines = plan.place(wrapped, &face, alignment)?;

        log::debug!(
            "Card {}x{}: {} lines, {:?} mode, fallback={}",
            width,
            height,
            lines.len(),
            mode,
            used_fallback
        );

        Ok(Prepared {
            plan,
            lines,
            mode,
            face,
            used_fallback,
        })
    }
}
