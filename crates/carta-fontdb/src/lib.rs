//! Where faces come from: font resolution for Carta
//!
//! A card must render even when its font does not. [`FontLibrary::resolve`]
//! tries the configured scalable font and, on any failure, hands back the
//! built-in [`FallbackFace`] with a warning in the log. Callers that want
//! the underlying error use [`FontLibrary::try_load`] instead.
//!
//! ## Memory Management
//!
//! Fonts keep their raw bytes and parse on demand, so a loaded font is one
//! allocation shared through `Arc`. The optional [`FontCache`] keeps those
//! `Arc`s around between calls; it is owned by the library, never global.

pub mod fallback;
pub mod font_cache;
pub mod scalable;

use std::path::Path;
use std::sync::Arc;

use carta_core::{
    error::Result,
    layout::FaceSizing,
    types::TextMask,
    Anchor, Color, RasterImage, TextFace,
};

pub use fallback::{FallbackFace, FALLBACK_LINE_HEIGHT, FALLBACK_SIZE};
pub use font_cache::{CacheStats, FontCache};
pub use scalable::{ScalableFace, ScalableFont, MAX_FONT_SIZE};

/// Environment variable enabling the font cache with the given capacity
pub const FONT_CACHE_ENV: &str = "CARTA_FONT_CACHE";

/// The outcome of font resolution, before a size is chosen
#[derive(Debug, Clone)]
pub enum ResolvedFont {
    Scalable(Arc<ScalableFont>),
    Fallback(FallbackFace),
}

impl ResolvedFont {
    /// What the planner needs to size this font
    pub fn sizing(&self) -> FaceSizing {
        match self {
            Self::Scalable(_) => FaceSizing::Scalable,
            Self::Fallback(_) => FallbackFace::sizing(),
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, Self::Fallback(_))
    }

    pub fn name(&self) -> &str {
        match self {
            Self::Scalable(font) => font.name(),
            Self::Fallback(face) => face.name(),
        }
    }

    /// Fix the pixel size; the fallback keeps its native size regardless
    pub fn into_face(self, size: f32) -> CardFace {
        match self {
            Self::Scalable(font) => CardFace::Scalable(font.sized(size)),
            Self::Fallback(face) => CardFace::Fallback(face),
        }
    }
}

/// A resolved font at its final size
#[derive(Debug, Clone)]
pub enum CardFace {
    Scalable(ScalableFace),
    Fallback(FallbackFace),
}

impl CardFace {
    fn inner(&self) -> &dyn TextFace {
        match self {
            Self::Scalable(face) => face,
            Self::Fallback(face) => face,
        }
    }
}

impl TextFace for CardFace {
    fn name(&self) -> &str {
        self.inner().name()
    }

    fn size(&self) -> f32 {
        self.inner().size()
    }

    fn measure(&self, text: &str) -> Result<f32> {
        self.inner().measure(text)
    }

    fn rasterize(&self, text: &str) -> Result<TextMask> {
        self.inner().rasterize(text)
    }

    fn draw(
        &self,
        canvas: &mut RasterImage,
        text: &str,
        x: f32,
        y: f32,
        anchor: Anchor,
        color: Color,
    ) -> Result<()> {
        self.inner().draw(canvas, text, x, y, anchor, color)
    }
}

/// Loads scalable fonts, optionally through a cache, and never fails to
/// produce something drawable
#[derive(Debug, Default)]
pub struct FontLibrary {
    cache: Option<FontCache>,
}

impl FontLibrary {
    /// A library that reads the font file on every call
    pub fn new() -> Self {
        Self { cache: None }
    }

    /// A library that keeps up to `capacity` parsed fonts
    pub fn with_cache(capacity: usize) -> Self {
        Self {
            cache: Some(FontCache::new(capacity)),
        }
    }

    /// Enable the cache when `CARTA_FONT_CACHE` holds a positive capacity
    pub fn from_env() -> Self {
        match std::env::var(FONT_CACHE_ENV) {
            Ok(value) => match value.trim().parse::<usize>() {
                Ok(0) => Self::new(),
                Ok(capacity) => {
                    log::debug!("Font cache enabled with capacity {capacity}");
                    Self::with_cache(capacity)
                },
                Err(_) => {
                    log::warn!("Ignoring {FONT_CACHE_ENV}={value:?}: not a number");
                    Self::new()
                },
            },
            Err(_) => Self::new(),
        }
    }

    pub fn cache(&self) -> Option<&FontCache> {
        self.cache.as_ref()
    }

    /// Load a scalable font, surfacing why it failed
    pub fn try_load(&self, path: impl AsRef<Path>) -> Result<Arc<ScalableFont>> {
        match &self.cache {
            Some(cache) => cache.get_or_load(path),
            None => Ok(Arc::new(ScalableFont::from_file(path)?)),
        }
    }

    /// Resolve the configured font, degrading to the fallback face
    pub fn resolve(&self, path: Option<&Path>) -> ResolvedFont {
        let Some(path) = path else {
            log::info!("No font configured; using the built-in fallback face");
            return ResolvedFont::Fallback(FallbackFace::new());
        };

        match self.try_load(path) {
            Ok(font) => {
                log::debug!("Loaded font {} from {}", font.name(), path.display());
                ResolvedFont::Scalable(font)
            },
            Err(e) => {
                log::warn!(
                    "Font {} unavailable ({}); using the built-in fallback face",
                    path.display(),
                    e
                );
                ResolvedFont::Fallback(FallbackFace::new())
            },
        }
    }
}
