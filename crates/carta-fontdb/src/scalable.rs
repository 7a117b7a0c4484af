//! Outline fonts loaded from disk
//!
//! The raw bytes are kept and parsed on demand, so a [`ScalableFont`] is
//! cheap to share behind an `Arc` and safe to cache. Sizing happens later:
//! [`ScalableFont::sized`] pairs the font with the planner's pixel size.

use std::fs;
use std::path::Path;
use std::sync::Arc;

use read_fonts::{FontRef as ReadFontRef, TableProvider};
use skrifa::instance::{LocationRef, Size};
use skrifa::{FontRef, GlyphId, MetadataProvider};

use carta_core::{
    error::{FontLoadError, MeasureError, Result},
    types::{PositionedGlyph, TextMask},
    TextFace,
};
use carta_raster::LineRasterizer;

/// Maximum font file size (50MB) to prevent resource exhaustion.
pub const MAX_FONT_SIZE: u64 = 50 * 1024 * 1024;

/// A validated outline font, not yet tied to a size
pub struct ScalableFont {
    name: String,
    data: Vec<u8>,
    face_index: u32,
    units_per_em: u16,
}

impl std::fmt::Debug for ScalableFont {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScalableFont")
            .field("name", &self.name)
            .field("bytes", &self.data.len())
            .field("face_index", &self.face_index)
            .field("units_per_em", &self.units_per_em)
            .finish()
    }
}

impl ScalableFont {
    /// Opens a font file from disk
    ///
    /// # Errors
    /// - [`FontLoadError::FileNotFound`] when the file is missing or unreadable
    /// - [`FontLoadError::TooLarge`] above [`MAX_FONT_SIZE`]
    /// - [`FontLoadError::InvalidData`] or [`FontLoadError::MissingTable`]
    ///   when the bytes are not a usable outline font
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let not_found = || FontLoadError::FileNotFound(path.display().to_string());

        let meta = fs::metadata(path).map_err(|_| not_found())?;
        if !meta.is_file() {
            return Err(not_found().into());
        }
        if meta.len() > MAX_FONT_SIZE {
            return Err(FontLoadError::TooLarge {
                size: meta.len(),
                max: MAX_FONT_SIZE,
            }
            .into());
        }

        let data = fs::read(path).map_err(|_| not_found())?;
        let mut font = Self::from_data(data)?;
        if let Some(stem) = path.file_stem() {
            font.name = stem.to_string_lossy().into_owned();
        }
        Ok(font)
    }

    /// Validates raw font bytes
    pub fn from_data(data: Vec<u8>) -> Result<Self> {
        Self::from_data_index(data, 0)
    }

    /// Validates one face of a font collection
    pub fn from_data_index(data: Vec<u8>, face_index: u32) -> Result<Self> {
        let font =
            ReadFontRef::from_index(&data, face_index).map_err(|_| FontLoadError::InvalidData)?;

        let units_per_em = font
            .head()
            .map_err(|_| FontLoadError::MissingTable("head"))?
            .units_per_em();
        if units_per_em == 0 {
            return Err(FontLoadError::InvalidData.into());
        }
        font.cmap().map_err(|_| FontLoadError::MissingTable("cmap"))?;
        font.hmtx().map_err(|_| FontLoadError::MissingTable("hmtx"))?;

        let has_outlines = font.glyf().is_ok() || font.cff().is_ok() || font.cff2().is_ok();
        if !has_outlines {
            return Err(FontLoadError::MissingTable("glyf").into());
        }

        Ok(Self {
            name: String::from("scalable"),
            data,
            face_index,
            units_per_em,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn face_index(&self) -> u32 {
        self.face_index
    }

    pub fn units_per_em(&self) -> u16 {
        self.units_per_em
    }

    /// Pair the font with a pixel size
    pub fn sized(self: &Arc<Self>, size: f32) -> ScalableFace {
        ScalableFace {
            font: Arc::clone(self),
            size,
        }
    }
}

/// A scalable font at one pixel size
#[derive(Debug, Clone)]
pub struct ScalableFace {
    font: Arc<ScalableFont>,
    size: f32,
}

impl ScalableFace {
    pub fn font(&self) -> &Arc<ScalableFont> {
        &self.font
    }

    fn font_ref(&self) -> Result<FontRef<'_>> {
        FontRef::from_index(self.font.data(), self.font.face_index())
            .map_err(|e| MeasureError::InvalidFont(e.to_string()).into())
    }

    /// Map characters to glyphs and accumulate their advances
    ///
    /// No shaping: one character, one glyph, left to right. Unmapped
    /// characters fall back to `.notdef`.
    fn layout(&self, text: &str) -> Result<(Vec<PositionedGlyph>, f32)> {
        let font = self.font_ref()?;
        let charmap = font.charmap();
        let metrics = font.glyph_metrics(Size::new(self.size), LocationRef::default());

        let mut x = 0.0;
        let mut glyphs = Vec::with_capacity(text.len());
        for ch in text.chars() {
            let gid = charmap.map(ch).unwrap_or(GlyphId::NOTDEF);
            let advance = metrics.advance_width(gid).unwrap_or(0.0);
            glyphs.push(PositionedGlyph {
                id: gid.to_u32(),
                x,
                advance,
            });
            x += advance;
        }

        Ok((glyphs, x))
    }
}

impl TextFace for ScalableFace {
    fn name(&self) -> &str {
        self.font.name()
    }

    fn size(&self) -> f32 {
        self.size
    }

    fn measure(&self, text: &str) -> Result<f32> {
        Ok(self.layout(text)?.1)
    }

    fn rasterize(&self, text: &str) -> Result<TextMask> {
        let (glyphs, advance) = self.layout(text)?;
        LineRasterizer::new(self.font.data(), self.font.face_index(), self.size)?
            .rasterize(&glyphs, advance)
    }
}
