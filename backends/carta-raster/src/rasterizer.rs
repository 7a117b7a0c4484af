//! Where outlines meet pixels
//!
//! skrifa extracts each glyph outline at the requested pixel size. A first
//! pass measures the ink bounds of the whole run so the mask is exactly as
//! large as it needs to be. A second pass flattens the outlines into the
//! coverage accumulator.

use carta_core::{
    error::{MeasureError, Result},
    types::{PositionedGlyph, TextMask},
};
use skrifa::instance::{LocationRef, Size};
use skrifa::outline::{DrawSettings, OutlineGlyphCollection, OutlinePen};
use skrifa::{FontRef, GlyphId, MetadataProvider};

use crate::accumulator::Accumulator;
use crate::curves::{flatten_cubic, flatten_quadratic, Point};

/// Masks larger than this in either direction are refused
pub const MAX_MASK_DIMENSION: u32 = 16384;

/// Rasterizes runs of positioned glyphs from one font at one size
///
/// ```ignore
/// let rasterizer = LineRasterizer::new(font_data, 0, 40.0)?;
/// let mask = rasterizer.rasterize(&glyphs, advance)?;
/// ```
pub struct LineRasterizer<'a> {
    outlines: OutlineGlyphCollection<'a>,
    size: f32,
}

impl<'a> LineRasterizer<'a> {
    pub fn new(font_data: &'a [u8], face_index: u32, size: f32) -> Result<Self> {
        let font = FontRef::from_index(font_data, face_index)
            .map_err(|e| MeasureError::InvalidFont(e.to_string()))?;

        Ok(Self {
            outlines: font.outline_glyphs(),
            size,
        })
    }

    fn settings(&self) -> DrawSettings<'static> {
        DrawSettings::unhinted(Size::new(self.size), LocationRef::default())
    }

    /// Render the run into one mask whose pen origin is the run's start
    pub fn rasterize(&self, glyphs: &[PositionedGlyph], advance: f32) -> Result<TextMask> {
        let mut bounds = BoundsPen::default();
        for glyph in glyphs {
            let Some(outline) = self.outlines.get(GlyphId::new(glyph.id)) else {
                continue;
            };
            bounds.offset_x = glyph.x;
            outline
                .draw(self.settings(), &mut bounds)
                .map_err(|e| MeasureError::Rasterize(format!("glyph {}: {:?}", glyph.id, e)))?;
        }

        if !bounds.has_points {
            // Spaces only, or glyphs with no outline: still advances the pen
            return Ok(TextMask::blank(advance));
        }

        // One pixel of slack on every side for antialiased edges
        let left = bounds.x_min.floor() as i32 - 1;
        let right = bounds.x_max.ceil() as i32 + 1;
        let top = bounds.y_max.ceil() as i32 + 1;
        let bottom = bounds.y_min.floor() as i32 - 1;

        let width = (right - left).max(1) as u32;
        let height = (top - bottom).max(1) as u32;
        if width > MAX_MASK_DIMENSION || height > MAX_MASK_DIMENSION {
            return Err(MeasureError::Rasterize(format!(
                "Line mask too large: {width}x{height} (max {MAX_MASK_DIMENSION})"
            ))
            .into());
        }

        let mut pen = CoveragePen {
            acc: Accumulator::new(width as usize, height as usize),
            offset_x: 0.0,
            origin_x: -left as f32,
            baseline: top as f32,
            start: Point::new(0.0, 0.0),
            current: Point::new(0.0, 0.0),
        };

        for glyph in glyphs {
            let Some(outline) = self.outlines.get(GlyphId::new(glyph.id)) else {
                continue;
            };
            pen.offset_x = glyph.x;
            outline
                .draw(self.settings(), &mut pen)
                .map_err(|e| MeasureError::Rasterize(format!("glyph {}: {:?}", glyph.id, e)))?;
        }

        log::trace!(
            "Rasterized {} glyphs at {:.1}px into {}x{} mask",
            glyphs.len(),
            self.size,
            width,
            height
        );

        Ok(TextMask {
            width,
            height,
            left,
            baseline: top,
            advance,
            coverage: pen.acc.into_coverage(),
        })
    }
}

/// Ink extent of a run in font space (y up), pen origin at 0
#[derive(Default)]
struct BoundsPen {
    offset_x: f32,
    x_min: f32,
    y_min: f32,
    x_max: f32,
    y_max: f32,
    has_points: bool,
}

impl BoundsPen {
    fn update(&mut self, x: f32, y: f32) {
        let x = x + self.offset_x;
        if self.has_points {
            self.x_min = self.x_min.min(x);
            self.y_min = self.y_min.min(y);
            self.x_max = self.x_max.max(x);
            self.y_max = self.y_max.max(y);
        } else {
            self.x_min = x;
            self.x_max = x;
            self.y_min = y;
            self.y_max = y;
            self.has_points = true;
        }
    }
}

impl OutlinePen for BoundsPen {
    fn move_to(&mut self, x: f32, y: f32) {
        self.update(x, y);
    }

    fn line_to(&mut self, x: f32, y: f32) {
        self.update(x, y);
    }

    fn quad_to(&mut self, cx0: f32, cy0: f32, x: f32, y: f32) {
        self.update(cx0, cy0);
        self.update(x, y);
    }

    fn curve_to(&mut self, cx0: f32, cy0: f32, cx1: f32, cy1: f32, x: f32, y: f32) {
        self.update(cx0, cy0);
        self.update(cx1, cy1);
        self.update(x, y);
    }

    fn close(&mut self) {}
}

/// Flips font space into mask space and feeds edges to the accumulator
struct CoveragePen {
    acc: Accumulator,
    offset_x: f32,
    origin_x: f32,
    baseline: f32,
    start: Point,
    current: Point,
}

impl CoveragePen {
    #[inline]
    fn map(&self, x: f32, y: f32) -> Point {
        Point::new(x + self.offset_x + self.origin_x, self.baseline - y)
    }
}

impl OutlinePen for CoveragePen {
    fn move_to(&mut self, x: f32, y: f32) {
        // Contours are closed implicitly if the font forgot to
        if self.current != self.start {
            self.acc.line(self.current, self.start);
        }
        let p = self.map(x, y);
        self.start = p;
        self.current = p;
    }

    fn line_to(&mut self, x: f32, y: f32) {
        let p = self.map(x, y);
        self.acc.line(self.current, p);
        self.current = p;
    }

    fn quad_to(&mut self, cx0: f32, cy0: f32, x: f32, y: f32) {
        let p1 = self.map(cx0, cy0);
        let p2 = self.map(x, y);
        let mut from = self.current;
        let acc = &mut self.acc;
        flatten_quadratic(from, p1, p2, &mut |to| {
            acc.line(from, to);
            from = to;
        });
        self.current = p2;
    }

    fn curve_to(&mut self, cx0: f32, cy0: f32, cx1: f32, cy1: f32, x: f32, y: f32) {
        let p1 = self.map(cx0, cy0);
        let p2 = self.map(cx1, cy1);
        let p3 = self.map(x, y);
        let mut from = self.current;
        let acc = &mut self.acc;
        flatten_cubic(from, p1, p2, p3, &mut |to| {
            acc.line(from, to);
            from = to;
        });
        self.current = p3;
    }

    fn close(&mut self) {
        if self.current != self.start {
            self.acc.line(self.current, self.start);
        }
        self.current = self.start;
    }
}
