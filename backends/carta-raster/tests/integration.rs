//! Integration tests for the line rasterizer
//!
//! Tests that need a real outline font look in `test-fonts/` at the
//! workspace root (or `CARTA_TEST_FONT`) and skip when nothing is there.

use std::fs;
use std::path::PathBuf;

use carta_core::types::PositionedGlyph;
use carta_raster::LineRasterizer;
use skrifa::instance::{LocationRef, Size};
use skrifa::{FontRef, GlyphId, MetadataProvider};

fn test_font_path() -> PathBuf {
    if let Ok(path) = std::env::var("CARTA_TEST_FONT") {
        return PathBuf::from(path);
    }
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.pop(); // backends
    path.pop(); // root
    path.push("test-fonts");
    path.push("NotoSans-Regular.ttf");
    path
}

fn load_font() -> Option<Vec<u8>> {
    let path = test_font_path();
    if !path.exists() {
        eprintln!("Skipping test: {} not found", path.display());
        return None;
    }
    fs::read(path).ok()
}

/// Lay out `text` left to right with unshaped advances
fn layout(data: &[u8], text: &str, size: f32) -> (Vec<PositionedGlyph>, f32) {
    let font = FontRef::new(data).unwrap();
    let charmap = font.charmap();
    let metrics = font.glyph_metrics(Size::new(size), LocationRef::default());

    let mut x = 0.0;
    let mut glyphs = Vec::new();
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
    (glyphs, x)
}

#[test]
fn test_invalid_font_data_is_rejected() {
    assert!(LineRasterizer::new(b"not a font", 0, 40.0).is_err());
}

#[test]
fn test_line_mask_has_ink() {
    let Some(data) = load_font() else {
        return;
    };
    let (glyphs, advance) = layout(&data, "Merry Christmas", 40.0);
    let rasterizer = LineRasterizer::new(&data, 0, 40.0).unwrap();
    let mask = rasterizer.rasterize(&glyphs, advance).unwrap();

    assert!(!mask.is_blank());
    assert_eq!(mask.coverage.len(), (mask.width * mask.height) as usize);
    assert!(mask.coverage.iter().any(|&c| c == 255), "expected solid stems");
    assert!(mask.baseline > 0 && mask.baseline < mask.height as i32);
    assert!((mask.width as f32) >= advance * 0.8);
    assert_eq!(mask.advance, advance);
}

#[test]
fn test_spaces_rasterize_blank() {
    let Some(data) = load_font() else {
        return;
    };
    let (glyphs, advance) = layout(&data, "   ", 40.0);
    let rasterizer = LineRasterizer::new(&data, 0, 40.0).unwrap();
    let mask = rasterizer.rasterize(&glyphs, advance).unwrap();

    assert!(mask.is_blank());
    assert!(advance > 0.0, "spaces still advance the pen");
}

#[test]
fn test_mask_scales_with_size() {
    let Some(data) = load_font() else {
        return;
    };
    let (small_glyphs, small_adv) = layout(&data, "Hello", 24.0);
    let (large_glyphs, large_adv) = layout(&data, "Hello", 72.0);

    let small = LineRasterizer::new(&data, 0, 24.0)
        .unwrap()
        .rasterize(&small_glyphs, small_adv)
        .unwrap();
    let large = LineRasterizer::new(&data, 0, 72.0)
        .unwrap()
        .rasterize(&large_glyphs, large_adv)
        .unwrap();

    assert!(large.height > small.height * 2);
    assert!(large.width > small.width * 2);
}
