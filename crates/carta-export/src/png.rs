//! PNG export and background decoding
//!
//! Uses the `image` crate for both directions.

use image::{ImageEncoder, RgbaImage};

use carta_core::error::{ExportError, Result};

/// Decode PNG or JPEG bytes into an RGBA raster
///
/// The format is sniffed from the bytes, not from any file name.
pub fn decode_image(bytes: &[u8]) -> Result<RgbaImage> {
    let image = image::load_from_memory(bytes)
        .map_err(|e| ExportError::Decode(format!("Unsupported or corrupt image: {}", e)))?;

    log::debug!(
        "Decoded {}x{} background ({} bytes)",
        image.width(),
        image.height(),
        bytes.len()
    );

    Ok(image.to_rgba8())
}

/// Encode an RGBA raster as PNG
///
/// Returns a valid PNG with proper IHDR, IDAT, and IEND chunks.
pub fn encode_png(image: &RgbaImage) -> Result<Vec<u8>> {
    let mut png_data = Vec::new();
    let encoder = image::codecs::png::PngEncoder::new_with_quality(
        &mut png_data,
        image::codecs::png::CompressionType::Default,
        image::codecs::png::FilterType::Sub,
    );

    encoder
        .write_image(
            image.as_raw(),
            image.width(),
            image.height(),
            image::ExtendedColorType::Rgba8,
        )
        .map_err(|e| ExportError::Encode(format!("PNG encoding failed: {}", e)))?;

    Ok(png_data)
}

/// PNG exporter for finished cards
///
/// # Examples
///
/// ```
/// use carta_export::PngExporter;
/// let exporter = PngExporter::new();
/// assert_eq!(exporter.extension(), "png");
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct PngExporter;

impl PngExporter {
    pub fn new() -> Self {
        Self
    }

    pub fn export(&self, image: &RgbaImage) -> Result<Vec<u8>> {
        encode_png(image)
    }

    pub fn extension(&self) -> &'static str {
        "png"
    }

    pub fn mime_type(&self) -> &'static str {
        "image/png"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use carta_core::CardError;
    use image::Rgba;

    #[test]
    fn test_png_exporter_metadata() {
        let exporter = PngExporter::new();
        assert_eq!(exporter.extension(), "png");
        assert_eq!(exporter.mime_type(), "image/png");
    }

    #[test]
    fn test_png_signature() {
        let image = RgbaImage::from_pixel(2, 2, Rgba([255, 0, 0, 255]));
        let png = encode_png(&image).unwrap();
        assert_eq!(&png[..8], b"\x89PNG\r\n\x1a\n");
    }

    #[test]
    fn test_png_preserves_pixels() {
        let mut image = RgbaImage::from_pixel(3, 2, Rgba([10, 20, 30, 255]));
        image.put_pixel(2, 1, Rgba([200, 100, 50, 128]));

        let decoded = decode_image(&encode_png(&image).unwrap()).unwrap();
        assert_eq!(decoded, image);
    }

    #[test]
    fn test_garbage_is_decode_error() {
        assert!(matches!(
            decode_image(b"not an image at all"),
            Err(CardError::Export(ExportError::Decode(_)))
        ));
    }
}
