//! `data:` URLs
//!
//! Parsing is deliberately loose: everything up to the first comma is
//! treated as the header and ignored, so `data:image/jpeg;base64,...`,
//! `data:image/png;base64,...` and even a bare `,<base64>` all decode.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use image::RgbaImage;

use carta_core::error::{ExportError, Result};

use crate::png::{decode_image, encode_png};

const PNG_PREFIX: &str = "data:image/png;base64,";

/// Decode the base64 payload after the first comma
pub fn parse_data_url(url: &str) -> Result<Vec<u8>> {
    let (_, payload) = url
        .split_once(',')
        .ok_or_else(|| ExportError::DataUrl("missing ',' separator".into()))?;

    STANDARD
        .decode(payload.trim())
        .map_err(|e| ExportError::DataUrl(format!("invalid base64 payload: {}", e)).into())
}

/// Parse a data URL and decode the image inside it
pub fn decode_data_url_image(url: &str) -> Result<RgbaImage> {
    decode_image(&parse_data_url(url)?)
}

/// Encode as PNG and wrap in a `data:image/png;base64,` URL
pub fn to_png_data_url(image: &RgbaImage) -> Result<String> {
    let png = encode_png(image)?;
    let mut url = String::with_capacity(PNG_PREFIX.len() + png.len() * 4 / 3 + 4);
    url.push_str(PNG_PREFIX);
    STANDARD.encode_string(&png, &mut url);
    Ok(url)
}
