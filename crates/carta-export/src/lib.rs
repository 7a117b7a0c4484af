//! Getting images in and cards out
//!
//! Backgrounds usually arrive as PNG or JPEG bytes, often wrapped in a
//! `data:image/...;base64,` URL. Finished cards leave as PNG, either raw or
//! wrapped the same way.

pub mod data_url;
pub mod png;

pub use data_url::{decode_data_url_image, parse_data_url, to_png_data_url};
pub use png::{decode_image, encode_png, PngExporter};
