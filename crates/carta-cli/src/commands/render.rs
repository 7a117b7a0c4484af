//! Render command implementation

use std::path::Path;

use carta::{
    error::{CardError, Result},
    export::{decode_data_url_image, decode_image, encode_png, to_png_data_url},
    RasterImage,
};

use super::{build_compositor, read_message};
use crate::cli::RenderArgs;

pub fn run(args: &RenderArgs) -> Result<()> {
    let message = read_message(args.message.as_deref(), args.card.message_file.as_deref())?;
    let background = load_background(&args.background)?;
    let compositor = build_compositor(&args.card)?;

    let card = compositor.compose_detailed(&background, &message)?;

    if args.data_url {
        println!("{}", to_png_data_url(&card.image)?);
    } else {
        let png = encode_png(&card.image)?;
        std::fs::write(&args.output, &png)?;
        log::info!(
            "Wrote {} ({} bytes, {}x{})",
            args.output.display(),
            png.len(),
            card.image.width(),
            card.image.height()
        );
    }

    if !args.card.quiet {
        eprintln!(
            "Rendered {}x{} card: {} line(s), {:?} mode, font {}{}",
            card.image.width(),
            card.image.height(),
            card.lines.len(),
            card.mode,
            card.font,
            if card.used_fallback { " (fallback)" } else { "" }
        );
        if !args.data_url {
            eprintln!("Wrote {}", args.output.display());
        }
    }

    Ok(())
}

/// A `data:` URL or a path to a PNG/JPEG file
fn load_background(source: &str) -> Result<RasterImage> {
    if source.starts_with("data:") {
        return decode_data_url_image(source);
    }

    let path = Path::new(source);
    let bytes = std::fs::read(path).map_err(|e| {
        CardError::Config(format!("Cannot read background {}: {}", path.display(), e))
    })?;
    decode_image(&bytes)
}
