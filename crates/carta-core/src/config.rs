//! Compositor configuration
//!
//! Every field has a default, so an empty JSON object is a valid config.
//! Two environment variables override the file when
//! [`CardConfig::with_env_overrides`] is applied:
//!
//! ```bash
//! CARTA_FONT=/usr/share/fonts/NotoSans-Regular.ttf CARTA_MODE=enhanced ./my_app
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::{
    error::{CardError, Result},
    layout::LayoutConfig,
    Color, ModeSelection,
};

/// Environment variable naming the scalable font file
pub const FONT_ENV: &str = "CARTA_FONT";

/// Environment variable selecting the card mode
pub const MODE_ENV: &str = "CARTA_MODE";

/// Colors and opacities of the band and text passes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StyleConfig {
    pub band_color: Color,
    /// Constant band opacity in simple mode
    pub flat_alpha: f32,
    /// Band opacity at the bottom edge in enhanced mode
    pub gradient_max_alpha: f32,
    pub text_color: Color,
    pub shadow_color: Color,
    pub shadow_alpha: f32,
    pub shadow_offset: (i32, i32),
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            band_color: Color::black(),
            flat_alpha: 0.6,
            gradient_max_alpha: 0.7,
            text_color: Color::white(),
            shadow_color: Color::black(),
            shadow_alpha: 0.5,
            shadow_offset: (2, 2),
        }
    }
}

/// Everything a compositor needs besides the image and the message
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CardConfig {
    /// Scalable font file; `None` or an unreadable path means the fallback
    pub font_path: Option<PathBuf>,
    pub mode: ModeSelection,
    pub layout: LayoutConfig,
    pub style: StyleConfig,
}

impl CardConfig {
    /// Read a JSON config file
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
            .map_err(|e| CardError::Config(format!("{}: {}", path.display(), e)))
    }

    pub fn from_json_str(text: &str) -> Result<Self> {
        serde_json::from_str(text).map_err(|e| CardError::Config(e.to_string()))
    }

    /// Apply `CARTA_FONT` and `CARTA_MODE` on top of this config
    pub fn with_env_overrides(self) -> Result<Self> {
        self.with_overrides(
            std::env::var(FONT_ENV).ok().as_deref(),
            std::env::var(MODE_ENV).ok().as_deref(),
        )
    }

    fn with_overrides(mut self, font: Option<&str>, mode: Option<&str>) -> Result<Self> {
        if let Some(font) = font.filter(|f| !f.trim().is_empty()) {
            log::debug!("Font path overridden via {FONT_ENV}: {font}");
            self.font_path = Some(PathBuf::from(font));
        }
        if let Some(mode) = mode.filter(|m| !m.trim().is_empty()) {
            self.mode = mode.parse()?;
        }
        Ok(self)
    }
}
