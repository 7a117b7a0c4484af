//! Command implementations

pub mod layout;
pub mod render;

use std::io::{self, Read};
use std::path::Path;
use std::sync::Arc;

use carta::{
    error::{CardError, Result},
    fontdb::FontLibrary,
    CardConfig, Compositor,
};

use crate::cli::CardOptions;

/// Config file, then environment, then command-line flags
pub fn load_config(options: &CardOptions) -> Result<CardConfig> {
    let config = match &options.config {
        Some(path) => CardConfig::from_json_file(path)?,
        None => CardConfig::default(),
    };
    let mut config = config.with_env_overrides()?;

    if let Some(font) = &options.font {
        config.font_path = Some(font.clone());
    }
    if let Some(mode) = options.mode {
        config.mode = mode.into();
    }
    log::debug!("Resolved card config: {:?}", config);
    Ok(config)
}

pub fn build_compositor(options: &CardOptions) -> Result<Compositor> {
    Ok(Compositor::new(
        load_config(options)?,
        Arc::new(FontLibrary::from_env()),
    ))
}

/// Positional message, then `--message-file`, then stdin
pub fn read_message(message: Option<&str>, message_file: Option<&Path>) -> Result<String> {
    if let Some(message) = message {
        return Ok(message.to_string());
    }
    if let Some(path) = message_file {
        return std::fs::read_to_string(path).map_err(|e| {
            CardError::Config(format!("Cannot read message file {}: {}", path.display(), e))
        });
    }

    let mut buffer = String::new();
    io::stdin().read_to_string(&mut buffer)?;
    // A trailing newline from `echo` is not a blank paragraph
    Ok(buffer.trim_end_matches(['\r', '\n']).to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use carta::ModeSelection;

    fn options() -> CardOptions {
        CardOptions {
            message_file: None,
            font: None,
            mode: None,
            config: None,
            quiet: false,
            verbose: false,
        }
    }

    #[test]
    fn test_positional_message_wins() {
        let message = read_message(Some("Hello"), Some(Path::new("/no/such/file"))).unwrap();
        assert_eq!(message, "Hello");
    }

    #[test]
    fn test_missing_message_file_is_config_error() {
        assert!(matches!(
            read_message(None, Some(Path::new("/no/such/file"))),
            Err(CardError::Config(_))
        ));
    }

    #[test]
    fn test_flags_override_config() {
        let mut opts = options();
        opts.font = Some("/fonts/Card.ttf".into());
        opts.mode = Some(crate::cli::ModeArg::Simple);

        let config = load_config(&opts).unwrap();
        assert_eq!(config.font_path, Some(std::path::PathBuf::from("/fonts/Card.ttf")));
        assert_eq!(config.mode, ModeSelection::Simple);
    }

    #[test]
    fn test_missing_config_file_fails() {
        let mut opts = options();
        opts.config = Some("/no/such/carta.json".into());
        assert!(load_config(&opts).is_err());
    }
}
