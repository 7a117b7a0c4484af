//! CLI argument definitions using Clap v4

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use carta::ModeSelection;

/// Carta - greeting cards from the command line
#[derive(Parser, Debug)]
#[command(name = "carta")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Render a message onto a background image
    #[command(alias = "r")]
    Render(RenderArgs),

    /// Print the planned layout for an image size as JSON
    #[command(alias = "l")]
    Layout(LayoutArgs),
}

/// Card mode as accepted on the command line
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ModeArg {
    /// Enhanced with a scalable font, simple with the fallback
    Auto,
    /// Flat band, no shadow
    Simple,
    /// Gradient band and drop shadow
    Enhanced,
}

impl From<ModeArg> for ModeSelection {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Auto => ModeSelection::Auto,
            ModeArg::Simple => ModeSelection::Simple,
            ModeArg::Enhanced => ModeSelection::Enhanced,
        }
    }
}

/// Options shared by every command that lays out a message
#[derive(Args, Debug)]
pub struct CardOptions {
    /// Read the message from a file instead
    #[arg(short = 'M', long = "message-file", conflicts_with = "message")]
    pub message_file: Option<PathBuf>,

    /// Scalable font file (.ttf, .otf); the built-in face is used if it fails to load
    #[arg(short = 'f', long = "font")]
    pub font: Option<PathBuf>,

    /// Card mode
    #[arg(long = "mode", value_enum)]
    pub mode: Option<ModeArg>,

    /// JSON configuration file
    #[arg(short = 'c', long = "config")]
    pub config: Option<PathBuf>,

    /// Silent mode (errors only)
    #[arg(short = 'q', long = "quiet")]
    pub quiet: bool,

    /// Verbose output
    #[arg(long = "verbose")]
    pub verbose: bool,
}

/// Arguments for the render command
#[derive(Parser, Debug)]
pub struct RenderArgs {
    /// Background image: a PNG/JPEG path or a data: URL
    pub background: String,

    /// Message to overlay (reads stdin if neither this nor --message-file is given)
    pub message: Option<String>,

    #[command(flatten)]
    pub card: CardOptions,

    /// Output PNG path
    #[arg(short = 'o', long = "output", default_value = "card.png")]
    pub output: PathBuf,

    /// Print a data:image/png;base64 URL to stdout instead of writing a file
    #[arg(long = "data-url")]
    pub data_url: bool,
}

/// Arguments for the layout command
#[derive(Parser, Debug)]
pub struct LayoutArgs {
    /// Image width in pixels
    #[arg(short = 'W', long = "width")]
    pub width: u32,

    /// Image height in pixels
    #[arg(short = 'H', long = "height")]
    pub height: u32,

    /// Message to lay out (reads stdin if neither this nor --message-file is given)
    pub message: Option<String>,

    #[command(flatten)]
    pub card: CardOptions,
}
