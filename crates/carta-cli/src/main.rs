//! Carta CLI - greeting cards from the command line

mod cli;
mod commands;

use clap::Parser;

use cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();

    let options = match &cli.command {
        Commands::Render(args) => &args.card,
        Commands::Layout(args) => &args.card,
    };
    init_logging(options.quiet, options.verbose);

    let result = match &cli.command {
        Commands::Render(args) => commands::render::run(args),
        Commands::Layout(args) => commands::layout::run(args),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// `RUST_LOG` wins; otherwise `--verbose` and `--quiet` pick the default
fn init_logging(quiet: bool, verbose: bool) {
    let default_level = if verbose {
        "debug"
    } else if quiet {
        "error"
    } else {
        "warn"
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();
}
