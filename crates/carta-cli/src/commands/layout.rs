//! Layout command implementation
//!
//! Prints the plan and placed lines as JSON without rendering anything.

use serde::Serialize;

use carta::{
    error::{CardError, Result},
    layout::{DisplayLine, LayoutPlan},
    CardMode,
};

use super::{build_compositor, read_message};
use crate::cli::LayoutArgs;

#[derive(Serialize)]
struct LayoutReport {
    mode: CardMode,
    plan: LayoutPlan,
    lines: Vec<DisplayLine>,
}

pub fn run(args: &LayoutArgs) -> Result<()> {
    let message = read_message(args.message.as_deref(), args.card.message_file.as_deref())?;
    let compositor = build_compositor(&args.card)?;

    let (plan, lines, mode) = compositor.layout(args.width, args.height, &message)?;
    let report = LayoutReport { mode, plan, lines };

    let json = serde_json::to_string_pretty(&report)
        .map_err(|e| CardError::Config(format!("Cannot serialize layout: {}", e)))?;
    println!("{}", json);

    Ok(())
}
