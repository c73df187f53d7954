//! TUI command handler.

use actionarea_core::layout::Size;
use anyhow::{Context, Result};

use crate::tui;

/// Arguments for the TUI command.
#[derive(clap::Parser)]
pub struct TuiArgs {
    /// Theme to use (dark, light)
    #[arg(long)]
    pub theme: Option<String>,

    /// Pin the simulated display size (WIDTHxHEIGHT) instead of following the terminal
    #[arg(long)]
    pub size: Option<String>,
}

/// Run the TUI application.
pub async fn run(args: TuiArgs) -> Result<()> {
    let size = args
        .size
        .as_deref()
        .map(Size::parse)
        .transpose()
        .context("Invalid --size")?;

    let tui_args = tui::TuiArgs {
        theme: args.theme,
        size,
    };

    tui::run(tui_args).await
}
