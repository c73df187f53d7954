//! Action Area CLI - adaptive master/detail presentation in the terminal
//!
//! Hosts the presentation controller in an interactive dashboard whose
//! layout follows the terminal size, and runs scripted scenarios against
//! it.
//!
//! ## Quick Start
//!
//! ```bash
//! # Interactive dashboard
//! actionarea tui
//!
//! # Replay a scenario and print the final state as JSON
//! actionarea run survey.toml --json
//! ```

#![allow(clippy::doc_markdown)]
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::unused_async)]

use anyhow::Result;
use clap::Parser;

mod commands;
mod host;
mod scenario;
mod tui;

use commands::{Cli, Command};

#[tokio::main]
async fn main() -> Result<()> {
    init_logging();

    let cli = Cli::parse();

    match cli.command {
        Command::Tui(args) => commands::tui::run(args).await,
        Command::Run(args) => commands::run::run(args).await,
        Command::Config(args) => commands::config::run(args).await,
        Command::Completions(args) => commands::completions::run(args.action),
    }
}

fn init_logging() {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn,actionarea=info,actionarea_core=info"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).without_time())
        .with(filter)
        .init();
}
