//! Live dashboard around a presentation controller.
//!
//! Keys present and dismiss units, flip the interaction mode and rotate
//! the display; the terminal size picks the layout unless `--size` pins
//! it. Rendering goes through `ratatui` on a `crossterm` backend. Tracing
//! output is muted while the dashboard runs; outcomes go to its log panel.

#![allow(
    clippy::use_self,
    clippy::missing_const_for_fn,
    clippy::match_same_arms,
    clippy::option_if_let_else,
    clippy::inefficient_to_string
)]

pub mod action;
pub mod app;
pub mod components;
pub mod content;
pub mod event;
pub mod layout;
pub mod state;
pub mod theme;

pub use app::{App, TuiArgs};

/// Start the dashboard and block until the user quits.
pub async fn run(args: TuiArgs) -> anyhow::Result<()> {
    // stderr output would tear the alternate screen
    let _quiet = silence_stderr_logs();
    App::new(args)?.run().await
}

fn silence_stderr_logs() -> tracing::subscriber::DefaultGuard {
    use tracing_subscriber::layer::SubscriberExt;

    let silent = tracing_subscriber::registry().with(tracing_subscriber::filter::LevelFilter::OFF);
    tracing::subscriber::set_default(silent)
}
