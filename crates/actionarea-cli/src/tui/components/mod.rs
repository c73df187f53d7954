//! TUI reusable components.

mod action_bar;
mod help_overlay;
mod pane;
mod status_bar;

pub use action_bar::ActionBarWidget;
pub use help_overlay::HelpOverlay;
pub use pane::Pane;
pub use status_bar::StatusBar;
