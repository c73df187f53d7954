//! TUI application state.

use actionarea_core::layout::Size;
use chrono::{DateTime, Utc};

/// Dashboard state that is not owned by the controller.
#[derive(Debug, Clone, Default)]
pub struct AppState {
    /// Whether the log panel is visible
    pub log_visible: bool,
    /// Whether the help overlay is visible
    pub help_visible: bool,
    /// Log entries, oldest first
    pub log: Vec<LogEntry>,
    /// Terminal size (width, height)
    pub size: (u16, u16),
    /// Display size fixed on the command line
    pub pinned: Option<Size>,
    /// Whether the display is simulated as rotated
    pub rotated: bool,
    /// Master units created so far
    pub masters_created: usize,
    /// Detail units created so far
    pub details_created: usize,
}

impl AppState {
    /// Size the controller lays out for.
    pub fn display_size(&self) -> Size {
        let base = self
            .pinned
            .unwrap_or_else(|| Size::new(self.size.0, self.size.1));
        if self.rotated {
            base.rotated()
        } else {
            base
        }
    }
}

/// One line of the log panel.
#[derive(Debug, Clone)]
pub struct LogEntry {
    /// When the entry was recorded
    pub timestamp: DateTime<Utc>,
    /// Severity
    pub level: LogLevel,
    /// Message text
    pub message: String,
}

/// Log severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Informational
    Info,
    /// Refused or ignored request
    Warn,
    /// Failure
    Error,
}

impl LogLevel {
    /// Short label.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Info => "INFO",
            Self::Warn => "WARN",
            Self::Error => "ERROR",
        }
    }
}
