//! Single-region layout for a collapsed controller.
//!
//! Layout structure:
//! ```text
//! ┌────────────────────────────────┐
//! │ Header                         │
//! ├────────────────────────────────┤
//! │ Content (merged stack)         │
//! │                                │
//! │ [action bar]                   │
//! ├────────────────────────────────┤
//! │ Log? (if visible)              │
//! ├────────────────────────────────┤
//! │ Status                         │
//! └────────────────────────────────┘
//! ```

use ratatui::layout::{Constraint, Direction, Layout, Rect};

use super::{ComputedLayout, LayoutMode};

/// Compute single-region layout.
pub fn compute(size: Rect, log_visible: bool) -> ComputedLayout {
    let mut constraints = vec![Constraint::Length(1), Constraint::Min(8)];
    if log_visible {
        constraints.push(Constraint::Length(6));
    }
    constraints.push(Constraint::Length(2));

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(size);

    ComputedLayout {
        mode: LayoutMode::Single,
        header: chunks[0],
        master: chunks[1],
        detail: None,
        status: chunks[chunks.len() - 1],
        log: log_visible.then(|| chunks[2]),
        compact: false,
    }
}
