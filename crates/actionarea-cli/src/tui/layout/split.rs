//! Split layout for an expanded controller.
//!
//! Layout structure:
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │ Header                                               │
//! ├──────────────────┬──────────────────────────────────┤
//! │ Master           │ Detail                            │
//! │                  │                                   │
//! │ [action bar]     │ [action bar]                      │
//! ├──────────────────┴──────────────────────────────────┤
//! │ Log? (if visible)                                    │
//! ├─────────────────────────────────────────────────────┤
//! │ Status bar                                           │
//! └─────────────────────────────────────────────────────┘
//! ```

use actionarea_core::layout::LayoutMetrics;
use ratatui::layout::{Constraint, Direction, Layout, Rect};

use super::{ComputedLayout, LayoutMode};

/// Compute split layout.
pub fn compute(size: Rect, log_visible: bool, metrics: &LayoutMetrics) -> ComputedLayout {
    let mut constraints = vec![Constraint::Length(1), Constraint::Min(10)];
    if log_visible {
        constraints.push(Constraint::Length(8));
    }
    constraints.push(Constraint::Length(3));

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(size);

    let header = chunks[0];
    let body = chunks[1];
    let log = log_visible.then(|| chunks[2]);
    let status = chunks[chunks.len() - 1];

    let total = u32::from(metrics.master_width) + u32::from(metrics.detail_width);
    let body_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Ratio(u32::from(metrics.master_width), total.max(1)),
            Constraint::Ratio(u32::from(metrics.detail_width), total.max(1)),
        ])
        .split(body);

    ComputedLayout {
        mode: LayoutMode::Split,
        header,
        master: body_chunks[0],
        detail: Some(body_chunks[1]),
        status,
        log,
        compact: false,
    }
}
