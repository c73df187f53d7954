//! TUI layout system.
//!
//! The controller decides how many regions are shown; this module turns
//! that decision into screen areas:
//! - Split layout when the controller is expanded (master and detail side by side)
//! - Single layout when it is collapsed (one merged region)

use actionarea_core::layout::LayoutMetrics;
use ratatui::layout::Rect;

mod single;
mod split;

/// Terminal width below which the status bar switches to its compact form.
const COMPACT_WIDTH: u16 = 80;

/// Region arrangement mirrored from the controller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutMode {
    /// Master and detail regions side by side
    Split,
    /// One merged region
    Single,
}

/// Computed layout areas for rendering
#[derive(Debug, Clone)]
pub struct ComputedLayout {
    /// Layout mode being used
    pub mode: LayoutMode,
    /// Header area (title bar)
    pub header: Rect,
    /// Master (or merged) region
    pub master: Rect,
    /// Detail region (split layout only)
    pub detail: Option<Rect>,
    /// Status bar area
    pub status: Rect,
    /// Log panel area (if visible)
    pub log: Option<Rect>,
    /// Whether the status bar should use its compact form
    pub compact: bool,
}

impl ComputedLayout {
    /// Compute layout for the given terminal area.
    ///
    /// `split` carries the controller's region metrics while it is
    /// expanded; the master/detail widths keep its proportions.
    pub fn compute(size: Rect, log_visible: bool, split: Option<&LayoutMetrics>) -> Self {
        let mut layout = match split {
            Some(metrics) => split::compute(size, log_visible, metrics),
            None => single::compute(size, log_visible),
        };
        layout.compact = size.width < COMPACT_WIDTH;
        layout
    }
}

/// Rows of `region` covered by an action bar of `height` rows that sits
/// `offset` rows below its resting position. `None` once fully off screen.
pub fn bar_area(region: Rect, height: u16, offset: u16) -> Option<Rect> {
    let visible = height.saturating_sub(offset).min(region.height);
    if visible == 0 {
        return None;
    }
    let bottom = region.y + region.height;
    Some(Rect::new(region.x, bottom - visible, region.width, visible))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metrics(master_width: u16, detail_width: u16) -> LayoutMetrics {
        LayoutMetrics {
            master_width,
            detail_width,
            margin: 1,
            bar_height: 3,
        }
    }

    #[test]
    fn test_single_when_collapsed() {
        let layout = ComputedLayout::compute(Rect::new(0, 0, 60, 40), false, None);
        assert_eq!(layout.mode, LayoutMode::Single);
        assert!(layout.detail.is_none());
        assert!(layout.compact);
        assert_eq!(layout.master.width, 60);
    }

    #[test]
    fn test_split_keeps_proportions() {
        let size = Rect::new(0, 0, 160, 40);
        let layout = ComputedLayout::compute(size, false, Some(&metrics(61, 99)));

        assert_eq!(layout.mode, LayoutMode::Split);
        assert!(!layout.compact);
        let detail = layout.detail.expect("detail region");
        assert_eq!(layout.master.width + detail.width, size.width);
        assert_eq!(layout.master.width, 61);
        assert_eq!(detail.x, layout.master.x + layout.master.width);
    }

    #[test]
    fn test_log_panel_takes_rows() {
        let size = Rect::new(0, 0, 160, 40);
        let without = ComputedLayout::compute(size, false, Some(&metrics(61, 99)));
        let with = ComputedLayout::compute(size, true, Some(&metrics(61, 99)));

        assert!(without.log.is_none());
        let log = with.log.expect("log area");
        assert!(log.height > 0);
        assert!(with.master.height < without.master.height);
    }

    #[test]
    fn test_bar_area_slides() {
        let region = Rect::new(0, 0, 40, 20);
        assert_eq!(bar_area(region, 3, 0), Some(Rect::new(0, 17, 40, 3)));
        assert_eq!(bar_area(region, 3, 2), Some(Rect::new(0, 19, 40, 1)));
        assert_eq!(bar_area(region, 3, 3), None);
        assert_eq!(bar_area(Rect::new(0, 0, 40, 2), 3, 0), Some(Rect::new(0, 0, 40, 2)));
    }
}
