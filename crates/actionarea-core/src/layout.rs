//! Layout value type and size classification.
//!
//! A [`Layout`] describes the size class of the display area:
//! - Portrait: a single region, always collapsed
//! - Landscape collapsed: a single region on a wide display
//! - Landscape expanded: master and detail regions side by side
//!
//! Sizes are measured in terminal cells, so the landscape threshold is a
//! width/height ratio that accounts for cells being roughly twice as tall
//! as they are wide.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::config::LayoutConfig;
use crate::error::{Error, Result};

/// Display area size in cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Size {
    /// Columns
    pub width: u16,
    /// Rows
    pub height: u16,
}

impl Size {
    /// Create a size.
    #[must_use]
    pub const fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }

    /// The same area rotated by a quarter turn, in cells.
    ///
    /// Cells are about twice as tall as wide, so a rotation swaps the
    /// visual extents rather than the raw numbers.
    #[must_use]
    pub const fn rotated(self) -> Self {
        Self {
            width: self.height.saturating_mul(2),
            height: self.width / 2,
        }
    }

    /// Parse `WIDTHxHEIGHT`.
    pub fn parse(value: &str) -> Result<Self> {
        let invalid = || Error::InvalidConfig {
            key: "size".to_string(),
            reason: format!("expected WIDTHxHEIGHT, got '{value}'"),
        };
        let (width, height) = value.split_once(['x', 'X']).ok_or_else(invalid)?;
        let width = width.trim().parse().map_err(|_| invalid())?;
        let height = height.trim().parse().map_err(|_| invalid())?;
        Ok(Self::new(width, height))
    }
}

impl fmt::Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Orientation of the display area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    /// Narrow display, one region
    Portrait,
    /// Wide display, room for two regions
    Landscape,
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Portrait => f.write_str("portrait"),
            Self::Landscape => f.write_str("landscape"),
        }
    }
}

/// Whether a landscape layout shows one or two regions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubMode {
    /// One region
    Collapsed,
    /// Master and detail regions side by side
    Expanded,
}

/// Size class of the display area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "orientation", rename_all = "lowercase")]
pub enum Layout {
    /// Narrow layout; never expands
    Portrait {
        /// Display size
        size: Size,
    },
    /// Wide layout
    Landscape {
        /// Display size
        size: Size,
        /// Collapsed or expanded
        sub_mode: SubMode,
    },
}

impl Layout {
    /// Portrait layout of the given size.
    #[must_use]
    pub const fn portrait(size: Size) -> Self {
        Self::Portrait { size }
    }

    /// Landscape layout of the given size and sub-mode.
    #[must_use]
    pub const fn landscape(size: Size, sub_mode: SubMode) -> Self {
        Self::Landscape { size, sub_mode }
    }

    /// Display size.
    #[must_use]
    pub const fn size(&self) -> Size {
        match *self {
            Self::Portrait { size } | Self::Landscape { size, .. } => size,
        }
    }

    /// Orientation.
    #[must_use]
    pub const fn orientation(&self) -> Orientation {
        match self {
            Self::Portrait { .. } => Orientation::Portrait,
            Self::Landscape { .. } => Orientation::Landscape,
        }
    }

    /// Whether master and detail regions are shown side by side.
    #[must_use]
    pub const fn is_expanded(&self) -> bool {
        matches!(
            self,
            Self::Landscape {
                sub_mode: SubMode::Expanded,
                ..
            }
        )
    }

    /// Switch a collapsed landscape layout to expanded.
    pub fn expand(self) -> Result<Self> {
        match self {
            Self::Landscape {
                size,
                sub_mode: SubMode::Collapsed,
            } => Ok(Self::landscape(size, SubMode::Expanded)),
            layout => Err(Error::LayoutTransform {
                operation: "expand",
                layout,
            }),
        }
    }

    /// Switch an expanded landscape layout to collapsed.
    pub fn collapse(self) -> Result<Self> {
        match self {
            Self::Landscape {
                size,
                sub_mode: SubMode::Expanded,
            } => Ok(Self::landscape(size, SubMode::Collapsed)),
            layout => Err(Error::LayoutTransform {
                operation: "collapse",
                layout,
            }),
        }
    }

    /// The same layout at a different size.
    #[must_use]
    pub const fn with_size(self, size: Size) -> Self {
        match self {
            Self::Portrait { .. } => Self::Portrait { size },
            Self::Landscape { sub_mode, .. } => Self::Landscape { size, sub_mode },
        }
    }
}

impl fmt::Display for Layout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Portrait { size } => write!(f, "portrait({size})"),
            Self::Landscape {
                size,
                sub_mode: SubMode::Collapsed,
            } => write!(f, "landscape({size}, collapsed)"),
            Self::Landscape {
                size,
                sub_mode: SubMode::Expanded,
            } => write!(f, "landscape({size}, expanded)"),
        }
    }
}

/// Derived region widths and margins for a layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LayoutMetrics {
    /// Width of the master (or merged) region
    pub master_width: u16,
    /// Width of the detail region; zero when collapsed
    pub detail_width: u16,
    /// Margin applied inside each region
    pub margin: u16,
    /// Rows reserved for an action bar
    pub bar_height: u16,
}

/// Classifies sizes into layouts and derives their metrics.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutPolicy {
    landscape_aspect: f32,
    min_landscape_width: u16,
    master_fraction: f32,
    min_master_width: u16,
    margin: u16,
    split_margin: u16,
    bar_height: u16,
}

impl LayoutPolicy {
    /// Build a policy from the layout configuration.
    #[must_use]
    pub fn new(config: &LayoutConfig, bar_height: u16) -> Self {
        Self {
            landscape_aspect: config.landscape_aspect,
            min_landscape_width: config.min_landscape_width,
            master_fraction: config.master_fraction,
            min_master_width: config.min_master_width,
            margin: config.margin,
            split_margin: config.split_margin,
            bar_height,
        }
    }

    /// Orientation of a size.
    #[must_use]
    pub fn orientation(&self, size: Size) -> Orientation {
        let wide = f32::from(size.width) >= f32::from(size.height) * self.landscape_aspect;
        if wide && size.width >= self.min_landscape_width {
            Orientation::Landscape
        } else {
            Orientation::Portrait
        }
    }

    /// Layout for a size given the number of master units shown.
    ///
    /// A landscape size is expanded exactly when there is master content.
    #[must_use]
    pub fn resolve(&self, size: Size, master_count: usize) -> Layout {
        match self.orientation(size) {
            Orientation::Portrait => Layout::portrait(size),
            Orientation::Landscape if master_count > 0 => {
                Layout::landscape(size, SubMode::Expanded)
            }
            Orientation::Landscape => Layout::landscape(size, SubMode::Collapsed),
        }
    }

    /// Region widths and margins for a layout.
    #[must_use]
    pub fn metrics(&self, layout: &Layout) -> LayoutMetrics {
        let width = layout.size().width;
        if !layout.is_expanded() {
            return LayoutMetrics {
                master_width: width,
                detail_width: 0,
                margin: self.margin,
                bar_height: self.bar_height,
            };
        }

        let share = (f32::from(width) * self.master_fraction).round() as u16;
        let master_width = share.max(self.min_master_width).min(width);
        LayoutMetrics {
            master_width,
            detail_width: width - master_width,
            margin: self.split_margin,
            bar_height: self.bar_height,
        }
    }
}

impl Default for LayoutPolicy {
    fn default() -> Self {
        Self::new(&LayoutConfig::default(), crate::config::ActionBarConfig::default().height)
    }
}
