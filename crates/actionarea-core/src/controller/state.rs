//! Serialisable summary of a controller.

use serde::Serialize;

use crate::action_bar::{ActionBar, BarState};
use crate::content::{ContentId, ContentUnit, Mode, Role, Tint};
use crate::host::{ContentHost, FeatureToggleProvider};
use crate::layout::{Layout, LayoutMetrics};
use crate::stack::ContentStack;
use crate::transition::TransitionType;

use super::PresentationController;

/// One unit as seen from outside the controller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnitSummary {
    /// Identity
    pub id: ContentId,
    /// Title
    pub title: String,
    /// Presentation role
    pub role: Role,
    /// Whether this is a master's empty-state placeholder
    pub empty_state: bool,
    /// Margin applied by the layout
    pub margin: u16,
}

impl From<&ContentUnit> for UnitSummary {
    fn from(unit: &ContentUnit) -> Self {
        Self {
            id: unit.id(),
            title: unit.title().to_string(),
            role: unit.role(),
            empty_state: unit.is_empty_state(),
            margin: unit.layout_margin(),
        }
    }
}

/// One action bar as seen from outside the controller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BarSummary {
    /// Raised or lowered
    pub state: BarState,
    /// Primary action id
    pub primary: Option<String>,
    /// Rendered secondary action ids
    pub items: Vec<String>,
    /// Whether the bar accepts interaction
    pub enabled: bool,
    /// Whether the bar is elevated
    pub elevated: bool,
    /// Tint colour
    pub tint: Option<Tint>,
    /// Content mutations so far
    pub revision: u64,
}

impl From<&ActionBar> for BarSummary {
    fn from(bar: &ActionBar) -> Self {
        let descriptor = bar.descriptor();
        Self {
            state: bar.state(),
            primary: descriptor.primary.as_ref().map(|action| action.id.clone()),
            items: descriptor
                .visible_items(bar.max_items())
                .iter()
                .map(|action| action.id.clone())
                .collect(),
            enabled: bar.is_enabled(),
            elevated: bar.is_elevated(),
            tint: bar.tint(),
            revision: bar.revision(),
        }
    }
}

/// Everything observable about a controller at one point in time.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ControllerState {
    /// Current layout
    pub layout: Layout,
    /// Region metrics of the layout
    pub metrics: LayoutMetrics,
    /// Interaction mode
    pub mode: Mode,
    /// Automaton state
    pub transition: TransitionType,
    /// Whether two regions are shown
    pub expanded: bool,
    /// Whether a master unit is visible
    pub master_visible: bool,
    /// Master (or merged) stack, oldest first
    pub master: Vec<UnitSummary>,
    /// Detail stack, oldest first
    pub detail: Vec<UnitSummary>,
    /// Master bar
    pub master_bar: BarSummary,
    /// Detail bar
    pub detail_bar: BarSummary,
    /// Remembered modal detail
    pub modal_detail: Option<ContentId>,
    /// Intercepted back controls
    pub overrides: usize,
    /// Snapshots still covering a region
    pub snapshots: usize,
    /// Whether an animation is in flight
    pub animating: bool,
}

impl ControllerState {
    /// Render as pretty-printed JSON.
    pub fn to_json(&self) -> crate::Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| crate::Error::Serialization(e.to_string()))
    }
}

fn summarize(stack: &ContentStack) -> Vec<UnitSummary> {
    stack.all().iter().map(UnitSummary::from).collect()
}

impl<H> PresentationController<H>
where
    H: ContentHost + FeatureToggleProvider,
{
    /// Capture an observable summary of the controller.
    pub fn snapshot_state(&self) -> ControllerState {
        ControllerState {
            layout: self.layout,
            metrics: self.metrics(),
            mode: self.mode,
            transition: self.transition,
            expanded: self.is_expanded(),
            master_visible: self.is_master_visible(),
            master: summarize(&self.master),
            detail: summarize(&self.detail),
            master_bar: BarSummary::from(&self.master_bar),
            detail_bar: BarSummary::from(&self.detail_bar),
            modal_detail: self.modal_detail,
            overrides: self.back.len(),
            snapshots: self.snapshots.len(),
            animating: self.is_animating(),
        }
    }
}
