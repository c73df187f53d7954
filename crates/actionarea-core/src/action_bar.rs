//! Floating action bars.
//!
//! An [`ActionBar`] renders the [`ActionDescriptor`] of the unit on top of
//! the stack it is bound to: one primary control and a few secondary
//! items. Content changes take effect immediately in the bar's logical
//! state; the visual transition towards it is expressed as [`BarStep`]s
//! handed to an optional [`Coordinator`], or applied on the spot when
//! there is none.

use std::fmt;

use serde::Serialize;

use crate::animation::Coordinator;
use crate::content::{Action, ActionContext, ActionDescriptor, ContentId, Mode, StackRole, Tint};
use crate::error::{Error, Result};

/// Whether the bar is on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BarState {
    /// Off screen, no content
    Lowered,
    /// On screen
    Raised,
}

impl fmt::Display for BarState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Lowered => f.write_str("lowered"),
            Self::Raised => f.write_str("raised"),
        }
    }
}

/// Deferred visual step of an action bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BarStep {
    /// Move to the resting position
    SlideIn,
    /// Move below the visible area
    SlideOut,
    /// Drop all rendered content of a lowered bar
    ClearContent,
    /// Bring the incoming primary control to full width and opacity
    ShowPrimary,
    /// Remove the outgoing primary control
    RetirePrimary,
    /// Fade the snapshot of the previous items out
    FadeSnapshot,
    /// Remove the snapshot of the previous items
    DropSnapshot,
    /// Set the bar opacity in percent
    SetAlpha(u8),
}

/// Rendered state of an action bar.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BarVisual {
    /// Rows below the resting position; zero when fully on screen
    pub offset: u16,
    /// Bar opacity in percent
    pub alpha: u8,
    /// Primary control currently shown
    pub primary: Option<Action>,
    /// Primary control opacity (and width share) in percent
    pub primary_alpha: u8,
    /// Primary control being morphed away
    pub outgoing_primary: Option<Action>,
    /// Secondary items currently shown
    pub items: Vec<Action>,
    /// Previous secondary items, kept on top while they fade out
    pub items_snapshot: Option<Vec<Action>>,
}

const ENABLED_ALPHA: u8 = 100;
const DISABLED_ALPHA: u8 = 40;

#[derive(Clone, Copy)]
enum When {
    During,
    After,
}

/// Floating control surface bound to one stack.
#[derive(Debug)]
pub struct ActionBar {
    role: StackRole,
    state: BarState,
    descriptor: ActionDescriptor,
    enabled: bool,
    tint: Option<Tint>,
    elevated: bool,
    max_items: usize,
    height: u16,
    visual: BarVisual,
    revision: u64,
}

impl ActionBar {
    /// Create a lowered bar.
    #[must_use]
    pub fn new(role: StackRole, max_items: usize, height: u16) -> Self {
        Self {
            role,
            state: BarState::Lowered,
            descriptor: ActionDescriptor::empty(),
            enabled: true,
            tint: None,
            elevated: false,
            max_items,
            height,
            visual: BarVisual {
                offset: height,
                alpha: ENABLED_ALPHA,
                ..BarVisual::default()
            },
            revision: 0,
        }
    }

    /// Bring the bar on screen showing `descriptor`.
    pub fn raise(
        &mut self,
        descriptor: ActionDescriptor,
        enabled: bool,
        mut coordinator: Option<&mut (dyn Coordinator<BarStep> + '_)>,
    ) -> Result<()> {
        self.expect_state("raise", BarState::Lowered)?;
        tracing::debug!(bar = %self.role, "raise");

        self.state = BarState::Raised;
        self.visual.primary = descriptor.primary.clone();
        self.visual.primary_alpha = 100;
        self.visual.outgoing_primary = None;
        self.visual.items = descriptor.visible_items(self.max_items).to_vec();
        self.visual.items_snapshot = None;
        self.descriptor = descriptor;
        self.revision += 1;

        self.enable(enabled, coordinator.as_deref_mut());
        self.schedule(coordinator, &[(When::During, BarStep::SlideIn)]);
        Ok(())
    }

    /// Show `descriptor` on a raised bar.
    ///
    /// Returns `false` without touching the content when `descriptor` is
    /// already shown.
    pub fn update(
        &mut self,
        descriptor: ActionDescriptor,
        enabled: bool,
        mut coordinator: Option<&mut (dyn Coordinator<BarStep> + '_)>,
    ) -> Result<bool> {
        self.expect_state("update", BarState::Raised)?;
        self.enable(enabled, coordinator.as_deref_mut());
        if descriptor == self.descriptor {
            return Ok(false);
        }
        tracing::debug!(bar = %self.role, "update");

        let mut steps = Vec::new();
        match (self.descriptor.primary.take(), descriptor.primary.clone()) {
            (Some(old), Some(new)) if old == new => {}
            (Some(old), Some(new)) => {
                self.visual.outgoing_primary = Some(old);
                self.visual.primary = Some(new);
                self.visual.primary_alpha = 0;
                steps.push((When::During, BarStep::ShowPrimary));
                steps.push((When::After, BarStep::RetirePrimary));
            }
            (Some(old), None) => {
                self.visual.outgoing_primary = Some(old);
                self.visual.primary = None;
                steps.push((When::During, BarStep::RetirePrimary));
            }
            (None, Some(new)) => {
                self.visual.primary = Some(new);
                self.visual.primary_alpha = 0;
                steps.push((When::During, BarStep::ShowPrimary));
            }
            (None, None) => {}
        }

        let items = descriptor.visible_items(self.max_items).to_vec();
        if items != self.visual.items {
            let previous = std::mem::replace(&mut self.visual.items, items);
            self.visual.items_snapshot = Some(previous);
            steps.push((When::During, BarStep::FadeSnapshot));
            steps.push((When::After, BarStep::DropSnapshot));
        }

        self.descriptor = descriptor;
        self.revision += 1;
        self.schedule(coordinator, &steps);
        Ok(true)
    }

    /// Toggle interaction and opacity without replacing content.
    pub fn enable(&mut self, enabled: bool, coordinator: Option<&mut (dyn Coordinator<BarStep> + '_)>) {
        if self.enabled == enabled && self.visual.alpha == Self::alpha_for(enabled) {
            return;
        }
        self.enabled = enabled;
        let step = BarStep::SetAlpha(Self::alpha_for(enabled));
        self.schedule(coordinator, &[(When::During, step)]);
    }

    /// Move the bar off screen and drop its content.
    pub fn lower(&mut self, coordinator: Option<&mut (dyn Coordinator<BarStep> + '_)>) -> Result<()> {
        self.expect_state("lower", BarState::Raised)?;
        tracing::debug!(bar = %self.role, "lower");

        self.state = BarState::Lowered;
        self.descriptor = ActionDescriptor::empty();
        self.revision += 1;
        self.schedule(
            coordinator,
            &[
                (When::During, BarStep::SlideOut),
                (When::After, BarStep::ClearContent),
            ],
        );
        Ok(())
    }

    /// Apply a deferred visual step.
    pub fn apply(&mut self, step: BarStep) {
        match step {
            BarStep::SlideIn => self.visual.offset = 0,
            BarStep::SlideOut => self.visual.offset = self.height,
            BarStep::ClearContent => {
                // a raise committed after the lower owns the content now
                if self.state == BarState::Lowered {
                    self.visual.primary = None;
                    self.visual.outgoing_primary = None;
                    self.visual.items.clear();
                    self.visual.items_snapshot = None;
                }
            }
            BarStep::ShowPrimary => self.visual.primary_alpha = 100,
            BarStep::RetirePrimary => self.visual.outgoing_primary = None,
            BarStep::FadeSnapshot => {
                if let Some(snapshot) = self.visual.items_snapshot.as_mut() {
                    snapshot.clear();
                }
            }
            BarStep::DropSnapshot => self.visual.items_snapshot = None,
            BarStep::SetAlpha(alpha) => self.visual.alpha = alpha,
        }
    }

    /// Set the tint colour.
    pub fn set_tint(&mut self, tint: Option<Tint>) {
        self.tint = tint;
    }

    /// Draw the bar elevated above the content.
    pub fn set_elevated(&mut self, elevated: bool) {
        self.elevated = elevated;
    }

    /// Run the primary action. Returns the action that ran.
    pub fn trigger_primary(&self, unit: ContentId, mode: Mode) -> Option<&Action> {
        self.trigger(self.descriptor.primary.as_ref(), unit, mode)
    }

    /// Run the secondary action at `index`. Returns the action that ran.
    pub fn trigger_item(&self, index: usize, unit: ContentId, mode: Mode) -> Option<&Action> {
        let action = self.descriptor.visible_items(self.max_items).get(index);
        self.trigger(action, unit, mode)
    }

    fn trigger<'a>(&self, action: Option<&'a Action>, unit: ContentId, mode: Mode) -> Option<&'a Action> {
        if self.state != BarState::Raised || !self.enabled {
            return None;
        }
        let action = action?;
        tracing::info!(bar = %self.role, action = %action.id, "action triggered");
        action.run(&ActionContext {
            unit,
            action: action.id.clone(),
            mode,
        });
        Some(action)
    }

    /// Which stack this bar is bound to.
    pub const fn role(&self) -> StackRole {
        self.role
    }

    /// Raised or lowered.
    pub const fn state(&self) -> BarState {
        self.state
    }

    /// Whether the bar is raised.
    pub fn is_raised(&self) -> bool {
        self.state == BarState::Raised
    }

    /// Descriptor currently shown.
    pub const fn descriptor(&self) -> &ActionDescriptor {
        &self.descriptor
    }

    /// Whether the bar accepts interaction.
    pub const fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Tint colour.
    pub const fn tint(&self) -> Option<Tint> {
        self.tint
    }

    /// Whether the bar is drawn elevated.
    pub const fn is_elevated(&self) -> bool {
        self.elevated
    }

    /// Rendered state.
    pub const fn visual(&self) -> &BarVisual {
        &self.visual
    }

    /// Number of content mutations so far.
    pub const fn revision(&self) -> u64 {
        self.revision
    }

    /// Secondary actions rendered at most.
    pub const fn max_items(&self) -> usize {
        self.max_items
    }

    const fn alpha_for(enabled: bool) -> u8 {
        if enabled {
            ENABLED_ALPHA
        } else {
            DISABLED_ALPHA
        }
    }

    fn expect_state(&self, operation: &'static str, expected: BarState) -> Result<()> {
        if self.state == expected {
            Ok(())
        } else {
            Err(Error::BarState {
                bar: self.role,
                operation,
                state: self.state,
            })
        }
    }

    fn schedule(
        &mut self,
        coordinator: Option<&mut (dyn Coordinator<BarStep> + '_)>,
        steps: &[(When, BarStep)],
    ) {
        match coordinator {
            Some(coordinator) => {
                for &(when, step) in steps {
                    match when {
                        When::During => coordinator.animate(step),
                        When::After => coordinator.complete(step),
                    }
                }
            }
            None => {
                for &(_, step) in steps {
                    self.apply(step);
                }
            }
        }
    }
}
