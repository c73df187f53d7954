//! The presentation controller.
//!
//! [`PresentationController`] owns the master and detail stacks, their two
//! action bars, the current [`Layout`], the interaction [`Mode`] and the
//! [`TransitionType`] automaton. Callers push and pop content through it;
//! every change to the master stack is fed to the automaton as a phase and
//! the resulting transition type decides what happens to the bars and the
//! layout.
//!
//! In a collapsed layout there is a single merged stack (the master stack
//! holds masters and details alike). In an expanded layout masters stay in
//! the master stack and the detail stack holds, for every master in order,
//! its empty state followed by the details shown for it.
//!
//! Every public operation checks its preconditions before touching any
//! state, so an error leaves the controller exactly as it was.

mod delegate;
mod size;
mod state;

use std::time::Duration;

use crate::action_bar::{ActionBar, BarStep};
use crate::animation::{Animator, Coordinator, MapCoordinator, Transaction};
use crate::back::BackInterceptor;
use crate::config::Config;
use crate::content::{
    ActionDescriptor, BackBinding, ContentId, ContentUnit, FeatureToggles, Mode, Role, StackRole,
};
use crate::error::{Error, Result};
use crate::host::{ContentHost, FeatureToggleProvider, TintProvider};
use crate::layout::{Layout, LayoutMetrics, LayoutPolicy, Size};
use crate::stack::ContentStack;
use crate::transition::{Phase, Source, TransitionType};

pub use state::{BarSummary, ControllerState, UnitSummary};

/// Deferred work executed by the animation driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    /// Visual step of one action bar
    Bar(StackRole, BarStep),
    /// Fade every snapshot to zero opacity
    FadeSnapshots,
    /// Remove every snapshot
    DiscardSnapshots,
    /// A stack change has completed
    DidShow(StackRole),
    /// A size-class change has completed
    DidTransition,
}

/// Frozen image of a region, kept on top while the region's content is
/// swapped underneath it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    /// Region the snapshot covers
    pub region: StackRole,
    /// Title of the unit that was shown, `None` for a blank region
    pub title: Option<String>,
    /// Opacity in percent
    pub alpha: u8,
}

/// Which control of an action bar to trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionSlot {
    /// The primary control
    Primary,
    /// A secondary item by index
    Item(usize),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BarOp {
    Raise,
    RaiseOrUpdate,
    Update,
    Refresh,
    LowerIfRaised,
}

/// Root back control of a host that did not configure one.
const DEFAULT_ROOT_BACK: (&str, &str) = ("host", "dismiss");

/// Adaptive master/detail presentation controller.
#[derive(Debug)]
pub struct PresentationController<H> {
    host: H,
    policy: LayoutPolicy,
    layout: Layout,
    mode: Mode,
    transition: TransitionType,
    master: ContentStack,
    detail: ContentStack,
    master_bar: ActionBar,
    detail_bar: ActionBar,
    back: BackInterceptor,
    modal_detail: Option<ContentId>,
    animator: Animator<Effect>,
    snapshots: Vec<Snapshot>,
    observed: [Option<ContentId>; 2],
}

impl<H> PresentationController<H>
where
    H: ContentHost + FeatureToggleProvider,
{
    /// Create a controller with empty stacks for a display of `size`.
    pub fn new(host: H, size: Size, config: &Config) -> Self {
        let policy = LayoutPolicy::new(&config.layout, config.action_bar.height);
        let layout = policy.resolve(size, 0);
        let bar = |role| ActionBar::new(role, config.action_bar.max_items, config.action_bar.height);
        tracing::debug!(%layout, "controller created");

        Self {
            host,
            policy,
            layout,
            mode: Mode::Normal,
            transition: TransitionType::External,
            master: ContentStack::new(),
            detail: ContentStack::new(),
            master_bar: bar(StackRole::Master),
            detail_bar: bar(StackRole::Detail),
            back: BackInterceptor::new(BackBinding::new(DEFAULT_ROOT_BACK.0, DEFAULT_ROOT_BACK.1)),
            modal_detail: None,
            animator: Animator::new(config.animation.enabled, config.animation.duration),
            snapshots: Vec::new(),
            observed: [None, None],
        }
    }

    /// Use `binding` as the host's own back control.
    #[must_use]
    pub fn with_root_back(mut self, binding: BackBinding) -> Self {
        self.back = BackInterceptor::new(binding);
        self
    }

    /// Push a master unit.
    pub fn show(&mut self, unit: ContentUnit) -> Result<()> {
        expect_role(&unit, Role::Master)?;
        if self.mode == Mode::Modal {
            return Err(Error::ModalLocked("show"));
        }
        let next = self.preview(Phase::WillShow, self.master.len() + 1, Source::Delegate)?;

        tracing::debug!(id = %unit.id(), title = unit.title(), "show");
        self.master.push(unit);
        self.back.intercept(&mut self.master);
        self.will_show(next)
    }

    /// Route a detail unit to whichever stack currently presents details.
    pub fn show_detail(&mut self, unit: ContentUnit) -> Result<()> {
        expect_role(&unit, Role::Detail)?;
        if self.mode == Mode::Modal {
            return Err(Error::ModalLocked("show_detail"));
        }
        if self.master_count() == 0 {
            return Err(Error::NoMasterContent);
        }
        tracing::debug!(id = %unit.id(), title = unit.title(), "show detail");

        if self.layout.is_expanded() {
            self.detail.push(unit);
            let top = self.top_id(StackRole::Detail);
            self.host.will_show(StackRole::Detail, top, self.animator.is_enabled());

            let mut tx = Transaction::new();
            self.bar_op(StackRole::Detail, BarOp::Update, Some(&mut tx))?;
            self.observe_tops();
            tx.after(Effect::DidShow(StackRole::Detail));
            return self.commit(tx);
        }

        let next = self.preview(Phase::WillShow, self.master.len() + 1, Source::Delegate)?;
        self.master.push(unit);
        self.back.intercept(&mut self.master);
        self.will_show(next)
    }

    /// Handle a back gesture or programmatic back.
    ///
    /// The automaton observes the back phase first; the displaced back
    /// action is then forwarded to the host and the stack is popped.
    pub fn back(&mut self) -> Result<()> {
        let count = self.master.len();
        if count == 0 {
            return Err(Error::NothingToPop);
        }
        if self.back_removes_modal_detail() {
            return Err(Error::ModalLocked("back"));
        }
        let next = self.preview(Phase::Back, count, Source::BackAction)?;

        tracing::debug!(count, to = %next, "back");
        self.transition = next;
        let original = self.back.replay(&mut self.master)?;
        self.host.dispatch_back(&original);

        let mut tx = Transaction::new();
        self.handle_back(&mut tx)?;
        let next = self.transition.next(Phase::WillShow, self.master.len(), &self.policy)?;
        self.transition = next;
        self.announce_will_show(StackRole::Master);
        self.handle_delegate(Phase::WillShow, Some(&mut tx))?;
        self.observe_tops();
        tx.after(Effect::DidShow(StackRole::Master));
        self.commit(tx)
    }

    /// Pop back to the master unit directly beneath the first detail unit.
    ///
    /// No-op in an expanded layout, where masters are always visible. In
    /// the modal mode the removed units stay owned by the detail stack so
    /// the modal detail can be shown again.
    pub fn reveal_master(&mut self) -> Result<()> {
        if self.layout.is_expanded() {
            tracing::warn!("reveal_master has no effect in an expanded layout");
            return Ok(());
        }
        let Some(first_detail) = self
            .master
            .all()
            .iter()
            .position(|unit| unit.role() == Role::Detail)
        else {
            tracing::debug!("no detail to hide");
            return Ok(());
        };
        let next = self.preview(Phase::WillShow, first_detail, Source::Delegate)?;

        self.back.truncate(&mut self.master, first_detail);
        let removed = self.master.truncate(first_detail);
        if self.is_parking(&removed) {
            tracing::debug!(count = removed.len(), "parking modal detail");
            for unit in removed {
                self.detail.push(unit);
            }
        }
        self.will_show(next)
    }

    /// Present the remembered modal detail again.
    ///
    /// No-op in an expanded layout or when it is already on top.
    pub fn reshow_detail(&mut self) -> Result<()> {
        if self.mode != Mode::Modal {
            return Err(Error::NotModal("reshow_detail"));
        }
        if self.layout.is_expanded() {
            tracing::debug!("modal detail already visible");
            return Ok(());
        }
        let Some(id) = self.modal_detail else {
            return Err(Error::NoDetailPresented);
        };
        if self.detail.contains(id) {
            return self.unpark();
        }
        if self.master.contains(id) {
            return Ok(());
        }
        Err(Error::ModalDetailMissing(id))
    }

    /// Switch the interaction mode.
    pub fn set_mode(&mut self, mode: Mode) -> Result<()> {
        if mode == self.mode {
            return Err(Error::ModeUnchanged(mode));
        }
        match mode {
            Mode::Modal => {
                let id = self.presented_detail().ok_or(Error::NoDetailPresented)?;
                self.modal_detail = Some(id);
            }
            Mode::Normal => {
                if !self.layout.is_expanded() && !self.detail.is_empty() {
                    self.unpark()?;
                }
                self.modal_detail = None;
            }
        }

        tracing::info!(%mode, modal_detail = ?self.modal_detail, "interaction mode changed");
        self.mode = mode;
        let mut tx = Transaction::new();
        self.bar_op(StackRole::Master, BarOp::Refresh, Some(&mut tx))?;
        self.bar_op(StackRole::Detail, BarOp::Refresh, Some(&mut tx))?;
        self.commit(tx)
    }

    /// Re-read the feature toggles of a unit after the provider changed them.
    pub fn toggles_changed(&mut self, id: ContentId) {
        for role in [StackRole::Master, StackRole::Detail] {
            if self.observed[role_index(role)] != Some(id) {
                continue;
            }
            let toggles = self.toggles_for(role);
            tracing::debug!(bar = %role, ?toggles, "toggles changed");
            let bar = self.bar_mut(role);
            bar.enable(toggles.actions_enabled, None);
            bar.set_elevated(toggles.elevated);
        }
    }

    /// Run an action of the bar bound to `role`. Returns the action id.
    pub fn trigger_action(&self, role: StackRole, slot: ActionSlot) -> Option<String> {
        let unit = self.top_id(role)?;
        let bar = self.bar(role);
        let action = match slot {
            ActionSlot::Primary => bar.trigger_primary(unit, self.mode),
            ActionSlot::Item(index) => bar.trigger_item(index, unit, self.mode),
        };
        action.map(|action| action.id.clone())
    }

    /// Advance animations by `elapsed` and run whatever became due.
    pub fn tick(&mut self, elapsed: Duration) -> Result<()> {
        let due = self.animator.tick(elapsed);
        self.run_effects(due)
    }

    /// Complete every in-flight animation immediately.
    pub fn finish_animations(&mut self) -> Result<()> {
        let due = self.animator.finish();
        self.run_effects(due)
    }

    /// Whether master and detail regions are shown side by side.
    pub fn is_expanded(&self) -> bool {
        self.layout.is_expanded()
    }

    /// Whether a master unit is visible.
    pub fn is_master_visible(&self) -> bool {
        self.layout.is_expanded()
            || self
                .master
                .top()
                .is_some_and(|unit| unit.role() == Role::Master)
    }

    /// Interaction mode.
    pub const fn state(&self) -> Mode {
        self.mode
    }

    /// Current layout.
    pub const fn layout(&self) -> Layout {
        self.layout
    }

    /// Metrics of the current layout.
    pub fn metrics(&self) -> LayoutMetrics {
        self.policy.metrics(&self.layout)
    }

    /// Automaton state.
    pub const fn transition(&self) -> TransitionType {
        self.transition
    }

    /// Master (or merged) stack.
    pub const fn master_stack(&self) -> &ContentStack {
        &self.master
    }

    /// Detail stack.
    pub const fn detail_stack(&self) -> &ContentStack {
        &self.detail
    }

    /// Bar bound to the master stack.
    pub const fn master_bar(&self) -> &ActionBar {
        &self.master_bar
    }

    /// Bar bound to the detail stack.
    pub const fn detail_bar(&self) -> &ActionBar {
        &self.detail_bar
    }

    /// Snapshots currently covering a region.
    pub fn snapshots(&self) -> &[Snapshot] {
        &self.snapshots
    }

    /// Whether an animation driver is in flight.
    pub const fn is_animating(&self) -> bool {
        self.animator.is_active()
    }

    /// Progress of the in-flight animation.
    pub fn animation_progress(&self) -> Option<f32> {
        self.animator.progress()
    }

    /// Whether no enter, leave or size transition is pending.
    pub const fn is_settled(&self) -> bool {
        matches!(
            self.transition,
            TransitionType::Internal | TransitionType::External
        )
    }

    /// Unit remembered as the modal detail.
    pub const fn modal_detail(&self) -> Option<ContentId> {
        self.modal_detail
    }

    /// Number of intercepted back controls.
    pub fn override_depth(&self) -> usize {
        self.back.len()
    }

    /// Back interception state.
    pub const fn back_interceptor(&self) -> &BackInterceptor {
        &self.back
    }

    /// The content host.
    pub const fn host(&self) -> &H {
        &self.host
    }

    /// The content host, mutably.
    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// Unit on top of the region bound to `role`.
    pub fn top(&self, role: StackRole) -> Option<&ContentUnit> {
        match role {
            StackRole::Master => self.master.top(),
            StackRole::Detail if self.layout.is_expanded() => self.detail.top(),
            StackRole::Detail => None,
        }
    }

    fn top_id(&self, role: StackRole) -> Option<ContentId> {
        self.top(role).map(ContentUnit::id)
    }

    /// Number of master-role units, wherever they live.
    fn master_count(&self) -> usize {
        self.master
            .all()
            .iter()
            .filter(|unit| unit.role() == Role::Master)
            .count()
    }

    /// Evaluate a phase without applying it.
    fn preview(&self, phase: Phase, count: usize, source: Source) -> Result<TransitionType> {
        let next = self.transition.next(phase, count, &self.policy)?;
        next.check_source(source, self.layout.orientation())?;
        Ok(next)
    }

    /// Apply a will-show phase that was previewed and run its delegate
    /// handling in a fresh transaction.
    fn will_show(&mut self, next: TransitionType) -> Result<()> {
        self.transition = next;
        self.announce_will_show(StackRole::Master);

        let mut tx = Transaction::new();
        self.handle_delegate(Phase::WillShow, Some(&mut tx))?;
        self.observe_tops();
        tx.after(Effect::DidShow(StackRole::Master));
        self.commit(tx)
    }

    fn announce_will_show(&mut self, role: StackRole) {
        let top = self.top_id(role);
        let animated = self.animator.is_enabled();
        self.host.will_show(role, top, animated);
    }

    fn did_show(&mut self, role: StackRole) -> Result<()> {
        if role == StackRole::Master {
            let next = self.transition.next(Phase::DidShow, self.master.len(), &self.policy)?;
            self.transition = next;
            self.handle_delegate(Phase::DidShow, None)?;
        }
        let top = self.top_id(role);
        self.host.did_show(role, top);
        Ok(())
    }

    fn commit(&mut self, tx: Transaction<Effect>) -> Result<()> {
        let due = self.animator.commit(tx);
        self.run_effects(due)
    }

    fn run_effects(&mut self, effects: Vec<Effect>) -> Result<()> {
        for effect in effects {
            match effect {
                Effect::Bar(role, step) => self.bar_mut(role).apply(step),
                Effect::FadeSnapshots => {
                    for snapshot in &mut self.snapshots {
                        snapshot.alpha = 0;
                    }
                }
                Effect::DiscardSnapshots => self.snapshots.clear(),
                Effect::DidShow(role) => self.did_show(role)?,
                Effect::DidTransition => self.did_transition()?,
            }
        }
        Ok(())
    }

    fn take_snapshot(&mut self, region: StackRole) {
        let title = self.top(region).map(|unit| unit.title().to_string());
        self.snapshots.push(Snapshot {
            region,
            title,
            alpha: 100,
        });
    }

    /// Whether a back would remove the modal detail from its stack.
    fn back_removes_modal_detail(&self) -> bool {
        let Some(id) = self.modal_detail else {
            return false;
        };
        if !self.layout.is_expanded() {
            // parked units belong to the master on top of the merged stack
            return self.master.top().is_some_and(|unit| unit.id() == id)
                || self.detail.contains(id);
        }
        // any back while expanded leaves only empty states in the detail stack
        self.detail.contains(id)
    }

    fn is_parking(&self, removed: &[ContentUnit]) -> bool {
        self.mode == Mode::Modal
            && self
                .modal_detail
                .is_some_and(|id| removed.iter().any(|unit| unit.id() == id))
    }

    /// Move parked units back on top of the merged stack.
    fn unpark(&mut self) -> Result<()> {
        let count = self.master.len() + self.detail.len();
        let next = self.preview(Phase::WillShow, count, Source::Delegate)?;
        tracing::debug!(count = self.detail.len(), "restoring parked detail");
        for unit in self.detail.clear() {
            self.master.push(unit);
            self.back.intercept(&mut self.master);
        }
        self.will_show(next)
    }

    fn presented_detail(&self) -> Option<ContentId> {
        let top = if self.layout.is_expanded() {
            self.detail.top()
        } else {
            self.master.top()
        }?;
        (top.role() == Role::Detail && !top.is_empty_state()).then(|| top.id())
    }

    /// Move every master's empty state into the detail stack, interleaved
    /// with the details shown for it.
    fn split_stacks(&mut self) {
        let merged = self.master.clear();
        for mut unit in merged {
            if unit.role() == Role::Master {
                if let Some(placeholder) = unit.take_empty_state() {
                    self.detail.push(placeholder);
                }
                self.master.push(unit);
            } else {
                self.detail.push(unit);
            }
        }
    }

    /// Inverse of [`Self::split_stacks`].
    fn merge_stacks(&mut self) {
        let mut masters = self.master.clear().into_iter();
        let mut merged = Vec::new();
        for unit in self.detail.clear() {
            let Some(owner) = unit.empty_state_of() else {
                merged.push(unit);
                continue;
            };
            let mut placeholder = Some(unit);
            for mut master in masters.by_ref() {
                let matched = master.id() == owner;
                if matched {
                    if let Some(placeholder) = placeholder.take() {
                        master.restore_empty_state(placeholder);
                    }
                }
                merged.push(master);
                if matched {
                    break;
                }
            }
            if placeholder.is_some() {
                tracing::warn!(%owner, "empty state without its master");
            }
        }
        merged.extend(masters);
        self.master.replace(merged);
    }

    /// Rebuild the detail stack from the empty states of the pushed
    /// masters, in push order.
    fn recompute_detail(&mut self) {
        let previous = self.detail.clear();
        let dropped = self.return_empty_states(previous);
        for master in self.master.all_mut() {
            if let Some(placeholder) = master.take_empty_state() {
                self.detail.push(placeholder);
            }
        }
        tracing::debug!(dropped, count = self.detail.len(), "detail stack rebuilt");
    }

    /// Hand placeholders back to their masters and drop everything else.
    /// Returns the number of dropped units.
    pub(super) fn return_empty_states(&mut self, units: Vec<ContentUnit>) -> usize {
        let mut dropped = 0;
        for unit in units {
            let owner = unit
                .empty_state_of()
                .and_then(|owner| self.master.get_mut(owner));
            match owner {
                Some(master) => master.restore_empty_state(unit),
                None => dropped += 1,
            }
        }
        dropped
    }

    fn apply_margins(&mut self) {
        let margin = self.policy.metrics(&self.layout).margin;
        for unit in self.master.all_mut().iter_mut().chain(self.detail.all_mut()) {
            unit.set_layout_margin(margin);
        }
    }

    fn observe_tops(&mut self) {
        for role in [StackRole::Master, StackRole::Detail] {
            let top = self.top_id(role);
            let slot = role_index(role);
            if self.observed[slot] == top {
                continue;
            }
            if let Some(old) = self.observed[slot] {
                self.host.unobserve(old);
            }
            if let Some(new) = top {
                self.host.observe(new);
            }
            self.observed[slot] = top;
        }
    }

    fn descriptor_for(&self, role: StackRole) -> ActionDescriptor {
        if role == StackRole::Master && self.layout.is_expanded() {
            return ActionDescriptor::empty();
        }
        self.top(role)
            .map_or_else(ActionDescriptor::empty, |unit| unit.descriptor(self.mode).clone())
    }

    fn toggles_for(&self, role: StackRole) -> FeatureToggles {
        self.top(role).map_or_else(FeatureToggles::default, |unit| {
            self.host.toggles(unit.id()).unwrap_or_else(|| unit.toggles())
        })
    }

    const fn bar(&self, role: StackRole) -> &ActionBar {
        match role {
            StackRole::Master => &self.master_bar,
            StackRole::Detail => &self.detail_bar,
        }
    }

    fn bar_mut(&mut self, role: StackRole) -> &mut ActionBar {
        match role {
            StackRole::Master => &mut self.master_bar,
            StackRole::Detail => &mut self.detail_bar,
        }
    }

    /// Run a bar operation with content, tint and toggles taken from the
    /// top of `role`'s region.
    fn bar_op(
        &mut self,
        role: StackRole,
        op: BarOp,
        tx: Option<&mut Transaction<Effect>>,
    ) -> Result<()> {
        let descriptor = self.descriptor_for(role);
        let toggles = self.toggles_for(role);
        let tint = self.top(role).and_then(TintProvider::tint);
        let bar = match role {
            StackRole::Master => &mut self.master_bar,
            StackRole::Detail => &mut self.detail_bar,
        };

        let mut mapped;
        let coordinator: Option<&mut dyn Coordinator<BarStep>> = match tx {
            Some(tx) => {
                mapped = MapCoordinator::new(tx, move |step| Effect::Bar(role, step));
                Some(&mut mapped)
            }
            None => None,
        };

        let enabled = toggles.actions_enabled;
        match op {
            BarOp::Raise => bar.raise(descriptor, enabled, coordinator)?,
            BarOp::RaiseOrUpdate if !bar.is_raised() => {
                bar.raise(descriptor, enabled, coordinator)?;
            }
            BarOp::RaiseOrUpdate | BarOp::Update => {
                bar.update(descriptor, enabled, coordinator)?;
            }
            BarOp::Refresh => {
                if bar.is_raised() {
                    bar.update(descriptor, enabled, coordinator)?;
                }
            }
            BarOp::LowerIfRaised => {
                if bar.is_raised() {
                    bar.lower(coordinator)?;
                }
                return Ok(());
            }
        }
        bar.set_tint(tint);
        bar.set_elevated(toggles.elevated);
        Ok(())
    }
}

const fn role_index(role: StackRole) -> usize {
    match role {
        StackRole::Master => 0,
        StackRole::Detail => 1,
    }
}

fn expect_role(unit: &ContentUnit, expected: Role) -> Result<()> {
    if unit.role() == expected {
        Ok(())
    } else {
        Err(Error::RoleMismatch {
            expected,
            actual: unit.role(),
        })
    }
}
