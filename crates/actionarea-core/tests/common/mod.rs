//! Common test utilities for `Action Area` integration tests.
//!
//! This module provides a recording content host and unit builders.

#![allow(dead_code)]

use std::collections::{HashMap, HashSet};

use actionarea_core::config::Config;
use actionarea_core::content::{
    Action, ActionDescriptor, BackBinding, ContentId, ContentUnit, FeatureToggles, StackRole,
};
use actionarea_core::controller::PresentationController;
use actionarea_core::host::{ContentHost, FeatureToggleProvider};
use actionarea_core::layout::Size;

/// A size classified as portrait by the default policy.
pub const NARROW: Size = Size::new(60, 40);

/// A size classified as landscape by the default policy.
pub const WIDE: Size = Size::new(160, 40);

/// One notification received by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostEvent {
    WillShow(StackRole, Option<ContentId>),
    DidShow(StackRole, Option<ContentId>),
}

/// Host that records every notification and forwarded back action.
#[derive(Debug, Default)]
pub struct RecordingHost {
    pub events: Vec<HostEvent>,
    pub dispatched: Vec<BackBinding>,
    pub toggles: HashMap<ContentId, FeatureToggles>,
    pub observed: HashSet<ContentId>,
}

impl RecordingHost {
    /// Override the toggles reported for a unit.
    pub fn set_toggles(&mut self, id: ContentId, toggles: FeatureToggles) {
        self.toggles.insert(id, toggles);
    }
}

impl ContentHost for RecordingHost {
    fn will_show(&mut self, role: StackRole, top: Option<ContentId>, _animated: bool) {
        self.events.push(HostEvent::WillShow(role, top));
    }

    fn did_show(&mut self, role: StackRole, top: Option<ContentId>) {
        self.events.push(HostEvent::DidShow(role, top));
    }

    fn dispatch_back(&mut self, binding: &BackBinding) {
        self.dispatched.push(binding.clone());
    }
}

impl FeatureToggleProvider for RecordingHost {
    fn toggles(&self, id: ContentId) -> Option<FeatureToggles> {
        self.toggles.get(&id).copied()
    }

    fn observe(&mut self, id: ContentId) {
        self.observed.insert(id);
    }

    fn unobserve(&mut self, id: ContentId) {
        self.observed.remove(&id);
    }
}

/// Configuration with animations disabled, so every step runs immediately.
pub fn sync_config() -> Config {
    let mut config = Config::default();
    config.animation.enabled = false;
    config
}

/// Controller with a recording host and synchronous animations.
pub fn controller(size: Size) -> PresentationController<RecordingHost> {
    PresentationController::new(RecordingHost::default(), size, &sync_config())
}

/// Descriptor with a single primary action.
pub fn primary(id: &str) -> ActionDescriptor {
    ActionDescriptor::with_primary(Action::new(id, id))
}

/// Master unit whose primary action is `<title>-open`.
pub fn master(title: &str) -> ContentUnit {
    ContentUnit::master(title).with_descriptor(primary(&format!("{title}-open")))
}

/// Detail unit whose primary action is `<title>-save`.
pub fn detail(title: &str) -> ContentUnit {
    ContentUnit::detail(title).with_descriptor(primary(&format!("{title}-save")))
}

/// Primary action id shown by a bar, if any.
pub fn primary_id(controller: &PresentationController<RecordingHost>, role: StackRole) -> Option<String> {
    let bar = match role {
        StackRole::Master => controller.master_bar(),
        StackRole::Detail => controller.detail_bar(),
    };
    bar.descriptor().primary.as_ref().map(|action| action.id.clone())
}

/// Invariants that must hold between any two controller operations.
pub fn assert_consistent(controller: &PresentationController<RecordingHost>) {
    assert_eq!(
        controller.override_depth(),
        controller.master_stack().len(),
        "one intercepted back control per master stack unit"
    );
    if controller.is_expanded() {
        assert!(controller
            .master_stack()
            .all()
            .iter()
            .all(|unit| unit.empty_state().is_none()));
        assert!(controller.master_bar().descriptor().is_empty());
    } else {
        assert!(!controller.detail_bar().is_raised());
    }
    if controller.master_stack().is_empty() && !controller.is_animating() {
        assert!(!controller.master_bar().is_raised());
    }
}
