//! Collaborator traits.
//!
//! The controller depends on exactly three outside contracts:
//! - [`ContentHost`]: show notifications and back dispatch
//! - [`FeatureToggleProvider`]: per-unit visual flags with a subscription
//! - [`TintProvider`]: per-unit bar colour

use crate::content::{BackBinding, ContentId, ContentUnit, FeatureToggles, StackRole, Tint};

/// Receives show notifications and forwarded back actions.
pub trait ContentHost {
    /// The top of `role`'s stack is about to change to `top`.
    fn will_show(&mut self, role: StackRole, top: Option<ContentId>, animated: bool);

    /// The top of `role`'s stack has changed to `top`.
    fn did_show(&mut self, role: StackRole, top: Option<ContentId>);

    /// Perform the back action a control was originally bound to.
    fn dispatch_back(&mut self, binding: &BackBinding);
}

/// Supplies the visual flags of the unit on top of a stack.
pub trait FeatureToggleProvider {
    /// Current flags for a unit, if the provider knows it.
    fn toggles(&self, id: ContentId) -> Option<FeatureToggles>;

    /// Start delivering changes for a unit.
    fn observe(&mut self, id: ContentId);

    /// Stop delivering changes for a unit.
    fn unobserve(&mut self, id: ContentId);
}

/// Supplies the colour of the action bars.
pub trait TintProvider {
    /// Tint requested while this provider is on top.
    fn tint(&self) -> Option<Tint>;
}

impl TintProvider for ContentUnit {
    fn tint(&self) -> Option<Tint> {
        Self::tint(self)
    }
}

/// Host that ignores every notification.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullHost;

impl ContentHost for NullHost {
    fn will_show(&mut self, _role: StackRole, _top: Option<ContentId>, _animated: bool) {}

    fn did_show(&mut self, _role: StackRole, _top: Option<ContentId>) {}

    fn dispatch_back(&mut self, _binding: &BackBinding) {}
}

impl FeatureToggleProvider for NullHost {
    fn toggles(&self, _id: ContentId) -> Option<FeatureToggles> {
        None
    }

    fn observe(&mut self, _id: ContentId) {}

    fn unobserve(&mut self, _id: ContentId) {}
}
