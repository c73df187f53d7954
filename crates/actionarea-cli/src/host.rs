//! Content host used by the terminal front end.
//!
//! Records every notification the controller sends, forwards back actions
//! into a list the caller drains, and keeps per-unit feature toggles that
//! the dashboard and scenarios can flip at runtime.

use std::collections::{HashMap, HashSet};
use std::fmt;

use actionarea_core::content::{BackBinding, ContentId, FeatureToggles, StackRole};
use actionarea_core::host::{ContentHost, FeatureToggleProvider};
use serde::Serialize;

/// One notification received from the controller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum HostRecord {
    /// A stack top is about to change
    WillShow {
        /// Stack whose top changes
        role: StackRole,
        /// Incoming top, `None` when the stack empties
        top: Option<ContentId>,
        /// Whether the change is animated
        animated: bool,
    },
    /// A stack top has changed
    DidShow {
        /// Stack whose top changed
        role: StackRole,
        /// New top
        top: Option<ContentId>,
    },
    /// The original back action of a control was performed
    Back {
        /// Binding that was replayed
        binding: BackBinding,
    },
}

impl fmt::Display for HostRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let top = |top: &Option<ContentId>| top.map_or_else(|| "-".to_string(), |id| id.short());
        match self {
            Self::WillShow {
                role,
                top: id,
                animated,
            } => {
                write!(f, "will show {} {}", role, top(id))?;
                if *animated {
                    f.write_str(" (animated)")?;
                }
                Ok(())
            }
            Self::DidShow { role, top: id } => write!(f, "did show {} {}", role, top(id)),
            Self::Back { binding } => write!(f, "back -> {}", binding),
        }
    }
}

/// Host that records notifications and serves feature toggles.
#[derive(Debug, Default)]
pub struct DemoHost {
    records: Vec<HostRecord>,
    unread: usize,
    toggles: HashMap<ContentId, FeatureToggles>,
    observed: HashSet<ContentId>,
}

impl DemoHost {
    /// Create an empty host.
    pub fn new() -> Self {
        Self::default()
    }

    /// Every notification so far, oldest first.
    pub fn records(&self) -> &[HostRecord] {
        &self.records
    }

    /// Notifications recorded since the last call.
    pub fn take_unread(&mut self) -> Vec<HostRecord> {
        let fresh = self.records[self.unread..].to_vec();
        self.unread = self.records.len();
        fresh
    }

    /// Back actions performed so far, oldest first.
    pub fn dispatched(&self) -> Vec<&BackBinding> {
        self.records
            .iter()
            .filter_map(|record| match record {
                HostRecord::Back { binding } => Some(binding),
                _ => None,
            })
            .collect()
    }

    /// Override the toggles reported for a unit.
    pub fn set_toggles(&mut self, id: ContentId, toggles: FeatureToggles) {
        self.toggles.insert(id, toggles);
    }

    /// Whether the controller currently subscribes to a unit's toggles.
    pub fn is_observed(&self, id: ContentId) -> bool {
        self.observed.contains(&id)
    }
}

impl ContentHost for DemoHost {
    fn will_show(&mut self, role: StackRole, top: Option<ContentId>, animated: bool) {
        self.records.push(HostRecord::WillShow {
            role,
            top,
            animated,
        });
    }

    fn did_show(&mut self, role: StackRole, top: Option<ContentId>) {
        self.records.push(HostRecord::DidShow { role, top });
    }

    fn dispatch_back(&mut self, binding: &BackBinding) {
        tracing::debug!(%binding, "back action forwarded to host");
        self.records.push(HostRecord::Back {
            binding: binding.clone(),
        });
    }
}

impl FeatureToggleProvider for DemoHost {
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
