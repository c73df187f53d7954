//! Size-class changes.
//!
//! A size change runs in three phases:
//! - before: snapshot every region whose top unit will change, swap the
//!   stack contents without animation and activate the new layout
//! - during: fade the snapshots to zero opacity
//! - after: discard the snapshots and settle the transition type

use crate::animation::Transaction;
use crate::content::{ContentId, StackRole};
use crate::error::{Error, Result};
use crate::host::{ContentHost, FeatureToggleProvider};
use crate::layout::Size;
use crate::transition::{Phase, Source, TransitionType};

use super::{BarOp, Effect, PresentationController, Snapshot};

impl<H> PresentationController<H>
where
    H: ContentHost + FeatureToggleProvider,
{
    /// The display is about to change to `size`.
    pub fn view_will_transition(&mut self, size: Size) -> Result<()> {
        let count = self.master.len();
        let phase = Phase::WillTransition(size);
        let next = self.transition.next(phase, count, &self.policy)?;
        next.check_source(Source::ViewTransition, self.layout.orientation())?;
        let TransitionType::Size(target) = next else {
            return Err(Error::UnexpectedPhase {
                transition: self.transition,
                phase,
                count,
            });
        };

        let pending = self.transition.is_size();
        let was_expanded = self.layout.is_expanded();
        if target != self.layout {
            tracing::info!(from = %self.layout, to = %target, "layout transition");
        }
        self.transition = next;

        let before = self.visible_tops();
        if target.is_expanded() != was_expanded {
            self.back.release_all(&mut self.master);
            if target.is_expanded() {
                // parked units go back on top before the split
                for unit in self.detail.clear() {
                    self.master.push(unit);
                }
                self.split_stacks();
            } else {
                self.merge_stacks();
            }
            self.back.rebind(&mut self.master);
        }
        self.layout = target;
        self.apply_margins();
        self.snapshot_changed(&before);

        self.sync_bars()?;
        self.observe_tops();

        let mut tx = Transaction::new();
        if !self.snapshots.is_empty() {
            tx.during(Effect::FadeSnapshots);
            tx.after(Effect::DiscardSnapshots);
        }
        if !pending {
            tx.after(Effect::DidTransition);
        }
        self.commit(tx)
    }

    pub(super) fn did_transition(&mut self) -> Result<()> {
        let next = self
            .transition
            .next(Phase::DidTransition, self.master.len(), &self.policy)?;
        self.transition = next;
        for role in [StackRole::Master, StackRole::Detail] {
            let top = self.top_id(role);
            self.host.did_show(role, top);
        }
        Ok(())
    }

    fn visible_tops(&self) -> [(Option<ContentId>, Option<String>); 2] {
        [StackRole::Master, StackRole::Detail].map(|role| {
            let top = self.top(role);
            (
                top.map(crate::content::ContentUnit::id),
                top.map(|unit| unit.title().to_string()),
            )
        })
    }

    fn snapshot_changed(&mut self, before: &[(Option<ContentId>, Option<String>); 2]) {
        for (role, (id, title)) in [StackRole::Master, StackRole::Detail].into_iter().zip(before) {
            if self.top_id(role) != *id {
                self.snapshots.push(Snapshot {
                    region: role,
                    title: title.clone(),
                    alpha: 100,
                });
            }
        }
    }

    /// Put both bars in the state the new layout calls for, without
    /// animation.
    fn sync_bars(&mut self) -> Result<()> {
        let master_raised = !self.master.is_empty();
        let detail_raised = self.layout.is_expanded() && !self.detail.is_empty();

        for (role, raised) in [
            (StackRole::Master, master_raised),
            (StackRole::Detail, detail_raised),
        ] {
            let op = if raised {
                BarOp::RaiseOrUpdate
            } else {
                BarOp::LowerIfRaised
            };
            self.bar_op(role, op, None)?;
        }
        Ok(())
    }
}
