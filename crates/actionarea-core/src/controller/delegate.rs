//! Transition handling per orientation.
//!
//! Once the automaton has moved, the new transition type and the source
//! of the phase decide what happens to the bars and the layout. Portrait
//! layouts have a single merged stack and only the master bar; landscape
//! layouts split into two regions with a bar each.

use crate::animation::Transaction;
use crate::content::StackRole;
use crate::error::{Error, Result};
use crate::host::{ContentHost, FeatureToggleProvider};
use crate::layout::Orientation;
use crate::transition::{Phase, TransitionType};

use super::{BarOp, Effect, PresentationController};

impl<H> PresentationController<H>
where
    H: ContentHost + FeatureToggleProvider,
{
    /// Handle a stack-driven phase. `tx` is `None` when the phase runs
    /// from the completion of an animation.
    pub(super) fn handle_delegate(
        &mut self,
        phase: Phase,
        tx: Option<&mut Transaction<Effect>>,
    ) -> Result<()> {
        match self.layout.orientation() {
            Orientation::Portrait => self.portrait_delegate(phase, tx),
            Orientation::Landscape => self.landscape_delegate(phase, tx),
        }
    }

    /// Handle the back phase after the override has been replayed: pop
    /// whatever the back action removes.
    pub(super) fn handle_back(&mut self, tx: &mut Transaction<Effect>) -> Result<()> {
        match (self.layout.orientation(), self.transition) {
            (Orientation::Portrait, TransitionType::Internal | TransitionType::Leave) => {
                if let Some(unit) = self.master.pop() {
                    tracing::debug!(id = %unit.id(), title = unit.title(), "popped");
                }
                Ok(())
            }
            (Orientation::Landscape, TransitionType::Internal) => {
                self.landscape_pop();
                Ok(())
            }
            (Orientation::Landscape, TransitionType::Leave) => self.landscape_leave(tx),
            (orientation, transition) => Err(Error::IllegalSource {
                transition,
                origin: crate::transition::Source::BackAction,
                orientation,
            }),
        }
    }

    fn portrait_delegate(
        &mut self,
        phase: Phase,
        tx: Option<&mut Transaction<Effect>>,
    ) -> Result<()> {
        if phase != Phase::WillShow {
            return Ok(());
        }
        match self.transition {
            TransitionType::Enter => self.bar_op(StackRole::Master, BarOp::RaiseOrUpdate, tx),
            TransitionType::Internal => self.bar_op(StackRole::Master, BarOp::Update, tx),
            TransitionType::Leave => {
                self.apply_margins();
                self.bar_op(StackRole::Master, BarOp::LowerIfRaised, tx)
            }
            TransitionType::External | TransitionType::Size(_) => Ok(()),
        }
    }

    fn landscape_delegate(
        &mut self,
        phase: Phase,
        mut tx: Option<&mut Transaction<Effect>>,
    ) -> Result<()> {
        match (self.transition, phase) {
            (TransitionType::Enter, Phase::WillShow) => match tx {
                Some(tx) if !self.layout.is_expanded() => self.landscape_enter(tx),
                tx => self.landscape_internal(tx),
            },
            (TransitionType::Internal, Phase::WillShow) => self.landscape_internal(tx),
            (TransitionType::Internal, Phase::DidShow) => {
                self.bar_op(StackRole::Master, BarOp::Refresh, tx.as_deref_mut())?;
                self.bar_op(StackRole::Detail, BarOp::Refresh, tx)
            }
            (TransitionType::Leave, Phase::WillShow) => {
                self.apply_margins();
                self.bar_op(StackRole::Detail, BarOp::LowerIfRaised, tx.as_deref_mut())?;
                self.bar_op(StackRole::Master, BarOp::LowerIfRaised, tx)
            }
            _ => Ok(()),
        }
    }

    /// Morph the single pane into the split layout around the first master.
    fn landscape_enter(&mut self, tx: &mut Transaction<Effect>) -> Result<()> {
        if self.master.is_empty() {
            return Err(Error::NoMasterContent);
        }
        self.snapshots.push(super::Snapshot {
            region: StackRole::Master,
            title: None,
            alpha: 100,
        });

        self.layout = self.layout.expand()?;
        tracing::info!(layout = %self.layout, "layout expanded");
        self.back.release_all(&mut self.master);
        self.split_stacks();
        self.back.rebind(&mut self.master);
        self.apply_margins();

        self.bar_op(StackRole::Detail, BarOp::RaiseOrUpdate, Some(&mut *tx))?;
        self.bar_op(StackRole::Master, BarOp::RaiseOrUpdate, Some(&mut *tx))?;
        tx.during(Effect::FadeSnapshots);
        tx.after(Effect::DiscardSnapshots);
        Ok(())
    }

    /// Bring the detail region in line with the pushed masters.
    fn landscape_internal(&mut self, mut tx: Option<&mut Transaction<Effect>>) -> Result<()> {
        self.recompute_detail();
        self.apply_margins();
        self.bar_op(StackRole::Detail, BarOp::RaiseOrUpdate, tx.as_deref_mut())?;
        self.bar_op(StackRole::Master, BarOp::RaiseOrUpdate, tx)
    }

    /// Pop the top master and the detail region back to the empty state of
    /// the master beneath it.
    fn landscape_pop(&mut self) {
        let Some(master) = self.master.pop() else {
            return;
        };
        let keep = self
            .master
            .top()
            .and_then(|top| {
                self.detail
                    .all()
                    .iter()
                    .position(|unit| unit.empty_state_of() == Some(top.id()))
            })
            .map_or(0, |index| index + 1);
        let removed = self.detail.truncate(keep);
        let dropped = self.return_empty_states(removed);
        tracing::debug!(id = %master.id(), title = master.title(), dropped, "popped master");
    }

    /// Collapse the split layout while the last master leaves.
    fn landscape_leave(&mut self, tx: &mut Transaction<Effect>) -> Result<()> {
        self.take_snapshot(StackRole::Master);
        self.take_snapshot(StackRole::Detail);

        self.layout = self.layout.collapse()?;
        tracing::info!(layout = %self.layout, "layout collapsed");
        self.merge_stacks();
        self.back.release_all(&mut self.master);
        let dropped = self.master.clear();
        tracing::debug!(dropped = dropped.len(), "cleared merged stack");

        tx.during(Effect::FadeSnapshots);
        tx.after(Effect::DiscardSnapshots);
        Ok(())
    }
}
