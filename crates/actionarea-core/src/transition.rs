//! Transition type automaton.
//!
//! [`TransitionType`] tracks where the master stack sits relative to
//! entering or leaving the adaptive presentation. It evolves only through
//! discrete [`Phase`]s, and every (type, phase) pair that the table below
//! does not name is an error:
//!
//! ```text
//! external  --willShow, count>0-->   enter
//! external  --willShow, count==0-->  external
//! external  --didShow-->             external
//! enter     --willShow, count>0-->   enter
//! enter     --didShow-->             internal
//! internal  --willShow, count>0-->   internal
//! internal  --didShow-->             internal
//! internal  --back, count==1-->      leave
//! internal  --back, count>1-->       internal
//! leave     --willShow, count==0-->  leave
//! leave     --didShow-->             external
//! size(l)   --didShow-->             size(l)
//! size      --didTransition-->       internal if count>0, else external
//! any       --willTransition(s)-->   size(resolve(s, count))
//! ```
//!
//! `count` is the master stack count: before the pop for `back`, after the
//! stack change for `willShow`.

use std::fmt;

use serde::Serialize;

use crate::error::{Error, Result};
use crate::layout::{Layout, LayoutPolicy, Orientation, Size};

/// Automaton state for the master stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(tag = "type", content = "layout", rename_all = "lowercase")]
pub enum TransitionType {
    /// First master unit is being presented
    Enter,
    /// Navigation within presented master content
    Internal,
    /// Last master unit is being dismissed
    Leave,
    /// No master content is presented
    #[default]
    External,
    /// A size-class change towards the given layout is in flight
    Size(Layout),
}

/// Discrete event driving the automaton.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Stack content is about to change
    WillShow,
    /// Stack content change has completed
    DidShow,
    /// A back action is about to pop the master stack
    Back,
    /// The display is about to change to the given size
    WillTransition(Size),
    /// The size change has completed
    DidTransition,
}

/// Where a phase originated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    /// User-initiated back navigation
    BackAction,
    /// Stack-driven show/hide notification
    Delegate,
    /// Size-class change
    ViewTransition,
}

impl TransitionType {
    /// Apply a phase, returning the next state.
    pub fn next(self, phase: Phase, count: usize, policy: &LayoutPolicy) -> Result<Self> {
        let next = match (self, phase) {
            (_, Phase::WillTransition(size)) => Self::Size(policy.resolve(size, count)),

            (Self::External, Phase::WillShow) if count > 0 => Self::Enter,
            (Self::External, Phase::WillShow | Phase::DidShow) => Self::External,

            (Self::Enter, Phase::WillShow) if count > 0 => Self::Enter,
            (Self::Enter | Self::Internal, Phase::DidShow) => Self::Internal,

            (Self::Internal, Phase::WillShow) if count > 0 => Self::Internal,
            (Self::Internal, Phase::Back) if count == 1 => Self::Leave,
            (Self::Internal, Phase::Back) if count > 1 => Self::Internal,

            (Self::Leave, Phase::WillShow) if count == 0 => Self::Leave,
            (Self::Leave, Phase::DidShow) => Self::External,

            (Self::Size(layout), Phase::DidShow) => Self::Size(layout),
            (Self::Size(_), Phase::DidTransition) if count > 0 => Self::Internal,
            (Self::Size(_), Phase::DidTransition) => Self::External,

            (transition, phase) => {
                return Err(Error::UnexpectedPhase {
                    transition,
                    phase,
                    count,
                })
            }
        };

        tracing::debug!(from = %self, %phase, count, to = %next, "transition");
        Ok(next)
    }

    /// Reject (type, source) pairs that can never occur in an orientation.
    pub fn check_source(self, source: Source, orientation: Orientation) -> Result<()> {
        let illegal = match (self, source, orientation) {
            (Self::Enter, Source::BackAction, _) => true,
            (Self::External | Self::Size(_), Source::BackAction, Orientation::Landscape) => true,
            // a view transition only ever yields a size change
            (transition, Source::ViewTransition, _) => !transition.is_size(),
            _ => false,
        };
        if illegal {
            return Err(Error::IllegalSource {
                transition: self,
                origin: source,
                orientation,
            });
        }
        Ok(())
    }

    /// Whether a size-class change is in flight.
    pub const fn is_size(&self) -> bool {
        matches!(self, Self::Size(_))
    }
}

impl fmt::Display for TransitionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Enter => f.write_str("enter"),
            Self::Internal => f.write_str("internal"),
            Self::Leave => f.write_str("leave"),
            Self::External => f.write_str("external"),
            Self::Size(layout) => write!(f, "size({layout})"),
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::WillShow => f.write_str("willShow"),
            Self::DidShow => f.write_str("didShow"),
            Self::Back => f.write_str("back"),
            Self::WillTransition(size) => write!(f, "willTransition({size})"),
            Self::DidTransition => f.write_str("didTransition"),
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BackAction => f.write_str("backAction"),
            Self::Delegate => f.write_str("delegate"),
            Self::ViewTransition => f.write_str("viewTransition"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::SubMode;

    const WIDE: Size = Size::new(160, 40);

    fn step(from: TransitionType, phase: Phase, count: usize) -> Result<TransitionType> {
        from.next(phase, count, &LayoutPolicy::default())
    }

    #[test]
    fn test_documented_transitions() {
        use TransitionType::{Enter, External, Internal, Leave};

        assert_eq!(step(External, Phase::WillShow, 1).ok(), Some(Enter));
        assert_eq!(step(External, Phase::WillShow, 0).ok(), Some(External));
        assert_eq!(step(Enter, Phase::DidShow, 1).ok(), Some(Internal));
        assert_eq!(step(Internal, Phase::WillShow, 2).ok(), Some(Internal));
        assert_eq!(step(Internal, Phase::Back, 1).ok(), Some(Leave));
        assert_eq!(step(Leave, Phase::DidShow, 0).ok(), Some(External));
    }

    #[test]
    fn test_size_transitions() {
        let size = step(TransitionType::Internal, Phase::WillTransition(WIDE), 1)
            .expect("willTransition is accepted everywhere");
        assert_eq!(
            size,
            TransitionType::Size(Layout::landscape(WIDE, SubMode::Expanded))
        );
        assert_eq!(
            step(size, Phase::DidTransition, 1).ok(),
            Some(TransitionType::Internal)
        );
        assert_eq!(
            step(size, Phase::DidTransition, 0).ok(),
            Some(TransitionType::External)
        );
    }

    #[test]
    fn test_unlisted_pairs_are_errors() {
        use TransitionType::{Enter, External, Internal, Leave};

        for (from, phase, count) in [
            (External, Phase::Back, 1),
            (Enter, Phase::Back, 1),
            (Leave, Phase::Back, 1),
            (Internal, Phase::Back, 0),
            (Internal, Phase::WillShow, 0),
            (Leave, Phase::WillShow, 1),
            (Internal, Phase::DidTransition, 1),
            (External, Phase::DidTransition, 0),
        ] {
            assert!(
                matches!(step(from, phase, count), Err(Error::UnexpectedPhase { .. })),
                "{from} on {phase} with {count}"
            );
        }
    }

    #[test]
    fn test_every_reachable_pair_is_defined_or_rejected() {
        let states = [
            TransitionType::External,
            TransitionType::Enter,
            TransitionType::Internal,
            TransitionType::Leave,
            TransitionType::Size(Layout::portrait(Size::new(60, 40))),
        ];
        let phases = [
            Phase::WillShow,
            Phase::DidShow,
            Phase::Back,
            Phase::WillTransition(WIDE),
            Phase::DidTransition,
        ];
        for state in states {
            for phase in phases {
                for count in 0..3 {
                    match step(state, phase, count) {
                        Ok(_) | Err(Error::UnexpectedPhase { .. }) => {}
                        Err(other) => panic!("unexpected error {other}"),
                    }
                }
            }
        }
    }

    #[test]
    fn test_illegal_sources() {
        assert!(TransitionType::Enter
            .check_source(Source::BackAction, Orientation::Portrait)
            .is_err());
        assert!(TransitionType::External
            .check_source(Source::BackAction, Orientation::Landscape)
            .is_err());
        assert!(TransitionType::Size(Layout::portrait(WIDE))
            .check_source(Source::BackAction, Orientation::Landscape)
            .is_err());
        assert!(TransitionType::Internal
            .check_source(Source::BackAction, Orientation::Landscape)
            .is_ok());
        assert!(TransitionType::Enter
            .check_source(Source::Delegate, Orientation::Landscape)
            .is_ok());
        assert!(TransitionType::Size(Layout::portrait(WIDE))
            .check_source(Source::ViewTransition, Orientation::Portrait)
            .is_ok());
        assert!(TransitionType::Internal
            .check_source(Source::ViewTransition, Orientation::Landscape)
            .is_err());
    }
}
