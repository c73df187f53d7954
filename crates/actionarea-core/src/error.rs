//! Error types for Action Area.
//!
//! Almost every variant is a precondition violation: a caller or the
//! automaton itself asked for something the presentation state machine
//! cannot do from its current state. Those are defects to be caught in
//! testing and are never meant to reach the end user. The remaining
//! variants cover configuration and I/O.

use std::io;

use thiserror::Error;

use crate::action_bar::BarState;
use crate::content::{ContentId, Mode, Role, StackRole};
use crate::layout::{Layout, Orientation};
use crate::transition::{Phase, Source, TransitionType};

/// A specialized `Result` type for Action Area operations.
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for Action Area.
#[derive(Error, Debug)]
pub enum Error {
    /// The automaton has no transition for this (type, phase) pair
    #[error("no transition from {transition} on {phase} with {count} master unit(s)")]
    UnexpectedPhase {
        /// Transition type before the phase
        transition: TransitionType,
        /// Phase that was delivered
        phase: Phase,
        /// Master stack count the phase was evaluated with
        count: usize,
    },

    /// The (type, source) pair is not legal for the current orientation
    #[error("{transition} cannot originate from {origin} in {orientation}")]
    IllegalSource {
        /// Transition type the automaton moved to
        transition: TransitionType,
        /// Origin of the phase
        origin: Source,
        /// Orientation of the active layout
        orientation: Orientation,
    },

    /// A back action arrived with no recorded override to replay
    #[error("back action with an empty override stack")]
    OverrideStackEmpty,

    /// The master stack has nothing to pop
    #[error("nothing to pop from the master stack")]
    NothingToPop,

    /// Mode was set to its current value
    #[error("interaction mode is already {0}")]
    ModeUnchanged(Mode),

    /// Mode change requested without a presented detail unit
    #[error("no detail unit is presented")]
    NoDetailPresented,

    /// Operation is locked while the interaction mode is modal
    #[error("{0} is not allowed while the interaction mode is modal")]
    ModalLocked(&'static str),

    /// Operation requires the modal interaction mode
    #[error("{0} requires the modal interaction mode")]
    NotModal(&'static str),

    /// Expand/collapse on a layout that does not support it
    #[error("cannot {operation} a {layout} layout")]
    LayoutTransform {
        /// Requested transform
        operation: &'static str,
        /// Layout the transform was applied to
        layout: Layout,
    },

    /// Expanding requires at least one master unit
    #[error("cannot expand without master content")]
    NoMasterContent,

    /// A unit with the wrong role was handed to a role-specific operation
    #[error("expected a {expected} unit, got a {actual} unit")]
    RoleMismatch {
        /// Role the operation accepts
        expected: Role,
        /// Role of the unit that was passed
        actual: Role,
    },

    /// Action bar operation is not valid in the bar's current state
    #[error("cannot {operation} the {bar} action bar while {state}")]
    BarState {
        /// Which bar
        bar: StackRole,
        /// Requested operation
        operation: &'static str,
        /// State the bar was in
        state: BarState,
    },

    /// The remembered modal detail is in neither stack
    #[error("modal detail {0} is not owned by any stack")]
    ModalDetailMissing(ContentId),

    /// Configuration file error
    #[error("configuration error: {0}")]
    ConfigError(String),

    /// Invalid configuration value
    #[error("invalid configuration value for '{key}': {reason}")]
    InvalidConfig {
        /// Configuration key
        key: String,
        /// Reason for invalidity
        reason: String,
    },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Serialization error
    #[error("serialization error: {0}")]
    Serialization(String),
}

impl Error {
    /// Returns whether this error is a precondition violation.
    ///
    /// Precondition violations indicate a sequencing bug in a caller or in
    /// the automaton and must be treated as fatal.
    #[must_use]
    pub const fn is_precondition(&self) -> bool {
        !matches!(
            self,
            Self::ConfigError(_)
                | Self::InvalidConfig { .. }
                | Self::Io(_)
                | Self::Serialization(_)
        )
    }

    /// Short machine-readable name of the violated rule.
    #[must_use]
    pub const fn rule(&self) -> &'static str {
        match self {
            Self::UnexpectedPhase { .. } => "unexpected-phase",
            Self::IllegalSource { .. } => "illegal-source",
            Self::OverrideStackEmpty => "override-stack-empty",
            Self::NothingToPop => "nothing-to-pop",
            Self::ModeUnchanged(_) => "mode-unchanged",
            Self::NoDetailPresented => "no-detail-presented",
            Self::ModalLocked(_) => "modal-locked",
            Self::NotModal(_) => "not-modal",
            Self::LayoutTransform { .. } => "layout-transform",
            Self::NoMasterContent => "no-master-content",
            Self::RoleMismatch { .. } => "role-mismatch",
            Self::BarState { .. } => "bar-state",
            Self::ModalDetailMissing(_) => "modal-detail-missing",
            Self::ConfigError(_) | Self::InvalidConfig { .. } => "config",
            Self::Io(_) => "io",
            Self::Serialization(_) => "serialization",
        }
    }
}
