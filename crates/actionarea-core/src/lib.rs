//! # Action Area Core Library
//!
//! `actionarea-core` provides the adaptive master/detail presentation
//! controller used by the field data collection app: two content stacks,
//! two floating action bars, a size-class dependent layout and a modal
//! interaction mode, all coordinated by one transition automaton.
//!
//! ## Features
//!
//! - **Adaptive layout**: a single merged stack in compact layouts, split
//!   master/detail stacks in expanded layouts, with snapshot cross-fades
//!   between the two
//! - **Action bars**: floating primary/secondary action surfaces that
//!   follow the top-of-stack content
//! - **Back interception**: every back event is observed by the automaton
//!   before the original back action is forwarded
//! - **Modal mode**: locks the presented detail content until released
//!
//! ## Modules
//!
//! - [`action_bar`] - Floating action bar state and visual steps
//! - [`animation`] - Single-slot animation driver with before/during/after phases
//! - [`back`] - Back-navigation interception (override LIFO)
//! - [`config`] - Configuration management
//! - [`content`] - Content units, actions and action descriptors
//! - [`controller`] - The presentation controller
//! - [`host`] - Collaborator traits (content host, feature toggles, tint)
//! - [`layout`] - Layout value type, size classification and metrics
//! - [`stack`] - Ordered content stacks
//! - [`transition`] - Transition type automaton
//!
//! ## Example
//!
//! ```rust,ignore
//! use actionarea_core::content::ContentUnit;
//! use actionarea_core::controller::PresentationController;
//! use actionarea_core::host::NullHost;
//! use actionarea_core::layout::Size;
//!
//! let mut controller = PresentationController::new(NullHost, Size::new(60, 40), &config);
//! controller.show(ContentUnit::master("Survey"))?;
//! controller.show_detail(ContentUnit::detail("Plot 7"))?;
//! controller.back()?;
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::missing_const_for_fn)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]

pub mod action_bar;
pub mod animation;
pub mod back;
pub mod config;
pub mod content;
pub mod controller;
pub mod error;
pub mod host;
pub mod layout;
pub mod stack;
pub mod transition;

pub use error::{Error, Result};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default duration of one visual transition in milliseconds
pub const DEFAULT_ANIMATION_MS: u64 = 250;

/// Default number of secondary actions rendered by an action bar
pub const DEFAULT_MAX_BAR_ITEMS: usize = 4;

/// Default width/height ratio (in terminal cells) at which a size is landscape
pub const DEFAULT_LANDSCAPE_ASPECT: f32 = 2.0;

/// Default minimum width (in cells) for a landscape size class
pub const DEFAULT_MIN_LANDSCAPE_WIDTH: u16 = 100;
