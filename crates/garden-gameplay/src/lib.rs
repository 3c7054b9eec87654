//! # Garden Gameplay
//!
//! Gameplay systems for Time Gardener.
//!
//! This crate provides the whole fixed-tick garden simulation:
//! - Cells with a plant lifecycle and weed growth
//! - The grid and neighborhood time effects
//! - The gardener (movement, temporal energy, time ability)
//! - Roaming pests
//! - Beauty and score bookkeeping
//! - Input intents with edge tracking
//! - Event bus and serializable snapshots

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(clippy::unwrap_used)]

pub mod beauty;
pub mod cell;
pub mod config;
pub mod events;
pub mod gardener;
pub mod grid;
pub mod input;
pub mod interaction;
pub mod pest;
pub mod rng;
pub mod simulation;
pub mod snapshot;
pub mod temporal;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::beauty::*;
    pub use crate::cell::*;
    pub use crate::config::*;
    pub use crate::events::*;
    pub use crate::gardener::*;
    pub use crate::grid::*;
    pub use crate::input::*;
    pub use crate::interaction::*;
    pub use crate::pest::*;
    pub use crate::rng::*;
    pub use crate::simulation::*;
    pub use crate::snapshot::*;
    pub use crate::temporal::*;
}

pub use prelude::*;
