//! Garden Engine - headless host for Time Gardener sessions.
//!
//! This crate provides the pieces the `garden` binary wires together:
//! configuration loading, scripted input and the fixed-timestep run loop.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(clippy::unwrap_used)]

pub mod config;
pub mod runner;
pub mod script;

pub use config::EngineConfig;
pub use runner::{RunSummary, Runner};
pub use script::{Script, ScriptStep};
