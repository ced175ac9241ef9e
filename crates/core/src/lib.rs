//! Connect Four Core - shared vocabulary for the engine and the agents
//!
//! This crate defines what the board engine exposes and what the policies
//! consume, without depending on either.
//!
//! # Types
//!
//! - [`Environment`] - Capability set of a playable game
//! - [`Agent`] - Capability set of a player
//! - [`Observation`] - Two-bitmask board encoding
//! - [`TimeStep`] - Result of `reset` and `step`
//! - [`Connect4Error`] - Error taxonomy

mod agent;
mod environment;
mod error;
mod types;

pub use agent::Agent;
pub use environment::Environment;
pub use error::{Connect4Error, Result};
pub use types::{Observation, Player, StepType, TimeStep};
