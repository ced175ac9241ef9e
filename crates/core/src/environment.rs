use std::fmt::Debug;
use std::hash::Hash;

use crate::{Player, Result, TimeStep};

/// A turn-based two-player environment.
///
/// This is the capability set the agents consume. Actions are column-like
/// indices listed by [`Environment::legal_moves`]. An environment is a plain value: search
/// code clones one to get a private simulation copy and re-seats it on any
/// position with [`Environment::set_state`].
pub trait Environment: Clone {
    /// Canonical, hashable encoding of a position.
    type Observation: Copy + Eq + Hash + Debug;

    /// Start a new episode and return its first time step.
    fn reset(&mut self) -> TimeStep<Self::Observation>;

    /// Apply `action` for the player to move.
    ///
    /// # Errors
    /// Returns an illegal-move error if the action is out of range, the
    /// column is full, or the episode is already over. The state is left
    /// untouched in that case and the turn does not pass.
    fn step(&mut self, action: usize) -> Result<TimeStep<Self::Observation>>;

    /// Legal actions for a position, in ascending order.
    fn legal_moves(&self, observation: &Self::Observation) -> Vec<usize>;

    /// Re-seat the environment on an arbitrary position.
    ///
    /// Every derived counter is rebuilt from the observation itself.
    fn set_state(&mut self, observation: Self::Observation, player_one_to_move: bool)
        -> Result<()>;

    /// Observation of the current position.
    fn observation(&self) -> Self::Observation;

    /// Player whose turn it is.
    fn to_move(&self) -> Player;

    /// True once the current episode has ended.
    fn is_terminal(&self) -> bool;
}
