use crate::{Result, TimeStep};

/// A policy that can sit at the table.
///
/// Random and search-based players implement the same trait so the game
/// loop can treat them interchangeably.
pub trait Agent<O> {
    /// Choose an action for the position in `timestep`.
    ///
    /// `legal_moves` is the environment's legal-move list for that position.
    ///
    /// # Errors
    /// Returns `Connect4Error::NoLegalMoves` when `legal_moves` is empty.
    fn select_action(&mut self, timestep: &TimeStep<O>, legal_moves: &[usize]) -> Result<usize>;

    /// Called with the first time step of every episode.
    fn observe_first(&mut self, _timestep: &TimeStep<O>) {}

    /// Called after every move, by either player.
    fn observe(&mut self, _action: usize, _next: &TimeStep<O>) {}

    /// Policy update hook, called once per finished episode.
    fn update(&mut self) {}
}
