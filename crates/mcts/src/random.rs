//! Uniform random policy.
//!
//! Serves as the baseline opponent and as the rollout policy inside MCTS.

use connect4_core::{Agent, Connect4Error, Result, TimeStep};
use rand::Rng;

/// Picks uniformly among the legal moves it is given.
#[derive(Clone, Debug)]
pub struct RandomPolicy<R: Rng> {
    rng: R,
}

impl<R: Rng> RandomPolicy<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    /// Uniform choice from `legal_moves`.
    ///
    /// # Errors
    /// `NoLegalMoves` if `legal_moves` is empty. Callers check for a
    /// terminal state first.
    pub fn choose(&mut self, legal_moves: &[usize]) -> Result<usize> {
        if legal_moves.is_empty() {
            return Err(Connect4Error::NoLegalMoves);
        }
        let idx = self.rng.gen_range(0..legal_moves.len());
        Ok(legal_moves[idx])
    }
}

impl<O, R: Rng> Agent<O> for RandomPolicy<R> {
    fn select_action(&mut self, _timestep: &TimeStep<O>, legal_moves: &[usize]) -> Result<usize> {
        self.choose(legal_moves)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use connect4_core::Observation;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_choose_from_legal_moves() {
        let mut policy = RandomPolicy::new(ChaCha8Rng::seed_from_u64(7));
        let legal = [1, 4, 6];
        for _ in 0..100 {
            assert!(legal.contains(&policy.choose(&legal).unwrap()));
        }
    }

    #[test]
    fn test_single_move() {
        let mut policy = RandomPolicy::new(ChaCha8Rng::seed_from_u64(0));
        assert_eq!(policy.choose(&[5]).unwrap(), 5);
    }

    #[test]
    fn test_no_legal_moves() {
        let mut policy = RandomPolicy::new(ChaCha8Rng::seed_from_u64(0));
        assert_eq!(policy.choose(&[]).unwrap_err(), Connect4Error::NoLegalMoves);

        let first = TimeStep::first(Observation::EMPTY);
        assert_eq!(
            policy.select_action(&first, &[]).unwrap_err(),
            Connect4Error::NoLegalMoves
        );
    }

    #[test]
    fn test_roughly_uniform() {
        let mut policy = RandomPolicy::new(ChaCha8Rng::seed_from_u64(42));
        let legal: Vec<usize> = (0..7).collect();
        let mut counts = [0usize; 7];
        for _ in 0..7000 {
            counts[policy.choose(&legal).unwrap()] += 1;
        }
        // Each column expected 1000 times
        for count in counts {
            assert!((800..1200).contains(&count), "count {} far from uniform", count);
        }
    }

    #[test]
    fn test_deterministic_for_seed() {
        let legal: Vec<usize> = (0..7).collect();
        let draw = |seed: u64| {
            let mut policy = RandomPolicy::new(ChaCha8Rng::seed_from_u64(seed));
            (0..50)
                .map(|_| policy.choose(&legal).unwrap())
                .collect::<Vec<_>>()
        };
        assert_eq!(draw(12345), draw(12345));
        assert_ne!(draw(1), draw(2));
    }
}
