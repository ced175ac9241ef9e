//! Monte Carlo Tree Search implementation.
//!
//! Each iteration runs SELECT, EXPAND, ROLLOUT and BACKPROPAGATE:
//!
//! - **Select**: from the root observation, take the first unvisited action
//!   of the current node, or the UCB1 maximizer once all have been tried.
//!   Nodes are created on first visit with the environment's legal moves.
//! - **Expand**: the first visit to an action is its expansion; no child
//!   nodes are pre-allocated.
//! - **Rollout**: after a leaf action, both sides play uniformly random
//!   moves on a private copy of the environment until the game ends.
//! - **Backpropagate**: every `(observation, action)` on the path gets one
//!   visit and the terminal value.
//!
//! The table holds the searching player's decision points only. Between
//! two of them the opponent's reply is drawn from the random policy, the
//! same opponent the policy is evaluated against.

use std::time::{Duration, Instant};

use connect4_core::{Agent, Connect4Error, Environment, Player, Result, TimeStep};
use rand::Rng;
use tracing::{debug, trace};

use crate::{
    config::{MctsConfig, TreeReuse},
    node::{ActionStats, Node},
    random::RandomPolicy,
    tree::NodeTable,
};

/// Result of an MCTS search.
#[derive(Clone, Debug)]
pub struct SearchResult {
    /// Visited root action with the highest mean value.
    pub best_action: usize,

    /// Statistics of every legal root action, in action order.
    pub root_stats: Vec<(usize, ActionStats)>,

    /// Iterations run by this search.
    pub iterations: usize,

    /// Wall-clock time spent searching.
    pub elapsed: Duration,
}

impl SearchResult {
    /// Visit count for each root action.
    pub fn visit_counts(&self) -> Vec<(usize, u32)> {
        self.root_stats.iter().map(|(a, s)| (*a, s.visits)).collect()
    }

    /// Statistics of the chosen action.
    pub fn best_stats(&self) -> ActionStats {
        self.root_stats
            .iter()
            .find(|(a, _)| *a == self.best_action)
            .map(|(_, s)| *s)
            .unwrap_or_default()
    }
}

/// UCB1 Monte Carlo Tree Search policy.
///
/// Generic over:
/// - `E`: the environment, cloned once as a private simulator
/// - `R`: the random number generator driving rollouts
pub struct MctsPolicy<E: Environment, R: Rng> {
    config: MctsConfig,
    sim: E,
    rollout: RandomPolicy<R>,
    table: NodeTable<E::Observation>,
}

impl<E, R> MctsPolicy<E, R>
where
    E: Environment,
    R: Rng,
{
    /// Create a new policy. `env` is only used as a template for the
    /// simulator and is never stepped by the live game through this policy.
    pub fn new(config: MctsConfig, env: &E, rng: R) -> Self {
        Self {
            config,
            sim: env.clone(),
            rollout: RandomPolicy::new(rng),
            table: NodeTable::new(),
        }
    }

    pub fn config(&self) -> &MctsConfig {
        &self.config
    }

    /// Node for `observation`, if a search has reached it.
    pub fn node(&self, observation: &E::Observation) -> Option<&Node> {
        self.table.get(observation)
    }

    /// Number of nodes in the table.
    pub fn table_len(&self) -> usize {
        self.table.len()
    }

    /// Drop all search statistics.
    pub fn clear(&mut self) {
        trace!(nodes = self.table.len(), "clearing node table");
        self.table.clear();
    }

    /// Visited action with the highest mean value at `observation`, ties
    /// to the first in action order. `None` if nothing has been visited.
    pub fn best_action(&self, observation: &E::Observation) -> Option<usize> {
        self.table.get(observation).and_then(Node::best_action)
    }

    /// Search from `observation` with `to_move` to play until the budget
    /// runs out. At least one iteration always runs.
    ///
    /// # Errors
    /// `InvalidBoard` if the observation cannot be loaded, `GameOver` if it
    /// is terminal, `NoLegalMoves` if it offers no action. Any illegal move
    /// reported by the simulator during an iteration is returned as is.
    ///
    /// # Panics
    /// Panics if the root has no visited action after the search.
    pub fn search(&mut self, observation: E::Observation, to_move: Player) -> Result<SearchResult> {
        self.sim.set_state(observation, to_move.is_one())?;
        if self.sim.is_terminal() {
            return Err(Connect4Error::GameOver);
        }
        if self.sim.legal_moves(&observation).is_empty() {
            return Err(Connect4Error::NoLegalMoves);
        }

        let start = Instant::now();
        let mut iterations = 0;
        loop {
            self.iterate(observation, to_move)?;
            iterations += 1;
            if self.config.budget.is_exhausted(iterations, start.elapsed()) {
                break;
            }
        }
        let elapsed = start.elapsed();

        // INVARIANT: every iteration records one root action
        let root = self
            .table
            .get(&observation)
            .expect("BUG: root node missing after search");
        let best_action = root
            .best_action()
            .expect("BUG: search finished without visiting a root action");

        Ok(SearchResult {
            best_action,
            root_stats: root.actions().to_vec(),
            iterations,
            elapsed,
        })
    }

    /// Run one select -> expand -> rollout -> backpropagate cycle.
    fn iterate(&mut self, root: E::Observation, root_player: Player) -> Result<()> {
        self.sim.set_state(root, root_player.is_one())?;

        let mut path = Vec::new();
        let mut observation = root;

        let reward = loop {
            let sim = &self.sim;
            let selection = self
                .table
                .get_or_insert_with(observation, || sim.legal_moves(&observation))
                .select(&self.config)
                .expect("BUG: non-terminal position with no legal actions");

            path.push((observation, selection.action()));
            let step = self.sim.step(selection.action())?;
            if step.is_last() {
                break step.reward;
            }

            if selection.is_leaf() {
                break self.play_out()?;
            }

            // Opponent reply between two of our decision points
            let legal = self.sim.legal_moves(&step.observation);
            let reply = self.rollout.choose(&legal)?;
            let step = self.sim.step(reply)?;
            if step.is_last() {
                break step.reward;
            }
            observation = step.observation;
        };

        let value = self.config.reward_frame.value(reward, root_player);
        self.table.backpropagate(&path, value);
        Ok(())
    }

    /// Random self-play from the simulator's position to the end of the
    /// game, returning the terminal reward.
    fn play_out(&mut self) -> Result<f32> {
        loop {
            let legal = self.sim.legal_moves(&self.sim.observation());
            let action = self.rollout.choose(&legal)?;
            let step = self.sim.step(action)?;
            if step.is_last() {
                return Ok(step.reward);
            }
        }
    }
}

impl<E, R> Agent<E::Observation> for MctsPolicy<E, R>
where
    E: Environment,
    R: Rng,
{
    fn select_action(
        &mut self,
        timestep: &TimeStep<E::Observation>,
        legal_moves: &[usize],
    ) -> Result<usize> {
        if legal_moves.is_empty() {
            return Err(Connect4Error::NoLegalMoves);
        }
        if self.config.tree_reuse == TreeReuse::Decision {
            self.clear();
        }

        let result = self.search(timestep.observation, timestep.to_move)?;
        let stats = result.best_stats();
        debug!(
            iterations = result.iterations,
            elapsed_ms = result.elapsed.as_millis() as u64,
            nodes = self.table.len(),
            action = result.best_action,
            visits = stats.visits,
            mean = stats.mean_value(),
            "mcts decision"
        );
        Ok(result.best_action)
    }

    fn observe_first(&mut self, _timestep: &TimeStep<E::Observation>) {
        self.clear();
    }
}
