//! MCTS configuration parameters.
//!
//! These parameters control selection, the per-decision budget, and how the
//! node table and terminal rewards are treated between searches.

use std::time::Duration;

use connect4_core::Player;

/// When a search stops.
///
/// The budget is checked after each complete select/rollout/backpropagate
/// cycle, so a search always runs at least one iteration and may overrun a
/// time budget by the cost of one rollout.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SearchBudget {
    /// Stop once this much wall-clock time has elapsed.
    Time(Duration),
    /// Stop after this many iterations. Deterministic for a fixed seed.
    Iterations(usize),
}

impl SearchBudget {
    /// True once a search with these totals should stop.
    pub fn is_exhausted(&self, iterations: usize, elapsed: Duration) -> bool {
        match *self {
            SearchBudget::Time(limit) => elapsed >= limit,
            SearchBudget::Iterations(limit) => iterations >= limit,
        }
    }
}

/// Whose perspective terminal rewards are backed up from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum RewardFrame {
    /// Raw environment reward: `+1` for a player-one win, `-1` for player two.
    /// Player two's searches then prefer player-one-favorable lines.
    #[default]
    PlayerOne,
    /// Reward negated when the searching player is player two, so every
    /// search maximizes its own outcome.
    Mover,
}

impl RewardFrame {
    /// Value to back up for a terminal `reward` reached from a search rooted
    /// at a position with `root_player` to move.
    pub fn value(self, reward: f32, root_player: Player) -> f64 {
        let reward = f64::from(reward);
        match self {
            RewardFrame::PlayerOne => reward,
            RewardFrame::Mover => reward * f64::from(root_player.win_reward()),
        }
    }
}

/// Lifetime of the node table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum TreeReuse {
    /// Keep statistics for the whole game; cleared when a new episode starts.
    #[default]
    Episode,
    /// Start every decision from an empty table.
    Decision,
}

/// MCTS configuration parameters.
#[derive(Clone, Debug)]
pub struct MctsConfig {
    /// UCB1 exploration constant `c`.
    pub exploration: f64,

    /// Guard added to the visit counts inside the UCB1 log and divisor.
    pub epsilon: f64,

    /// Per-decision search budget.
    pub budget: SearchBudget,

    pub reward_frame: RewardFrame,

    pub tree_reuse: TreeReuse,
}

impl Default for MctsConfig {
    fn default() -> Self {
        Self {
            exploration: std::f64::consts::SQRT_2,
            epsilon: 1e-5,
            budget: SearchBudget::Time(Duration::from_millis(100)),
            reward_frame: RewardFrame::PlayerOne,
            tree_reuse: TreeReuse::Episode,
        }
    }
}

impl MctsConfig {
    /// Create a config that stops after a fixed number of iterations.
    pub fn with_iterations(iterations: usize) -> Self {
        Self {
            budget: SearchBudget::Iterations(iterations),
            ..Default::default()
        }
    }

    /// Create a config with a wall-clock budget per decision.
    pub fn with_time_budget(budget: Duration) -> Self {
        Self {
            budget: SearchBudget::Time(budget),
            ..Default::default()
        }
    }

    /// Same config, backing rewards up in the given frame.
    pub fn reward_frame(mut self, frame: RewardFrame) -> Self {
        self.reward_frame = frame;
        self
    }

    /// Same config, with the given node-table lifetime.
    pub fn tree_reuse(mut self, reuse: TreeReuse) -> Self {
        self.tree_reuse = reuse;
        self
    }
}
