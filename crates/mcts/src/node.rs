//! Per-observation node statistics.
//!
//! A node stores one [`ActionStats`] per legal action at its observation,
//! created together with the node in column order.

use crate::config::MctsConfig;

/// Statistics for one action at one node.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ActionStats {
    /// Number of iterations that took this action.
    pub visits: u32,

    /// Sum of backed-up terminal values over those iterations.
    pub value_sum: f64,
}

impl ActionStats {
    /// Mean value (`value_sum / visits`).
    ///
    /// Returns 0.0 if the action has never been visited.
    pub fn mean_value(&self) -> f64 {
        if self.visits == 0 {
            0.0
        } else {
            self.value_sum / f64::from(self.visits)
        }
    }

    /// UCB1 score given the visit count of the owning node.
    pub fn ucb1(&self, node_visits: u32, exploration: f64, epsilon: f64) -> f64 {
        let n = f64::from(node_visits) + epsilon;
        let visits = f64::from(self.visits) + epsilon;
        self.mean_value() + exploration * (n.ln() / visits).sqrt()
    }
}

/// Outcome of the selection rule at one node.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Selection {
    /// First action that has never been visited. The iteration that takes it
    /// finishes with a rollout.
    Leaf(usize),
    /// Every action has been visited; this one maximizes UCB1.
    Ucb(usize),
}

impl Selection {
    pub fn action(self) -> usize {
        match self {
            Selection::Leaf(action) | Selection::Ucb(action) => action,
        }
    }

    pub fn is_leaf(self) -> bool {
        matches!(self, Selection::Leaf(_))
    }
}

/// A node in the search table.
#[derive(Clone, Debug, PartialEq)]
pub struct Node {
    /// Number of iterations that passed through this node.
    pub visits: u32,

    /// `(action, stats)` for every legal action, in ascending action order.
    actions: Vec<(usize, ActionStats)>,
}

impl Node {
    /// Create an unvisited node over the given legal actions.
    pub fn new(legal_actions: &[usize]) -> Self {
        Self {
            visits: 0,
            actions: legal_actions
                .iter()
                .map(|&a| (a, ActionStats::default()))
                .collect(),
        }
    }

    pub fn actions(&self) -> &[(usize, ActionStats)] {
        &self.actions
    }

    /// Statistics of `action`, if it is legal here.
    pub fn stats(&self, action: usize) -> Option<&ActionStats> {
        self.actions.iter().find(|(a, _)| *a == action).map(|(_, s)| s)
    }

    /// Pick the next action to descend through.
    ///
    /// Unvisited actions come first, in action order. Once all have been
    /// tried, the highest UCB1 score wins and ties go to the lower action.
    /// Returns `None` only for a node without legal actions.
    pub fn select(&self, config: &MctsConfig) -> Option<Selection> {
        if let Some(&(action, _)) = self.actions.iter().find(|(_, s)| s.visits == 0) {
            return Some(Selection::Leaf(action));
        }

        let mut best = None;
        let mut best_score = f64::NEG_INFINITY;
        for &(action, stats) in &self.actions {
            let score = stats.ucb1(self.visits, config.exploration, config.epsilon);
            if score > best_score {
                best_score = score;
                best = Some(action);
            }
        }
        best.map(Selection::Ucb)
    }

    /// Record one iteration that took `action` and ended with `value`.
    ///
    /// # Panics
    /// Panics if `action` is not legal at this node.
    pub fn record(&mut self, action: usize, value: f64) {
        let stats = self
            .actions
            .iter_mut()
            .find(|(a, _)| *a == action)
            .map(|(_, s)| s)
            .expect("BUG: backpropagated an action the node never offered");
        stats.visits += 1;
        stats.value_sum += value;
        self.visits += 1;
    }

    /// Visited action with the highest mean value, ties to the first.
    pub fn best_action(&self) -> Option<usize> {
        let mut best = None;
        let mut best_mean = f64::NEG_INFINITY;
        for (action, stats) in self.actions.iter().filter(|(_, s)| s.visits > 0) {
            let mean = stats.mean_value();
            if mean > best_mean {
                best_mean = mean;
                best = Some(*action);
            }
        }
        best
    }
}
