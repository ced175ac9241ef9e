//! Node table keyed by observation.
//!
//! Positions reached by different move orders share one node, so the
//! table is a map from the canonical observation to its statistics rather
//! than a tree of parent/child links.

use std::collections::HashMap;
use std::hash::Hash;

use crate::node::Node;

/// Observation-keyed MCTS node storage.
#[derive(Clone, Debug)]
pub struct NodeTable<O> {
    nodes: HashMap<O, Node>,
}

impl<O: Copy + Eq + Hash> NodeTable<O> {
    /// Create an empty table.
    pub fn new() -> Self {
        Self {
            nodes: HashMap::new(),
        }
    }

    pub fn get(&self, observation: &O) -> Option<&Node> {
        self.nodes.get(observation)
    }

    /// Node for `observation`, created over `legal_actions()` if missing.
    pub fn get_or_insert_with<F>(&mut self, observation: O, legal_actions: F) -> &mut Node
    where
        F: FnOnce() -> Vec<usize>,
    {
        self.nodes
            .entry(observation)
            .or_insert_with(|| Node::new(&legal_actions()))
    }

    /// Record one iteration along `path`, adding `value` to every step.
    ///
    /// # Panics
    /// Panics if a path observation has no node; selection creates every
    /// node before it records a step through it.
    pub fn backpropagate(&mut self, path: &[(O, usize)], value: f64) {
        for (observation, action) in path {
            self.nodes
                .get_mut(observation)
                .expect("BUG: path passes through an observation with no node")
                .record(*action, value);
        }
    }

    /// Number of nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Drop every node.
    pub fn clear(&mut self) {
        self.nodes.clear();
    }
}

impl<O: Copy + Eq + Hash> Default for NodeTable<O> {
    fn default() -> Self {
        Self::new()
    }
}
