//! Monte Carlo Tree Search and baseline policies for Connect Four.
//!
//! This crate provides the two players of an evaluation match: a uniform
//! random baseline and a UCB1 MCTS policy. Both implement
//! `connect4_core::Agent`, so the game loop can seat either one.
//!
//! # Features
//!
//! - **Generic**: Works with any `Environment` implementation
//! - **UCB1 Selection**: Unvisited actions first, then `mean + c * sqrt(ln n / n_a)`
//! - **Random Rollouts**: Uniform self-play to the end of the game
//! - **Observation-keyed Table**: Transpositions share statistics
//! - **Configurable Budget**: Wall-clock time or a fixed iteration count
//!
//! # Example
//!
//! ```
//! use connect4_board::ConnectFour;
//! use connect4_core::{Agent, Environment};
//! use connect4_mcts::{MctsConfig, MctsPolicy};
//! use rand::SeedableRng;
//! use rand_chacha::ChaCha8Rng;
//!
//! let mut env = ConnectFour::new();
//! let first = env.reset();
//!
//! let config = MctsConfig::with_iterations(200);
//! let mut mcts = MctsPolicy::new(config, &env, ChaCha8Rng::seed_from_u64(42));
//! mcts.observe_first(&first);
//!
//! let legal = env.legal_moves(&first.observation);
//! let action = mcts.select_action(&first, &legal).unwrap();
//! assert!(legal.contains(&action));
//!
//! let result = mcts.search(first.observation, first.to_move).unwrap();
//! println!("Best action: {}", result.best_action);
//! ```

pub mod config;
mod node;
pub mod random;
pub mod search;
mod tree;

pub use config::{MctsConfig, RewardFrame, SearchBudget, TreeReuse};
pub use node::{ActionStats, Node, Selection};
pub use random::RandomPolicy;
pub use search::{MctsPolicy, SearchResult};
