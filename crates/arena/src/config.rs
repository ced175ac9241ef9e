//! Command-line configuration for the arena.
//!
//! Every flag can also be set through a `C4_*` environment variable; flags
//! given on the command line take priority.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{anyhow, Result};
use clap::{Args, ValueEnum};
use connect4_core::Player;
use connect4_mcts::{MctsConfig, RewardFrame, SearchBudget, TreeReuse};
use serde::Serialize;
use tracing::level_filters::LevelFilter;

/// Which side the MCTS policy plays.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Seat {
    One,
    Two,
    /// Player one in even-numbered games, player two in odd ones.
    Alternate,
}

impl Seat {
    /// Seat of the MCTS policy in game `index` of a round.
    pub fn for_game(self, index: usize) -> Player {
        match self {
            Seat::One => Player::One,
            Seat::Two => Player::Two,
            Seat::Alternate => Player::from(index % 2 == 0),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum FrameArg {
    /// Raw reward, positive when player one wins.
    PlayerOne,
    /// Reward from the searching player's side.
    Mover,
}

impl From<FrameArg> for RewardFrame {
    fn from(arg: FrameArg) -> Self {
        match arg {
            FrameArg::PlayerOne => RewardFrame::PlayerOne,
            FrameArg::Mover => RewardFrame::Mover,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReuseArg {
    /// Keep the node table for the whole game.
    Episode,
    /// Start every move from an empty table.
    Decision,
}

impl From<ReuseArg> for TreeReuse {
    fn from(arg: ReuseArg) -> Self {
        match arg {
            ReuseArg::Episode => TreeReuse::Episode,
            ReuseArg::Decision => TreeReuse::Decision,
        }
    }
}

/// Settings for the `evaluate` command.
#[derive(Args, Debug, Clone, Serialize)]
pub struct EvaluateConfig {
    /// Games per round
    #[arg(long, env = "C4_N_GAMES", default_value_t = 100)]
    pub n_games: usize,

    /// Number of rounds
    #[arg(long, env = "C4_N_ROUNDS", default_value_t = 1)]
    pub n_rounds: usize,

    /// Worker threads playing games in parallel
    #[arg(long, env = "C4_N_THREADS", default_value_t = 1)]
    pub n_threads: usize,

    /// Search time per MCTS move, in milliseconds
    #[arg(long, env = "C4_TIME_BUDGET_MS", default_value_t = 100)]
    pub time_budget_ms: u64,

    /// Fixed iterations per MCTS move; overrides the time budget
    #[arg(long, env = "C4_ITERATIONS")]
    pub iterations: Option<usize>,

    /// Base random seed
    #[arg(long, env = "C4_SEED", default_value_t = 42)]
    pub seed: u64,

    /// Side played by MCTS
    #[arg(long, env = "C4_MCTS_SEAT", value_enum, default_value_t = Seat::One)]
    pub mcts_seat: Seat,

    /// Perspective of backed-up rewards
    #[arg(long, env = "C4_REWARD_FRAME", value_enum, default_value_t = FrameArg::PlayerOne)]
    pub reward_frame: FrameArg,

    /// Lifetime of the MCTS node table
    #[arg(long, env = "C4_TREE_REUSE", value_enum, default_value_t = ReuseArg::Episode)]
    pub tree_reuse: ReuseArg,

    /// Write the per-round report as JSON to this file
    #[arg(long, env = "C4_OUTPUT")]
    pub output: Option<PathBuf>,
}

impl EvaluateConfig {
    pub fn validate(&self) -> Result<()> {
        if self.n_games == 0 {
            return Err(anyhow!("n_games must be greater than 0"));
        }

        if self.n_rounds == 0 {
            return Err(anyhow!("n_rounds must be greater than 0"));
        }

        if self.n_threads == 0 {
            return Err(anyhow!("n_threads must be greater than 0"));
        }

        match self.iterations {
            Some(0) => return Err(anyhow!("iterations must be greater than 0")),
            None if self.time_budget_ms == 0 => {
                return Err(anyhow!("time_budget_ms must be greater than 0"))
            }
            _ => {}
        }

        Ok(())
    }

    /// Per-move search budget.
    pub fn budget(&self) -> SearchBudget {
        match self.iterations {
            Some(iterations) => SearchBudget::Iterations(iterations),
            None => SearchBudget::Time(Duration::from_millis(self.time_budget_ms)),
        }
    }

    pub fn mcts_config(&self) -> MctsConfig {
        MctsConfig {
            budget: self.budget(),
            reward_frame: self.reward_frame.into(),
            tree_reuse: self.tree_reuse.into(),
            ..Default::default()
        }
    }
}

/// Check a `--log-level` value.
pub fn validate_log_level(level: &str) -> Result<()> {
    if level.parse::<LevelFilter>().is_err() {
        return Err(anyhow!(
            "invalid log level '{}', expected one of trace, debug, info, warn, error",
            level
        ));
    }
    Ok(())
}
