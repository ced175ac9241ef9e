//! MCTS versus random evaluation matches.
//!
//! Each game owns its environment, both policies, and the MCTS node table,
//! so games of a round run independently on a rayon pool.

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};
use connect4_board::ConnectFour;
use connect4_core::{Agent, Environment, Observation, Player};
use connect4_mcts::{MctsConfig, MctsPolicy, RandomPolicy};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use rayon::ThreadPool;
use serde::Serialize;
use tracing::{debug, info};

use crate::config::{EvaluateConfig, Seat};

/// Outcome of one finished game.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GameRecord {
    pub seed: u64,
    pub mcts_seat: Player,
    pub winner: Option<Player>,
    /// Final reward: +1 player one won, -1 player two won, 0 draw.
    pub reward: f32,
    pub moves: usize,
}

impl GameRecord {
    pub fn mcts_won(&self) -> bool {
        self.winner == Some(self.mcts_seat)
    }

    pub fn random_won(&self) -> bool {
        self.winner == Some(self.mcts_seat.opposite())
    }
}

/// Play one game of MCTS against the random baseline.
///
/// Both policies draw from generators seeded from `seed`, so a game is
/// reproducible whenever the MCTS budget is an iteration count.
pub fn play_game(config: &MctsConfig, mcts_seat: Player, seed: u64) -> Result<GameRecord> {
    let mut env = ConnectFour::new();
    let mut mcts = MctsPolicy::new(config.clone(), &env, ChaCha8Rng::seed_from_u64(seed));
    let mut random = RandomPolicy::new(ChaCha8Rng::seed_from_u64(seed.wrapping_add(1)));

    // Indexed by `Player::index`
    let mut agents: [&mut dyn Agent<Observation>; 2] = match mcts_seat {
        Player::One => [&mut mcts, &mut random],
        Player::Two => [&mut random, &mut mcts],
    };

    let mut timestep = env.reset();
    for agent in agents.iter_mut() {
        agent.observe_first(&timestep);
    }

    let mut moves = 0;
    while !timestep.is_last() {
        let legal = env.legal_moves(&timestep.observation);
        let action = agents[timestep.to_move.index()]
            .select_action(&timestep, &legal)
            .with_context(|| format!("game {} move {}: no action selected", seed, moves))?;

        timestep = env
            .step(action)
            .with_context(|| format!("game {} move {}: column {} rejected", seed, moves, action))?;
        for agent in agents.iter_mut() {
            agent.observe(action, &timestep);
        }
        moves += 1;
    }

    for agent in agents.iter_mut() {
        agent.update();
    }

    let record = GameRecord {
        seed,
        mcts_seat,
        winner: timestep.winner,
        reward: timestep.reward,
        moves,
    };
    debug!(
        seed = record.seed,
        mcts_seat = %record.mcts_seat,
        reward = record.reward,
        moves = record.moves,
        mcts_won = record.mcts_won(),
        "Game finished"
    );
    Ok(record)
}

/// Tallies for one round of games.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RoundSummary {
    pub round: usize,
    pub games: usize,
    pub mcts_wins: usize,
    pub random_wins: usize,
    pub draws: usize,
    pub avg_game_length: f64,
    pub elapsed_secs: f64,
}

impl RoundSummary {
    pub fn from_records(round: usize, records: &[GameRecord], elapsed_secs: f64) -> Self {
        let games = records.len();
        let mcts_wins = records.iter().filter(|r| r.mcts_won()).count();
        let random_wins = records.iter().filter(|r| r.random_won()).count();
        let total_moves: usize = records.iter().map(|r| r.moves).sum();

        Self {
            round,
            games,
            mcts_wins,
            random_wins,
            draws: games - mcts_wins - random_wins,
            avg_game_length: if games == 0 {
                0.0
            } else {
                total_moves as f64 / games as f64
            },
            elapsed_secs,
        }
    }

    pub fn mcts_win_rate(&self) -> f64 {
        if self.games == 0 {
            0.0
        } else {
            self.mcts_wins as f64 / self.games as f64
        }
    }
}

/// Full evaluation report, written as JSON.
#[derive(Debug, Serialize)]
pub struct EvaluationReport {
    pub config: EvaluateConfig,
    pub rounds: Vec<RoundSummary>,
    pub total_games: usize,
    pub mcts_wins: usize,
    pub random_wins: usize,
    pub draws: usize,
}

impl EvaluationReport {
    pub fn new(config: EvaluateConfig, rounds: Vec<RoundSummary>) -> Self {
        Self {
            total_games: rounds.iter().map(|r| r.games).sum(),
            mcts_wins: rounds.iter().map(|r| r.mcts_wins).sum(),
            random_wins: rounds.iter().map(|r| r.random_wins).sum(),
            draws: rounds.iter().map(|r| r.draws).sum(),
            config,
            rounds,
        }
    }

    pub fn mcts_win_rate(&self) -> f64 {
        if self.total_games == 0 {
            0.0
        } else {
            self.mcts_wins as f64 / self.total_games as f64
        }
    }

    pub fn write_json(&self, path: &Path) -> Result<()> {
        let file =
            File::create(path).with_context(|| format!("Failed to create file: {:?}", path))?;
        serde_json::to_writer_pretty(BufWriter::new(file), self)
            .with_context(|| format!("Failed to write report to {:?}", path))
    }
}

/// Seed of game `game` in round `round`.
fn game_seed(base: u64, round: usize, game: usize) -> u64 {
    base.wrapping_add(round as u64 * 1_000_000)
        .wrapping_add(game as u64 * 1000)
}

/// Play one round of `n_games` games on `pool`.
pub fn run_round(
    pool: &ThreadPool,
    config: &MctsConfig,
    seat: Seat,
    n_games: usize,
    base_seed: u64,
    round: usize,
) -> Result<RoundSummary> {
    let start = Instant::now();

    let records = pool.install(|| {
        (0..n_games)
            .into_par_iter()
            .map(|i| play_game(config, seat.for_game(i), game_seed(base_seed, round, i)))
            .collect::<Result<Vec<_>>>()
    })?;

    Ok(RoundSummary::from_records(
        round,
        &records,
        start.elapsed().as_secs_f64(),
    ))
}

/// Run every round of an evaluation.
pub fn run_evaluation(config: &EvaluateConfig) -> Result<EvaluationReport> {
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(config.n_threads)
        .build()
        .context("Failed to build worker pool")?;
    let mcts_config = config.mcts_config();

    info!(
        n_games = config.n_games,
        n_rounds = config.n_rounds,
        n_threads = config.n_threads,
        budget = ?mcts_config.budget,
        reward_frame = ?mcts_config.reward_frame,
        tree_reuse = ?mcts_config.tree_reuse,
        seat = ?config.mcts_seat,
        "Starting evaluation"
    );

    let mut rounds = Vec::with_capacity(config.n_rounds);
    for round in 0..config.n_rounds {
        let summary = run_round(
            &pool,
            &mcts_config,
            config.mcts_seat,
            config.n_games,
            config.seed,
            round,
        )?;
        info!(
            round = summary.round,
            mcts_wins = summary.mcts_wins,
            random_wins = summary.random_wins,
            draws = summary.draws,
            mcts_win_rate = summary.mcts_win_rate(),
            avg_game_length = summary.avg_game_length,
            elapsed_secs = summary.elapsed_secs,
            "Round {}/{} finished",
            round + 1,
            config.n_rounds
        );
        rounds.push(summary);
    }

    Ok(EvaluationReport::new(config.clone(), rounds))
}
