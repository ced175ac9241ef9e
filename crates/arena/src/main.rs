//! Connect Four arena.
//!
//! Evaluates the MCTS policy against the uniform random baseline over many
//! independent games, and replays fixed move lists for inspection.

mod arena;
mod config;
mod replay;

use std::io;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;

use crate::config::{validate_log_level, EvaluateConfig};

/// Connect Four MCTS evaluation tool.
#[derive(Parser)]
#[command(name = "connect4-arena")]
#[command(about = "Evaluate MCTS against a random baseline and replay fixed games")]
struct Cli {
    /// Log level (trace, debug, info, warn, error); RUST_LOG takes priority
    #[arg(long, global = true, env = "C4_LOG_LEVEL", default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play MCTS against the random policy and report win rates.
    Evaluate(EvaluateConfig),

    /// Replay a comma-separated list of columns on a fresh board.
    Replay {
        /// Columns to play, alternating players, starting with player one.
        #[arg(long, default_value = replay::DEFAULT_MOVES)]
        moves: String,
    },
}

fn init_tracing(level: &str) -> Result<()> {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();

    Ok(())
}

fn cmd_evaluate(config: EvaluateConfig) -> Result<()> {
    config.validate()?;

    let report = arena::run_evaluation(&config)?;

    if let Some(path) = &config.output {
        report.write_json(path)?;
        info!(path = %path.display(), "Report written");
    }

    println!("\n================================================");
    println!("FINAL RESULTS ({} games)", report.total_games);
    println!("================================================");
    let pct = |n: usize| n as f64 / report.total_games as f64 * 100.0;
    println!("MCTS wins:   {} ({:.1}%)", report.mcts_wins, pct(report.mcts_wins));
    println!("Random wins: {} ({:.1}%)", report.random_wins, pct(report.random_wins));
    println!("Draws:       {} ({:.1}%)", report.draws, pct(report.draws));
    println!("------------------------------------------------");
    println!("Win rate: {:.1}%", report.mcts_win_rate() * 100.0);

    Ok(())
}

fn cmd_replay(moves: &str) -> Result<()> {
    let moves = replay::parse_moves(moves).context("Failed to parse --moves")?;
    let stdout = io::stdout();
    let last = replay::replay(&moves, &mut stdout.lock())?;

    match last.winner {
        Some(winner) => info!(%winner, "Replay finished with a win"),
        None if last.is_last() => info!("Replay finished in a draw"),
        None => info!(moves = moves.len(), "Replay finished before the game ended"),
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    validate_log_level(&cli.log_level)?;
    init_tracing(&cli.log_level)?;

    match cli.command {
        Commands::Evaluate(config) => cmd_evaluate(config),
        Commands::Replay { moves } => cmd_replay(&moves),
    }
}
