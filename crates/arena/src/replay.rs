//! Replay a fixed move list on a fresh board.

use std::io::Write;

use anyhow::{anyhow, Context, Result};
use connect4_board::ConnectFour;
use connect4_core::{Environment, Observation, TimeStep};
use tracing::warn;

/// Moves replayed when none are given: player one completes the rising
/// diagonal from (0,0) on the eleventh move.
pub const DEFAULT_MOVES: &str = "0,1,1,2,2,3,2,3,3,5,3";

/// Parse a comma-separated column list such as `"3, 3, 2"`.
pub fn parse_moves(text: &str) -> Result<Vec<usize>> {
    text.split(',')
        .enumerate()
        .map(|(i, part)| {
            let part = part.trim();
            if part.is_empty() {
                return Err(anyhow!("move {} is empty", i + 1));
            }
            part.parse::<usize>()
                .with_context(|| format!("move {} ('{}') is not a column number", i + 1, part))
        })
        .collect()
}

/// Apply `moves` to a new game, writing the board, reward, terminal flag
/// and legal moves after each one. Stops at the first terminal state.
///
/// Returns the last time step. An illegal move aborts the replay.
pub fn replay<W: Write>(moves: &[usize], out: &mut W) -> Result<TimeStep<Observation>> {
    let mut env = ConnectFour::new();
    let mut timestep = env.reset();

    for (i, &column) in moves.iter().enumerate() {
        let mover = env.to_move();
        timestep = env
            .step(column)
            .with_context(|| format!("move {} (column {}) is illegal", i + 1, column))?;

        writeln!(out, "Move {}: {} plays column {}", i + 1, mover, column)?;
        write!(out, "{}", env.render())?;
        writeln!(
            out,
            "reward: {}  terminal: {}",
            timestep.reward,
            timestep.is_last()
        )?;
        writeln!(out, "Legal moves: {:?}", env.legal_moves(&timestep.observation))?;
        writeln!(out)?;

        if timestep.is_last() {
            let ignored = moves.len() - i - 1;
            if ignored > 0 {
                warn!(ignored, "game over; ignoring remaining moves");
            }
            break;
        }
    }

    Ok(timestep)
}
