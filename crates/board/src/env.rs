//! Connect Four environment.
//!
//! Wraps a [`GameState`] with per-column height counters and the
//! reset/step episode lifecycle agents play against.

use connect4_core::{
    Connect4Error, Environment, Observation, Player, Result, StepType, TimeStep,
};

use crate::{Board, GameState, HEIGHT, WIDTH};

/// Game state controller for a single episode at a time.
///
/// Cheap to clone; search code keeps a private copy and re-seats it with
/// [`Environment::set_state`] so the live game is never touched.
#[derive(Clone, Debug)]
pub struct ConnectFour {
    state: GameState,
    /// Tokens per column, always equal to the popcount of the column slice.
    heights: [u8; WIDTH],
}

impl ConnectFour {
    /// New environment with an empty board, player one to move.
    pub fn new() -> Self {
        Self {
            state: GameState::new(),
            heights: [0; WIDTH],
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn board(&self) -> Board {
        self.state.board()
    }

    pub fn winner(&self) -> Option<Player> {
        self.state.winner()
    }

    /// Tokens currently in `column`.
    ///
    /// # Panics
    /// Panics if `column >= WIDTH`.
    pub fn column_height(&self, column: usize) -> usize {
        self.heights[column] as usize
    }

    /// Text rendering of the current board.
    pub fn render(&self) -> String {
        self.state.board().to_string()
    }

    fn time_step(&self, reward: f32, terminal: bool) -> TimeStep<Observation> {
        TimeStep {
            step_type: if terminal { StepType::Last } else { StepType::Mid },
            reward,
            observation: self.state.board().observation(),
            to_move: self.state.to_move(),
            winner: self.state.winner(),
        }
    }
}

impl Default for ConnectFour {
    fn default() -> Self {
        Self::new()
    }
}

impl Environment for ConnectFour {
    type Observation = Observation;

    fn reset(&mut self) -> TimeStep<Observation> {
        self.state = GameState::new();
        self.heights = [0; WIDTH];
        TimeStep::first(self.state.board().observation())
    }

    fn step(&mut self, column: usize) -> Result<TimeStep<Observation>> {
        if self.state.is_terminal() {
            return Err(Connect4Error::GameOver);
        }
        if column >= WIDTH {
            return Err(Connect4Error::ColumnOutOfRange {
                column,
                width: WIDTH,
            });
        }
        if self.heights[column] as usize >= HEIGHT {
            return Err(Connect4Error::ColumnFull { column });
        }

        let transition = self.state.apply(column)?;
        self.state = transition.state;
        self.heights[column] += 1;
        debug_assert_eq!(
            self.heights[column] as usize,
            self.state.board().column_height(column)
        );

        Ok(self.time_step(transition.reward, transition.terminal))
    }

    fn legal_moves(&self, observation: &Observation) -> Vec<usize> {
        let occupied = observation.occupied();
        (0..WIDTH)
            .filter(|&col| occupied & (1u64 << crate::cell_index(col, HEIGHT - 1)) == 0)
            .collect()
    }

    fn set_state(&mut self, observation: Observation, player_one_to_move: bool) -> Result<()> {
        let board = Board::try_from(observation)?;

        for (column, height) in self.heights.iter_mut().enumerate() {
            *height = board.column_height(column) as u8;
        }
        self.state = GameState::from_board(board, Player::from(player_one_to_move));
        Ok(())
    }

    fn observation(&self) -> Observation {
        self.state.board().observation()
    }

    fn to_move(&self) -> Player {
        self.state.to_move()
    }

    fn is_terminal(&self) -> bool {
        self.state.is_terminal()
    }
}
