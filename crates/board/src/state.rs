use connect4_core::{Connect4Error, Player, Result};

use crate::{Board, WinMasks};

/// Full game state: board, side to move, and outcome.
///
/// Mutated only through [`GameState::apply`], which returns a new value.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub struct GameState {
    board: Board,
    to_move: Player,
    terminal: bool,
    winner: Option<Player>,
}

/// Outcome of applying one move.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Transition {
    pub state: GameState,
    /// `+1.0` if player one just completed a line, `-1.0` for player two, else `0.0`.
    pub reward: f32,
    pub terminal: bool,
}

impl GameState {
    /// Empty board, player one to move.
    pub fn new() -> Self {
        Self {
            board: Board::empty(),
            to_move: Player::One,
            terminal: false,
            winner: None,
        }
    }

    /// State for an arbitrary board, with the outcome recomputed from the masks.
    pub fn from_board(board: Board, to_move: Player) -> Self {
        let winner = WinMasks::standard().winner(&board);
        Self {
            board,
            to_move,
            terminal: winner.is_some() || board.is_full(),
            winner,
        }
    }

    pub fn board(&self) -> Board {
        self.board
    }

    pub fn to_move(&self) -> Player {
        self.to_move
    }

    pub fn player_one_to_move(&self) -> bool {
        self.to_move.is_one()
    }

    pub fn is_terminal(&self) -> bool {
        self.terminal
    }

    /// Winner, if the game ended with a line. `None` for ongoing and drawn games.
    pub fn winner(&self) -> Option<Player> {
        self.winner
    }

    /// Reward of this state from player one's side.
    pub fn reward(&self) -> f32 {
        self.winner.map_or(0.0, Player::win_reward)
    }

    /// Play `column` for the side to move.
    ///
    /// The turn passes on every successful move, including the one that
    /// ends the game.
    ///
    /// # Errors
    /// `GameOver` if the state is terminal, otherwise whatever
    /// [`Board::apply_move`] reports. `self` is unchanged on error.
    pub fn apply(&self, column: usize) -> Result<Transition> {
        if self.terminal {
            return Err(Connect4Error::GameOver);
        }

        let board = self.board.apply_move(column, self.to_move)?;

        // Only the mover's mask changed, so only the mover can have a new line
        let winner = WinMasks::standard()
            .is_win(board.mask(self.to_move))
            .then_some(self.to_move);
        let terminal = winner.is_some() || board.is_full();

        let state = GameState {
            board,
            to_move: self.to_move.opposite(),
            terminal,
            winner,
        };

        Ok(Transition {
            state,
            reward: state.reward(),
            terminal,
        })
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}
