//! Connect Four - bitboard engine and game state controller
//!
//! The board is two 64-bit masks, one per player, with cells packed column
//! by column so every column is a contiguous run of bits:
//!
//! ```text
//! Row 5: [ 5][11][17][23][29][35][41]  <- Top
//! Row 4: [ 4][10][16][22][28][34][40]
//! Row 3: [ 3][ 9][15][21][27][33][39]
//! Row 2: [ 2][ 8][14][20][26][32][38]
//! Row 1: [ 1][ 7][13][19][25][31][37]
//! Row 0: [ 0][ 6][12][18][24][30][36]  <- Bottom
//!         Col 0   1   2   3   4   5   6
//! ```
//!
//! Moves are a single OR, and a win is detected by testing the mover's mask
//! against the precomputed [`WinMasks`].
//!
//! # Example
//!
//! ```
//! use connect4_board::ConnectFour;
//! use connect4_core::{Environment, Player};
//!
//! let mut env = ConnectFour::new();
//! env.reset();
//! for column in [3, 2, 3, 2, 3, 2] {
//!     env.step(column).unwrap();
//! }
//! let last = env.step(3).unwrap();
//! assert!(last.is_last());
//! assert_eq!(last.reward, 1.0);
//! assert_eq!(last.winner, Some(Player::One));
//! ```

mod bitboard;
mod env;
mod state;
mod win_masks;

pub use bitboard::{cell_index, column_mask, Board};
pub use env::ConnectFour;
pub use state::{GameState, Transition};
pub use win_masks::WinMasks;

/// Number of columns.
pub const WIDTH: usize = 7;

/// Number of rows.
pub const HEIGHT: usize = 6;

/// Tokens in a row needed to win.
pub const STREAK: usize = 4;

/// Total number of cells (42).
pub const NUM_CELLS: usize = WIDTH * HEIGHT;

const _: () = assert!(NUM_CELLS <= 64, "board must fit in a u64 mask");
