use std::fmt;

use connect4_core::{Connect4Error, Observation, Player, Result};

use crate::{HEIGHT, NUM_CELLS, WIDTH};

/// Bits of column 0; shift by `column * HEIGHT` for other columns.
const COLUMN_MASK: u64 = (1u64 << HEIGHT) - 1;

/// Every cell of the grid.
const BOARD_MASK: u64 = (1u64 << NUM_CELLS) - 1;

/// Bit index of a cell. Columns are packed contiguously, row 0 at the bottom.
#[inline]
pub const fn cell_index(column: usize, row: usize) -> usize {
    column * HEIGHT + row
}

/// Mask covering every cell of `column`.
#[inline]
pub const fn column_mask(column: usize) -> u64 {
    COLUMN_MASK << (column * HEIGHT)
}

/// Board occupancy as one bitmask per player.
///
/// The two masks never share a bit. Column heights are not stored: the
/// height of a column is the popcount of its slice of the occupied mask.
#[derive(Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Board {
    masks: [u64; 2],
}

impl Board {
    /// Board with no tokens.
    pub const fn empty() -> Self {
        Board { masks: [0, 0] }
    }

    /// Build a board from raw masks, checking that it could arise in play.
    ///
    /// # Errors
    /// Returns `Connect4Error::InvalidBoard` if the masks overlap, set a bit
    /// outside the grid, or leave a token above an empty cell.
    pub fn from_masks(player_one: u64, player_two: u64) -> Result<Self> {
        if player_one & player_two != 0 {
            return Err(Connect4Error::InvalidBoard(format!(
                "player masks overlap at {:#x}",
                player_one & player_two
            )));
        }

        let occupied = player_one | player_two;
        if occupied & !BOARD_MASK != 0 {
            return Err(Connect4Error::InvalidBoard(format!(
                "bits {:#x} lie outside the {}x{} grid",
                occupied & !BOARD_MASK,
                WIDTH,
                HEIGHT
            )));
        }

        for column in 0..WIDTH {
            let slice = (occupied & column_mask(column)) >> (column * HEIGHT);
            // Occupied cells must be a run starting at row 0
            if slice & (slice + 1) != 0 {
                return Err(Connect4Error::InvalidBoard(format!(
                    "column {} has a token above an empty cell",
                    column
                )));
            }
        }

        Ok(Board {
            masks: [player_one, player_two],
        })
    }

    /// Mask of the given player.
    #[inline]
    pub const fn mask(self, player: Player) -> u64 {
        self.masks[player.index()]
    }

    /// Union of both players' masks.
    #[inline]
    pub const fn occupied(self) -> u64 {
        self.masks[0] | self.masks[1]
    }

    /// Number of tokens in `column`.
    ///
    /// # Panics
    /// Panics in debug builds if `column >= WIDTH`.
    #[inline]
    pub fn column_height(self, column: usize) -> usize {
        debug_assert!(column < WIDTH);
        (self.occupied() & column_mask(column)).count_ones() as usize
    }

    /// True if the top cell of `column` is taken.
    #[inline]
    pub fn is_column_full(self, column: usize) -> bool {
        self.occupied() & (1u64 << cell_index(column, HEIGHT - 1)) != 0
    }

    /// Owner of a cell, if any.
    pub fn cell(self, column: usize, row: usize) -> Option<Player> {
        if column >= WIDTH || row >= HEIGHT {
            return None;
        }
        let bit = 1u64 << cell_index(column, row);
        if self.masks[0] & bit != 0 {
            Some(Player::One)
        } else if self.masks[1] & bit != 0 {
            Some(Player::Two)
        } else {
            None
        }
    }

    /// Total number of tokens played.
    #[inline]
    pub const fn move_count(self) -> usize {
        self.occupied().count_ones() as usize
    }

    /// True once every cell is taken.
    #[inline]
    pub const fn is_full(self) -> bool {
        self.move_count() == NUM_CELLS
    }

    /// Columns whose top cell is free, in ascending order.
    pub fn legal_moves(self) -> Vec<usize> {
        (0..WIDTH).filter(|&col| !self.is_column_full(col)).collect()
    }

    /// Drop a token for `player` into `column`, returning the new board.
    ///
    /// # Errors
    /// `ColumnOutOfRange` if `column >= WIDTH`, `ColumnFull` if the column
    /// already holds `HEIGHT` tokens. `self` is never modified.
    pub fn apply_move(self, column: usize, player: Player) -> Result<Board> {
        if column >= WIDTH {
            return Err(Connect4Error::ColumnOutOfRange {
                column,
                width: WIDTH,
            });
        }

        let row = self.column_height(column);
        if row >= HEIGHT {
            return Err(Connect4Error::ColumnFull { column });
        }

        let mut next = self;
        next.masks[player.index()] |= 1u64 << cell_index(column, row);
        Ok(next)
    }

    /// Observation handed to agents.
    #[inline]
    pub const fn observation(self) -> Observation {
        Observation::new(self.masks[0], self.masks[1])
    }
}

impl TryFrom<Observation> for Board {
    type Error = Connect4Error;

    fn try_from(obs: Observation) -> Result<Self> {
        Board::from_masks(obs.player_one, obs.player_two)
    }
}

impl From<Board> for Observation {
    fn from(board: Board) -> Observation {
        board.observation()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in (0..HEIGHT).rev() {
            for col in 0..WIDTH {
                if col > 0 {
                    write!(f, " ")?;
                }
                match self.cell(col, row) {
                    Some(player) => write!(f, "{}", player)?,
                    None => write!(f, ".")?,
                }
            }
            writeln!(f)?;
        }
        for col in 0..WIDTH {
            if col > 0 {
                write!(f, " ")?;
            }
            write!(f, "{}", col)?;
        }
        writeln!(f)
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Board(p1={:#013x}, p2={:#013x})",
            self.masks[0], self.masks[1]
        )
    }
}
