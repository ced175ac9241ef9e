//! Precomputed four-in-a-row masks.
//!
//! Every placement of `streak` consecutive cells along one of the four
//! directions (vertical, horizontal, and both diagonals) gets one mask.
//! The standard 7x6 table holds 69 masks and is built once per process.

use std::sync::OnceLock;

use connect4_core::Player;

use crate::{Board, HEIGHT, STREAK, WIDTH};

/// Direction vectors as `(column step, row step)`.
const DIRECTIONS: [(isize, isize); 4] = [(0, 1), (1, 0), (1, 1), (1, -1)];

/// Immutable set of winning-line masks.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WinMasks {
    masks: Vec<u64>,
}

static STANDARD: OnceLock<WinMasks> = OnceLock::new();

impl WinMasks {
    /// Masks for the standard board, generated on first use.
    pub fn standard() -> &'static WinMasks {
        STANDARD.get_or_init(|| WinMasks::generate(WIDTH, HEIGHT, STREAK))
    }

    /// Generate the masks for a `width` x `height` grid.
    ///
    /// Masks are produced direction by direction, then by origin column,
    /// then by origin row. A line that would leave the grid is dropped.
    ///
    /// # Panics
    /// Panics if the grid does not fit in 64 bits or `streak` is zero.
    pub fn generate(width: usize, height: usize, streak: usize) -> Self {
        assert!(width * height <= 64, "grid does not fit in a u64");
        assert!(streak > 0, "streak must be positive");

        let mut masks = Vec::new();

        for (dx, dy) in DIRECTIONS {
            for x in 0..width as isize {
                for y in 0..height as isize {
                    let mut mask = 0u64;
                    let mut in_bounds = true;

                    for step in 0..streak as isize {
                        let cx = x + dx * step;
                        let cy = y + dy * step;
                        if cx < 0 || cx >= width as isize || cy < 0 || cy >= height as isize {
                            in_bounds = false;
                            break;
                        }
                        mask |= 1u64 << (cx as usize * height + cy as usize);
                    }

                    if in_bounds {
                        masks.push(mask);
                    }
                }
            }
        }

        Self { masks }
    }

    /// True iff some mask is fully contained in `player_mask`.
    #[inline]
    pub fn is_win(&self, player_mask: u64) -> bool {
        self.masks.iter().any(|&m| player_mask & m == m)
    }

    /// Player with a completed line, checking player one first.
    pub fn winner(&self, board: &Board) -> Option<Player> {
        [Player::One, Player::Two]
            .into_iter()
            .find(|&p| self.is_win(board.mask(p)))
    }

    /// Number of masks.
    pub fn len(&self) -> usize {
        self.masks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.masks.is_empty()
    }

    pub fn as_slice(&self) -> &[u64] {
        &self.masks
    }

    pub fn iter(&self) -> impl Iterator<Item = &u64> {
        self.masks.iter()
    }
}
