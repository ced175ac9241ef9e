//! Property-based tests for the bitboard engine and the game controller.
//!
//! Covered invariants:
//! - every win mask is four adjacent, collinear, in-bounds cells
//! - each successful step sets exactly one new bit, owned by the mover
//! - the two player masks never overlap and heights match popcounts
//! - a full column rejects further moves without changing the board

use connect4_board::{cell_index, Board, ConnectFour, WinMasks, HEIGHT, WIDTH};
use connect4_core::{Connect4Error, Environment, Player};
use proptest::prelude::*;

// =============================================================================
// Strategies
// =============================================================================

/// A list of move selectors; each is reduced modulo the legal-move count.
fn arb_move_selectors() -> impl Strategy<Value = Vec<usize>> {
    proptest::collection::vec(0usize..64, 0..60)
}

/// Play legal moves picked by `selectors` until the list or the game ends.
fn play_selectors(selectors: &[usize]) -> ConnectFour {
    let mut env = ConnectFour::new();
    env.reset();
    for &sel in selectors {
        if env.is_terminal() {
            break;
        }
        let legal = env.legal_moves(&env.observation());
        env.step(legal[sel % legal.len()]).unwrap();
    }
    env
}

fn cell_of(bit: usize) -> (isize, isize) {
    ((bit / HEIGHT) as isize, (bit % HEIGHT) as isize)
}

// =============================================================================
// Win masks
// =============================================================================

#[test]
fn win_masks_are_four_collinear_adjacent_cells() {
    let directions = [(0, 1), (1, 0), (1, 1), (1, -1)];

    for &mask in WinMasks::standard().iter() {
        assert_eq!(mask.count_ones(), 4, "mask {:#x} has wrong popcount", mask);
        assert_eq!(mask >> (WIDTH * HEIGHT), 0, "mask {:#x} leaves the grid", mask);

        let cells: Vec<(isize, isize)> = (0..64usize)
            .filter(|bit| mask & (1u64 << bit) != 0)
            .map(cell_of)
            .collect();

        let step = (cells[1].0 - cells[0].0, cells[1].1 - cells[0].1);
        assert!(directions.contains(&step), "mask {:#x} has step {:?}", mask, step);
        for pair in cells.windows(2) {
            assert_eq!((pair[1].0 - pair[0].0, pair[1].1 - pair[0].1), step);
        }
    }
}

#[test]
fn win_masks_are_distinct() {
    let masks = WinMasks::standard().as_slice();
    let mut sorted = masks.to_vec();
    sorted.sort_unstable();
    sorted.dedup();
    assert_eq!(sorted.len(), masks.len());
}

#[test]
fn win_masks_match_expected_per_direction() {
    let masks = WinMasks::standard().as_slice();
    let step_of = |mask: u64| {
        let low = mask.trailing_zeros() as usize;
        let next = (mask & (mask - 1)).trailing_zeros() as usize;
        let (a, b) = (cell_of(low), cell_of(next));
        (b.0 - a.0, b.1 - a.1)
    };

    let count = |dir: (isize, isize)| masks.iter().filter(|&&m| step_of(m) == dir).count();
    assert_eq!(count((0, 1)), 21);
    assert_eq!(count((1, 0)), 24);
    assert_eq!(count((1, 1)), 12);
    assert_eq!(count((1, -1)), 12);
}

#[test]
fn every_win_mask_needs_all_four_cells() {
    let masks = WinMasks::standard();
    for &mask in masks.iter() {
        assert!(masks.is_win(mask));
        assert!(!masks.is_win(0));
        // Any three of the four cells are not enough
        let mut rest = mask;
        while rest != 0 {
            let bit = rest & rest.wrapping_neg();
            assert!(!masks.is_win(mask & !bit));
            rest &= rest - 1;
        }
    }
}

/// Mask of four cells starting at `start` and advancing by `step`.
fn line(start: (usize, usize), step: (isize, isize)) -> u64 {
    (0..4).fold(0u64, |m, i| {
        let col = start.0 as isize + step.0 * i;
        let row = start.1 as isize + step.1 * i;
        m | 1u64 << cell_index(col as usize, row as usize)
    })
}

#[test]
fn win_detection_is_symmetric_for_all_orientations() {
    let masks = WinMasks::standard();
    let lines = [
        line((2, 1), (0, 1)),
        line((1, 3), (1, 0)),
        line((0, 0), (1, 1)),
        line((2, 5), (1, -1)),
    ];

    for mask in lines {
        // Player one owns the line
        let board = (mask, 0u64);
        assert!(masks.is_win(board.0));
        assert!(!masks.is_win(board.1));

        // Player two owns the line
        let board = (0u64, mask);
        assert!(!masks.is_win(board.0));
        assert!(masks.is_win(board.1));
    }
}

#[test]
fn win_detection_on_constructed_boards() {
    // Horizontal along the bottom row, supported by gravity
    let p1 = line((1, 0), (1, 0));
    let p2 = line((1, 1), (1, 0)) & !(1u64 << cell_index(4, 1));
    let board = Board::from_masks(p1, p2).unwrap();
    assert_eq!(WinMasks::standard().winner(&board), Some(Player::One));

    // Vertical for player two in column 6
    let p2 = line((6, 0), (0, 1));
    let p1 = line((5, 0), (0, 1)) & !(1u64 << cell_index(5, 3));
    let board = Board::from_masks(p1, p2).unwrap();
    assert_eq!(WinMasks::standard().winner(&board), Some(Player::Two));
}

// =============================================================================
// Move / turn invariants
// =============================================================================

proptest! {
    /// Each step sets exactly one new bit, and it belongs to the player who moved.
    #[test]
    fn prop_step_sets_one_bit_for_mover(selectors in arb_move_selectors()) {
        let mut env = ConnectFour::new();
        env.reset();

        for sel in selectors {
            if env.is_terminal() {
                break;
            }
            let before = env.observation();
            let mover = env.to_move();
            let legal = env.legal_moves(&before);
            let column = legal[sel % legal.len()];

            let step = env.step(column).unwrap();
            let after = step.observation;

            let added = after.occupied() ^ before.occupied();
            prop_assert_eq!(added.count_ones(), 1);
            prop_assert_eq!(after.occupied() & before.occupied(), before.occupied());
            prop_assert!(after.mask(mover) & added == added);
            prop_assert_eq!(after.mask(mover.opposite()), before.mask(mover.opposite()));
            prop_assert_eq!(step.to_move, mover.opposite());
        }
    }

    /// Masks never overlap and the height counters track the bits.
    #[test]
    fn prop_masks_disjoint_and_heights_consistent(selectors in arb_move_selectors()) {
        let env = play_selectors(&selectors);
        let obs = env.observation();

        prop_assert_eq!(obs.player_one & obs.player_two, 0);
        for column in 0..WIDTH {
            prop_assert_eq!(env.column_height(column), env.board().column_height(column));
        }
        prop_assert!(Board::try_from(obs).is_ok());
    }

    /// Legal moves are exactly the columns with a free top cell, ascending.
    #[test]
    fn prop_legal_moves_are_open_columns(selectors in arb_move_selectors()) {
        let env = play_selectors(&selectors);
        let board = env.board();
        let legal = env.legal_moves(&env.observation());

        let expected: Vec<usize> = (0..WIDTH)
            .filter(|&c| board.cell(c, HEIGHT - 1).is_none())
            .collect();
        prop_assert_eq!(legal.clone(), expected);
        prop_assert_eq!(legal, board.legal_moves());
    }

    /// A terminal state has a line or a full board, and nothing else is terminal.
    #[test]
    fn prop_terminal_iff_line_or_full(selectors in arb_move_selectors()) {
        let env = play_selectors(&selectors);
        let board = env.board();
        let masks = WinMasks::standard();
        let has_line = masks.is_win(board.mask(Player::One)) || masks.is_win(board.mask(Player::Two));

        prop_assert_eq!(env.is_terminal(), has_line || board.is_full());
        prop_assert_eq!(env.winner().is_some(), has_line);
    }

    /// Re-seating a fresh controller from an observation reproduces the position.
    #[test]
    fn prop_set_state_round_trips_position(selectors in arb_move_selectors()) {
        let live = play_selectors(&selectors);
        let mut sim = ConnectFour::new();
        sim.set_state(live.observation(), live.to_move().is_one()).unwrap();

        prop_assert_eq!(sim.observation(), live.observation());
        prop_assert_eq!(sim.is_terminal(), live.is_terminal());
        prop_assert_eq!(sim.winner(), live.winner());
        for column in 0..WIDTH {
            prop_assert_eq!(sim.column_height(column), live.column_height(column));
        }
    }

    /// Applying a move to a full column fails and leaves the board as it was.
    #[test]
    fn prop_full_column_rejected(column in 0usize..WIDTH, first_player in any::<bool>()) {
        let mut board = Board::empty();
        let mut player = Player::from(first_player);
        for _ in 0..HEIGHT {
            board = board.apply_move(column, player).unwrap();
            player = player.opposite();
        }

        let before = board;
        let err = board.apply_move(column, player).unwrap_err();
        prop_assert_eq!(err, Connect4Error::ColumnFull { column });
        prop_assert_eq!(board, before);
        prop_assert_eq!(board.column_height(column), HEIGHT);
    }
}
