//! Whole-game scenarios played through the environment API.

use connect4_board::{cell_index, ConnectFour, HEIGHT, NUM_CELLS, WIDTH};
use connect4_core::{Environment, Observation, Player, StepType, TimeStep};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// 42 moves that fill the board without either player completing a line.
const DRAW_SEQUENCE: [usize; NUM_CELLS] = [
    5, 4, 5, 0, 6, 2, 4, 5, 5, 0, 4, 1, 1, 0, 4, 5, 6, 5, 3, 1, 1, 2, 2, 6, 2, 6, 6, 3, 6, 2, 0,
    3, 0, 3, 3, 4, 3, 1, 4, 2, 1, 0,
];

fn play(env: &mut ConnectFour, moves: &[usize]) -> Vec<TimeStep<Observation>> {
    env.reset();
    moves.iter().map(|&c| env.step(c).unwrap()).collect()
}

#[test]
fn test_vertical_win_in_center_column() {
    let mut env = ConnectFour::new();
    let steps = play(&mut env, &[3, 2, 3, 4, 3, 2, 3]);

    for step in &steps[..steps.len() - 1] {
        assert_eq!(step.step_type, StepType::Mid);
        assert_eq!(step.reward, 0.0);
    }

    let last = steps.last().unwrap();
    assert_eq!(last.step_type, StepType::Last);
    assert_eq!(last.reward, 1.0);
    assert_eq!(last.winner, Some(Player::One));
    assert!(env.is_terminal());
    for row in 0..4 {
        assert_eq!(env.board().cell(3, row), Some(Player::One));
    }
}

#[test]
fn test_interleaved_opening_is_not_a_win() {
    // Player one holds (3,0), (2,0), (3,2), (3,3): no line
    let mut env = ConnectFour::new();
    let steps = play(&mut env, &[3, 3, 2, 4, 3, 2, 3]);

    let last = steps.last().unwrap();
    assert_eq!(last.step_type, StepType::Mid);
    assert_eq!(last.reward, 0.0);
    assert_eq!(last.to_move, Player::Two);
    assert!(!env.is_terminal());
    assert_eq!(env.column_height(3), 4);
}

#[test]
fn test_player_two_diagonal_win() {
    // Player two builds the rising diagonal (0,0) .. (3,3)
    let mut env = ConnectFour::new();
    let steps = play(&mut env, &[1, 0, 2, 1, 3, 2, 3, 2, 6, 3, 5, 3]);

    let last = steps.last().unwrap();
    assert!(last.is_last());
    assert_eq!(last.reward, -1.0);
    assert_eq!(last.winner, Some(Player::Two));
    for i in 0..4 {
        assert_eq!(env.board().cell(i, i), Some(Player::Two));
    }
}

#[test]
fn test_full_board_draw() {
    let mut env = ConnectFour::new();
    let steps = play(&mut env, &DRAW_SEQUENCE);

    for step in &steps[..NUM_CELLS - 1] {
        assert!(!step.is_last());
    }

    let last = steps.last().unwrap();
    assert!(last.is_last());
    assert_eq!(last.reward, 0.0);
    assert_eq!(last.winner, None);
    assert!(env.is_terminal());
    assert!(env.legal_moves(&env.observation()).is_empty());

    let obs = env.observation();
    assert_eq!(obs.player_one, 0x332eec4ca98);
    assert_eq!(obs.player_two, 0xcd113b3567);
    assert_eq!(obs.player_one.count_ones(), 21);
    assert_eq!(obs.player_two.count_ones(), 21);
}

#[test]
fn test_horizontal_win_detected_on_bottom_row() {
    let mut env = ConnectFour::new();
    let steps = play(&mut env, &[0, 0, 1, 1, 2, 2, 3]);

    let last = steps.last().unwrap();
    assert!(last.is_last());
    assert_eq!(last.reward, 1.0);
    let bottom_row = (0..4).fold(0u64, |m, c| m | 1u64 << cell_index(c, 0));
    assert_eq!(last.observation.player_one & bottom_row, bottom_row);
}

#[test]
fn test_reset_after_finished_game() {
    let mut env = ConnectFour::new();
    play(&mut env, &[0, 1, 0, 1, 0, 1, 0]);
    assert!(env.is_terminal());

    let first = env.reset();
    assert!(first.is_first());
    assert_eq!(first.observation, Observation::EMPTY);
    assert!(env.step(0).is_ok());
}

/// Uniform random play to the end, returning every observation.
fn random_game(seed: u64) -> Vec<Observation> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut env = ConnectFour::new();
    let mut observations = vec![env.reset().observation];

    while !env.is_terminal() {
        let legal = env.legal_moves(&env.observation());
        let column = legal[rng.gen_range(0..legal.len())];
        observations.push(env.step(column).unwrap().observation);
    }
    observations
}

#[test]
fn test_seeded_random_games_are_reproducible() {
    for seed in 0..20 {
        let a = random_game(seed);
        let b = random_game(seed);
        assert_eq!(a, b);
        assert!(a.len() >= 8 && a.len() <= NUM_CELLS + 1);
    }
}

#[test]
fn test_random_games_respect_gravity() {
    for seed in 100..120 {
        let last = *random_game(seed).last().unwrap();
        let occupied = last.occupied();
        for column in 0..WIDTH {
            for row in 1..HEIGHT {
                if occupied & (1u64 << cell_index(column, row)) != 0 {
                    assert!(occupied & (1u64 << cell_index(column, row - 1)) != 0);
                }
            }
        }
    }
}
