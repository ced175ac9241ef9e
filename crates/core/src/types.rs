//! Value types shared by the engine and the agents.
//!
//! - [`Player`]: the two sides, player one always moves first
//! - [`Observation`]: the two-bitmask board encoding agents see
//! - [`TimeStep`]: what an environment returns from `reset` and `step`

use std::fmt;

/// One of the two players.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub enum Player {
    One,
    Two,
}

impl Player {
    /// Get the opposing player.
    pub fn opposite(self) -> Self {
        match self {
            Player::One => Player::Two,
            Player::Two => Player::One,
        }
    }

    /// Index into a `[T; 2]` indexed by player (0 for player one).
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            Player::One => 0,
            Player::Two => 1,
        }
    }

    /// Terminal reward when this player completes a line.
    ///
    /// Rewards are always expressed from player one's side: `+1.0` when
    /// player one wins, `-1.0` when player two wins.
    pub fn win_reward(self) -> f32 {
        match self {
            Player::One => 1.0,
            Player::Two => -1.0,
        }
    }

    pub fn is_one(self) -> bool {
        self == Player::One
    }
}

impl From<bool> for Player {
    /// `true` maps to player one, matching the `player_one_to_move` flag.
    fn from(player_one: bool) -> Self {
        if player_one {
            Player::One
        } else {
            Player::Two
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Player::One => write!(f, "X"),
            Player::Two => write!(f, "O"),
        }
    }
}

/// Board observation: one occupancy bitmask per player.
///
/// Bit `column * height + row` is set iff that player has a token in the
/// cell. Row 0 is the bottom of the column, so a column's tokens always form
/// a contiguous run starting at its lowest bit. This bit layout is the
/// contract between the engine and every agent; it must not change.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Hash)]
pub struct Observation {
    pub player_one: u64,
    pub player_two: u64,
}

impl Observation {
    pub const EMPTY: Observation = Observation {
        player_one: 0,
        player_two: 0,
    };

    pub const fn new(player_one: u64, player_two: u64) -> Self {
        Self {
            player_one,
            player_two,
        }
    }

    /// Mask of the given player.
    #[inline]
    pub const fn mask(&self, player: Player) -> u64 {
        match player {
            Player::One => self.player_one,
            Player::Two => self.player_two,
        }
    }

    /// Union of both players' masks.
    #[inline]
    pub const fn occupied(&self) -> u64 {
        self.player_one | self.player_two
    }

    /// Number of tokens on the board.
    pub const fn move_count(&self) -> u32 {
        self.occupied().count_ones()
    }

    /// Player to move, derived from the token counts.
    ///
    /// Player one moves first, so it is player one's turn exactly when both
    /// players have placed the same number of tokens.
    pub fn to_move(&self) -> Player {
        Player::from(self.player_one.count_ones() == self.player_two.count_ones())
    }
}

impl From<(u64, u64)> for Observation {
    fn from((player_one, player_two): (u64, u64)) -> Self {
        Self::new(player_one, player_two)
    }
}

impl From<Observation> for (u64, u64) {
    fn from(obs: Observation) -> (u64, u64) {
        (obs.player_one, obs.player_two)
    }
}

/// Position of a time step within an episode.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum StepType {
    /// Returned by `reset`.
    First,
    /// A move was applied and the game continues.
    Mid,
    /// A move was applied and the game is over.
    Last,
}

/// Result of `reset` or `step`.
#[derive(Clone, Debug, PartialEq)]
pub struct TimeStep<O> {
    pub step_type: StepType,

    /// `+1.0` if player one just won, `-1.0` if player two just won,
    /// `0.0` otherwise (including draws).
    pub reward: f32,

    pub observation: O,

    /// Player whose turn it is after this step.
    pub to_move: Player,

    /// Winner, set only on a `Last` step that ended with a line.
    pub winner: Option<Player>,
}

impl<O> TimeStep<O> {
    pub fn first(observation: O) -> Self {
        Self {
            step_type: StepType::First,
            reward: 0.0,
            observation,
            to_move: Player::One,
            winner: None,
        }
    }

    pub fn is_first(&self) -> bool {
        self.step_type == StepType::First
    }

    pub fn is_last(&self) -> bool {
        self.step_type == StepType::Last
    }
}
