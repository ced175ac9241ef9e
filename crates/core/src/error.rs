use thiserror::Error;

/// Errors raised by the board engine, the game controller and the policies.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Connect4Error {
    #[error("column {column} is out of range (board has {width} columns)")]
    ColumnOutOfRange { column: usize, width: usize },

    #[error("column {column} is full")]
    ColumnFull { column: usize },

    #[error("game is over; reset before playing another move")]
    GameOver,

    #[error("no legal moves available")]
    NoLegalMoves,

    #[error("invalid board: {0}")]
    InvalidBoard(String),
}

impl Connect4Error {
    /// True for every error caused by submitting a move the position does not allow.
    pub fn is_illegal_move(&self) -> bool {
        matches!(
            self,
            Connect4Error::ColumnOutOfRange { .. }
                | Connect4Error::ColumnFull { .. }
                | Connect4Error::GameOver
        )
    }
}

/// Convenience Result type for Connect Four operations
pub type Result<T> = std::result::Result<T, Connect4Error>;
