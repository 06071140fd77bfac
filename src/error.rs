/// Error taxonomy. Everything here is recoverable by the caller; a failed
/// `play` leaves the game untouched.
use thiserror::Error;

/// A board or square index outside 0..9.
#[derive(Clone, Copy, Debug, Eq, Error, PartialEq)]
#[error("index {0} out of range")]
pub struct IndexError(pub usize);

/// Why a `Game::play` (or internal `Board::set`) was rejected.
#[derive(Clone, Copy, Debug, Eq, Error, PartialEq)]
pub enum MoveError {
    #[error(transparent)]
    Index(#[from] IndexError),

    /// The move targets a board other than the active one.
    #[error("wrong board, the active constraint requires another board")]
    InvalidMove,

    #[error("square has already been played")]
    SquareOccupied,

    /// The targeted board is already decided or full.
    #[error("board is no longer playable")]
    BoardNotPlayable,

    #[error("game is already over")]
    GameOver,
}

/// Why an agent could not produce a move.
#[derive(Clone, Copy, Debug, Eq, Error, PartialEq)]
pub enum AiError {
    /// The game is terminal; there is nothing to choose from.
    #[error("no legal moves available")]
    NoLegalMoves,
}
