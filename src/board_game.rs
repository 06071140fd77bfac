/// Shared vocabulary for the ultimate tic-tac-toe engine.
use std::fmt;

/// A move: (board index, square index), both 0..9 row-major.
pub type Move = (usize, usize);

/// The 8 win lines of a 3x3 grid: 3 rows, 3 columns, 2 diagonals.
/// Used for sub-boards and, with board outcomes as cells, for the meta-board.
pub(crate) const LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    [0, 4, 8],
    [2, 4, 6],
];

/// The mark in a single cell. Doubles as the player identity: `current_player`
/// is always `X` or `O`, never `None`.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Square {
    None,
    X,
    O,
}

impl Default for Square {
    fn default() -> Self {
        Square::None
    }
}

impl Square {
    /// The other player. `None` has no opponent and maps to itself.
    pub fn opponent(self) -> Square {
        match self {
            Square::X => Square::O,
            Square::O => Square::X,
            Square::None => Square::None,
        }
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Square::None => ' ',
                Square::X => 'X',
                Square::O => 'O',
            }
        )
    }
}

/// Whether a board (or the whole game) is still running, drawn, or won.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Outcome {
    Ongoing,
    Draw,
    Decided(Square),
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Ongoing => write!(f, "ongoing"),
            Outcome::Draw => write!(f, "draw"),
            Outcome::Decided(p) => write!(f, "{} wins", p),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opponent_flips() {
        assert_eq!(Square::X.opponent(), Square::O);
        assert_eq!(Square::O.opponent(), Square::X);
        assert_eq!(Square::None.opponent(), Square::None);
    }
}
