/// A single 3x3 sub-board.
use crate::board_game::{Outcome, Square, LINES};
use crate::error::{IndexError, MoveError};

/// One 3x3 cell grid with a cached outcome. Owned and mutated only by `Game`;
/// callers read it through `Game::board`.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Board {
    /// Cells 0..9, row-major.
    pub(crate) grid: [Square; 9],

    /// Cache of the board's result, recomputed after every mutation.
    outcome: Outcome,
}

impl Default for Board {
    fn default() -> Self {
        Board {
            grid: [Square::None; 9],
            outcome: Outcome::Ongoing,
        }
    }
}

/// Build a board from raw cells, recomputing the outcome cache.
impl From<[Square; 9]> for Board {
    fn from(grid: [Square; 9]) -> Self {
        let mut board = Board {
            grid,
            outcome: Outcome::Ongoing,
        };
        board.outcome = board.check_outcome();
        board
    }
}

impl Board {
    /// The mark at cell `square_pos`.
    pub fn square(&self, square_pos: usize) -> Result<Square, IndexError> {
        if square_pos >= self.grid.len() {
            return Err(IndexError(square_pos));
        }
        Ok(self.grid[square_pos])
    }

    /// True while the board is undecided and has at least one empty cell.
    pub fn playable(&self) -> bool {
        self.outcome == Outcome::Ongoing && self.grid.iter().any(|&s| s == Square::None)
    }

    /// The board's result. A decided or drawn board never changes again.
    pub fn winner(&self) -> Outcome {
        self.outcome
    }

    /// Write `mark` into cell `square_pos`. Only `Game` calls this, after its
    /// own validation, but the checks are repeated here so the board can
    /// never be corrupted.
    pub(crate) fn set(&mut self, square_pos: usize, mark: Square) -> Result<(), MoveError> {
        if square_pos >= self.grid.len() {
            return Err(IndexError(square_pos).into());
        }
        if self.outcome != Outcome::Ongoing {
            return Err(MoveError::BoardNotPlayable);
        }
        if self.grid[square_pos] != Square::None {
            return Err(MoveError::SquareOccupied);
        }

        self.grid[square_pos] = mark;
        self.outcome = self.check_outcome();

        Ok(())
    }

    /// Scan the 8 win lines, then fall back to the full-board draw check.
    fn check_outcome(&self) -> Outcome {
        for &[a, b, c] in &LINES {
            if self.grid[a] != Square::None
                && self.grid[a] == self.grid[b]
                && self.grid[a] == self.grid[c]
            {
                return Outcome::Decided(self.grid[a]);
            }
        }

        if self.grid.iter().all(|&s| s != Square::None) {
            Outcome::Draw
        } else {
            Outcome::Ongoing
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board_game::Square::{None, O, X};

    #[test]
    fn win_on_diagonal() {
        let mut b = Board::default();
        assert_eq!(b.winner(), Outcome::Ongoing);
        assert!(b.playable());

        b.set(0, X).unwrap();
        assert_eq!(b.winner(), Outcome::Ongoing);
        assert!(b.playable());

        b.set(4, X).unwrap();
        assert_eq!(b.winner(), Outcome::Ongoing);
        assert!(b.playable());

        b.set(8, X).unwrap();
        assert_eq!(b.winner(), Outcome::Decided(X));
        assert!(!b.playable());
    }

    #[test]
    fn win_on_row_and_column() {
        let row = Board::from([O, O, O, None, X, None, X, None, X]);
        assert_eq!(row.winner(), Outcome::Decided(O));

        let col = Board::from([X, O, None, X, O, None, None, O, X]);
        assert_eq!(col.winner(), Outcome::Decided(O));
    }

    #[test]
    fn draw_when_full_without_line() {
        // X O X
        // O X O
        // O X O
        let mut b = Board::default();
        for i in (0..6).step_by(2) {
            b.set(i, X).unwrap();
            b.set(i + 1, O).unwrap();
            assert_eq!(b.winner(), Outcome::Ongoing);
        }
        b.set(6, O).unwrap();
        b.set(7, X).unwrap();
        assert_eq!(b.winner(), Outcome::Ongoing);
        assert!(b.playable());

        b.set(8, O).unwrap();
        assert_eq!(b.winner(), Outcome::Draw);
        assert!(!b.playable());
    }

    #[test]
    fn line_beats_fill() {
        // A full board that also contains a line is a win, not a draw.
        let b = Board::from([X, X, X, O, O, X, X, O, O]);
        assert_eq!(b.winner(), Outcome::Decided(X));
    }

    #[test]
    fn set_failures() {
        let mut b = Board::default();
        assert_eq!(b.set(9, X), Err(MoveError::Index(IndexError(9))));

        b.set(0, X).unwrap();
        assert_eq!(b.set(0, O), Err(MoveError::SquareOccupied));

        b.set(1, X).unwrap();
        b.set(2, X).unwrap();
        assert_eq!(b.winner(), Outcome::Decided(X));
        // Once decided the board rejects every further write.
        assert_eq!(b.set(4, O), Err(MoveError::BoardNotPlayable));
        assert_eq!(b.winner(), Outcome::Decided(X));
    }

    #[test]
    fn square_accessor() {
        let mut b = Board::default();
        b.set(3, O).unwrap();
        assert_eq!(b.square(3), Ok(O));
        assert_eq!(b.square(4), Ok(None));
        assert_eq!(b.square(9), Err(IndexError(9)));
    }
}
