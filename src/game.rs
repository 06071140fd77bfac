/// The meta-game state machine: nine sub-boards plus turn state.
use std::fmt;

use crate::board::Board;
use crate::board_game::{Move, Outcome, Square, LINES};
use crate::error::{IndexError, MoveError};

/// A full game of ultimate tic-tac-toe. Mutated only through `play`; agents
/// operate on their own clones, never on the caller's live game.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Game {
    boards: [Board; 9],

    /// Whose turn it is. Always `X` or `O`.
    current_player: Square,

    /// The board the next move must target, if the constraint is in force.
    /// `None` means free choice among playable boards.
    current_board: Option<usize>,

    /// Successful moves so far. Callers use this as a staleness marker for
    /// asynchronous evaluations.
    turns: usize,

    /// Cache of the meta-board result, recomputed after every move.
    outcome: Outcome,
}

impl Default for Game {
    fn default() -> Self {
        Game {
            boards: Default::default(),
            current_player: Square::X,
            current_board: None,
            turns: 0,
            outcome: Outcome::Ongoing,
        }
    }
}

impl Game {
    /// Play `current_player`'s mark at `square_pos` of board `board_pos`.
    ///
    /// Every check runs before the first write, so a failed play leaves the
    /// game exactly as it was.
    pub fn play(&mut self, board_pos: usize, square_pos: usize) -> Result<(), MoveError> {
        if board_pos >= self.boards.len() {
            return Err(IndexError(board_pos).into());
        }
        if square_pos >= 9 {
            return Err(IndexError(square_pos).into());
        }
        if self.outcome != Outcome::Ongoing {
            return Err(MoveError::GameOver);
        }
        if let Some(active) = self.current_board {
            if active != board_pos {
                return Err(MoveError::InvalidMove);
            }
        }
        if !self.boards[board_pos].playable() {
            return Err(MoveError::BoardNotPlayable);
        }
        if self.boards[board_pos].square(square_pos)? != Square::None {
            return Err(MoveError::SquareOccupied);
        }

        self.boards[board_pos].set(square_pos, self.current_player)?;
        self.outcome = self.check_outcome();

        // The played square decides where the opponent goes next. If that
        // board is finished, the constraint lapses to free choice.
        self.current_board = if self.boards[square_pos].playable() {
            Some(square_pos)
        } else {
            None
        };

        self.current_player = self.current_player.opponent();
        self.turns += 1;

        Ok(())
    }

    /// All (board, square) pairs the current player may legally choose.
    /// Empty iff the game is terminal.
    pub fn legal_moves(&self) -> Vec<Move> {
        let mut moves = Vec::new();
        if self.outcome != Outcome::Ongoing {
            return moves;
        }
        for (board_pos, board) in self.boards.iter().enumerate() {
            if let Some(active) = self.current_board {
                if active != board_pos {
                    continue;
                }
            }
            if !board.playable() {
                continue;
            }
            for (square_pos, &square) in board.grid.iter().enumerate() {
                if square == Square::None {
                    moves.push((board_pos, square_pos));
                }
            }
        }
        moves
    }

    pub fn board(&self, board_pos: usize) -> Result<&Board, IndexError> {
        self.boards.get(board_pos).ok_or(IndexError(board_pos))
    }

    pub fn square(&self, board_pos: usize, square_pos: usize) -> Result<Square, IndexError> {
        self.board(board_pos)?.square(square_pos)
    }

    /// The player whose turn it is.
    pub fn current_player(&self) -> Square {
        self.current_player
    }

    /// The active-board constraint. `None` means any playable board.
    pub fn current_board(&self) -> Option<usize> {
        self.current_board
    }

    /// True while the meta-board is undecided.
    pub fn playable(&self) -> bool {
        self.outcome == Outcome::Ongoing
    }

    /// The meta-board result.
    pub fn winner(&self) -> Outcome {
        self.outcome
    }

    /// Successful moves played so far.
    pub fn turns(&self) -> usize {
        self.turns
    }

    /// Meta-board version of the sub-board rule: a decided board is a cell of
    /// its winner's mark, drawn and ongoing boards count as empty for the
    /// line scan; no line and no board left ongoing is a draw.
    fn check_outcome(&self) -> Outcome {
        let mark = |pos: usize| match self.boards[pos].winner() {
            Outcome::Decided(p) => p,
            _ => Square::None,
        };

        for &[a, b, c] in &LINES {
            if mark(a) != Square::None && mark(a) == mark(b) && mark(a) == mark(c) {
                return Outcome::Decided(mark(a));
            }
        }

        if self.boards.iter().all(|b| b.winner() != Outcome::Ongoing) {
            Outcome::Draw
        } else {
            Outcome::Ongoing
        }
    }
}

#[cfg(test)]
impl Game {
    /// Assemble a mid-game position directly. `turns` is derived from the
    /// number of filled cells, which is all the tests need.
    pub(crate) fn with_boards(
        boards: [Board; 9],
        current_player: Square,
        current_board: Option<usize>,
    ) -> Game {
        let turns = boards
            .iter()
            .flat_map(|b| b.grid.iter())
            .filter(|&&s| s != Square::None)
            .count();
        let mut game = Game {
            boards,
            current_player,
            current_board,
            turns,
            outcome: Outcome::Ongoing,
        };
        game.outcome = game.check_outcome();
        game
    }
}

impl fmt::Display for Game {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for band in 0..3 {
            for row in 0..3 {
                let mut line = String::new();
                for board_pos in band * 3..band * 3 + 3 {
                    for col in 0..3 {
                        line.push(match self.boards[board_pos].grid[row * 3 + col] {
                            Square::None => '.',
                            Square::X => 'X',
                            Square::O => 'O',
                        });
                    }
                    if board_pos % 3 < 2 {
                        line.push_str(" | ");
                    }
                }
                writeln!(f, "{}", line)?;
            }
            if band < 2 {
                writeln!(f, "----+-----+----")?;
            }
        }
        Ok(())
    }
}
