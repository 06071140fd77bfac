/// Agents for ultimate tic-tac-toe.
mod monte_carlo;
pub use monte_carlo::{MonteCarloAgent, SearchStats, Stats};

use std::io;

use rand::seq::SliceRandom;
use rand::Rng;

use crate::board_game::Move;
use crate::error::AiError;
use crate::game::Game;

const BAD_INPUT: &str = "bad input";
const OUT_OF_RANGE: &str = "out of range";

/// An agent that can choose a move for the current player of a game. The
/// random source is injected so callers (and tests) can seed it.
pub trait Agent {
    fn choose<R: Rng>(&mut self, rng: &mut R, game: &Game) -> Result<Move, AiError>;
}

/*
 * ------------
 * Random Agent
 * ------------
 */

/// Picks uniformly among the legal moves. Doubles as the rollout policy for
/// the Monte Carlo evaluator and as a baseline opponent.
#[derive(Clone, Debug, Default)]
pub struct RandomAgent;

impl Agent for RandomAgent {
    fn choose<R: Rng>(&mut self, rng: &mut R, game: &Game) -> Result<Move, AiError> {
        Self::random_move(rng, game)
    }
}

impl RandomAgent {
    pub fn new() -> RandomAgent {
        RandomAgent
    }

    /// One uniform draw from the legal move set. This exact routine drives
    /// the playout simulations as well.
    pub fn random_move<R: Rng>(rng: &mut R, game: &Game) -> Result<Move, AiError> {
        game.legal_moves()
            .choose(rng)
            .copied()
            .ok_or(AiError::NoLegalMoves)
    }
}

/*
 * -----------
 * Human Agent
 * -----------
 */

/// An agent controlled by the user running the program.
#[derive(Clone, Debug, Default)]
pub struct HumanAgent;

impl Agent for HumanAgent {
    fn choose<R: Rng>(&mut self, _rng: &mut R, _game: &Game) -> Result<Move, AiError> {
        loop {
            println!("Enter a move as board then square (like \"44\"):");
            match self.get_user_input() {
                Ok(move_) => return Ok(move_),
                Err(msg) => println!("Oops, {}", msg),
            }
        }
    }
}

impl HumanAgent {
    pub fn new() -> HumanAgent {
        HumanAgent
    }

    /// Accept player input from stdin, parse into a (board, square) move.
    /// Example: "38" means board 3, square 8.
    fn get_user_input(&self) -> Result<Move, &'static str> {
        let mut input = String::new();
        if io::stdin().read_line(&mut input).is_err() {
            return Err(BAD_INPUT);
        }
        let input = input.trim();

        let mut chars = input.chars();
        let (board, square) = match (chars.next(), chars.next(), chars.next()) {
            (Some(b), Some(s), None) => (b, s),
            _ => return Err(BAD_INPUT),
        };

        let board_pos = board.to_digit(10).ok_or(BAD_INPUT)? as usize;
        let square_pos = square.to_digit(10).ok_or(BAD_INPUT)? as usize;
        if board_pos > 8 || square_pos > 8 {
            return Err(OUT_OF_RANGE);
        }

        Ok((board_pos, square_pos))
    }
}
