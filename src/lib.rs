/// Ultimate tic-tac-toe: a strict rules engine for the nine-board meta-game
/// plus agents that choose moves, including a Monte Carlo evaluator that
/// estimates win probabilities from random playouts.
pub mod agents;
pub mod board;
pub mod board_game;
pub mod error;
pub mod game;

pub use agents::{Agent, HumanAgent, MonteCarloAgent, RandomAgent, SearchStats, Stats};
pub use board::Board;
pub use board_game::{Move, Outcome, Square};
pub use error::{AiError, IndexError, MoveError};
pub use game::Game;
