use std::env;

use rand::thread_rng;
use tracing_subscriber::EnvFilter;

use ultimate_mcts::{Agent, Game, HumanAgent, MonteCarloAgent, Outcome, Square};

// Default number of random playouts the evaluator runs per move.
const DEFAULT_PLAYOUT_BUDGET: usize = 100_000;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let playout_budget = env::args()
        .nth(1)
        .and_then(|arg| arg.parse().ok())
        .unwrap_or(DEFAULT_PLAYOUT_BUDGET);

    let mut rng = thread_rng();
    let mut game = Game::default();
    let mut human = HumanAgent::new();
    let mut ai = MonteCarloAgent::new(playout_budget);

    println!("You are X. Boards and squares are numbered 0-8, row-major.");

    while game.playable() {
        println!("{}", game);
        match game.current_board() {
            Some(board_pos) => println!("{} to move in board {}", game.current_player(), board_pos),
            None => println!("{} to move in any board", game.current_player()),
        }

        let mover = game.current_player();
        let result = if mover == Square::X {
            human.choose(&mut rng, &game)
        } else {
            println!("{} is thinking...", mover);
            ai.choose(&mut rng, &game)
        };

        let (board_pos, square_pos) = match result {
            Ok(move_) => move_,
            Err(err) => {
                println!("{}", err);
                break;
            }
        };

        if mover == Square::O {
            let stat = ai.stats(board_pos, square_pos).unwrap_or_default();
            println!(
                "{} plays board {}, square {} (win estimate {:.1}% over {} playouts)",
                mover,
                board_pos,
                square_pos,
                stat.win_ratio() * 100.0,
                ai.runs(),
            );
        }

        if let Err(err) = game.play(board_pos, square_pos) {
            println!("Invalid move: {}", err);
        }
    }

    println!("{}", game);
    match game.winner() {
        Outcome::Decided(player) => println!("{} wins after {} turns!", player, game.turns()),
        Outcome::Draw => println!("Draw after {} turns.", game.turns()),
        Outcome::Ongoing => (),
    }
}
