mod board;
mod bot_controller;
mod game_state;
mod session_rng;
mod types;

pub use board::{Board, WINNING_LINES};
pub use bot_controller::{calculate_minimax_move, calculate_move, calculate_random_move};
pub use game_state::GameState;
pub use session_rng::SessionRng;
pub use types::{BotType, GameStatus, Mark};
