use super::board::Board;
use super::bot_controller::{calculate_minimax_move, calculate_random_move};
use super::session_rng::SessionRng;
use super::types::{GameStatus, Mark};

/// One human-vs-CPU game. The session owns the board; there is no shared
/// or global game state.
///
/// Flow: the CPU opens with a random mark, the human answers by index, and
/// every successful human mark is followed by an optimal CPU response.
#[derive(Debug, Clone)]
pub struct GameState {
    board: Board,
    human_mark: Mark,
    cpu_mark: Mark,
}

impl GameState {
    /// # Panics
    ///
    /// Panics if `human_mark` is `Mark::Empty`.
    pub fn new(human_mark: Mark) -> Self {
        let cpu_mark = match human_mark.opponent() {
            Some(mark) => mark,
            None => panic!("human mark must be X or O"),
        };

        Self {
            board: Board::new(),
            human_mark,
            cpu_mark,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn human_mark(&self) -> Mark {
        self.human_mark
    }

    pub fn cpu_mark(&self) -> Mark {
        self.cpu_mark
    }

    pub fn status(&self) -> GameStatus {
        self.board.evaluate()
    }

    pub fn is_ended(&self) -> bool {
        self.board.is_ended()
    }

    /// Marks the clicked cell for the human. `false` means the click was
    /// ignored (occupied cell, out of range, or game over).
    pub fn play_human(&mut self, index: usize) -> bool {
        self.board.mark(index, self.human_mark)
    }

    /// Plays the optimal CPU answer. `Ok(None)` when the game has already
    /// ended and no response is due.
    pub fn cpu_respond(&mut self) -> Result<Option<usize>, String> {
        if self.board.is_ended() {
            return Ok(None);
        }

        let index = calculate_minimax_move(&self.board, self.cpu_mark)?;
        if !self.board.mark(index, self.cpu_mark) {
            return Err(format!("CPU move at {index} was rejected"));
        }
        Ok(Some(index))
    }

    /// Random CPU opening move. Declines on boards with fewer than 2 empty
    /// cells.
    pub fn cpu_open(&mut self, rng: &mut SessionRng) -> Option<usize> {
        let index = calculate_random_move(&self.board, rng)?;
        if self.board.mark(index, self.cpu_mark) {
            Some(index)
        } else {
            None
        }
    }

    pub fn reset(&mut self) {
        self.board.reset();
    }
}
