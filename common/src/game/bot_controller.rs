use super::board::{BOARD_CELLS, Board};
use super::session_rng::SessionRng;
use super::types::{BotType, GameStatus, Mark};

pub fn calculate_move(
    bot_type: BotType,
    board: &Board,
    bot_mark: Mark,
    rng: &mut SessionRng,
) -> Option<usize> {
    match bot_type {
        BotType::Random => calculate_random_move(board, rng),
        BotType::Minimax => calculate_minimax_move(board, bot_mark).ok(),
    }
}

/// Uniformly random empty cell. A random move is never attempted when
/// fewer than 2 empty cells remain.
pub fn calculate_random_move(board: &Board, rng: &mut SessionRng) -> Option<usize> {
    let empty_indices = board.empty_indices();
    if empty_indices.len() < 2 {
        return None;
    }
    let choice = rng.random_range(0..empty_indices.len());
    Some(empty_indices[choice])
}

/// Full-depth minimax with alpha-beta pruning over the remaining game tree.
///
/// Among equally scored moves the lowest index wins: only a strictly better
/// score replaces the current best, so the result is deterministic.
///
/// The returned move never lets the bot lose from a position where a draw
/// or win is reachable, which on a 3x3 board is every legal position.
pub fn calculate_minimax_move(board: &Board, bot_mark: Mark) -> Result<usize, String> {
    let opponent_mark = bot_mark
        .opponent()
        .ok_or_else(|| "Bot mark must be X or O".to_string())?;

    if board.is_ended() {
        return Err("Game is already over".to_string());
    }

    let empty_indices = board.empty_indices();
    if empty_indices.is_empty() {
        return Err("No empty cells to mark".to_string());
    }

    let mut scratch = board.clone();
    let mut best_score = i32::MIN;
    let mut best_move = empty_indices[0];

    for index in empty_indices {
        scratch.set_cell(index, bot_mark);
        let score = minimax(&mut scratch, 0, i32::MIN, i32::MAX, false, bot_mark, opponent_mark);
        scratch.set_cell(index, Mark::Empty);

        if score > best_score {
            best_score = score;
            best_move = index;
        }
    }

    Ok(best_move)
}

/// Terminal scoring is +1/-1/0 from the bot's perspective, with no depth
/// discount: a forced win scores the same at any distance. The scratch
/// board is mutated in place and every cell is restored before returning,
/// pruning exits included.
fn minimax(
    board: &mut Board,
    depth: usize,
    mut alpha: i32,
    mut beta: i32,
    is_maximizing: bool,
    bot_mark: Mark,
    opponent_mark: Mark,
) -> i32 {
    let status = board.evaluate();
    if let Some(winner) = status.winner() {
        return if winner == bot_mark { 1 } else { -1 };
    }
    if status == GameStatus::Draw {
        return 0;
    }

    if is_maximizing {
        let mut best_score = i32::MIN;
        for index in 0..BOARD_CELLS {
            if !board.is_empty(index) {
                continue;
            }
            board.set_cell(index, bot_mark);
            let score = minimax(board, depth + 1, alpha, beta, false, bot_mark, opponent_mark);
            board.set_cell(index, Mark::Empty);

            best_score = best_score.max(score);
            alpha = alpha.max(score);
            if beta <= alpha {
                break;
            }
        }
        best_score
    } else {
        let mut best_score = i32::MAX;
        for index in 0..BOARD_CELLS {
            if !board.is_empty(index) {
                continue;
            }
            board.set_cell(index, opponent_mark);
            let score = minimax(board, depth + 1, alpha, beta, true, bot_mark, opponent_mark);
            board.set_cell(index, Mark::Empty);

            best_score = best_score.min(score);
            beta = beta.min(score);
            if beta <= alpha {
                break;
            }
        }
        best_score
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::Mark::{Empty as E, O, X};

    #[test]
    fn test_minimax_takes_immediate_win() {
        let board = Board::from_cells([X, X, E, O, O, E, E, E, E]);
        assert_eq!(calculate_minimax_move(&board, X), Ok(2));
    }

    #[test]
    fn test_minimax_takes_immediate_win_as_o() {
        let board = Board::from_cells([O, O, E, X, X, E, X, E, E]);
        assert_eq!(calculate_minimax_move(&board, O), Ok(2));
    }

    #[test]
    fn test_minimax_blocks_opponent_threat() {
        // X threatens the top row at 2; O has no winning move of its own
        // and blocking is the only reply that avoids a loss.
        let board = Board::from_cells([X, X, E, E, O, E, E, E, E]);
        assert_eq!(calculate_minimax_move(&board, O), Ok(2));
    }

    #[test]
    fn test_minimax_prefers_win_over_block() {
        // Both sides threaten a line; taking the win at 2 beats blocking 5.
        let board = Board::from_cells([X, X, E, O, O, E, E, E, E]);
        let chosen = calculate_minimax_move(&board, X).unwrap();
        let mut after = board.clone();
        assert!(after.mark(chosen, X));
        assert_eq!(after.evaluate(), GameStatus::XWon);
    }

    #[test]
    fn test_minimax_ties_break_to_lowest_index() {
        // Every opening reply on an empty board scores a draw, so the
        // first candidate must be kept.
        let board = Board::new();
        assert_eq!(calculate_minimax_move(&board, X), Ok(0));
    }

    #[test]
    fn test_minimax_rejects_won_board() {
        let board = Board::from_cells([X, X, X, O, O, E, E, E, E]);
        assert!(calculate_minimax_move(&board, O).is_err());
    }

    #[test]
    fn test_minimax_rejects_full_board() {
        let board = Board::from_cells([X, O, X, X, O, O, O, X, X]);
        assert!(calculate_minimax_move(&board, X).is_err());
    }

    #[test]
    fn test_minimax_rejects_empty_mark() {
        let board = Board::new();
        assert!(calculate_minimax_move(&board, E).is_err());
    }

    #[test]
    fn test_minimax_leaves_board_untouched() {
        let board = Board::from_cells([X, E, E, E, O, E, E, E, E]);
        let before = board.clone();
        calculate_minimax_move(&board, X).unwrap();
        assert_eq!(board, before);
    }

    #[test]
    fn test_random_move_requires_two_empty_cells() {
        let board = Board::from_cells([X, O, X, X, O, O, O, X, E]);
        let mut rng = SessionRng::from_seed(7);
        assert_eq!(calculate_random_move(&board, &mut rng), None);
    }

    #[test]
    fn test_random_move_picks_an_empty_cell() {
        let board = Board::from_cells([X, E, O, E, X, E, E, O, E]);
        let mut rng = SessionRng::from_seed(42);
        for _ in 0..20 {
            let index = calculate_random_move(&board, &mut rng).unwrap();
            assert!(board.is_empty(index));
        }
    }

    #[test]
    fn test_calculate_move_dispatches_by_bot_type() {
        let board = Board::new();
        let mut rng = SessionRng::from_seed(1);

        let random = calculate_move(BotType::Random, &board, X, &mut rng).unwrap();
        assert!(board.is_empty(random));

        let minimax = calculate_move(BotType::Minimax, &board, X, &mut rng);
        assert_eq!(minimax, Some(0));
    }

    #[test]
    fn test_calculate_move_minimax_on_ended_board_is_none() {
        let board = Board::from_cells([X, X, X, O, O, E, E, E, E]);
        let mut rng = SessionRng::from_seed(1);
        assert_eq!(calculate_move(BotType::Minimax, &board, O, &mut rng), None);
    }

    /// Walks every legal opponent line of play, with the bot answering via
    /// minimax, and asserts the opponent never ends up the winner.
    fn assert_bot_never_loses(board: &mut Board, bot_mark: Mark, bot_to_move: bool) {
        let status = board.evaluate();
        if status.is_terminal() {
            assert_ne!(
                status.winner(),
                bot_mark.opponent(),
                "opponent won: {board:?}"
            );
            return;
        }

        let opponent_mark = bot_mark.opponent().unwrap();
        if bot_to_move {
            let index = calculate_minimax_move(board, bot_mark).unwrap();
            assert!(board.mark(index, bot_mark));
            assert_bot_never_loses(board, bot_mark, false);
            board.set_cell(index, Mark::Empty);
        } else {
            for index in board.empty_indices() {
                assert!(board.mark(index, opponent_mark));
                assert_bot_never_loses(board, bot_mark, true);
                board.set_cell(index, Mark::Empty);
            }
        }
    }

    #[test]
    fn test_bot_moving_first_never_loses() {
        let mut board = Board::new();
        assert_bot_never_loses(&mut board, Mark::X, true);
        assert_eq!(board, Board::new());
    }

    #[test]
    fn test_bot_moving_second_never_loses() {
        let mut board = Board::new();
        assert_bot_never_loses(&mut board, Mark::O, false);
        assert_eq!(board, Board::new());
    }
}
