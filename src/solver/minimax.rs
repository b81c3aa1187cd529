//! Minimax evaluation of positions
//!
//! The game tree is small enough to search exhaustively, so evaluation is
//! exact: +1 means X forces a win, -1 means O forces a win, 0 means best
//! play from both sides ends in a draw. [`Solver`] adds a transposition
//! cache for callers that evaluate many positions.

use std::collections::HashMap;

use crate::engine::{Board, Move, Player};

/// Result of analyzing one position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Evaluation {
    /// An optimal move for the side to move, `None` when the game is over
    pub best: Option<Move>,
    /// Exact value of the position with both sides playing perfectly
    pub value: i32,
}

/// Value of the position with X to move: the maximum over all replies
fn max_value(board: &Board) -> i32 {
    if board.is_terminal() {
        return board.utility();
    }

    let mut best = i32::MIN;
    for mv in board.legal_moves() {
        let next = board
            .apply_move(mv)
            .expect("legal move generation should not fail");
        best = best.max(min_value(&next));
    }
    best
}

/// Value of the position with O to move: the minimum over all replies
fn min_value(board: &Board) -> i32 {
    if board.is_terminal() {
        return board.utility();
    }

    let mut best = i32::MAX;
    for mv in board.legal_moves() {
        let next = board
            .apply_move(mv)
            .expect("legal move generation should not fail");
        best = best.min(max_value(&next));
    }
    best
}

/// Exact value of a position
///
/// Terminal positions report their utility directly.
pub fn evaluate(board: &Board) -> i32 {
    match board.current_player() {
        Some(Player::X) => max_value(board),
        Some(Player::O) => min_value(board),
        None => board.utility(),
    }
}

/// Analyze a position: exact value plus an optimal move
///
/// X picks the move maximizing the value, O the move minimizing it. Among
/// equally good moves the first in row-major order wins, so the choice is
/// deterministic.
pub fn analyze(board: &Board) -> Evaluation {
    let Some(player) = board.current_player() else {
        return Evaluation {
            best: None,
            value: board.utility(),
        };
    };

    let mut best = None;
    let mut value = match player {
        Player::X => i32::MIN,
        Player::O => i32::MAX,
    };

    for mv in board.legal_moves() {
        let next = board
            .apply_move(mv)
            .expect("legal move generation should not fail");
        let child = evaluate(&next);

        let improves = match player {
            Player::X => child > value,
            Player::O => child < value,
        };
        if improves {
            value = child;
            best = Some(mv);
        }
    }

    Evaluation { best, value }
}

/// An optimal move for the side to move, `None` when the game is over
///
/// # Examples
///
/// ```
/// use oxo::engine::{Board, Move};
/// use oxo::solver;
///
/// // X holds two in the top row and wins by completing it
/// let board = Board::from_string("XX.OO....")?;
/// assert_eq!(solver::best_move(&board), Some(Move::new(0, 2)));
/// # Ok::<(), oxo::Error>(())
/// ```
pub fn best_move(board: &Board) -> Option<Move> {
    analyze(board).best
}

/// Minimax evaluator with a transposition cache
///
/// Produces the same values and move choices as the free functions; the
/// cache only avoids re-searching positions reachable along multiple move
/// orders.
#[derive(Debug, Clone, Default)]
pub struct Solver {
    cache: HashMap<Board, i32>,
}

impl Solver {
    /// Create a solver with an empty cache
    pub fn new() -> Self {
        Self {
            cache: HashMap::new(),
        }
    }

    /// Exact value of a position, memoized
    pub fn evaluate(&mut self, board: &Board) -> i32 {
        if let Some(&value) = self.cache.get(board) {
            return value;
        }

        let value = if board.is_terminal() {
            board.utility()
        } else {
            let maximizing = board.current_player() == Some(Player::X);
            let mut best = if maximizing { i32::MIN } else { i32::MAX };

            for mv in board.legal_moves() {
                let next = board
                    .apply_move(mv)
                    .expect("legal move generation should not fail");
                let child = self.evaluate(&next);
                best = if maximizing {
                    best.max(child)
                } else {
                    best.min(child)
                };
            }
            best
        };

        self.cache.insert(*board, value);
        value
    }

    /// Evaluate every legal move in the given position
    ///
    /// Returns `(move, value)` pairs in row-major move order.
    pub fn evaluate_moves(&mut self, board: &Board) -> Vec<(Move, i32)> {
        let mut values = Vec::new();
        for mv in board.legal_moves() {
            let next = board
                .apply_move(mv)
                .expect("legal move generation should not fail");
            values.push((mv, self.evaluate(&next)));
        }
        values
    }

    /// Analyze a position: exact value plus an optimal move
    pub fn analyze(&mut self, board: &Board) -> Evaluation {
        let Some(player) = board.current_player() else {
            return Evaluation {
                best: None,
                value: board.utility(),
            };
        };

        let mut best = None;
        let mut value = match player {
            Player::X => i32::MIN,
            Player::O => i32::MAX,
        };

        for (mv, child) in self.evaluate_moves(board) {
            let improves = match player {
                Player::X => child > value,
                Player::O => child < value,
            };
            if improves {
                value = child;
                best = Some(mv);
            }
        }

        Evaluation { best, value }
    }

    /// An optimal move for the side to move, `None` when the game is over
    pub fn best_move(&mut self, board: &Board) -> Option<Move> {
        self.analyze(board).best
    }

    /// Number of distinct positions evaluated so far
    pub fn cached_positions(&self) -> usize {
        self.cache.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_board_is_drawn() {
        assert_eq!(evaluate(&Board::new()), 0);
    }

    #[test]
    fn test_terminal_board_reports_utility() {
        let won = Board::from_string("XXXOO....").unwrap();
        assert_eq!(evaluate(&won), 1);
        assert_eq!(analyze(&won), Evaluation { best: None, value: 1 });
        assert_eq!(best_move(&won), None);

        let drawn = Board::from_string("XOXXOOOXX").unwrap();
        assert_eq!(evaluate(&drawn), 0);
        assert_eq!(best_move(&drawn), None);
    }

    #[test]
    fn test_takes_immediate_win() {
        // X completes the top row; later moves tie at +1 but come after
        let board = Board::from_string("XX.OO....").unwrap();
        let result = analyze(&board);

        assert_eq!(result.best, Some(Move::new(0, 2)));
        assert_eq!(result.value, 1);

        let won = board.apply_move(result.best.unwrap()).unwrap();
        assert_eq!(won.winner(), Some(Player::X));
        assert_eq!(won.utility(), 1);
    }

    #[test]
    fn test_blocks_forced_loss() {
        // X holds two corners of the top row; only (0, 1) saves O
        let board = Board::from_string("X.X.O....").unwrap();
        assert_eq!(board.current_player(), Some(Player::O));

        let result = analyze(&board);
        assert_eq!(result.best, Some(Move::new(0, 1)));
        assert_eq!(result.value, 0);
    }

    #[test]
    fn test_minimizer_takes_own_win() {
        // O wins immediately at (2, 0) completing the anti-diagonal;
        // any other move lets X escape with a draw
        let board = Board::from_string("XXO.OX...").unwrap();
        assert_eq!(board.current_player(), Some(Player::O));

        let result = analyze(&board);
        assert_eq!(result.value, -1);
        assert_eq!(result.best, Some(Move::new(2, 0)));
    }

    #[test]
    fn test_solver_matches_free_functions() {
        let mut solver = Solver::new();
        let boards = [
            Board::new(),
            Board::from_string("X........").unwrap(),
            Board::from_string("XX.OO....").unwrap(),
            Board::from_string("X.X.O....").unwrap(),
            Board::from_string("XOX.O.X..").unwrap(),
        ];

        for board in &boards {
            assert_eq!(solver.evaluate(board), evaluate(board), "{}", board.encode());
            assert_eq!(solver.best_move(board), best_move(board), "{}", board.encode());
        }
    }

    #[test]
    fn test_solver_caches_positions() {
        let mut solver = Solver::new();
        solver.evaluate(&Board::new());

        let cached = solver.cached_positions();
        assert!(cached > 0);

        // A second evaluation reuses the cache
        solver.evaluate(&Board::new());
        assert_eq!(solver.cached_positions(), cached);
    }

    #[test]
    fn test_evaluate_moves_orders_row_major() {
        let mut solver = Solver::new();
        let board = Board::from_string("XX.OO....").unwrap();

        let values = solver.evaluate_moves(&board);
        let moves: Vec<Move> = values.iter().map(|&(mv, _)| mv).collect();
        assert_eq!(
            moves,
            vec![
                Move::new(0, 2),
                Move::new(1, 2),
                Move::new(2, 0),
                Move::new(2, 1),
                Move::new(2, 2),
            ]
        );

        // The immediate win is worth +1
        assert_eq!(values[0].1, 1);
    }
}
