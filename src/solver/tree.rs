//! Reachable position enumeration

use std::collections::{HashSet, VecDeque};

use crate::engine::Board;

/// Enumerate every board reachable from the empty position by legal play
///
/// The traversal is breadth-first, so positions come out ordered by the
/// number of pieces on the board. The empty board and terminal boards are
/// included; positions that transpose into each other appear once.
pub fn reachable_boards() -> Vec<Board> {
    let root = Board::new();
    let mut seen = HashSet::from([root]);
    let mut queue = VecDeque::from([root]);
    let mut boards = Vec::new();

    while let Some(board) = queue.pop_front() {
        boards.push(board);

        for mv in board.legal_moves() {
            let next = board
                .apply_move(mv)
                .expect("legal move generation should not fail");
            if seen.insert(next) {
                queue.push_back(next);
            }
        }
    }

    boards
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shallow_counts() {
        let boards = reachable_boards();

        // 1 empty board, 9 one-piece boards, 9 * 8 two-piece boards
        assert_eq!(boards.iter().filter(|b| b.occupied_count() == 0).count(), 1);
        assert_eq!(boards.iter().filter(|b| b.occupied_count() == 1).count(), 9);
        assert_eq!(
            boards.iter().filter(|b| b.occupied_count() == 2).count(),
            72
        );
    }

    #[test]
    fn test_breadth_first_order() {
        let boards = reachable_boards();
        let depths: Vec<usize> = boards.iter().map(|b| b.occupied_count()).collect();

        assert!(depths.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn test_every_board_is_valid() {
        for board in reachable_boards() {
            assert!(board.is_valid(), "unreachable board {}", board.encode());
        }
    }

    #[test]
    fn test_no_duplicates() {
        let boards = reachable_boards();
        let unique: HashSet<Board> = boards.iter().copied().collect();
        assert_eq!(unique.len(), boards.len());
    }
}
