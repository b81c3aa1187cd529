//! Perfect-play policy over all reachable positions

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::{minimax::Solver, tree::reachable_boards};
use crate::engine::{Board, Move, Player};

/// Perfect-play assessment of one position
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicyEntry {
    /// Exact value with both sides playing perfectly
    pub value: i32,
    /// Every move achieving that value, in row-major order
    ///
    /// Empty for terminal positions.
    pub optimal_moves: Vec<Move>,
}

/// Exact policy table for every position reachable by legal play
///
/// Entries are keyed by the board's 9-character encoding so the table
/// serializes to formats that require string keys.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PolicyTable {
    entries: HashMap<String, PolicyEntry>,
}

impl PolicyTable {
    /// Solve every reachable position
    pub fn solve() -> Self {
        let mut solver = Solver::new();
        let mut entries = HashMap::new();

        for board in reachable_boards() {
            entries.insert(board.encode(), Self::entry_for(&mut solver, &board));
        }

        PolicyTable { entries }
    }

    fn entry_for(solver: &mut Solver, board: &Board) -> PolicyEntry {
        if board.is_terminal() {
            return PolicyEntry {
                value: board.utility(),
                optimal_moves: Vec::new(),
            };
        }

        let maximizing = board.current_player() == Some(Player::X);
        let mut value = if maximizing { i32::MIN } else { i32::MAX };
        let mut optimal_moves = Vec::new();

        for (mv, child) in solver.evaluate_moves(board) {
            if (maximizing && child > value) || (!maximizing && child < value) {
                value = child;
                optimal_moves.clear();
                optimal_moves.push(mv);
            } else if child == value {
                optimal_moves.push(mv);
            }
        }

        PolicyEntry {
            value,
            optimal_moves,
        }
    }

    /// Look up the entry for a board, if the board is reachable
    pub fn get(&self, board: &Board) -> Option<&PolicyEntry> {
        self.entries.get(&board.encode())
    }

    /// Number of positions in the table
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over `(encoding, entry)` pairs in arbitrary order
    pub fn entries(&self) -> impl Iterator<Item = (&String, &PolicyEntry)> {
        self.entries.iter()
    }

    /// Count positions by value: `(x_wins, draws, o_wins)`
    pub fn value_counts(&self) -> (usize, usize, usize) {
        let mut x_wins = 0;
        let mut draws = 0;
        let mut o_wins = 0;

        for entry in self.entries.values() {
            match entry.value {
                1 => x_wins += 1,
                -1 => o_wins += 1,
                _ => draws += 1,
            }
        }

        (x_wins, draws, o_wins)
    }
}
