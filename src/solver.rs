//! Exact solving of Tic-Tac-Toe

pub mod minimax;
pub mod policy;
pub mod tree;

pub use minimax::{Evaluation, Solver, analyze, best_move, evaluate};
pub use policy::{PolicyEntry, PolicyTable};
pub use tree::reachable_boards;
