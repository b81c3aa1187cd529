//! Tic-Tac-Toe game rules

pub mod board;
pub mod game;
pub mod lines;
pub mod validation;

pub use board::{Board, Cell, Move, Player};
pub use game::{Game, GameStatus, Ply};
pub use lines::{LineScan, WINNING_LINES};
