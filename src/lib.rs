//! oxo - Exact minimax engine and solver for Tic-Tac-Toe
//!
//! This crate provides:
//! - Complete Tic-Tac-Toe game implementation with validation
//! - Exact minimax solver with a transposition cache
//! - Policy tables covering every reachable position
//! - Reference agents (optimal, random, defensive) and match play
//! - MessagePack persistence plus JSON/CSV export

pub mod agents;
pub mod cli;
pub mod engine;
pub mod error;
pub mod solver;
pub mod store;

pub use agents::{Agent, DefensiveAgent, MatchConfig, MatchStats, OptimalAgent, RandomAgent};
pub use engine::{Board, Cell, Game, GameStatus, Move, Player};
pub use error::{Error, Result};
pub use solver::{Evaluation, PolicyEntry, PolicyTable, Solver};
pub use store::{MsgPackStore, PolicyStore};
