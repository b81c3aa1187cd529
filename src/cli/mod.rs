//! CLI infrastructure for the oxo solver
//!
//! This module provides the command-line interface for solving, querying,
//! exporting, and playing out the Tic-Tac-Toe game tree.

pub mod commands;
pub mod output;
