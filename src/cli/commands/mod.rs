//! CLI commands
//!
//! Each command module exposes an args struct and an `execute` entry point;
//! the binary parses and dispatches.

pub mod best;
pub mod export;
pub mod play;
pub mod solve;
