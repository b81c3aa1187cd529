//! Best command - Query the optimal move for a position

use std::path::{Path, PathBuf};

use anyhow::{Result, anyhow};
use clap::Parser;

use crate::{
    cli::output::{print_kv, print_section, print_subsection},
    engine::{Board, GameStatus},
    error::Error,
    solver::{PolicyEntry, Solver},
    store::{MsgPackStore, PolicyStore},
};

#[derive(Parser, Debug)]
#[command(about = "Show the optimal move for a position")]
pub struct BestArgs {
    /// Board encoding: nine cells in row-major order ('X', 'O', '.')
    pub board: String,

    /// Show every minimax-optimal move, not just the first
    #[arg(long)]
    pub all: bool,

    /// Look the position up in a solved policy file instead of solving
    #[arg(long)]
    pub policy: Option<PathBuf>,
}

pub fn execute(args: BestArgs) -> Result<()> {
    let board = Board::from_string(&args.board)?;
    if !board.is_valid() {
        return Err(Error::UnreachableBoard {
            board: board.encode(),
        }
        .into());
    }

    print_section("Position");
    println!("{board}");
    println!();

    // Terminal positions have a result, not a move
    let Some(player) = board.current_player() else {
        let result = match board.status() {
            GameStatus::Won(winner) => format!("{winner} wins"),
            _ => "draw".to_string(),
        };
        print_kv("Result", &result);
        return Ok(());
    };

    let entry = match &args.policy {
        Some(path) => lookup_entry(path, &board)?,
        None => {
            let mut solver = Solver::new();
            solved_entry(&mut solver, &board)
        }
    };

    print_kv("To move", &player.to_string());
    print_kv(
        "Value",
        &format!("{} ({})", entry.value, describe_value(entry.value)),
    );

    if args.all {
        print_subsection("Optimal moves");
        for mv in &entry.optimal_moves {
            println!("  - {mv}");
        }
    } else if let Some(best) = entry.optimal_moves.first() {
        print_kv("Best move", &best.to_string());
    }

    Ok(())
}

/// Load a solved policy file and look the position up
fn lookup_entry(path: &Path, board: &Board) -> Result<PolicyEntry> {
    let table = MsgPackStore::new().load(path)?;
    table
        .get(board)
        .cloned()
        .ok_or_else(|| anyhow!("position '{}' is not in the policy file", board.encode()))
}

/// Solve the position directly: its value plus every move achieving it
fn solved_entry(solver: &mut Solver, board: &Board) -> PolicyEntry {
    let value = solver.evaluate(board);
    let optimal_moves = solver
        .evaluate_moves(board)
        .into_iter()
        .filter(|&(_, move_value)| move_value == value)
        .map(|(mv, _)| mv)
        .collect();

    PolicyEntry {
        value,
        optimal_moves,
    }
}

fn describe_value(value: i32) -> &'static str {
    match value {
        v if v > 0 => "X forces a win",
        v if v < 0 => "O forces a win",
        _ => "draw with best play",
    }
}
