//! oxo CLI - Exact minimax engine and solver for Tic-Tac-Toe
//!
//! This CLI provides a unified interface for:
//! - Querying the optimal move for any position
//! - Solving the full game tree and saving the policy table
//! - Exporting the solved policy for further analysis
//! - Playing matches between reference agents

use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "oxo")]
#[command(version, about = "Exact minimax solver for Tic-Tac-Toe", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the optimal move for a position
    Best(oxo::cli::commands::best::BestArgs),

    /// Solve every reachable position
    Solve(oxo::cli::commands::solve::SolveArgs),

    /// Export the solved policy in various formats
    Export(oxo::cli::commands::export::ExportArgs),

    /// Play games between two agents
    Play(oxo::cli::commands::play::PlayArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Best(args) => oxo::cli::commands::best::execute(args),
        Commands::Solve(args) => oxo::cli::commands::solve::execute(args),
        Commands::Export(args) => oxo::cli::commands::export::execute(args),
        Commands::Play(args) => oxo::cli::commands::play::execute(args),
    }
}
