//! Solve command - Solve the full game tree and report its values

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use crate::{
    cli::output::{create_spinner, format_number, print_kv, print_section},
    solver::PolicyTable,
    store::{MsgPackStore, PolicyStore},
};

#[derive(Parser, Debug)]
#[command(about = "Solve every reachable position")]
pub struct SolveArgs {
    /// Write the solved policy table to this file (MessagePack)
    #[arg(long, short = 's')]
    pub save: Option<PathBuf>,
}

pub fn execute(args: SolveArgs) -> Result<()> {
    let spinner = create_spinner("Solving every reachable position...");
    let table = PolicyTable::solve();
    spinner.finish_with_message(format!(
        "Solved {} positions",
        format_number(table.len())
    ));

    let (x_wins, draws, o_wins) = table.value_counts();

    print_section("Game-Theoretic Values");
    print_kv("Positions", &format_number(table.len()));
    print_kv("X forces a win", &format_number(x_wins));
    print_kv("Draw with best play", &format_number(draws));
    print_kv("O forces a win", &format_number(o_wins));

    if let Some(path) = &args.save {
        MsgPackStore::new().save(&table, path)?;
        println!("\n✓ Policy table saved to: {}", path.display());
    }

    Ok(())
}
