//! Export command - Write the solved policy to analysis-friendly formats
//!
//! JSON keeps the table as one object keyed by board encoding; CSV flattens
//! it to one row per decision position. Terminal positions carry no move and
//! are skipped.

use std::{
    collections::BTreeMap,
    fs::File,
    path::{Path, PathBuf},
};

use anyhow::Result;
use clap::{Parser, ValueEnum};
use serde::Serialize;

use crate::{
    cli::output::{create_spinner, format_number},
    engine::Board,
    solver::{PolicyEntry, PolicyTable},
    store::{MsgPackStore, PolicyStore},
};

#[derive(Parser, Debug)]
#[command(about = "Export the solved policy in various formats")]
pub struct ExportArgs {
    /// Output file path
    #[arg(long, short = 'o')]
    pub output: PathBuf,

    /// Export format
    #[arg(long, short = 'f', default_value = "json")]
    pub format: ExportFormat,

    /// Which optimal moves to include per position
    #[arg(long, default_value = "single")]
    pub mode: PolicyMode,

    /// Reuse a previously solved policy file instead of solving again
    #[arg(long)]
    pub policy: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    /// JSON object keyed by board encoding
    Json,
    /// Flat CSV, one row per position
    Csv,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PolicyMode {
    /// A single canonical optimal move per position
    Single,
    /// All minimax-optimal moves
    Full,
}

impl PolicyMode {
    fn as_str(self) -> &'static str {
        match self {
            PolicyMode::Single => "single",
            PolicyMode::Full => "full",
        }
    }
}

pub fn execute(args: ExportArgs) -> Result<()> {
    let table = load_or_solve(args.policy.as_deref())?;

    let exported = match args.format {
        ExportFormat::Json => export_json(&table, &args.output, args.mode)?,
        ExportFormat::Csv => export_csv(&table, &args.output, args.mode)?,
    };

    println!(
        "✓ Exported {} positions to: {}",
        format_number(exported),
        args.output.display()
    );
    Ok(())
}

fn load_or_solve(policy: Option<&Path>) -> Result<PolicyTable> {
    match policy {
        Some(path) => Ok(MsgPackStore::new().load(path)?),
        None => {
            let spinner = create_spinner("Solving every reachable position...");
            let table = PolicyTable::solve();
            spinner.finish_with_message(format!(
                "Solved {} positions",
                format_number(table.len())
            ));
            Ok(table)
        }
    }
}

#[derive(Serialize)]
struct PolicyExport {
    description: &'static str,
    mode: &'static str,
    total_positions: usize,
    policy: BTreeMap<String, ExportEntry>,
}

#[derive(Serialize)]
struct ExportEntry {
    value: i32,
    moves: MoveField,
}

/// Cell indices 0-8 in row-major order
#[derive(Serialize)]
#[serde(untagged)]
enum MoveField {
    Single(usize),
    Multiple(Vec<usize>),
}

/// Export the policy as one JSON object keyed by board encoding
fn export_json(table: &PolicyTable, path: &Path, mode: PolicyMode) -> Result<usize> {
    let mut policy = BTreeMap::new();
    for (encoding, entry) in table.entries() {
        let Some(&first) = entry.optimal_moves.first() else {
            continue;
        };
        let moves = match mode {
            PolicyMode::Single => MoveField::Single(first.index()),
            PolicyMode::Full => MoveField::Multiple(
                entry.optimal_moves.iter().map(|mv| mv.index()).collect(),
            ),
        };
        policy.insert(
            encoding.clone(),
            ExportEntry {
                value: entry.value,
                moves,
            },
        );
    }

    let export = PolicyExport {
        description: "Minimax policy for Tic-Tac-Toe",
        mode: mode.as_str(),
        total_positions: policy.len(),
        policy,
    };

    let file = File::create(path)?;
    serde_json::to_writer_pretty(file, &export)?;
    Ok(export.total_positions)
}

#[derive(Serialize)]
struct CsvRow<'a> {
    board: &'a str,
    depth: usize,
    to_move: char,
    value: i32,
    moves: String,
}

/// Export the policy as CSV, one row per decision position
fn export_csv(table: &PolicyTable, path: &Path, mode: PolicyMode) -> Result<usize> {
    let mut entries: Vec<(&String, &PolicyEntry)> = table.entries().collect();
    entries.sort_by(|a, b| a.0.cmp(b.0));

    let mut writer = csv::Writer::from_path(path)?;
    let mut exported = 0;
    for (encoding, entry) in entries {
        if entry.optimal_moves.is_empty() {
            continue;
        }
        let board = Board::from_string(encoding)?;
        let Some(player) = board.current_player() else {
            continue;
        };

        let moves = match mode {
            PolicyMode::Single => entry.optimal_moves[0].index().to_string(),
            PolicyMode::Full => entry
                .optimal_moves
                .iter()
                .map(|mv| mv.index().to_string())
                .collect::<Vec<_>>()
                .join(" "),
        };

        writer.serialize(CsvRow {
            board: encoding,
            depth: board.occupied_count(),
            to_move: player.to_cell().to_char(),
            value: entry.value,
            moves,
        })?;
        exported += 1;
    }
    writer.flush()?;

    Ok(exported)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_json_export_writes_policy_object() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("policy.json");
        let table = PolicyTable::solve();

        let exported = export_json(&table, &path, PolicyMode::Single).unwrap();
        assert!(exported > 0);
        assert!(exported < table.len());

        let contents = std::fs::read_to_string(&path).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&contents).unwrap();
        assert_eq!(parsed["mode"], "single");
        assert_eq!(parsed["total_positions"], exported);

        // The empty board is a draw with every opening optimal
        let empty = &parsed["policy"]["........."];
        assert_eq!(empty["value"], 0);
        assert!(empty["moves"].is_u64());
    }

    #[test]
    fn test_json_export_full_mode_lists_all_moves() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("policy_full.json");
        let table = PolicyTable::solve();

        export_json(&table, &path, PolicyMode::Full).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&contents).unwrap();
        let empty_moves = parsed["policy"]["........."]["moves"]
            .as_array()
            .unwrap()
            .clone();
        assert_eq!(empty_moves.len(), 9);
    }

    #[test]
    fn test_csv_export_has_header_and_rows() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("policy.csv");
        let table = PolicyTable::solve();

        let exported = export_csv(&table, &path, PolicyMode::Single).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        let mut lines = contents.lines();
        assert_eq!(lines.next(), Some("board,depth,to_move,value,moves"));
        assert_eq!(contents.lines().count(), exported + 1);

        // Rows are sorted by encoding, so the empty board comes first
        let first_row = lines.next().unwrap();
        assert!(first_row.starts_with("........."));
    }
}
