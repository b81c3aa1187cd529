//! Play command - Pit two agents against each other

use anyhow::Result;
use clap::{Parser, ValueEnum};
use indicatif::ProgressBar;

use crate::{
    agents::{
        Agent, DefensiveAgent, MatchConfig, MatchStats, OptimalAgent, RandomAgent, play_game,
        run_match,
    },
    cli::output::{create_match_progress, print_kv, print_section, print_stats_table},
    engine::{GameStatus, Player},
};

#[derive(Parser, Debug)]
#[command(about = "Play games between two agents")]
pub struct PlayArgs {
    /// Agent playing X
    #[arg(long, default_value = "optimal")]
    pub x: AgentKind,

    /// Agent playing O
    #[arg(long, default_value = "random")]
    pub o: AgentKind,

    /// Number of games
    #[arg(long, short = 'g', default_value_t = 100)]
    pub games: usize,

    /// Random seed for reproducibility
    #[arg(long)]
    pub seed: Option<u64>,

    /// Hide the progress bar
    #[arg(long, short = 'q')]
    pub quiet: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum AgentKind {
    /// Perfect play (minimax)
    Optimal,
    /// Uniform random moves
    Random,
    /// Blocks opponent wins, otherwise random
    Defensive,
}

impl AgentKind {
    fn build(self) -> Box<dyn Agent> {
        match self {
            AgentKind::Optimal => Box::new(OptimalAgent::new("Optimal".to_string())),
            AgentKind::Random => Box::new(RandomAgent::new("Random".to_string())),
            AgentKind::Defensive => Box::new(DefensiveAgent::new("Defensive".to_string())),
        }
    }
}

pub fn execute(args: PlayArgs) -> Result<()> {
    let mut x = args.x.build();
    let mut o = args.o.build();

    // A single game prints its move-by-move record instead of statistics
    if args.games == 1 && !args.quiet {
        if let Some(seed) = args.seed {
            x.set_rng_seed(seed);
            o.set_rng_seed(seed.wrapping_add(1));
        }
        return watch_game(x.as_mut(), o.as_mut());
    }

    print_section("Match");
    print_kv("X", x.name());
    print_kv("O", o.name());
    print_kv("Games", &args.games.to_string());
    if let Some(seed) = args.seed {
        print_kv("Seed", &seed.to_string());
    }
    println!();

    let config = MatchConfig {
        num_games: args.games,
        seed: args.seed,
    };
    let progress = if args.quiet {
        ProgressBar::hidden()
    } else {
        create_match_progress(args.games as u64)
    };

    let mut x_wins = 0usize;
    let mut o_wins = 0usize;
    let mut draws = 0usize;
    let stats = run_match(&config, x.as_mut(), o.as_mut(), |_, status| {
        match status {
            GameStatus::Won(Player::X) => x_wins += 1,
            GameStatus::Won(Player::O) => o_wins += 1,
            GameStatus::Draw => draws += 1,
            GameStatus::InProgress => {}
        }
        progress.set_message(format!("X:{x_wins} O:{o_wins} D:{draws}"));
        progress.inc(1);
    })?;
    progress.finish_with_message(format!(
        "X:{} O:{} D:{}",
        stats.x_wins, stats.o_wins, stats.draws
    ));

    print_match_results(&stats);
    Ok(())
}

/// Play one game and print the move-by-move record
fn watch_game(x: &mut dyn Agent, o: &mut dyn Agent) -> Result<()> {
    let game = play_game(x, o)?;
    let states = game.state_sequence()?;

    print_section("Game Record");
    for (i, ply) in game.plies.iter().enumerate() {
        println!("\nMove {}: {} plays {}", i + 1, ply.player, ply.mv);
        println!("{}", states[i + 1]);
    }

    match game.status {
        GameStatus::Won(winner) => println!("\n{winner} wins in {} moves", game.plies.len()),
        GameStatus::Draw => println!("\nDraw after {} moves", game.plies.len()),
        GameStatus::InProgress => {}
    }

    Ok(())
}

fn print_match_results(stats: &MatchStats) {
    let games = stats.games.to_string();
    let x_wins = format!("{} ({:.1}%)", stats.x_wins, stats.x_win_rate() * 100.0);
    let o_wins = format!("{} ({:.1}%)", stats.o_wins, stats.o_win_rate() * 100.0);
    let draws = format!("{} ({:.1}%)", stats.draws, stats.draw_rate() * 100.0);

    print_section("Match Results");
    print_stats_table(&[
        ("Games", games.as_str()),
        ("X wins", x_wins.as_str()),
        ("O wins", o_wins.as_str()),
        ("Draws", draws.as_str()),
    ]);
}
