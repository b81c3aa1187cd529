//! Move-selection agents and match play
//!
//! Agents implement a common port so matches can pair any strategies:
//! - Perfect play (minimax)
//! - Uniform random baseline
//! - Defensive baseline (blocks, otherwise random)

use rand::{Rng, SeedableRng, random, rngs::StdRng};
use serde::{Deserialize, Serialize};

use crate::{
    engine::{Board, Game, GameStatus, Move, Player},
    error::{Error, Result},
    solver::Solver,
};

/// Agent trait - unified interface for move-selection strategies
///
/// Matches and tournaments work against this port, so a perfect player and
/// a random baseline are interchangeable.
pub trait Agent {
    /// Select a move for the given board.
    ///
    /// # Errors
    ///
    /// Returns an error if no legal moves are available (terminal position).
    fn select_move(&mut self, board: &Board) -> Result<Move>;

    /// Get the agent's name.
    ///
    /// Used for identification in match reports.
    fn name(&self) -> &str;

    /// Seed the agent's internal random number generator.
    ///
    /// Match runners call this when supplied with a deterministic seed to
    /// ensure reproducible results. Deterministic agents can ignore it.
    fn set_rng_seed(&mut self, _seed: u64) {}
}

/// Perfect-play agent (minimax)
pub struct OptimalAgent {
    name: String,
    solver: Solver,
}

impl OptimalAgent {
    /// Create a new optimal agent
    pub fn new(name: String) -> Self {
        Self {
            name,
            solver: Solver::new(),
        }
    }
}

impl Agent for OptimalAgent {
    fn select_move(&mut self, board: &Board) -> Result<Move> {
        self.solver.best_move(board).ok_or(Error::NoLegalMoves)
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Uniform random agent (baseline)
pub struct RandomAgent {
    name: String,
    rng: StdRng,
}

impl RandomAgent {
    /// Create a new random agent
    pub fn new(name: String) -> Self {
        Self {
            name,
            rng: StdRng::seed_from_u64(random()),
        }
    }

    /// Create a new random agent with a deterministic seed
    pub fn with_seed(name: String, seed: u64) -> Self {
        Self {
            name,
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Agent for RandomAgent {
    fn select_move(&mut self, board: &Board) -> Result<Move> {
        let moves = board.legal_moves();
        if moves.is_empty() {
            return Err(Error::NoLegalMoves);
        }
        let index = self.rng.random_range(0..moves.len());
        Ok(moves[index])
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn set_rng_seed(&mut self, seed: u64) {
        self.rng = StdRng::seed_from_u64(seed);
    }
}

/// Defensive agent (blocks winning moves)
///
/// This agent will:
/// 1. Check if the opponent can win on their next move
/// 2. Block that winning move if found
/// 3. Otherwise, play randomly
///
/// Note: This does NOT try to win itself, only to block opponent wins.
pub struct DefensiveAgent {
    name: String,
    rng: StdRng,
}

impl DefensiveAgent {
    /// Create a new defensive agent
    pub fn new(name: String) -> Self {
        Self {
            name,
            rng: StdRng::seed_from_u64(random()),
        }
    }

    /// Create a defensive agent with a deterministic seed
    pub fn with_seed(name: String, seed: u64) -> Self {
        Self {
            name,
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Agent for DefensiveAgent {
    fn select_move(&mut self, board: &Board) -> Result<Move> {
        let player = board.current_player().ok_or(Error::NoLegalMoves)?;

        // Block the opponent's first winning move, if any
        if let Some(&block) = board.winning_moves(player.opponent()).first() {
            return Ok(block);
        }

        // Otherwise, play randomly
        let moves = board.legal_moves();
        if moves.is_empty() {
            return Err(Error::NoLegalMoves);
        }
        let index = self.rng.random_range(0..moves.len());
        Ok(moves[index])
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn set_rng_seed(&mut self, seed: u64) {
        self.rng = StdRng::seed_from_u64(seed);
    }
}

/// Aggregate outcome of a series of games
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MatchStats {
    pub games: usize,
    pub x_wins: usize,
    pub o_wins: usize,
    pub draws: usize,
}

impl MatchStats {
    /// Record the outcome of one finished game
    pub fn record(&mut self, status: GameStatus) {
        self.games += 1;
        match status {
            GameStatus::Won(Player::X) => self.x_wins += 1,
            GameStatus::Won(Player::O) => self.o_wins += 1,
            GameStatus::Draw => self.draws += 1,
            GameStatus::InProgress => {}
        }
    }

    pub fn x_win_rate(&self) -> f64 {
        self.rate(self.x_wins)
    }

    pub fn o_win_rate(&self) -> f64 {
        self.rate(self.o_wins)
    }

    pub fn draw_rate(&self) -> f64 {
        self.rate(self.draws)
    }

    fn rate(&self, count: usize) -> f64 {
        if self.games > 0 {
            count as f64 / self.games as f64
        } else {
            0.0
        }
    }
}

/// Match configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchConfig {
    /// Number of games to play
    pub num_games: usize,

    /// Random seed
    pub seed: Option<u64>,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            num_games: 100,
            seed: None,
        }
    }
}

/// Play one game between two agents; `x` opens
///
/// Returns the finished game with its full move history.
pub fn play_game(x: &mut dyn Agent, o: &mut dyn Agent) -> Result<Game> {
    let mut game = Game::new();

    loop {
        let board = game.current_state()?;
        let Some(player) = board.current_player() else {
            break;
        };

        let mv = match player {
            Player::X => x.select_move(&board)?,
            Player::O => o.select_move(&board)?,
        };
        game.play(mv)?;
    }

    Ok(game)
}

/// Play a series of games between two agents
///
/// Seeds the pair when the config carries a seed, so repeated runs with the
/// same seed produce identical results. `on_game_end` fires after each game
/// with the game number and its outcome.
pub fn run_match(
    config: &MatchConfig,
    x: &mut dyn Agent,
    o: &mut dyn Agent,
    mut on_game_end: impl FnMut(usize, GameStatus),
) -> Result<MatchStats> {
    if let Some(seed) = config.seed {
        x.set_rng_seed(seed);
        o.set_rng_seed(seed.wrapping_add(1));
    }

    let mut stats = MatchStats::default();
    for game_num in 0..config.num_games {
        let game = play_game(x, o)?;
        stats.record(game.status);
        on_game_end(game_num, game.status);
    }

    Ok(stats)
}
