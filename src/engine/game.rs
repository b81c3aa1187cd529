//! High-level game management

use serde::{Deserialize, Serialize};

use super::board::{Board, Move, Player};
use crate::error::{Error, Result};

/// Status of a position or a game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameStatus {
    InProgress,
    Won(Player),
    Draw,
}

impl GameStatus {
    /// Check whether the game has ended
    pub fn is_over(self) -> bool {
        self != GameStatus::InProgress
    }

    /// The winning player, if the game ended in a win
    pub fn winner(self) -> Option<Player> {
        match self {
            GameStatus::Won(player) => Some(player),
            _ => None,
        }
    }
}

/// A move together with the player who made it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Ply {
    pub mv: Move,
    pub player: Player,
}

/// A complete game with history
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Game {
    pub initial: Board,
    pub plies: Vec<Ply>,
    pub status: GameStatus,
}

impl Game {
    /// Create a new game from the empty position
    pub fn new() -> Self {
        Game {
            initial: Board::new(),
            plies: Vec::new(),
            status: GameStatus::InProgress,
        }
    }

    /// Play a move for the side to move
    pub fn play(&mut self, mv: Move) -> Result<()> {
        if self.status.is_over() {
            return Err(Error::GameOver);
        }

        let current = self.current_state()?;
        let player = current.current_player().ok_or(Error::GameOver)?;
        let next = current.apply_move(mv)?;

        self.plies.push(Ply { mv, player });
        self.status = next.status();

        Ok(())
    }

    /// Replay moves up to a given index (exclusive)
    ///
    /// Returns the board state after applying plies[0..end_index].
    /// If end_index >= plies.len(), all moves are applied.
    ///
    /// # Errors
    ///
    /// Returns error if any move in the history is invalid for the current
    /// state. This indicates corrupted game data.
    fn replay_until(&self, end_index: usize) -> Result<Board> {
        let mut board = self.initial;
        for ply in self.plies.iter().take(end_index) {
            board = board.apply_move(ply.mv)?;
        }
        Ok(board)
    }

    /// Get the current board state
    ///
    /// # Errors
    ///
    /// Returns error if any move in the history is invalid for the current
    /// state. This indicates corrupted game data.
    pub fn current_state(&self) -> Result<Board> {
        self.replay_until(self.plies.len())
    }

    /// Get the sequence of board states, from the initial position onward
    ///
    /// # Errors
    ///
    /// Returns error if any move in the history is invalid for the current
    /// state. This indicates corrupted game data.
    pub fn state_sequence(&self) -> Result<Vec<Board>> {
        let mut states = Vec::with_capacity(self.plies.len() + 1);
        states.push(self.initial);

        for i in 1..=self.plies.len() {
            states.push(self.replay_until(i)?);
        }

        Ok(states)
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_play_records_history() {
        let mut game = Game::new();
        game.play(Move::new(1, 1)).unwrap();
        game.play(Move::new(0, 0)).unwrap();

        assert_eq!(game.plies.len(), 2);
        assert_eq!(game.plies[0].player, Player::X);
        assert_eq!(game.plies[1].player, Player::O);
        assert_eq!(game.status, GameStatus::InProgress);

        let board = game.current_state().unwrap();
        assert_eq!(board.occupied_count(), 2);
    }

    #[test]
    fn test_play_through_win() {
        let mut game = Game::new();
        for mv in [
            Move::new(0, 0), // X
            Move::new(1, 0), // O
            Move::new(0, 1), // X
            Move::new(1, 1), // O
            Move::new(0, 2), // X wins top row
        ] {
            game.play(mv).unwrap();
        }

        assert_eq!(game.status, GameStatus::Won(Player::X));
        assert_eq!(game.status.winner(), Some(Player::X));

        // No further moves once the game is over
        let err = game.play(Move::new(2, 2)).unwrap_err();
        assert!(matches!(err, Error::GameOver));
    }

    #[test]
    fn test_play_rejects_occupied_cell() {
        let mut game = Game::new();
        game.play(Move::new(0, 0)).unwrap();

        let err = game.play(Move::new(0, 0)).unwrap_err();
        assert!(matches!(err, Error::IllegalMove { row: 0, col: 0 }));
        assert_eq!(game.plies.len(), 1);
    }

    #[test]
    fn test_state_sequence() {
        let mut game = Game::new();
        game.play(Move::new(0, 0)).unwrap();
        game.play(Move::new(1, 1)).unwrap();

        let states = game.state_sequence().unwrap();
        assert_eq!(states.len(), 3);
        assert_eq!(states[0].occupied_count(), 0);
        assert_eq!(states[1].occupied_count(), 1);
        assert_eq!(states[2].occupied_count(), 2);
    }

    #[test]
    fn test_status_is_over() {
        assert!(!GameStatus::InProgress.is_over());
        assert!(GameStatus::Draw.is_over());
        assert!(GameStatus::Won(Player::O).is_over());
        assert_eq!(GameStatus::Draw.winner(), None);
    }
}
