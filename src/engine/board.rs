//! Board representation and move application

use std::fmt;

use serde::{Deserialize, Serialize};

use super::{game::GameStatus, lines::LineScan};
use crate::error::{Error, Result};

/// A cell on the Tic-Tac-Toe board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cell {
    Empty,
    X,
    O,
}

impl Cell {
    pub fn to_char(self) -> char {
        match self {
            Cell::Empty => '.',
            Cell::X => 'X',
            Cell::O => 'O',
        }
    }

    pub fn from_char(c: char) -> Option<Cell> {
        match c {
            '.' | '_' => Some(Cell::Empty),
            'X' | 'x' => Some(Cell::X),
            'O' | 'o' | '0' => Some(Cell::O),
            _ => None,
        }
    }

    /// The player whose piece occupies this cell, if any
    pub fn to_player(self) -> Option<Player> {
        match self {
            Cell::X => Some(Player::X),
            Cell::O => Some(Player::O),
            Cell::Empty => None,
        }
    }
}

/// A player in the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    X,
    O,
}

impl Player {
    /// Get the opponent player
    pub fn opponent(self) -> Player {
        match self {
            Player::X => Player::O,
            Player::O => Player::X,
        }
    }

    /// Convert player to cell
    pub fn to_cell(self) -> Cell {
        match self {
            Player::X => Cell::X,
            Player::O => Cell::O,
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_cell().to_char())
    }
}

/// A move: the row and column of the cell to claim
///
/// Rows and columns run 0 to 2, top to bottom and left to right.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    pub row: usize,
    pub col: usize,
}

impl Move {
    pub fn new(row: usize, col: usize) -> Self {
        Move { row, col }
    }

    /// Check whether both coordinates are on the board
    pub fn in_bounds(self) -> bool {
        self.row < 3 && self.col < 3
    }

    /// Row-major cell index (0-8)
    pub(crate) fn index(self) -> usize {
        self.row * 3 + self.col
    }

    pub(crate) fn from_index(index: usize) -> Self {
        Move {
            row: index / 3,
            col: index % 3,
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// A 3x3 board position
///
/// Cells are stored row-major, so the cell at (row, col) lives at index
/// `row * 3 + col`. The side to move is never stored: X always opens, so
/// it follows from the parity of the occupied cells. This keeps the type
/// a 9-byte `Copy` value and makes positions with the same pieces compare
/// equal no matter how they were reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Board {
    pub cells: [Cell; 9],
}

/// Count of each piece type on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct PieceCount {
    x: usize,
    o: usize,
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Board {
            cells: [Cell::Empty; 9],
        }
    }

    /// Build a board from three rows of cells
    pub fn from_rows(rows: [[Cell; 3]; 3]) -> Self {
        let mut cells = [Cell::Empty; 9];
        for (row, row_cells) in rows.iter().enumerate() {
            for (col, &cell) in row_cells.iter().enumerate() {
                cells[row * 3 + col] = cell;
            }
        }
        Board { cells }
    }

    /// Helper: Parse 9 cells from a slice of characters.
    ///
    /// # Errors
    ///
    /// Returns error if fewer than 9 characters or any character is invalid.
    fn parse_cells(chars: &[char], context: &str) -> Result<[Cell; 9]> {
        if chars.len() < 9 {
            return Err(Error::InvalidBoardLength {
                expected: 9,
                got: chars.len(),
                context: context.to_string(),
            });
        }

        let mut cells = [Cell::Empty; 9];
        for (i, &c) in chars.iter().take(9).enumerate() {
            cells[i] = Cell::from_char(c).ok_or_else(|| Error::InvalidCellCharacter {
                character: c,
                position: i,
                context: context.to_string(),
            })?;
        }

        Ok(cells)
    }

    /// Helper: Count pieces on the board.
    fn count_pieces(cells: &[Cell; 9]) -> PieceCount {
        let mut count = PieceCount { x: 0, o: 0 };
        for cell in cells {
            match cell {
                Cell::X => count.x += 1,
                Cell::O => count.o += 1,
                Cell::Empty => {}
            }
        }
        count
    }

    /// Create a board from a string representation.
    ///
    /// The string should contain 9 cell characters in row-major order
    /// (whitespace is filtered out, so multi-line layouts parse too).
    /// Piece counts must be consistent with X having opened the game.
    ///
    /// # Examples
    ///
    /// ```
    /// use oxo::engine::{Board, Player};
    ///
    /// let board = Board::from_string("XX.OO....")?;
    /// assert_eq!(board.current_player(), Some(Player::X));
    /// # Ok::<(), oxo::Error>(())
    /// ```
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - The string has fewer than 9 non-whitespace characters
    /// - Any character is not a valid cell representation
    /// - The piece counts cannot arise with X moving first
    pub fn from_string(s: &str) -> Result<Self> {
        let cleaned: Vec<char> = s.chars().filter(|c| !c.is_whitespace()).collect();
        let cells = Self::parse_cells(&cleaned, s)?;
        let count = Self::count_pieces(&cells);

        if count.x != count.o && count.x != count.o + 1 {
            return Err(Error::InvalidPieceCounts {
                x_count: count.x,
                o_count: count.o,
            });
        }

        Ok(Board { cells })
    }

    /// Count the number of occupied cells on the board.
    pub fn occupied_count(&self) -> usize {
        let count = Self::count_pieces(&self.cells);
        count.x + count.o
    }

    /// Get the cell at the given coordinates, or `None` when out of bounds
    pub fn get(&self, mv: Move) -> Option<Cell> {
        if mv.in_bounds() {
            Some(self.cells[mv.index()])
        } else {
            None
        }
    }

    /// Get all empty cells, in row-major order
    pub fn empty_cells(&self) -> Vec<Move> {
        self.cells
            .iter()
            .enumerate()
            .filter(|&(_, &cell)| cell == Cell::Empty)
            .map(|(i, _)| Move::from_index(i))
            .collect()
    }

    /// The player whose turn it is, or `None` once the game is over
    ///
    /// X always opens, so with an even number of occupied cells it is X's
    /// turn and otherwise O's.
    pub fn current_player(&self) -> Option<Player> {
        if self.is_terminal() {
            return None;
        }

        if self.occupied_count().is_multiple_of(2) {
            Some(Player::X)
        } else {
            Some(Player::O)
        }
    }

    /// Get legal moves in this position (empty cells when game not terminal)
    ///
    /// The result is empty exactly when the position is terminal.
    pub fn legal_moves(&self) -> Vec<Move> {
        if self.is_terminal() {
            return Vec::new();
        }
        self.empty_cells()
    }

    /// Apply a move for the side to move and return the resulting board
    ///
    /// The original board is unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfBounds`] when a coordinate exceeds 2,
    /// [`Error::GameOver`] when the position is already terminal, and
    /// [`Error::IllegalMove`] when the target cell is occupied.
    #[must_use = "apply_move returns a new board; the original is unchanged"]
    pub fn apply_move(&self, mv: Move) -> Result<Board> {
        if !mv.in_bounds() {
            return Err(Error::OutOfBounds {
                row: mv.row,
                col: mv.col,
            });
        }

        let player = self.current_player().ok_or(Error::GameOver)?;

        if self.cells[mv.index()] != Cell::Empty {
            return Err(Error::IllegalMove {
                row: mv.row,
                col: mv.col,
            });
        }

        let mut next = *self;
        next.cells[mv.index()] = player.to_cell();
        Ok(next)
    }

    /// Check if a player has won
    pub fn has_won(&self, player: Player) -> bool {
        LineScan::has_won(&self.cells, player)
    }

    /// Get the winner if there is one
    pub fn winner(&self) -> Option<Player> {
        LineScan::winner(&self.cells)
    }

    /// Check if the game is over (win or draw)
    pub fn is_terminal(&self) -> bool {
        self.winner().is_some() || self.occupied_count() == 9
    }

    /// Check if the position is a draw (all cells filled, no winner)
    pub fn is_draw(&self) -> bool {
        !self.cells.contains(&Cell::Empty) && self.winner().is_none()
    }

    /// Terminal value from X's perspective: +1 X win, -1 O win, 0 otherwise
    ///
    /// Only meaningful on terminal boards. A position still being played
    /// also reports 0, the same as a draw.
    pub fn utility(&self) -> i32 {
        match self.winner() {
            Some(Player::X) => 1,
            Some(Player::O) => -1,
            None => 0,
        }
    }

    /// Game status of this position
    pub fn status(&self) -> GameStatus {
        if let Some(winner) = self.winner() {
            GameStatus::Won(winner)
        } else if self.occupied_count() == 9 {
            GameStatus::Draw
        } else {
            GameStatus::InProgress
        }
    }

    /// Moves that would complete a line for the player, in row-major order
    pub fn winning_moves(&self, player: Player) -> Vec<Move> {
        LineScan::winning_moves(&self.cells, player)
            .into_iter()
            .map(Move::from_index)
            .collect()
    }

    /// Get the row-major string representation for use as a key
    pub fn encode(&self) -> String {
        self.cells.iter().map(|&c| c.to_char()).collect()
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, &cell) in self.cells.iter().enumerate() {
            write!(f, "{}", cell.to_char())?;
            if (i + 1).is_multiple_of(3) && i < 8 {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}
