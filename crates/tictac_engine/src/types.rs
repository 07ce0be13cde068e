//! Core domain types for tic-tac-toe.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ParseBoardError;

/// A player's mark.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mark {
    /// Mark X (moves first by convention).
    X,
    /// Mark O.
    O,
}

impl Mark {
    /// Returns the other mark.
    pub fn opponent(self) -> Self {
        match self {
            Mark::X => Mark::O,
            Mark::O => Mark::X,
        }
    }

    /// Single-character symbol for this mark.
    pub fn symbol(self) -> char {
        match self {
            Mark::X => 'X',
            Mark::O => 'O',
        }
    }
}

impl fmt::Display for Mark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// A single cell on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Cell {
    /// Nobody has played here.
    #[default]
    Empty,
    /// Cell holds a mark.
    Occupied(Mark),
}

impl Cell {
    /// Returns the mark in this cell, if any.
    pub fn mark(self) -> Option<Mark> {
        match self {
            Cell::Empty => None,
            Cell::Occupied(mark) => Some(mark),
        }
    }
}

/// 3x3 tic-tac-toe board.
///
/// Boards are plain values: every transition produces a new board, so search
/// branches can share an ancestor freely.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Board {
    /// Cells in row-major order (0-8).
    cells: [Cell; 9],
}

impl Board {
    /// Number of cells on the board.
    pub const SIZE: usize = 9;

    /// Creates a new empty board.
    pub fn new() -> Self {
        Self {
            cells: [Cell::Empty; 9],
        }
    }

    /// Builds a board from raw cells without checking turn alternation.
    ///
    /// Useful for analysis and tests that need positions no legal game reaches.
    pub fn from_cells(cells: [Cell; 9]) -> Self {
        Self { cells }
    }

    /// Gets the cell at the given index (0-8).
    pub fn get(&self, index: usize) -> Option<Cell> {
        self.cells.get(index).copied()
    }

    /// Checks if the cell at `index` exists and is empty.
    pub fn is_empty(&self, index: usize) -> bool {
        matches!(self.get(index), Some(Cell::Empty))
    }

    /// Returns all cells.
    pub fn cells(&self) -> &[Cell; 9] {
        &self.cells
    }

    /// True when no mark has been played yet.
    pub fn is_empty_board(&self) -> bool {
        self.cells.iter().all(|c| *c == Cell::Empty)
    }

    /// Counts the cells holding `mark`.
    pub fn count(&self, mark: Mark) -> usize {
        self.cells
            .iter()
            .filter(|c| **c == Cell::Occupied(mark))
            .count()
    }

    /// Number of occupied cells.
    pub fn moves_played(&self) -> usize {
        self.cells.iter().filter(|c| **c != Cell::Empty).count()
    }

    /// Whose turn it is under strict alternation, given who moved first.
    pub fn next_mark(&self, first: Mark) -> Mark {
        if self.count(first) > self.count(first.opponent()) {
            first.opponent()
        } else {
            first
        }
    }

    /// True when the first mover leads by zero or one mark.
    pub fn is_balanced(&self, first: Mark) -> bool {
        let lead = self.count(first) as isize - self.count(first.opponent()) as isize;
        lead == 0 || lead == 1
    }

    /// Returns a copy with `index` set to `mark`. Caller guarantees the index is valid.
    pub(crate) fn with_mark(mut self, index: usize, mark: Mark) -> Self {
        self.cells[index] = Cell::Occupied(mark);
        self
    }
}

impl fmt::Display for Board {
    /// Renders the grid with cell numbers 1-9 in empty squares.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..3 {
            for col in 0..3 {
                let index = row * 3 + col;
                match self.cells[index] {
                    Cell::Empty => write!(f, "{}", index + 1)?,
                    Cell::Occupied(mark) => write!(f, "{mark}")?,
                }
                if col < 2 {
                    f.write_str("|")?;
                }
            }
            if row < 2 {
                f.write_str("\n-+-+-\n")?;
            }
        }
        Ok(())
    }
}

impl FromStr for Board {
    type Err = ParseBoardError;

    /// Parses nine cell symbols: `X`, `O`, and `.`, `_` or `-` for empty.
    ///
    /// Whitespace, `/` and `|` are ignored so rows can be separated.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut cells = [Cell::Empty; 9];
        let mut count = 0;
        for ch in s.chars() {
            let cell = match ch {
                'X' | 'x' => Cell::Occupied(Mark::X),
                'O' | 'o' => Cell::Occupied(Mark::O),
                '.' | '_' | '-' => Cell::Empty,
                c if c.is_whitespace() || c == '/' || c == '|' => continue,
                other => return Err(ParseBoardError::InvalidSymbol(other)),
            };
            if let Some(slot) = cells.get_mut(count) {
                *slot = cell;
            }
            count += 1;
        }
        if count != Board::SIZE {
            return Err(ParseBoardError::WrongLength(count));
        }
        Ok(Self { cells })
    }
}

/// Derived status of a board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    /// Moves remain and nobody has three in a row.
    InProgress,
    /// A mark owns a full line.
    Won(Mark),
    /// Board is full with no winner.
    Draw,
}

impl Outcome {
    /// True for a win or a draw.
    pub fn is_terminal(self) -> bool {
        !matches!(self, Outcome::InProgress)
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::InProgress => f.write_str("in progress"),
            Outcome::Won(mark) => write!(f, "{mark} wins"),
            Outcome::Draw => f.write_str("draw"),
        }
    }
}
