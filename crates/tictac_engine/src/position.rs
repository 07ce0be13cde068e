//! Named board positions for human input and display.

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tracing::instrument;

use crate::error::ParsePositionError;
use crate::types::Board;

/// A position on the tic-tac-toe board.
///
/// The engine itself speaks in cell indices (0-8); positions exist so a
/// console player can type `5` or `center` instead.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::EnumIter,
)]
pub enum Position {
    /// Top-left (index 0)
    TopLeft,
    /// Top-center (index 1)
    TopCenter,
    /// Top-right (index 2)
    TopRight,
    /// Middle-left (index 3)
    MiddleLeft,
    /// Center (index 4)
    Center,
    /// Middle-right (index 5)
    MiddleRight,
    /// Bottom-left (index 6)
    BottomLeft,
    /// Bottom-center (index 7)
    BottomCenter,
    /// Bottom-right (index 8)
    BottomRight,
}

impl Position {
    /// All 9 positions in index order.
    pub const ALL: [Position; 9] = [
        Position::TopLeft,
        Position::TopCenter,
        Position::TopRight,
        Position::MiddleLeft,
        Position::Center,
        Position::MiddleRight,
        Position::BottomLeft,
        Position::BottomCenter,
        Position::BottomRight,
    ];

    /// Display label.
    pub fn label(&self) -> &'static str {
        match self {
            Position::TopLeft => "Top-left",
            Position::TopCenter => "Top-center",
            Position::TopRight => "Top-right",
            Position::MiddleLeft => "Middle-left",
            Position::Center => "Center",
            Position::MiddleRight => "Middle-right",
            Position::BottomLeft => "Bottom-left",
            Position::BottomCenter => "Bottom-center",
            Position::BottomRight => "Bottom-right",
        }
    }

    /// Board index (0-8).
    pub fn to_index(self) -> usize {
        self as usize
    }

    /// Position for a board index, `None` when out of range.
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Positions whose cells are still empty, in index order.
    #[instrument(skip(board))]
    pub fn open(board: &Board) -> Vec<Position> {
        Self::ALL
            .iter()
            .copied()
            .filter(|pos| board.is_empty(pos.to_index()))
            .collect()
    }
}

impl FromStr for Position {
    type Err = ParsePositionError;

    /// Accepts the cell number shown on the board (1-9) or a label.
    ///
    /// Labels match case-insensitively and ignore spaces, dashes and
    /// underscores, so `top left`, `Top-left` and `top_left` all work.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let err = || ParsePositionError {
            input: trimmed.to_string(),
        };

        if let Ok(number) = trimmed.parse::<usize>() {
            return number
                .checked_sub(1)
                .and_then(Self::from_index)
                .ok_or_else(err);
        }

        let normalize = |text: &str| -> String {
            text.chars()
                .filter(|c| c.is_ascii_alphanumeric())
                .map(|c| c.to_ascii_lowercase())
                .collect()
        };
        let wanted = normalize(trimmed);
        if wanted.is_empty() {
            return Err(err());
        }

        <Position as strum::IntoEnumIterator>::iter()
            .find(|pos| normalize(pos.label()) == wanted)
            .ok_or_else(err)
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_mapping() {
        assert_eq!(Position::TopLeft.to_index(), 0);
        assert_eq!(Position::Center.to_index(), 4);
        assert_eq!(Position::BottomRight.to_index(), 8);
        assert_eq!(Position::from_index(4), Some(Position::Center));
        assert_eq!(Position::from_index(9), None);
    }

    #[test]
    fn test_parse_numbers_are_one_based() {
        assert_eq!("1".parse::<Position>(), Ok(Position::TopLeft));
        assert_eq!(" 9 ".parse::<Position>(), Ok(Position::BottomRight));
        assert!("0".parse::<Position>().is_err());
        assert!("10".parse::<Position>().is_err());
    }

    #[test]
    fn test_parse_labels() {
        assert_eq!("center".parse::<Position>(), Ok(Position::Center));
        assert_eq!("top left".parse::<Position>(), Ok(Position::TopLeft));
        assert_eq!("Bottom_Right".parse::<Position>(), Ok(Position::BottomRight));
        assert!("middle".parse::<Position>().is_err());
        assert!("".parse::<Position>().is_err());
    }
}
