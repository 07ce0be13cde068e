//! Fullness check for tic-tac-toe.

use crate::types::{Board, Cell};

/// Checks if the board is full (all cells occupied).
///
/// A full board with no winner is a draw.
pub fn is_full(board: &Board) -> bool {
    board.cells().iter().all(|c| *c != Cell::Empty)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::winner;

    #[test]
    fn test_empty_board_not_full() {
        assert!(!is_full(&Board::new()));
    }

    #[test]
    fn test_partial_board_not_full() {
        let board: Board = "XO. ... ...".parse().unwrap();
        assert!(!is_full(&board));
    }

    #[test]
    fn test_full_board_without_winner() {
        let board: Board = "XOX OXX OXO".parse().unwrap();
        assert!(is_full(&board));
        assert_eq!(winner(&board), None);
    }
}
