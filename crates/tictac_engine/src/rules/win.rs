//! Win detection logic for tic-tac-toe.

use crate::types::{Board, Cell, Mark};

/// The eight winning lines, in scan order: rows, columns, diagonals.
pub const LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    [0, 4, 8],
    [2, 4, 6],
];

/// Checks if there is a winner on the board.
///
/// Returns the mark owning the first complete line in [`LINES`] order, or
/// `None`. Works for any board, including ones no legal game can reach.
pub fn winner(board: &Board) -> Option<Mark> {
    let cells = board.cells();
    LINES.iter().find_map(|&[a, b, c]| match cells[a] {
        Cell::Occupied(mark) if cells[b] == cells[a] && cells[c] == cells[a] => Some(mark),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_winner_empty_board() {
        assert_eq!(winner(&Board::new()), None);
    }

    #[test]
    fn test_winner_every_line() {
        for line in LINES {
            for mark in [Mark::X, Mark::O] {
                let board = line
                    .iter()
                    .fold(Board::new(), |b, &i| b.with_mark(i, mark));
                assert_eq!(winner(&board), Some(mark), "line {line:?}");
            }
        }
    }

    #[test]
    fn test_no_winner_incomplete() {
        let board: Board = "XX. OO. ...".parse().unwrap();
        assert_eq!(winner(&board), None);
    }

    #[test]
    fn test_first_line_in_scan_order_decides() {
        // Unreachable position with both marks owning a row.
        let board: Board = "OOO XXX ...".parse().unwrap();
        assert_eq!(winner(&board), Some(Mark::O));
        let board: Board = "XXX OOO ...".parse().unwrap();
        assert_eq!(winner(&board), Some(Mark::X));
    }
}
