//! Move enumeration, game status and the board transition.

use tracing::{debug, instrument};

use super::{is_full, winner};
use crate::error::IllegalMove;
use crate::types::{Board, Mark, Outcome};

/// Every empty cell index in ascending order.
///
/// Empty when the board is full. Turn order and game-over are not considered
/// here; [`apply_move`] rejects moves on finished boards.
pub fn legal_moves(board: &Board) -> Vec<usize> {
    (0..Board::SIZE).filter(|&i| board.is_empty(i)).collect()
}

/// Status of the board. A completed line wins even if cells remain empty.
pub fn outcome(board: &Board) -> Outcome {
    if let Some(mark) = winner(board) {
        Outcome::Won(mark)
    } else if is_full(board) {
        Outcome::Draw
    } else {
        Outcome::InProgress
    }
}

/// Places `mark` at `index`, returning the successor board.
///
/// Whose turn it is belongs to the caller; this only checks that the board
/// can accept a mark in that cell.
///
/// # Errors
///
/// Returns [`IllegalMove`] if the index is out of range, the game is over, or
/// the cell is occupied.
#[instrument(skip(board), fields(board = %board))]
pub fn apply_move(board: &Board, index: usize, mark: Mark) -> Result<Board, IllegalMove> {
    if index >= Board::SIZE {
        debug!("Rejected out-of-range move");
        return Err(IllegalMove::OutOfRange { index });
    }
    if outcome(board).is_terminal() {
        debug!("Rejected move on finished board");
        return Err(IllegalMove::GameOver);
    }
    if !board.is_empty(index) {
        debug!("Rejected move on occupied cell");
        return Err(IllegalMove::Occupied { index });
    }
    Ok(board.with_mark(index, mark))
}
