//! Minimax move selection.
//!
//! Every call is a fresh, full-depth search from the given board. From an
//! empty board the tree has at most 9! leaves, so no pruning or caching is
//! needed and none is done.

use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::error::NoLegalMove;
use crate::rules::{is_full, legal_moves, outcome, winner};
use crate::types::{Board, Mark};

/// Base score of a win; a win found at depth `d` scores `WIN_SCORE - d`.
pub const WIN_SCORE: i32 = 10;

/// Score of a drawn line of play.
pub const DRAW_SCORE: i32 = 0;

/// Candidate cells for the first move of a game: the corners and the center.
///
/// Picking among these at random only adds variety; the search would rate
/// them at least as good as the edges anyway.
pub const OPENING_MOVES: [usize; 5] = [0, 2, 4, 6, 8];

/// A legal move together with its minimax value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoredMove {
    /// Cell index (0-8).
    pub index: usize,
    /// Minimax score from the searching mark's point of view.
    pub score: i32,
}

impl ScoredMove {
    /// Optimal play from here wins for the searching mark.
    pub fn is_win(&self) -> bool {
        self.score > DRAW_SCORE
    }

    /// Optimal play from here loses for the searching mark.
    pub fn is_loss(&self) -> bool {
        self.score < DRAW_SCORE
    }
}

/// Chooses the best move for `me` against `opponent`.
///
/// An empty board takes a random opening from [`OPENING_MOVES`] using `rng`.
/// Otherwise the highest-scoring move from [`score_moves`] is returned, ties
/// going to the lowest cell index.
///
/// # Errors
///
/// Returns [`NoLegalMove`] if the board is already won or full.
#[instrument(skip(board, rng), fields(board = %board))]
pub fn select_move<R: Rng + ?Sized>(
    board: &Board,
    me: Mark,
    opponent: Mark,
    rng: &mut R,
) -> Result<usize, NoLegalMove> {
    if outcome(board).is_terminal() {
        debug!("Selection requested on finished board");
        return Err(NoLegalMove);
    }

    if board.is_empty_board() {
        let index = *OPENING_MOVES.choose(rng).ok_or(NoLegalMove)?;
        debug!(index, "Opening move chosen");
        return Ok(index);
    }

    let mut best: Option<ScoredMove> = None;
    for candidate in score_moves(board, me, opponent)? {
        if best.is_none_or(|b| candidate.score > b.score) {
            best = Some(candidate);
        }
    }

    let best = best.ok_or(NoLegalMove)?;
    debug!(index = best.index, score = best.score, "Move selected");
    Ok(best.index)
}

/// Minimax value of every legal move for `me`, in ascending index order.
///
/// # Errors
///
/// Returns [`NoLegalMove`] if the board is already won or full.
#[instrument(skip(board), fields(board = %board))]
pub fn score_moves(board: &Board, me: Mark, opponent: Mark) -> Result<Vec<ScoredMove>, NoLegalMove> {
    if outcome(board).is_terminal() {
        return Err(NoLegalMove);
    }

    let scored: Vec<ScoredMove> = legal_moves(board)
        .into_iter()
        .map(|index| {
            let child = board.with_mark(index, me);
            ScoredMove {
                index,
                score: minimax(&child, 1, false, me, opponent),
            }
        })
        .collect();

    debug!(candidates = scored.len(), "Moves scored");
    Ok(scored)
}

/// Depth-adjusted minimax value of `board` for `me`.
///
/// Quicker wins score higher and slower losses score less negative.
fn minimax(board: &Board, depth: i32, maximizing: bool, me: Mark, opponent: Mark) -> i32 {
    if let Some(mark) = winner(board) {
        return if mark == me {
            WIN_SCORE - depth
        } else {
            depth - WIN_SCORE
        };
    }
    if is_full(board) {
        return DRAW_SCORE;
    }

    let mover = if maximizing { me } else { opponent };
    let scores = (0..Board::SIZE)
        .filter(|&i| board.is_empty(i))
        .map(|i| minimax(&board.with_mark(i, mover), depth + 1, !maximizing, me, opponent));

    // The board is neither won nor full, so at least one child exists.
    if maximizing {
        scores.max().unwrap_or(DRAW_SCORE)
    } else {
        scores.min().unwrap_or(DRAW_SCORE)
    }
}

/// Move selector that owns its random source.
///
/// Seed it for reproducible openings; draw from the OS for variety.
#[derive(Debug, Clone)]
pub struct MoveSelector {
    rng: StdRng,
}

impl MoveSelector {
    /// Creates a selector with a fixed seed.
    #[instrument]
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Creates a selector seeded from the operating system.
    #[instrument]
    pub fn from_os_rng() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }

    /// Best move for `me` against the other mark.
    ///
    /// # Errors
    ///
    /// Returns [`NoLegalMove`] if the board is already won or full.
    pub fn select(&mut self, board: &Board, me: Mark) -> Result<usize, NoLegalMove> {
        select_move(board, me, me.opponent(), &mut self.rng)
    }

    /// The selector's random source, for callers that share it (e.g. a coin
    /// flip deciding who moves first).
    pub fn rng_mut(&mut self) -> &mut StdRng {
        &mut self.rng
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::apply_move;

    fn scores(board: &str, me: Mark) -> Vec<(usize, i32)> {
        let board: Board = board.parse().unwrap();
        score_moves(&board, me, me.opponent())
            .unwrap()
            .into_iter()
            .map(|s| (s.index, s.score))
            .collect()
    }

    #[test]
    fn test_immediate_win_scores_nine() {
        let scored = scores("XX. .O. ...", Mark::X);
        assert_eq!(scored[0], (2, WIN_SCORE - 1));
    }

    #[test]
    fn test_prefers_faster_win() {
        // 2 forks 0-4-8 and 2-4-6 for a win in three plies; 8 wins now.
        let board: Board = "XO. .X. .O.".parse().unwrap();
        let scored = scores("XO. .X. .O.", Mark::X);
        assert!(scored.contains(&(2, WIN_SCORE - 3)));
        assert!(scored.contains(&(8, WIN_SCORE - 1)));

        let mut selector = MoveSelector::seeded(4);
        assert_eq!(selector.select(&board, Mark::X), Ok(8));
    }

    #[test]
    fn test_prefers_slowest_loss() {
        // O loses whatever it plays. Blocking at 8 lets X fork and win on
        // ply four; every other move lets X win on ply two.
        let board: Board = "XO. .X. ...".parse().unwrap();
        let scored = scores("XO. .X. ...", Mark::O);
        for &(index, score) in &scored {
            let expected = if index == 8 { 4 - WIN_SCORE } else { 2 - WIN_SCORE };
            assert_eq!(score, expected, "cell {index}");
        }

        let mut selector = MoveSelector::seeded(4);
        assert_eq!(selector.select(&board, Mark::O), Ok(8));
    }

    #[test]
    fn test_blocks_opponent_threat() {
        // O threatens 0-4-8; X has no immediate win.
        let board: Board = "O.. XO. X..".parse().unwrap();
        let mut selector = MoveSelector::seeded(1);
        assert_eq!(selector.select(&board, Mark::X), Ok(8));
    }

    #[test]
    fn test_ties_go_to_lowest_index() {
        // Every reply to a center opening draws under perfect play; the
        // corners score equal and the first one wins the tie.
        let board: Board = "... .X. ...".parse().unwrap();
        let scored = scores("... .X. ...", Mark::O);
        let top = scored.iter().map(|(_, s)| *s).max().unwrap();
        let first_top = scored.iter().find(|(_, s)| *s == top).unwrap().0;
        let mut selector = MoveSelector::seeded(3);
        assert_eq!(selector.select(&board, Mark::O), Ok(first_top));
        assert_eq!(first_top, 0);
    }

    #[test]
    fn test_terminal_board_has_no_move() {
        let won: Board = "XXX OO. ...".parse().unwrap();
        let mut selector = MoveSelector::seeded(0);
        assert_eq!(selector.select(&won, Mark::O), Err(NoLegalMove));
        assert_eq!(score_moves(&won, Mark::O, Mark::X), Err(NoLegalMove));

        let full: Board = "XOX XOO OXX".parse().unwrap();
        assert_eq!(selector.select(&full, Mark::X), Err(NoLegalMove));
    }

    #[test]
    fn test_seeded_openings_are_reproducible() {
        let mut a = MoveSelector::seeded(42);
        let mut b = MoveSelector::seeded(42);
        for _ in 0..20 {
            let first = a.select(&Board::new(), Mark::X).unwrap();
            assert_eq!(Ok(first), b.select(&Board::new(), Mark::X));
            assert!(OPENING_MOVES.contains(&first));
        }
    }

    #[test]
    fn test_self_play_draws() {
        let mut selector = MoveSelector::seeded(9);
        let mut board = Board::new();
        let mut mark = Mark::X;
        while !outcome(&board).is_terminal() {
            let index = selector.select(&board, mark).unwrap();
            board = apply_move(&board, index, mark).unwrap();
            mark = mark.opponent();
        }
        assert_eq!(outcome(&board), crate::Outcome::Draw);
    }
}
