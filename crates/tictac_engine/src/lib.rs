//! Tic-tac-toe decision engine.
//!
//! The engine is two layers, the second built strictly on the first:
//!
//! - **Board state**: an immutable 3x3 [`Board`] value with pure queries
//!   ([`winner`], [`is_full`], [`legal_moves`], [`outcome`]) and a pure
//!   transition ([`apply_move`]) that returns a new board.
//! - **Move selection**: [`select_move`] runs a full-depth minimax search and
//!   returns the move with the best worst-case outcome for the searching mark.
//!
//! Nothing here performs I/O or holds shared mutable state. Randomness is only
//! used for the opening move and is always injected by the caller.
//!
//! # Example
//!
//! ```
//! use tictac_engine::{Board, Mark, Outcome, apply_move, outcome, select_move};
//! use rand::SeedableRng;
//!
//! let mut rng = rand::rngs::StdRng::seed_from_u64(7);
//! let board: Board = "XX. .O. ...".parse()?;
//! let best = select_move(&board, Mark::X, Mark::O, &mut rng)?;
//! assert_eq!(best, 2);
//!
//! let next = apply_move(&board, best, Mark::X)?;
//! assert_eq!(outcome(&next), Outcome::Won(Mark::X));
//! # Ok::<(), tictac_engine::EngineError>(())
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod error;
mod position;
mod rules;
mod selector;
mod types;

pub use error::{EngineError, IllegalMove, NoLegalMove, ParseBoardError, ParsePositionError};
pub use position::Position;
pub use rules::{LINES, apply_move, is_full, legal_moves, outcome, winner};
pub use selector::{
    DRAW_SCORE, MoveSelector, OPENING_MOVES, ScoredMove, WIN_SCORE, score_moves, select_move,
};
pub use types::{Board, Cell, Mark, Outcome};
