//! Game rules for tic-tac-toe.
//!
//! Pure functions over [`Board`](crate::Board) values. Queries never mutate
//! their input, and [`apply_move`] returns a new board instead of editing one.

mod draw;
mod moves;
mod win;

pub use draw::is_full;
pub use moves::{apply_move, legal_moves, outcome};
pub use win::{LINES, winner};
