//! Error types for the engine.
//!
//! Every error is synchronous and leaves the caller's board untouched, since
//! boards are never mutated in place.

/// A move the board cannot accept.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum IllegalMove {
    /// Index is outside 0-8.
    #[display("Cell {} is outside the board (must be 0-8)", index)]
    OutOfRange {
        /// Rejected index.
        index: usize,
    },

    /// The game already has a winner or the board is full.
    #[display("Game is already over")]
    GameOver,

    /// The target cell already holds a mark.
    #[display("Cell {} is already occupied", index)]
    Occupied {
        /// Rejected index.
        index: usize,
    },
}

impl std::error::Error for IllegalMove {}

/// Move selection was requested on a board with nothing left to play.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
#[display("No legal move available")]
pub struct NoLegalMove;

impl std::error::Error for NoLegalMove {}

/// A board string that could not be parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum ParseBoardError {
    /// Unknown cell symbol.
    #[display("Invalid cell symbol {:?}", _0)]
    InvalidSymbol(char),

    /// Wrong number of cells.
    #[display("Expected 9 cells, found {}", _0)]
    WrongLength(usize),
}

impl std::error::Error for ParseBoardError {}

/// Human input that does not name a cell.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
#[display("Unknown position {:?} (use 1-9 or a name like \"center\")", input)]
pub struct ParsePositionError {
    /// The rejected input.
    pub input: String,
}

impl std::error::Error for ParsePositionError {}

/// Any engine error.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::From)]
pub enum EngineError {
    /// See [`IllegalMove`].
    #[display("{}", _0)]
    IllegalMove(IllegalMove),

    /// See [`NoLegalMove`].
    #[display("{}", _0)]
    NoLegalMove(NoLegalMove),

    /// See [`ParseBoardError`].
    #[display("{}", _0)]
    ParseBoard(ParseBoardError),

    /// See [`ParsePositionError`].
    #[display("{}", _0)]
    ParsePosition(ParsePositionError),
}

impl std::error::Error for EngineError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            EngineError::IllegalMove(e) => Some(e),
            EngineError::NoLegalMove(e) => Some(e),
            EngineError::ParseBoard(e) => Some(e),
            EngineError::ParsePosition(e) => Some(e),
        }
    }
}
