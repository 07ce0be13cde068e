//! A single human-versus-engine game, driven step by step by the caller.
//!
//! The session owns whose turn it is. It never sleeps, spawns, or renders;
//! the presentation layer calls [`GameSession::play_human`] and
//! [`GameSession::play_computer`] in turn and reports the result once the
//! board is terminal.

use rand::Rng;
use tictac_engine::{
    Board, EngineError, IllegalMove, Mark, MoveSelector, NoLegalMove, Outcome, apply_move,
    outcome,
};
use tracing::{debug, info, instrument, warn};

use crate::GameResult;
use crate::config::FirstPlayer;

/// X always moves first.
const FIRST_MARK: Mark = Mark::X;

/// Error from a session step.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum SessionError {
    /// The other side is to move.
    #[display("It's {}'s turn", _0)]
    WrongTurn(Mark),

    /// The engine rejected the step.
    #[display("{}", _0)]
    Engine(EngineError),
}

impl std::error::Error for SessionError {}

impl From<EngineError> for SessionError {
    fn from(err: EngineError) -> Self {
        Self::Engine(err)
    }
}

impl From<IllegalMove> for SessionError {
    fn from(err: IllegalMove) -> Self {
        Self::Engine(err.into())
    }
}

impl From<NoLegalMove> for SessionError {
    fn from(err: NoLegalMove) -> Self {
        Self::Engine(err.into())
    }
}

/// What the persistence side learns about a finished game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutcomeRecord {
    /// Result from the human's perspective.
    pub result: GameResult,
    /// Marks placed by both sides.
    pub moves_count: i32,
}

/// Receives exactly one [`OutcomeRecord`] per completed game.
pub trait OutcomeSink {
    /// Error raised when the record cannot be stored.
    type Error;

    /// Stores the record for the sink's subject.
    fn record(&mut self, record: OutcomeRecord) -> Result<(), Self::Error>;
}

/// Game between a human and the minimax engine.
#[derive(Debug, Clone)]
pub struct GameSession {
    board: Board,
    human: Mark,
    selector: MoveSelector,
    history: Vec<usize>,
    reported: bool,
}

impl GameSession {
    /// Starts a new game. Whoever moves first plays X.
    #[instrument(skip(selector))]
    pub fn new(first: FirstPlayer, mut selector: MoveSelector) -> Self {
        let human_first = match first {
            FirstPlayer::Human => true,
            FirstPlayer::Computer => false,
            FirstPlayer::Random => selector.rng_mut().random_bool(0.5),
        };
        let human = if human_first {
            FIRST_MARK
        } else {
            FIRST_MARK.opponent()
        };
        info!(human = %human, "New game");

        Self {
            board: Board::new(),
            human,
            selector,
            history: Vec::new(),
            reported: false,
        }
    }

    /// Discards the current board and starts over with the same selector.
    ///
    /// Returns the result of a finished game that was never reported, so the
    /// caller can still deliver it.
    #[instrument(skip(self))]
    pub fn restart(&mut self, first: FirstPlayer) -> Option<OutcomeRecord> {
        let pending = self.pending_record();
        if let Some(record) = pending {
            warn!(result = %record.result, "Restarting over an unreported game");
        }
        let selector = self.selector.clone();
        *self = Self::new(first, selector);
        pending
    }

    /// Current board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// The human's mark.
    pub fn human_mark(&self) -> Mark {
        self.human
    }

    /// The engine's mark.
    pub fn computer_mark(&self) -> Mark {
        self.human.opponent()
    }

    /// Current status of the board.
    pub fn outcome(&self) -> Outcome {
        outcome(&self.board)
    }

    /// Mark to move, or `None` once the game is over.
    pub fn to_move(&self) -> Option<Mark> {
        if self.outcome().is_terminal() {
            None
        } else {
            Some(self.board.next_mark(FIRST_MARK))
        }
    }

    /// True when the game is running and waiting on the human.
    pub fn is_human_turn(&self) -> bool {
        self.to_move() == Some(self.human)
    }

    /// Cells played so far, in order.
    pub fn history(&self) -> &[usize] {
        &self.history
    }

    /// Number of marks on the board.
    pub fn moves_played(&self) -> usize {
        self.history.len()
    }

    /// Whether the finished game has been handed to a sink.
    pub fn is_reported(&self) -> bool {
        self.reported
    }

    /// Applies the human's move at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::WrongTurn`] when the engine is to move, or an
    /// engine error for an illegal cell or a finished game.
    #[instrument(skip(self))]
    pub fn play_human(&mut self, index: usize) -> Result<Outcome, SessionError> {
        self.check_turn(self.human)?;
        self.place(index, self.human)
    }

    /// Lets the engine choose and play its move. Returns the chosen cell.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::WrongTurn`] when the human is to move, or an
    /// engine error for a finished game.
    #[instrument(skip(self))]
    pub fn play_computer(&mut self) -> Result<usize, SessionError> {
        let mark = self.computer_mark();
        self.check_turn(mark)?;
        let index = self.selector.select(&self.board, mark)?;
        self.place(index, mark)?;
        Ok(index)
    }

    /// Result from the human's perspective once the game is over.
    pub fn human_result(&self) -> Option<GameResult> {
        match self.outcome() {
            Outcome::InProgress => None,
            Outcome::Won(mark) if mark == self.human => Some(GameResult::Win),
            Outcome::Won(_) => Some(GameResult::Loss),
            Outcome::Draw => Some(GameResult::Draw),
        }
    }

    /// Hands the finished game to `sink`, at most once.
    ///
    /// Returns `Ok(true)` when a record was delivered, `Ok(false)` when the
    /// game is still running or was already reported. A sink error leaves the
    /// session unreported so the caller can retry.
    ///
    /// # Errors
    ///
    /// Propagates the sink's error.
    #[instrument(skip(self, sink))]
    pub fn report_outcome<S: OutcomeSink>(&mut self, sink: &mut S) -> Result<bool, S::Error> {
        if self.reported {
            debug!("Outcome already reported");
            return Ok(false);
        }
        let Some(record) = self.pending_record() else {
            debug!("Game still in progress");
            return Ok(false);
        };

        sink.record(record)?;
        self.reported = true;
        info!(result = %record.result, moves = record.moves_count, "Outcome reported");
        Ok(true)
    }

    fn pending_record(&self) -> Option<OutcomeRecord> {
        if self.reported {
            return None;
        }
        self.human_result().map(|result| OutcomeRecord {
            result,
            moves_count: self.history.len() as i32,
        })
    }

    fn check_turn(&self, mark: Mark) -> Result<(), SessionError> {
        match self.to_move() {
            None => Err(IllegalMove::GameOver.into()),
            Some(expected) if expected != mark => {
                warn!(expected = %expected, attempted = %mark, "Move out of turn");
                Err(SessionError::WrongTurn(expected))
            }
            Some(_) => Ok(()),
        }
    }

    fn place(&mut self, index: usize, mark: Mark) -> Result<Outcome, SessionError> {
        self.board = apply_move(&self.board, index, mark)?;
        self.history.push(index);
        let status = self.outcome();
        debug!(index, mark = %mark, status = %status, "Move applied");
        Ok(status)
    }
}
