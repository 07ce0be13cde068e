//! Line-based console presentation for a game session.

use anyhow::Result;
use std::io::{BufRead, Write};
use tictac_arena::{GameResult, GameSession, SessionError};
use tictac_engine::{Position, ScoredMove};
use tracing::{debug, instrument};

/// Plays `session` to the end over the given streams.
///
/// Returns the human's result, or `None` if the player quit or input ended.
#[instrument(skip_all, fields(computer = %computer_name))]
pub fn play_game<R: BufRead, W: Write>(
    session: &mut GameSession,
    computer_name: &str,
    input: &mut R,
    output: &mut W,
) -> Result<Option<GameResult>> {
    writeln!(
        output,
        "You are {}. {} is {}.",
        session.human_mark(),
        computer_name,
        session.computer_mark()
    )?;
    writeln!(output, "{}\n", session.board())?;

    while !session.outcome().is_terminal() {
        if session.is_human_turn() {
            write!(output, "Your move (1-9 or a name like \"center\", q to quit): ")?;
            output.flush()?;

            let Some(line) = read_line(input)? else {
                debug!("Input closed");
                return Ok(None);
            };
            if matches!(line.as_str(), "q" | "quit" | "exit") {
                return Ok(None);
            }

            let position = match line.parse::<Position>() {
                Ok(p) => p,
                Err(e) => {
                    writeln!(output, "{}", e)?;
                    write_open_cells(session, output)?;
                    continue;
                }
            };
            match session.play_human(position.to_index()) {
                Ok(_) => {}
                Err(e @ SessionError::Engine(_)) => {
                    writeln!(output, "{}", e)?;
                    write_open_cells(session, output)?;
                    continue;
                }
                Err(e) => return Err(e.into()),
            }
        } else {
            let index = session.play_computer()?;
            let label = Position::from_index(index).map_or("?", |p| p.label());
            writeln!(output, "{} plays {}.", computer_name, label)?;
        }
        writeln!(output, "\n{}\n", session.board())?;
    }

    let result = session.human_result();
    match result {
        Some(GameResult::Win) => writeln!(output, "You won!")?,
        Some(GameResult::Loss) => {
            writeln!(output, "{} won! Better luck next time.", computer_name)?
        }
        Some(GameResult::Draw) => writeln!(output, "It's a draw!")?,
        None => {}
    }
    let moves: Vec<String> = session
        .history()
        .iter()
        .map(|index| (index + 1).to_string())
        .collect();
    writeln!(output, "Moves: {}", moves.join(" "))?;
    Ok(result)
}

fn write_open_cells<W: Write>(session: &GameSession, output: &mut W) -> Result<()> {
    let open: Vec<String> = Position::open(session.board())
        .into_iter()
        .map(|p| (p.to_index() + 1).to_string())
        .collect();
    writeln!(output, "Open cells: {}", open.join(" "))?;
    Ok(())
}

/// Asks a yes/no question; anything but `y`/`yes` (or closed input) is no.
pub fn confirm<R: BufRead, W: Write>(prompt: &str, input: &mut R, output: &mut W) -> Result<bool> {
    write!(output, "{} [y/N]: ", prompt)?;
    output.flush()?;
    Ok(read_line(input)?.is_some_and(|l| matches!(l.to_lowercase().as_str(), "y" | "yes")))
}

/// Writes one line per scored move.
pub fn write_scores<W: Write>(scores: &[ScoredMove], output: &mut W) -> Result<()> {
    for scored in scores {
        let verdict = if scored.is_win() {
            "win"
        } else if scored.is_loss() {
            "loss"
        } else {
            "draw"
        };
        let label = Position::from_index(scored.index).map_or("?", |p| p.label());
        writeln!(
            output,
            "{:>2}  {:<14} {:>3}  {}",
            scored.index + 1,
            label,
            scored.score,
            verdict
        )?;
    }
    Ok(())
}

fn read_line<R: BufRead>(input: &mut R) -> Result<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}
