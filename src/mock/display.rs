use std::io::{self, Write};

use crate::BoardDisplay;
use crate::evaluator::GameStatus;
use crate::game_logic::RenderableBoard;
use crate::piece::{Color, Role};
use crate::square::BOARD_SIZE;

/// Terminal-based board display for development and testing.
///
/// Renders a [`RenderableBoard`] as an 8×8 grid with ANSI colors,
/// highlighting the king of the side to move while it is in check.
#[derive(Debug, Default)]
pub struct TerminalDisplay;

impl TerminalDisplay {
    /// Create a new terminal display.
    pub fn new() -> Self {
        Self
    }
}

/// Error type for terminal display operations.
#[derive(Debug, thiserror::Error)]
pub enum DisplayError {
    #[error("failed to write to terminal: {0}")]
    Io(#[from] io::Error),
}

impl BoardDisplay for TerminalDisplay {
    type Error = DisplayError;

    fn show(
        &mut self,
        board: &RenderableBoard,
        turn: Color,
        status: GameStatus,
    ) -> Result<(), Self::Error> {
        render_board(&mut io::stdout(), board, turn, status)
    }
}

/// Render the board to any writer. Extracted for testability.
fn render_board(
    w: &mut impl Write,
    board: &RenderableBoard,
    turn: Color,
    status: GameStatus,
) -> Result<(), DisplayError> {
    let king_in_check = matches!(status, GameStatus::Check | GameStatus::Checkmate);

    for (rank, row) in board.iter().enumerate() {
        write!(w, " {} ", BOARD_SIZE - rank)?;
        for cell in row {
            let highlight = king_in_check && *cell == Some((Role::King, turn));
            write!(w, "{}", format_square(*cell, highlight))?;
        }
        writeln!(w)?;
    }
    writeln!(w, "    a  b  c  d  e  f  g  h")?;
    writeln!(w, "{}", status_line(turn, status))?;
    w.flush()?;
    Ok(())
}

/// Map an occupant to a cell string, with a magenta background for a king in check.
fn format_square(cell: Option<(Role, Color)>, highlight: bool) -> String {
    let symbol = match cell {
        Some((role, color)) => role.char(color),
        None => '·',
    };
    if highlight {
        format!("\x1b[45m {symbol} \x1b[0m")
    } else {
        format!(" {symbol} ")
    }
}

fn status_line(turn: Color, status: GameStatus) -> String {
    match status {
        GameStatus::Normal => format!("{turn} to move"),
        GameStatus::Check => format!("{turn} to move, in check"),
        GameStatus::Checkmate => format!("checkmate, {} wins", turn.other()),
        GameStatus::Stalemate => format!("stalemate, {turn} has no legal move"),
    }
}
