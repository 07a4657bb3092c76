//! Check, checkmate and stalemate detection.
//!
//! Checkmate and stalemate search every move of one side by applying it on
//! the real board through [`Board::trial`], which restores the position
//! before the next candidate is tried.

use thiserror::Error;

use crate::board::Board;
use crate::piece::Color;
use crate::rules;
use crate::square::Square;

/// Board states the evaluator cannot reason about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum EvaluationError {
    /// The board lacks the king of the evaluated side.
    #[error("no {0} king on the board")]
    MissingKing(Color),
}

/// Outcome of evaluating one side's position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameStatus {
    Normal,
    Check,
    Checkmate,
    Stalemate,
}

impl GameStatus {
    /// Whether the game is over.
    #[inline]
    pub const fn is_terminal(self) -> bool {
        matches!(self, GameStatus::Checkmate | GameStatus::Stalemate)
    }
}

/// Whether the king of `color` is attacked by any opposing piece.
pub fn is_in_check(board: &Board, color: Color) -> Result<bool, EvaluationError> {
    let king = board
        .king_square(color)
        .ok_or(EvaluationError::MissingKing(color))?;
    Ok(rules::is_square_attacked(king, color.other(), board))
}

/// Whether `color` has at least one move that leaves its king safe.
pub fn has_legal_move(board: &mut Board, color: Color) -> Result<bool, EvaluationError> {
    // Fail on a missing king even when the side has no candidate moves.
    is_in_check(board, color)?;

    let origins: Vec<Square> = board.pieces_of(color).map(|(square, _)| square).collect();
    for from in origins {
        for to in Square::all() {
            let Some(exposed) = board.trial(from, to, |after| is_in_check(after, color)) else {
                continue;
            };
            if !exposed? {
                return Ok(true);
            }
        }
    }
    Ok(false)
}

/// Whether `color` is in check with no move escaping it.
pub fn is_checkmate(board: &mut Board, color: Color) -> Result<bool, EvaluationError> {
    if !is_in_check(board, color)? {
        return Ok(false);
    }
    Ok(!has_legal_move(board, color)?)
}

/// Whether `color` is not in check yet has no legal move.
pub fn is_stalemate(board: &mut Board, color: Color) -> Result<bool, EvaluationError> {
    if is_in_check(board, color)? {
        return Ok(false);
    }
    Ok(!has_legal_move(board, color)?)
}

/// Classifies the position of `color`, running the move search once.
pub fn game_status(board: &mut Board, color: Color) -> Result<GameStatus, EvaluationError> {
    let in_check = is_in_check(board, color)?;
    let can_move = has_legal_move(board, color)?;
    Ok(match (in_check, can_move) {
        (true, true) => GameStatus::Check,
        (true, false) => GameStatus::Checkmate,
        (false, true) => GameStatus::Normal,
        (false, false) => GameStatus::Stalemate,
    })
}
