use std::collections::VecDeque;
use std::convert::Infallible;

use thiserror::Error;

use crate::MoveSource;
use crate::square::Square;

/// Error when parsing a move script.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("invalid square notation: '{0}'")]
    InvalidSquare(String),

    #[error("square {0} has no destination")]
    Unpaired(Square),
}

/// A scriptable move source.
///
/// Queues `(start, end)` pairs parsed from text. New script can be
/// appended at any time for interactive use.
#[derive(Debug, Clone, Default)]
pub struct ScriptedMoves {
    pending: VecDeque<(Square, Square)>,
}

impl ScriptedMoves {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse and queue additional moves.
    ///
    /// Format:
    /// - Squares are 2 characters (e.g., "e2", "a1")
    /// - Every two squares form one move, start first
    /// - Whitespace and periods (".") separate moves and are otherwise ignored
    ///
    /// Examples:
    /// - `"e2e4"` - One move
    /// - `"e2 e4. e7e5."` - Two moves
    ///
    /// On error nothing is queued.
    pub fn push_script(&mut self, script: &str) -> Result<(), ParseError> {
        let moves = parse_script(script)?;
        self.pending.extend(moves);
        Ok(())
    }

    /// Number of moves still queued.
    #[inline]
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Drop all queued moves.
    pub fn clear(&mut self) {
        self.pending.clear();
    }
}

impl MoveSource for ScriptedMoves {
    type Error = Infallible;

    fn next_move(&mut self) -> Result<Option<(Square, Square)>, Self::Error> {
        Ok(self.pending.pop_front())
    }
}

/// Parse a move script into `(start, end)` pairs.
fn parse_script(script: &str) -> Result<Vec<(Square, Square)>, ParseError> {
    let mut squares = Vec::new();
    let mut current_token = String::new();

    for ch in script.chars() {
        if ch == '.' || ch.is_whitespace() {
            flush_token(&mut current_token, &mut squares)?;
            continue;
        }
        current_token.push(ch);

        // Squares are exactly 2 characters (e.g., "e2", "a1")
        if current_token.chars().count() == 2 {
            flush_token(&mut current_token, &mut squares)?;
        }
    }

    // Flush any remaining token
    flush_token(&mut current_token, &mut squares)?;

    let mut pairs = squares.chunks_exact(2);
    let moves = pairs.by_ref().map(|pair| (pair[0], pair[1])).collect();
    match pairs.remainder() {
        [] => Ok(moves),
        [dangling, ..] => Err(ParseError::Unpaired(*dangling)),
    }
}

/// Parse the current token as a square and clear it.
fn flush_token(token: &mut String, squares: &mut Vec<Square>) -> Result<(), ParseError> {
    if !token.is_empty() {
        let square: Square = token
            .parse()
            .map_err(|_| ParseError::InvalidSquare(token.clone()))?;
        squares.push(square);
        token.clear();
    }
    Ok(())
}
