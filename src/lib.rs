pub mod board;
pub mod evaluator;
pub mod game_logic;
pub mod mock;
pub mod piece;
pub mod rules;
pub mod square;

pub use board::Board;
pub use evaluator::{EvaluationError, GameStatus};
pub use game_logic::{GameEngine, RenderableBoard};
pub use piece::{Color, Piece, PieceKind, Role};
pub use square::{Square, SquareError};

/// Trait for reading move requests from the player.
///
/// Abstracts over interactive terminals and scripted inputs,
/// providing a uniform interface for `GameEngine`.
pub trait MoveSource {
    /// Error type for input read failures.
    type Error: std::fmt::Debug + std::fmt::Display;

    /// Next requested `(start, end)` pair, or `None` when the source is exhausted.
    fn next_move(&mut self) -> Result<Option<(Square, Square)>, Self::Error>;
}

/// Trait for displaying the game to the player.
///
/// Mirrors [`MoveSource`] on the output side of the game loop.
pub trait BoardDisplay {
    /// Error type for display update failures.
    type Error: std::fmt::Debug + std::fmt::Display;

    /// Show the board snapshot together with the side to move and its status.
    fn show(
        &mut self,
        board: &RenderableBoard,
        turn: Color,
        status: GameStatus,
    ) -> Result<(), Self::Error>;
}
