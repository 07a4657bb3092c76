use crate::MoveSource;
use crate::board::Board;
use crate::evaluator::{self, EvaluationError, GameStatus};
use crate::piece::{Color, Piece, Role};
use crate::square::{BOARD_SIZE, Square};

/// Read-only snapshot of the board for renderers, indexed `[rank][file]`.
pub type RenderableBoard = [[Option<(Role, Color)>; BOARD_SIZE]; BOARD_SIZE];

/// Game driver owning the board and the side to move.
///
/// This is the only mutation entry point offered to input layers.
#[derive(Clone, PartialEq, Eq)]
pub struct GameEngine {
    board: Board,
    turn: Color,
}

impl GameEngine {
    /// Starting position, White to move.
    #[inline]
    pub fn new() -> Self {
        Self::from_board(Board::new(), Color::White)
    }

    /// Creates a GameEngine from an existing position.
    pub fn from_board(board: Board, turn: Color) -> Self {
        Self { board, turn }
    }

    /// Side to move.
    #[inline]
    pub fn turn(&self) -> Color {
        self.turn
    }

    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Get the piece at a given square, if any
    #[inline]
    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        self.board.piece_at(square)
    }

    /// Plays `start` to `end` for the side to move.
    ///
    /// Rejects moves of the wrong color, moves the piece's rule forbids and
    /// moves that leave the mover's king attacked. Rejected moves change nothing.
    pub fn request_move(&mut self, start: Square, end: Square) -> bool {
        let mover = self.turn;
        match self.board.piece_at(start) {
            None => {
                log::debug!("rejected {start}{end}: no piece on {start}");
                return false;
            }
            Some(piece) if piece.color != mover => {
                log::debug!("rejected {start}{end}: {piece} is not {mover}'s to move");
                return false;
            }
            Some(_) => {}
        }

        match self
            .board
            .trial(start, end, |after| evaluator::is_in_check(after, mover))
        {
            None => {
                log::debug!("rejected {start}{end}: illegal for the piece");
                false
            }
            Some(Ok(true)) => {
                log::debug!("rejected {start}{end}: leaves the {mover} king in check");
                false
            }
            Some(Err(err)) => {
                log::error!("rejected {start}{end}: {err}");
                false
            }
            Some(Ok(false)) => {
                let applied = self.board.move_piece(start, end);
                debug_assert!(applied, "trialled move must apply");
                self.turn = !mover;
                log::info!("{mover} played {start}{end}");
                applied
            }
        }
    }

    /// Evaluates the position of `color`: normal, check, checkmate or stalemate.
    ///
    /// Takes `&mut self` because the move search applies and reverts trial
    /// moves on the board; the position is unchanged on return.
    pub fn query_game_status(&mut self, color: Color) -> Result<GameStatus, EvaluationError> {
        let status = evaluator::game_status(&mut self.board, color)?;
        if status.is_terminal() {
            log::info!("{color} is in {status:?}");
        }
        Ok(status)
    }

    /// Copy of the grid with piece roles and colors only.
    pub fn renderable_state(&self) -> RenderableBoard {
        let mut grid: RenderableBoard = [[None; BOARD_SIZE]; BOARD_SIZE];
        for (square, piece) in self.board.pieces() {
            let (rank, file) = (square.rank() as usize, square.file() as usize);
            grid[rank][file] = Some((piece.role(), piece.color));
        }
        grid
    }

    /// Requests every move the source yields until it runs dry.
    ///
    /// Returns how many moves were accepted.
    pub fn play_from<S: MoveSource>(&mut self, source: &mut S) -> Result<usize, S::Error> {
        let mut accepted = 0;
        while let Some((start, end)) = source.next_move()? {
            if self.request_move(start, end) {
                accepted += 1;
            }
        }
        Ok(accepted)
    }
}

impl Default for GameEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for GameEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameEngine")
            .field("turn", &self.turn)
            .field("board", &format_args!("\n{}\n", self.board))
            .field("en_passant_target", &self.board.en_passant_target())
            .finish()
    }
}
