use std::fmt;

use crate::piece::{Color, Piece, Role};
use crate::rules;
use crate::square::{BOARD_SIZE, Square};

const BACK_RANK: [Role; BOARD_SIZE] = [
    Role::Rook,
    Role::Knight,
    Role::Bishop,
    Role::Queen,
    Role::King,
    Role::Bishop,
    Role::Knight,
    Role::Rook,
];

/// Cells touched by an applied move and the en-passant target before it.
///
/// Handing it back to [`Board::undo`] restores the board exactly.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use = "dropping the undo record makes the move permanent"]
pub struct MoveUndo {
    cells: Vec<(Square, Option<Piece>)>,
    en_passant_target: Option<Square>,
}

/// The 8×8 grid and the en-passant bookkeeping.
#[derive(Clone, PartialEq, Eq)]
pub struct Board {
    cells: [[Option<Piece>; BOARD_SIZE]; BOARD_SIZE],

    /// Square a pawn skipped with a two-square advance on the previous move.
    en_passant_target: Option<Square>,
}

impl Board {
    /// Standard starting position.
    pub fn new() -> Self {
        let mut board = Self::empty();
        for (file, role) in BACK_RANK.iter().enumerate() {
            board.cells[Color::Black.back_rank() as usize][file] =
                Some(Piece::new(*role, Color::Black));
            board.cells[Color::Black.pawn_rank() as usize][file] =
                Some(Piece::new(Role::Pawn, Color::Black));
            board.cells[Color::White.pawn_rank() as usize][file] =
                Some(Piece::new(Role::Pawn, Color::White));
            board.cells[Color::White.back_rank() as usize][file] =
                Some(Piece::new(*role, Color::White));
        }
        board
    }

    /// Board with no pieces, for setting up positions.
    pub const fn empty() -> Self {
        Self {
            cells: [[None; BOARD_SIZE]; BOARD_SIZE],
            en_passant_target: None,
        }
    }

    #[inline]
    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        let (rank, file) = square.index();
        self.cells[rank][file]
    }

    /// Puts `piece` on `square` without any rule checks, returning the previous occupant.
    pub fn place(&mut self, square: Square, piece: Option<Piece>) -> Option<Piece> {
        let (rank, file) = square.index();
        std::mem::replace(&mut self.cells[rank][file], piece)
    }

    #[inline]
    pub fn en_passant_target(&self) -> Option<Square> {
        self.en_passant_target
    }

    /// Overrides the en-passant target, for setting up positions.
    pub fn set_en_passant_target(&mut self, target: Option<Square>) {
        self.en_passant_target = target;
    }

    /// All occupied squares with their pieces.
    pub fn pieces(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        Square::all().filter_map(|square| self.piece_at(square).map(|piece| (square, piece)))
    }

    pub fn pieces_of(&self, color: Color) -> impl Iterator<Item = (Square, Piece)> + '_ {
        self.pieces().filter(move |(_, piece)| piece.color == color)
    }

    /// Square of the king of `color`, if it is on the board.
    pub fn king_square(&self, color: Color) -> Option<Square> {
        self.pieces_of(color)
            .find(|(_, piece)| piece.is_role(Role::King))
            .map(|(square, _)| square)
    }

    /// Moves the piece on `start` to `end` if its movement rule allows it.
    ///
    /// Returns false and leaves the board untouched when `start` is empty or
    /// the move is illegal for the piece. King safety is not checked.
    pub fn move_piece(&mut self, start: Square, end: Square) -> bool {
        self.apply(start, end).is_some()
    }

    /// Applies a validated move like [`Board::move_piece`], returning the record
    /// needed to revert it.
    ///
    /// Besides relocating the piece this removes a pawn captured en passant,
    /// moves the rook when castling, promotes a pawn reaching the far rank to
    /// a queen and refreshes the en-passant target.
    pub fn apply(&mut self, start: Square, end: Square) -> Option<MoveUndo> {
        let piece = self.piece_at(start)?;
        if !piece.is_valid_move(start, end, self) {
            return None;
        }

        let mut undo = MoveUndo {
            cells: Vec::with_capacity(4),
            en_passant_target: self.en_passant_target,
        };

        let is_pawn = piece.is_role(Role::Pawn);
        if is_pawn
            && start.file() != end.file()
            && self.en_passant_target == Some(end)
            && let Ok(passed) = Square::new(end.file(), start.rank())
        {
            self.set(passed, None, &mut undo);
        }

        if piece.is_role(Role::King)
            && (end.file() - start.file()).abs() > 1
            && let Some((rook_from, rook_to)) = rules::castling_rook_move(start, end)
        {
            let rook = self.set(rook_from, None, &mut undo);
            self.set(rook_to, rook.map(Piece::moved), &mut undo);
        }

        let landed = if is_pawn && end.rank() == piece.color.promotion_rank() {
            Piece::new(Role::Queen, piece.color)
        } else {
            piece.moved()
        };
        self.set(start, None, &mut undo);
        self.set(end, Some(landed), &mut undo);

        self.en_passant_target = if is_pawn && (end.rank() - start.rank()).abs() == 2 {
            end.offset(0, -piece.color.forward())
        } else {
            None
        };

        Some(undo)
    }

    /// Reverts a move applied by [`Board::apply`]. Must be called before any
    /// later move is applied.
    pub fn undo(&mut self, undo: MoveUndo) {
        for (square, previous) in undo.cells.into_iter().rev() {
            self.place(square, previous);
        }
        self.en_passant_target = undo.en_passant_target;
    }

    /// Applies a move, lets `inspect` look at the resulting position, then
    /// restores the board.
    ///
    /// Returns `None` without calling `inspect` if the move is illegal.
    pub fn trial<R>(
        &mut self,
        start: Square,
        end: Square,
        inspect: impl FnOnce(&Board) -> R,
    ) -> Option<R> {
        let undo = self.apply(start, end)?;
        log::trace!("trial {start}{end}");
        let result = inspect(self);
        self.undo(undo);
        Some(result)
    }

    /// Writes a cell and records its previous occupant.
    fn set(
        &mut self,
        square: Square,
        piece: Option<Piece>,
        undo: &mut MoveUndo,
    ) -> Option<Piece> {
        let previous = self.place(square, piece);
        undo.cells.push((square, previous));
        previous
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (rank, row) in self.cells.iter().enumerate() {
            if rank > 0 {
                writeln!(f)?;
            }
            for (file, cell) in row.iter().enumerate() {
                if file > 0 {
                    f.write_str(" ")?;
                }
                match cell {
                    Some(piece) => write!(f, "{piece}")?,
                    None => f.write_str(".")?,
                }
            }
        }
        Ok(())
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Board")
            .field("cells", &format_args!("\n{self}\n"))
            .field("en_passant_target", &self.en_passant_target)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::piece::PieceKind;

    fn sq(name: &str) -> Square {
        name.parse().expect("test square is invalid")
    }

    fn assert_piece(board: &Board, square: &str, role: Role, color: Color) {
        let found = board.piece_at(sq(square));
        assert!(
            found.is_some_and(|p| p.role() == role && p.color == color),
            "Expected {color} {role:?} at {square}, found {found:?}"
        );
    }

    fn assert_empty(board: &Board, square: &str) {
        let found = board.piece_at(sq(square));
        assert_eq!(found, None, "Expected empty at {square}, found {found:?}");
    }

    fn play(board: &mut Board, moves: &[(&str, &str)]) {
        for (from, to) in moves {
            assert!(board.move_piece(sq(from), sq(to)), "move {from}{to} rejected");
        }
    }

    #[test]
    fn test_initial_position() {
        let board = Board::new();

        assert_eq!(board.pieces().count(), 32);
        assert_piece(&board, "e1", Role::King, Color::White);
        assert_piece(&board, "d8", Role::Queen, Color::Black);
        assert_piece(&board, "a2", Role::Pawn, Color::White);
        assert_piece(&board, "h7", Role::Pawn, Color::Black);
        assert_eq!(board.en_passant_target(), None);
        assert_eq!(
            board.to_string().lines().next(),
            Some("r n b q k b n r"),
            "rank 0 is black's back rank"
        );
    }

    #[test]
    fn test_move_from_empty_square_rejected() {
        let mut board = Board::new();
        let before = board.clone();

        assert!(!board.move_piece(sq("e4"), sq("e5")));
        assert_eq!(board, before);
    }

    #[test]
    fn test_illegal_move_leaves_board_untouched() {
        let mut board = Board::new();
        let before = board.clone();

        assert!(!board.move_piece(sq("e2"), sq("e5")));
        assert!(!board.move_piece(sq("a1"), sq("a3")));
        assert_eq!(board, before);
    }

    #[test]
    fn test_simple_move_relocates_piece() {
        let mut board = Board::new();

        play(&mut board, &[("g1", "f3")]);

        assert_empty(&board, "g1");
        assert_piece(&board, "f3", Role::Knight, Color::White);
    }

    #[test]
    fn test_capture_replaces_occupant() {
        let mut board = Board::new();

        play(&mut board, &[("e2", "e4"), ("d7", "d5"), ("e4", "d5")]);

        assert_piece(&board, "d5", Role::Pawn, Color::White);
        assert_eq!(board.pieces_of(Color::Black).count(), 15);
    }

    #[test]
    fn test_double_step_sets_en_passant_target() {
        let mut board = Board::new();

        play(&mut board, &[("e2", "e4")]);
        assert_eq!(board.en_passant_target(), Some(sq("e3")));

        play(&mut board, &[("g8", "f6")]);
        assert_eq!(board.en_passant_target(), None, "cleared by unrelated move");
    }

    #[test]
    fn test_single_step_clears_en_passant_target() {
        let mut board = Board::new();

        play(&mut board, &[("d7", "d5"), ("e2", "e3")]);

        assert_eq!(board.en_passant_target(), None);
    }

    #[test]
    fn test_en_passant_capture_removes_passed_pawn() {
        let mut board = Board::empty();
        board.place(sq("d4"), Some(Piece::new(Role::Pawn, Color::Black)));
        board.place(sq("e2"), Some(Piece::new(Role::Pawn, Color::White)));

        play(&mut board, &[("e2", "e4")]);
        assert_eq!(board.en_passant_target(), Some(sq("e3")));

        play(&mut board, &[("d4", "e3")]);
        assert_piece(&board, "e3", Role::Pawn, Color::Black);
        assert_empty(&board, "e4");
        assert_empty(&board, "d4");
        assert_eq!(board.pieces().count(), 1);
    }

    #[test]
    fn test_en_passant_expires_after_one_move() {
        let mut board = Board::empty();
        board.place(sq("d4"), Some(Piece::new(Role::Pawn, Color::Black)));
        board.place(sq("e2"), Some(Piece::new(Role::Pawn, Color::White)));
        board.place(sq("h7"), Some(Piece::new(Role::Pawn, Color::Black)));
        board.place(sq("a2"), Some(Piece::new(Role::Pawn, Color::White)));

        play(&mut board, &[("e2", "e4"), ("h7", "h6"), ("a2", "a3")]);

        assert!(!board.move_piece(sq("d4"), sq("e3")));
        assert_piece(&board, "e4", Role::Pawn, Color::White);
    }

    #[test]
    fn test_castling_moves_both_pieces() {
        let mut board = Board::new();
        play(
            &mut board,
            &[
                ("e2", "e4"),
                ("e7", "e5"),
                ("g1", "f3"),
                ("b8", "c6"),
                ("f1", "c4"),
                ("g8", "f6"),
            ],
        );

        play(&mut board, &[("e1", "g1")]);

        assert_piece(&board, "g1", Role::King, Color::White);
        assert_piece(&board, "f1", Role::Rook, Color::White);
        assert_empty(&board, "e1");
        assert_empty(&board, "h1");
        assert_eq!(
            board.piece_at(sq("f1")).map(|p| p.kind),
            Some(PieceKind::Rook { has_moved: true })
        );
    }

    #[test]
    fn test_queenside_castling() {
        let mut board = Board::empty();
        board.place(sq("e8"), Some(Piece::new(Role::King, Color::Black)));
        board.place(sq("a8"), Some(Piece::new(Role::Rook, Color::Black)));

        play(&mut board, &[("e8", "b8")]);

        assert_piece(&board, "b8", Role::King, Color::Black);
        assert_piece(&board, "d8", Role::Rook, Color::Black);
        assert_empty(&board, "a8");
        assert_empty(&board, "e8");
    }

    #[test]
    fn test_castling_through_attack_moves_nothing() {
        let mut board = Board::empty();
        board.place(sq("e1"), Some(Piece::new(Role::King, Color::White)));
        board.place(sq("h1"), Some(Piece::new(Role::Rook, Color::White)));
        board.place(sq("f8"), Some(Piece::new(Role::Rook, Color::Black)));
        let before = board.clone();

        assert!(!board.move_piece(sq("e1"), sq("g1")));
        assert_eq!(board, before);
    }

    #[test]
    fn test_king_move_forfeits_castling() {
        let mut board = Board::empty();
        board.place(sq("e1"), Some(Piece::new(Role::King, Color::White)));
        board.place(sq("h1"), Some(Piece::new(Role::Rook, Color::White)));

        play(&mut board, &[("e1", "e2"), ("e2", "e1")]);

        assert!(!board.move_piece(sq("e1"), sq("g1")));
    }

    #[test]
    fn test_castling_is_not_inverted_by_reverse_move() {
        let mut board = Board::empty();
        board.place(sq("e1"), Some(Piece::new(Role::King, Color::White)));
        board.place(sq("h1"), Some(Piece::new(Role::Rook, Color::White)));

        play(&mut board, &[("e1", "g1")]);

        assert!(!board.move_piece(sq("g1"), sq("e1")), "two-square king step");
        assert_piece(&board, "f1", Role::Rook, Color::White);
    }

    #[test]
    fn test_pawn_capture_is_not_inverted_by_reverse_move() {
        let mut board = Board::empty();
        board.place(sq("e4"), Some(Piece::new(Role::Pawn, Color::White)));
        board.place(sq("d5"), Some(Piece::new(Role::Knight, Color::Black)));

        play(&mut board, &[("e4", "d5")]);

        assert!(!board.move_piece(sq("d5"), sq("e4")), "pawns never retreat");
        assert_piece(&board, "d5", Role::Pawn, Color::White);
    }

    #[test]
    fn test_promotion_to_queen() {
        let mut board = Board::empty();
        board.place(sq("b7"), Some(Piece::new(Role::Pawn, Color::White)));
        board.place(sq("a2"), Some(Piece::new(Role::Pawn, Color::Black)));
        board.place(sq("b1"), Some(Piece::new(Role::Knight, Color::White)));

        play(&mut board, &[("b7", "b8"), ("a2", "b1")]);

        assert_piece(&board, "b8", Role::Queen, Color::White);
        assert_piece(&board, "b1", Role::Queen, Color::Black);
    }

    #[test]
    fn test_undo_restores_capture_exactly() {
        let mut board = Board::new();
        play(&mut board, &[("e2", "e4"), ("d7", "d5")]);
        let before = board.clone();

        let undo = board.apply(sq("e4"), sq("d5")).expect("capture is legal");
        assert_ne!(board, before);
        board.undo(undo);

        assert_eq!(board, before);
        assert_piece(&board, "d5", Role::Pawn, Color::Black);
    }

    #[test]
    fn test_undo_restores_en_passant_and_target() {
        let mut board = Board::empty();
        board.place(sq("d4"), Some(Piece::new(Role::Pawn, Color::Black)));
        board.place(sq("e2"), Some(Piece::new(Role::Pawn, Color::White)));
        play(&mut board, &[("e2", "e4")]);
        let before = board.clone();

        let undo = board.apply(sq("d4"), sq("e3")).expect("en passant is legal");
        board.undo(undo);

        assert_eq!(board, before);
        assert_eq!(board.en_passant_target(), Some(sq("e3")));
    }

    #[test]
    fn test_undo_restores_castling_and_flags() {
        let mut board = Board::empty();
        board.place(sq("e1"), Some(Piece::new(Role::King, Color::White)));
        board.place(sq("a1"), Some(Piece::new(Role::Rook, Color::White)));
        let before = board.clone();

        let undo = board.apply(sq("e1"), sq("b1")).expect("castling is legal");
        board.undo(undo);

        assert_eq!(board, before);
        assert!(!board.piece_at(sq("e1")).unwrap().has_moved());
        assert!(!board.piece_at(sq("a1")).unwrap().has_moved());
    }

    #[test]
    fn test_undo_restores_promoted_pawn() {
        let mut board = Board::empty();
        board.place(sq("g2"), Some(Piece::new(Role::Pawn, Color::Black)));
        board.place(sq("h1"), Some(Piece::new(Role::Rook, Color::White)));
        let before = board.clone();

        let undo = board.apply(sq("g2"), sq("h1")).expect("promoting capture is legal");
        board.undo(undo);

        assert_eq!(board, before);
    }

    #[test]
    fn test_trial_reports_and_reverts() {
        let mut board = Board::new();
        let before = board.clone();

        let seen = board.trial(sq("e2"), sq("e4"), |after| after.piece_at(sq("e4")));

        assert_eq!(seen, Some(Some(Piece::new(Role::Pawn, Color::White))));
        assert_eq!(board, before);
    }

    #[test]
    fn test_trial_skips_illegal_move() {
        let mut board = Board::new();
        let mut called = false;

        let seen = board.trial(sq("e2"), sq("e5"), |_| called = true);

        assert_eq!(seen, None);
        assert!(!called);
    }

    #[test]
    fn test_king_square_lookup() {
        let board = Board::new();
        assert_eq!(board.king_square(Color::White), Some(sq("e1")));
        assert_eq!(board.king_square(Color::Black), Some(sq("e8")));
        assert_eq!(Board::empty().king_square(Color::White), None);
    }
}
