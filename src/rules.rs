use crate::board::Board;
use crate::piece::{Color, Piece, PieceKind, Role};
use crate::square::Square;

/// File the king starts on.
const KING_FILE: i32 = 4;

impl Piece {
    /// Whether moving this piece from `start` to `end` obeys its movement rule.
    ///
    /// Pure: reads the board and never touches it. King safety after the
    /// move is not considered here. Castling is accepted for the king, but
    /// the rook relocation is left to [`Board::move_piece`].
    pub fn is_valid_move(&self, start: Square, end: Square, board: &Board) -> bool {
        if start == end {
            return false;
        }
        let d_file = end.file() - start.file();
        let d_rank = end.rank() - start.rank();

        match self.kind {
            PieceKind::Pawn => is_valid_pawn_move(self.color, start, end, board),
            PieceKind::Knight => is_knight_jump(d_file, d_rank) && can_land(self.color, end, board),
            PieceKind::Bishop => {
                is_diagonal(d_file, d_rank)
                    && is_path_clear(start, end, board)
                    && can_land(self.color, end, board)
            }
            PieceKind::Rook { .. } => {
                is_straight(d_file, d_rank)
                    && is_path_clear(start, end, board)
                    && can_land(self.color, end, board)
            }
            PieceKind::Queen => {
                (is_diagonal(d_file, d_rank) || is_straight(d_file, d_rank))
                    && is_path_clear(start, end, board)
                    && can_land(self.color, end, board)
            }
            PieceKind::King { has_moved } => {
                (is_adjacent(d_file, d_rank) && can_land(self.color, end, board))
                    || (!has_moved && can_castle(self.color, start, end, board))
            }
        }
    }

    /// Whether this piece, standing on `from`, attacks `target`.
    ///
    /// Same geometry as [`Piece::is_valid_move`] without the landing rule:
    /// pawns attack diagonally forward only and kings never attack by castling.
    /// On a square holding an opposing piece both relations agree.
    pub fn attacks(&self, from: Square, target: Square, board: &Board) -> bool {
        if from == target {
            return false;
        }
        let d_file = target.file() - from.file();
        let d_rank = target.rank() - from.rank();

        match self.kind {
            PieceKind::Pawn => d_file.abs() == 1 && d_rank == self.color.forward(),
            PieceKind::Knight => is_knight_jump(d_file, d_rank),
            PieceKind::Bishop => is_diagonal(d_file, d_rank) && is_path_clear(from, target, board),
            PieceKind::Rook { .. } => {
                is_straight(d_file, d_rank) && is_path_clear(from, target, board)
            }
            PieceKind::Queen => {
                (is_diagonal(d_file, d_rank) || is_straight(d_file, d_rank))
                    && is_path_clear(from, target, board)
            }
            PieceKind::King { .. } => is_adjacent(d_file, d_rank),
        }
    }
}

/// Whether any piece of color `by` attacks `square`.
pub fn is_square_attacked(square: Square, by: Color, board: &Board) -> bool {
    board
        .pieces_of(by)
        .any(|(from, piece)| piece.attacks(from, square, board))
}

/// Rook relocation `(from, to)` implied by a castling king move.
///
/// Kingside the king moves two files toward the h-rook, which lands on the
/// f-file. Queenside the king moves three files toward the a-rook, which
/// lands on the d-file. Returns `None` for any other king displacement.
pub fn castling_rook_move(start: Square, end: Square) -> Option<(Square, Square)> {
    if start.file() != KING_FILE || start.rank() != end.rank() {
        return None;
    }
    match end.file() - start.file() {
        2 => Some((start.offset(3, 0)?, start.offset(1, 0)?)),
        -3 => Some((start.offset(-4, 0)?, start.offset(-1, 0)?)),
        _ => None,
    }
}

fn is_valid_pawn_move(color: Color, start: Square, end: Square, board: &Board) -> bool {
    let forward = color.forward();
    let d_file = end.file() - start.file();
    let d_rank = end.rank() - start.rank();

    if d_file == 0 {
        if d_rank == forward {
            return board.piece_at(end).is_none();
        }
        if d_rank == 2 * forward && start.rank() == color.pawn_rank() {
            let passed = start.offset(0, forward);
            return passed.is_some_and(|sq| board.piece_at(sq).is_none())
                && board.piece_at(end).is_none();
        }
        return false;
    }

    if d_file.abs() != 1 || d_rank != forward {
        return false;
    }
    match board.piece_at(end) {
        Some(target) => target.color != color,
        None => is_en_passant_capture(color, start, end, board),
    }
}

/// Diagonal step onto the en-passant target, past an opposing pawn beside `start`.
fn is_en_passant_capture(color: Color, start: Square, end: Square, board: &Board) -> bool {
    if board.en_passant_target() != Some(end) {
        return false;
    }
    Square::new(end.file(), start.rank())
        .ok()
        .and_then(|passed| board.piece_at(passed))
        .is_some_and(|passed| passed.color != color && passed.is_role(Role::Pawn))
}

fn can_castle(color: Color, start: Square, end: Square, board: &Board) -> bool {
    if start.rank() != color.back_rank() {
        return false;
    }
    let Some((rook_square, _)) = castling_rook_move(start, end) else {
        return false;
    };
    let rook_ready = board.piece_at(rook_square).is_some_and(|rook| {
        rook.color == color && rook.kind == PieceKind::Rook { has_moved: false }
    });
    if !rook_ready || !is_path_clear(start, rook_square, board) {
        return false;
    }

    // The king may not leave, cross or land on an attacked square.
    let step = (end.file() - start.file()).signum();
    let mut file = start.file();
    loop {
        let Ok(transit) = Square::new(file, start.rank()) else {
            return false;
        };
        if is_square_attacked(transit, color.other(), board) {
            return false;
        }
        if file == end.file() {
            return true;
        }
        file += step;
    }
}

/// Every square strictly between `start` and `end` is empty.
///
/// Walks by unit steps along the line joining them; callers ensure the two
/// squares share a rank, file or diagonal.
fn is_path_clear(start: Square, end: Square, board: &Board) -> bool {
    let step_file = (end.file() - start.file()).signum();
    let step_rank = (end.rank() - start.rank()).signum();

    let mut current = start;
    loop {
        let Some(next) = current.offset(step_file, step_rank) else {
            return false;
        };
        if next == end {
            return true;
        }
        if board.piece_at(next).is_some() {
            return false;
        }
        current = next;
    }
}

/// Destination is empty or holds an opposing piece.
#[inline]
fn can_land(color: Color, end: Square, board: &Board) -> bool {
    board.piece_at(end).is_none_or(|occupant| occupant.color != color)
}

#[inline]
fn is_knight_jump(d_file: i32, d_rank: i32) -> bool {
    matches!((d_file.abs(), d_rank.abs()), (1, 2) | (2, 1))
}

#[inline]
fn is_diagonal(d_file: i32, d_rank: i32) -> bool {
    d_file.abs() == d_rank.abs() && d_file != 0
}

#[inline]
fn is_straight(d_file: i32, d_rank: i32) -> bool {
    (d_file == 0) != (d_rank == 0)
}

#[inline]
fn is_adjacent(d_file: i32, d_rank: i32) -> bool {
    d_file.abs() <= 1 && d_rank.abs() <= 1 && (d_file, d_rank) != (0, 0)
}
