use std::fmt;

/// Side of the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    White,
    Black,
}

impl Color {
    /// Rank step a pawn of this color advances by.
    #[inline]
    pub const fn forward(self) -> i32 {
        match self {
            Color::White => -1,
            Color::Black => 1,
        }
    }

    /// Rank the pawns of this color start on.
    #[inline]
    pub const fn pawn_rank(self) -> i32 {
        match self {
            Color::White => 6,
            Color::Black => 1,
        }
    }

    /// Rank the king and rooks of this color start on.
    #[inline]
    pub const fn back_rank(self) -> i32 {
        match self {
            Color::White => 7,
            Color::Black => 0,
        }
    }

    /// Rank a pawn of this color promotes on.
    #[inline]
    pub const fn promotion_rank(self) -> i32 {
        self.other().back_rank()
    }

    #[inline]
    pub const fn other(self) -> Color {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }
}

impl std::ops::Not for Color {
    type Output = Color;

    fn not(self) -> Color {
        self.other()
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::White => f.write_str("white"),
            Color::Black => f.write_str("black"),
        }
    }
}

/// Piece type without per-piece state, as handed to renderers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl Role {
    /// FEN-style letter: uppercase for White, lowercase for Black.
    pub const fn char(self, color: Color) -> char {
        let c = match self {
            Role::Pawn => 'p',
            Role::Knight => 'n',
            Role::Bishop => 'b',
            Role::Rook => 'r',
            Role::Queen => 'q',
            Role::King => 'k',
        };
        match color {
            Color::White => c.to_ascii_uppercase(),
            Color::Black => c,
        }
    }
}

/// Piece variant. Rooks and kings remember whether they have moved,
/// which castling needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook { has_moved: bool },
    Queen,
    King { has_moved: bool },
}

/// A piece on the board. Position is implied by the board cell holding it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub color: Color,
    pub kind: PieceKind,
}

impl Piece {
    /// Creates an unmoved piece of the given role.
    pub const fn new(role: Role, color: Color) -> Self {
        let kind = match role {
            Role::Pawn => PieceKind::Pawn,
            Role::Knight => PieceKind::Knight,
            Role::Bishop => PieceKind::Bishop,
            Role::Rook => PieceKind::Rook { has_moved: false },
            Role::Queen => PieceKind::Queen,
            Role::King => PieceKind::King { has_moved: false },
        };
        Self { color, kind }
    }

    #[inline]
    pub const fn role(self) -> Role {
        match self.kind {
            PieceKind::Pawn => Role::Pawn,
            PieceKind::Knight => Role::Knight,
            PieceKind::Bishop => Role::Bishop,
            PieceKind::Rook { .. } => Role::Rook,
            PieceKind::Queen => Role::Queen,
            PieceKind::King { .. } => Role::King,
        }
    }

    /// Whether the piece has moved. Always false for pieces that don't track it.
    #[inline]
    pub const fn has_moved(self) -> bool {
        matches!(
            self.kind,
            PieceKind::Rook { has_moved: true } | PieceKind::King { has_moved: true }
        )
    }

    /// The same piece with its moved flag set.
    pub const fn moved(self) -> Self {
        let kind = match self.kind {
            PieceKind::Rook { .. } => PieceKind::Rook { has_moved: true },
            PieceKind::King { .. } => PieceKind::King { has_moved: true },
            other => other,
        };
        Self {
            color: self.color,
            kind,
        }
    }

    #[inline]
    pub fn is_role(self, role: Role) -> bool {
        self.role() == role
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.role().char(self.color))
    }
}
