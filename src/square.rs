use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Board width and height.
pub const BOARD_SIZE: usize = 8;

/// Errors produced when building or parsing a [`Square`].
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SquareError {
    /// Coordinates outside `0..8` on either axis.
    #[error("square ({file}, {rank}) is off the board")]
    OutOfBounds { file: i32, rank: i32 },

    /// Text that is not a square name such as `e2`.
    #[error("invalid square name: '{0}'")]
    InvalidName(String),
}

/// A board coordinate.
///
/// `file` 0 is the a-file. `rank` 0 is Black's back rank (the eighth rank
/// in square names), so White pawns advance toward decreasing rank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Square {
    file: u8,
    rank: u8,
}

impl Square {
    /// Creates a square, rejecting coordinates off the board.
    pub fn new(file: i32, rank: i32) -> Result<Self, SquareError> {
        if (0..BOARD_SIZE as i32).contains(&file) && (0..BOARD_SIZE as i32).contains(&rank) {
            Ok(Self {
                file: file as u8,
                rank: rank as u8,
            })
        } else {
            Err(SquareError::OutOfBounds { file, rank })
        }
    }

    #[inline]
    pub const fn file(self) -> i32 {
        self.file as i32
    }

    #[inline]
    pub const fn rank(self) -> i32 {
        self.rank as i32
    }

    /// Square shifted by the given offsets, or `None` when it leaves the board.
    #[inline]
    pub fn offset(self, d_file: i32, d_rank: i32) -> Option<Self> {
        Self::new(self.file() + d_file, self.rank() + d_rank).ok()
    }

    /// All 64 squares, rank by rank starting from rank 0.
    pub fn all() -> impl Iterator<Item = Square> {
        (0..BOARD_SIZE as u8)
            .flat_map(|rank| (0..BOARD_SIZE as u8).map(move |file| Square { file, rank }))
    }

    #[inline]
    pub(crate) const fn index(self) -> (usize, usize) {
        (self.rank as usize, self.file as usize)
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let file = (b'a' + self.file) as char;
        let rank = BOARD_SIZE as u8 - self.rank;
        write!(f, "{file}{rank}")
    }
}

impl FromStr for Square {
    type Err = SquareError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || SquareError::InvalidName(s.to_string());
        let bytes = s.as_bytes();
        if bytes.len() != 2 {
            return Err(invalid());
        }
        let file = bytes[0].to_ascii_lowercase();
        let rank = bytes[1];
        if !(b'a'..=b'h').contains(&file) || !(b'1'..=b'8').contains(&rank) {
            return Err(invalid());
        }
        Self::new(
            i32::from(file - b'a'),
            BOARD_SIZE as i32 - i32::from(rank - b'0'),
        )
    }
}
