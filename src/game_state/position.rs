//! Board coordinates.
//!
//! Row 0 is Light's back rank (rank 1) and column 0 is file a, so `(0, 4)` is
//! e1 and `(7, 4)` is e8.

use std::fmt;

/// A `(row, column)` pair. Valid positions have both fields in `0..8`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub row: i8,
    pub col: i8,
}

impl Position {
    /// Sentinel used by moves that carry no board coordinates.
    pub const INVALID: Position = Position { row: -1, col: -1 };

    #[inline]
    pub const fn new(row: i8, col: i8) -> Self {
        Self { row, col }
    }

    #[inline]
    pub const fn is_valid(self) -> bool {
        self.row >= 0 && self.row < 8 && self.col >= 0 && self.col < 8
    }

    /// Shifted copy; may be off the board.
    #[inline]
    pub const fn offset(self, d_row: i8, d_col: i8) -> Self {
        Self {
            row: self.row + d_row,
            col: self.col + d_col,
        }
    }

    /// Row-major index in `0..64` (a1 = 0, h8 = 63).
    #[inline]
    pub fn index(self) -> usize {
        debug_assert!(self.is_valid(), "index of off-board position {self:?}");
        self.row as usize * 8 + self.col as usize
    }

    /// All 64 squares in row-major order.
    pub fn all() -> impl Iterator<Item = Position> {
        (0..8i8).flat_map(|row| (0..8i8).map(move |col| Position::new(row, col)))
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_valid() {
            write!(
                f,
                "{}{}",
                char::from(b'a' + self.col as u8),
                char::from(b'1' + self.row as u8)
            )
        } else {
            f.write_str("--")
        }
    }
}
