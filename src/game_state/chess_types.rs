//! Core value types shared by the board, move rules and search.
//!
//! Pieces carry no per-instance state, so a board cell stores a small `Piece`
//! value directly instead of a reference to a shared object.

pub use crate::game_state::game_state::GameState;
pub use crate::game_state::position::Position;

/// Side to move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    Light,
    Dark,
}

impl Color {
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            Color::Light => 0,
            Color::Dark => 1,
        }
    }

    #[inline]
    pub const fn opposite(self) -> Self {
        match self {
            Color::Light => Color::Dark,
            Color::Dark => Color::Light,
        }
    }

    /// Row delta of a forward pawn step (row 0 is Light's back rank).
    #[inline]
    pub const fn forward(self) -> i8 {
        match self {
            Color::Light => 1,
            Color::Dark => -1,
        }
    }

    /// Row holding this side's king and rooks at the start of a game.
    #[inline]
    pub const fn back_row(self) -> i8 {
        match self {
            Color::Light => 0,
            Color::Dark => 7,
        }
    }

    /// +1 for Light, -1 for Dark; evaluation scores are Light-positive.
    #[inline]
    pub const fn sign(self) -> i32 {
        match self {
            Color::Light => 1,
            Color::Dark => -1,
        }
    }
}

/// Piece kind (color is carried separately by `Piece`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceKind {
    pub const ALL: [PieceKind; 6] = [
        PieceKind::Pawn,
        PieceKind::Knight,
        PieceKind::Bishop,
        PieceKind::Rook,
        PieceKind::Queen,
        PieceKind::King,
    ];

    #[inline]
    pub const fn index(self) -> usize {
        match self {
            PieceKind::Pawn => 0,
            PieceKind::Knight => 1,
            PieceKind::Bishop => 2,
            PieceKind::Rook => 3,
            PieceKind::Queen => 4,
            PieceKind::King => 5,
        }
    }

    /// Lowercase FEN/UCI letter.
    #[inline]
    pub const fn letter(self) -> char {
        match self {
            PieceKind::Pawn => 'p',
            PieceKind::Knight => 'n',
            PieceKind::Bishop => 'b',
            PieceKind::Rook => 'r',
            PieceKind::Queen => 'q',
            PieceKind::King => 'k',
        }
    }

    pub fn from_letter(ch: char) -> Option<Self> {
        match ch.to_ascii_lowercase() {
            'p' => Some(PieceKind::Pawn),
            'n' => Some(PieceKind::Knight),
            'b' => Some(PieceKind::Bishop),
            'r' => Some(PieceKind::Rook),
            'q' => Some(PieceKind::Queen),
            'k' => Some(PieceKind::King),
            _ => None,
        }
    }

    #[inline]
    pub const fn is_promotion_target(self) -> bool {
        matches!(
            self,
            PieceKind::Knight | PieceKind::Bishop | PieceKind::Rook | PieceKind::Queen
        )
    }
}

/// One of the twelve colored chess pieces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub kind: PieceKind,
    pub color: Color,
}

impl Piece {
    #[inline]
    pub const fn new(kind: PieceKind, color: Color) -> Self {
        Self { kind, color }
    }

    /// FEN letter: uppercase for Light, lowercase for Dark.
    #[inline]
    pub const fn fen_char(self) -> char {
        let base = self.kind.letter();
        match self.color {
            Color::Light => base.to_ascii_uppercase(),
            Color::Dark => base,
        }
    }

    pub fn from_fen_char(ch: char) -> Option<Self> {
        let color = if ch.is_ascii_uppercase() {
            Color::Light
        } else if ch.is_ascii_lowercase() {
            Color::Dark
        } else {
            return None;
        };
        PieceKind::from_letter(ch).map(|kind| Piece::new(kind, color))
    }
}

/// The twelve pieces, Light first, in `PieceKind::ALL` order.
pub const ALL_PIECES: [Piece; 12] = [
    Piece::new(PieceKind::Pawn, Color::Light),
    Piece::new(PieceKind::Knight, Color::Light),
    Piece::new(PieceKind::Bishop, Color::Light),
    Piece::new(PieceKind::Rook, Color::Light),
    Piece::new(PieceKind::Queen, Color::Light),
    Piece::new(PieceKind::King, Color::Light),
    Piece::new(PieceKind::Pawn, Color::Dark),
    Piece::new(PieceKind::Knight, Color::Dark),
    Piece::new(PieceKind::Bishop, Color::Dark),
    Piece::new(PieceKind::Rook, Color::Dark),
    Piece::new(PieceKind::Queen, Color::Dark),
    Piece::new(PieceKind::King, Color::Dark),
];

/// Wing on which a castle happens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CastleSide {
    Kingside,
    Queenside,
}

impl CastleSide {
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            CastleSide::Kingside => 0,
            CastleSide::Queenside => 1,
        }
    }

    /// Column the king lands on.
    #[inline]
    pub const fn king_to_col(self) -> i8 {
        match self {
            CastleSide::Kingside => 6,
            CastleSide::Queenside => 2,
        }
    }

    /// Column the rook starts on.
    #[inline]
    pub const fn rook_from_col(self) -> i8 {
        match self {
            CastleSide::Kingside => 7,
            CastleSide::Queenside => 0,
        }
    }

    /// Column the rook lands on.
    #[inline]
    pub const fn rook_to_col(self) -> i8 {
        match self {
            CastleSide::Kingside => 5,
            CastleSide::Queenside => 3,
        }
    }
}

/// Column of both kings at the start of a game.
pub const KING_START_COL: i8 = 4;
