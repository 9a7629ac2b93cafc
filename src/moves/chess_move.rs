//! Move descriptors.
//!
//! A `Move` is a kind tag plus the from/to squares and a capture flag. Null
//! kinds (resign, undo, reset) carry `Position::INVALID` coordinates.

use crate::game_state::chess_types::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoveKind {
    Normal,
    KingsideCastle,
    QueensideCastle,
    /// Pawn reaches the last row and becomes the given piece.
    Promotion(PieceKind),
    EnPassant,
    /// The given side gives up.
    Resign(Color),
    Undo,
    Reset,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    pub kind: MoveKind,
    pub from: Position,
    pub to: Position,
    pub capture: bool,
}

impl Move {
    #[inline]
    pub const fn normal(from: Position, to: Position, capture: bool) -> Self {
        Self {
            kind: MoveKind::Normal,
            from,
            to,
            capture,
        }
    }

    /// King move of a castle for `color`; the rook move is implied.
    #[inline]
    pub const fn castle(color: Color, side: CastleSide) -> Self {
        let row = color.back_row();
        Self {
            kind: match side {
                CastleSide::Kingside => MoveKind::KingsideCastle,
                CastleSide::Queenside => MoveKind::QueensideCastle,
            },
            from: Position::new(row, KING_START_COL),
            to: Position::new(row, side.king_to_col()),
            capture: false,
        }
    }

    #[inline]
    pub const fn promotion(from: Position, to: Position, capture: bool, piece: PieceKind) -> Self {
        Self {
            kind: MoveKind::Promotion(piece),
            from,
            to,
            capture,
        }
    }

    #[inline]
    pub const fn en_passant(from: Position, to: Position) -> Self {
        Self {
            kind: MoveKind::EnPassant,
            from,
            to,
            capture: true,
        }
    }

    #[inline]
    pub const fn resign(color: Color) -> Self {
        Self::null(MoveKind::Resign(color))
    }

    #[inline]
    pub const fn undo() -> Self {
        Self::null(MoveKind::Undo)
    }

    #[inline]
    pub const fn reset() -> Self {
        Self::null(MoveKind::Reset)
    }

    const fn null(kind: MoveKind) -> Self {
        Self {
            kind,
            from: Position::INVALID,
            to: Position::INVALID,
            capture: false,
        }
    }

    #[inline]
    pub const fn is_resignation(&self) -> bool {
        matches!(self.kind, MoveKind::Resign(_))
    }

    /// Resign, undo and reset leave the board alone.
    #[inline]
    pub const fn is_null(&self) -> bool {
        matches!(
            self.kind,
            MoveKind::Resign(_) | MoveKind::Undo | MoveKind::Reset
        )
    }

    #[inline]
    pub const fn castle_side(&self) -> Option<CastleSide> {
        match self.kind {
            MoveKind::KingsideCastle => Some(CastleSide::Kingside),
            MoveKind::QueensideCastle => Some(CastleSide::Queenside),
            _ => None,
        }
    }

    #[inline]
    pub const fn promotion_piece(&self) -> Option<PieceKind> {
        match self.kind {
            MoveKind::Promotion(piece) => Some(piece),
            _ => None,
        }
    }

    /// Square of the captured piece; differs from `to` only for en passant.
    #[inline]
    pub const fn capture_square(&self) -> Position {
        match self.kind {
            MoveKind::EnPassant => Position::new(self.from.row, self.to.col),
            _ => self.to,
        }
    }
}
