//! Passive 8x8 mailbox board.
//!
//! The board knows where pieces stand and answers occupancy questions. It does
//! not enforce any chess rule; that is the job of the move rules and
//! `GameState`.

use std::fmt;

use crate::chess_errors::ChessResult;
use crate::game_state::chess_types::*;
use crate::utils::fen_generator::generate_board_field;
use crate::utils::fen_parser::parse_board;

const BACK_RANK: [PieceKind; 8] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Board {
    cells: [[Option<Piece>; 8]; 8],
}

impl Board {
    #[inline]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Standard starting arrangement.
    pub fn standard() -> Self {
        let mut board = Self::empty();
        for col in 0..8i8 {
            let kind = BACK_RANK[col as usize];
            board.place(Position::new(0, col), Piece::new(kind, Color::Light));
            board.place(Position::new(1, col), Piece::new(PieceKind::Pawn, Color::Light));
            board.place(Position::new(6, col), Piece::new(PieceKind::Pawn, Color::Dark));
            board.place(Position::new(7, col), Piece::new(kind, Color::Dark));
        }
        board
    }

    /// Build a board from the first field of a FEN record.
    #[inline]
    pub fn from_fen_placement(placement: &str) -> ChessResult<Self> {
        parse_board(placement)
    }

    /// First field of a FEN record for this board.
    #[inline]
    pub fn fen_placement(&self) -> String {
        generate_board_field(self)
    }

    #[inline]
    pub const fn is_valid_position(pos: Position) -> bool {
        pos.is_valid()
    }

    /// Piece on `pos`, or `None` when the square is empty or off the board.
    #[inline]
    pub fn piece_at(&self, pos: Position) -> Option<Piece> {
        if !pos.is_valid() {
            return None;
        }
        self.cells[pos.row as usize][pos.col as usize]
    }

    #[inline]
    pub fn is_empty_at(&self, pos: Position) -> bool {
        pos.is_valid() && self.piece_at(pos).is_none()
    }

    #[inline]
    pub fn is_occupied_by(&self, pos: Position, color: Color) -> bool {
        matches!(self.piece_at(pos), Some(piece) if piece.color == color)
    }

    /// Overwrite a square.
    ///
    /// # Panics
    /// If `pos` is off the board.
    #[inline]
    pub fn set(&mut self, pos: Position, piece: Option<Piece>) {
        assert!(pos.is_valid(), "set on off-board position {pos:?}");
        self.cells[pos.row as usize][pos.col as usize] = piece;
    }

    #[inline]
    pub fn place(&mut self, pos: Position, piece: Piece) {
        self.set(pos, Some(piece));
    }

    /// Empty a square, returning what stood there.
    #[inline]
    pub fn take(&mut self, pos: Position) -> Option<Piece> {
        let piece = self.piece_at(pos);
        self.set(pos, None);
        piece
    }

    /// True when every square strictly between `from` and `to` is empty.
    ///
    /// Returns `false` if the two squares do not share a row, column or
    /// diagonal.
    pub fn span_is_empty(&self, from: Position, to: Position) -> bool {
        let d_row = to.row - from.row;
        let d_col = to.col - from.col;
        let aligned = d_row == 0 || d_col == 0 || d_row.abs() == d_col.abs();
        if !aligned || (d_row == 0 && d_col == 0) {
            return false;
        }

        let step = (d_row.signum(), d_col.signum());
        let mut pos = from.offset(step.0, step.1);
        while pos != to {
            if !self.is_empty_at(pos) {
                return false;
            }
            pos = pos.offset(step.0, step.1);
        }
        true
    }

    /// Occupied squares in row-major order.
    pub fn pieces(&self) -> impl Iterator<Item = (Position, Piece)> + '_ {
        Position::all().filter_map(move |pos| self.piece_at(pos).map(|piece| (pos, piece)))
    }

    pub fn find_king(&self, color: Color) -> Option<Position> {
        let king = Piece::new(PieceKind::King, color);
        self.pieces()
            .find(|&(_, piece)| piece == king)
            .map(|(pos, _)| pos)
    }

    pub fn count(&self, piece: Piece) -> usize {
        self.pieces().filter(|&(_, p)| p == piece).count()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "  a b c d e f g h")?;
        for row in (0..8i8).rev() {
            write!(f, "{} ", row + 1)?;
            for col in 0..8i8 {
                let ch = self
                    .piece_at(Position::new(row, col))
                    .map_or('.', Piece::fen_char);
                write!(f, "{ch}")?;
                if col < 7 {
                    f.write_str(" ")?;
                }
            }
            writeln!(f, " {}", row + 1)?;
        }
        write!(f, "  a b c d e f g h")
    }
}
