//! Move formatting.
//!
//! Purely presentational: every style is a function of the move and the
//! piece that makes it. Check and mate suffixes and SAN disambiguation need
//! the surrounding position and are not produced here.

use crate::game_state::chess_types::*;
use crate::moves::chess_move::{Move, MoveKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotationStyle {
    /// Short algebraic with an `e.p.` marker: `Nf3`, `exd6 e.p.`, `e8=Q`.
    Standard,
    /// Both squares spelled out: `Ng1-f3`, `e5xd6`.
    Long,
    /// Short algebraic as used in PGN movetext; resignations become results.
    Pgn,
    /// Standard with figurine glyphs in place of piece letters.
    Figurine,
    /// ICCF numeric: file and rank digits, promotion digit 1=Q 2=R 3=B 4=N.
    Iccf,
    /// UCI coordinate notation: `e2e4`, `e7e8q`, `0000`.
    Uci,
}

impl Move {
    pub fn notation(&self, style: NotationStyle, piece: Piece) -> String {
        match style {
            NotationStyle::Standard => short_algebraic(self, piece, letter, true),
            NotationStyle::Pgn => short_algebraic(self, piece, letter, false),
            NotationStyle::Figurine => short_algebraic(self, piece, figurine, true),
            NotationStyle::Long => long_algebraic(self, piece),
            NotationStyle::Iccf => iccf(self),
            NotationStyle::Uci => uci(self),
        }
    }
}

fn letter(piece: Piece) -> String {
    piece.kind.letter().to_ascii_uppercase().to_string()
}

fn figurine(piece: Piece) -> String {
    let glyph = match (piece.color, piece.kind) {
        (Color::Light, PieceKind::King) => '♔',
        (Color::Light, PieceKind::Queen) => '♕',
        (Color::Light, PieceKind::Rook) => '♖',
        (Color::Light, PieceKind::Bishop) => '♗',
        (Color::Light, PieceKind::Knight) => '♘',
        (Color::Light, PieceKind::Pawn) => '♙',
        (Color::Dark, PieceKind::King) => '♚',
        (Color::Dark, PieceKind::Queen) => '♛',
        (Color::Dark, PieceKind::Rook) => '♜',
        (Color::Dark, PieceKind::Bishop) => '♝',
        (Color::Dark, PieceKind::Knight) => '♞',
        (Color::Dark, PieceKind::Pawn) => '♟',
    };
    glyph.to_string()
}

fn null_text(mv: &Move, as_result: bool) -> Option<String> {
    let text = match mv.kind {
        MoveKind::Resign(Color::Light) if as_result => "0-1",
        MoveKind::Resign(Color::Dark) if as_result => "1-0",
        MoveKind::Undo | MoveKind::Reset if as_result => "*",
        MoveKind::Resign(_) => "resigns",
        MoveKind::Undo => "undo",
        MoveKind::Reset => "reset",
        _ => return None,
    };
    Some(text.to_owned())
}

fn castle_text(mv: &Move) -> Option<String> {
    mv.castle_side().map(|side| {
        match side {
            CastleSide::Kingside => "O-O",
            CastleSide::Queenside => "O-O-O",
        }
        .to_owned()
    })
}

fn short_algebraic(
    mv: &Move,
    piece: Piece,
    piece_text: fn(Piece) -> String,
    mark_en_passant: bool,
) -> String {
    if let Some(text) = null_text(mv, !mark_en_passant).or_else(|| castle_text(mv)) {
        return text;
    }

    let mut out = String::new();
    if piece.kind == PieceKind::Pawn {
        if mv.capture {
            out.push(file_char(mv.from));
        }
    } else {
        out.push_str(&piece_text(piece));
    }
    if mv.capture {
        out.push('x');
    }
    out.push_str(&mv.to.to_string());
    if let Some(promoted) = mv.promotion_piece() {
        out.push('=');
        out.push_str(&piece_text(Piece::new(promoted, piece.color)));
    }
    if mark_en_passant && mv.kind == MoveKind::EnPassant {
        out.push_str(" e.p.");
    }
    out
}

fn long_algebraic(mv: &Move, piece: Piece) -> String {
    if let Some(text) = null_text(mv, false).or_else(|| castle_text(mv)) {
        return text;
    }

    let mut out = String::new();
    if piece.kind != PieceKind::Pawn {
        out.push_str(&letter(piece));
    }
    out.push_str(&mv.from.to_string());
    out.push(if mv.capture { 'x' } else { '-' });
    out.push_str(&mv.to.to_string());
    if let Some(promoted) = mv.promotion_piece() {
        out.push('=');
        out.push_str(&letter(Piece::new(promoted, piece.color)));
    }
    out
}

fn iccf(mv: &Move) -> String {
    if let Some(text) = null_text(mv, false) {
        return text;
    }
    let digit = |value: i8| char::from(b'1' + value as u8);
    let mut out = String::with_capacity(5);
    out.push(digit(mv.from.col));
    out.push(digit(mv.from.row));
    out.push(digit(mv.to.col));
    out.push(digit(mv.to.row));
    if let Some(promoted) = mv.promotion_piece() {
        out.push(match promoted {
            PieceKind::Rook => '2',
            PieceKind::Bishop => '3',
            PieceKind::Knight => '4',
            _ => '1',
        });
    }
    out
}

fn uci(mv: &Move) -> String {
    if mv.is_null() {
        return "0000".to_owned();
    }
    let mut out = format!("{}{}", mv.from, mv.to);
    if let Some(promoted) = mv.promotion_piece() {
        out.push(promoted.letter());
    }
    out
}

fn file_char(pos: Position) -> char {
    char::from(b'a' + pos.col as u8)
}
