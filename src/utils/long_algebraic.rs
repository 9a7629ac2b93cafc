//! Coordinate move text (`e2e4`, `e7e8q`) to `Move`.
//!
//! The text alone does not say whether a move captures, castles or takes en
//! passant, so the position is consulted to fill those in. Whether the
//! result is actually playable is left to `is_valid_move`.

use crate::chess_errors::{ChessError, ChessResult};
use crate::game_state::chess_types::*;
use crate::moves::chess_move::Move;
use crate::utils::algebraic::algebraic_to_position;

pub fn parse_long_algebraic(long_algebraic: &str, game_state: &GameState) -> ChessResult<Move> {
    let illegal = |reason: &str| ChessError::IllegalMove(format!("{long_algebraic}: {reason}"));

    if !long_algebraic.is_ascii() || (long_algebraic.len() != 4 && long_algebraic.len() != 5) {
        return Err(illegal("expected four or five characters"));
    }

    let from = algebraic_to_position(&long_algebraic[0..2])?;
    let to = algebraic_to_position(&long_algebraic[2..4])?;

    let piece = game_state
        .board()
        .piece_at(from)
        .ok_or_else(|| illegal("no piece on the from-square"))?;
    if piece.color != game_state.whose_turn() {
        return Err(illegal("piece does not belong to the side to move"));
    }

    let back_row = piece.color.back_row();
    if piece.kind == PieceKind::King
        && from == Position::new(back_row, KING_START_COL)
        && to.row == back_row
        && (to.col - from.col).abs() == 2
    {
        let side = if to.col > from.col {
            CastleSide::Kingside
        } else {
            CastleSide::Queenside
        };
        return Ok(Move::castle(piece.color, side));
    }

    let capture = game_state.board().is_occupied_by(to, piece.color.opposite());

    if piece.kind == PieceKind::Pawn
        && !capture
        && from.col != to.col
        && game_state.en_passant() == Some(to)
    {
        return Ok(Move::en_passant(from, to));
    }

    let reaches_last_row =
        piece.kind == PieceKind::Pawn && to.row == piece.color.opposite().back_row();

    match long_algebraic.chars().nth(4) {
        Some(ch) => {
            if !reaches_last_row {
                return Err(illegal("only a pawn reaching the last row may promote"));
            }
            let kind = PieceKind::from_letter(ch)
                .filter(|kind| kind.is_promotion_target())
                .ok_or_else(|| illegal("invalid promotion piece"))?;
            Ok(Move::promotion(from, to, capture, kind))
        }
        None if reaches_last_row => Err(illegal("missing promotion piece")),
        None => Ok(Move::normal(from, to, capture)),
    }
}

#[cfg(test)]
mod tests {
    use super::parse_long_algebraic;
    use crate::chess_errors::ChessError;
    use crate::game_state::chess_types::*;
    use crate::moves::chess_move::{Move, MoveKind};
    use crate::moves::notation::NotationStyle;
    use crate::utils::fen_parser::parse_fen;

    #[test]
    fn plain_and_capturing_moves() {
        let game_state = parse_fen("4k3/8/8/3p4/4P3/8/8/4K3 w - - 0 1").expect("FEN should parse");
        let push = parse_long_algebraic("e4e5", &game_state).expect("move should parse");
        assert_eq!(push, Move::normal(Position::new(3, 4), Position::new(4, 4), false));

        let capture = parse_long_algebraic("e4d5", &game_state).expect("move should parse");
        assert!(capture.capture);
        let piece = Piece::new(PieceKind::Pawn, Color::Light);
        assert_eq!(capture.notation(NotationStyle::Uci, piece), "e4d5");
    }

    #[test]
    fn promotion_suffix_is_required_on_the_last_row() {
        let game_state = parse_fen("8/P7/8/8/8/8/8/k6K w - - 0 1").expect("FEN should parse");
        let mv = parse_long_algebraic("a7a8n", &game_state).expect("move should parse");
        assert_eq!(mv.kind, MoveKind::Promotion(PieceKind::Knight));
        assert!(parse_long_algebraic("a7a8", &game_state).is_err());
        assert!(parse_long_algebraic("a7a8k", &game_state).is_err());
        assert!(parse_long_algebraic("h1h2q", &game_state).is_err());
    }

    #[test]
    fn detects_castling_and_en_passant() {
        let castle_state =
            parse_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").expect("FEN should parse");
        let castle = parse_long_algebraic("e1c1", &castle_state).expect("castle should parse");
        assert_eq!(castle, Move::castle(Color::Light, CastleSide::Queenside));

        let en_passant_state =
            parse_fen("4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 1").expect("FEN should parse");
        let ep = parse_long_algebraic("e5d6", &en_passant_state).expect("en passant should parse");
        assert_eq!(ep.kind, MoveKind::EnPassant);
    }

    #[test]
    fn rejects_null_moves_and_wrong_side() {
        let game_state = GameState::new_game();
        assert!(matches!(
            parse_long_algebraic("0000", &game_state),
            Err(ChessError::InvalidAlgebraic(_))
        ));
        assert!(matches!(
            parse_long_algebraic("e7e5", &game_state),
            Err(ChessError::IllegalMove(_))
        ));
        assert!(parse_long_algebraic("e3e4", &game_state).is_err());
    }
}
