//! King move rules: one step in any direction plus castling.
//!
//! Castling needs intact rights, king and rook on their home squares, empty
//! squares between them and a king that is not in check. Squares the king
//! crosses are not tested for attacks.

use crate::game_state::chess_types::*;
use crate::moves::chess_move::{Move, MoveKind};
use crate::moves::move_shared::{is_valid_step_move, visit_step_moves, ALL_DIRECTIONS};

pub const KING_OFFSETS: [(i8, i8); 8] = ALL_DIRECTIONS;

pub fn visit_king_moves(
    state: &GameState,
    from: Position,
    piece: Piece,
    visit: &mut dyn FnMut(Move),
) {
    visit_step_moves(state.board(), from, piece.color, &KING_OFFSETS, visit);

    if king_in_check(state, piece.color) {
        return;
    }
    for side in [CastleSide::Kingside, CastleSide::Queenside] {
        let castle = Move::castle(piece.color, side);
        if castle.from == from && state.castle_is_allowed(piece.color, side) {
            visit(castle);
        }
    }
}

pub fn is_valid_king_move(state: &GameState, piece: Piece, mv: &Move) -> bool {
    match mv.kind {
        MoveKind::KingsideCastle | MoveKind::QueensideCastle => {
            let Some(side) = mv.castle_side() else {
                return false;
            };
            *mv == Move::castle(piece.color, side)
                && state.castle_is_allowed(piece.color, side)
                && !king_in_check(state, piece.color)
        }
        _ => is_valid_step_move(state.board(), mv, piece.color, &KING_OFFSETS),
    }
}

fn king_in_check(state: &GameState, color: Color) -> bool {
    if color == state.whose_turn() {
        state.in_check()
    } else {
        state.side_in_check(color)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::moves::move_rules::generate_possible_moves;

    fn lone_king(row: i8, col: i8) -> GameState {
        let fen_board = {
            let mut board = crate::game_state::board::Board::empty();
            board.place(Position::new(row, col), Piece::new(PieceKind::King, Color::Light));
            board.fen_placement()
        };
        GameState::from_fen(&format!("{fen_board} w - - 0 1")).expect("FEN should parse")
    }

    #[test]
    fn lone_king_reaches_every_adjacent_square() {
        for from in Position::all() {
            let state = lone_king(from.row, from.col);
            let mut targets: Vec<Position> = generate_possible_moves(&state, from)
                .into_iter()
                .map(|mv| mv.to)
                .collect();
            targets.sort_by_key(|pos| pos.index());

            let mut expected: Vec<Position> = KING_OFFSETS
                .iter()
                .map(|&(r, c)| from.offset(r, c))
                .filter(|pos| pos.is_valid())
                .collect();
            expected.sort_by_key(|pos| pos.index());

            assert_eq!(targets, expected, "king on {from}");
        }
    }

    #[test]
    fn castling_requires_empty_span_and_no_check() {
        let open = GameState::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1")
            .expect("FEN should parse");
        let moves = generate_possible_moves(&open, Position::new(0, 4));
        assert!(moves.contains(&Move::castle(Color::Light, CastleSide::Kingside)));
        assert!(moves.contains(&Move::castle(Color::Light, CastleSide::Queenside)));

        let blocked = GameState::from_fen("r3k2r/8/8/8/8/8/8/RN2K1NR w KQkq - 0 1")
            .expect("FEN should parse");
        let moves = generate_possible_moves(&blocked, Position::new(0, 4));
        assert!(!moves.iter().any(|mv| mv.castle_side().is_some()));

        let checked = GameState::from_fen("r3k2r/8/8/8/8/8/4r3/R3K2R w KQkq - 0 1")
            .expect("FEN should parse");
        assert!(checked.in_check());
        let moves = generate_possible_moves(&checked, Position::new(0, 4));
        assert!(!moves.iter().any(|mv| mv.castle_side().is_some()));
    }

    #[test]
    fn castling_through_an_attacked_square_is_not_detected() {
        // The f1 square is covered by the f8 rook, yet kingside castling is offered.
        let state = GameState::from_fen("4kr2/8/8/8/8/8/8/4K2R w K - 0 1")
            .expect("FEN should parse");
        let castle = Move::castle(Color::Light, CastleSide::Kingside);
        let piece = Piece::new(PieceKind::King, Color::Light);
        assert!(is_valid_king_move(&state, piece, &castle));
    }
}
