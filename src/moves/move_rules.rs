//! Per-piece move rules behind one dispatch table.
//!
//! Each piece kind contributes a visitor that enumerates its pseudo-legal
//! moves and a predicate that re-checks a single move. Generation, counting
//! and threat counting all run through the same visitor, so the three can
//! never disagree. Moves that leave the mover's own king attacked are not
//! filtered out.

use crate::game_state::chess_types::*;
use crate::moves::bishop_moves::{is_valid_bishop_move, visit_bishop_moves};
use crate::moves::chess_move::Move;
use crate::moves::king_moves::{is_valid_king_move, visit_king_moves};
use crate::moves::knight_moves::{is_valid_knight_move, visit_knight_moves};
use crate::moves::pawn_moves::{is_valid_pawn_move, visit_pawn_moves};
use crate::moves::queen_moves::{is_valid_queen_move, visit_queen_moves};
use crate::moves::rook_moves::{is_valid_rook_move, visit_rook_moves};

pub type MoveVisitor = fn(&GameState, Position, Piece, &mut dyn FnMut(Move));
pub type MovePredicate = fn(&GameState, Piece, &Move) -> bool;

pub struct MoveRules {
    pub kind: PieceKind,
    /// Capacity hint for one piece's move list.
    pub max_moves: usize,
    pub visit: MoveVisitor,
    pub is_valid: MovePredicate,
}

/// Indexed by `PieceKind::index()`.
pub const MOVE_RULES: [MoveRules; 6] = [
    MoveRules {
        kind: PieceKind::Pawn,
        max_moves: 4,
        visit: visit_pawn_moves,
        is_valid: is_valid_pawn_move,
    },
    MoveRules {
        kind: PieceKind::Knight,
        max_moves: 8,
        visit: visit_knight_moves,
        is_valid: is_valid_knight_move,
    },
    MoveRules {
        kind: PieceKind::Bishop,
        max_moves: 13,
        visit: visit_bishop_moves,
        is_valid: is_valid_bishop_move,
    },
    MoveRules {
        kind: PieceKind::Rook,
        max_moves: 14,
        visit: visit_rook_moves,
        is_valid: is_valid_rook_move,
    },
    MoveRules {
        kind: PieceKind::Queen,
        max_moves: 27,
        visit: visit_queen_moves,
        is_valid: is_valid_queen_move,
    },
    MoveRules {
        kind: PieceKind::King,
        max_moves: 10,
        visit: visit_king_moves,
        is_valid: is_valid_king_move,
    },
];

#[inline]
pub fn rules_for(kind: PieceKind) -> &'static MoveRules {
    &MOVE_RULES[kind.index()]
}

fn piece_on(state: &GameState, from: Position) -> Piece {
    match state.board().piece_at(from) {
        Some(piece) => piece,
        None => panic!("move rules asked about empty square {from}"),
    }
}

/// Visit every pseudo-legal move of the piece on `from`.
///
/// # Panics
/// If `from` holds no piece.
pub fn visit_possible_moves(state: &GameState, from: Position, visit: &mut dyn FnMut(Move)) {
    let piece = piece_on(state, from);
    (rules_for(piece.kind).visit)(state, from, piece, visit);
}

pub fn append_possible_moves(state: &GameState, from: Position, out: &mut Vec<Move>) {
    visit_possible_moves(state, from, &mut |mv| out.push(mv));
}

pub fn generate_possible_moves(state: &GameState, from: Position) -> Vec<Move> {
    let piece = piece_on(state, from);
    let mut out = Vec::with_capacity(rules_for(piece.kind).max_moves);
    append_possible_moves(state, from, &mut out);
    out
}

pub fn count_possible_moves(state: &GameState, from: Position) -> usize {
    let mut count = 0;
    visit_possible_moves(state, from, &mut |_| count += 1);
    count
}

/// Number of enemy pieces the piece on `from` could capture.
pub fn count_threats(state: &GameState, from: Position) -> usize {
    let mut count = 0;
    visit_possible_moves(state, from, &mut |mv| {
        if mv.capture {
            count += 1;
        }
    });
    count
}

/// Whether `mv` is a pseudo-legal move for the side to move.
///
/// Unlike the generator this accepts any promotion piece, which is what
/// input validation needs.
pub fn is_valid_move(state: &GameState, mv: &Move) -> bool {
    if mv.is_null() || !mv.from.is_valid() || !mv.to.is_valid() {
        return false;
    }
    let Some(piece) = state.board().piece_at(mv.from) else {
        return false;
    };
    if piece.color != state.whose_turn() {
        return false;
    }
    (rules_for(piece.kind).is_valid)(state, piece, mv)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_is_indexed_by_piece_kind() {
        for kind in PieceKind::ALL {
            assert_eq!(rules_for(kind).kind, kind);
        }
    }

    #[test]
    fn starting_position_has_twenty_moves() {
        let state = GameState::new_game();
        assert_eq!(state.generate_moves().len(), 20);
    }

    #[test]
    fn counters_agree_with_generation() {
        let state = GameState::from_fen(
            "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
        )
        .expect("FEN should parse");
        for (pos, _) in state.board().pieces() {
            let moves = generate_possible_moves(&state, pos);
            assert_eq!(count_possible_moves(&state, pos), moves.len(), "on {pos}");
            assert_eq!(
                count_threats(&state, pos),
                moves.iter().filter(|mv| mv.capture).count(),
                "on {pos}"
            );
        }
    }

    #[test]
    fn every_generated_move_validates() {
        let state = GameState::from_fen(
            "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
        )
        .expect("FEN should parse");
        let moves = state.generate_moves();
        assert_eq!(moves.len(), 48);
        for mv in &moves {
            assert!(is_valid_move(&state, mv), "{mv:?}");
        }
    }

    #[test]
    fn validation_rejects_wrong_side_and_bad_geometry() {
        let state = GameState::new_game();
        let dark_push = Move::normal(Position::new(6, 4), Position::new(4, 4), false);
        let knight_straight = Move::normal(Position::new(0, 1), Position::new(2, 1), false);
        let fake_capture = Move::normal(Position::new(1, 4), Position::new(2, 4), true);
        assert!(!is_valid_move(&state, &dark_push));
        assert!(!is_valid_move(&state, &knight_straight));
        assert!(!is_valid_move(&state, &fake_capture));
        assert!(!is_valid_move(&state, &Move::resign(Color::Light)));
        assert!(is_valid_move(
            &state,
            &Move::normal(Position::new(0, 6), Position::new(2, 5), false)
        ));
    }

    #[test]
    #[should_panic(expected = "empty square")]
    fn generating_from_an_empty_square_panics() {
        let state = GameState::new_game();
        let _ = generate_possible_moves(&state, Position::new(3, 3));
    }
}
