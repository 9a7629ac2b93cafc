//! Rook move rules.

use crate::game_state::chess_types::*;
use crate::moves::chess_move::Move;
use crate::moves::move_shared::{is_valid_span_move, visit_span_moves, ORTHOGONAL_DIRECTIONS};

pub fn visit_rook_moves(
    state: &GameState,
    from: Position,
    piece: Piece,
    visit: &mut dyn FnMut(Move),
) {
    visit_span_moves(state.board(), from, piece.color, &ORTHOGONAL_DIRECTIONS, visit);
}

pub fn is_valid_rook_move(state: &GameState, piece: Piece, mv: &Move) -> bool {
    is_valid_span_move(state.board(), mv, piece.color, &ORTHOGONAL_DIRECTIONS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::moves::move_rules::generate_possible_moves;

    #[test]
    fn rook_on_open_board_reaches_fourteen_squares() {
        let state = GameState::from_fen("8/8/8/8/3R4/8/8/8 w - - 0 1").expect("FEN should parse");
        let moves = generate_possible_moves(&state, Position::new(3, 3));
        assert_eq!(moves.len(), 14);
        assert!(moves
            .iter()
            .all(|mv| mv.to.row == 3 || mv.to.col == 3));
    }

    #[test]
    fn rook_blocker_stops_ray() {
        let state = GameState::from_fen("8/8/8/8/p7/8/8/R7 w - - 0 1").expect("FEN should parse");
        let moves = generate_possible_moves(&state, Position::new(0, 0));
        assert!(moves.contains(&Move::normal(Position::new(0, 0), Position::new(3, 0), true)));
        assert!(!moves.iter().any(|mv| mv.to == Position::new(4, 0)));
    }
}
