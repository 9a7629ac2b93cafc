//! Queen move rules: rook and bishop spans combined.

use crate::game_state::chess_types::*;
use crate::moves::chess_move::Move;
use crate::moves::move_shared::{is_valid_span_move, visit_span_moves, ALL_DIRECTIONS};

pub fn visit_queen_moves(
    state: &GameState,
    from: Position,
    piece: Piece,
    visit: &mut dyn FnMut(Move),
) {
    visit_span_moves(state.board(), from, piece.color, &ALL_DIRECTIONS, visit);
}

pub fn is_valid_queen_move(state: &GameState, piece: Piece, mv: &Move) -> bool {
    is_valid_span_move(state.board(), mv, piece.color, &ALL_DIRECTIONS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::moves::move_rules::generate_possible_moves;

    #[test]
    fn queen_from_corner_reaches_twenty_one_squares() {
        let state = GameState::from_fen("8/8/8/8/8/8/8/Q7 w - - 0 1").expect("FEN should parse");
        assert_eq!(generate_possible_moves(&state, Position::new(0, 0)).len(), 21);
    }

    #[test]
    fn queen_on_d4_reaches_twenty_seven_squares() {
        let state = GameState::from_fen("8/8/8/8/3Q4/8/8/8 w - - 0 1").expect("FEN should parse");
        assert_eq!(generate_possible_moves(&state, Position::new(3, 3)).len(), 27);
    }
}
