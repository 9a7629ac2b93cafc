//! Bishop move rules.

use crate::game_state::chess_types::*;
use crate::moves::chess_move::Move;
use crate::moves::move_shared::{is_valid_span_move, visit_span_moves, DIAGONAL_DIRECTIONS};

pub fn visit_bishop_moves(
    state: &GameState,
    from: Position,
    piece: Piece,
    visit: &mut dyn FnMut(Move),
) {
    visit_span_moves(state.board(), from, piece.color, &DIAGONAL_DIRECTIONS, visit);
}

pub fn is_valid_bishop_move(state: &GameState, piece: Piece, mv: &Move) -> bool {
    is_valid_span_move(state.board(), mv, piece.color, &DIAGONAL_DIRECTIONS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::moves::move_rules::generate_possible_moves;

    #[test]
    fn bishop_on_d4_reaches_thirteen_squares() {
        let state = GameState::from_fen("8/8/8/8/3B4/8/8/8 w - - 0 1").expect("FEN should parse");
        let from = Position::new(3, 3);
        let moves = generate_possible_moves(&state, from);
        assert_eq!(moves.len(), 13);
        assert!(moves
            .iter()
            .all(|mv| (mv.to.row - from.row).abs() == (mv.to.col - from.col).abs()));
    }
}
