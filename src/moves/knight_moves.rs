//! Knight move rules.

use crate::game_state::chess_types::*;
use crate::moves::chess_move::Move;
use crate::moves::move_shared::{is_valid_step_move, visit_step_moves};

pub const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (2, 1),
    (1, 2),
    (-1, 2),
    (-2, 1),
    (-2, -1),
    (-1, -2),
    (1, -2),
    (2, -1),
];

pub fn visit_knight_moves(
    state: &GameState,
    from: Position,
    piece: Piece,
    visit: &mut dyn FnMut(Move),
) {
    visit_step_moves(state.board(), from, piece.color, &KNIGHT_OFFSETS, visit);
}

pub fn is_valid_knight_move(state: &GameState, piece: Piece, mv: &Move) -> bool {
    is_valid_step_move(state.board(), mv, piece.color, &KNIGHT_OFFSETS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::moves::move_rules::{count_possible_moves, generate_possible_moves};

    #[test]
    fn knight_counts_shrink_towards_corners() {
        let state = GameState::from_fen("4k3/8/8/8/3N4/8/8/N3K3 w - - 0 1")
            .expect("FEN should parse");
        assert_eq!(count_possible_moves(&state, Position::new(3, 3)), 8);
        assert_eq!(count_possible_moves(&state, Position::new(0, 0)), 2);
    }

    #[test]
    fn knight_skips_own_pieces_and_captures_enemies() {
        let state = GameState::from_fen("4k3/8/8/8/8/2p5/3P4/1N2K3 w - - 0 1")
            .expect("FEN should parse");
        let moves = generate_possible_moves(&state, Position::new(0, 1));
        assert_eq!(moves.len(), 2);
        assert!(moves.contains(&Move::normal(Position::new(0, 1), Position::new(2, 2), true)));
        assert!(moves.contains(&Move::normal(Position::new(0, 1), Position::new(2, 0), false)));
    }
}
