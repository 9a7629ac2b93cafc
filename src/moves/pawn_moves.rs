//! Pawn move rules.
//!
//! Single and double pushes, diagonal captures, en passant against a pawn that
//! just double-stepped beside this one, and promotion on the last row. The
//! generator only ever promotes to a queen; a requested move may name any
//! promotion piece.

use crate::game_state::chess_types::*;
use crate::moves::chess_move::{Move, MoveKind};

pub fn visit_pawn_moves(
    state: &GameState,
    from: Position,
    piece: Piece,
    visit: &mut dyn FnMut(Move),
) {
    let board = state.board();
    let color = piece.color;
    let forward = color.forward();
    let last_row = color.opposite().back_row();

    let mut emit = |to: Position, capture: bool| {
        if to.row == last_row {
            visit(Move::promotion(from, to, capture, PieceKind::Queen));
        } else {
            visit(Move::normal(from, to, capture));
        }
    };

    let one = from.offset(forward, 0);
    if board.is_empty_at(one) {
        emit(one, false);
        let two = from.offset(2 * forward, 0);
        if from.row == start_row(color) && board.is_empty_at(two) {
            emit(two, false);
        }
    }

    for d_col in [-1, 1] {
        let to = from.offset(forward, d_col);
        if board.is_occupied_by(to, color.opposite()) {
            emit(to, true);
        }
    }

    if let Some(target) = en_passant_target_for(state, from, color) {
        visit(Move::en_passant(from, target));
    }
}

pub fn is_valid_pawn_move(state: &GameState, piece: Piece, mv: &Move) -> bool {
    let board = state.board();
    let color = piece.color;
    let forward = color.forward();
    let d_row = mv.to.row - mv.from.row;
    let d_col = mv.to.col - mv.from.col;

    if mv.kind == MoveKind::EnPassant {
        return en_passant_target_for(state, mv.from, color) == Some(mv.to);
    }

    let reaches_last_row = mv.to.row == color.opposite().back_row();
    let shape_ok = match mv.kind {
        MoveKind::Normal => !reaches_last_row,
        MoveKind::Promotion(kind) => reaches_last_row && kind.is_promotion_target(),
        _ => false,
    };
    if !shape_ok {
        return false;
    }

    if d_col == 0 {
        let one = mv.from.offset(forward, 0);
        if mv.capture || !board.is_empty_at(one) {
            return false;
        }
        d_row == forward
            || (d_row == 2 * forward
                && mv.from.row == start_row(color)
                && board.is_empty_at(mv.to))
    } else {
        d_row == forward
            && d_col.abs() == 1
            && mv.capture
            && board.is_occupied_by(mv.to, color.opposite())
    }
}

#[inline]
const fn start_row(color: Color) -> i8 {
    color.back_row() + color.forward()
}

/// En-passant landing square for a pawn on `from`, if the previous move was
/// a double step that ended right beside it.
fn en_passant_target_for(state: &GameState, from: Position, color: Color) -> Option<Position> {
    let target = state.en_passant()?;
    let enemy_pawn = Position::new(from.row, target.col);
    let lands_behind = target.row == from.row + color.forward() && (target.col - from.col).abs() == 1;
    let pawn_beside = state.board().piece_at(enemy_pawn)
        == Some(Piece::new(PieceKind::Pawn, color.opposite()));
    (lands_behind && pawn_beside && state.board().is_empty_at(target)).then_some(target)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::moves::move_rules::{generate_possible_moves, is_valid_move};

    #[test]
    fn pawn_on_start_row_pushes_one_or_two() {
        let state = GameState::new_game();
        let moves = generate_possible_moves(&state, Position::new(1, 4));
        assert_eq!(
            moves,
            vec![
                Move::normal(Position::new(1, 4), Position::new(2, 4), false),
                Move::normal(Position::new(1, 4), Position::new(3, 4), false),
            ]
        );
    }

    #[test]
    fn dark_pawns_move_down_the_board() {
        let state = GameState::from_fen("4k3/3p4/2P5/8/8/8/8/4K3 b - - 0 1")
            .expect("FEN should parse");
        let moves = generate_possible_moves(&state, Position::new(6, 3));
        assert_eq!(moves.len(), 3);
        assert!(moves.contains(&Move::normal(Position::new(6, 3), Position::new(5, 2), true)));
        assert!(moves.contains(&Move::normal(Position::new(6, 3), Position::new(4, 3), false)));
    }

    #[test]
    fn blocked_pawn_cannot_jump() {
        let state = GameState::from_fen("4k3/8/8/8/8/4n3/4P3/4K3 w - - 0 1")
            .expect("FEN should parse");
        assert!(generate_possible_moves(&state, Position::new(1, 4)).is_empty());
    }

    #[test]
    fn en_passant_only_right_after_the_double_step() {
        let state = GameState::from_fen("4k3/3p4/8/4P3/8/8/8/4K3 b - - 0 1")
            .expect("FEN should parse");
        let after_double = state.apply_move(&Move::normal(Position::new(6, 3), Position::new(4, 3), false));
        let moves = generate_possible_moves(&after_double, Position::new(4, 4));
        let ep = Move::en_passant(Position::new(4, 4), Position::new(5, 3));
        assert!(moves.contains(&ep));
        assert!(is_valid_move(&after_double, &ep));

        let later = after_double
            .apply_move(&Move::normal(Position::new(0, 4), Position::new(0, 3), false))
            .apply_move(&Move::normal(Position::new(7, 4), Position::new(7, 3), false));
        assert!(!generate_possible_moves(&later, Position::new(4, 4)).contains(&ep));
        assert!(!is_valid_move(&later, &ep));
    }

    #[test]
    fn generator_promotes_to_queen_but_requests_may_underpromote() {
        let state = GameState::from_fen("4k3/P7/8/8/8/8/8/4K3 w - - 0 1").expect("FEN should parse");
        let from = Position::new(6, 0);
        let to = Position::new(7, 0);
        assert_eq!(
            generate_possible_moves(&state, from),
            vec![Move::promotion(from, to, false, PieceKind::Queen)]
        );
        assert!(is_valid_move(&state, &Move::promotion(from, to, false, PieceKind::Knight)));
        assert!(!is_valid_move(&state, &Move::promotion(from, to, false, PieceKind::King)));
        assert!(!is_valid_move(&state, &Move::normal(from, to, false)));
    }
}
