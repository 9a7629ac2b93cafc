//! Square attack detection used for the check flag.
//!
//! Works backwards from the target square: look one knight or king step away
//! for a matching piece, along rays for sliders, and at the two squares a pawn
//! would attack from.

use crate::game_state::board::Board;
use crate::game_state::chess_types::*;
use crate::moves::king_moves::KING_OFFSETS;
use crate::moves::knight_moves::KNIGHT_OFFSETS;
use crate::moves::move_shared::{DIAGONAL_DIRECTIONS, ORTHOGONAL_DIRECTIONS};

pub fn is_square_attacked(board: &Board, target: Position, attacker: Color) -> bool {
    let is_attacker = |pos: Position, kind: PieceKind| {
        board.piece_at(pos) == Some(Piece::new(kind, attacker))
    };

    // A pawn attacks diagonally forward, so look diagonally backward.
    let pawn_row = -attacker.forward();
    if [-1, 1]
        .iter()
        .any(|&d_col| is_attacker(target.offset(pawn_row, d_col), PieceKind::Pawn))
    {
        return true;
    }

    if KNIGHT_OFFSETS
        .iter()
        .any(|&(r, c)| is_attacker(target.offset(r, c), PieceKind::Knight))
    {
        return true;
    }

    if KING_OFFSETS
        .iter()
        .any(|&(r, c)| is_attacker(target.offset(r, c), PieceKind::King))
    {
        return true;
    }

    ray_hits(board, target, attacker, &ORTHOGONAL_DIRECTIONS, PieceKind::Rook)
        || ray_hits(board, target, attacker, &DIAGONAL_DIRECTIONS, PieceKind::Bishop)
}

/// First piece met along any ray is an `attacker` slider of `kind` or a queen.
fn ray_hits(
    board: &Board,
    target: Position,
    attacker: Color,
    directions: &[(i8, i8)],
    kind: PieceKind,
) -> bool {
    directions.iter().any(|&(d_row, d_col)| {
        let mut pos = target.offset(d_row, d_col);
        while pos.is_valid() {
            if let Some(piece) = board.piece_at(pos) {
                return piece.color == attacker
                    && (piece.kind == kind || piece.kind == PieceKind::Queen);
            }
            pos = pos.offset(d_row, d_col);
        }
        false
    })
}

#[cfg(test)]
mod tests {
    use super::is_square_attacked;
    use crate::game_state::board::Board;
    use crate::game_state::chess_types::*;

    #[test]
    fn pawns_attack_diagonally_forward_only() {
        let mut board = Board::empty();
        board.place(Position::new(1, 4), Piece::new(PieceKind::Pawn, Color::Light));
        assert!(is_square_attacked(&board, Position::new(2, 3), Color::Light));
        assert!(is_square_attacked(&board, Position::new(2, 5), Color::Light));
        assert!(!is_square_attacked(&board, Position::new(2, 4), Color::Light));
        assert!(!is_square_attacked(&board, Position::new(0, 3), Color::Light));
    }

    #[test]
    fn sliders_are_blocked_by_any_piece() {
        let mut board = Board::empty();
        board.place(Position::new(0, 0), Piece::new(PieceKind::Queen, Color::Dark));
        board.place(Position::new(3, 3), Piece::new(PieceKind::Knight, Color::Light));
        assert!(is_square_attacked(&board, Position::new(2, 2), Color::Dark));
        assert!(!is_square_attacked(&board, Position::new(5, 5), Color::Dark));
        assert!(is_square_attacked(&board, Position::new(0, 7), Color::Dark));
        assert!(!is_square_attacked(&board, Position::new(0, 7), Color::Light));
    }

    #[test]
    fn starting_position_attacks_third_row_but_not_fourth() {
        let board = Board::standard();
        for col in 0..8 {
            assert!(is_square_attacked(&board, Position::new(2, col), Color::Light));
            assert!(!is_square_attacked(&board, Position::new(3, col), Color::Light));
        }
    }
}
