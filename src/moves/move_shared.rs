//! Helpers shared by the per-piece move rules.
//!
//! Sliding pieces walk "spans": rays that stop at the first occupied square,
//! which is included only when it holds an enemy piece. Stepping pieces (king,
//! knight) try a fixed list of offsets.

use crate::game_state::board::Board;
use crate::game_state::chess_types::*;
use crate::moves::chess_move::{Move, MoveKind};

pub const ORTHOGONAL_DIRECTIONS: [(i8, i8); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];
pub const DIAGONAL_DIRECTIONS: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];
pub const ALL_DIRECTIONS: [(i8, i8); 8] = [
    (1, 0),
    (-1, 0),
    (0, 1),
    (0, -1),
    (1, 1),
    (1, -1),
    (-1, 1),
    (-1, -1),
];

/// Visit every span move of a `color` slider on `from`.
pub fn visit_span_moves(
    board: &Board,
    from: Position,
    color: Color,
    directions: &[(i8, i8)],
    visit: &mut dyn FnMut(Move),
) {
    for &(d_row, d_col) in directions {
        let mut to = from.offset(d_row, d_col);
        while to.is_valid() {
            match board.piece_at(to) {
                None => visit(Move::normal(from, to, false)),
                Some(piece) => {
                    if piece.color != color {
                        visit(Move::normal(from, to, true));
                    }
                    break;
                }
            }
            to = to.offset(d_row, d_col);
        }
    }
}

/// Visit every single-step move of a `color` piece on `from`.
pub fn visit_step_moves(
    board: &Board,
    from: Position,
    color: Color,
    offsets: &[(i8, i8)],
    visit: &mut dyn FnMut(Move),
) {
    for &(d_row, d_col) in offsets {
        let to = from.offset(d_row, d_col);
        if !to.is_valid() {
            continue;
        }
        match board.piece_at(to) {
            None => visit(Move::normal(from, to, false)),
            Some(piece) if piece.color != color => visit(Move::normal(from, to, true)),
            Some(_) => {}
        }
    }
}

/// Destination free of own pieces and the capture flag telling the truth.
pub fn lands_correctly(board: &Board, mv: &Move, color: Color) -> bool {
    match board.piece_at(mv.to) {
        None => !mv.capture,
        Some(piece) => piece.color != color && mv.capture,
    }
}

/// Span predicate for a single move along one of `directions`.
pub fn is_valid_span_move(
    board: &Board,
    mv: &Move,
    color: Color,
    directions: &[(i8, i8)],
) -> bool {
    if mv.kind != MoveKind::Normal {
        return false;
    }
    let d_row = mv.to.row - mv.from.row;
    let d_col = mv.to.col - mv.from.col;
    if d_row == 0 && d_col == 0 {
        return false;
    }
    let along = directions.iter().any(|&(r, c)| {
        (d_row.signum(), d_col.signum()) == (r, c)
            && (d_row == 0 || d_col == 0 || d_row.abs() == d_col.abs())
    });
    along && board.span_is_empty(mv.from, mv.to) && lands_correctly(board, mv, color)
}

/// Step predicate for a single move using one of `offsets`.
pub fn is_valid_step_move(board: &Board, mv: &Move, color: Color, offsets: &[(i8, i8)]) -> bool {
    if mv.kind != MoveKind::Normal {
        return false;
    }
    let delta = (mv.to.row - mv.from.row, mv.to.col - mv.from.col);
    offsets.contains(&delta) && lands_correctly(board, mv, color)
}
