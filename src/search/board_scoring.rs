//! Static position evaluation.
//!
//! Scores are Light-positive. The evaluator sums a checkmate short-circuit,
//! material, a centralizing positional table, clamped mobility and threat
//! differentials and a castling bonus or penalty. Material and positional
//! terms depend only on individual squares, which is what lets
//! `evaluate_incremental` update them from the handful of squares a move
//! touches.

use crate::game_state::board::Board;
use crate::game_state::castle_status::CastleStatus;
use crate::game_state::chess_types::*;
use crate::moves::chess_move::Move;
use crate::moves::move_rules::visit_possible_moves;

/// Score of a position with a king missing. Every other term together stays
/// far below it.
pub const CHECKMATE: i32 = 100_000;

/// Cap on each of the mobility and threat terms, about one pawn.
pub const MAX_ACTIVITY_SWING: i32 = 100;

#[inline]
pub const fn piece_value(kind: PieceKind) -> i32 {
    match kind {
        PieceKind::Pawn => 100,
        PieceKind::Knight => 300,
        PieceKind::Bishop => 325,
        PieceKind::Rook => 500,
        PieceKind::Queen => 900,
        PieceKind::King => 0,
    }
}

/// Distance-from-edge weights, symmetric under both mirrorings.
const POSITION_WEIGHTS: [[i32; 8]; 8] = [
    [0, 1, 2, 3, 3, 2, 1, 0],
    [1, 2, 3, 4, 4, 3, 2, 1],
    [2, 3, 4, 5, 5, 4, 3, 2],
    [3, 4, 5, 6, 6, 5, 4, 3],
    [3, 4, 5, 6, 6, 5, 4, 3],
    [2, 3, 4, 5, 5, 4, 3, 2],
    [1, 2, 3, 4, 4, 3, 2, 1],
    [0, 1, 2, 3, 3, 2, 1, 0],
];

/// Multiplier on `POSITION_WEIGHTS`; the king prefers the edges.
#[inline]
const fn positional_factor(kind: PieceKind) -> i32 {
    match kind {
        PieceKind::Pawn => 3,
        PieceKind::Knight => 5,
        PieceKind::Bishop => 3,
        PieceKind::Rook => 1,
        PieceKind::Queen => 1,
        PieceKind::King => -3,
    }
}

/// Signed material plus positional value of `piece` standing on `pos`.
#[inline]
pub fn square_value(piece: Piece, pos: Position) -> i32 {
    let positional =
        POSITION_WEIGHTS[pos.row as usize][pos.col as usize] * positional_factor(piece.kind);
    piece.color.sign() * (piece_value(piece.kind) + positional)
}

/// Material and positional balance of a whole board.
pub fn board_balance(board: &Board) -> i32 {
    board
        .pieces()
        .map(|(pos, piece)| square_value(piece, pos))
        .sum()
}

/// `board_balance` of `child` from the parent's balance and the squares
/// `child.last_move()` touched.
pub fn balance_incremental(parent: &GameState, parent_balance: i32, child: &GameState) -> i32 {
    match child.last_move() {
        Some(mv) if !mv.is_null() => {
            let mut balance = parent_balance;
            for pos in touched_squares(&mv, parent.whose_turn()).into_iter().flatten() {
                balance -= parent.board().piece_at(pos).map_or(0, |p| square_value(p, pos));
                balance += child.board().piece_at(pos).map_or(0, |p| square_value(p, pos));
            }
            balance
        }
        _ => board_balance(child.board()),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EvaluatorWeights {
    /// Per pseudo-legal move of difference between the sides.
    pub mobility: i32,
    /// Per capture on offer of difference between the sides.
    pub threats: i32,
    pub castled_bonus: i32,
    /// Per castle a side can no longer play, unless it already castled.
    pub lost_castle_penalty: i32,
}

impl Default for EvaluatorWeights {
    fn default() -> Self {
        Self {
            mobility: 2,
            threats: 5,
            castled_bonus: 30,
            lost_castle_penalty: 15,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StaticEvaluator {
    pub weights: EvaluatorWeights,
}

impl StaticEvaluator {
    pub const fn new(weights: EvaluatorWeights) -> Self {
        Self { weights }
    }

    /// Full evaluation from scratch.
    pub fn evaluate(&self, game_state: &GameState) -> i32 {
        self.evaluate_from_balance(game_state, board_balance(game_state.board()))
    }

    /// Evaluation given an already known `board_balance` of the position.
    pub fn evaluate_from_balance(&self, game_state: &GameState, balance: i32) -> i32 {
        if let Some(mate) = missing_king_score(game_state.board()) {
            return mate;
        }
        balance + self.activity(game_state) + self.castling(game_state.castle_status())
    }

    /// Evaluate `child`, reached from `parent` by `child.last_move()`, reusing
    /// the parent's balance. Returns the child's balance and score; the score
    /// always equals `evaluate(child)`.
    pub fn evaluate_incremental(
        &self,
        parent: &GameState,
        parent_balance: i32,
        child: &GameState,
    ) -> (i32, i32) {
        let balance = balance_incremental(parent, parent_balance, child);
        (balance, self.evaluate_from_balance(child, balance))
    }

    fn activity(&self, game_state: &GameState) -> i32 {
        let mut mobility = 0i32;
        let mut threats = 0i32;
        for (pos, piece) in game_state.board().pieces() {
            let sign = piece.color.sign();
            visit_possible_moves(game_state, pos, &mut |mv| {
                mobility += sign;
                if mv.capture {
                    threats += sign;
                }
            });
        }
        (mobility * self.weights.mobility).clamp(-MAX_ACTIVITY_SWING, MAX_ACTIVITY_SWING)
            + (threats * self.weights.threats).clamp(-MAX_ACTIVITY_SWING, MAX_ACTIVITY_SWING)
    }

    fn castling(&self, status: CastleStatus) -> i32 {
        [Color::Light, Color::Dark]
            .into_iter()
            .map(|color| {
                let term = if status.has_castled(color) {
                    self.weights.castled_bonus
                } else {
                    [CastleSide::Kingside, CastleSide::Queenside]
                        .into_iter()
                        .filter(|&side| !status.is_allowed(color, side))
                        .count() as i32
                        * -self.weights.lost_castle_penalty
                };
                color.sign() * term
            })
            .sum()
    }
}

fn missing_king_score(board: &Board) -> Option<i32> {
    if board.find_king(Color::Light).is_none() {
        Some(-CHECKMATE)
    } else if board.find_king(Color::Dark).is_none() {
        Some(CHECKMATE)
    } else {
        None
    }
}

/// Every square whose contents `mv` can change, without repeats.
fn touched_squares(mv: &Move, mover: Color) -> [Option<Position>; 4] {
    if let Some(side) = mv.castle_side() {
        let row = mover.back_row();
        return [
            Some(mv.from),
            Some(mv.to),
            Some(Position::new(row, side.rook_from_col())),
            Some(Position::new(row, side.rook_to_col())),
        ];
    }
    let capture = mv.capture_square();
    [
        Some(mv.from),
        Some(mv.to),
        (capture != mv.to).then_some(capture),
        None,
    ]
}
