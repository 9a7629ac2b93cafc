//! Human player fed by queued move requests.
//!
//! A request mirrors what a move dialog collects: two squares plus the
//! special-move checkboxes. Each turn consumes one request, turns it into a
//! `Move` and checks it with `is_valid_move` before playing it.

use std::collections::VecDeque;

use crate::chess_errors::{ChessError, ChessResult};
use crate::engines::engine_trait::Player;
use crate::game_state::chess_types::*;
use crate::moves::chess_move::Move;
use crate::moves::move_rules::is_valid_move;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveRequest {
    pub from: Position,
    pub to: Position,
    pub castle: Option<CastleSide>,
    pub promotion: Option<PieceKind>,
    pub en_passant: bool,
    pub resign: bool,
    pub undo: bool,
}

impl MoveRequest {
    pub const fn between(from: Position, to: Position) -> Self {
        Self {
            from,
            to,
            castle: None,
            promotion: None,
            en_passant: false,
            resign: false,
            undo: false,
        }
    }

    pub const fn castle(side: CastleSide) -> Self {
        Self {
            castle: Some(side),
            ..Self::between(Position::INVALID, Position::INVALID)
        }
    }

    pub const fn resign() -> Self {
        Self {
            resign: true,
            ..Self::between(Position::INVALID, Position::INVALID)
        }
    }

    pub const fn undo() -> Self {
        Self {
            undo: true,
            ..Self::between(Position::INVALID, Position::INVALID)
        }
    }

    /// The move this request asks for on behalf of the side to move in
    /// `game_state`. The capture flag is read off the board.
    pub fn to_move(&self, game_state: &GameState) -> Move {
        let color = game_state.whose_turn();
        if self.resign {
            return Move::resign(color);
        }
        if self.undo {
            return Move::undo();
        }
        if let Some(side) = self.castle {
            return Move::castle(color, side);
        }
        if self.en_passant {
            return Move::en_passant(self.from, self.to);
        }
        let capture = game_state.board().is_occupied_by(self.to, color.opposite());
        match self.promotion {
            Some(kind) => Move::promotion(self.from, self.to, capture, kind),
            None => Move::normal(self.from, self.to, capture),
        }
    }
}

pub struct HumanPlayer {
    name: String,
    requests: VecDeque<MoveRequest>,
}

impl HumanPlayer {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            requests: VecDeque::new(),
        }
    }

    pub fn push_request(&mut self, request: MoveRequest) {
        self.requests.push_back(request);
    }

    #[inline]
    pub fn pending(&self) -> usize {
        self.requests.len()
    }
}

impl Player for HumanPlayer {
    fn name(&self) -> &str {
        &self.name
    }

    fn new_game(&mut self) {
        self.requests.clear();
    }

    fn take_turn(&mut self, game_state: &GameState) -> ChessResult<GameState> {
        let request = self
            .requests
            .pop_front()
            .ok_or(ChessError::NoMoveRequested)?;
        let mv = request.to_move(game_state);
        if !mv.is_null() && !is_valid_move(game_state, &mv) {
            tracing::warn!(player = %self.name, ?mv, "rejected move request");
            return Err(ChessError::IllegalMove(format!(
                "{} to {} is not playable",
                mv.from, mv.to
            )));
        }
        Ok(game_state.apply_move(&mv))
    }
}

#[cfg(test)]
mod tests {
    use super::{HumanPlayer, MoveRequest};
    use crate::chess_errors::ChessError;
    use crate::engines::engine_trait::Player;
    use crate::game_state::chess_types::*;
    use crate::moves::chess_move::MoveKind;
    use crate::utils::algebraic::algebraic_to_position;

    fn request(from: &str, to: &str) -> MoveRequest {
        MoveRequest::between(
            algebraic_to_position(from).expect("square should parse"),
            algebraic_to_position(to).expect("square should parse"),
        )
    }

    #[test]
    fn plays_queued_requests_in_order() {
        let mut player = HumanPlayer::new("alice");
        player.push_request(request("e2", "e4"));
        player.push_request(request("e7", "e5"));
        let state = GameState::new_game();
        let next = player.take_turn(&state).expect("e2e4 should be playable");
        let reply = player.take_turn(&next).expect("e7e5 should be playable");
        assert_eq!(
            reply.fen(),
            "rnbqkbnr/pppp1ppp/8/4p3/4P3/8/PPPP1PPP/RNBQKBNR w KQkq e6 0 2"
        );
        assert_eq!(player.take_turn(&reply), Err(ChessError::NoMoveRequested));
    }

    #[test]
    fn invalid_requests_are_rejected_and_consumed() {
        let mut player = HumanPlayer::new("bob");
        player.push_request(request("e2", "e5"));
        player.push_request(request("e7", "e5"));
        let state = GameState::new_game();
        assert!(matches!(player.take_turn(&state), Err(ChessError::IllegalMove(_))));
        assert_eq!(player.pending(), 1);
        assert!(matches!(player.take_turn(&state), Err(ChessError::IllegalMove(_))));
    }

    #[test]
    fn checkboxes_select_special_moves() {
        let mut player = HumanPlayer::new("carol");
        let castle_state = GameState::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1")
            .expect("FEN should parse");
        player.push_request(MoveRequest::castle(CastleSide::Queenside));
        let castled = player.take_turn(&castle_state).expect("castle should be playable");
        assert_eq!(castled.last_move().map(|mv| mv.kind), Some(MoveKind::QueensideCastle));

        let promo_state = GameState::from_fen("4k3/P7/8/8/8/8/8/4K3 w - - 0 1").expect("FEN should parse");
        player.push_request(MoveRequest {
            promotion: Some(PieceKind::Rook),
            ..request("a7", "a8")
        });
        let promoted = player.take_turn(&promo_state).expect("promotion should be playable");
        assert_eq!(
            promoted.board().piece_at(Position::new(7, 0)),
            Some(Piece::new(PieceKind::Rook, Color::Light))
        );

        player.push_request(request("a7", "a8"));
        assert!(player.take_turn(&promo_state).is_err());

        let ep_state = GameState::from_fen("4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 1").expect("FEN should parse");
        player.push_request(MoveRequest {
            en_passant: true,
            ..request("e5", "d6")
        });
        let taken = player.take_turn(&ep_state).expect("en passant should be playable");
        assert!(taken.board().is_empty_at(Position::new(4, 3)));
    }

    #[test]
    fn resign_and_undo_pass_through() {
        let mut player = HumanPlayer::new("dave");
        player.push_request(MoveRequest::undo());
        player.push_request(MoveRequest::resign());
        let state = GameState::new_game();
        let undo = player.take_turn(&state).expect("undo is always accepted");
        assert_eq!(undo.last_move().map(|mv| mv.kind), Some(MoveKind::Undo));
        let resign = player.take_turn(&state).expect("resign is always accepted");
        assert!(resign.last_move().is_some_and(|mv| mv.is_resignation()));
    }
}
