//! Core game state representation.
//!
//! `GameState` aggregates the board with every derived field (turn, castling,
//! clocks, en-passant target, check flag and Zobrist hash). All of them change
//! together inside `make_move`, so a state reachable through the public API
//! always satisfies `zhash() == recompute_zhash()`.

use crate::chess_errors::ChessResult;
use crate::game_state::board::Board;
use crate::game_state::castle_status::CastleStatus;
use crate::game_state::chess_rules::FIFTY_MOVE_HALFMOVES;
use crate::game_state::chess_types::*;
use crate::moves::attacks::is_square_attacked;
use crate::moves::chess_move::{Move, MoveKind};
use crate::moves::move_rules::append_possible_moves;
use crate::search::zobrist::ZHash;
use crate::utils::fen_generator::generate_fen;
use crate::utils::fen_parser::parse_fen;

/// How a side with no responses at all has ended the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminalStatus {
    Checkmate,
    Stalemate,
}

#[derive(Debug, Clone)]
pub struct GameState {
    pub(crate) board: Board,
    pub(crate) whose_turn: Color,
    pub(crate) castle_status: CastleStatus,
    pub(crate) fifty_move_timer: u16,
    pub(crate) en_passant: Option<Position>,
    pub(crate) last_move: Option<Move>,
    pub(crate) in_check: bool,
    pub(crate) move_number: u16,
    pub(crate) zhash: ZHash,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new_game()
    }
}

impl GameState {
    pub fn new_game() -> Self {
        Self::from_parts(
            Board::standard(),
            Color::Light,
            CastleStatus::new(),
            None,
            0,
            1,
            None,
        )
    }

    /// Rebuild a state from stored parts, recomputing the hash and check flag.
    pub fn from_parts(
        board: Board,
        whose_turn: Color,
        castle_status: CastleStatus,
        en_passant: Option<Position>,
        fifty_move_timer: u16,
        move_number: u16,
        last_move: Option<Move>,
    ) -> Self {
        let mut state = Self {
            board,
            whose_turn,
            castle_status,
            fifty_move_timer,
            en_passant,
            last_move,
            in_check: false,
            move_number,
            zhash: ZHash::default(),
        };
        state.zhash = state.recompute_zhash();
        state.in_check = state.side_in_check(whose_turn);
        state
    }

    #[inline]
    pub fn from_fen(fen: &str) -> ChessResult<Self> {
        parse_fen(fen)
    }

    /// Replace this state with the position described by `fen`.
    ///
    /// On error `self` is left untouched.
    pub fn initialize_from_fen(&mut self, fen: &str) -> ChessResult<()> {
        match parse_fen(fen) {
            Ok(parsed) => {
                *self = parsed;
                Ok(())
            }
            Err(err) => {
                tracing::warn!(%fen, error = %err, "rejected FEN import");
                Err(err)
            }
        }
    }

    #[inline]
    pub fn fen(&self) -> String {
        generate_fen(self)
    }

    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[inline]
    pub fn whose_turn(&self) -> Color {
        self.whose_turn
    }

    #[inline]
    pub fn castle_status(&self) -> CastleStatus {
        self.castle_status
    }

    /// Halfmoves since the last capture or pawn move.
    #[inline]
    pub fn fifty_move_timer(&self) -> u16 {
        self.fifty_move_timer
    }

    /// True once fifty full moves passed without a capture or pawn move.
    #[inline]
    pub fn fifty_move_flag(&self) -> bool {
        self.fifty_move_timer >= FIFTY_MOVE_HALFMOVES
    }

    /// Square a pawn skipped over on the previous move.
    #[inline]
    pub fn en_passant(&self) -> Option<Position> {
        self.en_passant
    }

    #[inline]
    pub fn last_move(&self) -> Option<Move> {
        self.last_move
    }

    /// Whether the side to move has its king attacked.
    #[inline]
    pub fn in_check(&self) -> bool {
        self.in_check
    }

    #[inline]
    pub fn move_number(&self) -> u16 {
        self.move_number
    }

    #[inline]
    pub fn zhash(&self) -> ZHash {
        self.zhash
    }

    /// Hash computed from scratch; equals `zhash()` for every reachable state.
    pub fn recompute_zhash(&self) -> ZHash {
        ZHash::from_position(
            &self.board,
            self.whose_turn,
            self.castle_status,
            self.en_passant,
            self.fifty_move_flag(),
        )
    }

    pub fn side_in_check(&self, color: Color) -> bool {
        self.board
            .find_king(color)
            .is_some_and(|king| is_square_attacked(&self.board, king, color.opposite()))
    }

    /// Castling rights intact and king, rook and the squares between them in
    /// place. Whether the king crosses an attacked square is not examined.
    pub fn castle_is_allowed(&self, color: Color, side: CastleSide) -> bool {
        let row = color.back_row();
        let king_from = Position::new(row, KING_START_COL);
        let rook_from = Position::new(row, side.rook_from_col());
        self.castle_status.is_allowed(color, side)
            && self.board.piece_at(king_from) == Some(Piece::new(PieceKind::King, color))
            && self.board.piece_at(rook_from) == Some(Piece::new(PieceKind::Rook, color))
            && self.board.span_is_empty(king_from, rook_from)
    }

    /// Copy of this state with `mv` played.
    #[must_use]
    pub fn apply_move(&self, mv: &Move) -> GameState {
        let mut next = self.clone();
        next.make_move(mv);
        next
    }

    /// Play `mv` in place.
    ///
    /// # Panics
    /// If a board move starts from an empty square, or a castle is played
    /// without the king and rook on their home squares.
    pub fn make_move(&mut self, mv: &Move) {
        match mv.kind {
            MoveKind::Resign(_) | MoveKind::Undo => {
                self.last_move = Some(*mv);
            }
            MoveKind::Reset => {
                *self = Self::new_game();
                self.last_move = Some(*mv);
            }
            MoveKind::KingsideCastle => {
                self.play_castle(CastleSide::Kingside);
                self.finish_turn(mv, None, false);
            }
            MoveKind::QueensideCastle => {
                self.play_castle(CastleSide::Queenside);
                self.finish_turn(mv, None, false);
            }
            MoveKind::Normal | MoveKind::Promotion(_) | MoveKind::EnPassant => {
                let (en_passant, resets_timer) = self.play_board_move(mv);
                self.finish_turn(mv, en_passant, resets_timer);
            }
        }
    }

    fn play_castle(&mut self, side: CastleSide) {
        let color = self.whose_turn;
        let row = color.back_row();
        self.relocate(
            Piece::new(PieceKind::King, color),
            Position::new(row, KING_START_COL),
            Position::new(row, side.king_to_col()),
        );
        self.relocate(
            Piece::new(PieceKind::Rook, color),
            Position::new(row, side.rook_from_col()),
            Position::new(row, side.rook_to_col()),
        );
        let flipped = self.castle_status.mark_castled(color, side);
        self.zhash = self.zhash.castle_availability(flipped);
    }

    /// Returns the new en-passant target and whether the fifty-move timer resets.
    fn play_board_move(&mut self, mv: &Move) -> (Option<Position>, bool) {
        let color = self.whose_turn;
        let Some(piece) = self.board.piece_at(mv.from) else {
            panic!("no piece on {} for move {mv:?}", mv.from);
        };

        let capture_square = mv.capture_square();
        let captured = self.board.take(capture_square);
        if let Some(victim) = captured {
            self.zhash = self.zhash.remove(victim, capture_square);
            if victim.kind == PieceKind::Rook {
                self.revoke_for_rook_square(victim.color, capture_square);
            }
        }

        self.relocate(piece, mv.from, mv.to);

        if piece.kind == PieceKind::Pawn {
            let last_row = color.opposite().back_row();
            let promoted_to = mv
                .promotion_piece()
                .or((mv.to.row == last_row).then_some(PieceKind::Queen));
            if let Some(kind) = promoted_to {
                let promoted = Piece::new(kind, color);
                self.board.place(mv.to, promoted);
                self.zhash = self.zhash.remove(piece, mv.to).add(promoted, mv.to);
            }
        }

        match piece.kind {
            PieceKind::King => {
                let flipped = self.castle_status.revoke_all(color);
                self.zhash = self.zhash.castle_availability(flipped);
            }
            PieceKind::Rook => self.revoke_for_rook_square(color, mv.from),
            _ => {}
        }

        let en_passant = (piece.kind == PieceKind::Pawn && (mv.to.row - mv.from.row).abs() == 2)
            .then(|| Position::new(mv.from.row + color.forward(), mv.from.col));

        (en_passant, piece.kind == PieceKind::Pawn || captured.is_some())
    }

    fn relocate(&mut self, piece: Piece, from: Position, to: Position) {
        let moved = self.board.take(from);
        assert_eq!(moved, Some(piece), "expected {piece:?} on {from}");
        self.board.place(to, piece);
        self.zhash = self.zhash.move_piece(piece, from, to);
    }

    fn revoke_for_rook_square(&mut self, color: Color, square: Position) {
        if square.row != color.back_row() {
            return;
        }
        let side = match square.col {
            0 => CastleSide::Queenside,
            7 => CastleSide::Kingside,
            _ => return,
        };
        let flipped = self.castle_status.revoke(color, side);
        self.zhash = self.zhash.castle_availability(flipped);
    }

    fn finish_turn(&mut self, mv: &Move, en_passant: Option<Position>, resets_timer: bool) {
        let mover = self.whose_turn;

        if let Some(old) = self.en_passant {
            self.zhash = self.zhash.en_passant(mover.opposite(), old.col);
        }
        if let Some(target) = en_passant {
            self.zhash = self.zhash.en_passant(mover, target.col);
        }
        self.en_passant = en_passant;

        let was_flagged = self.fifty_move_flag();
        self.fifty_move_timer = if resets_timer {
            0
        } else {
            self.fifty_move_timer.saturating_add(1)
        };
        if was_flagged != self.fifty_move_flag() {
            self.zhash = self.zhash.fifty();
        }

        self.whose_turn = mover.opposite();
        self.zhash = self.zhash.turn();
        if mover == Color::Dark {
            self.move_number = self.move_number.saturating_add(1);
        }
        self.last_move = Some(*mv);
        self.in_check = self.side_in_check(self.whose_turn);
    }

    /// Every pseudo-legal move for the side to move, in row-major board order.
    pub fn generate_moves(&self) -> Vec<Move> {
        let mut out = Vec::with_capacity(64);
        for (pos, piece) in self.board.pieces() {
            if piece.color == self.whose_turn {
                append_possible_moves(self, pos, &mut out);
            }
        }
        out
    }

    /// One successor state per generated move.
    pub fn generate_responses(&self) -> Vec<GameState> {
        self.generate_moves()
            .iter()
            .map(|mv| self.apply_move(mv))
            .collect()
    }

    /// Classify a side to move that has no responses at all.
    pub fn terminal_status(&self) -> Option<TerminalStatus> {
        if !self.generate_moves().is_empty() {
            return None;
        }
        Some(if self.in_check {
            TerminalStatus::Checkmate
        } else {
            TerminalStatus::Stalemate
        })
    }

    /// Piece that `last_move` moved, as it stood before moving. A promotion
    /// reports the pawn, not the piece it became.
    pub fn moved_piece(&self) -> Option<Piece> {
        let mv = self.last_move?;
        match mv.kind {
            MoveKind::Resign(_) | MoveKind::Undo | MoveKind::Reset => None,
            MoveKind::Promotion(_) => Some(Piece::new(PieceKind::Pawn, self.whose_turn.opposite())),
            _ => self.board.piece_at(mv.to),
        }
    }
}

/// Positions compare by board, side to move, castling rights and en-passant
/// target, the same fields the hash covers. Clocks, move number, the last
/// move and whether a castle was actually played are ignored, so repetitions
/// reached by different paths and FEN reimports compare equal.
impl PartialEq for GameState {
    fn eq(&self, other: &Self) -> bool {
        self.board == other.board
            && self.whose_turn == other.whose_turn
            && self.castle_status.unavailable_mask() == other.castle_status.unavailable_mask()
            && self.en_passant == other.en_passant
    }
}
