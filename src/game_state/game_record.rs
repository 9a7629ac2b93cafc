//! Move-by-move record of a game, used for undo.
//!
//! Each entry keeps enough of the position to rebuild a `GameState` through
//! `GameState::from_parts`; the hash and check flag are recomputed then.

use crate::game_state::board::Board;
use crate::game_state::castle_status::CastleStatus;
use crate::game_state::chess_types::*;
use crate::moves::chess_move::{Move, MoveKind};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordEntry {
    /// Piece that made `mv`, as it stood before moving.
    pub piece: Option<Piece>,
    pub mv: Option<Move>,
    pub board: Board,
    pub value: i32,
    pub castle_status: CastleStatus,
    pub whose_turn: Color,
    pub en_passant: Option<Position>,
    pub fifty_move_timer: u16,
    pub move_number: u16,
}

impl RecordEntry {
    pub fn from_state(state: &GameState, value: i32) -> Self {
        Self {
            piece: state.moved_piece(),
            mv: state.last_move(),
            board: *state.board(),
            value,
            castle_status: state.castle_status(),
            whose_turn: state.whose_turn(),
            en_passant: state.en_passant(),
            fifty_move_timer: state.fifty_move_timer(),
            move_number: state.move_number(),
        }
    }

    pub fn to_state(&self) -> GameState {
        GameState::from_parts(
            self.board,
            self.whose_turn,
            self.castle_status,
            self.en_passant,
            self.fifty_move_timer,
            self.move_number,
            self.mv,
        )
    }
}

#[derive(Debug, Clone)]
pub struct GameRecord {
    entries: Vec<RecordEntry>,
}

impl Default for GameRecord {
    fn default() -> Self {
        Self::new(&GameState::new_game())
    }
}

impl GameRecord {
    /// Start a record at `initial`, which can never be undone.
    pub fn new(initial: &GameState) -> Self {
        Self {
            entries: vec![RecordEntry::from_state(initial, 0)],
        }
    }

    #[inline]
    pub fn entries(&self) -> &[RecordEntry] {
        &self.entries
    }

    /// Moves recorded after the initial position.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len() - 1
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn push(&mut self, state: &GameState, value: i32) {
        self.entries.push(RecordEntry::from_state(state, value));
    }

    pub fn current(&self) -> GameState {
        match self.entries.last() {
            Some(entry) => entry.to_state(),
            None => GameState::new_game(),
        }
    }

    /// Drop the last recorded move and return the position before it.
    pub fn undo(&mut self) -> Option<GameState> {
        if self.is_empty() {
            return None;
        }
        self.entries.pop();
        Some(self.current())
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Route a player's answer into the record and return the position play
    /// continues from: undo and reset requests rewind, anything else is
    /// recorded with `value`.
    pub fn apply(&mut self, state: &GameState, value: i32) -> GameState {
        match state.last_move().map(|mv| mv.kind) {
            Some(MoveKind::Undo) => self.undo().unwrap_or_else(|| self.current()),
            Some(MoveKind::Reset) => {
                self.reset();
                self.current()
            }
            _ => {
                self.push(state, value);
                state.clone()
            }
        }
    }
}
