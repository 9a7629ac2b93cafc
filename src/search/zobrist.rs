//! Zobrist hashing support for fast position identity and cache keying.
//!
//! `ZHash` is an accumulator: every operation XORs one fixed random key, so
//! applying an operation twice cancels it and the final value does not depend
//! on the order operations were applied in. The keys come from a fixed seed so
//! hashes are deterministic across runs, which tests and debugging rely on.

use std::fmt;
use std::sync::OnceLock;

use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};

use crate::game_state::board::Board;
use crate::game_state::castle_status::CastleStatus;
use crate::game_state::chess_types::*;

const ZOBRIST_SEED: u64 = 0x9E37_79B9_7F4A_7C15;

#[derive(Debug)]
struct ZobristTables {
    // [color][row][col][piece_kind]
    piece_square: [[[[u64; 6]; 8]; 8]; 2],
    turn: u64,
    castle: [u64; 4],
    en_passant: [[u64; 8]; 2],
    fifty: u64,
}

static TABLES: OnceLock<ZobristTables> = OnceLock::new();

#[inline]
fn tables() -> &'static ZobristTables {
    TABLES.get_or_init(build_tables)
}

fn build_tables() -> ZobristTables {
    let mut rng = StdRng::seed_from_u64(ZOBRIST_SEED);

    let mut piece_square = [[[[0u64; 6]; 8]; 8]; 2];
    for color in &mut piece_square {
        for row in color {
            for col in row {
                for key in col {
                    *key = next_key(&mut rng);
                }
            }
        }
    }

    let turn = next_key(&mut rng);

    let mut castle = [0u64; 4];
    for key in &mut castle {
        *key = next_key(&mut rng);
    }

    let mut en_passant = [[0u64; 8]; 2];
    for color in &mut en_passant {
        for key in color {
            *key = next_key(&mut rng);
        }
    }

    let fifty = next_key(&mut rng);

    ZobristTables {
        piece_square,
        turn,
        castle,
        en_passant,
        fifty,
    }
}

// Zero would make a feature invisible and all-ones is the undefined sentinel.
fn next_key(rng: &mut StdRng) -> u64 {
    loop {
        let key = rng.next_u64();
        if key != 0 && key != u64::MAX {
            return key;
        }
    }
}

/// 64-bit position fingerprint.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ZHash(u64);

impl ZHash {
    /// Marker for "no position"; legitimate hashing is not expected to produce it.
    pub const UNDEFINED: ZHash = ZHash(u64::MAX);

    #[inline]
    pub const fn from_raw(value: u64) -> Self {
        Self(value)
    }

    #[inline]
    pub const fn value(self) -> u64 {
        self.0
    }

    #[inline]
    pub const fn is_undefined(self) -> bool {
        self.0 == u64::MAX
    }

    /// Hash of a full position computed from scratch.
    ///
    /// `en_passant` is the FEN target square; the pawn that may be captured
    /// belongs to the side that just moved.
    pub fn from_position(
        board: &Board,
        whose_turn: Color,
        castle_status: CastleStatus,
        en_passant: Option<Position>,
        fifty_move_flag: bool,
    ) -> Self {
        let mut hash = ZHash::default();
        for (pos, piece) in board.pieces() {
            hash = hash.add(piece, pos);
        }
        if whose_turn == Color::Dark {
            hash = hash.turn();
        }
        hash = hash.castle_availability(castle_status.unavailable_mask());
        if let Some(target) = en_passant {
            hash = hash.en_passant(whose_turn.opposite(), target.col);
        }
        if fifty_move_flag {
            hash = hash.fifty();
        }
        hash
    }

    #[inline]
    #[must_use]
    pub fn add(self, piece: Piece, pos: Position) -> Self {
        let key = tables().piece_square[piece.color.index()][pos.row as usize]
            [pos.col as usize][piece.kind.index()];
        Self(self.0 ^ key)
    }

    #[inline]
    #[must_use]
    pub fn remove(self, piece: Piece, pos: Position) -> Self {
        self.add(piece, pos)
    }

    #[inline]
    #[must_use]
    pub fn move_piece(self, piece: Piece, from: Position, to: Position) -> Self {
        self.remove(piece, from).add(piece, to)
    }

    #[inline]
    #[must_use]
    pub fn turn(self) -> Self {
        Self(self.0 ^ tables().turn)
    }

    /// Toggle the castle slots set in a `0..16` unavailable mask.
    #[inline]
    #[must_use]
    pub fn castle_availability(self, mask: u8) -> Self {
        let keys = &tables().castle;
        let mut value = self.0;
        for (slot, key) in keys.iter().enumerate() {
            if mask & (1 << slot) != 0 {
                value ^= key;
            }
        }
        Self(value)
    }

    /// Toggle "a `color` pawn on column `col` may be taken en passant".
    #[inline]
    #[must_use]
    pub fn en_passant(self, color: Color, col: i8) -> Self {
        Self(self.0 ^ tables().en_passant[color.index()][col as usize])
    }

    #[inline]
    #[must_use]
    pub fn fifty(self) -> Self {
        Self(self.0 ^ tables().fifty)
    }
}

impl fmt::Debug for ZHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ZHash({:#018x})", self.0)
    }
}
