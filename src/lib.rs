//! Crate root module declarations for the Tern Chess engine.
//!
//! This file exposes the top-level subsystems (game state, move rules,
//! search, players and notation helpers) so benches, tests and front ends
//! can import stable module paths.

pub mod chess_errors;

pub mod game_state {
    pub mod board;
    pub mod castle_status;
    pub mod chess_rules;
    pub mod chess_types;
    pub mod game_record;
    pub mod game_state;
    pub mod position;
}

pub mod moves {
    pub mod attacks;
    pub mod bishop_moves;
    pub mod chess_move;
    pub mod king_moves;
    pub mod knight_moves;
    pub mod move_rules;
    pub mod move_shared;
    pub mod notation;
    pub mod pawn_moves;
    pub mod queen_moves;
    pub mod rook_moves;
}

pub mod search {
    pub mod board_scoring;
    pub mod game_tree;
    pub mod transposition_table;
    pub mod zobrist;
}

pub mod engines {
    pub mod computer_player;
    pub mod engine_trait;
    pub mod human_player;
}

pub mod utils {
    pub mod algebraic;
    pub mod fen_generator;
    pub mod fen_parser;
    pub mod long_algebraic;
}
