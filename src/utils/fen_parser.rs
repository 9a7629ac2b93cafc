//! FEN-to-GameState parser.
//!
//! Builds a fully-populated state from a Forsyth-Edwards Notation string:
//! placement, side to move, castling availability, en-passant target and both
//! clocks. The hash and check flag are derived afterwards by
//! `GameState::from_parts`.

use crate::chess_errors::{ChessError, ChessResult};
use crate::game_state::board::Board;
use crate::game_state::castle_status::*;
use crate::game_state::chess_types::*;
use crate::utils::algebraic::algebraic_to_position;

fn invalid(reason: impl Into<String>) -> ChessError {
    ChessError::InvalidFen(reason.into())
}

pub fn parse_fen(fen: &str) -> ChessResult<GameState> {
    let mut parts = fen.split_whitespace();

    let board_part = parts.next().ok_or_else(|| invalid("missing board layout"))?;
    let side_part = parts.next().ok_or_else(|| invalid("missing side to move"))?;
    let castling_part = parts.next().ok_or_else(|| invalid("missing castling rights"))?;
    let en_passant_part = parts.next().ok_or_else(|| invalid("missing en-passant square"))?;
    let halfmove_part = parts.next().ok_or_else(|| invalid("missing halfmove clock"))?;
    let fullmove_part = parts.next().ok_or_else(|| invalid("missing fullmove number"))?;

    if parts.next().is_some() {
        return Err(invalid("extra trailing fields"));
    }

    let board = parse_board(board_part)?;
    let whose_turn = parse_side_to_move(side_part)?;
    let castle_status = parse_castling_rights(castling_part)?;
    let en_passant = parse_en_passant_square(en_passant_part, whose_turn)?;
    let fifty_move_timer = halfmove_part
        .parse::<u16>()
        .map_err(|_| invalid(format!("halfmove clock {halfmove_part}")))?;
    let move_number = fullmove_part
        .parse::<u16>()
        .map_err(|_| invalid(format!("fullmove number {fullmove_part}")))?;

    Ok(GameState::from_parts(
        board,
        whose_turn,
        castle_status,
        en_passant,
        fifty_move_timer,
        move_number,
        None,
    ))
}

/// Parse the placement field (eight `/`-separated ranks, rank 8 first).
pub fn parse_board(board_part: &str) -> ChessResult<Board> {
    let ranks: Vec<&str> = board_part.split('/').collect();
    if ranks.len() != 8 {
        return Err(invalid("board layout must contain 8 ranks"));
    }

    let mut board = Board::empty();
    for (fen_rank_idx, rank_str) in ranks.iter().enumerate() {
        let row = 7 - fen_rank_idx as i8;
        let mut col = 0i8;

        for ch in rank_str.chars() {
            if let Some(empty_count) = ch.to_digit(10) {
                if !(1..=8).contains(&empty_count) {
                    return Err(invalid(format!("empty-square count '{ch}'")));
                }
                col += empty_count as i8;
                if col > 8 {
                    return Err(invalid(format!("rank {} has too many files", 8 - fen_rank_idx)));
                }
                continue;
            }

            let piece = Piece::from_fen_char(ch)
                .ok_or_else(|| invalid(format!("piece character '{ch}'")))?;

            if col >= 8 {
                return Err(invalid(format!("rank {} has too many files", 8 - fen_rank_idx)));
            }

            board.place(Position::new(row, col), piece);
            col += 1;
        }

        if col != 8 {
            return Err(invalid(format!("rank {} does not sum to 8 files", 8 - fen_rank_idx)));
        }
    }

    Ok(board)
}

fn parse_side_to_move(side_part: &str) -> ChessResult<Color> {
    match side_part {
        "w" => Ok(Color::Light),
        "b" => Ok(Color::Dark),
        _ => Err(invalid(format!("side to move {side_part}"))),
    }
}

/// FEN lists the castles that are still available; every letter missing
/// from the field becomes an unavailable bit.
fn parse_castling_rights(castling_part: &str) -> ChessResult<CastleStatus> {
    let mut bits = ALL_UNAVAILABLE;
    if castling_part == "-" {
        return Ok(CastleStatus::from_bits(bits));
    }

    for ch in castling_part.chars() {
        let unavailable = match ch {
            'K' => LIGHT_KINGSIDE_UNAVAILABLE,
            'Q' => LIGHT_QUEENSIDE_UNAVAILABLE,
            'k' => DARK_KINGSIDE_UNAVAILABLE,
            'q' => DARK_QUEENSIDE_UNAVAILABLE,
            _ => return Err(invalid(format!("castling rights character {ch}"))),
        };
        bits &= !unavailable;
    }

    Ok(CastleStatus::from_bits(bits))
}

/// The target must sit behind a pawn of the side that just moved.
fn parse_en_passant_square(
    en_passant_part: &str,
    whose_turn: Color,
) -> ChessResult<Option<Position>> {
    if en_passant_part == "-" {
        return Ok(None);
    }

    let target = algebraic_to_position(en_passant_part)
        .map_err(|_| invalid(format!("en-passant square {en_passant_part}")))?;
    let mover = whose_turn.opposite();
    if target.row != mover.back_row() + 2 * mover.forward() {
        return Err(invalid(format!(
            "en-passant square {en_passant_part} with {whose_turn:?} to move"
        )));
    }
    Ok(Some(target))
}
