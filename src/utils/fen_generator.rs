//! GameState-to-FEN generator.

use crate::game_state::board::Board;
use crate::game_state::castle_status::CastleStatus;
use crate::game_state::chess_types::*;

pub fn generate_fen(game_state: &GameState) -> String {
    let board = generate_board_field(game_state.board());
    let side_to_move = match game_state.whose_turn() {
        Color::Light => "w",
        Color::Dark => "b",
    };
    let castling = generate_castling_field(game_state.castle_status());
    let en_passant = game_state
        .en_passant()
        .map_or_else(|| "-".to_owned(), |target| target.to_string());

    format!(
        "{} {} {} {} {} {}",
        board,
        side_to_move,
        castling,
        en_passant,
        game_state.fifty_move_timer(),
        game_state.move_number()
    )
}

/// Placement field, rank 8 first.
pub fn generate_board_field(board: &Board) -> String {
    let mut out = String::new();

    for row in (0..8i8).rev() {
        let mut empty_count = 0u8;

        for col in 0..8i8 {
            if let Some(piece) = board.piece_at(Position::new(row, col)) {
                if empty_count > 0 {
                    out.push(char::from(b'0' + empty_count));
                    empty_count = 0;
                }
                out.push(piece.fen_char());
            } else {
                empty_count += 1;
            }
        }

        if empty_count > 0 {
            out.push(char::from(b'0' + empty_count));
        }

        if row > 0 {
            out.push('/');
        }
    }

    out
}

fn generate_castling_field(status: CastleStatus) -> String {
    let mut out = String::new();

    for (color, side, letter) in [
        (Color::Light, CastleSide::Kingside, 'K'),
        (Color::Light, CastleSide::Queenside, 'Q'),
        (Color::Dark, CastleSide::Kingside, 'k'),
        (Color::Dark, CastleSide::Queenside, 'q'),
    ] {
        if status.is_allowed(color, side) {
            out.push(letter);
        }
    }

    if out.is_empty() {
        out.push('-');
    }

    out
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    use super::generate_fen;
    use crate::game_state::chess_rules::STARTING_POSITION_FEN;
    use crate::game_state::chess_types::*;
    use crate::moves::chess_move::Move;
    use crate::utils::fen_parser::parse_fen;

    #[test]
    fn round_trip_starting_position_fen() {
        let parsed = parse_fen(STARTING_POSITION_FEN).expect("starting FEN should parse");
        let generated = generate_fen(&parsed);

        assert_eq!(generated, STARTING_POSITION_FEN);

        let reparsed = parse_fen(&generated).expect("generated FEN should parse");
        assert_eq!(reparsed, parsed);
        assert_eq!(reparsed.zhash(), parsed.zhash());
    }

    #[test]
    fn round_trip_custom_position_fen() {
        let fen = "r1bqk2r/pppp1ppp/2n2n2/2b1p3/2B1P3/2N2N2/PPPP1PPP/R1BQ1RK1 b kq - 4 6";
        let parsed = parse_fen(fen).expect("custom FEN should parse");
        let generated = generate_fen(&parsed);
        let reparsed = parse_fen(&generated).expect("generated FEN should parse");

        assert_eq!(generated, fen);
        assert_eq!(reparsed, parsed);
        assert_eq!(reparsed.whose_turn(), Color::Dark);
        assert!(!reparsed.castle_status().is_allowed(Color::Light, CastleSide::Kingside));
        assert!(reparsed.castle_status().is_allowed(Color::Dark, CastleSide::Queenside));
        assert_eq!(reparsed.fifty_move_timer(), 4);
        assert_eq!(reparsed.move_number(), 6);
    }

    #[test]
    fn played_moves_show_up_in_the_record() {
        let game = parse_fen(STARTING_POSITION_FEN)
            .expect("starting FEN should parse")
            .apply_move(&Move::normal(Position::new(1, 4), Position::new(3, 4), false));
        assert_eq!(
            generate_fen(&game),
            "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1"
        );
    }

    #[test]
    fn round_trip_positions_reached_by_random_play() {
        let mut rng = StdRng::seed_from_u64(23);
        for _ in 0..30 {
            let mut game = GameState::new_game();
            for _ in 0..100 {
                let moves = game.generate_moves();
                if moves.is_empty()
                    || game.board().find_king(Color::Light).is_none()
                    || game.board().find_king(Color::Dark).is_none()
                {
                    break;
                }
                let mv = moves[rng.random_range(0..moves.len())];
                game.make_move(&mv);

                let fen = generate_fen(&game);
                let parsed = parse_fen(&fen).expect("generated FEN should parse");
                assert_eq!(parsed.board(), game.board(), "{fen}");
                assert_eq!(generate_fen(&parsed), fen);
                assert_eq!(parsed.zhash(), game.zhash(), "{fen}");
                assert_eq!(parsed, game, "{fen}");
            }
        }
    }
}
