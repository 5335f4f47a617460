//! Position-to-FEN generator, the inverse of `fen_parser`.

use std::fmt::Write;

use crate::game_state::chess_types::{square_at, Color};
use crate::game_state::position::Position;
use crate::utils::algebraic::{piece_to_char, square_to_algebraic};

pub fn generate_fen(position: &Position) -> String {
    let mut fen = String::with_capacity(90);

    for rank in (0..8u8).rev() {
        let mut empty_run = 0;
        for file in 0..8u8 {
            match position.board().get(square_at(file, rank)) {
                Some((color, kind)) => {
                    if empty_run != 0 {
                        let _ = write!(fen, "{empty_run}");
                        empty_run = 0;
                    }
                    fen.push(piece_to_char(color, kind));
                }
                None => empty_run += 1,
            }
        }
        if empty_run != 0 {
            let _ = write!(fen, "{empty_run}");
        }
        if rank != 0 {
            fen.push('/');
        }
    }

    fen.push(' ');
    fen.push(match position.turn() {
        Color::Light => 'w',
        Color::Dark => 'b',
    });
    fen.push(' ');

    let castling_start = fen.len();
    if position.can_castle_kingside(Color::Light) {
        fen.push('K');
    }
    if position.can_castle_queenside(Color::Light) {
        fen.push('Q');
    }
    if position.can_castle_kingside(Color::Dark) {
        fen.push('k');
    }
    if position.can_castle_queenside(Color::Dark) {
        fen.push('q');
    }
    if fen.len() == castling_start {
        fen.push('-');
    }

    fen.push(' ');
    match position.en_passant_target() {
        Some(ep) => fen.push_str(&square_to_algebraic(ep)),
        None => fen.push('-'),
    }

    let _ = write!(
        fen,
        " {} {}",
        position.halfmove_clock(),
        position.fullmove_number()
    );

    fen
}

#[cfg(test)]
mod tests {
    use super::generate_fen;
    use crate::game_state::chess_rules::STARTING_POSITION_FEN;
    use crate::game_state::position::Position;

    #[test]
    fn starting_position_round_trips() {
        assert_eq!(generate_fen(&Position::new()), STARTING_POSITION_FEN);
    }

    #[test]
    fn mid_game_fens_round_trip() {
        let fens = [
            "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
            "rnbqkbnr/ppp1pppp/8/3pP3/8/8/PPPP1PPP/RNBQKBNR w KQkq d6 0 2",
            "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1",
            "r4rk1/1pp1qppp/p1np1n2/2b1p1B1/2B1P1b1/P1NP1N2/1PP1QPPP/R4RK1 b - - 3 10",
        ];
        for fen in fens {
            let position = Position::from_fen(fen).expect("FEN should parse");
            assert_eq!(position.to_fen(), fen);
        }
    }
}
