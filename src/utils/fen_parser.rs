//! FEN-to-position parser.
//!
//! Builds a fully populated position from a Forsyth-Edwards Notation
//! string: piece placement, side to move, castling availability,
//! en-passant target, and the two clocks. The shorthand `startpos` is
//! accepted for the standard starting position.

use crate::errors::NotationError;
use crate::game_state::board::Board;
use crate::game_state::chess_types::{square_at, Color};
use crate::game_state::position::Position;
use crate::utils::algebraic::{algebraic_to_square, piece_from_char};

pub fn parse_fen(fen: &str) -> Result<Position, NotationError> {
    let mut fields = fen.split_whitespace();

    let board_field = fields.next().ok_or(NotationError::EmptyFen)?;
    if board_field == "startpos" {
        if fields.next().is_some() {
            return Err(NotationError::TrailingFenFields);
        }
        return Ok(Position::new());
    }

    let side_field = fields
        .next()
        .ok_or(NotationError::MissingFenField("side-to-move"))?;
    let castling_field = fields
        .next()
        .ok_or(NotationError::MissingFenField("castling availability"))?;
    let en_passant_field = fields
        .next()
        .ok_or(NotationError::MissingFenField("en-passant square"))?;
    let halfmove_field = fields
        .next()
        .ok_or(NotationError::MissingFenField("halfmove clock"))?;
    let fullmove_field = fields
        .next()
        .ok_or(NotationError::MissingFenField("fullmove number"))?;
    if fields.next().is_some() {
        return Err(NotationError::TrailingFenFields);
    }

    let board = parse_board(board_field)?;
    let turn = parse_side(side_field)?;
    let (kingside_castle, queenside_castle) = parse_castling(castling_field)?;
    let en_passant = if en_passant_field == "-" {
        None
    } else {
        Some(algebraic_to_square(en_passant_field)?)
    };
    let halfmove_clock = halfmove_field
        .parse::<u16>()
        .map_err(|_| NotationError::InvalidClock(halfmove_field.to_owned()))?;
    let fullmove_number = fullmove_field
        .parse::<u16>()
        .map_err(|_| NotationError::InvalidClock(fullmove_field.to_owned()))?;

    Ok(Position::from_state(
        board,
        turn,
        kingside_castle,
        queenside_castle,
        en_passant,
        halfmove_clock,
        fullmove_number,
    ))
}

fn parse_board(board_field: &str) -> Result<Board, NotationError> {
    let ranks: Vec<&str> = board_field.split('/').collect();
    if ranks.len() != 8 {
        return Err(NotationError::MalformedBoard(format!(
            "expected 8 ranks, found {}",
            ranks.len()
        )));
    }

    let mut board = Board::empty();

    for (fen_rank_index, rank_text) in ranks.iter().enumerate() {
        // FEN lists rank 8 first.
        let rank = 7 - fen_rank_index as u8;
        let mut file = 0u8;

        for c in rank_text.chars() {
            if let Some(run) = c.to_digit(10) {
                if !(1..=8).contains(&run) {
                    return Err(NotationError::MalformedBoard(format!(
                        "invalid empty-square run '{c}'"
                    )));
                }
                file += run as u8;
                continue;
            }

            let (color, kind) = piece_from_char(c).ok_or(NotationError::InvalidPieceChar(c))?;
            if file >= 8 {
                return Err(NotationError::MalformedBoard(format!(
                    "rank '{rank_text}' has more than 8 files"
                )));
            }
            board.set(square_at(file, rank), Some((color, kind)));
            file += 1;
        }

        if file != 8 {
            return Err(NotationError::MalformedBoard(format!(
                "rank '{rank_text}' does not sum to 8 files"
            )));
        }
    }

    Ok(board)
}

fn parse_side(side_field: &str) -> Result<Color, NotationError> {
    match side_field {
        "w" => Ok(Color::Light),
        "b" => Ok(Color::Dark),
        _ => Err(NotationError::InvalidSideField(side_field.to_owned())),
    }
}

fn parse_castling(castling_field: &str) -> Result<([bool; 2], [bool; 2]), NotationError> {
    let mut kingside = [false; 2];
    let mut queenside = [false; 2];

    if castling_field == "-" {
        return Ok((kingside, queenside));
    }

    for c in castling_field.chars() {
        match c {
            'K' => kingside[Color::Light.index()] = true,
            'Q' => queenside[Color::Light.index()] = true,
            'k' => kingside[Color::Dark.index()] = true,
            'q' => queenside[Color::Dark.index()] = true,
            _ => return Err(NotationError::InvalidCastlingChar(c)),
        }
    }

    Ok((kingside, queenside))
}

#[cfg(test)]
mod tests {
    use super::parse_fen;
    use crate::errors::NotationError;
    use crate::game_state::chess_rules::STARTING_POSITION_FEN;
    use crate::game_state::chess_types::{Color, PieceKind};
    use crate::game_state::position::Position;

    #[test]
    fn starting_fen_matches_the_built_in_start() {
        let parsed = parse_fen(STARTING_POSITION_FEN).expect("starting FEN should parse");
        assert_eq!(parsed, Position::new());
        assert_eq!(parsed.hash(), Position::new().hash());
    }

    #[test]
    fn startpos_shorthand_is_accepted() {
        let parsed = parse_fen("startpos").expect("startpos should parse");
        assert_eq!(parsed, Position::new());
    }

    #[test]
    fn mid_game_fen_fields_are_read() {
        let position = parse_fen("r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1")
            .expect("FEN should parse");
        assert_eq!(position.turn(), Color::Light);
        assert!(position.can_castle_kingside(Color::Dark));
        assert_eq!(position.en_passant_target(), None);
        assert_eq!(position.board().get(36), Some((Color::Light, PieceKind::Knight))); // e5
    }

    #[test]
    fn en_passant_square_is_parsed() {
        let position = parse_fen("rnbqkbnr/ppp1pppp/8/3pP3/8/8/PPPP1PPP/RNBQKBNR w KQkq d6 0 2")
            .expect("FEN should parse");
        assert_eq!(position.en_passant_target(), Some(43)); // d6
    }

    #[test]
    fn malformed_fens_are_rejected() {
        assert_eq!(parse_fen(""), Err(NotationError::EmptyFen));
        assert!(matches!(
            parse_fen("8/8/8/8/8/8/8 w - - 0 1"),
            Err(NotationError::MalformedBoard(_))
        ));
        assert!(matches!(
            parse_fen("8/8/8/8/8/8/8/9 w - - 0 1"),
            Err(NotationError::MalformedBoard(_))
        ));
        assert!(matches!(
            parse_fen("8/8/8/8/8/8/8/8 x - - 0 1"),
            Err(NotationError::InvalidSideField(_))
        ));
        assert!(matches!(
            parse_fen("8/8/8/8/8/8/8/8 w KZ - 0 1"),
            Err(NotationError::InvalidCastlingChar('Z'))
        ));
        assert!(matches!(
            parse_fen("8/8/8/8/8/8/8/8 w - e9 0 1"),
            Err(NotationError::InvalidSquare(_))
        ));
        assert!(matches!(
            parse_fen("8/8/8/8/8/8/8/8 w - - x 1"),
            Err(NotationError::InvalidClock(_))
        ));
        assert!(matches!(
            parse_fen("8/8/8/8/8/8/8/8 w - - 0 1 extra"),
            Err(NotationError::TrailingFenFields)
        ));
        assert!(matches!(
            parse_fen("8/8/8/8/8/8/8/x7 w - - 0 1"),
            Err(NotationError::InvalidPieceChar('x'))
        ));
    }
}
