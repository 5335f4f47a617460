//! Long algebraic notation (LAN) for moves.
//!
//! A LAN move is four or five characters: source square, destination
//! square, and an optional lowercase promotion letter, as in `e2e4` or
//! `h7h8q`. Parsing needs the position for one rule only: a pawn move
//! onto its last rank without a promotion letter is rejected rather than
//! defaulted.

use crate::errors::NotationError;
use crate::game_state::chess_move::Move;
use crate::game_state::chess_types::{rank_of, relative_rank, PieceKind};
use crate::game_state::position::Position;
use crate::utils::algebraic::{algebraic_to_square, square_to_algebraic};

pub fn parse_lan_move(lan: &str, position: &Position) -> Result<Move, NotationError> {
    if !lan.is_ascii() || !(4..=5).contains(&lan.len()) {
        return Err(NotationError::InvalidLan(lan.to_owned()));
    }

    let from = algebraic_to_square(&lan[0..2])?;
    let to = algebraic_to_square(&lan[2..4])?;

    let promote = if lan.len() == 5 {
        Some(promotion_from_char(lan.as_bytes()[4] as char)?)
    } else {
        None
    };

    if promote.is_none() {
        if let Some((color, PieceKind::Pawn)) = position.board().get(from) {
            if rank_of(to) == relative_rank(color, 7) {
                return Err(NotationError::MissingPromotion(lan.to_owned()));
            }
        }
    }

    Ok(Move::new(from, to, promote))
}

pub fn move_to_lan(m: &Move) -> String {
    let mut lan = square_to_algebraic(m.from);
    lan.push_str(&square_to_algebraic(m.to));
    if let Some(kind) = m.promote {
        lan.push(promotion_to_char(kind));
    }
    lan
}

fn promotion_from_char(c: char) -> Result<PieceKind, NotationError> {
    match c {
        'r' => Ok(PieceKind::Rook),
        'n' => Ok(PieceKind::Knight),
        'b' => Ok(PieceKind::Bishop),
        'q' => Ok(PieceKind::Queen),
        _ => Err(NotationError::InvalidPromotion(c)),
    }
}

fn promotion_to_char(kind: PieceKind) -> char {
    match kind {
        PieceKind::Pawn => 'p',
        PieceKind::Knight => 'n',
        PieceKind::Bishop => 'b',
        PieceKind::Rook => 'r',
        PieceKind::Queen => 'q',
        PieceKind::King => 'k',
    }
}

#[cfg(test)]
mod tests {
    use super::{move_to_lan, parse_lan_move};
    use crate::errors::NotationError;
    use crate::game_state::chess_move::Move;
    use crate::game_state::chess_types::PieceKind;
    use crate::game_state::position::Position;

    #[test]
    fn simple_moves_round_trip() {
        let position = Position::new();
        let m = parse_lan_move("e2e4", &position).expect("move should parse");
        assert_eq!(m, Move::new(12, 28, None));
        assert_eq!(move_to_lan(&m), "e2e4");
    }

    #[test]
    fn promotions_round_trip() {
        let position = Position::from_fen("k7/4P3/8/8/8/8/8/K7 w - - 0 1").expect("FEN should parse");
        let m = parse_lan_move("e7e8q", &position).expect("move should parse");
        assert_eq!(m, Move::new(52, 60, Some(PieceKind::Queen)));
        assert_eq!(move_to_lan(&m), "e7e8q");
    }

    #[test]
    fn pawn_to_last_rank_requires_a_promotion_letter() {
        let position = Position::from_fen("k7/4P3/8/8/8/8/8/K7 w - - 0 1").expect("FEN should parse");
        assert_eq!(
            parse_lan_move("e7e8", &position),
            Err(NotationError::MissingPromotion("e7e8".to_owned()))
        );
    }

    #[test]
    fn non_pawn_moves_to_the_back_rank_need_no_promotion() {
        let position = Position::from_fen("k7/4R3/8/8/8/8/8/K7 w - - 0 1").expect("FEN should parse");
        assert!(parse_lan_move("e7e8", &position).is_ok());
    }

    #[test]
    fn malformed_lan_is_rejected() {
        let position = Position::new();
        for text in ["", "e2", "e2e", "e2e4x9", "i2i4", "e2e9"] {
            assert!(parse_lan_move(text, &position).is_err(), "{text:?}");
        }
        assert_eq!(
            parse_lan_move("e7e8k", &position),
            Err(NotationError::InvalidPromotion('k'))
        );
    }
}
