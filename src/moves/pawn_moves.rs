use crate::bitboard::{set_shift, Bitboard};
use crate::game_state::chess_types::{pawn_east, pawn_west, Color};

/// Squares attacked in the east capture direction by a set of pawns.
#[inline]
pub const fn pawn_east_attack_set(pawns: Bitboard, color: Color) -> Bitboard {
    set_shift(pawns, pawn_east(color))
}

/// Squares attacked in the west capture direction by a set of pawns.
#[inline]
pub const fn pawn_west_attack_set(pawns: Bitboard, color: Color) -> Bitboard {
    set_shift(pawns, pawn_west(color))
}

#[cfg(test)]
mod tests {
    use super::{pawn_east_attack_set, pawn_west_attack_set};
    use crate::bitboard::square_set;
    use crate::game_state::chess_types::Color;

    #[test]
    fn light_pawn_attacks_from_e2() {
        let e2 = square_set(12);
        assert_eq!(pawn_east_attack_set(e2, Color::Light), square_set(21)); // f3
        assert_eq!(pawn_west_attack_set(e2, Color::Light), square_set(19)); // d3
    }

    #[test]
    fn dark_pawn_attacks_from_e7() {
        let e7 = square_set(52);
        assert_eq!(pawn_east_attack_set(e7, Color::Dark), square_set(45)); // f6
        assert_eq!(pawn_west_attack_set(e7, Color::Dark), square_set(43)); // d6
    }

    #[test]
    fn rim_pawns_attack_one_square_only() {
        let a4 = square_set(24);
        assert_eq!(pawn_west_attack_set(a4, Color::Light), 0);
        assert_eq!(pawn_east_attack_set(a4, Color::Light), square_set(33)); // b5

        let h5 = square_set(39);
        assert_eq!(pawn_east_attack_set(h5, Color::Dark), 0);
        assert_eq!(pawn_west_attack_set(h5, Color::Dark), square_set(30)); // g4
    }
}
