//! Bitboard set algebra.
//!
//! A bitboard is a set of squares: bit `i` is set exactly when square `i`
//! is in the set. Set-versus-set union, intersection, and complement are
//! the native `|`, `&`, and `!` operators; this module adds the
//! square-oriented operations plus directional shifting and ray casting.

use crate::game_state::chess_types::{Direction, File, Rank, Square};

/// Set of squares packed into 64 bits, A1 at bit 0.
pub type Bitboard = u64;

pub const EMPTY_SET: Bitboard = 0;
pub const UNIVERSAL_SET: Bitboard = !0;

/// The set containing only the given square.
#[inline]
pub const fn square_set(sq: Square) -> Bitboard {
    1u64 << sq
}

/// The set of all squares on the given file.
#[inline]
pub const fn file_set(file: File) -> Bitboard {
    0x0101_0101_0101_0101u64 << file
}

/// The set of all squares on the given rank.
#[inline]
pub const fn rank_set(rank: Rank) -> Bitboard {
    0xFFu64 << (rank * 8)
}

#[inline]
pub const fn set_contains(bb: Bitboard, sq: Square) -> bool {
    bb & square_set(sq) != 0
}

#[inline]
pub const fn set_insert(bb: Bitboard, sq: Square) -> Bitboard {
    bb | square_set(sq)
}

#[inline]
pub const fn set_erase(bb: Bitboard, sq: Square) -> Bitboard {
    bb & !square_set(sq)
}

#[inline]
pub const fn set_toggle(bb: Bitboard, sq: Square) -> Bitboard {
    bb ^ square_set(sq)
}

/// Number of squares in the set.
#[inline]
pub const fn set_cardinality(bb: Bitboard) -> u32 {
    bb.count_ones()
}

/// First square in a non-empty set, counting from A1.
#[inline]
pub const fn set_first(bb: Bitboard) -> Square {
    bb.trailing_zeros() as Square
}

/// Last square in a non-empty set, counting from A1.
#[inline]
pub const fn set_last(bb: Bitboard) -> Square {
    (63 - bb.leading_zeros()) as Square
}

/// All squares in the set, in ascending order.
pub fn set_elements(mut bb: Bitboard) -> Vec<Square> {
    let mut elements = Vec::with_capacity(set_cardinality(bb) as usize);
    while bb != EMPTY_SET {
        let sq = set_first(bb);
        elements.push(sq);
        bb = set_erase(bb, sq);
    }
    elements
}

/// Translate the whole set one step in the given direction.
///
/// Bits that would wrap across the board edge are discarded: shifting a
/// pawn on the H file north-east must not produce a square on the A file.
#[inline]
pub const fn set_shift(bb: Bitboard, d: Direction) -> Bitboard {
    let offset = d.offset();
    let shifted = if offset >= 0 {
        bb << offset as u32
    } else {
        bb >> (-offset) as u32
    };
    shifted & !wrap_set(d)
}

/// Files that a shift in the given direction would wrap into.
const fn wrap_set(d: Direction) -> Bitboard {
    match d {
        Direction::East
        | Direction::NorthEast
        | Direction::SouthEast
        | Direction::NorthNorthEast
        | Direction::SouthSouthEast => file_set(0),
        Direction::West
        | Direction::NorthWest
        | Direction::SouthWest
        | Direction::NorthNorthWest
        | Direction::SouthSouthWest => file_set(7),
        Direction::EastNorthEast | Direction::EastSouthEast => file_set(0) | file_set(1),
        Direction::WestNorthWest | Direction::WestSouthWest => file_set(6) | file_set(7),
        Direction::North | Direction::South => EMPTY_SET,
    }
}

/// Cast rays from every square of the set in the given direction.
///
/// Each ray extends until it hits the board edge or a square of
/// `occupied`; the first occupied square is included, squares behind it
/// are not.
pub const fn set_ray(bb: Bitboard, d: Direction, occupied: Bitboard) -> Bitboard {
    let mut step = bb;
    let mut ray = EMPTY_SET;
    while step != EMPTY_SET && step & occupied == EMPTY_SET {
        step = set_shift(step, d);
        ray |= step;
    }
    ray
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_state::chess_types::Direction;

    #[test]
    fn file_and_rank_masks() {
        assert_eq!(file_set(0) & rank_set(0), square_set(0));
        assert_eq!(set_cardinality(file_set(4)), 8);
        assert_eq!(set_cardinality(rank_set(6)), 8);
        assert_eq!(file_set(7) & rank_set(7), square_set(63));
    }

    #[test]
    fn insert_erase_toggle() {
        let bb = set_insert(EMPTY_SET, 27);
        assert!(set_contains(bb, 27));
        assert_eq!(set_erase(bb, 27), EMPTY_SET);
        assert_eq!(set_toggle(set_toggle(bb, 9), 9), bb);
    }

    #[test]
    fn first_and_last_squares() {
        let bb = square_set(5) | square_set(42) | square_set(60);
        assert_eq!(set_first(bb), 5);
        assert_eq!(set_last(bb), 60);
        assert_eq!(set_elements(bb), vec![5, 42, 60]);
    }

    #[test]
    fn shift_discards_wrapping_bits() {
        // A pawn on h4 shifted north-east must fall off the board.
        assert_eq!(set_shift(square_set(31), Direction::NorthEast), EMPTY_SET);
        // Shifting file A west vanishes entirely.
        assert_eq!(set_shift(file_set(0), Direction::West), EMPTY_SET);
        // North off the top rank vanishes.
        assert_eq!(set_shift(rank_set(7), Direction::North), EMPTY_SET);
        // A knight jump east-north-east from g1 would wrap twice.
        assert_eq!(
            set_shift(square_set(6), Direction::EastNorthEast),
            EMPTY_SET
        );
    }

    #[test]
    fn shift_then_opposite_restores_interior_bits() {
        let cases = [
            (Direction::North, rank_set(7)),
            (Direction::East, file_set(7)),
            (Direction::NorthEast, file_set(7) | rank_set(7)),
            (Direction::SouthWest, file_set(0) | rank_set(0)),
            (
                Direction::EastNorthEast,
                file_set(6) | file_set(7) | rank_set(7),
            ),
            (
                Direction::SouthSouthWest,
                file_set(0) | rank_set(0) | rank_set(1),
            ),
        ];
        let samples = [
            UNIVERSAL_SET,
            0x00FF_00FF_00FF_00FF,
            0x8040_2010_0804_0201,
            square_set(0) | square_set(63) | square_set(28),
        ];
        for (d, falls_off) in cases {
            for bb in samples {
                assert_eq!(
                    set_shift(set_shift(bb, d), d.opposite()),
                    bb & !falls_off,
                    "direction {d:?}"
                );
            }
        }
    }

    #[test]
    fn ray_includes_first_blocker_only() {
        // Rook-style ray north from a1 with a blocker on a4.
        let ray = set_ray(square_set(0), Direction::North, square_set(24));
        assert!(set_contains(ray, 8));
        assert!(set_contains(ray, 16));
        assert!(set_contains(ray, 24));
        assert!(!set_contains(ray, 32));
    }

    #[test]
    fn ray_runs_to_the_edge_without_blockers() {
        let ray = set_ray(square_set(27), Direction::NorthEast, EMPTY_SET);
        assert_eq!(ray, square_set(36) | square_set(45) | square_set(54) | square_set(63));
    }
}
