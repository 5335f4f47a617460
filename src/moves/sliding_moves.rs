//! Magic-bitboard attack tables for the sliding pieces.
//!
//! Every (square, slider) pair stores a mask of the relevant blocker
//! squares, a magic multiplier, and a slice of a shared attack table.
//! A lookup is then `((occupied & mask) * magic) >> shift` into that
//! slice. The magics are found at startup by drawing sparse random
//! candidates until one maps every relevant occupancy to a consistent
//! table slot.

use crate::bitboard::{
    file_set, rank_set, set_cardinality, set_ray, square_set, Bitboard, EMPTY_SET,
};
use crate::game_state::chess_types::{file_of, rank_of, Direction, Square};
use crate::init;
use crate::random::Xorshift64;

const ROOK_DIRECTIONS: [Direction; 4] = [
    Direction::North,
    Direction::East,
    Direction::South,
    Direction::West,
];

const BISHOP_DIRECTIONS: [Direction; 4] = [
    Direction::NorthEast,
    Direction::SouthEast,
    Direction::SouthWest,
    Direction::NorthWest,
];

/// Total attack-table entries across all 64 squares for each slider.
const ROOK_TABLE_SIZE: usize = 0x19000;
const BISHOP_TABLE_SIZE: usize = 0x1480;

/// At most 12 relevant blocker squares per mask on an 8x8 board.
const MAX_OCCUPANCIES: usize = 4096;

#[derive(Debug, Clone, Copy)]
struct MagicEntry {
    mask: Bitboard,
    magic: u64,
    shift: u32,
    offset: usize,
}

impl MagicEntry {
    const EMPTY: Self = Self {
        mask: EMPTY_SET,
        magic: 0,
        shift: 0,
        offset: 0,
    };

    #[inline]
    fn index(&self, occupied: Bitboard) -> usize {
        self.offset + (((occupied & self.mask).wrapping_mul(self.magic) >> self.shift) as usize)
    }
}

#[derive(Debug)]
pub(crate) struct SlidingAttacks {
    rook_magics: [MagicEntry; 64],
    rook_table: Vec<Bitboard>,
    bishop_magics: [MagicEntry; 64],
    bishop_table: Vec<Bitboard>,
}

impl SlidingAttacks {
    pub(crate) fn generate(rng: &mut Xorshift64) -> Self {
        let (rook_magics, rook_table) = build_slider_tables(ROOK_DIRECTIONS, ROOK_TABLE_SIZE, rng);
        let (bishop_magics, bishop_table) =
            build_slider_tables(BISHOP_DIRECTIONS, BISHOP_TABLE_SIZE, rng);
        Self {
            rook_magics,
            rook_table,
            bishop_magics,
            bishop_table,
        }
    }
}

/// Squares a rook on `sq` attacks given the occupied set.
#[inline]
pub fn rook_attack_set(sq: Square, occupied: Bitboard) -> Bitboard {
    let attacks = &init::tables().attacks;
    attacks.rook_table[attacks.rook_magics[sq as usize].index(occupied)]
}

/// Squares a bishop on `sq` attacks given the occupied set.
#[inline]
pub fn bishop_attack_set(sq: Square, occupied: Bitboard) -> Bitboard {
    let attacks = &init::tables().attacks;
    attacks.bishop_table[attacks.bishop_magics[sq as usize].index(occupied)]
}

/// Squares a queen on `sq` attacks given the occupied set.
#[inline]
pub fn queen_attack_set(sq: Square, occupied: Bitboard) -> Bitboard {
    rook_attack_set(sq, occupied) | bishop_attack_set(sq, occupied)
}

/// Ray-cast reference attacks, used to build and verify the magic tables.
fn ray_attack_set(sq: Square, directions: [Direction; 4], occupied: Bitboard) -> Bitboard {
    let bb = square_set(sq);
    let mut attacks = EMPTY_SET;
    for d in directions {
        attacks |= set_ray(bb, d, occupied);
    }
    attacks
}

fn build_slider_tables(
    directions: [Direction; 4],
    table_size: usize,
    rng: &mut Xorshift64,
) -> ([MagicEntry; 64], Vec<Bitboard>) {
    let mut magics = [MagicEntry::EMPTY; 64];
    let mut table = vec![EMPTY_SET; table_size];

    let mut occupancies = [EMPTY_SET; MAX_OCCUPANCIES];
    let mut references = [EMPTY_SET; MAX_OCCUPANCIES];
    let mut epoch = [0u32; MAX_OCCUPANCIES];
    let mut attempt = 0u32;
    let mut offset = 0usize;

    for sq in 0..64u8 {
        // Relevant blockers exclude the outer edge of each ray: a piece on
        // the last square of a ray cannot shorten it.
        let edges = ((rank_set(0) | rank_set(7)) & !rank_set(rank_of(sq)))
            | ((file_set(0) | file_set(7)) & !file_set(file_of(sq)));
        let mask = ray_attack_set(sq, directions, EMPTY_SET) & !edges;
        let shift = 64 - set_cardinality(mask);

        // Enumerate every subset of the mask (Carry-Rippler) together with
        // the true attack set it produces.
        let mut size = 0usize;
        let mut occupied = EMPTY_SET;
        loop {
            occupancies[size] = occupied;
            references[size] = ray_attack_set(sq, directions, occupied);
            size += 1;
            occupied = occupied.wrapping_sub(mask) & mask;
            if occupied == EMPTY_SET {
                break;
            }
        }

        let entry = &mut magics[sq as usize];
        entry.mask = mask;
        entry.shift = shift;
        entry.offset = offset;

        // Draw sparse candidates until one maps every occupancy to a slot
        // holding its attack set. The epoch counter invalidates slots from
        // failed attempts without clearing the table.
        let mut verified = 0usize;
        while verified < size {
            entry.magic = 0;
            while set_cardinality(entry.magic.wrapping_mul(mask) >> 56) < 6 {
                entry.magic = rng.next_sparse();
            }

            attempt += 1;
            verified = 0;
            while verified < size {
                let index = entry.index(occupancies[verified]);
                if epoch[index - offset] < attempt {
                    epoch[index - offset] = attempt;
                    table[index] = references[verified];
                } else if table[index] != references[verified] {
                    break;
                }
                verified += 1;
            }
        }

        offset += 1usize << set_cardinality(mask);
    }

    debug_assert_eq!(offset, table_size);
    (magics, table)
}
