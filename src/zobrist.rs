//! Zobrist hashing keys.
//!
//! Every independently varying aspect of a position gets its own random
//! 64-bit key: each (square, side, piece) occupancy, each castling
//! permission, the en-passant file, and the side to move. Position
//! fingerprints are XOR folds over these keys, so any single change
//! toggles exactly one key in and out. The keys are drawn from the shared
//! engine RNG stream during [`crate::init`] and are immutable afterwards.

use crate::game_state::chess_types::{Color, File, PieceKind, Square};
use crate::init;
use crate::random::Xorshift64;

#[derive(Debug)]
pub(crate) struct ZobristKeys {
    piece_keys: [[[u64; 6]; 2]; 64],
    kingside_castle_keys: [u64; 2],
    queenside_castle_keys: [u64; 2],
    en_passant_keys: [u64; 8],
    side_key: u64,
}

impl ZobristKeys {
    pub(crate) fn generate(rng: &mut Xorshift64) -> Self {
        let mut piece_keys = [[[0u64; 6]; 2]; 64];
        for square in piece_keys.iter_mut() {
            for piece in 0..6 {
                square[Color::Light.index()][piece] = rng.next_u64();
                square[Color::Dark.index()][piece] = rng.next_u64();
            }
        }

        let kingside_castle_keys = [rng.next_u64(), rng.next_u64()];
        let queenside_castle_keys = [rng.next_u64(), rng.next_u64()];

        let mut en_passant_keys = [0u64; 8];
        for key in en_passant_keys.iter_mut() {
            *key = rng.next_u64();
        }

        let side_key = rng.next_u64();

        Self {
            piece_keys,
            kingside_castle_keys,
            queenside_castle_keys,
            en_passant_keys,
            side_key,
        }
    }
}

/// Key for a `(square, side, piece)` occupancy term.
#[inline]
pub fn piece_key(sq: Square, color: Color, piece: PieceKind) -> u64 {
    init::tables().zobrist.piece_keys[sq as usize][color.index()][piece.index()]
}

/// Key for the kingside castling permission of a side.
#[inline]
pub fn kingside_castle_key(color: Color) -> u64 {
    init::tables().zobrist.kingside_castle_keys[color.index()]
}

/// Key for the queenside castling permission of a side.
#[inline]
pub fn queenside_castle_key(color: Color) -> u64 {
    init::tables().zobrist.queenside_castle_keys[color.index()]
}

/// Key for an en-passant target on the given file. Only the file enters
/// the fingerprint; the rank is implied by the side to move.
#[inline]
pub fn en_passant_key(file: File) -> u64 {
    init::tables().zobrist.en_passant_keys[file as usize]
}

/// Toggle key for dark to move.
#[inline]
pub fn side_key() -> u64 {
    init::tables().zobrist.side_key
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_state::chess_types::{Color, PieceKind};

    #[test]
    fn generation_is_deterministic() {
        let mut a = Xorshift64::new(7);
        let mut b = Xorshift64::new(7);
        let keys_a = ZobristKeys::generate(&mut a);
        let keys_b = ZobristKeys::generate(&mut b);
        assert_eq!(keys_a.piece_keys, keys_b.piece_keys);
        assert_eq!(keys_a.side_key, keys_b.side_key);
        assert_eq!(keys_a.en_passant_keys, keys_b.en_passant_keys);
    }

    #[test]
    fn keys_separate_independent_aspects() {
        assert_ne!(
            piece_key(0, Color::Light, PieceKind::Rook),
            piece_key(0, Color::Dark, PieceKind::Rook)
        );
        assert_ne!(
            piece_key(12, Color::Light, PieceKind::Pawn),
            piece_key(13, Color::Light, PieceKind::Pawn)
        );
        assert_ne!(
            kingside_castle_key(Color::Light),
            queenside_castle_key(Color::Light)
        );
        assert_ne!(en_passant_key(0), en_passant_key(7));
        assert_ne!(side_key(), 0);
    }
}
