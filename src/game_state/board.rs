//! Piece placement model.
//!
//! The board keeps redundant representations of the same placement: a
//! per-square occupant array for O(1) lookups, per-side and per-kind
//! bitboards for setwise move generation, and an incrementally maintained
//! Zobrist hash over the placement. Every mutation goes through [`Board::set`],
//! which keeps all four in lockstep.

use crate::bitboard::{set_erase, set_first, set_insert, Bitboard, EMPTY_SET};
use crate::game_state::chess_types::{square_at, Color, PieceKind, Square};
use crate::moves::king_moves::king_attack_set;
use crate::moves::knight_moves::knight_attack_set;
use crate::moves::pawn_moves::{pawn_east_attack_set, pawn_west_attack_set};
use crate::moves::sliding_moves::{bishop_attack_set, queen_attack_set, rook_attack_set};
use crate::zobrist;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    squares: [Option<(Color, PieceKind)>; 64],
    side_sets: [Bitboard; 2],
    piece_sets: [Bitboard; 6],
    zobrist_hash: u64,
}

impl Board {
    /// Board with no pieces on it.
    pub fn empty() -> Self {
        Self {
            squares: [None; 64],
            side_sets: [EMPTY_SET; 2],
            piece_sets: [EMPTY_SET; 6],
            zobrist_hash: 0,
        }
    }

    /// Board with the standard starting array.
    pub fn standard() -> Self {
        const BACK_RANK: [PieceKind; 8] = [
            PieceKind::Rook,
            PieceKind::Knight,
            PieceKind::Bishop,
            PieceKind::Queen,
            PieceKind::King,
            PieceKind::Bishop,
            PieceKind::Knight,
            PieceKind::Rook,
        ];

        let mut board = Self::empty();
        for file in 0..8 {
            board.set(square_at(file, 0), Some((Color::Light, BACK_RANK[file as usize])));
            board.set(square_at(file, 1), Some((Color::Light, PieceKind::Pawn)));
            board.set(square_at(file, 6), Some((Color::Dark, PieceKind::Pawn)));
            board.set(square_at(file, 7), Some((Color::Dark, BACK_RANK[file as usize])));
        }
        board
    }

    /// Board with the given placements, everything else empty.
    pub fn with_pieces(pieces: &[(Square, Color, PieceKind)]) -> Self {
        let mut board = Self::empty();
        for &(sq, color, kind) in pieces {
            board.set(sq, Some((color, kind)));
        }
        board
    }

    /// Occupant of a square.
    #[inline]
    pub fn get(&self, sq: Square) -> Option<(Color, PieceKind)> {
        self.squares[sq as usize]
    }

    /// Place or remove a piece, updating the square array, both bitboard
    /// views, and the placement hash together.
    pub fn set(&mut self, sq: Square, occupant: Option<(Color, PieceKind)>) {
        if let Some((prev_color, prev_kind)) = self.squares[sq as usize] {
            self.side_sets[prev_color.index()] = set_erase(self.side_sets[prev_color.index()], sq);
            self.piece_sets[prev_kind.index()] = set_erase(self.piece_sets[prev_kind.index()], sq);
            self.zobrist_hash ^= zobrist::piece_key(sq, prev_color, prev_kind);
        }

        self.squares[sq as usize] = occupant;

        if let Some((color, kind)) = occupant {
            self.side_sets[color.index()] = set_insert(self.side_sets[color.index()], sq);
            self.piece_sets[kind.index()] = set_insert(self.piece_sets[kind.index()], sq);
            self.zobrist_hash ^= zobrist::piece_key(sq, color, kind);
        }
    }

    /// Remove every piece.
    pub fn clear(&mut self) {
        self.squares = [None; 64];
        self.side_sets = [EMPTY_SET; 2];
        self.piece_sets = [EMPTY_SET; 6];
        self.zobrist_hash = 0;
    }

    /// All squares occupied by the given side.
    #[inline]
    pub fn side_set(&self, color: Color) -> Bitboard {
        self.side_sets[color.index()]
    }

    /// All squares holding the given piece kind, either side.
    #[inline]
    pub fn piece_set(&self, kind: PieceKind) -> Bitboard {
        self.piece_sets[kind.index()]
    }

    /// All squares holding the given piece kind of one side.
    #[inline]
    pub fn side_piece_set(&self, kind: PieceKind, color: Color) -> Bitboard {
        self.piece_sets[kind.index()] & self.side_sets[color.index()]
    }

    /// All occupied squares.
    #[inline]
    pub fn occupied_set(&self) -> Bitboard {
        self.side_sets[Color::Light.index()] | self.side_sets[Color::Dark.index()]
    }

    /// All empty squares.
    #[inline]
    pub fn empty_set(&self) -> Bitboard {
        !self.occupied_set()
    }

    /// Every square attacked by the given side.
    ///
    /// King and leaper attacks are pseudo-attacks: squares occupied by
    /// friendly pieces are included. Callers wanting destination squares
    /// intersect with the complement of their own side.
    pub fn attack_set(&self, color: Color) -> Bitboard {
        let occupied = self.occupied_set();

        let pawns = self.side_piece_set(PieceKind::Pawn, color);
        let mut attacks =
            pawn_east_attack_set(pawns, color) | pawn_west_attack_set(pawns, color);

        let mut rooks = self.side_piece_set(PieceKind::Rook, color);
        while rooks != EMPTY_SET {
            let from = set_first(rooks);
            rooks = set_erase(rooks, from);
            attacks |= rook_attack_set(from, occupied);
        }

        let mut knights = self.side_piece_set(PieceKind::Knight, color);
        while knights != EMPTY_SET {
            let from = set_first(knights);
            knights = set_erase(knights, from);
            attacks |= knight_attack_set(from);
        }

        let mut bishops = self.side_piece_set(PieceKind::Bishop, color);
        while bishops != EMPTY_SET {
            let from = set_first(bishops);
            bishops = set_erase(bishops, from);
            attacks |= bishop_attack_set(from, occupied);
        }

        let mut queens = self.side_piece_set(PieceKind::Queen, color);
        while queens != EMPTY_SET {
            let from = set_first(queens);
            queens = set_erase(queens, from);
            attacks |= queen_attack_set(from, occupied);
        }

        let mut kings = self.side_piece_set(PieceKind::King, color);
        while kings != EMPTY_SET {
            let from = set_first(kings);
            kings = set_erase(kings, from);
            attacks |= king_attack_set(from);
        }

        attacks
    }

    /// Zobrist hash over the placement only.
    #[inline]
    pub fn hash(&self) -> u64 {
        self.zobrist_hash
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bitboard::{rank_set, set_cardinality, square_set};
    use crate::game_state::chess_types::ALL_PIECE_KINDS;

    fn assert_invariants(board: &Board) {
        let mut side_sets = [EMPTY_SET; 2];
        let mut piece_sets = [EMPTY_SET; 6];
        let mut hash = 0u64;
        for sq in 0..64u8 {
            if let Some((color, kind)) = board.get(sq) {
                side_sets[color.index()] |= square_set(sq);
                piece_sets[kind.index()] |= square_set(sq);
                hash ^= zobrist::piece_key(sq, color, kind);
            }
        }
        assert_eq!(board.side_set(Color::Light), side_sets[0]);
        assert_eq!(board.side_set(Color::Dark), side_sets[1]);
        for kind in ALL_PIECE_KINDS {
            assert_eq!(board.piece_set(kind), piece_sets[kind.index()]);
        }
        assert_eq!(board.side_set(Color::Light) & board.side_set(Color::Dark), EMPTY_SET);
        assert_eq!(board.hash(), hash);
    }

    #[test]
    fn standard_board_holds_thirty_two_pieces() {
        let board = Board::standard();
        assert_eq!(set_cardinality(board.occupied_set()), 32);
        assert_eq!(set_cardinality(board.piece_set(PieceKind::Pawn)), 16);
        assert_eq!(set_cardinality(board.side_piece_set(PieceKind::King, Color::Light)), 1);
        assert_eq!(board.get(4), Some((Color::Light, PieceKind::King)));
        assert_eq!(board.get(60), Some((Color::Dark, PieceKind::King)));
        assert_invariants(&board);
    }

    #[test]
    fn set_replaces_and_clears_consistently() {
        let mut board = Board::standard();
        let original_hash = board.hash();

        // Capture: a dark queen lands on e2.
        board.set(12, Some((Color::Dark, PieceKind::Queen)));
        assert_invariants(&board);
        assert_ne!(board.hash(), original_hash);

        // Putting the pawn back restores the exact hash.
        board.set(12, Some((Color::Light, PieceKind::Pawn)));
        assert_invariants(&board);
        assert_eq!(board.hash(), original_hash);

        board.clear();
        assert_eq!(board.occupied_set(), EMPTY_SET);
        assert_eq!(board.hash(), 0);
        assert_invariants(&board);
    }

    #[test]
    fn with_pieces_places_exactly_the_given_pieces() {
        let board = Board::with_pieces(&[
            (0, Color::Light, PieceKind::King),
            (63, Color::Dark, PieceKind::King),
            (27, Color::Light, PieceKind::Queen),
        ]);
        assert_eq!(set_cardinality(board.occupied_set()), 3);
        assert_eq!(board.get(27), Some((Color::Light, PieceKind::Queen)));
        assert_invariants(&board);
    }

    #[test]
    fn start_position_attacks_cover_the_third_rank() {
        let board = Board::standard();
        let attacks = board.attack_set(Color::Light);
        assert_eq!(attacks & rank_set(2), rank_set(2));
        // Nothing reaches past rank 3 from the start.
        assert_eq!(attacks & (rank_set(4) | rank_set(5) | rank_set(6) | rank_set(7)), EMPTY_SET);
    }

    #[test]
    fn attack_set_includes_friendly_squares() {
        // A king next to its own pawn still "attacks" the pawn square.
        let board = Board::with_pieces(&[
            (4, Color::Light, PieceKind::King),
            (12, Color::Light, PieceKind::Pawn),
        ]);
        assert_ne!(board.attack_set(Color::Light) & square_set(12), EMPTY_SET);
    }
}
