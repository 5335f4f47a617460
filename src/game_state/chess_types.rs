//! Core coordinate types shared across the engine.
//!
//! Squares are numbered 0..=63 with A1 = 0 in file-major order, so
//! `rank = square / 8` and `file = square % 8`. Directions are the signed
//! single-step offsets on that numbering.

pub use crate::game_state::board::Board;
pub use crate::game_state::chess_move::Move;
pub use crate::game_state::game::Game;
pub use crate::game_state::position::Position;
pub use crate::game_state::undo_state::Undo;

/// Side to move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    Light,
    Dark,
}

impl Color {
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            Color::Light => 0,
            Color::Dark => 1,
        }
    }

    #[inline]
    pub const fn opposite(self) -> Self {
        match self {
            Color::Light => Color::Dark,
            Color::Dark => Color::Light,
        }
    }
}

pub const BOTH_COLORS: [Color; 2] = [Color::Light, Color::Dark];

/// Piece kind (color is represented separately for cache-friendly layouts).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceKind {
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            PieceKind::Pawn => 0,
            PieceKind::Knight => 1,
            PieceKind::Bishop => 2,
            PieceKind::Rook => 3,
            PieceKind::Queen => 4,
            PieceKind::King => 5,
        }
    }
}

pub const ALL_PIECE_KINDS: [PieceKind; 6] = [
    PieceKind::Pawn,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Rook,
    PieceKind::Queen,
    PieceKind::King,
];

/// The four kinds a pawn may promote to.
pub const PROMOTION_KINDS: [PieceKind; 4] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
];

/// Board square index (`0..=63`).
pub type Square = u8;

/// Board file index (`0..=7`, A = 0).
pub type File = u8;

/// Board rank index (`0..=7`, rank 1 = 0).
pub type Rank = u8;

#[inline]
pub const fn file_of(sq: Square) -> File {
    sq % 8
}

#[inline]
pub const fn rank_of(sq: Square) -> Rank {
    sq / 8
}

#[inline]
pub const fn square_at(file: File, rank: Rank) -> Square {
    rank * 8 + file
}

/// Rank index as seen from the given side.
///
/// For light the rank is unchanged; for dark rank 0 refers to rank 8 of
/// the physical board, rank 1 to rank 7, and so on.
#[inline]
pub const fn relative_rank(color: Color, rank: Rank) -> Rank {
    match color {
        Color::Light => rank,
        Color::Dark => 7 - rank,
    }
}

/// Checkered shade of a square (0 or 1). A1 and H8 share shade 0.
#[inline]
pub const fn square_shade(sq: Square) -> u8 {
    (file_of(sq) + rank_of(sq)) % 2
}

/// Single-step movement directions on the square numbering.
///
/// Kings and sliders use the eight compass directions, knights the eight
/// two-step jumps (north-north-east and so on).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    North,
    NorthEast,
    East,
    SouthEast,
    South,
    SouthWest,
    West,
    NorthWest,
    NorthNorthEast,
    EastNorthEast,
    EastSouthEast,
    SouthSouthEast,
    SouthSouthWest,
    WestSouthWest,
    WestNorthWest,
    NorthNorthWest,
}

impl Direction {
    /// Signed square-index offset of one step in this direction.
    #[inline]
    pub const fn offset(self) -> i8 {
        match self {
            Direction::North => 8,
            Direction::NorthEast => 9,
            Direction::East => 1,
            Direction::SouthEast => -7,
            Direction::South => -8,
            Direction::SouthWest => -9,
            Direction::West => -1,
            Direction::NorthWest => 7,
            Direction::NorthNorthEast => 17,
            Direction::EastNorthEast => 10,
            Direction::EastSouthEast => -6,
            Direction::SouthSouthEast => -15,
            Direction::SouthSouthWest => -17,
            Direction::WestSouthWest => -10,
            Direction::WestNorthWest => 6,
            Direction::NorthNorthWest => 15,
        }
    }

    #[inline]
    pub const fn opposite(self) -> Self {
        match self {
            Direction::North => Direction::South,
            Direction::NorthEast => Direction::SouthWest,
            Direction::East => Direction::West,
            Direction::SouthEast => Direction::NorthWest,
            Direction::South => Direction::North,
            Direction::SouthWest => Direction::NorthEast,
            Direction::West => Direction::East,
            Direction::NorthWest => Direction::SouthEast,
            Direction::NorthNorthEast => Direction::SouthSouthWest,
            Direction::EastNorthEast => Direction::WestSouthWest,
            Direction::EastSouthEast => Direction::WestNorthWest,
            Direction::SouthSouthEast => Direction::NorthNorthWest,
            Direction::SouthSouthWest => Direction::NorthNorthEast,
            Direction::WestSouthWest => Direction::EastNorthEast,
            Direction::WestNorthWest => Direction::EastSouthEast,
            Direction::NorthNorthWest => Direction::SouthSouthEast,
        }
    }
}

/// Pawn push direction for the given side.
#[inline]
pub const fn forwards(color: Color) -> Direction {
    match color {
        Color::Light => Direction::North,
        Color::Dark => Direction::South,
    }
}

/// Eastward pawn capture direction for the given side.
#[inline]
pub const fn pawn_east(color: Color) -> Direction {
    match color {
        Color::Light => Direction::NorthEast,
        Color::Dark => Direction::SouthEast,
    }
}

/// Westward pawn capture direction for the given side.
#[inline]
pub const fn pawn_west(color: Color) -> Direction {
    match color {
        Color::Light => Direction::NorthWest,
        Color::Dark => Direction::SouthWest,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn square_coordinates_round_trip() {
        for sq in 0..64u8 {
            assert_eq!(square_at(file_of(sq), rank_of(sq)), sq);
        }
        assert_eq!(square_at(4, 0), 4); // e1
        assert_eq!(square_at(4, 7), 60); // e8
    }

    #[test]
    fn relative_rank_mirrors_for_dark() {
        assert_eq!(relative_rank(Color::Light, 1), 1);
        assert_eq!(relative_rank(Color::Dark, 1), 6);
        assert_eq!(relative_rank(Color::Dark, 0), 7);
    }

    #[test]
    fn direction_offsets_cancel_with_opposite() {
        let directions = [
            Direction::North,
            Direction::NorthEast,
            Direction::East,
            Direction::SouthEast,
            Direction::NorthNorthEast,
            Direction::EastNorthEast,
            Direction::EastSouthEast,
            Direction::SouthSouthEast,
        ];
        for d in directions {
            assert_eq!(d.offset(), -d.opposite().offset());
        }
    }

    #[test]
    fn square_shade_alternates() {
        assert_eq!(square_shade(0), 0); // a1
        assert_eq!(square_shade(1), 1); // b1
        assert_eq!(square_shade(8), 1); // a2
        assert_eq!(square_shade(63), 0); // h8
    }
}
