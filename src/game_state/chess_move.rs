use crate::game_state::chess_types::{PieceKind, Square};

/// A chess move: source square, destination square, and the promotion
/// piece when a pawn reaches its last rank.
///
/// Promotion is always explicit. The move generator emits four moves for
/// each promoting pawn, and the notation layer rejects promotion moves
/// written without a piece letter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    pub from: Square,
    pub to: Square,
    pub promote: Option<PieceKind>,
}

impl Move {
    #[inline]
    pub const fn new(from: Square, to: Square, promote: Option<PieceKind>) -> Self {
        Self { from, to, promote }
    }
}
