//! Square conversions for coordinate notation.
//!
//! Converts between human-readable coordinates (for example `e4`) and
//! square indices, and between piece letters and `(color, kind)` pairs.
//! Shared by the FEN and long-algebraic codecs.

use crate::errors::NotationError;
use crate::game_state::chess_types::{file_of, rank_of, Color, PieceKind, Square};

/// Convert algebraic coordinates (for example `"e4"`) to a square index.
pub fn algebraic_to_square(text: &str) -> Result<Square, NotationError> {
    let bytes = text.as_bytes();
    if bytes.len() != 2 {
        return Err(NotationError::InvalidSquare(text.to_owned()));
    }

    let file = bytes[0];
    let rank = bytes[1];
    if !(b'a'..=b'h').contains(&file) || !(b'1'..=b'8').contains(&rank) {
        return Err(NotationError::InvalidSquare(text.to_owned()));
    }

    Ok((rank - b'1') * 8 + (file - b'a'))
}

/// Convert a square index to algebraic coordinates.
pub fn square_to_algebraic(sq: Square) -> String {
    debug_assert!(sq < 64);
    let file = char::from(b'a' + file_of(sq));
    let rank = char::from(b'1' + rank_of(sq));
    format!("{file}{rank}")
}

/// Piece letter for a colored piece: uppercase for light, lowercase for
/// dark.
pub fn piece_to_char(color: Color, kind: PieceKind) -> char {
    let letter = match kind {
        PieceKind::Pawn => 'p',
        PieceKind::Knight => 'n',
        PieceKind::Bishop => 'b',
        PieceKind::Rook => 'r',
        PieceKind::Queen => 'q',
        PieceKind::King => 'k',
    };
    match color {
        Color::Light => letter.to_ascii_uppercase(),
        Color::Dark => letter,
    }
}

/// Colored piece for a piece letter, or `None` when the character does
/// not denote a piece.
pub fn piece_from_char(c: char) -> Option<(Color, PieceKind)> {
    let color = if c.is_ascii_uppercase() {
        Color::Light
    } else if c.is_ascii_lowercase() {
        Color::Dark
    } else {
        return None;
    };

    let kind = match c.to_ascii_lowercase() {
        'p' => PieceKind::Pawn,
        'n' => PieceKind::Knight,
        'b' => PieceKind::Bishop,
        'r' => PieceKind::Rook,
        'q' => PieceKind::Queen,
        'k' => PieceKind::King,
        _ => return None,
    };

    Some((color, kind))
}
