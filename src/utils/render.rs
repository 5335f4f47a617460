//! Text rendering of boards and positions, for logs and debugging.

use std::fmt::Write;

use crate::game_state::board::Board;
use crate::game_state::chess_types::{square_at, Color};
use crate::game_state::position::Position;
use crate::utils::algebraic::piece_to_char;

/// Render the board rank 8 first, `.` for empty squares, with rank and
/// file coordinates along the edges.
pub fn render_board(board: &Board) -> String {
    let mut out = String::with_capacity(90);

    for rank in (0..8u8).rev() {
        let _ = write!(out, "{}", rank + 1);
        for file in 0..8u8 {
            match board.get(square_at(file, rank)) {
                Some((color, kind)) => out.push(piece_to_char(color, kind)),
                None => out.push('.'),
            }
        }
        out.push('\n');
    }
    out.push_str(" abcdefgh\n");

    out
}

/// Render the board followed by the position's state flags.
pub fn render_position(position: &Position) -> String {
    let mut out = render_board(position.board());

    let _ = writeln!(
        out,
        "turn: {}",
        match position.turn() {
            Color::Light => "white",
            Color::Dark => "black",
        }
    );
    let _ = writeln!(
        out,
        "castling: {}{}{}{}",
        if position.can_castle_kingside(Color::Light) { "K" } else { "" },
        if position.can_castle_queenside(Color::Light) { "Q" } else { "" },
        if position.can_castle_kingside(Color::Dark) { "k" } else { "" },
        if position.can_castle_queenside(Color::Dark) { "q" } else { "" },
    );
    let _ = writeln!(
        out,
        "halfmove clock: {}\nfullmove number: {}",
        position.halfmove_clock(),
        position.fullmove_number()
    );

    out
}
