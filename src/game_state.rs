pub mod board;
pub mod chess_move;
pub mod chess_rules;
pub mod chess_types;
pub mod game;
pub mod position;
pub mod undo_state;
