//! Game history on top of a position.
//!
//! A game owns a position, the stack of `(move, undo)` pairs that reached
//! it, and a count of how often each fingerprint has occurred, which is
//! what the repetition draw rules are phrased over.

use rustc_hash::FxHashMap;

use crate::game_state::chess_move::Move;
use crate::game_state::position::Position;
use crate::game_state::undo_state::Undo;
use crate::game_state::chess_types::Color;

#[derive(Debug, Clone)]
pub struct Game {
    position: Position,
    history: Vec<(Move, Undo)>,
    repetitions: FxHashMap<u64, u32>,
}

impl Game {
    /// Game starting from the standard position.
    pub fn new() -> Self {
        Self::from_position(Position::new())
    }

    /// Game starting from an arbitrary position.
    pub fn from_position(position: Position) -> Self {
        let mut repetitions = FxHashMap::default();
        repetitions.insert(position.hash(), 1);
        Self {
            position,
            history: Vec::new(),
            repetitions,
        }
    }

    /// Game starting from a position with a line of moves already played.
    pub fn with_moves(position: Position, moves: &[Move]) -> Self {
        let mut game = Self::from_position(position);
        for m in moves {
            game.push(*m);
        }
        game
    }

    /// Play a move, recording it for [`Game::pop`] and counting the new
    /// fingerprint.
    pub fn push(&mut self, m: Move) {
        let undo = self.position.make_move(&m);
        self.history.push((m, undo));
        *self.repetitions.entry(self.position.hash()).or_insert(0) += 1;
    }

    /// Take back the most recent move. Calling this on a game with no
    /// history is a contract violation and panics.
    pub fn pop(&mut self) -> Move {
        let (m, undo) = self.history.pop().expect("pop called on a game with no history");

        let count = self
            .repetitions
            .get_mut(&self.position.hash())
            .expect("current fingerprint must be counted");
        *count -= 1;
        if *count == 0 {
            self.repetitions.remove(&self.position.hash());
        }

        self.position.undo_move(&m, &undo);
        m
    }

    #[inline]
    pub fn position(&self) -> &Position {
        &self.position
    }

    /// Moves played since the game's starting position.
    #[inline]
    pub fn len(&self) -> usize {
        self.history.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }

    /// How often the current fingerprint has occurred in this game.
    #[inline]
    pub fn repetitions(&self) -> u32 {
        self.repetitions.get(&self.position.hash()).copied().unwrap_or(0)
    }

    pub fn is_check(&self) -> bool {
        self.position.is_check()
    }

    pub fn is_checkmate(&self) -> bool {
        self.position.is_checkmate()
    }

    pub fn is_stalemate(&self) -> bool {
        self.position.is_stalemate()
    }

    pub fn is_threefold_repetition(&self) -> bool {
        self.repetitions() >= 3
    }

    pub fn is_fivefold_repetition(&self) -> bool {
        self.repetitions() >= 5
    }

    pub fn is_fiftymove_rule(&self) -> bool {
        self.position.is_fiftymove_rule()
    }

    pub fn is_seventyfivemove_rule(&self) -> bool {
        self.position.is_seventyfivemove_rule()
    }

    pub fn is_insufficient_material(&self) -> bool {
        self.position.is_insufficient_material()
    }

    /// Whether the game has ended by mate or one of the draw rules the
    /// engine adjudicates automatically.
    pub fn is_terminal(&self) -> bool {
        self.is_checkmate()
            || self.is_stalemate()
            || self.is_threefold_repetition()
            || self.is_fiftymove_rule()
            || self.is_insufficient_material()
    }

    /// Score of the game for the given side: 1 for a win, 0 for a loss,
    /// 0.5 for any draw, and `None` while the game is still running.
    pub fn get_score(&self, side: Color) -> Option<f32> {
        if !self.is_terminal() {
            return None;
        }
        if self.is_checkmate() {
            if self.position.turn() == side.opposite() {
                Some(1.0)
            } else {
                Some(0.0)
            }
        } else {
            Some(0.5)
        }
    }

    /// Like [`Game::get_score`] but on the conventional search scale:
    /// 1 for a win, -1 for a loss, 0 for a draw.
    pub fn get_value(&self, side: Color) -> Option<i32> {
        if !self.is_terminal() {
            return None;
        }
        if self.is_checkmate() {
            if self.position.turn() == side.opposite() {
                Some(1)
            } else {
                Some(-1)
            }
        } else {
            Some(0)
        }
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}
