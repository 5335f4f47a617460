//! Position state and the legal move generator.
//!
//! A position is a board plus the side to move, castling permissions,
//! en-passant target, and the two move clocks. The hashing term kept here
//! covers only those rights; the publicly observable fingerprint XORs it
//! with the board's placement hash. `make_move` and `undo_move` maintain
//! every field and both hash terms incrementally and are exact inverses.

use crate::bitboard::{
    rank_set, set_erase, set_first, set_shift, square_set, Bitboard, EMPTY_SET,
};
use crate::errors::NotationError;
use crate::game_state::board::Board;
use crate::game_state::chess_move::Move;
use crate::game_state::chess_types::{
    file_of, forwards, pawn_east, pawn_west, rank_of, relative_rank, square_at, square_shade,
    Color, Direction, PieceKind, Square, BOTH_COLORS, PROMOTION_KINDS,
};
use crate::game_state::undo_state::Undo;
use crate::moves::king_moves::king_attack_set;
use crate::moves::knight_moves::knight_attack_set;
use crate::moves::sliding_moves::{bishop_attack_set, queen_attack_set, rook_attack_set};
use crate::utils::fen_generator::generate_fen;
use crate::utils::fen_parser::parse_fen;
use crate::utils::render::render_position;
use crate::zobrist;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Position {
    board: Board,
    turn: Color,
    kingside_castle: [bool; 2],
    queenside_castle: [bool; 2],
    en_passant: Option<Square>,
    halfmove_clock: u16,
    fullmove_number: u16,
    // Zobrist term over turn, castling, and en-passant only; the board
    // keeps its own placement term.
    zobrist_hash: u64,
}

impl Position {
    /// The standard starting position.
    pub fn new() -> Self {
        Self::from_state(
            Board::standard(),
            Color::Light,
            [true, true],
            [true, true],
            None,
            0,
            1,
        )
    }

    /// Position assembled from its observable parts. Well-formedness
    /// (such as each side owning exactly one king) is not checked.
    pub fn from_state(
        board: Board,
        turn: Color,
        kingside_castle: [bool; 2],
        queenside_castle: [bool; 2],
        en_passant: Option<Square>,
        halfmove_clock: u16,
        fullmove_number: u16,
    ) -> Self {
        let mut zobrist_hash = 0u64;
        if turn == Color::Dark {
            zobrist_hash ^= zobrist::side_key();
        }
        for color in BOTH_COLORS {
            if kingside_castle[color.index()] {
                zobrist_hash ^= zobrist::kingside_castle_key(color);
            }
            if queenside_castle[color.index()] {
                zobrist_hash ^= zobrist::queenside_castle_key(color);
            }
        }
        if let Some(ep) = en_passant {
            zobrist_hash ^= zobrist::en_passant_key(file_of(ep));
        }

        Self {
            board,
            turn,
            kingside_castle,
            queenside_castle,
            en_passant,
            halfmove_clock,
            fullmove_number,
            zobrist_hash,
        }
    }

    #[inline]
    pub fn from_fen(fen: &str) -> Result<Self, NotationError> {
        parse_fen(fen)
    }

    #[inline]
    pub fn to_fen(&self) -> String {
        generate_fen(self)
    }

    /// Board rendering plus the state flags, for diagnostics.
    #[inline]
    pub fn to_text(&self) -> String {
        render_position(self)
    }

    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[inline]
    pub fn turn(&self) -> Color {
        self.turn
    }

    #[inline]
    pub fn can_castle_kingside(&self, color: Color) -> bool {
        self.kingside_castle[color.index()]
    }

    #[inline]
    pub fn can_castle_queenside(&self, color: Color) -> bool {
        self.queenside_castle[color.index()]
    }

    #[inline]
    pub fn en_passant_target(&self) -> Option<Square> {
        self.en_passant
    }

    #[inline]
    pub fn halfmove_clock(&self) -> u16 {
        self.halfmove_clock
    }

    #[inline]
    pub fn fullmove_number(&self) -> u16 {
        self.fullmove_number
    }

    /// Plies played since the game start implied by the move counters.
    #[inline]
    pub fn halfmove(&self) -> u16 {
        (self.fullmove_number - 1) * 2 + self.turn.index() as u16
    }

    /// Position fingerprint: the placement hash folded with the rights
    /// hash. Equal fingerprints identify equal (placement, turn,
    /// castling, en-passant file) tuples up to Zobrist collisions.
    #[inline]
    pub fn hash(&self) -> u64 {
        self.zobrist_hash ^ self.board.hash()
    }

    /// Apply a move, returning the record needed to take it back.
    ///
    /// The move must come from [`Position::moves`] (or be legal in this
    /// position); calling this with an empty source square is a contract
    /// violation and panics.
    pub fn make_move(&mut self, m: &Move) -> Undo {
        let capture = self.board.get(m.to).map(|(_, kind)| kind);
        let undo = Undo {
            capture,
            en_passant: self.en_passant,
            kingside_castle: self.kingside_castle,
            queenside_castle: self.queenside_castle,
            halfmove_clock: self.halfmove_clock,
        };

        let (side, kind) = self
            .board
            .get(m.from)
            .expect("make_move called with an empty source square");
        let previous_ep = self.en_passant;

        self.board.set(m.from, None);
        match m.promote {
            Some(promoted) => self.board.set(m.to, Some((side, promoted))),
            None => self.board.set(m.to, Some((side, kind))),
        }

        self.en_passant = None;
        if let Some(ep) = previous_ep {
            self.zobrist_hash ^= zobrist::en_passant_key(file_of(ep));
        }

        if kind == PieceKind::Pawn {
            if rank_of(m.from) == relative_rank(side, 1) && rank_of(m.to) == relative_rank(side, 3)
            {
                // Double push: the square in between becomes capturable.
                let ep = square_at(file_of(m.from), relative_rank(side, 2));
                self.en_passant = Some(ep);
                self.zobrist_hash ^= zobrist::en_passant_key(file_of(ep));
            } else if previous_ep == Some(m.to) {
                // En-passant capture: the pawn sits one rank behind.
                let captured_pawn = square_at(file_of(m.to), relative_rank(side, 4));
                self.board.set(captured_pawn, None);
            }
        } else if kind == PieceKind::King {
            self.revoke_kingside(side);
            self.revoke_queenside(side);

            let first = relative_rank(side, 0);
            if m.from == square_at(4, first) {
                if m.to == square_at(6, first) {
                    self.board.set(square_at(7, first), None);
                    self.board.set(square_at(5, first), Some((side, PieceKind::Rook)));
                } else if m.to == square_at(2, first) {
                    self.board.set(square_at(0, first), None);
                    self.board.set(square_at(3, first), Some((side, PieceKind::Rook)));
                }
            }
        }

        // A rook leaving or being captured on its corner square drops the
        // corresponding right, whichever piece made the move.
        if m.from == 0 || m.to == 0 {
            self.revoke_queenside(Color::Light);
        }
        if m.from == 7 || m.to == 7 {
            self.revoke_kingside(Color::Light);
        }
        if m.from == 56 || m.to == 56 {
            self.revoke_queenside(Color::Dark);
        }
        if m.from == 63 || m.to == 63 {
            self.revoke_kingside(Color::Dark);
        }

        if kind == PieceKind::Pawn || capture.is_some() {
            self.halfmove_clock = 0;
        } else {
            self.halfmove_clock += 1;
        }

        if self.turn == Color::Dark {
            self.fullmove_number += 1;
        }
        self.turn = self.turn.opposite();
        self.zobrist_hash ^= zobrist::side_key();

        undo
    }

    /// Take back a move made by [`Position::make_move`]. The move and
    /// undo record must be the pair returned for this position.
    pub fn undo_move(&mut self, m: &Move, undo: &Undo) {
        let (side, kind) = self
            .board
            .get(m.to)
            .expect("undo_move called with an empty destination square");

        self.board.set(m.from, Some((side, kind)));
        self.board.set(m.to, None);
        if let Some(capture) = undo.capture {
            self.board.set(m.to, Some((side.opposite(), capture)));
        }
        if m.promote.is_some() {
            self.board.set(m.from, Some((side, PieceKind::Pawn)));
        }

        if let Some(ep) = self.en_passant {
            self.zobrist_hash ^= zobrist::en_passant_key(file_of(ep));
        }
        if let Some(ep) = undo.en_passant {
            self.zobrist_hash ^= zobrist::en_passant_key(file_of(ep));
        }
        self.en_passant = undo.en_passant;

        for color in BOTH_COLORS {
            if self.kingside_castle[color.index()] != undo.kingside_castle[color.index()] {
                self.kingside_castle[color.index()] = undo.kingside_castle[color.index()];
                self.zobrist_hash ^= zobrist::kingside_castle_key(color);
            }
            if self.queenside_castle[color.index()] != undo.queenside_castle[color.index()] {
                self.queenside_castle[color.index()] = undo.queenside_castle[color.index()];
                self.zobrist_hash ^= zobrist::queenside_castle_key(color);
            }
        }

        if kind == PieceKind::Pawn {
            if undo.en_passant == Some(m.to) {
                let captured_pawn = square_at(file_of(m.to), relative_rank(side, 4));
                self.board.set(captured_pawn, Some((side.opposite(), PieceKind::Pawn)));
            }
        } else if kind == PieceKind::King {
            let first = relative_rank(side, 0);
            if m.from == square_at(4, first) {
                if m.to == square_at(6, first) {
                    self.board.set(square_at(7, first), Some((side, PieceKind::Rook)));
                    self.board.set(square_at(5, first), None);
                } else if m.to == square_at(2, first) {
                    self.board.set(square_at(0, first), Some((side, PieceKind::Rook)));
                    self.board.set(square_at(3, first), None);
                }
            }
        }

        self.halfmove_clock = undo.halfmove_clock;
        if self.turn == Color::Light {
            self.fullmove_number -= 1;
        }
        self.turn = self.turn.opposite();
        self.zobrist_hash ^= zobrist::side_key();
    }

    /// The position after the move, leaving this one untouched.
    pub fn copy_move(&self, m: &Move) -> Self {
        let mut next = self.clone();
        next.make_move(m);
        next
    }

    /// Every legal move in this position.
    ///
    /// Pawn moves are generated setwise: the target set of each move
    /// class is one shift of the pawn set, and the source set is the
    /// inverse shift of the targets, so popping both in lockstep pairs
    /// every source with its target. Sliders and leapers enumerate table
    /// attacks per piece, castling checks the original path rules, and a
    /// final copy-make filter drops every move that leaves the mover's
    /// king attacked.
    pub fn moves(&self) -> Vec<Move> {
        let mut moves = Vec::with_capacity(64);

        let turn = self.turn;
        let occupied = self.board.occupied_set();
        let destination_mask = !self.board.side_set(turn);
        let capture_mask = self.board.side_set(turn.opposite());
        let ep_mask = match self.en_passant {
            Some(ep) => square_set(ep),
            None => EMPTY_SET,
        };

        let pawns = self.board.side_piece_set(PieceKind::Pawn, turn);
        let forward = forwards(turn);
        let backward = forward.opposite();

        let mut single_push_tos = set_shift(pawns, forward) & !occupied;
        let mut single_push_froms = set_shift(single_push_tos, backward);
        let double_push_tos =
            set_shift(single_push_tos & rank_set(relative_rank(turn, 2)), forward) & !occupied;
        let double_push_froms = set_shift(set_shift(double_push_tos, backward), backward);

        let mut east_tos = set_shift(pawns, pawn_east(turn)) & (capture_mask | ep_mask);
        let mut east_froms = set_shift(east_tos, pawn_east(turn).opposite());
        let mut west_tos = set_shift(pawns, pawn_west(turn)) & (capture_mask | ep_mask);
        let mut west_froms = set_shift(west_tos, pawn_west(turn).opposite());

        let last_rank = rank_set(relative_rank(turn, 7));
        let seventh_rank = rank_set(relative_rank(turn, 6));
        let promote_push_tos = single_push_tos & last_rank;
        let promote_push_froms = single_push_froms & seventh_rank;
        let promote_east_tos = east_tos & last_rank;
        let promote_east_froms = east_froms & seventh_rank;
        let promote_west_tos = west_tos & last_rank;
        let promote_west_froms = west_froms & seventh_rank;

        single_push_tos ^= promote_push_tos;
        single_push_froms ^= promote_push_froms;
        east_tos ^= promote_east_tos;
        east_froms ^= promote_east_froms;
        west_tos ^= promote_west_tos;
        west_froms ^= promote_west_froms;

        setwise_moves(single_push_froms, single_push_tos, None, &mut moves);
        setwise_moves(double_push_froms, double_push_tos, None, &mut moves);
        setwise_moves(east_froms, east_tos, None, &mut moves);
        setwise_moves(west_froms, west_tos, None, &mut moves);

        for promote in PROMOTION_KINDS {
            setwise_moves(promote_push_froms, promote_push_tos, Some(promote), &mut moves);
            setwise_moves(promote_east_froms, promote_east_tos, Some(promote), &mut moves);
            setwise_moves(promote_west_froms, promote_west_tos, Some(promote), &mut moves);
        }

        let mut rooks = self.board.side_piece_set(PieceKind::Rook, turn);
        while rooks != EMPTY_SET {
            let from = set_first(rooks);
            rooks = set_erase(rooks, from);
            piecewise_moves(from, rook_attack_set(from, occupied) & destination_mask, &mut moves);
        }

        let mut knights = self.board.side_piece_set(PieceKind::Knight, turn);
        while knights != EMPTY_SET {
            let from = set_first(knights);
            knights = set_erase(knights, from);
            piecewise_moves(from, knight_attack_set(from) & destination_mask, &mut moves);
        }

        let mut bishops = self.board.side_piece_set(PieceKind::Bishop, turn);
        while bishops != EMPTY_SET {
            let from = set_first(bishops);
            bishops = set_erase(bishops, from);
            piecewise_moves(from, bishop_attack_set(from, occupied) & destination_mask, &mut moves);
        }

        let mut queens = self.board.side_piece_set(PieceKind::Queen, turn);
        while queens != EMPTY_SET {
            let from = set_first(queens);
            queens = set_erase(queens, from);
            piecewise_moves(from, queen_attack_set(from, occupied) & destination_mask, &mut moves);
        }

        let kings = self.board.side_piece_set(PieceKind::King, turn);
        if kings != EMPTY_SET
            && (self.kingside_castle[turn.index()] || self.queenside_castle[turn.index()])
        {
            let danger = self.board.attack_set(turn.opposite());
            let from = set_first(kings);

            if self.kingside_castle[turn.index()] {
                // path = {E, F, G}; the squares between king and rook
                // destination must be empty and the whole path safe.
                let mut path = kings;
                path |= set_shift(path, Direction::East);
                path |= set_shift(path, Direction::East);
                let between = path & !kings;

                if between & occupied == EMPTY_SET && path & danger == EMPTY_SET {
                    moves.push(Move::new(from, square_at(6, rank_of(from)), None));
                }
            }
            if self.queenside_castle[turn.index()] {
                // path = {E, D, C} must be safe; emptiness additionally
                // covers the B square the rook passes over.
                let mut path = kings;
                path |= set_shift(path, Direction::West);
                path |= set_shift(path, Direction::West);
                let between = set_shift(path, Direction::West);

                if between & occupied == EMPTY_SET && path & danger == EMPTY_SET {
                    moves.push(Move::new(from, square_at(2, rank_of(from)), None));
                }
            }
        }

        let mut king_steps = kings;
        while king_steps != EMPTY_SET {
            let from = set_first(king_steps);
            king_steps = set_erase(king_steps, from);
            piecewise_moves(from, king_attack_set(from) & destination_mask, &mut moves);
        }

        // Keep only moves that do not leave the mover's king attacked.
        moves.retain(|m| {
            let next = self.copy_move(m);
            next.board.attack_set(turn.opposite()) & next.board.side_piece_set(PieceKind::King, turn)
                == EMPTY_SET
        });

        moves
    }

    /// Whether the side to move is in check.
    pub fn is_check(&self) -> bool {
        self.board.attack_set(self.turn.opposite())
            & self.board.side_piece_set(PieceKind::King, self.turn)
            != EMPTY_SET
    }

    pub fn is_checkmate(&self) -> bool {
        self.is_check() && self.moves().is_empty()
    }

    pub fn is_stalemate(&self) -> bool {
        !self.is_check() && self.moves().is_empty()
    }

    pub fn is_fiftymove_rule(&self) -> bool {
        self.halfmove_clock >= 100
    }

    pub fn is_seventyfivemove_rule(&self) -> bool {
        self.halfmove_clock >= 150
    }

    /// Neither side retains enough material to deliver mate: no pawns,
    /// rooks, or queens, and at most a lone minor piece overall, or one
    /// bishop each travelling on the same square shade.
    pub fn is_insufficient_material(&self) -> bool {
        let board = &self.board;
        if board.piece_set(PieceKind::Pawn)
            | board.piece_set(PieceKind::Rook)
            | board.piece_set(PieceKind::Queen)
            != EMPTY_SET
        {
            return false;
        }

        let knights = board.piece_set(PieceKind::Knight).count_ones();
        let bishops = board.piece_set(PieceKind::Bishop).count_ones();

        if (knights == 0 && bishops <= 1) || (knights <= 1 && bishops == 0) {
            return true;
        }

        let light_bishops = board.side_piece_set(PieceKind::Bishop, Color::Light);
        let dark_bishops = board.side_piece_set(PieceKind::Bishop, Color::Dark);
        if knights == 0 && light_bishops.count_ones() == 1 && dark_bishops.count_ones() == 1 {
            return square_shade(set_first(light_bishops)) == square_shade(set_first(dark_bishops));
        }

        false
    }

    fn revoke_kingside(&mut self, color: Color) {
        if self.kingside_castle[color.index()] {
            self.kingside_castle[color.index()] = false;
            self.zobrist_hash ^= zobrist::kingside_castle_key(color);
        }
    }

    fn revoke_queenside(&mut self, color: Color) {
        if self.queenside_castle[color.index()] {
            self.queenside_castle[color.index()] = false;
            self.zobrist_hash ^= zobrist::queenside_castle_key(color);
        }
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::new()
    }
}

/// Pop matching source/target squares off two bitboards in lockstep.
///
/// Both sets come from mutually inverse shifts of the same base set, so
/// the n-th square of `froms` always pairs with the n-th square of `tos`.
fn setwise_moves(
    mut froms: Bitboard,
    mut tos: Bitboard,
    promote: Option<PieceKind>,
    moves: &mut Vec<Move>,
) {
    while froms != EMPTY_SET && tos != EMPTY_SET {
        let from = set_first(froms);
        let to = set_first(tos);
        froms = set_erase(froms, from);
        tos = set_erase(tos, to);
        moves.push(Move::new(from, to, promote));
    }
}

fn piecewise_moves(from: Square, mut tos: Bitboard, moves: &mut Vec<Move>) {
    while tos != EMPTY_SET {
        let to = set_first(tos);
        tos = set_erase(tos, to);
        moves.push(Move::new(from, to, None));
    }
}
