//! # Chess Engine Core Types
//!
//! ## Overview
//!
//! This module defines the value types shared by every part of the engine: colors, piece kinds,
//! moves, castling rights and game outcomes. The board itself stays a compact signed mailbox
//! (`Board = [i8; 64]`), see [`crate::constants`] for the encoding.
//!
//! ### Why i8 for Board Representation?
//!
//! - **Sign bit = color**: `piece < 0` is black, `piece > 0` is white
//! - **Absolute value = type**: `abs(piece)` gives the piece ID (1 = pawn, ..., 6 = king)
//! - **Compact storage**: 64 bytes total, so cloning a position for a search is cheap
//!
//! ## The `Move` Structure
//!
//! A [`Move`] is an origin square, a destination square and an optional promotion piece. It is
//! written and parsed in coordinate notation (`e2e4`, `e7e8q`), which is what the remote server
//! sends and expects. A move only has meaning relative to a position: `e1g1` is castling in one
//! position and an illegal king jump in another.

use std::fmt;
use std::str::FromStr;

use crate::board::{parse_square, square_name};
use crate::constants::*;
use crate::error::{ChessEngineError, ChessEngineResult};

pub type Board = [i8; 64];
pub type Square = u8;

/// Side of the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    White,
    Black,
}

impl Color {
    pub fn opponent(self) -> Color {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    /// `1` for White, `-1` for Black. Multiplying a piece ID by the sign yields the board code.
    pub fn sign(self) -> i8 {
        match self {
            Color::White => 1,
            Color::Black => -1,
        }
    }

    pub fn index(self) -> usize {
        match self {
            Color::White => 0,
            Color::Black => 1,
        }
    }

    /// Color of a board cell, `None` for an empty square.
    pub fn of_piece(piece: i8) -> Option<Color> {
        match piece {
            p if p > 0 => Some(Color::White),
            p if p < 0 => Some(Color::Black),
            _ => None,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::White => write!(f, "white"),
            Color::Black => write!(f, "black"),
        }
    }
}

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
    pub fn id(self) -> i8 {
        match self {
            PieceKind::Pawn => PAWN_ID,
            PieceKind::Knight => KNIGHT_ID,
            PieceKind::Bishop => BISHOP_ID,
            PieceKind::Rook => ROOK_ID,
            PieceKind::Queen => QUEEN_ID,
            PieceKind::King => KING_ID,
        }
    }

    pub fn from_id(id: i8) -> Option<PieceKind> {
        match id.abs() {
            PAWN_ID => Some(PieceKind::Pawn),
            KNIGHT_ID => Some(PieceKind::Knight),
            BISHOP_ID => Some(PieceKind::Bishop),
            ROOK_ID => Some(PieceKind::Rook),
            QUEEN_ID => Some(PieceKind::Queen),
            KING_ID => Some(PieceKind::King),
            _ => None,
        }
    }

    pub fn value(self) -> i32 {
        FIGURE_VALUE[self.id() as usize]
    }

    /// Board code of this piece for the given color.
    pub fn code(self, color: Color) -> i8 {
        self.id() * color.sign()
    }

    /// Lowercase letter used by coordinate notation and FEN.
    pub fn letter(self) -> char {
        match self {
            PieceKind::Pawn => 'p',
            PieceKind::Knight => 'n',
            PieceKind::Bishop => 'b',
            PieceKind::Rook => 'r',
            PieceKind::Queen => 'q',
            PieceKind::King => 'k',
        }
    }

    pub fn from_letter(c: char) -> Option<PieceKind> {
        match c.to_ascii_lowercase() {
            'p' => Some(PieceKind::Pawn),
            'n' => Some(PieceKind::Knight),
            'b' => Some(PieceKind::Bishop),
            'r' => Some(PieceKind::Rook),
            'q' => Some(PieceKind::Queen),
            'k' => Some(PieceKind::King),
            _ => None,
        }
    }
}

/// A move in coordinate form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    pub src: Square,
    pub dst: Square,
    pub promotion: Option<PieceKind>,
}

impl Move {
    pub fn new(src: Square, dst: Square) -> Self {
        Move {
            src,
            dst,
            promotion: None,
        }
    }

    pub fn with_promotion(src: Square, dst: Square, promotion: PieceKind) -> Self {
        Move {
            src,
            dst,
            promotion: Some(promotion),
        }
    }

    /// Parse coordinate notation such as `e2e4` or `a7a8q`.
    pub fn from_uci(text: &str) -> ChessEngineResult<Move> {
        let invalid = || ChessEngineError::ParseMove {
            text: text.to_string(),
        };
        if !text.is_ascii() || !(4..=5).contains(&text.len()) {
            return Err(invalid());
        }
        let src = parse_square(&text[0..2]).ok_or_else(invalid)?;
        let dst = parse_square(&text[2..4]).ok_or_else(invalid)?;
        let promotion = match text[4..].chars().next() {
            None => None,
            Some(c) => match PieceKind::from_letter(c) {
                Some(PieceKind::Pawn) | Some(PieceKind::King) | None => return Err(invalid()),
                kind => kind,
            },
        };
        Ok(Move {
            src,
            dst,
            promotion,
        })
    }

    pub fn to_uci(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", square_name(self.src), square_name(self.dst))?;
        if let Some(kind) = self.promotion {
            write!(f, "{}", kind.letter())?;
        }
        Ok(())
    }
}

impl FromStr for Move {
    type Err = ChessEngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Move::from_uci(s)
    }
}

/// Castling rights as a four-bit set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct CastlingRights(u8);

impl CastlingRights {
    pub const WHITE_KINGSIDE: u8 = 0b0001;
    pub const WHITE_QUEENSIDE: u8 = 0b0010;
    pub const BLACK_KINGSIDE: u8 = 0b0100;
    pub const BLACK_QUEENSIDE: u8 = 0b1000;

    pub const fn all() -> Self {
        CastlingRights(0b1111)
    }

    pub const fn none() -> Self {
        CastlingRights(0)
    }

    pub fn bits(self) -> u8 {
        self.0
    }

    pub fn has(self, flag: u8) -> bool {
        self.0 & flag != 0
    }

    pub fn insert(&mut self, flag: u8) {
        self.0 |= flag;
    }

    pub fn remove(&mut self, flag: u8) {
        self.0 &= !flag;
    }

    pub fn kingside(color: Color) -> u8 {
        match color {
            Color::White => Self::WHITE_KINGSIDE,
            Color::Black => Self::BLACK_KINGSIDE,
        }
    }

    pub fn queenside(color: Color) -> u8 {
        match color {
            Color::White => Self::WHITE_QUEENSIDE,
            Color::Black => Self::BLACK_QUEENSIDE,
        }
    }

    /// Rights with colors exchanged, used when mirroring a position.
    pub fn swapped(self) -> Self {
        CastlingRights(((self.0 & 0b0011) << 2) | ((self.0 & 0b1100) >> 2))
    }
}

/// Why a game ended in a draw without a claim.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawReason {
    InsufficientMaterial,
    SeventyFiveMoves,
    FivefoldRepetition,
}

/// State of the game from the rules' point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    Ongoing,
    /// The side to move is checkmated.
    Checkmate,
    Stalemate,
    Draw(DrawReason),
}

impl GameStatus {
    pub fn is_terminal(self) -> bool {
        !matches!(self, GameStatus::Ongoing)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_move_uci_round_trip() {
        let mv = Move::from_uci("e2e4").unwrap();
        assert_eq!(mv.src, 12);
        assert_eq!(mv.dst, 28);
        assert_eq!(mv.promotion, None);
        assert_eq!(mv.to_uci(), "e2e4");

        let promo: Move = "a7a8n".parse().unwrap();
        assert_eq!(promo.promotion, Some(PieceKind::Knight));
        assert_eq!(promo.to_string(), "a7a8n");
    }

    #[test]
    fn test_move_parse_rejects_garbage() {
        for text in ["", "e2", "e2e9", "i2e4", "e7e8k", "e7e8x", "e2e4qq", "é2e4"] {
            assert!(Move::from_uci(text).is_err(), "{text} should not parse");
        }
    }

    #[test]
    fn test_castling_rights_swap() {
        let mut rights = CastlingRights::none();
        rights.insert(CastlingRights::WHITE_KINGSIDE);
        rights.insert(CastlingRights::BLACK_QUEENSIDE);
        let swapped = rights.swapped();
        assert!(swapped.has(CastlingRights::BLACK_KINGSIDE));
        assert!(swapped.has(CastlingRights::WHITE_QUEENSIDE));
        assert!(!swapped.has(CastlingRights::WHITE_KINGSIDE));
        assert_eq!(swapped.swapped(), rights);
    }

    #[test]
    fn test_piece_codes() {
        assert_eq!(PieceKind::Queen.code(Color::Black), B_QUEEN);
        assert_eq!(PieceKind::from_id(B_KNIGHT), Some(PieceKind::Knight));
        assert_eq!(Color::of_piece(W_PAWN), Some(Color::White));
        assert_eq!(Color::of_piece(0), None);
    }
}
