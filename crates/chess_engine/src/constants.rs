//! # Chess Engine Constants - Evaluation Values & Board Layout
//!
//! ## Overview
//!
//! This module centralizes the constant values used throughout the engine: piece identifiers and
//! their signed board encoding, piece valuations (in centipawns), direction vectors for move
//! generation, well-known squares, and the scores the search uses for terminal positions.
//!
//! ## Centipawn Valuation System
//!
//! Scores are expressed in **centipawns** (1/100th of a pawn). The valuation scheme:
//!
//! - **Pawn**: 100
//! - **Knight**: 320
//! - **Bishop**: 330
//! - **Rook**: 500
//! - **Queen**: 900
//! - **King**: 20,000
//!
//! The king is worth more than every other piece combined so material alone never suggests
//! trading it. Checkmate is not scored through the king value: the search assigns
//! [`MATE_SCORE`] to mated positions, which is far outside the range any material balance can
//! reach.
//!
//! ## Board Encoding
//!
//! Squares are indexed `a1 = 0, b1 = 1, ..., h1 = 7, a2 = 8, ..., h8 = 63`. Each square holds
//! a signed `i8`: positive values are white pieces, negative values black pieces, zero is empty.
//! The absolute value is the piece ID (`PAWN_ID` .. `KING_ID`).
//!
//! ## Direction Vectors
//!
//! Movement is described as `(file delta, rank delta)` pairs rather than flat offsets so that
//! wrapping across the board edge is detected by a bounds check instead of special cases:
//! - **North (N)**: `(0, 1)` towards rank 8
//! - **South (S)**: `(0, -1)`
//! - **East (O)**: `(1, 0)` towards the h-file
//! - **West (W)**: `(-1, 0)`

pub const VOID_ID: i8 = 0;
pub const PAWN_ID: i8 = 1;
pub const KNIGHT_ID: i8 = 2;
pub const BISHOP_ID: i8 = 3;
pub const ROOK_ID: i8 = 4;
pub const QUEEN_ID: i8 = 5;
pub const KING_ID: i8 = 6;

pub const W_PAWN: i8 = PAWN_ID;
pub const W_KNIGHT: i8 = KNIGHT_ID;
pub const W_BISHOP: i8 = BISHOP_ID;
pub const W_ROOK: i8 = ROOK_ID;
pub const W_QUEEN: i8 = QUEEN_ID;
pub const W_KING: i8 = KING_ID;

pub const B_PAWN: i8 = -PAWN_ID;
pub const B_KNIGHT: i8 = -KNIGHT_ID;
pub const B_BISHOP: i8 = -BISHOP_ID;
pub const B_ROOK: i8 = -ROOK_ID;
pub const B_QUEEN: i8 = -QUEEN_ID;
pub const B_KING: i8 = -KING_ID;

pub type Dir = (i8, i8);

pub const N: Dir = (0, 1);
pub const S: Dir = (0, -1);
pub const O: Dir = (1, 0);
pub const W: Dir = (-1, 0);
pub const NO: Dir = (1, 1);
pub const NW: Dir = (-1, 1);
pub const SO: Dir = (1, -1);
pub const SW: Dir = (-1, -1);

pub const BISHOP_DIRS: [Dir; 4] = [NO, SO, NW, SW];
pub const ROOK_DIRS: [Dir; 4] = [N, O, S, W];
pub const KING_DIRS: [Dir; 8] = [N, O, S, W, NO, SO, NW, SW];
pub const KNIGHT_DIRS: [Dir; 8] = [
    (1, 2), (-1, 2), (1, -2), (-1, -2),
    (2, 1), (2, -1), (-2, 1), (-2, -1),
];

pub const VOID_VALUE: i32 = 0;
pub const PAWN_VALUE: i32 = 100;
pub const KNIGHT_VALUE: i32 = 320;
pub const BISHOP_VALUE: i32 = 330;
pub const ROOK_VALUE: i32 = 500;
pub const QUEEN_VALUE: i32 = 900;
pub const KING_VALUE: i32 = 20000;

pub const FIGURE_VALUE: [i32; KING_ID as usize + 1] = [
    VOID_VALUE,
    PAWN_VALUE,
    KNIGHT_VALUE,
    BISHOP_VALUE,
    ROOK_VALUE,
    QUEEN_VALUE,
    KING_VALUE,
];

/// Bonus per piece standing on one of the four center squares.
pub const CENTER_BONUS: i32 = 10;
/// Bonus per minor piece that has left its starting square.
pub const DEVELOPMENT_BONUS: i32 = 10;

/// Base score of a checkmated position, before the remaining-depth adjustment.
pub const MATE_SCORE: i32 = 1_000_000;
/// Bound used as +/- infinity for the alpha-beta window.
pub const AB_INF: i32 = i32::MAX / 2;

#[rustfmt::skip]
pub const SETUP: [i8; 64] = [
    W_ROOK, W_KNIGHT, W_BISHOP, W_QUEEN, W_KING, W_BISHOP, W_KNIGHT, W_ROOK,
    W_PAWN, W_PAWN, W_PAWN, W_PAWN, W_PAWN, W_PAWN, W_PAWN, W_PAWN,
    0, 0, 0, 0, 0, 0, 0, 0,
    0, 0, 0, 0, 0, 0, 0, 0,
    0, 0, 0, 0, 0, 0, 0, 0,
    0, 0, 0, 0, 0, 0, 0, 0,
    B_PAWN, B_PAWN, B_PAWN, B_PAWN, B_PAWN, B_PAWN, B_PAWN, B_PAWN,
    B_ROOK, B_KNIGHT, B_BISHOP, B_QUEEN, B_KING, B_BISHOP, B_KNIGHT, B_ROOK,
];

pub const START_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

pub const A1: u8 = 0;
pub const B1: u8 = 1;
pub const C1: u8 = 2;
pub const D1: u8 = 3;
pub const E1: u8 = 4;
pub const F1: u8 = 5;
pub const G1: u8 = 6;
pub const H1: u8 = 7;
pub const D4: u8 = 27;
pub const E4: u8 = 28;
pub const D5: u8 = 35;
pub const E5: u8 = 36;
pub const A8: u8 = 56;
pub const B8: u8 = 57;
pub const C8: u8 = 58;
pub const D8: u8 = 59;
pub const E8: u8 = 60;
pub const F8: u8 = 61;
pub const G8: u8 = 62;
pub const H8: u8 = 63;

pub const CENTER_SQUARES: [u8; 4] = [D4, E4, D5, E5];

/// Home squares of the white minor pieces, indexed by development flag bit.
pub const WHITE_MINOR_HOMES: [u8; 4] = [B1, G1, C1, F1];
/// Home squares of the black minor pieces, indexed by development flag bit.
pub const BLACK_MINOR_HOMES: [u8; 4] = [B8, G8, C8, F8];

/// Halfmove clock value at which the game is drawn without a claim.
pub const SEVENTY_FIVE_MOVE_PLIES: u16 = 150;
/// Number of occurrences of a position that ends the game without a claim.
pub const FIVEFOLD_REPETITION: usize = 5;
