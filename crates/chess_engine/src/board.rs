//! Board utilities and helper functions
//!
//! Provides fundamental board operations used throughout the engine:
//! - Square indexing and naming (`e4` <-> 28)
//! - Piece queries
//! - Board boundary checking

use crate::types::*;

/// Convert file and rank (both 0-7) to a square index
#[inline]
pub fn square_at(file: i8, rank: i8) -> Square {
    (rank * 8 + file) as Square
}

/// Convert a square index to `(file, rank)`
#[inline]
pub fn file_rank(square: Square) -> (i8, i8) {
    ((square % 8) as i8, (square / 8) as i8)
}

#[inline]
pub fn is_on_board(file: i8, rank: i8) -> bool {
    (0..8).contains(&file) && (0..8).contains(&rank)
}

/// Step from `square` by a `(file, rank)` delta, `None` when leaving the board
#[inline]
pub fn offset(square: Square, (df, dr): (i8, i8)) -> Option<Square> {
    let (file, rank) = file_rank(square);
    let (f, r) = (file + df, rank + dr);
    is_on_board(f, r).then(|| square_at(f, r))
}

/// Parse an algebraic square name such as `e4`
pub fn parse_square(name: &str) -> Option<Square> {
    let mut chars = name.chars();
    let file = chars.next()?;
    let rank = chars.next()?;
    if chars.next().is_some() || !('a'..='h').contains(&file) || !('1'..='8').contains(&rank) {
        return None;
    }
    Some(square_at(file as i8 - b'a' as i8, rank as i8 - b'1' as i8))
}

pub fn square_name(square: Square) -> String {
    let (file, rank) = file_rank(square);
    format!("{}{}", (b'a' + file as u8) as char, rank + 1)
}

/// Same square seen from the other side of the board (a1 <-> a8)
#[inline]
pub fn mirror_square(square: Square) -> Square {
    square ^ 56
}

/// Check if piece belongs to color
#[inline]
pub fn piece_belongs_to(piece: i8, color: Color) -> bool {
    piece != 0 && (piece > 0) == (color == Color::White)
}

/// Light squares have an odd file + rank sum
#[inline]
pub fn is_light_square(square: Square) -> bool {
    let (file, rank) = file_rank(square);
    (file + rank) % 2 == 1
}
