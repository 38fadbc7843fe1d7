//! Attack detection and square checking
//!
//! Provides functions to check if squares are under attack and if kings are in check.
//! This module is critical for move legality validation and check detection.
//!
//! ## Algorithm
//!
//! Instead of iterating over every opponent piece, attacks are detected from the target
//! square outward: a knight jump away for knights, one step for kings and pawns, and along
//! each ray until the first occupied square for sliders. A square is attacked if one of these
//! probes lands on a matching enemy piece.

use crate::board::*;
use crate::constants::*;
use crate::types::*;

/// Check if a square is under attack by pieces of the specified color
///
/// # Arguments
///
/// * `board` - Piece placement to inspect
/// * `square` - Target square index (0-63) to check
/// * `by_color` - Color of pieces that might attack
///
/// # Returns
///
/// `true` if the square is attacked by any piece of the specified color
pub fn is_square_attacked(board: &Board, square: Square, by_color: Color) -> bool {
    let sign = by_color.sign();

    // A white pawn attacks upward, so it sits one rank below the target square.
    let pawn_rank = -(sign);
    for df in [-1, 1] {
        if let Some(from) = offset(square, (df, pawn_rank)) {
            if board[from as usize] == PAWN_ID * sign {
                return true;
            }
        }
    }

    if KNIGHT_DIRS
        .iter()
        .filter_map(|&dir| offset(square, dir))
        .any(|from| board[from as usize] == KNIGHT_ID * sign)
    {
        return true;
    }

    if KING_DIRS
        .iter()
        .filter_map(|&dir| offset(square, dir))
        .any(|from| board[from as usize] == KING_ID * sign)
    {
        return true;
    }

    ray_hits(board, square, &ROOK_DIRS, [ROOK_ID * sign, QUEEN_ID * sign])
        || ray_hits(board, square, &BISHOP_DIRS, [BISHOP_ID * sign, QUEEN_ID * sign])
}

/// Walk each ray until the first piece and report whether it is one of `attackers`
fn ray_hits(board: &Board, square: Square, dirs: &[Dir], attackers: [i8; 2]) -> bool {
    for &dir in dirs {
        let mut current = square;
        while let Some(next) = offset(current, dir) {
            let piece = board[next as usize];
            if piece != 0 {
                if attackers.contains(&piece) {
                    return true;
                }
                break;
            }
            current = next;
        }
    }
    false
}

pub fn find_king(board: &Board, color: Color) -> Option<Square> {
    let king = KING_ID * color.sign();
    board.iter().position(|&p| p == king).map(|sq| sq as Square)
}

/// Is the king of `color` attacked? A board without that king is never in check.
pub fn is_in_check(board: &Board, color: Color) -> bool {
    find_king(board, color)
        .map(|king| is_square_attacked(board, king, color.opponent()))
        .unwrap_or(false)
}
