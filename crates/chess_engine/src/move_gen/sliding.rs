//! Sliding piece move generation
//!
//! Common functionality for sliding pieces (bishops, rooks, queens).
//! These pieces move any number of squares along a ray until blocked:
//! - Empty squares: valid moves, keep sliding
//! - Opponent pieces: valid capture, then stop
//! - Own pieces: stop without a move

use crate::board::*;
use crate::constants::Dir;
use crate::types::*;

/// Generate moves for a sliding piece along the given directions
pub fn generate_sliding_moves(
    board: &Board,
    from: Square,
    color: Color,
    dirs: &[Dir],
    moves: &mut Vec<Move>,
) {
    for &dir in dirs {
        let mut current = from;
        while let Some(to) = offset(current, dir) {
            let piece = board[to as usize];
            if piece_belongs_to(piece, color) {
                break;
            }
            moves.push(Move::new(from, to));
            if piece != 0 {
                break;
            }
            current = to;
        }
    }
}
