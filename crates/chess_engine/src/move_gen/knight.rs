//! Knight move generation
//!
//! Knights move in an L-shape pattern: 2 squares in one direction, then 1 square
//! perpendicular. They jump over pieces, so only the destination square matters.

use crate::board::*;
use crate::constants::*;
use crate::types::*;

/// Generate knight moves from a given square
pub fn generate_knight_moves(board: &Board, from: Square, color: Color, moves: &mut Vec<Move>) {
    for &dir in &KNIGHT_DIRS {
        if let Some(to) = offset(from, dir) {
            if !piece_belongs_to(board[to as usize], color) {
                moves.push(Move::new(from, to));
            }
        }
    }
}
