//! King move generation
//!
//! Kings move one square in any direction. Castling is generated here as well, as a king move
//! of two files, when:
//! - the castling right is still held (king and that rook never moved)
//! - the rook stands on its corner and the squares between king and rook are empty
//! - the king is not in check and does not pass through or land on an attacked square
//!
//! Whether the king lands in check on an ordinary step is left to the legality filter.

use super::attack::is_square_attacked;
use crate::board::*;
use crate::constants::*;
use crate::position::Position;
use crate::types::*;

/// Generate king moves from a given square, castling included
pub fn generate_king_moves(position: &Position, from: Square, color: Color, moves: &mut Vec<Move>) {
    let board = position.board();

    for &dir in &KING_DIRS {
        if let Some(to) = offset(from, dir) {
            if !piece_belongs_to(board[to as usize], color) {
                moves.push(Move::new(from, to));
            }
        }
    }

    let (home, rank_base) = match color {
        Color::White => (E1, A1),
        Color::Black => (E8, A8),
    };
    if from != home {
        return;
    }

    let enemy = color.opponent();
    let rook = ROOK_ID * color.sign();
    let rights = position.castling();
    let empty = |offsets: &[u8]| offsets.iter().all(|&f| board[(rank_base + f) as usize] == 0);
    let safe = |offsets: &[u8]| {
        offsets
            .iter()
            .all(|&f| !is_square_attacked(board, rank_base + f, enemy))
    };

    if !safe(&[4]) {
        return;
    }

    if rights.has(CastlingRights::kingside(color))
        && board[(rank_base + 7) as usize] == rook
        && empty(&[5, 6])
        && safe(&[5, 6])
    {
        moves.push(Move::new(from, rank_base + 6));
    }

    if rights.has(CastlingRights::queenside(color))
        && board[rank_base as usize] == rook
        && empty(&[1, 2, 3])
        && safe(&[2, 3])
    {
        moves.push(Move::new(from, rank_base + 2));
    }
}
