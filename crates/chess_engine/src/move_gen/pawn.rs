//! Pawn move generation
//!
//! Handles pawn-specific move generation including:
//! - Single and double forward pushes
//! - Diagonal captures
//! - En passant
//! - Promotion (one move per promotion piece, queen first)
//!
//! ## Pawn Movement Rules
//!
//! - **Forward push**: one square toward the opponent, onto an empty square
//! - **Double push**: from the starting rank (2 for white, 7 for black) over an empty square
//! - **Captures**: diagonally forward onto an opponent piece
//! - **En passant**: diagonally onto the square a double-pushed pawn just skipped
//! - **Promotion**: a pawn reaching the last rank becomes a queen, rook, bishop or knight

use crate::board::*;
use crate::position::Position;
use crate::types::*;

const PROMOTIONS: [PieceKind; 4] = [
    PieceKind::Queen,
    PieceKind::Rook,
    PieceKind::Bishop,
    PieceKind::Knight,
];

/// Generate pawn moves from a given square
pub fn generate_pawn_moves(position: &Position, from: Square, color: Color, moves: &mut Vec<Move>) {
    let board = position.board();
    let (forward, start_rank, last_rank) = match color {
        Color::White => (1, 1, 7),
        Color::Black => (-1, 6, 0),
    };
    let (_, rank) = file_rank(from);

    if let Some(one) = offset(from, (0, forward)) {
        if board[one as usize] == 0 {
            push_pawn_move(from, one, last_rank, moves);
            if rank == start_rank {
                if let Some(two) = offset(one, (0, forward)) {
                    if board[two as usize] == 0 {
                        moves.push(Move::new(from, two));
                    }
                }
            }
        }
    }

    for df in [-1, 1] {
        if let Some(to) = offset(from, (df, forward)) {
            let target = board[to as usize];
            let enemy = target != 0 && !piece_belongs_to(target, color);
            if enemy || Some(to) == position.en_passant() {
                push_pawn_move(from, to, last_rank, moves);
            }
        }
    }
}

fn push_pawn_move(from: Square, to: Square, last_rank: i8, moves: &mut Vec<Move>) {
    let (_, rank) = file_rank(to);
    if rank == last_rank {
        moves.extend(PROMOTIONS.iter().map(|&kind| Move::with_promotion(from, to, kind)));
    } else {
        moves.push(Move::new(from, to));
    }
}
