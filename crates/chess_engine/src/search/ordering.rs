//! Move ordering for alpha-beta pruning
//!
//! Orders moves to maximize alpha-beta pruning efficiency by trying the most forcing moves
//! first: captures, then checking moves, then everything else. Within the capture group moves
//! are sorted by MVV-LVA; all sorting is stable so the order is reproducible.

use crate::constants::*;
use crate::position::Position;
use crate::types::*;

/// Order moves for better alpha-beta pruning
pub fn order_moves(position: &Position, moves: Vec<Move>) -> Vec<Move> {
    let mut captures = Vec::new();
    let mut checks = Vec::new();
    let mut quiet = Vec::new();

    for mv in moves {
        if position.is_capture(mv) {
            captures.push(mv);
        } else if position.gives_check(mv) {
            checks.push(mv);
        } else {
            quiet.push(mv);
        }
    }

    // MVV-LVA: Most Valuable Victim - Least Valuable Attacker
    captures.sort_by_key(|&mv| std::cmp::Reverse(capture_score(position, mv)));

    captures.extend(checks);
    captures.extend(quiet);
    captures
}

fn capture_score(position: &Position, mv: Move) -> i32 {
    let attacker = FIGURE_VALUE[position.piece_at(mv.src).unsigned_abs() as usize];
    let victim = match position.piece_at(mv.dst) {
        // en passant lands on an empty square
        0 => PAWN_VALUE,
        piece => FIGURE_VALUE[piece.unsigned_abs() as usize],
    };
    victim * 10 - attacker
}
