//! Move generation
//!
//! Moves are generated in two stages:
//! 1. **Pseudo-legal** moves per piece (`pawn`, `knight`, `king`, `sliding`), which follow the
//!    movement rules but may leave the mover's own king attacked.
//! 2. **Legal** moves, the pseudo-legal moves whose result does not leave the own king in check.
//!
//! The legality test plays each candidate on a scratch copy of the 64-byte board instead of the
//! full [`Position`], so generating legal moves never mutates the position it is given.
//!
//! Generation order is deterministic: squares a1..h8, and a fixed direction order per piece.
//! The search relies on this for reproducible move ordering.

mod attack;
mod king;
mod knight;
mod pawn;
mod sliding;

pub use attack::{find_king, is_in_check, is_square_attacked};

use crate::board::*;
use crate::constants::*;
use crate::position::{castling_rook_path, Position};
use crate::types::*;

/// Generate pseudo-legal moves for the side to move
pub fn generate_pseudo_legal_moves(position: &Position) -> Vec<Move> {
    let color = position.side_to_move();
    let board = position.board();
    let mut moves = Vec::with_capacity(48);

    for from in 0..64u8 {
        let piece = board[from as usize];
        if !piece_belongs_to(piece, color) {
            continue;
        }
        match piece.abs() {
            PAWN_ID => pawn::generate_pawn_moves(position, from, color, &mut moves),
            KNIGHT_ID => knight::generate_knight_moves(board, from, color, &mut moves),
            BISHOP_ID => sliding::generate_sliding_moves(board, from, color, &BISHOP_DIRS, &mut moves),
            ROOK_ID => sliding::generate_sliding_moves(board, from, color, &ROOK_DIRS, &mut moves),
            QUEEN_ID => sliding::generate_sliding_moves(board, from, color, &KING_DIRS, &mut moves),
            KING_ID => king::generate_king_moves(position, from, color, &mut moves),
            _ => {}
        }
    }

    moves
}

/// Generate all legal moves for the side to move
pub fn legal_moves(position: &Position) -> Vec<Move> {
    let color = position.side_to_move();
    let mut moves = generate_pseudo_legal_moves(position);
    moves.retain(|&mv| !is_in_check(&board_after(position, mv), color));
    moves
}

/// Does the move take a piece (en passant included)?
pub fn is_capture(position: &Position, mv: Move) -> bool {
    let board = position.board();
    board[mv.dst as usize] != 0
        || (board[mv.src as usize].abs() == PAWN_ID && Some(mv.dst) == position.en_passant())
}

/// Does the move leave the opponent's king attacked?
pub fn gives_check(position: &Position, mv: Move) -> bool {
    let opponent = position.side_to_move().opponent();
    is_in_check(&board_after(position, mv), opponent)
}

/// Piece placement after `mv`, without touching any other position state
fn board_after(position: &Position, mv: Move) -> Board {
    let mut board = *position.board();
    let piece = board[mv.src as usize];

    if piece.abs() == PAWN_ID && Some(mv.dst) == position.en_passant() && board[mv.dst as usize] == 0 {
        let (dst_file, _) = file_rank(mv.dst);
        let (_, src_rank) = file_rank(mv.src);
        board[square_at(dst_file, src_rank) as usize] = 0;
    }

    board[mv.src as usize] = 0;
    board[mv.dst as usize] = match mv.promotion {
        Some(kind) => kind.code(Color::of_piece(piece).unwrap_or(Color::White)),
        None => piece,
    };

    if piece.abs() == KING_ID {
        if let Some((rook_src, rook_dst)) = castling_rook_path(mv) {
            board[rook_dst as usize] = board[rook_src as usize];
            board[rook_src as usize] = 0;
        }
    }

    board
}

#[cfg(test)]
mod tests {
    use super::*;

    fn perft(position: &mut Position, depth: u32) -> u64 {
        if depth == 0 {
            return 1;
        }
        let moves = legal_moves(position);
        if depth == 1 {
            return moves.len() as u64;
        }
        let mut nodes = 0;
        for mv in moves {
            let undo = position.make_move(mv);
            nodes += perft(position, depth - 1);
            position.unmake_move(mv, undo);
        }
        nodes
    }

    #[test]
    fn test_starting_position_has_twenty_moves() {
        let position = Position::new();
        assert_eq!(legal_moves(&position).len(), 20);
    }

    #[test]
    fn test_perft_start_position() {
        let mut position = Position::new();
        assert_eq!(perft(&mut position, 1), 20);
        assert_eq!(perft(&mut position, 2), 400);
        assert_eq!(perft(&mut position, 3), 8902);
    }

    #[test]
    fn test_perft_kiwipete() {
        // castling, en passant and promotions all appear within two plies
        let mut position = Position::from_fen(
            "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
        )
        .unwrap();
        assert_eq!(perft(&mut position, 1), 48);
        assert_eq!(perft(&mut position, 2), 2039);
    }

    #[test]
    fn test_perft_en_passant_pins() {
        let mut position = Position::from_fen("8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1").unwrap();
        assert_eq!(perft(&mut position, 1), 14);
        assert_eq!(perft(&mut position, 2), 191);
        assert_eq!(perft(&mut position, 3), 2812);
    }

    #[test]
    fn test_perft_promotions() {
        let mut position = Position::from_fen(
            "r3k2r/Pppp1ppp/1b3nbN/nP6/BBP1P3/q4N2/Pp1P2PP/R2Q1RK1 w kq - 0 1",
        )
        .unwrap();
        assert_eq!(perft(&mut position, 1), 6);
        assert_eq!(perft(&mut position, 2), 264);
    }

    #[test]
    fn test_check_evasion_only() {
        // white king on e1 checked by rook on e8, only king steps or the block are legal
        let position = Position::from_fen("4r2k/8/8/8/8/8/3B4/4K3 w - - 0 1").unwrap();
        let moves = legal_moves(&position);
        assert!(!moves.is_empty());
        for mv in &moves {
            assert!(!is_in_check(&board_after(&position, *mv), Color::White), "{mv}");
        }
        assert!(moves.contains(&Move::from_uci("d2e3").unwrap()));
        assert!(!moves.contains(&Move::from_uci("d2c3").unwrap()));
    }

    #[test]
    fn test_capture_and_check_detection() {
        let mut position = Position::new();
        for text in ["e2e4", "d7d5"] {
            position.apply_uci(text).unwrap();
        }
        assert!(is_capture(&position, Move::from_uci("e4d5").unwrap()));
        assert!(!is_capture(&position, Move::from_uci("e4e5").unwrap()));
        assert!(gives_check(&position, Move::from_uci("f1b5").unwrap()));
        assert!(!gives_check(&position, Move::from_uci("f1c4").unwrap()));
    }
}
