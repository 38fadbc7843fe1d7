//! Material evaluation
//!
//! Evaluates the material balance of a position by counting piece values.

use crate::constants::*;
use crate::types::*;

/// Evaluate material balance (White minus Black, king included)
pub fn evaluate_material(board: &Board) -> i32 {
    board
        .iter()
        .filter(|&&piece| piece != 0)
        .map(|&piece| {
            let value = FIGURE_VALUE[piece.unsigned_abs() as usize];
            if piece > 0 {
                value
            } else {
                -value
            }
        })
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::position::Position;

    #[test]
    fn test_starting_position_material_balance() {
        let position = Position::new();
        assert_eq!(
            evaluate_material(position.board()),
            0,
            "Starting position should have 0 material balance"
        );
    }

    #[test]
    fn test_white_up_queen() {
        let mut board = SETUP;
        board[D8 as usize] = 0;
        assert_eq!(evaluate_material(&board), QUEEN_VALUE);
    }

    #[test]
    fn test_black_up_pawn() {
        let mut board = SETUP;
        board[12] = 0; // e2
        assert_eq!(
            evaluate_material(&board),
            -PAWN_VALUE,
            "Score should be exactly negative pawn value"
        );
    }

    #[test]
    fn test_empty_board_material() {
        assert_eq!(evaluate_material(&[0; 64]), 0, "Empty board should have 0 material");
    }
}
