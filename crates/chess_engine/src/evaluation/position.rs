//! Full position evaluation
//!
//! Evaluates positions using material, center control and development.

use super::material::evaluate_material;
use crate::constants::*;
use crate::position::Position;
use crate::types::*;

/// Evaluate full position in centipawns, positive favors White.
///
/// Pure function of the position: no history beyond what the position itself stores.
pub fn evaluate_position(position: &Position) -> i32 {
    evaluate_material(position.board()) + evaluate_center(position) + evaluate_development(position)
}

/// +/-10 for every piece on a center square, by the occupant's color
pub fn evaluate_center(position: &Position) -> i32 {
    CENTER_SQUARES
        .iter()
        .map(|&square| match Color::of_piece(position.piece_at(square)) {
            Some(Color::White) => CENTER_BONUS,
            Some(Color::Black) => -CENTER_BONUS,
            None => 0,
        })
        .sum()
}

/// +/-10 for every minor piece that has left its home square
pub fn evaluate_development(position: &Position) -> i32 {
    let white = position.developed_minors(Color::White) as i32;
    let black = position.developed_minors(Color::Black) as i32;
    (white - black) * DEVELOPMENT_BONUS
}
