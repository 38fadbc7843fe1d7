//! Move execution and validation
//!
//! Functions for executing moves given in coordinate notation and checking move legality.

use crate::error::ChessEngineResult;
use crate::position::Position;
use crate::types::*;

/// Execute a move given in coordinate notation
///
/// # Errors
///
/// Returns [`crate::ChessEngineError::ParseMove`] for malformed text and
/// [`crate::ChessEngineError::InvalidMove`] for a move that is not legal in `position`.
/// The position is unchanged on error.
///
/// # Examples
///
/// ```rust
/// use chess_engine::api::{do_move, new_game};
///
/// let mut game = new_game();
/// let played = do_move(&mut game, "e2e4").unwrap();
/// assert_eq!(played.to_uci(), "e2e4");
/// ```
pub fn do_move(position: &mut Position, uci: &str) -> ChessEngineResult<Move> {
    position.apply_uci(uci)
}

/// Check if a move is legal in the position
pub fn is_legal_move(position: &Position, mv: Move) -> bool {
    position.resolve(mv).is_ok()
}
