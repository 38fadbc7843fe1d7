//! Game lifecycle management
//!
//! Functions for creating games and rebuilding them from a move list.

use crate::error::ChessEngineError;
use crate::position::Position;

/// Create a new game with initial position
pub fn new_game() -> Position {
    Position::new()
}

/// First move of a move list that could not be applied
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplayFault {
    /// Zero-based index of the token in the list
    pub index: usize,
    pub token: String,
    pub error: ChessEngineError,
}

/// Outcome of replaying a move list from the starting position
#[derive(Debug, Clone)]
pub struct Replay {
    pub position: Position,
    /// Number of tokens applied before the list ended or a fault stopped it
    pub applied: usize,
    pub fault: Option<ReplayFault>,
}

/// Replay a space-separated list of coordinate moves from the starting position.
///
/// Replay stops at the first token that does not parse or is not legal; the returned position
/// is the last consistent one and `fault` names the offending token. An empty string is the
/// starting position.
pub fn replay_moves(moves: &str) -> Replay {
    let mut position = new_game();
    let mut applied = 0;

    for (index, token) in moves.split_whitespace().enumerate() {
        if let Err(error) = position.apply_uci(token) {
            return Replay {
                position,
                applied,
                fault: Some(ReplayFault {
                    index,
                    token: token.to_string(),
                    error,
                }),
            };
        }
        applied += 1;
    }

    Replay {
        position,
        applied,
        fault: None,
    }
}
