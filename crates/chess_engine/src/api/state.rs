//! Game state queries and AI move generation

use crate::position::Position;
use crate::search::{best_move, SearchResult};
use crate::types::*;

/// Get AI's response to current position, searching `depth` plies for the side to move
pub fn reply(position: &Position, depth: u32) -> SearchResult {
    best_move(position, depth)
}

/// Get current game state (ongoing, checkmate, stalemate, draw)
pub fn get_game_state(position: &Position) -> GameStatus {
    position.status()
}
