//! Depth-limited minimax search with alpha-beta pruning
//!
//! This module implements the engine's move selection:
//! - Minimax over the legal move tree, White maximizing and Black minimizing
//! - Alpha-beta pruning, which never changes the minimax score
//! - Move ordering (captures, then checks, then quiet moves) for earlier cutoffs
//!
//! The search explores the tree with make/unmake on the position it is handed and leaves it
//! exactly as it found it.
//!
//! ## Module Organization
//!
//! - `alphabeta` - Core alpha-beta search and the unpruned reference minimax
//! - `ordering` - Move ordering heuristics

mod alphabeta;
mod ordering;

pub use alphabeta::{best_move, is_mate_score, minimax, search, SearchResult, SearchStats};
pub use ordering::order_moves;
