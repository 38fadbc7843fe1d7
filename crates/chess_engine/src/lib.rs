//! # Chess Engine
//!
//! A compact minimax chess engine: full legal move generation, a static evaluator and a
//! depth-limited alpha-beta search.
//!
//! ## Module Organization
//!
//! ### Core Data
//! - **[`constants`]** - Piece codes, values, squares and search constants
//! - **[`types`]** - `Color`, `PieceKind`, `Move`, `CastlingRights`, `GameStatus`
//! - **[`board`]** - Square helpers for the 64-byte mailbox
//! - **[`error`]** - Engine error type
//!
//! ### Rules
//! - **[`position`]** - Position state with checked `apply` and exact `undo`
//! - **[`move_gen`]** - Pseudo-legal and legal move generation, attack detection
//! - **`hash`** - Zobrist keys for repetition detection
//!
//! ### Playing
//! - **[`evaluation`]** - Material, center control and development scoring
//! - **[`search`]** - Alpha-beta search with move ordering
//! - **[`api`]** - High-level entry points (`new_game`, `replay_moves`, `reply`)
//!
//! ## Example
//!
//! ```rust
//! use chess_engine::api::{new_game, reply};
//!
//! let game = new_game();
//! let result = reply(&game, 2);
//! assert!(result.best_move.is_some());
//! ```

pub mod api;
pub mod board;
pub mod constants;
pub mod error;
pub mod evaluation;
mod hash;
pub mod move_gen;
pub mod position;
pub mod search;
pub mod types;

pub use error::{ChessEngineError, ChessEngineResult};
pub use position::{Position, UndoInfo};
pub use search::{best_move, search, SearchResult};
pub use types::{Color, GameStatus, Move, PieceKind};
