//! # Chess Bot
//!
//! An autonomous Lichess bot built around the `chess_engine` crate.
//!
//! ## Module Organization
//!
//! - **[`core`]** - Error type and configuration
//! - **[`networking`]** - `BotApi` client trait, NDJSON stream framing, event types
//! - **[`session`]** - Per-game state machine and its stream consumer
//! - **[`dispatcher`]** - Account event consumer, session store and seek loop
//! - **[`ratings`]** - Rating snapshot and its refresh loop
//! - **[`health`]** - Consecutive transport failure tracking
//! - **[`status`]** - HTTP status routes

pub mod core;
pub mod dispatcher;
pub mod health;
pub mod networking;
pub mod ratings;
pub mod session;
pub mod status;

pub use crate::core::{BotConfig, BotError, BotResult, BotSettings};
pub use dispatcher::Dispatcher;
pub use networking::{BotApi, LichessClient};
