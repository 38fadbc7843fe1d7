//! Core module - error types and runtime configuration shared by every other module

pub mod config;
pub mod error;

pub use config::{BotConfig, BotSettings};
pub use error::{BotError, BotResult};
