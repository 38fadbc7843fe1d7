//! Networking module - server API client, stream framing and event types

pub mod client;
pub mod events;
pub mod ndjson;

pub use client::{Account, BotApi, LichessClient, SeekRequest, UserProfile, TIME_CONTROLS};
pub use events::{GameEvent, GameFull, GameState, IdRef, Player, StreamEvent};
pub use ndjson::LineStream;
