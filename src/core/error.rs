//! Error types for the bot
//!
//! Every failure the bot can survive has a variant here. None of them ends the dispatcher:
//! callers log the error, count transport failures and keep going.

use chess_engine::ChessEngineError;
use thiserror::Error;

/// Errors that can occur while talking to the server or driving a game
#[derive(Error, Debug)]
pub enum BotError {
    /// The engine rejected a move the bot tried to commit locally
    #[error("Invalid move {mv} in game {game_id}: {source}")]
    InvalidMove {
        game_id: String,
        mv: String,
        #[source]
        source: ChessEngineError,
    },

    /// A stream line that is not a valid event
    #[error("Malformed event {line:?}: {reason}")]
    MalformedEvent { line: String, reason: String },

    /// The server's move list does not replay from the starting position
    #[error("Game {game_id}: move #{index} {token:?} does not fit the replayed position: {source}")]
    ProtocolInconsistency {
        game_id: String,
        index: usize,
        token: String,
        #[source]
        source: ChessEngineError,
    },

    /// Connection, timeout or body read failure
    #[error("Transport failure: {message}")]
    Transport { message: String },

    /// The server answered with a non-success status
    #[error("HTTP {status} from {url}: {body}")]
    HttpStatus {
        status: u16,
        url: String,
        body: String,
    },

    /// The configured username matches neither player, or both
    #[error("Game {game_id}: cannot tell the bot's color ({username:?} vs white {white:?}, black {black:?})")]
    AmbiguousColorAssignment {
        game_id: String,
        username: String,
        white: String,
        black: String,
    },

    /// The token belongs to a different account than the configured username
    #[error("BOT_USERNAME {configured:?} does not name the token's account {account:?}")]
    AccountMismatch { configured: String, account: String },

    /// The blocking search task panicked or was cancelled
    #[error("Search worker failed: {message}")]
    Worker { message: String },
}

impl BotError {
    /// Failures of the connection to the server, as counted by the health tracker
    pub fn is_transport(&self) -> bool {
        matches!(self, BotError::Transport { .. } | BotError::HttpStatus { .. })
    }
}

impl From<reqwest::Error> for BotError {
    fn from(err: reqwest::Error) -> Self {
        BotError::Transport {
            message: err.to_string(),
        }
    }
}

impl From<tokio::task::JoinError> for BotError {
    fn from(err: tokio::task::JoinError) -> Self {
        BotError::Worker {
            message: err.to_string(),
        }
    }
}

/// Result type alias for bot operations
pub type BotResult<T> = Result<T, BotError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transport_classification() {
        let transport = BotError::Transport {
            message: "connection reset".into(),
        };
        let status = BotError::HttpStatus {
            status: 503,
            url: "https://lichess.org/api/board/seek".into(),
            body: String::new(),
        };
        let malformed = BotError::MalformedEvent {
            line: "{".into(),
            reason: "EOF".into(),
        };
        assert!(transport.is_transport());
        assert!(status.is_transport());
        assert!(!malformed.is_transport());
    }

    #[test]
    fn test_inconsistency_message_names_the_token() {
        let err = BotError::ProtocolInconsistency {
            game_id: "abcd1234".into(),
            index: 2,
            token: "e4e5".into(),
            source: ChessEngineError::InvalidMove { mv: "e4e5".into() },
        };
        let text = err.to_string();
        assert!(text.contains("abcd1234"));
        assert!(text.contains("\"e4e5\""));
    }
}
