//! Stream event types
//!
//! Both streams carry one JSON object per line, tagged by its `type` field. Types the bot has
//! no use for (`chatLine`, `opponentGone`, `challengeCanceled`, ...) deserialize to `Unknown`
//! instead of failing, so a new server event never breaks the bot.

use serde::Deserialize;

use crate::core::{BotError, BotResult};

/// Game status string of a game that is still being played
pub const STATUS_STARTED: &str = "started";

/// Reference to a challenge or a game by id
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct IdRef {
    pub id: String,
}

/// Event of the account-wide stream (`/api/stream/event`)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum StreamEvent {
    Challenge { challenge: IdRef },
    GameStart { game: IdRef },
    GameFinish { game: IdRef },
    #[serde(other)]
    Unknown,
}

/// Player entry of `gameFull`; engine opponents carry an `aiLevel` and no id
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Player {
    #[serde(default)]
    pub id: String,
}

/// Move list and status of a game
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GameState {
    /// Space-separated coordinate moves from the starting position
    #[serde(default)]
    pub moves: String,
    #[serde(default = "default_status")]
    pub status: String,
}

fn default_status() -> String {
    STATUS_STARTED.to_string()
}

impl GameState {
    pub fn is_started(&self) -> bool {
        self.status == STATUS_STARTED
    }

    /// Number of moves in the list
    pub fn ply(&self) -> usize {
        self.moves.split_whitespace().count()
    }
}

/// First event of a game stream
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GameFull {
    #[serde(default)]
    pub white: Player,
    #[serde(default)]
    pub black: Player,
    pub state: GameState,
}

/// Event of a per-game stream (`/api/bot/game/stream/{id}`)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum GameEvent {
    GameFull(GameFull),
    GameState(GameState),
    #[serde(other)]
    Unknown,
}

impl StreamEvent {
    pub fn parse(line: &str) -> BotResult<Self> {
        parse_line(line)
    }
}

impl GameEvent {
    pub fn parse(line: &str) -> BotResult<Self> {
        parse_line(line)
    }
}

fn parse_line<'a, T: Deserialize<'a>>(line: &'a str) -> BotResult<T> {
    serde_json::from_str(line).map_err(|err| BotError::MalformedEvent {
        line: line.to_string(),
        reason: err.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_account_events() {
        let challenge =
            StreamEvent::parse(r#"{"type":"challenge","challenge":{"id":"XbK1","rated":true}}"#)
                .unwrap();
        assert_eq!(
            challenge,
            StreamEvent::Challenge {
                challenge: IdRef { id: "XbK1".into() }
            }
        );

        let start = StreamEvent::parse(r#"{"type":"gameStart","game":{"id":"g1","fen":"x"}}"#).unwrap();
        assert_eq!(start, StreamEvent::GameStart { game: IdRef { id: "g1".into() } });

        let finish = StreamEvent::parse(r#"{"type":"gameFinish","game":{"id":"g1"}}"#).unwrap();
        assert_eq!(finish, StreamEvent::GameFinish { game: IdRef { id: "g1".into() } });
    }

    #[test]
    fn test_unknown_type_is_not_an_error() {
        let event = StreamEvent::parse(r#"{"type":"challengeDeclined","challenge":{"id":"a"}}"#).unwrap();
        assert_eq!(event, StreamEvent::Unknown);

        let chat = GameEvent::parse(r#"{"type":"chatLine","room":"player","username":"x","text":"hi"}"#)
            .unwrap();
        assert_eq!(chat, GameEvent::Unknown);
    }

    #[test]
    fn test_missing_payload_is_malformed() {
        let err = StreamEvent::parse(r#"{"type":"gameStart"}"#).unwrap_err();
        assert!(matches!(err, BotError::MalformedEvent { .. }));

        let err = GameEvent::parse("not json").unwrap_err();
        assert!(matches!(err, BotError::MalformedEvent { .. }));
    }

    #[test]
    fn test_parse_game_full() {
        let line = r#"{"type":"gameFull","id":"g1","white":{"id":"minimax-bot","name":"minimax-bot"},
            "black":{"aiLevel":3},"state":{"type":"gameState","moves":"e2e4 e7e5","wtime":600000,"status":"started"}}"#;
        let GameEvent::GameFull(full) = GameEvent::parse(line).unwrap() else {
            panic!("expected gameFull");
        };
        assert_eq!(full.white.id, "minimax-bot");
        assert_eq!(full.black.id, "");
        assert_eq!(full.state.ply(), 2);
        assert!(full.state.is_started());
    }

    #[test]
    fn test_parse_game_state_defaults() {
        let GameEvent::GameState(state) = GameEvent::parse(r#"{"type":"gameState","moves":""}"#).unwrap() else {
            panic!("expected gameState");
        };
        assert_eq!(state.ply(), 0);
        assert!(state.is_started());

        let GameEvent::GameState(state) =
            GameEvent::parse(r#"{"type":"gameState","moves":"f2f3 e7e5 g2g4 d8h4","status":"mate"}"#)
                .unwrap()
        else {
            panic!("expected gameState");
        };
        assert!(!state.is_started());
    }
}
