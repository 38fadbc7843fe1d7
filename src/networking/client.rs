//! Lichess HTTP client
//!
//! [`BotApi`] is the seam between the bot and the server: the dispatcher and the sessions only
//! see the trait, tests drive them with a scripted implementation. [`LichessClient`] is the
//! real one, a thin wrapper over `reqwest` with bearer authentication.

use std::collections::BTreeMap;

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::Deserialize;
use tracing::{debug, warn};

use super::ndjson::{self, LineStream};
use crate::core::{BotError, BotResult};

/// Time controls tried by the seek loop, in order of preference: (minutes, increment seconds)
pub const TIME_CONTROLS: [(u32, u32); 5] = [(10, 0), (5, 0), (3, 0), (15, 10), (10, 5)];

/// Public seek for a standard game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeekRequest {
    /// Initial clock in minutes
    pub time: u32,
    /// Increment in seconds
    pub increment: u32,
    pub rated: bool,
}

impl SeekRequest {
    fn form(&self) -> [(&'static str, String); 4] {
        [
            ("time", self.time.to_string()),
            ("increment", self.increment.to_string()),
            ("rated", self.rated.to_string()),
            ("variant", "standard".to_string()),
        ]
    }
}

/// Account of the token owner
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Account {
    pub id: String,
    pub username: String,
    #[serde(default)]
    pub title: Option<String>,
}

impl Account {
    /// The id that game events carry for this account, given the configured username.
    ///
    /// Game events name players by their lowercase id, so the display name is accepted only
    /// to be replaced by the id. Any other name is an error.
    pub fn player_id(&self, configured: &str) -> BotResult<&str> {
        if configured == self.id {
            Ok(&self.id)
        } else if configured.eq_ignore_ascii_case(&self.id) || configured == self.username {
            warn!(configured, id = %self.id, "BOT_USERNAME differs from the account id, using the id");
            Ok(&self.id)
        } else {
            Err(BotError::AccountMismatch {
                configured: configured.to_string(),
                account: self.id.clone(),
            })
        }
    }
}

/// Public profile; only the per time control statistics are read
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct UserProfile {
    #[serde(default)]
    pub perfs: BTreeMap<String, serde_json::Value>,
}

/// Operations the bot performs against the server
#[async_trait]
pub trait BotApi: Send + Sync {
    /// Open the account event stream
    async fn stream_events(&self) -> BotResult<LineStream>;

    /// Open the state stream of one game
    async fn stream_game(&self, game_id: &str) -> BotResult<LineStream>;

    async fn accept_challenge(&self, challenge_id: &str) -> BotResult<()>;

    /// Post a seek; returns once the server has answered it
    async fn seek(&self, request: SeekRequest) -> BotResult<()>;

    /// Play `uci` in `game_id`
    async fn make_move(&self, game_id: &str, uci: &str) -> BotResult<()>;

    async fn account(&self) -> BotResult<Account>;

    /// Turn the account into a bot account; fails for accounts that already played games
    async fn upgrade_to_bot(&self) -> BotResult<()>;

    async fn user_profile(&self, username: &str) -> BotResult<UserProfile>;
}

/// [`BotApi`] over HTTP
#[derive(Debug, Clone)]
pub struct LichessClient {
    http: Client,
    base_url: String,
    token: String,
}

impl LichessClient {
    pub fn new(base_url: impl Into<String>, token: impl Into<String>) -> BotResult<Self> {
        let http = Client::builder()
            .user_agent(concat!("chess_bot/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: token.into(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api/{}", self.base_url, path)
    }

    async fn get(&self, path: &str) -> BotResult<Response> {
        let url = self.url(path);
        debug!(%url, "GET");
        let response = self.http.get(&url).bearer_auth(&self.token).send().await?;
        ensure_success(response).await
    }

    async fn post(&self, path: &str) -> BotResult<Response> {
        let url = self.url(path);
        debug!(%url, "POST");
        let response = self.http.post(&url).bearer_auth(&self.token).send().await?;
        ensure_success(response).await
    }

    async fn open_stream(&self, path: &str) -> BotResult<LineStream> {
        let response = self.get(path).await?;
        Ok(ndjson::lines(response.bytes_stream()))
    }
}

/// Map non-2xx responses to [`BotError::HttpStatus`], keeping the body for the log
async fn ensure_success(response: Response) -> BotResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let url = response.url().to_string();
    let body = response.text().await.unwrap_or_default();
    Err(BotError::HttpStatus {
        status: status.as_u16(),
        url,
        body,
    })
}

#[async_trait]
impl BotApi for LichessClient {
    async fn stream_events(&self) -> BotResult<LineStream> {
        self.open_stream("stream/event").await
    }

    async fn stream_game(&self, game_id: &str) -> BotResult<LineStream> {
        self.open_stream(&format!("bot/game/stream/{game_id}")).await
    }

    async fn accept_challenge(&self, challenge_id: &str) -> BotResult<()> {
        self.post(&format!("challenge/{challenge_id}/accept")).await?;
        Ok(())
    }

    async fn seek(&self, request: SeekRequest) -> BotResult<()> {
        let url = self.url("board/seek");
        debug!(%url, time = request.time, increment = request.increment, "POST seek");
        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.token)
            .form(&request.form())
            .send()
            .await?;
        let response = ensure_success(response).await?;
        // The seek stays open while its response body is; read it to the end.
        response.bytes().await?;
        Ok(())
    }

    async fn make_move(&self, game_id: &str, uci: &str) -> BotResult<()> {
        self.post(&format!("bot/game/{game_id}/move/{uci}")).await?;
        Ok(())
    }

    async fn account(&self) -> BotResult<Account> {
        Ok(self.get("account").await?.json().await?)
    }

    async fn upgrade_to_bot(&self) -> BotResult<()> {
        self.post("bot/account/upgrade").await?;
        Ok(())
    }

    async fn user_profile(&self, username: &str) -> BotResult<UserProfile> {
        Ok(self.get(&format!("user/{username}")).await?.json().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_urls() {
        let client = LichessClient::new("https://lichess.org/", "lip_x").unwrap();
        assert_eq!(client.url("stream/event"), "https://lichess.org/api/stream/event");
        assert_eq!(
            client.url("bot/game/abc/move/e2e4"),
            "https://lichess.org/api/bot/game/abc/move/e2e4"
        );
    }

    #[test]
    fn test_player_id_prefers_account_id() {
        let account = Account {
            id: "minimax-bot".into(),
            username: "Minimax-Bot".into(),
            title: Some("BOT".into()),
        };
        assert_eq!(account.player_id("minimax-bot").unwrap(), "minimax-bot");
        assert_eq!(account.player_id("Minimax-Bot").unwrap(), "minimax-bot");
        assert_eq!(account.player_id("MINIMAX-BOT").unwrap(), "minimax-bot");
        assert!(matches!(
            account.player_id("someone-else"),
            Err(BotError::AccountMismatch { .. })
        ));
    }

    #[test]
    fn test_seek_form() {
        let form = SeekRequest {
            time: 15,
            increment: 10,
            rated: false,
        }
        .form();
        assert_eq!(form[0], ("time", "15".to_string()));
        assert_eq!(form[1], ("increment", "10".to_string()));
        assert_eq!(form[2], ("rated", "false".to_string()));
        assert_eq!(form[3], ("variant", "standard".to_string()));
    }

    #[test]
    fn test_profile_keeps_all_perfs() {
        let profile: UserProfile = serde_json::from_str(
            r#"{"id":"minimax-bot","perfs":{"blitz":{"games":12,"rating":1510,"rd":80},"storm":{"runs":3,"score":20}}}"#,
        )
        .unwrap();
        assert_eq!(profile.perfs.len(), 2);
    }
}
