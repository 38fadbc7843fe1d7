//! Scripted `BotApi` for integration tests

#![allow(dead_code)]

use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use chess_bot::networking::{ndjson, Account, BotApi, LineStream, SeekRequest, UserProfile};
use chess_bot::{BotError, BotResult, BotSettings};
use futures_lite::{stream, StreamExt};
use parking_lot::Mutex;
use tokio::sync::Notify;
use tokio::time::Instant;

pub const BOT: &str = "minimax-bot";

/// Scripted server: streams replay fixed lines then stay open, requests are recorded
#[derive(Default)]
pub struct MockApi {
    /// One entry per connection of the event stream; later connections fail
    pub event_connections: Mutex<VecDeque<Vec<String>>>,
    pub event_stream_opens: AtomicUsize,
    pub game_lines: Mutex<HashMap<String, Vec<String>>>,
    pub seeks: Mutex<Vec<(SeekRequest, Instant)>>,
    /// Seek attempts to reject before accepting
    pub seek_failures: AtomicUsize,
    pub reject_all_seeks: std::sync::atomic::AtomicBool,
    pub moves: Mutex<Vec<(String, String)>>,
    pub move_attempts: AtomicUsize,
    /// Move submissions to reject before accepting
    pub move_failures: AtomicUsize,
    pub accepted: Mutex<Vec<String>>,
    pub activity: Notify,
}

impl MockApi {
    pub fn with_game(self, game_id: &str, lines: Vec<String>) -> Self {
        self.game_lines.lock().insert(game_id.to_string(), lines);
        self
    }

    pub fn seek_count(&self) -> usize {
        self.seeks.lock().len()
    }

    pub fn submitted_moves(&self) -> Vec<String> {
        self.moves.lock().iter().map(|(_, mv)| mv.clone()).collect()
    }

    /// Wait until `done` holds, checking after every recorded request
    pub async fn wait_for(&self, done: impl Fn(&Self) -> bool) {
        loop {
            let notified = self.activity.notified();
            if done(self) {
                return;
            }
            notified.await;
        }
    }

    fn transport_error() -> BotError {
        BotError::Transport {
            message: "connection refused".into(),
        }
    }

    fn take_failure(counter: &AtomicUsize) -> bool {
        counter
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok()
    }
}

fn open_forever(lines: Vec<String>) -> LineStream {
    Box::pin(stream::iter(lines.into_iter().map(Ok::<String, BotError>)).chain(stream::pending()))
}

#[async_trait]
impl BotApi for MockApi {
    async fn stream_events(&self) -> BotResult<LineStream> {
        self.event_stream_opens.fetch_add(1, Ordering::SeqCst);
        self.activity.notify_one();
        match self.event_connections.lock().pop_front() {
            Some(lines) => Ok(ndjson::from_lines(lines)),
            None => Err(Self::transport_error()),
        }
    }

    async fn stream_game(&self, game_id: &str) -> BotResult<LineStream> {
        let lines = self.game_lines.lock().get(game_id).cloned().unwrap_or_default();
        Ok(open_forever(lines))
    }

    async fn accept_challenge(&self, challenge_id: &str) -> BotResult<()> {
        self.accepted.lock().push(challenge_id.to_string());
        self.activity.notify_one();
        Ok(())
    }

    async fn seek(&self, request: SeekRequest) -> BotResult<()> {
        self.seeks.lock().push((request, Instant::now()));
        self.activity.notify_one();
        if self.reject_all_seeks.load(Ordering::SeqCst) || Self::take_failure(&self.seek_failures) {
            return Err(BotError::HttpStatus {
                status: 400,
                url: "/api/board/seek".into(),
                body: String::new(),
            });
        }
        Ok(())
    }

    async fn make_move(&self, game_id: &str, uci: &str) -> BotResult<()> {
        self.move_attempts.fetch_add(1, Ordering::SeqCst);
        let result = if Self::take_failure(&self.move_failures) {
            Err(Self::transport_error())
        } else {
            self.moves.lock().push((game_id.to_string(), uci.to_string()));
            Ok(())
        };
        self.activity.notify_one();
        result
    }

    async fn account(&self) -> BotResult<Account> {
        Ok(Account {
            id: BOT.into(),
            username: BOT.into(),
            title: Some("BOT".into()),
        })
    }

    async fn upgrade_to_bot(&self) -> BotResult<()> {
        Ok(())
    }

    async fn user_profile(&self, _username: &str) -> BotResult<UserProfile> {
        Ok(serde_json::from_str(r#"{"perfs":{"blitz":{"games":3,"rating":1432,"rd":190}}}"#)
            .map_err(|err| BotError::MalformedEvent {
                line: String::new(),
                reason: err.to_string(),
            })?)
    }
}

/// Default timings with a shallow search and quick move retries
pub fn test_settings() -> BotSettings {
    BotSettings {
        depth: 2,
        move_retry_delay: Duration::from_millis(10),
        ..BotSettings::new(BOT)
    }
}

pub fn game_full(white: &str, black: &str, moves: &str) -> String {
    format!(
        r#"{{"type":"gameFull","id":"g1","white":{{"id":"{white}"}},"black":{{"id":"{black}"}},"state":{{"type":"gameState","moves":"{moves}","status":"started"}}}}"#
    )
}

pub fn game_state(moves: &str, status: &str) -> String {
    format!(r#"{{"type":"gameState","moves":"{moves}","status":"{status}"}}"#)
}

pub fn game_start(game_id: &str) -> String {
    format!(r#"{{"type":"gameStart","game":{{"id":"{game_id}"}}}}"#)
}

pub fn game_finish(game_id: &str) -> String {
    format!(r#"{{"type":"gameFinish","game":{{"id":"{game_id}"}}}}"#)
}
