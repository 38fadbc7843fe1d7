//! Session store
//!
//! Maps game ids to the task driving each game. Only game start and teardown mutate it, and
//! removing an entry aborts its task, which drops the game stream connection with it.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use serde::Serialize;
use tokio::task::JoinHandle;

struct SessionEntry {
    task: JoinHandle<()>,
    started_at: DateTime<Utc>,
}

/// Summary of one running game for the status surface
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActiveGame {
    pub game_id: String,
    pub started_at: DateTime<Utc>,
}

#[derive(Default)]
pub struct SessionStore {
    sessions: Mutex<HashMap<String, SessionEntry>>,
}

impl SessionStore {
    /// Start tracking `game_id`, calling `spawn` only if it is not tracked yet.
    ///
    /// Returns `false` for a duplicate start.
    pub fn insert_with(&self, game_id: &str, spawn: impl FnOnce() -> JoinHandle<()>) -> bool {
        let mut sessions = self.sessions.lock();
        if sessions.contains_key(game_id) {
            return false;
        }
        sessions.insert(
            game_id.to_string(),
            SessionEntry {
                task: spawn(),
                started_at: Utc::now(),
            },
        );
        true
    }

    /// Stop tracking `game_id` and abort its task. Returns the number of games left, or `None`
    /// if the game was not tracked.
    pub fn remove(&self, game_id: &str) -> Option<usize> {
        let mut sessions = self.sessions.lock();
        let entry = sessions.remove(game_id)?;
        entry.task.abort();
        Some(sessions.len())
    }

    pub fn contains(&self, game_id: &str) -> bool {
        self.sessions.lock().contains_key(game_id)
    }

    pub fn len(&self) -> usize {
        self.sessions.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Running games, oldest first
    pub fn active_games(&self) -> Vec<ActiveGame> {
        let mut games: Vec<ActiveGame> = self
            .sessions
            .lock()
            .iter()
            .map(|(game_id, entry)| ActiveGame {
                game_id: game_id.clone(),
                started_at: entry.started_at,
            })
            .collect();
        games.sort_by(|a, b| a.started_at.cmp(&b.started_at).then_with(|| a.game_id.cmp(&b.game_id)));
        games
    }

    pub fn abort_all(&self) {
        for (_, entry) in self.sessions.lock().drain() {
            entry.task.abort();
        }
    }
}
