//! Rating snapshot
//!
//! The bot's ratings per time control, fetched from its public profile. Each refresh replaces
//! the whole snapshot; readers hold an `Arc` to the snapshot they loaded and never see a half
//! written one.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use serde::Serialize;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::{info, warn};

use crate::core::BotResult;
use crate::health::HealthTracker;
use crate::networking::{BotApi, UserProfile};

/// Rating of one time control
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PerfRating {
    pub rating: i64,
    pub games: u64,
    /// Rating deviation
    pub rd: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RatingSnapshot {
    pub ratings: BTreeMap<String, PerfRating>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fetched_at: Option<DateTime<Utc>>,
}

/// Rating movement of one time control between two snapshots
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RatingChange {
    pub time_control: String,
    pub rating: i64,
    /// Zero when there was no previous rating
    pub delta: i64,
    pub games: u64,
}

impl RatingSnapshot {
    /// Keep the profile entries that carry a rating; puzzle and storm stats do not
    pub fn from_profile(profile: &UserProfile, fetched_at: DateTime<Utc>) -> Self {
        let ratings = profile
            .perfs
            .iter()
            .filter_map(|(time_control, perf)| {
                let rating = perf.get("rating")?.as_i64()?;
                let games = perf.get("games").and_then(|v| v.as_u64()).unwrap_or(0);
                let rd = perf.get("rd").and_then(|v| v.as_i64()).unwrap_or(0);
                Some((time_control.clone(), PerfRating { rating, games, rd }))
            })
            .collect();
        Self {
            ratings,
            fetched_at: Some(fetched_at),
        }
    }

    pub fn changes(&self, previous: &RatingSnapshot) -> Vec<RatingChange> {
        self.ratings
            .iter()
            .map(|(time_control, perf)| {
                let delta = match previous.ratings.get(time_control) {
                    Some(old) if old.rating > 0 => perf.rating - old.rating,
                    _ => 0,
                };
                RatingChange {
                    time_control: time_control.clone(),
                    rating: perf.rating,
                    delta,
                    games: perf.games,
                }
            })
            .collect()
    }
}

/// Process-wide holder of the current snapshot
#[derive(Debug, Default)]
pub struct RatingBoard {
    current: RwLock<Arc<RatingSnapshot>>,
}

impl RatingBoard {
    pub fn current(&self) -> Arc<RatingSnapshot> {
        self.current.read().clone()
    }

    /// Swap in `snapshot`, returning the one it replaces
    pub fn replace(&self, snapshot: RatingSnapshot) -> Arc<RatingSnapshot> {
        std::mem::replace(&mut *self.current.write(), Arc::new(snapshot))
    }
}

/// Fetch `username`'s ratings into `board` and log what moved
pub async fn refresh(api: &dyn BotApi, username: &str, board: &RatingBoard) -> BotResult<Vec<RatingChange>> {
    let profile = api.user_profile(username).await?;
    let snapshot = RatingSnapshot::from_profile(&profile, Utc::now());
    let previous = board.replace(snapshot);
    let changes = board.current().changes(&previous);

    for change in &changes {
        info!(
            time_control = %change.time_control,
            rating = change.rating,
            delta = change.delta,
            games = change.games,
            "rating"
        );
    }
    Ok(changes)
}

/// Refresh every `period`, starting one period from now
pub async fn run_refresh_loop(
    api: Arc<dyn BotApi>,
    username: String,
    board: Arc<RatingBoard>,
    health: Arc<HealthTracker>,
    period: Duration,
) {
    let mut ticker = interval_at(Instant::now() + period, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        ticker.tick().await;
        match refresh(api.as_ref(), &username, &board).await {
            Ok(_) => health.record_success(),
            Err(err) => {
                if err.is_transport() {
                    health.record_failure();
                }
                warn!(error = %err, "rating refresh failed");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(json: &str) -> UserProfile {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_snapshot_skips_unrated_perfs() {
        let snapshot = RatingSnapshot::from_profile(
            &profile(
                r#"{"perfs":{"blitz":{"games":12,"rating":1510,"rd":80,"prog":3},
                    "rapid":{"games":0,"rating":1500,"rd":500},"storm":{"runs":3,"score":20}}}"#,
            ),
            Utc::now(),
        );
        assert_eq!(snapshot.ratings.len(), 2);
        assert_eq!(
            snapshot.ratings["blitz"],
            PerfRating {
                rating: 1510,
                games: 12,
                rd: 80
            }
        );
    }

    #[test]
    fn test_changes_against_previous() {
        let now = Utc::now();
        let old = RatingSnapshot::from_profile(&profile(r#"{"perfs":{"blitz":{"games":1,"rating":1500,"rd":300}}}"#), now);
        let new = RatingSnapshot::from_profile(
            &profile(r#"{"perfs":{"blitz":{"games":2,"rating":1488,"rd":280},"bullet":{"games":1,"rating":1620,"rd":300}}}"#),
            now,
        );
        let changes = new.changes(&old);
        let blitz = changes.iter().find(|c| c.time_control == "blitz").unwrap();
        let bullet = changes.iter().find(|c| c.time_control == "bullet").unwrap();
        assert_eq!(blitz.delta, -12);
        assert_eq!(bullet.delta, 0);
    }

    #[test]
    fn test_board_replaces_wholesale() {
        let board = RatingBoard::default();
        let held = board.current();
        assert!(held.ratings.is_empty());

        let snapshot = RatingSnapshot::from_profile(
            &profile(r#"{"perfs":{"blitz":{"games":1,"rating":1500,"rd":300}}}"#),
            Utc::now(),
        );
        let previous = board.replace(snapshot);
        assert!(previous.ratings.is_empty());
        assert_eq!(board.current().ratings.len(), 1);
        // readers keep the snapshot they loaded
        assert!(held.ratings.is_empty());
    }
}
