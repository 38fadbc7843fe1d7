//! Status server
//!
//! Two read-only routes:
//! - `GET /` answers a fixed liveness text
//! - `GET /status` reports health, running games and the latest rating snapshot

use std::collections::BTreeMap;
use std::sync::Arc;

use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;

use crate::dispatcher::{ActiveGame, Dispatcher};
use crate::ratings::{PerfRating, RatingBoard};
use crate::session::LifecycleStatus;

pub const LIVENESS_TEXT: &str = "Chess Bot is running!";

#[derive(Clone)]
pub struct AppState {
    pub dispatcher: Arc<Dispatcher>,
    pub ratings: Arc<RatingBoard>,
}

#[derive(Debug, Serialize)]
pub struct StatusResponse {
    /// `online`, or `degraded` after repeated connection failures
    pub status: &'static str,
    pub phase: LifecycleStatus,
    pub active_games: usize,
    pub games: Vec<ActiveGame>,
    pub ratings: BTreeMap<String, PerfRating>,
}

pub fn router(dispatcher: Arc<Dispatcher>, ratings: Arc<RatingBoard>) -> Router {
    let state = AppState { dispatcher, ratings };

    Router::new()
        .route("/", get(liveness))
        .route("/status", get(status))
        .with_state(state)
}

async fn liveness() -> &'static str {
    LIVENESS_TEXT
}

async fn status(State(state): State<AppState>) -> Json<StatusResponse> {
    let games = state.dispatcher.sessions().active_games();
    let status = if state.dispatcher.health().is_degraded() {
        "degraded"
    } else {
        "online"
    };

    Json(StatusResponse {
        status,
        phase: state.dispatcher.phase(),
        active_games: games.len(),
        games,
        ratings: state.ratings.current().ratings.clone(),
    })
}
