//! Game stream consumer
//!
//! One task per game: reads the game's event stream, feeds it to the [`GameSession`] and plays
//! the engine's move whenever the session asks for one. The search itself runs on the blocking
//! pool against a copy of the position, so a deep search never stalls the runtime.

use std::sync::Arc;
use std::time::Instant;

use chess_engine::search::best_move;
use futures_lite::StreamExt;
use tokio::time::sleep;
use tracing::{debug, error, info, warn};

use super::{GameSession, LifecycleStatus, RetryDecision, Turn};
use crate::core::{BotError, BotSettings};
use crate::health::HealthTracker;
use crate::networking::{BotApi, GameEvent};

/// Everything a session task needs besides its game id
#[derive(Clone)]
pub struct SessionContext {
    pub api: Arc<dyn BotApi>,
    pub settings: Arc<BotSettings>,
    pub health: Arc<HealthTracker>,
}

/// Drive `game_id` until the server reports it finished.
///
/// A dropped game stream is reopened after the retry delay; the session keeps its state and
/// resynchronizes from the next `gameFull`.
pub async fn run_session(ctx: SessionContext, game_id: String) {
    let mut session = GameSession::new(game_id.as_str(), ctx.settings.username.as_str());

    loop {
        match ctx.api.stream_game(&game_id).await {
            Ok(mut lines) => {
                ctx.health.record_success();
                info!(%game_id, "game stream connected");

                while let Some(line) = lines.next().await {
                    let line = match line {
                        Ok(line) => line,
                        Err(err) => {
                            record_error(&ctx, &err);
                            warn!(%game_id, error = %err, "game stream failed");
                            break;
                        }
                    };

                    let turn = match GameEvent::parse(&line) {
                        Ok(GameEvent::GameFull(full)) => session.on_game_full(&full),
                        Ok(GameEvent::GameState(state)) => session.on_game_state(&state),
                        Ok(GameEvent::Unknown) => {
                            debug!(%game_id, %line, "ignoring game event");
                            continue;
                        }
                        Err(err) => {
                            warn!(%game_id, error = %err, "skipping game event");
                            continue;
                        }
                    };

                    match turn {
                        Turn::Think => play_move(&ctx, &mut session).await,
                        Turn::Finished => return,
                        Turn::Wait => {}
                    }
                }

                if session.status() == LifecycleStatus::Finished {
                    return;
                }
                warn!(%game_id, "game stream closed");
            }
            Err(err) => {
                record_error(&ctx, &err);
                warn!(%game_id, error = %err, "cannot open game stream");
            }
        }

        sleep(ctx.settings.retry_delay).await;
    }
}

/// Search, commit locally, submit
async fn play_move(ctx: &SessionContext, session: &mut GameSession) {
    let game_id = session.game_id().to_string();
    let position = session.position().clone();
    let depth = ctx.settings.depth;
    let started = Instant::now();

    let result = match tokio::task::spawn_blocking(move || best_move(&position, depth)).await {
        Ok(result) => result,
        Err(err) => {
            let err = BotError::from(err);
            error!(%game_id, error = %err, "search aborted");
            return;
        }
    };

    let Some(mv) = result.best_move else {
        warn!(%game_id, "no move found");
        return;
    };
    info!(
        %game_id,
        mv = %mv,
        score = result.score,
        depth,
        elapsed_ms = started.elapsed().as_millis() as u64,
        "move chosen"
    );

    let mv = match session.begin_submission(mv) {
        Ok(mv) => mv,
        Err(err) => {
            error!(%game_id, error = %err, "engine move rejected by own position");
            return;
        }
    };

    let uci = mv.to_uci();
    loop {
        match ctx.api.make_move(&game_id, &uci).await {
            Ok(()) => {
                ctx.health.record_success();
                debug!(%game_id, mv = %uci, "move sent");
                return;
            }
            Err(err) => {
                record_error(ctx, &err);
                warn!(%game_id, mv = %uci, error = %err, "move submission failed");
                match session.submission_failed(ctx.settings.move_retries) {
                    RetryDecision::Retry => sleep(ctx.settings.move_retry_delay).await,
                    RetryDecision::GiveUp => return,
                }
            }
        }
    }
}

fn record_error(ctx: &SessionContext, err: &BotError) {
    if err.is_transport() {
        ctx.health.record_failure();
    }
}
