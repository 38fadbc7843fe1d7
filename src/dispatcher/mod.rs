//! Dispatcher module - the bot's top level
//!
//! The [`Dispatcher`] consumes the account event stream and owns the set of running games:
//!
//! - `challenge` is accepted
//! - `gameStart` suspends seeking and spawns a session task for the game
//! - `gameFinish` tears the session down; when it was the last one, seeking reopens
//! - a session whose game stream reports the end of the game tears itself down the same way
//!
//! Next to it runs the seek loop, gated by the same dispatcher. Neither a bad
//! event nor a failed request ends either loop: events are skipped, requests are logged and
//! counted by the health tracker, and a dropped stream is reopened after the retry delay.

mod seek;
mod store;

pub use seek::{GateState, SeekGate};
pub use store::{ActiveGame, SessionStore};

use std::sync::Arc;

use futures_lite::StreamExt;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::sleep;
use tracing::{debug, info, warn};

use crate::core::{BotError, BotSettings};
use crate::health::HealthTracker;
use crate::networking::{BotApi, StreamEvent};
use crate::session::{run_session, LifecycleStatus, SessionContext};

pub struct Dispatcher {
    api: Arc<dyn BotApi>,
    settings: Arc<BotSettings>,
    health: Arc<HealthTracker>,
    store: SessionStore,
    gate: SeekGate,
    phase: watch::Sender<LifecycleStatus>,
}

impl Dispatcher {
    pub fn new(api: Arc<dyn BotApi>, settings: BotSettings, health: Arc<HealthTracker>) -> Arc<Self> {
        Arc::new(Self {
            api,
            settings: Arc::new(settings),
            health,
            store: SessionStore::default(),
            gate: SeekGate::default(),
            phase: watch::Sender::new(LifecycleStatus::Seeking),
        })
    }

    /// `Seeking`, `AwaitingOpponent` or `Active`
    pub fn phase(&self) -> LifecycleStatus {
        *self.phase.borrow()
    }

    pub fn sessions(&self) -> &SessionStore {
        &self.store
    }

    pub fn gate(&self) -> &SeekGate {
        &self.gate
    }

    pub fn health(&self) -> &Arc<HealthTracker> {
        &self.health
    }

    /// Stop seeking. Running games are not affected.
    pub fn stop(&self) {
        self.gate.stop();
    }

    /// Stop seeking and abort every game task
    pub fn shutdown(&self) {
        self.stop();
        self.store.abort_all();
    }

    /// Spawn the event consumer and the seek loop
    pub fn start(self: &Arc<Self>) -> (JoinHandle<()>, JoinHandle<()>) {
        let events = tokio::spawn(Arc::clone(self).run_event_stream());
        let seeking = tokio::spawn(Arc::clone(self).run_seek_loop());
        (events, seeking)
    }

    /// Consume the account event stream forever, reconnecting after the retry delay
    pub async fn run_event_stream(self: Arc<Self>) {
        loop {
            match self.api.stream_events().await {
                Ok(mut lines) => {
                    self.health.record_success();
                    info!("event stream connected");
                    while let Some(line) = lines.next().await {
                        match line {
                            Ok(line) => self.handle_line(&line).await,
                            Err(err) => {
                                self.record_error(&err);
                                warn!(error = %err, "event stream failed");
                                break;
                            }
                        }
                    }
                    warn!(delay = ?self.settings.retry_delay, "event stream closed, reconnecting");
                }
                Err(err) => {
                    self.record_error(&err);
                    warn!(error = %err, delay = ?self.settings.retry_delay, "cannot open event stream");
                }
            }
            sleep(self.settings.retry_delay).await;
        }
    }

    pub async fn handle_line(self: &Arc<Self>, line: &str) {
        match StreamEvent::parse(line) {
            Ok(event) => self.handle_event(event).await,
            Err(err) => warn!(error = %err, "skipping event"),
        }
    }

    pub async fn handle_event(self: &Arc<Self>, event: StreamEvent) {
        match event {
            StreamEvent::Challenge { challenge } => {
                info!(challenge_id = %challenge.id, "accepting challenge");
                match self.api.accept_challenge(&challenge.id).await {
                    Ok(()) => self.health.record_success(),
                    Err(err) => {
                        self.record_error(&err);
                        warn!(challenge_id = %challenge.id, error = %err, "cannot accept challenge");
                    }
                }
            }
            StreamEvent::GameStart { game } => self.start_game(&game.id),
            StreamEvent::GameFinish { game } => self.finish_game(&game.id),
            StreamEvent::Unknown => debug!("ignoring event"),
        }
    }

    fn start_game(self: &Arc<Self>, game_id: &str) {
        let ctx = SessionContext {
            api: Arc::clone(&self.api),
            settings: Arc::clone(&self.settings),
            health: Arc::clone(&self.health),
        };
        let owned_id = game_id.to_string();
        let dispatcher = Arc::downgrade(self);
        // A session that sees the end of its game tears itself down, so a lost gameFinish
        // cannot keep seeking suspended.
        let session = async move {
            run_session(ctx, owned_id.clone()).await;
            if let Some(dispatcher) = dispatcher.upgrade() {
                dispatcher.finish_game(&owned_id);
            }
        };
        let inserted = self.store.insert_with(game_id, || tokio::spawn(session));
        if !inserted {
            debug!(%game_id, "game already running");
            return;
        }

        self.gate.suspend();
        self.phase.send_replace(LifecycleStatus::Active);
        info!(%game_id, active_games = self.store.len(), "game started");
    }

    fn finish_game(&self, game_id: &str) {
        match self.store.remove(game_id) {
            None => debug!(%game_id, "finish for unknown game"),
            Some(0) => {
                self.phase.send_replace(LifecycleStatus::Seeking);
                self.gate.open();
                info!(%game_id, delay = ?self.settings.resume_delay, "game finished, seeking again");
            }
            Some(remaining) => info!(%game_id, active_games = remaining, "game finished"),
        }
    }

    fn record_error(&self, err: &BotError) {
        if err.is_transport() {
            self.health.record_failure();
        }
    }
}
