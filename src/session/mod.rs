//! Session module - one game as seen by the bot
//!
//! A [`GameSession`] owns the position of one game and decides when the engine has to move.
//! It never trusts its own history: every state update replays the server's full move list
//! from the starting position, so a missed or reordered update cannot desynchronize it.
//!
//! # Lifecycle
//!
//! ```text
//! Seeking -> AwaitingOpponent -> Active -> Finished
//! ```
//!
//! Sessions are created `Active` on `gameStart`; the two earlier states belong to the
//! dispatcher, which reports them while no game is running.
//!
//! # Move submission
//!
//! When the bot submits a move it records the length of the authoritative move list at that
//! moment. Until the server's list grows past that length the session will neither search nor
//! submit again, so replayed or duplicated updates can never produce a second move for the same
//! ply. A submission that keeps failing is given up after the configured number of attempts and
//! the optimistic local move is rolled back.

mod runner;

pub use runner::{run_session, SessionContext};

use std::fmt;

use chess_engine::api::replay_moves;
use chess_engine::{Color, Move, Position};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::core::{BotError, BotResult};
use crate::networking::{GameFull, GameState};

/// Where the bot, or one of its games, currently is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LifecycleStatus {
    Seeking,
    AwaitingOpponent,
    Active,
    Finished,
}

impl fmt::Display for LifecycleStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            LifecycleStatus::Seeking => "seeking",
            LifecycleStatus::AwaitingOpponent => "awaiting_opponent",
            LifecycleStatus::Active => "active",
            LifecycleStatus::Finished => "finished",
        };
        f.write_str(text)
    }
}

/// What the session wants to do after an update
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Turn {
    /// Opponent to move, a submission is pending, or the color is not known yet
    Wait,
    /// The bot is to move and nothing is pending
    Think,
    Finished,
}

/// Outcome of a failed submission attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryDecision {
    Retry,
    /// Attempts exhausted; the pending record is cleared and the position rebuilt
    GiveUp,
}

/// A submitted move not yet confirmed by the server
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingSubmission {
    /// Length of the authoritative move list when the move was submitted
    pub ply: usize,
    pub mv: Move,
    pub attempts: u32,
}

/// Resolve the bot's color from the player ids of `gameFull`.
///
/// The comparison is exact. A match on neither side or on both is ambiguous.
pub fn resolve_color(game_id: &str, username: &str, white: &str, black: &str) -> BotResult<Color> {
    match (white == username, black == username) {
        (true, false) => Ok(Color::White),
        (false, true) => Ok(Color::Black),
        _ => Err(BotError::AmbiguousColorAssignment {
            game_id: game_id.to_string(),
            username: username.to_string(),
            white: white.to_string(),
            black: black.to_string(),
        }),
    }
}

/// State of one game
#[derive(Debug, Clone)]
pub struct GameSession {
    game_id: String,
    username: String,
    position: Position,
    bot_color: Option<Color>,
    status: LifecycleStatus,
    /// Last move list received from the server
    moves: String,
    ply: usize,
    pending: Option<PendingSubmission>,
}

impl GameSession {
    /// New session for a game that just started
    pub fn new(game_id: impl Into<String>, username: impl Into<String>) -> Self {
        Self {
            game_id: game_id.into(),
            username: username.into(),
            position: Position::new(),
            bot_color: None,
            status: LifecycleStatus::Active,
            moves: String::new(),
            ply: 0,
            pending: None,
        }
    }

    pub fn game_id(&self) -> &str {
        &self.game_id
    }

    pub fn position(&self) -> &Position {
        &self.position
    }

    pub fn bot_color(&self) -> Option<Color> {
        self.bot_color
    }

    pub fn status(&self) -> LifecycleStatus {
        self.status
    }

    /// Length of the last authoritative move list
    pub fn ply(&self) -> usize {
        self.ply
    }

    pub fn pending(&self) -> Option<PendingSubmission> {
        self.pending
    }

    /// Handle `gameFull`: settle the color once, then treat its state as an update
    pub fn on_game_full(&mut self, full: &GameFull) -> Turn {
        if self.bot_color.is_none() {
            let color = match resolve_color(&self.game_id, &self.username, &full.white.id, &full.black.id)
            {
                Ok(color) => color,
                Err(err) => {
                    warn!(game_id = %self.game_id, error = %err, "defaulting to black");
                    Color::Black
                }
            };
            info!(game_id = %self.game_id, %color, "playing");
            self.bot_color = Some(color);
        }
        self.on_game_state(&full.state)
    }

    /// Handle a state update: resynchronize, then decide whether to move
    pub fn on_game_state(&mut self, state: &GameState) -> Turn {
        if self.status == LifecycleStatus::Finished {
            return Turn::Finished;
        }
        let synced = self.sync_moves(&state.moves);
        if let Err(err) = &synced {
            warn!(game_id = %self.game_id, error = %err, "move list out of step, keeping last consistent position");
        }
        if !state.is_started() {
            info!(game_id = %self.game_id, status = %state.status, "game over");
            self.finish();
            return Turn::Finished;
        }
        // the server is ahead of the replayed position, wait for a list that replays
        if synced.is_err() {
            return Turn::Wait;
        }
        self.turn()
    }

    /// Rebuild the position from the full move list.
    ///
    /// On an illegal or unparseable token the rest of the list is ignored and the position is
    /// the one before that token.
    pub fn sync_moves(&mut self, moves: &str) -> BotResult<()> {
        let replay = replay_moves(moves);
        self.moves = moves.to_string();
        self.ply = replay.applied;
        self.position = replay.position;

        if let Some(pending) = self.pending {
            if self.ply > pending.ply {
                debug!(game_id = %self.game_id, mv = %pending.mv, "submission confirmed");
                self.pending = None;
            }
        }

        match replay.fault {
            None => Ok(()),
            Some(fault) => Err(BotError::ProtocolInconsistency {
                game_id: self.game_id.clone(),
                index: fault.index,
                token: fault.token,
                source: fault.error,
            }),
        }
    }

    /// Should the engine run now?
    pub fn turn(&self) -> Turn {
        if self.status == LifecycleStatus::Finished {
            return Turn::Finished;
        }
        match self.bot_color {
            Some(color)
                if self.pending.is_none()
                    && self.position.side_to_move() == color
                    && !self.position.is_terminal() =>
            {
                Turn::Think
            }
            _ => Turn::Wait,
        }
    }

    /// Record `mv` as submitted for the current ply and play it locally
    pub fn begin_submission(&mut self, mv: Move) -> BotResult<Move> {
        let invalid = |source| BotError::InvalidMove {
            game_id: self.game_id.clone(),
            mv: mv.to_uci(),
            source,
        };
        let played = self.position.resolve(mv).map_err(invalid)?;
        self.position.apply(played).map_err(invalid)?;
        self.pending = Some(PendingSubmission {
            ply: self.ply,
            mv: played,
            attempts: 1,
        });
        Ok(played)
    }

    /// Count a failed attempt of the pending submission
    pub fn submission_failed(&mut self, max_attempts: u32) -> RetryDecision {
        let Some(pending) = self.pending.as_mut() else {
            return RetryDecision::GiveUp;
        };
        if pending.attempts < max_attempts {
            pending.attempts += 1;
            return RetryDecision::Retry;
        }

        warn!(game_id = %self.game_id, mv = %pending.mv, attempts = pending.attempts, "giving up on move");
        self.pending = None;
        let moves = std::mem::take(&mut self.moves);
        if let Err(err) = self.sync_moves(&moves) {
            warn!(game_id = %self.game_id, error = %err, "rebuilt position is inconsistent");
        }
        RetryDecision::GiveUp
    }

    pub fn finish(&mut self) {
        self.status = LifecycleStatus::Finished;
        self.pending = None;
    }
}
