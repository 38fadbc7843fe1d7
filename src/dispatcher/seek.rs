//! Seek gate and seek loop
//!
//! The seek loop posts seeks while the gate is open. Starting a game suspends the gate, the
//! last game finishing opens it again, and [`SeekGate::stop`] closes it for good. Gate changes
//! interrupt whatever the loop is waiting on, including a seek request still in flight.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::time::sleep;
use tracing::{debug, info};

use super::Dispatcher;
use crate::networking::{SeekRequest, TIME_CONTROLS};
use crate::session::LifecycleStatus;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateState {
    Open,
    Suspended,
    Stopped,
}

/// Switch of the seek loop, shared between the dispatcher and the loop
#[derive(Debug)]
pub struct SeekGate {
    tx: watch::Sender<GateState>,
}

impl Default for SeekGate {
    fn default() -> Self {
        Self {
            tx: watch::Sender::new(GateState::Open),
        }
    }
}

impl SeekGate {
    pub fn state(&self) -> GateState {
        *self.tx.borrow()
    }

    pub fn subscribe(&self) -> watch::Receiver<GateState> {
        self.tx.subscribe()
    }

    pub fn suspend(&self) {
        self.set(GateState::Suspended);
    }

    pub fn open(&self) {
        self.set(GateState::Open);
    }

    /// Stop seeking permanently; later calls have no effect
    pub fn stop(&self) {
        self.set(GateState::Stopped);
    }

    /// Receivers are only woken by actual changes, and nothing leaves `Stopped`
    fn set(&self, next: GateState) {
        self.tx.send_if_modified(|state| {
            if *state == next || *state == GateState::Stopped {
                return false;
            }
            *state = next;
            true
        });
    }
}

/// Wait out `delay`; `false` if the gate changed first
async fn pause(gate: &mut watch::Receiver<GateState>, delay: Duration) -> bool {
    tokio::select! {
        _ = sleep(delay) => true,
        _ = gate.changed() => false,
    }
}

impl Dispatcher {
    /// Post one seek per time control until the server accepts one
    pub async fn seek_once(&self) -> bool {
        for (time, increment) in TIME_CONTROLS {
            let request = SeekRequest {
                time,
                increment,
                rated: self.settings.rated,
            };
            match self.api.seek(request).await {
                Ok(()) => {
                    self.health.record_success();
                    info!(time, increment, "seek accepted");
                    return true;
                }
                Err(err) => {
                    self.record_error(&err);
                    debug!(time, increment, error = %err, "seek rejected");
                }
            }
        }
        false
    }

    /// Seek until the gate is stopped
    pub async fn run_seek_loop(self: Arc<Self>) {
        let mut gate = self.gate.subscribe();
        let mut resuming = false;
        let mut attempt: u32 = 0;

        loop {
            let state = *gate.borrow_and_update();
            match state {
                GateState::Stopped => {
                    info!("seek loop stopped");
                    return;
                }
                GateState::Suspended => {
                    resuming = true;
                    if gate.changed().await.is_err() {
                        return;
                    }
                    continue;
                }
                GateState::Open => {}
            }

            if resuming {
                resuming = false;
                debug!(delay = ?self.settings.resume_delay, "resuming seek");
                if !pause(&mut gate, self.settings.resume_delay).await {
                    continue;
                }
            }

            attempt += 1;
            debug!(attempt, "seeking");
            let accepted = tokio::select! {
                accepted = self.seek_once() => accepted,
                changed = gate.changed() => {
                    if changed.is_err() {
                        return;
                    }
                    continue;
                }
            };

            let delay = if accepted {
                attempt = 0;
                self.phase.send_if_modified(|phase| {
                    if *phase != LifecycleStatus::Seeking {
                        return false;
                    }
                    *phase = LifecycleStatus::AwaitingOpponent;
                    true
                });
                self.settings.reseek_delay
            } else {
                info!(attempt, delay = ?self.settings.retry_delay, "no seek accepted");
                self.settings.retry_delay
            };
            pause(&mut gate, delay).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stop_is_final_and_idempotent() {
        let gate = SeekGate::default();
        assert_eq!(gate.state(), GateState::Open);
        gate.suspend();
        assert_eq!(gate.state(), GateState::Suspended);
        gate.stop();
        gate.stop();
        gate.open();
        assert_eq!(gate.state(), GateState::Stopped);
    }

    #[tokio::test]
    async fn test_only_changes_wake_receivers() {
        let gate = SeekGate::default();
        let mut rx = gate.subscribe();
        gate.open();
        assert!(!rx.has_changed().unwrap());
        gate.suspend();
        assert!(rx.has_changed().unwrap());
        assert_eq!(*rx.borrow_and_update(), GateState::Suspended);
    }
}
