//! Two-phase readiness gating for the pipeline's external collaborators.
//!
//! The pipeline can only start once two independent signals have fired:
//! the access credential is available and the storage API is reachable.
//! Instead of polling flags, callers await the explicit state machine
//! `NotReady -> PartiallyReady -> Ready` once.

use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::watch;
use tracing::debug;

/// Readiness of the pipeline's collaborators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReadinessState {
    /// Neither signal has fired.
    NotReady,
    /// Exactly one signal has fired.
    PartiallyReady,
    /// Both signals have fired; batches may start.
    Ready,
}

/// Gate that aggregates the two readiness signals.
///
/// Signals are monotonic: once marked, a signal stays set until `reset`.
pub struct ReadinessGate {
    auth_ready: AtomicBool,
    api_ready: AtomicBool,
    tx: watch::Sender<ReadinessState>,
}

impl Default for ReadinessGate {
    fn default() -> Self {
        Self::new()
    }
}

impl ReadinessGate {
    /// Creates a gate in the `NotReady` state.
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(ReadinessState::NotReady);
        Self {
            auth_ready: AtomicBool::new(false),
            api_ready: AtomicBool::new(false),
            tx,
        }
    }

    /// Marks the credential signal.
    pub fn mark_auth_ready(&self) {
        self.auth_ready.store(true, Ordering::SeqCst);
        self.publish();
    }

    /// Marks the storage API signal.
    pub fn mark_api_ready(&self) {
        self.api_ready.store(true, Ordering::SeqCst);
        self.publish();
    }

    /// Clears both signals, returning to `NotReady`.
    pub fn reset(&self) {
        self.auth_ready.store(false, Ordering::SeqCst);
        self.api_ready.store(false, Ordering::SeqCst);
        self.publish();
    }

    /// The current aggregate state.
    pub fn state(&self) -> ReadinessState {
        match (
            self.auth_ready.load(Ordering::SeqCst),
            self.api_ready.load(Ordering::SeqCst),
        ) {
            (true, true) => ReadinessState::Ready,
            (false, false) => ReadinessState::NotReady,
            _ => ReadinessState::PartiallyReady,
        }
    }

    /// Resolves once the gate reaches `Ready`. No polling: the caller is
    /// woken by the signal that completes the pair.
    pub async fn ready(&self) {
        let mut rx = self.tx.subscribe();
        // wait_for checks the current value first, so a gate that is
        // already Ready resolves immediately.
        let _ = rx.wait_for(|state| *state == ReadinessState::Ready).await;
    }

    fn publish(&self) {
        let state = self.state();
        debug!(?state, "Readiness changed");
        let _ = self.tx.send(state);
    }
}
