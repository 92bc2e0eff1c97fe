// SPDX-License-Identifier: MPL-2.0
//! Deferred-callback capability used for history debouncing and render
//! coalescing.
//!
//! The editor never sleeps or spawns on its own. Owners of a timer ask a
//! [`Scheduler`] to deliver a [`TimerToken`] after a delay and later feed
//! fired tokens back through [`EditorContext::on_timer`](super::EditorContext::on_timer).
//!
//! - [`ManualScheduler`]: fake clock advanced explicitly, for tests and
//!   synchronous hosts
//! - [`TokioScheduler`]: sleeps on the tokio runtime and reports fired tokens
//!   over a channel

use std::collections::HashMap;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// What a timer was scheduled for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TimerPurpose {
    /// Debounced history commit.
    HistoryCommit,
    /// Coalesced preview render.
    Render,
}

/// Identifies one scheduled callback.
///
/// Tokens are issued by the timer owner; `sequence` increases with every
/// request so a stale token never matches the latest one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerToken {
    pub purpose: TimerPurpose,
    pub sequence: u64,
}

impl TimerToken {
    #[must_use]
    pub const fn new(purpose: TimerPurpose, sequence: u64) -> Self {
        Self { purpose, sequence }
    }
}

/// Issues increasing tokens for one purpose.
#[derive(Debug, Clone)]
pub struct TokenSequence {
    purpose: TimerPurpose,
    next: u64,
}

impl TokenSequence {
    #[must_use]
    pub fn new(purpose: TimerPurpose) -> Self {
        Self { purpose, next: 0 }
    }

    pub fn next_token(&mut self) -> TimerToken {
        self.next += 1;
        TimerToken::new(self.purpose, self.next)
    }
}

/// Delivers tokens after a delay.
pub trait Scheduler {
    /// Arranges for `token` to fire once `delay` has elapsed.
    fn schedule_after(&mut self, delay: Duration, token: TimerToken);

    /// Cancels a pending token. Unknown or already fired tokens are ignored.
    fn cancel(&mut self, token: TimerToken);
}

// =============================================================================
// Manual Scheduler
// =============================================================================

/// Deterministic scheduler driven by [`ManualScheduler::advance`].
#[derive(Debug, Default)]
pub struct ManualScheduler {
    now: Duration,
    pending: Vec<(Duration, TimerToken)>,
}

impl ManualScheduler {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Time elapsed on the fake clock.
    #[must_use]
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Number of tokens waiting to fire.
    #[must_use]
    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    #[must_use]
    pub fn is_pending(&self, token: TimerToken) -> bool {
        self.pending.iter().any(|(_, t)| *t == token)
    }

    /// Moves the clock forward and returns every token whose deadline has
    /// passed, earliest first.
    pub fn advance(&mut self, by: Duration) -> Vec<TimerToken> {
        self.now += by;
        let now = self.now;
        let (mut due, waiting): (Vec<_>, Vec<_>) =
            self.pending.drain(..).partition(|(deadline, _)| *deadline <= now);
        self.pending = waiting;
        // Stable sort keeps scheduling order for equal deadlines
        due.sort_by_key(|(deadline, _)| *deadline);
        due.into_iter().map(|(_, token)| token).collect()
    }
}

impl Scheduler for ManualScheduler {
    fn schedule_after(&mut self, delay: Duration, token: TimerToken) {
        self.pending.push((self.now + delay, token));
    }

    fn cancel(&mut self, token: TimerToken) {
        self.pending.retain(|(_, t)| *t != token);
    }
}

// =============================================================================
// Tokio Scheduler
// =============================================================================

/// Scheduler backed by `tokio::time::sleep` tasks.
///
/// Must be used from within a tokio runtime. Fired tokens are received with
/// [`TokioScheduler::recv`] or [`TokioScheduler::try_recv`].
#[derive(Debug)]
pub struct TokioScheduler {
    fired_tx: mpsc::UnboundedSender<TimerToken>,
    fired_rx: mpsc::UnboundedReceiver<TimerToken>,
    tasks: HashMap<TimerToken, JoinHandle<()>>,
}

impl TokioScheduler {
    #[must_use]
    pub fn new() -> Self {
        let (fired_tx, fired_rx) = mpsc::unbounded_channel();
        Self {
            fired_tx,
            fired_rx,
            tasks: HashMap::new(),
        }
    }

    /// Waits for the next fired token.
    pub async fn recv(&mut self) -> Option<TimerToken> {
        let token = self.fired_rx.recv().await?;
        self.tasks.remove(&token);
        Some(token)
    }

    /// Returns a fired token if one is ready.
    pub fn try_recv(&mut self) -> Option<TimerToken> {
        let token = self.fired_rx.try_recv().ok()?;
        self.tasks.remove(&token);
        Some(token)
    }
}

impl Default for TokioScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl Scheduler for TokioScheduler {
    fn schedule_after(&mut self, delay: Duration, token: TimerToken) {
        let fired_tx = self.fired_tx.clone();
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            // Receiver dropped means the scheduler is gone
            let _ = fired_tx.send(token);
        });
        if let Some(previous) = self.tasks.insert(token, handle) {
            previous.abort();
        }
    }

    fn cancel(&mut self, token: TimerToken) {
        if let Some(handle) = self.tasks.remove(&token) {
            handle.abort();
        }
    }
}

impl Drop for TokioScheduler {
    fn drop(&mut self) {
        for (_, handle) in self.tasks.drain() {
            handle.abort();
        }
    }
}
