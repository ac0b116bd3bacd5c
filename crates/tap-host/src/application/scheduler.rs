//! Delayed-action scheduling and the uptime clock for gesture emulation.
//!
//! Gestures defer work: a long-press schedules its release for half a second
//! later, and the wheel-button race schedules a key tap that an early
//! button-up must be able to call off. Both needs are served by
//! [`DelayedActionSlot`], a one-action-at-a-time scheduler with synchronous,
//! race-free cancellation.
//!
//! # Why a generation counter? (for beginners)
//!
//! The slot spawns a Tokio task that sleeps and then runs the action. Between
//! "the sleep elapsed" and "the action runs" there is a window in which a
//! cancel request can arrive. If cancellation were a simple boolean handshake
//! the old task could still slip through and fire after `cancel` already
//! reported success, and a rescheduled slot could be fired by its
//! predecessor's timer.
//!
//! Instead, every `schedule` call stamps the slot with a fresh generation
//! number and the spawned task remembers the stamp it was born with. Before
//! firing, the task re-checks the slot under the lock: it may only fire while
//! the slot is still armed *and* the stamp still matches. `cancel` (and any
//! newer `schedule`) bumps the generation, so a superseded task finds a stale
//! stamp and quietly does nothing, no matter how late it wakes up.

use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use tokio::time::Instant;

// ── Uptime clock ──────────────────────────────────────────────────────────────

/// Monotonic milliseconds since the clock was created.
///
/// Injected events carry explicit timestamps and platform input validation
/// compares them against each other, so every component stamping events must
/// share one clock. `Uptime` is `Copy`; hand the same value to everything
/// that stamps events for one session.
///
/// Built on [`tokio::time::Instant`] so tests running under Tokio's paused
/// clock can drive it deterministically with `tokio::time::advance`.
#[derive(Debug, Clone, Copy)]
pub struct Uptime {
    epoch: Instant,
}

impl Uptime {
    /// Creates a clock whose zero point is now.
    pub fn new() -> Self {
        Self {
            epoch: Instant::now(),
        }
    }

    /// Milliseconds elapsed since the clock was created.
    pub fn now_ms(&self) -> u64 {
        self.epoch.elapsed().as_millis() as u64
    }
}

impl Default for Uptime {
    fn default() -> Self {
        Self::new()
    }
}

// ── Delayed action slot ───────────────────────────────────────────────────────

#[derive(Debug, Default)]
struct SlotState {
    /// Bumped by every `schedule` and `cancel`; a spawned task may only fire
    /// while its own stamp matches.
    generation: u64,
    /// True while a scheduled action has neither fired nor been cancelled.
    armed: bool,
}

/// A single-slot cooperative scheduler: at most one action pending at a time.
///
/// Scheduling while an action is pending replaces it ("latest wins"); there
/// is no queue. [`DelayedActionSlot::cancel`] is synchronous: once it
/// returns, the previously scheduled action can no longer fire, even if its
/// delay had already elapsed when the cancel was requested.
///
/// Clones share the same slot. `schedule` must be called from within a Tokio
/// runtime.
#[derive(Debug, Clone, Default)]
pub struct DelayedActionSlot {
    state: Arc<Mutex<SlotState>>,
}

impl DelayedActionSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedules `action` to run after `delay`, replacing any pending action.
    ///
    /// The delay is measured from this call, not from when the spawned task
    /// first gets polled.
    pub fn schedule<F>(&self, delay: Duration, action: F)
    where
        F: FnOnce() + Send + 'static,
    {
        let deadline = Instant::now() + delay;
        let stamp = {
            let mut slot = self.lock_state();
            slot.generation += 1;
            slot.armed = true;
            slot.generation
        };

        let state = Arc::clone(&self.state);
        tokio::spawn(async move {
            tokio::time::sleep_until(deadline).await;
            let fire = {
                let mut slot = state.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
                if slot.armed && slot.generation == stamp {
                    slot.armed = false;
                    true
                } else {
                    false
                }
            };
            // The lock is released before the action runs; an action is free
            // to schedule into the same slot again.
            if fire {
                action();
            }
        });
    }

    /// Cancels the pending action, if any.
    ///
    /// Returns `true` if an action was still pending (and is now guaranteed
    /// never to fire), `false` if the slot was empty or the action had
    /// already fired.
    pub fn cancel(&self) -> bool {
        let mut slot = self.lock_state();
        let was_pending = slot.armed;
        slot.armed = false;
        slot.generation += 1;
        was_pending
    }

    /// Returns `true` while an action is scheduled but has not yet fired.
    pub fn is_pending(&self) -> bool {
        self.lock_state().armed
    }

    fn lock_state(&self) -> MutexGuard<'_, SlotState> {
        // A poisoned lock only means a panicking thread was interrupted
        // mid-flag-update; the two booleans are always safe to reuse.
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
