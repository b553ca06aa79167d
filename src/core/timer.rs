//! Cancelable scheduled tasks on a logical clock.
//!
//! The only asynchrony in the system is the pair-resolution delay and the
//! once-per-second ticker. Both are modeled as tasks in a `TimerQueue` that
//! the embedder pumps with [`TimerQueue::advance`]; nothing here blocks or
//! spawns threads.
//!
//! ## Staleness
//!
//! Every task is tagged with the [`RoundSeq`] of the round that scheduled
//! it. Starting or resetting a round clears the queue *and* bumps the
//! sequence, so a task that somehow survives (or is dispatched late by the
//! embedder) can be recognized as stale and dropped instead of mutating a
//! newer round's state.

use serde::{Deserialize, Serialize};

/// Monotonic identity of a round within a session.
///
/// Bumped on every `start` and `reset`; tasks from an older sequence are
/// dead on arrival.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RoundSeq(pub u64);

impl RoundSeq {
    /// Next sequence value.
    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

/// What a scheduled task does when it fires.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimerKind {
    /// Resolve the pending pair.
    Resolve,
    /// Advance the elapsed-seconds counter (re-armed by the dispatcher).
    Tick,
}

/// A task waiting on the logical clock.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduledTask {
    /// What fires.
    pub kind: TimerKind,
    /// Round that scheduled this task.
    pub round: RoundSeq,
    /// Absolute due time on the queue's logical clock.
    pub due_ms: u64,
}

/// Queue of scheduled tasks over a logical millisecond clock.
///
/// The embedder advances the clock; due tasks come back in due order for the
/// session to dispatch. The queue itself knows nothing about rounds beyond
/// the sequence tag.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct TimerQueue {
    tasks: Vec<ScheduledTask>,
    now_ms: u64,
}

impl TimerQueue {
    /// Create an empty queue at time zero.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current logical time in milliseconds.
    #[must_use]
    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    /// Number of pending tasks.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.tasks.len()
    }

    /// Schedule a task `delay_ms` from now, tagged with `round`.
    pub fn schedule(&mut self, kind: TimerKind, round: RoundSeq, delay_ms: u64) {
        self.tasks.push(ScheduledTask {
            kind,
            round,
            due_ms: self.now_ms + delay_ms,
        });
    }

    /// Schedule a task at an absolute due time.
    ///
    /// Used to re-arm the ticker from its previous due time so the one-second
    /// cadence does not drift.
    pub fn schedule_at(&mut self, kind: TimerKind, round: RoundSeq, due_ms: u64) {
        self.tasks.push(ScheduledTask { kind, round, due_ms });
    }

    /// Drop every pending task.
    pub fn clear(&mut self) {
        self.tasks.clear();
    }

    /// Advance the clock by `delta_ms` and return the tasks that came due,
    /// ordered by due time (stable for ties: scheduling order).
    pub fn advance(&mut self, delta_ms: u64) -> Vec<ScheduledTask> {
        self.now_ms += delta_ms;
        let now = self.now_ms;

        let mut due: Vec<ScheduledTask> = Vec::new();
        self.tasks.retain(|task| {
            if task.due_ms <= now {
                due.push(*task);
                false
            } else {
                true
            }
        });
        due.sort_by_key(|task| task.due_ms);
        due
    }
}
