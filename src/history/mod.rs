//! Bounded round history.
//!
//! An append-only log of completed rounds, newest first, capped at
//! [`HISTORY_CAP`] entries with FIFO eviction of the oldest. Records are
//! immutable snapshots; append-and-trim is the only mutation path.

use chrono::{DateTime, Utc};
use im::Vector;
use serde::{Deserialize, Serialize};

use crate::core::RoundOutcome;

/// Maximum records retained per player.
pub const HISTORY_CAP: usize = 50;

/// Win or loss, for display and replay.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoundResult {
    /// All eight pairs matched.
    Win,
    /// Move cap hit before completion.
    Loss,
}

/// Immutable snapshot of one completed round.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRecord {
    /// Monotonic id, unique within a player's history.
    pub id: u64,

    /// Wall-clock completion time.
    pub timestamp: DateTime<Utc>,

    /// Win or loss.
    pub result: RoundResult,

    /// Round score.
    pub score: u32,

    /// Moves taken.
    pub moves: u32,

    /// Seconds the round ran.
    pub elapsed_seconds: u32,

    /// Points credited toward the leaderboard.
    pub points_earned: u32,
}

impl GameRecord {
    /// Build a record from a round outcome.
    #[must_use]
    pub fn from_outcome(id: u64, timestamp: DateTime<Utc>, outcome: &RoundOutcome) -> Self {
        Self {
            id,
            timestamp,
            result: if outcome.won {
                RoundResult::Win
            } else {
                RoundResult::Loss
            },
            score: outcome.score,
            moves: outcome.moves,
            elapsed_seconds: outcome.elapsed_seconds,
            points_earned: outcome.points_earned,
        }
    }
}

/// A player's recent rounds, newest first.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryLog {
    records: Vector<GameRecord>,
}

impl HistoryLog {
    /// Empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records in newest-first order.
    #[must_use]
    pub fn records(&self) -> &Vector<GameRecord> {
        &self.records
    }

    /// Number of retained records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Is the log empty?
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// The id to assign to the next record: one past the highest stored.
    ///
    /// Survives reload because it is derived from the records themselves.
    #[must_use]
    pub fn next_id(&self) -> u64 {
        self.records
            .iter()
            .map(|r| r.id)
            .max()
            .map_or(0, |max| max + 1)
    }

    /// Prepend a record and trim to the retention cap.
    pub fn push(&mut self, record: GameRecord) {
        self.records.push_front(record);
        // im::Vector::truncate panics (unlike std) when the target exceeds len
        if self.records.len() > HISTORY_CAP {
            self.records.truncate(HISTORY_CAP);
        }
    }
}
