//! Points leaderboard.
//!
//! A locally recomputed, single-writer projection over all known players:
//! unique by address, stable-sorted descending by points, with a dense
//! 1-based rank reassigned after every round completion. Not a distributed
//! ledger; whoever owns the session owns the board.

use serde::{Deserialize, Serialize};

use crate::core::RoundOutcome;
use crate::scoring::PlayerStats;

/// One player's row on the board.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    /// Dense 1-based position by descending points.
    pub rank: u32,

    /// Wallet address: the identity key. Opaque to the engine.
    pub address: String,

    /// Rounds won.
    pub wins: u32,

    /// Cumulative points.
    pub points: u32,

    /// Win percentage, rounded.
    pub win_rate: u32,

    /// Highest single-round score.
    pub best_score: u32,
}

/// The ranked projection of all known players.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Leaderboard {
    entries: Vec<LeaderboardEntry>,
}

impl Leaderboard {
    /// Empty board.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Entries in rank order.
    #[must_use]
    pub fn entries(&self) -> &[LeaderboardEntry] {
        &self.entries
    }

    /// Number of players on the board.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Is the board empty?
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Look up a player's entry by address.
    #[must_use]
    pub fn entry(&self, address: &str) -> Option<&LeaderboardEntry> {
        self.entries.iter().find(|e| e.address == address)
    }

    /// A player's current rank, if they are on the board.
    #[must_use]
    pub fn rank_of(&self, address: &str) -> Option<u32> {
        self.entry(address).map(|e| e.rank)
    }

    /// Fold one completed round into the board and re-rank.
    ///
    /// A known address is overwritten from the player's freshly aggregated
    /// `stats`, keeping the row consistent with the stats fold. An unknown
    /// address is seeded from this round alone. The whole board is then
    /// stable-sorted by descending points and ranks reassigned 1..N.
    pub fn record_round(&mut self, address: &str, stats: &PlayerStats, outcome: &RoundOutcome) {
        match self.entries.iter_mut().find(|e| e.address == address) {
            Some(entry) => {
                entry.wins = stats.wins;
                entry.points = stats.points;
                entry.win_rate = stats.win_rate;
                entry.best_score = stats.best_score;
            }
            None => {
                // New player: seed from this round alone
                self.entries.push(LeaderboardEntry {
                    rank: self.entries.len() as u32 + 1,
                    address: address.to_string(),
                    wins: u32::from(outcome.won),
                    points: outcome.points_earned,
                    win_rate: if outcome.won { 100 } else { 0 },
                    best_score: outcome.score,
                });
            }
        }

        self.rerank();
        log::debug!("leaderboard re-ranked, {} players", self.entries.len());
    }

    /// Stable sort by descending points and reassign dense 1-based ranks.
    fn rerank(&mut self) {
        self.entries.sort_by(|a, b| b.points.cmp(&a.points));
        for (i, entry) in self.entries.iter_mut().enumerate() {
            entry.rank = i as u32 + 1;
        }
    }
}
