//! Cumulative player statistics.
//!
//! `PlayerStats` is folded forward one completed round at a time through
//! [`PlayerStats::apply`]. The fold is pure: replaying the same sequence of
//! outcomes from a zeroed state always lands on the same stats, so a
//! player's record can be rebuilt from their history.
//!
//! `rank` and `balance` are the two fields *not* produced by the fold:
//! rank is written back from the leaderboard after each re-rank, and balance
//! is an opaque display string supplied by the wallet.

use serde::{Deserialize, Serialize};

use crate::core::RoundOutcome;

/// A player's cumulative record across rounds.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerStats {
    /// Rounds won.
    pub wins: u32,

    /// Rounds lost.
    pub losses: u32,

    /// Cumulative points (leaderboard currency).
    pub points: u32,

    /// wins + losses.
    pub games_played: u32,

    /// Win percentage, rounded to the nearest integer. 0 with no games.
    pub win_rate: u32,

    /// Highest single-round score ever achieved.
    pub best_score: u32,

    /// Leaderboard position, 1-based. Maintained by the ranker, not the fold.
    pub rank: u32,

    /// Wallet balance, display-only, opaque to the engine.
    #[serde(default)]
    pub balance: String,
}

impl Default for PlayerStats {
    fn default() -> Self {
        Self {
            wins: 0,
            losses: 0,
            points: 0,
            games_played: 0,
            win_rate: 0,
            best_score: 0,
            rank: 1,
            balance: String::from("0"),
        }
    }
}

impl PlayerStats {
    /// Fresh zeroed stats for a new player.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one completed round into these stats, producing the next stats.
    ///
    /// Exactly one of wins/losses is incremented; points, best score, games
    /// played and win rate are recomputed from the new totals. `rank` and
    /// `balance` carry over unchanged.
    #[must_use]
    pub fn apply(&self, outcome: &RoundOutcome) -> Self {
        let wins = self.wins + u32::from(outcome.won);
        let losses = self.losses + u32::from(!outcome.won);
        let games_played = wins + losses;

        Self {
            wins,
            losses,
            points: self.points + outcome.points_earned,
            games_played,
            win_rate: win_rate(wins, games_played),
            best_score: self.best_score.max(outcome.score),
            rank: self.rank,
            balance: self.balance.clone(),
        }
    }
}

/// Win percentage rounded to the nearest integer; 0 when no games played.
#[must_use]
pub fn win_rate(wins: u32, games_played: u32) -> u32 {
    if games_played == 0 {
        return 0;
    }
    // Round-half-up in integer arithmetic
    (wins * 100 + games_played / 2) / games_played
}

#[cfg(test)]
mod tests {
    use super::*;

    fn win(score: u32) -> RoundOutcome {
        RoundOutcome {
            won: true,
            score,
            points_earned: score,
            moves: 8,
            elapsed_seconds: 0,
        }
    }

    fn loss(score: u32) -> RoundOutcome {
        RoundOutcome {
            won: false,
            score,
            points_earned: score / 10,
            moves: 15,
            elapsed_seconds: 30,
        }
    }

    #[test]
    fn test_default_zeroed() {
        let stats = PlayerStats::new();

        assert_eq!(stats.wins, 0);
        assert_eq!(stats.losses, 0);
        assert_eq!(stats.games_played, 0);
        assert_eq!(stats.win_rate, 0);
        assert_eq!(stats.rank, 1);
    }

    #[test]
    fn test_apply_win() {
        let stats = PlayerStats::new().apply(&win(920));

        assert_eq!(stats.wins, 1);
        assert_eq!(stats.losses, 0);
        assert_eq!(stats.games_played, 1);
        assert_eq!(stats.points, 920);
        assert_eq!(stats.best_score, 920);
        assert_eq!(stats.win_rate, 100);
    }

    #[test]
    fn test_apply_loss() {
        let stats = PlayerStats::new().apply(&loss(800));

        assert_eq!(stats.wins, 0);
        assert_eq!(stats.losses, 1);
        assert_eq!(stats.points, 80);
        assert_eq!(stats.best_score, 800); // Best score counts losses too
        assert_eq!(stats.win_rate, 0);
    }

    #[test]
    fn test_best_score_is_max() {
        let stats = PlayerStats::new()
            .apply(&win(920))
            .apply(&win(850))
            .apply(&loss(990));

        assert_eq!(stats.best_score, 990);
    }

    #[test]
    fn test_win_rate_rounding() {
        // 1 win of 3 games = 33.33 -> 33; 2 of 3 = 66.67 -> 67
        assert_eq!(win_rate(1, 3), 33);
        assert_eq!(win_rate(2, 3), 67);
        assert_eq!(win_rate(1, 2), 50);
        assert_eq!(win_rate(0, 0), 0);
    }

    #[test]
    fn test_fold_is_pure() {
        let outcomes = [win(920), loss(400), win(1000), loss(250), win(610)];

        let fold = |outcomes: &[RoundOutcome]| {
            outcomes
                .iter()
                .fold(PlayerStats::new(), |stats, o| stats.apply(o))
        };

        assert_eq!(fold(&outcomes), fold(&outcomes));
    }

    #[test]
    fn test_rank_and_balance_carry_over() {
        let mut stats = PlayerStats::new();
        stats.rank = 4;
        stats.balance = String::from("12.5 MON");

        let next = stats.apply(&win(500));

        assert_eq!(next.rank, 4);
        assert_eq!(next.balance, "12.5 MON");
    }

    #[test]
    fn test_serialization_tolerates_missing_balance() {
        // Older persisted payloads may lack the balance field
        let json = r#"{"wins":2,"losses":1,"points":1840,"games_played":3,"win_rate":67,"best_score":920,"rank":1}"#;
        let stats: PlayerStats = serde_json::from_str(json).unwrap();

        assert_eq!(stats.wins, 2);
        assert_eq!(stats.balance, "");
    }
}
