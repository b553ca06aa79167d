//! Scoring and stats aggregation.
//!
//! `score` maps one round's moves/time to a score and points; `stats` folds
//! scored outcomes into a player's cumulative record. Both are pure.

pub mod score;
pub mod stats;

pub use score::{points_earned, round_score, BASE_SCORE, MIN_SCORE};
pub use stats::{win_rate, PlayerStats};
