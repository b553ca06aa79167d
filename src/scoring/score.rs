//! Round scoring.
//!
//! Pure and deterministic: identical inputs always produce identical scores,
//! which is what makes stats replayable from a history of outcomes.

/// Base score before deductions.
pub const BASE_SCORE: u32 = 1000;

/// Score floor; no round scores below this.
pub const MIN_SCORE: u32 = 100;

/// Deduction per completed move.
pub const MOVE_PENALTY: u32 = 10;

/// Deduction per elapsed second.
pub const SECOND_PENALTY: u32 = 2;

/// Compute the score for a round from moves and elapsed time.
///
/// `max(1000 - moves * 10 - elapsed * 2, 100)`. The same formula applies to
/// wins and losses; a loss is scored from the moves/time at the point it was
/// called.
#[must_use]
pub fn round_score(moves: u32, elapsed_seconds: u32) -> u32 {
    BASE_SCORE
        .saturating_sub(moves.saturating_mul(MOVE_PENALTY))
        .saturating_sub(elapsed_seconds.saturating_mul(SECOND_PENALTY))
        .max(MIN_SCORE)
}

/// Points credited toward the leaderboard for a round.
///
/// Full score on a win, a tenth (floored) on a loss.
#[must_use]
pub fn points_earned(score: u32, won: bool) -> u32 {
    if won {
        score
    } else {
        score / 10
    }
}
