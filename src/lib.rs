//! # match-fusion
//!
//! Core engine for a memory-matching card game with wallet-linked identity,
//! persistent per-player statistics, and a points leaderboard.
//!
//! ## Design Principles
//!
//! 1. **One aggregate per concern**: the round is a single state machine
//!    with an enumerated status; stats are a pure fold; the leaderboard is
//!    a recomputed projection. No scattered flags, no ambient globals.
//!
//! 2. **Presentation is a collaborator**: rendering, wallet plumbing, and
//!    real storage live outside the crate. The engine consumes an opaque
//!    address/balance pair, a key-value [`store::StateStore`], and UI input
//!    events; it emits one round-complete event.
//!
//! 3. **Deterministic by construction**: scoring and aggregation are pure,
//!    timers run on a caller-pumped logical clock, and shuffling accepts a
//!    seeded RNG, so every behavior is replayable in tests.
//!
//! ## Modules
//!
//! - `core`: cards, deck generation, RNG, round state machine, timer queue
//! - `scoring`: score function and player stats aggregation
//! - `leaderboard`: ranked projection over all known players
//! - `history`: bounded newest-first log of completed rounds
//! - `store`: persistence seam (JSON payloads over get/put)
//! - `session`: the embedding collaborator wiring it all together

pub mod core;
pub mod history;
pub mod leaderboard;
pub mod scoring;
pub mod session;
pub mod store;

// Re-export commonly used types
pub use crate::core::{
    Card, CardId, GameRng, PairResolution, Round, RoundOutcome, RoundSeq, RoundStatus,
    ScheduledTask, SelectOutcome, Symbol, TimerKind, TimerQueue, DECK_SIZE, PAIRS_TO_WIN,
    SYMBOL_COUNT,
};

pub use crate::scoring::{points_earned, round_score, win_rate, PlayerStats};

pub use crate::leaderboard::{Leaderboard, LeaderboardEntry};

pub use crate::history::{GameRecord, HistoryLog, RoundResult, HISTORY_CAP};

pub use crate::store::{load_or_default, save, MemoryStore, StateStore};

pub use crate::session::{
    GameSession, SessionConfig, SessionError, SessionEvent, WalletIdentity, DEFAULT_MOVE_LIMIT,
    DEFAULT_RESOLVE_DELAY_MS, TICK_INTERVAL_MS,
};
