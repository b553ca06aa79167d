//! Core round machinery: cards, deck generation, RNG, the round state
//! machine, and the logical-clock timer queue.
//!
//! Everything here is single-round, single-player state. Cross-round
//! concerns (stats, leaderboard, history, persistence) live in the sibling
//! modules and are wired together by `session`.

pub mod card;
pub mod deck;
pub mod rng;
pub mod round;
pub mod timer;

pub use card::{Card, CardId, Symbol};
pub use deck::{DECK_SIZE, PAIRS_TO_WIN, SYMBOL_COUNT};
pub use rng::GameRng;
pub use round::{PairResolution, Round, RoundOutcome, RoundStatus, SelectOutcome};
pub use timer::{RoundSeq, ScheduledTask, TimerKind, TimerQueue};
