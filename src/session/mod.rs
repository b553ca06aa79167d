//! Session layer: wallet identity and the embedding `GameSession`.

pub mod session;
pub mod wallet;

pub use session::{
    GameSession, SessionConfig, SessionError, SessionEvent, DEFAULT_MOVE_LIMIT,
    DEFAULT_RESOLVE_DELAY_MS, TICK_INTERVAL_MS,
};
pub use wallet::WalletIdentity;
