//! The game session: everything one player's sitting owns.
//!
//! `GameSession` embeds the round state machine and wires its completion
//! into scoring, stats, history, and the leaderboard as a single reducer
//! step. It also owns the timer queue, enforces the move cap (the machine
//! itself has no loss state), and persists every mutation through the
//! injected store.
//!
//! ## Run-to-completion
//!
//! All mutation happens through `&mut self` methods on one logical thread;
//! each completes fully before the next input is processed. On round
//! completion the stats fold, history append, leaderboard re-rank, rank
//! write-back, and persistence all happen inside one method call, so no
//! intermediate state (points updated but rank stale) is ever observable.
//!
//! ## Time
//!
//! The session runs on a logical millisecond clock: the embedder calls
//! [`GameSession::advance`] as real time passes (or instantly, in tests).
//! Wall-clock time is only read for history record timestamps.

use chrono::Utc;
use thiserror::Error;

use crate::core::{
    CardId, GameRng, PairResolution, Round, RoundOutcome, RoundSeq, ScheduledTask, SelectOutcome,
    TimerKind, TimerQueue,
};
use crate::history::{GameRecord, HistoryLog};
use crate::leaderboard::Leaderboard;
use crate::scoring::PlayerStats;
use crate::store::{self, StateStore};

use super::wallet::WalletIdentity;

/// Ticker cadence: the elapsed counter advances once per second.
pub const TICK_INTERVAL_MS: u64 = 1000;

/// Default UI-visible delay before a pending pair is resolved.
pub const DEFAULT_RESOLVE_DELAY_MS: u64 = 1000;

/// Default move cap: a round still incomplete after this many moves is lost.
pub const DEFAULT_MOVE_LIMIT: u32 = 15;

/// Session tuning knobs and the storage key namespace.
#[derive(Clone, Debug)]
pub struct SessionConfig {
    /// Moves allowed before the round is closed out as a loss.
    /// `None` disables the cap entirely.
    pub move_limit: Option<u32>,

    /// Delay between the second flip and pair resolution.
    pub resolve_delay_ms: u64,

    /// Storage key namespace; keys are `{prefix}.stats.{address}`,
    /// `{prefix}.history.{address}`, `{prefix}.leaderboard`.
    pub key_prefix: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            move_limit: Some(DEFAULT_MOVE_LIMIT),
            resolve_delay_ms: DEFAULT_RESOLVE_DELAY_MS,
            key_prefix: String::from("match-fusion"),
        }
    }
}

/// Why a round could not be started.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum SessionError {
    /// No wallet address; round start is gated on a connected wallet.
    #[error("wallet is not connected")]
    WalletDisconnected,
}

/// Outward notification from the session.
///
/// Round completion is the sole event; everything else the session does is
/// observable through its accessors.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionEvent {
    /// A round finished, by win or by move cap.
    RoundCompleted {
        /// The round's score.
        score: u32,
        /// True when all eight pairs were matched.
        won: bool,
    },
}

/// One player's session: round, stats, history, leaderboard, timers, store.
pub struct GameSession<S: StateStore> {
    store: S,
    config: SessionConfig,
    rng: GameRng,
    wallet: WalletIdentity,
    stats: PlayerStats,
    history: HistoryLog,
    leaderboard: Leaderboard,
    round: Round,
    timers: TimerQueue,
    round_seq: RoundSeq,
    events: Vec<SessionEvent>,
}

impl<S: StateStore> GameSession<S> {
    /// Create a session over the given store with entropy-seeded shuffling.
    #[must_use]
    pub fn new(store: S, config: SessionConfig) -> Self {
        Self::with_rng(store, config, GameRng::from_entropy())
    }

    /// Create a session with an explicit RNG (deterministic tests/replays).
    #[must_use]
    pub fn with_rng(store: S, config: SessionConfig, rng: GameRng) -> Self {
        Self {
            store,
            config,
            rng,
            wallet: WalletIdentity::disconnected(),
            stats: PlayerStats::new(),
            history: HistoryLog::new(),
            leaderboard: Leaderboard::new(),
            round: Round::idle(),
            timers: TimerQueue::new(),
            round_seq: RoundSeq(0),
            events: Vec::new(),
        }
    }

    // === Accessors ===

    /// The current round.
    #[must_use]
    pub fn round(&self) -> &Round {
        &self.round
    }

    /// The player's cumulative stats.
    #[must_use]
    pub fn stats(&self) -> &PlayerStats {
        &self.stats
    }

    /// The player's round history.
    #[must_use]
    pub fn history(&self) -> &HistoryLog {
        &self.history
    }

    /// The shared leaderboard projection.
    #[must_use]
    pub fn leaderboard(&self) -> &Leaderboard {
        &self.leaderboard
    }

    /// The wallet identity snapshot.
    #[must_use]
    pub fn wallet(&self) -> &WalletIdentity {
        &self.wallet
    }

    /// Take all pending outward events.
    pub fn drain_events(&mut self) -> Vec<SessionEvent> {
        std::mem::take(&mut self.events)
    }

    /// Consume the session and hand the store back to the embedder.
    #[must_use]
    pub fn into_store(self) -> S {
        self.store
    }

    // === Wallet lifecycle ===

    /// Connect a wallet and load the player's persisted state.
    ///
    /// Stats and history are keyed by address; the leaderboard is shared.
    /// Absent or malformed payloads fall back to defaults. An empty address
    /// is treated as a disconnect.
    pub fn connect_wallet(&mut self, address: impl Into<String>, balance: impl Into<String>) {
        let wallet = WalletIdentity::new(address, balance);
        if !wallet.is_connected() {
            self.disconnect_wallet();
            return;
        }

        log::info!("wallet connected: {}", wallet.short_address());
        self.wallet = wallet;

        self.stats = store::load_or_default(&self.store, &self.stats_key());
        self.history = store::load_or_default(&self.store, &self.history_key());
        self.leaderboard = store::load_or_default(&self.store, &self.leaderboard_key());

        self.stats.balance = self.wallet.balance_display().to_string();
        if let Some(rank) = self.leaderboard.rank_of(self.wallet.address()) {
            self.stats.rank = rank;
        }
        let stats_key = self.stats_key();
        store::save(&mut self.store, &stats_key, &self.stats);
    }

    /// Drop the wallet and discard in-memory player state.
    ///
    /// Persisted state is untouched; reconnecting the same address loads it
    /// back. Any running round is abandoned without a completion event.
    pub fn disconnect_wallet(&mut self) {
        self.reset();
        self.wallet = WalletIdentity::disconnected();
        self.stats = PlayerStats::new();
        self.history = HistoryLog::new();
    }

    /// Write a fresh balance through to the display stats.
    pub fn update_balance(&mut self, balance: impl Into<String>) {
        self.wallet.set_balance(balance);
        if self.wallet.is_connected() {
            self.stats.balance = self.wallet.balance_display().to_string();
            let stats_key = self.stats_key();
            store::save(&mut self.store, &stats_key, &self.stats);
        }
    }

    // === UI input surface ===

    /// Start a new round.
    ///
    /// Invalidates any pending timers from a previous round, deals a fresh
    /// deck, and arms the one-second ticker.
    pub fn start(&mut self) -> Result<(), SessionError> {
        if !self.wallet.is_connected() {
            return Err(SessionError::WalletDisconnected);
        }

        self.round_seq = self.round_seq.next();
        self.timers.clear();
        self.round.start(&mut self.rng);
        self.timers
            .schedule(TimerKind::Tick, self.round_seq, TICK_INTERVAL_MS);
        Ok(())
    }

    /// Select a card in the current round.
    ///
    /// On the second flip of a pair, schedules the resolution timer. Invalid
    /// selections are ignored per the round machine's policy.
    pub fn select_card(&mut self, id: CardId) -> SelectOutcome {
        let outcome = self.round.select_card(id);
        if outcome == SelectOutcome::PairPending {
            self.timers.schedule(
                TimerKind::Resolve,
                self.round_seq,
                self.config.resolve_delay_ms,
            );
        }
        outcome
    }

    /// Abandon the current round and return to idle.
    ///
    /// Cancels all pending timers; no completion event is emitted.
    pub fn reset(&mut self) {
        self.round_seq = self.round_seq.next();
        self.timers.clear();
        self.round.reset();
    }

    // === Clock ===

    /// Advance the logical clock, dispatching due timers.
    ///
    /// A coarse advance fires everything that came due in the window,
    /// including ticks re-armed mid-dispatch, so `advance(3000)` produces
    /// three one-second ticks. Tasks scheduled by an earlier round are
    /// dropped: the queue is cleared on start/reset and, as a second guard,
    /// each task's round tag is checked against the current round before it
    /// fires.
    pub fn advance(&mut self, delta_ms: u64) {
        let mut due = self.timers.advance(delta_ms);
        while !due.is_empty() {
            for task in due {
                self.dispatch(task);
            }
            // Pick up tasks re-armed by the dispatches above that are
            // already due in the same window
            due = self.timers.advance(0);
        }
    }

    fn dispatch(&mut self, task: ScheduledTask) {
        if task.round != self.round_seq {
            log::debug!("dropping stale {:?} from {:?}", task.kind, task.round);
            return;
        }

        match task.kind {
            TimerKind::Tick => {
                self.round.tick();
                if self.round.is_running() {
                    // Re-arm from the previous due time so the cadence does
                    // not drift with coarse advance calls
                    self.timers.schedule_at(
                        TimerKind::Tick,
                        self.round_seq,
                        task.due_ms + TICK_INTERVAL_MS,
                    );
                }
            }
            TimerKind::Resolve => self.resolve_due_pair(),
        }
    }

    /// Resolve the pending pair against current round state, then apply the
    /// win or move-cap outcome.
    fn resolve_due_pair(&mut self) {
        match self.round.resolve_pair() {
            PairResolution::NotPending => {}
            PairResolution::Matched {
                round_complete: true,
            } => {
                let outcome = self.round.outcome(true);
                self.apply_outcome(outcome);
            }
            PairResolution::Matched {
                round_complete: false,
            }
            | PairResolution::Mismatch => {
                if let Some(limit) = self.config.move_limit {
                    if self.round.move_count() >= limit {
                        let outcome = self.round.close_as_loss();
                        self.apply_outcome(outcome);
                    }
                }
            }
        }
    }

    // === Completion reducer ===

    /// Fold a completed round into stats, history, and the leaderboard, then
    /// persist and emit the round-complete event.
    ///
    /// Single atomic step relative to any reader: by the time this method
    /// returns, points, rank, history, and the stored payloads all agree.
    fn apply_outcome(&mut self, outcome: RoundOutcome) {
        self.timers.clear();

        self.stats = self.stats.apply(&outcome);

        let record = GameRecord::from_outcome(self.history.next_id(), Utc::now(), &outcome);
        self.history.push(record);

        self.leaderboard
            .record_round(self.wallet.address(), &self.stats, &outcome);
        if let Some(rank) = self.leaderboard.rank_of(self.wallet.address()) {
            self.stats.rank = rank;
        }

        let stats_key = self.stats_key();
        let history_key = self.history_key();
        let leaderboard_key = self.leaderboard_key();
        store::save(&mut self.store, &stats_key, &self.stats);
        store::save(&mut self.store, &history_key, &self.history);
        store::save(&mut self.store, &leaderboard_key, &self.leaderboard);

        log::info!(
            "round complete: won={} score={} points={} rank={}",
            outcome.won,
            outcome.score,
            outcome.points_earned,
            self.stats.rank
        );
        self.events.push(SessionEvent::RoundCompleted {
            score: outcome.score,
            won: outcome.won,
        });
    }

    // === Storage keys ===

    fn stats_key(&self) -> String {
        format!("{}.stats.{}", self.config.key_prefix, self.wallet.address())
    }

    fn history_key(&self) -> String {
        format!(
            "{}.history.{}",
            self.config.key_prefix,
            self.wallet.address()
        )
    }

    fn leaderboard_key(&self) -> String {
        format!("{}.leaderboard", self.config.key_prefix)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::RoundStatus;
    use crate::store::MemoryStore;

    const ADDRESS: &str = "0x742d35Cc6635C0532925a3b8D6Ae87C9a8Da9cd2";

    fn session() -> GameSession<MemoryStore> {
        let mut session = GameSession::with_rng(
            MemoryStore::new(),
            SessionConfig::default(),
            GameRng::new(42),
        );
        session.connect_wallet(ADDRESS, "1.0");
        session
    }

    #[test]
    fn test_start_requires_wallet() {
        let mut session = GameSession::with_rng(
            MemoryStore::new(),
            SessionConfig::default(),
            GameRng::new(42),
        );

        assert_eq!(session.start(), Err(SessionError::WalletDisconnected));
        assert_eq!(session.round().status(), RoundStatus::Idle);
    }

    #[test]
    fn test_start_after_connect() {
        let mut session = session();

        assert_eq!(session.start(), Ok(()));
        assert_eq!(session.round().status(), RoundStatus::Active);
    }

    #[test]
    fn test_empty_address_is_disconnect() {
        let mut session = session();
        session.connect_wallet("", "0");

        assert!(!session.wallet().is_connected());
        assert_eq!(session.start(), Err(SessionError::WalletDisconnected));
    }

    #[test]
    fn test_ticker_advances_elapsed() {
        let mut session = session();
        session.start().unwrap();

        session.advance(3000);
        assert_eq!(session.round().elapsed_seconds(), 3);
    }

    #[test]
    fn test_ticker_stops_on_reset() {
        let mut session = session();
        session.start().unwrap();
        session.advance(2000);

        session.reset();
        session.advance(5000);

        assert_eq!(session.round().elapsed_seconds(), 0);
        assert_eq!(session.round().status(), RoundStatus::Idle);
    }

    #[test]
    fn test_balance_write_through() {
        let mut session = session();
        session.update_balance("7.25");

        assert_eq!(session.stats().balance, "7.25");
        assert_eq!(session.wallet().balance_display(), "7.25");
    }

    #[test]
    fn test_disconnect_clears_memory_not_store() {
        let mut session = session();
        session.update_balance("3.0");

        session.disconnect_wallet();
        assert!(!session.wallet().is_connected());
        assert_eq!(session.stats().balance, "0");

        // Reconnect restores the persisted stats
        session.connect_wallet(ADDRESS, "3.0");
        assert_eq!(session.stats().balance, "3.0");
    }
}
