//! Round state machine scenarios driven through the session.
//!
//! These tests pump the logical clock the way a UI embedding the engine
//! would, and verify the observable round state at each step.

use match_fusion::{
    CardId, GameRng, GameSession, MemoryStore, RoundStatus, SelectOutcome, SessionConfig, Symbol,
};

const ADDRESS: &str = "0x742d35Cc6635C0532925a3b8D6Ae87C9a8Da9cd2";

fn session_with(config: SessionConfig) -> GameSession<MemoryStore> {
    let mut session = GameSession::with_rng(MemoryStore::new(), config, GameRng::new(42));
    session.connect_wallet(ADDRESS, "1.0");
    session
}

fn session() -> GameSession<MemoryStore> {
    session_with(SessionConfig::default())
}

/// Ids of the two cards carrying `symbol`.
fn pair_of(session: &GameSession<MemoryStore>, symbol: u8) -> (CardId, CardId) {
    let ids: Vec<CardId> = session
        .round()
        .cards()
        .iter()
        .filter(|c| c.symbol == Symbol::new(symbol))
        .map(|c| c.id)
        .collect();
    assert_eq!(ids.len(), 2);
    (ids[0], ids[1])
}

/// Two card ids with different symbols.
fn mismatch_of(session: &GameSession<MemoryStore>) -> (CardId, CardId) {
    let cards = session.round().cards();
    let first = cards.iter().find(|c| c.selectable()).unwrap();
    let second = cards
        .iter()
        .find(|c| c.selectable() && c.symbol != first.symbol)
        .unwrap();
    (first.id, second.id)
}

/// Start, flip two mismatched cards, let the delay elapse: both return
/// face-down, one move counted, nothing matched.
#[test]
fn test_mismatch_flow() {
    let mut session = session();
    session.start().unwrap();

    let (a, b) = mismatch_of(&session);
    assert_eq!(session.select_card(a), SelectOutcome::Flipped);
    assert_eq!(session.select_card(b), SelectOutcome::PairPending);
    assert_eq!(session.round().status(), RoundStatus::AwaitingResolution);

    // Cards stay face-up until the resolution delay passes
    assert!(session.round().card(a).unwrap().face_up);
    assert!(session.round().card(b).unwrap().face_up);

    session.advance(1000);

    assert!(!session.round().card(a).unwrap().face_up);
    assert!(!session.round().card(b).unwrap().face_up);
    assert_eq!(session.round().move_count(), 1);
    assert_eq!(session.round().matched_pairs(), 0);
    assert_eq!(session.round().status(), RoundStatus::Active);
}

/// Clicks during the resolution window are ignored.
#[test]
fn test_input_ignored_while_pair_pending() {
    let mut session = session();
    session.start().unwrap();

    let (a, b) = mismatch_of(&session);
    session.select_card(a);
    session.select_card(b);

    let other = session
        .round()
        .cards()
        .iter()
        .find(|c| c.selectable())
        .unwrap()
        .id;
    assert_eq!(session.select_card(other), SelectOutcome::Ignored);
    assert_eq!(session.round().selection().len(), 2);
}

/// Matched pairs accumulate and never decrease across a full round.
#[test]
fn test_matched_pairs_monotonic() {
    let mut session = session_with(SessionConfig {
        resolve_delay_ms: 0,
        move_limit: None,
        ..SessionConfig::default()
    });
    session.start().unwrap();

    let mut previous = 0;
    for symbol in 0..8 {
        let (a, b) = pair_of(&session, symbol);
        session.select_card(a);
        session.select_card(b);
        session.advance(0);

        let pairs = session.round().matched_pairs();
        assert!(pairs >= previous);
        previous = pairs;
    }

    // Exactly 8 pairs, and only at Completed
    assert_eq!(previous, 8);
    assert_eq!(session.round().status(), RoundStatus::Completed);
}

/// The elapsed counter follows the logical clock one second at a time.
#[test]
fn test_elapsed_tracks_clock() {
    let mut session = session();
    session.start().unwrap();

    session.advance(999);
    assert_eq!(session.round().elapsed_seconds(), 0);

    session.advance(1);
    assert_eq!(session.round().elapsed_seconds(), 1);

    session.advance(4500);
    assert_eq!(session.round().elapsed_seconds(), 5);
}

/// A resolution timer from a discarded round must not touch its successor.
#[test]
fn test_stale_resolution_cannot_corrupt_new_round() {
    let mut session = session();
    session.start().unwrap();

    // Leave a pair pending with its resolution scheduled
    let (a, b) = mismatch_of(&session);
    session.select_card(a);
    session.select_card(b);

    // Discard that round and start a new one before the delay elapses
    session.reset();
    session.start().unwrap();
    let first = session
        .round()
        .cards()
        .iter()
        .find(|c| c.selectable())
        .unwrap()
        .id;
    session.select_card(first);

    // The old round's resolution time comes and goes
    session.advance(1000);

    // New round untouched: one card still selected, nothing resolved
    assert_eq!(session.round().selection(), &[first]);
    assert!(session.round().card(first).unwrap().face_up);
    assert_eq!(session.round().matched_pairs(), 0);
    assert_eq!(session.round().move_count(), 0);
    assert_eq!(session.round().status(), RoundStatus::Active);
}

/// Reset from mid-round emits no completion event and goes back to idle.
#[test]
fn test_reset_emits_nothing() {
    let mut session = session();
    session.start().unwrap();
    let (a, b) = mismatch_of(&session);
    session.select_card(a);
    session.select_card(b);

    session.reset();
    session.advance(10_000);

    assert_eq!(session.round().status(), RoundStatus::Idle);
    assert!(session.drain_events().is_empty());
}

/// Starting over from a completed round deals a fresh deck with zeroed
/// counters.
#[test]
fn test_restart_after_completion() {
    let mut session = session_with(SessionConfig {
        resolve_delay_ms: 0,
        move_limit: None,
        ..SessionConfig::default()
    });
    session.start().unwrap();

    for symbol in 0..8 {
        let (a, b) = pair_of(&session, symbol);
        session.select_card(a);
        session.select_card(b);
        session.advance(0);
    }
    assert_eq!(session.round().status(), RoundStatus::Completed);

    session.start().unwrap();
    assert_eq!(session.round().status(), RoundStatus::Active);
    assert_eq!(session.round().move_count(), 0);
    assert_eq!(session.round().matched_pairs(), 0);
    assert!(session.round().cards().iter().all(|c| !c.matched));
}
