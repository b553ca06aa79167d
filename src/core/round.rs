//! Round state machine.
//!
//! A `Round` owns everything that varies while one game of memory-match is
//! being played: the shuffled deck, the pending selection, the move and pair
//! counters, the elapsed-time counter, and an explicit status. Keeping a
//! single enumerated status (instead of independent started/completed flags)
//! makes the illegal combinations unrepresentable.
//!
//! ## Lifecycle
//!
//! ```text
//! Idle --start--> Active --2nd select--> AwaitingResolution
//!                   ^                          |
//!                   +------resolve_pair--------+--(8th pair)--> Completed
//! ```
//!
//! `reset` returns to `Idle` from any state without emitting a completion.
//!
//! ## Edge-case policy
//!
//! Invalid selections are ignored, not errors: clicking a face-up card, a
//! matched card, an out-of-range id, or anything while two cards are already
//! pending all return `SelectOutcome::Ignored`. There is no loss state here;
//! a move cap is the embedding session's rule, enforced through
//! [`Round::close_as_loss`].

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::card::{Card, CardId};
use super::deck::{self, PAIRS_TO_WIN};
use super::rng::GameRng;
use crate::scoring::{points_earned, round_score};

/// Round lifecycle status.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundStatus {
    /// No round in progress.
    Idle,
    /// Round in progress with zero or one card selected.
    Active,
    /// Exactly two cards face-up, match not yet resolved.
    AwaitingResolution,
    /// Terminal: all eight pairs matched.
    Completed,
}

/// Result of a `select_card` call, for the embedder to act on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SelectOutcome {
    /// Invalid selection, state unchanged.
    Ignored,
    /// First card of a pair flipped face-up.
    Flipped,
    /// Second card flipped; the embedder should schedule pair resolution.
    PairPending,
}

/// Result of resolving a pending pair.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PairResolution {
    /// No pair was pending; nothing happened.
    NotPending,
    /// Symbols differed; both cards returned face-down.
    Mismatch,
    /// Symbols matched. `round_complete` is true on the eighth pair.
    Matched {
        /// True when this match finished the round.
        round_complete: bool,
    },
}

/// Snapshot of a finished round, carried by the round-complete event.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundOutcome {
    /// Did the player match all eight pairs?
    pub won: bool,
    /// Per-round performance score (see `scoring::round_score`).
    pub score: u32,
    /// Points credited toward the leaderboard.
    pub points_earned: u32,
    /// Completed moves (pair attempts).
    pub moves: u32,
    /// Seconds the round ran for.
    pub elapsed_seconds: u32,
}

/// One playable round of memory-match.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Round {
    cards: Vec<Card>,
    selection: SmallVec<[CardId; 2]>,
    move_count: u32,
    matched_pairs: u8,
    elapsed_seconds: u32,
    status: RoundStatus,
}

impl Default for Round {
    fn default() -> Self {
        Self::idle()
    }
}

impl Round {
    /// Create an idle round with no cards dealt.
    #[must_use]
    pub fn idle() -> Self {
        Self {
            cards: Vec::new(),
            selection: SmallVec::new(),
            move_count: 0,
            matched_pairs: 0,
            elapsed_seconds: 0,
            status: RoundStatus::Idle,
        }
    }

    // === Accessors ===

    /// Current status.
    #[must_use]
    pub fn status(&self) -> RoundStatus {
        self.status
    }

    /// The dealt cards (empty while idle).
    #[must_use]
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Look up a card by id.
    #[must_use]
    pub fn card(&self, id: CardId) -> Option<&Card> {
        self.cards.get(id.raw() as usize)
    }

    /// Ids of the currently selected (face-up, unresolved) cards.
    #[must_use]
    pub fn selection(&self) -> &[CardId] {
        &self.selection
    }

    /// Completed moves (each second flip counts one move).
    #[must_use]
    pub fn move_count(&self) -> u32 {
        self.move_count
    }

    /// Pairs matched so far.
    #[must_use]
    pub fn matched_pairs(&self) -> u8 {
        self.matched_pairs
    }

    /// Seconds elapsed while the round has been running.
    #[must_use]
    pub fn elapsed_seconds(&self) -> u32 {
        self.elapsed_seconds
    }

    /// Is the round running (ticker live, input accepted)?
    #[must_use]
    pub fn is_running(&self) -> bool {
        matches!(
            self.status,
            RoundStatus::Active | RoundStatus::AwaitingResolution
        )
    }

    // === Transitions ===

    /// Start a fresh round: new deck, zeroed counters, `Active` status.
    ///
    /// Valid from any state; an in-progress round is discarded.
    pub fn start(&mut self, rng: &mut GameRng) {
        self.cards = deck::deal(rng);
        self.selection.clear();
        self.move_count = 0;
        self.matched_pairs = 0;
        self.elapsed_seconds = 0;
        self.status = RoundStatus::Active;
        log::debug!("round started: {} cards dealt", self.cards.len());
    }

    /// Select a card, flipping it face-up.
    ///
    /// Only valid in `Active` with fewer than two cards selected, and only
    /// for a face-down, unmatched card. Everything else is silently ignored.
    pub fn select_card(&mut self, id: CardId) -> SelectOutcome {
        if self.status != RoundStatus::Active || self.selection.len() >= 2 {
            return SelectOutcome::Ignored;
        }

        let Some(card) = self.cards.get_mut(id.raw() as usize) else {
            return SelectOutcome::Ignored;
        };
        if !card.selectable() {
            return SelectOutcome::Ignored;
        }

        card.face_up = true;
        self.selection.push(id);

        if self.selection.len() == 2 {
            self.move_count += 1;
            self.status = RoundStatus::AwaitingResolution;
            log::debug!("pair pending: {:?}, move {}", self.selection, self.move_count);
            SelectOutcome::PairPending
        } else {
            SelectOutcome::Flipped
        }
    }

    /// Resolve the pending pair against current card state.
    ///
    /// Runs after the UI-visible delay. The comparison reads the selected
    /// cards from the round as it is *now*, never from a snapshot captured
    /// when the pair was flipped.
    pub fn resolve_pair(&mut self) -> PairResolution {
        if self.status != RoundStatus::AwaitingResolution || self.selection.len() != 2 {
            return PairResolution::NotPending;
        }

        let first = self.selection[0];
        let second = self.selection[1];
        self.selection.clear();

        let first_symbol = self.cards[first.raw() as usize].symbol;
        let second_symbol = self.cards[second.raw() as usize].symbol;

        if first_symbol == second_symbol {
            self.cards[first.raw() as usize].matched = true;
            self.cards[second.raw() as usize].matched = true;
            self.matched_pairs += 1;

            if self.matched_pairs == PAIRS_TO_WIN {
                self.status = RoundStatus::Completed;
                log::debug!("round complete: {} moves, {}s", self.move_count, self.elapsed_seconds);
                return PairResolution::Matched {
                    round_complete: true,
                };
            }

            self.status = RoundStatus::Active;
            PairResolution::Matched {
                round_complete: false,
            }
        } else {
            self.cards[first.raw() as usize].face_up = false;
            self.cards[second.raw() as usize].face_up = false;
            self.status = RoundStatus::Active;
            PairResolution::Mismatch
        }
    }

    /// Advance the elapsed-time counter by one second.
    ///
    /// No-op unless the round is running.
    pub fn tick(&mut self) {
        if self.is_running() {
            self.elapsed_seconds += 1;
        }
    }

    /// Discard the round and return to `Idle`.
    ///
    /// Never emits a completion; valid from any state.
    pub fn reset(&mut self) {
        *self = Self::idle();
        log::debug!("round reset");
    }

    /// Close a running round out as a loss (move-cap rule).
    ///
    /// The embedding session calls this when its move limit is hit. The loss
    /// score is computed from the moves/time at this moment.
    pub fn close_as_loss(&mut self) -> RoundOutcome {
        debug_assert!(self.is_running(), "close_as_loss on a non-running round");
        self.selection.clear();
        self.status = RoundStatus::Completed;
        log::debug!("round closed as loss after {} moves", self.move_count);
        self.outcome(false)
    }

    /// Build the completion snapshot for this round.
    #[must_use]
    pub fn outcome(&self, won: bool) -> RoundOutcome {
        let score = round_score(self.move_count, self.elapsed_seconds);
        RoundOutcome {
            won,
            score,
            points_earned: points_earned(score, won),
            moves: self.move_count,
            elapsed_seconds: self.elapsed_seconds,
        }
    }
}
