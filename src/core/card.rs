//! Card identity and per-card round state.
//!
//! Every card in a round has a unique `CardId` (its position in the shuffled
//! deck) and a `Symbol` shared with exactly one other card. The two boolean
//! flags are the only mutable state and are driven solely by the round state
//! machine's flip/match/unflip transitions.

use serde::{Deserialize, Serialize};

/// Unique identifier for a card within a round.
///
/// Assigned as the 0-based sequence index after shuffling, so ids are dense
/// in `0..DECK_SIZE` and discarded together with the round.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CardId(pub u8);

impl CardId {
    /// Create a card ID from a raw index.
    #[must_use]
    pub const fn new(index: u8) -> Self {
        Self(index)
    }

    /// Get the raw index value.
    #[must_use]
    pub const fn raw(self) -> u8 {
        self.0
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Card({})", self.0)
    }
}

/// One of the eight symbols printed on the card faces.
///
/// Opaque to the engine; the UI decides how a symbol index is rendered.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Symbol(pub u8);

impl Symbol {
    /// Create a symbol from a raw index.
    #[must_use]
    pub const fn new(index: u8) -> Self {
        Self(index)
    }

    /// Get the raw symbol index.
    #[must_use]
    pub const fn raw(self) -> u8 {
        self.0
    }
}

/// A card in a round.
///
/// Created in bulk by the deck generator, mutated only through the round
/// state machine, discarded when the round resets.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    /// Position in the shuffled deck.
    pub id: CardId,

    /// Face symbol; exactly two cards per round share each symbol.
    pub symbol: Symbol,

    /// Is this card currently face-up?
    pub face_up: bool,

    /// Has this card been matched with its pair?
    ///
    /// A matched card is never eligible for re-selection.
    pub matched: bool,
}

impl Card {
    /// Create a face-down, unmatched card.
    #[must_use]
    pub const fn new(id: CardId, symbol: Symbol) -> Self {
        Self {
            id,
            symbol,
            face_up: false,
            matched: false,
        }
    }

    /// Check if this card can be selected: face-down and not yet matched.
    #[must_use]
    pub const fn selectable(&self) -> bool {
        !self.face_up && !self.matched
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_card_new() {
        let card = Card::new(CardId::new(3), Symbol::new(1));

        assert_eq!(card.id, CardId(3));
        assert_eq!(card.symbol, Symbol(1));
        assert!(!card.face_up);
        assert!(!card.matched);
    }

    #[test]
    fn test_selectable() {
        let mut card = Card::new(CardId::new(0), Symbol::new(0));
        assert!(card.selectable());

        card.face_up = true;
        assert!(!card.selectable());

        card.face_up = false;
        card.matched = true;
        assert!(!card.selectable());
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", CardId(7)), "Card(7)");
    }

    #[test]
    fn test_serialization() {
        let card = Card::new(CardId::new(5), Symbol::new(2));
        let json = serde_json::to_string(&card).unwrap();
        let deserialized: Card = serde_json::from_str(&json).unwrap();
        assert_eq!(card, deserialized);
    }
}
