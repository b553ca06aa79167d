//! Deck generation: paired symbols in a fresh uniform permutation.

use super::card::{Card, CardId, Symbol};
use super::rng::GameRng;

/// Number of distinct symbols in a round.
pub const SYMBOL_COUNT: u8 = 8;

/// Cards per round: two of each symbol.
pub const DECK_SIZE: usize = SYMBOL_COUNT as usize * 2;

/// Pairs needed to complete a round.
pub const PAIRS_TO_WIN: u8 = SYMBOL_COUNT;

/// Deal a fresh shuffled deck.
///
/// Each of the eight symbols appears exactly twice. The symbol sequence is
/// shuffled with a uniform permutation, then card ids are assigned by final
/// position, so `cards[i].id == CardId(i)` always holds.
#[must_use]
pub fn deal(rng: &mut GameRng) -> Vec<Card> {
    let mut symbols: Vec<Symbol> = (0..SYMBOL_COUNT)
        .flat_map(|s| [Symbol::new(s), Symbol::new(s)])
        .collect();
    rng.shuffle(&mut symbols);

    symbols
        .into_iter()
        .enumerate()
        .map(|(i, symbol)| Card::new(CardId::new(i as u8), symbol))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deck_size() {
        let mut rng = GameRng::new(42);
        let deck = deal(&mut rng);
        assert_eq!(deck.len(), DECK_SIZE);
    }

    #[test]
    fn test_each_symbol_twice() {
        let mut rng = GameRng::new(42);
        let deck = deal(&mut rng);

        for s in 0..SYMBOL_COUNT {
            let count = deck.iter().filter(|c| c.symbol == Symbol::new(s)).count();
            assert_eq!(count, 2, "symbol {s} should appear exactly twice");
        }
    }

    #[test]
    fn test_ids_match_positions() {
        let mut rng = GameRng::new(42);
        let deck = deal(&mut rng);

        for (i, card) in deck.iter().enumerate() {
            assert_eq!(card.id, CardId::new(i as u8));
        }
    }

    #[test]
    fn test_all_cards_face_down() {
        let mut rng = GameRng::new(42);
        let deck = deal(&mut rng);

        assert!(deck.iter().all(|c| !c.face_up && !c.matched));
    }

    #[test]
    fn test_fresh_permutation_per_deal() {
        // Consecutive deals from the same RNG stream differ (same-order twice
        // in a row would be a 1-in-16! coincidence).
        let mut rng = GameRng::new(42);
        let first: Vec<_> = deal(&mut rng).iter().map(|c| c.symbol).collect();
        let second: Vec<_> = deal(&mut rng).iter().map(|c| c.symbol).collect();

        assert_ne!(first, second);
    }

    #[test]
    fn test_deterministic_with_same_seed() {
        let mut rng1 = GameRng::new(7);
        let mut rng2 = GameRng::new(7);

        assert_eq!(deal(&mut rng1), deal(&mut rng2));
    }
}
