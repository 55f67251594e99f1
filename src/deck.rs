//! Shuffled decks of cards.

use alloc::vec::Vec;

use rand::Rng;
use rand::seq::SliceRandom;

use crate::card::{Card, DECK_SIZE, Rank, Suit};
use crate::error::DeckExhausted;

/// An ordered collection of cards dealt from the top.
///
/// A deck is built once per round and never reshuffled while the round is in
/// play. Every card is drawn at most once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deck {
    /// Remaining cards; the top of the deck is the end of the vector.
    cards: Vec<Card>,
}

impl Deck {
    /// Builds `num_decks` standard decks and shuffles them together.
    ///
    /// A deck count of zero is treated as one.
    pub fn new<R: Rng + ?Sized>(num_decks: u8, rng: &mut R) -> Self {
        let num_decks = num_decks.max(1);
        let mut cards = Vec::with_capacity(num_decks as usize * DECK_SIZE);

        for _ in 0..num_decks {
            for suit in Suit::ALL {
                for rank in Rank::ALL {
                    cards.push(Card::new(suit, rank));
                }
            }
        }

        cards.shuffle(rng);
        Self { cards }
    }

    /// Builds an unshuffled deck that deals `cards` in the given order.
    ///
    /// ```
    /// use tablejack::{Card, Deck, Rank, Suit};
    ///
    /// let mut deck = Deck::from_draw_order(&[
    ///     Card::new(Suit::Hearts, Rank::Ace),
    ///     Card::new(Suit::Clubs, Rank::Nine),
    /// ]);
    /// assert_eq!(deck.draw().unwrap().rank, Rank::Ace);
    /// assert_eq!(deck.draw().unwrap().rank, Rank::Nine);
    /// assert!(deck.draw().is_err());
    /// ```
    #[must_use]
    pub fn from_draw_order(cards: &[Card]) -> Self {
        let mut cards = cards.to_vec();
        cards.reverse();
        Self { cards }
    }

    /// Removes and returns the top card.
    ///
    /// # Errors
    ///
    /// Returns [`DeckExhausted`] if no cards remain.
    pub fn draw(&mut self) -> Result<Card, DeckExhausted> {
        self.cards.pop().ok_or(DeckExhausted)
    }

    /// Returns the number of cards remaining.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Returns whether the deck is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}
