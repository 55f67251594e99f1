//! Per-round table state.

use alloc::vec::Vec;

use crate::card::Card;
use crate::deck::Deck;
use crate::error::DeckExhausted;
use crate::hand::{DealerHand, Hand, HandStatus};

/// The cards and wagers of one round.
///
/// A round owns its deck and every hand on the table. It is created when a
/// bet is accepted and stays readable after settlement until the next bet
/// replaces it.
#[derive(Debug, Clone)]
pub struct Round {
    pub(super) deck: Deck,
    pub(super) dealer: DealerHand,
    pub(super) hands: Vec<Hand>,
    /// Index of the hand awaiting an action; `hands.len()` once all are done.
    pub(super) active: usize,
    pub(super) splits: u8,
}

/// Cards dealt at the start of a round, in dealing order.
pub(super) struct OpeningDeal {
    pub player: [Card; 2],
    pub dealer_up: Card,
}

impl Round {
    pub(super) fn new(deck: Deck, bet: usize) -> Self {
        Self {
            deck,
            dealer: DealerHand::new(),
            hands: alloc::vec![Hand::new(bet)],
            active: 0,
            splits: 0,
        }
    }

    /// Deals player, dealer up card, player, dealer hole card.
    pub(super) fn deal_opening(&mut self) -> Result<OpeningDeal, DeckExhausted> {
        if self.deck.len() < 4 {
            return Err(DeckExhausted);
        }

        let first = self.deck.draw()?;
        let dealer_up = self.deck.draw()?;
        let second = self.deck.draw()?;
        let hole = self.deck.draw()?;

        let hand = &mut self.hands[0];
        hand.add_card(first);
        hand.add_card(second);
        self.dealer.add_card(dealer_up);
        self.dealer.add_card(hole);

        Ok(OpeningDeal {
            player: [first, second],
            dealer_up,
        })
    }

    /// Moves to the next hand still awaiting an action.
    ///
    /// Returns its index, or `None` when every hand is finished.
    pub(super) fn advance(&mut self) -> Option<usize> {
        let next = (self.active + 1..self.hands.len())
            .find(|&i| self.hands[i].status() == HandStatus::Active);
        self.active = next.unwrap_or(self.hands.len());
        next
    }

    /// Returns whether any hand is still live against the dealer.
    pub(super) fn any_live_hands(&self) -> bool {
        self.hands.iter().any(|hand| !hand.is_bust())
    }

    /// Returns the player hands in play order.
    #[must_use]
    pub fn hands(&self) -> &[Hand] {
        &self.hands
    }

    /// Returns the dealer's hand.
    #[must_use]
    pub const fn dealer(&self) -> &DealerHand {
        &self.dealer
    }

    /// Returns the index of the hand awaiting an action, if any.
    #[must_use]
    pub fn active_index(&self) -> Option<usize> {
        (self.active < self.hands.len()).then_some(self.active)
    }

    /// Returns the number of splits performed this round.
    #[must_use]
    pub const fn splits(&self) -> u8 {
        self.splits
    }

    /// Returns the total amount wagered across all hands.
    #[must_use]
    pub fn total_bet(&self) -> usize {
        self.hands.iter().map(Hand::bet).sum()
    }

    /// Returns the number of cards left in the deck.
    #[must_use]
    pub fn cards_remaining(&self) -> usize {
        self.deck.len()
    }
}
