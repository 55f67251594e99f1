//! Notifications for presentation layers.

use crate::card::Card;
use crate::hand::HandStatus;
use crate::result::RoundResult;

/// Who received a dealt card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Seat {
    /// A player hand, by index.
    Player(usize),
    /// The dealer.
    Dealer,
}

/// A change to the table, emitted after the engine has applied it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameEvent {
    /// A bet was accepted and deducted from the bankroll.
    BetPlaced {
        /// The bet amount.
        amount: usize,
        /// Bankroll after the deduction.
        bankroll: usize,
    },
    /// A card was dealt. The dealer's hole card is reported as `None`.
    CardDealt {
        /// Recipient of the card.
        seat: Seat,
        /// The card, unless dealt face down.
        card: Option<Card>,
    },
    /// A player hand stopped taking actions.
    HandFinished {
        /// Index of the hand.
        hand_index: usize,
        /// Final status.
        status: HandStatus,
    },
    /// The dealer turned over the hole card.
    HoleRevealed {
        /// The hole card.
        card: Card,
    },
    /// The round was settled and the bankroll credited.
    RoundSettled(RoundResult),
    /// The deck ran out during dealer play; all bets were refunded.
    RoundVoided {
        /// Total amount refunded.
        refunded: usize,
    },
}

/// Receives [`GameEvent`]s from a [`Game`](crate::Game).
///
/// Any `FnMut(&GameEvent)` closure is an observer.
pub trait GameObserver {
    /// Called once per event, in order.
    fn on_event(&mut self, event: &GameEvent);
}

impl<F> GameObserver for F
where
    F: FnMut(&GameEvent),
{
    fn on_event(&mut self, event: &GameEvent) {
        self(event);
    }
}
