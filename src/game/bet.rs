use tracing::debug;

use crate::deck::Deck;
use crate::error::BetError;
use crate::event::{GameEvent, Seat};
use crate::hand::HandStatus;

use super::round::Round;
use super::{Game, GameState};

impl Game {
    /// Places a bet and deals the opening hands.
    ///
    /// The bet is deducted from the bankroll, a freshly shuffled deck is
    /// built (or the deck queued with [`Game::prepare_deck`] is used), and
    /// two cards each go to the player and the dealer. A player natural
    /// skips straight to dealer play and settlement.
    ///
    /// # Errors
    ///
    /// Returns an error if a round is in progress, the amount is zero or
    /// exceeds the bankroll, or the deck cannot cover the opening deal. If
    /// the deck runs out while the dealer plays a natural's round, the round
    /// is voided and the bet refunded.
    pub fn place_bet(&mut self, amount: usize) -> Result<(), BetError> {
        let result = self.place_bet_inner(amount);
        self.flush_events();
        result
    }

    fn place_bet_inner(&mut self, amount: usize) -> Result<(), BetError> {
        if self.state != GameState::AwaitingBet {
            return Err(BetError::InvalidState);
        }

        if amount == 0 || amount > self.bankroll {
            return Err(BetError::InsufficientFunds);
        }

        let deck = self
            .next_deck
            .take()
            .unwrap_or_else(|| Deck::new(self.options.decks, &mut self.rng));

        let mut round = Round::new(deck, amount);
        let opening = round.deal_opening()?;

        self.bankroll -= amount;
        self.last_result = None;
        debug!(amount, bankroll = self.bankroll, "bet placed");
        self.pending.push(GameEvent::BetPlaced {
            amount,
            bankroll: self.bankroll,
        });

        let [first, second] = opening.player;
        for (seat, card) in [
            (Seat::Player(0), Some(first)),
            (Seat::Dealer, Some(opening.dealer_up)),
            (Seat::Player(0), Some(second)),
            (Seat::Dealer, None),
        ] {
            self.pending.push(GameEvent::CardDealt { seat, card });
        }

        let natural = round.hands[0].status() == HandStatus::Blackjack;
        self.round = Some(round);
        self.set_state(GameState::PlayerTurn(0));

        if natural {
            debug!("player natural");
            self.pending.push(GameEvent::HandFinished {
                hand_index: 0,
                status: HandStatus::Blackjack,
            });
            self.finish_round()?;
        }

        Ok(())
    }
}
