use tracing::debug;

use crate::error::ActionError;
use crate::event::{GameEvent, Seat};
use crate::hand::{Hand, HandStatus};
use crate::snapshot::HandSnapshot;

use super::round::Round;
use super::{Game, GameState};

impl Game {
    /// Player action: Hit (draw a card into the active hand).
    ///
    /// A bust finishes the hand and play moves on.
    ///
    /// # Errors
    ///
    /// Returns an error if no hand is awaiting an action or the deck is
    /// empty.
    pub fn hit(&mut self) -> Result<HandSnapshot, ActionError> {
        let result = self.hit_inner();
        self.flush_events();
        result
    }

    /// Player action: Stand (keep the active hand).
    ///
    /// # Errors
    ///
    /// Returns an error if no hand is awaiting an action.
    pub fn stand(&mut self) -> Result<HandSnapshot, ActionError> {
        let result = self.stand_inner();
        self.flush_events();
        result
    }

    /// Player action: Double down (double the bet, take exactly one card,
    /// then stand).
    ///
    /// # Errors
    ///
    /// Returns an error if no hand is awaiting an action, the hand does not
    /// hold exactly two cards or is otherwise ineligible under the table
    /// rules, the bankroll cannot cover the bet, or the deck is empty.
    pub fn double_down(&mut self) -> Result<HandSnapshot, ActionError> {
        let result = self.double_down_inner();
        self.flush_events();
        result
    }

    /// Player action: Split a pair into two hands.
    ///
    /// The second card moves to a new hand appended to the hand sequence
    /// with a bet equal to the original, and each hand draws one card.
    /// Split hands may be split again up to [`GameOptions::split`] splits
    /// per round.
    ///
    /// [`GameOptions::split`]: crate::GameOptions::split
    ///
    /// # Errors
    ///
    /// Returns an error if no hand is awaiting an action, the hand is not a
    /// two-card pair by value, the split limit is reached, the bankroll
    /// cannot cover the extra bet, or the deck cannot supply two cards.
    pub fn split(&mut self) -> Result<HandSnapshot, ActionError> {
        let result = self.split_inner();
        self.flush_events();
        result
    }

    fn hit_inner(&mut self) -> Result<HandSnapshot, ActionError> {
        let index = self.active_hand_index()?;
        let round = self.round.as_mut().ok_or(ActionError::InvalidState)?;

        let card = round.deck.draw()?;
        let hand = round
            .hands
            .get_mut(index)
            .ok_or(ActionError::InvalidState)?;
        hand.add_card(card);
        debug!(hand_index = index, %card, value = hand.value(), "hit");

        let snapshot = HandSnapshot::of(index, hand);
        self.pending.push(GameEvent::CardDealt {
            seat: Seat::Player(index),
            card: Some(card),
        });

        if snapshot.status != HandStatus::Active {
            self.finish_hand(index, snapshot.status)?;
        }

        Ok(snapshot)
    }

    fn stand_inner(&mut self) -> Result<HandSnapshot, ActionError> {
        let index = self.active_hand_index()?;
        let round = self.round.as_mut().ok_or(ActionError::InvalidState)?;
        let hand = round
            .hands
            .get_mut(index)
            .ok_or(ActionError::InvalidState)?;

        hand.set_status(HandStatus::Stand);
        debug!(hand_index = index, value = hand.value(), "stand");

        let snapshot = HandSnapshot::of(index, hand);
        self.finish_hand(index, HandStatus::Stand)?;
        Ok(snapshot)
    }

    fn double_down_inner(&mut self) -> Result<HandSnapshot, ActionError> {
        let index = self.active_hand_index()?;
        let bet = self.check_double(index)?;

        let round = self.round.as_mut().ok_or(ActionError::InvalidState)?;
        let card = round.deck.draw()?;
        let hand = round
            .hands
            .get_mut(index)
            .ok_or(ActionError::InvalidState)?;

        self.bankroll -= bet;
        hand.double_bet();
        hand.add_card(card);

        // Forced stand unless the card busted the hand.
        if hand.status() == HandStatus::Active {
            hand.set_status(HandStatus::Stand);
        }
        debug!(hand_index = index, %card, bet = hand.bet(), value = hand.value(), "double down");

        let snapshot = HandSnapshot::of(index, hand);
        self.pending.push(GameEvent::CardDealt {
            seat: Seat::Player(index),
            card: Some(card),
        });
        self.finish_hand(index, snapshot.status)?;
        Ok(snapshot)
    }

    fn split_inner(&mut self) -> Result<HandSnapshot, ActionError> {
        let index = self.active_hand_index()?;
        let bet = self.check_split(index)?;
        let one_card_aces = self.options.split_aces_receive_one_card;

        let round = self.round.as_mut().ok_or(ActionError::InvalidState)?;
        let hand = round
            .hands
            .get_mut(index)
            .ok_or(ActionError::InvalidState)?;
        let split_card = hand.take_split_card().ok_or(ActionError::CannotSplit)?;
        let is_ace = split_card.rank.is_ace();

        // Two cards are guaranteed by check_split.
        let first = round.deck.draw()?;
        let second = round.deck.draw()?;

        let hand = &mut round.hands[index];
        hand.add_card(first);

        let mut new_hand = Hand::from_split(split_card, bet);
        new_hand.add_card(second);

        if is_ace && one_card_aces {
            hand.set_status(HandStatus::Stand);
            new_hand.set_status(HandStatus::Stand);
        }

        let status = hand.status();
        let new_status = new_hand.status();
        let snapshot = HandSnapshot::of(index, hand);
        let new_index = round.hands.len();
        round.hands.push(new_hand);
        round.splits += 1;
        self.bankroll -= bet;

        debug!(
            hand_index = index,
            new_index,
            splits = round.splits,
            bankroll = self.bankroll,
            "split"
        );
        self.pending.push(GameEvent::CardDealt {
            seat: Seat::Player(index),
            card: Some(first),
        });
        self.pending.push(GameEvent::CardDealt {
            seat: Seat::Player(new_index),
            card: Some(second),
        });

        if status != HandStatus::Active {
            self.pending.push(GameEvent::HandFinished {
                hand_index: index,
                status,
            });
            if new_status != HandStatus::Active {
                self.pending.push(GameEvent::HandFinished {
                    hand_index: new_index,
                    status: new_status,
                });
            }
            self.advance_turn()?;
        }

        Ok(snapshot)
    }

    /// Returns the index of the hand awaiting an action.
    fn active_hand_index(&self) -> Result<usize, ActionError> {
        match self.state {
            GameState::PlayerTurn(index) => Ok(index),
            _ => Err(ActionError::InvalidState),
        }
    }

    /// Checks whether the hand may double down and returns the extra stake.
    pub(super) fn check_double(&self, index: usize) -> Result<usize, ActionError> {
        let round = self.round.as_ref().ok_or(ActionError::InvalidState)?;
        let hand = round.hands.get(index).ok_or(ActionError::InvalidState)?;

        if hand.status() != HandStatus::Active || hand.len() != 2 {
            return Err(ActionError::CannotDouble);
        }

        if hand.is_from_split() && !self.options.double_after_split {
            return Err(ActionError::CannotDouble);
        }

        if !self.options.double.allows(hand.value()) {
            return Err(ActionError::CannotDouble);
        }

        if self.bankroll < hand.bet() {
            return Err(ActionError::InsufficientFunds);
        }

        if round.deck.is_empty() {
            return Err(ActionError::DeckExhausted);
        }

        Ok(hand.bet())
    }

    /// Checks whether the hand may split and returns the new hand's stake.
    pub(super) fn check_split(&self, index: usize) -> Result<usize, ActionError> {
        let round = self.round.as_ref().ok_or(ActionError::InvalidState)?;
        let hand = round.hands.get(index).ok_or(ActionError::InvalidState)?;

        if hand.status() != HandStatus::Active || !hand.is_pair() {
            return Err(ActionError::CannotSplit);
        }

        if round.splits >= self.options.split {
            return Err(ActionError::MaxSplitsReached);
        }

        if self.bankroll < hand.bet() {
            return Err(ActionError::InsufficientFunds);
        }

        if round.deck.len() < 2 {
            return Err(ActionError::DeckExhausted);
        }

        Ok(hand.bet())
    }

    /// Records a finished hand and moves play to the next hand or the dealer.
    fn finish_hand(&mut self, index: usize, status: HandStatus) -> Result<(), ActionError> {
        self.pending.push(GameEvent::HandFinished {
            hand_index: index,
            status,
        });
        self.advance_turn()
    }

    /// Moves play to the next active hand, or to the dealer once none remain.
    fn advance_turn(&mut self) -> Result<(), ActionError> {
        let next = self.round.as_mut().and_then(Round::advance);
        match next {
            Some(next) => {
                self.set_state(GameState::PlayerTurn(next));
                Ok(())
            }
            None => self.finish_round().map_err(ActionError::from),
        }
    }
}
