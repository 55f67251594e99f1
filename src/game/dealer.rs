use alloc::vec::Vec;

use tracing::{debug, info, warn};

use crate::error::DeckExhausted;
use crate::event::{GameEvent, Seat};
use crate::hand::{Hand, HandStatus};
use crate::options::RoundingMode;
use crate::result::{HandOutcome, HandResult, RoundResult};

use super::{Game, GameState};

#[cfg(feature = "std")]
fn round_amount(amount: f64, mode: RoundingMode) -> usize {
    match mode {
        RoundingMode::Up => amount.ceil() as usize,
        RoundingMode::Down => amount.floor() as usize,
        RoundingMode::Nearest => amount.round() as usize,
    }
}

#[cfg(all(not(feature = "std"), feature = "alloc"))]
fn round_amount(amount: f64, mode: RoundingMode) -> usize {
    match mode {
        RoundingMode::Up => libm::ceil(amount) as usize,
        RoundingMode::Down => libm::floor(amount) as usize,
        RoundingMode::Nearest => libm::round(amount) as usize,
    }
}

/// Signed difference between payout and stake, clamped to `isize`.
fn net_change(payout: usize, stake: usize) -> isize {
    if payout >= stake {
        isize::try_from(payout - stake).unwrap_or(isize::MAX)
    } else {
        isize::try_from(stake - payout).map_or(isize::MIN, |loss| -loss)
    }
}

impl Game {
    /// Plays the dealer's hand and settles the round.
    ///
    /// Runs once every player hand is finished. If the deck runs out while
    /// the dealer is drawing, the round is voided instead.
    pub(super) fn finish_round(&mut self) -> Result<(), DeckExhausted> {
        self.set_state(GameState::DealerTurn);

        if let Err(err) = self.dealer_play() {
            self.void_round();
            return Err(err);
        }

        self.set_state(GameState::Settlement);
        self.settle();
        self.set_state(GameState::AwaitingBet);
        Ok(())
    }

    /// Reveals the hole card and draws until the dealer reaches 17 or more.
    ///
    /// The dealer draws nothing when every player hand has busted. Whether a
    /// soft 17 stands follows [`GameOptions::stand_on_soft_17`].
    ///
    /// [`GameOptions::stand_on_soft_17`]: crate::GameOptions::stand_on_soft_17
    fn dealer_play(&mut self) -> Result<(), DeckExhausted> {
        let stand_on_soft_17 = self.options.stand_on_soft_17;
        let Some(round) = self.round.as_mut() else {
            return Ok(());
        };

        round.dealer.reveal_hole();
        if let Some(&hole) = round.dealer.cards().get(1) {
            self.pending.push(GameEvent::HoleRevealed { card: hole });
        }

        if !round.any_live_hands() {
            debug!(value = round.dealer.value(), "all hands bust, dealer stands");
            return Ok(());
        }

        while round.dealer.must_draw(stand_on_soft_17) {
            let card = round.deck.draw()?;
            round.dealer.add_card(card);
            debug!(%card, value = round.dealer.value(), "dealer draws");
            self.pending.push(GameEvent::CardDealt {
                seat: Seat::Dealer,
                card: Some(card),
            });
        }

        debug!(
            value = round.dealer.value(),
            soft = round.dealer.is_soft(),
            "dealer stands"
        );
        Ok(())
    }

    /// Rounds a payout according to the rounding mode.
    fn round_payout(&self, amount: f64, mode: RoundingMode) -> usize {
        round_amount(amount, mode)
    }

    /// Compares one hand to the dealer and returns its outcome and payout.
    fn hand_outcome(
        &self,
        hand: &Hand,
        dealer_value: u8,
        dealer_bust: bool,
        dealer_blackjack: bool,
    ) -> (HandOutcome, usize) {
        let bet = hand.bet();
        let player_value = hand.value();

        match hand.status() {
            HandStatus::Bust => (HandOutcome::Lose, 0),
            HandStatus::Blackjack => {
                if dealer_blackjack {
                    (HandOutcome::Push, bet)
                } else {
                    #[expect(
                        clippy::cast_precision_loss,
                        reason = "f64 has sufficient precision for monetary values"
                    )]
                    let winnings = (bet as f64) * self.options.blackjack_pays;
                    let rounded = self.round_payout(winnings, self.options.rounding_blackjack);
                    (HandOutcome::Blackjack, bet.saturating_add(rounded))
                }
            }
            HandStatus::Stand | HandStatus::Active => {
                if dealer_bust || player_value > dealer_value {
                    (HandOutcome::Win, bet.saturating_mul(2))
                } else if player_value < dealer_value {
                    (HandOutcome::Lose, 0)
                } else {
                    (HandOutcome::Push, bet)
                }
            }
        }
    }

    /// Settles every hand against the dealer and credits the bankroll.
    fn settle(&mut self) {
        let Some(round) = self.round.as_ref() else {
            return;
        };

        let dealer_value = round.dealer.value();
        let dealer_bust = round.dealer.is_bust();
        let dealer_blackjack = round.dealer.is_blackjack();

        let hands: Vec<HandResult> = round
            .hands
            .iter()
            .enumerate()
            .map(|(hand_index, hand)| {
                let (outcome, payout) =
                    self.hand_outcome(hand, dealer_value, dealer_bust, dealer_blackjack);
                HandResult {
                    hand_index,
                    outcome,
                    bet: hand.bet(),
                    payout,
                    player_value: hand.value(),
                    dealer_value,
                }
            })
            .collect();

        let total_bet = round.total_bet();
        let total_payout = hands
            .iter()
            .fold(0_usize, |total, result| total.saturating_add(result.payout));
        let net = net_change(total_payout, total_bet);

        self.bankroll = self.bankroll.saturating_add(total_payout);
        self.rounds_played += 1;
        info!(
            dealer_value,
            dealer_bust,
            total_payout,
            net,
            bankroll = self.bankroll,
            "round settled"
        );

        let result = RoundResult {
            hands,
            total_payout,
            net,
            dealer_value,
            dealer_bust,
            dealer_blackjack,
        };
        self.pending.push(GameEvent::RoundSettled(result.clone()));
        self.last_result = Some(result);
    }

    /// Refunds every bet of the current round and returns to betting.
    fn void_round(&mut self) {
        let refunded = self.round.as_ref().map_or(0, super::Round::total_bet);
        self.bankroll = self.bankroll.saturating_add(refunded);
        self.last_result = None;
        warn!(refunded, bankroll = self.bankroll, "deck exhausted, round voided");
        self.pending.push(GameEvent::RoundVoided { refunded });
        self.set_state(GameState::AwaitingBet);
    }
}
