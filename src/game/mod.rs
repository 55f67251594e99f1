//! Game engine and session state.

use alloc::boxed::Box;
use alloc::vec::Vec;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::debug;

use crate::deck::Deck;
use crate::error::SessionError;
use crate::event::{GameEvent, GameObserver};
use crate::hand::DealerHand;
use crate::options::GameOptions;
use crate::result::RoundResult;
use crate::snapshot::{ActionSet, DealerSnapshot, HandSnapshot, TableSnapshot};

mod actions;
mod bet;
mod dealer;
mod round;
pub mod state;

pub use round::Round;
pub use state::GameState;

/// A single-seat blackjack session.
///
/// The game owns the bankroll, which persists across rounds, and the current
/// [`Round`]. Use [`GameOptions`] to configure table rules such as decks,
/// doubling rules and the blackjack payout.
pub struct Game {
    /// Table rules.
    options: GameOptions,
    /// Current phase.
    state: GameState,
    /// Session bankroll.
    bankroll: usize,
    /// The round in play, or the last settled round.
    round: Option<Round>,
    /// Result of the last settled round.
    last_result: Option<RoundResult>,
    /// Stacked deck to use instead of a fresh shuffle for the next round.
    next_deck: Option<Deck>,
    /// Number of rounds settled this session.
    rounds_played: u64,
    /// Registered observers.
    observers: Vec<Box<dyn GameObserver>>,
    /// Events produced by the current command, delivered when it returns.
    pending: Vec<GameEvent>,
    /// Random number generator.
    rng: ChaCha8Rng,
}

impl Game {
    /// Starts a session with the given buy-in and shuffle seed.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::ZeroBuyIn`] if `buy_in` is zero.
    ///
    /// # Example
    ///
    /// ```
    /// use tablejack::{Game, GameOptions, GameState};
    ///
    /// let game = Game::new(GameOptions::default(), 100, 42).unwrap();
    /// assert_eq!(game.bankroll(), 100);
    /// assert_eq!(game.state(), GameState::AwaitingBet);
    /// ```
    pub fn new(options: GameOptions, buy_in: usize, seed: u64) -> Result<Self, SessionError> {
        if buy_in == 0 {
            return Err(SessionError::ZeroBuyIn);
        }

        debug!(buy_in, seed, "session started");

        Ok(Self {
            options,
            state: GameState::AwaitingBet,
            bankroll: buy_in,
            round: None,
            last_result: None,
            next_deck: None,
            rounds_played: 0,
            observers: Vec::new(),
            pending: Vec::new(),
            rng: ChaCha8Rng::seed_from_u64(seed),
        })
    }

    /// Adds funds once the bankroll has run out.
    ///
    /// # Errors
    ///
    /// Returns an error if a round is in progress, the bankroll is not empty,
    /// or the amount is zero.
    pub fn rebuy(&mut self, amount: usize) -> Result<(), SessionError> {
        if self.state != GameState::AwaitingBet {
            return Err(SessionError::InvalidState);
        }
        if self.bankroll != 0 {
            return Err(SessionError::BankrollNotEmpty);
        }
        if amount == 0 {
            return Err(SessionError::ZeroBuyIn);
        }

        self.bankroll = amount;
        debug!(amount, "rebuy");
        Ok(())
    }

    /// Queues a stacked deck to be dealt in the next round instead of a
    /// fresh shuffle.
    pub fn prepare_deck(&mut self, deck: Deck) {
        self.next_deck = Some(deck);
    }

    /// Registers an observer that is notified of every [`GameEvent`].
    pub fn subscribe<O>(&mut self, observer: O)
    where
        O: GameObserver + 'static,
    {
        self.observers.push(Box::new(observer));
    }

    /// Returns the table options.
    #[must_use]
    pub const fn options(&self) -> &GameOptions {
        &self.options
    }

    /// Returns the current game state.
    #[must_use]
    pub const fn state(&self) -> GameState {
        self.state
    }

    /// Returns the session bankroll.
    #[must_use]
    pub const fn bankroll(&self) -> usize {
        self.bankroll
    }

    /// Returns the current round, or the last settled one.
    #[must_use]
    pub const fn round(&self) -> Option<&Round> {
        self.round.as_ref()
    }

    /// Returns the result of the last settled round.
    ///
    /// Cleared when a new bet is placed.
    #[must_use]
    pub const fn last_result(&self) -> Option<&RoundResult> {
        self.last_result.as_ref()
    }

    /// Returns the number of rounds settled this session.
    #[must_use]
    pub const fn rounds_played(&self) -> u64 {
        self.rounds_played
    }

    /// Returns a view of the table with the dealer's hole card masked until
    /// it is revealed.
    #[must_use]
    pub fn current_state(&self) -> TableSnapshot {
        let (player_hands, dealer) = self.round.as_ref().map_or_else(
            || (Vec::new(), DealerSnapshot::of(&DealerHand::new())),
            |round| {
                let hands = round
                    .hands
                    .iter()
                    .enumerate()
                    .map(|(i, hand)| HandSnapshot::of(i, hand))
                    .collect();
                (hands, DealerSnapshot::of(&round.dealer))
            },
        );

        let active_hand_index = match self.state {
            GameState::PlayerTurn(index) => Some(index),
            _ => None,
        };

        TableSnapshot {
            player_hands,
            dealer,
            bankroll: self.bankroll,
            active_hand_index,
            phase: self.state,
        }
    }

    /// Returns which actions the active hand may take.
    ///
    /// Every flag is `false` outside a player turn.
    #[must_use]
    pub fn available_actions(&self) -> ActionSet {
        let GameState::PlayerTurn(index) = self.state else {
            return ActionSet::default();
        };

        let has_cards = self.round.as_ref().is_some_and(|round| !round.deck.is_empty());

        ActionSet {
            hit: has_cards,
            stand: true,
            double: self.check_double(index).is_ok(),
            split: self.check_split(index).is_ok(),
        }
    }

    /// Delivers queued events to observers.
    fn flush_events(&mut self) {
        for event in self.pending.drain(..) {
            for observer in &mut self.observers {
                observer.on_event(&event);
            }
        }
    }

    fn set_state(&mut self, state: GameState) {
        debug!(from = ?self.state, to = ?state, "phase change");
        self.state = state;
    }
}
