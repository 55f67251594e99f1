//! A single-seat blackjack rules engine with optional `no_std` support.
//!
//! The crate provides a [`Game`] type that runs the full round flow: betting,
//! player actions (hit, stand, double down, split), dealer play and
//! settlement. Presentation layers drive it through a small command
//! interface, read [`TableSnapshot`]s, and may [`subscribe`](Game::subscribe)
//! to [`GameEvent`]s.
//!
//! # Example
//!
//! ```
//! use tablejack::{Game, GameOptions, GameState};
//!
//! let mut game = Game::new(GameOptions::default(), 100, 42).unwrap();
//! game.place_bet(10).unwrap();
//!
//! while let GameState::PlayerTurn(_) = game.state() {
//!     game.stand().unwrap();
//! }
//!
//! assert_eq!(game.state(), GameState::AwaitingBet);
//! assert!(game.last_result().is_some());
//! ```
#![cfg_attr(not(feature = "std"), no_std)]
#![cfg_attr(docsrs, feature(doc_cfg))]

#[cfg(all(not(feature = "std"), not(feature = "alloc")))]
compile_error!(
    "`std` is disabled but `alloc` feature is not enabled. Enable `alloc` or keep `std` enabled."
);

extern crate alloc;

pub mod card;
pub mod deck;
pub mod error;
pub mod event;
pub mod game;
pub mod hand;
pub mod options;
pub mod result;
pub mod snapshot;

// Re-export main types
pub use card::{Card, DECK_SIZE, Rank, Suit};
pub use deck::Deck;
pub use error::{ActionError, BetError, DeckExhausted, SessionError};
pub use event::{GameEvent, GameObserver, Seat};
pub use game::{Game, GameState, Round};
pub use hand::{DealerHand, Hand, HandStatus};
pub use options::{DoubleOption, GameOptions, RoundingMode};
pub use result::{HandOutcome, HandResult, RoundResult};
pub use snapshot::{ActionSet, DealerSnapshot, HandSnapshot, TableSnapshot};
