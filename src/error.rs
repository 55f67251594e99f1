//! Error types for game operations.

use thiserror::Error;

/// The deck ran out of cards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("deck exhausted")]
pub struct DeckExhausted;

/// Errors that can occur when placing a bet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BetError {
    /// A round is already in progress.
    #[error("invalid game state for betting")]
    InvalidState,
    /// Bet amount is zero or exceeds the bankroll.
    #[error("insufficient funds")]
    InsufficientFunds,
    /// Not enough cards to deal the opening hands.
    #[error("not enough cards to deal")]
    DeckExhausted,
}

impl From<DeckExhausted> for BetError {
    fn from(_: DeckExhausted) -> Self {
        Self::DeckExhausted
    }
}

/// Errors that can occur during player actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ActionError {
    /// No player hand is awaiting an action.
    #[error("invalid game state for this action")]
    InvalidState,
    /// Cannot double down on this hand.
    #[error("cannot double down on this hand")]
    CannotDouble,
    /// Cannot split this hand.
    #[error("cannot split this hand")]
    CannotSplit,
    /// Maximum splits reached.
    #[error("maximum splits reached")]
    MaxSplitsReached,
    /// Insufficient funds for this action.
    #[error("insufficient funds for this action")]
    InsufficientFunds,
    /// No cards left in the deck.
    #[error("no cards left in the deck")]
    DeckExhausted,
}

impl ActionError {
    /// Returns whether the action was rejected because it is not legal in the
    /// current phase or for the current hand shape.
    ///
    /// Funding and deck failures are reported separately.
    #[must_use]
    pub const fn is_not_allowed(self) -> bool {
        matches!(
            self,
            Self::InvalidState | Self::CannotDouble | Self::CannotSplit | Self::MaxSplitsReached
        )
    }
}

impl From<DeckExhausted> for ActionError {
    fn from(_: DeckExhausted) -> Self {
        Self::DeckExhausted
    }
}

/// Errors that can occur when funding the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SessionError {
    /// Buy-in or rebuy amount is zero.
    #[error("buy-in amount is zero")]
    ZeroBuyIn,
    /// A round is in progress.
    #[error("invalid game state for rebuy")]
    InvalidState,
    /// Rebuys are only accepted once the bankroll is empty.
    #[error("bankroll is not empty")]
    BankrollNotEmpty,
}
