//! Game state types.

/// Phase of the turn engine.
///
/// A session cycles `AwaitingBet → PlayerTurn → DealerTurn → Settlement` and
/// back to `AwaitingBet`. The dealer and settlement phases run to completion
/// inside the player action that ends the last hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GameState {
    /// Waiting for the next bet.
    AwaitingBet,
    /// Waiting for an action on the player hand at this index.
    PlayerTurn(usize),
    /// Dealer plays out their hand.
    DealerTurn,
    /// Hands are compared and the bankroll credited.
    Settlement,
}

impl GameState {
    /// Returns whether a round is in progress.
    #[must_use]
    pub const fn in_round(self) -> bool {
        !matches!(self, Self::AwaitingBet)
    }
}
