//! Read-only views of the table for presentation layers.

use alloc::vec::Vec;

use crate::card::Card;
use crate::game::GameState;
use crate::hand::{DealerHand, Hand, HandStatus};

/// A view of one player hand.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HandSnapshot {
    /// Position of the hand in the round's hand sequence.
    pub index: usize,
    /// Cards in dealing order.
    pub cards: Vec<Card>,
    /// Blackjack total.
    pub value: u8,
    /// Whether an ace is counted as 11.
    pub soft: bool,
    /// Hand status.
    pub status: HandStatus,
    /// Amount wagered on the hand.
    pub bet: usize,
    /// Whether the hand was created by a split.
    pub from_split: bool,
}

impl HandSnapshot {
    pub(crate) fn of(index: usize, hand: &Hand) -> Self {
        Self {
            index,
            cards: hand.cards().to_vec(),
            value: hand.value(),
            soft: hand.is_soft(),
            status: hand.status(),
            bet: hand.bet(),
            from_split: hand.is_from_split(),
        }
    }
}

/// A view of the dealer's hand with the hole card masked until revealed.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DealerSnapshot {
    /// Cards in dealing order; `None` marks a face-down card.
    pub cards: Vec<Option<Card>>,
    /// Value of the face-up cards.
    pub visible_value: u8,
    /// Whether the hole card has been revealed.
    pub revealed: bool,
}

impl DealerSnapshot {
    pub(crate) fn of(hand: &DealerHand) -> Self {
        let revealed = hand.is_hole_revealed();
        let cards = hand
            .cards()
            .iter()
            .enumerate()
            .map(|(i, card)| (revealed || i == 0).then_some(*card))
            .collect();

        Self {
            cards,
            visible_value: hand.visible_value(),
            revealed,
        }
    }
}

/// A view of the whole table.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TableSnapshot {
    /// Player hands of the current (or just settled) round.
    pub player_hands: Vec<HandSnapshot>,
    /// The dealer's hand.
    pub dealer: DealerSnapshot,
    /// The session bankroll.
    pub bankroll: usize,
    /// Index of the hand awaiting an action, if any.
    pub active_hand_index: Option<usize>,
    /// Current phase.
    pub phase: GameState,
}

/// Actions the active hand may take right now.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActionSet {
    /// Hit is available.
    pub hit: bool,
    /// Stand is available.
    pub stand: bool,
    /// Double down is available.
    pub double: bool,
    /// Split is available.
    pub split: bool,
}
