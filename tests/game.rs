//! Game integration tests.

use std::cell::RefCell;
use std::rc::Rc;

use tablejack::{
    ActionError, BetError, Card, Deck, Game, GameEvent, GameOptions, GameState, HandOutcome,
    HandStatus, Rank, RoundingMode, Seat, SessionError, Suit,
};

const fn card(suit: Suit, rank: Rank) -> Card {
    Card::new(suit, rank)
}

/// Starts a session whose next round deals `draws` in order:
/// player, dealer up, player, dealer hole, then any further draws.
fn stacked_game(options: GameOptions, bankroll: usize, draws: &[Card]) -> Game {
    let mut game = Game::new(options, bankroll, 7).unwrap();
    game.prepare_deck(Deck::from_draw_order(draws));
    game
}

fn hand_bets(game: &Game) -> Vec<usize> {
    game.round()
        .unwrap()
        .hands()
        .iter()
        .map(tablejack::Hand::bet)
        .collect()
}

#[test]
fn dealer_twenty_beats_player_seventeen() {
    let mut game = stacked_game(
        GameOptions::default(),
        100,
        &[
            card(Suit::Hearts, Rank::Ten), // player
            card(Suit::Clubs, Rank::Six), // dealer up
            card(Suit::Spades, Rank::Seven), // player
            card(Suit::Diamonds, Rank::Five), // dealer hole
            card(Suit::Hearts, Rank::Nine), // dealer draw
        ],
    );

    game.place_bet(10).unwrap();
    assert_eq!(game.bankroll(), 90);
    assert_eq!(game.state(), GameState::PlayerTurn(0));

    let hand = game.stand().unwrap();
    assert_eq!(hand.value, 17);
    assert_eq!(hand.status, HandStatus::Stand);

    assert_eq!(game.state(), GameState::AwaitingBet);
    let result = game.last_result().unwrap();
    assert_eq!(result.dealer_value, 20);
    assert_eq!(result.hands[0].outcome, HandOutcome::Lose);
    assert_eq!(result.net, -10);
    assert_eq!(game.bankroll(), 90);
}

#[test]
fn natural_pays_three_to_two() {
    let mut game = stacked_game(
        GameOptions::default(),
        100,
        &[
            card(Suit::Hearts, Rank::Ace), // player
            card(Suit::Clubs, Rank::Nine), // dealer up
            card(Suit::Spades, Rank::King), // player
            card(Suit::Diamonds, Rank::Seven), // dealer hole
            card(Suit::Hearts, Rank::Two), // dealer draw
        ],
    );

    game.place_bet(10).unwrap();

    // The natural skips the player turn entirely.
    assert_eq!(game.state(), GameState::AwaitingBet);
    let result = game.last_result().unwrap();
    assert_eq!(result.hands[0].outcome, HandOutcome::Blackjack);
    assert_eq!(result.hands[0].payout, 25);
    assert_eq!(result.dealer_value, 18);
    assert_eq!(game.bankroll(), 115);
}

#[test]
fn natural_beats_dealer_drawing_to_twenty_one() {
    let mut game = stacked_game(
        GameOptions::default(),
        100,
        &[
            card(Suit::Hearts, Rank::Ace), // player
            card(Suit::Clubs, Rank::Nine), // dealer up
            card(Suit::Spades, Rank::King), // player
            card(Suit::Diamonds, Rank::Seven), // dealer hole
            card(Suit::Hearts, Rank::Five), // dealer draw to 21
        ],
    );

    game.place_bet(10).unwrap();

    let result = game.last_result().unwrap();
    assert_eq!(result.dealer_value, 21);
    assert!(!result.dealer_blackjack);
    assert_eq!(result.hands[0].outcome, HandOutcome::Blackjack);
    assert_eq!(result.hands[0].payout, 25);
    assert_eq!(game.bankroll(), 115);
}

#[test]
fn natural_against_dealer_natural_pushes() {
    let mut game = stacked_game(
        GameOptions::default(),
        100,
        &[
            card(Suit::Hearts, Rank::Ace),
            card(Suit::Clubs, Rank::Ace),
            card(Suit::Spades, Rank::King),
            card(Suit::Diamonds, Rank::Queen),
        ],
    );

    game.place_bet(10).unwrap();

    let result = game.last_result().unwrap();
    assert!(result.dealer_blackjack);
    assert_eq!(result.hands[0].outcome, HandOutcome::Push);
    assert_eq!(game.bankroll(), 100);
}

#[test]
fn dealer_natural_pushes_with_multi_card_twenty_one() {
    let mut game = stacked_game(
        GameOptions::default(),
        100,
        &[
            card(Suit::Hearts, Rank::Five),
            card(Suit::Clubs, Rank::Ace),
            card(Suit::Spades, Rank::Six),
            card(Suit::Diamonds, Rank::King),
            card(Suit::Hearts, Rank::Ten), // player hit
        ],
    );

    game.place_bet(10).unwrap();
    let hand = game.hit().unwrap();
    assert_eq!(hand.value, 21);
    assert_eq!(hand.status, HandStatus::Active);

    game.stand().unwrap();
    let result = game.last_result().unwrap();
    assert!(result.dealer_blackjack);
    assert_eq!(result.hands[0].outcome, HandOutcome::Push);
    assert_eq!(game.bankroll(), 100);
}

#[test]
fn dealer_natural_beats_player_twenty() {
    let mut game = stacked_game(
        GameOptions::default(),
        100,
        &[
            card(Suit::Hearts, Rank::Ten),
            card(Suit::Clubs, Rank::Ace),
            card(Suit::Spades, Rank::Queen),
            card(Suit::Diamonds, Rank::King),
        ],
    );

    game.place_bet(10).unwrap();
    game.stand().unwrap();

    assert_eq!(game.last_result().unwrap().hands[0].outcome, HandOutcome::Lose);
    assert_eq!(game.bankroll(), 90);
}

#[test]
fn push_returns_the_bet() {
    let mut game = stacked_game(
        GameOptions::default(),
        100,
        &[
            card(Suit::Hearts, Rank::Ten),
            card(Suit::Clubs, Rank::Ten),
            card(Suit::Spades, Rank::Eight),
            card(Suit::Diamonds, Rank::Eight),
        ],
    );

    game.place_bet(10).unwrap();
    game.stand().unwrap();

    let result = game.last_result().unwrap();
    assert_eq!(result.hands[0].outcome, HandOutcome::Push);
    assert_eq!(result.hands[0].payout, 10);
    assert_eq!(result.net, 0);
    assert_eq!(game.bankroll(), 100);
}

#[test]
fn dealer_stops_at_first_total_of_seventeen() {
    let mut game = stacked_game(
        GameOptions::default(),
        100,
        &[
            card(Suit::Hearts, Rank::Ten),
            card(Suit::Clubs, Rank::Six),
            card(Suit::Spades, Rank::Eight),
            card(Suit::Diamonds, Rank::Five),
            card(Suit::Hearts, Rank::Six), // dealer reaches 17
            card(Suit::Clubs, Rank::Ten), // must stay in the deck
        ],
    );

    game.place_bet(10).unwrap();
    game.stand().unwrap();

    let round = game.round().unwrap();
    assert_eq!(round.dealer().len(), 3);
    assert_eq!(round.dealer().value(), 17);
    assert_eq!(round.cards_remaining(), 1);
    assert_eq!(game.last_result().unwrap().hands[0].outcome, HandOutcome::Win);
    assert_eq!(game.bankroll(), 110);
}

#[test]
fn dealer_stands_on_soft_seventeen_by_default() {
    let draws = [
        card(Suit::Hearts, Rank::Ten),
        card(Suit::Clubs, Rank::Ace),
        card(Suit::Spades, Rank::Nine),
        card(Suit::Diamonds, Rank::Six),
        card(Suit::Hearts, Rank::Four),
    ];

    let mut game = stacked_game(GameOptions::default(), 100, &draws);
    game.place_bet(10).unwrap();
    game.stand().unwrap();
    assert_eq!(game.round().unwrap().dealer().len(), 2);
    assert_eq!(game.bankroll(), 110);

    let options = GameOptions::default().with_stand_on_soft_17(false);
    let mut game = stacked_game(options, 100, &draws);
    game.place_bet(10).unwrap();
    game.stand().unwrap();
    assert_eq!(game.round().unwrap().dealer().len(), 3);
    assert_eq!(game.last_result().unwrap().dealer_value, 21);
    assert_eq!(game.bankroll(), 90);
}

#[test]
fn bust_ends_the_round_without_dealer_draws() {
    let mut game = stacked_game(
        GameOptions::default(),
        100,
        &[
            card(Suit::Hearts, Rank::Ten),
            card(Suit::Clubs, Rank::Six),
            card(Suit::Spades, Rank::Six),
            card(Suit::Diamonds, Rank::Ten),
            card(Suit::Hearts, Rank::King), // player hit busts
            card(Suit::Clubs, Rank::Two),
        ],
    );

    game.place_bet(10).unwrap();
    let hand = game.hit().unwrap();
    assert_eq!(hand.status, HandStatus::Bust);
    assert_eq!(hand.value, 26);

    assert_eq!(game.state(), GameState::AwaitingBet);
    assert_eq!(game.round().unwrap().dealer().len(), 2);
    assert_eq!(game.last_result().unwrap().hands[0].outcome, HandOutcome::Lose);
    assert_eq!(game.bankroll(), 90);
}

#[test]
fn bet_errors() {
    let mut game = Game::new(GameOptions::default(), 10, 1).unwrap();

    assert_eq!(game.place_bet(0).unwrap_err(), BetError::InsufficientFunds);
    assert_eq!(game.place_bet(11).unwrap_err(), BetError::InsufficientFunds);
    assert_eq!(game.bankroll(), 10);

    game.prepare_deck(Deck::from_draw_order(&[
        card(Suit::Hearts, Rank::Nine),
        card(Suit::Clubs, Rank::Five),
        card(Suit::Diamonds, Rank::Seven),
    ]));
    assert_eq!(game.place_bet(5).unwrap_err(), BetError::DeckExhausted);
    assert_eq!(game.bankroll(), 10);
    assert_eq!(game.state(), GameState::AwaitingBet);

    game.prepare_deck(Deck::from_draw_order(&[
        card(Suit::Hearts, Rank::Nine),
        card(Suit::Clubs, Rank::Five),
        card(Suit::Diamonds, Rank::Seven),
        card(Suit::Spades, Rank::Seven),
    ]));
    game.place_bet(5).unwrap();
    assert_eq!(game.place_bet(5).unwrap_err(), BetError::InvalidState);
}

#[test]
fn actions_rejected_outside_player_turn() {
    let mut game = Game::new(GameOptions::default(), 100, 1).unwrap();

    for err in [
        game.hit().unwrap_err(),
        game.stand().unwrap_err(),
        game.double_down().unwrap_err(),
        game.split().unwrap_err(),
    ] {
        assert_eq!(err, ActionError::InvalidState);
        assert!(err.is_not_allowed());
    }
}

#[test]
fn hit_with_empty_deck_leaves_hand_untouched() {
    let mut game = stacked_game(
        GameOptions::default(),
        100,
        &[
            card(Suit::Hearts, Rank::Five),
            card(Suit::Clubs, Rank::Nine),
            card(Suit::Spades, Rank::Six),
            card(Suit::Diamonds, Rank::Seven),
        ],
    );

    game.place_bet(10).unwrap();
    let err = game.hit().unwrap_err();
    assert_eq!(err, ActionError::DeckExhausted);
    assert!(!err.is_not_allowed());

    assert_eq!(game.state(), GameState::PlayerTurn(0));
    assert_eq!(game.round().unwrap().hands()[0].len(), 2);
}

#[test]
fn dealer_running_out_voids_the_round() {
    let mut game = stacked_game(
        GameOptions::default(),
        100,
        &[
            card(Suit::Hearts, Rank::Ten),
            card(Suit::Clubs, Rank::Six),
            card(Suit::Spades, Rank::Seven),
            card(Suit::Diamonds, Rank::Five),
        ],
    );
    let events = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&events);
    game.subscribe(move |event: &GameEvent| sink.borrow_mut().push(event.clone()));

    game.place_bet(10).unwrap();
    assert_eq!(game.stand().unwrap_err(), ActionError::DeckExhausted);

    assert_eq!(game.state(), GameState::AwaitingBet);
    assert_eq!(game.bankroll(), 100);
    assert!(game.last_result().is_none());
    assert_eq!(game.rounds_played(), 0);
    assert_eq!(
        events.borrow().last(),
        Some(&GameEvent::RoundVoided { refunded: 10 })
    );
}

#[test]
fn double_down_doubles_bet_and_stands() {
    let mut game = stacked_game(
        GameOptions::default(),
        100,
        &[
            card(Suit::Hearts, Rank::Five),
            card(Suit::Clubs, Rank::Two),
            card(Suit::Diamonds, Rank::Four),
            card(Suit::Spades, Rank::Three),
            card(Suit::Hearts, Rank::Ten), // double draw
            card(Suit::Clubs, Rank::Ten), // dealer to 15
            card(Suit::Clubs, Rank::Three), // dealer to 18
        ],
    );

    game.place_bet(10).unwrap();
    let hand = game.double_down().unwrap();
    assert_eq!(hand.bet, 20);
    assert_eq!(hand.value, 19);
    assert_eq!(hand.status, HandStatus::Stand);
    assert_eq!(hand_bets(&game), vec![20]);

    assert_eq!(game.state(), GameState::AwaitingBet);
    let result = game.last_result().unwrap();
    assert_eq!(result.hands[0].outcome, HandOutcome::Win);
    assert_eq!(result.hands[0].payout, 40);
    assert_eq!(game.bankroll(), 120);
}

#[test]
fn double_down_bust_still_advances() {
    let mut game = stacked_game(
        GameOptions::default(),
        100,
        &[
            card(Suit::Hearts, Rank::Ten),
            card(Suit::Clubs, Rank::Seven),
            card(Suit::Diamonds, Rank::Six),
            card(Suit::Spades, Rank::Ten),
            card(Suit::Hearts, Rank::Queen),
        ],
    );

    game.place_bet(10).unwrap();
    let hand = game.double_down().unwrap();
    assert_eq!(hand.status, HandStatus::Bust);
    assert_eq!(game.state(), GameState::AwaitingBet);
    assert_eq!(game.bankroll(), 80);
}

#[test]
fn double_down_requires_two_cards_and_funds() {
    let draws = [
        card(Suit::Hearts, Rank::Five),
        card(Suit::Clubs, Rank::Nine),
        card(Suit::Diamonds, Rank::Four),
        card(Suit::Spades, Rank::Eight),
        card(Suit::Hearts, Rank::Two),
    ];

    let mut game = stacked_game(GameOptions::default(), 100, &draws);
    game.place_bet(10).unwrap();
    game.hit().unwrap();
    let err = game.double_down().unwrap_err();
    assert_eq!(err, ActionError::CannotDouble);
    assert!(err.is_not_allowed());

    let mut game = stacked_game(GameOptions::default(), 10, &draws);
    game.place_bet(10).unwrap();
    assert_eq!(
        game.double_down().unwrap_err(),
        ActionError::InsufficientFunds
    );
    assert_eq!(game.bankroll(), 0);
}

#[test]
fn double_down_rejected_when_value_not_allowed() {
    let options = GameOptions::default().with_double(tablejack::DoubleOption::NineOrTen);
    let mut game = stacked_game(
        options,
        100,
        &[
            card(Suit::Hearts, Rank::Five),
            card(Suit::Clubs, Rank::Two),
            card(Suit::Diamonds, Rank::Three),
            card(Suit::Spades, Rank::Seven),
        ],
    );

    game.place_bet(10).unwrap();
    assert_eq!(
        game.double_down().unwrap_err(),
        ActionError::CannotDouble
    );
    assert_eq!(game.bankroll(), 90);
}

#[test]
fn split_creates_two_hands() {
    let mut game = stacked_game(
        GameOptions::default(),
        100,
        &[
            card(Suit::Hearts, Rank::Eight),
            card(Suit::Clubs, Rank::Five),
            card(Suit::Diamonds, Rank::Eight),
            card(Suit::Spades, Rank::Nine),
            card(Suit::Hearts, Rank::Two), // split hand 1 draw
            card(Suit::Clubs, Rank::Three), // split hand 2 draw
            card(Suit::Clubs, Rank::Ten), // dealer busts
        ],
    );

    game.place_bet(10).unwrap();
    let hand = game.split().unwrap();
    assert_eq!(hand.index, 0);
    assert_eq!(hand.value, 10);
    assert!(hand.from_split);

    let round = game.round().unwrap();
    assert_eq!(round.hands().len(), 2);
    assert_eq!(round.hands()[0].len(), 2);
    assert_eq!(round.hands()[1].value(), 11);
    assert_eq!(hand_bets(&game), vec![10, 10]);
    assert_eq!(game.bankroll(), 80);
    assert_eq!(game.state(), GameState::PlayerTurn(0));

    game.stand().unwrap();
    assert_eq!(game.state(), GameState::PlayerTurn(1));
    game.stand().unwrap();

    let result = game.last_result().unwrap();
    assert!(result.dealer_bust);
    assert_eq!(result.hands.len(), 2);
    assert_eq!(result.total_payout, 40);
    assert_eq!(game.bankroll(), 120);
}

#[test]
fn split_matches_on_value_not_rank() {
    let mut game = stacked_game(
        GameOptions::default(),
        100,
        &[
            card(Suit::Hearts, Rank::King),
            card(Suit::Clubs, Rank::Five),
            card(Suit::Diamonds, Rank::Ten),
            card(Suit::Spades, Rank::Nine),
            card(Suit::Hearts, Rank::Nine),
            card(Suit::Clubs, Rank::Eight),
        ],
    );

    game.place_bet(10).unwrap();
    game.split().unwrap();
    assert_eq!(game.round().unwrap().hands().len(), 2);
}

#[test]
fn split_rejected_for_non_pair_and_short_funds() {
    let mut game = stacked_game(
        GameOptions::default(),
        100,
        &[
            card(Suit::Hearts, Rank::Eight),
            card(Suit::Clubs, Rank::Five),
            card(Suit::Diamonds, Rank::Nine),
            card(Suit::Spades, Rank::Nine),
        ],
    );
    game.place_bet(10).unwrap();
    let err = game.split().unwrap_err();
    assert_eq!(err, ActionError::CannotSplit);
    assert!(err.is_not_allowed());

    let mut game = stacked_game(
        GameOptions::default(),
        10,
        &[
            card(Suit::Hearts, Rank::Eight),
            card(Suit::Clubs, Rank::Five),
            card(Suit::Diamonds, Rank::Eight),
            card(Suit::Spades, Rank::Nine),
            card(Suit::Hearts, Rank::Two),
            card(Suit::Clubs, Rank::Three),
        ],
    );
    game.place_bet(10).unwrap();
    assert_eq!(game.split().unwrap_err(), ActionError::InsufficientFunds);
    assert_eq!(game.round().unwrap().hands().len(), 1);
}

#[test]
fn resplit_is_bounded_by_options() {
    let draws = [
        card(Suit::Hearts, Rank::Eight),
        card(Suit::Clubs, Rank::Five),
        card(Suit::Diamonds, Rank::Eight),
        card(Suit::Spades, Rank::Nine),
        card(Suit::Clubs, Rank::Eight), // pairs hand 0 again
        card(Suit::Hearts, Rank::Three),
        card(Suit::Hearts, Rank::Two),
        card(Suit::Diamonds, Rank::Four),
    ];

    let mut game = stacked_game(GameOptions::default().with_split(1), 100, &draws);
    game.place_bet(10).unwrap();
    game.split().unwrap();
    assert_eq!(game.split().unwrap_err(), ActionError::MaxSplitsReached);

    let mut game = stacked_game(GameOptions::default(), 100, &draws);
    game.place_bet(10).unwrap();
    game.split().unwrap();
    game.split().unwrap();
    assert_eq!(game.round().unwrap().hands().len(), 3);
    assert_eq!(game.round().unwrap().splits(), 2);
    assert_eq!(game.bankroll(), 70);
}

#[test]
fn split_twenty_one_is_not_a_natural() {
    let options = GameOptions::default().with_split_aces_receive_one_card(true);
    let mut game = stacked_game(
        options,
        100,
        &[
            card(Suit::Hearts, Rank::Ace),
            card(Suit::Clubs, Rank::Five),
            card(Suit::Diamonds, Rank::Ace),
            card(Suit::Spades, Rank::Nine),
            card(Suit::Hearts, Rank::King), // hand 0: 21
            card(Suit::Clubs, Rank::Seven), // hand 1: 18
            card(Suit::Clubs, Rank::Three), // dealer to 17
        ],
    );

    let events = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&events);
    game.subscribe(move |event: &GameEvent| sink.borrow_mut().push(event.clone()));

    game.place_bet(10).unwrap();
    let hand = game.split().unwrap();
    assert_eq!(hand.value, 21);
    assert_eq!(hand.status, HandStatus::Stand);

    {
        // Both one-card hands report finishing before the dealer plays.
        let events = events.borrow();
        assert_eq!(
            events[7],
            GameEvent::HandFinished {
                hand_index: 0,
                status: HandStatus::Stand
            }
        );
        assert_eq!(
            events[8],
            GameEvent::HandFinished {
                hand_index: 1,
                status: HandStatus::Stand
            }
        );
        assert!(matches!(events[9], GameEvent::HoleRevealed { .. }));
    }

    // Both split aces stand, so the round settles immediately.
    assert_eq!(game.state(), GameState::AwaitingBet);
    let result = game.last_result().unwrap();
    assert_eq!(result.hands[0].outcome, HandOutcome::Win);
    assert_eq!(result.hands[0].payout, 20);
    assert_eq!(result.hands[1].outcome, HandOutcome::Win);
    assert_eq!(game.bankroll(), 120);
}

#[test]
fn blackjack_payout_rounding() {
    let draws = [
        card(Suit::Hearts, Rank::Ace),
        card(Suit::Clubs, Rank::Ten),
        card(Suit::Spades, Rank::Jack),
        card(Suit::Diamonds, Rank::Eight),
    ];

    let mut game = stacked_game(GameOptions::default(), 100, &draws);
    game.place_bet(5).unwrap();
    assert_eq!(game.last_result().unwrap().hands[0].payout, 12);
    assert_eq!(game.bankroll(), 107);

    let options = GameOptions::default().with_rounding_blackjack(RoundingMode::Up);
    let mut game = stacked_game(options, 100, &draws);
    game.place_bet(5).unwrap();
    assert_eq!(game.bankroll(), 108);
}

#[test]
fn snapshot_masks_hole_card_until_revealed() {
    let up = card(Suit::Clubs, Rank::Six);
    let hole = card(Suit::Diamonds, Rank::Five);
    let mut game = stacked_game(
        GameOptions::default(),
        100,
        &[
            card(Suit::Hearts, Rank::Ten),
            up,
            card(Suit::Spades, Rank::Seven),
            hole,
            card(Suit::Hearts, Rank::Nine),
        ],
    );

    let empty = game.current_state();
    assert!(empty.player_hands.is_empty());
    assert!(empty.dealer.cards.is_empty());
    assert_eq!(empty.phase, GameState::AwaitingBet);

    game.place_bet(10).unwrap();
    let table = game.current_state();
    assert_eq!(table.dealer.cards, vec![Some(up), None]);
    assert_eq!(table.dealer.visible_value, 6);
    assert!(!table.dealer.revealed);
    assert_eq!(table.bankroll, 90);
    assert_eq!(table.active_hand_index, Some(0));
    assert_eq!(table.phase, GameState::PlayerTurn(0));
    assert_eq!(table.player_hands[0].value, 17);

    game.stand().unwrap();
    let table = game.current_state();
    assert!(table.dealer.revealed);
    assert_eq!(table.dealer.cards.len(), 3);
    assert!(table.dealer.cards.iter().all(Option::is_some));
    assert_eq!(table.dealer.visible_value, 20);
    assert_eq!(table.active_hand_index, None);
}

#[test]
fn available_actions_follow_hand_shape_and_funds() {
    let draws = [
        card(Suit::Hearts, Rank::Eight),
        card(Suit::Clubs, Rank::Five),
        card(Suit::Diamonds, Rank::Eight),
        card(Suit::Spades, Rank::Nine),
    ];

    let game = Game::new(GameOptions::default(), 100, 1).unwrap();
    assert_eq!(game.available_actions(), tablejack::ActionSet::default());

    let mut game = stacked_game(GameOptions::default(), 100, &draws);
    game.place_bet(10).unwrap();
    let actions = game.available_actions();
    assert!(!actions.hit);
    assert!(actions.stand);
    assert!(!actions.double);
    assert!(!actions.split);

    let mut with_cards = draws.to_vec();
    with_cards.extend([card(Suit::Hearts, Rank::Two), card(Suit::Clubs, Rank::Three)]);
    let mut game = stacked_game(GameOptions::default(), 100, &with_cards);
    game.place_bet(10).unwrap();
    let actions = game.available_actions();
    assert!(actions.hit && actions.stand && actions.double && actions.split);

    let mut game = stacked_game(GameOptions::default(), 10, &with_cards);
    game.place_bet(10).unwrap();
    let actions = game.available_actions();
    assert!(actions.hit);
    assert!(!actions.double);
    assert!(!actions.split);
}

#[test]
fn observers_see_events_in_order() {
    let mut game = stacked_game(
        GameOptions::default(),
        100,
        &[
            card(Suit::Hearts, Rank::Ten),
            card(Suit::Clubs, Rank::Six),
            card(Suit::Spades, Rank::Seven),
            card(Suit::Diamonds, Rank::Five),
            card(Suit::Hearts, Rank::Nine),
        ],
    );
    let events = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&events);
    game.subscribe(move |event: &GameEvent| sink.borrow_mut().push(event.clone()));

    game.place_bet(10).unwrap();
    {
        let events = events.borrow();
        assert_eq!(
            events[0],
            GameEvent::BetPlaced {
                amount: 10,
                bankroll: 90
            }
        );
        assert_eq!(events.len(), 5);
        assert_eq!(
            events[4],
            GameEvent::CardDealt {
                seat: Seat::Dealer,
                card: None
            }
        );
    }

    game.stand().unwrap();
    let events = events.borrow();
    assert_eq!(
        events[5],
        GameEvent::HandFinished {
            hand_index: 0,
            status: HandStatus::Stand
        }
    );
    assert_eq!(
        events[6],
        GameEvent::HoleRevealed {
            card: card(Suit::Diamonds, Rank::Five)
        }
    );
    assert_eq!(
        events[7],
        GameEvent::CardDealt {
            seat: Seat::Dealer,
            card: Some(card(Suit::Hearts, Rank::Nine))
        }
    );
    assert!(matches!(events[8], GameEvent::RoundSettled(ref result) if result.dealer_value == 20));
    assert_eq!(events.len(), 9);
}

#[test]
fn payout_saturates_instead_of_overflowing() {
    let mut game = stacked_game(
        GameOptions::default(),
        usize::MAX,
        &[
            card(Suit::Hearts, Rank::Ten),
            card(Suit::Clubs, Rank::Six),
            card(Suit::Spades, Rank::Nine),
            card(Suit::Diamonds, Rank::Ten),
            card(Suit::Hearts, Rank::King), // dealer busts
        ],
    );

    game.place_bet(usize::MAX).unwrap();
    assert_eq!(game.bankroll(), 0);
    game.stand().unwrap();

    let result = game.last_result().unwrap();
    assert!(result.dealer_bust);
    assert_eq!(result.hands[0].outcome, HandOutcome::Win);
    assert_eq!(result.hands[0].payout, usize::MAX);
    assert_eq!(result.total_payout, usize::MAX);
    assert_eq!(game.bankroll(), usize::MAX);
    assert_eq!(game.state(), GameState::AwaitingBet);
}

#[test]
fn large_blackjack_payout_saturates() {
    let mut game = stacked_game(
        GameOptions::default(),
        usize::MAX,
        &[
            card(Suit::Hearts, Rank::Ace),
            card(Suit::Clubs, Rank::Nine),
            card(Suit::Spades, Rank::King),
            card(Suit::Diamonds, Rank::Eight),
        ],
    );

    game.place_bet(usize::MAX / 2).unwrap();

    let result = game.last_result().unwrap();
    assert_eq!(result.hands[0].outcome, HandOutcome::Blackjack);
    assert_eq!(result.hands[0].payout, usize::MAX);
    assert_eq!(result.net, isize::MAX);
    assert_eq!(game.bankroll(), usize::MAX);
}

#[test]
fn session_requires_buy_in_and_allows_rebuy_when_broke() {
    assert_eq!(
        Game::new(GameOptions::default(), 0, 1).err(),
        Some(SessionError::ZeroBuyIn)
    );

    let mut game = stacked_game(
        GameOptions::default(),
        10,
        &[
            card(Suit::Hearts, Rank::Ten),
            card(Suit::Clubs, Rank::Six),
            card(Suit::Spades, Rank::Seven),
            card(Suit::Diamonds, Rank::Five),
            card(Suit::Hearts, Rank::Nine),
        ],
    );

    assert_eq!(game.rebuy(50).unwrap_err(), SessionError::BankrollNotEmpty);

    game.place_bet(10).unwrap();
    assert_eq!(game.rebuy(50).unwrap_err(), SessionError::InvalidState);

    game.stand().unwrap();
    assert_eq!(game.bankroll(), 0);
    assert_eq!(game.place_bet(1).unwrap_err(), BetError::InsufficientFunds);

    assert_eq!(game.rebuy(0).unwrap_err(), SessionError::ZeroBuyIn);
    game.rebuy(50).unwrap();
    assert_eq!(game.bankroll(), 50);
    assert_eq!(game.rebuy(50).unwrap_err(), SessionError::BankrollNotEmpty);
}

#[test]
fn same_seed_deals_the_same_round() {
    let mut first = Game::new(GameOptions::default(), 100, 42).unwrap();
    let mut second = Game::new(GameOptions::default(), 100, 42).unwrap();

    first.place_bet(10).unwrap();
    second.place_bet(10).unwrap();

    assert_eq!(first.current_state(), second.current_state());
}

#[test]
fn every_round_gets_a_fresh_deck() {
    let mut game = Game::new(GameOptions::default(), 1_000, 3).unwrap();

    for _ in 0..20 {
        game.place_bet(10).unwrap();
        while let GameState::PlayerTurn(_) = game.state() {
            game.stand().unwrap();
        }
        assert_eq!(game.state(), GameState::AwaitingBet);

        let round = game.round().unwrap();
        let dealt = round.dealer().len() + round.hands()[0].len();
        assert_eq!(round.cards_remaining(), tablejack::DECK_SIZE - dealt);
    }

    assert_eq!(game.rounds_played(), 20);
}

#[test]
fn double_after_split_can_be_disabled() {
    let options = GameOptions::default().with_double_after_split(false);
    let mut game = stacked_game(
        options,
        100,
        &[
            card(Suit::Hearts, Rank::Four),
            card(Suit::Clubs, Rank::Five),
            card(Suit::Diamonds, Rank::Four),
            card(Suit::Spades, Rank::Nine),
            card(Suit::Hearts, Rank::Six),
            card(Suit::Clubs, Rank::Seven),
            card(Suit::Clubs, Rank::Two),
        ],
    );

    game.place_bet(10).unwrap();
    game.split().unwrap();
    assert!(!game.available_actions().double);
    assert_eq!(game.double_down().unwrap_err(), ActionError::CannotDouble);
}

#[test]
fn options_builder_sets_fields() {
    let options = GameOptions::default()
        .with_decks(4)
        .with_blackjack_pays(1.2)
        .with_rounding_blackjack(RoundingMode::Nearest)
        .with_stand_on_soft_17(false)
        .with_double(tablejack::DoubleOption::NineThrough11)
        .with_double_after_split(false)
        .with_split(0)
        .with_split_aces_receive_one_card(true);

    assert_eq!(options.decks, 4);
    assert!((options.blackjack_pays - 1.2).abs() < f64::EPSILON);
    assert_eq!(options.rounding_blackjack, RoundingMode::Nearest);
    assert!(!options.stand_on_soft_17);
    assert_eq!(options.double, tablejack::DoubleOption::NineThrough11);
    assert!(!options.double_after_split);
    assert_eq!(options.split, 0);
    assert!(options.split_aces_receive_one_card);
}
