//! Console blackjack.

#![allow(clippy::missing_docs_in_private_items)]

use std::io::{self, Write};
use std::time::{SystemTime, UNIX_EPOCH};

use clap::Parser;
use tablejack::{
    ActionSet, Card, DealerSnapshot, Game, GameOptions, GameState, HandOutcome, HandSnapshot,
    Suit, TableSnapshot,
};

#[derive(Parser)]
#[command(name = "console", about = "Play blackjack against the dealer")]
struct Args {
    /// Starting bankroll
    #[arg(long, default_value_t = 500)]
    buy_in: usize,

    /// Number of decks shuffled together each round
    #[arg(long, default_value_t = 1)]
    decks: u8,

    /// Shuffle seed (defaults to the current time)
    #[arg(long)]
    seed: Option<u64>,

    /// Dealer hits soft 17
    #[arg(long, default_value_t = false)]
    hit_soft_17: bool,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    let seed = args.seed.unwrap_or_else(|| {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs()
    });
    let options = GameOptions::default()
        .with_decks(args.decks)
        .with_stand_on_soft_17(!args.hit_soft_17);

    let mut game = match Game::new(options, args.buy_in, seed) {
        Ok(game) => game,
        Err(err) => {
            eprintln!("Cannot start: {err}");
            std::process::exit(1);
        }
    };

    println!("Welcome to Blackjack! (type 'q' to quit)");

    loop {
        if game.bankroll() == 0 {
            println!("You are out of money.");
            match prompt_usize("Rebuy amount (0 to quit): ") {
                Some(amount) if amount > 0 => {
                    if let Err(err) = game.rebuy(amount) {
                        println!("Rebuy error: {err}");
                    }
                    continue;
                }
                _ => break,
            }
        }

        let bankroll = game.bankroll();
        let Some(bet) = prompt_usize(&format!("Bet amount (1-{bankroll}, 0 to quit): ")) else {
            break;
        };
        if bet == 0 {
            break;
        }

        if let Err(err) = game.place_bet(bet) {
            println!("Bet error: {err}");
            continue;
        }

        while let GameState::PlayerTurn(_) = game.state() {
            print_table(&game.current_state());
            println!("{}", format_actions(game.available_actions()));

            let result = match prompt_line("Action: ").as_str() {
                "h" | "hit" => game.hit(),
                "s" | "stand" => game.stand(),
                "d" | "double" => game.double_down(),
                "p" | "split" => game.split(),
                "q" | "quit" => return,
                _ => {
                    println!("Unknown action.");
                    continue;
                }
            };

            if let Err(err) = result {
                println!("Action error: {err}");
            }
        }

        print_table(&game.current_state());
        print_result(&game);
    }

    println!(
        "Goodbye. You leave with {} after {} round(s).",
        game.bankroll(),
        game.rounds_played()
    );
}

fn prompt_line(prompt: &str) -> String {
    print!("{prompt}");
    let _ = io::stdout().flush();

    let mut input = String::new();
    if io::stdin().read_line(&mut input).is_err() {
        return String::new();
    }
    input.trim().to_lowercase()
}

fn prompt_usize(prompt: &str) -> Option<usize> {
    loop {
        let input = prompt_line(prompt);
        if input.is_empty() || input == "q" || input == "quit" {
            return None;
        }
        match input.parse::<usize>() {
            Ok(value) => return Some(value),
            Err(_) => println!("Please enter a number."),
        }
    }
}

fn print_table(table: &TableSnapshot) {
    println!(
        "\nDealer: {} (value {})",
        format_dealer(&table.dealer),
        table.dealer.visible_value
    );

    for hand in &table.player_hands {
        let marker = if table.active_hand_index == Some(hand.index) {
            "*"
        } else {
            " "
        };
        println!("{marker} {}", format_hand(hand));
    }
    println!("Bankroll: {}\n", table.bankroll);
}

fn print_result(game: &Game) {
    let Some(result) = game.last_result() else {
        println!("Round voided, bets returned.");
        return;
    };

    if result.dealer_bust {
        println!("Dealer busts!");
    }
    for hand in &result.hands {
        let verdict = match hand.outcome {
            HandOutcome::Blackjack => "Blackjack! You win!",
            HandOutcome::Win => "You win!",
            HandOutcome::Lose => "You lose!",
            HandOutcome::Push => "It's a tie!",
        };
        println!(
            "Hand {}: {} vs {}: {verdict} (payout {})",
            hand.hand_index, hand.player_value, hand.dealer_value, hand.payout
        );
    }
    println!("Net: {}", result.net);
}

fn format_actions(actions: ActionSet) -> String {
    let parts = [
        format_action("hit", "h", actions.hit),
        format_action("stand", "s", actions.stand),
        format_action("double", "d", actions.double),
        format_action("split", "p", actions.split),
    ];
    format!("Actions: {}", parts.join(" "))
}

fn format_action(label: &str, key: &str, allowed: bool) -> String {
    let text = format!("[{key}]{label}");
    if allowed {
        colorize(&text, "32")
    } else {
        colorize(&text, "90")
    }
}

fn colorize(text: &str, code: &str) -> String {
    format!("\u{1b}[{code}m{text}\u{1b}[0m")
}

fn format_dealer(dealer: &DealerSnapshot) -> String {
    if dealer.cards.is_empty() {
        return "(no cards)".to_string();
    }

    dealer
        .cards
        .iter()
        .map(|card| card.as_ref().map_or_else(|| "??".to_string(), format_card))
        .collect::<Vec<_>>()
        .join(" ")
}

fn format_hand(hand: &HandSnapshot) -> String {
    let cards = hand
        .cards
        .iter()
        .map(format_card)
        .collect::<Vec<_>>()
        .join(" ");
    format!(
        "Hand {}: {cards} | value {}{} | bet {} | {:?}",
        hand.index,
        hand.value,
        if hand.soft { " soft" } else { "" },
        hand.bet,
        hand.status
    )
}

fn format_card(card: &Card) -> String {
    let (suit, color_code) = match card.suit {
        Suit::Hearts => ("H", "31"),
        Suit::Diamonds => ("D", "31"),
        Suit::Clubs => ("C", "32"),
        Suit::Spades => ("S", "34"),
    };
    format!("{}{}", card.rank.label(), colorize(suit, color_code))
}
