//! Доменные тесты: карты, колода, фишки, стол.

mod common;

use std::collections::HashSet;

use poker_room::domain::{
    card::{Card, CardParseError, Rank, Suit},
    chips::Chips,
    deck::{combinations, Deck},
    player::{PlayerAtTable, PlayerId, PlayerStatus},
    table::{Table, TableConfig},
};
use poker_room::engine::EngineError;
use poker_room::infra::rng::DeterministicRng;

//
// ====================== КАРТЫ ======================
//

#[test]
fn card_parses_and_prints_short_form() {
    let ace: Card = "Ah".parse().expect("Ah");
    assert_eq!(ace, Card::new(Rank::Ace, Suit::Hearts));
    assert_eq!(ace.to_string(), "Ah");

    let ten: Card = "10d".parse().expect("10d");
    assert_eq!(ten, Card::new(Rank::Ten, Suit::Diamonds));
    assert_eq!(ten.to_string(), "Td");
}

#[test]
fn card_parse_errors() {
    assert_eq!("".parse::<Card>(), Err(CardParseError::BadLength(String::new())));
    assert_eq!("Zh".parse::<Card>(), Err(CardParseError::BadRank("Z".into())));
    assert_eq!("Ax".parse::<Card>(), Err(CardParseError::BadSuit('x')));
}

//
// ====================== КОЛОДА ======================
//

#[test]
fn standard_deck_has_52_unique_cards() {
    let deck = Deck::standard_52();
    let unique: HashSet<Card> = deck.cards().iter().copied().collect();

    assert_eq!(deck.len(), 52);
    assert_eq!(unique.len(), 52, "в колоде не должно быть дублей");
}

#[test]
fn same_seed_gives_same_shuffle() {
    let a = Deck::shuffled(&mut DeterministicRng::from_seed(42));
    let b = Deck::shuffled(&mut DeterministicRng::from_seed(42));
    let c = Deck::shuffled(&mut DeterministicRng::from_seed(43));

    assert_eq!(a, b);
    assert_ne!(a, c, "другой seed - другой порядок");
}

#[test]
fn stacked_deck_deals_in_given_order() {
    let mut deck = common::stacked_deck("As Kd 2c");

    assert_eq!(deck.draw(), Ok(common::c("As")));
    assert_eq!(deck.draw_n(2), Ok(common::cards("Kd 2c")));
    assert_eq!(deck.len(), 49);
}

#[test]
fn drawing_from_exhausted_deck_fails_without_partial_take() {
    let mut deck = Deck::standard_52();
    let all = deck.draw_n(50).expect("50 карт есть");
    assert_eq!(all.len(), 50);

    assert_eq!(deck.draw_n(3), Err(EngineError::DeckExhausted));
    assert_eq!(deck.len(), 2, "неудачный draw_n ничего не снимает");

    deck.draw_n(2).expect("2 карты есть");
    assert_eq!(deck.draw(), Err(EngineError::DeckExhausted));
}

#[test]
fn seven_choose_five_is_21() {
    let items: Vec<u8> = (0..7).collect();
    let combos = combinations(&items, 5);

    assert_eq!(combos.len(), 21);
    assert!(combos.iter().all(|c| c.len() == 5));
    assert_eq!(combinations(&items, 8).len(), 0);
    assert_eq!(combinations(&items, 0), vec![Vec::<u8>::new()]);
}

//
// ====================== ФИШКИ И ИГРОК ======================
//

#[test]
fn chips_split_keeps_remainder() {
    assert_eq!(Chips(101).split(2), (Chips(50), Chips(1)));
    assert_eq!(Chips(7).split(0), (Chips::ZERO, Chips(7)));
    assert_eq!(Chips(5).saturating_sub(Chips(9)), Chips::ZERO);
}

#[test]
fn commit_is_clamped_to_stack_and_marks_all_in() {
    let mut p = PlayerAtTable::new(PlayerId::random(), "p", 0, Chips(50), Some(1));
    p.reset_for_hand();

    let paid = p.commit(Chips(80));

    assert_eq!(paid, Chips(50));
    assert_eq!(p.stack, Chips::ZERO);
    assert_eq!(p.total_committed, Chips(50));
    assert_eq!(p.status, PlayerStatus::AllIn);
}

#[test]
fn table_seats_and_removes_players() {
    let mut table = Table::new("1234".into(), TableConfig::standard());
    let id = PlayerId::random();

    assert!(table.seat_player(PlayerAtTable::new(id, "a", 2, Chips(100), Some(1))));
    assert!(
        !table.seat_player(PlayerAtTable::new(PlayerId::random(), "b", 2, Chips(100), Some(2))),
        "занятое место повторно не выдаётся"
    );
    assert_eq!(table.seated_count(), 1);
    assert_eq!(table.player_at(2).map(|p| p.player_id), Some(id));

    assert!(table.remove_player(&id).is_some());
    assert!(table.is_seat_empty(2));
}

#[test]
fn rebuy_amount_is_in_big_blinds() {
    assert_eq!(TableConfig::standard().rebuy_amount(), Chips(2000));
}
