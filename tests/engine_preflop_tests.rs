//! Старт раздачи: дилер, блайнды, карманные карты, первый ход.

mod common;

use common::{act, ready, table_with_stacks};
use poker_room::domain::{chips::Chips, deck::Deck, hand::TableState, player::PlayerStatus};
use poker_room::engine::{start_hand, EngineError, HandStatus, PlayerActionKind};

#[test]
fn three_handed_blinds_and_first_to_act() {
    let (mut table, ids) = table_with_stacks(&[1000, 1000, 1000]);

    let (hand, status) = start_hand(&mut table, Deck::standard_52(), ready).expect("раздача");

    assert_eq!(table.dealer_button, Some(0), "первый дилер - младшее место");
    assert_eq!(table.state, TableState::Preflop);
    assert_eq!(table.hand_id, 1);

    let sb = table.player_at(1).expect("SB");
    let bb = table.player_at(2).expect("BB");
    assert_eq!(sb.bet_this_street, Chips(10));
    assert_eq!(sb.stack, Chips(990));
    assert_eq!(bb.bet_this_street, Chips(20));
    assert_eq!(hand.betting.highest_bet, Chips(20));

    // Первым ходит следующий после BB.
    assert_eq!(status, HandStatus::AwaitingAction(ids[0]));
    assert_eq!(hand.current_actor, Some(ids[0]));
    assert_eq!(hand.betting.pending.len(), 3);

    assert!(table.players().all(|p| p.hole_cards.len() == 2));
    assert_eq!(hand.deck.len(), 52 - 6);
    assert_eq!(table.pot_total(), Chips(30));
}

#[test]
fn hole_cards_dealt_round_robin_from_left_of_dealer() {
    let (mut table, _) = table_with_stacks(&[1000, 1000, 1000]);
    let deck = common::stacked_deck("Kc 7c Ah Kd 2d Ad");

    start_hand(&mut table, deck, ready).expect("раздача");

    let hole = |seat| table.player_at(seat).map(|p| p.hole_cards.clone()).unwrap_or_default();
    assert_eq!(hole(1), common::cards("Kc Kd"));
    assert_eq!(hole(2), common::cards("7c 2d"));
    assert_eq!(hole(0), common::cards("Ah Ad"));
}

/// Хедз-ап: SB - следующий после дилера, BB - дилер, SB ходит первым.
#[test]
fn heads_up_blinds() {
    let (mut table, ids) = table_with_stacks(&[1000, 1000]);

    let (_, status) = start_hand(&mut table, Deck::standard_52(), ready).expect("раздача");

    assert_eq!(table.dealer_button, Some(0));
    assert_eq!(table.player_at(1).map(|p| p.bet_this_street), Some(Chips(10)));
    assert_eq!(table.player_at(0).map(|p| p.bet_this_street), Some(Chips(20)));
    assert_eq!(status, HandStatus::AwaitingAction(ids[1]));
}

#[test]
fn dealer_button_moves_to_next_ready_seat() {
    let (mut table, ids) = table_with_stacks(&[1000, 1000, 1000]);

    let (mut hand, _) = start_hand(&mut table, Deck::standard_52(), ready).expect("раздача 1");
    act(&mut table, &mut hand, ids[0], PlayerActionKind::Fold);
    act(&mut table, &mut hand, ids[1], PlayerActionKind::Fold);
    assert_eq!(table.state, TableState::Waiting);

    start_hand(&mut table, Deck::standard_52(), ready).expect("раздача 2");
    assert_eq!(table.dealer_button, Some(1));
    assert_eq!(table.hand_id, 2);
}

#[test]
fn not_ready_players_sit_out() {
    let (mut table, ids) = table_with_stacks(&[1000, 0, 1000, 1000]);
    if let Some(p) = table.player_mut(&ids[3]) {
        p.connected = false;
    }

    let (hand, status) = start_hand(&mut table, Deck::standard_52(), ready).expect("раздача");

    assert_eq!(table.player(&ids[1]).map(|p| p.status), Some(PlayerStatus::SittingOut));
    assert_eq!(table.player(&ids[3]).map(|p| p.status), Some(PlayerStatus::SittingOut));
    assert!(table.player(&ids[1]).is_some_and(|p| p.hole_cards.is_empty()));
    // Хедз-ап между местами 0 и 2.
    assert_eq!(status, HandStatus::AwaitingAction(ids[2]));
    assert_eq!(hand.betting.pending.len(), 2);
}

#[test]
fn cannot_start_with_one_player_or_during_hand() {
    let (mut table, _) = table_with_stacks(&[1000]);
    assert_eq!(
        start_hand(&mut table, Deck::standard_52(), ready).map(|_| ()),
        Err(EngineError::NotEnoughPlayers)
    );

    let (mut table, _) = table_with_stacks(&[1000, 1000]);
    start_hand(&mut table, Deck::standard_52(), ready).expect("раздача");
    assert_eq!(
        start_hand(&mut table, Deck::standard_52(), ready).map(|_| ()),
        Err(EngineError::HandAlreadyInProgress)
    );
}

/// Короткий стек на BB ставит что есть и уходит в олл-ин.
#[test]
fn short_big_blind_goes_all_in() {
    let (mut table, _) = table_with_stacks(&[1000, 1000, 15]);

    let (hand, _) = start_hand(&mut table, Deck::standard_52(), ready).expect("раздача");

    let bb = table.player_at(2).expect("BB");
    assert_eq!(bb.bet_this_street, Chips(15));
    assert_eq!(bb.status, PlayerStatus::AllIn);
    assert_eq!(hand.betting.highest_bet, Chips(15));
    assert_eq!(hand.betting.pending.len(), 2, "олл-ин не в очереди");
}
