//! Тесты оценки рук: категории, тайбрейкеры, сравнение.

mod common;

use common::cards;
use poker_room::domain::card::Rank;
use poker_room::eval::{best_hand_rank, describe_hand, evaluate_best_hand, HandCategory};

fn rank_of(list: &str) -> poker_room::domain::hand::HandRank {
    best_hand_rank(&cards(list)).expect("должно быть не меньше 5 карт")
}

//
// ====================== КАТЕГОРИИ ======================
//

/// 2h 2s 2d 5c 5h 9d Kc → фулл-хаус "двойки на пятёрках".
#[test]
fn full_house_from_seven_cards() {
    let rank = rank_of("2h 2s 2d 5c 5h 9d Kc");

    assert_eq!(rank.category(), HandCategory::FullHouse);
    assert_eq!(rank.tiebreakers(), vec![Rank::Two, Rank::Five]);
    assert_eq!(describe_hand(rank), "Full house (2 5)");
}

#[test]
fn wheel_is_five_high_straight() {
    let rank = rank_of("Ah 2c 3d 4s 5h 9c Kd");

    assert_eq!(rank.category(), HandCategory::Straight);
    assert_eq!(rank.tiebreakers(), vec![Rank::Five]);
}

#[test]
fn wheel_loses_to_six_high_straight() {
    let wheel = rank_of("Ah 2c 3d 4s 5h");
    let six_high = rank_of("2c 3d 4s 5h 6c");

    assert!(six_high > wheel, "стрит до шестёрки старше колеса");
}

#[test]
fn royal_flush_beats_lower_straight_flush() {
    let royal = rank_of("Ts Js Qs Ks As 2d 3c");
    let nine_high = rank_of("5h 6h 7h 8h 9h Kd Kc");

    assert_eq!(royal.category(), HandCategory::StraightFlush);
    assert_eq!(nine_high.category(), HandCategory::StraightFlush);
    assert!(royal > nine_high);
}

#[test]
fn flush_uses_best_five_of_six_suited() {
    let rank = rank_of("2h 4h 7h 9h Jh Kh 3c");

    assert_eq!(rank.category(), HandCategory::Flush);
    assert_eq!(
        rank.tiebreakers(),
        vec![Rank::King, Rank::Jack, Rank::Nine, Rank::Seven, Rank::Four]
    );
}

#[test]
fn quads_kicker_is_best_remaining_card() {
    let rank = rank_of("9c 9d 9h 9s 2c 7d Ah");

    assert_eq!(rank.category(), HandCategory::FourOfAKind);
    assert_eq!(rank.tiebreakers(), vec![Rank::Nine, Rank::Ace]);
}

//
// ====================== ТАЙБРЕЙКЕРЫ ======================
//

#[test]
fn two_pair_kicker_decides() {
    let board = cards("Kd Kc 8h 8s 2c");
    let with_ace = evaluate_best_hand(&cards("Ah 3d"), &board).expect("7 карт");
    let with_queen = evaluate_best_hand(&cards("Qh 3s"), &board).expect("7 карт");

    assert_eq!(with_ace.category(), HandCategory::TwoPair);
    assert!(with_ace > with_queen, "туз-кикер старше дамы");
}

#[test]
fn playing_the_board_is_a_tie() {
    let board = cards("Ts Js Qs Ks As");
    let a = evaluate_best_hand(&cards("2c 3d"), &board);
    let b = evaluate_best_hand(&cards("4h 5h"), &board);

    assert!(a.is_some());
    assert_eq!(a, b, "оба играют борд - ничья");
}

#[test]
fn pair_beats_high_card_regardless_of_kickers() {
    let pair = rank_of("2c 2d 5h 7s 9c");
    let high = rank_of("Ac Kd Qh Js 9c");

    assert_eq!(pair.category(), HandCategory::OnePair);
    assert_eq!(high.category(), HandCategory::HighCard);
    assert!(pair > high);
}

#[test]
fn fewer_than_five_cards_has_no_rank() {
    assert_eq!(evaluate_best_hand(&cards("Ah Ad"), &cards("2c 3d")), None);
}
