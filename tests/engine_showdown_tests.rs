//! Завершение раздачи: все сбросили, шоудаун, олл-ин с докладкой борда.

mod common;

use common::{act, cards, ready, stacked_deck, table_with_stacks};
use poker_room::domain::{
    chips::Chips,
    deck::Deck,
    hand::TableState,
    player::{LastAction, PlayerId, PlayerStatus},
    table::Table,
};
use poker_room::engine::{
    advance_street, apply_action, legal_actions, start_hand, HandEngine, HandEventKind,
    HandStatus, PlayerAction, PlayerActionKind,
};
use poker_room::infra::rng::DeterministicRng;

/// Все по очереди чекают, пока улица не закроется.
fn check_around(table: &mut Table, hand: &mut HandEngine) -> HandStatus {
    loop {
        let actor = hand.current_actor.expect("должен быть текущий игрок");
        match act(table, hand, actor, PlayerActionKind::Check) {
            HandStatus::AwaitingAction(_) => continue,
            other => return other,
        }
    }
}

fn stack(table: &Table, id: &PlayerId) -> Chips {
    table.player(id).map(|p| p.stack).unwrap_or_default()
}

//
// ====================== ВСЕ СБРОСИЛИ ======================
//

#[test]
fn everyone_folds_to_big_blind() {
    let (mut table, ids) = table_with_stacks(&[1000, 1000, 1000]);
    let (mut hand, _) = start_hand(&mut table, Deck::standard_52(), ready).expect("раздача");

    act(&mut table, &mut hand, ids[0], PlayerActionKind::Fold);
    let status = act(&mut table, &mut hand, ids[1], PlayerActionKind::Fold);

    let HandStatus::Finished(summary) = status else {
        panic!("раздача должна завершиться, получили {status:?}");
    };
    assert!(!summary.went_to_showdown);
    assert_eq!(summary.total_pot, Chips(30));
    assert_eq!(summary.won_by(ids[2]), Chips(30));

    assert_eq!(table.state, TableState::Waiting);
    assert_eq!(stack(&table, &ids[2]), Chips(1010));
    assert_eq!(stack(&table, &ids[1]), Chips(990));
    assert_eq!(table.pot_total(), Chips::ZERO);
    assert_eq!(table.chips_in_play(), Chips(3000));
    assert!(table
        .players()
        .filter(|p| p.player_id != ids[2])
        .all(|p| p.status == PlayerStatus::SittingOut));
    assert_eq!(
        table.player(&ids[2]).and_then(|p| p.last_action),
        Some(LastAction::Win)
    );
}

//
// ====================== ШОУДАУН ======================
//

#[test]
fn checked_down_hand_goes_to_showdown() {
    let (mut table, ids) = table_with_stacks(&[1000, 1000, 1000]);
    // Раздача: места 1, 2, 0 по кругу, затем флоп, тёрн, ривер.
    let deck = stacked_deck("Kc 7c Ah Kd 2d Ad 2h 5s 9c Jd 3h");
    let (mut hand, _) = start_hand(&mut table, deck, ready).expect("раздача");

    act(&mut table, &mut hand, ids[0], PlayerActionKind::Call);
    act(&mut table, &mut hand, ids[1], PlayerActionKind::Call);
    let status = act(&mut table, &mut hand, ids[2], PlayerActionKind::Check);
    assert_eq!(status, HandStatus::BettingClosed);

    for (street, board_len) in [(TableState::Flop, 3), (TableState::Turn, 4), (TableState::River, 5)] {
        let status = advance_street(&mut table, &mut hand).expect("следующая улица");
        assert_eq!(table.state, street);
        assert_eq!(table.board.len(), board_len);
        // Постфлоп первым ходит следующий после дилера.
        assert_eq!(status, HandStatus::AwaitingAction(ids[1]));
        assert_eq!(check_around(&mut table, &mut hand), HandStatus::BettingClosed);
    }

    let HandStatus::Finished(summary) = advance_street(&mut table, &mut hand).expect("шоудаун") else {
        panic!("после ривера - шоудаун");
    };

    assert!(summary.went_to_showdown);
    assert_eq!(summary.board, cards("2h 5s 9c Jd 3h"));
    assert_eq!(summary.won_by(ids[0]), Chips(60));
    assert_eq!(table.state, TableState::Showdown);
    assert_eq!(stack(&table, &ids[0]), Chips(1040));
    assert_eq!(table.chips_in_play(), Chips(3000));
    assert!(table.players().all(|p| p.reveal), "все дошли до вскрытия");

    let reveals = hand
        .history
        .since(0)
        .iter()
        .filter(|e| matches!(e.kind, HandEventKind::ShowdownReveal { .. }))
        .count();
    assert_eq!(reveals, 3);
}

#[test]
fn split_pot_on_board_tie() {
    let (mut table, ids) = table_with_stacks(&[1000, 1000]);
    // Хедз-ап: сначала место 1, затем 0. Оба играют стрит-флеш с борда.
    let deck = stacked_deck("2c 2d 3c 3d Ts Js Qs Ks As");
    let (mut hand, _) = start_hand(&mut table, deck, ready).expect("раздача");

    act(&mut table, &mut hand, ids[1], PlayerActionKind::Call);
    act(&mut table, &mut hand, ids[0], PlayerActionKind::Check);
    for _ in 0..3 {
        advance_street(&mut table, &mut hand).expect("улица");
        check_around(&mut table, &mut hand);
    }
    let HandStatus::Finished(summary) = advance_street(&mut table, &mut hand).expect("шоудаун") else {
        panic!("ожидали шоудаун");
    };

    assert_eq!(summary.won_by(ids[0]), Chips(20));
    assert_eq!(summary.won_by(ids[1]), Chips(20));
    assert_eq!(stack(&table, &ids[0]), Chips(1000));
    assert_eq!(stack(&table, &ids[1]), Chips(1000));
}

//
// ====================== ОЛЛ-ИН ======================
//

/// Стеки 100 / 300 / 300, все олл-ин префлоп.
/// Борд докладывается целиком, main 300 берёт AA, side 400 - KK.
#[test]
fn all_in_runout_with_side_pot() {
    let (mut table, ids) = table_with_stacks(&[100, 300, 300]);
    let deck = stacked_deck("Kc Qc Ah Kd Qd Ad 2h 5s 9c Jd 3h");
    let (mut hand, _) = start_hand(&mut table, deck, ready).expect("раздача");

    act(&mut table, &mut hand, ids[0], PlayerActionKind::Raise(Chips(100)));
    act(&mut table, &mut hand, ids[1], PlayerActionKind::Raise(Chips(290)));
    let status = act(&mut table, &mut hand, ids[2], PlayerActionKind::Call);
    assert_eq!(status, HandStatus::BettingClosed);
    assert_eq!(hand.side_pots.len(), 2);

    let HandStatus::Finished(summary) = advance_street(&mut table, &mut hand).expect("докладка") else {
        panic!("ходить некому - сразу шоудаун");
    };

    assert_eq!(table.board.len(), 5);
    assert_eq!(summary.total_pot, Chips(700));
    assert_eq!(stack(&table, &ids[0]), Chips(300));
    assert_eq!(stack(&table, &ids[1]), Chips(400));
    assert_eq!(stack(&table, &ids[2]), Chips::ZERO);
    assert_eq!(table.chips_in_play(), Chips(700));
}

#[test]
fn chips_are_conserved_across_hands() {
    let (mut table, ids) = table_with_stacks(&[500, 700, 900]);
    let total = table.chips_in_play();

    for n in 0..6u64 {
        let deck = Deck::shuffled(&mut DeterministicRng::from_seed(n));
        let (mut hand, mut status) = start_hand(&mut table, deck, ready).expect("раздача");
        loop {
            status = match status {
                HandStatus::AwaitingAction(id) => {
                    let to_call = table
                        .player(&id)
                        .map(|p| p.to_call(hand.betting.highest_bet))
                        .unwrap_or_default();
                    // Чётные раздачи - всё коллируем, нечётные - фолд на ставку.
                    let kind = if to_call.is_zero() {
                        PlayerActionKind::Check
                    } else if n % 2 == 0 {
                        PlayerActionKind::Call
                    } else {
                        PlayerActionKind::Fold
                    };
                    act(&mut table, &mut hand, id, kind)
                }
                HandStatus::BettingClosed => advance_street(&mut table, &mut hand).expect("улица"),
                HandStatus::Finished(_) => break,
            };
        }
        assert_eq!(table.chips_in_play(), total, "после раздачи {n} фишки не сходятся");
    }
    assert!(ids.iter().all(|id| table.player(id).is_some()));
}

/// Рейзы (полные и минимальные), олл-ины (в том числе короткие) и пассивная
/// игра вперемешку. После каждого действия в очереди только те, кто может
/// ходить; каждая улица закрывается за конечное число ходов.
#[test]
fn chips_are_conserved_with_raises_and_all_ins() {
    let (mut table, _) = table_with_stacks(&[300, 800, 1500, 2500, 450]);
    let total = table.chips_in_play();
    let mut step = 0u64;
    let mut raises = 0;
    let mut all_ins = 0;

    for n in 0..40u64 {
        let deck = Deck::shuffled(&mut DeterministicRng::from_seed(100 + n));
        let Ok((mut hand, mut status)) = start_hand(&mut table, deck, ready) else {
            break;
        };
        let mut actions_this_hand = 0;

        loop {
            status = match status {
                HandStatus::AwaitingAction(id) => {
                    actions_this_hand += 1;
                    assert!(actions_this_hand < 200, "раздача {n} не завершается");
                    step += 1;

                    let player = table.player(&id).expect("игрок на ходу за столом");
                    let legal = legal_actions(player, &hand.betting, table.state, true);
                    let stack_before = player.stack;
                    let aggressive = if legal.can_raise && step % 7 == 3 {
                        Some(legal.max_raise_size)
                    } else if legal.can_raise && step % 5 == 0 {
                        Some(legal.min_raise_size)
                    } else {
                        None
                    };

                    let raised = aggressive.and_then(|amount| {
                        apply_action(
                            &mut table,
                            &mut hand,
                            PlayerAction::manual(id, PlayerActionKind::Raise(amount)),
                        )
                        .ok()
                        .map(|st| (st, amount >= stack_before))
                    });

                    match raised {
                        Some((st, all_in)) => {
                            raises += 1;
                            if all_in {
                                all_ins += 1;
                            }
                            st
                        }
                        None => {
                            let kind = if legal.can_check {
                                PlayerActionKind::Check
                            } else if legal.can_call && step % 3 != 0 {
                                PlayerActionKind::Call
                            } else {
                                PlayerActionKind::Fold
                            };
                            act(&mut table, &mut hand, id, kind)
                        }
                    }
                }
                HandStatus::BettingClosed => advance_street(&mut table, &mut hand).expect("улица"),
                HandStatus::Finished(_) => break,
            };

            assert!(
                hand.betting
                    .pending
                    .iter()
                    .all(|id| table.player(id).is_some_and(|p| p.can_act())),
                "в очереди раздачи {n} игрок, который не может ходить"
            );
            assert!(
                table.players().all(|p| p.stack + p.total_committed <= total),
                "стек ушёл за пределы банка"
            );
        }
        assert_eq!(table.chips_in_play(), total, "после раздачи {n} фишки не сходятся");
    }

    assert!(raises > 0, "рейзы должны были случиться");
    assert!(all_ins > 0, "олл-ины должны были случиться");
}
