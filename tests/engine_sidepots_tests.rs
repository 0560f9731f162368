//! Side pot / settle тесты.
//!
//! Проверяем:
//! - уровни банка по вкладам (100 / 300 / 300);
//! - мёртвые деньги сфолдивших;
//! - делёж при ничьей и нечётная фишка младшему месту;
//! - сохранение фишек.

use poker_room::domain::{chips::Chips, hand::HandRank, PlayerId, SeatIndex};
use poker_room::engine::side_pots::{compute_side_pots, settle, Contribution};

fn contrib(seat: SeatIndex, committed: u64, folded: bool, rank: Option<u32>) -> Contribution {
    Contribution {
        player_id: PlayerId::random(),
        seat,
        committed: Chips(committed),
        folded,
        rank: rank.map(HandRank),
    }
}

fn total_committed(cs: &[Contribution]) -> Chips {
    cs.iter().map(|c| c.committed).sum()
}

//
// ====================== УРОВНИ ======================
//

/// Вклады 100 / 300 / 300: main 300 на троих, side 400 на двоих.
#[test]
fn tiers_for_100_300_300() {
    let cs = vec![
        contrib(0, 100, false, None),
        contrib(1, 300, false, None),
        contrib(2, 300, false, None),
    ];

    let pots = compute_side_pots(&cs);

    assert_eq!(pots.len(), 2, "ожидаем main + один side pot");
    assert_eq!(pots[0].amount, Chips(300));
    assert_eq!(pots[0].eligible.len(), 3);
    assert_eq!(pots[1].amount, Chips(400));
    assert_eq!(pots[1].eligible, vec![cs[1].player_id, cs[2].player_id]);
}

#[test]
fn folded_chips_stay_in_pot_but_not_eligible() {
    let cs = vec![
        contrib(0, 50, true, None),
        contrib(1, 200, false, None),
        contrib(2, 200, false, None),
    ];

    let pots = compute_side_pots(&cs);
    let total: Chips = pots.iter().map(|p| p.amount).sum();

    assert_eq!(total, Chips(450));
    assert!(pots.iter().all(|p| !p.eligible.contains(&cs[0].player_id)));
}

//
// ====================== РАСЧЁТ ======================
//

/// Короткий стек с лучшей рукой берёт main, второй по силе - side.
#[test]
fn short_stack_wins_main_second_best_wins_side() {
    let cs = vec![
        contrib(0, 100, false, Some(900)),
        contrib(1, 300, false, Some(500)),
        contrib(2, 300, false, Some(400)),
    ];

    let s = settle(&cs);

    assert_eq!(s.won_by(&cs[0].player_id), Chips(300));
    assert_eq!(s.won_by(&cs[1].player_id), Chips(400));
    assert_eq!(s.won_by(&cs[2].player_id), Chips::ZERO);
    assert_eq!(s.total(), total_committed(&cs));
}

#[test]
fn tie_splits_and_odd_chip_goes_to_lowest_seat() {
    let cs = vec![
        contrib(4, 51, false, Some(700)),
        contrib(1, 50, false, Some(700)),
        contrib(2, 50, true, None),
    ];

    let s = settle(&cs);

    // Уровень 50×3 = 150 делят места 1 и 4, уровень 1 достаётся месту 4.
    assert_eq!(s.won_by(&cs[1].player_id), Chips(75));
    assert_eq!(s.won_by(&cs[0].player_id), Chips(76));
    assert_eq!(s.total(), total_committed(&cs));

    let odd = vec![
        contrib(3, 35, false, Some(100)),
        contrib(0, 35, false, Some(100)),
        contrib(5, 35, false, Some(100)),
        contrib(1, 5, true, None),
    ];
    let s = settle(&odd);
    // Нижний уровень 20 на троих не делится: остаток 2 месту 0.
    assert_eq!(s.won_by(&odd[1].player_id), Chips(38));
    assert_eq!(s.won_by(&odd[0].player_id), Chips(36));
    assert_eq!(s.won_by(&odd[2].player_id), Chips(36));
    assert_eq!(s.total(), total_committed(&odd));
}

/// Все, кто дошёл до верхнего уровня, сфолдили: уровень уходит
/// победителю предыдущего.
#[test]
fn dead_tier_goes_to_previous_winner() {
    let cs = vec![
        contrib(0, 100, false, Some(300)),
        contrib(1, 250, true, None),
    ];

    let s = settle(&cs);

    assert_eq!(s.won_by(&cs[0].player_id), Chips(350));
    assert_eq!(s.total(), Chips(350));
}

#[test]
fn settle_conserves_chips_with_many_levels() {
    let cs = vec![
        contrib(0, 20, false, Some(10)),
        contrib(1, 75, false, Some(30)),
        contrib(2, 75, true, None),
        contrib(3, 400, false, Some(20)),
        contrib(4, 999, false, Some(5)),
    ];

    let s = settle(&cs);

    assert_eq!(s.total(), total_committed(&cs), "фишки не теряются");
    assert!(s.pots.iter().all(|p| p.amount > Chips::ZERO));
}
