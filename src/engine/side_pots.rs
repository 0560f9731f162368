use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::hand::HandRank;
use crate::domain::{chips::Chips, PlayerId, SeatIndex};

/// Вклад одного игрока в банк раздачи.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Contribution {
    pub player_id: PlayerId,
    pub seat: SeatIndex,
    /// Всего внесено за раздачу.
    pub committed: Chips,
    pub folded: bool,
    /// Ранг руки; только у не сфолдивших на шоудауне.
    pub rank: Option<HandRank>,
}

/// Сайд-пот: часть банка, в которую участвуют только некоторые игроки.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct SidePot {
    pub amount: Chips,
    /// Кто может выиграть этот уровень (не сфолдившие участники).
    pub eligible: Vec<PlayerId>,
    /// Заполняется после шоудауна.
    pub winners: Vec<PlayerId>,
}

/// Результат расчёта шоудауна.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Settlement {
    pub pots: Vec<SidePot>,
    /// Итоговые выигрыши по игрокам (применяются к стекам после всех уровней).
    pub winnings: BTreeMap<PlayerId, Chips>,
}

impl Settlement {
    pub fn total(&self) -> Chips {
        self.winnings.values().sum()
    }

    pub fn won_by(&self, id: &PlayerId) -> Chips {
        self.winnings.get(id).copied().unwrap_or(Chips::ZERO)
    }
}

/// Один уровень банка и его участники (все, кто внёс не меньше уровня).
struct Tier<'a> {
    amount: Chips,
    participants: Vec<&'a Contribution>,
}

/// Снимаем уровни по возрастанию вкладов.
fn peel_tiers(contributions: &[Contribution]) -> Vec<Tier<'_>> {
    let mut entries: Vec<&Contribution> = contributions
        .iter()
        .filter(|c| !c.committed.is_zero())
        .collect();
    entries.sort_by_key(|c| (c.committed, c.seat));

    let mut tiers = Vec::new();
    let mut processed = Chips::ZERO;

    for (i, entry) in entries.iter().enumerate() {
        let level = entry.committed.saturating_sub(processed);
        if level.is_zero() {
            continue;
        }
        let participants = entries[i..].to_vec();
        tiers.push(Tier {
            amount: level.times(participants.len()),
            participants,
        });
        processed = entry.committed;
    }

    tiers
}

/// Посчитать сайд-поты из сумм, которые внесли игроки (для отображения).
///
/// Выход: список уровней от младших к старшим, победители пустые.
pub fn compute_side_pots(contributions: &[Contribution]) -> Vec<SidePot> {
    peel_tiers(contributions)
        .into_iter()
        .map(|tier| SidePot {
            amount: tier.amount,
            eligible: tier
                .participants
                .iter()
                .filter(|c| !c.folded)
                .map(|c| c.player_id)
                .collect(),
            winners: Vec::new(),
        })
        .collect()
}

/// Разыграть все уровни банка.
///
/// - уровень делят лучшие руки среди не сфолдивших участников;
/// - остаток от деления получает победитель с младшим местом;
/// - "мёртвый" уровень (все участники сфолдили) уходит победителям
///   предыдущего уровня, а если их нет - возвращается участникам.
pub fn settle(contributions: &[Contribution]) -> Settlement {
    let mut settlement = Settlement::default();
    let mut previous_winners: Vec<&Contribution> = Vec::new();

    for tier in peel_tiers(contributions) {
        let eligible: Vec<&Contribution> = tier
            .participants
            .iter()
            .copied()
            .filter(|c| !c.folded)
            .collect();

        let mut winners: Vec<&Contribution> = if eligible.is_empty() {
            previous_winners.clone()
        } else {
            let best = eligible.iter().map(|c| c.rank).max().flatten();
            eligible
                .iter()
                .copied()
                .filter(|c| c.rank == best)
                .collect()
        };

        if winners.is_empty() {
            // Некому отдать: возврат каждому его доли уровня.
            let mut refunded = tier.participants.clone();
            refunded.sort_by_key(|c| c.seat);
            let (share, remainder) = tier.amount.split(refunded.len());
            for (i, c) in refunded.iter().enumerate() {
                let amount = if i == 0 { share + remainder } else { share };
                *settlement.winnings.entry(c.player_id).or_insert(Chips::ZERO) += amount;
            }
            settlement.pots.push(SidePot {
                amount: tier.amount,
                eligible: Vec::new(),
                winners: Vec::new(),
            });
            continue;
        }

        winners.sort_by_key(|c| c.seat);
        let (share, remainder) = tier.amount.split(winners.len());
        for (i, w) in winners.iter().enumerate() {
            let mut amount = share;
            if i == 0 {
                amount += remainder;
            }
            *settlement.winnings.entry(w.player_id).or_insert(Chips::ZERO) += amount;
        }

        settlement.pots.push(SidePot {
            amount: tier.amount,
            eligible: eligible.iter().map(|c| c.player_id).collect(),
            winners: winners.iter().map(|c| c.player_id).collect(),
        });

        if !eligible.is_empty() {
            previous_winners = winners;
        }
    }

    settlement
}
