use core::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::card::Card;
use crate::domain::chips::Chips;
use crate::domain::{HandId, PlayerId, SeatIndex};

/// Состояние стола: ожидание или улица текущей раздачи.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TableState {
    #[default]
    Waiting,
    Preflop,
    Flop,
    Turn,
    River,
    Showdown,
}

impl TableState {
    /// Идёт раунд торговли.
    pub fn is_betting(self) -> bool {
        matches!(
            self,
            TableState::Preflop | TableState::Flop | TableState::Turn | TableState::River
        )
    }

    /// Можно начинать новую раздачу.
    pub fn is_idle(self) -> bool {
        matches!(self, TableState::Waiting | TableState::Showdown)
    }

    /// Следующая улица и сколько карт на неё сдать.
    pub fn next_street(self) -> Option<(TableState, usize)> {
        match self {
            TableState::Preflop => Some((TableState::Flop, 3)),
            TableState::Flop => Some((TableState::Turn, 1)),
            TableState::Turn => Some((TableState::River, 1)),
            _ => None,
        }
    }
}

impl fmt::Display for TableState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TableState::Waiting => "waiting",
            TableState::Preflop => "preflop",
            TableState::Flop => "flop",
            TableState::Turn => "turn",
            TableState::River => "river",
            TableState::Showdown => "showdown",
        };
        f.write_str(s)
    }
}

/// Ранг руки: упакованный u32, полностью упорядоченный (см. eval::hand_rank).
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct HandRank(pub u32);

/// Выплата одному игроку по итогам раздачи.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct PotAward {
    pub player_id: PlayerId,
    pub seat: SeatIndex,
    pub amount: Chips,
}

/// Краткое описание завершённой раздачи. Удобно для логов и тестов.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct HandSummary {
    pub hand_id: HandId,
    pub board: Vec<Card>,
    pub total_pot: Chips,
    pub awards: Vec<PotAward>,
    /// false - все, кроме одного, сфолдили.
    pub went_to_showdown: bool,
}

impl HandSummary {
    pub fn won_by(&self, player_id: PlayerId) -> Chips {
        self.awards
            .iter()
            .filter(|a| a.player_id == player_id)
            .map(|a| a.amount)
            .sum()
    }
}
