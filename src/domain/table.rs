use serde::{Deserialize, Serialize};

use crate::domain::card::Card;
use crate::domain::chips::Chips;
use crate::domain::hand::TableState;
use crate::domain::player::{PlayerAtTable, PlayerId};
use crate::domain::{HandId, RoomCode};

/// Индекс места за столом (0..max_seats-1).
pub type SeatIndex = u8;

/// Максимум мест за одним столом.
pub const MAX_SEATS: u8 = 6;

/// Стейки стола (SB/BB).
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct TableStakes {
    pub small_blind: Chips,
    pub big_blind: Chips,
}

impl TableStakes {
    pub fn new(sb: Chips, bb: Chips) -> Self {
        Self {
            small_blind: sb,
            big_blind: bb,
        }
    }
}

impl Default for TableStakes {
    fn default() -> Self {
        Self::new(Chips(10), Chips(20))
    }
}

/// Конфиг стола: количество мест, блайнды, стартовый стек, размер ребая.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct TableConfig {
    pub max_seats: u8,
    pub stakes: TableStakes,
    pub starting_stack: Chips,
    /// Ребай в больших блайндах.
    pub rebuy_big_blinds: u64,
}

impl TableConfig {
    /// Стандартный стол: 6 мест, 10/20, стек 2000, ребай 100 BB.
    pub fn standard() -> Self {
        Self {
            max_seats: MAX_SEATS,
            stakes: TableStakes::default(),
            starting_stack: Chips(2000),
            rebuy_big_blinds: 100,
        }
    }

    pub fn rebuy_amount(&self) -> Chips {
        self.stakes.big_blind.times(self.rebuy_big_blinds as usize)
    }
}

impl Default for TableConfig {
    fn default() -> Self {
        Self::standard()
    }
}

/// Основное состояние стола (одна комната).
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Table {
    pub code: RoomCode,
    pub config: TableConfig,

    /// Места за столом: индекс вектора = SeatIndex.
    /// None – место пустое.
    pub seats: Vec<Option<PlayerAtTable>>,

    /// Общие карты борда (0–5 карт), внутри раздачи только дописываются.
    pub board: Vec<Card>,

    pub state: TableState,

    /// Место дилера или None, если раздач ещё не было.
    pub dealer_button: Option<SeatIndex>,

    /// Номер последней начатой раздачи.
    pub hand_id: HandId,
}

impl Table {
    /// Создать пустой стол с заданной конфигурацией.
    pub fn new(code: RoomCode, config: TableConfig) -> Self {
        let seats = vec![None; config.max_seats as usize];
        Self {
            code,
            config,
            seats,
            board: Vec::new(),
            state: TableState::Waiting,
            dealer_button: None,
            hand_id: 0,
        }
    }

    pub fn max_seats(&self) -> u8 {
        self.config.max_seats
    }

    pub fn seated_count(&self) -> usize {
        self.seats.iter().filter(|s| s.is_some()).count()
    }

    pub fn is_seat_empty(&self, index: SeatIndex) -> bool {
        self.seats
            .get(index as usize)
            .map(|s| s.is_none())
            .unwrap_or(true)
    }

    /// Игроки в порядке мест.
    pub fn players(&self) -> impl Iterator<Item = &PlayerAtTable> {
        self.seats.iter().flatten()
    }

    pub fn players_mut(&mut self) -> impl Iterator<Item = &mut PlayerAtTable> {
        self.seats.iter_mut().flatten()
    }

    pub fn player(&self, id: &PlayerId) -> Option<&PlayerAtTable> {
        self.players().find(|p| p.player_id == *id)
    }

    pub fn player_mut(&mut self, id: &PlayerId) -> Option<&mut PlayerAtTable> {
        self.players_mut().find(|p| p.player_id == *id)
    }

    pub fn player_at(&self, seat: SeatIndex) -> Option<&PlayerAtTable> {
        self.seats.get(seat as usize).and_then(|s| s.as_ref())
    }

    /// Посадить игрока на его место. Место должно быть свободно.
    pub fn seat_player(&mut self, player: PlayerAtTable) -> bool {
        match self.seats.get_mut(player.seat as usize) {
            Some(slot) if slot.is_none() => {
                *slot = Some(player);
                true
            }
            _ => false,
        }
    }

    /// Убрать игрока со стола.
    pub fn remove_player(&mut self, id: &PlayerId) -> Option<PlayerAtTable> {
        self.seats
            .iter_mut()
            .find(|s| s.as_ref().is_some_and(|p| p.player_id == *id))
            .and_then(Option::take)
    }

    /// Сколько игроков ещё борются за банк.
    pub fn contesting_count(&self) -> usize {
        self.players().filter(|p| p.is_contesting()).count()
    }

    /// Сколько игроков ещё могут добровольно действовать.
    pub fn can_act_count(&self) -> usize {
        self.players().filter(|p| p.can_act()).count()
    }

    pub fn connected_count(&self) -> usize {
        self.players().filter(|p| p.connected).count()
    }

    /// Сумма всего внесённого в текущей раздаче.
    pub fn pot_total(&self) -> Chips {
        self.players().map(|p| p.total_committed).sum()
    }

    /// Все фишки стола: стеки + внесённое в банк.
    pub fn chips_in_play(&self) -> Chips {
        self.players().map(|p| p.stack + p.total_committed).sum()
    }
}
