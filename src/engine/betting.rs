use serde::{Deserialize, Serialize};

use crate::domain::chips::Chips;
use crate::domain::{PlayerId, SeatIndex, Table};
use crate::engine::positions::{next_seat_from, seats_from};

/// Очередь игроков, которые ещё должны сделать действие на текущей улице.
///
/// Хранит только стабильные `PlayerId` в порядке мест. Сфолдившие,
/// олл-ин и не участвующие в раздаче сюда не попадают.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct PendingQueue {
    ids: Vec<PlayerId>,
}

impl PendingQueue {
    /// Очередь на новую улицу: все, кто может ходить, начиная с `first_to_act`.
    pub fn seed_from(table: &Table, first_to_act: SeatIndex) -> Self {
        let ids = seats_from(table, first_to_act, |p| p.can_act())
            .into_iter()
            .filter_map(|s| table.player_at(s).map(|p| p.player_id))
            .collect();
        Self { ids }
    }

    /// Перестройка после агрессии: все, кто может ходить, кроме агрессора,
    /// по кругу начиная с места после него.
    pub fn after_aggressor(table: &Table, aggressor_seat: SeatIndex) -> Self {
        let max = table.max_seats();
        if max == 0 {
            return Self::default();
        }
        let start = (aggressor_seat + 1) % max;
        let ids = seats_from(table, start, |p| p.can_act() && p.seat != aggressor_seat)
            .into_iter()
            .filter_map(|s| table.player_at(s).map(|p| p.player_id))
            .collect();
        Self { ids }
    }

    pub fn remove(&mut self, id: &PlayerId) {
        self.ids.retain(|p| p != id);
    }

    pub fn contains(&self, id: &PlayerId) -> bool {
        self.ids.contains(id)
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = &PlayerId> {
        self.ids.iter()
    }

    /// Первый из очереди по кругу после места `seat`.
    pub fn next_after(&self, table: &Table, seat: SeatIndex) -> Option<PlayerId> {
        let next = next_seat_from(table, seat, |p| self.ids.contains(&p.player_id))?;
        table.player_at(next).map(|p| p.player_id)
    }
}

/// Состояние раунда ставок (на конкретной улице).
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct BettingState {
    /// Максимальная ставка на улице.
    pub highest_bet: Chips,
    /// Размер последнего полного повышения. В начале улицы = BB.
    pub last_raise_size: Chips,
    /// Кто ещё должен походить.
    pub pending: PendingQueue,
    /// Последний агрессор на улице.
    pub last_aggressor: Option<PlayerId>,
    /// Кто уже походил после последнего полного рейза.
    acted_since_full_raise: Vec<PlayerId>,
    /// Кому короткий олл-ин закрыл рейз (только call/fold).
    raise_closed: Vec<PlayerId>,
}

impl BettingState {
    pub fn new(big_blind: Chips) -> Self {
        Self {
            highest_bet: Chips::ZERO,
            last_raise_size: big_blind,
            pending: PendingQueue::default(),
            last_aggressor: None,
            acted_since_full_raise: Vec::new(),
            raise_closed: Vec::new(),
        }
    }

    /// Сброс на новую улицу.
    pub fn start_street(&mut self, big_blind: Chips) {
        *self = Self::new(big_blind);
    }

    /// Минимальный raise_by для игрока, уже поставившего `bet_this_street`.
    pub fn min_raise_size(&self, bet_this_street: Chips) -> Chips {
        (self.highest_bet + self.last_raise_size).saturating_sub(bet_this_street)
    }

    pub fn is_raise_closed_for(&self, id: &PlayerId) -> bool {
        self.raise_closed.contains(id)
    }

    /// Игрок походил: убираем из очереди.
    pub fn mark_acted(&mut self, id: PlayerId) {
        self.pending.remove(&id);
        if !self.acted_since_full_raise.contains(&id) {
            self.acted_since_full_raise.push(id);
        }
    }

    /// Ставка игрока подняла `highest_bet` до `new_bet`.
    ///
    /// Полный рейз (прирост ≥ last_raise_size) открывает торговлю для всех.
    /// Короткий олл-ин тоже требует от остальных ответа, но тем, кто уже
    /// походил после последнего полного рейза, рейз закрыт.
    pub fn on_aggression(
        &mut self,
        table: &Table,
        aggressor: PlayerId,
        aggressor_seat: SeatIndex,
        new_bet: Chips,
    ) {
        let increment = new_bet.saturating_sub(self.highest_bet);
        let full_raise = increment >= self.last_raise_size;

        self.highest_bet = new_bet;
        self.last_raise_size = self.last_raise_size.max(increment);
        self.last_aggressor = Some(aggressor);
        self.pending = PendingQueue::after_aggressor(table, aggressor_seat);

        if full_raise {
            self.raise_closed.clear();
            self.acted_since_full_raise = vec![aggressor];
        } else {
            for id in &self.acted_since_full_raise {
                if *id != aggressor && !self.raise_closed.contains(id) {
                    self.raise_closed.push(*id);
                }
            }
        }
    }
}
