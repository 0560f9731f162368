//! Общие утилиты для интеграционных тестов poker-room.
#![allow(dead_code)]

use poker_room::api::{Envelope, ServerMessage};
use poker_room::config::EngineConfig;
use poker_room::domain::{
    card::Card,
    chips::Chips,
    deck::Deck,
    player::{PlayerAtTable, PlayerId},
    table::{Table, TableConfig},
    ConnectionId,
};
use poker_room::engine::{
    apply_action, HandEngine, HandStatus, PlayerAction, PlayerActionKind, RandomSource,
};

/// Карта из строки: `c("Ah")`.
pub fn c(s: &str) -> Card {
    s.parse().expect("некорректная карта в тесте")
}

/// Список карт через пробел: `cards("Ah Kd 7c")`.
pub fn cards(list: &str) -> Vec<Card> {
    list.split_whitespace().map(c).collect()
}

/// "Заряженная" колода: перечисленные карты выходят первыми и в этом порядке,
/// остальные лежат под ними.
pub struct StackedRng {
    order: Vec<Card>,
}

impl StackedRng {
    pub fn new(order: &str) -> Self {
        Self {
            order: cards(order),
        }
    }
}

impl RandomSource for StackedRng {
    fn shuffle(&mut self, deck: &mut [Card]) {
        let mut arranged: Vec<Card> = deck
            .iter()
            .copied()
            .filter(|card| !self.order.contains(card))
            .collect();
        // Верх колоды - последний элемент.
        arranged.extend(self.order.iter().rev().copied());
        deck.copy_from_slice(&arranged);
    }
}

pub fn stacked_deck(order: &str) -> Deck {
    Deck::shuffled(&mut StackedRng::new(order))
}

/// Стол со стандартным конфигом и игроками на местах 0..n.
/// Соединение игрока на месте i - `i + 1`.
pub fn table_with_stacks(stacks: &[u64]) -> (Table, Vec<PlayerId>) {
    let mut table = Table::new("1000".to_string(), TableConfig::standard());
    let mut ids = Vec::new();
    for (seat, &stack) in stacks.iter().enumerate() {
        let id = PlayerId::random();
        let player = PlayerAtTable::new(
            id,
            format!("p{seat}"),
            seat as u8,
            Chips(stack),
            Some(seat as ConnectionId + 1),
        );
        assert!(table.seat_player(player), "место {seat} должно быть свободно");
        ids.push(id);
    }
    (table, ids)
}

/// Кто готов к раздаче в движковых тестах.
pub fn ready(p: &PlayerAtTable) -> bool {
    p.connected && !p.stack.is_zero()
}

/// Ручное действие, которое обязано пройти.
pub fn act(table: &mut Table, hand: &mut HandEngine, id: PlayerId, kind: PlayerActionKind) -> HandStatus {
    apply_action(table, hand, PlayerAction::manual(id, kind))
        .unwrap_or_else(|e| panic!("действие {kind:?} должно пройти: {e}"))
}

/// Конфиг с короткими паузами.
pub fn test_config() -> EngineConfig {
    let mut cfg = EngineConfig::default();
    cfg.time.turn_timeout_ms = 1_000;
    cfg.time.street_delay_ms = 100;
    cfg.time.showdown_delay_ms = 200;
    cfg.time.next_hand_delay_ms = 300;
    cfg.time.room_idle_ms = 10_000;
    cfg
}

/// Все сообщения одному соединению.
pub fn messages_to(out: &[Envelope], conn: ConnectionId) -> Vec<ServerMessage> {
    out.iter()
        .filter(|e| e.to == conn)
        .map(|e| e.message.clone())
        .collect()
}
