use serde::{Deserialize, Serialize};

use crate::domain::card::Card;
use crate::domain::chips::Chips;
use crate::domain::hand::{HandRank, TableState};
use crate::domain::player::LastAction;
use crate::domain::{HandId, PlayerId, SeatIndex};
use crate::engine::actions::ActionOrigin;

/// Тип события в раздаче.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum HandEventKind {
    /// Новая раздача началась.
    HandStarted { hand_id: HandId, dealer: SeatIndex },

    /// Поставлен блайнд (`big = true` для BB).
    BlindPosted {
        player_id: PlayerId,
        amount: Chips,
        big: bool,
    },

    /// Игрок получил карманные карты.
    HoleCardsDealt { player_id: PlayerId },

    /// Открыты общие карты на борде.
    BoardDealt { street: TableState, cards: Vec<Card> },

    /// Действие игрока (ручное или авто).
    PlayerActed {
        player_id: PlayerId,
        action: LastAction,
        amount: Chips,
        origin: ActionOrigin,
    },

    /// Шоудаун – открытие карт.
    ShowdownReveal {
        player_id: PlayerId,
        hole_cards: Vec<Card>,
        rank: HandRank,
    },

    /// Выплата банка (уровня) одному или нескольким победителям.
    PotAwarded {
        player_ids: Vec<PlayerId>,
        amount: Chips,
    },

    /// Раздача завершена.
    HandFinished { hand_id: HandId },
}

/// Событие в раздаче с порядковым номером.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct HandEvent {
    pub index: u32,
    pub kind: HandEventKind,
}

/// Полная история раздачи.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct HandHistory {
    pub events: Vec<HandEvent>,
}

impl HandHistory {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn push(&mut self, kind: HandEventKind) {
        let idx = self.events.len() as u32;
        self.events.push(HandEvent { index: idx, kind });
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// События начиная с индекса `from` (для рассылки звуковых тегов).
    pub fn since(&self, from: usize) -> &[HandEvent] {
        self.events.get(from..).unwrap_or(&[])
    }
}
