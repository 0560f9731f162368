use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::card::Card;
use crate::domain::chips::Chips;
use crate::domain::hand::TableState;
use crate::domain::player::LastAction;
use crate::domain::{ConnectionId, HandId, PlayerId, RoomCode, SeatIndex};
use crate::engine::validation::LegalActions;

/// Публичное представление игрока в снапшоте.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlayerSnapshot {
    pub player_id: PlayerId,
    pub name: String,
    pub seat: SeatIndex,
    pub chips: Chips,
    pub bet_this_street: Chips,
    pub total_committed: Chips,
    pub in_hand: bool,
    pub folded: bool,
    pub all_in: bool,
    pub connected: bool,
    pub waiting: bool,
    pub last_action: Option<LastAction>,
    pub last_amount: Chips,
    /// Карты - только на шоудауне / при принудительном раскрытии.
    pub hole: Option<Vec<Card>>,
    /// Сколько игрок может выиграть по текущим сайд-потам.
    pub potential_winnings: Chips,
}

/// Полный снапшот стола для всех.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct TableSnapshot {
    pub room: RoomCode,
    pub players: Vec<PlayerSnapshot>,
    pub community: Vec<Card>,
    pub dealer_seat: Option<SeatIndex>,
    pub state: TableState,
    pub current_to_act: Option<PlayerId>,
    pub highest_bet: Chips,
    pub last_raise_size: Chips,
    pub hand_id: HandId,
    pub pot_total: Chips,
    /// Дедлайн хода (мс эпохи), для отрисовки обратного отсчёта.
    pub act_deadline: Option<u64>,
    /// Время сервера (мс эпохи), для калибровки часов клиента.
    pub server_timestamp: u64,
}

/// Семантический тег события для звука/анимации.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SoundKind {
    Fold,
    Check,
    Bet,
    Win,
    Deal,
}

/// Исходящее сообщение клиенту.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", content = "payload", rename_all = "snake_case")]
pub enum ServerMessage {
    RoomCreated {
        code: RoomCode,
    },
    Joined {
        seat: SeatIndex,
        chips: Chips,
        waiting: bool,
        room: RoomCode,
        player_id: PlayerId,
    },
    Rejected {
        reason: String,
    },
    State(TableSnapshot),
    Hole {
        cards: Vec<Card>,
    },
    Actions(LegalActions),
    ShowdownHoles {
        holes: BTreeMap<PlayerId, Vec<Card>>,
    },
    Sound {
        kind: SoundKind,
        player_ids: Vec<PlayerId>,
    },
    RebuyRequest {
        amount: Chips,
    },
    RebuyResult {
        accepted: bool,
        amount: Option<Chips>,
    },
    /// Соединение заменено более новым для той же идентичности.
    Superseded,
}

impl ServerMessage {
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// Сообщение с адресатом.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Envelope {
    pub to: ConnectionId,
    pub message: ServerMessage,
}

impl Envelope {
    pub fn new(to: ConnectionId, message: ServerMessage) -> Self {
        Self { to, message }
    }
}
