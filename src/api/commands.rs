use serde::{Deserialize, Serialize};

use crate::api::errors::ApiError;
use crate::domain::chips::Chips;
use crate::domain::{PlayerId, RoomCode};
use crate::engine::actions::PlayerActionKind;

/// Входящее сообщение от клиента (одного соединения).
///
/// JSON: `{"type": "join", "payload": {"name": "...", "room": "1234"}}`.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", content = "payload", rename_all = "snake_case")]
pub enum ClientMessage {
    /// Сесть за стол существующей комнаты (или вернуться за него).
    Join {
        name: String,
        room: RoomCode,
        #[serde(default)]
        player_id: Option<PlayerId>,
    },

    /// Создать комнату и сразу сесть за стол.
    CreateRoom {
        name: String,
        #[serde(default)]
        player_id: Option<PlayerId>,
    },

    /// Действие в свой ход.
    Action {
        kind: ActionType,
        /// Для raise: сколько фишек добавить.
        #[serde(default)]
        amount: Option<Chips>,
    },

    /// Ответ на предложение ребая.
    RebuyResponse { accept: bool },

    /// Переслать текущее состояние (клиент вернулся на вкладку и т.п.).
    SyncRequest,
}

/// Тип действия в протоколе.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ActionType {
    Fold,
    Check,
    Call,
    Raise,
}

impl ClientMessage {
    /// Разобрать JSON-текст от транспорта.
    pub fn from_json(text: &str) -> Result<Self, ApiError> {
        serde_json::from_str(text).map_err(ApiError::from)
    }
}

/// Преобразовать тип + сумму в действие движка. Raise без суммы - ошибка.
pub fn to_action_kind(kind: ActionType, amount: Option<Chips>) -> Result<PlayerActionKind, ApiError> {
    match kind {
        ActionType::Fold => Ok(PlayerActionKind::Fold),
        ActionType::Check => Ok(PlayerActionKind::Check),
        ActionType::Call => Ok(PlayerActionKind::Call),
        ActionType::Raise => amount
            .map(PlayerActionKind::Raise)
            .ok_or_else(|| ApiError::BadRequest("raise без суммы".into())),
    }
}
