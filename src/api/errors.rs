use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::RoomCode;

/// Отказ в посадке за стол - единственная ошибка, которую видит клиент.
#[derive(Clone, Debug, Error, Serialize, Deserialize, PartialEq, Eq)]
pub enum Rejection {
    #[error("Room not found")]
    RoomNotFound(RoomCode),

    #[error("Table full")]
    TableFull,

    #[error("No free room codes")]
    NoFreeRoomCodes,
}

/// Ошибки разбора входящих сообщений. Клиенту не отправляются, только в лог.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Некорректный запрос: {0}")]
    BadRequest(String),

    #[error("Битый JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Соединение {0} не привязано ни к одной комнате")]
    NotBound(u64),
}
