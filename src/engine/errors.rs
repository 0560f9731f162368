use crate::domain::{PlayerId, SeatIndex};

use thiserror::Error;

/// Ошибки движка покера.
///
/// Внутри раздачи ни одна из них не фатальна: комната логирует отказ,
/// оставляет состояние как есть и заново рассылает снапшот.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EngineError {
    #[error("Место {0} не существует за столом")]
    InvalidSeat(SeatIndex),

    #[error("Игрок {0} не найден за столом")]
    PlayerNotAtTable(PlayerId),

    #[error("Недостаточно готовых игроков для раздачи")]
    NotEnoughPlayers,

    #[error("Раздача уже идёт")]
    HandAlreadyInProgress,

    #[error("Раздача не активна")]
    NoActiveHand,

    #[error("Сейчас не ход игрока с id={0}")]
    NotPlayersTurn(PlayerId),

    #[error("Недопустимое действие в текущем состоянии раздачи")]
    IllegalAction,

    #[error("Размер рейза слишком мал: нужно минимум {min}, передано {got}")]
    RaiseTooSmall { min: u64, got: u64 },

    #[error("Рейз закрыт: после короткого олл-ина можно только уравнять или сбросить")]
    RaiseClosed,

    #[error("Невозможно выполнить check – нужно хотя бы уравнять ставку")]
    CannotCheck,

    #[error("Невозможно выполнить call – нет ставки для уравнивания")]
    CannotCall,

    #[error("Колода закончилась")]
    DeckExhausted,

    #[error("Внутренняя ошибка: {0}")]
    Internal(&'static str),
}
