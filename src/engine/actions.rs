use serde::{Deserialize, Serialize};

use crate::domain::{Chips, PlayerId};

/// Тип действия игрока.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum PlayerActionKind {
    Fold,
    Check,
    Call,
    /// Raise: сколько фишек игрок добавляет этим действием (raise_by).
    /// Bet на пустой улице - это тот же raise с highest_bet = 0.
    Raise(Chips),
}

/// Откуда пришло действие.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum ActionOrigin {
    /// Игрок прислал сам.
    Manual,
    /// Истёк таймер хода.
    Timeout,
    /// Игрок отключился, а стол настроен фолдить/чекать сразу.
    Disconnect,
}

impl ActionOrigin {
    pub fn is_auto(self) -> bool {
        self != ActionOrigin::Manual
    }
}

/// Конкретное действие игрока.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlayerAction {
    pub player_id: PlayerId,
    pub kind: PlayerActionKind,
    pub origin: ActionOrigin,
}

impl PlayerAction {
    pub fn manual(player_id: PlayerId, kind: PlayerActionKind) -> Self {
        Self {
            player_id,
            kind,
            origin: ActionOrigin::Manual,
        }
    }
}
