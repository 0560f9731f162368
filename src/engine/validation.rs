use serde::{Deserialize, Serialize};

use crate::domain::chips::Chips;
use crate::domain::hand::TableState;
use crate::domain::player::PlayerAtTable;
use crate::engine::actions::PlayerActionKind;
use crate::engine::betting::BettingState;
use crate::engine::errors::EngineError;

/// Действие после проверки: сколько реально вносить.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ValidatedAction {
    Fold,
    Check,
    Call { pay: Chips },
    /// `all_in` - платёж равен всему стеку.
    Raise { pay: Chips, all_in: bool },
}

/// Проверка, может ли игрок выполнить это действие при текущем состоянии ставок.
pub fn validate_action(
    player: &PlayerAtTable,
    action: &PlayerActionKind,
    betting: &BettingState,
) -> Result<ValidatedAction, EngineError> {
    if !player.can_act() {
        return Err(EngineError::IllegalAction);
    }

    let stack = player.stack;
    let to_call = player.to_call(betting.highest_bet);

    match action {
        PlayerActionKind::Fold => Ok(ValidatedAction::Fold),

        PlayerActionKind::Check => {
            if to_call.is_zero() {
                Ok(ValidatedAction::Check)
            } else {
                Err(EngineError::CannotCheck)
            }
        }

        PlayerActionKind::Call => {
            if to_call.is_zero() {
                Err(EngineError::CannotCall)
            } else {
                // Не хватает на колл - это олл-ин колл.
                Ok(ValidatedAction::Call {
                    pay: to_call.min(stack),
                })
            }
        }

        PlayerActionKind::Raise(raise_by) => {
            if raise_by.is_zero() {
                return Err(EngineError::IllegalAction);
            }
            if betting.is_raise_closed_for(&player.player_id) {
                return Err(EngineError::RaiseClosed);
            }

            // Всё, что не меньше стека, - олл-ин на весь стек.
            if *raise_by >= stack {
                return Ok(ValidatedAction::Raise {
                    pay: stack,
                    all_in: true,
                });
            }

            let min = betting.min_raise_size(player.bet_this_street);
            if *raise_by < min {
                return Err(EngineError::RaiseTooSmall {
                    min: min.0,
                    got: raise_by.0,
                });
            }

            Ok(ValidatedAction::Raise {
                pay: *raise_by,
                all_in: false,
            })
        }
    }
}

/// Набор допустимых действий для конкретного игрока (приватное сообщение `actions`).
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct LegalActions {
    pub your_turn: bool,
    pub can_check: bool,
    pub can_call: bool,
    pub can_fold: bool,
    pub can_raise: bool,
    pub to_call: Chips,
    /// Минимальный raise_by (фишек за это действие).
    pub min_raise_size: Chips,
    /// До какой суммы на улице поднимается ставка при минимальном рейзе.
    pub min_raise_to: Chips,
    /// Максимальный raise_by = весь стек.
    pub max_raise_size: Chips,
    pub max_raise_to: Chips,
    pub chips: Chips,
    pub state: TableState,
}

impl LegalActions {
    /// Не твой ход: только стек и состояние.
    pub fn idle(chips: Chips, state: TableState) -> Self {
        Self {
            chips,
            state,
            ..Self::default()
        }
    }
}

/// Вычислить допустимые действия. `is_turn` - игрок сейчас текущий.
pub fn legal_actions(
    player: &PlayerAtTable,
    betting: &BettingState,
    state: TableState,
    is_turn: bool,
) -> LegalActions {
    if !is_turn || !state.is_betting() || !player.can_act() {
        return LegalActions::idle(player.stack, state);
    }

    let stack = player.stack;
    let to_call = player.to_call(betting.highest_bet);
    let min_raise_size = betting.min_raise_size(player.bet_this_street);
    // Рейз возможен, если после колла что-то остаётся.
    let can_raise = stack > to_call && !betting.is_raise_closed_for(&player.player_id);

    LegalActions {
        your_turn: true,
        can_check: to_call.is_zero(),
        can_call: !to_call.is_zero(),
        can_fold: true,
        can_raise,
        to_call: to_call.min(stack),
        min_raise_size: min_raise_size.min(stack),
        min_raise_to: player.bet_this_street + min_raise_size.min(stack),
        max_raise_size: stack,
        max_raise_to: player.bet_this_street + stack,
        chips: stack,
        state,
    }
}
