// src/time_ctrl/time_rules.rs
//! Конфигурация тайминга комнаты.
//!
//! Здесь описываем только "правила", без состояния и без привязки к конкретному столу.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Правила тайминга для одной комнаты. Все значения в миллисекундах.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct TimeRules {
    /// Сколько даётся на решение (каждый ход).
    pub turn_timeout_ms: u64,
    /// Пауза после закрытия улицы перед сдачей следующей.
    pub street_delay_ms: u64,
    /// Пауза после шоудауна перед предложением ребая.
    pub showdown_delay_ms: u64,
    /// Пауза перед следующей раздачей.
    pub next_hand_delay_ms: u64,
    /// Сколько комната может простоять без подключённых игроков.
    pub room_idle_ms: u64,
    /// Как часто проверять простаивающие комнаты.
    pub sweep_interval_ms: u64,
}

impl TimeRules {
    /// Стандартный профиль: 20 сек на ход, 1.5 сек между улицами,
    /// 3 сек до ребая, 5 сек до новой раздачи, 10 минут простоя.
    pub const fn standard() -> Self {
        Self {
            turn_timeout_ms: 20_000,
            street_delay_ms: 1_500,
            showdown_delay_ms: 3_000,
            next_hand_delay_ms: 5_000,
            room_idle_ms: 10 * 60 * 1_000,
            sweep_interval_ms: 60 * 1_000,
        }
    }

    pub fn sweep_interval(&self) -> Duration {
        Duration::from_millis(self.sweep_interval_ms)
    }
}

impl Default for TimeRules {
    fn default() -> Self {
        Self::standard()
    }
}
