//! Конфигурация движка: стол, тайминги, поведение при отключении.
//!
//! Источники (по возрастанию приоритета): значения по умолчанию,
//! JSON-файл из `POKER_ROOM_CONFIG`, отдельные переменные окружения.

use std::env;
use std::fs;

use log::info;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::table::TableConfig;
use crate::time_ctrl::TimeRules;

/// Путь к JSON-конфигу.
pub const CONFIG_PATH_ENV: &str = "POKER_ROOM_CONFIG";
/// Переопределение таймаута хода, мс.
pub const TURN_MS_ENV: &str = "POKER_ROOM_TURN_MS";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Не удалось прочитать конфиг {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Некорректный JSON конфига: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Некорректное значение {name}: {value:?}")]
    BadEnv { name: &'static str, value: String },

    #[error("Некорректная конфигурация: {0}")]
    Invalid(String),
}

/// Полная конфигурация движка.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct EngineConfig {
    pub table: TableConfig,
    pub time: TimeRules,
    /// Если true - отключившийся текущий игрок сразу получает авто-действие,
    /// не дожидаясь таймера.
    pub fold_on_disconnect: bool,
}

impl EngineConfig {
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let cfg: EngineConfig = serde_json::from_str(text)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Загрузить из окружения. Без переменных - стандартный конфиг.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut cfg = match env::var(CONFIG_PATH_ENV) {
            Ok(path) => {
                let text = fs::read_to_string(&path).map_err(|source| ConfigError::Io {
                    path: path.clone(),
                    source,
                })?;
                info!("конфиг загружен из {path}");
                serde_json::from_str(&text)?
            }
            Err(_) => EngineConfig::default(),
        };

        if let Ok(value) = env::var(TURN_MS_ENV) {
            cfg.time.turn_timeout_ms = value.trim().parse().map_err(|_| ConfigError::BadEnv {
                name: TURN_MS_ENV,
                value: value.clone(),
            })?;
        }

        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let t = &self.table;
        if !(2..=10).contains(&t.max_seats) {
            return Err(ConfigError::Invalid(format!(
                "max_seats должен быть от 2 до 10, получено {}",
                t.max_seats
            )));
        }
        if t.stakes.small_blind.is_zero() || t.stakes.big_blind < t.stakes.small_blind {
            return Err(ConfigError::Invalid(
                "блайнды: нужно 0 < small_blind <= big_blind".into(),
            ));
        }
        if t.starting_stack.is_zero() {
            return Err(ConfigError::Invalid("стартовый стек не может быть нулевым".into()));
        }
        if self.time.turn_timeout_ms == 0 {
            return Err(ConfigError::Invalid("turn_timeout_ms не может быть нулевым".into()));
        }
        if self.time.sweep_interval_ms == 0 {
            return Err(ConfigError::Invalid("sweep_interval_ms не может быть нулевым".into()));
        }
        Ok(())
    }
}
