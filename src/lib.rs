//! Многопользовательские комнаты техасского холдема.
//!
//! Слои:
//! - `domain` - карты, фишки, игроки, стол;
//! - `eval` - оценка лучшей пятикарточной руки;
//! - `engine` - ставки, улицы, сайд-поты, шоудаун;
//! - `time_ctrl` - часы и отменяемые таймеры;
//! - `session` - комнаты, посадка, ребай, реестр;
//! - `api` - JSON-протокол и снапшоты;
//! - `runtime` - tokio-таск лобби.

pub mod api;
pub mod config;
pub mod domain;
pub mod engine;
pub mod eval;
pub mod infra;
pub mod runtime;
pub mod session;
pub mod time_ctrl;

pub use config::{ConfigError, EngineConfig};
pub use runtime::{Inbound, Lobby, LobbyHandle};
pub use session::{Room, RoomRegistry};
