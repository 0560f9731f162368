//! Tokio-рантайм лобби: каналы входящих/исходящих и таймеры комнат.

pub mod lobby;

pub use lobby::{Inbound, Lobby, LobbyHandle};
