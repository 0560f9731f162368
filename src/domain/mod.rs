//! Доменная модель покерной комнаты: карты, колода, фишки, игроки, стол.

pub mod card;
pub mod chips;
pub mod deck;
pub mod hand;
pub mod player;
pub mod table;

/// Номер раздачи внутри комнаты.
pub type HandId = u64;
/// Транспортный идентификатор соединения. Выдаётся транспортом и может
/// смениться при переподключении, в отличие от `PlayerId`.
pub type ConnectionId = u64;
/// Код комнаты (4 цифры).
pub type RoomCode = String;

// Удобные реэкспорты, чтобы в других модулях писать crate::domain::Card и т.п.
pub use card::*;
pub use chips::*;
pub use deck::*;
pub use hand::*;
pub use player::*;
pub use table::*;
