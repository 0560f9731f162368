//! Комнаты и их реестр.
//!
//! - `room` - стол, раздача, таймеры и рассылка одной комнаты;
//! - `identity` - посадка и возвращение игроков;
//! - `rebuy` - предложения ребая после раздачи;
//! - `registry` - коды комнат и привязка соединений.

pub mod identity;
pub mod rebuy;
pub mod registry;
pub mod room;

pub use identity::{free_seat, unique_name, JoinOutcome, Seating};
pub use rebuy::RebuyOutcome;
pub use registry::{Binding, RngFactory, RoomRegistry, ROOM_CODE_SPACE};
pub use room::Room;
