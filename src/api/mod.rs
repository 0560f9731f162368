//! Внешний протокол покерной комнаты.
//!
//! Здесь описываются:
//! - входящие сообщения (commands.rs);
//! - исходящие сообщения и DTO (dto.rs);
//! - построение снапшотов только для чтения (queries.rs);
//! - ошибки и отказы (errors.rs).

pub mod commands;
pub mod dto;
pub mod errors;
pub mod queries;

pub use commands::*;
pub use dto::*;
pub use errors::*;
pub use queries::*;
