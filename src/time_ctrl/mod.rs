// src/time_ctrl/mod.rs
//! Контроль времени комнаты.
//!
//! Здесь собираем:
//! - правила (`TimeRules`);
//! - источник времени (`Clock`, `SystemClock`, `ManualClock`);
//! - отменяемые таймеры (`Scheduler`).

pub mod clock;
pub mod scheduler;
pub mod time_rules;

pub use clock::{Clock, ManualClock, SystemClock};
pub use scheduler::{Scheduler, TimerHandle, TimerKind, TimerSlot};
pub use time_rules::TimeRules;
