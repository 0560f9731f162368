//! Покерный движок: ставки, переход улиц, сайд-поты, шоудаун.
//!
//! Высокоуровневый объект: `HandEngine`
//! Основные операции:
//!   - `start_hand` – запустить новую раздачу
//!   - `apply_action` – применить действие игрока (ручное или по таймауту)
//!   - `advance_street` – переход улицы после паузы / шоудаун

pub mod actions;
pub mod betting;
pub mod errors;
pub mod game_loop;
pub mod hand_history;
pub mod positions;
pub mod side_pots;
pub mod validation;

use crate::domain::card::Card;

pub use actions::{ActionOrigin, PlayerAction, PlayerActionKind};
pub use betting::{BettingState, PendingQueue};
pub use errors::EngineError;
pub use game_loop::{
    advance_street, apply_action, end_hand_single_winner, go_showdown, start_hand,
    timeout_action, HandEngine, HandStatus,
};
pub use hand_history::{HandEvent, HandEventKind, HandHistory};
pub use side_pots::{compute_side_pots, settle, Contribution, Settlement, SidePot};
pub use validation::{legal_actions, validate_action, LegalActions, ValidatedAction};

/// Источник случайности для тасовки колоды.
/// Реализации - в infra::rng; тесты могут подставить "заряженную" колоду.
pub trait RandomSource: Send {
    fn shuffle(&mut self, cards: &mut [Card]);
}
