//! Модуль оценки силы покерных рук (Texas Hold'em).
//!
//! Основные функции:
//!   `best_hand_rank(cards) -> Option<HandRank>` – лучшая рука из 5–7 карт
//!   `evaluate_best_hand(hole, board)` – то же для hole + board

pub mod evaluator;
pub mod hand_rank;
pub mod lookup_tables;

pub use evaluator::{best_hand_rank, evaluate_best_hand, rank_five};
pub use hand_rank::{describe_hand, HandCategory};
