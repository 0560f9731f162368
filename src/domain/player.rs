use core::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::card::Card;
use crate::domain::chips::Chips;
use crate::domain::{ConnectionId, SeatIndex};

/// Стабильная идентичность игрока. Переживает переподключения,
/// в отличие от `ConnectionId`.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(transparent)]
pub struct PlayerId(pub Uuid);

impl PlayerId {
    pub fn random() -> Self {
        PlayerId(Uuid::new_v4())
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for PlayerId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(PlayerId)
    }
}

/// Статус игрока в контексте текущей раздачи.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum PlayerStatus {
    /// Сидит за столом, но в раздаче не участвует.
    SittingOut,
    /// Активен в текущей раздаче и может ходить.
    Active,
    /// Сфолдил: фишки остались в банке, претендовать на них не может.
    Folded,
    /// В олл-ине: больше не ходит, но борется за банк.
    AllIn,
}

/// Последнее действие игрока - только для отображения.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum LastAction {
    #[serde(rename = "JOIN")]
    Joined,
    #[serde(rename = "SB")]
    SmallBlind,
    #[serde(rename = "BB")]
    BigBlind,
    Fold,
    Check,
    Call,
    Raise,
    #[serde(rename = "All-In")]
    AllIn,
    #[serde(rename = "Check (auto)")]
    AutoCheck,
    #[serde(rename = "Fold (auto)")]
    AutoFold,
    #[serde(rename = "WIN")]
    Win,
}

impl fmt::Display for LastAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            LastAction::Joined => "JOIN",
            LastAction::SmallBlind => "SB",
            LastAction::BigBlind => "BB",
            LastAction::Fold => "Fold",
            LastAction::Check => "Check",
            LastAction::Call => "Call",
            LastAction::Raise => "Raise",
            LastAction::AllIn => "All-In",
            LastAction::AutoCheck => "Check (auto)",
            LastAction::AutoFold => "Fold (auto)",
            LastAction::Win => "WIN",
        };
        f.write_str(label)
    }
}

/// Состояние игрока за конкретным столом.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlayerAtTable {
    pub player_id: PlayerId,
    pub name: String,
    pub seat: SeatIndex,
    /// Текущее транспортное соединение. Меняется при переподключениях.
    pub connection: Option<ConnectionId>,
    /// Текущий стек за столом.
    pub stack: Chips,
    /// Карманные карты (0 или 2).
    pub hole_cards: Vec<Card>,
    /// Ставка на текущей улице.
    pub bet_this_street: Chips,
    /// Всего внесено в банк за раздачу.
    pub total_committed: Chips,
    pub status: PlayerStatus,
    pub connected: bool,
    /// Ждёт следующей раздачи (переподключился посреди руки / решает ребай).
    pub waiting: bool,
    pub last_action: Option<LastAction>,
    pub last_amount: Chips,
    /// Карты открыты всем.
    pub reveal: bool,
}

impl PlayerAtTable {
    pub fn new(
        player_id: PlayerId,
        name: impl Into<String>,
        seat: SeatIndex,
        stack: Chips,
        connection: Option<ConnectionId>,
    ) -> Self {
        Self {
            player_id,
            name: name.into(),
            seat,
            connected: connection.is_some(),
            connection,
            stack,
            hole_cards: Vec::new(),
            bet_this_street: Chips::ZERO,
            total_committed: Chips::ZERO,
            status: PlayerStatus::SittingOut,
            waiting: false,
            last_action: Some(LastAction::Joined),
            last_amount: Chips::ZERO,
            reveal: false,
        }
    }

    /// Участвует в раздаче (в т.ч. сфолдивший).
    pub fn is_in_hand(&self) -> bool {
        self.status != PlayerStatus::SittingOut
    }

    /// Ещё борется за банк.
    pub fn is_contesting(&self) -> bool {
        matches!(self.status, PlayerStatus::Active | PlayerStatus::AllIn)
    }

    /// Может добровольно действовать.
    pub fn can_act(&self) -> bool {
        self.status == PlayerStatus::Active
    }

    pub fn is_folded(&self) -> bool {
        matches!(self.status, PlayerStatus::Folded | PlayerStatus::SittingOut)
    }

    pub fn is_all_in(&self) -> bool {
        self.status == PlayerStatus::AllIn
    }

    /// Сколько нужно доставить до `highest_bet`.
    pub fn to_call(&self, highest_bet: Chips) -> Chips {
        highest_bet.saturating_sub(self.bet_this_street)
    }

    /// Переложить фишки из стека в ставку. Больше стека снять нельзя:
    /// при обнулении стека игрок уходит в олл-ин. Возвращает реально внесённое.
    pub fn commit(&mut self, amount: Chips) -> Chips {
        let paid = amount.min(self.stack);
        self.stack -= paid;
        self.bet_this_street += paid;
        self.total_committed += paid;
        if self.stack.is_zero() && self.is_in_hand() {
            self.status = PlayerStatus::AllIn;
        }
        paid
    }

    /// Подготовка к новой раздаче.
    pub fn reset_for_hand(&mut self) {
        self.hole_cards.clear();
        self.bet_this_street = Chips::ZERO;
        self.total_committed = Chips::ZERO;
        self.status = PlayerStatus::Active;
        self.waiting = false;
        self.last_action = None;
        self.last_amount = Chips::ZERO;
        self.reveal = false;
    }

    /// Пропускает раздачу.
    pub fn sit_out(&mut self) {
        self.hole_cards.clear();
        self.bet_this_street = Chips::ZERO;
        self.total_committed = Chips::ZERO;
        self.status = PlayerStatus::SittingOut;
        self.reveal = false;
    }
}
