// src/time_ctrl/scheduler.rs
//! Отложенные события комнаты: дедлайн хода, пауза между улицами,
//! предложение ребая, следующая раздача.
//!
//! На каждый слот - не больше одного живого таймера. Новое планирование
//! в занятый слот отменяет старый таймер.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::PlayerId;

/// Слот таймера.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TimerSlot {
    Turn,
    Street,
    RebuyPrompt,
    NextHand,
}

/// Что произойдёт при срабатывании.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum TimerKind {
    /// Игрок не успел сходить.
    TurnDeadline { player_id: PlayerId },
    /// Сдать следующую улицу / доложить борд.
    DealNextStreet,
    /// Предложить ребай вылетевшим.
    RebuyPrompt,
    /// Попробовать начать раздачу.
    NextHand,
}

impl TimerKind {
    pub fn slot(&self) -> TimerSlot {
        match self {
            TimerKind::TurnDeadline { .. } => TimerSlot::Turn,
            TimerKind::DealNextStreet => TimerSlot::Street,
            TimerKind::RebuyPrompt => TimerSlot::RebuyPrompt,
            TimerKind::NextHand => TimerSlot::NextHand,
        }
    }
}

/// Хэндл запланированного таймера. Он же токен отмены.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct TimerHandle {
    pub id: u64,
    pub kind: TimerKind,
    pub due_ms: u64,
}

#[derive(Clone, Debug, Default)]
pub struct Scheduler {
    next_id: u64,
    slots: BTreeMap<TimerSlot, TimerHandle>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Запланировать событие на `due_ms`. Старый таймер того же слота отменяется.
    pub fn schedule(&mut self, kind: TimerKind, due_ms: u64) -> TimerHandle {
        self.next_id += 1;
        let handle = TimerHandle {
            id: self.next_id,
            kind,
            due_ms,
        };
        self.slots.insert(kind.slot(), handle);
        handle
    }

    /// Отменить таймер слота, если он есть.
    pub fn cancel(&mut self, slot: TimerSlot) -> Option<TimerHandle> {
        self.slots.remove(&slot)
    }

    /// Отменить конкретный таймер. Если слот уже перепланирован - ничего не делаем.
    pub fn cancel_handle(&mut self, handle: &TimerHandle) -> bool {
        let slot = handle.kind.slot();
        if self.slots.get(&slot).is_some_and(|h| h.id == handle.id) {
            self.slots.remove(&slot);
            true
        } else {
            false
        }
    }

    /// Отменить всё (комната закрывается). Возвращает, сколько было живых.
    pub fn cancel_all(&mut self) -> usize {
        let n = self.slots.len();
        self.slots.clear();
        n
    }

    pub fn is_scheduled(&self, slot: TimerSlot) -> bool {
        self.slots.contains_key(&slot)
    }

    pub fn get(&self, slot: TimerSlot) -> Option<&TimerHandle> {
        self.slots.get(&slot)
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Ближайший дедлайн.
    pub fn next_due(&self) -> Option<u64> {
        self.slots.values().map(|h| h.due_ms).min()
    }

    /// Снять один просроченный таймер (самый ранний).
    ///
    /// Таймеры снимаются по одному: обработчик сработавшего может
    /// перепланировать или отменить остальные.
    pub fn pop_due(&mut self, now_ms: u64) -> Option<TimerHandle> {
        let slot = self
            .slots
            .values()
            .filter(|h| h.due_ms <= now_ms)
            .min_by_key(|h| (h.due_ms, h.id))
            .map(|h| h.kind.slot())?;
        self.slots.remove(&slot)
    }
}
