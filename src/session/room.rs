use std::collections::BTreeSet;

use log::{debug, info, warn};

use crate::api::dto::{Envelope, ServerMessage, SoundKind, TableSnapshot};
use crate::api::queries::{actions_for, build_table_snapshot, private_hole, revealed_holes};
use crate::config::EngineConfig;
use crate::domain::deck::Deck;
use crate::domain::hand::TableState;
use crate::domain::player::{LastAction, PlayerAtTable};
use crate::domain::table::Table;
use crate::domain::{ConnectionId, PlayerId, RoomCode};
use crate::engine::actions::{ActionOrigin, PlayerAction, PlayerActionKind};
use crate::engine::errors::EngineError;
use crate::engine::game_loop::{advance_street, apply_action, start_hand, timeout_action};
use crate::engine::hand_history::HandEventKind;
use crate::engine::{HandEngine, HandStatus, RandomSource};
use crate::time_ctrl::{Scheduler, TimerHandle, TimerKind, TimerSlot};

/// Защита от зацикливания таймеров с нулевыми задержками.
const MAX_TIMERS_PER_TICK: usize = 64;

/// Одна комната: стол, текущая раздача, таймеры и исходящие сообщения.
///
/// Все обработчики синхронные и получают текущее время `now` в мс.
/// Сообщения копятся в outbox, забирает их владелец (реестр / рантайм).
pub struct Room {
    pub table: Table,
    pub hand: HandEngine,
    pub(crate) config: EngineConfig,
    rng: Box<dyn RandomSource>,
    pub(crate) scheduler: Scheduler,
    outbox: Vec<Envelope>,
    pub(crate) rebuy_pending: BTreeSet<PlayerId>,
    turn_deadline: Option<u64>,
    pub(crate) force_reveal: bool,
    last_active: u64,
    /// Сколько событий истории текущей раздачи уже разослано звуками.
    sounds_sent: usize,
}

impl Room {
    pub fn new(code: RoomCode, config: EngineConfig, rng: Box<dyn RandomSource>, now: u64) -> Self {
        let table = Table::new(code, config.table.clone());
        let hand = HandEngine::idle(config.table.stakes.big_blind);
        Self {
            table,
            hand,
            config,
            rng,
            scheduler: Scheduler::new(),
            outbox: Vec::new(),
            rebuy_pending: BTreeSet::new(),
            turn_deadline: None,
            force_reveal: false,
            last_active: now,
            sounds_sent: 0,
        }
    }

    pub fn code(&self) -> &str {
        &self.table.code
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn last_active(&self) -> u64 {
        self.last_active
    }

    pub fn turn_deadline(&self) -> Option<u64> {
        self.turn_deadline
    }

    pub fn rebuy_pending(&self) -> &BTreeSet<PlayerId> {
        &self.rebuy_pending
    }

    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    pub fn connected_count(&self) -> usize {
        self.table.connected_count()
    }

    /// Никого нет дольше окна простоя.
    pub fn is_idle(&self, now: u64) -> bool {
        self.connected_count() == 0
            && now.saturating_sub(self.last_active) >= self.config.time.room_idle_ms
    }

    /// Ближайший дедлайн таймеров комнаты.
    pub fn next_deadline(&self) -> Option<u64> {
        self.scheduler.next_due()
    }

    pub fn take_outbox(&mut self) -> Vec<Envelope> {
        std::mem::take(&mut self.outbox)
    }

    pub fn snapshot(&self, now: u64) -> TableSnapshot {
        build_table_snapshot(
            &self.table,
            &self.hand,
            self.turn_deadline,
            self.force_reveal,
            now,
        )
    }

    /// Действие игрока. Не его ход / не по правилам - молча игнорируем.
    pub fn handle_action(&mut self, player_id: PlayerId, kind: PlayerActionKind, now: u64) -> bool {
        let applied = self.run_action(PlayerAction::manual(player_id, kind), now);
        if applied {
            self.broadcast(now);
        }
        applied
    }

    /// Отключение игрока. Из раздачи не убираем: он ходит по таймеру.
    /// Возвращает true, если игрок удалён со стола (ждал решения о ребае).
    pub fn handle_disconnect(&mut self, player_id: PlayerId, now: u64) -> bool {
        let Some(player) = self.table.player_mut(&player_id) else {
            return false;
        };
        player.connected = false;
        player.connection = None;
        info!("[{}] игрок {} отключился", self.table.code, player_id);

        let removed = self.rebuy_pending.remove(&player_id);
        if removed {
            self.table.remove_player(&player_id);
            info!(
                "[{}] игрок {} ушёл, не решив вопрос ребая",
                self.table.code, player_id
            );
        }

        if !removed
            && self.config.fold_on_disconnect
            && self.hand.current_actor == Some(player_id)
        {
            if let Some(kind) = timeout_action(&self.table, &self.hand, player_id) {
                self.clear_turn_timer();
                self.run_action(
                    PlayerAction {
                        player_id,
                        kind,
                        origin: ActionOrigin::Disconnect,
                    },
                    now,
                );
            }
        }

        if removed && self.table.state.is_idle() {
            self.ensure_next_hand(now);
        }
        self.start_if_settled(now);

        self.broadcast(now);
        removed
    }

    /// Переслать текущее состояние одному игроку. Состояние не меняется.
    pub fn sync(&mut self, player_id: PlayerId, now: u64) {
        let snapshot = self.snapshot(now);
        let reveal = self.table.state == TableState::Showdown;
        let bundle = self
            .table
            .player(&player_id)
            .map(|p| self.private_bundle(p, &snapshot, reveal))
            .unwrap_or_default();
        self.outbox.extend(bundle);
    }

    /// Отработать все просроченные таймеры. Возвращает, сколько сработало.
    pub fn fire_due(&mut self, now: u64) -> usize {
        let mut fired = 0;
        while let Some(timer) = self.scheduler.pop_due(now) {
            self.fire(timer, now);
            fired += 1;
            if fired >= MAX_TIMERS_PER_TICK {
                warn!("[{}] слишком много таймеров за один тик", self.table.code);
                break;
            }
        }
        fired
    }

    /// Закрытие комнаты: отменяем все таймеры.
    pub fn shutdown(&mut self) -> usize {
        self.turn_deadline = None;
        self.scheduler.cancel_all()
    }

    fn fire(&mut self, timer: TimerHandle, now: u64) {
        debug!("[{}] таймер {:?}", self.table.code, timer.kind);
        match timer.kind {
            TimerKind::TurnDeadline { player_id } => self.on_turn_timeout(player_id, now),
            TimerKind::DealNextStreet => {
                match advance_street(&mut self.table, &mut self.hand) {
                    Ok(status) => self.follow(status, now),
                    Err(err) => warn!("[{}] не удалось сдать улицу: {err}", self.table.code),
                }
                self.broadcast(now);
            }
            TimerKind::RebuyPrompt => {
                self.request_rebuys(now);
                self.broadcast(now);
            }
            TimerKind::NextHand => {
                if !self.try_start_hand(now) && self.table.state == TableState::Showdown {
                    self.table.state = TableState::Waiting;
                }
                self.broadcast(now);
            }
        }
    }

    fn on_turn_timeout(&mut self, player_id: PlayerId, now: u64) {
        self.turn_deadline = None;
        if self.hand.current_actor != Some(player_id) {
            debug!("[{}] устаревший таймер хода {}", self.table.code, player_id);
            return;
        }
        let Some(kind) = timeout_action(&self.table, &self.hand, player_id) else {
            return;
        };
        info!(
            "[{}] время вышло у {}: авто {:?}",
            self.table.code, player_id, kind
        );
        self.run_action(
            PlayerAction {
                player_id,
                kind,
                origin: ActionOrigin::Timeout,
            },
            now,
        );
        self.broadcast(now);
    }

    /// Общий путь для ручных и авто-действий.
    fn run_action(&mut self, action: PlayerAction, now: u64) -> bool {
        let PlayerAction {
            player_id, kind, ..
        } = action;
        match apply_action(&mut self.table, &mut self.hand, action) {
            Ok(status) => {
                self.follow(status, now);
                true
            }
            Err(err) => {
                debug!(
                    "[{}] действие {:?} от {} проигнорировано: {err}",
                    self.table.code, kind, player_id
                );
                false
            }
        }
    }

    /// Запланировать следующий шаг по статусу раздачи.
    fn follow(&mut self, status: HandStatus, now: u64) {
        match status {
            HandStatus::AwaitingAction(player_id) => self.start_turn_timer(player_id, now),
            HandStatus::BettingClosed => {
                self.clear_turn_timer();
                self.scheduler.schedule(
                    TimerKind::DealNextStreet,
                    now + self.config.time.street_delay_ms,
                );
            }
            HandStatus::Finished(summary) => {
                self.clear_turn_timer();
                self.scheduler.cancel(TimerSlot::Street);
                if summary.went_to_showdown {
                    self.scheduler.schedule(
                        TimerKind::RebuyPrompt,
                        now + self.config.time.showdown_delay_ms,
                    );
                } else {
                    self.request_rebuys(now);
                }
            }
        }
    }

    fn start_turn_timer(&mut self, player_id: PlayerId, now: u64) {
        let due = now + self.config.time.turn_timeout_ms;
        self.scheduler
            .schedule(TimerKind::TurnDeadline { player_id }, due);
        self.turn_deadline = Some(due);
    }

    fn clear_turn_timer(&mut self) {
        self.scheduler.cancel(TimerSlot::Turn);
        self.turn_deadline = None;
    }

    /// Начать раздачу, если стол свободен и готовых хотя бы двое.
    pub(crate) fn try_start_hand(&mut self, now: u64) -> bool {
        if !self.table.state.is_idle() {
            return false;
        }
        // Звуки прошлой раздачи уходят до того, как история сменится.
        self.flush_sounds();

        let deck = Deck::shuffled(self.rng.as_mut());
        let pending = &self.rebuy_pending;
        let result = start_hand(&mut self.table, deck, |p: &PlayerAtTable| {
            p.connected && !p.stack.is_zero() && !pending.contains(&p.player_id)
        });

        match result {
            Ok((hand, status)) => {
                self.hand = hand;
                self.sounds_sent = 0;
                self.force_reveal = false;
                self.scheduler.cancel(TimerSlot::NextHand);
                self.follow(status, now);
                true
            }
            Err(EngineError::NotEnoughPlayers) => {
                debug!("[{}] недостаточно игроков для раздачи", self.table.code);
                false
            }
            Err(err) => {
                warn!("[{}] раздача не началась: {err}", self.table.code);
                false
            }
        }
    }

    /// Стол свободен и никакой таймер не ведёт к следующей раздаче:
    /// новый готовый игрок может запустить её сразу.
    pub(crate) fn start_if_settled(&mut self, now: u64) -> bool {
        let pending_timer = self.scheduler.is_scheduled(TimerSlot::NextHand)
            || self.scheduler.is_scheduled(TimerSlot::RebuyPrompt);
        if !self.table.state.is_idle() || pending_timer {
            return false;
        }
        self.try_start_hand(now)
    }

    pub(crate) fn send(&mut self, to: ConnectionId, message: ServerMessage) {
        self.outbox.push(Envelope::new(to, message));
    }

    /// Снапшот всем + каждому его карты и допустимые действия.
    pub(crate) fn broadcast(&mut self, now: u64) {
        self.flush_sounds();
        self.last_active = now;

        let snapshot = self.snapshot(now);
        let reveal = self.table.state == TableState::Showdown || self.force_reveal;
        let mut out = Vec::new();
        for p in self.table.players() {
            out.extend(self.private_bundle(p, &snapshot, reveal));
        }
        self.outbox.extend(out);
        self.force_reveal = false;
    }

    fn private_bundle(
        &self,
        p: &PlayerAtTable,
        snapshot: &TableSnapshot,
        reveal: bool,
    ) -> Vec<Envelope> {
        let Some(conn) = p.connection else {
            return Vec::new();
        };
        let mut out = vec![
            Envelope::new(conn, ServerMessage::State(snapshot.clone())),
            Envelope::new(
                conn,
                ServerMessage::Hole {
                    cards: private_hole(p),
                },
            ),
        ];
        if reveal {
            out.push(Envelope::new(
                conn,
                ServerMessage::ShowdownHoles {
                    holes: revealed_holes(&self.table),
                },
            ));
        }
        out.push(Envelope::new(
            conn,
            ServerMessage::Actions(actions_for(&self.table, &self.hand, p)),
        ));
        out
    }

    /// Разослать звуковые теги по новым событиям истории.
    fn flush_sounds(&mut self) {
        let events: Vec<HandEventKind> = self
            .hand
            .history
            .since(self.sounds_sent)
            .iter()
            .map(|e| e.kind.clone())
            .collect();
        self.sounds_sent = self.hand.history.len();

        for kind in events {
            let (sound, player_ids, except) = match kind {
                HandEventKind::HandStarted { .. } => (SoundKind::Deal, Vec::new(), None),
                HandEventKind::BoardDealt { .. } => (SoundKind::Deal, Vec::new(), None),
                HandEventKind::PotAwarded { player_ids, .. } => (SoundKind::Win, player_ids, None),
                HandEventKind::PlayerActed {
                    player_id,
                    action,
                    origin,
                    ..
                } => {
                    let sound = match action {
                        LastAction::Fold | LastAction::AutoFold => SoundKind::Fold,
                        LastAction::Check | LastAction::AutoCheck => SoundKind::Check,
                        _ => SoundKind::Bet,
                    };
                    // Свой ручной ход игрок уже слышал у себя.
                    let except = (origin == ActionOrigin::Manual).then_some(player_id);
                    (sound, vec![player_id], except)
                }
                _ => continue,
            };

            let targets: Vec<ConnectionId> = self
                .table
                .players()
                .filter(|p| Some(p.player_id) != except)
                .filter_map(|p| p.connection)
                .collect();
            for conn in targets {
                self.send(
                    conn,
                    ServerMessage::Sound {
                        kind: sound,
                        player_ids: player_ids.clone(),
                    },
                );
            }
        }
    }
}
