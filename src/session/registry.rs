//! Реестр комнат: коды, привязка соединений к игрокам, маршрутизация
//! входящих сообщений и уборка пустых комнат.

use std::collections::HashMap;

use log::{debug, info, warn};

use crate::api::commands::{to_action_kind, ClientMessage};
use crate::api::dto::{Envelope, ServerMessage};
use crate::api::errors::{ApiError, Rejection};
use crate::config::EngineConfig;
use crate::domain::{ConnectionId, PlayerId, RoomCode};
use crate::engine::RandomSource;
use crate::infra::ids::{RandomRoomCodes, RoomCodeSource};
use crate::infra::rng::SystemRng;

use super::identity::JoinOutcome;
use super::room::Room;

/// Всего 4-значных кодов.
pub const ROOM_CODE_SPACE: usize = 9000;

/// Фабрика RNG для новых комнат.
pub type RngFactory = Box<dyn Fn() -> Box<dyn RandomSource> + Send>;

/// Куда привязано соединение.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Binding {
    pub room: RoomCode,
    pub player_id: PlayerId,
}

pub struct RoomRegistry {
    config: EngineConfig,
    rooms: HashMap<RoomCode, Room>,
    bindings: HashMap<ConnectionId, Binding>,
    codes: Box<dyn RoomCodeSource>,
    rng_factory: RngFactory,
    /// Сообщения самого реестра (отказы, вытеснение, room_created).
    outbox: Vec<Envelope>,
}

impl RoomRegistry {
    pub fn new(config: EngineConfig) -> Self {
        Self::with_sources(
            config,
            Box::new(RandomRoomCodes::new()),
            Box::new(|| Box::new(SystemRng) as Box<dyn RandomSource>),
        )
    }

    /// Реестр с подменёнными кодами и RNG (тесты, реплеи).
    pub fn with_sources(config: EngineConfig, codes: Box<dyn RoomCodeSource>, rng_factory: RngFactory) -> Self {
        Self {
            config,
            rooms: HashMap::new(),
            bindings: HashMap::new(),
            codes,
            rng_factory,
            outbox: Vec::new(),
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }

    pub fn get(&self, code: &str) -> Option<&Room> {
        self.rooms.get(code)
    }

    pub fn get_mut(&mut self, code: &str) -> Option<&mut Room> {
        self.rooms.get_mut(code)
    }

    pub fn binding(&self, conn: ConnectionId) -> Option<&Binding> {
        self.bindings.get(&conn)
    }

    /// Создать комнату со свежим кодом и посадить создателя.
    pub fn create_room(
        &mut self,
        conn: ConnectionId,
        name: &str,
        identity: Option<PlayerId>,
        now: u64,
    ) -> Result<RoomCode, Rejection> {
        if self.rooms.len() >= ROOM_CODE_SPACE {
            warn!("все коды комнат заняты");
            self.reject(conn, Rejection::NoFreeRoomCodes);
            return Err(Rejection::NoFreeRoomCodes);
        }

        let rooms = &self.rooms;
        let code = self.codes.next_code(&|c: &str| rooms.contains_key(c));
        let room = Room::new(code.clone(), self.config.clone(), (self.rng_factory)(), now);
        self.rooms.insert(code.clone(), room);
        info!("[{code}] комната создана");

        self.outbox
            .push(Envelope::new(conn, ServerMessage::RoomCreated { code: code.clone() }));
        self.join(conn, name, &code, identity, now)?;
        Ok(code)
    }

    /// Посадить соединение в комнату. Отказ уходит клиенту сообщением `rejected`.
    pub fn join(
        &mut self,
        conn: ConnectionId,
        name: &str,
        code: &str,
        identity: Option<PlayerId>,
        now: u64,
    ) -> Result<JoinOutcome, Rejection> {
        if !self.rooms.contains_key(code) {
            let rejection = Rejection::RoomNotFound(code.to_string());
            self.reject(conn, rejection.clone());
            return Err(rejection);
        }

        // Соединение уже сидело где-то ещё: для старой комнаты это уход.
        if let Some(prev) = self.bindings.get(&conn).cloned() {
            let same_seat = prev.room == code && identity == Some(prev.player_id);
            if !same_seat {
                self.disconnect(conn, now);
            }
        }

        let Some(room) = self.rooms.get_mut(code) else {
            return Err(Rejection::RoomNotFound(code.to_string()));
        };
        let outcome = match room.join(conn, name, identity, now) {
            Ok(outcome) => outcome,
            Err(rejection) => {
                info!("[{code}] отказ соединению {conn}: {rejection}");
                self.reject(conn, rejection.clone());
                return Err(rejection);
            }
        };

        if let Some(old) = outcome.evicted {
            if self
                .bindings
                .get(&old)
                .is_some_and(|b| b.player_id == outcome.player_id)
            {
                self.bindings.remove(&old);
            }
            info!("[{code}] соединение {old} вытеснено соединением {conn}");
            self.outbox.push(Envelope::new(old, ServerMessage::Superseded));
        }

        self.bindings.insert(
            conn,
            Binding {
                room: code.to_string(),
                player_id: outcome.player_id,
            },
        );
        Ok(outcome)
    }

    /// Закрыть комнату: таймеры отменяются, привязки снимаются.
    pub fn destroy(&mut self, code: &str) -> bool {
        let Some(mut room) = self.rooms.remove(code) else {
            return false;
        };
        let cancelled = room.shutdown();
        self.bindings.retain(|_, b| b.room != code);
        info!("[{code}] комната закрыта, отменено таймеров: {cancelled}");
        true
    }

    /// Удалить комнаты без подключённых игроков дольше окна простоя.
    pub fn sweep_inactive(&mut self, now: u64) -> Vec<RoomCode> {
        let idle: Vec<RoomCode> = self
            .rooms
            .iter()
            .filter(|(_, room)| room.is_idle(now))
            .map(|(code, _)| code.clone())
            .collect();
        for code in &idle {
            self.destroy(code);
        }
        idle
    }

    /// Разобрать JSON и обработать.
    pub fn handle_text(&mut self, conn: ConnectionId, text: &str, now: u64) -> Result<(), ApiError> {
        let message = ClientMessage::from_json(text)?;
        self.handle(conn, message, now)
    }

    pub fn handle(&mut self, conn: ConnectionId, message: ClientMessage, now: u64) -> Result<(), ApiError> {
        match message {
            ClientMessage::CreateRoom { name, player_id } => {
                // Отказ уже отправлен клиенту.
                let _ = self.create_room(conn, &name, player_id, now);
                Ok(())
            }
            ClientMessage::Join {
                name,
                room,
                player_id,
            } => {
                let _ = self.join(conn, &name, &room, player_id, now);
                Ok(())
            }
            ClientMessage::Action { kind, amount } => {
                let action = to_action_kind(kind, amount)?;
                let (room, player_id) = self.bound_room(conn)?;
                if !room.handle_action(player_id, action, now) {
                    debug!("[{}] действие от соединения {conn} не принято", room.code());
                }
                Ok(())
            }
            ClientMessage::RebuyResponse { accept } => {
                let (room, player_id) = self.bound_room(conn)?;
                room.handle_rebuy(player_id, accept, now);
                Ok(())
            }
            ClientMessage::SyncRequest => {
                let (room, player_id) = self.bound_room(conn)?;
                room.sync(player_id, now);
                Ok(())
            }
        }
    }

    /// Соединение закрылось. Устаревшее (уже вытесненное) соединение игнорируем.
    pub fn disconnect(&mut self, conn: ConnectionId, now: u64) {
        let Some(binding) = self.bindings.remove(&conn) else {
            return;
        };
        let Some(room) = self.rooms.get_mut(&binding.room) else {
            return;
        };
        let current = room
            .table
            .player(&binding.player_id)
            .is_some_and(|p| p.connection == Some(conn));
        if !current {
            debug!(
                "[{}] отключение устаревшего соединения {conn}",
                binding.room
            );
            return;
        }
        room.handle_disconnect(binding.player_id, now);
    }

    /// Прогнать просроченные таймеры всех комнат.
    pub fn fire_due(&mut self, now: u64) -> usize {
        self.rooms.values_mut().map(|room| room.fire_due(now)).sum()
    }

    pub fn next_deadline(&self) -> Option<u64> {
        self.rooms.values().filter_map(Room::next_deadline).min()
    }

    /// Все накопленные исходящие: сначала реестра, потом комнат.
    pub fn take_outbox(&mut self) -> Vec<Envelope> {
        let mut out = std::mem::take(&mut self.outbox);
        for room in self.rooms.values_mut() {
            out.extend(room.take_outbox());
        }
        out
    }

    fn bound_room(&mut self, conn: ConnectionId) -> Result<(&mut Room, PlayerId), ApiError> {
        let binding = self.bindings.get(&conn).ok_or(ApiError::NotBound(conn))?;
        let player_id = binding.player_id;
        let room = self
            .rooms
            .get_mut(&binding.room)
            .ok_or(ApiError::NotBound(conn))?;
        Ok((room, player_id))
    }

    fn reject(&mut self, conn: ConnectionId, rejection: Rejection) {
        self.outbox.push(Envelope::new(
            conn,
            ServerMessage::Rejected {
                reason: rejection.to_string(),
            },
        ));
    }
}
