//! Посадка за стол и восстановление игрока после переподключения.
//!
//! Порядок поиска:
//! 1. по идентичности (`PlayerId`) - тот же игрок, то же место и стек;
//! 2. без идентичности - отключившийся "призрак" с тем же именем;
//! 3. свободное место (пустое или занятое призраком без фишек в банке).

use log::info;
use rand::{thread_rng, Rng};

use crate::api::dto::ServerMessage;
use crate::api::errors::Rejection;
use crate::domain::hand::TableState;
use crate::domain::player::{PlayerAtTable, PlayerId};
use crate::domain::table::{SeatIndex, Table};
use crate::domain::ConnectionId;

use super::room::Room;

/// Как игрок оказался за столом.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Seating {
    /// Вернулся по идентичности.
    Restored,
    /// Занял своего призрака по имени.
    Reclaimed,
    /// Новое место.
    Seated,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct JoinOutcome {
    pub player_id: PlayerId,
    pub seat: SeatIndex,
    pub seating: Seating,
    /// Старое соединение, которое нужно закрыть.
    pub evicted: Option<ConnectionId>,
}

impl Room {
    /// Посадить (или вернуть) игрока. При успехе игрок получает `joined`,
    /// все - свежий снапшот.
    pub fn join(
        &mut self,
        conn: ConnectionId,
        name: &str,
        identity: Option<PlayerId>,
        now: u64,
    ) -> Result<JoinOutcome, Rejection> {
        let hand_running = self.table.state != TableState::Waiting;

        let known = match identity {
            Some(id) => self
                .table
                .player(&id)
                .map(|p| (p.player_id, Seating::Restored)),
            None => self
                .table
                .players()
                .find(|p| !p.connected && p.name == name)
                .map(|p| (p.player_id, Seating::Reclaimed)),
        };

        let restored = known.and_then(|(id, seating)| {
            let player = self.table.player_mut(&id)?;
            let evicted = reattach(player, conn, hand_running);
            Some(JoinOutcome {
                player_id: player.player_id,
                seat: player.seat,
                seating,
                evicted,
            })
        });

        let outcome = match restored {
            Some(outcome) => outcome,
            None => self.seat_new_player(conn, name, identity, hand_running)?,
        };

        info!(
            "[{}] {:?}: игрок {} на месте {}",
            self.table.code, outcome.seating, outcome.player_id, outcome.seat
        );

        if let Some(p) = self.table.player(&outcome.player_id) {
            let joined = ServerMessage::Joined {
                seat: p.seat,
                chips: p.stack,
                waiting: p.waiting,
                room: self.table.code.clone(),
                player_id: p.player_id,
            };
            self.send(conn, joined);
        }

        self.start_if_settled(now);
        self.broadcast(now);
        Ok(outcome)
    }

    fn seat_new_player(
        &mut self,
        conn: ConnectionId,
        name: &str,
        identity: Option<PlayerId>,
        hand_running: bool,
    ) -> Result<JoinOutcome, Rejection> {
        let seat = free_seat(&self.table).ok_or(Rejection::TableFull)?;

        if let Some(ghost) = self.table.player_at(seat).map(|p| p.player_id) {
            self.table.remove_player(&ghost);
            self.rebuy_pending.remove(&ghost);
            info!(
                "[{}] место {} освобождено от отключившегося {}",
                self.table.code, seat, ghost
            );
        }

        let player_id = identity.unwrap_or_else(PlayerId::random);
        let name = unique_name(&self.table, name);
        let mut player = PlayerAtTable::new(
            player_id,
            name,
            seat,
            self.config.table.starting_stack,
            Some(conn),
        );
        player.waiting = hand_running;
        self.table.seat_player(player);

        Ok(JoinOutcome {
            player_id,
            seat,
            seating: Seating::Seated,
            evicted: None,
        })
    }
}

/// Привязать игрока к новому соединению. Возвращает вытесненное соединение.
fn reattach(player: &mut PlayerAtTable, conn: ConnectionId, hand_running: bool) -> Option<ConnectionId> {
    let old = player.connection.replace(conn);
    player.connected = true;
    // Участник текущей раздачи продолжает её, остальные ждут следующую.
    player.waiting = hand_running && !player.is_in_hand();
    old.filter(|c| *c != conn)
}

/// Место, которое может занять новичок.
///
/// Сначала пустые места, потом призраки, у которых нет фишек в текущем банке.
pub fn free_seat(table: &Table) -> Option<SeatIndex> {
    let max = table.max_seats();
    if let Some(seat) = (0..max).find(|&s| table.is_seat_empty(s)) {
        return Some(seat);
    }
    (0..max).find(|&s| {
        table.player_at(s).is_some_and(|p| {
            !p.connected
                && p.total_committed.is_zero()
                && !(table.state.is_betting() && p.is_contesting())
        })
    })
}

/// Имя без совпадений с подключёнными игроками: при конфликте - суффикс `_NNN`.
pub fn unique_name(table: &Table, requested: &str) -> String {
    let base = match requested.trim() {
        "" => "Player",
        s => s,
    };
    let taken = |n: &str| table.players().any(|p| p.connected && p.name == n);
    if !taken(base) {
        return base.to_string();
    }
    let mut rng = thread_rng();
    loop {
        let candidate = format!("{base}_{:03}", rng.gen_range(0..1000));
        if !taken(&candidate) {
            return candidate;
        }
    }
}
