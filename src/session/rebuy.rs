//! Ребай: вылетевшим (нулевой стек) предлагаем вернуться с новым стеком.
//! Пока решение не принято, игрок в раздачах не участвует.

use log::{debug, info};

use crate::api::dto::ServerMessage;
use crate::domain::{ConnectionId, PlayerId};
use crate::time_ctrl::{TimerKind, TimerSlot};

use super::room::Room;

/// Чем закончился ответ на ребай.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RebuyOutcome {
    Accepted,
    /// Игрок отказался и убран со стола.
    Declined,
}

impl Room {
    /// После раздачи: раскрыть выживших, разослать предложения ребая
    /// и при возможности запланировать следующую раздачу.
    pub(crate) fn request_rebuys(&mut self, now: u64) {
        self.force_reveal = self.table.players().any(|p| p.reveal);

        let betting = self.table.state.is_betting();
        let busted: Vec<(PlayerId, ConnectionId)> = self
            .table
            .players()
            .filter(|p| p.stack.is_zero() && !self.rebuy_pending.contains(&p.player_id))
            // В идущей раздаче олл-ин игроки ещё борются за банк.
            .filter(|p| !(betting && p.is_in_hand()))
            .filter_map(|p| p.connection.filter(|_| p.connected).map(|c| (p.player_id, c)))
            .collect();

        let amount = self.config.table.rebuy_amount();
        for (player_id, conn) in busted {
            self.rebuy_pending.insert(player_id);
            if let Some(p) = self.table.player_mut(&player_id) {
                p.waiting = true;
            }
            info!(
                "[{}] игрок {} без фишек, предлагаем ребай {}",
                self.table.code, player_id, amount
            );
            self.send(conn, ServerMessage::RebuyRequest { amount });
        }

        self.ensure_next_hand(now);
    }

    /// Запланировать следующую раздачу, если её ещё нет в планах и
    /// либо никто не решает ребай, либо готовых хотя бы двое.
    pub(crate) fn ensure_next_hand(&mut self, now: u64) {
        if !self.table.state.is_idle() || self.scheduler.is_scheduled(TimerSlot::NextHand) {
            return;
        }
        let ready = self
            .table
            .players()
            .filter(|p| {
                p.connected && !p.stack.is_zero() && !self.rebuy_pending.contains(&p.player_id)
            })
            .count();
        if self.rebuy_pending.is_empty() || ready >= 2 {
            self.scheduler.schedule(
                TimerKind::NextHand,
                now + self.config.time.next_hand_delay_ms,
            );
        }
    }

    /// Ответ игрока на предложение ребая. Без активного предложения - игнор.
    pub fn handle_rebuy(&mut self, player_id: PlayerId, accept: bool, now: u64) -> Option<RebuyOutcome> {
        if !self.rebuy_pending.remove(&player_id) {
            debug!(
                "[{}] ответ на ребай от {} без предложения",
                self.table.code, player_id
            );
            return None;
        }
        let conn = self.table.player(&player_id).and_then(|p| p.connection);
        let amount = self.config.table.rebuy_amount();

        let outcome = if accept {
            if let Some(p) = self.table.player_mut(&player_id) {
                p.stack += amount;
                p.waiting = false;
            }
            info!("[{}] {} взял ребай {}", self.table.code, player_id, amount);
            if let Some(conn) = conn {
                self.send(
                    conn,
                    ServerMessage::RebuyResult {
                        accepted: true,
                        amount: Some(amount),
                    },
                );
            }
            RebuyOutcome::Accepted
        } else {
            if let Some(conn) = conn {
                self.send(
                    conn,
                    ServerMessage::RebuyResult {
                        accepted: false,
                        amount: None,
                    },
                );
            }
            self.table.remove_player(&player_id);
            info!("[{}] {} отказался от ребая и ушёл", self.table.code, player_id);
            RebuyOutcome::Declined
        };

        self.ensure_next_hand(now);
        self.broadcast(now);
        Some(outcome)
    }
}
