//! Асинхронная оболочка над `RoomRegistry`: один таск владеет всеми комнатами,
//! транспорт общается с ним через каналы.

use std::sync::Arc;
use std::time::Duration;

use log::{debug, info, warn};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::api::commands::ClientMessage;
use crate::api::dto::Envelope;
use crate::domain::ConnectionId;
use crate::session::RoomRegistry;
use crate::time_ctrl::Clock;

/// Входящее от транспорта.
#[derive(Clone, Debug)]
pub enum Inbound {
    /// Сырой JSON-текст.
    Text { conn: ConnectionId, text: String },
    /// Уже разобранное сообщение.
    Message {
        conn: ConnectionId,
        message: ClientMessage,
    },
    Disconnected { conn: ConnectionId },
}

/// Ручка для транспорта. Клонируется на каждое соединение.
#[derive(Clone, Debug)]
pub struct LobbyHandle {
    tx: mpsc::UnboundedSender<Inbound>,
}

impl LobbyHandle {
    /// false - лобби уже остановлено.
    pub fn send(&self, inbound: Inbound) -> bool {
        self.tx.send(inbound).is_ok()
    }

    pub fn text(&self, conn: ConnectionId, text: impl Into<String>) -> bool {
        self.send(Inbound::Text {
            conn,
            text: text.into(),
        })
    }

    pub fn message(&self, conn: ConnectionId, message: ClientMessage) -> bool {
        self.send(Inbound::Message { conn, message })
    }

    pub fn disconnect(&self, conn: ConnectionId) -> bool {
        self.send(Inbound::Disconnected { conn })
    }
}

pub struct Lobby {
    registry: RoomRegistry,
    clock: Arc<dyn Clock>,
    outbound: mpsc::UnboundedSender<Envelope>,
}

impl Lobby {
    pub fn new(registry: RoomRegistry, clock: Arc<dyn Clock>, outbound: mpsc::UnboundedSender<Envelope>) -> Self {
        Self {
            registry,
            clock,
            outbound,
        }
    }

    /// Запустить лобби отдельным таском. Таск завершается, когда все
    /// `LobbyHandle` закрыты.
    pub fn spawn(
        registry: RoomRegistry,
        clock: Arc<dyn Clock>,
        outbound: mpsc::UnboundedSender<Envelope>,
    ) -> (LobbyHandle, JoinHandle<()>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let lobby = Self::new(registry, clock, outbound);
        let task = tokio::spawn(lobby.run(rx));
        (LobbyHandle { tx }, task)
    }

    pub async fn run(mut self, mut inbox: mpsc::UnboundedReceiver<Inbound>) {
        let mut sweep = tokio::time::interval(self.registry.config().time.sweep_interval());
        sweep.set_missed_tick_behavior(MissedTickBehavior::Delay);
        info!("лобби запущено");

        loop {
            let wake = self
                .registry
                .next_deadline()
                .map(|due| Duration::from_millis(due.saturating_sub(self.clock.now_ms())));

            tokio::select! {
                biased;
                msg = inbox.recv() => match msg {
                    Some(inbound) => self.on_inbound(inbound),
                    None => break,
                },
                _ = sleep_or_pending(wake) => {
                    let fired = self.registry.fire_due(self.clock.now_ms());
                    debug!("сработало таймеров: {fired}");
                }
                _ = sweep.tick() => {
                    let removed = self.registry.sweep_inactive(self.clock.now_ms());
                    if !removed.is_empty() {
                        info!("убраны простаивающие комнаты: {removed:?}");
                    }
                }
            }
            self.flush();
        }

        info!("лобби остановлено, комнат: {}", self.registry.len());
    }

    fn on_inbound(&mut self, inbound: Inbound) {
        let now = self.clock.now_ms();
        let result = match inbound {
            Inbound::Text { conn, text } => self.registry.handle_text(conn, &text, now),
            Inbound::Message { conn, message } => self.registry.handle(conn, message, now),
            Inbound::Disconnected { conn } => {
                self.registry.disconnect(conn, now);
                Ok(())
            }
        };
        if let Err(err) = result {
            debug!("входящее сообщение отброшено: {err}");
        }
    }

    fn flush(&mut self) {
        for envelope in self.registry.take_outbox() {
            if self.outbound.send(envelope).is_err() {
                warn!("исходящий канал закрыт");
                return;
            }
        }
    }
}

async fn sleep_or_pending(wake: Option<Duration>) {
    match wake {
        Some(delay) => tokio::time::sleep(delay).await,
        None => std::future::pending().await,
    }
}
