// src/bin/poker_room_dev_cli.rs
//
// Dev-CLI: поднимает лобби, сажает трёх ботов в одну комнату и играет
// несколько раздач. Боты чекают/коллируют и всегда берут ребай.
//
//   RUST_LOG=debug POKER_ROOM_HANDS=5 cargo run --bin poker_room_dev_cli

use std::env;
use std::error::Error;
use std::sync::Arc;
use std::time::Duration;

use log::{info, warn};
use tokio::sync::mpsc;

use poker_room::api::{ActionType, ClientMessage, Envelope, ServerMessage};
use poker_room::domain::{ConnectionId, HandId};
use poker_room::engine::LegalActions;
use poker_room::infra::ConnectionIds;
use poker_room::runtime::{Lobby, LobbyHandle};
use poker_room::session::RoomRegistry;
use poker_room::time_ctrl::SystemClock;
use poker_room::EngineConfig;

const BOT_NAMES: [&str; 3] = ["alice", "bob", "carol"];
const HANDS_ENV: &str = "POKER_ROOM_HANDS";
const IDLE_LIMIT: Duration = Duration::from_secs(30);

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let hands: HandId = env::var(HANDS_ENV)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(3);

    // Быстрые паузы, чтобы прогон занимал секунды.
    let mut config = EngineConfig::from_env()?;
    config.time.street_delay_ms = 100;
    config.time.showdown_delay_ms = 200;
    config.time.next_hand_delay_ms = 300;

    let ids = ConnectionIds::new();
    let bots: Vec<(ConnectionId, &str)> = BOT_NAMES.iter().map(|&name| (ids.next_id(), name)).collect();

    println!("poker_room_dev_cli: {} бота, {} раздач(и)", bots.len(), hands);

    let (out_tx, mut out_rx) = mpsc::unbounded_channel::<Envelope>();
    let (lobby, task) = Lobby::spawn(RoomRegistry::new(config), Arc::new(SystemClock), out_tx);

    let (host, host_name) = bots[0];
    lobby.message(
        host,
        ClientMessage::CreateRoom {
            name: host_name.to_string(),
            player_id: None,
        },
    );

    let mut last_hand: HandId = 0;
    loop {
        let envelope = match tokio::time::timeout(IDLE_LIMIT, out_rx.recv()).await {
            Ok(Some(envelope)) => envelope,
            Ok(None) => break,
            Err(_) => {
                warn!("нет сообщений {IDLE_LIMIT:?}, выходим");
                break;
            }
        };

        match envelope.message {
            ServerMessage::RoomCreated { code } => {
                println!("Комната {code} создана");
                for &(conn, name) in &bots[1..] {
                    lobby.message(
                        conn,
                        ClientMessage::Join {
                            name: name.to_string(),
                            room: code.clone(),
                            player_id: None,
                        },
                    );
                }
            }
            ServerMessage::Joined { seat, chips, .. } => {
                println!("  соединение {} село на место {seat} со стеком {chips}", envelope.to);
            }
            ServerMessage::State(snapshot) if snapshot.hand_id != last_hand => {
                if snapshot.hand_id > hands {
                    break;
                }
                last_hand = snapshot.hand_id;
                println!("--- Раздача #{} ---", snapshot.hand_id);
                for p in &snapshot.players {
                    println!("  [{}] {:<8} {}", p.seat, p.name, p.chips);
                }
            }
            ServerMessage::Actions(actions) if actions.your_turn => {
                bot_act(&lobby, envelope.to, &actions).await;
            }
            ServerMessage::RebuyRequest { amount } => {
                info!("соединение {} берёт ребай {amount}", envelope.to);
                lobby.message(envelope.to, ClientMessage::RebuyResponse { accept: true });
            }
            ServerMessage::Rejected { reason } => {
                warn!("соединению {} отказано: {reason}", envelope.to);
            }
            _ => {}
        }
    }

    for &(conn, _) in &bots {
        lobby.disconnect(conn);
    }
    drop(lobby);
    task.await?;
    println!("Готово, сыграно раздач: {last_hand}");
    Ok(())
}

async fn bot_act(lobby: &LobbyHandle, conn: ConnectionId, actions: &LegalActions) {
    tokio::time::sleep(Duration::from_millis(20)).await;
    let kind = if actions.can_check {
        ActionType::Check
    } else if actions.can_call {
        ActionType::Call
    } else {
        ActionType::Fold
    };
    lobby.message(conn, ClientMessage::Action { kind, amount: None });
}
