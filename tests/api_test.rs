//! Протокол: разбор входящих, формат исходящих, конфиг.

use poker_room::api::{to_action_kind, ActionType, ApiError, ClientMessage, ServerMessage};
use poker_room::config::{ConfigError, EngineConfig};
use poker_room::domain::{chips::Chips, PlayerId};
use poker_room::engine::PlayerActionKind;

//
// ====================== ВХОДЯЩИЕ ======================
//

#[test]
fn parses_join_with_optional_identity() {
    let id = PlayerId::random();
    let text = format!(r#"{{"type":"join","payload":{{"name":"bob","room":"1234","player_id":"{id}"}}}}"#);

    let msg = ClientMessage::from_json(&text).expect("join");

    assert_eq!(
        msg,
        ClientMessage::Join {
            name: "bob".into(),
            room: "1234".into(),
            player_id: Some(id),
        }
    );

    let anon = ClientMessage::from_json(r#"{"type":"create_room","payload":{"name":"al"}}"#)
        .expect("create_room");
    assert_eq!(
        anon,
        ClientMessage::CreateRoom {
            name: "al".into(),
            player_id: None,
        }
    );
}

#[test]
fn parses_action_rebuy_and_sync() {
    let raise = ClientMessage::from_json(r#"{"type":"action","payload":{"kind":"raise","amount":60}}"#)
        .expect("raise");
    assert_eq!(
        raise,
        ClientMessage::Action {
            kind: ActionType::Raise,
            amount: Some(Chips(60)),
        }
    );

    let rebuy = ClientMessage::from_json(r#"{"type":"rebuy_response","payload":{"accept":false}}"#)
        .expect("rebuy");
    assert_eq!(rebuy, ClientMessage::RebuyResponse { accept: false });

    let sync = ClientMessage::from_json(r#"{"type":"sync_request"}"#).expect("sync");
    assert_eq!(sync, ClientMessage::SyncRequest);
}

#[test]
fn unknown_message_type_is_an_error() {
    assert!(matches!(
        ClientMessage::from_json(r#"{"type":"dance","payload":{}}"#),
        Err(ApiError::Json(_))
    ));
}

#[test]
fn action_type_maps_to_engine_action() {
    assert_eq!(to_action_kind(ActionType::Call, None).ok(), Some(PlayerActionKind::Call));
    assert_eq!(
        to_action_kind(ActionType::Raise, Some(Chips(40))).ok(),
        Some(PlayerActionKind::Raise(Chips(40)))
    );
    assert!(matches!(
        to_action_kind(ActionType::Raise, None),
        Err(ApiError::BadRequest(_))
    ));
}

//
// ====================== ИСХОДЯЩИЕ ======================
//

#[test]
fn server_messages_are_tagged_json() {
    let json = ServerMessage::Rejected {
        reason: "Table full".into(),
    }
    .to_json()
    .expect("json");
    assert_eq!(json, r#"{"type":"rejected","payload":{"reason":"Table full"}}"#);

    let json = ServerMessage::Superseded.to_json().expect("json");
    assert_eq!(json, r#"{"type":"superseded"}"#);

    let json = ServerMessage::RebuyRequest { amount: Chips(2000) }
        .to_json()
        .expect("json");
    assert_eq!(json, r#"{"type":"rebuy_request","payload":{"amount":2000}}"#);
}

//
// ====================== КОНФИГ ======================
//

#[test]
fn partial_config_json_uses_defaults() {
    let cfg = EngineConfig::from_json(r#"{"time":{"turn_timeout_ms":5000}}"#).expect("конфиг");

    assert_eq!(cfg.time.turn_timeout_ms, 5000);
    assert_eq!(cfg.time.next_hand_delay_ms, 5000);
    assert_eq!(cfg.table.stakes.big_blind, Chips(20));
    assert_eq!(cfg.table.max_seats, 6);
    assert!(!cfg.fold_on_disconnect);
}

#[test]
fn invalid_config_is_rejected() {
    assert!(matches!(
        EngineConfig::from_json(r#"{"table":{"max_seats":1}}"#),
        Err(ConfigError::Invalid(_))
    ));
    assert!(matches!(
        EngineConfig::from_json(r#"{"table":{"stakes":{"small_blind":50,"big_blind":20}}}"#),
        Err(ConfigError::Invalid(_))
    ));
    assert!(matches!(
        EngineConfig::from_json("[1, 2]"),
        Err(ConfigError::Parse(_))
    ));
}
