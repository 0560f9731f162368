use std::collections::BTreeMap;

use crate::domain::card::Card;
use crate::domain::chips::Chips;
use crate::domain::hand::TableState;
use crate::domain::player::PlayerAtTable;
use crate::domain::table::Table;
use crate::domain::PlayerId;
use crate::engine::validation::{legal_actions, LegalActions};
use crate::engine::HandEngine;

use super::dto::{PlayerSnapshot, TableSnapshot};

/// Сформировать публичный снапшот стола.
///
/// Ничего не меняет: два вызова подряд дают одинаковый результат
/// (кроме `server_timestamp`). Карты игроков попадают в снапшот только
/// на шоудауне или при `force_reveal`.
pub fn build_table_snapshot(
    table: &Table,
    hand: &HandEngine,
    act_deadline: Option<u64>,
    force_reveal: bool,
    now_ms: u64,
) -> TableSnapshot {
    let reveal = table.state == TableState::Showdown || force_reveal;
    let players = table
        .players()
        .map(|p| build_player_snapshot(p, hand, reveal))
        .collect();

    TableSnapshot {
        room: table.code.clone(),
        players,
        community: table.board.clone(),
        dealer_seat: table.dealer_button,
        state: table.state,
        current_to_act: hand.current_actor,
        highest_bet: hand.betting.highest_bet,
        last_raise_size: hand.betting.last_raise_size,
        hand_id: table.hand_id,
        pot_total: table.pot_total(),
        act_deadline,
        server_timestamp: now_ms,
    }
}

fn build_player_snapshot(p: &PlayerAtTable, hand: &HandEngine, reveal: bool) -> PlayerSnapshot {
    PlayerSnapshot {
        player_id: p.player_id,
        name: p.name.clone(),
        seat: p.seat,
        chips: p.stack,
        bet_this_street: p.bet_this_street,
        total_committed: p.total_committed,
        in_hand: p.is_in_hand(),
        folded: p.is_folded(),
        all_in: p.is_all_in(),
        connected: p.connected,
        waiting: p.waiting,
        last_action: p.last_action,
        last_amount: p.last_amount,
        hole: (reveal && p.reveal).then(|| p.hole_cards.clone()),
        potential_winnings: potential_winnings(hand, &p.player_id),
    }
}

/// Сумма сайд-потов, на которые игрок может претендовать.
pub fn potential_winnings(hand: &HandEngine, id: &PlayerId) -> Chips {
    hand.side_pots
        .iter()
        .filter(|pot| pot.eligible.contains(id))
        .map(|pot| pot.amount)
        .sum()
}

/// Открытые карты (шоудаун или принудительное раскрытие).
pub fn revealed_holes(table: &Table) -> BTreeMap<PlayerId, Vec<Card>> {
    table
        .players()
        .filter(|p| p.reveal && !p.hole_cards.is_empty())
        .map(|p| (p.player_id, p.hole_cards.clone()))
        .collect()
}

/// Приватные карты игрока: пусто, если он не в раздаче.
pub fn private_hole(p: &PlayerAtTable) -> Vec<Card> {
    if p.is_in_hand() {
        p.hole_cards.clone()
    } else {
        Vec::new()
    }
}

/// Допустимые действия для конкретного игрока.
pub fn actions_for(table: &Table, hand: &HandEngine, p: &PlayerAtTable) -> LegalActions {
    let is_turn = hand.current_actor == Some(p.player_id);
    legal_actions(p, &hand.betting, table.state, is_turn)
}
