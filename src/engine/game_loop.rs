use log::{debug, info};

use crate::domain::chips::Chips;
use crate::domain::deck::Deck;
use crate::domain::hand::{HandSummary, PotAward, TableState};
use crate::domain::player::{LastAction, PlayerAtTable, PlayerStatus};
use crate::domain::table::Table;
use crate::domain::{HandId, PlayerId, SeatIndex};
use crate::engine::actions::{PlayerAction, PlayerActionKind};
use crate::engine::betting::{BettingState, PendingQueue};
use crate::engine::errors::EngineError;
use crate::engine::hand_history::{HandEventKind, HandHistory};
use crate::engine::positions::{next_dealer, next_seat_from};
use crate::engine::side_pots::{compute_side_pots, settle, Contribution, SidePot};
use crate::engine::validation::{validate_action, ValidatedAction};
use crate::eval::evaluate_best_hand;

/// Что делать дальше после очередного шага раздачи.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum HandStatus {
    /// Ждём действия этого игрока.
    AwaitingAction(PlayerId),
    /// Улица закрыта; после паузы нужно вызвать `advance_street`.
    BettingClosed,
    /// Раздача завершена.
    Finished(HandSummary),
}

/// Внутреннее состояние раздачи.
#[derive(Clone, Debug)]
pub struct HandEngine {
    pub hand_id: HandId,
    pub deck: Deck,
    pub betting: BettingState,
    pub side_pots: Vec<SidePot>,
    /// Чей сейчас ход. Не больше одного игрока.
    pub current_actor: Option<PlayerId>,
    pub history: HandHistory,
}

impl HandEngine {
    fn new(hand_id: HandId, deck: Deck, big_blind: Chips) -> Self {
        Self {
            hand_id,
            deck,
            betting: BettingState::new(big_blind),
            side_pots: Vec::new(),
            current_actor: None,
            history: HandHistory::new(),
        }
    }

    /// Пустое состояние между раздачами.
    pub fn idle(big_blind: Chips) -> Self {
        Self::new(0, Deck::empty(), big_blind)
    }
}

/// Старт новой раздачи:
/// - выбирает дилера;
/// - постит блайнды;
/// - раздаёт карманные карты;
/// - открывает торговлю префлопа.
///
/// `is_ready` решает, кто участвует (подключён, есть фишки, не решает ребай).
pub fn start_hand<F>(
    table: &mut Table,
    deck: Deck,
    is_ready: F,
) -> Result<(HandEngine, HandStatus), EngineError>
where
    F: Fn(&PlayerAtTable) -> bool,
{
    if !table.state.is_idle() {
        return Err(EngineError::HandAlreadyInProgress);
    }
    let ready_count = table.players().filter(|p| is_ready(p)).count();
    if ready_count < 2 {
        return Err(EngineError::NotEnoughPlayers);
    }

    let dealer = next_dealer(table, &is_ready).ok_or(EngineError::NotEnoughPlayers)?;
    table.dealer_button = Some(dealer);
    table.hand_id += 1;
    table.board.clear();
    table.state = TableState::Preflop;

    for p in table.players_mut() {
        if is_ready(p) {
            p.reset_for_hand();
        } else {
            p.sit_out();
        }
    }

    let stakes = table.config.stakes.clone();
    let mut hand = HandEngine::new(table.hand_id, deck, stakes.big_blind);
    hand.history.push(HandEventKind::HandStarted {
        hand_id: table.hand_id,
        dealer,
    });
    info!(
        "[{}] раздача #{} началась, дилер на месте {}, игроков {}",
        table.code, table.hand_id, dealer, ready_count
    );

    // SB - следующий после дилера, BB - следующий после SB.
    // Хедз-ап: BB оказывается на дилере.
    let with_chips = |p: &PlayerAtTable| p.is_in_hand() && !p.stack.is_zero();
    let sb_seat = next_seat_from(table, dealer, with_chips).ok_or(EngineError::NotEnoughPlayers)?;
    let bb_seat = next_seat_from(table, sb_seat, with_chips).ok_or(EngineError::NotEnoughPlayers)?;

    post_blind(table, &mut hand, sb_seat, stakes.small_blind, false)?;
    post_blind(table, &mut hand, bb_seat, stakes.big_blind, true)?;

    deal_hole_cards(table, &mut hand, dealer)?;
    recompute_side_pots(table, &mut hand);

    let first = next_seat_from(table, bb_seat, |p| p.can_act());
    let status = open_betting(table, &mut hand, first);
    Ok((hand, status))
}

/// Поставить блайнд. Короткий стек ставит что есть и уходит в олл-ин.
fn post_blind(
    table: &mut Table,
    hand: &mut HandEngine,
    seat: SeatIndex,
    amount: Chips,
    big: bool,
) -> Result<(), EngineError> {
    let player = table
        .seats
        .get_mut(seat as usize)
        .and_then(|s| s.as_mut())
        .ok_or(EngineError::InvalidSeat(seat))?;

    let paid = player.commit(amount);
    player.last_action = Some(if big {
        LastAction::BigBlind
    } else {
        LastAction::SmallBlind
    });
    player.last_amount = paid;

    if player.bet_this_street > hand.betting.highest_bet {
        hand.betting.highest_bet = player.bet_this_street;
    }
    hand.history.push(HandEventKind::BlindPosted {
        player_id: player.player_id,
        amount: paid,
        big,
    });
    Ok(())
}

/// Раздать по 2 карты: два круга по одной, начиная слева от дилера.
fn deal_hole_cards(
    table: &mut Table,
    hand: &mut HandEngine,
    dealer: SeatIndex,
) -> Result<(), EngineError> {
    let max = table.max_seats();
    let order: Vec<usize> = (1..=max)
        .map(|i| ((dealer + i) % max) as usize)
        .filter(|&idx| table.seats[idx].as_ref().is_some_and(|p| p.is_in_hand()))
        .collect();

    for _round in 0..2 {
        for &idx in &order {
            let card = hand.deck.draw()?;
            if let Some(p) = table.seats[idx].as_mut() {
                p.hole_cards.push(card);
            }
        }
    }

    for &idx in &order {
        if let Some(p) = table.seats[idx].as_ref() {
            hand.history.push(HandEventKind::HoleCardsDealt {
                player_id: p.player_id,
            });
        }
    }
    Ok(())
}

/// Засеять очередь улицы с `first` и назначить текущего.
/// Если ходить некому - улица сразу закрыта.
fn open_betting(table: &Table, hand: &mut HandEngine, first: Option<SeatIndex>) -> HandStatus {
    let first_player = first.and_then(|s| table.player_at(s)).map(|p| p.player_id);
    match (first, first_player) {
        (Some(seat), Some(id)) => {
            hand.betting.pending = PendingQueue::seed_from(table, seat);
            hand.current_actor = Some(id);
            HandStatus::AwaitingAction(id)
        }
        _ => {
            hand.betting.pending.clear();
            hand.current_actor = None;
            HandStatus::BettingClosed
        }
    }
}

/// Применить действие игрока (ручное или авто - путь один и тот же).
///
/// Действие не от текущего игрока или не по правилам - ошибка,
/// состояние при этом не меняется.
pub fn apply_action(
    table: &mut Table,
    hand: &mut HandEngine,
    action: PlayerAction,
) -> Result<HandStatus, EngineError> {
    let PlayerAction {
        player_id,
        kind,
        origin,
    } = action;

    if !table.state.is_betting() {
        return Err(EngineError::NoActiveHand);
    }
    if hand.current_actor != Some(player_id) {
        return Err(EngineError::NotPlayersTurn(player_id));
    }

    let player = table
        .player_mut(&player_id)
        .ok_or(EngineError::PlayerNotAtTable(player_id))?;
    let validated = validate_action(player, &kind, &hand.betting)?;
    let seat = player.seat;
    let auto = origin.is_auto();

    let (label, amount) = match validated {
        ValidatedAction::Fold => {
            player.status = PlayerStatus::Folded;
            let label = if auto {
                LastAction::AutoFold
            } else {
                LastAction::Fold
            };
            (label, Chips::ZERO)
        }
        ValidatedAction::Check => {
            let label = if auto {
                LastAction::AutoCheck
            } else {
                LastAction::Check
            };
            (label, Chips::ZERO)
        }
        ValidatedAction::Call { pay } => (LastAction::Call, player.commit(pay)),
        ValidatedAction::Raise { pay, all_in } => {
            let paid = player.commit(pay);
            let label = if all_in {
                LastAction::AllIn
            } else {
                LastAction::Raise
            };
            (label, paid)
        }
    };
    player.last_action = Some(label);
    player.last_amount = amount;
    let bet_now = player.bet_this_street;

    debug!("[{}] {} -> {} {}", table.code, player_id, label, amount);
    hand.history.push(HandEventKind::PlayerActed {
        player_id,
        action: label,
        amount,
        origin,
    });

    hand.betting.mark_acted(player_id);
    if bet_now > hand.betting.highest_bet {
        hand.betting.on_aggression(table, player_id, seat, bet_now);
    }
    recompute_side_pots(table, &mut *hand);

    if table.contesting_count() == 1 {
        return finish_if_single_contestant(table, hand);
    }

    Ok(pass_turn(table, hand, seat))
}

/// Следующий из очереди после `from_seat`, либо улица закрыта.
fn pass_turn(table: &Table, hand: &mut HandEngine, from_seat: SeatIndex) -> HandStatus {
    match hand.betting.pending.next_after(table, from_seat) {
        Some(next) => {
            hand.current_actor = Some(next);
            HandStatus::AwaitingAction(next)
        }
        None => {
            hand.current_actor = None;
            HandStatus::BettingClosed
        }
    }
}

fn finish_if_single_contestant(
    table: &mut Table,
    hand: &mut HandEngine,
) -> Result<HandStatus, EngineError> {
    let winner = table
        .players()
        .find(|p| p.is_contesting())
        .map(|p| p.player_id)
        .ok_or(EngineError::Internal("нет оставшегося игрока"))?;
    Ok(HandStatus::Finished(end_hand_single_winner(table, hand, winner)))
}

/// Авто-действие по таймауту: check, если доплачивать нечего, иначе fold.
pub fn timeout_action(table: &Table, hand: &HandEngine, player_id: PlayerId) -> Option<PlayerActionKind> {
    let player = table.player(&player_id)?;
    if !player.can_act() {
        return None;
    }
    if player.to_call(hand.betting.highest_bet).is_zero() {
        Some(PlayerActionKind::Check)
    } else {
        Some(PlayerActionKind::Fold)
    }
}

/// Переход после закрытой улицы (вызывается после паузы):
/// - остался один претендент - он забирает банк;
/// - ходить может не больше одного - докладываем борд и шоудаун;
/// - после ривера - шоудаун;
/// - иначе сдаём следующую улицу и открываем торговлю после дилера.
pub fn advance_street(table: &mut Table, hand: &mut HandEngine) -> Result<HandStatus, EngineError> {
    if !table.state.is_betting() {
        return Err(EngineError::NoActiveHand);
    }

    let contesting = table.contesting_count();
    if contesting == 0 {
        return Err(EngineError::Internal("в раздаче никого не осталось"));
    }
    if contesting == 1 {
        return finish_if_single_contestant(table, hand);
    }

    let can_act = table.can_act_count();
    if can_act == 0 || (can_act == 1 && contesting > 1) {
        debug!("[{}] ходить некому, докладываем борд", table.code);
        return go_showdown(table, hand).map(HandStatus::Finished);
    }

    let Some((next_state, count)) = table.state.next_street() else {
        return go_showdown(table, hand).map(HandStatus::Finished);
    };

    for p in table.players_mut() {
        p.bet_this_street = Chips::ZERO;
        if p.can_act() {
            p.last_action = None;
            p.last_amount = Chips::ZERO;
        }
    }

    let cards = hand.deck.draw_n(count)?;
    table.board.extend_from_slice(&cards);
    table.state = next_state;
    hand.history.push(HandEventKind::BoardDealt {
        street: next_state,
        cards,
    });

    hand.betting.start_street(table.config.stakes.big_blind);
    recompute_side_pots(table, hand);

    let first = match table.dealer_button {
        Some(dealer) => next_seat_from(table, dealer, |p| p.can_act()),
        None => None,
    };
    Ok(open_betting(table, hand, first))
}

/// Шоудаун: докладываем борд до 5 карт, открываем руки, делим банк по уровням.
pub fn go_showdown(table: &mut Table, hand: &mut HandEngine) -> Result<HandSummary, EngineError> {
    table.state = TableState::Showdown;
    hand.current_actor = None;
    hand.betting.pending.clear();

    let missing = 5usize.saturating_sub(table.board.len());
    if missing > 0 {
        let cards = hand.deck.draw_n(missing)?;
        table.board.extend_from_slice(&cards);
        hand.history.push(HandEventKind::BoardDealt {
            street: TableState::Showdown,
            cards,
        });
    }

    let mut contributions = Vec::new();
    for p in table.players() {
        let rank = if p.is_contesting() {
            evaluate_best_hand(&p.hole_cards, &table.board)
        } else {
            None
        };
        if let Some(rank) = rank {
            hand.history.push(HandEventKind::ShowdownReveal {
                player_id: p.player_id,
                hole_cards: p.hole_cards.clone(),
                rank,
            });
        }
        if !p.total_committed.is_zero() {
            contributions.push(Contribution {
                player_id: p.player_id,
                seat: p.seat,
                committed: p.total_committed,
                folded: !p.is_contesting(),
                rank,
            });
        }
    }

    let total_pot = table.pot_total();
    let settlement = settle(&contributions);
    for pot in &settlement.pots {
        if !pot.eligible.is_empty() && !pot.winners.is_empty() {
            hand.history.push(HandEventKind::PotAwarded {
                player_ids: pot.winners.clone(),
                amount: pot.amount,
            });
        }
    }

    let mut awards = Vec::new();
    for p in table.players_mut() {
        let won = settlement.won_by(&p.player_id);
        let was_in_hand = p.is_in_hand();
        p.stack += won;
        p.total_committed = Chips::ZERO;
        p.bet_this_street = Chips::ZERO;
        if p.is_contesting() {
            p.reveal = true;
        }
        if !won.is_zero() {
            p.last_action = Some(LastAction::Win);
            p.last_amount = won;
            awards.push(PotAward {
                player_id: p.player_id,
                seat: p.seat,
                amount: won,
            });
        } else if p.is_all_in() {
            p.last_action = Some(LastAction::AllIn);
        } else if was_in_hand && p.status == PlayerStatus::Folded {
            p.last_action = Some(LastAction::Fold);
        }
    }

    hand.side_pots = settlement.pots;
    hand.history.push(HandEventKind::HandFinished {
        hand_id: hand.hand_id,
    });
    info!(
        "[{}] раздача #{} завершена шоудауном, банк {}, выплаты: {:?}",
        table.code, hand.hand_id, total_pot, awards
    );

    Ok(HandSummary {
        hand_id: hand.hand_id,
        board: table.board.clone(),
        total_pot,
        awards,
        went_to_showdown: true,
    })
}

/// Досрочное завершение: остался один претендент, он забирает весь банк.
/// Остальные выбывают из раздачи, стол уходит в ожидание.
pub fn end_hand_single_winner(
    table: &mut Table,
    hand: &mut HandEngine,
    winner: PlayerId,
) -> HandSummary {
    let total_pot = table.pot_total();
    let mut awards = Vec::new();

    for p in table.players_mut() {
        p.total_committed = Chips::ZERO;
        p.bet_this_street = Chips::ZERO;
        if p.player_id == winner {
            p.stack += total_pot;
            p.last_action = Some(LastAction::Win);
            p.last_amount = total_pot;
            awards.push(PotAward {
                player_id: p.player_id,
                seat: p.seat,
                amount: total_pot,
            });
        } else {
            p.status = PlayerStatus::SittingOut;
            p.hole_cards.clear();
            p.reveal = false;
        }
    }

    table.state = TableState::Waiting;
    hand.current_actor = None;
    hand.betting.pending.clear();
    hand.side_pots.clear();
    hand.history.push(HandEventKind::PotAwarded {
        player_ids: vec![winner],
        amount: total_pot,
    });
    hand.history.push(HandEventKind::HandFinished {
        hand_id: hand.hand_id,
    });
    info!(
        "[{}] раздача #{}: все сбросили, {} забирает {}",
        table.code, hand.hand_id, winner, total_pot
    );

    HandSummary {
        hand_id: hand.hand_id,
        board: table.board.clone(),
        total_pot,
        awards,
        went_to_showdown: false,
    }
}

/// Пересчитать сайд-поты по текущим вкладам.
pub fn recompute_side_pots(table: &Table, hand: &mut HandEngine) {
    let contributions: Vec<Contribution> = table
        .players()
        .filter(|p| !p.total_committed.is_zero())
        .map(|p| Contribution {
            player_id: p.player_id,
            seat: p.seat,
            committed: p.total_committed,
            folded: !p.is_contesting(),
            rank: None,
        })
        .collect();
    hand.side_pots = compute_side_pots(&contributions);
}
