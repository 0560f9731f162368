use crate::domain::card::{Card, Rank};
use crate::domain::deck::combinations;
use crate::domain::hand::HandRank;

use super::hand_rank::HandCategory;
use super::lookup_tables::{detect_straight, rank_to_bit, RankMask};

/// Лучшая 5-карточная рука из hole + board.
///
/// `None`, если вместе меньше 5 карт (например, до флопа).
pub fn evaluate_best_hand(hole: &[Card], board: &[Card]) -> Option<HandRank> {
    let mut all_cards = Vec::with_capacity(hole.len() + board.len());
    all_cards.extend_from_slice(hole);
    all_cards.extend_from_slice(board);
    best_hand_rank(&all_cards)
}

/// Перебираем все 5-карточные подмножества (21 для 7 карт) и выбираем лучшее.
pub fn best_hand_rank(cards: &[Card]) -> Option<HandRank> {
    combinations(cards, 5)
        .into_iter()
        .filter_map(|five| <[Card; 5]>::try_from(five).ok())
        .map(|five| rank_five(&five))
        .max()
}

/// Оценка строго 5-карточной комбинации.
pub fn rank_five(cards: &[Card; 5]) -> HandRank {
    let mut suit_counts = [0u8; 4];
    // Индексы 2..14.
    let mut rank_counts = [0u8; 15];
    let mut rank_mask: RankMask = 0;

    for card in cards.iter() {
        suit_counts[card.suit.index()] += 1;
        rank_counts[card.rank.value() as usize] += 1;
        rank_mask |= rank_to_bit(card.rank);
    }

    let is_flush = suit_counts.iter().any(|&c| c == 5);
    let straight_high = detect_straight(rank_mask);

    // (rank, count): сначала по количеству, затем по рангу, оба по убыванию.
    let mut groups: Vec<(Rank, u8)> = Rank::ALL
        .iter()
        .rev()
        .filter_map(|&r| {
            let c = rank_counts[r.value() as usize];
            (c > 0).then_some((r, c))
        })
        .collect();
    groups.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| b.0.cmp(&a.0)));

    let pattern: Vec<u8> = groups.iter().map(|g| g.1).collect();
    let ranks: Vec<Rank> = groups.iter().map(|g| g.0).collect();

    if let (true, Some(high)) = (is_flush, straight_high) {
        return HandRank::new(HandCategory::StraightFlush, &[high]);
    }

    match pattern.as_slice() {
        [4, 1] => return HandRank::new(HandCategory::FourOfAKind, &ranks),
        [3, 2] => return HandRank::new(HandCategory::FullHouse, &ranks),
        _ => {}
    }

    if is_flush {
        // Все ранги разные, groups уже по убыванию.
        return HandRank::new(HandCategory::Flush, &ranks);
    }

    if let Some(high) = straight_high {
        return HandRank::new(HandCategory::Straight, &[high]);
    }

    let category = match pattern.as_slice() {
        [3, 1, 1] => HandCategory::ThreeOfAKind,
        [2, 2, 1] => HandCategory::TwoPair,
        [2, 1, 1, 1] => HandCategory::OnePair,
        _ => HandCategory::HighCard,
    };
    HandRank::new(category, &ranks)
}
