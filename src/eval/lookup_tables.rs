use crate::domain::card::Rank;

/// Битовая маска рангов.
///
/// Используем 13 бит (от 2 до A):
/// бит 0 = двойка, бит 12 = туз.
pub type RankMask = u16;

/// Маски всех возможных стритов, от wheel (A2345) до broadway (TJQKA).
/// Вторая компонента - старшая карта стрита; у wheel это пятёрка.
pub const STRAIGHTS: [(RankMask, Rank); 10] = [
    (mask_from_ranks(&[Rank::Ace, Rank::Two, Rank::Three, Rank::Four, Rank::Five]), Rank::Five),
    (mask_from_ranks(&[Rank::Two, Rank::Three, Rank::Four, Rank::Five, Rank::Six]), Rank::Six),
    (mask_from_ranks(&[Rank::Three, Rank::Four, Rank::Five, Rank::Six, Rank::Seven]), Rank::Seven),
    (mask_from_ranks(&[Rank::Four, Rank::Five, Rank::Six, Rank::Seven, Rank::Eight]), Rank::Eight),
    (mask_from_ranks(&[Rank::Five, Rank::Six, Rank::Seven, Rank::Eight, Rank::Nine]), Rank::Nine),
    (mask_from_ranks(&[Rank::Six, Rank::Seven, Rank::Eight, Rank::Nine, Rank::Ten]), Rank::Ten),
    (mask_from_ranks(&[Rank::Seven, Rank::Eight, Rank::Nine, Rank::Ten, Rank::Jack]), Rank::Jack),
    (mask_from_ranks(&[Rank::Eight, Rank::Nine, Rank::Ten, Rank::Jack, Rank::Queen]), Rank::Queen),
    (mask_from_ranks(&[Rank::Nine, Rank::Ten, Rank::Jack, Rank::Queen, Rank::King]), Rank::King),
    (mask_from_ranks(&[Rank::Ten, Rank::Jack, Rank::Queen, Rank::King, Rank::Ace]), Rank::Ace),
];

/// Получить битовую маску для одного ранга.
pub fn rank_to_bit(rank: Rank) -> RankMask {
    1u16 << (rank.value() - 2)
}

/// Построить маску из списка рангов.
pub const fn mask_from_ranks(ranks: &[Rank]) -> RankMask {
    let mut mask: RankMask = 0;
    let mut i = 0;
    while i < ranks.len() {
        let idx = (ranks[i] as u8) - 2;
        mask |= 1 << idx;
        i += 1;
    }
    mask
}

/// Найти стрит в битовой маске рангов.
/// Возвращает старшую карту стрита, если он есть (wheel → Rank::Five).
pub fn detect_straight(rank_mask: RankMask) -> Option<Rank> {
    // От сильнейшего к слабейшему.
    STRAIGHTS
        .iter()
        .rev()
        .find(|(mask, _)| rank_mask & mask == *mask)
        .map(|(_, high)| *high)
}
