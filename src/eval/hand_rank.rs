use crate::domain::card::Rank;
use crate::domain::hand::HandRank;

/// Категория покерной руки по силе.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum HandCategory {
    HighCard = 0,
    OnePair = 1,
    TwoPair = 2,
    ThreeOfAKind = 3,
    Straight = 4,
    Flush = 5,
    FullHouse = 6,
    FourOfAKind = 7,
    StraightFlush = 8,
}

impl HandCategory {
    /// Сколько рангов-тайбрейкеров значимо для категории.
    pub fn tiebreaker_len(self) -> usize {
        match self {
            HandCategory::StraightFlush | HandCategory::Straight => 1,
            HandCategory::FourOfAKind | HandCategory::FullHouse => 2,
            HandCategory::ThreeOfAKind | HandCategory::TwoPair => 3,
            HandCategory::OnePair => 4,
            HandCategory::Flush | HandCategory::HighCard => 5,
        }
    }

    fn from_id(id: u8) -> HandCategory {
        match id {
            1 => HandCategory::OnePair,
            2 => HandCategory::TwoPair,
            3 => HandCategory::ThreeOfAKind,
            4 => HandCategory::Straight,
            5 => HandCategory::Flush,
            6 => HandCategory::FullHouse,
            7 => HandCategory::FourOfAKind,
            8 => HandCategory::StraightFlush,
            _ => HandCategory::HighCard,
        }
    }
}

impl HandRank {
    /// Собрать HandRank из категории и тайбрейкеров (от старшего к младшему).
    ///
    /// Схема кодирования (u32):
    ///   [категория:4 бита][r0:4][r1:4][r2:4][r3:4][r4:4]
    /// Rank: 2..14 (2..A) влазит в 4 бита, незначимые позиции = 0.
    /// Сравнение чисел совпадает с лексикографическим сравнением
    /// `[категория, тайбрейкеры...]`.
    pub fn new(category: HandCategory, tiebreakers: &[Rank]) -> Self {
        let mut value = ((category as u32) & 0x0F) << 20;
        for (i, rank) in tiebreakers.iter().take(5).enumerate() {
            let shift = 16 - 4 * i as u32;
            value |= u32::from(rank.value()) << shift;
        }
        HandRank(value)
    }

    /// Вытащить категорию из HandRank.
    pub fn category(&self) -> HandCategory {
        HandCategory::from_id(((self.0 >> 20) & 0x0F) as u8)
    }

    /// Значимые ранги-тайбрейкеры (от старшего к младшему).
    pub fn tiebreakers(&self) -> Vec<Rank> {
        let len = self.category().tiebreaker_len();
        (0..len)
            .filter_map(|i| {
                let nibble = ((self.0 >> (16 - 4 * i as u32)) & 0x0F) as u8;
                Rank::from_value(nibble)
            })
            .collect()
    }
}

/// Человеческое описание руки: категория + старшие ранги.
pub fn describe_hand(rank: HandRank) -> String {
    let name = match rank.category() {
        HandCategory::HighCard => "High card",
        HandCategory::OnePair => "One pair",
        HandCategory::TwoPair => "Two pair",
        HandCategory::ThreeOfAKind => "Three of a kind",
        HandCategory::Straight => "Straight",
        HandCategory::Flush => "Flush",
        HandCategory::FullHouse => "Full house",
        HandCategory::FourOfAKind => "Four of a kind",
        HandCategory::StraightFlush => "Straight flush",
    };
    let ranks: Vec<String> = rank.tiebreakers().iter().map(|r| r.to_string()).collect();
    format!("{name} ({})", ranks.join(" "))
}
