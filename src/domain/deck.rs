use serde::{Deserialize, Serialize};

use crate::domain::card::{Card, Rank, Suit};
use crate::engine::errors::EngineError;
use crate::engine::RandomSource;

/// Колода карт. Принадлежит только текущей раздаче, каждую раздачу
/// собирается заново.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    /// Стандартная 52-карточная колода в порядке:
    /// Clubs 2..A, Diamonds 2..A, Hearts 2..A, Spades 2..A.
    pub fn standard_52() -> Self {
        let mut cards = Vec::with_capacity(52);
        for suit in Suit::ALL {
            for rank in Rank::ALL {
                cards.push(Card::new(rank, suit));
            }
        }
        Deck { cards }
    }

    /// Новая перемешанная колода (Фишер–Йетс внутри `RandomSource`).
    pub fn shuffled(rng: &mut dyn RandomSource) -> Self {
        let mut deck = Self::standard_52();
        rng.shuffle(&mut deck.cards);
        deck
    }

    /// Пустая колода (между раздачами).
    pub fn empty() -> Self {
        Deck { cards: Vec::new() }
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Оставшиеся карты; верх колоды - последний элемент.
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Взять одну карту сверху колоды.
    pub fn draw(&mut self) -> Result<Card, EngineError> {
        self.cards.pop().ok_or(EngineError::DeckExhausted)
    }

    /// Взять n карт сверху. Либо все n, либо ошибка без частичного снятия.
    pub fn draw_n(&mut self, n: usize) -> Result<Vec<Card>, EngineError> {
        if self.cards.len() < n {
            return Err(EngineError::DeckExhausted);
        }
        let mut taken = Vec::with_capacity(n);
        for _ in 0..n {
            taken.push(self.draw()?);
        }
        Ok(taken)
    }
}

/// Все k-элементные подмножества `items` в лексикографическом порядке индексов.
///
/// Для k > len возвращает пустой список, для k = 0 - одно пустое подмножество.
pub fn combinations<T: Copy>(items: &[T], k: usize) -> Vec<Vec<T>> {
    let n = items.len();
    if k > n {
        return Vec::new();
    }

    let mut out = Vec::new();
    let mut idx: Vec<usize> = (0..k).collect();
    loop {
        out.push(idx.iter().map(|&i| items[i]).collect());

        // Ищем самую правую позицию, которую ещё можно сдвинуть.
        let mut i = k;
        loop {
            if i == 0 {
                return out;
            }
            i -= 1;
            if idx[i] != i + n - k {
                break;
            }
        }
        idx[i] += 1;
        for j in (i + 1)..k {
            idx[j] = idx[j - 1] + 1;
        }
    }
}
