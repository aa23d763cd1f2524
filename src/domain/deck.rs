use serde::{Deserialize, Serialize};

use crate::domain::card::{Card, Rank, Suit, JOKER};

/// Размер колоды для секи: 5 рангов × 4 масти + джокер.
pub const SEKA_DECK_SIZE: usize = 21;

/// Сколько карт получает каждый игрок.
pub const HAND_SIZE: usize = 3;

/// Колода карт. В домене: просто упорядоченный список карт.
/// Перемешивание делает engine (через RNG из infra), НЕ здесь.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Deck {
    pub cards: Vec<Card>,
}

impl Deck {
    /// 21-карточная колода в порядке:
    /// джокер, затем Hearts 10..A, Diamonds 10..A, Clubs 10..A, Spades 10..A.
    ///
    /// Карты берутся с конца, поэтому без перемешивания первым уходит туз пик.
    pub fn seka_21() -> Self {
        let mut cards = Vec::with_capacity(SEKA_DECK_SIZE);
        cards.push(JOKER);
        for suit in Suit::ALL {
            for rank in Rank::DECK_RANKS {
                cards.push(Card::new(rank, suit));
            }
        }
        Deck { cards }
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Взять n карт сверху. Если карт не хватает: None, колода не трогается.
    pub fn draw_n(&mut self, n: usize) -> Option<Vec<Card>> {
        if self.cards.len() < n {
            return None;
        }
        let split_at = self.cards.len() - n;
        let mut taken = self.cards.split_off(split_at);
        taken.reverse();
        Some(taken)
    }
}
