use core::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Масть карты.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Suit {
    Hearts,   // ♥
    Diamonds, // ♦
    Clubs,    // ♣
    Spades,   // ♠
}

impl Suit {
    pub const ALL: [Suit; 4] = [Suit::Hearts, Suit::Diamonds, Suit::Clubs, Suit::Spades];

    pub fn symbol(self) -> char {
        match self {
            Suit::Hearts => '♥',
            Suit::Diamonds => '♦',
            Suit::Clubs => '♣',
            Suit::Spades => '♠',
        }
    }
}

/// Ранг карты. В секе используются только 6..A.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, Ord, PartialOrd)]
pub enum Rank {
    Six = 6,
    Seven,
    Eight,
    Nine,
    Ten,
    Jack,
    Queen,
    King,
    Ace,
}

impl Rank {
    /// Старшие ранги, из которых собирается колода (по четыре масти каждый).
    pub const DECK_RANKS: [Rank; 5] = [Rank::Ten, Rank::Jack, Rank::Queen, Rank::King, Rank::Ace];

    pub fn label(self) -> &'static str {
        match self {
            Rank::Six => "6",
            Rank::Seven => "7",
            Rank::Eight => "8",
            Rank::Nine => "9",
            Rank::Ten => "10",
            Rank::Jack => "J",
            Rank::Queen => "Q",
            Rank::King => "K",
            Rank::Ace => "A",
        }
    }
}

/// Карта. Сравнение: по значению (ранг + масть).
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Card {
    pub rank: Rank,
    pub suit: Suit,
}

/// Джокер: шестёрка треф. Определяется строго по идентичности карты.
pub const JOKER: Card = Card::new(Rank::Six, Suit::Clubs);

impl Card {
    pub const fn new(rank: Rank, suit: Suit) -> Self {
        Self { rank, suit }
    }

    pub fn is_joker(&self) -> bool {
        *self == JOKER
    }

    pub fn is_ace(&self) -> bool {
        self.rank == Rank::Ace
    }
}

impl fmt::Display for Suit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl fmt::Display for Card {
    /// Формат вида `A♥`, `10♦`, `6♣`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.rank, self.suit)
    }
}

/// Парсинг строк вида "A♥", "10♦", "Ah", "Td", "6c".
///
/// Клиенты присылают карты строками; перед подсчётом очков они
/// всегда превращаются в `Card`, отдельной «строковой» оценки нет.
impl FromStr for Card {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let mut chars: Vec<char> = s.chars().collect();
        let suit_ch = chars
            .pop()
            .ok_or_else(|| "Пустая строка карты".to_string())?;
        let rank_str: String = chars.into_iter().collect();

        let rank = match rank_str.to_ascii_uppercase().as_str() {
            "6" => Rank::Six,
            "7" => Rank::Seven,
            "8" => Rank::Eight,
            "9" => Rank::Nine,
            "10" | "T" => Rank::Ten,
            "J" => Rank::Jack,
            "Q" => Rank::Queen,
            "K" => Rank::King,
            "A" => Rank::Ace,
            _ => return Err(format!("Неизвестный ранг: {rank_str}")),
        };

        let suit = match suit_ch {
            '♥' | 'h' | 'H' => Suit::Hearts,
            '♦' | 'd' | 'D' => Suit::Diamonds,
            '♣' | 'c' | 'C' => Suit::Clubs,
            '♠' | 's' | 'S' => Suit::Spades,
            _ => return Err(format!("Неизвестная масть: {suit_ch}")),
        };

        Ok(Card { rank, suit })
    }
}

/// Разобрать список строковых карт.
pub fn parse_cards<S: AsRef<str>>(items: &[S]) -> Result<Vec<Card>, String> {
    items.iter().map(|s| s.as_ref().parse()).collect()
}
