use serde::{Deserialize, Serialize};

use crate::domain::card::Rank;
use crate::domain::hand::HandScore;

/// Комбинация секи. Каждой соответствует фиксированное число очков.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Combination {
    // --- три карты ---
    /// Сека: три карты одного ранга (или две + джокер).
    Seka(Rank),
    /// Джокер + туз + карта масти туза.
    SuitedAceWithJoker,
    /// Три карты одной масти с тузом, либо джокер + две карты одной масти.
    SuitedWithAceOrJoker,
    /// Три карты одной масти без туза и джокера.
    Suited,
    /// Один туз, три разные масти, без джокера.
    LoneAce,
    /// Ничего из перечисленного.
    Nothing,

    // --- две карты ---
    /// Два туза, либо туз + джокер.
    TwoAces,
    /// Одномастная пара с тузом, либо джокер + любая карта.
    SuitedPairWithAceOrJoker,
    /// Одномастная пара без туза и джокера; минимум для двух карт.
    Pair,
}

impl Combination {
    /// Очки комбинации.
    ///
    /// Сека бывает только из рангов колоды (10..A); для младших рангов
    /// `Seka` не строится, поэтому ветка с fallback недостижима.
    pub fn score(self) -> HandScore {
        let value = match self {
            Combination::Seka(rank) => seka_score(rank).unwrap_or(10),
            Combination::SuitedAceWithJoker => 32,
            Combination::SuitedWithAceOrJoker => 31,
            Combination::Suited => 30,
            Combination::LoneAce => 11,
            Combination::Nothing => 10,
            Combination::TwoAces => 22,
            Combination::SuitedPairWithAceOrJoker => 21,
            Combination::Pair => 20,
        };
        HandScore(value)
    }

    /// Человеческое описание комбинации.
    pub fn describe(self) -> String {
        match self {
            Combination::Seka(rank) => format!("Сека {}", rank.label()),
            Combination::SuitedAceWithJoker => "Масть с тузом и джокером".to_string(),
            Combination::SuitedWithAceOrJoker => "Масть с тузом или джокером".to_string(),
            Combination::Suited => "Три одной масти".to_string(),
            Combination::LoneAce => "Туз".to_string(),
            Combination::Nothing => "Пусто".to_string(),
            Combination::TwoAces => "Два туза".to_string(),
            Combination::SuitedPairWithAceOrJoker => "Масть с тузом или джокером (2 карты)".to_string(),
            Combination::Pair => "Две карты".to_string(),
        }
    }
}

/// Очки секи по рангу: десятки=33 … тузы=37.
pub fn seka_score(rank: Rank) -> Option<u32> {
    match rank {
        Rank::Ten => Some(33),
        Rank::Jack => Some(34),
        Rank::Queen => Some(35),
        Rank::King => Some(36),
        Rank::Ace => Some(37),
        _ => None,
    }
}
