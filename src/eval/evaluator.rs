use crate::domain::card::{parse_cards, Card};
use crate::domain::hand::HandScore;
use crate::engine::errors::EngineError;

use super::combination::{seka_score, Combination};

/// Главная функция: очки руки из 2 или 3 карт.
///
/// Результат зависит только от мультимножества карт, порядок не важен.
pub fn score(hand: &[Card]) -> Result<HandScore, EngineError> {
    classify(hand).map(Combination::score)
}

/// Очки руки, заданной строками ("A♥", "10♦", "Ah" ...).
/// Строки сначала превращаются в `Card`, дальше: тот же `score`.
pub fn score_strings<S: AsRef<str>>(cards: &[S]) -> Result<HandScore, EngineError> {
    let hand = parse_cards(cards).map_err(EngineError::InvalidCard)?;
    score(&hand)
}

/// Определить комбинацию руки.
pub fn classify(hand: &[Card]) -> Result<Combination, EngineError> {
    let split = JokerSplit::of(hand);
    match hand.len() {
        3 => Ok(classify_three(&split)),
        2 => Ok(classify_two(&split)),
        n => Err(EngineError::InvalidHand(n)),
    }
}

/// Рука, разделённая на джокеров и обычные карты.
struct JokerSplit {
    jokers: usize,
    naturals: Vec<Card>,
}

impl JokerSplit {
    fn of(hand: &[Card]) -> Self {
        let naturals: Vec<Card> = hand.iter().copied().filter(|c| !c.is_joker()).collect();
        Self {
            jokers: hand.len() - naturals.len(),
            naturals,
        }
    }

    fn has_joker(&self) -> bool {
        self.jokers > 0
    }

    fn ace_count(&self) -> usize {
        self.naturals.iter().filter(|c| c.is_ace()).count()
    }

    fn all_same_suit(&self) -> bool {
        self.naturals.windows(2).all(|w| w[0].suit == w[1].suit)
    }

    fn all_same_rank(&self) -> bool {
        self.naturals.windows(2).all(|w| w[0].rank == w[1].rank)
    }
}

fn classify_three(hand: &JokerSplit) -> Combination {
    // 1. Сека: три одного ранга либо две + джокер.
    let seka_rank = match (hand.jokers, hand.naturals.as_slice()) {
        (0, [a, ..]) | (1, [a, _]) if hand.all_same_rank() => Some(a.rank),
        _ => None,
    };
    if let Some(rank) = seka_rank.filter(|r| seka_score(*r).is_some()) {
        return Combination::Seka(rank);
    }

    // 2. Джокер + туз + карта масти туза.
    if hand.jokers == 1 {
        if let [a, b] = hand.naturals.as_slice() {
            if (a.is_ace() || b.is_ace()) && a.suit == b.suit {
                return Combination::SuitedAceWithJoker;
            }
        }
    }

    // 3. Три одной масти с тузом, либо джокер + две одной масти.
    let natural_flush = hand.jokers == 0 && hand.all_same_suit();
    let joker_flush = hand.jokers == 1 && hand.naturals.len() == 2 && hand.all_same_suit();
    if (natural_flush && hand.ace_count() > 0) || joker_flush {
        return Combination::SuitedWithAceOrJoker;
    }

    // 4. Три одной масти без туза и джокера.
    if natural_flush {
        return Combination::Suited;
    }

    // 5. Ровно один туз, три разные масти, без джокера.
    if !hand.has_joker() && hand.ace_count() == 1 && distinct_suits(&hand.naturals) == 3 {
        return Combination::LoneAce;
    }

    Combination::Nothing
}

fn classify_two(hand: &JokerSplit) -> Combination {
    let aces = hand.ace_count();
    if aces == 2 || (hand.has_joker() && aces == 1) {
        return Combination::TwoAces;
    }
    if hand.has_joker() || (hand.all_same_suit() && aces > 0) {
        return Combination::SuitedPairWithAceOrJoker;
    }
    Combination::Pair
}

fn distinct_suits(cards: &[Card]) -> usize {
    let mut suits: Vec<_> = cards.iter().map(|c| c.suit).collect();
    suits.sort();
    suits.dedup();
    suits.len()
}
