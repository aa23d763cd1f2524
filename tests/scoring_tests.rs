// tests/scoring_tests.rs

//! Тесты оценки рук:
//! - граничные примеры из правил (сека, масть, туз);
//! - две карты;
//! - джокер определяется только по идентичности (6♣);
//! - неверный размер руки → InvalidHand;
//! - перестановка карт не меняет очки (proptest).

use proptest::prelude::*;

use seka_engine::domain::{parse_cards, Card, Deck, HandScore, Rank};
use seka_engine::engine::EngineError;
use seka_engine::eval::{classify, score, score_strings, Combination};

/// Хелпер: рука из строк.
fn hand(items: &[&str]) -> Vec<Card> {
    parse_cards(items).expect("карты должны разбираться")
}

fn points(items: &[&str]) -> u32 {
    score(&hand(items)).expect("рука должна оцениваться").0
}

#[test]
fn boundary_examples_match_the_rules() {
    assert_eq!(points(&["A♥", "A♦", "A♣"]), 37);
    assert_eq!(points(&["A♥", "A♦", "6♣"]), 37);
    assert_eq!(points(&["K♥", "K♦", "K♣"]), 36);
    assert_eq!(points(&["10♥", "J♥", "Q♥"]), 30);
    assert_eq!(points(&["A♣", "Q♣", "J♣"]), 31);
    assert_eq!(points(&["10♥", "J♠", "8♦"]), 10);
    assert_eq!(points(&["A♥", "A♠"]), 22);
    assert_eq!(points(&["10♥", "J♥"]), 20);
}

#[test]
fn seka_constants_for_every_rank() {
    assert_eq!(points(&["10♥", "10♦", "10♠"]), 33);
    assert_eq!(points(&["J♥", "J♦", "6♣"]), 34);
    assert_eq!(points(&["Q♥", "Q♦", "Q♣"]), 35);
    assert_eq!(points(&["K♠", "6♣", "K♦"]), 36);
    assert_eq!(
        classify(&hand(&["A♥", "A♦", "A♣"])).unwrap(),
        Combination::Seka(Rank::Ace)
    );
}

#[test]
fn joker_with_suited_ace_scores_32() {
    assert_eq!(points(&["6♣", "A♥", "K♥"]), 32);
    assert_eq!(points(&["A♦", "6♣", "10♦"]), 32);
}

#[test]
fn joker_with_suited_pair_without_ace_scores_31() {
    assert_eq!(points(&["6♣", "10♥", "J♥"]), 31);
}

#[test]
fn joker_without_pattern_falls_back_to_baseline() {
    assert_eq!(points(&["6♣", "A♥", "K♦"]), 10);
    assert_eq!(points(&["6♣", "Q♠", "K♦"]), 10);
}

#[test]
fn lone_ace_needs_three_distinct_suits() {
    assert_eq!(points(&["A♥", "K♦", "Q♣"]), 11);
    assert_eq!(points(&["A♥", "K♥", "Q♦"]), 10);
    // Два туза без третьего: не «одинокий туз».
    assert_eq!(points(&["A♥", "A♦", "Q♣"]), 10);
}

#[test]
fn two_card_hands() {
    assert_eq!(points(&["6♣", "A♦"]), 22);
    assert_eq!(points(&["6♣", "10♥"]), 21);
    assert_eq!(points(&["A♥", "K♥"]), 21);
    assert_eq!(points(&["A♥", "K♦"]), 20);
    assert_eq!(points(&["10♥", "J♦"]), 20);
}

#[test]
fn six_of_another_suit_is_not_a_joker() {
    assert_eq!(points(&["6♥", "A♥", "K♥"]), 31);
    assert_eq!(points(&["6♦", "10♥", "J♥"]), 10);
}

#[test]
fn wrong_hand_size_is_rejected() {
    assert_eq!(score(&hand(&["A♥"])), Err(EngineError::InvalidHand(1)));
    assert_eq!(score(&[]), Err(EngineError::InvalidHand(0)));
    assert_eq!(
        score(&hand(&["A♥", "A♦", "A♣", "A♠"])),
        Err(EngineError::InvalidHand(4))
    );
}

#[test]
fn string_input_goes_through_the_same_scoring() {
    assert_eq!(score_strings(&["Ah", "Ad", "6c"]), Ok(HandScore(37)));
    assert_eq!(score_strings(&["Td", "Jd", "Qd"]), Ok(HandScore(30)));
    assert_eq!(
        score_strings(&["Ah", "Ad", "6c"]),
        score(&hand(&["A♥", "A♦", "6♣"]))
    );
    assert!(matches!(
        score_strings(&["Zz", "Ad", "6c"]),
        Err(EngineError::InvalidCard(_))
    ));
}

fn three_card_hand() -> impl Strategy<Value = (Vec<Card>, Vec<Card>)> {
    prop::sample::subsequence(Deck::seka_21().cards, 3)
        .prop_flat_map(|cards| (Just(cards.clone()), Just(cards).prop_shuffle()))
}

fn two_card_hand() -> impl Strategy<Value = (Vec<Card>, Vec<Card>)> {
    prop::sample::subsequence(Deck::seka_21().cards, 2)
        .prop_flat_map(|cards| (Just(cards.clone()), Just(cards).prop_shuffle()))
}

proptest! {
    #[test]
    fn permuting_three_cards_keeps_the_score((cards, shuffled) in three_card_hand()) {
        prop_assert_eq!(score(&cards), score(&shuffled));
    }

    #[test]
    fn permuting_two_cards_keeps_the_score((cards, shuffled) in two_card_hand()) {
        prop_assert_eq!(score(&cards), score(&shuffled));
    }

    #[test]
    fn three_card_scores_stay_in_known_range((cards, _) in three_card_hand()) {
        let s = score(&cards).unwrap().0;
        prop_assert!(matches!(s, 10 | 11 | 30..=37), "неожиданные очки {}", s);
    }
}
