// tests/distribution_tests.rs

//! Тесты раздачи:
//! - по 3 карты каждому играющему, без повторов;
//! - сброс банка/ставок/круга, переход в торги;
//! - проверки фазы и кворума;
//! - пересдача только участникам спора;
//! - одинаковый seed → одинаковая раздача.

mod common;

use std::collections::HashSet;

use common::{seated_game, started_game, started_game_with, DummyRng};
use seka_engine::domain::{parse_cards, Chips, Game, GameStatus, PlayerStatus, HAND_SIZE};
use seka_engine::engine::{distribute, redistribute_for_quarrel, EngineError, EventLog};
use seka_engine::infra::DeterministicRng;
use seka_engine::time_ctrl::{mark_ready, start_game, TimingRules};

#[test]
fn every_player_gets_three_distinct_cards() {
    let game = started_game(&[1000, 1000, 1000]);
    let mut seen = HashSet::new();
    for p in game.players() {
        assert_eq!(p.hand().len(), HAND_SIZE);
        assert_eq!(p.status(), PlayerStatus::Active);
        for card in p.hand() {
            assert!(seen.insert(*card), "карта {card} выдана дважды");
        }
    }
    assert_eq!(seen.len(), 9);
}

#[test]
fn unshuffled_deck_deals_from_the_top_in_seat_order() {
    let game = started_game(&[1000, 1000, 1000]);
    assert_eq!(game.player(1).unwrap().hand(), parse_cards(&["A♠", "K♠", "Q♠"]).unwrap());
    assert_eq!(game.player(2).unwrap().hand(), parse_cards(&["J♠", "10♠", "A♣"]).unwrap());
    assert_eq!(game.player(3).unwrap().hand(), parse_cards(&["K♣", "Q♣", "J♣"]).unwrap());
}

#[test]
fn deal_resets_bidding_state() {
    let game = started_game(&[1000, 1000]);
    assert_eq!(game.status(), GameStatus::Bidding);
    assert_eq!(game.bank(), Chips::ZERO);
    assert_eq!(game.current_max_bet(), Chips::ZERO);
    assert_eq!(game.current_bidding_round(), 1);
    assert_eq!(game.current_player_position(), Some(1));
    assert!(game.players().iter().all(|p| p.current_bet().is_zero()));
}

#[test]
fn start_emits_game_started_then_cards() {
    let mut game = seated_game(&[1000, 1000]);
    let rules = TimingRules::standard();
    let mut events = EventLog::new();
    mark_ready(&mut game, 1, 0, &rules, &mut events).unwrap();
    mark_ready(&mut game, 2, 0, &rules, &mut events).unwrap();
    start_game(&mut game, &mut DummyRng, 0, &mut events).unwrap();
    assert_eq!(
        events.names(),
        vec!["PlayerReady", "PlayerReady", "GameStarted", "CardsDistributed"]
    );
}

#[test]
fn distribute_requires_distribution_phase() {
    let mut game = seated_game(&[1000, 1000]);
    let err = distribute(&mut game, &mut DummyRng, 0, &mut EventLog::new()).unwrap_err();
    assert!(matches!(
        err,
        EngineError::WrongPhase {
            expected: GameStatus::Distribution,
            actual: GameStatus::Waiting,
            ..
        }
    ));
}

#[test]
fn cannot_start_with_one_ready_player() {
    let mut game = seated_game(&[1000, 1000]);
    let mut events = EventLog::new();
    mark_ready(&mut game, 1, 0, &TimingRules::standard(), &mut events).unwrap();
    let err = start_game(&mut game, &mut DummyRng, 0, &mut events).unwrap_err();
    assert_eq!(err, EngineError::CannotStart {
            game_id: 1,
            ready: 1,
            required: 2
        });
    assert_eq!(game.status(), GameStatus::Waiting);
}

#[test]
fn seven_players_use_the_whole_deck() {
    let mut game = Game::new(1, 1, 7, 0);
    let rules = TimingRules::standard();
    let mut events = EventLog::new();
    for player_id in 1..=7 {
        game.seat_player(player_id, Chips(100)).unwrap();
        mark_ready(&mut game, player_id, 0, &rules, &mut events).unwrap();
    }
    start_game(&mut game, &mut DummyRng, 0, &mut events).unwrap();
    let dealt: HashSet<_> = game.players().iter().flat_map(|p| p.hand().to_vec()).collect();
    assert_eq!(dealt.len(), 21);
}

#[test]
fn quarrel_redeal_touches_only_participants() {
    let mut game = started_game(&[1000, 1000, 1000]);
    let p2_hand = game.player(2).unwrap().hand().to_vec();

    let dealt = redistribute_for_quarrel(&mut game, &[1, 3], &mut DummyRng).unwrap();
    assert_eq!(dealt.len(), 2);
    assert_eq!(game.player(1).unwrap().hand(), parse_cards(&["A♠", "K♠", "Q♠"]).unwrap());
    assert_eq!(game.player(3).unwrap().hand(), parse_cards(&["J♠", "10♠", "A♣"]).unwrap());
    assert_eq!(game.player(2).unwrap().hand(), p2_hand.as_slice());
}

#[test]
fn quarrel_redeal_rejects_unknown_players() {
    let mut game = started_game(&[1000, 1000]);
    let err = redistribute_for_quarrel(&mut game, &[1, 42], &mut DummyRng).unwrap_err();
    assert!(matches!(err, EngineError::PlayerNotFound { player_id: 42, .. }));
}

#[test]
fn same_seed_same_deal() {
    let a = started_game_with(&[1000, 1000, 1000], &mut DeterministicRng::from_seed(7));
    let b = started_game_with(&[1000, 1000, 1000], &mut DeterministicRng::from_seed(7));
    for (pa, pb) in a.players().iter().zip(b.players()) {
        assert_eq!(pa.hand(), pb.hand());
    }
}
