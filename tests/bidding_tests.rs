// tests/bidding_tests.rs

//! Тесты торгов:
//! - очередь хода по позициям, переход круга;
//! - Raise / Call / Check / Fold и их ошибки;
//! - игра «в тёмную» (половина ставки, без check), Open, Reveal;
//! - завершение круга и раздачи;
//! - неудачное действие ничего не меняет, фишки сохраняются (proptest).

mod common;

use proptest::prelude::*;

use common::{balance, bet, started_game};
use seka_engine::domain::{Chips, GameStatus, PlayerStatus};
use seka_engine::engine::{
    is_bidding_round_complete, is_hand_over, process_action, BidAction, EngineError, EventLog,
};

#[test]
fn turn_moves_by_position_and_wraps() {
    let mut game = started_game(&[1000, 1000, 1000]);
    let mut events = EventLog::new();
    assert_eq!(game.current_player_position(), Some(1));
    assert_eq!(game.dealer_position(), Some(3));

    let out = process_action(&mut game, 1, BidAction::Check, 1, &mut events).unwrap();
    assert_eq!(out.next_position, Some(2));
    assert!(!out.hand_over);

    process_action(&mut game, 2, BidAction::Check, 2, &mut events).unwrap();
    assert_eq!(game.current_bidding_round(), 1);

    let out = process_action(&mut game, 3, BidAction::Check, 3, &mut events).unwrap();
    assert_eq!(out.next_position, Some(1));
    assert_eq!(game.current_bidding_round(), 2);
    assert!(out.round_complete);
    assert!(out.hand_over);
    assert_eq!(events.names(), vec!["PlayerActionTaken"; 3]);
}

#[test]
fn folded_seats_are_skipped() {
    let mut game = started_game(&[1000, 1000, 1000]);
    let mut events = EventLog::new();
    process_action(&mut game, 1, BidAction::Check, 1, &mut events).unwrap();
    process_action(&mut game, 2, BidAction::Fold, 2, &mut events).unwrap();
    process_action(&mut game, 3, BidAction::Raise(Chips(10)), 3, &mut events).unwrap();
    let out = process_action(&mut game, 1, BidAction::Call, 4, &mut events).unwrap();
    assert_eq!(out.next_position, Some(3));
    assert!(game.player(2).unwrap().hand().is_empty());
}

#[test]
fn acting_refreshes_timers() {
    let mut game = started_game(&[1000, 1000]);
    let mut events = EventLog::new();
    process_action(&mut game, 1, BidAction::Check, 5_000, &mut events).unwrap();
    assert_eq!(game.player(1).unwrap().last_action_at(), Some(5_000));
    // Таймер следующего игрока запускается его ходом.
    assert_eq!(game.player(2).unwrap().last_action_at(), Some(5_000));
}

#[test]
fn raise_then_call() {
    let mut game = started_game(&[1000, 1000, 1000]);
    let mut events = EventLog::new();

    let out = process_action(&mut game, 1, BidAction::Raise(Chips(20)), 1, &mut events).unwrap();
    assert_eq!(out.paid, Chips(20));
    assert_eq!(balance(&game, 1), Chips(980));
    assert_eq!(bet(&game, 1), Chips(20));
    assert_eq!(game.current_max_bet(), Chips(20));
    assert_eq!(game.bank(), Chips(20));

    process_action(&mut game, 2, BidAction::Call, 2, &mut events).unwrap();
    assert_eq!(balance(&game, 2), Chips(980));
    assert_eq!(bet(&game, 2), Chips(20));
    assert_eq!(game.bank(), Chips(40));
    assert!(!is_bidding_round_complete(&game));

    let out = process_action(&mut game, 3, BidAction::Fold, 3, &mut events).unwrap();
    assert!(out.round_complete);
    assert!(out.hand_over);
    assert_eq!(game.player(3).unwrap().status(), PlayerStatus::Folded);
}

#[test]
fn call_when_matched_is_a_noop() {
    let mut game = started_game(&[1000, 1000]);
    let mut events = EventLog::new();
    let out = process_action(&mut game, 1, BidAction::Call, 1, &mut events).unwrap();
    assert_eq!(out.paid, Chips::ZERO);
    assert_eq!(balance(&game, 1), Chips(1000));
    assert_eq!(game.current_player_position(), Some(2));
}

#[test]
fn raise_must_exceed_current_max() {
    let mut game = started_game(&[1000, 1000, 1000]);
    let mut events = EventLog::new();
    process_action(&mut game, 1, BidAction::Raise(Chips(20)), 1, &mut events).unwrap();
    let err = process_action(&mut game, 2, BidAction::Raise(Chips(10)), 2, &mut events).unwrap_err();
    assert!(matches!(err, EngineError::InvalidAction { .. }));

    process_action(&mut game, 2, BidAction::Raise(Chips(50)), 2, &mut events).unwrap();
    assert_eq!(game.current_max_bet(), Chips(50));
}

#[test]
fn check_with_money_owed_fails() {
    let mut game = started_game(&[1000, 1000]);
    let mut events = EventLog::new();
    process_action(&mut game, 1, BidAction::Raise(Chips(20)), 1, &mut events).unwrap();
    let err = process_action(&mut game, 2, BidAction::Check, 2, &mut events).unwrap_err();
    assert_eq!(
        err,
        EngineError::CannotCheck {
            player_id: 2,
            due: Chips(20)
        }
    );
}

#[test]
fn out_of_turn_and_inactive_players_are_rejected() {
    let mut game = started_game(&[1000, 1000, 1000]);
    let mut events = EventLog::new();
    let err = process_action(&mut game, 2, BidAction::Check, 1, &mut events).unwrap_err();
    assert_eq!(err, EngineError::NotYourTurn { game_id: 1, player_id: 2 });

    process_action(&mut game, 1, BidAction::Raise(Chips(20)), 1, &mut events).unwrap();
    process_action(&mut game, 2, BidAction::Call, 2, &mut events).unwrap();
    process_action(&mut game, 3, BidAction::Fold, 3, &mut events).unwrap();
    let err = process_action(&mut game, 3, BidAction::Call, 4, &mut events).unwrap_err();
    assert_eq!(
        err,
        EngineError::PlayerCannotAct {
            player_id: 3,
            status: PlayerStatus::Folded
        }
    );

    let err = process_action(&mut game, 99, BidAction::Call, 4, &mut events).unwrap_err();
    assert!(matches!(err, EngineError::PlayerNotFound { player_id: 99, .. }));
}

#[test]
fn insufficient_funds_leaves_everything_untouched() {
    let mut game = started_game(&[100, 1000]);
    let before = game.clone();
    let mut events = EventLog::new();
    let err = process_action(&mut game, 1, BidAction::Raise(Chips(200)), 1, &mut events).unwrap_err();
    assert_eq!(
        err,
        EngineError::InsufficientFunds {
            player_id: 1,
            required: Chips(200),
            available: Chips(100)
        }
    );
    assert_eq!(game, before);
    assert!(events.is_empty());
}

#[test]
fn dark_player_pays_half() {
    let mut game = started_game(&[1000, 1000, 1000]);
    let mut events = EventLog::new();
    process_action(&mut game, 1, BidAction::Dark, 1, &mut events).unwrap();
    assert!(game.player(1).unwrap().is_dark());

    process_action(&mut game, 2, BidAction::Raise(Chips(20)), 2, &mut events).unwrap();
    process_action(&mut game, 3, BidAction::Call, 3, &mut events).unwrap();
    let out = process_action(&mut game, 1, BidAction::Call, 4, &mut events).unwrap();

    assert_eq!(out.paid, Chips(10));
    assert_eq!(balance(&game, 1), Chips(990));
    assert_eq!(bet(&game, 1), Chips(20));
    assert_eq!(game.bank(), Chips(50));
    assert!(out.hand_over);
}

#[test]
fn dark_raise_pays_half_of_the_amount() {
    let mut game = started_game(&[1000, 1000, 1000]);
    let mut events = EventLog::new();
    process_action(&mut game, 1, BidAction::Dark, 1, &mut events).unwrap();
    process_action(&mut game, 2, BidAction::Raise(Chips(20)), 2, &mut events).unwrap();
    process_action(&mut game, 3, BidAction::Call, 3, &mut events).unwrap();
    let out = process_action(&mut game, 1, BidAction::Raise(Chips(40)), 4, &mut events).unwrap();
    assert_eq!(out.paid, Chips(20));
    assert_eq!(bet(&game, 1), Chips(40));
    assert_eq!(game.current_max_bet(), Chips(40));
    assert_eq!(balance(&game, 1), Chips(980));
    assert!(!out.hand_over);
}

#[test]
fn dark_player_cannot_check() {
    let mut game = started_game(&[1000, 1000, 1000]);
    let mut events = EventLog::new();
    process_action(&mut game, 1, BidAction::Dark, 1, &mut events).unwrap();
    process_action(&mut game, 2, BidAction::Raise(Chips(20)), 2, &mut events).unwrap();
    process_action(&mut game, 3, BidAction::Call, 3, &mut events).unwrap();
    let err = process_action(&mut game, 1, BidAction::Check, 4, &mut events).unwrap_err();
    assert!(matches!(err, EngineError::InvalidAction { player_id: 1, .. }));
}

#[test]
fn dark_only_before_first_bet() {
    let mut game = started_game(&[1000, 1000, 1000]);
    let mut events = EventLog::new();
    process_action(&mut game, 1, BidAction::Raise(Chips(20)), 1, &mut events).unwrap();
    process_action(&mut game, 2, BidAction::Raise(Chips(40)), 2, &mut events).unwrap();
    process_action(&mut game, 3, BidAction::Call, 3, &mut events).unwrap();
    let err = process_action(&mut game, 1, BidAction::Dark, 4, &mut events).unwrap_err();
    assert!(matches!(err, EngineError::InvalidAction { .. }));
}

#[test]
fn open_requires_dark() {
    let mut game = started_game(&[1000, 1000, 1000]);
    let mut events = EventLog::new();
    let err = process_action(&mut game, 1, BidAction::Open, 1, &mut events).unwrap_err();
    assert!(matches!(err, EngineError::InvalidAction { .. }));

    process_action(&mut game, 1, BidAction::Dark, 1, &mut events).unwrap();
    process_action(&mut game, 2, BidAction::Raise(Chips(20)), 2, &mut events).unwrap();
    process_action(&mut game, 3, BidAction::Call, 3, &mut events).unwrap();
    process_action(&mut game, 1, BidAction::Open, 4, &mut events).unwrap();
    assert_eq!(game.player(1).unwrap().status(), PlayerStatus::Active);
}

#[test]
fn reveal_doubles_the_bet_and_leaves_bidding() {
    let mut game = started_game(&[1000, 1000, 1000]);
    let mut events = EventLog::new();
    let err = process_action(&mut game, 1, BidAction::Reveal, 1, &mut events).unwrap_err();
    assert!(matches!(err, EngineError::InvalidAction { .. }));

    process_action(&mut game, 1, BidAction::Raise(Chips(20)), 1, &mut events).unwrap();
    process_action(&mut game, 2, BidAction::Reveal, 2, &mut events).unwrap();
    assert_eq!(balance(&game, 2), Chips(960));
    assert_eq!(game.current_max_bet(), Chips(40));
    assert_eq!(game.player(2).unwrap().status(), PlayerStatus::Revealed);
    assert_eq!(game.current_player_position(), Some(3));

    process_action(&mut game, 3, BidAction::Call, 3, &mut events).unwrap();
    // Вскрывшийся больше не ходит.
    assert_eq!(game.current_player_position(), Some(1));
    let out = process_action(&mut game, 1, BidAction::Call, 4, &mut events).unwrap();
    assert_eq!(out.next_position, Some(3));
    assert!(out.hand_over);
    assert_eq!(game.bank(), Chips(120));
}

#[test]
fn reveal_needs_money() {
    let mut game = started_game(&[1000, 30]);
    let mut events = EventLog::new();
    process_action(&mut game, 1, BidAction::Raise(Chips(20)), 1, &mut events).unwrap();
    let err = process_action(&mut game, 2, BidAction::Reveal, 2, &mut events).unwrap_err();
    assert!(matches!(err, EngineError::InsufficientFunds { player_id: 2, .. }));
}

#[test]
fn bidding_round_counter_is_capped() {
    let mut game = started_game(&[1000, 1000]);
    let mut events = EventLog::new();
    let mut amount = 10;
    for _ in 0..4 {
        process_action(&mut game, 1, BidAction::Raise(Chips(amount)), 1, &mut events).unwrap();
        process_action(&mut game, 2, BidAction::Raise(Chips(amount + 10)), 2, &mut events).unwrap();
        amount += 10;
    }
    assert_eq!(game.current_bidding_round(), 3);
}

#[test]
fn one_playing_seat_ends_the_hand() {
    let mut game = started_game(&[1000, 1000]);
    let mut events = EventLog::new();
    let out = process_action(&mut game, 1, BidAction::Fold, 1, &mut events).unwrap();
    assert!(out.hand_over);
    assert!(is_hand_over(&game));
    assert_eq!(game.status(), GameStatus::Bidding);
}

fn any_action() -> impl Strategy<Value = BidAction> {
    prop_oneof![
        Just(BidAction::Fold),
        (0u64..300).prop_map(|a| BidAction::Raise(Chips(a))),
        Just(BidAction::Call),
        Just(BidAction::Check),
        Just(BidAction::Reveal),
        Just(BidAction::Dark),
        Just(BidAction::Open),
    ]
}

proptest! {
    #[test]
    fn failed_actions_change_nothing_and_chips_are_conserved(
        moves in prop::collection::vec((1u64..=3, any_action()), 1..30)
    ) {
        let mut game = started_game(&[200, 300, 400]);
        let total = game.total_chips();
        let mut events = EventLog::new();

        for (step, (player_id, action)) in moves.into_iter().enumerate() {
            let before = game.clone();
            let events_before = events.events.len();
            match process_action(&mut game, player_id, action, step as u64, &mut events) {
                Ok(out) => {
                    prop_assert_eq!(game.total_chips(), total);
                    if out.hand_over {
                        break;
                    }
                }
                Err(_) => {
                    prop_assert_eq!(&game, &before);
                    prop_assert_eq!(events.events.len(), events_before);
                }
            }
        }
    }
}
