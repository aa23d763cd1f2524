// tests/common/mod.rs

//! Общие хелперы интеграционных тестов.
//!
//! Колода без перемешивания раздаёт по позициям:
//!   1: A♠ K♠ Q♠ (31), 2: J♠ 10♠ A♣ (10), 3: K♣ Q♣ J♣ (30).
//! Перевёрнутая колода раздаёт: 1: 6♣ 10♥ J♥ (31), 2: Q♥ K♥ A♥ (31).

#![allow(dead_code)]

use std::collections::VecDeque;

use seka_engine::domain::{Chips, Game, PlayerId};
use seka_engine::engine::{EventLog, RandomSource};
use seka_engine::time_ctrl::{mark_ready, start_game, TimingRules};
use tracing_subscriber::EnvFilter;

/// RNG, который ничего не перемешивает.
#[derive(Clone, Debug, Default)]
pub struct DummyRng;

impl RandomSource for DummyRng {
    fn shuffle<T>(&mut self, _slice: &mut [T]) {}
}

/// RNG по сценарию: `true`: перевернуть колоду, `false`: оставить как есть.
/// Когда сценарий кончился, колода не трогается.
#[derive(Clone, Debug, Default)]
pub struct ScriptedRng {
    script: VecDeque<bool>,
}

impl ScriptedRng {
    pub fn new(script: &[bool]) -> Self {
        Self {
            script: script.iter().copied().collect(),
        }
    }
}

impl RandomSource for ScriptedRng {
    fn shuffle<T>(&mut self, slice: &mut [T]) {
        if self.script.pop_front().unwrap_or(false) {
            slice.reverse();
        }
    }
}

/// Логи в тестах: RUST_LOG, по умолчанию warn.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_test_writer()
        .try_init();
}

/// Игра в фазе Waiting: игроки 1..=n с заданными балансами на позициях 1..=n.
pub fn seated_game(balances: &[u64]) -> Game {
    let mut game = Game::new(1, 1, 6, 0);
    for (i, balance) in balances.iter().enumerate() {
        game.seat_player(i as PlayerId + 1, Chips(*balance))
            .expect("посадка должна пройти");
    }
    game
}

/// Игра уже в торгах: все готовы, карты розданы RNG `rng`.
pub fn started_game_with<R: RandomSource>(balances: &[u64], rng: &mut R) -> Game {
    let mut game = seated_game(balances);
    let rules = TimingRules::standard();
    let mut events = EventLog::new();
    for player_id in 1..=balances.len() as PlayerId {
        mark_ready(&mut game, player_id, 0, &rules, &mut events).expect("готовность");
    }
    start_game(&mut game, rng, 0, &mut events).expect("старт игры");
    game
}

/// Игра в торгах с неперемешанной колодой.
pub fn started_game(balances: &[u64]) -> Game {
    started_game_with(balances, &mut DummyRng)
}

pub fn balance(game: &Game, player_id: PlayerId) -> Chips {
    game.player(player_id).map(|p| p.balance()).unwrap_or_default()
}

pub fn bet(game: &Game, player_id: PlayerId) -> Chips {
    game.player(player_id).map(|p| p.current_bet()).unwrap_or_default()
}
