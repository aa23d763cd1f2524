// src/bin/seka_dev_cli.rs
//
// Оффлайн-симуляция нескольких столов секи с ботами.
// Запуск: RUST_LOG=debug cargo run --bin seka_dev_cli -- [seed] [tables]

use std::sync::Arc;

use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use seka_engine::domain::{Chips, Game, GameId, GameStatus, PlayerId};
use seka_engine::engine::{BidAction, GameManager, TracingEventSink};
use seka_engine::eval::score;
use seka_engine::infra::{DeterministicRng, InMemoryGameStore, SekaConfig};
use seka_engine::time_ctrl::{Clock, ManualClock};

type DevManager = GameManager<InMemoryGameStore, TracingEventSink, Arc<ManualClock>, DeterministicRng>;

const MAX_STEPS: usize = 200;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .init();

    let mut args = std::env::args().skip(1);
    let seed: u64 = args.next().and_then(|s| s.parse().ok()).unwrap_or(42);
    let tables: usize = args.next().and_then(|s| s.parse().ok()).unwrap_or(3);

    let clock = Arc::new(ManualClock::new(1_700_000_000_000));
    let manager: DevManager = GameManager::new(
        InMemoryGameStore::new(),
        TracingEventSink,
        clock.clone(),
        DeterministicRng::from_seed(seed),
        SekaConfig::default(),
    );

    info!(seed, tables, "seka_dev_cli: стартуем симуляцию");

    for n in 0..tables {
        let game = manager.create_game(None);
        let seats = 2 + n % 4;
        let mut players = Vec::with_capacity(seats);
        for _ in 0..seats {
            let player_id = manager.next_player_id();
            if let Err(err) = manager.join_game(game.id(), player_id, None) {
                warn!(error = %err, "посадка не удалась");
            }
            players.push(player_id);
        }

        // На нечётных столах последний игрок «спит» и вылетает по таймауту готовности.
        let sleepy = (n % 2 == 1 && seats > 2).then(|| players[seats - 1]);
        for &player_id in &players {
            if Some(player_id) == sleepy {
                continue;
            }
            if let Err(err) = manager.mark_ready(game.id(), player_id) {
                warn!(error = %err, "отметка готовности не удалась");
            }
        }
        if sleepy.is_some() {
            clock.advance_secs(manager.config().timing.ready_window_secs);
            manager.check_all_timeouts();
        }

        play_table(&manager, &clock, game.id());
        print_summary(&manager, game.id());
    }
}

fn play_table(manager: &DevManager, clock: &ManualClock, game_id: GameId) {
    for _ in 0..MAX_STEPS {
        let Ok(game) = manager.get_game(game_id) else {
            return;
        };
        clock.advance_ms(500);
        match game.status() {
            GameStatus::Bidding => bot_turn(manager, clock, &game),
            GameStatus::Quarrel => bot_votes(manager, &game),
            GameStatus::Finished | GameStatus::Cancelled => return,
            GameStatus::Waiting | GameStatus::Distribution => {
                clock.advance_secs(manager.config().timing.ready_window_secs);
                manager.check_all_timeouts();
            }
        }
    }
    warn!(game_id, "симуляция не уложилась в лимит шагов");
}

/// Простая стратегия: сильная рука повышает первой ставкой, слабая сбрасывает
/// под давлением, остальные уравнивают.
fn bot_turn(manager: &DevManager, clock: &ManualClock, game: &Game) {
    let Some(player) = game.current_player() else {
        return;
    };
    let player_id = player.player_id();
    let strength = score(player.hand()).map(|s| s.0).unwrap_or(0);
    let due = game.current_max_bet().saturating_sub(player.current_bet());

    // Иногда бот задумывается дольше окна хода.
    if strength == 10 && player_id % 5 == 0 {
        clock.advance_secs(manager.config().timing.turn_window_secs);
        manager.check_all_timeouts();
        return;
    }

    let action = if player.current_bet().is_zero() && strength >= 30 {
        BidAction::Raise(due + Chips(20))
    } else if !due.is_zero() && strength <= 10 {
        BidAction::Fold
    } else if due.is_zero() {
        BidAction::Check
    } else {
        BidAction::Call
    };

    act(manager, game.id(), player_id, action);
}

fn act(manager: &DevManager, game_id: GameId, player_id: PlayerId, action: BidAction) {
    if let Err(err) = manager.player_action(game_id, player_id, action) {
        warn!(game_id, player_id, %action, error = %err, "ход отклонён, бот сбрасывает");
        if let Err(err) = manager.player_action(game_id, player_id, BidAction::Fold) {
            warn!(game_id, player_id, error = %err, "сброс тоже отклонён");
        }
    }
}

fn bot_votes(manager: &DevManager, game: &Game) {
    let Some(quarrel) = game.quarrel() else {
        return;
    };
    for &player_id in &quarrel.participants {
        let voted = game.player(player_id).and_then(|p| p.quarrel_vote()).is_some();
        if voted {
            continue;
        }
        let vote = player_id % 2 == 1;
        if let Err(err) = manager.vote_quarrel(game.id(), player_id, vote) {
            warn!(game_id = game.id(), player_id, error = %err, "голос не принят");
        }
    }
}

fn print_summary(manager: &DevManager, game_id: GameId) {
    let Ok(game) = manager.get_game(game_id) else {
        return;
    };
    println!();
    println!("===== ИГРА {} | статус {:?} | t={} =====", game.id(), game.status(), manager.clock().now());
    for p in game.players_by_position() {
        let cards: Vec<String> = p.hand().iter().map(|c| c.to_string()).collect();
        println!(
            "  позиция {} | игрок {} | баланс {} | {:?} | [{}]",
            p.position(),
            p.player_id(),
            p.balance(),
            p.status(),
            cards.join(" ")
        );
    }
    if let Some(outcome) = game.outcome() {
        println!("  победители: {:?}, банк {}", outcome.winner_ids, outcome.total_pot);
    }
}
