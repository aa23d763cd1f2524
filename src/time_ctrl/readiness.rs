// src/time_ctrl/readiness.rs
//! Координатор готовности и таймаутов.
//!
//! Проверки таймаутов опросные: сравниваем `now - отметка` с окном из
//! `TimingRules`. Если фаза уже сменилась, проверка просто ничего не делает.

use tracing::{info, warn};

use crate::domain::{Chips, Game, GameStatus, PlayerId, PlayerStatus, Timestamp};
use crate::engine::bidding::{advance_turn, is_hand_over, process_forced_action, ActionOutcome};
use crate::engine::distribution::distribute;
use crate::engine::errors::EngineError;
use crate::engine::events::{EventLog, GameEvent, PlayerCards};
use crate::engine::quarrel::{settle_quarrel_vote, QuarrelResolution};
use crate::engine::showdown::{conclude_hand, HandConclusion};
use crate::engine::{BidAction, RandomSource};

use super::time_rules::{window_elapsed, TimingRules};

/// Что сделала проверка таймаутов.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TimeoutOutcome {
    /// Ни одно окно не истекло.
    Idle,
    /// Опоздавшие сброшены, раздача началась.
    Started,
    /// Готовых меньше кворума: игра отменена, ставки возвращены.
    Cancelled { refunded: Chips },
    /// Игрок не успел сходить и сброшен.
    ForcedFold {
        player_id: PlayerId,
        conclusion: Option<HandConclusion>,
    },
    /// Голосование за спор закрыто по таймеру.
    QuarrelSettled(QuarrelResolution),
}

/// Сколько игроков готовы и могут играть.
pub fn ready_count(game: &Game) -> usize {
    game.players()
        .iter()
        .filter(|p| p.is_ready() && p.is_playing())
        .count()
}

/// Можно ли начинать: готовых и играющих не меньше кворума игры.
pub fn can_start(game: &Game) -> bool {
    ready_count(game) >= usize::from(game.min_players())
}

/// Начинать сразу, не дожидаясь окна: кворум есть и никто больше не ждёт.
pub fn should_start_now(game: &Game) -> bool {
    game.status() == GameStatus::Waiting
        && can_start(game)
        && game
            .players()
            .iter()
            .all(|p| p.status() != PlayerStatus::Waiting)
}

/// Отметить готовность игрока. Возвращает число готовых.
///
/// Повторная отметка ничего не меняет и события не порождает.
pub fn mark_ready(
    game: &mut Game,
    player_id: PlayerId,
    now: Timestamp,
    rules: &TimingRules,
    events: &mut EventLog,
) -> Result<usize, EngineError> {
    game.ensure_status(GameStatus::Waiting)?;
    let player = game.require_player_mut(player_id)?;
    if player.is_ready() {
        return Ok(ready_count(game));
    }
    player.mark_ready(now)?;
    game.open_ready_window(now);

    let count = ready_count(game);
    let window_start = game.ready_window_started_at().unwrap_or(now);
    let elapsed = now.saturating_sub(window_start);
    let time_until_start = rules.ready_window_ms().saturating_sub(elapsed) / 1000;

    info!(game_id = game.id(), player_id, ready = count, "player ready");

    events.push(GameEvent::PlayerReady {
        game_id: game.id(),
        player_id,
        ready_players_count: count,
        time_until_start,
    });
    Ok(count)
}

/// Начать игру: Waiting → Distribution → раздача → Bidding.
///
/// Игроки, так и не нажавшие «готов», сбрасываются до раздачи.
pub fn start_game<R: RandomSource>(
    game: &mut Game,
    rng: &mut R,
    now: Timestamp,
    events: &mut EventLog,
) -> Result<Vec<PlayerCards>, EngineError> {
    game.ensure_status(GameStatus::Waiting)?;
    if !can_start(game) {
        return Err(EngineError::CannotStart {
            game_id: game.id(),
            ready: ready_count(game),
            required: usize::from(game.min_players()),
        });
    }

    fold_laggards(game)?;
    game.transition_to(GameStatus::Distribution)?;

    let mut dealt_events = EventLog::new();
    let dealt = distribute(game, rng, now, &mut dealt_events)?;

    events.push(GameEvent::GameStarted {
        game_id: game.id(),
        players: dealt.iter().map(|pc| pc.player_id).collect(),
        first_player_id: game.current_player().map(|p| p.player_id()),
        initial_state: Box::new(game.clone()),
    });
    events.events.append(&mut dealt_events.events);

    info!(game_id = game.id(), players = dealt.len(), "game started");
    Ok(dealt)
}

fn fold_laggards(game: &mut Game) -> Result<Vec<PlayerId>, EngineError> {
    let game_id = game.id();
    let mut folded = Vec::new();
    for player in game.players_mut() {
        if player.status() == PlayerStatus::Waiting {
            player.fold()?;
            warn!(game_id, player_id = player.player_id(), "not ready in time, folded");
            folded.push(player.player_id());
        }
    }
    Ok(folded)
}

/// Окно готовности истекло: сбросить не успевших и начать, либо отменить игру.
pub fn check_ready_timeouts<R: RandomSource>(
    game: &mut Game,
    rng: &mut R,
    now: Timestamp,
    rules: &TimingRules,
    events: &mut EventLog,
) -> Result<TimeoutOutcome, EngineError> {
    if game.status() != GameStatus::Waiting {
        return Ok(TimeoutOutcome::Idle);
    }
    let Some(since) = game.ready_window_started_at() else {
        return Ok(TimeoutOutcome::Idle);
    };
    if !window_elapsed(since, now, rules.ready_window_ms()) {
        return Ok(TimeoutOutcome::Idle);
    }

    fold_laggards(game)?;

    if !can_start(game) {
        let refunded = game.refund_all();
        game.transition_to(GameStatus::Cancelled)?;
        game.set_current_player_position(None);
        warn!(game_id = game.id(), refunded = refunded.0, "game cancelled: not enough ready players");
        events.push(GameEvent::GameCancelled {
            game_id: game.id(),
            refunded,
        });
        return Ok(TimeoutOutcome::Cancelled { refunded });
    }

    start_game(game, rng, now, events)?;
    Ok(TimeoutOutcome::Started)
}

/// Текущий игрок не сходил вовремя: принудительный Fold через торги.
///
/// Если торги отвергли действие, сбрасываем напрямую и передаём ход.
pub fn check_turn_timeouts(
    game: &mut Game,
    now: Timestamp,
    rules: &TimingRules,
    events: &mut EventLog,
) -> Result<Option<ActionOutcome>, EngineError> {
    if game.status() != GameStatus::Bidding {
        return Ok(None);
    }
    let Some(player) = game.current_player() else {
        return Ok(None);
    };
    let player_id = player.player_id();
    let position = player.position();
    let Some(since) = player.last_action_at() else {
        return Ok(None);
    };
    if !window_elapsed(since, now, rules.turn_window_ms()) {
        return Ok(None);
    }

    warn!(game_id = game.id(), player_id, "turn timed out, forcing fold");

    let mut attempt = game.clone();
    let mut attempt_events = EventLog::new();
    match process_forced_action(&mut attempt, player_id, BidAction::Fold, now, &mut attempt_events) {
        Ok(outcome) => {
            *game = attempt;
            events.events.append(&mut attempt_events.events);
            return Ok(Some(outcome));
        }
        Err(err) => {
            warn!(game_id = game.id(), player_id, error = %err, "forced fold rejected, folding directly");
        }
    }

    let player = game.require_player_mut(player_id)?;
    player.touch(now);
    player.mark_acted();
    player.fold()?;
    let next_position = advance_turn(game, position, now);
    events.push(GameEvent::PlayerActionTaken {
        game_id: game.id(),
        player_id,
        action: BidAction::Fold,
        bet_amount: None,
        new_player_position: next_position,
        bank: game.bank(),
        forced: true,
    });
    Ok(Some(ActionOutcome {
        player_id,
        action: BidAction::Fold,
        paid: Chips::ZERO,
        next_position,
        bank: game.bank(),
        round_complete: crate::engine::bidding::is_bidding_round_complete(game),
        hand_over: is_hand_over(game),
    }))
}

/// Окно голосования за спор истекло: подвести итог по собранным голосам.
pub fn check_quarrel_vote_timeouts<R: RandomSource>(
    game: &mut Game,
    rng: &mut R,
    now: Timestamp,
    rules: &TimingRules,
    events: &mut EventLog,
) -> Result<Option<QuarrelResolution>, EngineError> {
    if game.status() != GameStatus::Quarrel {
        return Ok(None);
    }
    let Some(opened_at) = game.quarrel().map(|q| q.opened_at) else {
        return Ok(None);
    };
    if !window_elapsed(opened_at, now, rules.quarrel_vote_window_ms()) {
        return Ok(None);
    }
    settle_quarrel_vote(game, rng, now, true, events).map(Some)
}

/// Все проверки таймаутов для текущей фазы игры.
pub fn check_timeouts<R: RandomSource>(
    game: &mut Game,
    rng: &mut R,
    now: Timestamp,
    rules: &TimingRules,
    events: &mut EventLog,
) -> Result<TimeoutOutcome, EngineError> {
    match game.status() {
        GameStatus::Waiting => check_ready_timeouts(game, rng, now, rules, events),
        GameStatus::Bidding => {
            let Some(outcome) = check_turn_timeouts(game, now, rules, events)? else {
                return Ok(TimeoutOutcome::Idle);
            };
            let conclusion = if outcome.hand_over {
                Some(conclude_hand(game, now, events)?)
            } else {
                None
            };
            Ok(TimeoutOutcome::ForcedFold {
                player_id: outcome.player_id,
                conclusion,
            })
        }
        GameStatus::Quarrel => Ok(check_quarrel_vote_timeouts(game, rng, now, rules, events)?
            .map_or(TimeoutOutcome::Idle, TimeoutOutcome::QuarrelSettled)),
        GameStatus::Distribution | GameStatus::Finished | GameStatus::Cancelled => {
            Ok(TimeoutOutcome::Idle)
        }
    }
}
