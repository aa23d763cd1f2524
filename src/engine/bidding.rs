//! Торги: применение одного действия, переход хода, завершение круга.

use std::collections::BTreeSet;

use tracing::debug;

use crate::domain::{Chips, Game, PlayerId, SeatPosition, Timestamp};
use crate::engine::actions::BidAction;
use crate::engine::errors::EngineError;
use crate::engine::events::{EventLog, GameEvent};
use crate::engine::positions::next_playing_position;
use crate::engine::validation::validate_action;

/// Результат применённого действия.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ActionOutcome {
    pub player_id: PlayerId,
    pub action: BidAction,
    /// Сколько фишек реально ушло в банк.
    pub paid: Chips,
    pub next_position: Option<SeatPosition>,
    pub bank: Chips,
    /// Ставки всех играющих равны (или играющих меньше двух).
    pub round_complete: bool,
    /// Торги окончены: пора определять победителя.
    pub hand_over: bool,
}

/// Применить действие игрока.
///
/// Сначала целиком проверяем действие, потом применяем. Если проверка не
/// прошла: игра не изменилась ни в чём (балансы, ставки, банк, очередь).
pub fn process_action(
    game: &mut Game,
    player_id: PlayerId,
    action: BidAction,
    now: Timestamp,
    events: &mut EventLog,
) -> Result<ActionOutcome, EngineError> {
    process_action_inner(game, player_id, action, now, events, false)
}

/// То же, что `process_action`, но событие помечается как принудительное (таймаут).
pub(crate) fn process_forced_action(
    game: &mut Game,
    player_id: PlayerId,
    action: BidAction,
    now: Timestamp,
    events: &mut EventLog,
) -> Result<ActionOutcome, EngineError> {
    process_action_inner(game, player_id, action, now, events, true)
}

fn process_action_inner(
    game: &mut Game,
    player_id: PlayerId,
    action: BidAction,
    now: Timestamp,
    events: &mut EventLog,
    forced: bool,
) -> Result<ActionOutcome, EngineError> {
    let plan = validate_action(game, player_id, &action)?;

    // Применяем.
    let from = {
        let player = game.require_player_mut(player_id)?;
        player.touch(now);
        player.mark_acted();
        if let Some(next) = plan.next_status {
            player.transition(next)?;
        }
        player.position()
    };
    if !plan.paid.is_zero() || !plan.nominal.is_zero() {
        game.collect_bet(player_id, plan.paid, plan.nominal)?;
    }
    if let Some(max_bet) = plan.new_max_bet {
        game.set_current_max_bet(max_bet);
    }

    let next_position = advance_turn(game, from, now);

    let outcome = ActionOutcome {
        player_id,
        action,
        paid: plan.paid,
        next_position,
        bank: game.bank(),
        round_complete: is_bidding_round_complete(game),
        hand_over: is_hand_over(game),
    };

    debug!(
        game_id = game.id(),
        player_id,
        action = %action,
        paid = outcome.paid.0,
        next = ?next_position,
        "action applied"
    );

    events.push(GameEvent::PlayerActionTaken {
        game_id: game.id(),
        player_id,
        action,
        bet_amount: action.amount(),
        new_player_position: next_position,
        bank: game.bank(),
        forced,
    });

    Ok(outcome)
}

/// Передать ход следующему играющему по позиции и запустить его таймер.
///
/// Переход через наибольшую позицию: это новый торговый круг.
pub(crate) fn advance_turn(
    game: &mut Game,
    from: SeatPosition,
    now: Timestamp,
) -> Option<SeatPosition> {
    let next = next_playing_position(game, from);
    if let Some(pos) = next {
        if pos <= from {
            game.advance_bidding_round();
        }
        if let Some(p) = game.player_at_mut(pos) {
            p.touch(now);
        }
    }
    game.set_current_player_position(next);
    next
}

/// Круг торгов завершён: играющих меньше двух, либо у всех играющих одна ставка.
pub fn is_bidding_round_complete(game: &Game) -> bool {
    let playing: Vec<_> = game.players().iter().filter(|p| p.is_playing()).collect();
    if playing.len() < 2 {
        return true;
    }
    let distinct: BTreeSet<Chips> = playing.iter().map(|p| p.current_bet()).collect();
    distinct.len() == 1
}

/// Торги окончены: играющих меньше двух, либо все играющие уже ходили
/// и круг завершён.
pub fn is_hand_over(game: &Game) -> bool {
    if game.playing_count() < 2 {
        return true;
    }
    let everyone_acted = game
        .players()
        .iter()
        .filter(|p| p.is_playing())
        .all(|p| p.has_acted());
    everyone_acted && is_bidding_round_complete(game)
}
