//! Определение победителя и выплаты из банка.

use tracing::info;

use crate::domain::{
    Chips, Game, GameOutcome, GameStatus, HandScore, Payout, PlayerId, PlayerScore,
};
use crate::engine::errors::EngineError;
use crate::engine::events::{EventLog, GameEvent};
use crate::engine::quarrel::{can_initiate_quarrel, open_quarrel};
use crate::eval::score;

/// Результат сравнения рук.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ShowdownResult {
    /// Очки в порядке позиций. Пусто, если остался один игрок.
    pub scores: Vec<PlayerScore>,
    /// Игроки с лучшими очками (в порядке позиций).
    pub winners: Vec<PlayerId>,
    pub top_score: Option<HandScore>,
}

/// Чем закончилась раздача после торгов.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum HandConclusion {
    Finished(GameOutcome),
    QuarrelOpened(Vec<PlayerId>),
}

/// Посчитать очки указанных игроков (в порядке их позиций).
pub fn score_players(game: &Game, player_ids: &[PlayerId]) -> Result<Vec<PlayerScore>, EngineError> {
    let mut scores = Vec::with_capacity(player_ids.len());
    for p in game.players_by_position() {
        if player_ids.contains(&p.player_id()) {
            scores.push(PlayerScore {
                player_id: p.player_id(),
                score: score(p.hand())?,
            });
        }
    }
    Ok(scores)
}

/// Игроки с максимальными очками.
pub fn top_scorers(scores: &[PlayerScore]) -> (Option<HandScore>, Vec<PlayerId>) {
    let top = scores.iter().map(|s| s.score).max();
    let winners = scores
        .iter()
        .filter(|s| Some(s.score) == top)
        .map(|s| s.player_id)
        .collect();
    (top, winners)
}

/// Сравнить руки всех, кто ещё в раздаче (играющие + вскрывшиеся).
///
/// Если остался один: он победитель без подсчёта очков.
pub fn determine_winners(game: &Game) -> Result<ShowdownResult, EngineError> {
    let contenders: Vec<PlayerId> = game
        .players_by_position()
        .into_iter()
        .filter(|p| p.is_in_hand())
        .map(|p| p.player_id())
        .collect();

    if contenders.len() <= 1 {
        return Ok(ShowdownResult {
            scores: Vec::new(),
            winners: contenders,
            top_score: None,
        });
    }

    let scores = score_players(game, &contenders)?;
    let (top_score, winners) = top_scorers(&scores);
    Ok(ShowdownResult {
        scores,
        winners,
        top_score,
    })
}

/// Поделить банк поровну между победителями.
/// Остаток по фишке раздаётся начиная с меньших позиций.
pub fn award_pot(game: &mut Game, winners: &[PlayerId]) -> Result<Vec<Payout>, EngineError> {
    if winners.is_empty() {
        return Ok(Vec::new());
    }
    let ordered: Vec<PlayerId> = game
        .players_by_position()
        .into_iter()
        .map(|p| p.player_id())
        .filter(|id| winners.contains(id))
        .collect();

    let total = game.bank();
    let count = ordered.len() as u64;
    let share = total.0 / count;
    let mut remainder = total.0 % count;

    let mut payouts = Vec::with_capacity(ordered.len());
    for player_id in ordered {
        let mut prize = share;
        if remainder > 0 {
            prize += 1;
            remainder -= 1;
        }
        game.pay_out(player_id, Chips(prize))?;
        payouts.push(Payout {
            player_id,
            amount: Chips(prize),
        });
    }
    Ok(payouts)
}

/// Выплатить банк победителям и закрыть игру.
pub fn finish_game(
    game: &mut Game,
    winners: Vec<PlayerId>,
    scores: Vec<PlayerScore>,
    events: &mut EventLog,
) -> Result<GameOutcome, EngineError> {
    let total_pot = game.bank();
    let payouts = if winners.is_empty() {
        game.refund_all();
        Vec::new()
    } else {
        award_pot(game, &winners)?
    };

    game.transition_to(GameStatus::Finished)?;
    game.set_current_player_position(None);
    game.set_quarrel(None);

    let outcome = GameOutcome {
        winner_ids: winners,
        scores,
        total_pot,
        payouts,
    };
    game.set_outcome(outcome.clone());

    info!(
        game_id = game.id(),
        winners = ?outcome.winner_ids,
        pot = total_pot.0,
        "game finished"
    );

    events.push(GameEvent::GameFinished {
        game_id: game.id(),
        winner_id: outcome.primary_winner(),
        winner_ids: outcome.winner_ids.clone(),
        scores: outcome.scores.clone(),
        final_state: Box::new(game.clone()),
    });

    Ok(outcome)
}

/// Завершить раздачу после торгов: победитель, либо спор при равенстве очков.
pub fn conclude_hand(
    game: &mut Game,
    now: crate::domain::Timestamp,
    events: &mut EventLog,
) -> Result<HandConclusion, EngineError> {
    let result = determine_winners(game)?;
    if can_initiate_quarrel(&result.winners) {
        open_quarrel(game, result.winners.clone(), now, events)?;
        return Ok(HandConclusion::QuarrelOpened(result.winners));
    }
    let outcome = finish_game(game, result.winners, result.scores, events)?;
    Ok(HandConclusion::Finished(outcome))
}
