//! Спор («свара»): переигровка между игроками с равными лучшими очками.
//!
//! Порядок: `open_quarrel` → голоса участников → `settle_quarrel_vote`.
//! Одобренный спор пересдаёт карты участникам и берёт с каждого взнос
//! `банк / участников`; новая ничья открывает следующий спор.

use tracing::{info, warn};

use crate::domain::{
    Chips, Game, GameOutcome, GameStatus, PlayerId, PlayerStatus, QuarrelState, Timestamp,
};
use crate::engine::errors::EngineError;
use crate::engine::events::{EventLog, GameEvent, PlayerCards};
use crate::engine::distribution::redistribute_for_quarrel;
use crate::engine::showdown::{finish_game, score_players, top_scorers, ShowdownResult};
use crate::engine::RandomSource;

/// Спор возможен только между двумя и более победителями.
pub fn can_initiate_quarrel(winners: &[PlayerId]) -> bool {
    winners.len() >= 2
}

/// Строгое большинство голосов «за».
pub fn winners_vote_for_quarrel(votes: &[bool]) -> bool {
    let yes = votes.iter().filter(|v| **v).count();
    yes * 2 > votes.len()
}

/// Взнос за участие в споре: банк делится на участников с округлением вниз.
pub fn required_entry_bet(bank: Chips, participants: usize) -> Chips {
    if participants == 0 {
        return Chips::ZERO;
    }
    Chips(bank.0 / participants as u64)
}

/// Чем закончилось голосование.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum QuarrelResolution {
    /// Игра закрыта: один победитель или банк поделён.
    Finished(GameOutcome),
    /// Снова ничья, открыт следующий спор.
    Renewed(Vec<PlayerId>),
}

/// Открыть спор между `winners` и начать голосование.
///
/// Остальные игроки, ещё бывшие в раздаче, переходят в `Passed`.
pub fn open_quarrel(
    game: &mut Game,
    winners: Vec<PlayerId>,
    now: Timestamp,
    events: &mut EventLog,
) -> Result<(), EngineError> {
    if !can_initiate_quarrel(&winners) {
        return Err(EngineError::invalid_action(
            winners.first().copied().unwrap_or_default(),
            "quarrel",
            "для спора нужно минимум два победителя",
        ));
    }
    let round = match game.status() {
        GameStatus::Bidding => {
            game.transition_to(GameStatus::Quarrel)?;
            1
        }
        GameStatus::Quarrel => game.quarrel().map_or(1, |q| q.round + 1),
        actual => {
            return Err(EngineError::WrongPhase {
                game_id: game.id(),
                expected: GameStatus::Quarrel,
                actual,
            })
        }
    };

    for player in game.players_mut() {
        player.clear_quarrel_vote();
        if player.is_in_hand() && !winners.contains(&player.player_id()) {
            player.transition(PlayerStatus::Passed)?;
        }
    }

    let required_bet = required_entry_bet(game.bank(), winners.len());
    game.set_current_player_position(None);
    game.set_quarrel(Some(QuarrelState {
        participants: winners.clone(),
        opened_at: now,
        required_bet,
        round,
    }));

    info!(
        game_id = game.id(),
        participants = ?winners,
        required_bet = required_bet.0,
        round,
        "quarrel opened"
    );

    events.push(GameEvent::QuarrelInitiated {
        game_id: game.id(),
        winning_players: winners,
        required_bet,
    });
    Ok(())
}

fn participants(game: &Game) -> Result<Vec<PlayerId>, EngineError> {
    game.ensure_status(GameStatus::Quarrel)?;
    Ok(game
        .quarrel()
        .map(|q| q.participants.clone())
        .unwrap_or_default())
}

/// Записать голос участника спора.
pub fn record_vote(game: &mut Game, player_id: PlayerId, vote: bool) -> Result<(), EngineError> {
    let participants = participants(game)?;
    if !participants.contains(&player_id) {
        game.require_player(player_id)?;
        return Err(EngineError::invalid_action(
            player_id,
            "vote",
            "голосовать могут только участники спора",
        ));
    }
    game.require_player_mut(player_id)?.set_quarrel_vote(vote);
    Ok(())
}

/// Голоса участников, которые уже проголосовали.
pub fn collected_votes(game: &Game) -> Vec<bool> {
    let Some(state) = game.quarrel() else {
        return Vec::new();
    };
    state
        .participants
        .iter()
        .filter_map(|id| game.player(*id).and_then(|p| p.quarrel_vote()))
        .collect()
}

/// Все участники проголосовали.
pub fn all_votes_in(game: &Game) -> bool {
    game.quarrel().is_some_and(|state| {
        state
            .participants
            .iter()
            .all(|id| game.player(*id).is_some_and(|p| p.quarrel_vote().is_some()))
    })
}

/// Запустить спор: пересдать карты участникам и собрать взнос.
///
/// Взнос проверяется у всех до любых изменений: если хоть один не может
/// заплатить, игра не меняется.
pub fn start_quarrel<R: RandomSource>(
    game: &mut Game,
    rng: &mut R,
    events: &mut EventLog,
) -> Result<Vec<PlayerCards>, EngineError> {
    let participants = participants(game)?;
    let entry = required_entry_bet(game.bank(), participants.len());

    for &player_id in &participants {
        let player = game.require_player(player_id)?;
        if player.balance() < entry {
            return Err(EngineError::InsufficientFunds {
                player_id,
                required: entry,
                available: player.balance(),
            });
        }
    }

    let dealt = redistribute_for_quarrel(game, &participants, rng)?;
    for &player_id in &participants {
        game.require_player_mut(player_id)?
            .transition(PlayerStatus::Active)?;
        if !entry.is_zero() {
            game.collect_bet(player_id, entry, entry)?;
        }
    }

    info!(
        game_id = game.id(),
        participants = participants.len(),
        entry = entry.0,
        bank = game.bank().0,
        "quarrel started"
    );

    events.push(GameEvent::CardsDistributed {
        game_id: game.id(),
        player_cards: dealt.clone(),
        round: game.current_bidding_round(),
    });
    Ok(dealt)
}

/// Сравнить новые руки участников спора.
pub fn resolve_quarrel(game: &Game) -> Result<ShowdownResult, EngineError> {
    let participants = participants(game)?;
    let scores = score_players(game, &participants)?;
    let (top_score, winners) = top_scorers(&scores);
    Ok(ShowdownResult {
        scores,
        winners,
        top_score,
    })
}

/// Подвести итог голосования.
///
/// `on_timeout`: голосование закрыто по таймеру: одобренный спор, который
/// кто-то из участников не может оплатить, превращается в раздел банка.
/// Без таймера такая ошибка возвращается вызывающему.
pub fn settle_quarrel_vote<R: RandomSource>(
    game: &mut Game,
    rng: &mut R,
    now: Timestamp,
    on_timeout: bool,
    events: &mut EventLog,
) -> Result<QuarrelResolution, EngineError> {
    let participants = participants(game)?;
    let approved = winners_vote_for_quarrel(&collected_votes(game));

    if approved {
        let mut attempt = game.clone();
        let mut attempt_events = EventLog::new();
        match start_quarrel(&mut attempt, rng, &mut attempt_events) {
            Ok(_) => {
                *game = attempt;
                events.events.append(&mut attempt_events.events);
                let result = resolve_quarrel(game)?;
                if can_initiate_quarrel(&result.winners) {
                    open_quarrel(game, result.winners.clone(), now, events)?;
                    return Ok(QuarrelResolution::Renewed(result.winners));
                }
                let outcome = finish_game(game, result.winners, result.scores, events)?;
                return Ok(QuarrelResolution::Finished(outcome));
            }
            Err(err @ EngineError::InsufficientFunds { .. }) if on_timeout => {
                warn!(game_id = game.id(), error = %err, "quarrel unaffordable, splitting pot");
            }
            Err(err) => return Err(err),
        }
    }

    let scores = score_players(game, &participants)?;
    let outcome = finish_game(game, participants, scores, events)?;
    Ok(QuarrelResolution::Finished(outcome))
}
