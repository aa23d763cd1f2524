//! Внешний API движка секи.
//!
//! Здесь описываются:
//! - команды (commands.rs): всё, что меняет состояние (создать игру, сесть, готовность, ход);
//! - запросы (queries.rs): только чтение;
//! - DTO (dto.rs): удобные структуры для фронта;
//! - ошибки (errors.rs): то, что видит клиент.

pub mod commands;
pub mod dto;
pub mod errors;
pub mod queries;

pub use commands::*;
pub use dto::*;
pub use errors::*;
pub use queries::*;

use crate::domain::Chips;
use crate::engine::events::EventSink;
use crate::engine::showdown::HandConclusion;
use crate::engine::{GameManager, RandomSource};
use crate::infra::persistence::StateStore;
use crate::time_ctrl::Clock;

/// Выполнить команду через менеджер игр.
pub fn execute_command<S, E, C, R>(
    manager: &GameManager<S, E, C, R>,
    command: Command,
) -> Result<CommandResponse, ApiError>
where
    S: StateStore,
    E: EventSink,
    C: Clock,
    R: RandomSource,
{
    match command {
        Command::CreateGame { room_id } => {
            let game = manager.create_game(room_id);
            Ok(CommandResponse::GameCreated {
                game_id: game.id(),
                room_id: game.room_id(),
            })
        }
        Command::JoinGame {
            game_id,
            player_id,
            balance,
        } => {
            let position = manager.join_game(game_id, player_id, balance.map(Chips))?;
            Ok(CommandResponse::Joined { position })
        }
        Command::LeaveGame { game_id, player_id } => {
            manager.leave_game(game_id, player_id)?;
            Ok(CommandResponse::Left)
        }
        Command::MarkReady { game_id, player_id } => {
            let started = manager.mark_ready(game_id, player_id)?;
            Ok(CommandResponse::Ready { started })
        }
        Command::PlayerAction {
            game_id,
            player_id,
            request,
        } => {
            let action = request.into_bid_action()?;
            let report = manager.player_action(game_id, player_id, action)?;
            let (winners, quarrel) = match report.conclusion {
                Some(HandConclusion::Finished(outcome)) => (Some(outcome.winner_ids), None),
                Some(HandConclusion::QuarrelOpened(participants)) => (None, Some(participants)),
                None => (None, None),
            };
            Ok(CommandResponse::ActionApplied {
                bank: report.outcome.bank,
                next_position: report.outcome.next_position,
                hand_over: report.outcome.hand_over,
                winners,
                quarrel,
            })
        }
        Command::VoteQuarrel {
            game_id,
            player_id,
            vote,
        } => {
            let resolution = manager.vote_quarrel(game_id, player_id, vote)?;
            Ok(CommandResponse::QuarrelVoteRecorded {
                settled: resolution.is_some(),
            })
        }
        Command::CheckTimeouts { game_id } => {
            let fired = match game_id {
                Some(game_id) => {
                    let outcome = manager.check_timeouts(game_id)?;
                    usize::from(outcome != crate::time_ctrl::TimeoutOutcome::Idle)
                }
                None => manager.check_all_timeouts().len(),
            };
            Ok(CommandResponse::TimeoutsChecked { fired })
        }
    }
}

/// Выполнить запрос "только чтение".
pub fn execute_query<S, E, C, R>(
    manager: &GameManager<S, E, C, R>,
    query: Query,
) -> Result<QueryResponse, ApiError>
where
    S: StateStore,
    E: EventSink,
    C: Clock,
    R: RandomSource,
{
    match query {
        Query::GetGame { game_id, viewer } => {
            let game = manager.get_game(game_id)?;
            Ok(QueryResponse::Game(build_game_view(&game, viewer)))
        }
        Query::ListLobby => Ok(QueryResponse::Lobby(
            manager.lobby_games().iter().map(build_lobby_entry).collect(),
        )),
        Query::ScoreHand { cards } => score_hand_strings(&cards),
    }
}
