use serde::{Deserialize, Serialize};

use crate::domain::{parse_cards, Game, GameId, GameStatus, PlayerId};
use crate::engine::EngineError;
use crate::eval::classify;

use super::dto::{GameViewDto, LobbyEntryDto, PlayerViewDto, QuarrelViewDto};
use super::errors::ApiError;

/// Запросы "только чтение".
#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum Query {
    /// Состояние игры глазами `viewer` (без него карты скрыты у всех).
    GetGame {
        game_id: GameId,
        viewer: Option<PlayerId>,
    },

    /// Игры в лобби.
    ListLobby,

    /// Посчитать очки руки, заданной строками ("A♥", "10♦", "Ah", "Td").
    ScoreHand { cards: Vec<String> },
}

/// Результат запроса.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum QueryResponse {
    Game(GameViewDto),
    Lobby(Vec<LobbyEntryDto>),
    HandScore { score: u32, combination: String },
}

/// DTO игры. Карты видны владельцу, а после конца игры: всем.
pub fn build_game_view(game: &Game, viewer: Option<PlayerId>) -> GameViewDto {
    let reveal_all = game.status() == GameStatus::Finished;
    let players = game
        .players_by_position()
        .into_iter()
        .map(|p| PlayerViewDto {
            player_id: p.player_id(),
            position: p.position(),
            balance: p.balance(),
            current_bet: p.current_bet(),
            status: p.status(),
            is_ready: p.is_ready(),
            card_count: p.hand().len(),
            cards: (reveal_all || viewer == Some(p.player_id())).then(|| p.hand().to_vec()),
        })
        .collect();

    let quarrel = game.quarrel().map(|q| QuarrelViewDto {
        participants: q.participants.clone(),
        required_bet: q.required_bet,
        round: q.round,
        voted: q
            .participants
            .iter()
            .copied()
            .filter(|id| game.player(*id).is_some_and(|p| p.quarrel_vote().is_some()))
            .collect(),
    });

    GameViewDto {
        game_id: game.id(),
        room_id: game.room_id(),
        status: game.status(),
        max_players: game.max_players(),
        bank: game.bank(),
        current_max_bet: game.current_max_bet(),
        current_bidding_round: game.current_bidding_round(),
        dealer_position: game.dealer_position(),
        current_player_position: game.current_player_position(),
        players,
        quarrel,
        winner_ids: game
            .outcome()
            .map(|o| o.winner_ids.clone())
            .unwrap_or_default(),
    }
}

pub fn build_lobby_entry(game: &Game) -> LobbyEntryDto {
    LobbyEntryDto {
        game_id: game.id(),
        room_id: game.room_id(),
        seated: game.players().len(),
        max_players: game.max_players(),
    }
}

/// Оценка руки из строк: строки переводятся в карты, дальше общий движок оценки.
pub fn score_hand_strings(cards: &[String]) -> Result<QueryResponse, ApiError> {
    let hand = parse_cards(cards).map_err(EngineError::InvalidCard)?;
    let combination = classify(&hand)?;
    Ok(QueryResponse::HandScore {
        score: combination.score().0,
        combination: combination.describe(),
    })
}
