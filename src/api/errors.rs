use serde::{Deserialize, Serialize};

use crate::domain::{GameId, PlayerId};
use crate::engine::{EngineError, ManagerError};

/// Ошибки внешнего API (то, что отдаём клиенту).
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum ApiError {
    /// Неправильные входные данные (например, Raise без суммы).
    BadRequest(String),

    /// Игра не найдена.
    GameNotFound(GameId),

    /// Игрок не найден в игре.
    PlayerNotInGame(PlayerId),

    /// Ход отклонён правилами (не твой ход, не хватает фишек и т.д.).
    Rejected(String),

    /// Команда не подходит к текущей фазе игры.
    InvalidCommand(String),
}

impl From<EngineError> for ApiError {
    fn from(err: EngineError) -> Self {
        match err {
            EngineError::GameNotFound(game_id) => ApiError::GameNotFound(game_id),
            EngineError::PlayerNotFound { player_id, .. } => ApiError::PlayerNotInGame(player_id),
            EngineError::InvalidHand(_) | EngineError::InvalidCard(_) => {
                ApiError::BadRequest(err.to_string())
            }
            EngineError::WrongPhase { .. }
            | EngineError::GameFull(_)
            | EngineError::AlreadyJoined { .. }
            | EngineError::CannotStart { .. } => ApiError::InvalidCommand(err.to_string()),
            other => ApiError::Rejected(other.to_string()),
        }
    }
}

impl From<ManagerError> for ApiError {
    fn from(err: ManagerError) -> Self {
        match err {
            ManagerError::GameNotFound(game_id) => ApiError::GameNotFound(game_id),
            ManagerError::Engine(inner) => inner.into(),
        }
    }
}
