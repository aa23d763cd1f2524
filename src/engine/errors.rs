use crate::domain::{Chips, GameId, GameStatus, PlayerId, PlayerStatus};

use thiserror::Error;

/// Ошибки движка секи.
///
/// Все они восстановимые: действие отклоняется, состояние игры не меняется.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("Игра {0} не найдена")]
    GameNotFound(GameId),

    #[error("Игра {game_id}: сейчас не ход игрока {player_id}")]
    NotYourTurn { game_id: GameId, player_id: PlayerId },

    #[error("Игрок {player_id} не может действовать в статусе {status:?}")]
    PlayerCannotAct {
        player_id: PlayerId,
        status: PlayerStatus,
    },

    #[error("Игроку {player_id} не хватает фишек: нужно {required}, есть {available}")]
    InsufficientFunds {
        player_id: PlayerId,
        required: Chips,
        available: Chips,
    },

    #[error("Игрок {player_id} не может сделать check – нужно доплатить {due}")]
    CannotCheck { player_id: PlayerId, due: Chips },

    #[error("Недопустимое действие {action} игрока {player_id}: {reason}")]
    InvalidAction {
        player_id: PlayerId,
        action: String,
        reason: String,
    },

    #[error("Подсчёт очков возможен только для 2 или 3 карт, получено {0}")]
    InvalidHand(usize),

    #[error("Некорректная карта: {0}")]
    InvalidCard(String),

    #[error("Игра {0} заполнена")]
    GameFull(GameId),

    #[error("Игрок {player_id} уже сидит в игре {game_id}")]
    AlreadyJoined { game_id: GameId, player_id: PlayerId },

    #[error("Игрок {player_id} не найден в игре {game_id}")]
    PlayerNotFound { game_id: GameId, player_id: PlayerId },

    #[error("Игру {game_id} нельзя начать: готовых игроков {ready}, нужно минимум {required}")]
    CannotStart {
        game_id: GameId,
        ready: usize,
        required: usize,
    },

    #[error("Игра {game_id} в фазе {actual:?}, ожидалась {expected:?}")]
    WrongPhase {
        game_id: GameId,
        expected: GameStatus,
        actual: GameStatus,
    },
}

impl EngineError {
    pub(crate) fn invalid_action(
        player_id: PlayerId,
        action: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        EngineError::InvalidAction {
            player_id,
            action: action.into(),
            reason: reason.into(),
        }
    }
}
