use serde::{Deserialize, Serialize};

use crate::domain::{Chips, GameId, PlayerId, RoomId, SeatPosition};
use crate::engine::BidAction;

use super::errors::ApiError;

/// Команды, меняющие состояние игры.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum Command {
    CreateGame {
        room_id: Option<RoomId>,
    },
    JoinGame {
        game_id: GameId,
        player_id: PlayerId,
        /// Без баланса игрок садится с балансом из конфигурации.
        balance: Option<u64>,
    },
    LeaveGame {
        game_id: GameId,
        player_id: PlayerId,
    },
    MarkReady {
        game_id: GameId,
        player_id: PlayerId,
    },
    PlayerAction {
        game_id: GameId,
        player_id: PlayerId,
        request: ActionRequest,
    },
    VoteQuarrel {
        game_id: GameId,
        player_id: PlayerId,
        vote: bool,
    },
    /// Проверить таймауты одной игры или (без id) всех незавершённых.
    CheckTimeouts {
        game_id: Option<GameId>,
    },
}

/// Вид действия в запросе клиента.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ActionKindApi {
    Fold,
    Raise,
    Call,
    Check,
    Reveal,
    Dark,
    Open,
}

/// Действие игрока так, как его присылает клиент.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ActionRequest {
    pub action: ActionKindApi,
    pub bet_amount: Option<u64>,
}

impl ActionRequest {
    pub fn new(action: ActionKindApi, bet_amount: Option<u64>) -> Self {
        Self { action, bet_amount }
    }

    pub fn into_bid_action(self) -> Result<BidAction, ApiError> {
        Ok(match self.action {
            ActionKindApi::Fold => BidAction::Fold,
            ActionKindApi::Raise => {
                let amount = self
                    .bet_amount
                    .filter(|amount| *amount > 0)
                    .ok_or_else(|| ApiError::BadRequest("для raise нужна положительная сумма".into()))?;
                BidAction::Raise(Chips(amount))
            }
            ActionKindApi::Call => BidAction::Call,
            ActionKindApi::Check => BidAction::Check,
            ActionKindApi::Reveal => BidAction::Reveal,
            ActionKindApi::Dark => BidAction::Dark,
            ActionKindApi::Open => BidAction::Open,
        })
    }
}

impl TryFrom<ActionRequest> for BidAction {
    type Error = ApiError;

    fn try_from(request: ActionRequest) -> Result<Self, Self::Error> {
        request.into_bid_action()
    }
}

/// Ответ на команду.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum CommandResponse {
    GameCreated {
        game_id: GameId,
        room_id: RoomId,
    },
    Joined {
        position: SeatPosition,
    },
    Left,
    Ready {
        started: bool,
    },
    ActionApplied {
        bank: Chips,
        next_position: Option<SeatPosition>,
        hand_over: bool,
        /// Победители, если игра закончилась.
        winners: Option<Vec<PlayerId>>,
        /// Участники спора, если он открылся.
        quarrel: Option<Vec<PlayerId>>,
    },
    QuarrelVoteRecorded {
        settled: bool,
    },
    TimeoutsChecked {
        fired: usize,
    },
}
