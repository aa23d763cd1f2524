use serde::{Deserialize, Serialize};

use crate::domain::{
    Card, Chips, GameId, GameStatus, PlayerId, PlayerStatus, RoomId, SeatPosition,
};

/// DTO игрока за столом.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PlayerViewDto {
    pub player_id: PlayerId,
    pub position: SeatPosition,
    pub balance: Chips,
    pub current_bet: Chips,
    pub status: PlayerStatus,
    pub is_ready: bool,
    /// Сколько карт на руке (видно всем).
    pub card_count: usize,
    /// Сами карты – только владельцу, либо всем после окончания игры.
    pub cards: Option<Vec<Card>>,
}

/// DTO спора.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct QuarrelViewDto {
    pub participants: Vec<PlayerId>,
    pub required_bet: Chips,
    pub round: u32,
    /// Кто из участников уже проголосовал (сами голоса не раскрываем).
    pub voted: Vec<PlayerId>,
}

/// DTO игры.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct GameViewDto {
    pub game_id: GameId,
    pub room_id: RoomId,
    pub status: GameStatus,
    pub max_players: u8,
    pub bank: Chips,
    pub current_max_bet: Chips,
    pub current_bidding_round: u8,
    pub dealer_position: Option<SeatPosition>,
    pub current_player_position: Option<SeatPosition>,
    pub players: Vec<PlayerViewDto>,
    pub quarrel: Option<QuarrelViewDto>,
    /// Победители (пусто, пока игра не закончена).
    pub winner_ids: Vec<PlayerId>,
}

/// Краткая запись лобби.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct LobbyEntryDto {
    pub game_id: GameId,
    pub room_id: RoomId,
    pub seated: usize,
    pub max_players: u8,
}
