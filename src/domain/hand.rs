use serde::{Deserialize, Serialize};

use crate::domain::chips::Chips;
use crate::domain::PlayerId;

/// Сила руки. Полностью упорядочена, ничья: точное равенство.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct HandScore(pub u32);

/// Очки конкретного игрока на вскрытии.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlayerScore {
    pub player_id: PlayerId,
    pub score: HandScore,
}

/// Выплата одному игроку.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Payout {
    pub player_id: PlayerId,
    pub amount: Chips,
}

/// Итог завершённой игры.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct GameOutcome {
    pub winner_ids: Vec<PlayerId>,
    /// Пусто, если победитель определился без вскрытия (все остальные сбросили).
    pub scores: Vec<PlayerScore>,
    pub total_pot: Chips,
    pub payouts: Vec<Payout>,
}

impl GameOutcome {
    /// Первый победитель (для событий с одним winnerId).
    pub fn primary_winner(&self) -> Option<PlayerId> {
        self.winner_ids.first().copied()
    }
}
