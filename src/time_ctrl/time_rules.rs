// src/time_ctrl/time_rules.rs
//! Правила тайминга секи: окно готовности, время на ход, окно голосования за спор.
//!
//! Только "правила", без состояния и без привязки к конкретной игре.

use serde::{Deserialize, Serialize};

use crate::domain::Timestamp;

/// Правила тайминга для одной игры.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct TimingRules {
    /// Сколько секунд ждём готовности остальных после первой отметки «готов».
    pub ready_window_secs: u64,
    /// Сколько секунд даётся на ход.
    pub turn_window_secs: u64,
    /// Сколько секунд длится голосование за спор.
    pub quarrel_vote_window_secs: u64,
}

impl TimingRules {
    pub const fn new(ready_window_secs: u64, turn_window_secs: u64, quarrel_vote_window_secs: u64) -> Self {
        Self {
            ready_window_secs,
            turn_window_secs,
            quarrel_vote_window_secs,
        }
    }

    /// Стандартный профиль: 10 сек на готовность, 30 сек на ход, 10 сек на голосование.
    pub const fn standard() -> Self {
        Self::new(10, 30, 10)
    }

    pub const fn ready_window_ms(&self) -> Timestamp {
        self.ready_window_secs.saturating_mul(1000)
    }

    pub const fn turn_window_ms(&self) -> Timestamp {
        self.turn_window_secs.saturating_mul(1000)
    }

    pub const fn quarrel_vote_window_ms(&self) -> Timestamp {
        self.quarrel_vote_window_secs.saturating_mul(1000)
    }
}

impl Default for TimingRules {
    fn default() -> Self {
        Self::standard()
    }
}

/// Истекло ли окно `window_ms`, отсчитанное от `since`.
pub fn window_elapsed(since: Timestamp, now: Timestamp, window_ms: Timestamp) -> bool {
    now.saturating_sub(since) >= window_ms
}
