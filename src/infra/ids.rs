use std::sync::atomic::{AtomicU64, Ordering};

use crate::domain::{GameId, PlayerId, RoomId};

/// Генерация ID на основе монотонных счётчиков.
#[derive(Debug)]
pub struct IdGenerator {
    game_counter: AtomicU64,
    room_counter: AtomicU64,
    player_counter: AtomicU64,
}

impl IdGenerator {
    /// Все счётчики начинаются с 1.
    pub fn new() -> Self {
        Self {
            game_counter: AtomicU64::new(1),
            room_counter: AtomicU64::new(1),
            player_counter: AtomicU64::new(1),
        }
    }

    #[inline]
    pub fn next_game_id(&self) -> GameId {
        self.game_counter.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn next_room_id(&self) -> RoomId {
        self.room_counter.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn next_player_id(&self) -> PlayerId {
        self.player_counter.fetch_add(1, Ordering::Relaxed)
    }
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::new()
    }
}
