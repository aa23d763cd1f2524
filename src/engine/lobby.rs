//! Индекс игр в лобби. Общий для всех игр, порядок не гарантируется.

use parking_lot::RwLock;

use crate::domain::GameId;

#[derive(Debug, Default)]
pub struct LobbyIndex {
    games: RwLock<Vec<GameId>>,
}

impl LobbyIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Добавить игру (повторное добавление игнорируется).
    pub fn append(&self, game_id: GameId) {
        let mut games = self.games.write();
        if !games.contains(&game_id) {
            games.push(game_id);
        }
    }

    pub fn list(&self) -> Vec<GameId> {
        self.games.read().clone()
    }

    pub fn remove(&self, game_id: GameId) {
        self.games.write().retain(|id| *id != game_id);
    }
}
