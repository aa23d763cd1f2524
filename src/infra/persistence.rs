use dashmap::DashMap;

use crate::domain::{Game, GameId};

/// Хранилище снимков игр: ключ: id игры, значение: полный снимок.
///
/// Каждая операция менеджера: полная загрузка, изменение и полная запись.
/// Сериализация записей по одному id: забота вызывающего (`GameManager`).
pub trait StateStore: Send + Sync {
    fn find(&self, game_id: GameId) -> Option<Game>;

    fn save(&self, game: &Game);

    fn clear(&self, game_id: GameId);

    /// Только для списка лобби, не для игровой логики.
    fn find_all(&self) -> Vec<Game>;
}

/// In-memory реализация для тестов и локального запуска.
#[derive(Debug, Default)]
pub struct InMemoryGameStore {
    games: DashMap<GameId, Game>,
}

impl InMemoryGameStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.games.len()
    }

    pub fn is_empty(&self) -> bool {
        self.games.is_empty()
    }
}

impl StateStore for InMemoryGameStore {
    fn find(&self, game_id: GameId) -> Option<Game> {
        self.games.get(&game_id).map(|entry| entry.value().clone())
    }

    fn save(&self, game: &Game) {
        self.games.insert(game.id(), game.clone());
    }

    fn clear(&self, game_id: GameId) {
        self.games.remove(&game_id);
    }

    fn find_all(&self) -> Vec<Game> {
        let mut games: Vec<Game> = self.games.iter().map(|entry| entry.value().clone()).collect();
        games.sort_by_key(|g| g.id());
        games
    }
}

impl<S: StateStore + ?Sized> StateStore for std::sync::Arc<S> {
    fn find(&self, game_id: GameId) -> Option<Game> {
        (**self).find(game_id)
    }

    fn save(&self, game: &Game) {
        (**self).save(game)
    }

    fn clear(&self, game_id: GameId) {
        (**self).clear(game_id)
    }

    fn find_all(&self) -> Vec<Game> {
        (**self).find_all()
    }
}
