// src/engine/game_manager.rs

use std::sync::Arc;

use dashmap::DashMap;
use parking_lot::Mutex;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::domain::{Chips, Game, GameId, GameStatus, PlayerId, RoomId, SeatPosition, Timestamp};
use crate::engine::bidding::{process_action, ActionOutcome};
use crate::engine::errors::EngineError;
use crate::engine::events::{EventLog, EventSink};
use crate::engine::lobby::LobbyIndex;
use crate::engine::quarrel::{all_votes_in, record_vote, settle_quarrel_vote, QuarrelResolution};
use crate::engine::showdown::{conclude_hand, HandConclusion};
use crate::engine::{BidAction, RandomSource};
use crate::infra::config::SekaConfig;
use crate::infra::ids::IdGenerator;
use crate::infra::persistence::StateStore;
use crate::time_ctrl::clock::Clock;
use crate::time_ctrl::readiness::{self, TimeoutOutcome};

/// Ошибки уровня менеджера игр (над движком одной игры).
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ManagerError {
    /// Игры с таким id нет в хранилище.
    #[error("Игра {0} не найдена")]
    GameNotFound(GameId),

    /// Проброшенная ошибка из движка.
    #[error(transparent)]
    Engine(#[from] EngineError),
}

/// Результат хода: само действие и, если торги закончились, итог раздачи.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ActionReport {
    pub outcome: ActionOutcome,
    pub conclusion: Option<HandConclusion>,
}

/// Общий RNG менеджера: мьютекс берётся на одно перемешивание.
struct SharedRng<'a, R> {
    inner: &'a Mutex<R>,
}

impl<R: RandomSource> RandomSource for SharedRng<'_, R> {
    fn shuffle<T>(&mut self, slice: &mut [T]) {
        self.inner.lock().shuffle(slice);
    }
}

/// Менеджер игр:
/// - хранит игры через `StateStore` (загрузка → изменение копии → запись);
/// - сериализует все изменения одной игры через блокировку по id,
///   разные игры не ждут друг друга;
/// - публикует события только после успешной записи.
pub struct GameManager<S, E, C, R> {
    store: S,
    sink: E,
    clock: C,
    rng: Mutex<R>,
    config: SekaConfig,
    ids: IdGenerator,
    lobby: LobbyIndex,
    locks: DashMap<GameId, Arc<Mutex<()>>>,
}

impl<S, E, C, R> GameManager<S, E, C, R>
where
    S: StateStore,
    E: EventSink,
    C: Clock,
    R: RandomSource,
{
    pub fn new(store: S, sink: E, clock: C, rng: R, config: SekaConfig) -> Self {
        Self {
            store,
            sink,
            clock,
            rng: Mutex::new(rng),
            config,
            ids: IdGenerator::new(),
            lobby: LobbyIndex::new(),
            locks: DashMap::new(),
        }
    }

    pub fn config(&self) -> &SekaConfig {
        &self.config
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn sink(&self) -> &E {
        &self.sink
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn now(&self) -> Timestamp {
        self.clock.now()
    }

    fn lock_for(&self, game_id: GameId) -> Arc<Mutex<()>> {
        self.locks
            .entry(game_id)
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }

    /// Убрать блокировку игры, если её больше никто не держит.
    ///
    /// Проверка и удаление идут под блокировкой шарда, поэтому новый
    /// `lock_for` либо получит ту же запись, либо создаст свежую.
    fn release_lock(&self, game_id: GameId, lock: Arc<Mutex<()>>) {
        drop(lock);
        self.locks
            .remove_if(&game_id, |_, lock| Arc::strong_count(lock) == 1);
    }

    /// Сколько игр сейчас заблокировано операциями.
    pub fn active_locks(&self) -> usize {
        self.locks.len()
    }

    /// Один цикл «загрузить → изменить копию → сохранить → опубликовать».
    ///
    /// Если `op` вернула ошибку, в хранилище ничего не пишется и события
    /// не публикуются. RNG блокируется только на время перемешивания.
    fn mutate<T>(
        &self,
        game_id: GameId,
        op: impl FnOnce(&mut Game, &mut SharedRng<'_, R>, Timestamp, &mut EventLog) -> Result<T, EngineError>,
    ) -> Result<T, ManagerError> {
        if self.store.find(game_id).is_none() {
            return Err(ManagerError::GameNotFound(game_id));
        }

        let lock = self.lock_for(game_id);
        let result = {
            let _guard = lock.lock();
            self.apply(game_id, op)
        };
        self.release_lock(game_id, lock);
        result
    }

    fn apply<T>(
        &self,
        game_id: GameId,
        op: impl FnOnce(&mut Game, &mut SharedRng<'_, R>, Timestamp, &mut EventLog) -> Result<T, EngineError>,
    ) -> Result<T, ManagerError> {
        let mut game = self
            .store
            .find(game_id)
            .ok_or(ManagerError::GameNotFound(game_id))?;
        let now = self.clock.now();
        let mut events = EventLog::new();
        let mut rng = SharedRng { inner: &self.rng };

        let result = op(&mut game, &mut rng, now, &mut events)?;

        self.store.save(&game);
        if game.status() != GameStatus::Waiting {
            self.lobby.remove(game_id);
        }
        debug!(game_id, events = ?events.names(), "game saved");
        events.publish_to(&self.sink);
        Ok(result)
    }

    /// Создать игру и поставить её в лобби.
    pub fn create_game(&self, room_id: Option<RoomId>) -> Game {
        let game_id = self.ids.next_game_id();
        let room_id = room_id.unwrap_or_else(|| self.ids.next_room_id());
        let game = Game::new(game_id, room_id, self.config.max_players, self.clock.now())
            .with_min_players(self.config.min_players);
        self.store.save(&game);
        self.lobby.append(game_id);
        info!(game_id, room_id, max_players = game.max_players(), "game created");
        game
    }

    /// Новый id игрока (для локального запуска и dev-CLI).
    pub fn next_player_id(&self) -> PlayerId {
        self.ids.next_player_id()
    }

    /// Посадить игрока на наименьшую свободную позицию.
    pub fn join_game(
        &self,
        game_id: GameId,
        player_id: PlayerId,
        balance: Option<Chips>,
    ) -> Result<SeatPosition, ManagerError> {
        let balance = balance.unwrap_or(self.config.default_balance);
        self.mutate(game_id, |game, _, _, _| {
            let position = game.seat_player(player_id, balance)?;
            info!(game_id, player_id, position, balance = balance.0, "player joined");
            Ok(position)
        })
    }

    /// Встать из-за стола (только до раздачи).
    pub fn leave_game(&self, game_id: GameId, player_id: PlayerId) -> Result<(), ManagerError> {
        self.mutate(game_id, |game, _, _, _| {
            game.remove_player(player_id)?;
            info!(game_id, player_id, "player left");
            Ok(())
        })
    }

    /// Отметить готовность. Возвращает `true`, если игра сразу началась.
    pub fn mark_ready(&self, game_id: GameId, player_id: PlayerId) -> Result<bool, ManagerError> {
        let rules = self.config.timing;
        self.mutate(game_id, |game, rng, now, events| {
            readiness::mark_ready(game, player_id, now, &rules, events)?;
            if readiness::should_start_now(game) {
                readiness::start_game(game, rng, now, events)?;
                return Ok(true);
            }
            Ok(false)
        })
    }

    /// Действие игрока в торгах. Если торги окончены: победитель или спор.
    pub fn player_action(
        &self,
        game_id: GameId,
        player_id: PlayerId,
        action: BidAction,
    ) -> Result<ActionReport, ManagerError> {
        self.mutate(game_id, |game, _, now, events| {
            let outcome = process_action(game, player_id, action, now, events)?;
            let conclusion = if outcome.hand_over {
                Some(conclude_hand(game, now, events)?)
            } else {
                None
            };
            Ok(ActionReport { outcome, conclusion })
        })
    }

    /// Голос участника спора. Когда проголосовали все: подводим итог.
    pub fn vote_quarrel(
        &self,
        game_id: GameId,
        player_id: PlayerId,
        vote: bool,
    ) -> Result<Option<QuarrelResolution>, ManagerError> {
        self.mutate(game_id, |game, rng, now, events| {
            record_vote(game, player_id, vote)?;
            if !all_votes_in(game) {
                return Ok(None);
            }
            settle_quarrel_vote(game, rng, now, false, events).map(Some)
        })
    }

    /// Проверить таймауты одной игры.
    pub fn check_timeouts(&self, game_id: GameId) -> Result<TimeoutOutcome, ManagerError> {
        let rules = self.config.timing;
        self.mutate(game_id, |game, rng, now, events| {
            readiness::check_timeouts(game, rng, now, &rules, events)
        })
    }

    /// Обойти все незавершённые игры и проверить таймауты.
    ///
    /// Ошибка одной игры не мешает остальным.
    pub fn check_all_timeouts(&self) -> Vec<(GameId, TimeoutOutcome)> {
        let mut fired = Vec::new();
        for game in self.store.find_all() {
            if game.status().is_terminal() {
                continue;
            }
            match self.check_timeouts(game.id()) {
                Ok(TimeoutOutcome::Idle) => {}
                Ok(outcome) => fired.push((game.id(), outcome)),
                Err(err) => warn!(game_id = game.id(), error = %err, "timeout check failed"),
            }
        }
        fired
    }

    pub fn get_game(&self, game_id: GameId) -> Result<Game, ManagerError> {
        self.store
            .find(game_id)
            .ok_or(ManagerError::GameNotFound(game_id))
    }

    /// Игры, ещё набирающие игроков.
    pub fn lobby_games(&self) -> Vec<Game> {
        self.lobby
            .list()
            .into_iter()
            .filter_map(|id| self.store.find(id))
            .filter(|g| g.status() == GameStatus::Waiting)
            .collect()
    }

    /// Все игры хранилища.
    pub fn all_games(&self) -> Vec<Game> {
        self.store.find_all()
    }

    /// Удалить игру из хранилища и из лобби.
    pub fn remove_game(&self, game_id: GameId) {
        let lock = self.lock_for(game_id);
        {
            let _guard = lock.lock();
            self.store.clear(game_id);
            self.lobby.remove(game_id);
        }
        self.release_lock(game_id, lock);
        info!(game_id, "game removed");
    }
}
