//! События игры и приёмник событий (push-уведомления клиентам).
//!
//! Движок только складывает события в `EventLog`; публикует их менеджер
//! уже после сохранения игры. От доставки событий корректность не зависит.

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;

use crate::domain::{Card, Chips, Game, GameId, PlayerId, PlayerScore, SeatPosition};
use crate::engine::actions::BidAction;

/// Карты одного игрока в событии раздачи.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PlayerCards {
    pub player_id: PlayerId,
    pub cards: Vec<Card>,
}

/// Событие игры.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "event", rename_all_fields = "camelCase")]
pub enum GameEvent {
    GameStarted {
        game_id: GameId,
        players: Vec<PlayerId>,
        first_player_id: Option<PlayerId>,
        initial_state: Box<Game>,
    },

    PlayerReady {
        game_id: GameId,
        player_id: PlayerId,
        ready_players_count: usize,
        /// Сколько секунд осталось до принудительного старта.
        time_until_start: u64,
    },

    CardsDistributed {
        game_id: GameId,
        player_cards: Vec<PlayerCards>,
        round: u8,
    },

    PlayerActionTaken {
        game_id: GameId,
        player_id: PlayerId,
        action: BidAction,
        bet_amount: Option<Chips>,
        new_player_position: Option<SeatPosition>,
        bank: Chips,
        /// Действие выполнено движком за игрока (таймаут).
        forced: bool,
    },

    QuarrelInitiated {
        game_id: GameId,
        winning_players: Vec<PlayerId>,
        required_bet: Chips,
    },

    GameFinished {
        game_id: GameId,
        winner_id: Option<PlayerId>,
        winner_ids: Vec<PlayerId>,
        scores: Vec<PlayerScore>,
        final_state: Box<Game>,
    },

    GameCancelled {
        game_id: GameId,
        refunded: Chips,
    },
}

impl GameEvent {
    pub fn name(&self) -> &'static str {
        match self {
            GameEvent::GameStarted { .. } => "GameStarted",
            GameEvent::PlayerReady { .. } => "PlayerReady",
            GameEvent::CardsDistributed { .. } => "CardsDistributed",
            GameEvent::PlayerActionTaken { .. } => "PlayerActionTaken",
            GameEvent::QuarrelInitiated { .. } => "QuarrelInitiated",
            GameEvent::GameFinished { .. } => "GameFinished",
            GameEvent::GameCancelled { .. } => "GameCancelled",
        }
    }

    pub fn game_id(&self) -> GameId {
        match self {
            GameEvent::GameStarted { game_id, .. }
            | GameEvent::PlayerReady { game_id, .. }
            | GameEvent::CardsDistributed { game_id, .. }
            | GameEvent::PlayerActionTaken { game_id, .. }
            | GameEvent::QuarrelInitiated { game_id, .. }
            | GameEvent::GameFinished { game_id, .. }
            | GameEvent::GameCancelled { game_id, .. } => *game_id,
        }
    }

    /// JSON-представление события для приёмника.
    pub fn payload(&self) -> Value {
        serde_json::to_value(self)
            .unwrap_or_else(|err| serde_json::json!({ "serializationError": err.to_string() }))
    }
}

/// Список событий, накопленных за одну операцию.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EventLog {
    pub events: Vec<GameEvent>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.events.iter().map(GameEvent::name).collect()
    }

    /// Отдать все события приёмнику.
    pub fn publish_to(self, sink: &dyn EventSink) {
        for event in self.events {
            sink.publish(event.name(), event.payload());
        }
    }
}

/// Приёмник событий. Вызывается после смены состояния, ответа не ждём.
pub trait EventSink: Send + Sync {
    fn publish(&self, event_name: &str, payload: Value);
}

/// Ничего не делает.
#[derive(Clone, Debug, Default)]
pub struct NoopEventSink;

impl EventSink for NoopEventSink {
    fn publish(&self, _event_name: &str, _payload: Value) {}
}

/// Пишет события в лог через tracing.
#[derive(Clone, Debug, Default)]
pub struct TracingEventSink;

impl EventSink for TracingEventSink {
    fn publish(&self, event_name: &str, payload: Value) {
        info!(event = event_name, %payload, "game event");
    }
}

/// Запоминает все события (для тестов и dev-CLI).
#[derive(Debug, Default)]
pub struct RecordingEventSink {
    events: Mutex<Vec<(String, Value)>>,
}

impl RecordingEventSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn names(&self) -> Vec<String> {
        self.events.lock().iter().map(|(name, _)| name.clone()).collect()
    }

    pub fn events(&self) -> Vec<(String, Value)> {
        self.events.lock().clone()
    }

    /// Последнее событие с таким именем.
    pub fn last(&self, event_name: &str) -> Option<Value> {
        self.events
            .lock()
            .iter()
            .rev()
            .find(|(name, _)| name == event_name)
            .map(|(_, payload)| payload.clone())
    }

    pub fn clear(&self) {
        self.events.lock().clear();
    }
}

impl EventSink for RecordingEventSink {
    fn publish(&self, event_name: &str, payload: Value) {
        self.events.lock().push((event_name.to_string(), payload));
    }
}
