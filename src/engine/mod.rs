//! Движок секи: торги, раздача, спор, определение победителя.
//!
//! Высокоуровневый объект: `GameManager`
//! Основные операции:
//!   - `process_action` – применить действие игрока в торгах
//!   - `distribute` – раздать карты и начать торги
//!   - `conclude_hand` – определить победителя или открыть спор
//!   - `settle_quarrel_vote` – подвести итог голосования за спор

pub mod actions;
pub mod bidding;
pub mod distribution;
pub mod errors;
pub mod events;
pub mod game_manager;
pub mod lobby;
pub mod positions;
pub mod quarrel;
pub mod showdown;
pub mod validation;

pub use actions::BidAction;
pub use bidding::{is_bidding_round_complete, is_hand_over, process_action, ActionOutcome};
pub use distribution::{distribute, redistribute_for_quarrel};
pub use errors::EngineError;
pub use events::{
    EventLog, EventSink, GameEvent, NoopEventSink, PlayerCards, RecordingEventSink,
    TracingEventSink,
};
pub use game_manager::{GameManager, ManagerError};
pub use lobby::LobbyIndex;
pub use quarrel::{
    can_initiate_quarrel, resolve_quarrel, settle_quarrel_vote, start_quarrel,
    winners_vote_for_quarrel, QuarrelResolution,
};
pub use showdown::{conclude_hand, determine_winners, HandConclusion, ShowdownResult};
pub use validation::{diff_to_call, validate_action, ActionPlan};

/// RNG интерфейс для движка.
/// Реализации в infra (обёртки над `rand`).
pub trait RandomSource {
    fn shuffle<T>(&mut self, slice: &mut [T]);
}
