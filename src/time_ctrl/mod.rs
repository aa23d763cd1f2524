// src/time_ctrl/mod.rs
//! Контроль времени: окно готовности, время на ход, окно голосования за спор.
//!
//! Здесь собираем:
//! - правила (`TimingRules`);
//! - источник времени (`Clock`);
//! - координатор готовности и таймаутов (`readiness`).

pub mod clock;
pub mod readiness;
pub mod time_rules;

pub use clock::{Clock, ManualClock, SystemClock};
pub use readiness::{
    can_start, check_quarrel_vote_timeouts, check_ready_timeouts, check_timeouts,
    check_turn_timeouts, mark_ready, ready_count, should_start_now, start_game, TimeoutOutcome,
};
pub use time_rules::{window_elapsed, TimingRules};
