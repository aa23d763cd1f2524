//! Движок правил секи: посадка игроков, торги, оценка рук, спор, таймауты.
//!
//! Снаружи движок вызывается через `api::execute_command` / `api::execute_query`
//! или напрямую через `engine::GameManager`.

pub mod api;
pub mod domain;
pub mod engine;
pub mod eval;
pub mod infra;
pub mod time_ctrl;

pub use api::{execute_command, execute_query, ApiError, Command, CommandResponse, Query, QueryResponse};
pub use engine::{EngineError, GameManager, ManagerError};
pub use infra::SekaConfig;
