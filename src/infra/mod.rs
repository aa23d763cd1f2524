//! Инфраструктурный слой вокруг движка секи:
//! - генерация ID;
//! - RNG-реализации для движка;
//! - хранилище снимков игр;
//! - конфигурация.

pub mod config;
pub mod ids;
pub mod persistence;
pub mod rng;

pub use config::{ConfigError, SekaConfig, MAX_SEATS};
pub use ids::IdGenerator;
pub use persistence::{InMemoryGameStore, StateStore};
pub use rng::{DeterministicRng, SystemRng};
