//! Настройки движка: размер стола, стартовый баланс, тайминги.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::{Chips, HAND_SIZE, SEKA_DECK_SIZE};
use crate::time_ctrl::TimingRules;

/// Больше игроков колода из 21 карты не обслужит.
pub const MAX_SEATS: u8 = (SEKA_DECK_SIZE / HAND_SIZE) as u8;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("не удалось разобрать конфигурацию: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("некорректная конфигурация: {0}")]
    Invalid(String),
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct SekaConfig {
    pub max_players: u8,
    pub min_players: u8,
    /// Баланс игрока, если при посадке он не указан.
    pub default_balance: Chips,
    pub timing: TimingRules,
}

impl Default for SekaConfig {
    fn default() -> Self {
        Self {
            max_players: 6,
            min_players: 2,
            default_balance: Chips(1000),
            timing: TimingRules::standard(),
        }
    }
}

impl SekaConfig {
    /// Разобрать JSON; отсутствующие поля берутся по умолчанию.
    pub fn from_json_str(raw: &str) -> Result<Self, ConfigError> {
        let config: SekaConfig = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min_players < 2 {
            return Err(ConfigError::Invalid(format!(
                "min_players = {}, нужно минимум 2",
                self.min_players
            )));
        }
        if self.max_players < self.min_players || self.max_players > MAX_SEATS {
            return Err(ConfigError::Invalid(format!(
                "max_players = {} вне диапазона {}..={MAX_SEATS}",
                self.max_players, self.min_players
            )));
        }
        if self.timing.turn_window_secs == 0 {
            return Err(ConfigError::Invalid("время на ход не может быть нулевым".into()));
        }
        Ok(())
    }
}
