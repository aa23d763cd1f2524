//! Модуль подсчёта очков руки в секе.
//!
//! Основная функция:
//!   `score(hand) -> HandScore` для 2 или 3 карт.

pub mod combination;
pub mod evaluator;

pub use combination::{seka_score, Combination};
pub use evaluator::{classify, score, score_strings};
