use core::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::Chips;

/// Действие игрока в торгах.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum BidAction {
    Fold,
    /// Повышение на указанную сумму («тёмный» платит половину).
    Raise(Chips),
    Call,
    Check,
    /// Вскрытие: ставка вдвое больше текущей максимальной.
    Reveal,
    /// Перейти в игру «в тёмную».
    Dark,
    /// Открыть карты после игры «в тёмную».
    Open,
}

impl BidAction {
    pub fn name(&self) -> &'static str {
        match self {
            BidAction::Fold => "fold",
            BidAction::Raise(_) => "raise",
            BidAction::Call => "call",
            BidAction::Check => "check",
            BidAction::Reveal => "reveal",
            BidAction::Dark => "dark",
            BidAction::Open => "open",
        }
    }

    pub fn amount(&self) -> Option<Chips> {
        match self {
            BidAction::Raise(amount) => Some(*amount),
            _ => None,
        }
    }
}

impl fmt::Display for BidAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BidAction::Raise(amount) => write!(f, "raise({amount})"),
            other => f.write_str(other.name()),
        }
    }
}
