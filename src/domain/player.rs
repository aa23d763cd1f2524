use serde::{Deserialize, Serialize};

use crate::domain::card::Card;
use crate::domain::chips::Chips;
use crate::domain::{PlayerId, SeatPosition, Timestamp};
use crate::engine::errors::EngineError;

/// Статус игрока в текущей раздаче.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum PlayerStatus {
    /// Сел за стол, но ещё не нажал «готов».
    Waiting,
    /// Готов к раздаче.
    Ready,
    /// Получил карты и торгуется.
    Active,
    /// Играет «в тёмную»: карты скрыты, платит половину ставки.
    Dark,
    /// Вскрылся: больше не торгуется, но участвует в сравнении рук.
    Revealed,
    /// Сбросил карты. До конца раздачи больше не участвует.
    Folded,
    /// Пропускает спор: остался в раздаче, но не входит в число спорщиков.
    Passed,
}

impl PlayerStatus {
    /// Может ли игрок ходить / получать карты.
    pub fn is_playing(self) -> bool {
        matches!(self, PlayerStatus::Active | PlayerStatus::Ready | PlayerStatus::Dark)
    }

    /// Участвует ли игрок в сравнении рук.
    pub fn is_in_hand(self) -> bool {
        self.is_playing() || self == PlayerStatus::Revealed
    }

    /// Разрешённые переходы статусов игрока.
    pub fn can_transition_to(self, next: PlayerStatus) -> bool {
        use PlayerStatus::*;
        matches!(
            (self, next),
            (Waiting, Ready)
                | (Waiting, Folded)
                | (Ready, Active)
                | (Ready, Folded)
                | (Active, Dark)
                | (Dark, Active)
                | (Active, Revealed)
                | (Dark, Revealed)
                | (Revealed, Active)
                | (Active, Folded)
                | (Dark, Folded)
                | (Active, Passed)
                | (Dark, Passed)
                | (Revealed, Passed)
        )
    }
}

/// Состояние игрока за столом.
///
/// Поля закрыты: менять их можно только методами ниже, каждый из которых
/// проверяет свои инварианты (баланс не уходит в минус, статусы меняются
/// только по разрешённым переходам).
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Player {
    player_id: PlayerId,
    position: SeatPosition,
    balance: Chips,
    /// Ставка в текущей раздаче (номинальная, для сравнения с максимальной).
    current_bet: Chips,
    /// Сколько фишек реально ушло в банк в этой раздаче.
    contributed: Chips,
    hand: Vec<Card>,
    status: PlayerStatus,
    is_ready: bool,
    ready_at: Option<Timestamp>,
    last_action_at: Option<Timestamp>,
    /// Ходил ли игрок с момента раздачи карт.
    has_acted: bool,
    quarrel_vote: Option<bool>,
}

impl Player {
    pub fn new(player_id: PlayerId, position: SeatPosition, balance: Chips) -> Self {
        Self {
            player_id,
            position,
            balance,
            current_bet: Chips::ZERO,
            contributed: Chips::ZERO,
            hand: Vec::new(),
            status: PlayerStatus::Waiting,
            is_ready: false,
            ready_at: None,
            last_action_at: None,
            has_acted: false,
            quarrel_vote: None,
        }
    }

    pub fn player_id(&self) -> PlayerId {
        self.player_id
    }

    pub fn position(&self) -> SeatPosition {
        self.position
    }

    pub fn balance(&self) -> Chips {
        self.balance
    }

    pub fn current_bet(&self) -> Chips {
        self.current_bet
    }

    pub fn contributed(&self) -> Chips {
        self.contributed
    }

    pub fn hand(&self) -> &[Card] {
        &self.hand
    }

    pub fn status(&self) -> PlayerStatus {
        self.status
    }

    pub fn is_playing(&self) -> bool {
        self.status.is_playing()
    }

    pub fn is_in_hand(&self) -> bool {
        self.status.is_in_hand()
    }

    pub fn is_ready(&self) -> bool {
        self.is_ready
    }

    pub fn is_dark(&self) -> bool {
        self.status == PlayerStatus::Dark
    }

    pub fn ready_at(&self) -> Option<Timestamp> {
        self.ready_at
    }

    pub fn last_action_at(&self) -> Option<Timestamp> {
        self.last_action_at
    }

    pub fn has_acted(&self) -> bool {
        self.has_acted
    }

    pub fn quarrel_vote(&self) -> Option<bool> {
        self.quarrel_vote
    }

    /// Сменить статус по разрешённому переходу.
    pub fn transition(&mut self, next: PlayerStatus) -> Result<(), EngineError> {
        if self.status == next {
            return Ok(());
        }
        if !self.status.can_transition_to(next) {
            return Err(EngineError::invalid_action(
                self.player_id,
                format!("{next:?}"),
                format!("переход {:?} -> {next:?} запрещён", self.status),
            ));
        }
        self.status = next;
        if next == PlayerStatus::Folded {
            self.hand.clear();
        }
        Ok(())
    }

    /// Отметить готовность к игре.
    pub fn mark_ready(&mut self, now: Timestamp) -> Result<(), EngineError> {
        self.transition(PlayerStatus::Ready)?;
        self.is_ready = true;
        self.ready_at = Some(now);
        Ok(())
    }

    /// Сброс карт. Карты очищаются вместе со сменой статуса.
    pub fn fold(&mut self) -> Result<(), EngineError> {
        self.transition(PlayerStatus::Folded)
    }

    /// Списать фишки с баланса.
    pub fn debit(&mut self, amount: Chips) -> Result<(), EngineError> {
        self.balance = self
            .balance
            .checked_sub(amount)
            .ok_or(EngineError::InsufficientFunds {
                player_id: self.player_id,
                required: amount,
                available: self.balance,
            })?;
        Ok(())
    }

    pub fn credit(&mut self, amount: Chips) {
        self.balance += amount;
    }

    /// Поставить фишки: `paid` списывается с баланса, ставка растёт на `nominal`.
    ///
    /// Для обычного игрока `paid == nominal`, для «тёмного» `paid`: половина.
    pub fn place_bet(&mut self, paid: Chips, nominal: Chips) -> Result<(), EngineError> {
        self.debit(paid)?;
        self.current_bet += nominal;
        self.contributed += paid;
        Ok(())
    }

    /// Вернуть внесённые в раздачу фишки (отмена игры). Возвращает сумму возврата.
    pub fn refund_contribution(&mut self) -> Chips {
        let refund = self.contributed;
        self.balance += refund;
        self.contributed = Chips::ZERO;
        self.current_bet = Chips::ZERO;
        refund
    }

    /// Подготовка к новой раздаче: ставка, карты, флаг хода.
    pub fn reset_for_deal(&mut self) {
        self.current_bet = Chips::ZERO;
        self.contributed = Chips::ZERO;
        self.hand.clear();
        self.has_acted = false;
    }

    pub fn deal(&mut self, cards: Vec<Card>) {
        self.hand = cards;
    }

    pub fn clear_hand(&mut self) {
        self.hand.clear();
    }

    /// Обновить отметку последнего действия (перезапускает таймер хода).
    pub fn touch(&mut self, now: Timestamp) {
        self.last_action_at = Some(now);
    }

    pub fn mark_acted(&mut self) {
        self.has_acted = true;
    }

    pub fn set_quarrel_vote(&mut self, vote: bool) {
        self.quarrel_vote = Some(vote);
    }

    pub fn clear_quarrel_vote(&mut self) {
        self.quarrel_vote = None;
    }
}
