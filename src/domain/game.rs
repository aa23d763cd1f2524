use serde::{Deserialize, Serialize};

use crate::domain::chips::Chips;
use crate::domain::hand::GameOutcome;
use crate::domain::player::Player;
use crate::domain::{GameId, PlayerId, RoomId, SeatPosition, Timestamp};
use crate::engine::errors::EngineError;

/// Фаза игры.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum GameStatus {
    /// Набор игроков и ожидание готовности.
    Waiting,
    /// Раздача карт.
    Distribution,
    /// Торги.
    Bidding,
    /// Спор между игроками с равными очками.
    Quarrel,
    Finished,
    Cancelled,
}

impl GameStatus {
    pub fn can_transition_to(self, next: GameStatus) -> bool {
        use GameStatus::*;
        matches!(
            (self, next),
            (Waiting, Distribution)
                | (Waiting, Cancelled)
                | (Distribution, Bidding)
                | (Bidding, Quarrel)
                | (Bidding, Finished)
                | (Quarrel, Finished)
        )
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, GameStatus::Finished | GameStatus::Cancelled)
    }
}

/// Состояние спора (переигровки при ничьей).
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct QuarrelState {
    /// Игроки с одинаковыми лучшими очками.
    pub participants: Vec<PlayerId>,
    /// Когда открылось голосование.
    pub opened_at: Timestamp,
    /// Взнос каждого участника: банк / число участников.
    pub required_bet: Chips,
    /// Номер спора в этой игре (1: первый).
    pub round: u32,
}

/// Игра (стол секи): корневой агрегат. Владеет всеми игроками.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Game {
    id: GameId,
    room_id: RoomId,
    status: GameStatus,
    max_players: u8,
    /// Сколько готовых игроков нужно для старта.
    #[serde(default = "default_min_players")]
    min_players: u8,
    /// Порядок вставки = порядок посадки. Очерёдность хода определяет позиция.
    players: Vec<Player>,
    /// Банк текущей раздачи.
    bank: Chips,
    current_max_bet: Chips,
    current_bidding_round: u8,
    dealer_position: Option<SeatPosition>,
    current_player_position: Option<SeatPosition>,
    created_at: Timestamp,
    /// Первая отметка «готов»: от неё считается окно готовности.
    ready_window_started_at: Option<Timestamp>,
    quarrel: Option<QuarrelState>,
    outcome: Option<GameOutcome>,
}

/// Максимум торговых кругов в одной раздаче.
pub const MAX_BIDDING_ROUNDS: u8 = 3;

/// Меньше двух игроков раздачи не бывает.
pub const MIN_PLAYERS: u8 = 2;

fn default_min_players() -> u8 {
    MIN_PLAYERS
}

impl Game {
    pub fn new(id: GameId, room_id: RoomId, max_players: u8, created_at: Timestamp) -> Self {
        Self {
            id,
            room_id,
            status: GameStatus::Waiting,
            max_players,
            min_players: MIN_PLAYERS,
            players: Vec::new(),
            bank: Chips::ZERO,
            current_max_bet: Chips::ZERO,
            current_bidding_round: 1,
            dealer_position: None,
            current_player_position: None,
            created_at,
            ready_window_started_at: None,
            quarrel: None,
            outcome: None,
        }
    }

    /// Кворум для старта (не меньше двух).
    pub fn with_min_players(mut self, min_players: u8) -> Self {
        self.min_players = min_players.max(MIN_PLAYERS);
        self
    }

    pub fn id(&self) -> GameId {
        self.id
    }

    pub fn room_id(&self) -> RoomId {
        self.room_id
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn max_players(&self) -> u8 {
        self.max_players
    }

    pub fn min_players(&self) -> u8 {
        self.min_players
    }

    pub fn bank(&self) -> Chips {
        self.bank
    }

    pub fn current_max_bet(&self) -> Chips {
        self.current_max_bet
    }

    pub fn current_bidding_round(&self) -> u8 {
        self.current_bidding_round
    }

    pub fn dealer_position(&self) -> Option<SeatPosition> {
        self.dealer_position
    }

    pub fn current_player_position(&self) -> Option<SeatPosition> {
        self.current_player_position
    }

    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }

    pub fn ready_window_started_at(&self) -> Option<Timestamp> {
        self.ready_window_started_at
    }

    pub fn quarrel(&self) -> Option<&QuarrelState> {
        self.quarrel.as_ref()
    }

    pub fn outcome(&self) -> Option<&GameOutcome> {
        self.outcome.as_ref()
    }

    /// Игроки в порядке посадки.
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    /// Игроки, отсортированные по позиции за столом.
    pub fn players_by_position(&self) -> Vec<&Player> {
        let mut sorted: Vec<&Player> = self.players.iter().collect();
        sorted.sort_by_key(|p| p.position());
        sorted
    }

    pub fn player(&self, player_id: PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| p.player_id() == player_id)
    }

    pub fn player_mut(&mut self, player_id: PlayerId) -> Option<&mut Player> {
        self.players.iter_mut().find(|p| p.player_id() == player_id)
    }

    pub fn player_at(&self, position: SeatPosition) -> Option<&Player> {
        self.players.iter().find(|p| p.position() == position)
    }

    pub fn player_at_mut(&mut self, position: SeatPosition) -> Option<&mut Player> {
        self.players.iter_mut().find(|p| p.position() == position)
    }

    /// Игрок, либо `PlayerNotFound` с контекстом игры.
    pub fn require_player(&self, player_id: PlayerId) -> Result<&Player, EngineError> {
        self.player(player_id).ok_or(EngineError::PlayerNotFound {
            game_id: self.id,
            player_id,
        })
    }

    pub fn require_player_mut(&mut self, player_id: PlayerId) -> Result<&mut Player, EngineError> {
        let game_id = self.id;
        self.player_mut(player_id)
            .ok_or(EngineError::PlayerNotFound { game_id, player_id })
    }

    pub fn current_player(&self) -> Option<&Player> {
        self.current_player_position
            .and_then(|pos| self.player_at(pos))
    }

    pub fn playing_count(&self) -> usize {
        self.players.iter().filter(|p| p.is_playing()).count()
    }

    pub fn in_hand_count(&self) -> usize {
        self.players.iter().filter(|p| p.is_in_hand()).count()
    }

    /// Сумма балансов + банк. Сохраняется при любых ставках.
    pub fn total_chips(&self) -> Chips {
        self.players.iter().map(|p| p.balance()).sum::<Chips>() + self.bank
    }

    /// Ошибка, если игра не в ожидаемой фазе.
    pub fn ensure_status(&self, expected: GameStatus) -> Result<(), EngineError> {
        if self.status == expected {
            Ok(())
        } else {
            Err(EngineError::WrongPhase {
                game_id: self.id,
                expected,
                actual: self.status,
            })
        }
    }

    /// Сменить фазу игры по разрешённому переходу.
    pub fn transition_to(&mut self, next: GameStatus) -> Result<(), EngineError> {
        if !self.status.can_transition_to(next) {
            return Err(EngineError::WrongPhase {
                game_id: self.id,
                expected: next,
                actual: self.status,
            });
        }
        self.status = next;
        Ok(())
    }

    /// Посадить игрока на наименьшую свободную позицию (1..=max_players).
    pub fn seat_player(
        &mut self,
        player_id: PlayerId,
        balance: Chips,
    ) -> Result<SeatPosition, EngineError> {
        self.ensure_status(GameStatus::Waiting)?;
        if self.player(player_id).is_some() {
            return Err(EngineError::AlreadyJoined {
                game_id: self.id,
                player_id,
            });
        }
        let position = (1..=self.max_players)
            .find(|pos| self.player_at(*pos).is_none())
            .ok_or(EngineError::GameFull(self.id))?;

        self.players.push(Player::new(player_id, position, balance));
        Ok(position)
    }

    /// Убрать игрока со стола. Только до раздачи.
    pub fn remove_player(&mut self, player_id: PlayerId) -> Result<Player, EngineError> {
        self.ensure_status(GameStatus::Waiting)?;
        let idx = self
            .players
            .iter()
            .position(|p| p.player_id() == player_id)
            .ok_or(EngineError::PlayerNotFound {
                game_id: self.id,
                player_id,
            })?;
        Ok(self.players.remove(idx))
    }

    /// Ставка игрока: фишки уходят с баланса в банк.
    pub fn collect_bet(
        &mut self,
        player_id: PlayerId,
        paid: Chips,
        nominal: Chips,
    ) -> Result<(), EngineError> {
        self.require_player_mut(player_id)?.place_bet(paid, nominal)?;
        self.bank += paid;
        Ok(())
    }

    /// Выплата из банка игроку.
    pub fn pay_out(&mut self, player_id: PlayerId, amount: Chips) -> Result<(), EngineError> {
        let game_id = self.id;
        let remaining = self.bank.checked_sub(amount).ok_or(EngineError::InvalidAction {
            player_id,
            action: "payout".into(),
            reason: format!("в банке игры {game_id} меньше {amount}"),
        })?;
        self.require_player_mut(player_id)?.credit(amount);
        self.bank = remaining;
        Ok(())
    }

    /// Вернуть всем игрокам внесённые фишки. Возвращает общую сумму возврата.
    pub fn refund_all(&mut self) -> Chips {
        let mut refunded = Chips::ZERO;
        for p in self.players.iter_mut() {
            refunded += p.refund_contribution();
        }
        self.bank = self.bank.saturating_sub(refunded);
        self.current_max_bet = Chips::ZERO;
        refunded
    }

    /// Сброс торгового состояния перед раздачей.
    pub fn reset_for_deal(&mut self) {
        self.current_bidding_round = 1;
        self.current_max_bet = Chips::ZERO;
        self.bank = Chips::ZERO;
        self.quarrel = None;
        self.outcome = None;
    }

    pub fn set_current_max_bet(&mut self, amount: Chips) {
        self.current_max_bet = amount;
    }

    pub fn set_current_player_position(&mut self, position: Option<SeatPosition>) {
        self.current_player_position = position;
    }

    pub fn set_dealer_position(&mut self, position: Option<SeatPosition>) {
        self.dealer_position = position;
    }

    /// Следующий торговый круг (не больше трёх).
    pub fn advance_bidding_round(&mut self) {
        if self.current_bidding_round < MAX_BIDDING_ROUNDS {
            self.current_bidding_round += 1;
        }
    }

    /// Запомнить первую отметку готовности (повторные вызовы ничего не меняют).
    pub fn open_ready_window(&mut self, now: Timestamp) {
        if self.ready_window_started_at.is_none() {
            self.ready_window_started_at = Some(now);
        }
    }

    pub fn set_quarrel(&mut self, quarrel: Option<QuarrelState>) {
        self.quarrel = quarrel;
    }

    pub fn set_outcome(&mut self, outcome: GameOutcome) {
        self.outcome = Some(outcome);
    }

    pub fn players_mut(&mut self) -> impl Iterator<Item = &mut Player> {
        self.players.iter_mut()
    }
}
