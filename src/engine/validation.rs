use crate::domain::{Chips, Game, GameStatus, Player, PlayerId, PlayerStatus};
use crate::engine::actions::BidAction;
use crate::engine::errors::EngineError;

/// Что именно нужно сделать с состоянием, если действие допустимо.
///
/// Считается целиком до любых изменений: применение плана уже не может
/// упасть на проверке, поэтому неудачное действие ничего не меняет.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ActionPlan {
    /// Сколько фишек уходит с баланса в банк.
    pub paid: Chips,
    /// На сколько растёт ставка игрока в раздаче.
    pub nominal: Chips,
    pub next_status: Option<PlayerStatus>,
    pub new_max_bet: Option<Chips>,
}

impl ActionPlan {
    fn noop() -> Self {
        Self {
            paid: Chips::ZERO,
            nominal: Chips::ZERO,
            next_status: None,
            new_max_bet: None,
        }
    }

    fn status(next: PlayerStatus) -> Self {
        Self {
            next_status: Some(next),
            ..Self::noop()
        }
    }
}

/// Проверка очереди хода: игра в торгах, игрок играет и сейчас его позиция.
pub fn validate_turn<'a>(game: &'a Game, player_id: PlayerId) -> Result<&'a Player, EngineError> {
    game.ensure_status(GameStatus::Bidding)?;
    let player = game.require_player(player_id)?;
    if !player.is_playing() {
        return Err(EngineError::PlayerCannotAct {
            player_id,
            status: player.status(),
        });
    }
    if game.current_player_position() != Some(player.position()) {
        return Err(EngineError::NotYourTurn {
            game_id: game.id(),
            player_id,
        });
    }
    Ok(player)
}

/// Проверка, может ли игрок выполнить это действие при текущем состоянии ставок.
pub fn validate_action(
    game: &Game,
    player_id: PlayerId,
    action: &BidAction,
) -> Result<ActionPlan, EngineError> {
    let player = validate_turn(game, player_id)?;
    let plan = plan_action(player, game.current_max_bet(), action)?;
    if let Some(next) = plan.next_status {
        if !player.status().can_transition_to(next) {
            return Err(EngineError::invalid_action(
                player_id,
                action.name(),
                format!("переход {:?} -> {next:?} запрещён", player.status()),
            ));
        }
    }
    Ok(plan)
}

fn plan_action(player: &Player, max_bet: Chips, action: &BidAction) -> Result<ActionPlan, EngineError> {
    let player_id = player.player_id();
    let dark = player.is_dark();

    match *action {
        BidAction::Fold => Ok(ActionPlan::status(PlayerStatus::Folded)),

        BidAction::Raise(amount) => {
            let paid = if dark { amount.half() } else { amount };
            if paid.is_zero() {
                return Err(EngineError::invalid_action(
                    player_id,
                    action.name(),
                    "сумма повышения должна быть положительной",
                ));
            }
            let new_total = player.current_bet() + amount;
            if new_total <= max_bet {
                return Err(EngineError::invalid_action(
                    player_id,
                    action.name(),
                    format!("ставка {new_total} не превышает текущую максимальную {max_bet}"),
                ));
            }
            ensure_affordable(player, paid)?;
            Ok(ActionPlan {
                paid,
                nominal: amount,
                next_status: None,
                new_max_bet: Some(new_total),
            })
        }

        BidAction::Call => {
            let due = diff_to_call(player, max_bet);
            if due.is_zero() {
                return Ok(ActionPlan::noop());
            }
            let paid = if dark { due.half() } else { due };
            ensure_affordable(player, paid)?;
            Ok(ActionPlan {
                paid,
                nominal: due,
                next_status: None,
                new_max_bet: None,
            })
        }

        BidAction::Check => {
            if dark {
                return Err(EngineError::invalid_action(
                    player_id,
                    action.name(),
                    "игрок в тёмную не может делать check",
                ));
            }
            let due = diff_to_call(player, max_bet);
            if !due.is_zero() {
                return Err(EngineError::CannotCheck { player_id, due });
            }
            Ok(ActionPlan::noop())
        }

        BidAction::Reveal => {
            if max_bet.is_zero() {
                return Err(EngineError::invalid_action(
                    player_id,
                    action.name(),
                    "нельзя вскрываться без ставок",
                ));
            }
            let stake = max_bet.double();
            ensure_affordable(player, stake)?;
            Ok(ActionPlan {
                paid: stake,
                nominal: stake,
                next_status: Some(PlayerStatus::Revealed),
                new_max_bet: Some(stake),
            })
        }

        BidAction::Dark => {
            if player.status() != PlayerStatus::Active {
                return Err(EngineError::invalid_action(
                    player_id,
                    action.name(),
                    format!("в тёмную можно только из статуса Active, сейчас {:?}", player.status()),
                ));
            }
            if !player.current_bet().is_zero() {
                return Err(EngineError::invalid_action(
                    player_id,
                    action.name(),
                    "в тёмную можно только до первой ставки",
                ));
            }
            Ok(ActionPlan::status(PlayerStatus::Dark))
        }

        BidAction::Open => {
            if !dark {
                return Err(EngineError::invalid_action(
                    player_id,
                    action.name(),
                    "открываться можно только после игры в тёмную",
                ));
            }
            Ok(ActionPlan::status(PlayerStatus::Active))
        }
    }
}

/// Сколько фишек нужно добавить игроку, чтобы уравнять текущую ставку.
pub fn diff_to_call(player: &Player, max_bet: Chips) -> Chips {
    max_bet.saturating_sub(player.current_bet())
}

fn ensure_affordable(player: &Player, paid: Chips) -> Result<(), EngineError> {
    if paid > player.balance() {
        return Err(EngineError::InsufficientFunds {
            player_id: player.player_id(),
            required: paid,
            available: player.balance(),
        });
    }
    Ok(())
}
