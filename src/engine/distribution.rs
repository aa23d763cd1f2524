//! Раздача карт: основная раздача всем играющим и пересдача для спора.

use tracing::info;

use crate::domain::{Deck, Game, GameStatus, PlayerId, PlayerStatus, Timestamp, HAND_SIZE};
use crate::engine::errors::EngineError;
use crate::engine::events::{EventLog, GameEvent, PlayerCards};
use crate::engine::positions::{first_playing_position, last_playing_position, playing_positions};
use crate::engine::RandomSource;

/// Новая перемешанная колода.
pub fn shuffled_deck<R: RandomSource>(rng: &mut R) -> Deck {
    let mut deck = Deck::seka_21();
    rng.shuffle(&mut deck.cards);
    deck
}

/// Раздать по 3 карты каждому играющему (по порядку позиций) и перевести игру в торги.
///
/// Сбрасывает банк, максимальную ставку, номер круга и ставки игроков.
/// Оставшиеся в колоде карты в этой раздаче не используются.
pub fn distribute<R: RandomSource>(
    game: &mut Game,
    rng: &mut R,
    now: Timestamp,
    events: &mut EventLog,
) -> Result<Vec<PlayerCards>, EngineError> {
    game.ensure_status(GameStatus::Distribution)?;

    let positions = playing_positions(game);
    let mut deck = shuffled_deck(rng);
    if positions.len() < 2 || positions.len() * HAND_SIZE > deck.len() {
        return Err(EngineError::CannotStart {
            game_id: game.id(),
            ready: positions.len(),
            required: usize::from(game.min_players()),
        });
    }

    game.reset_for_deal();

    let required = usize::from(game.min_players());
    let mut dealt = Vec::with_capacity(positions.len());
    for pos in positions {
        let cards = deck.draw_n(HAND_SIZE).ok_or(EngineError::CannotStart {
            game_id: game.id(),
            ready: dealt.len(),
            required,
        })?;
        if let Some(player) = game.player_at_mut(pos) {
            player.reset_for_deal();
            if player.status() == PlayerStatus::Ready {
                player.transition(PlayerStatus::Active)?;
            }
            player.deal(cards.clone());
            dealt.push(PlayerCards {
                player_id: player.player_id(),
                cards,
            });
        }
    }

    // Дилер: последняя позиция, первым ходит первая.
    game.set_dealer_position(last_playing_position(game));
    let first = first_playing_position(game);
    game.set_current_player_position(first);
    if let Some(player) = first.and_then(|pos| game.player_at_mut(pos)) {
        player.touch(now);
    }

    game.transition_to(GameStatus::Bidding)?;

    info!(
        game_id = game.id(),
        players = dealt.len(),
        first_position = ?first,
        "cards distributed, bidding started"
    );

    events.push(GameEvent::CardsDistributed {
        game_id: game.id(),
        player_cards: dealt.clone(),
        round: game.current_bidding_round(),
    });

    Ok(dealt)
}

/// Пересдать свежие 3 карты только участникам спора из новой колоды.
pub fn redistribute_for_quarrel<R: RandomSource>(
    game: &mut Game,
    participants: &[PlayerId],
    rng: &mut R,
) -> Result<Vec<PlayerCards>, EngineError> {
    for &player_id in participants {
        game.require_player(player_id)?;
    }

    let mut deck = shuffled_deck(rng);
    let hands: Option<Vec<_>> = participants.iter().map(|_| deck.draw_n(HAND_SIZE)).collect();
    let hands = hands.ok_or_else(|| {
        EngineError::invalid_action(
            participants.first().copied().unwrap_or_default(),
            "quarrel",
            "слишком много участников спора для одной колоды",
        )
    })?;

    let mut dealt = Vec::with_capacity(participants.len());
    for (&player_id, cards) in participants.iter().zip(hands) {
        let player = game.require_player_mut(player_id)?;
        player.clear_hand();
        player.deal(cards.clone());
        dealt.push(PlayerCards { player_id, cards });
    }
    Ok(dealt)
}
