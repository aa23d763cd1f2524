use crate::domain::{Game, SeatPosition};

/// Позиции играющих игроков по возрастанию.
pub fn playing_positions(game: &Game) -> Vec<SeatPosition> {
    let mut positions: Vec<SeatPosition> = game
        .players()
        .iter()
        .filter(|p| p.is_playing())
        .map(|p| p.position())
        .collect();
    positions.sort_unstable();
    positions
}

/// Первая (наименьшая) позиция среди играющих.
pub fn first_playing_position(game: &Game) -> Option<SeatPosition> {
    playing_positions(game).first().copied()
}

/// Последняя (наибольшая) позиция среди играющих.
pub fn last_playing_position(game: &Game) -> Option<SeatPosition> {
    playing_positions(game).last().copied()
}

/// Следующая позиция по кругу после `from`: наименьшая играющая позиция > from,
/// а если такой нет: первая играющая.
///
/// `from` сам может уже не играть (например, только что сбросил карты).
pub fn next_playing_position(game: &Game, from: SeatPosition) -> Option<SeatPosition> {
    let positions = playing_positions(game);
    positions
        .iter()
        .copied()
        .find(|&p| p > from)
        .or_else(|| positions.first().copied())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Chips;

    #[test]
    fn next_position_wraps_around() {
        let mut game = Game::new(1, 1, 6, 0);
        for id in 1..=3 {
            game.seat_player(id, Chips(100)).unwrap();
            game.player_mut(id).unwrap().mark_ready(0).unwrap();
        }
        assert_eq!(next_playing_position(&game, 1), Some(2));
        assert_eq!(next_playing_position(&game, 3), Some(1));
        assert_eq!(next_playing_position(&game, 6), Some(1));
    }
}
