//! Доменная модель секи: карты, колода, игроки, игра.

pub mod card;
pub mod chips;
pub mod deck;
pub mod game;
pub mod hand;
pub mod player;

// Базовые идентификаторы.
pub type PlayerId = u64;
pub type GameId = u64;
pub type RoomId = u64;
/// Позиция за столом, 1..=max_players.
pub type SeatPosition = u8;
/// Миллисекунды с начала эпохи.
pub type Timestamp = u64;

// Удобные реэкспорты, чтобы в других модулях писать crate::domain::Card и т.п.
pub use card::*;
pub use chips::*;
pub use deck::*;
pub use game::*;
pub use hand::*;
pub use player::*;
