//! The rules of the game: sliding and merging lines, spawning tiles, detecting the end of a game
//! and the session that ties them together.

pub mod board;
pub mod direction;
pub mod session;
pub mod shift;
pub mod spawn;
pub mod terminal;

pub use board::{Board, Grid, Idx, Score, Tile, SIZE};
pub use direction::Direction;
pub use session::{GameState, Phase, Session, Transition};
pub use shift::{apply_move, Shift};
pub use spawn::{Spawn, TileSpawner};
pub use terminal::is_game_over;
