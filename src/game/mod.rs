//! Core Connect Four game logic: bitboard position, players, and the history
//! of played columns.

mod history;
mod player;
mod position;

pub(crate) use position::column_mask;
pub use history::MoveHistory;
pub use player::Player;
pub use position::{Position, CELLS, COLS, MAX_SCORE, MIN_SCORE, ROWS};
