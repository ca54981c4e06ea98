//! Terminal UI: the board, the engine's evaluation, and keyboard controls.

mod app;
mod game_view;

pub use app::App;
