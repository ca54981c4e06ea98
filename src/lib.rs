//! # Connect Four Analyzer
//!
//! A Connect Four board in the terminal with a perfect solver running in the
//! background. Every position is solved as it appears: the result is shown as
//! an evaluation and a recommended column, or played directly when the engine
//! has a side.
//!
//! ## Modules
//!
//! - [`game`]: bitboard position, players, move history
//! - [`engine`]: `Engine` trait, negamax solver, transposition table, worker thread
//! - [`coordinator`]: move application, solve scheduling, outcome presentation
//! - [`ui`]: terminal UI built with Ratatui
//! - [`config`]: TOML configuration loading and validation
//! - [`error`]: structured error types

pub mod config;
pub mod coordinator;
pub mod engine;
pub mod error;
pub mod game;
pub mod ui;
