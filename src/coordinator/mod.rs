//! Game coordination: keeps the board, the play mode, and the background
//! engine in step.
//!
//! [`MoveCoordinator`] applies moves, undo, and reset. Each change asks
//! [`SolveCoordinator`] to solve the new position; it keeps at most one
//! evaluation in flight and folds bursts of changes into a single restart.
//! Replies either become the engine's move or are turned into an evaluation
//! line by [`present`].

mod mode;
mod moves;
mod outcome;
mod solve;
#[cfg(test)]
pub(crate) mod testing;

pub use mode::PlayMode;
pub use moves::{MoveCoordinator, SOLVING_TEXT, UNAVAILABLE_TEXT};
pub use outcome::{present, Evaluation, Outcome};
pub use solve::{Dispatch, SolveCoordinator, SolveStart, SolveState};
