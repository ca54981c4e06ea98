//! Background solving engine: the `Engine` seam the coordinator talks to, the
//! message types it exchanges, the solver itself, and the worker thread that
//! runs it off the UI thread.

mod messages;
mod solver;
mod table;
mod worker;

pub use messages::EngineReply;
pub use solver::{CancelToken, Cancelled, Solver};
pub use table::TranspositionTable;
pub use worker::EngineHandle;

use crate::error::EngineError;
use crate::game::Position;

/// Asynchronous position evaluator.
///
/// Every accepted `evaluate` call is answered by exactly one [`EngineReply`]
/// on the reply channel, even when it is cancelled.
pub trait Engine {
    /// Start evaluating a snapshot of `position`.
    fn evaluate(&mut self, position: &Position) -> Result<(), EngineError>;

    /// Ask the running evaluation to stop early. No effect when idle.
    fn cancel(&self);
}

/// Engine configuration.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Transposition table slots. A prime keeps collisions down.
    pub table_entries: usize,
    /// Nodes searched between checks of the cancellation flag.
    pub cancel_check_nodes: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            table_entries: 8_388_617,
            cancel_check_nodes: 4096,
        }
    }
}
