use std::cell::Cell;

use crate::engine::Engine;
use crate::error::EngineError;
use crate::game::Position;

/// Engine double that records every call and never replies on its own.
#[derive(Default)]
pub(crate) struct FakeEngine {
    pub evaluated: Vec<Position>,
    pub cancels: Cell<usize>,
    pub unavailable: bool,
}

impl Engine for FakeEngine {
    fn evaluate(&mut self, position: &Position) -> Result<(), EngineError> {
        if self.unavailable {
            return Err(EngineError::Disconnected);
        }
        self.evaluated.push(*position);
        Ok(())
    }

    fn cancel(&self) {
        self.cancels.set(self.cancels.get() + 1);
    }
}
