use crate::game::Position;

// Intra-process messages between the coordinator and the engine thread.

// Coordinator to engine
pub(crate) enum EngineRequest {
    Evaluate { id: u64, position: Position },
    Shutdown,
}

/// Engine to coordinator. Exactly one reply is sent per evaluate request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineReply {
    /// The position was solved. `score` is relative to the side to move.
    Solved {
        score: i32,
        best_move: Option<usize>,
        moves_left: usize,
    },
    /// The position was already finished when it reached the engine.
    Won { score: i32 },
    /// The evaluation was aborted before it produced a score.
    Cancelled,
}

impl EngineReply {
    /// Column the engine recommends, if the reply carries one.
    pub fn best_move(&self) -> Option<usize> {
        match self {
            EngineReply::Solved { best_move, .. } => *best_move,
            EngineReply::Won { .. } | EngineReply::Cancelled => None,
        }
    }
}
