//! Turns engine results into the evaluation line and column highlight shown
//! under the board.

use super::PlayMode;
use crate::engine::EngineReply;
use crate::game::Player;

/// Engine result as the presenter sees it. `moves_left == 0` means the game
/// is already over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Outcome {
    pub score: i32,
    pub best_move: Option<usize>,
    pub moves_left: usize,
}

impl Outcome {
    /// Cancelled replies carry nothing to show.
    pub fn from_reply(reply: &EngineReply) -> Option<Outcome> {
        match *reply {
            EngineReply::Solved {
                score,
                best_move,
                moves_left,
            } => Some(Outcome {
                score,
                best_move,
                moves_left,
            }),
            EngineReply::Won { score } => Some(Outcome {
                score,
                best_move: None,
                moves_left: 0,
            }),
            EngineReply::Cancelled => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Evaluation {
    pub text: String,
    pub highlight: Option<usize>,
}

/// Describe `outcome` for the position after `move_count` moves.
pub fn present(outcome: &Outcome, move_count: usize, mode: PlayMode) -> Evaluation {
    let to_move = Player::from_ply(move_count);

    if outcome.moves_left == 0 {
        let text = if outcome.score > 0 {
            format!("{} won!", to_move.name())
        } else if outcome.score < 0 {
            format!("{} won!", to_move.other().name())
        } else {
            "Draw!".to_string()
        };
        return Evaluation {
            text,
            highlight: None,
        };
    }

    let text = if outcome.score == 0 {
        "Game will end in a draw.".to_string()
    } else {
        let winner = if (outcome.score > 0) == to_move.is_first() {
            Player::Red
        } else {
            Player::Yellow
        };
        format!("{} will win in {} moves.", winner.name(), outcome.moves_left)
    };

    // With the engine playing, its best move is its own next reply, not a hint.
    let highlight = if mode.engine_plays() {
        None
    } else {
        outcome.best_move
    };

    Evaluation { text, highlight }
}
