use log::{debug, error};

use super::outcome::{self, Outcome};
use super::solve::{Dispatch, SolveCoordinator, SolveStart, SolveState};
use super::PlayMode;
use crate::engine::{Engine, EngineReply};
use crate::error::MoveError;
use crate::game::{MoveHistory, Position};

pub const SOLVING_TEXT: &str = "Solving position . . .";
pub const UNAVAILABLE_TEXT: &str = "Solver unavailable.";

/// Owns the game: applies and takes back moves on behalf of the player and
/// the engine, and keeps the engine working on the latest position.
pub struct MoveCoordinator<E> {
    position: Position,
    history: MoveHistory,
    mode: PlayMode,
    solver: SolveCoordinator<E>,
    evaluation: String,
    highlight: Option<usize>,
}

impl<E: Engine> MoveCoordinator<E> {
    pub fn new(engine: E, mode: PlayMode) -> Self {
        MoveCoordinator {
            position: Position::new(),
            history: MoveHistory::new(),
            mode,
            solver: SolveCoordinator::new(engine),
            evaluation: String::new(),
            highlight: None,
        }
    }

    /// Kick off the first solve. Lets the engine open when it plays first.
    pub fn start(&mut self) {
        self.request_solve();
    }

    pub fn position(&self) -> &Position {
        &self.position
    }

    pub fn history(&self) -> &MoveHistory {
        &self.history
    }

    pub fn mode(&self) -> PlayMode {
        self.mode
    }

    /// Latest evaluation line for the player.
    pub fn evaluation(&self) -> &str {
        &self.evaluation
    }

    /// Column recommended to the player, if any.
    pub fn highlight(&self) -> Option<usize> {
        self.highlight
    }

    pub fn solve_state(&self) -> SolveState {
        self.solver.state()
    }

    pub fn engine(&self) -> &E {
        self.solver.engine()
    }

    pub fn is_engines_turn(&self) -> bool {
        self.mode.is_engines_turn(&self.position)
    }

    /// Play `col` for the side to move. Player input passes
    /// `engine_originated = false`; it is turned away on the engine's turn, and
    /// engine moves are turned away on the player's turn.
    pub fn apply_move(&mut self, col: usize, engine_originated: bool) -> Result<(), MoveError> {
        if engine_originated != self.is_engines_turn() {
            return Err(MoveError::TurnViolation);
        }

        self.position.play(col)?;
        self.history.push(col);

        self.request_solve();
        Ok(())
    }

    /// Take back the player's last move. When the engine is playing, its reply
    /// is taken back too so it does not simply replay the same column.
    pub fn undo(&mut self) -> Result<(), MoveError> {
        if self.is_engines_turn() {
            return Err(MoveError::TurnViolation);
        }

        let moves_to_undo = if self.mode.engine_plays() { 2 } else { 1 };
        for _ in 0..moves_to_undo {
            let Some(col) = self.history.pop() else {
                break;
            };
            if let Err(err) = self.position.unplay(col) {
                self.history.push(col);
                return Err(err);
            }
        }

        self.request_solve();
        Ok(())
    }

    /// Take back every move.
    pub fn reset(&mut self) {
        while let Some(col) = self.history.pop() {
            if let Err(err) = self.position.unplay(col) {
                error!("move history out of sync with position ({err}), starting over");
                self.position = Position::new();
                self.history = MoveHistory::new();
                break;
            }
        }

        self.request_solve();
    }

    /// Switch play mode. Whether the engine should move depends on the mode,
    /// so the position is solved again.
    pub fn set_mode(&mut self, mode: PlayMode) {
        self.mode = mode;
        self.request_solve();
    }

    /// Route a reply from the engine.
    pub fn on_engine_reply(&mut self, reply: EngineReply) {
        match self.solver.on_reply(reply, &self.position, self.mode) {
            Dispatch::Autoplay(col) => {
                if let Err(err) = self.apply_move(col, true) {
                    debug!("engine move in column {col} rejected: {err}");
                }
            }
            Dispatch::Present(reply) => {
                if let Some(outcome) = Outcome::from_reply(&reply) {
                    let eval = outcome::present(&outcome, self.position.move_count(), self.mode);
                    self.evaluation = eval.text;
                    self.highlight = eval.highlight;
                }
            }
            Dispatch::Stale | Dispatch::Restarted | Dispatch::Dropped => {}
        }
    }

    fn request_solve(&mut self) {
        self.highlight = None;
        match self.solver.request_solve(&self.position) {
            SolveStart::Started => self.evaluation = SOLVING_TEXT.to_string(),
            SolveStart::Restarting => {}
            SolveStart::Failed => self.evaluation = UNAVAILABLE_TEXT.to_string(),
        }
    }
}
