use std::time::Instant;

use log::{debug, error, info, warn};

use super::PlayMode;
use crate::engine::{Engine, EngineReply};
use crate::game::Position;

/// Where the coordinator stands with respect to the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolveState {
    /// No evaluation in flight.
    Idle,
    /// One evaluation in flight for the current position.
    Busy,
    /// One evaluation in flight for a position that has since changed. The
    /// current position is solved as soon as its reply arrives.
    BusyRestartPending,
}

/// Result of asking for a solve.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolveStart {
    /// A new evaluation was handed to the engine.
    Started,
    /// An evaluation is already running; it was cancelled and the current
    /// position will be solved once it replies.
    Restarting,
    /// The engine refused the request; the coordinator stays idle.
    Failed,
}

/// What to do with an engine reply once the coordinator has processed it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    /// No evaluation was in flight; the reply is ignored.
    Stale,
    /// The position changed meanwhile and a fresh solve has been requested.
    Restarted,
    /// A cancellation nobody asked for. Nothing is shown.
    Dropped,
    /// The engine is to move: play this column on its behalf.
    Autoplay(usize),
    /// Show this reply to the player.
    Present(EngineReply),
}

/// Serializes requests to the engine: at most one evaluation in flight and at
/// most one follow-up queued, however fast the position changes.
pub struct SolveCoordinator<E> {
    engine: E,
    state: SolveState,
    started_at: Option<Instant>,
}

impl<E: Engine> SolveCoordinator<E> {
    pub fn new(engine: E) -> Self {
        SolveCoordinator {
            engine,
            state: SolveState::Idle,
            started_at: None,
        }
    }

    pub fn state(&self) -> SolveState {
        self.state
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// Ask for `position` to be solved.
    pub fn request_solve(&mut self, position: &Position) -> SolveStart {
        match self.state {
            SolveState::Idle => match self.engine.evaluate(position) {
                Ok(()) => {
                    debug!("solving position at move {}", position.move_count());
                    self.started_at = Some(Instant::now());
                    self.state = SolveState::Busy;
                    SolveStart::Started
                }
                Err(err) => {
                    error!("could not start solve: {err}");
                    SolveStart::Failed
                }
            },
            SolveState::Busy => {
                debug!("position changed while solving, cancelling");
                self.state = SolveState::BusyRestartPending;
                self.engine.cancel();
                SolveStart::Restarting
            }
            SolveState::BusyRestartPending => SolveStart::Restarting,
        }
    }

    /// Process a reply from the engine. `position` is the current position,
    /// which may differ from the one that was evaluated if a restart is
    /// pending.
    pub fn on_reply(&mut self, reply: EngineReply, position: &Position, mode: PlayMode) -> Dispatch {
        match self.state {
            SolveState::Idle => {
                warn!("ignoring engine reply with no solve in flight: {reply:?}");
                Dispatch::Stale
            }
            SolveState::BusyRestartPending => {
                self.state = SolveState::Idle;
                self.started_at = None;
                self.request_solve(position);
                Dispatch::Restarted
            }
            SolveState::Busy => {
                self.state = SolveState::Idle;
                if let Some(started_at) = self.started_at.take() {
                    info!(
                        "got {:?} from solver after {} ms",
                        reply,
                        started_at.elapsed().as_millis()
                    );
                }

                match reply {
                    EngineReply::Cancelled => {
                        warn!("solve was cancelled with no restart pending");
                        Dispatch::Dropped
                    }
                    _ => match reply.best_move() {
                        Some(col) if mode.is_engines_turn(position) => Dispatch::Autoplay(col),
                        _ => Dispatch::Present(reply),
                    },
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coordinator::testing::FakeEngine;

    fn solved(best_move: usize) -> EngineReply {
        EngineReply::Solved {
            score: 1,
            best_move: Some(best_move),
            moves_left: 9,
        }
    }

    #[test]
    fn idle_request_starts_evaluation() {
        let mut solver = SolveCoordinator::new(FakeEngine::default());
        let position = Position::new();

        assert_eq!(solver.request_solve(&position), SolveStart::Started);
        assert_eq!(solver.state(), SolveState::Busy);
        assert_eq!(solver.engine().evaluated, vec![position]);
        assert_eq!(solver.engine().cancels.get(), 0);
    }

    #[test]
    fn burst_while_busy_collapses_into_one_restart() {
        let mut solver = SolveCoordinator::new(FakeEngine::default());
        solver.request_solve(&Position::new());

        for moves in [&[3][..], &[3, 3], &[3, 3, 4]] {
            let position = Position::from_moves(moves).unwrap();
            assert_eq!(solver.request_solve(&position), SolveStart::Restarting);
        }

        assert_eq!(solver.state(), SolveState::BusyRestartPending);
        assert_eq!(solver.engine().evaluated.len(), 1);
        assert_eq!(solver.engine().cancels.get(), 1);
    }

    #[test]
    fn restart_solves_latest_position() {
        let mut solver = SolveCoordinator::new(FakeEngine::default());
        let first = Position::new();
        let latest = Position::from_moves(&[3, 3, 4]).unwrap();

        solver.request_solve(&first);
        solver.request_solve(&Position::from_moves(&[3]).unwrap());
        solver.request_solve(&latest);

        let dispatch = solver.on_reply(EngineReply::Cancelled, &latest, PlayMode::HumanVsHuman);
        assert_eq!(dispatch, Dispatch::Restarted);
        assert_eq!(solver.state(), SolveState::Busy);
        assert_eq!(solver.engine().evaluated, vec![first, latest]);

        let dispatch = solver.on_reply(solved(2), &latest, PlayMode::HumanVsHuman);
        assert_eq!(dispatch, Dispatch::Present(solved(2)));
        assert_eq!(solver.state(), SolveState::Idle);
    }

    #[test]
    fn completed_reply_still_restarts_when_pending() {
        let mut solver = SolveCoordinator::new(FakeEngine::default());
        let latest = Position::from_moves(&[2]).unwrap();

        solver.request_solve(&Position::new());
        solver.request_solve(&latest);

        // The engine finished before it saw the cancel.
        let dispatch = solver.on_reply(solved(3), &latest, PlayMode::HumanVsHuman);
        assert_eq!(dispatch, Dispatch::Restarted);
        assert_eq!(solver.engine().evaluated.last(), Some(&latest));
    }

    #[test]
    fn reply_while_idle_is_stale() {
        let mut solver = SolveCoordinator::new(FakeEngine::default());
        let dispatch = solver.on_reply(solved(3), &Position::new(), PlayMode::HumanVsHuman);
        assert_eq!(dispatch, Dispatch::Stale);
        assert_eq!(solver.state(), SolveState::Idle);
        assert!(solver.engine().evaluated.is_empty());
    }

    #[test]
    fn unexplained_cancellation_is_dropped() {
        let mut solver = SolveCoordinator::new(FakeEngine::default());
        let position = Position::new();
        solver.request_solve(&position);

        let dispatch = solver.on_reply(EngineReply::Cancelled, &position, PlayMode::EnginePlaysFirst);
        assert_eq!(dispatch, Dispatch::Dropped);
        assert_eq!(solver.state(), SolveState::Idle);
        assert_eq!(solver.engine().evaluated.len(), 1);
    }

    #[test]
    fn engine_turn_autoplays_best_move() {
        let mut solver = SolveCoordinator::new(FakeEngine::default());
        let position = Position::new();
        solver.request_solve(&position);

        let dispatch = solver.on_reply(solved(3), &position, PlayMode::EnginePlaysFirst);
        assert_eq!(dispatch, Dispatch::Autoplay(3));
    }

    #[test]
    fn human_turn_presents_reply() {
        let mut solver = SolveCoordinator::new(FakeEngine::default());
        let position = Position::new();
        solver.request_solve(&position);

        let dispatch = solver.on_reply(solved(3), &position, PlayMode::EnginePlaysSecond);
        assert_eq!(dispatch, Dispatch::Present(solved(3)));
    }

    #[test]
    fn finished_game_is_presented_on_engine_turn() {
        let mut solver = SolveCoordinator::new(FakeEngine::default());
        let position = Position::from_moves(&[3, 4, 3, 4, 3, 4, 3]).unwrap();
        solver.request_solve(&position);

        let reply = EngineReply::Won { score: -18 };
        let dispatch = solver.on_reply(reply, &position, PlayMode::EnginePlaysSecond);
        assert_eq!(dispatch, Dispatch::Present(reply));
    }

    #[test]
    fn unavailable_engine_leaves_coordinator_idle() {
        let engine = FakeEngine {
            unavailable: true,
            ..Default::default()
        };
        let mut solver = SolveCoordinator::new(engine);

        assert_eq!(solver.request_solve(&Position::new()), SolveStart::Failed);
        assert_eq!(solver.state(), SolveState::Idle);
    }
}
