use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{mpsc, Arc};
use std::thread::{self, JoinHandle};

use log::{debug, info};

use super::messages::{EngineReply, EngineRequest};
use super::solver::{CancelToken, Solver};
use super::{Engine, EngineConfig};
use crate::error::EngineError;
use crate::game::Position;

/// Handle to the engine thread.
///
/// Requests go out over one channel and replies come back over the receiver
/// returned by [`EngineHandle::spawn`], which the UI loop drains.
pub struct EngineHandle {
    requests: mpsc::Sender<EngineRequest>,
    cancelled_through: Arc<AtomicU64>,
    last_request: u64,
    thread: Option<JoinHandle<()>>,
}

impl EngineHandle {
    pub fn spawn(
        config: &EngineConfig,
    ) -> Result<(Self, mpsc::Receiver<EngineReply>), EngineError> {
        let (request_tx, request_rx) = mpsc::channel();
        let (reply_tx, reply_rx) = mpsc::channel();
        let cancelled_through = Arc::new(AtomicU64::new(0));

        let solver = Solver::new(config);
        let flag = cancelled_through.clone();
        let thread = thread::Builder::new()
            .name("engine".into())
            .spawn(move || run(solver, request_rx, reply_tx, flag))?;

        info!(
            "engine started with {} table entries",
            config.table_entries
        );

        let handle = EngineHandle {
            requests: request_tx,
            cancelled_through,
            last_request: 0,
            thread: Some(thread),
        };
        Ok((handle, reply_rx))
    }
}

impl Engine for EngineHandle {
    fn evaluate(&mut self, position: &Position) -> Result<(), EngineError> {
        let id = self.last_request + 1;
        self.requests
            .send(EngineRequest::Evaluate {
                id,
                position: *position,
            })
            .map_err(|_| EngineError::Disconnected)?;
        self.last_request = id;
        Ok(())
    }

    fn cancel(&self) {
        self.cancelled_through
            .fetch_max(self.last_request, Ordering::AcqRel);
    }
}

impl Drop for EngineHandle {
    fn drop(&mut self) {
        self.cancel();
        let _ = self.requests.send(EngineRequest::Shutdown);
        if let Some(thread) = self.thread.take() {
            let _ = thread.join();
        }
    }
}

fn run(
    mut solver: Solver,
    requests: mpsc::Receiver<EngineRequest>,
    replies: mpsc::Sender<EngineReply>,
    cancelled_through: Arc<AtomicU64>,
) {
    while let Ok(request) = requests.recv() {
        match request {
            EngineRequest::Evaluate { id, position } => {
                let token = CancelToken::new(cancelled_through.clone(), id);
                let reply = solver.evaluate(&position, &token);
                debug!("request {id} done after {} nodes", solver.nodes());
                if replies.send(reply).is_err() {
                    debug!("reply channel closed, stopping engine");
                    break;
                }
            }
            EngineRequest::Shutdown => break,
        }
    }
    debug!("engine thread exiting");
}
