use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;

use log::trace;

use super::messages::EngineReply;
use super::table::TranspositionTable;
use super::EngineConfig;
use crate::game::{column_mask, Position, CELLS, COLS, MIN_SCORE};

/// Column ordering: center-first for better alpha-beta pruning.
const MOVE_ORDER: [usize; COLS] = [3, 2, 4, 1, 5, 0, 6];

/// Marker returned when a search stops because its request was cancelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cancelled;

/// Cancellation check for one evaluate request.
///
/// The shared counter holds the highest request id that has been cancelled,
/// so cancelling request `n` never affects request `n + 1`.
#[derive(Debug, Clone)]
pub struct CancelToken {
    cancelled_through: Arc<AtomicU64>,
    id: u64,
}

impl CancelToken {
    pub fn new(cancelled_through: Arc<AtomicU64>, id: u64) -> Self {
        CancelToken {
            cancelled_through,
            id,
        }
    }

    /// A token nobody can cancel.
    pub fn never() -> Self {
        CancelToken::new(Arc::new(AtomicU64::new(0)), 1)
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled_through.load(Ordering::Acquire) >= self.id
    }
}

/// Strong Connect Four solver: negamax with alpha-beta pruning, null-window
/// narrowing, and a transposition table kept across searches.
pub struct Solver {
    table: TranspositionTable,
    check_interval: u64,
    nodes: u64,
}

impl Solver {
    pub fn new(config: &EngineConfig) -> Self {
        Solver {
            table: TranspositionTable::new(config.table_entries),
            check_interval: config.cancel_check_nodes.max(1),
            nodes: 0,
        }
    }

    /// Nodes visited by the most recent evaluation.
    pub fn nodes(&self) -> u64 {
        self.nodes
    }

    /// Solve `position` and package the result as an engine reply.
    pub fn evaluate(&mut self, position: &Position, cancel: &CancelToken) -> EngineReply {
        if position.is_game_over() {
            return EngineReply::Won {
                score: position.terminal_score(),
            };
        }

        self.nodes = 0;
        let start = Instant::now();

        let reply = match self.solve(position, cancel) {
            Ok(score) => match self.best_move(position, score, cancel) {
                Ok(best_move) => EngineReply::Solved {
                    score,
                    best_move,
                    moves_left: position.moves_left(score),
                },
                Err(Cancelled) => EngineReply::Cancelled,
            },
            Err(Cancelled) => EngineReply::Cancelled,
        };

        trace!(
            "search at move {} visited {} nodes in {:.3}s: {:?}",
            position.move_count(),
            self.nodes,
            start.elapsed().as_secs_f64(),
            reply
        );
        reply
    }

    /// Exact score of a position that is not yet over.
    pub fn solve(&mut self, position: &Position, cancel: &CancelToken) -> Result<i32, Cancelled> {
        if position.can_win_next() {
            return Ok(position.win_score());
        }

        let played = position.move_count() as i32;
        let mut min = -(CELLS as i32 - played) / 2;
        let mut max = (CELLS as i32 + 1 - played) / 2;

        // Narrow [min, max] with null-window searches, probing near zero first.
        while min < max {
            let mut med = min + (max - min) / 2;
            if med <= 0 && min / 2 < med {
                med = min / 2;
            } else if med >= 0 && max / 2 > med {
                med = max / 2;
            }

            let score = self.negamax(position, med, med + 1, cancel)?;
            if score <= med {
                max = score;
            } else {
                min = score;
            }
        }

        Ok(min)
    }

    /// First column, center-first, whose resulting position keeps `score`.
    pub fn best_move(
        &mut self,
        position: &Position,
        score: i32,
        cancel: &CancelToken,
    ) -> Result<Option<usize>, Cancelled> {
        if position.can_win_next() {
            return Ok(MOVE_ORDER
                .iter()
                .copied()
                .find(|&col| position.is_winning_move(col)));
        }

        for &col in &MOVE_ORDER {
            let mut child = *position;
            if child.play(col).is_err() {
                continue;
            }
            let child_score = -self.bounded(&child, -score, -score + 1, cancel)?;
            if child_score >= score {
                return Ok(Some(col));
            }
        }

        Ok(None)
    }

    /// Window search that also accepts positions where the side to move can
    /// win at once or the board is full.
    fn bounded(
        &mut self,
        position: &Position,
        alpha: i32,
        beta: i32,
        cancel: &CancelToken,
    ) -> Result<i32, Cancelled> {
        if position.can_win_next() {
            return Ok(position.win_score());
        }
        if position.move_count() == CELLS {
            return Ok(0);
        }
        self.negamax(position, alpha, beta, cancel)
    }

    /// Requires that the side to move cannot win this turn.
    fn negamax(
        &mut self,
        position: &Position,
        mut alpha: i32,
        mut beta: i32,
        cancel: &CancelToken,
    ) -> Result<i32, Cancelled> {
        if self.nodes % self.check_interval == 0 && cancel.is_cancelled() {
            return Err(Cancelled);
        }
        self.nodes += 1;

        let played = position.move_count() as i32;
        let next = position.possible_non_losing_moves();
        if next == 0 {
            return Ok(-(CELLS as i32 - played) / 2);
        }
        if played >= CELLS as i32 - 2 {
            return Ok(0);
        }

        // The opponent cannot win with their next stone.
        let min = -(CELLS as i32 - 2 - played) / 2;
        if alpha < min {
            alpha = min;
            if alpha >= beta {
                return Ok(alpha);
            }
        }

        // We cannot win with our next stone either.
        let mut max = (CELLS as i32 - 1 - played) / 2;
        if let Some(value) = self.table.get(position.key()) {
            max = value as i32 + MIN_SCORE - 1;
        }
        if beta > max {
            beta = max;
            if alpha >= beta {
                return Ok(beta);
            }
        }

        // Try moves that create the most threats first; the stable sort keeps
        // center-first order among equals.
        let mut moves = [(0u32, 0u64); COLS];
        let mut len = 0;
        for &col in &MOVE_ORDER {
            let bit = next & column_mask(col);
            if bit != 0 {
                moves[len] = (position.move_score(bit), bit);
                len += 1;
            }
        }
        moves[..len].sort_by(|a, b| b.0.cmp(&a.0));

        for &(_, bit) in &moves[..len] {
            let mut child = *position;
            child.play_bit(bit);
            let score = -self.negamax(&child, -beta, -alpha, cancel)?;
            if score >= beta {
                return Ok(score);
            }
            if score > alpha {
                alpha = score;
            }
        }

        let stored = alpha - MIN_SCORE + 1;
        if (1..=u8::MAX as i32).contains(&stored) {
            self.table.put(position.key(), stored as u8);
        }
        Ok(alpha)
    }
}
