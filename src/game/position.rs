use super::Player;
use crate::error::MoveError;

pub const ROWS: usize = 6;
pub const COLS: usize = 7;
pub const CELLS: usize = ROWS * COLS;

/// Bits per column: one per row plus an always-empty header bit.
const COLUMN_BITS: usize = ROWS + 1;

/// Score of winning with the last possible stone.
pub const MIN_SCORE: i32 = -(CELLS as i32) / 2 + 3;
/// Score of winning with the earliest possible stone.
pub const MAX_SCORE: i32 = (CELLS as i32 + 1) / 2 - 3;

const fn bottom_row() -> u64 {
    let mut mask = 0;
    let mut col = 0;
    while col < COLS {
        mask |= 1 << (col * COLUMN_BITS);
        col += 1;
    }
    mask
}

/// 1 at the bottom cell of each column.
const BOTTOM_ROW: u64 = bottom_row();

/// 1 on every playable cell.
const PLAYABLE: u64 = BOTTOM_ROW * ((1 << ROWS) - 1);

pub(crate) const fn column_mask(col: usize) -> u64 {
    ((1 << ROWS) - 1) << (col * COLUMN_BITS)
}

const fn top_cell(col: usize) -> u64 {
    (1 << (ROWS - 1)) << (col * COLUMN_BITS)
}

const fn bottom_cell(col: usize) -> u64 {
    1 << (col * COLUMN_BITS)
}

/// Connect Four position stored as two bitboards.
///
/// Each column takes `ROWS + 1` bits starting from the bottom cell. `current`
/// holds the stones of the side to move and `mask` holds every stone, so the
/// opponent's stones are `current ^ mask`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Position {
    current: u64,
    mask: u64,
    moves: usize,
}

impl Position {
    /// Create the empty starting position
    pub fn new() -> Self {
        Position::default()
    }

    /// Build a position by playing columns in order from the start.
    pub fn from_moves(columns: &[usize]) -> Result<Self, MoveError> {
        let mut position = Position::new();
        for &col in columns {
            position.play(col)?;
        }
        Ok(position)
    }

    /// Number of stones on the board
    pub fn move_count(&self) -> usize {
        self.moves
    }

    pub fn side_to_move(&self) -> Player {
        Player::from_ply(self.moves)
    }

    /// True if the column exists and still has room.
    pub fn is_move_valid(&self, col: usize) -> bool {
        col < COLS && self.mask & top_cell(col) == 0
    }

    /// True once someone has four in a row or the board is full.
    pub fn is_game_over(&self) -> bool {
        self.has_winner() || self.moves == CELLS
    }

    /// True if the side that just moved completed four in a row.
    pub fn has_winner(&self) -> bool {
        has_alignment(self.current ^ self.mask)
    }

    /// Drop a stone for the side to move.
    pub fn play(&mut self, col: usize) -> Result<(), MoveError> {
        if self.is_game_over() {
            return Err(MoveError::GameOver);
        }
        if !self.is_move_valid(col) {
            return Err(MoveError::InvalidColumn(col));
        }
        self.play_bit((self.mask + bottom_cell(col)) & column_mask(col));
        Ok(())
    }

    /// Take back the top stone of a column. Only the stone placed by the side
    /// that just moved can be taken back.
    pub fn unplay(&mut self, col: usize) -> Result<(), MoveError> {
        if col >= COLS || self.mask & column_mask(col) == 0 {
            return Err(MoveError::InvalidColumn(col));
        }

        // Stones in a column are contiguous from the bottom, so adding the
        // bottom bit lands just above the top stone.
        let top = ((self.mask & column_mask(col)) + bottom_cell(col)) >> 1;
        if (self.current ^ self.mask) & top == 0 {
            return Err(MoveError::InvalidColumn(col));
        }

        self.mask ^= top;
        self.current ^= self.mask;
        self.moves -= 1;
        Ok(())
    }

    /// Owner of a cell; row 0 is the bottom row.
    pub fn player_at(&self, row: usize, col: usize) -> Option<Player> {
        if row >= ROWS || col >= COLS {
            return None;
        }
        let bit = 1u64 << (col * COLUMN_BITS + row);
        if self.mask & bit == 0 {
            None
        } else if self.current & bit != 0 {
            Some(self.side_to_move())
        } else {
            Some(self.side_to_move().other())
        }
    }

    /// Number of moves until the game ends if both sides play perfectly and
    /// the position is worth `score` to the side to move.
    pub fn moves_left(&self, score: i32) -> usize {
        // Work from the first player's point of view.
        let score = if self.moves % 2 == 1 { -score } else { score };
        let max_moves = CELLS as i32;

        let last_move = if score > 0 {
            max_moves - 2 * score + 1 + (max_moves % 2)
        } else if score < 0 {
            max_moves + 2 * (score + 1) - (max_moves % 2)
        } else {
            max_moves
        };

        (last_move - self.moves as i32).max(0) as usize
    }

    /// Score for the side to move winning with its next stone.
    pub fn win_score(&self) -> i32 {
        (CELLS as i32 + 1 - self.moves as i32) / 2
    }

    /// Score of a finished game for the side to move: negative if the
    /// opponent completed four in a row, zero for a full board.
    pub fn terminal_score(&self) -> i32 {
        if self.has_winner() {
            -((CELLS as i32 + 2 - self.moves as i32) / 2)
        } else {
            0
        }
    }

    /// Unique key for the transposition table.
    pub(crate) fn key(&self) -> u64 {
        self.current + self.mask
    }

    pub(crate) fn play_bit(&mut self, bit: u64) {
        self.current ^= self.mask;
        self.mask |= bit;
        self.moves += 1;
    }

    /// Cells the side to move can fill this turn.
    pub(crate) fn possible(&self) -> u64 {
        (self.mask + BOTTOM_ROW) & PLAYABLE
    }

    pub(crate) fn can_win_next(&self) -> bool {
        self.winning_cells() & self.possible() != 0
    }

    pub(crate) fn is_winning_move(&self, col: usize) -> bool {
        self.winning_cells() & self.possible() & column_mask(col) != 0
    }

    /// Playable cells that do not hand the opponent an immediate win.
    /// Assumes the side to move cannot win this turn.
    pub(crate) fn possible_non_losing_moves(&self) -> u64 {
        let mut possible = self.possible();
        let opponent_wins = self.opponent_winning_cells();
        let forced = possible & opponent_wins;
        if forced != 0 {
            if forced & (forced - 1) != 0 {
                // Two threats at once cannot both be blocked.
                return 0;
            }
            possible = forced;
        }
        possible & !(opponent_wins >> 1)
    }

    /// Number of winning cells the side to move would own after `bit`.
    pub(crate) fn move_score(&self, bit: u64) -> u32 {
        winning_cells(self.current | bit, self.mask).count_ones()
    }

    fn winning_cells(&self) -> u64 {
        winning_cells(self.current, self.mask)
    }

    fn opponent_winning_cells(&self) -> u64 {
        winning_cells(self.current ^ self.mask, self.mask)
    }
}

fn has_alignment(stones: u64) -> bool {
    // Horizontal, the two diagonals, then vertical.
    for shift in [COLUMN_BITS, ROWS, ROWS + 2, 1] {
        let pairs = stones & (stones >> shift);
        if pairs & (pairs >> (2 * shift)) != 0 {
            return true;
        }
    }
    false
}

/// Empty cells that would complete four in a row for `stones`.
fn winning_cells(stones: u64, mask: u64) -> u64 {
    // Vertical: only three stones below can complete a column.
    let mut cells = (stones << 1) & (stones << 2) & (stones << 3);

    for shift in [COLUMN_BITS, ROWS, ROWS + 2] {
        let pair = (stones << shift) & (stones << (2 * shift));
        cells |= pair & (stones << (3 * shift));
        cells |= pair & (stones >> shift);

        let pair = (stones >> shift) & (stones >> (2 * shift));
        cells |= pair & (stones << shift);
        cells |= pair & (stones >> (3 * shift));
    }

    cells & (PLAYABLE ^ mask)
}
