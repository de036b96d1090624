//! Cascade resolver - drains chained matches as a lazy step sequence
//!
//! One step is detect -> remove -> gravity -> refill. The resolver yields a
//! settled snapshot per step so a front end can render each beat at its own
//! pace; a test or headless host just drains the sequence immediately. The
//! chain number starts at 1 for the match triggered by the swap and
//! increments per iteration, feeding the escalating score multiplier.
//!
//! Termination: each iteration either finds no matches (done) or replaces
//! matched cells with fresh random values; the safety cap only guards
//! against RNG/logic defects and surfaces as an error, never as silent
//! truncation of a legitimate chain.

use arrayvec::ArrayVec;

use match3_types::{Cell, Coord, CoreError, GameConfig, MAX_BOARD_SIZE};

use crate::board::Board;
use crate::detect::find_matches;
use crate::rng::SimpleRng;
use crate::scoring::step_score;

/// One settled remove-gravity-refill beat
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CascadeStep {
    /// 1-based chain number of this iteration
    pub chain: u32,
    /// Cells removed this step, in their pre-gravity positions
    pub removed: Vec<Coord>,
    /// Cells filled with fresh tiles after compaction
    pub refilled: Vec<Coord>,
    pub score_delta: u32,
    /// Grid after this step settled
    pub grid: Board,
}

/// Totals of a fully drained cascade
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CascadeOutcome {
    pub total_score: u32,
    /// Number of iterations that found matches
    pub chains: u32,
    pub cells_removed: u32,
}

/// Resumable cascade progress. Holds no board borrow so a session can keep
/// it across calls while staying the single owner of its grid.
#[derive(Debug, Clone, Default)]
pub struct CascadeState {
    chain: u32,
    finished: bool,
}

impl CascadeState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn chain(&self) -> u32 {
        self.chain
    }

    pub fn finished(&self) -> bool {
        self.finished
    }

    /// Run one detect-remove-gravity-refill iteration on the board.
    /// Returns Ok(None) once the board is settled.
    pub fn step(
        &mut self,
        board: &mut Board,
        config: &GameConfig,
        rng: &mut SimpleRng,
    ) -> Result<Option<CascadeStep>, CoreError> {
        if self.finished {
            return Ok(None);
        }

        let matches = find_matches(board);
        if matches.is_empty() {
            self.finished = true;
            return Ok(None);
        }

        if self.chain >= config.cascade_cap {
            self.finished = true;
            return Err(CoreError::CascadeOverrun {
                chain: self.chain + 1,
            });
        }
        self.chain += 1;

        let removed = matches.cells().to_vec();
        for &coord in &removed {
            board.set(coord, None);
        }
        let score_delta = step_score(removed.len(), self.chain, config.base_cell_score);

        apply_gravity(board);
        let refilled = refill(board, rng);

        Ok(Some(CascadeStep {
            chain: self.chain,
            removed,
            refilled,
            score_delta,
            grid: board.clone(),
        }))
    }
}

/// Lazy iterator over cascade steps, borrowing the board and RNG.
/// Forward-only; stopping mid-sequence leaves the board mid-cascade.
pub struct CascadeSteps<'a> {
    state: CascadeState,
    board: &'a mut Board,
    config: &'a GameConfig,
    rng: &'a mut SimpleRng,
}

impl<'a> CascadeSteps<'a> {
    pub fn new(board: &'a mut Board, config: &'a GameConfig, rng: &'a mut SimpleRng) -> Self {
        Self {
            state: CascadeState::new(),
            board,
            config,
            rng,
        }
    }
}

impl Iterator for CascadeSteps<'_> {
    type Item = Result<CascadeStep, CoreError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.state.step(self.board, self.config, self.rng).transpose()
    }
}

/// Drain every step in place and return the totals.
/// Post-condition on success: `find_matches(board)` is empty.
pub fn resolve(
    board: &mut Board,
    config: &GameConfig,
    rng: &mut SimpleRng,
) -> Result<CascadeOutcome, CoreError> {
    let mut state = CascadeState::new();
    let mut outcome = CascadeOutcome::default();
    while let Some(step) = state.step(board, config, rng)? {
        outcome.total_score = outcome.total_score.saturating_add(step.score_delta);
        outcome.chains = step.chain;
        outcome.cells_removed += step.removed.len() as u32;
    }
    Ok(outcome)
}

/// Compact every column toward the high row index, preserving the relative
/// order of non-empty cells and leaving the holes at the top.
pub fn apply_gravity(board: &mut Board) {
    let size = board.size() as usize;
    for col in 0..size {
        let mut stack: ArrayVec<Cell, MAX_BOARD_SIZE> = ArrayVec::new();
        for row in 0..size {
            if let Some(kind) = board.kind_at(Coord::new(row as u8, col as u8)) {
                stack.push(Some(kind));
            }
        }

        let holes = size - stack.len();
        let cells = board.cells_mut();
        for row in 0..size {
            cells[row * size + col] = if row < holes {
                None
            } else {
                stack[row - holes]
            };
        }
    }
}

/// Fill every empty cell with a fresh random kind, returning the filled
/// coordinates in row-major order.
pub fn refill(board: &mut Board, rng: &mut SimpleRng) -> Vec<Coord> {
    let size = board.size() as usize;
    let kind_count = board.kind_count();
    let mut refilled = Vec::new();
    for row in 0..size {
        for col in 0..size {
            let coord = Coord::new(row as u8, col as u8);
            if board.kind_at(coord).is_none() {
                board.set(coord, Some(rng.next_kind(kind_count)));
                refilled.push(coord);
            }
        }
    }
    refilled
}
