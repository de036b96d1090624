//! Core types shared across the workspace.
//! This crate contains pure data types with no external dependencies.

use std::fmt;

/// Board size limits (boards are square)
pub const MIN_BOARD_SIZE: usize = 4;
pub const MAX_BOARD_SIZE: usize = 16;

/// Tile kind limits
pub const MIN_KIND_COUNT: u8 = 3;
pub const MAX_KIND_COUNT: u8 = 8;

/// Minimum run length that counts as a match
pub const MIN_RUN_LEN: usize = 3;

/// Default tuning, matching the observed 6x6 / 4-kind / 20-move variant
pub const DEFAULT_BOARD_SIZE: u8 = 6;
pub const DEFAULT_KIND_COUNT: u8 = 4;
pub const DEFAULT_STARTING_MOVES: u32 = 20;
pub const DEFAULT_BASE_CELL_SCORE: u32 = 10;

/// Bound on board-repair passes during generation.
/// Exceeding it means a logic or RNG defect, not a normal outcome.
pub const GENERATION_PASS_LIMIT: u32 = 32;

/// Defensive bound on cascade iterations. A legitimate chain never gets
/// close; hitting it is surfaced as an error, not silent truncation.
pub const DEFAULT_CASCADE_CAP: u32 = 300;

/// Tile category in range `[1, kind_count]`, determines match compatibility
pub type TileKind = u8;

/// Cell on the board (None = empty, awaiting refill)
pub type Cell = Option<TileKind>;

/// Cell coordinate, 0-indexed. Row 0 is the top edge; gravity compacts
/// toward the high row index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Coord {
    pub row: u8,
    pub col: u8,
}

impl Coord {
    pub fn new(row: u8, col: u8) -> Self {
        Self { row, col }
    }

    /// Manhattan distance to another coordinate
    pub fn manhattan(&self, other: Coord) -> u32 {
        self.row.abs_diff(other.row) as u32 + self.col.abs_diff(other.col) as u32
    }

    /// Four-directional adjacency (Manhattan distance exactly 1)
    pub fn is_adjacent(&self, other: Coord) -> bool {
        self.manhattan(other) == 1
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Whether a swap attempt consumes a move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MovePolicy {
    /// Only a reverted (non-matching) swap costs a move
    #[default]
    FailedSwapOnly,
    /// Every attempted swap costs a move, matched or not
    EverySwap,
}

impl MovePolicy {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "failedswaponly" | "failed_swap_only" => Some(MovePolicy::FailedSwapOnly),
            "everyswap" | "every_swap" => Some(MovePolicy::EverySwap),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MovePolicy::FailedSwapOnly => "failedSwapOnly",
            MovePolicy::EverySwap => "everySwap",
        }
    }
}

/// What a non-adjacent second selection does to the pending cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ReselectPolicy {
    /// The new cell replaces the pending selection
    #[default]
    Reanchor,
    /// The selection is cleared entirely
    Deselect,
}

impl ReselectPolicy {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "reanchor" => Some(ReselectPolicy::Reanchor),
            "deselect" => Some(ReselectPolicy::Deselect),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ReselectPolicy::Reanchor => "reanchor",
            ReselectPolicy::Deselect => "deselect",
        }
    }
}

/// Session input phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    /// No cell selected
    Idle,
    /// One cell selected, waiting for the second tap
    OneSelected,
    /// Swap accepted, cascade in flight, input locked
    Resolving,
}

impl Phase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Idle => "idle",
            Phase::OneSelected => "oneSelected",
            Phase::Resolving => "resolving",
        }
    }
}

/// Result of feeding one cell-select event into the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SelectOutcome {
    /// First cell of a pair selected
    Selected,
    /// Pending selection cleared (same cell tapped, or deselect policy)
    Deselected,
    /// Pending selection replaced by a non-adjacent cell
    Reanchored,
    /// Adjacent swap produced a match; cascade is pending
    SwapMatched,
    /// Adjacent swap matched nothing; grid restored, move charged
    SwapReverted,
    /// Input ignored (resolving in flight, or game over)
    Ignored,
    /// Out-of-bounds coordinate, state unchanged
    Rejected,
}

impl SelectOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            SelectOutcome::Selected => "selected",
            SelectOutcome::Deselected => "deselected",
            SelectOutcome::Reanchored => "reanchored",
            SelectOutcome::SwapMatched => "swapMatched",
            SelectOutcome::SwapReverted => "swapReverted",
            SelectOutcome::Ignored => "ignored",
            SelectOutcome::Rejected => "rejected",
        }
    }
}

/// Event emitted by the session for host-side effects (UI, analytics).
/// Consumed via `take_last_event`, one slot at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    /// One cascade step settled
    ScoreChanged { delta: u32, total: u32, chain: u32 },
    /// Move budget exhausted with no resolution pending
    GameOver { final_score: u32 },
}

/// Internal/fatal core errors. These indicate a logic or RNG defect,
/// never a normal game event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoreError {
    InvalidConfig(&'static str),
    /// The generator could not repair the grid to match-free within bounds
    GenerationFailed { passes: u32 },
    /// The cascade loop exceeded its defensive iteration cap
    CascadeOverrun { chain: u32 },
}

impl fmt::Display for CoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CoreError::InvalidConfig(msg) => write!(f, "invalid configuration: {}", msg),
            CoreError::GenerationFailed { passes } => {
                write!(f, "could not generate match-free grid in {} passes", passes)
            }
            CoreError::CascadeOverrun { chain } => {
                write!(f, "cascade exceeded safety cap at chain {}", chain)
            }
        }
    }
}

impl std::error::Error for CoreError {}

/// Game tuning. One parameterized configuration replaces the divergent
/// per-variant rewrites of the original app.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameConfig {
    /// Board side length (square board)
    pub size: u8,
    /// Number of distinct tile kinds, values drawn from `[1, kind_count]`
    pub kind_count: u8,
    /// Starting move budget
    pub starting_moves: u32,
    /// Points per removed cell before the chain multiplier
    pub base_cell_score: u32,
    pub move_policy: MovePolicy,
    pub reselect_policy: ReselectPolicy,
    /// Defensive cascade iteration cap
    pub cascade_cap: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            size: DEFAULT_BOARD_SIZE,
            kind_count: DEFAULT_KIND_COUNT,
            starting_moves: DEFAULT_STARTING_MOVES,
            base_cell_score: DEFAULT_BASE_CELL_SCORE,
            move_policy: MovePolicy::default(),
            reselect_policy: ReselectPolicy::default(),
            cascade_cap: DEFAULT_CASCADE_CAP,
        }
    }
}

impl GameConfig {
    pub fn validate(&self) -> Result<(), CoreError> {
        if (self.size as usize) < MIN_BOARD_SIZE || (self.size as usize) > MAX_BOARD_SIZE {
            return Err(CoreError::InvalidConfig("board size out of range"));
        }
        if self.kind_count < MIN_KIND_COUNT || self.kind_count > MAX_KIND_COUNT {
            return Err(CoreError::InvalidConfig("kind count out of range"));
        }
        if self.base_cell_score == 0 {
            return Err(CoreError::InvalidConfig("base cell score must be positive"));
        }
        if self.cascade_cap == 0 {
            return Err(CoreError::InvalidConfig("cascade cap must be positive"));
        }
        Ok(())
    }
}
