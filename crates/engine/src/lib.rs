//! Move scanner - enumerates the swaps that would produce a match
//!
//! Pure analysis over a board snapshot; never touches a live session. Used
//! for hint UIs, dead-board detection, and headless bots. Each of the
//! 2*N*(N-1) orientation-unique adjacent pairs is tried on a scratch copy
//! and kept when the swapped grid has a non-empty match set.

use match3_core::{find_matches, Board};
use match3_types::Coord;

/// One swap that would match, ranked by how many cells it removes
/// immediately (cascade follow-ups are not simulated)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwapCandidate {
    pub a: Coord,
    pub b: Coord,
    /// Matched cells of the post-swap grid, sorted row-major
    pub matched: Vec<Coord>,
}

impl SwapCandidate {
    pub fn matched_count(&self) -> usize {
        self.matched.len()
    }
}

/// Every matching swap of the grid, in row-major order of the first cell.
/// Each pair appears once, as (cell, right neighbor) or (cell, low neighbor).
pub fn find_matching_swaps(board: &Board) -> Vec<SwapCandidate> {
    let size = board.size();
    let mut scratch = board.clone();
    let mut candidates = Vec::new();

    let mut probe = |scratch: &mut Board, a: Coord, b: Coord| {
        scratch.swap(a, b);
        let matches = find_matches(scratch);
        if !matches.is_empty() {
            candidates.push(SwapCandidate {
                a,
                b,
                matched: matches.cells().to_vec(),
            });
        }
        // Undo, keeping the scratch grid identical to the input
        scratch.swap(a, b);
    };

    for row in 0..size {
        for col in 0..size {
            let at = Coord::new(row, col);
            if col + 1 < size {
                probe(&mut scratch, at, Coord::new(row, col + 1));
            }
            if row + 1 < size {
                probe(&mut scratch, at, Coord::new(row + 1, col));
            }
        }
    }

    candidates
}

/// Whether any adjacent swap would produce a match (dead-board detection).
/// Stops at the first hit instead of scanning the whole grid.
pub fn has_available_move(board: &Board) -> bool {
    let size = board.size();
    let mut scratch = board.clone();

    let probe = |scratch: &mut Board, a: Coord, b: Coord| {
        scratch.swap(a, b);
        let hit = !find_matches(scratch).is_empty();
        scratch.swap(a, b);
        hit
    };

    for row in 0..size {
        for col in 0..size {
            let at = Coord::new(row, col);
            if col + 1 < size && probe(&mut scratch, at, Coord::new(row, col + 1)) {
                return true;
            }
            if row + 1 < size && probe(&mut scratch, at, Coord::new(row + 1, col)) {
                return true;
            }
        }
    }

    false
}

/// The swap removing the most cells immediately, if any.
/// Ties keep the earliest candidate in scan order, so the pick is
/// deterministic for a given grid.
pub fn best_swap(board: &Board) -> Option<SwapCandidate> {
    let mut best: Option<SwapCandidate> = None;
    for candidate in find_matching_swaps(board) {
        let better = match &best {
            None => true,
            Some(current) => candidate.matched_count() > current.matched_count(),
        };
        if better {
            best = Some(candidate);
        }
    }
    best
}
