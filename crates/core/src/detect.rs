//! Match detector - pure scan of a grid snapshot for runs of 3+
//!
//! Rows are scanned left-to-right and columns top-to-bottom, accumulating
//! consecutive equal non-empty kinds; every cell of a run of length >= 3 is
//! marked matched. An empty cell always terminates a run. The union of the
//! straight runs is then split into maximal connected same-kind groups, so
//! an L or T cluster counts as one group for bonus purposes.

use arrayvec::ArrayVec;

use match3_types::{Coord, TileKind, MAX_BOARD_SIZE, MIN_RUN_LEN};

use crate::board::Board;

/// A maximal connected same-kind region containing at least one run of 3+
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchGroup {
    pub kind: TileKind,
    /// Sorted (row-major) member cells
    pub cells: Vec<Coord>,
}

/// All matched cells of one grid snapshot
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchSet {
    /// Sorted, deduplicated union of all runs
    cells: Vec<Coord>,
    groups: Vec<MatchGroup>,
}

impl MatchSet {
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Number of matched cells
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn cells(&self) -> &[Coord] {
        &self.cells
    }

    pub fn groups(&self) -> &[MatchGroup] {
        &self.groups
    }

    pub fn contains(&self, coord: Coord) -> bool {
        self.cells.binary_search(&coord).is_ok()
    }
}

/// Scan a grid for all matched cells. Pure and deterministic; called after
/// every swap and after every gravity-refill step.
pub fn find_matches(board: &Board) -> MatchSet {
    let size = board.size() as usize;
    let mut matched = vec![false; size * size];

    // Horizontal runs, one row at a time
    for row in 0..size {
        let mut run: ArrayVec<Coord, MAX_BOARD_SIZE> = ArrayVec::new();
        let mut run_kind: Option<TileKind> = None;
        for col in 0..=size {
            let coord = Coord::new(row as u8, col as u8);
            // One past the end acts as a flush sentinel
            let kind = if col < size { board.kind_at(coord) } else { None };
            if kind.is_some() && kind == run_kind {
                run.push(coord);
                continue;
            }
            flush_run(&run, size, &mut matched);
            run.clear();
            run_kind = kind;
            if kind.is_some() {
                run.push(coord);
            }
        }
    }

    // Vertical runs, one column at a time
    for col in 0..size {
        let mut run: ArrayVec<Coord, MAX_BOARD_SIZE> = ArrayVec::new();
        let mut run_kind: Option<TileKind> = None;
        for row in 0..=size {
            let coord = Coord::new(row as u8, col as u8);
            let kind = if row < size { board.kind_at(coord) } else { None };
            if kind.is_some() && kind == run_kind {
                run.push(coord);
                continue;
            }
            flush_run(&run, size, &mut matched);
            run.clear();
            run_kind = kind;
            if kind.is_some() {
                run.push(coord);
            }
        }
    }

    collect_groups(board, &matched)
}

fn flush_run(run: &[Coord], size: usize, matched: &mut [bool]) {
    if run.len() < MIN_RUN_LEN {
        return;
    }
    for coord in run {
        matched[coord.row as usize * size + coord.col as usize] = true;
    }
}

/// Split the matched mask into connected same-kind components via flood
/// fill over 4-adjacent neighbors, merging a cell's horizontal and vertical
/// runs into one group.
fn collect_groups(board: &Board, matched: &[bool]) -> MatchSet {
    let size = board.size() as usize;
    let mut cells = Vec::new();
    let mut groups = Vec::new();
    let mut visited = vec![false; size * size];

    for idx in 0..size * size {
        if !matched[idx] {
            continue;
        }
        let coord = Coord::new((idx / size) as u8, (idx % size) as u8);
        cells.push(coord);
        if visited[idx] {
            continue;
        }

        // Matched cells always hold a kind; empty cells never enter a run
        let Some(kind) = board.kind_at(coord) else {
            continue;
        };

        let mut members = Vec::new();
        let mut stack = vec![idx];
        visited[idx] = true;
        while let Some(at) = stack.pop() {
            let (row, col) = (at / size, at % size);
            members.push(Coord::new(row as u8, col as u8));

            let mut push = |r: usize, c: usize| {
                let next = r * size + c;
                if matched[next]
                    && !visited[next]
                    && board.kind_at(Coord::new(r as u8, c as u8)) == Some(kind)
                {
                    visited[next] = true;
                    stack.push(next);
                }
            };
            if row > 0 {
                push(row - 1, col);
            }
            if row + 1 < size {
                push(row + 1, col);
            }
            if col > 0 {
                push(row, col - 1);
            }
            if col + 1 < size {
                push(row, col + 1);
            }
        }

        members.sort_unstable();
        groups.push(MatchGroup {
            kind,
            cells: members,
        });
    }

    // Row-major iteration already yields sorted, deduplicated cells
    MatchSet { cells, groups }
}
