//! Board module - owns the grid of tile values
//!
//! The board is a square N x N grid where each cell is empty or holds a tile
//! kind in `[1, kind_count]`. Storage is a flat row-major Vec for cache
//! locality. Coordinates are (row, col) with row 0 at the top; gravity
//! compacts toward the high row index.

use match3_types::{Cell, Coord, CoreError, GameConfig, TileKind, GENERATION_PASS_LIMIT};

use crate::detect::find_matches;
use crate::rng::SimpleRng;

/// The game board - square grid using flat array storage
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    size: u8,
    kind_count: u8,
    /// Flat array of cells, row-major order (row * size + col)
    cells: Vec<Cell>,
}

impl Board {
    /// All-empty board for the generator and in-crate tests. Callers reach
    /// validated grids through `generate` or `from_rows`; an unchecked size
    /// here would overflow the detector's bounded scratch buffers.
    pub(crate) fn empty(size: u8, kind_count: u8) -> Self {
        Self {
            size,
            kind_count,
            cells: vec![None; size as usize * size as usize],
        }
    }

    /// Generate a match-free board: fill every cell with a uniformly random
    /// kind, then repair accidental runs by re-rolling offending cells until
    /// a full re-check of both axes comes up empty.
    ///
    /// Post-condition: `find_matches` on the returned board is empty.
    /// Exhausting the pass bound is a `GenerationFailed` error, never a
    /// silently unrepaired board.
    pub fn generate(config: &GameConfig, rng: &mut SimpleRng) -> Result<Self, CoreError> {
        config.validate()?;

        let mut board = Self::empty(config.size, config.kind_count);
        for cell in &mut board.cells {
            *cell = Some(rng.next_kind(config.kind_count));
        }

        for _pass in 0..GENERATION_PASS_LIMIT {
            let matches = find_matches(&board);
            if matches.is_empty() {
                return Ok(board);
            }
            for &coord in matches.cells() {
                board.reroll_cell(coord, rng);
            }
        }

        Err(CoreError::GenerationFailed {
            passes: GENERATION_PASS_LIMIT,
        })
    }

    /// Re-roll one cell to a kind that differs from all four orthogonal
    /// neighbors when possible, so the cell drops out of every run through
    /// it. With few kinds the neighbors can cover every choice; then any
    /// different kind is taken and the outer re-check pass catches leftovers.
    fn reroll_cell(&mut self, coord: Coord, rng: &mut SimpleRng) {
        let current = self.get(coord).flatten();
        let neighbors = self.neighbor_kinds(coord);

        let start = rng.next_range(self.kind_count as u32) as u8;
        let mut fallback = None;
        for offset in 0..self.kind_count {
            let kind = (start + offset) % self.kind_count + 1;
            if !neighbors.contains(&Some(kind)) {
                self.set(coord, Some(kind));
                return;
            }
            if Some(kind) != current && fallback.is_none() {
                fallback = Some(kind);
            }
        }
        if let Some(kind) = fallback {
            self.set(coord, Some(kind));
        }
    }

    fn neighbor_kinds(&self, coord: Coord) -> [Cell; 4] {
        let mut kinds = [None; 4];
        if coord.row > 0 {
            kinds[0] = self.get(Coord::new(coord.row - 1, coord.col)).flatten();
        }
        if coord.col > 0 {
            kinds[1] = self.get(Coord::new(coord.row, coord.col - 1)).flatten();
        }
        kinds[2] = self.get(Coord::new(coord.row + 1, coord.col)).flatten();
        kinds[3] = self.get(Coord::new(coord.row, coord.col + 1)).flatten();
        kinds
    }

    /// Build a board from row vectors, with 0 meaning empty.
    /// Used by hosts seeding fixed puzzles and by tests crafting grids.
    pub fn from_rows(kind_count: u8, rows: &[Vec<u8>]) -> Result<Self, CoreError> {
        let size = rows.len();
        if !(match3_types::MIN_BOARD_SIZE..=match3_types::MAX_BOARD_SIZE).contains(&size) {
            return Err(CoreError::InvalidConfig("row count out of range"));
        }
        if rows.iter().any(|row| row.len() != size) {
            return Err(CoreError::InvalidConfig("grid is not square"));
        }

        let mut cells = Vec::with_capacity(size * size);
        for row in rows {
            for &value in row {
                if value > kind_count {
                    return Err(CoreError::InvalidConfig("tile kind above kind count"));
                }
                cells.push(if value == 0 { None } else { Some(value) });
            }
        }

        Ok(Self {
            size: size as u8,
            kind_count,
            cells,
        })
    }

    /// Encode to row vectors with 0 for empty (snapshot/wire form)
    pub fn to_rows(&self) -> Vec<Vec<u8>> {
        let size = self.size as usize;
        (0..size)
            .map(|row| {
                self.cells[row * size..(row + 1) * size]
                    .iter()
                    .map(|cell| cell.unwrap_or(0))
                    .collect()
            })
            .collect()
    }

    /// Calculate flat index from a coordinate
    #[inline(always)]
    fn index(&self, coord: Coord) -> Option<usize> {
        if coord.row >= self.size || coord.col >= self.size {
            return None;
        }
        Some(coord.row as usize * self.size as usize + coord.col as usize)
    }

    pub fn size(&self) -> u8 {
        self.size
    }

    pub fn kind_count(&self) -> u8 {
        self.kind_count
    }

    pub fn in_bounds(&self, coord: Coord) -> bool {
        coord.row < self.size && coord.col < self.size
    }

    /// Get cell at a coordinate. Returns None if out of bounds.
    pub fn get(&self, coord: Coord) -> Option<Cell> {
        self.index(coord).map(|idx| self.cells[idx])
    }

    /// Tile kind at a coordinate, or None for out of bounds / empty
    pub fn kind_at(&self, coord: Coord) -> Option<TileKind> {
        self.get(coord).flatten()
    }

    /// Set cell at a coordinate. Returns false if out of bounds.
    pub fn set(&mut self, coord: Coord, cell: Cell) -> bool {
        match self.index(coord) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Exchange two four-directionally adjacent cells.
    /// Non-adjacent or out-of-bounds pairs are a caller error: the board is
    /// left untouched and false is returned. Swapping the same pair twice
    /// restores the original grid.
    pub fn swap(&mut self, a: Coord, b: Coord) -> bool {
        if !a.is_adjacent(b) {
            return false;
        }
        let (Some(ia), Some(ib)) = (self.index(a), self.index(b)) else {
            return false;
        };
        self.cells.swap(ia, ib);
        true
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub(crate) fn cells_mut(&mut self) -> &mut [Cell] {
        &mut self.cells
    }
}
